//! REST response messages.
//!
//! A `BasicMessage` is what REST endpoints put in a response body: a type,
//! a stable message number, and text. Each instance also gets a unique
//! instance id so a message shown to a user can be found in the server log.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a message. The letter suffix appears in readable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    Error,
    Warning,
    Info,
    Debug,
    Trace,
}

impl MessageType {
    /// The one-letter level code appended to message numbers.
    pub fn level_char(&self) -> char {
        match self {
            Self::Error => 'E',
            Self::Warning => 'W',
            Self::Info => 'I',
            Self::Debug => 'D',
            Self::Trace => 'T',
        }
    }
}

/// A typed, numbered message for REST responses.
///
/// Equality and hashing cover type, number and content; the instance id is
/// per-occurrence and deliberately excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicMessage {
    message_type: MessageType,
    message_number: String,
    message_content: String,
    #[serde(default = "Uuid::new_v4")]
    message_instance_id: Uuid,
}

impl BasicMessage {
    pub fn new(
        message_type: MessageType,
        message_number: impl Into<String>,
        message_content: impl Into<String>,
    ) -> Self {
        Self {
            message_type,
            message_number: message_number.into(),
            message_content: message_content.into(),
            message_instance_id: Uuid::new_v4(),
        }
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn message_number(&self) -> &str {
        &self.message_number
    }

    pub fn message_content(&self) -> &str {
        &self.message_content
    }

    pub fn message_instance_id(&self) -> Uuid {
        self.message_instance_id
    }

    /// Canonical log/console form: `"MAS0001E Message text."`.
    pub fn to_readable_text(&self) -> String {
        format!(
            "{}{} {}",
            self.message_number,
            self.message_type.level_char(),
            self.message_content
        )
    }

    /// Serialize to the JSON body shape used by REST responses.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl PartialEq for BasicMessage {
    fn eq(&self, other: &Self) -> bool {
        self.message_type == other.message_type
            && self.message_number == other.message_number
            && self.message_content == other.message_content
    }
}

impl Eq for BasicMessage {}

impl Hash for BasicMessage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.message_type.hash(state);
        self.message_number.hash(state);
        self.message_content.hash(state);
    }
}

impl fmt::Display for BasicMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_readable_text())
    }
}
