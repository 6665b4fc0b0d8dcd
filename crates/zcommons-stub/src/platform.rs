//! `StubPlatform`: the in-memory security platform.
//!
//! Answers are synthesized from the errno catalog so that a stubbed refusal
//! classifies exactly like the same refusal from the host:
//!
//! | Situation                                      | Result               |
//! |------------------------------------------------|----------------------|
//! | scripted outcome for (userid, operation)       | the script           |
//! | unknown userid                                 | ESRCH (143)          |
//! | revoked userid                                 | EMVSSAFEXTRERR (163) |
//! | wrong password                                 | EACCES (111)         |
//! | correct password, expired                      | EMVSEXPIRE (168)     |
//! | invalid new password                           | EMVSPASSWORD (169)   |
//! | `NONE` requested                               | success              |
//! | no profile, or granted level below requested   | EACCES (111)         |
//!
//! Decision tables sit behind a `RwLock`: checks take the read side, seeding
//! and password changes take the write side. Seed before the first call.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use zeroize::Zeroizing;

use zcommons_contracts::{
    error::{PlatformError, PlatformResult},
    platform::{AccessLevel, PlatformVariant, Resource, SecurityOperation},
    returned::PlatformReturned,
};
use zcommons_core::{errno::PlatformErrno, traits::SecurityPlatform};

use crate::fixture::{StubFixture, StubUser};

/// Longest password or passphrase, in characters, the stub accepts on change.
pub const MAX_PASSWORD_LEN: usize = 100;

/// Calls kept in the journal. Older calls are dropped first.
pub const JOURNAL_CAPACITY: usize = 1024;

/// One journaled stub call. Passwords are never recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StubCall {
    pub operation: SecurityOperation,
    pub userid: String,
    pub success: bool,
    pub return_code: i32,
    pub at: DateTime<Utc>,
}

struct StubAccount {
    password: Zeroizing<String>,
    expired: bool,
    revoked: bool,
}

#[derive(Default)]
struct StubTables {
    current_user: String,
    users: HashMap<String, StubAccount>,
    grants: HashMap<Resource, HashMap<String, AccessLevel>>,
    outcomes: HashMap<(String, SecurityOperation), PlatformReturned>,
}

fn normalize(userid: &str) -> String {
    userid.trim().to_uppercase()
}

fn refuse(errno: PlatformErrno, text: String) -> PlatformReturned {
    PlatformReturned::failure(errno.errno(), 0).with_reason_text(text)
}

impl StubTables {
    fn scripted(&self, userid: &str, operation: SecurityOperation) -> Option<PlatformReturned> {
        self.outcomes.get(&(userid.to_string(), operation)).cloned()
    }

    fn authenticate(&self, userid: &str, password: &str) -> PlatformReturned {
        if let Some(returned) = self.scripted(userid, SecurityOperation::Authenticate) {
            return returned;
        }
        let Some(account) = self.users.get(userid) else {
            return refuse(PlatformErrno::Esrch, format!("user {userid} is not defined"));
        };
        if account.revoked {
            return refuse(PlatformErrno::Emvssafextrerr, format!("user {userid} is revoked"));
        }
        if account.password.as_str() != password {
            return refuse(PlatformErrno::Eacces, format!("password mismatch for {userid}"));
        }
        if account.expired {
            return refuse(PlatformErrno::Emvsexpire, format!("password for {userid} has expired"));
        }
        PlatformReturned::ok()
    }

    fn change_password(&mut self, userid: &str, old: &str, new: &str) -> PlatformReturned {
        if let Some(returned) = self.scripted(userid, SecurityOperation::ChangePassword) {
            return returned;
        }
        let Some(account) = self.users.get_mut(userid) else {
            return refuse(PlatformErrno::Esrch, format!("user {userid} is not defined"));
        };
        if account.revoked {
            return refuse(PlatformErrno::Emvssafextrerr, format!("user {userid} is revoked"));
        }
        if account.password.as_str() != old {
            return refuse(PlatformErrno::Eacces, format!("password mismatch for {userid}"));
        }
        if new.is_empty() || new.chars().count() > MAX_PASSWORD_LEN || new == old {
            return refuse(
                PlatformErrno::Emvspassword,
                format!("new password for {userid} rejected by password rules"),
            );
        }
        account.password = Zeroizing::new(new.to_string());
        account.expired = false;
        PlatformReturned::ok()
    }

    fn check_access(&self, userid: &str, resource: &Resource, level: AccessLevel) -> PlatformReturned {
        if let Some(returned) = self.scripted(userid, SecurityOperation::CheckAccess) {
            return returned;
        }
        if level == AccessLevel::None {
            return PlatformReturned::ok();
        }
        if !self.users.contains_key(userid) {
            return refuse(PlatformErrno::Esrch, format!("user {userid} is not defined"));
        }
        let Some(profile) = self.grants.get(resource) else {
            return refuse(PlatformErrno::Eacces, format!("no profile protects {resource}"));
        };
        let granted = profile.get(userid).copied().unwrap_or_default();
        if granted < level {
            return refuse(
                PlatformErrno::Eacces,
                format!("{userid} holds {granted} on {resource}, {level} requested"),
            );
        }
        PlatformReturned::ok()
    }
}

/// In-memory `SecurityPlatform` for development and unit tests off z/OS.
///
/// # Thread safety
///
/// All operations take `&self`. Lookups share a read lock; seeding methods
/// and password changes take the write lock. The call journal has its own
/// `Mutex` and holds at most [`JOURNAL_CAPACITY`] calls.
pub struct StubPlatform {
    tables: RwLock<StubTables>,
    journal: Mutex<VecDeque<StubCall>>,
}

impl StubPlatform {
    /// An empty stub: no users, no grants, default current user.
    pub fn new() -> Self {
        Self::from_fixture(&StubFixture::default())
    }

    /// Build a stub seeded from `fixture`.
    pub fn from_fixture(fixture: &StubFixture) -> Self {
        let mut tables = StubTables {
            current_user: normalize(&fixture.current_user),
            ..StubTables::default()
        };

        for user in &fixture.users {
            tables.users.insert(normalize(&user.userid), account_from(user));
        }
        for grant in &fixture.grants {
            tables
                .grants
                .entry(Resource::new(&grant.class, &grant.entity))
                .or_default()
                .insert(normalize(&grant.userid), grant.access);
        }
        for outcome in &fixture.outcomes {
            tables.outcomes.insert(
                (normalize(&outcome.userid), outcome.operation),
                outcome.to_returned(),
            );
        }

        info!(
            current_user = %tables.current_user,
            users = tables.users.len(),
            profiles = tables.grants.len(),
            scripted = tables.outcomes.len(),
            "stub security platform seeded"
        );

        Self {
            tables: RwLock::new(tables),
            journal: Mutex::new(VecDeque::with_capacity(JOURNAL_CAPACITY)),
        }
    }

    /// Parse a TOML fixture and build a stub from it.
    pub fn from_toml_str(s: &str) -> PlatformResult<Self> {
        Ok(Self::from_fixture(&StubFixture::from_toml_str(s)?))
    }

    /// Read a TOML fixture file and build a stub from it.
    pub fn from_file(path: &Path) -> PlatformResult<Self> {
        Ok(Self::from_fixture(&StubFixture::from_file(path)?))
    }

    /// Define or replace a user profile.
    pub fn add_user(&self, user: StubUser) -> PlatformResult<()> {
        self.write()?.users.insert(normalize(&user.userid), account_from(&user));
        Ok(())
    }

    /// Grant `userid` access `level` on `resource`, replacing any earlier grant.
    pub fn grant(&self, userid: &str, resource: &Resource, level: AccessLevel) -> PlatformResult<()> {
        self.write()?
            .grants
            .entry(resource.clone())
            .or_default()
            .insert(normalize(userid), level);
        Ok(())
    }

    /// Force `operation` for `userid` to return `returned`.
    pub fn script(
        &self,
        userid: &str,
        operation: SecurityOperation,
        returned: PlatformReturned,
    ) -> PlatformResult<()> {
        self.write()?
            .outcomes
            .insert((normalize(userid), operation), returned);
        Ok(())
    }

    pub fn set_current_user(&self, userid: &str) -> PlatformResult<()> {
        self.write()?.current_user = normalize(userid);
        Ok(())
    }

    /// The most recent authenticate / change / check calls, oldest first.
    pub fn calls(&self) -> Vec<StubCall> {
        self.journal
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    /// Drain the journal, returning its calls oldest first.
    pub fn take_calls(&self) -> Vec<StubCall> {
        self.journal
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .drain(..)
            .collect()
    }

    fn read(&self) -> PlatformResult<RwLockReadGuard<'_, StubTables>> {
        self.tables.read().map_err(|e| PlatformError::Unavailable {
            reason: format!("stub decision tables lock poisoned: {}", e),
        })
    }

    fn write(&self) -> PlatformResult<RwLockWriteGuard<'_, StubTables>> {
        self.tables.write().map_err(|e| PlatformError::Unavailable {
            reason: format!("stub decision tables lock poisoned: {}", e),
        })
    }

    fn record(&self, operation: SecurityOperation, userid: &str, returned: &PlatformReturned) {
        debug!(
            operation = %operation,
            userid = %userid,
            success = returned.is_success(),
            return_code = returned.return_code(),
            "stub security decision"
        );
        let call = StubCall {
            operation,
            userid: userid.to_string(),
            success: returned.is_success(),
            return_code: returned.return_code(),
            at: Utc::now(),
        };
        let mut journal = self
            .journal
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if journal.len() == JOURNAL_CAPACITY {
            journal.pop_front();
        }
        journal.push_back(call);
    }
}

impl Default for StubPlatform {
    fn default() -> Self {
        Self::new()
    }
}

fn account_from(user: &StubUser) -> StubAccount {
    StubAccount {
        password: Zeroizing::new(user.password.clone()),
        expired: user.expired,
        revoked: user.revoked,
    }
}

impl SecurityPlatform for StubPlatform {
    fn variant(&self) -> PlatformVariant {
        PlatformVariant::Stub
    }

    fn authenticate(&self, userid: &str, password: &str) -> PlatformResult<PlatformReturned> {
        let userid = normalize(userid);
        let returned = self.read()?.authenticate(&userid, password);
        self.record(SecurityOperation::Authenticate, &userid, &returned);
        Ok(returned)
    }

    fn change_password(
        &self,
        userid: &str,
        old_password: &str,
        new_password: &str,
    ) -> PlatformResult<PlatformReturned> {
        let userid = normalize(userid);
        let returned = self.write()?.change_password(&userid, old_password, new_password);
        self.record(SecurityOperation::ChangePassword, &userid, &returned);
        Ok(returned)
    }

    fn check_access(&self, resource: &Resource, level: AccessLevel) -> PlatformResult<PlatformReturned> {
        let (userid, returned) = {
            let tables = self.read()?;
            let userid = tables.current_user.clone();
            let returned = tables.check_access(&userid, resource, level);
            (userid, returned)
        };
        self.record(SecurityOperation::CheckAccess, &userid, &returned);
        Ok(returned)
    }

    fn check_user_access(
        &self,
        userid: &str,
        resource: &Resource,
        level: AccessLevel,
    ) -> PlatformResult<PlatformReturned> {
        let userid = normalize(userid);
        let returned = self.read()?.check_access(&userid, resource, level);
        self.record(SecurityOperation::CheckAccess, &userid, &returned);
        Ok(returned)
    }

    fn current_user(&self) -> PlatformResult<String> {
        Ok(self.read()?.current_user.clone())
    }
}
