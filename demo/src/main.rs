//! z/OS security platform demo CLI.
//!
//! Runs one security request through the configured platform variant and
//! prints the HTTP status and message body a REST service would return.
//!
//! Usage:
//!   cargo run -p demo -- authenticate ZOWE zowe
//!   cargo run -p demo -- authenticate BROKEN anything
//!   cargo run -p demo -- check-access FACILITY ZOWE.SAMPLE --level update
//!   cargo run -p demo -- --mode real whoami
//!   cargo run -p demo -- explain 168
//!   cargo run -p demo -- catalog

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use zcommons_contracts::{
    error::PlatformResult,
    failure::PlatformFailure,
    platform::{AccessLevel, PlatformVariant, Resource, SecurityOperation},
    returned::PlatformReturned,
};
use zcommons_core::{gateway::SecurityGateway, mapper::map_returned, ErrorResponse, PlatformErrno};
use zcommons_platform::{build_gateway, PlatformConfig};

/// Configuration used when `--config` is not given.
const BUNDLED_CONFIG: &str = include_str!("../../config/platform.toml");

// ── CLI definition ────────────────────────────────────────────────────────────

/// Exercise the z/OS security platform seam from the command line.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "z/OS security platform demo",
    long_about = "Runs authentication, password change and access checks against the\n\
                  real z/OS security services or the in-memory stub, and prints the\n\
                  REST response each outcome maps to."
)]
struct Cli {
    /// Platform configuration file (defaults to the bundled config/platform.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override `platform.security.mode`.
    #[arg(long, global = true, value_parser = parse_mode)]
    mode: Option<PlatformVariant>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify a user's password.
    Authenticate { userid: String, password: String },
    /// Change a user's password.
    ChangePassword {
        userid: String,
        old_password: String,
        new_password: String,
    },
    /// Check access to a general-resource profile.
    CheckAccess {
        class: String,
        entity: String,
        /// Requested level: none, read, update, control or alter.
        #[arg(long, default_value = "read")]
        level: AccessLevel,
        /// Check this user instead of the current one.
        #[arg(long)]
        user: Option<String>,
    },
    /// Print the current security principal.
    Whoami,
    /// Show how a password-service return code is classified.
    Explain {
        #[arg(allow_negative_numbers = true)]
        code: i32,
    },
    /// List the errno catalog.
    Catalog {
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn parse_mode(s: &str) -> Result<PlatformVariant, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "real" => Ok(PlatformVariant::Real),
        "stub" => Ok(PlatformVariant::Stub),
        other => Err(format!("unknown platform mode '{other}', expected real or stub")),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see every adapter call.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match execute(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Platform error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Command dispatch ──────────────────────────────────────────────────────────

/// Run the selected command. `Ok(false)` means the request was refused.
fn execute(cli: &Cli) -> PlatformResult<bool> {
    match &cli.command {
        Command::Authenticate { userid, password } => {
            Ok(report(gateway(cli)?.authenticate(userid, password)))
        }
        Command::ChangePassword {
            userid,
            old_password,
            new_password,
        } => Ok(report(
            gateway(cli)?.change_password(userid, old_password, new_password),
        )),
        Command::CheckAccess {
            class,
            entity,
            level,
            user,
        } => {
            let gateway = gateway(cli)?;
            let resource = Resource::new(class, entity);
            let outcome = match user {
                Some(userid) => gateway.check_user_access(userid, &resource, *level),
                None => gateway.check_access(&resource, *level),
            };
            Ok(report(outcome))
        }
        Command::Whoami => match gateway(cli)?.current_user() {
            Ok(userid) => {
                println!("200 OK");
                println!("{}", userid);
                Ok(true)
            }
            Err(failure) => Ok(report(Err(failure))),
        },
        Command::Explain { code } => {
            explain(*code);
            Ok(true)
        }
        Command::Catalog { json } => {
            print_catalog(*json);
            Ok(true)
        }
    }
}

fn gateway(cli: &Cli) -> PlatformResult<SecurityGateway> {
    let config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "loading platform configuration");
            PlatformConfig::from_file(path)?
        }
        None => PlatformConfig::from_toml_str(BUNDLED_CONFIG)?,
    };
    let config = match cli.mode {
        Some(mode) => config.with_mode(mode),
        None => config,
    };
    build_gateway(&config)
}

/// Print the REST rendering of `outcome`. Returns whether it succeeded.
fn report(outcome: Result<(), PlatformFailure>) -> bool {
    let failure = match outcome {
        Ok(()) => {
            println!("200 OK");
            return true;
        }
        Err(failure) => failure,
    };

    let response = ErrorResponse::from(&failure);
    response.log();
    println!("{}", response.status);
    match response.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to serialize response body: {}", e),
    }
    false
}

// ── Catalog ───────────────────────────────────────────────────────────────────

fn explain(code: i32) {
    let entry = PlatformErrno::lookup(code);
    let returned = PlatformReturned::failure(code, 0);

    println!("code:           {}", code);
    match entry {
        Some(entry) => println!("catalog entry:  {}", entry),
        None => println!("catalog entry:  (none)"),
    }

    let mut statuses = Vec::new();
    for operation in [SecurityOperation::Authenticate, SecurityOperation::CheckAccess] {
        if let Err(failure) = map_returned(operation, &returned) {
            if operation == SecurityOperation::Authenticate {
                println!("classification: {}", failure.classification());
                println!("kind:           {}", failure.kind());
                println!("explanation:    {}", failure.explanation());
                println!("log detail:     {}", failure.detail());
            }
            statuses.push(format!("{} on {}", ErrorResponse::from(&failure).status, operation));
        }
    }
    println!("HTTP status:    {}", statuses.join(", "));
}

fn print_catalog(json: bool) {
    if json {
        match serde_json::to_string_pretty(&PlatformErrno::ALL) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("failed to serialize catalog: {}", e),
        }
        return;
    }

    println!("{:<15} {:>5}  {:<15} EXPLANATION", "NAME", "ERRNO", "CLASSIFICATION");
    for entry in PlatformErrno::ALL {
        println!(
            "{:<15} {:>5}  {:<15} {}",
            entry.short_name(),
            entry.errno(),
            entry.classification().to_string(),
            entry.explanation()
        );
    }
}
