// crates/contact-desk-cli/src/main.rs
// ============================================================================
// Module: Contact Desk CLI Entry Point
// Description: Command dispatcher for serving and store administration.
// Purpose: Own process bootstrap: config, logging, store, and serve loop.
// Dependencies: clap, contact-desk-config, contact-desk-store-sqlite,
//               contact-desk-web, env_logger, log, thiserror, toml
// ============================================================================

//! ## Overview
//! The Contact Desk CLI wires the process together: load and validate
//! configuration, initialize logging, open the store, and run the serve
//! loop. A store that cannot be opened is fatal at startup: the technical
//! detail goes to the log, the user sees a generic message, and the process
//! exits non-zero.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use contact_desk_config::ContactDeskConfig;
use contact_desk_core::ContactStore;
use contact_desk_store_sqlite::SqliteContactStore;
use contact_desk_web::AppState;
use contact_desk_web::build_router;
use contact_desk_web::serve;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Model
// ============================================================================

/// Contact Desk: a contact-management CRUD web server.
#[derive(Debug, Parser)]
#[command(name = "contact-desk", version, about)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Create or migrate the database schema and exit.
    InitDb(CommonArgs),
    /// Print the effective configuration as TOML.
    ConfigShow(CommonArgs),
}

/// Arguments shared by every subcommand.
#[derive(Debug, Args)]
struct CommonArgs {
    /// Optional path to a TOML config file.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for the `serve` subcommand.
#[derive(Debug, Args)]
struct ServeArgs {
    /// Shared config argument.
    #[command(flatten)]
    common: CommonArgs,
    /// Bind address override (e.g. `127.0.0.1:9090`).
    #[arg(long = "bind", value_name = "ADDR")]
    bind: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// User-facing message; technical detail goes to the log instead.
    message: String,
}

impl CliError {
    /// Creates an error from a user-facing message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run() {
        Ok(code) => code,
        Err(error) => {
            let _ = write_stderr_line(&error.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => command_serve(&args),
        Commands::InitDb(args) => command_init_db(&args),
        Commands::ConfigShow(args) => command_config_show(&args),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `serve` command.
fn command_serve(args: &ServeArgs) -> CliResult<ExitCode> {
    let mut config = load_config(&args.common)?;
    if let Some(bind) = &args.bind {
        config.server.bind_addr.clone_from(bind);
        config.validate().map_err(|error| CliError::new(error.to_string()))?;
    }
    let store = open_store(&config)?;
    let state = AppState::new(store);
    let router = build_router(&state);
    serve(&config.server.bind_addr, config.server.max_body_bytes, &router).map_err(|error| {
        log::error!("serve loop failed: {error}");
        CliError::new("The server could not start. See the log for detail.")
    })?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `init-db` command.
fn command_init_db(args: &CommonArgs) -> CliResult<ExitCode> {
    let config = load_config(args)?;
    let store = open_store(&config)?;
    store.readiness().map_err(|error| {
        log::error!("store readiness probe failed: {error}");
        CliError::new("The contact store is not ready. See the log for detail.")
    })?;
    write_stdout_line(&format!("store initialized at {}", config.store.path.display()))
        .map_err(|error| CliError::new(format!("stdout write failed: {error}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `config-show` command.
fn command_config_show(args: &CommonArgs) -> CliResult<ExitCode> {
    let config = load_config(args)?;
    let rendered = toml::to_string_pretty(&config)
        .map_err(|error| CliError::new(format!("config render failed: {error}")))?;
    write_stdout_line(&rendered)
        .map_err(|error| CliError::new(format!("stdout write failed: {error}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Bootstrap Helpers
// ============================================================================

/// Loads and validates configuration from the optional file path.
fn load_config(args: &CommonArgs) -> CliResult<ContactDeskConfig> {
    ContactDeskConfig::load(args.config.as_deref())
        .map_err(|error| CliError::new(error.to_string()))
}

/// Opens the store, treating failure as fatal bootstrap error.
///
/// The technical detail is logged; the returned error carries only a
/// generic user-facing message.
fn open_store(config: &ContactDeskConfig) -> CliResult<Arc<dyn ContactStore>> {
    let sqlite_config = config.store.to_sqlite_config();
    match SqliteContactStore::new(&sqlite_config) {
        Ok(store) => Ok(Arc::new(store)),
        Err(error) => {
            log::error!("store open failed: {error}");
            Err(CliError::new("Could not open the contact store. See the log for detail."))
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}
