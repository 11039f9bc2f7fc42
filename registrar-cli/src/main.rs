//! Registrar: course registration driver.
//!
//! # Usage
//!
//! ```text
//! registrar courses [--catalog <path>] [--json]
//! registrar session [--catalog <path>] [--strict]
//! ```
//!
//! `session` reads one command per line from stdin and applies it to a single
//! in-memory registry; see `help` inside a session for the command list.
//! State lives only as long as the process.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use commands::{courses::CoursesArgs, session::SessionArgs};
use registrar_core::{catalog, Registry};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "registrar",
    version,
    about = "Register students for a fixed catalog of courses",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the course catalog.
    Courses(CoursesArgs),

    /// Run a registration session, reading commands from stdin.
    Session(SessionArgs),
}

// ---------------------------------------------------------------------------
// Shared catalog argument
// ---------------------------------------------------------------------------

/// `--catalog <path>`; falls back to ~/.registrar/catalog.yaml, then the
/// built-in catalog.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// YAML catalog file to load instead of the default.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

impl CatalogArgs {
    pub fn load_registry(&self) -> Result<Registry> {
        let catalog = catalog::resolve_catalog(self.catalog.as_deref())
            .context("failed to load course catalog")?;
        Registry::from_catalog(&catalog).context("invalid course catalog")
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Courses(args) => args.run(),
        Commands::Session(args) => args.run(),
    }
}

/// Diagnostics go to stderr so stdout stays clean for tables and JSON.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
