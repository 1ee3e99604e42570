//! glossa-cli - The command-line host for the ΓΛΩΣΣΑ interpreter.
//!
//! This is the main entry point for the glossa-cli application.
//! It uses clap for argument parsing and dispatches to the `run` and
//! `check` subcommands.

mod commands;
mod config;
mod diagnostics;
mod error;
mod stdio;
mod tracing_debugger;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    check::{run_check, CheckArgs},
    run::{run_program, RunArgs},
};
use config::Config;

/// glossa-cli - run and check ΓΛΩΣΣΑ programs
#[derive(Parser, Debug)]
#[command(name = "glossa")]
#[command(author = "Glossa Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run and check ΓΛΩΣΣΑ programs", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "GLOSSA_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GLOSSA_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "GLOSSA_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for glossa-cli.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a ΓΛΩΣΣΑ program
    Run(RunCommandArgs),

    /// Check a ΓΛΩΣΣΑ program for syntax errors without running it
    Check(CheckCommandArgs),
}

/// Arguments for the run subcommand.
#[derive(Parser, Debug)]
struct RunCommandArgs {
    /// Path to the source file to run
    path: PathBuf,

    /// Attach the tracing debugger, logging each statement as it runs
    #[arg(long)]
    trace: bool,
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommandArgs {
    /// Path to the source file to check
    path: PathBuf,
}

/// Main entry point for glossa-cli.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;
    let config = load_config(cli.config.as_deref(), cli.verbose)?;
    execute_command(cli.command, config)?;
    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool, no_color: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}

/// Load configuration from file or use defaults, then layer CLI flags on
/// top of whatever the file set.
fn load_config(config_path: Option<&std::path::Path>, verbose: bool) -> anyhow::Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    config.verbose = config.verbose || verbose;
    Ok(config)
}

/// Execute the selected command.
fn execute_command(command: Commands, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => {
            let run_args = RunArgs {
                path: args.path,
                trace: args.trace,
            };
            run_program(run_args, config)?;
        }
        Commands::Check(args) => {
            let check_args = CheckArgs { path: args.path };
            run_check(check_args)?;
        }
    }
    Ok(())
}
