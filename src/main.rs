//! Palabrle - CLI
//!
//! Spanish Wordle in the terminal, plus the HTTP word service that backs it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use palabrle::{
    commands::run_simple,
    config::{OracleArgs, ServeArgs},
    interactive::{App, run_tui},
    server::{self, AppState},
    telemetry::{self, LogTarget},
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

#[derive(Parser)]
#[command(
    name = "palabrle",
    about = "Wordle en español: palabras de 3 a 10 letras generadas por un modelo de lenguaje",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    oracle: OracleArgs,

    /// Initial word length (3-10)
    #[arg(short, long, global = true, default_value_t = 5)]
    length: usize,

    /// Write logs to this file while the full-screen UI is running
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Line mode: type a word, press Enter
    Simple,

    /// Run the HTTP word service
    Serve(ServeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => {
            telemetry::init(cli.log_file.map_or(LogTarget::Off, LogTarget::File))?;
            run_play_command(&cli.oracle, cli.length)
        }
        Commands::Simple => {
            telemetry::init(LogTarget::Stderr)?;
            run_simple_command(&cli.oracle, cli.length)
        }
        Commands::Serve(serve) => {
            telemetry::init(LogTarget::Json)?;
            run_serve_command(&cli.oracle, serve)
        }
    }
}

fn run_play_command(oracle_args: &OracleArgs, length: usize) -> Result<()> {
    let runtime = Runtime::new().context("starting async runtime")?;
    let oracle = oracle_args.client_oracle()?;

    let app = App::new(oracle, runtime.handle().clone(), length)?;
    run_tui(app)
}

fn run_simple_command(oracle_args: &OracleArgs, length: usize) -> Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let oracle = oracle_args.client_oracle()?;

    run_simple(oracle.as_ref(), &runtime, length)
}

fn run_serve_command(oracle_args: &OracleArgs, serve: ServeArgs) -> Result<()> {
    let oracle = Arc::new(oracle_args.openai()?);
    let state = AppState {
        source: oracle.clone(),
        validator: oracle,
    };

    actix_web::rt::System::new()
        .block_on(server::run(serve.into(), state))
        .context("word service failed")
}
