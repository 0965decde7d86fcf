mod commands;
mod diagnostics;
mod scanner;
mod watch;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lolspan::error::Error;

use crate::commands::OutputFormat;

#[derive(Parser)]
#[command(name = "lolspan", about = "Function-name highlight spans for LOLCODE", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Config file to use instead of ./.lolspan.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Emit log lines as JSON
    #[arg(long, global = true)]
    log_json: bool,
    /// Log each classification pass to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print function-name spans for files or directories
    Classify {
        /// Files or directories to classify
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Print the token type and modifier legend
    Legend {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List function names declared in a file
    Names {
        /// LOLCODE source file
        file: PathBuf,
    },
    /// Classify, then re-classify whenever the sources change
    Watch {
        /// Files or directories to watch
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    return match run(cli) {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}

/// Dispatch a parsed command line.
///
/// # Errors
///
/// Returns whatever the selected command returns.
fn run(cli: Cli) -> Result<ExitCode, Error> {
    match cli.command {
        Commands::Classify { paths, format } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::classify(&paths, format, &config)?;
        },
        Commands::Legend { json } => commands::legend(json)?,
        Commands::Names { file } => commands::names(&file)?,
        Commands::Watch { paths, format } => {
            let config = commands::load_config(cli.config.as_deref())?;
            return watch::run(&paths, format, &config);
        },
    }
    return Ok(ExitCode::SUCCESS);
}

/// Install the stderr subscriber. Warnings only unless `verbose`.
fn init_logging(verbose: bool, json: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
