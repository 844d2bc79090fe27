//! Command-line host for the debug functions.
//!
//! Plays the host server's part: decodes a call expression, dispatches it and
//! reports the text result (stdout, exit 0) or the raised failure (stderr,
//! exit 1). Bad expressions and bad configuration exit with 2.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use debug_functions::expr;
use debug_functions::model::config::AppConfig;
use debug_functions::{DebugFunctions, DiagnosticResult, Dispatcher};

#[derive(Parser)]
#[command(name = "debug-functions")]
#[command(about = "Run diagnostic fault-injection functions", version)]
struct Cli {
    /// Path to a config file merged over the defaults
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// List registered functions and their usage
    #[arg(long)]
    list: bool,

    /// Call expression, e.g. `sleep(50)` or `error(3)`
    #[arg(required_unless_present = "list")]
    expression: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("debug-functions: config error: {err:#}");
            return ExitCode::from(2);
        }
    };

    // Initialize logging to file (never stdout)
    if let Err(err) = init_logging(&config) {
        eprintln!("debug-functions: logging error: {err:#}");
        return ExitCode::from(2);
    }

    match run(cli, &config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("debug-functions: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Events go straight to the file with no background worker. `abort` skips
/// destructors, so nothing may be left queued when it fires.
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "debug-functions.log");
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&config.logging.filter)?)
        .init();

    Ok(())
}

fn run(cli: Cli, config: &AppConfig) -> Result<ExitCode> {
    tracing::info!("debug-functions starting");

    let mut dispatcher = Dispatcher::new(config.error_kinds.clone());
    DebugFunctions::initialize(&mut dispatcher, &config.functions)?;

    if cli.list {
        for line in dispatcher.help() {
            println!("{line}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let call = expr::parse(&cli.expression.join(" "))?;

    match dispatcher.invoke(&call.name, &call.args) {
        DiagnosticResult::TextMessage(text) => {
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        DiagnosticResult::TypedFailure(failure) => {
            let code = dispatcher.error_kinds().code_for(failure.kind);
            eprintln!(
                "{} ({code}): {} [{}:{}]",
                failure.kind, failure.message, failure.file, failure.line
            );
            Ok(ExitCode::from(1))
        }
    }
}
