mod demo;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use navstack::Controller;
use navstack::config::{self, CliOverrides};
use navstack::logging::LogSink;
use navstack::tui::{Program, ProgramError};
use simplelog::{ConfigBuilder, WriteLogger};

use demo::Menu;

#[derive(Parser)]
#[command(name = "navstack", about = "Screen stack demo for the terminal")]
struct Args {
    /// Config file (defaults to ~/.navstack/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Input poll interval in milliseconds
    #[arg(long)]
    tick_rate_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to a file. Its path comes
    // from the config, so lines logged while loading it are held back.
    let sink = LogSink::new();
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let _ = WriteLogger::init(LevelFilter::Trace, log_config, sink.clone());
    log::set_max_level(config::DEFAULT_LOG_LEVEL);

    let loaded = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let file_config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            tick_rate_ms: args.tick_rate_ms,
            log_level: args.log_level.as_deref(),
            log_file: args.log_file.as_deref(),
        },
    );

    log::set_max_level(resolved.log_level);
    if resolved.log_level == LevelFilter::Off {
        sink.discard();
    } else if let Err(e) = sink.attach(&resolved.log_file) {
        eprintln!("cannot open log file {}: {e}", resolved.log_file.display());
        sink.discard();
    }

    log::info!("navstack starting up (log level {})", resolved.log_level);

    let controller = Controller::with_screen(Menu::new(0));
    match Program::with_options(controller, resolved.program_options()).run() {
        Ok(controller) => match controller.into_err() {
            Some(err) => {
                log::warn!("Exited with failure: {}", err);
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
            None => ExitCode::SUCCESS,
        },
        Err(ProgramError::Interrupted) => ExitCode::from(130),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
