//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves configuration
//! - sets up logging
//! - dispatches to the TUI form or the one-shot commands

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, ModelArgs, PredictArgs, TuiArgs};
use crate::domain::{AppConfig, DEFAULT_MODEL_PATH};
use crate::error::AppError;
use crate::models::PredictorLoader;

pub mod handler;

/// Environment variable overriding the artifact path.
pub const MODEL_PATH_ENV: &str = "TITANIC_MODEL";

/// Entry point for the `titanic` binary.
pub fn run() -> Result<(), AppError> {
    // `titanic` and `titanic --model x` behave like `titanic tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    dotenvy::dotenv().ok();

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Predict(args) => handle_predict(args),
        Command::Info(args) => handle_info(args),
    }
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.model, args.log_file.clone());
    match &config.log_file {
        Some(path) => init_logging(LogTarget::File(path))?,
        None => init_logging(LogTarget::Off)?,
    }
    info!(model = %config.model_path.display(), "starting form");

    let loader = PredictorLoader::new(&config.model_path);
    crate::tui::run(&loader)
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.model, None);
    init_logging(LogTarget::Stderr)?;

    let loader = PredictorLoader::new(&config.model_path);
    let predictor = loader.get()?;
    let input = args.passenger();
    let result = handler::handle_submit(&*predictor, &input)?;

    let out = if args.json {
        crate::report::format_prediction_json(&input, &result, predictor.name())?
    } else {
        format!(
            "{}\n{}\n{}",
            crate::report::format_passenger(&input),
            crate::report::result_headline(&result),
            crate::report::result_detail(&result)
        )
    };
    print_stdout(&out)
}

fn handle_info(args: ModelArgs) -> Result<(), AppError> {
    let config = config_from_args(&args, None);
    init_logging(LogTarget::Stderr)?;

    let loader = PredictorLoader::new(&config.model_path);
    let predictor = loader.get()?;
    print_stdout(crate::report::format_model_info(&predictor, loader.path()).trim_end())
}

fn print_stdout(text: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}").map_err(|e| AppError::io(format!("Failed to write output: {e}")))
}

pub fn config_from_args(model: &ModelArgs, log_file: Option<PathBuf>) -> AppConfig {
    AppConfig {
        model_path: resolve_model_path(model.model.clone(), std::env::var(MODEL_PATH_ENV).ok()),
        log_file,
    }
}

/// Flag beats environment beats the built-in default.
pub fn resolve_model_path(flag: Option<PathBuf>, env: Option<String>) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}

enum LogTarget<'a> {
    Off,
    Stderr,
    File(&'a Path),
}

/// Install the global tracing subscriber. Level comes from `RUST_LOG` (default `info`).
fn init_logging(target: LogTarget<'_>) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false);

    let result = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::io(format!("Failed to open log file '{}': {e}", path.display())))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
    };
    result.map_err(|e| AppError::io(format!("Failed to initialize logging: {e}")))
}

/// Rewrite argv so `titanic` defaults to `titanic tui`.
///
/// Rules:
/// - `titanic`                        -> `titanic tui`
/// - `titanic --model m.json ...`     -> `titanic tui --model m.json ...`
/// - `titanic --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "predict" | "info");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
