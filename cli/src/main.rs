//! CLI entrypoint for ollama-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use relay_application::{
    CompleteChatUseCase, NoTraceLogger, ProbeConnectivityUseCase, RelayConfig, TraceLogger,
};
use relay_domain::BackendKind;
use relay_infrastructure::{
    BackendRegistry, ConfigLoader, FileConfig, JsonlTraceLogger, RunLogPaths,
    TRACE_SUMMARY_TARGET,
};
use relay_presentation::{ChatArgs, Cli, Command, ConsoleFormatter};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()?
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    apply_cli_overrides(&mut file_config, &cli);
    let config = file_config.into_relay_config()?;

    let run_paths = RunLogPaths::starting_now(&config.logging.dir);
    let _guard = init_tracing(cli.verbose, &run_paths);

    info!(
        backend = %config.backend.kind,
        model = %config.backend.model,
        base_url = %config.backend.base_url,
        "Starting ollama-relay"
    );

    // === Dependency Injection ===
    let registry = BackendRegistry::with_defaults();

    match cli.subcommand() {
        Command::Probe => run_probe(&registry, &config).await,
        Command::Chat(args) => run_chat(&registry, &config, &run_paths, &args).await,
    }
}

/// Flags take precedence over every file and environment source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.backend.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }
    if let Some(backend) = &cli.backend {
        config.backend.kind = backend.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = dir.clone();
    }
}

/// Console logging by verbosity, plus the run's plain-text execution log.
///
/// The returned guard flushes the execution log when dropped.
fn init_tracing(verbose: u8, paths: &RunLogPaths) -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter(verbose));

    let appender = std::fs::create_dir_all(paths.dir())
        .map_err(|e| e.to_string())
        .and_then(|_| {
            RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(paths.execution_file_name())
                .build(paths.dir())
                .map_err(|e| e.to_string())
        });

    let (file_layer, guard, appender_error) = match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new("info"));
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(e) = appender_error {
        warn!(
            "Could not open execution log {}: {}",
            paths.execution_file().display(),
            e
        );
    }

    guard
}

/// Console filter for a verbosity level.
///
/// Trace summaries (`AGENT_TRACE`/`LLM_TRACE`) stay visible at every level.
fn console_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    EnvFilter::new(format!("{},{}=info", level, TRACE_SUMMARY_TARGET))
}

async fn run_probe(registry: &BackendRegistry, config: &RelayConfig) -> Result<ExitCode> {
    // The probe speaks the OpenAI-compatible protocol whatever backend is configured.
    let mut backend_config = config.backend.clone();
    backend_config.kind = BackendKind::OpenaiCompatible;

    let backend = registry
        .create(backend_config.model.as_str(), &backend_config)
        .context("Failed to create backend")?;

    match ProbeConnectivityUseCase::new(backend).execute().await {
        Ok(report) => {
            println!("{}", ConsoleFormatter::format_probe(&report));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!(
                "{}",
                ConsoleFormatter::format_probe_error(
                    backend_config.model.as_str(),
                    &backend_config.base_url,
                    &e
                )
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_chat(
    registry: &BackendRegistry,
    config: &RelayConfig,
    run_paths: &RunLogPaths,
    args: &ChatArgs,
) -> Result<ExitCode> {
    let options = args.options().context("Invalid chat options")?;

    let backend = registry
        .create(config.backend.model.as_str(), &config.backend)
        .context("Failed to create backend")?;

    let logger: Arc<dyn TraceLogger> = match JsonlTraceLogger::for_run(run_paths) {
        Some(logger) => {
            info!("Tracing model calls to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoTraceLogger),
    };

    let use_case = CompleteChatUseCase::new(backend, logger)
        .with_defaults(config.request)
        .with_agent_label(config.logging.agent_label.clone());

    let response = use_case.execute_compat(args.messages(), options).await;

    let output = if args.json {
        ConsoleFormatter::format_json(&response)
    } else {
        ConsoleFormatter::format_response(&response)
    };
    println!("{}", output);

    Ok(if response.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
