//! CLI entrypoint for pipefmt
//!
//! This is the main binary that wires together all layers using
//! dependency injection.
//!
//! Exit codes: 0 success, 1 a document failed (or would change under
//! `--check`), 2 configuration or usage error.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use pipefmt_application::{
    BatchMode, FormatBatchUseCase, FormatDocumentError, FormatDocumentInput,
    FormatDocumentUseCase, FormatterGateway, HandlePersistedError,
    HandlePersistedUseCase, InFlightDocuments, InvocationLogger, NoInvocationLogger, NoProgress,
    PersistOutcome, ProgressNotifier, ToggleFormatOnPersistUseCase,
};
use pipefmt_domain::{DocumentId, FormatterSettings, OutputFormat, locate};
use pipefmt_infrastructure::{
    ConfigLoader, ConfigSources, FileConfig, FileDocumentHost, FileSettingsStore,
    JsonlInvocationLogger, LocalFormatterGateway, MemoryDocumentHost,
};
use pipefmt_presentation::{
    Cli, Command, ConsoleFormatter, ConsoleNotifier, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Document id used for text read from stdin.
const STDIN_DOCUMENT: &str = "<stdin>";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("pipefmt: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Everything a command needs, built once from the CLI and config files.
struct AppContext {
    sources: ConfigSources,
    settings: FormatterSettings,
    output: OutputFormat,
    quiet: bool,
    verbose: bool,
    logger: Arc<dyn InvocationLogger>,
    in_flight: InFlightDocuments,
}

impl AppContext {
    fn format_use_case<H>(&self, host: Arc<H>) -> FormatDocumentUseCase<LocalFormatterGateway, H>
    where
        H: pipefmt_application::DocumentHost + 'static,
    {
        FormatDocumentUseCase::new(Arc::new(LocalFormatterGateway::new()), host)
            .with_logger(Arc::clone(&self.logger))
            .with_in_flight(self.in_flight.clone())
    }

    fn notifier(&self) -> ConsoleNotifier {
        ConsoleNotifier::new(self.verbose && !self.quiet)
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let sources = if cli.no_config {
        ConfigSources::defaults_only()
    } else {
        ConfigSources::discover(cli.config.as_deref())
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(&sources);
        return Ok(ExitCode::SUCCESS);
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_from(&sources).unwrap_or_else(|_| ConfigLoader::load_defaults())
    } else {
        ConfigLoader::load_from(&sources).context("failed to load configuration")?
    };

    let log_file = cli.log_file.clone().or_else(|| file_config.log.file.clone());
    let _log_guard = init_logging(cli.verbose, cli.quiet, log_file.as_deref())?;
    info!("Starting pipefmt {}", env!("CARGO_PKG_VERSION"));

    let Some(command) = cli.command.clone() else {
        let _ = Cli::command().print_help();
        return Ok(ExitCode::from(2));
    };

    let context = build_context(&cli, sources, &file_config)?;

    match command {
        Command::Format { files, check, jobs } => format_files(&context, files, check, jobs).await,
        Command::Stdin => format_stdin(&context).await,
        Command::OnSave { file } => on_save(&context, file).await,
        Command::ToggleOnSave => Ok(toggle_on_save(&context)),
        Command::Probe => Ok(probe(&context).await),
    }
}

fn build_context(cli: &Cli, sources: ConfigSources, file_config: &FileConfig) -> Result<AppContext> {
    let (settings, issues) = file_config.to_settings();
    for issue in &issues {
        eprintln!("{}", ConsoleFormatter::format_issue(issue));
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("invalid configuration");
    }

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let logger: Arc<dyn InvocationLogger> = match &file_config.log.invocations {
        Some(path) => match JsonlInvocationLogger::new(path) {
            Some(logger) => {
                debug!("Logging invocations to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoInvocationLogger),
        },
        None => Arc::new(NoInvocationLogger),
    };

    Ok(AppContext {
        sources,
        settings,
        output: cli
            .output
            .map(Into::into)
            .or(file_config.output.format)
            .unwrap_or_default(),
        quiet: cli.quiet,
        verbose: cli.verbose > 0,
        logger,
        in_flight: InFlightDocuments::new(),
    })
}

async fn format_files(
    context: &AppContext,
    files: Vec<PathBuf>,
    check: bool,
    jobs: usize,
) -> Result<ExitCode> {
    let documents: Vec<DocumentId> = files
        .iter()
        .map(|path| DocumentId::new(path.to_string_lossy()))
        .collect();

    let batch = FormatBatchUseCase::new(context.format_use_case(Arc::new(FileDocumentHost::new())))
        .with_jobs(jobs);
    let mode = if check {
        BatchMode::Check
    } else {
        BatchMode::Apply
    };

    let json = context.output == OutputFormat::Json;
    let progress: Box<dyn ProgressNotifier> = if context.quiet || json || documents.len() < 2 {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };
    let notifier = context.notifier().without_failures();

    let report = batch
        .execute(
            documents,
            &context.settings,
            mode,
            &notifier,
            progress.as_ref(),
        )
        .await;

    if json {
        println!("{}", ConsoleFormatter::format_batch_json(&report));
    } else if !context.quiet || report.has_failures() {
        print!("{}", ConsoleFormatter::format_batch(&report, check));
    }

    let failed = report.has_failures() || (check && report.changed() > 0);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn format_stdin(context: &AppContext) -> Result<ExitCode> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("failed to read stdin")?;

    let document = DocumentId::new(STDIN_DOCUMENT);
    let host = Arc::new(MemoryDocumentHost::new());
    host.insert(document.clone(), text, Some("rust"));

    let use_case = context.format_use_case(Arc::clone(&host));
    let notifier = context.notifier();
    let input = FormatDocumentInput::new(document.clone(), context.settings.clone());

    match use_case.execute_with_notifier(input, &notifier).await {
        Ok(_) => {
            if let Some(formatted) = host.content(&document) {
                print!("{}", formatted);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report_non_format_error(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn on_save(context: &AppContext, file: PathBuf) -> Result<ExitCode> {
    let document = DocumentId::new(file.to_string_lossy());
    let use_case = HandlePersistedUseCase::new(
        context.format_use_case(Arc::new(FileDocumentHost::new())),
        Arc::new(FileSettingsStore::new(context.sources.clone())),
    );
    let notifier = context.notifier();

    let result = use_case.execute(document.clone(), &notifier).await;

    if context.output == OutputFormat::Json {
        println!("{}", persist_json(&document, &result));
    }

    match result {
        Ok(PersistOutcome::Disabled) => {
            info!("Format on save is disabled");
            Ok(ExitCode::SUCCESS)
        }
        Ok(PersistOutcome::Skipped { language }) => {
            info!(
                "Not formatting {} (language: {})",
                document,
                language.as_deref().unwrap_or("unknown")
            );
            Ok(ExitCode::SUCCESS)
        }
        Ok(PersistOutcome::Formatted(_)) => Ok(ExitCode::SUCCESS),
        Err(HandlePersistedError::Format(e)) => {
            report_non_format_error(&e);
            Ok(ExitCode::FAILURE)
        }
        Err(HandlePersistedError::Settings(e)) => Err(e.into()),
    }
}

fn persist_json(
    document: &DocumentId,
    result: &Result<PersistOutcome, HandlePersistedError>,
) -> serde_json::Value {
    match result {
        Ok(PersistOutcome::Disabled) => {
            serde_json::json!({"document": document, "status": "disabled"})
        }
        Ok(PersistOutcome::Skipped { language }) => {
            serde_json::json!({"document": document, "status": "skipped", "language": language})
        }
        Ok(PersistOutcome::Formatted(applied)) => {
            serde_json::json!({"document": document, "result": applied})
        }
        Err(HandlePersistedError::Format(e)) => serde_json::json!({
            "document": document,
            "status": "failed",
            "kind": e.kind(),
            "message": e.to_string(),
        }),
        Err(HandlePersistedError::Settings(e)) => serde_json::json!({
            "document": document,
            "status": "failed",
            "kind": "settings",
            "message": e.to_string(),
        }),
    }
}

fn toggle_on_save(context: &AppContext) -> ExitCode {
    let store = Arc::new(FileSettingsStore::new(context.sources.clone()));
    match ToggleFormatOnPersistUseCase::new(store).execute() {
        Ok(enabled) => {
            match context.output {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "format_on_save": enabled }))
                }
                OutputFormat::Text => println!(
                    "Format on save {}",
                    if enabled { "enabled" } else { "disabled" }
                ),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("pipefmt: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn probe(context: &AppContext) -> ExitCode {
    let tool = locate(&context.settings);
    let result = LocalFormatterGateway::new().probe(&tool).await;

    match context.output {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_probe_json(&tool, &result)),
        OutputFormat::Text => println!(
            "{}",
            ConsoleFormatter::format_probe(&tool, &result, &context.settings.install_url)
        ),
    }

    if result.is_available() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Invocation failures are already shown by the notifier; print the rest.
fn report_non_format_error(error: &FormatDocumentError) {
    if error.format_error().is_none() {
        eprintln!("pipefmt: {}", error);
    }
}

/// Initialize tracing: stderr always, plus an optional log file.
///
/// `-v` raises the level (info, debug, trace). Without `-v`, `RUST_LOG` is
/// honored if set.
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(if quiet { "error" } else { "warn" })),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("log file {} has no file name", path.display()))?;
            std::fs::create_dir_all(directory)
                .with_context(|| format!("failed to create {}", directory.display()))?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}
