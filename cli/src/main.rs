//! CLI entrypoint for transcrew
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::io::{IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use transcrew_application::{
    CompositeStatusSink, RunTranslationUseCase, StatusSink, TranslationInput,
};
use transcrew_domain::TranslationStatus;
use transcrew_infrastructure::{ConfigLoader, FileConfig, JsonlStatusLog, OpenAiTextGenerator};
use transcrew_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&cli, &mut config);
    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let source_text = read_source(&cli)?;

    // === Dependency Injection ===
    let pipeline = Arc::new(config.to_pipeline_config()?);
    let generator = Arc::new(
        OpenAiTextGenerator::new(config.model.to_openai_settings())
            .context("Failed to set up the model client")?,
    );
    info!(
        "Using {} at {} ({} key(s))",
        generator.model(),
        generator.endpoint(),
        generator.key_count()
    );
    let use_case = RunTranslationUseCase::with_generator(generator, pipeline);

    let input = TranslationInput::new(source_text, config.generation.target_language.clone())
        .with_params(config.generation_params()?);

    // === Status sinks ===
    let reporter: Option<Box<dyn StatusSink>> = if cli.quiet {
        None
    } else if std::io::stderr().is_terminal() {
        Some(Box::new(ProgressReporter::new()))
    } else {
        Some(Box::new(SimpleProgress))
    };
    let status_log = config.output.status_log.as_ref().and_then(|path| {
        let log = JsonlStatusLog::new(path);
        if log.is_none() {
            warn!("Status log disabled");
        }
        log
    });

    let mut sinks = CompositeStatusSink::new(Vec::new());
    if let Some(reporter) = &reporter {
        sinks.push(&**reporter);
    }
    if let Some(log) = &status_log {
        sinks.push(log);
    }

    // Ctrl-C abandons the in-flight call and ends the run as cancelled
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling translation");
            interrupt.cancel();
        }
    });

    let outcome = use_case.execute_with_status(input, &sinks, &cancel).await?;
    drop(reporter);

    let rendered = ConsoleFormatter::render(&outcome, config.output.format);
    println!("{}", rendered.trim_end());

    Ok(ExitCode::from(exit_status(outcome.status)))
}

/// Initialize logging based on verbosity level, to stderr or `--log-file`
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("--log-file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Command-line flags win over every configuration source
fn apply_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(threshold) = cli.threshold {
        config.pipeline.pass_threshold = threshold;
    }
    if let Some(max) = cli.max_iterations {
        config.pipeline.max_iterations = max;
    }
    if cli.no_iteration {
        config.pipeline.enable_iteration = false;
    }
    if let Some(temperature) = cli.temperature {
        config.generation.temperature = temperature;
    }
    if let Some(top_p) = cli.top_p {
        config.generation.top_p = top_p;
    }
    if let Some(target) = &cli.target {
        config.generation.target_language = target.clone();
    }
    if let Some(format) = cli.output {
        config.output.format = format.into();
    }
    if let Some(path) = &cli.status_log {
        config.output.status_log = Some(path.clone());
    }
}

/// Source text from the positional argument, `--file`, or piped stdin
fn read_source(cli: &Cli) -> Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()));
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("No text to translate. Pass it as an argument, with --file, or on stdin.");
    }
    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .context("Could not read stdin")?;
    Ok(text)
}

/// 0 when approved, 2 when the iteration budget ran out, 1 on errors
fn exit_status(status: TranslationStatus) -> u8 {
    match status {
        TranslationStatus::Passed => 0,
        TranslationStatus::FailedMaxIterations => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcrew_domain::OutputFormat;

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "transcrew",
            "-t",
            "Korean",
            "--threshold",
            "90",
            "--no-iteration",
            "--temperature",
            "0.7",
            "-o",
            "translation",
            "--status-log",
            "s.jsonl",
            "text",
        ])
        .unwrap();
        let mut config = FileConfig::default();
        apply_overrides(&cli, &mut config);

        assert_eq!(config.generation.target_language, "Korean");
        assert_eq!(config.pipeline.pass_threshold, 90);
        assert!(!config.pipeline.enable_iteration);
        assert_eq!(config.generation.temperature, 0.7);
        assert_eq!(config.output.format, OutputFormat::Translation);
        assert!(config.output.status_log.is_some());
        // Untouched values survive
        assert_eq!(config.pipeline.max_iterations, 3);
        assert_eq!(config.generation.top_p, 0.1);
    }

    #[test]
    fn test_no_flags_leave_config_alone() {
        let cli = Cli::try_parse_from(["transcrew", "text"]).unwrap();
        let mut config = FileConfig::default();
        apply_overrides(&cli, &mut config);
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_read_source_from_argument_and_file() {
        let cli = Cli::try_parse_from(["transcrew", "hello"]).unwrap();
        assert_eq!(read_source(&cli).unwrap(), "hello");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "from file").unwrap();
        let cli = Cli::try_parse_from(["transcrew", "-f", path.to_str().unwrap()]).unwrap();
        assert_eq!(read_source(&cli).unwrap(), "from file");

        let cli = Cli::try_parse_from(["transcrew", "-f", "/definitely/missing.txt"]).unwrap();
        assert!(read_source(&cli).is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_status(TranslationStatus::Passed), 0);
        assert_eq!(exit_status(TranslationStatus::FailedMaxIterations), 2);
        assert_eq!(exit_status(TranslationStatus::FailedError), 1);
    }
}
