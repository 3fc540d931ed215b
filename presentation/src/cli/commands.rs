//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for translation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report: status, reviews, iterations, timings and the translation
    Full,
    /// Only the translation text
    Translation,
    /// JSON output
    Json,
}

impl From<OutputFormat> for transcrew_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => transcrew_domain::OutputFormat::Full,
            OutputFormat::Translation => transcrew_domain::OutputFormat::Translation,
            OutputFormat::Json => transcrew_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for transcrew
#[derive(Parser, Debug)]
#[command(name = "transcrew")]
#[command(author, version, about = "Translation crew - analyze, translate, review and refine with an LLM")]
#[command(long_about = r#"
transcrew translates text through a crew of four agents sharing one model:

1. Analyzer:   identifies language, register, terminology and complexity
2. Translator: drafts the translation
3. Reviewer:   scores the draft on five weighted dimensions
4. Optimizer:  turns a failing review into targeted instructions,
               then the draft is retranslated and reviewed again

The run ends when a review passes the threshold, or when the iteration
budget is spent.

Configuration files are loaded from (in priority order):
1. TRANSCREW_* environment variables (e.g. TRANSCREW_MODEL__MODEL)
2. --config <path>     Explicit config file
3. ./transcrew.toml    Project-level config
4. ~/.config/transcrew/config.toml   Global config

Example:
  transcrew -t French "The cache is invalidated on every write."
  transcrew -t Japanese -f README.md -o translation
  cat notes.txt | transcrew -t German --threshold 85 -o json
"#)]
pub struct Cli {
    /// Text to translate (reads --file or stdin when omitted)
    pub text: Option<String>,

    /// Read the source text from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Target language (defaults to generation.target_language)
    #[arg(short, long, value_name = "LANG")]
    pub target: Option<String>,

    /// Sampling temperature for the translator and optimizer
    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,

    /// Nucleus sampling for the translator and optimizer
    #[arg(long, value_name = "P")]
    pub top_p: Option<f32>,

    /// Maximum optimize/retranslate cycles
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<u32>,

    /// Stop after the first review, pass or fail
    #[arg(long)]
    pub no_iteration: bool,

    /// Composite score needed to pass (0-100)
    #[arg(long, value_name = "N")]
    pub threshold: Option<u32>,

    /// Output format (defaults to output.format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append status transitions and outcomes as JSON lines
    #[arg(long, value_name = "PATH")]
    pub status_log: Option<PathBuf>,

    /// Write tracing output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["transcrew", "-t", "French", "hello"]).unwrap();
        assert_eq!(cli.text.as_deref(), Some("hello"));
        assert_eq!(cli.target.as_deref(), Some("French"));
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "transcrew",
            "-f",
            "in.txt",
            "--threshold",
            "85",
            "--max-iterations",
            "5",
            "--no-iteration",
            "--top-p",
            "0.5",
            "-o",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("in.txt")));
        assert_eq!(cli.threshold, Some(85));
        assert_eq!(cli.max_iterations, Some(5));
        assert!(cli.no_iteration);
        assert_eq!(cli.top_p, Some(0.5));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_text_and_file_conflict() {
        assert!(Cli::try_parse_from(["transcrew", "-f", "in.txt", "hello"]).is_err());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            transcrew_domain::OutputFormat::from(OutputFormat::Translation),
            transcrew_domain::OutputFormat::Translation
        );
    }
}
