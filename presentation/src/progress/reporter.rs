//! Progress reporting for translation runs

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use transcrew_application::{AgentRun, StatusEvent, StatusSink};
use transcrew_domain::TranslationStatus;

/// Reports progress with a spinner for the running stage and one
/// printed line per transition and agent run
pub struct ProgressReporter {
    spinner: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for ProgressReporter {
    fn on_transition(&self, event: &StatusEvent) {
        self.spinner.println(transition_line(event));
        if event.to.is_terminal() {
            self.spinner.finish_and_clear();
        } else {
            self.spinner.set_prefix(event.to.display_name().to_string());
            self.spinner.set_message(event.summary.clone());
        }
    }

    fn on_agent_finished(&self, _request_id: &str, run: &AgentRun) {
        self.spinner.println(agent_line(run));
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl StatusSink for SimpleProgress {
    fn on_transition(&self, event: &StatusEvent) {
        eprintln!("{}", transition_line(event));
    }

    fn on_agent_finished(&self, _request_id: &str, run: &AgentRun) {
        eprintln!("{}", agent_line(run));
    }
}

fn status_label(status: TranslationStatus) -> ColoredString {
    let name = status.display_name();
    match status {
        TranslationStatus::Passed => name.green().bold(),
        TranslationStatus::FailedMaxIterations => name.yellow().bold(),
        TranslationStatus::FailedError => name.red().bold(),
        _ => name.bold(),
    }
}

fn transition_line(event: &StatusEvent) -> String {
    let iteration = if event.iteration > 0 {
        format!(" [iteration {}]", event.iteration)
    } else {
        String::new()
    };
    format!(
        "{} {}{} {}",
        "->".cyan(),
        status_label(event.to),
        iteration.dimmed(),
        event.summary.dimmed()
    )
}

fn agent_line(run: &AgentRun) -> String {
    let mark = if run.success { "v".green() } else { "x".red() };
    format!(
        "  {} {} ({:.1}s)",
        mark,
        run.role.display_name(),
        run.elapsed_ms as f64 / 1000.0
    )
}
