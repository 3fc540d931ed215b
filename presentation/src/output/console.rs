//! Console output formatter for translation outcomes

use colored::Colorize;
use transcrew_application::TerminalOutcome;
use transcrew_domain::{AnalysisResult, Dimension, OutputFormat, ReviewResult, TranslationStatus};

/// Formats terminal outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render in the requested format
    pub fn render(outcome: &TerminalOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(outcome),
            OutputFormat::Translation => Self::format_translation_only(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Format the complete report
    pub fn format(outcome: &TerminalOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Translation Report"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Status:".cyan().bold(),
            Self::status_text(outcome.status)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Request:".cyan().bold(),
            outcome.request_id.dimmed()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Iterations:".cyan().bold(),
            outcome.iteration_count
        ));
        if let Some(failure) = &outcome.failure {
            output.push_str(&format!("{} {}\n", "Reason:".red().bold(), failure));
        }

        if let Some(analysis) = &outcome.analysis {
            output.push_str(&Self::section_header("Analysis"));
            output.push_str(&Self::analysis_block(analysis));
        }

        if !outcome.review_history.is_empty() {
            output.push_str(&Self::section_header("Reviews"));
            for (index, review) in outcome.review_history.iter().enumerate() {
                output.push_str(&Self::review_block(index + 1, review));
            }
        }

        if !outcome.agent_runs.is_empty() {
            output.push_str(&Self::section_header("Agent Runs"));
            for run in &outcome.agent_runs {
                let mark = if run.success { "v".green() } else { "x".red() };
                output.push_str(&format!(
                    "  {} {:<16} {:>8} ms\n",
                    mark,
                    run.role.display_name(),
                    run.elapsed_ms
                ));
            }
            output.push_str(&format!(
                "  {:<18} {:>8} ms\n",
                "total".dimmed(),
                outcome.total_elapsed_ms()
            ));
        }

        match (&outcome.final_translation, &outcome.last_draft) {
            (Some(translation), _) => {
                output.push_str(&Self::section_header("Translation"));
                output.push_str(&format!("\n{}\n", translation));
            }
            (None, Some(draft)) => {
                output.push_str(&Self::section_header("Last Draft (not approved)"));
                output.push_str(&format!("\n{}\n", draft));
            }
            (None, None) => {}
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &TerminalOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Only the translation text. A run that did not pass yields its last
    /// draft so callers still get something usable; the exit code tells them
    /// it was not approved.
    pub fn format_translation_only(outcome: &TerminalOutcome) -> String {
        outcome
            .final_translation
            .as_deref()
            .or(outcome.last_draft.as_deref())
            .map(|text| format!("{}\n", text))
            .unwrap_or_default()
    }

    fn status_text(status: TranslationStatus) -> String {
        let name = status.display_name();
        match status {
            TranslationStatus::Passed => name.green().bold().to_string(),
            TranslationStatus::FailedMaxIterations => name.yellow().bold().to_string(),
            _ => name.red().bold().to_string(),
        }
    }

    fn analysis_block(analysis: &AnalysisResult) -> String {
        let mut block = format!(
            "  Language:   {}\n  Complexity: {}\n",
            analysis.source_language,
            analysis.complexity.as_str()
        );
        if let Some(scene) = &analysis.scene_type {
            block.push_str(&format!("  Scene:      {}\n", scene));
        }
        if let Some(tone) = &analysis.tone {
            block.push_str(&format!("  Tone:       {}\n", tone));
        }
        if !analysis.key_terms.is_empty() {
            let terms: Vec<&str> = analysis.key_terms.iter().map(|t| t.term.as_str()).collect();
            block.push_str(&format!("  Key terms:  {}\n", terms.join(", ")));
        }
        if analysis.is_low_confidence() {
            block.push_str(&format!("  {}\n", "(low confidence)".yellow()));
        }
        block
    }

    fn review_block(number: usize, review: &ReviewResult) -> String {
        let verdict = if review.passed {
            "pass".green().bold()
        } else {
            "fail".red().bold()
        };
        let mut block = format!(
            "\n{} {}/100 {}\n",
            format!("── Review {} ──", number).yellow().bold(),
            review.composite,
            verdict
        );

        let scores: Vec<String> = Dimension::ALL
            .iter()
            .map(|d| format!("{} {}", d.as_str(), review.sub_scores.get(*d)))
            .collect();
        block.push_str(&format!("  {}\n", scores.join(" | ").dimmed()));

        for issue in &review.issues {
            block.push_str(&format!(
                "  * [{}/{}] {}\n",
                issue.dimension, issue.severity, issue.description
            ));
            if let Some(suggestion) = &issue.suggestion {
                block.push_str(&format!("    {} {}\n", "->".dimmed(), suggestion));
            }
        }
        if !review.summary.is_empty() {
            block.push_str(&format!("  {}\n", review.summary.italic()));
        }
        block
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcrew_application::{AgentRun, FailureReason};
    use transcrew_domain::{
        AgentRole, Complexity, Evaluation, IssueSeverity, ReviewIssue, SubScores,
    };

    fn review(composite: u32, passed: bool) -> ReviewResult {
        ReviewResult::new(
            SubScores::uniform(composite as i32),
            Evaluation { composite, passed },
            vec![
                ReviewIssue::new(Dimension::Terminology, "'cache' rendered twice")
                    .with_severity(IssueSeverity::Major)
                    .with_suggestion("Keep 'cache'"),
            ],
        )
    }

    fn passed_outcome() -> TerminalOutcome {
        TerminalOutcome {
            request_id: "req-42".to_string(),
            status: TranslationStatus::Passed,
            final_translation: Some("Le cache est vidé.".to_string()),
            last_draft: Some("Le cache est vidé.".to_string()),
            analysis: Some(AnalysisResult::new("English", Complexity::Simple)),
            review_history: vec![review(72, false), review(85, true)],
            iteration_count: 1,
            failure: None,
            agent_runs: vec![
                AgentRun::new(AgentRole::Analyzer, true, std::time::Duration::from_millis(40)),
                AgentRun::new(AgentRole::Translator, true, std::time::Duration::from_millis(60)),
            ],
        }
    }

    #[test]
    fn test_full_report_sections() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&passed_outcome());
        assert!(text.contains("Status: Passed"));
        assert!(text.contains("Iterations: 1"));
        assert!(text.contains("Language:   English"));
        assert!(text.contains("── Review 1 ── 72/100 fail"));
        assert!(text.contains("── Review 2 ── 85/100 pass"));
        assert!(text.contains("accuracy 72 | technical 72"));
        assert!(text.contains("* [terminology/major] 'cache' rendered twice"));
        assert!(text.contains("-> Keep 'cache'"));
        assert!(text.contains("100 ms"));
        assert!(text.contains("Translation\n"));
        assert!(text.contains("Le cache est vidé."));
        assert!(!text.contains("Reason:"));
    }

    #[test]
    fn test_failed_report_shows_reason_and_draft() {
        colored::control::set_override(false);
        let outcome = TerminalOutcome {
            status: TranslationStatus::FailedError,
            final_translation: None,
            failure: Some(FailureReason::Cancelled),
            ..passed_outcome()
        };
        let text = ConsoleFormatter::format(&outcome);
        assert!(text.contains("Status: Failed (error)"));
        assert!(text.contains("Reason: Cancelled"));
        assert!(text.contains("Last Draft (not approved)"));
    }

    #[test]
    fn test_translation_only() {
        assert_eq!(
            ConsoleFormatter::format_translation_only(&passed_outcome()),
            "Le cache est vidé.\n"
        );

        let outcome = TerminalOutcome {
            final_translation: None,
            last_draft: None,
            ..passed_outcome()
        };
        assert_eq!(ConsoleFormatter::format_translation_only(&outcome), "");
    }

    #[test]
    fn test_json_round_trips_through_serde_json() {
        let json = ConsoleFormatter::render(&passed_outcome(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "passed");
        assert_eq!(value["review_history"].as_array().unwrap().len(), 2);
        assert_eq!(value["iteration_count"], 1);
    }
}
