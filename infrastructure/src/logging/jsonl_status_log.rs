//! JSONL file writer for pipeline status.
//!
//! Every transition, agent run and terminal outcome becomes a single JSON
//! line with a `type` field and `timestamp`, appended via a buffered writer.

use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use transcrew_application::{AgentRun, StatusEvent, StatusSink, TerminalOutcome};

/// JSONL status log that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`; several requests may share one
/// log. Opens in append mode. Flushes after each line and on `Drop`.
pub struct JsonlStatusLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlStatusLog {
    /// Open (or create) the log at the given path.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create status log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open status log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(&self, record_type: &str, payload: impl Serialize) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut map = match serde_json::to_value(payload) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
            Err(e) => {
                warn!("Could not serialize {} record: {}", record_type, e);
                return;
            }
        };
        map.insert("type".to_string(), Value::String(record_type.to_string()));
        // Event timestamps win over the write time
        map.entry("timestamp")
            .or_insert_with(|| Value::String(timestamp));

        let Ok(line) = serde_json::to_string(&Value::Object(map)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl StatusSink for JsonlStatusLog {
    fn on_transition(&self, event: &StatusEvent) {
        self.write_record("transition", event);
    }

    fn on_agent_finished(&self, request_id: &str, run: &AgentRun) {
        self.write_record(
            "agent_finished",
            json!({
                "request_id": request_id,
                "role": run.role,
                "success": run.success,
                "elapsed_ms": run.elapsed_ms,
            }),
        );
    }

    fn on_outcome(&self, outcome: &TerminalOutcome) {
        self.write_record("outcome", outcome);
    }
}

impl Drop for JsonlStatusLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcrew_domain::{AgentRole, TranslationStatus};

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn outcome() -> TerminalOutcome {
        TerminalOutcome {
            request_id: "req-1".to_string(),
            status: TranslationStatus::FailedError,
            final_translation: None,
            last_draft: Some("Bonjour".to_string()),
            analysis: None,
            review_history: Vec::new(),
            iteration_count: 0,
            failure: Some(transcrew_application::FailureReason::Cancelled),
            agent_runs: vec![AgentRun::new(
                AgentRole::Translator,
                true,
                std::time::Duration::from_millis(12),
            )],
        }
    }

    #[test]
    fn test_status_log_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.status.jsonl");
        let log = JsonlStatusLog::new(&path).unwrap();

        let event = StatusEvent::new(
            "req-1",
            TranslationStatus::Pending,
            TranslationStatus::Analyzing,
            "start",
            0,
        );
        log.on_transition(&event);
        log.on_agent_finished(
            "req-1",
            &AgentRun::new(AgentRole::Analyzer, true, std::time::Duration::from_millis(5)),
        );
        log.on_outcome(&outcome());
        drop(log);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert!(line.get("type").is_some());
            assert!(line.get("timestamp").is_some());
        }

        assert_eq!(lines[0]["type"], "transition");
        assert_eq!(lines[0]["request_id"], "req-1");
        assert_eq!(lines[0]["from"], "pending");
        assert_eq!(lines[0]["to"], "analyzing");
        assert_eq!(
            lines[0]["timestamp"],
            serde_json::to_value(event.timestamp).unwrap()
        );

        assert_eq!(lines[1]["type"], "agent_finished");
        assert_eq!(lines[1]["role"], "analyzer");
        assert_eq!(lines[1]["elapsed_ms"], 5);

        assert_eq!(lines[2]["type"], "outcome");
        assert_eq!(lines[2]["status"], "failed_error");
        assert_eq!(lines[2]["failure"]["kind"], "cancelled");
        assert_eq!(lines[2]["last_draft"], "Bonjour");
    }

    #[test]
    fn test_status_log_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("status.jsonl");

        for _ in 0..2 {
            let log = JsonlStatusLog::new(&path).unwrap();
            log.on_outcome(&outcome());
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_status_log_returns_none_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        assert!(JsonlStatusLog::new(blocker.join("status.jsonl")).is_none());
    }
}
