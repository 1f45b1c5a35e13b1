//! JSON document readers for submissions and stored histories.

use crate::error::{IqError, ParseErrorKind, Result};
use crate::session::{HistoryEntry, TestSubmission};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read a [`TestSubmission`] JSON document
pub fn read_submission(path: &Path) -> Result<TestSubmission> {
    let submission: TestSubmission = read_json(path, "submission")?;
    tracing::info!(
        "Read {} answers from {}",
        submission.answers.len(),
        path.display()
    );
    Ok(submission)
}

/// Read a history file: a JSON array of [`HistoryEntry`]
pub fn read_history(path: &Path) -> Result<Vec<HistoryEntry>> {
    let entries: Vec<HistoryEntry> = read_json(path, "history")?;
    tracing::info!("Read {} history entries from {}", entries.len(), path.display());
    Ok(entries)
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| IqError::io(path, e))?;
    parse_json(&content, &format!("{what} {}", path.display()))
}

/// Decode a JSON document, naming `context` in the error
pub fn parse_json<T: DeserializeOwned>(content: &str, context: &str) -> Result<T> {
    serde_json::from_str(content)
        .map_err(|e| IqError::parse(context, ParseErrorKind::InvalidJson(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestLevel;
    use tempfile::TempDir;

    #[test]
    fn test_read_submission() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("submission.json");
        std::fs::write(
            &path,
            r#"{"testType":"raven","testLevel":"full","answers":[
                {"questionId":"r1","selectedOption":2,"correctAnswer":2,"difficulty":4}
            ]}"#,
        )
        .unwrap();

        let submission = read_submission(&path).unwrap();
        assert_eq!(submission.test_level, Some(TestLevel::Full));
        assert_eq!(submission.answers.len(), 1);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_history(Path::new("/nonexistent/history.json")).unwrap_err();
        assert!(matches!(err, IqError::Io { path: Some(_), .. }));
    }

    #[test]
    fn test_malformed_json_names_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");
        std::fs::write(&path, "[{").unwrap();

        let err = read_history(&path).unwrap_err();
        assert!(matches!(err, IqError::Parse { .. }));
        assert!(err.to_string().contains("history"));
    }
}
