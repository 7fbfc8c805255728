// JSON / JSONL payload reading

use eyre::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

/// Read every record from a JSONL file, in file order
///
/// Unreadable or malformed lines are skipped with a warning.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = open_shared(path)?;
    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to read line, skipping"
                );
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to parse JSON, skipping"
                );
            }
        }
    }

    info!(file = ?path, count = records.len(), "Loaded records from JSONL");

    Ok(records)
}

/// Read a file holding a single JSON array of records
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut file = open_shared(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let records: Vec<T> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON array in {}", path.display()))?;

    info!(file = ?path, count = records.len(), "Loaded records from JSON");

    Ok(records)
}

// Shared lock keeps a concurrent writer from handing us half a file;
// released when the handle drops
fn open_shared(path: &Path) -> Result<File> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    file.lock_shared().context("Failed to acquire shared file lock")?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawRequest, RequestStatus};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_jsonl_keeps_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requests.jsonl");
        fs::write(
            &path,
            r#"{"id":2,"title":"Desk","status":"Approved","created_at":"2024-01-01","updated_at":"2024-01-02"}
{"id":1,"title":"Chair","status":"Pending","created_at":"2024-01-01","updated_at":"2024-03-05"}
"#,
        )
        .unwrap();

        let records: Vec<RawRequest> = read_jsonl(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 2);
        assert_eq!(records[1].status, RequestStatus::Pending);
    }

    #[test]
    fn test_read_jsonl_malformed_line() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requests.jsonl");

        // Valid, malformed, blank, valid
        fs::write(
            &path,
            r#"{"id":1,"title":"Valid","status":"Pending","created_at":"2024-01-01","updated_at":"2024-01-01"}
{malformed json}

{"id":2,"title":"Also Valid","status":"Denied","created_at":"2024-01-01","updated_at":"2024-01-01"}
"#,
        )
        .unwrap();

        let records: Vec<RawRequest> = read_jsonl(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, "Also Valid");
    }

    #[test]
    fn test_read_json_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requests.json");
        fs::write(
            &path,
            r#"[{"id":1,"title":"Chair","status":"Pending","created_at":"2024-01-01","updated_at":"2024-03-05"}]"#,
        )
        .unwrap();

        let records: Vec<RawRequest> = read_json_array(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Chair");
    }

    #[test]
    fn test_read_json_array_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requests.json");
        fs::write(&path, "[{not json").unwrap();

        let result: Result<Vec<RawRequest>> = read_json_array(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let result: Result<Vec<RawRequest>> = read_jsonl(&temp.path().join("missing.jsonl"));
        assert!(result.is_err());
    }
}
