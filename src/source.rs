// Request sources: where the listing's raw records come from

use crate::jsonl;
use crate::models::RawRequest;
use eyre::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fetches the full set of raw requests
///
/// Called exactly once per [`crate::ListingStore::load_from`]. Retries and
/// timeouts belong to the implementation, not the store.
pub trait RequestSource {
    fn fetch(&self) -> Result<Vec<RawRequest>>;
}

/// Requests read from a `.jsonl` file (one object per line) or any other
/// file holding a JSON array
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_jsonl(&self) -> bool {
        self.path.extension().and_then(|s| s.to_str()) == Some("jsonl")
    }
}

impl RequestSource for FileSource {
    fn fetch(&self) -> Result<Vec<RawRequest>> {
        debug!(path = ?self.path, jsonl = self.is_jsonl(), "FileSource::fetch: called");
        if self.is_jsonl() {
            jsonl::read_jsonl(&self.path)
        } else {
            jsonl::read_json_array(&self.path)
        }
    }
}

/// Requests held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    requests: Vec<RawRequest>,
}

impl StaticSource {
    pub fn new(requests: Vec<RawRequest>) -> Self {
        Self { requests }
    }
}

impl RequestSource for StaticSource {
    fn fetch(&self) -> Result<Vec<RawRequest>> {
        Ok(self.requests.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawTimestamp, RequestStatus};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_source_picks_reader_by_extension() {
        let temp = TempDir::new().unwrap();
        let line = r#"{"id":1,"title":"Chair","status":"Pending","created_at":"2024-01-01","updated_at":"2024-03-05"}"#;

        let jsonl_path = temp.path().join("requests.jsonl");
        fs::write(&jsonl_path, format!("{}\n", line)).unwrap();
        let json_path = temp.path().join("requests.json");
        fs::write(&json_path, format!("[{}]", line)).unwrap();

        let from_jsonl = FileSource::new(&jsonl_path).fetch().unwrap();
        let from_json = FileSource::new(&json_path).fetch().unwrap();
        assert_eq!(from_jsonl, from_json);
        assert_eq!(from_json[0].status, RequestStatus::Pending);
    }

    #[test]
    fn test_file_source_missing_file() {
        let temp = TempDir::new().unwrap();
        let source = FileSource::new(temp.path().join("nope.json"));
        assert!(source.fetch().is_err());
    }

    #[test]
    fn test_static_source() {
        let raw = RawRequest {
            id: 3,
            title: "Keyboard".to_string(),
            status: RequestStatus::Approved,
            created_at: RawTimestamp::Millis(0),
            updated_at: RawTimestamp::Millis(0),
        };
        let source = StaticSource::new(vec![raw.clone()]);
        assert_eq!(source.fetch().unwrap(), vec![raw]);
    }
}
