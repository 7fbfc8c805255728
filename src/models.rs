// Request models: the fetched payload shape and the normalized listing entry

use crate::error::StoreError;
use crate::filter::StatusFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status a request can actually hold.
///
/// `All` lives only on [`StatusFilter`]; it cannot be represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [RequestStatus::Pending, RequestStatus::Approved, RequestStatus::Denied];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Denied => "Denied",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::try_from(s.parse::<StatusFilter>()?)
    }
}

impl TryFrom<StatusFilter> for RequestStatus {
    type Error = StoreError;

    fn try_from(filter: StatusFilter) -> Result<Self, Self::Error> {
        match filter {
            StatusFilter::All => Err(StoreError::InvalidStatus),
            StatusFilter::Pending => Ok(RequestStatus::Pending),
            StatusFilter::Approved => Ok(RequestStatus::Approved),
            StatusFilter::Denied => Ok(RequestStatus::Denied),
        }
    }
}

/// Timestamp as delivered by a request source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Milliseconds since the Unix epoch
    Millis(i64),
    Text(String),
}

impl fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawTimestamp::Millis(ms) => write!(f, "{}", ms),
            RawTimestamp::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawTimestamp {
    fn from(s: &str) -> Self {
        RawTimestamp::Text(s.to_string())
    }
}

impl From<i64> for RawTimestamp {
    fn from(ms: i64) -> Self {
        RawTimestamp::Millis(ms)
    }
}

/// A request as fetched, before date normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRequest {
    pub id: u64,
    pub title: String,
    pub status: RequestStatus,
    pub created_at: RawTimestamp,
    pub updated_at: RawTimestamp,
}

/// A listing entry; both dates are in canonical `YYYY-MM-DD` form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: u64,
    pub title: String,
    pub status: RequestStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&RequestStatus::Approved).unwrap();
        assert_eq!(json, "\"Approved\"");

        let status: RequestStatus = serde_json::from_str("\"Denied\"").unwrap();
        assert_eq!(status, RequestStatus::Denied);
    }

    #[test]
    fn test_status_rejects_all() {
        assert!(matches!(
            RequestStatus::try_from(StatusFilter::All),
            Err(StoreError::InvalidStatus)
        ));
        assert!(matches!("all".parse::<RequestStatus>(), Err(StoreError::InvalidStatus)));
        assert_eq!("pending".parse::<RequestStatus>().unwrap(), RequestStatus::Pending);
    }

    #[test]
    fn test_raw_request_accepts_text_and_millis() {
        let json = r#"{"id":7,"title":"Laptop","status":"Pending","created_at":1709596800000,"updated_at":"2024-03-05T00:00:00Z"}"#;
        let raw: RawRequest = serde_json::from_str(json).unwrap();

        assert_eq!(raw.id, 7);
        assert_eq!(raw.created_at, RawTimestamp::Millis(1_709_596_800_000));
        assert_eq!(raw.updated_at, RawTimestamp::from("2024-03-05T00:00:00Z"));
    }
}
