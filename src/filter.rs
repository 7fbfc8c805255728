// Status filtering for the visible listing

use crate::error::StoreError;
use crate::models::{Request, RequestStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Filter applied to the listing; `All` disables filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Denied,
}

impl StatusFilter {
    /// True if `request` passes this filter
    pub fn matches(self, request: &Request) -> bool {
        match self {
            StatusFilter::All => true,
            _ => StatusFilter::from(request.status) == self,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Pending => "Pending",
            StatusFilter::Approved => "Approved",
            StatusFilter::Denied => "Denied",
        }
    }
}

impl From<RequestStatus> for StatusFilter {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => StatusFilter::Pending,
            RequestStatus::Approved => StatusFilter::Approved,
            RequestStatus::Denied => StatusFilter::Denied,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "approved" => Ok(StatusFilter::Approved),
            "denied" => Ok(StatusFilter::Denied),
            _ => Err(StoreError::UnknownStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: RequestStatus) -> Request {
        Request {
            id: 1,
            title: "Monitor".to_string(),
            status,
            created_at: "2024-01-01".to_string(),
            updated_at: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_all_matches_everything() {
        for status in RequestStatus::ALL {
            assert!(StatusFilter::All.matches(&request(status)));
        }
    }

    #[test]
    fn test_status_filter_matches_only_its_status() {
        let denied = request(RequestStatus::Denied);
        assert!(StatusFilter::Denied.matches(&denied));
        assert!(!StatusFilter::Approved.matches(&denied));
        assert!(!StatusFilter::Pending.matches(&denied));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(" APPROVED ".parse::<StatusFilter>().unwrap(), StatusFilter::Approved);
        assert!(matches!(
            "archived".parse::<StatusFilter>(),
            Err(StoreError::UnknownStatus(s)) if s == "archived"
        ));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(StatusFilter::All.to_string(), "All");
        assert_eq!(StatusFilter::from(RequestStatus::Pending).to_string(), "Pending");
    }
}
