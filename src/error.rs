// Error taxonomy for the listing store

use thiserror::Error;

/// Errors surfaced by [`crate::ListingStore`] operations.
///
/// A `set_status` or `remove` on an unknown id is not an error: both return
/// `false` and leave the collection untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `All` is a filter value and cannot be assigned to a request
    #[error("'All' is a filter, not a request status")]
    InvalidStatus,

    #[error("unknown status '{0}' (expected All, Pending, Approved or Denied)")]
    UnknownStatus(String),

    #[error("request {id}: unparsable timestamp '{value}'")]
    InvalidDate { id: u64, value: String },

    #[error("duplicate request id {0} in payload")]
    DuplicateId(u64),

    /// The request source failed; the store was left untouched
    #[error("failed to fetch requests")]
    Load(#[source] eyre::Report),
}

pub type Result<T> = std::result::Result<T, StoreError>;
