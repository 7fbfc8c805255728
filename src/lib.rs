// RequestStore - In-memory request listing with status filtering and date ordering

pub mod config;
pub mod date;
pub mod error;
pub mod filter;
pub mod jsonl;
pub mod models;
pub mod source;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use date::{Clock, DateZone, FixedClock, SystemClock, format_date};
pub use error::StoreError;
pub use filter::StatusFilter;
pub use models::{RawRequest, RawTimestamp, Request, RequestStatus};
pub use source::{FileSource, RequestSource, StaticSource};
pub use store::ListingStore;
