//! DataForSEO Labs API client and response normalization.
//!
//! Fetches related-keyword metrics for a seed search term, normalizes the
//! nested `tasks[0].result[0].items[]` envelope into flat keyword records,
//! and provides sorting, filtering, and CSV export over those records.

pub mod client;
pub mod error;
pub mod menu;
pub mod normalize;
pub mod records;
pub mod types;

pub use client::{Credentials, LabsClient};
pub use error::LabsError;
pub use menu::{MenuOptions, SelectOption};
pub use normalize::{normalize, KeywordRecord, MonthlyVolume, SearchIntent};
pub use records::{SortKey, SortOrder};
pub use types::RelatedKeywordsRequest;
