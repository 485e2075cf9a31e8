//! # CS Department
//!
//! Data layer of a university computer science department site: the faculty
//! directory, per-faculty publication lists parsed out of free-text
//! citations, and the lecture-note browser.
//!
//! ## Architecture
//!
//! - [`models`]: Faculty, publication and lecture-note records
//! - [`citation`]: Citation segmentation, field extraction, type
//!   classification, author formatting and aggregation
//! - [`api`]: Faculty profile endpoints behind the [`DetailSource`] trait
//! - [`detail`]: Cached primary → backup → local detail fetching
//! - [`views`]: Filtering and pagination over in-memory collections
//! - [`utils`]: Shared HTTP client
//! - [`config`]: Configuration management

pub mod api;
pub mod citation;
pub mod config;
pub mod detail;
pub mod models;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use api::{DetailSource, FacultyApi};
pub use citation::{extract_fields, format_authors, PublicationAggregator};
pub use detail::{DetailCache, DetailFetcher, DetailSession};
pub use models::{FacultyDetailInfo, FacultySummary, PublicationRecord, PublicationType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
