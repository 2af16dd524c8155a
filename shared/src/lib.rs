//! Shared types for the salesboard workspace
//!
//! Wire-faithful record models, facet selections, summary and
//! reconciliation rows, and the record-query model the client renders
//! into backend requests.

pub mod date_range;
pub mod models;
pub mod query;
pub mod selection;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use date_range::{DateRange, InvalidDateRange};
pub use models::*;
pub use query::{Predicate, RecordQuery};
pub use selection::{Facet, FacetSelection};
