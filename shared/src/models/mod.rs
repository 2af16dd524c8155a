//! Data models
//!
//! Wire shapes for the two transaction tables plus the derived row types
//! the dashboard renders. Derived rows serialize in camelCase for the
//! frontend; record shapes keep the backend column names.

pub mod auth;
pub mod detail;
pub mod record;
pub mod reconciliation;
pub mod summary;

// Re-exports
pub use auth::*;
pub use detail::*;
pub use record::*;
pub use reconciliation::*;
pub use summary::*;
