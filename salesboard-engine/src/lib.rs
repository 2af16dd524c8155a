//! Salesboard Engine - filtering and aggregation for the sales dashboard
//!
//! Loads a reporting period in batches and rolls the filtered rows up
//! into summary cards, brand or salesperson tables, inventory
//! reconciliation and detail rows. The [`DashboardSession`] ties it
//! together and guarantees the last requested load is the one that
//! lands.

pub mod aggregate;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod facets;
pub mod filter;
pub mod reconcile;
pub mod session;
pub mod store;

pub use aggregate::{summarize, UNKNOWN_BRAND, UNKNOWN_PERSON};
pub use debounce::{Debounced, DEBOUNCE_MS};
pub use detail::detail_rows;
pub use error::{EngineError, EngineResult};
pub use facets::{FacetCatalog, ProductOption, UNKNOWN_PRODUCT};
pub use filter::{filtered, FilteredRecords};
pub use reconcile::reconcile;
pub use session::{DashboardReport, DashboardSession, LoadOutcome, LoadTicket};
pub use store::{RecordStore, BATCH_SIZE};

// Re-export shared types for convenience
pub use shared::{DateRange, Facet, FacetSelection, RecordSet, WarehouseMode};
