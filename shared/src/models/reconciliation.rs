//! Inventory reconciliation rows (进销差异)

use serde::{Deserialize, Serialize};

/// Per-product discrepancy row. Only rows with a non-zero difference
/// survive; `returns_adjusted` folds the sorting adjustment into returns
/// for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationRow {
    pub product_id: String,
    pub product_name: String,
    pub inbounds: f64,
    pub sold_quantity: f64,
    pub returns_adjusted: f64,
    /// sold - inbounds + returns + sorting adjustment
    pub difference: f64,
}

/// Dataset-wide sums across every product group, zero-difference groups
/// included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationTotals {
    pub inbounds: f64,
    pub sold_quantity: f64,
    pub returns: f64,
    pub sorting_difference: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub rows: Vec<ReconciliationRow>,
    pub totals: ReconciliationTotals,
}

impl ReconciliationReport {
    pub fn empty() -> Self {
        Self::default()
    }
}
