//! Per-record detail rows (明细表 / export data)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One filtered record, flattened for the detail table and export.
/// Lists are sorted newest sale date first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    pub sale_date: NaiveDate,
    pub product_id: String,
    pub product_name: Option<String>,
    pub brand: Option<String>,
    /// Warehouse id, or the salesperson in person mode
    pub location: Option<String>,
    /// Person mode only
    pub customer: Option<String>,
    pub quantity: f64,
    /// Default mode only
    pub unit_price: Option<f64>,
    /// Person mode only
    pub cost: Option<f64>,
    /// quantity x unit price in default mode, the stored amount in person mode
    pub amount: f64,
    /// amount - cost; person mode only
    pub profit: Option<f64>,
}
