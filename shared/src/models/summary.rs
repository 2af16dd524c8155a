//! Summary rollups for the dashboard cards and summary table

use serde::{Deserialize, Serialize};

/// Brand-keyed rollup row. Cost, profit and free-issue stay zero in
/// default mode; person mode fills them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSummary {
    pub brand: String,
    pub total_quantity: f64,
    pub total_amount: f64,
    pub total_cost: f64,
    pub profit: f64,
    pub free_issue: f64,
}

/// Salesperson-keyed rollup row, produced only by the single-brand pivot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub person: String,
    pub total_quantity: f64,
    pub total_amount: f64,
    pub profit: f64,
    pub free_issue: f64,
}

/// Rows grouped by exactly one key. Brand and person rows never mix in
/// one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "groupBy", content = "rows", rename_all = "camelCase")]
pub enum SummaryRows {
    Brand(Vec<BrandSummary>),
    Person(Vec<PersonSummary>),
}

impl SummaryRows {
    pub fn len(&self) -> usize {
        match self {
            SummaryRows::Brand(rows) => rows.len(),
            SummaryRows::Person(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Card totals shown above the summary table. Profit and free-issue stay
/// zero in default mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_quantity: f64,
    pub total_amount: f64,
    pub total_profit: f64,
    pub free_issue: f64,
    pub product_count: usize,
    pub brand_count: usize,
}

/// Full aggregation result for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub totals: SummaryTotals,
    pub rows: SummaryRows,
}

impl SalesSummary {
    /// Zero totals, no rows. What an empty filtered set aggregates to.
    pub fn empty() -> Self {
        Self {
            totals: SummaryTotals::default(),
            rows: SummaryRows::Brand(Vec::new()),
        }
    }
}
