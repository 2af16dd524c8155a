//! Inventory reconciliation (进销差异对账)
//!
//! Per product: difference = sold - inbounds + returns + sorting
//! adjustment. A zero difference means the product reconciles and its
//! row is dropped, but its volumes still count toward the report
//! totals. Only the stock-warehouse table carries inbound columns, so a
//! person-mode dataset reconciles to an empty report.

use std::collections::BTreeMap;

use shared::{ReconciliationReport, ReconciliationRow, ReconciliationTotals};

use crate::facets::UNKNOWN_PRODUCT;
use crate::filter::FilteredRecords;

#[derive(Default)]
struct ProductTally {
    name: Option<String>,
    inbounds: f64,
    sold: f64,
    returns: f64,
    sorting: f64,
}

/// Build the discrepancy report over the filtered rows.
pub fn reconcile(records: &FilteredRecords<'_>) -> ReconciliationReport {
    let rows = match records {
        FilteredRecords::Warehouse(rows) => rows,
        FilteredRecords::Person(_) => return ReconciliationReport::empty(),
    };

    let mut tallies: BTreeMap<&str, ProductTally> = BTreeMap::new();
    for row in rows {
        // First-seen name labels the group, blank counting as missing
        let tally = tallies
            .entry(row.product_id.as_str())
            .or_insert_with(|| ProductTally {
                name: row.product_name.clone().filter(|name| !name.is_empty()),
                ..Default::default()
            });
        tally.inbounds += row.inbounds;
        tally.sold += row.quantity;
        tally.returns += row.returns;
        tally.sorting += row.sorting_difference;
    }

    let mut totals = ReconciliationTotals::default();
    let mut report_rows = Vec::new();

    for (product_id, tally) in tallies {
        let difference = tally.sold - tally.inbounds + tally.returns + tally.sorting;

        // Totals run over every group, reconciled ones included
        totals.inbounds += tally.inbounds;
        totals.sold_quantity += tally.sold;
        totals.returns += tally.returns;
        totals.sorting_difference += tally.sorting;
        totals.difference += difference;

        if difference != 0.0 {
            report_rows.push(ReconciliationRow {
                product_id: product_id.to_string(),
                product_name: tally.name.unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
                inbounds: tally.inbounds,
                sold_quantity: tally.sold,
                returns_adjusted: tally.returns + tally.sorting,
                difference,
            });
        }
    }

    report_rows.sort_by(|a, b| b.difference.abs().total_cmp(&a.difference.abs()));

    ReconciliationReport {
        rows: report_rows,
        totals,
    }
}
