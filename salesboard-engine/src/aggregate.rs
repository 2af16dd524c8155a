//! Summary rollups (销售汇总)
//!
//! Card totals plus a grouped summary table over the filtered rows.
//! Default mode always groups by brand. Person mode groups by brand
//! too, unless the subset narrows to a single brand, in which case the
//! table pivots to salesperson rows and the cards re-derive from that
//! brand's rows alone.
//!
//! Person-mode rows with a zero amount are free issues: their cost is
//! tracked separately and never counts as sold quantity, amount or
//! profit.

use std::collections::{BTreeMap, BTreeSet};

use shared::{
    BrandSummary, PersonRecord, PersonSummary, Record, SalesSummary, SummaryRows, SummaryTotals,
    WarehouseRecord,
};

use crate::filter::FilteredRecords;

/// Grouping fallback for rows whose brand column is NULL or blank
pub const UNKNOWN_BRAND: &str = "未知品牌";
/// Grouping fallback for person-mode rows without a salesperson
pub const UNKNOWN_PERSON: &str = "未知销售人员";

/// Roll the filtered rows up into card totals and summary table rows.
///
/// `brand_catalog` is the brand dropdown's option list; it only matters
/// for the person-mode pivot check.
pub fn summarize(records: &FilteredRecords<'_>, brand_catalog: &[String]) -> SalesSummary {
    match records {
        FilteredRecords::Warehouse(rows) => summarize_warehouse(rows),
        FilteredRecords::Person(rows) => summarize_person(rows, brand_catalog),
    }
}

fn summarize_warehouse(rows: &[&WarehouseRecord]) -> SalesSummary {
    if rows.is_empty() {
        return SalesSummary::empty();
    }

    let mut totals = SummaryTotals::default();
    let mut groups: BTreeMap<&str, BrandSummary> = BTreeMap::new();

    for row in rows {
        // Quantity cards count shipped pieces; the amount derives from
        // the raw quantity times the unit price.
        let amount = row.quantity * row.unit_price;
        totals.total_quantity += row.pieces;
        totals.total_amount += amount;

        let group = brand_group(&mut groups, row.brand.as_deref());
        group.total_quantity += row.pieces;
        group.total_amount += amount;
    }

    totals.product_count = distinct_products(rows);
    totals.brand_count = distinct_brands(rows);

    SalesSummary {
        totals,
        rows: SummaryRows::Brand(sorted_by_amount(groups)),
    }
}

fn summarize_person(rows: &[&PersonRecord], brand_catalog: &[String]) -> SalesSummary {
    if rows.is_empty() {
        return SalesSummary::empty();
    }

    if let Some(brand) = single_brand(rows, brand_catalog) {
        return pivot_by_person(rows, brand);
    }

    let mut totals = SummaryTotals::default();
    let mut groups: BTreeMap<&str, BrandSummary> = BTreeMap::new();

    for row in rows {
        let group = brand_group(&mut groups, row.brand.as_deref());

        if row.amount == 0.0 {
            group.free_issue += row.cost;
            totals.free_issue += row.cost;
        } else {
            let profit = row.amount - row.cost;
            group.total_quantity += row.quantity;
            group.total_amount += row.amount;
            group.total_cost += row.cost;
            group.profit += profit;
            totals.total_quantity += row.quantity;
            totals.total_amount += row.amount;
            totals.total_profit += profit;
        }
    }

    totals.product_count = distinct_products(rows);
    totals.brand_count = distinct_brands(rows);

    SalesSummary {
        totals,
        rows: SummaryRows::Brand(sorted_by_amount(groups)),
    }
}

/// The pivot fires when the filtered rows carry exactly one distinct
/// brand, or failing that when the brand dropdown offers only one.
/// Observed wins over the catalog when both could apply.
fn single_brand<'a>(rows: &[&'a PersonRecord], brand_catalog: &'a [String]) -> Option<&'a str> {
    let observed: BTreeSet<&str> = rows
        .iter()
        .filter_map(|row| row.brand.as_deref())
        .filter(|brand| !brand.is_empty())
        .collect();

    if observed.len() == 1 {
        observed.into_iter().next()
    } else if brand_catalog.len() == 1 {
        Some(brand_catalog[0].as_str())
    } else {
        None
    }
}

/// Group the single brand's rows by salesperson. The cards re-derive
/// from this subset alone, so rows of any other (or missing) brand stop
/// counting entirely.
fn pivot_by_person(rows: &[&PersonRecord], brand: &str) -> SalesSummary {
    let subset: Vec<&PersonRecord> = rows
        .iter()
        .copied()
        .filter(|row| row.brand.as_deref() == Some(brand))
        .collect();

    let mut totals = SummaryTotals::default();
    let mut groups: BTreeMap<&str, PersonSummary> = BTreeMap::new();

    for row in &subset {
        let key = row
            .sales_person
            .as_deref()
            .filter(|person| !person.is_empty())
            .unwrap_or(UNKNOWN_PERSON);
        let group = groups.entry(key).or_insert_with(|| PersonSummary {
            person: key.to_string(),
            ..Default::default()
        });

        if row.amount == 0.0 {
            group.free_issue += row.cost;
            totals.free_issue += row.cost;
        } else {
            let profit = row.amount - row.cost;
            group.total_quantity += row.quantity;
            group.total_amount += row.amount;
            group.profit += profit;
            totals.total_quantity += row.quantity;
            totals.total_amount += row.amount;
            totals.total_profit += profit;
        }
    }

    totals.product_count = distinct_products(&subset);
    totals.brand_count = usize::from(!subset.is_empty());

    let mut person_rows: Vec<PersonSummary> = groups.into_values().collect();
    person_rows.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));

    SalesSummary {
        totals,
        rows: SummaryRows::Person(person_rows),
    }
}

fn brand_group<'g, 'r>(
    groups: &'g mut BTreeMap<&'r str, BrandSummary>,
    brand: Option<&'r str>,
) -> &'g mut BrandSummary {
    let key = brand.filter(|b| !b.is_empty()).unwrap_or(UNKNOWN_BRAND);
    groups.entry(key).or_insert_with(|| BrandSummary {
        brand: key.to_string(),
        ..Default::default()
    })
}

fn sorted_by_amount(groups: BTreeMap<&str, BrandSummary>) -> Vec<BrandSummary> {
    let mut rows: Vec<BrandSummary> = groups.into_values().collect();
    rows.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
    rows
}

fn distinct_products<R: Record>(rows: &[&R]) -> usize {
    rows.iter()
        .map(|row| row.product_id())
        .filter(|id| !id.is_empty())
        .collect::<BTreeSet<_>>()
        .len()
}

fn distinct_brands<R: Record>(rows: &[&R]) -> usize {
    rows.iter()
        .filter_map(|row| row.brand())
        .filter(|brand| !brand.is_empty())
        .collect::<BTreeSet<_>>()
        .len()
}
