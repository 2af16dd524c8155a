//! Dataset filtering (数据筛选)
//!
//! A single pass producing the borrowed row list every report view
//! reads. The loaded set itself is never reordered or mutated.

use shared::{Facet, FacetSelection, PersonRecord, Record, RecordSet, WarehouseRecord};

/// Rows that survive the current selection, borrowed from the loaded set.
#[derive(Debug, PartialEq)]
pub enum FilteredRecords<'a> {
    Warehouse(Vec<&'a WarehouseRecord>),
    Person(Vec<&'a PersonRecord>),
}

impl FilteredRecords<'_> {
    pub fn len(&self) -> usize {
        match self {
            FilteredRecords::Warehouse(rows) => rows.len(),
            FilteredRecords::Person(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Intersection semantics: a row survives only when every active facet
/// accepts it. Inactive facets accept everything.
pub fn filtered<'a>(records: &'a RecordSet, selection: &FacetSelection) -> FilteredRecords<'a> {
    match records {
        RecordSet::Warehouse(rows) => FilteredRecords::Warehouse(
            rows.iter()
                .filter(|row| matches(*row, selection, false))
                .collect(),
        ),
        RecordSet::Person(rows) => FilteredRecords::Person(
            rows.iter()
                .filter(|row| matches(*row, selection, true))
                .collect(),
        ),
    }
}

/// Warehouse rows carry no customer column, so the customer facet only
/// applies to person-mode rows.
pub(crate) fn matches<R: Record>(
    row: &R,
    selection: &FacetSelection,
    with_customer: bool,
) -> bool {
    selection.matches(Facet::Location, row.location())
        && selection.matches(Facet::Brand, row.brand())
        && selection.matches(Facet::Product, Some(row.product_id()))
        && (!with_customer || selection.matches(Facet::Customer, row.customer()))
}
