//! Cascading filter options (级联筛选)
//!
//! Each dropdown offers only values reachable under the picks made
//! upstream of it. Locations always show the whole dataset; brands
//! honor the location picks; products and customers honor location and
//! brand. A dropdown never narrows itself.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use shared::{Facet, FacetSelection, Record, RecordSet};

/// Display fallback for rows whose product name column is NULL or blank
pub const UNKNOWN_PRODUCT: &str = "未知商品";

/// One product dropdown entry. The id is what filtering matches on; the
/// name is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductOption {
    pub id: String,
    pub name: String,
}

/// Option lists for the four filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetCatalog {
    pub locations: Vec<String>,
    pub brands: Vec<String>,
    pub products: Vec<ProductOption>,
    /// Customer options exist only for person-mode datasets
    pub customers: Vec<String>,
}

impl FacetCatalog {
    /// Recompute all four option lists for the loaded dataset under the
    /// current selection.
    pub fn derive(records: &RecordSet, selection: &FacetSelection) -> Self {
        match records {
            RecordSet::Warehouse(rows) => Self::from_rows(rows, selection, false),
            RecordSet::Person(rows) => Self::from_rows(rows, selection, true),
        }
    }

    fn from_rows<R: Record>(rows: &[R], selection: &FacetSelection, person_mode: bool) -> Self {
        let mut locations = BTreeSet::new();
        let mut brands = BTreeSet::new();
        // First-seen name wins when the same id carries several spellings
        let mut products: BTreeMap<String, String> = BTreeMap::new();
        let mut customers = BTreeSet::new();

        for row in rows {
            if let Some(location) = row.location().filter(|v| !v.is_empty()) {
                locations.insert(location.to_string());
            }

            if !selection.matches(Facet::Location, row.location()) {
                continue;
            }
            if let Some(brand) = row.brand().filter(|v| !v.is_empty()) {
                brands.insert(brand.to_string());
            }

            if !selection.matches(Facet::Brand, row.brand()) {
                continue;
            }
            let id = row.product_id();
            if !id.is_empty() {
                products.entry(id.to_string()).or_insert_with(|| {
                    row.product_name()
                        .filter(|name| !name.is_empty())
                        .unwrap_or(UNKNOWN_PRODUCT)
                        .to_string()
                });
            }
            if person_mode {
                if let Some(customer) = row.customer().filter(|v| !v.is_empty()) {
                    customers.insert(customer.to_string());
                }
            }
        }

        let mut products: Vec<ProductOption> = products
            .into_iter()
            .map(|(id, name)| ProductOption { id, name })
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            locations: locations.into_iter().collect(),
            brands: brands.into_iter().collect(),
            products,
            customers: customers.into_iter().collect(),
        }
    }
}
