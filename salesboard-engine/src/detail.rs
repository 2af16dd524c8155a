//! Detail table rows (明细)

use shared::DetailRow;

use crate::filter::FilteredRecords;

/// Flatten the filtered rows for the detail table and export, newest
/// sale date first. The amount is derived in default mode and stored in
/// person mode; profit only exists where a cost does.
pub fn detail_rows(records: &FilteredRecords<'_>) -> Vec<DetailRow> {
    let mut rows: Vec<DetailRow> = match records {
        FilteredRecords::Warehouse(rows) => rows
            .iter()
            .map(|row| DetailRow {
                sale_date: row.sale_date,
                product_id: row.product_id.clone(),
                product_name: row.product_name.clone(),
                brand: row.brand.clone(),
                location: row.warehouse.clone(),
                customer: None,
                quantity: row.quantity,
                unit_price: Some(row.unit_price),
                cost: None,
                amount: row.quantity * row.unit_price,
                profit: None,
            })
            .collect(),
        FilteredRecords::Person(rows) => rows
            .iter()
            .map(|row| DetailRow {
                sale_date: row.sale_date,
                product_id: row.product_id.clone(),
                product_name: row.product_name.clone(),
                brand: row.brand.clone(),
                location: row.sales_person.clone(),
                customer: row.customer.clone(),
                quantity: row.quantity,
                unit_price: None,
                cost: Some(row.cost),
                amount: row.amount,
                profit: Some(row.amount - row.cost),
            })
            .collect(),
    };

    // Stable sort: same-day rows keep their load order
    rows.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));
    rows
}
