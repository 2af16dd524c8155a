//! Transaction record models (销售流水)
//!
//! Two wire shapes, one per warehouse mode. A loaded dataset holds exactly
//! one shape; `RecordSet` makes mixing them impossible.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Which transaction table a dataset comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseMode {
    /// Stock warehouses (`sales_records`); location facet is the warehouse id
    #[default]
    Default,
    /// 隆桥 direct sales (`longqiao_records`); location facet is the salesperson
    Longqiao,
}

impl WarehouseMode {
    /// Backend table name
    pub fn table(self) -> &'static str {
        match self {
            WarehouseMode::Default => "sales_records",
            WarehouseMode::Longqiao => "longqiao_records",
        }
    }

    /// Column projection requested for this mode
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            WarehouseMode::Default => &[
                "sale_date",
                "product_id",
                "product_name",
                "warehouse",
                "quantity",
                "unit_price",
                "brand",
                "pieces",
                "returns",
                "inbounds",
                "difference",
            ],
            WarehouseMode::Longqiao => &[
                "sale_date",
                "product_id",
                "product_name",
                "sales",
                "quantity",
                "customer",
                "amount",
                "cost",
                "brand",
            ],
        }
    }

    pub fn is_person(self) -> bool {
        matches!(self, WarehouseMode::Longqiao)
    }
}

/// Numeric columns are nullable on the backend; blanks come back as NULL.
fn f64_or_zero<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(de)?.unwrap_or_default())
}

/// One row of the stock-warehouse table (`sales_records`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseRecord {
    pub sale_date: NaiveDate,
    #[serde(default)]
    pub product_id: String,
    pub product_name: Option<String>,
    pub warehouse: Option<String>,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub unit_price: f64,
    pub brand: Option<String>,
    /// Shipped units; quantity cards count these, not `quantity`
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub pieces: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub returns: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub inbounds: f64,
    /// Warehouse-reported sorting adjustment (wire column `difference`)
    #[serde(default, deserialize_with = "f64_or_zero", rename = "difference")]
    pub sorting_difference: f64,
}

/// One row of the 隆桥 person-mode table (`longqiao_records`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub sale_date: NaiveDate,
    #[serde(default)]
    pub product_id: String,
    pub product_name: Option<String>,
    /// Salesperson; doubles as the location facet in this mode (wire column `sales`)
    #[serde(rename = "sales")]
    pub sales_person: Option<String>,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub quantity: f64,
    pub customer: Option<String>,
    /// Sale amount; zero marks a free-issue record (cost disbursement)
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub amount: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub cost: f64,
    pub brand: Option<String>,
}

/// Facet accessors shared by both record shapes.
///
/// `location` reads the warehouse id in default mode and the salesperson in
/// person mode. `customer` only exists in person mode.
pub trait Record {
    fn location(&self) -> Option<&str>;
    fn brand(&self) -> Option<&str>;
    fn product_id(&self) -> &str;
    fn product_name(&self) -> Option<&str>;
    fn customer(&self) -> Option<&str> {
        None
    }
}

impl Record for WarehouseRecord {
    fn location(&self) -> Option<&str> {
        self.warehouse.as_deref()
    }

    fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    fn product_id(&self) -> &str {
        &self.product_id
    }

    fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }
}

impl Record for PersonRecord {
    fn location(&self) -> Option<&str> {
        self.sales_person.as_deref()
    }

    fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    fn product_id(&self) -> &str {
        &self.product_id
    }

    fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }

    fn customer(&self) -> Option<&str> {
        self.customer.as_deref()
    }
}

/// A fully loaded dataset. Exactly one shape per load; a new load replaces
/// the previous set wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSet {
    Warehouse(Vec<WarehouseRecord>),
    Person(Vec<PersonRecord>),
}

impl RecordSet {
    pub fn empty(mode: WarehouseMode) -> Self {
        match mode {
            WarehouseMode::Default => RecordSet::Warehouse(Vec::new()),
            WarehouseMode::Longqiao => RecordSet::Person(Vec::new()),
        }
    }

    pub fn mode(&self) -> WarehouseMode {
        match self {
            RecordSet::Warehouse(_) => WarehouseMode::Default,
            RecordSet::Person(_) => WarehouseMode::Longqiao,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RecordSet::Warehouse(rows) => rows.len(),
            RecordSet::Person(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
