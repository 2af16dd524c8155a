//! Record source seam between the engine and the network client

use async_trait::async_trait;
use shared::{DateRange, PersonRecord, RecordQuery, WarehouseMode, WarehouseRecord};

use crate::{ClientResult, HttpClient};

/// Paged access to the two transaction tables. The engine drives this one
/// batch at a time and decides when to stop.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_warehouse_page(
        &self,
        range: DateRange,
        offset: u64,
        limit: u64,
    ) -> ClientResult<Vec<WarehouseRecord>>;

    async fn fetch_person_page(
        &self,
        range: DateRange,
        offset: u64,
        limit: u64,
    ) -> ClientResult<Vec<PersonRecord>>;
}

fn page_query(mode: WarehouseMode, range: DateRange, offset: u64, limit: u64) -> RecordQuery {
    RecordQuery::table(mode.table())
        .select(mode.fields().iter().copied())
        .between("sale_date", range.start(), range.end())
        .offset(offset)
        .limit(limit)
}

#[async_trait]
impl RecordSource for HttpClient {
    async fn fetch_warehouse_page(
        &self,
        range: DateRange,
        offset: u64,
        limit: u64,
    ) -> ClientResult<Vec<WarehouseRecord>> {
        self.fetch_rows(&page_query(WarehouseMode::Default, range, offset, limit))
            .await
    }

    async fn fetch_person_page(
        &self,
        range: DateRange,
        offset: u64,
        limit: u64,
    ) -> ClientResult<Vec<PersonRecord>> {
        self.fetch_rows(&page_query(WarehouseMode::Longqiao, range, offset, limit))
            .await
    }
}
