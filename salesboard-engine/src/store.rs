//! Batched record loading (销售流水拉取)
//!
//! Pulls a full reporting window from the gateway one fixed-size page at
//! a time. A page shorter than the batch size is the end-of-data
//! sentinel; a page that exactly fills the batch is assumed non-terminal
//! and costs one extra round-trip.

use std::future::Future;

use salesboard_client::{ClientResult, RecordSource};
use shared::{DateRange, RecordSet, WarehouseMode};

use crate::error::EngineResult;

/// Rows requested per page. Overridable for tests via [`RecordStore::with_batch_size`].
pub const BATCH_SIZE: u64 = 50_000;

/// Loads complete datasets from a [`RecordSource`].
///
/// A load is atomic: any failed page aborts the whole pull and the
/// accumulated rows are dropped. Nothing is cached here; the session
/// owns the loaded set.
#[derive(Debug, Clone)]
pub struct RecordStore<S> {
    source: S,
    batch_size: u64,
}

impl<S: RecordSource> RecordStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            batch_size: BATCH_SIZE,
        }
    }

    /// Override the page size (tests drive pagination with small batches)
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    /// Fetch every record in `range` for `mode`. Success or error, never
    /// a partial set.
    pub async fn load(&self, range: DateRange, mode: WarehouseMode) -> EngineResult<RecordSet> {
        let set = match mode {
            WarehouseMode::Default => {
                let rows = self
                    .fetch_all(|offset, limit| self.source.fetch_warehouse_page(range, offset, limit))
                    .await?;
                RecordSet::Warehouse(rows)
            }
            WarehouseMode::Longqiao => {
                let rows = self
                    .fetch_all(|offset, limit| self.source.fetch_person_page(range, offset, limit))
                    .await?;
                RecordSet::Person(rows)
            }
        };

        tracing::info!(table = mode.table(), rows = set.len(), "record load complete");
        Ok(set)
    }

    /// Page loop shared by both tables. Size-based termination: stop on
    /// the first page shorter than the batch size.
    async fn fetch_all<R, F, Fut>(&self, mut fetch_page: F) -> EngineResult<Vec<R>>
    where
        F: FnMut(u64, u64) -> Fut,
        Fut: Future<Output = ClientResult<Vec<R>>>,
    {
        let mut all = Vec::new();
        let mut offset = 0u64;

        loop {
            let page = fetch_page(offset, self.batch_size).await?;
            let fetched = page.len() as u64;
            tracing::debug!(offset, rows = fetched, "fetched record page");

            all.extend(page);
            if fetched < self.batch_size {
                break;
            }
            offset += self.batch_size;
        }

        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use salesboard_client::ClientError;
    use shared::{PersonRecord, WarehouseRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a fixed row set one slice at a time, counting requests.
    /// Optionally fails on the nth page to exercise load atomicity.
    struct PagedSource {
        warehouse_rows: Vec<WarehouseRecord>,
        person_rows: Vec<PersonRecord>,
        calls: AtomicUsize,
        fail_on_page: Option<usize>,
    }

    impl PagedSource {
        fn warehouse(rows: Vec<WarehouseRecord>) -> Self {
            Self {
                warehouse_rows: rows,
                person_rows: Vec::new(),
                calls: AtomicUsize::new(0),
                fail_on_page: None,
            }
        }

        fn person(rows: Vec<PersonRecord>) -> Self {
            Self {
                warehouse_rows: Vec::new(),
                person_rows: rows,
                calls: AtomicUsize::new(0),
                fail_on_page: None,
            }
        }

        fn failing_on_page(mut self, page: usize) -> Self {
            self.fail_on_page = Some(page);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn page<R: Clone>(&self, rows: &[R], offset: u64, limit: u64) -> ClientResult<Vec<R>> {
            let page = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on_page == Some(page) {
                return Err(ClientError::Fetch {
                    status: http::StatusCode::INTERNAL_SERVER_ERROR,
                    message: "backend unavailable".to_string(),
                });
            }
            let start = (offset as usize).min(rows.len());
            let end = (start + limit as usize).min(rows.len());
            Ok(rows[start..end].to_vec())
        }
    }

    #[async_trait]
    impl RecordSource for PagedSource {
        async fn fetch_warehouse_page(
            &self,
            _range: DateRange,
            offset: u64,
            limit: u64,
        ) -> ClientResult<Vec<WarehouseRecord>> {
            self.page(&self.warehouse_rows, offset, limit)
        }

        async fn fetch_person_page(
            &self,
            _range: DateRange,
            offset: u64,
            limit: u64,
        ) -> ClientResult<Vec<PersonRecord>> {
            self.page(&self.person_rows, offset, limit)
        }
    }

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
        )
        .unwrap()
    }

    fn wh_rows(count: usize) -> Vec<WarehouseRecord> {
        (0..count)
            .map(|i| WarehouseRecord {
                sale_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                product_id: format!("P{:03}", i),
                ..Default::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_short_page_terminates_after_one_request() {
        let store = RecordStore::new(PagedSource::warehouse(wh_rows(3))).with_batch_size(10);

        let set = store.load(range(), WarehouseMode::Default).await.unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(store.source.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_dataset_still_issues_one_request() {
        let store = RecordStore::new(PagedSource::warehouse(Vec::new())).with_batch_size(10);

        let set = store.load(range(), WarehouseMode::Default).await.unwrap();

        assert!(set.is_empty());
        assert_eq!(store.source.calls(), 1);
        assert_eq!(set.mode(), WarehouseMode::Default);
    }

    #[tokio::test]
    async fn test_exact_multiple_costs_one_extra_round_trip() {
        // 4 rows at batch size 2: two full pages, then the empty sentinel page
        let store = RecordStore::new(PagedSource::warehouse(wh_rows(4))).with_batch_size(2);

        let set = store.load(range(), WarehouseMode::Default).await.unwrap();

        assert_eq!(set.len(), 4);
        assert_eq!(store.source.calls(), 3);
    }

    #[tokio::test]
    async fn test_non_multiple_stops_on_partial_page() {
        let store = RecordStore::new(PagedSource::warehouse(wh_rows(5))).with_batch_size(2);

        let set = store.load(range(), WarehouseMode::Default).await.unwrap();

        assert_eq!(set.len(), 5);
        assert_eq!(store.source.calls(), 3);
    }

    #[tokio::test]
    async fn test_mid_batch_failure_aborts_load() {
        let store = RecordStore::new(
            PagedSource::warehouse(wh_rows(6)).failing_on_page(1),
        )
        .with_batch_size(2);

        let result = store.load(range(), WarehouseMode::Default).await;

        assert!(result.is_err());
        assert_eq!(store.source.calls(), 2);
    }

    #[tokio::test]
    async fn test_person_mode_loads_person_table() {
        let rows = vec![
            PersonRecord {
                sale_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                product_id: "P001".to_string(),
                sales_person: Some("张三".to_string()),
                amount: 100.0,
                ..Default::default()
            },
        ];
        let store = RecordStore::new(PagedSource::person(rows)).with_batch_size(10);

        let set = store.load(range(), WarehouseMode::Longqiao).await.unwrap();

        assert_eq!(set.mode(), WarehouseMode::Longqiao);
        assert_eq!(set.len(), 1);
    }
}
