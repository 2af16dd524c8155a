//! Dashboard session (看板会话)
//!
//! Owns one dashboard's complete state: warehouse mode, reporting
//! period, the loaded dataset, filter selections and the derived
//! dropdown catalogs. Loads install through numbered tickets; an
//! out-of-order completion never clobbers newer data, whatever the user
//! requested last wins.

use chrono::{Local, NaiveDate};
use salesboard_client::RecordSource;
use serde::Serialize;
use shared::{
    DateRange, DetailRow, Facet, FacetSelection, ReconciliationReport, RecordSet, SalesSummary,
    WarehouseMode,
};

use crate::aggregate::summarize;
use crate::detail::detail_rows;
use crate::error::{EngineError, EngineResult};
use crate::facets::FacetCatalog;
use crate::filter::filtered;
use crate::reconcile::reconcile;
use crate::store::RecordStore;

/// Claim check for one load. Carries the parameters the load answers,
/// so a result for a stale period or table can be recognized and
/// dropped on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    range: DateRange,
    mode: WarehouseMode,
}

impl LoadTicket {
    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn mode(&self) -> WarehouseMode {
        self.mode
    }
}

/// What became of an offered load result.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Installed as the current dataset
    Applied { records: usize },
    /// A newer request exists or the session moved on; payload dropped
    Superseded,
    /// The load itself failed; the previous dataset stays
    Failed(EngineError),
}

/// Everything the dashboard renders for one query, over the filtered
/// subset of the loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub summary: SalesSummary,
    pub reconciliation: ReconciliationReport,
    pub details: Vec<DetailRow>,
    /// Filtered record count, shown next to the detail table
    pub record_count: usize,
}

/// One user's dashboard state. All mutation goes through `&mut self`;
/// there are no module-level singletons.
pub struct DashboardSession<S> {
    store: RecordStore<S>,
    mode: WarehouseMode,
    range: DateRange,
    records: RecordSet,
    catalog: FacetCatalog,
    selection: FacetSelection,
    /// Ticket counters. A session is loading while a ticket newer than
    /// the last settled one is outstanding.
    issued: u64,
    settled: u64,
}

impl<S: RecordSource> DashboardSession<S> {
    pub fn new(store: RecordStore<S>, mode: WarehouseMode, range: DateRange) -> Self {
        let records = RecordSet::empty(mode);
        let selection = FacetSelection::default();
        let catalog = FacetCatalog::derive(&records, &selection);
        Self {
            store,
            mode,
            range,
            records,
            catalog,
            selection,
            issued: 0,
            settled: 0,
        }
    }

    /// Start a load attempt. The caller fetches with the ticket's
    /// parameters and offers the result back via [`apply_load`].
    ///
    /// [`apply_load`]: DashboardSession::apply_load
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        tracing::debug!(seq = self.issued, table = self.mode.table(), "load ticket issued");
        LoadTicket {
            seq: self.issued,
            range: self.range,
            mode: self.mode,
        }
    }

    /// Offer a completed load. Only the newest ticket still answering
    /// the session's current period and table may install; anything
    /// else is dropped without touching the dataset.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: EngineResult<RecordSet>,
    ) -> LoadOutcome {
        if ticket.seq != self.issued || ticket.range != self.range || ticket.mode != self.mode {
            tracing::debug!(seq = ticket.seq, newest = self.issued, "discarding superseded load");
            return LoadOutcome::Superseded;
        }

        self.settled = ticket.seq;
        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                // A fresh dataset means fresh dropdowns and a clean slate
                self.selection.clear_all();
                self.recompute_catalog();
                tracing::info!(seq = ticket.seq, records = count, "load applied");
                LoadOutcome::Applied { records: count }
            }
            Err(err) => {
                tracing::warn!(seq = ticket.seq, "load failed, keeping previous dataset: {err}");
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Load the current period and install the result. For sequential
    /// callers; concurrent shells drive [`begin_load`]/[`apply_load`]
    /// themselves.
    ///
    /// [`begin_load`]: DashboardSession::begin_load
    /// [`apply_load`]: DashboardSession::apply_load
    pub async fn refresh(&mut self) -> EngineResult<usize> {
        let ticket = self.begin_load();
        let result = self.store.load(ticket.range(), ticket.mode()).await;
        match self.apply_load(ticket, result) {
            LoadOutcome::Applied { records } => Ok(records),
            LoadOutcome::Failed(err) => Err(err),
            // Unreachable in practice: nothing else can issue a ticket
            // while refresh holds the session exclusively
            LoadOutcome::Superseded => Ok(0),
        }
    }

    /// Store a new reporting period. Rejected up front if inverted;
    /// the caller refreshes afterwards (usually through the debouncer).
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> EngineResult<()> {
        let range = DateRange::new(start, end)?;
        if range != self.range {
            self.range = range;
            // Anything in flight answers the old period
            self.settled = self.issued;
        }
        Ok(())
    }

    /// Flip the warehouse mode: empty dataset of the new shape, all
    /// selections cleared, period back to the reporting default. The
    /// caller refreshes afterwards.
    pub fn switch_mode(&mut self, mode: WarehouseMode) {
        self.switch_mode_on(mode, Local::now().date_naive());
    }

    fn switch_mode_on(&mut self, mode: WarehouseMode, today: NaiveDate) {
        self.mode = mode;
        self.range = DateRange::reporting_default(today);
        self.records = RecordSet::empty(mode);
        self.selection.clear_all();
        self.recompute_catalog();
        // In-flight loads answer the old table
        self.settled = self.issued;
        tracing::info!(table = mode.table(), "warehouse mode switched");
    }

    /// Replace one facet's picks. Downstream selections reset and their
    /// candidate lists re-derive; upstream picks stay.
    pub fn select<I, V>(&mut self, facet: Facet, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.selection.set(facet, values);
        self.selection.clear_downstream(facet);
        self.recompute_catalog();
    }

    /// Clear one facet. Cascades downstream exactly like a selection.
    pub fn clear(&mut self, facet: Facet) {
        self.selection.clear(facet);
        self.selection.clear_downstream(facet);
        self.recompute_catalog();
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear_all();
        self.recompute_catalog();
    }

    /// Aggregate the filtered subset into everything the dashboard
    /// shows. Pure: no fetching, no mutation.
    pub fn query(&self) -> DashboardReport {
        let rows = filtered(&self.records, &self.selection);
        DashboardReport {
            summary: summarize(&rows, &self.catalog.brands),
            reconciliation: reconcile(&rows),
            details: detail_rows(&rows),
            record_count: rows.len(),
        }
    }

    /// True while a ticket newer than the last settled one is out.
    pub fn is_loading(&self) -> bool {
        self.issued > self.settled
    }

    pub fn mode(&self) -> WarehouseMode {
        self.mode
    }

    pub fn date_range(&self) -> DateRange {
        self.range
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn catalog(&self) -> &FacetCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    fn recompute_catalog(&mut self) {
        self.catalog = FacetCatalog::derive(&self.records, &self.selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use salesboard_client::{ClientError, ClientResult};
    use shared::WarehouseRecord;

    /// Serves a fixed dataset in one page, or fails every call.
    #[derive(Clone, Default)]
    struct StaticSource {
        warehouse_rows: Vec<WarehouseRecord>,
        fail: bool,
    }

    #[async_trait]
    impl RecordSource for StaticSource {
        async fn fetch_warehouse_page(
            &self,
            _range: DateRange,
            offset: u64,
            _limit: u64,
        ) -> ClientResult<Vec<WarehouseRecord>> {
            if self.fail {
                return Err(ClientError::Config("gateway url missing".to_string()));
            }
            Ok(if offset == 0 {
                self.warehouse_rows.clone()
            } else {
                Vec::new()
            })
        }

        async fn fetch_person_page(
            &self,
            _range: DateRange,
            _offset: u64,
            _limit: u64,
        ) -> ClientResult<Vec<shared::PersonRecord>> {
            if self.fail {
                return Err(ClientError::Config("gateway url missing".to_string()));
            }
            Ok(Vec::new())
        }
    }

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn session(rows: Vec<WarehouseRecord>) -> DashboardSession<StaticSource> {
        let store = RecordStore::new(StaticSource {
            warehouse_rows: rows,
            fail: false,
        });
        let range = DateRange::new(d(3, 1), d(3, 14)).unwrap();
        DashboardSession::new(store, WarehouseMode::Default, range)
    }

    fn wh(warehouse: &str, brand: &str, id: &str) -> WarehouseRecord {
        WarehouseRecord {
            sale_date: d(3, 5),
            warehouse: Some(warehouse.to_string()),
            brand: Some(brand.to_string()),
            product_id: id.to_string(),
            product_name: Some(format!("商品{id}")),
            quantity: 1.0,
            unit_price: 1.0,
            pieces: 1.0,
            ..Default::default()
        }
    }

    fn loaded(rows: Vec<WarehouseRecord>) -> EngineResult<RecordSet> {
        Ok(RecordSet::Warehouse(rows))
    }

    #[test]
    fn test_new_session_is_empty_and_idle() {
        let session = session(Vec::new());

        assert!(!session.is_loading());
        assert!(session.records().is_empty());
        let report = session.query();
        assert_eq!(report.record_count, 0);
        assert_eq!(report.summary, SalesSummary::empty());
        assert!(report.details.is_empty());
        assert!(report.reconciliation.rows.is_empty());
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let mut session = session(Vec::new());

        let first = session.begin_load();
        let second = session.begin_load();

        let outcome = session.apply_load(second, loaded(vec![wh("仓库B", "Y", "P2")]));
        assert!(matches!(outcome, LoadOutcome::Applied { records: 1 }));

        // The older request finishes afterwards; its payload must not land
        let outcome = session.apply_load(first, loaded(vec![wh("仓库A", "X", "P1")]));
        assert!(matches!(outcome, LoadOutcome::Superseded));

        match session.records() {
            RecordSet::Warehouse(rows) => {
                assert_eq!(rows[0].warehouse.as_deref(), Some("仓库B"));
            }
            RecordSet::Person(_) => panic!("warehouse dataset expected"),
        }
    }

    #[test]
    fn test_loading_clears_only_when_newest_settles() {
        let mut session = session(Vec::new());

        let first = session.begin_load();
        let _second = session.begin_load();
        assert!(session.is_loading());

        session.apply_load(first, loaded(Vec::new()));
        assert!(session.is_loading());

        let third = session.begin_load();
        session.apply_load(third, loaded(Vec::new()));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut session = session(Vec::new());
        let ticket = session.begin_load();
        session.apply_load(ticket, loaded(vec![wh("仓库A", "X", "P1")]));

        let ticket = session.begin_load();
        let outcome = session.apply_load(
            ticket,
            Err(EngineError::Client(ClientError::Config(
                "gateway url missing".to_string(),
            ))),
        );

        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert!(!session.is_loading());
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_date_change_invalidates_in_flight_loads() {
        let mut session = session(Vec::new());

        let ticket = session.begin_load();
        session.set_date_range(d(4, 1), d(4, 10)).unwrap();
        assert!(!session.is_loading());

        let outcome = session.apply_load(ticket, loaded(vec![wh("仓库A", "X", "P1")]));
        assert!(matches!(outcome, LoadOutcome::Superseded));
        assert!(session.records().is_empty());
    }

    #[test]
    fn test_unchanged_date_range_keeps_in_flight_valid() {
        let mut session = session(Vec::new());

        let ticket = session.begin_load();
        session.set_date_range(d(3, 1), d(3, 14)).unwrap();

        let outcome = session.apply_load(ticket, loaded(vec![wh("仓库A", "X", "P1")]));
        assert!(matches!(outcome, LoadOutcome::Applied { .. }));
    }

    #[test]
    fn test_inverted_period_rejected_before_fetch() {
        let mut session = session(Vec::new());
        let before = session.date_range();

        let err = session.set_date_range(d(3, 10), d(3, 9)).unwrap_err();

        assert!(matches!(err, EngineError::InvalidDateRange(_)));
        assert_eq!(session.date_range(), before);
    }

    #[test]
    fn test_apply_load_resets_selections_and_catalog() {
        let mut session = session(Vec::new());
        let ticket = session.begin_load();
        session.apply_load(ticket, loaded(vec![wh("仓库A", "X", "P1")]));
        session.select(Facet::Location, ["仓库A"]);

        let ticket = session.begin_load();
        session.apply_load(ticket, loaded(vec![wh("仓库B", "Y", "P2")]));

        assert!(session.selection().is_unfiltered());
        assert_eq!(session.catalog().locations, vec!["仓库B"]);
    }

    #[test]
    fn test_select_upstream_resets_downstream_only() {
        let mut session = session(Vec::new());
        let ticket = session.begin_load();
        session.apply_load(
            ticket,
            loaded(vec![
                wh("仓库A", "X", "P1"),
                wh("仓库A", "Y", "P2"),
                wh("仓库B", "X", "P3"),
            ]),
        );

        session.select(Facet::Location, ["仓库A"]);
        session.select(Facet::Brand, ["X"]);
        session.select(Facet::Product, ["P1"]);

        session.select(Facet::Brand, ["Y"]);

        assert_eq!(session.selection().location.len(), 1);
        assert_eq!(session.selection().brand.len(), 1);
        assert!(session.selection().product.is_empty());
        // Candidate products re-derive under the new brand
        let ids: Vec<&str> = session.catalog().products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P2"]);
    }

    #[test]
    fn test_clear_facet_cascades_downstream() {
        let mut session = session(Vec::new());
        let ticket = session.begin_load();
        session.apply_load(
            ticket,
            loaded(vec![wh("仓库A", "X", "P1"), wh("仓库B", "Y", "P2")]),
        );
        session.select(Facet::Location, ["仓库A"]);
        session.select(Facet::Brand, ["X"]);
        session.select(Facet::Product, ["P1"]);

        session.clear(Facet::Location);

        assert!(session.selection().is_unfiltered());
        assert_eq!(session.catalog().brands, vec!["X", "Y"]);
    }

    #[test]
    fn test_mode_switch_resets_period_selection_and_dataset() {
        let mut session = session(Vec::new());
        let ticket = session.begin_load();
        session.apply_load(ticket, loaded(vec![wh("仓库A", "X", "P1")]));
        session.select(Facet::Location, ["仓库A"]);
        let in_flight = session.begin_load();

        session.switch_mode_on(WarehouseMode::Longqiao, d(3, 15));

        assert_eq!(session.mode(), WarehouseMode::Longqiao);
        assert_eq!(session.date_range(), DateRange::reporting_default(d(3, 15)));
        assert!(session.records().is_empty());
        assert_eq!(session.records().mode(), WarehouseMode::Longqiao);
        assert!(session.selection().is_unfiltered());
        assert!(!session.is_loading());
        // The warehouse-table load that was still out must not land
        let outcome = session.apply_load(in_flight, loaded(vec![wh("仓库A", "X", "P1")]));
        assert!(matches!(outcome, LoadOutcome::Superseded));
    }

    #[tokio::test]
    async fn test_refresh_loads_and_installs_current_period() {
        let mut session = session(vec![wh("仓库A", "X", "P1"), wh("仓库A", "X", "P2")]);

        let count = session.refresh().await.unwrap();

        assert_eq!(count, 2);
        assert!(!session.is_loading());
        assert_eq!(session.query().record_count, 2);
        assert_eq!(session.catalog().locations, vec!["仓库A"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_surfaces_error_and_keeps_data() {
        let mut session = session(vec![wh("仓库A", "X", "P1")]);
        session.refresh().await.unwrap();

        session.store = RecordStore::new(StaticSource {
            warehouse_rows: Vec::new(),
            fail: true,
        });

        let err = session.refresh().await.unwrap_err();
        assert!(matches!(err, EngineError::Client(_)));
        assert_eq!(session.records().len(), 1);
        assert!(!session.is_loading());
    }
}
