//! Page controller: owns a page's view state and recomputes its data.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use log::debug;
use serde::Serialize;

use super::state::{AnalysisTab, ViewState, ViewUpdate};
use crate::api::FilterOptions;
use crate::export::{ExportError, Exporter};
use crate::models::Metric;
use crate::services::options::filter_options;
use crate::services::{Aggregate, AggregationInput, AnalyticsContext};
use crate::source::SourceSnapshot;
use crate::transformations::{
    apply_filters, filter_by_location, DateRange, FilterCriteria, Selection, TimeSlot, Timeframe,
};

/// Source of "now" for relative timeframes.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// The local wall clock.
pub fn system_clock() -> Clock {
    Arc::new(|| chrono::Local::now().naive_local())
}

/// A clock frozen at `at`.
pub fn fixed_clock(at: NaiveDateTime) -> Clock {
    Arc::new(move || at)
}

/// Holds one page's record collection and view state.
///
/// Every state change recomputes the filtered records and metrics from the
/// complete collection, and bumps [`revision`](Self::revision) exactly once.
pub struct PageController<R> {
    snapshot: SourceSnapshot<R>,
    state: ViewState,
    context: AnalyticsContext,
    clock: Clock,
    filtered: Vec<R>,
    metrics: Vec<Metric>,
    revision: u64,
}

impl<R: Aggregate> PageController<R> {
    /// A controller waiting for its first load.
    pub fn new(context: AnalyticsContext) -> Self {
        Self::with_clock(context, system_clock())
    }

    pub fn with_clock(context: AnalyticsContext, clock: Clock) -> Self {
        let mut controller = Self {
            snapshot: SourceSnapshot::loading(),
            state: ViewState::default(),
            context,
            clock,
            filtered: Vec::new(),
            metrics: Vec::new(),
            revision: 0,
        };
        controller.recompute();
        controller
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.is_loading()
    }

    /// Replace the record collection, e.g. when a load completes.
    pub fn set_snapshot(&mut self, snapshot: SourceSnapshot<R>) {
        self.snapshot = snapshot;
        self.recompute();
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.state.criteria
    }

    /// The complete, unfiltered collection.
    pub fn records(&self) -> &[R] {
        self.snapshot.records()
    }

    pub fn filtered(&self) -> &[R] {
        &self.filtered
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Option lists for the filter selectors, from the location-filtered records.
    pub fn options(&self) -> FilterOptions {
        filter_options(&filter_by_location(
            self.records(),
            &self.state.criteria.location,
            &self.context.catalog,
        ))
    }

    /// Replace the whole view state in one transition.
    pub fn set_state(&mut self, state: ViewState) {
        self.state = state;
        self.recompute();
    }

    pub fn apply(&mut self, update: ViewUpdate) {
        self.state.apply(update);
        self.recompute();
    }

    pub fn set_location(&mut self, location: Selection<String>) {
        self.apply(ViewUpdate::Location(location));
    }

    pub fn set_analysis_tab(&mut self, tab: AnalysisTab) {
        self.apply(ViewUpdate::AnalysisTab(tab));
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.apply(ViewUpdate::Timeframe(timeframe));
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.apply(ViewUpdate::DateRange(range));
    }

    pub fn set_trainer(&mut self, trainer: Selection<String>) {
        self.apply(ViewUpdate::Trainer(trainer));
    }

    pub fn set_class(&mut self, class_name: Selection<String>) {
        self.apply(ViewUpdate::Class(class_name));
    }

    pub fn set_product(&mut self, product: Selection<String>) {
        self.apply(ViewUpdate::Product(product));
    }

    pub fn set_time_slot(&mut self, slot: Selection<TimeSlot>) {
        self.apply(ViewUpdate::TimeSlot(slot));
    }

    /// Reset every filter selector at once; tabs are kept.
    pub fn clear_filters(&mut self) {
        self.apply(ViewUpdate::ClearFilters);
    }

    /// Export the filtered records, never the raw collection.
    pub fn export<E: Exporter>(&self, exporter: &E, file_name: &str) -> Result<PathBuf, ExportError>
    where
        R: Serialize,
    {
        exporter.export(&self.filtered, file_name)
    }

    fn recompute(&mut self) {
        let now = (self.clock)();
        let all = self.snapshot.records();
        let filtered = apply_filters(all, &self.state.criteria, &self.context.catalog, now);
        let metrics = R::metrics(&AggregationInput {
            all,
            filtered: &filtered,
            criteria: &self.state.criteria,
            context: &self.context,
            now,
        });

        self.filtered = filtered;
        self.metrics = metrics;
        self.revision += 1;
        debug!(
            "Recomputed page (revision {}): {} of {} records, {} metrics",
            self.revision,
            self.filtered.len(),
            all.len(),
            self.metrics.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{find_metric, ClientRecord, LateCancellation, MetricKey};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn cancellation(location: &str, trainer: &str, date: &str) -> LateCancellation {
        LateCancellation {
            location: Some(location.to_string()),
            teacher_name: Some(trainer.to_string()),
            date_ist: Some(date.to_string()),
            ..Default::default()
        }
    }

    fn controller() -> PageController<LateCancellation> {
        let mut page = PageController::with_clock(AnalyticsContext::default(), fixed_clock(now()));
        page.set_snapshot(SourceSnapshot::ready(vec![
            cancellation("Kwality House", "Anisha", "2024-06-10"),
            cancellation("Supreme HQ", "Rohan", "2024-06-12"),
            cancellation("Kemps Corner", "Rohan", "2023-11-02"),
        ]));
        page
    }

    #[test]
    fn test_not_loaded_is_empty_not_error() {
        let page: PageController<ClientRecord> =
            PageController::with_clock(AnalyticsContext::default(), fixed_clock(now()));
        assert!(page.is_loading());
        assert!(page.filtered().is_empty());
        assert!(page.metrics().iter().all(|m| m.value == 0.0));
    }

    #[test]
    fn test_every_setter_recomputes_from_full_collection() {
        let mut page = controller();
        let start = page.revision();

        page.set_trainer(Selection::only("Rohan"));
        assert_eq!(page.filtered().len(), 2);
        page.set_location(Selection::only("kwality"));
        assert_eq!(page.filtered().len(), 1);

        // Widening again works because nothing is computed incrementally.
        page.set_trainer(Selection::All);
        assert_eq!(page.filtered().len(), 2);
        assert_eq!(page.revision(), start + 3);

        let total = find_metric(page.metrics(), MetricKey::TotalCancellations).unwrap();
        assert_eq!(total.value, 2.0);
    }

    #[test]
    fn test_clear_filters_is_one_transition_and_keeps_tabs() {
        let mut page = controller();
        page.set_location(Selection::only("supreme"));
        page.set_analysis_tab(AnalysisTab::YearOnYear);
        page.set_trainer(Selection::only("Rohan"));
        page.set_timeframe(Timeframe::OneMonth);
        assert_eq!(page.filtered().len(), 1);

        let before = page.revision();
        page.clear_filters();
        assert_eq!(page.revision(), before + 1);
        assert_eq!(page.state().analysis_tab, AnalysisTab::YearOnYear);
        assert_eq!(page.state().location(), &Selection::only("supreme"));
        assert!(page.criteria().trainer.is_all());
        assert_eq!(page.criteria().timeframe, Timeframe::All);
    }

    #[test]
    fn test_options_follow_location_tab() {
        let mut page = controller();
        assert_eq!(page.options().trainers, vec!["Anisha", "Rohan"]);
        page.set_location(Selection::only("supreme"));
        assert_eq!(page.options().trainers, vec!["Rohan"]);
    }

    #[test]
    fn test_export_writes_filtered_records_only() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = crate::export::JsonExporter::new(dir.path());
        let mut page = controller();
        page.set_timeframe(Timeframe::OneMonth);

        let path = page.export(&exporter, "late-cancellations").unwrap();
        let written: Vec<LateCancellation> =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written, page.filtered());
    }
}
