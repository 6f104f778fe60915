use anyhow::{Context, Result};

use crate::chart::{self, ChartExport, PieChart, ScatterChart};
use crate::color::ColorMap;
use crate::data::aggregate::site_success_counts;
use crate::data::filter::filtered_indices;
use crate::data::loader::{self, DatasetSource};
use crate::data::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, immutable until another file is opened.
    pub dataset: LaunchDataset,

    /// Where `dataset` came from (shown in the top bar).
    pub source: DatasetSource,

    /// Current site dropdown value.
    pub selector: SiteSelector,

    /// Current payload slider values.
    pub payload_range: PayloadRange,

    /// Booster category colours for the whole dataset.
    pub booster_colors: ColorMap,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Current pie chart description.
    pub pie: PieChart,

    /// Current scatter chart description.
    pub scatter: ScatterChart,

    /// Text typed into the site dropdown's search box.
    pub site_search: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LaunchDataset, source: DatasetSource) -> Self {
        let payload_range = dataset.full_payload_range();
        let booster_colors = ColorMap::new(&dataset.booster_categories);
        let pie = chart::pie_chart(&site_success_counts(&dataset.records, &SiteSelector::All));
        let empty_scatter = chart::scatter_chart(&[], &SiteSelector::All, &booster_colors, 0.0);

        let mut state = Self {
            dataset,
            source,
            selector: SiteSelector::All,
            payload_range,
            booster_colors,
            visible_indices: Vec::new(),
            pie,
            scatter: empty_scatter,
            site_search: String::new(),
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Ingest a newly loaded dataset and reset every control.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, source: DatasetSource) {
        *self = Self::new(dataset, source);
    }

    /// Load `source` and switch to it. On failure the current dataset stays
    /// and the error is shown in the status bar.
    pub fn open_source(&mut self, source: DatasetSource) {
        match loader::load_source(&source) {
            Ok(dataset) => self.set_dataset(dataset, source),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Dropdown changed: both charts depend on the site.
    pub fn set_site(&mut self, selector: SiteSelector) {
        if self.selector == selector {
            return;
        }
        log::debug!("site selector → {selector}");
        self.selector = selector;
        self.refresh_pie();
        self.refilter();
    }

    /// Slider moved: only the scatter chart depends on the payload range.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.payload_range == range {
            return;
        }
        log::debug!("payload range → [{}, {}]", range.min_kg, range.max_kg);
        self.payload_range = range;
        self.refilter();
    }

    /// Restore the slider to the full dataset range.
    pub fn reset_payload_range(&mut self) {
        self.set_payload_range(self.dataset.full_payload_range());
    }

    fn refresh_pie(&mut self) {
        let counts = site_success_counts(&self.dataset.records, &self.selector);
        self.pie = chart::pie_chart(&counts);
    }

    /// Recompute `visible_indices` and the scatter chart after a filter change.
    fn refilter(&mut self) {
        self.visible_indices =
            filtered_indices(&self.dataset.records, &self.selector, &self.payload_range);
        let rows: Vec<&LaunchRecord> = self.visible_records().collect();
        let max_payload = self.dataset.payload_bounds.map_or(0.0, |(_, hi)| hi);
        self.scatter = chart::scatter_chart(&rows, &self.selector, &self.booster_colors, max_payload);
    }

    /// Records passing the current filters, in source order.
    pub fn visible_records(&self) -> impl Iterator<Item = &LaunchRecord> {
        self.visible_indices.iter().map(|&i| &self.dataset.records[i])
    }

    /// Dropdown entries matching the search box: "All Sites" first, then
    /// each site in dataset order.
    pub fn site_options(&self) -> Vec<SiteSelector> {
        let needle = self.site_search.trim().to_lowercase();
        std::iter::once(SiteSelector::All)
            .chain(self.dataset.sites.iter().cloned().map(SiteSelector::Site))
            .filter(|opt| needle.is_empty() || opt.to_string().to_lowercase().contains(&needle))
            .collect()
    }

    /// Both chart descriptions as pretty JSON.
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&ChartExport {
            pie: &self.pie,
            scatter: &self.scatter,
        })
        .context("serializing chart descriptions")
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::model::Outcome;

    fn state() -> AppState {
        let dataset = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("VAFB SLC-4E", 500.0, Outcome::Success, "v1.1"),
            LaunchRecord::new("KSC LC-39A", 5300.0, Outcome::Success, "FT"),
            LaunchRecord::new("CCAFS LC-40", 9600.0, Outcome::Success, "B5"),
        ]);
        AppState::new(dataset, DatasetSource::File(PathBuf::from("launches.csv")))
    }

    #[test]
    fn starts_with_everything_visible() {
        let s = state();
        assert_eq!(s.selector, SiteSelector::All);
        assert_eq!(s.payload_range, PayloadRange::new(0.0, 9600.0));
        assert_eq!(s.visible_indices, vec![0, 1, 2, 3]);
        assert_eq!(s.scatter.points.len(), 4);
        assert_eq!(s.pie.total(), 3);
    }

    #[test]
    fn payload_change_leaves_pie_alone() {
        let mut s = state();
        let pie_before = s.pie.clone();
        s.set_payload_range(PayloadRange::new(100.0, 6000.0));
        assert_eq!(s.pie, pie_before);
        assert_eq!(s.visible_indices, vec![1, 2]);
    }

    #[test]
    fn site_change_updates_both_charts() {
        let mut s = state();
        s.set_site(SiteSelector::Site("CCAFS LC-40".into()));
        assert_eq!(s.pie.title, "Total Successful Launches for CCAFS LC-40");
        assert_eq!(s.visible_indices, vec![0, 3]);
        assert!(s.scatter.title.ends_with("CCAFS LC-40"));
    }

    #[test]
    fn crossed_slider_empties_scatter() {
        let mut s = state();
        s.set_payload_range(PayloadRange::new(6000.0, 100.0));
        assert!(s.visible_indices.is_empty());
        assert!(s.scatter.points.is_empty());
        s.reset_payload_range();
        assert_eq!(s.visible_indices.len(), 4);
    }

    #[test]
    fn site_search_filters_options() {
        let mut s = state();
        assert_eq!(s.site_options().len(), 4);
        s.site_search = "ccafs".into();
        assert_eq!(
            s.site_options(),
            vec![SiteSelector::Site("CCAFS LC-40".into())]
        );
    }

    #[test]
    fn new_dataset_resets_controls() {
        let mut s = state();
        s.set_site(SiteSelector::Site("KSC LC-39A".into()));
        let other = LaunchDataset::from_records(vec![LaunchRecord::new(
            "X",
            42.0,
            Outcome::Success,
            "FT",
        )]);
        s.set_dataset(other, DatasetSource::File(PathBuf::from("other.csv")));
        assert_eq!(s.selector, SiteSelector::All);
        assert_eq!(s.payload_range, PayloadRange::new(42.0, 42.0));
        assert_eq!(s.visible_indices, vec![0]);
    }

    #[test]
    fn failed_open_keeps_current_dataset() {
        let mut s = state();
        s.set_site(SiteSelector::Site("CCAFS LC-40".into()));
        let dir = tempfile::tempdir().unwrap();
        s.open_source(DatasetSource::File(dir.path().join("missing.csv")));

        assert_eq!(s.dataset.len(), 4);
        assert_eq!(s.source, DatasetSource::File(PathBuf::from("launches.csv")));
        assert_eq!(s.selector, SiteSelector::Site("CCAFS LC-40".into()));
        let msg = s.status_message.as_deref().unwrap_or_default();
        assert!(msg.starts_with("Error:"), "unexpected status: {msg}");
        assert!(msg.contains("missing.csv"));
    }

    #[test]
    fn successful_open_replaces_dataset_and_clears_status() {
        let mut s = state();
        s.status_message = Some("Error: earlier failure".into());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.csv");
        std::fs::write(
            &path,
            "Launch Site,Payload Mass (kg),class,Booster Version Category\nX,100.6,1,FT\n",
        )
        .unwrap();

        s.open_source(DatasetSource::File(path.clone()));
        assert_eq!(s.source, DatasetSource::File(path));
        assert_eq!(s.dataset.sites, vec!["X"]);
        assert!(s.status_message.is_none());
    }

    #[test]
    fn fractional_minimum_payload_stays_visible() {
        let dataset = LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 100.6, Outcome::Success, "FT"),
            LaunchRecord::new("A", 2500.4, Outcome::Failure, "B5"),
        ]);
        let mut s = AppState::new(dataset, DatasetSource::File(PathBuf::from("f.csv")));
        assert_eq!(s.visible_indices, vec![0, 1]);

        // A handle parked on a rounded label value would drop the edge rows.
        s.set_payload_range(PayloadRange::new(101.0, 2500.0));
        assert!(s.visible_indices.is_empty());
        s.reset_payload_range();
        assert_eq!(s.visible_indices, vec![0, 1]);
    }

    #[test]
    fn export_contains_both_charts() {
        let json = state().export_json().unwrap();
        assert!(json.contains("Total Successful Launches for All Sites"));
        assert!(json.contains("Correlation Between Payload and Success"));
    }
}
