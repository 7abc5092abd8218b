use std::path::{Path, PathBuf};

use crate::color::CityPalette;
use crate::data::filter::{self, FilterDefaults, FilterResult, FilterSelection};
use crate::data::model::{ListingTable, CITY};
use crate::data::{export, loader};
use crate::diagnostics::{Diagnostics, Severity};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Path of the loaded (or last attempted) listings file.
    pub source: PathBuf,

    /// Loaded listings. Empty when loading failed.
    pub table: ListingTable,

    /// Range bounds used whenever a table is installed.
    pub defaults: FilterDefaults,

    /// Widget-bound filter values, edited directly by the side panel.
    pub selection: FilterSelection,

    /// Selection the current `result` was computed from.
    applied: Option<FilterSelection>,

    /// Rows passing `applied`.
    pub result: FilterResult,

    /// Colour per city of `table`.
    pub palette: CityPalette,

    /// Messages from loading, exporting and stopping.
    pub load_diagnostics: Diagnostics,

    /// Messages from the last filter pass.
    pub filter_diagnostics: Diagnostics,

    /// Set once the user asked the application to stop.
    pub shutdown_requested: bool,
}

impl AppState {
    /// Load `source` and run the first filter pass.
    pub fn open(source: PathBuf, defaults: FilterDefaults) -> Self {
        let mut state = Self {
            source: PathBuf::new(),
            table: ListingTable::empty(),
            defaults,
            selection: FilterSelection::for_table(&ListingTable::empty(), &defaults),
            applied: None,
            result: FilterResult::default(),
            palette: CityPalette::default(),
            load_diagnostics: Diagnostics::new(),
            filter_diagnostics: Diagnostics::new(),
            shutdown_requested: false,
        };
        state.load(&source);
        state
    }

    /// Replace the table with the contents of `path` and reset the filters.
    pub fn load(&mut self, path: &Path) {
        self.load_diagnostics.clear();
        let table = loader::load_with_diagnostics(path, &mut self.load_diagnostics);
        self.source = path.to_path_buf();
        self.set_table(table);
    }

    /// Read the current source file again.
    pub fn reload(&mut self) {
        let source = self.source.clone();
        self.load(&source);
    }

    /// Ingest a table: all cities selected, default ranges, fresh result.
    pub fn set_table(&mut self, table: ListingTable) {
        self.selection = FilterSelection::for_table(&table, &self.defaults);
        self.palette = CityPalette::new(&self.selection.cities);
        self.table = table;
        self.applied = None;
        self.sync_selection();
    }

    /// Rerun the filter engine if the selection changed since the last pass.
    ///
    /// Called once per frame; returns whether a new pass ran.
    pub fn sync_selection(&mut self) -> bool {
        if self.applied.as_ref() == Some(&self.selection) {
            return false;
        }
        self.refilter();
        true
    }

    /// Recompute `result` from scratch for the current selection.
    pub fn refilter(&mut self) {
        self.filter_diagnostics.clear();
        self.result = filter::run(&self.table, &self.selection, &mut self.filter_diagnostics);
        self.applied = Some(self.selection.clone());
    }

    /// Whether the last pass got past the required-column check.
    pub fn filter_ran(&self) -> bool {
        self.applied.is_some() && !self.filter_diagnostics.has(Severity::Error)
    }

    /// Distinct cities of the loaded table, sorted.
    pub fn all_cities(&self) -> Vec<String> {
        self.table.distinct_values(CITY).into_iter().collect()
    }

    pub fn toggle_city(&mut self, city: &str) {
        if !self.selection.cities.remove(city) {
            self.selection.cities.insert(city.to_string());
        }
    }

    pub fn select_all_cities(&mut self) {
        self.selection.cities = self.table.distinct_values(CITY);
    }

    pub fn select_no_cities(&mut self) {
        self.selection.cities.clear();
    }

    /// Write the currently visible listings to `path`.
    pub fn export_filtered(&mut self, path: &Path) {
        match export::export_csv(&self.table, &self.result.indices, path) {
            Ok(n) => self
                .load_diagnostics
                .info(format!("Exported {n} listings to '{}'.", path.display())),
            Err(e) => self.load_diagnostics.error(format!("Export failed: {e}")),
        }
    }

    /// Ask the host to close; the frame loop acts on the flag.
    pub fn request_shutdown(&mut self) {
        self.load_diagnostics.warn("Stopping the dashboard...");
        self.shutdown_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    const CSV: &str = "\
Price,Square Footage,Street,City,Province,Link,Description,Image1,Image2,Image3,Image4
\"$600,000\",1200,12 Elm St,Austin,TX,https://x/1,Nice,https://img/1.jpg,,,
\"$700,000\",1500,9 Oak Ave,Dallas,TX,https://x/2,Big,,,,
\"$550,000\",900,3 Pine Rd,Dallas,TX,https://x/3,Cozy,,,,
";

    fn fixture() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listings.csv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(CSV.as_bytes())
            .unwrap();
        (dir, path)
    }

    #[test]
    fn open_selects_all_cities_and_filters() {
        let (_dir, path) = fixture();
        let state = AppState::open(path, FilterDefaults::default());

        assert_eq!(state.table.len(), 3);
        assert_eq!(state.all_cities(), vec!["Austin", "Dallas"]);
        assert_eq!(state.selection.cities.len(), 2);
        assert_eq!(state.result.indices, vec![0, 2]);
        assert!(state.load_diagnostics.has(Severity::Info));
        assert!(state.filter_diagnostics.is_empty());
        assert!(state.filter_ran());
    }

    #[test]
    fn selection_change_triggers_exactly_one_pass() {
        let (_dir, path) = fixture();
        let mut state = AppState::open(path, FilterDefaults::default());
        assert!(!state.sync_selection());

        state.toggle_city("Dallas");
        assert!(state.sync_selection());
        assert_eq!(state.result.indices, vec![0]);
        assert!(!state.sync_selection());

        state.select_no_cities();
        state.sync_selection();
        assert!(state.result.is_empty());

        state.select_all_cities();
        state.selection.max_price = 800_000.0;
        state.sync_selection();
        assert_eq!(state.result.indices, vec![0, 1, 2]);
    }

    #[test]
    fn missing_file_leaves_an_empty_dashboard() {
        let dir = TempDir::new().unwrap();
        let state = AppState::open(dir.path().join("listings.csv"), FilterDefaults::default());

        assert!(state.table.is_empty());
        assert!(state.result.is_empty());
        assert!(state.load_diagnostics.last_error().is_some());
        // the filter pass on the empty table reports the missing columns
        assert!(state.filter_diagnostics.last_error().is_some());
        assert!(!state.filter_ran());
    }

    #[test]
    fn reload_picks_up_file_changes() {
        let (_dir, path) = fixture();
        let mut state = AppState::open(path.clone(), FilterDefaults::default());
        state.select_no_cities();
        state.sync_selection();

        std::fs::write(&path, "City,Price,Square Footage\nMission,\"$600,000\",1000\n").unwrap();
        state.reload();

        assert_eq!(state.all_cities(), vec!["Mission"]);
        assert_eq!(state.result.indices, vec![0]);
    }

    #[test]
    fn export_writes_visible_rows() {
        let (dir, path) = fixture();
        let mut state = AppState::open(path, FilterDefaults::default());
        let out = dir.path().join("filtered.csv");

        state.export_filtered(&out);

        let exported = loader::load_file(&out).unwrap();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported.columns, state.table.columns);
        assert!(state
            .load_diagnostics
            .entries()
            .iter()
            .any(|d| d.message.starts_with("Exported 2 listings")));
    }

    #[test]
    fn shutdown_is_a_request_not_an_exit() {
        let (_dir, path) = fixture();
        let mut state = AppState::open(path, FilterDefaults::default());
        state.request_shutdown();
        assert!(state.shutdown_requested);
        assert!(state.load_diagnostics.has(Severity::Warning));
    }
}
