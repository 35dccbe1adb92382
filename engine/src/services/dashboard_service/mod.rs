// engine/src/services/dashboard_service/mod.rs
// The session object the rest of the application talks to. It holds the
// full dataset, the current filtered view, the active filter and the staged
// import, and replaces each of them wholesale on every update.
use std::path::Path;

use shared::CanonicalRow;

use crate::analytics::{top_companies, CompanyTotals, Kpis};
use crate::config::DashboardSettings;
use crate::data::dataset::{Dataset, StagedImport};
use crate::error::EngineResult;
use crate::filter::{FilterOptions, FilterSpec};
use crate::validation::ValidationReport;

pub mod apply_staged;
pub mod export_staged;
pub mod helpers;
pub mod load_default;
pub mod stage_file;

pub use export_staged::ExportOutcome;

pub struct DashboardSession {
    settings: DashboardSettings,
    dataset: Dataset,
    view: Vec<CanonicalRow>,
    filters: FilterSpec,
    staged: Option<StagedImport>,
}

impl DashboardSession {
    pub fn new(settings: DashboardSettings) -> Self {
        DashboardSession {
            settings,
            dataset: Dataset::default(),
            view: Vec::new(),
            filters: FilterSpec::default(),
            staged: None,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn view(&self) -> &[CanonicalRow] {
        &self.view
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn staged(&self) -> Option<&StagedImport> {
        self.staged.as_ref()
    }

    pub fn kpis(&self) -> Kpis {
        Kpis::compute(&self.view)
    }

    /// Ranking over the current view. `n == 0` falls back to the configured default.
    pub fn top_companies(&self, n: usize) -> Vec<CompanyTotals> {
        let n = if n == 0 { self.settings.top_n } else { n };
        top_companies(&self.view, n, &self.settings.empty_company_label)
    }

    /// Options narrow with the view, like cascading dropdowns.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_rows(&self.view)
    }

    pub fn apply_filters(&mut self, spec: FilterSpec) {
        self.view = spec.apply(&self.dataset);
        tracing::info!(
            rows = self.view.len(),
            total = self.dataset.len(),
            "Applied filters to the full dataset"
        );
        self.filters = spec;
    }

    pub fn clear_filters(&mut self) {
        self.apply_filters(FilterSpec::default());
    }

    pub async fn load_default(&mut self) -> EngineResult<usize> {
        tracing::info!(path = %self.settings.default_dataset_path.display(), "Loading default dataset");
        load_default::handle_load_default(self).await
    }

    pub async fn restore_default(&mut self) -> EngineResult<ValidationReport> {
        tracing::info!("Restoring default dataset");
        load_default::handle_restore_default(self).await
    }

    pub async fn stage_file(&mut self, path: &Path) -> EngineResult<ValidationReport> {
        tracing::info!(path = %path.display(), "Staging file for import");
        stage_file::handle_stage_file(self, path).await
    }

    /// In-memory variant of [`stage_file`](Self::stage_file) for callers that
    /// already hold the file contents.
    pub fn stage_bytes(&mut self, file_name: &str, bytes: Vec<u8>) -> EngineResult<ValidationReport> {
        tracing::info!(file_name, bytes = bytes.len(), "Staging in-memory file for import");
        stage_file::handle_stage_bytes(self, file_name, bytes)
    }

    pub fn apply_staged(&mut self) -> EngineResult<ValidationReport> {
        apply_staged::handle_apply_staged(self)
    }

    pub fn export_staged(&self) -> EngineResult<ExportOutcome> {
        export_staged::handle_export_staged(self)
    }

    // Swaps in a new full dataset and resets the view to all of it.
    fn install_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.clear_filters();
    }
}
