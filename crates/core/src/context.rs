use crate::models::dataset::DatasetBundle;
use crate::models::settings::DashboardSettings;

/// Everything a view needs to render: the datasets, loaded once at
/// startup, and the settings. Immutable and shared by reference.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    datasets: DatasetBundle,
    settings: DashboardSettings,
}

impl DashboardContext {
    pub fn new(datasets: DatasetBundle, settings: DashboardSettings) -> Self {
        Self { datasets, settings }
    }

    pub fn datasets(&self) -> &DatasetBundle {
        &self.datasets
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }
}
