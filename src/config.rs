use crate::data::loader::DatasetSource;

/// Published SpaceX launch table used when nothing else is opened.
pub const DEFAULT_DATASET_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBM-DS0321EN-SkillsNetwork/datasets/spacex_launch_dash.csv";

/// Static settings for the dashboard window.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub dataset_source: DatasetSource,
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_source: DatasetSource::parse(DEFAULT_DATASET_URL),
            title: "SpaceX Launch Records Dashboard".to_string(),
            window_size: [1200.0, 900.0],
            min_window_size: [700.0, 500.0],
        }
    }
}
