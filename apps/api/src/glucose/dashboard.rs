use serde::{Deserialize, Serialize};

use crate::glucose::sample::SAMPLE_FILENAME;

/// Presentation settings for a glucose dashboard. Purely cosmetic: nothing
/// here changes how uploads are parsed or ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub title: String,
    pub caption: String,
    pub upload_label: String,
    pub sample_download_label: String,
    pub sample_filename: String,
    pub background_image_url: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Smarties-Diabetic Companion".to_string(),
            caption: "Week-long sample data included".to_string(),
            upload_label: "Upload Glucose CSV".to_string(),
            sample_download_label: "Download 1-Week Sample CSV".to_string(),
            sample_filename: SAMPLE_FILENAME.to_string(),
            background_image_url: None,
        }
    }
}
