//! Export and pagination configuration

use crate::domain::rendering::PageGeometry;
use serde::Deserialize;

use super::error::ValidationError;

/// Page geometry configuration for paginated views and PDF export
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Characters per line on a laid-out page
    #[serde(default = "default_page_width")]
    pub page_width_chars: usize,

    /// Lines per page
    #[serde(default = "default_page_height")]
    pub page_height_lines: usize,
}

impl ExportConfig {
    /// Build the validated page geometry
    pub fn geometry(&self) -> Result<PageGeometry, ValidationError> {
        PageGeometry::new(self.page_width_chars, self.page_height_lines)
            .map_err(|_| ValidationError::InvalidPageGeometry)
    }

    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.geometry().map(|_| ())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_width_chars: default_page_width(),
            page_height_lines: default_page_height(),
        }
    }
}

fn default_page_width() -> usize {
    180
}

fn default_page_height() -> usize {
    37
}
