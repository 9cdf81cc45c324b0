//! Editor configuration.

use crate::snap::GRID_SIZE;
use crate::viewport::{MAX_SCALE, MIN_SCALE};
use serde::{Deserialize, Serialize};

/// Tunables for an editing session.
///
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid unit for drag snapping, in canvas units.
    pub grid_size: f64,
    /// Zoom bounds. These can only narrow the built-in 0.5 to 3.0 range.
    pub min_scale: f64,
    pub max_scale: f64,
    /// Margin kept around tables by fit-to-content, in canvas units.
    pub fit_padding: f64,
    /// Factor applied by the zoom in/out buttons.
    pub zoom_step: f64,
    /// Factor applied per ctrl+wheel notch.
    pub wheel_zoom_step: f64,
    /// Whether the session starts in edit mode.
    pub edit_mode: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            fit_padding: 40.0,
            zoom_step: 1.2,
            wheel_zoom_step: 1.1,
            edit_mode: true,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!((config.grid_size - 20.0).abs() < f64::EPSILON);
        assert!((config.min_scale - 0.5).abs() < f64::EPSILON);
        assert!((config.max_scale - 3.0).abs() < f64::EPSILON);
        assert!(config.edit_mode);
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{"grid_size": 10.0, "edit_mode": false}"#).unwrap();
        assert!((config.grid_size - 10.0).abs() < f64::EPSILON);
        assert!(!config.edit_mode);
        assert!((config.zoom_step - 1.2).abs() < f64::EPSILON);
    }
}
