use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{ColorRole, Result, SortAlgorithm, SortVizError};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub collection: CollectionConfig,
}

impl AppConfig {
    /// Loads a configuration file. Fields missing from the file keep their
    /// default values.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(SortVizError::invalid_config(
                "window dimensions must be non-zero",
            ));
        }
        self.collection.validate()
    }
}

/// Size of the surface the sticks are laid out on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Parameters that stay fixed for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub number_of_elements: usize,
    /// Share of the viewport width reserved for gaps between sticks.
    pub space_percentage: f32,
    pub max_element_height: f32,
    /// Baseline the bottom edge of every stick rests on.
    pub element_y_position: f32,
    pub palette: Palette,
    pub delays: DelayConfig,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            number_of_elements: 150,
            space_percentage: 0.1,
            max_element_height: 820.0,
            element_y_position: 1020.0,
            palette: Palette::default(),
            delays: DelayConfig::default(),
        }
    }
}

impl CollectionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.number_of_elements < 2 {
            return Err(SortVizError::invalid_config(format!(
                "at least two elements are required, got {}",
                self.number_of_elements
            )));
        }
        if !self.space_percentage.is_finite() || !(0.0..1.0).contains(&self.space_percentage) {
            return Err(SortVizError::invalid_config(format!(
                "space_percentage must lie in [0, 1), got {}",
                self.space_percentage
            )));
        }
        if !self.max_element_height.is_finite() || self.max_element_height <= 0.0 {
            return Err(SortVizError::invalid_config(
                "max_element_height must be positive",
            ));
        }
        Ok(())
    }
}

/// Plain RGBA colour value understood by every canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Colour used for each [`ColorRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub idle: Rgba,
    pub processing: Rgba,
    pub selected: Rgba,
    pub temporary: Rgba,
    pub placed: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            idle: Rgba::rgb(255, 255, 255),
            processing: Rgba::rgb(220, 40, 40),
            selected: Rgba::rgb(60, 110, 230),
            temporary: Rgba::rgb(240, 200, 40),
            placed: Rgba::rgb(40, 200, 90),
        }
    }
}

impl Palette {
    pub fn color(&self, role: ColorRole) -> Rgba {
        match role {
            ColorRole::Idle => self.idle,
            ColorRole::Processing => self.processing,
            ColorRole::Selected => self.selected,
            ColorRole::TemporaryHighlight => self.temporary,
            ColorRole::Placed => self.placed,
        }
    }
}

/// Per-algorithm pause after every visually significant step, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub bubble_ms: u64,
    pub insertion_ms: u64,
    pub selection_ms: u64,
    pub merge_ms: u64,
    /// Pause between bars during the completion sweep.
    pub initial_color_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            bubble_ms: 1,
            insertion_ms: 5,
            selection_ms: 5,
            merge_ms: 10,
            initial_color_ms: 2,
        }
    }
}

impl DelayConfig {
    /// All delays set to zero, useful for headless runs.
    pub fn instant() -> Self {
        Self {
            bubble_ms: 0,
            insertion_ms: 0,
            selection_ms: 0,
            merge_ms: 0,
            initial_color_ms: 0,
        }
    }

    pub fn step_for(&self, algorithm: SortAlgorithm) -> Duration {
        let millis = match algorithm {
            SortAlgorithm::Bubble => self.bubble_ms,
            SortAlgorithm::Insertion => self.insertion_ms,
            SortAlgorithm::Selection => self.selection_ms,
            SortAlgorithm::InPlaceMerge | SortAlgorithm::Merge => self.merge_ms,
        };
        Duration::from_millis(millis)
    }

    pub fn completion_sweep(&self) -> Duration {
        Duration::from_millis(self.initial_color_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_element_counts() {
        for count in [0, 1] {
            let config = CollectionConfig {
                number_of_elements: count,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, SortVizError::InvalidConfig(_)));
        }
    }

    #[test]
    fn rejects_out_of_range_spacing() {
        for spacing in [-0.1, 1.0, f32::NAN] {
            let config = CollectionConfig {
                space_percentage: spacing,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn merge_variants_share_a_delay() {
        let delays = DelayConfig::default();
        assert_eq!(
            delays.step_for(SortAlgorithm::InPlaceMerge),
            delays.step_for(SortAlgorithm::Merge)
        );
        assert_eq!(
            delays.step_for(SortAlgorithm::Bubble),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "collection": { "number_of_elements": 12 } }"#).unwrap();
        assert_eq!(config.collection.number_of_elements, 12);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.collection.delays, DelayConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "sorting-sticks-config-{}.json",
            std::process::id()
        ));
        let mut config = AppConfig::default();
        config.collection.number_of_elements = 32;
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        let loaded = AppConfig::from_path(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.collection.number_of_elements, 32);
    }
}
