//! Editor configuration: selector sizes, colors and export location

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::io::{load_config, save_config};
use crate::export::default_export_dir;
use crate::geometry::Rgba;
use crate::render::{EditorStyle, SELECTOR_IDLE_ALPHA};
use crate::selection::{SelectionModel, SelectorMetrics};

/// Selector sizes in density-independent pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Width of the selector bar
    /// Default: 2.0
    pub width_dp: f32,

    /// Side of the grip square
    /// Default: 8.0
    pub grip_dp: f32,

    /// Extra hit area on each side of a selector
    /// Default: 16.0
    pub touch_area_dp: f32,

    /// Minimum gap between the selectors
    /// Default: 50.0
    pub min_selection_width_dp: f32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            width_dp: 2.0,
            grip_dp: 8.0,
            touch_area_dp: 16.0,
            min_selection_width_dp: 50.0,
        }
    }
}

/// Editor colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub background: Rgba,
    pub wave: Rgba,
    pub unselected_wave: Rgba,
    pub selector: Rgba,
    /// Alpha of a selector that is not being dragged (0-255)
    pub selector_alpha: u8,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let style = EditorStyle::default();
        Self {
            background: style.background,
            wave: style.wave,
            unselected_wave: style.unselected_wave,
            selector: style.selector,
            selector_alpha: SELECTOR_IDLE_ALPHA,
        }
    }
}

/// Top-level editor configuration
///
/// Stored as YAML at `default_config_path()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Pixels per density-independent pixel
    /// Default: 1.0
    pub density: f32,
    pub selector: SelectorConfig,
    pub style: StyleConfig,
    /// Where exports are written; `None` means the downloads folder
    pub export_dir: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            selector: SelectorConfig::default(),
            style: StyleConfig::default(),
            export_dir: None,
        }
    }
}

impl EditorConfig {
    /// Selector sizes in pixels
    ///
    /// Touch area and minimum selection width are truncated to whole pixels.
    /// A non-positive or non-finite density falls back to 1.
    pub fn metrics(&self) -> SelectorMetrics {
        let density = if self.density.is_finite() && self.density > 0.0 {
            self.density
        } else {
            log::warn!("metrics: Invalid density {}, using 1.0", self.density);
            1.0
        };
        let s = &self.selector;
        SelectorMetrics {
            width: s.width_dp * density,
            grip: s.grip_dp * density,
            touch_area: (s.touch_area_dp * density).trunc(),
            min_selection_width: (s.min_selection_width_dp * density).trunc(),
        }
    }

    pub fn style(&self) -> EditorStyle {
        EditorStyle {
            background: self.style.background,
            wave: self.style.wave,
            unselected_wave: self.style.unselected_wave,
            selector: self.style.selector,
            selector_idle_alpha: self.style.selector_alpha,
        }
    }

    /// Configured export directory, or the platform default
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(default_export_dir)
    }

    /// Empty selection model using these metrics and colors
    pub fn build_model(&self) -> SelectionModel {
        SelectionModel::new(self.metrics(), self.style())
    }
}

/// Load the editor config, writing the defaults on first run
///
/// An existing file is only read, never rewritten, so hand edits and
/// unknown keys survive. Failing to write the defaults is logged and the
/// defaults are still returned.
pub fn load_or_create(path: &Path) -> EditorConfig {
    if path.exists() {
        return load_config(path);
    }

    let config = EditorConfig::default();
    if let Err(e) = save_config(&config, path) {
        log::warn!("load_or_create: Could not write defaults to {:?}: {:#}", path, e);
    }
    config
}

/// `<config dir>/wavecut/config.yaml`, falling back to the home directory
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wavecut")
        .join("config.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics_match_selection_defaults() {
        assert_eq!(EditorConfig::default().metrics(), SelectorMetrics::default());
        assert_eq!(EditorConfig::default().style(), EditorStyle::default());
    }

    #[test]
    fn test_metrics_scale_with_density() {
        let config = EditorConfig {
            density: 2.75,
            ..EditorConfig::default()
        };
        let m = config.metrics();
        assert_eq!(m.width, 5.5);
        assert_eq!(m.grip, 22.0);
        assert_eq!(m.touch_area, 44.0);
        // 137.5 truncated
        assert_eq!(m.min_selection_width, 137.0);
    }

    #[test]
    fn test_bad_density_falls_back() {
        let config = EditorConfig {
            density: 0.0,
            ..EditorConfig::default()
        };
        assert_eq!(config.metrics(), SelectorMetrics::default());
    }

    #[test]
    fn test_export_dir_override() {
        let config = EditorConfig {
            export_dir: Some(PathBuf::from("/tmp/cuts")),
            ..EditorConfig::default()
        };
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/cuts"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "density: 2.0\nstyle:\n  selector_alpha: 90\n",
        )
        .unwrap();

        let config: EditorConfig = load_config(&path);
        assert_eq!(config.density, 2.0);
        assert_eq!(config.style.selector_alpha, 90);
        assert_eq!(config.style.wave, StyleConfig::default().wave);
        assert_eq!(config.selector, SelectorConfig::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let config = EditorConfig {
            density: 1.5,
            export_dir: Some(dir.path().join("out")),
            ..EditorConfig::default()
        };
        save_config(&config, &path).unwrap();
        assert_eq!(load_config::<EditorConfig>(&path), config);
    }

    #[test]
    fn test_load_or_create_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wavecut").join("config.yaml");

        assert_eq!(load_or_create(&path), EditorConfig::default());
        assert!(path.exists());
        assert_eq!(load_config::<EditorConfig>(&path), EditorConfig::default());

        std::fs::write(&path, "density: 3.0\n").unwrap();
        assert_eq!(load_or_create(&path).density, 3.0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "density: 3.0\n");
    }

    #[test]
    fn test_load_or_create_unwritable_location_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let config = load_or_create(&blocker.join("config.yaml"));
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_default_config_path() {
        assert!(default_config_path().ends_with("wavecut/config.yaml"));
    }
}
