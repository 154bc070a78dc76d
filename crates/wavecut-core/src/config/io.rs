//! YAML load/save for any serde configuration type

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load configuration from a YAML file
///
/// A missing file yields `T::default()`. An unreadable or unparsable file
/// is logged and also yields the default, so a broken config never blocks
/// startup.
///
/// ```ignore
/// let config: EditorConfig = load_config(&default_config_path());
/// ```
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: No config at {:?}, using defaults", path);
        return T::default();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("load_config: Failed to read {:?}: {}, using defaults", path, e);
            return T::default();
        }
    };

    match serde_yaml::from_str::<T>(&contents) {
        Ok(config) => {
            log::info!("load_config: Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("load_config: Failed to parse {:?}: {}, using defaults", path, e);
            T::default()
        }
    }
}

/// Write `config` as YAML to `path`
///
/// The YAML goes to a sibling `.tmp` file first and is renamed over `path`,
/// so an interrupted write leaves the previous file intact.
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Cannot serialize config")?;
    let staging = path.with_extension("yaml.tmp");
    std::fs::write(&staging, yaml).with_context(|| format!("Cannot write {:?}", staging))?;
    std::fs::rename(&staging, path)
        .with_context(|| format!("Cannot move {:?} to {:?}", staging, path))?;

    log::info!("save_config: Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Window {
        width: u32,
        title: String,
    }

    impl Default for Window {
        fn default() -> Self {
            Self {
                width: 800,
                title: "wavecut".to_string(),
            }
        }
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config: Window = load_config(Path::new("/nonexistent/wavecut/config.yaml"));
        assert_eq!(config, Window::default());
    }

    #[test]
    fn test_save_then_load_in_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("config.yaml");
        let config = Window {
            width: 1024,
            title: "cut".to_string(),
        };

        save_config(&config, &path).unwrap();
        let loaded: Window = load_config(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_replaces_existing_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "width: 1\n").unwrap();

        save_config(&Window::default(), &path).unwrap();

        let loaded: Window = load_config(&path);
        assert_eq!(loaded, Window::default());
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("config.yaml")]);
    }

    #[test]
    fn test_garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "width: [not, a, number").unwrap();
        let config: Window = load_config(&path);
        assert_eq!(config, Window::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "width: 640\n").unwrap();
        let config: Window = load_config(&path);
        assert_eq!(config.width, 640);
        assert_eq!(config.title, "wavecut");
    }
}
