//! Configuration for the wavecut editor
//!
//! - Generic YAML config loading/saving
//! - `EditorConfig`: selector sizes, colors, export directory
//!
//! # Usage
//!
//! ```ignore
//! use wavecut_core::config::{default_config_path, load_or_create};
//!
//! let config = load_or_create(&default_config_path());
//! let model = config.build_model();
//! ```

mod editor;
mod io;

pub use editor::{default_config_path, load_or_create, EditorConfig, SelectorConfig, StyleConfig};
pub use io::{load_config, save_config};
