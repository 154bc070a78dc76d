//! wavecut - waveform slice editor
//!
//! Opens a text sample file, lets the user pick a range with two draggable
//! selectors and exports that range to a new file.
//!
//! ## Usage
//!
//! ```text
//! wavecut [SAMPLE_FILE]
//! ```
//!
//! Settings are read from `<config dir>/wavecut/config.yaml`, which is
//! created with the defaults on first run; set
//! `RUST_LOG=debug` for verbose output.

mod app;
mod status;

use std::path::PathBuf;

use iced::Size;
use wavecut_core::config::{default_config_path, load_or_create};

use app::WavecutApp;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("wavecut starting up");

    let initial_file = std::env::args().nth(1).map(PathBuf::from);
    if let Some(path) = &initial_file {
        log::info!("Opening {:?} from command line", path);
    }

    let config = load_or_create(&default_config_path());

    iced::application(
        move || WavecutApp::new(config.clone(), initial_file.clone()),
        WavecutApp::update,
        WavecutApp::view,
    )
    .title(WavecutApp::title)
    .subscription(WavecutApp::subscription)
    .theme(WavecutApp::theme)
    .window_size(Size::new(900.0, 420.0))
    .run()
}
