//! Application state, update and view

use std::path::PathBuf;

use iced::widget::{button, column, container, row, text, Space};
use iced::{Color, Element, Length, Subscription, Task, Theme};
use wavecut_core::config::EditorConfig;
use wavecut_core::export::ensure_exportable;
use wavecut_core::{FileWorker, SelectionModel, WorkerResult};
use wavecut_widgets::{waveform_editor, EditorEvent};

use crate::status;

#[derive(Debug, Clone)]
pub enum Message {
    Editor(EditorEvent),
    OpenClicked,
    FilePicked(Option<PathBuf>),
    SaveClicked,
    /// Poll the file worker
    Tick,
}

pub struct WavecutApp {
    config: EditorConfig,
    model: SelectionModel,
    worker: Option<FileWorker>,
    /// File currently shown in the editor
    current_file: Option<PathBuf>,
    status: Option<String>,
    load_pending: bool,
    saves_pending: usize,
}

impl WavecutApp {
    /// Boot the app, optionally loading `initial_file` right away
    pub fn new(config: EditorConfig, initial_file: Option<PathBuf>) -> (Self, Task<Message>) {
        let worker = match FileWorker::spawn() {
            Ok(worker) => Some(worker),
            Err(e) => {
                log::error!("Failed to spawn file worker: {}", e);
                None
            }
        };

        let app = Self {
            model: config.build_model(),
            config,
            worker,
            current_file: None,
            status: None,
            load_pending: false,
            saves_pending: 0,
        };

        let task = match initial_file {
            Some(path) => Task::done(Message::FilePicked(Some(path))),
            None => Task::none(),
        };
        (app, task)
    }

    pub fn title(&self) -> String {
        match &self.current_file {
            Some(path) => format!("wavecut - {}", path.display()),
            None => String::from("wavecut"),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        use iced::time;
        use std::time::Duration;

        // Only poll while the worker has something in flight
        if self.load_pending || self.saves_pending > 0 {
            time::every(Duration::from_millis(33)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Editor(event) => {
                if let Some(range) = event.apply(&mut self.model) {
                    log::debug!("Committed selection of {} samples", range.len());
                }
            }
            Message::OpenClicked => {
                return Task::perform(pick_sample_file(), Message::FilePicked);
            }
            Message::FilePicked(None) => {
                self.status = Some(status::OPEN_FAILED.to_string());
            }
            Message::FilePicked(Some(path)) => self.request_load(path),
            Message::SaveClicked => self.request_save(),
            Message::Tick => self.poll_worker(),
        }
        Task::none()
    }

    fn request_load(&mut self, path: PathBuf) {
        let Some(worker) = &self.worker else {
            self.status = Some(status::WORKER_UNAVAILABLE.to_string());
            return;
        };
        match worker.load(path) {
            Ok(generation) => {
                log::info!("Requested load (generation {})", generation);
                self.load_pending = true;
                self.status = None;
            }
            Err(e) => {
                log::error!("Failed to request load: {}", e);
                self.status = Some(status::OPEN_FAILED.to_string());
            }
        }
    }

    fn request_save(&mut self) {
        let samples = match ensure_exportable(self.model.selected_range()) {
            Ok(samples) => samples.to_vec(),
            Err(e) => {
                log::info!("Save rejected: {}", e);
                self.status = Some(status::NO_SELECTION.to_string());
                return;
            }
        };
        let Some(worker) = &self.worker else {
            self.status = Some(status::WORKER_UNAVAILABLE.to_string());
            return;
        };
        match worker.save(samples, self.config.export_dir()) {
            Ok(()) => self.saves_pending += 1,
            Err(e) => {
                log::error!("Failed to request save: {}", e);
                self.status = Some("Error!".to_string());
            }
        }
    }

    fn poll_worker(&mut self) {
        let Some(worker) = &self.worker else {
            return;
        };
        while let Some(result) = worker.try_recv() {
            match result {
                WorkerResult::Loaded { path, outcome, .. } => {
                    self.load_pending = false;
                    self.status = status::import_message(&outcome);
                    if let Some(samples) = outcome.samples() {
                        match self.model.load_series(samples.to_vec()) {
                            Ok(()) => self.current_file = Some(path),
                            Err(e) => {
                                log::error!("Rejected samples from {:?}: {}", path, e);
                                self.status = Some("File is invalid!".to_string());
                            }
                        }
                    }
                }
                WorkerResult::Saved { outcome } => {
                    self.saves_pending = self.saves_pending.saturating_sub(1);
                    self.status = Some(status::export_message(&outcome));
                }
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let toolbar = row![
            button(text("Open")).on_press(Message::OpenClicked),
            button(text("Save")).on_press(Message::SaveClicked),
            Space::new().width(Length::Fill),
            text(self.selection_label()).size(13),
        ]
        .spacing(8);

        let status_line = text(self.status.clone().unwrap_or_default())
            .size(13)
            .color(Color::from_rgb(0.85, 0.85, 0.85));

        let editor = container(waveform_editor(
            self.model.render(),
            self.model.viewport(),
            Message::Editor,
        ))
        .width(Length::Fill)
        .height(Length::Fill);

        column![toolbar, editor, status_line]
            .spacing(8)
            .padding(12)
            .into()
    }

    fn selection_label(&self) -> String {
        let Some(series) = self.model.series() else {
            return String::from("No file loaded");
        };
        match self.model.selected_range().indices() {
            Some(indices) => format!(
                "Selected {}..={} of {} points",
                indices.start(),
                indices.end(),
                series.len()
            ),
            None => format!("{} points", series.len()),
        }
    }
}

/// Show the native open dialog for a text sample file
async fn pick_sample_file() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Open sample file")
        .add_filter("Text", &["txt"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}
