//! Background file worker
//!
//! Moves sample file parsing and export writing off the UI thread. Every
//! request produces exactly one terminal result; there is no progress
//! streaming and no cancellation.
//!
//! # Stale loads
//!
//! Each `load()` bumps a monotonic generation counter. When a newer load is
//! requested before an older one finishes, the older result is dropped in
//! `try_recv()` so it can never replace the newer series.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::export::{export_samples, ExportOutcome};
use crate::series::Sample;
use crate::text_format::{import_file, ImportOutcome};

/// Work sent to the background thread
#[derive(Debug)]
enum WorkerRequest {
    Load { path: PathBuf, generation: u64 },
    Save { samples: Vec<Sample>, dir: PathBuf },
}

/// Terminal result of one request
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResult {
    Loaded {
        /// Generation returned by the `load()` call that produced this
        generation: u64,
        path: PathBuf,
        outcome: ImportOutcome,
    },
    Saved {
        outcome: ExportOutcome,
    },
}

/// Handle to the background I/O thread
pub struct FileWorker {
    tx: Sender<WorkerRequest>,
    rx: Receiver<WorkerResult>,
    /// Generation of the most recent load request
    latest_load: Arc<AtomicU64>,
    /// Thread handle (kept so the thread is tied to the worker's lifetime)
    _handle: JoinHandle<()>,
}

impl FileWorker {
    /// Spawn the worker thread
    pub fn spawn() -> std::io::Result<Self> {
        let (request_tx, request_rx) = std::sync::mpsc::channel::<WorkerRequest>();
        let (result_tx, result_rx) = std::sync::mpsc::channel::<WorkerResult>();

        let handle = thread::Builder::new()
            .name("wavecut-io".to_string())
            .spawn(move || worker_thread(request_rx, result_tx))?;

        log::info!("FileWorker spawned");

        Ok(Self {
            tx: request_tx,
            rx: result_rx,
            latest_load: Arc::new(AtomicU64::new(0)),
            _handle: handle,
        })
    }

    /// Request a sample file import (non-blocking)
    ///
    /// Returns the generation of this request; results from earlier
    /// generations are discarded once this one is issued.
    pub fn load(&self, path: PathBuf) -> Result<u64, String> {
        let generation = self.latest_load.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx
            .send(WorkerRequest::Load { path, generation })
            .map_err(|e| format!("Worker thread disconnected: {}", e))?;
        Ok(generation)
    }

    /// Request an export of `samples` into `dir` (non-blocking)
    pub fn save(&self, samples: Vec<Sample>, dir: PathBuf) -> Result<(), String> {
        self.tx
            .send(WorkerRequest::Save { samples, dir })
            .map_err(|e| format!("Worker thread disconnected: {}", e))
    }

    /// Generation of the most recent `load()` (0 before the first)
    pub fn latest_generation(&self) -> u64 {
        self.latest_load.load(Ordering::SeqCst)
    }

    /// Try to receive a completed result (non-blocking)
    ///
    /// Stale load results are skipped.
    pub fn try_recv(&self) -> Option<WorkerResult> {
        loop {
            match self.rx.try_recv() {
                Ok(WorkerResult::Loaded { generation, .. })
                    if generation < self.latest_generation() =>
                {
                    log::debug!("try_recv: Dropping stale load result (generation {})", generation);
                }
                Ok(result) => return Some(result),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    log::error!("Worker thread disconnected unexpectedly");
                    return None;
                }
            }
        }
    }

    /// Block until the next non-stale result (used by tests and CLI-style callers)
    pub fn recv(&self) -> Option<WorkerResult> {
        loop {
            match self.rx.recv() {
                Ok(WorkerResult::Loaded { generation, .. })
                    if generation < self.latest_generation() =>
                {
                    log::debug!("recv: Dropping stale load result (generation {})", generation);
                }
                Ok(result) => return Some(result),
                Err(_) => return None,
            }
        }
    }
}

/// The background worker thread function
fn worker_thread(rx: Receiver<WorkerRequest>, tx: Sender<WorkerResult>) {
    log::info!("File worker thread started");

    while let Ok(request) = rx.recv() {
        let result = match request {
            WorkerRequest::Load { path, generation } => {
                let outcome = import_file(&path);
                WorkerResult::Loaded {
                    generation,
                    path,
                    outcome,
                }
            }
            WorkerRequest::Save { samples, dir } => WorkerResult::Saved {
                outcome: export_samples(&dir, &samples),
            },
        };

        if tx.send(result).is_err() {
            break;
        }
    }

    log::info!("File worker thread exiting");
}
