//! Import a sample file, narrow the selection, export the slice.

use std::fs;

use wavecut_core::export::{ensure_exportable, export_samples};
use wavecut_core::text_format::{import_file, parse_samples};
use wavecut_core::{ExportOutcome, FileWorker, ImportOutcome, SelectionModel, WorkerResult};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_text(count: usize) -> String {
    (0..count)
        .map(|i| format!("-{} {}", i as f32 / 10.0, i as f32 / 10.0))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_import_select_export() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, sample_text(5)).unwrap();

    let samples = match import_file(&input) {
        ImportOutcome::Success(samples) => samples,
        other => panic!("import failed: {:?}", other),
    };

    let mut model = SelectionModel::default();
    model.resize(100.0, 40.0);
    model.load_series(samples.clone()).unwrap();

    // Drag the left selector to 30: step = 25, ceil(30 / 25) = 2
    model.pointer_down(0.0);
    model.pointer_move(30.0);
    let range = model.pointer_up();
    assert_eq!(range.indices(), Some(2..=4));

    let slice = ensure_exportable(&range).unwrap();
    let ExportOutcome::Success(path) = export_samples(&dir.path().join("out"), slice) else {
        panic!("export failed");
    };

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "-0.2 0.2\n-0.3 0.3\n-0.4 0.4");
    assert_eq!(
        parse_samples(written.as_bytes()),
        ImportOutcome::Success(samples[2..].to_vec())
    );
}

#[test]
fn test_too_big_file_still_selectable() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("big.txt");
    fs::write(&input, vec!["-0.5 0.5"; 501].join("\n")).unwrap();

    let outcome = import_file(&input);
    assert!(matches!(outcome, ImportOutcome::FileIsTooBig(_)));

    let mut model = SelectionModel::default();
    model.resize(500.0, 100.0);
    model.load_series(outcome.samples().unwrap().to_vec()).unwrap();
    assert_eq!(model.series().unwrap().len(), 500);
    assert!(model.render().is_some());
}

#[test]
fn test_worker_load_feeds_model() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, sample_text(8)).unwrap();

    let worker = FileWorker::spawn().unwrap();
    worker.load(input).unwrap();

    let Some(WorkerResult::Loaded { outcome, .. }) = worker.recv() else {
        panic!("no load result");
    };
    let mut model = SelectionModel::default();
    model.resize(200.0, 50.0);
    model.load_series(outcome.into_result().unwrap()).unwrap();

    let commands = model.render().unwrap();
    assert_eq!(commands.bands.len(), 1);
    assert_eq!(commands.path.upper.len(), 10);
}
