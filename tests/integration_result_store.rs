use chrono::{DateTime, Duration, Utc};
use std::fs;
use tempfile::tempdir;

use typi::export::export_csv;
use typi::progress::{FeedbackTier, ProgressAnalyzer};
use typi::result::SessionResult;
use typi::storage::{FileStorage, SqliteStorage, Storage};
use typi::store::{ResultStore, SortKey, SortOrder, RESULTS_KEY};

fn result(minute: i64, wpm: u32, accuracy: u32) -> SessionResult {
    SessionResult {
        id: minute.to_string(),
        wpm,
        accuracy,
        elapsed_seconds: 45,
        category: "quotes".to_string(),
        completed_at: DateTime::<Utc>::UNIX_EPOCH + Duration::minutes(minute),
        error_count: 1,
    }
}

fn fill<S: Storage>(store: &mut ResultStore<S>) {
    for (i, wpm) in [32, 41, 38, 55, 47].into_iter().enumerate() {
        store.append(result(i as i64, wpm, 90 + i as u32)).unwrap();
    }
}

#[test]
fn file_backed_log_survives_restart() {
    let dir = tempdir().unwrap();

    let mut store = ResultStore::load(FileStorage::new(dir.path()));
    fill(&mut store);
    drop(store);

    let store = ResultStore::load(FileStorage::new(dir.path()));
    assert_eq!(store.len(), 5);
    assert_eq!(store.results()[0].wpm, 47);
    assert_eq!(store.best_wpm(), 55);
    assert_eq!(store.average_wpm(), 43);

    let raw = fs::read_to_string(dir.path().join(format!("{RESULTS_KEY}.json"))).unwrap();
    assert!(raw.contains("\"textType\":\"quotes\""));
}

#[test]
fn sqlite_backed_log_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.db");

    let mut store = ResultStore::load(SqliteStorage::open(&path).unwrap());
    fill(&mut store);
    drop(store);

    let store = ResultStore::load(SqliteStorage::open(&path).unwrap());
    let by_wpm: Vec<u32> = store
        .sorted(SortKey::Wpm, SortOrder::Desc)
        .iter()
        .map(|r| r.wpm)
        .collect();
    assert_eq!(by_wpm, vec![55, 47, 41, 38, 32]);
}

#[test]
fn corrupted_file_is_discarded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(format!("{RESULTS_KEY}.json"));
    fs::write(&path, "{\"oops\": true}").unwrap();

    let store = ResultStore::load(FileStorage::new(dir.path()));
    assert!(store.is_empty());
    assert!(!path.exists());
}

#[test]
fn clear_then_reload_is_empty() {
    let dir = tempdir().unwrap();
    let mut store = ResultStore::load(FileStorage::new(dir.path()));
    fill(&mut store);
    store.clear().unwrap();
    store.clear().unwrap();

    let store = ResultStore::load(FileStorage::new(dir.path()));
    assert!(store.is_empty());
    assert_eq!(store.average_wpm(), 0);
}

#[test]
fn analyzer_reads_store_log() {
    let dir = tempdir().unwrap();
    let mut store = ResultStore::load(FileStorage::new(dir.path()));
    fill(&mut store);

    let report = ProgressAnalyzer::default().analyze(store.results());
    assert_eq!(report.latest_wpm, Some(47));
    assert_eq!(report.tier, Some(FeedbackTier::Good));
    assert_eq!(report.trend, 0.0);
    let wpms: Vec<f64> = report.series.iter().map(|p| p.wpm).collect();
    assert_eq!(wpms, vec![32.0, 41.0, 38.0, 55.0, 47.0]);
}

#[test]
fn export_matches_log() {
    let dir = tempdir().unwrap();
    let mut store = ResultStore::load(FileStorage::new(dir.path()));
    fill(&mut store);

    let csv_path = dir.path().join("out.csv");
    assert_eq!(export_csv(&csv_path, store.results()).unwrap(), 5);
    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("id,date,wpm,accuracy,time,text_type,errors")
    );
    assert_eq!(
        lines.next(),
        Some("4,1970-01-01T00:04:00.000Z,47,94,45,quotes,1")
    );
}
