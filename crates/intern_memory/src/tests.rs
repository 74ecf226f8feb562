use crate::json_store::{MemoryStore, DEFAULT_RECENT};
use chrono::{NaiveDate, NaiveDateTime};
use intern_core::{importance, Memory};
use serde_json::json;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn memory(text: &str, ts: NaiveDateTime, importance: f64, category: &str) -> Memory {
    Memory::new(text, ts, importance, category).unwrap()
}

fn temp_store(dir: &tempfile::TempDir) -> MemoryStore {
    MemoryStore::open(dir.path().join("memories.json")).unwrap()
}

#[test]
fn test_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);
    assert_eq!(store.count(), 0);
    assert!(store.is_empty());
    assert!(store.recent(DEFAULT_RECENT).is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_append_persists_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memories.json");

    let first = memory("Set up my laptop", at(1, 9), 1.0, "daily")
        .with_metadata("source", json!("cron"));
    let second = memory("Got SFTP creds", at(2, 9), 3.0, "milestone");

    let mut store = MemoryStore::open(&path).unwrap();
    store.append(first.clone()).unwrap();
    store.append(second.clone()).unwrap();

    let reloaded = MemoryStore::open(&path).unwrap();
    assert_eq!(reloaded.all(), &[first, second]);
}

#[test]
fn test_append_creates_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("memories.json");
    let mut store = MemoryStore::open(&path).unwrap();
    store.append(memory("hello", at(1, 9), 1.0, "daily")).unwrap();
    assert!(path.exists());
    assert!(!dir.path().join("nested/deeper/memories.json.tmp").exists());
}

#[test]
fn test_file_is_pretty_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    store.append(memory("hello", at(1, 9), 1.0, "daily")).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.starts_with("[\n  {"));
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["text"], "hello");
    assert_eq!(value[0]["timestamp"], "2025-04-01T09:00:00");
    assert_eq!(value[0]["metadata"], json!({}));
}

#[test]
fn test_recent_orders_newest_first_and_caps() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    // Appended out of order on purpose.
    for day in [3, 1, 7, 5, 2, 6, 4] {
        store
            .append(memory(&format!("day {}", day), at(day, 9), 1.0, "daily"))
            .unwrap();
    }

    let recent: Vec<&str> = store.recent(DEFAULT_RECENT).into_iter().map(|m| m.text()).collect();
    assert_eq!(recent, ["day 7", "day 6", "day 5", "day 4", "day 3"]);

    assert_eq!(store.recent(100).len(), 7);
    assert!(store.recent(0).is_empty());
}

#[test]
fn test_recent_ties_keep_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    store.append(memory("a", at(1, 9), 1.0, "daily")).unwrap();
    store.append(memory("b", at(1, 9), 1.0, "daily")).unwrap();
    let texts: Vec<&str> = store.recent(2).into_iter().map(|m| m.text()).collect();
    assert_eq!(texts, ["a", "b"]);
}

#[test]
fn test_milestones_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    store
        .append(memory("significant", at(1, 9), importance::SIGNIFICANT, "daily"))
        .unwrap();
    store
        .append(memory("launch", at(2, 9), importance::MILESTONE, "milestone"))
        .unwrap();
    store.append(memory("edge", at(3, 9), 2.5, "daily")).unwrap();

    let milestones: Vec<&str> = store.milestones().into_iter().map(|m| m.text()).collect();
    assert_eq!(milestones, ["launch", "edge"]);
}

#[test]
fn test_by_category_exact_match() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    store.append(memory("a", at(1, 9), 1.0, "daily")).unwrap();
    store.append(memory("b", at(2, 9), 3.0, "milestone")).unwrap();
    store.append(memory("c", at(3, 9), 1.0, "Daily")).unwrap();

    let daily: Vec<&str> = store.by_category("daily").into_iter().map(|m| m.text()).collect();
    assert_eq!(daily, ["a"]);
    assert!(store.by_category("technical").is_empty());
}

#[test]
fn test_chronological_sorts_oldest_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    store.append(memory("late", at(9, 9), 1.0, "daily")).unwrap();
    store.append(memory("early", at(1, 9), 1.0, "daily")).unwrap();
    let texts: Vec<&str> = store.chronological().into_iter().map(|m| m.text()).collect();
    assert_eq!(texts, ["early", "late"]);
}

#[test]
fn test_corrupted_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memories.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let store = MemoryStore::open(&path).unwrap();
    assert_eq!(store.count(), 0);
}

#[test]
fn test_wrong_shape_and_invalid_records_load_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memories.json");

    std::fs::write(&path, r#"{"text": "not a list"}"#).unwrap();
    assert!(MemoryStore::load(&path).unwrap().is_empty());

    std::fs::write(
        &path,
        r#"[{"text": "", "timestamp": "2025-04-01T09:00:00", "importance": 1.0, "category": "daily"}]"#,
    )
    .unwrap();
    assert!(MemoryStore::load(&path).unwrap().is_empty());

    std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
    assert!(MemoryStore::load(&path).unwrap().is_empty());
}

#[test]
fn test_append_after_corruption_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memories.json");
    std::fs::write(&path, "garbage").unwrap();

    let mut store = MemoryStore::open(&path).unwrap();
    store.append(memory("fresh start", at(1, 9), 1.0, "daily")).unwrap();

    let reloaded = MemoryStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].text(), "fresh start");
}

#[test]
fn test_append_failure_is_reported_and_memory_kept_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let parent = dir.path().join("blocker");
    let mut store = MemoryStore::open(parent.join("memories.json")).unwrap();
    // A regular file where the parent directory should be.
    std::fs::write(&parent, "x").unwrap();

    let result = store.append(memory("lost", at(1, 9), 1.0, "daily"));
    assert!(result.is_err());
    assert_eq!(store.count(), 1);
}

#[test]
fn test_reset_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    store.append(memory("a", at(1, 9), 1.0, "daily")).unwrap();

    let existed = MemoryStore::reset(store.path()).unwrap();
    assert!(existed);
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    assert_eq!(MemoryStore::open(store.path()).unwrap().count(), 0);
}

#[test]
fn test_reset_missing_file_creates_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh").join("memories.json");
    let existed = MemoryStore::reset(&path).unwrap();
    assert!(!existed);
    assert!(path.exists());
}

/// Importances [1.0, 3.0, 1.0]: one milestone, three memories.
#[test]
fn test_three_memory_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(&dir);
    store.append(memory("one", at(1, 9), 1.0, "daily")).unwrap();
    store.append(memory("two", at(2, 9), 3.0, "milestone")).unwrap();
    store.append(memory("three", at(3, 9), 1.0, "daily")).unwrap();

    let milestones = store.milestones();
    assert_eq!(milestones.len(), 1);
    assert_eq!(milestones[0].text(), "two");
    assert_eq!(store.count(), 3);
}
