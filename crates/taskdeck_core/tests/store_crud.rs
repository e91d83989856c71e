use chrono::NaiveDate;
use std::collections::HashSet;
use taskdeck_core::db::{open_db_in_memory, DbError};
use taskdeck_core::{
    Priority, SqliteSlotStorage, StorageError, StorageResult, StoreError, Task, TaskStorage,
    TaskStore, TaskValidationError,
};
use uuid::Uuid;

#[test]
fn add_appends_in_creation_order_and_returns_the_record() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));

    let first = store.add("first", None, Priority::High).unwrap();
    let second = store.add("second", date(2025, 10, 20), Priority::Low).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.tasks()[0], first);
    assert_eq!(store.tasks()[1], second);
    assert!(!first.completed);
    assert_eq!(second.due, date(2025, 10, 20));
}

#[test]
fn add_trims_title_and_rejects_blank() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));

    let task = store.add("  padded  ", None, Priority::Medium).unwrap();
    assert_eq!(task.title, "padded");

    let err = store.add("   ", None, Priority::Medium).unwrap_err();
    assert_eq!(
        err,
        StoreError::Validation(TaskValidationError::EmptyTitle)
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn edit_overwrites_fields_and_preserves_identity() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));

    let created = store.add("draft", None, Priority::Low).unwrap();
    store.toggle_complete(created.id);

    let updated = store
        .edit(created.id, "  final  ", date(2026, 1, 15), Priority::High)
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.completed);
    assert_eq!(updated.title, "final");
    assert_eq!(updated.due, date(2026, 1, 15));
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(store.get(created.id).unwrap(), &updated);
}

#[test]
fn edit_missing_id_fails_with_not_found_and_leaves_collection_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));
    store.add("only task", None, Priority::Medium).unwrap();
    let snapshot = store.tasks().to_vec();

    let missing = Uuid::new_v4();
    let err = store
        .edit(missing, "new title", None, Priority::High)
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    assert_eq!(store.tasks(), snapshot.as_slice());
}

#[test]
fn edit_rejects_blank_title_without_mutating() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));
    let created = store.add("keep me", date(2025, 3, 3), Priority::Low).unwrap();

    let err = store
        .edit(created.id, "  ", None, Priority::High)
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::Validation(TaskValidationError::EmptyTitle)
    );
    assert_eq!(store.get(created.id).unwrap().title, "keep me");
}

#[test]
fn delete_removes_matching_task_and_ignores_absent_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));
    let keep = store.add("keep", None, Priority::Medium).unwrap();
    let drop = store.add("drop", None, Priority::Medium).unwrap();

    store.delete(drop.id);
    assert_eq!(store.len(), 1);
    assert!(store.get(keep.id).is_some());

    store.delete(Uuid::new_v4());
    assert_eq!(store.len(), 1);
}

#[test]
fn toggle_twice_restores_original_state() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));
    let created = store.add("flip", date(2025, 7, 7), Priority::High).unwrap();

    store.toggle_complete(created.id);
    assert!(store.get(created.id).unwrap().completed);

    store.toggle_complete(created.id);
    assert_eq!(store.get(created.id).unwrap(), &created);

    // Absent id is a no-op, not an error.
    store.toggle_complete(Uuid::new_v4());
    assert_eq!(store.len(), 1);
}

#[test]
fn clear_completed_removes_exactly_the_completed_tasks() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));
    let open_a = store.add("open a", date(2025, 9, 9), Priority::High).unwrap();
    let done_a = store.add("done a", None, Priority::Low).unwrap();
    let open_b = store.add("open b", None, Priority::Medium).unwrap();
    let done_b = store.add("done b", None, Priority::High).unwrap();
    store.toggle_complete(done_a.id);
    store.toggle_complete(done_b.id);

    let removed = store.clear_completed();

    assert_eq!(removed, 2);
    assert_eq!(store.len(), 2);
    assert_eq!(store.tasks()[0], open_a);
    assert_eq!(store.tasks()[1], open_b);
}

#[test]
fn clear_all_empties_the_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));
    store.add("one", None, Priority::Low).unwrap();
    store.add("two", None, Priority::High).unwrap();

    store.clear_all();
    assert!(store.is_empty());
}

#[test]
fn ids_stay_unique_across_operation_sequences() {
    let conn = open_db_in_memory().unwrap();
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));

    for index in 0..200 {
        let task = store
            .add(&format!("task {index}"), None, Priority::Medium)
            .unwrap();
        if index % 3 == 0 {
            store.toggle_complete(task.id);
        }
        if index % 7 == 0 {
            store.delete(task.id);
        }
    }

    let ids: HashSet<Uuid> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids.len(), store.len());
}

#[test]
fn mutations_write_through_and_reload_reproduces_the_collection() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));
        let report = store
            .add("Write report", date(2025, 10, 20), Priority::High)
            .unwrap();
        store.add("Buy milk", None, Priority::Low).unwrap();
        store.toggle_complete(report.id);
    }

    let reloaded = TaskStore::open(SqliteSlotStorage::new(&conn));
    assert_eq!(reloaded.len(), 2);

    let report = &reloaded.tasks()[0];
    assert_eq!(report.title, "Write report");
    assert_eq!(report.due, date(2025, 10, 20));
    assert_eq!(report.priority, Priority::High);
    assert!(report.completed);

    let milk = &reloaded.tasks()[1];
    assert_eq!(milk.title, "Buy milk");
    assert_eq!(milk.due, None);
    assert_eq!(milk.priority, Priority::Low);
    assert!(!milk.completed);
    assert!(report.created_at <= milk.created_at);
}

#[test]
fn failed_write_through_keeps_in_memory_state_authoritative() {
    let mut store = TaskStore::open(FailingStorage);

    let task = store.add("survives", None, Priority::High).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(task.id).unwrap().title, "survives");

    store.toggle_complete(task.id);
    assert!(store.get(task.id).unwrap().completed);
}

/// Storage stub whose medium is permanently broken.
struct FailingStorage;

impl TaskStorage for FailingStorage {
    fn save_tasks(&self, _tasks: &[Task]) -> StorageResult<()> {
        Err(StorageError::Db(DbError::Sqlite(
            rusqlite::Error::QueryReturnedNoRows,
        )))
    }

    fn load_tasks(&self) -> StorageResult<Vec<Task>> {
        Ok(Vec::new())
    }
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    Some(NaiveDate::from_ymd_opt(year, month, day).unwrap())
}
