use chrono::NaiveDate;
use rusqlite::{params, Connection};
use taskdeck_core::db::{open_db, open_db_in_memory};
use taskdeck_core::{
    Priority, SqliteSlotStorage, Task, TaskStorage, Theme, TASKS_SLOT_KEY, THEME_SLOT_KEY,
};
use uuid::Uuid;

#[test]
fn load_returns_empty_when_slot_is_absent() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteSlotStorage::new(&conn);

    assert!(storage.load_tasks().unwrap().is_empty());
}

#[test]
fn load_returns_empty_for_unparsable_payload() {
    let conn = open_db_in_memory().unwrap();
    write_raw_slot(&conn, TASKS_SLOT_KEY, "definitely not json {{");

    let storage = SqliteSlotStorage::new(&conn);
    assert!(storage.load_tasks().unwrap().is_empty());
}

#[test]
fn load_returns_empty_for_non_array_payload() {
    let conn = open_db_in_memory().unwrap();
    write_raw_slot(&conn, TASKS_SLOT_KEY, r#"{"tasks": []}"#);

    let storage = SqliteSlotStorage::new(&conn);
    assert!(storage.load_tasks().unwrap().is_empty());
}

#[test]
fn load_returns_empty_when_any_record_is_malformed() {
    let conn = open_db_in_memory().unwrap();
    // One valid record, one with a broken priority; the whole payload is
    // rejected rather than partially parsed.
    let payload = format!(
        r#"[
            {{"id":"{}","title":"ok","due":null,"priority":"high","completed":false,"createdAt":1}},
            {{"id":"{}","title":"bad","due":null,"priority":"urgent","completed":false,"createdAt":2}}
        ]"#,
        Uuid::new_v4(),
        Uuid::new_v4()
    );
    write_raw_slot(&conn, TASKS_SLOT_KEY, &payload);

    let storage = SqliteSlotStorage::new(&conn);
    assert!(storage.load_tasks().unwrap().is_empty());
}

#[test]
fn save_then_load_round_trips_every_field() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteSlotStorage::new(&conn);

    let tasks = vec![
        Task {
            id: Uuid::new_v4(),
            title: "Write report".to_string(),
            due: Some(NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()),
            priority: Priority::High,
            completed: true,
            created_at: 1_760_000_000_000,
        },
        Task {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            due: None,
            priority: Priority::Low,
            completed: false,
            created_at: 1_760_000_000_001,
        },
    ];

    storage.save_tasks(&tasks).unwrap();
    assert_eq!(storage.load_tasks().unwrap(), tasks);
}

#[test]
fn save_replaces_the_previous_payload_whole() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteSlotStorage::new(&conn);

    let first = vec![make_task("first")];
    storage.save_tasks(&first).unwrap();

    let second = vec![make_task("second a"), make_task("second b")];
    storage.save_tasks(&second).unwrap();

    assert_eq!(storage.load_tasks().unwrap(), second);
}

#[test]
fn theme_defaults_to_dark_when_absent_or_unrecognized() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteSlotStorage::new(&conn);

    assert_eq!(storage.load_theme().unwrap(), Theme::Dark);

    write_raw_slot(&conn, THEME_SLOT_KEY, "sepia");
    assert_eq!(storage.load_theme().unwrap(), Theme::Dark);
}

#[test]
fn theme_round_trips_and_is_independent_of_the_task_slot() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteSlotStorage::new(&conn);

    storage.save_theme(Theme::Light).unwrap();
    storage.save_tasks(&[make_task("unrelated")]).unwrap();

    assert_eq!(storage.load_theme().unwrap(), Theme::Light);
    assert_eq!(storage.load_tasks().unwrap().len(), 1);
}

#[test]
fn collection_survives_across_sessions_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskdeck.db");
    let tasks = vec![make_task("persisted"), make_task("also persisted")];

    {
        let conn = open_db(&path).unwrap();
        let storage = SqliteSlotStorage::new(&conn);
        storage.save_tasks(&tasks).unwrap();
        storage.save_theme(Theme::Light).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let storage = SqliteSlotStorage::new(&conn);
    assert_eq!(storage.load_tasks().unwrap(), tasks);
    assert_eq!(storage.load_theme().unwrap(), Theme::Light);
}

fn write_raw_slot(conn: &Connection, key: &str, value: &str) {
    conn.execute(
        "INSERT INTO slots (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
        params![key, value],
    )
    .unwrap();
}

fn make_task(title: &str) -> Task {
    Task::new(title, None, Priority::Medium).unwrap()
}
