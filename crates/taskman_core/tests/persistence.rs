use std::fs;
use taskman_core::{
    NewTask, Priority, StoreConfig, StoreError, TaskStatus, TaskStore, TaskUpdate,
};

#[test]
fn missing_file_starts_empty_and_is_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let store = TaskStore::load(&path).unwrap();

    assert!(store.is_empty());
    assert_eq!(store.path(), path.as_path());
    assert!(!path.exists());
}

#[test]
fn open_uses_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("nested").join("mine.json"));

    let mut store = TaskStore::open(&config).unwrap();
    store
        .add(NewTask::new("a", "b", "c", "2024-01-01", Priority::Low))
        .unwrap();

    assert!(config.path.exists());
}

#[test]
fn save_then_load_reproduces_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::load(&path).unwrap();
    store
        .add(NewTask::new(
            "Задача",
            "Описание",
            "Работа",
            "2024-11-30",
            Priority::High,
        ))
        .unwrap();
    store
        .add(NewTask::new("Commute", "Drive", "Personal", "2024-12-01", Priority::Medium))
        .unwrap();
    store
        .add(NewTask::new("Gym", "Legs", "Personal", "2024-12-02", Priority::Low))
        .unwrap();
    store.mark_completed(2).unwrap();
    store.delete(Some(1), None).unwrap();
    store.save().unwrap();

    let reloaded = TaskStore::load(&path).unwrap();
    assert_eq!(reloaded.tasks(), store.tasks());
}

#[test]
fn file_has_flat_shape_and_unescaped_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::load(&path).unwrap();
    store
        .add(NewTask::new(
            "Задача",
            "Описание",
            "Работа",
            "2024-11-30",
            Priority::High,
        ))
        .unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("Задача"));
    assert!(!raw.contains("\\u"));
    assert!(raw.contains("\n    {\n        \"id\": 1,"));

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = value[0].as_object().unwrap();
    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["category", "description", "due_date", "id", "priority", "status", "title"]
    );
    assert_eq!(object["priority"], "High");
    assert_eq!(object["status"], "Incomplete");
}

#[test]
fn every_mutation_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::load(&path).unwrap();
    let id = store
        .add(NewTask::new("a", "b", "Work", "2024-01-01", Priority::Low))
        .unwrap();
    store
        .edit(
            id,
            &TaskUpdate {
                priority: Some(Priority::High),
                ..TaskUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(TaskStore::load(&path).unwrap().get(id).unwrap().priority, Priority::High);

    store.mark_completed(id).unwrap();
    assert_eq!(
        TaskStore::load(&path).unwrap().get(id).unwrap().status,
        TaskStatus::Complete
    );

    store.delete(None, Some("Work")).unwrap();
    assert!(TaskStore::load(&path).unwrap().is_empty());
}

#[test]
fn legacy_localized_labels_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(
        &path,
        r#"[
    {
        "id": 3,
        "title": "Задача",
        "description": "Описание",
        "category": "Работа",
        "due_date": "2024-11-30",
        "priority": "Высокий",
        "status": "Выполнена"
    }
]"#,
    )
    .unwrap();

    let mut store = TaskStore::load(&path).unwrap();
    let task = store.get(3).unwrap();
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.status, TaskStatus::Complete);

    let next = store
        .add(NewTask::new("x", "y", "z", "2024-12-01", Priority::Low))
        .unwrap();
    assert_eq!(next, 4);
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"High\""));
    assert!(!raw.contains("Высокий"));
}

#[test]
fn malformed_file_fails_and_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let cases = [
        "{ not json",
        r#"[{"id": 1, "title": "a"}]"#,
        r#"[{"id": 1, "title": "a", "description": "b", "category": "c",
            "due_date": "2024-01-01", "priority": "Low", "status": "Incomplete",
            "extra": true}]"#,
        r#"[{"id": 1, "title": "a", "description": "b", "category": "c",
            "due_date": "2024-01-01", "priority": "Urgent", "status": "Incomplete"}]"#,
        r#"[{"id": 0, "title": "a", "description": "b", "category": "c",
            "due_date": "2024-01-01", "priority": "Low", "status": "Incomplete"}]"#,
    ];

    for content in cases {
        fs::write(&path, content).unwrap();
        let err = TaskStore::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }), "{content}: {err}");
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let task = r#"{"id": 5, "title": "a", "description": "b", "category": "c",
        "due_date": "2024-01-01", "priority": "Low", "status": "Incomplete"}"#;
    fs::write(&path, format!("[{task}, {task}]")).unwrap();

    let err = TaskStore::load(&path).unwrap_err();
    assert!(err.to_string().contains("duplicate task id 5"));
}

#[test]
fn failed_write_leaves_memory_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::load(&path).unwrap();
    store
        .add(NewTask::new("a", "b", "c", "2024-01-01", Priority::Low))
        .unwrap();
    // A directory in place of the file makes every write fail.
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let err = store
        .add(NewTask::new("d", "e", "f", "2024-01-02", Priority::High))
        .unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(store.len(), 1);

    let err = store.mark_completed(1).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(store.get(1).unwrap().status, TaskStatus::Incomplete);

    let err = store.delete(Some(1), None).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(store.len(), 1);
}

#[test]
fn blank_edit_does_not_rewrite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::load(&path).unwrap();
    let id = store
        .add(NewTask::new("a", "b", "c", "2024-01-01", Priority::Low))
        .unwrap();
    // Any write would now fail, so success means no write happened.
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let blank = TaskUpdate {
        title: Some(String::new()),
        description: Some(String::new()),
        ..TaskUpdate::default()
    };
    store.edit(id, &blank).unwrap();
    assert_eq!(store.get(id).unwrap().title, "a");

    assert!(matches!(store.edit(99, &blank), Err(StoreError::NotFound(99))));
}
