use tasklist_core::db::open_db_in_memory;
use tasklist_core::{
    validate_task_text, NewTask, RepoError, SqliteTaskRepository, TaskRepository, TaskUpdate,
    TaskValidationError, DEFAULT_PRIORITY,
};

#[test]
fn create_and_get_roundtrip_uses_default_priority() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo.create_task(&NewTask::new("Buy milk")).unwrap();
    let loaded = repo.get_task(created.id).unwrap().unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.task, "Buy milk");
    assert!(!loaded.completed);
    assert_eq!(loaded.priority, DEFAULT_PRIORITY);
}

#[test]
fn create_keeps_arbitrary_priority_strings() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let created = repo
        .create_task(&NewTask::new("odd").with_priority("URGENT!!"))
        .unwrap();
    assert_eq!(
        repo.get_task(created.id).unwrap().unwrap().priority,
        "URGENT!!"
    );
}

#[test]
fn first_task_gets_id_one_and_ids_are_never_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let first = repo.create_task(&NewTask::new("A")).unwrap();
    assert_eq!(first.id, 1);
    let second = repo.create_task(&NewTask::new("B")).unwrap();
    repo.delete_task(second.id).unwrap();

    let third = repo.create_task(&NewTask::new("C")).unwrap();
    assert!(third.id > second.id);
}

#[test]
fn invalid_text_is_rejected_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let empty = repo.create_task(&NewTask::new("")).unwrap_err();
    assert!(matches!(
        empty,
        RepoError::Validation(TaskValidationError::Empty)
    ));

    let too_long = repo.create_task(&NewTask::new("x".repeat(201))).unwrap_err();
    assert!(matches!(
        too_long,
        RepoError::Validation(TaskValidationError::TooLong { .. })
    ));

    assert!(repo.list_tasks().unwrap().is_empty());
}

#[test]
fn boundary_lengths_are_accepted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    for text in ["x".to_string(), "x".repeat(200), "ü".repeat(200)] {
        let created = repo.create_task(&NewTask::new(text.clone())).unwrap();
        assert_eq!(repo.get_task(created.id).unwrap().unwrap().task, text);
    }
}

#[test]
fn text_containing_nul_is_stored_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    for text in [
        "\0".to_string(),
        "\0abc".to_string(),
        format!("{}\0", "x".repeat(199)),
    ] {
        assert!(validate_task_text(&text).is_ok());
        let created = repo.create_task(&NewTask::new(text.clone())).unwrap();
        assert_eq!(repo.get_task(created.id).unwrap().unwrap().task, text);
    }

    let updated = repo
        .update_task(1, &TaskUpdate::new("\0edited", None))
        .unwrap();
    assert_eq!(updated.task, "\0edited");
}

#[test]
fn list_is_newest_first_with_id_tie_break() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let a = repo.create_task(&NewTask::new("a")).unwrap();
    let b = repo.create_task(&NewTask::new("b")).unwrap();
    let c = repo.create_task(&NewTask::new("c")).unwrap();

    conn.execute("UPDATE tasks SET created_at = 1000;", [])
        .unwrap();
    conn.execute("UPDATE tasks SET created_at = 500 WHERE id = ?1;", [c.id])
        .unwrap();

    let ids: Vec<_> = repo.list_tasks().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![b.id, a.id, c.id]);
}

#[test]
fn toggle_flips_only_completed_and_is_its_own_inverse() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let original = repo
        .create_task(&NewTask::new("A").with_priority("high"))
        .unwrap();

    let once = repo.toggle_task(original.id).unwrap();
    assert!(once.completed);
    assert_eq!(once.task, original.task);
    assert_eq!(once.priority, original.priority);
    assert_eq!(once.created_at, original.created_at);

    let twice = repo.toggle_task(original.id).unwrap();
    assert_eq!(twice, original);
    assert_eq!(repo.get_task(original.id).unwrap().unwrap(), original);
}

#[test]
fn toggle_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo.toggle_task(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn update_overwrites_text_and_priority_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let original = repo.create_task(&NewTask::new("draft")).unwrap();
    repo.toggle_task(original.id).unwrap();

    let updated = repo
        .update_task(
            original.id,
            &TaskUpdate::new("final", Some("low".to_string())),
        )
        .unwrap();

    let loaded = repo.get_task(original.id).unwrap().unwrap();
    assert_eq!(loaded, updated);
    assert_eq!(loaded.task, "final");
    assert_eq!(loaded.priority, "low");
    assert!(loaded.completed);
    assert_eq!(loaded.created_at, original.created_at);
}

#[test]
fn update_without_priority_keeps_stored_priority() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let original = repo
        .create_task(&NewTask::new("draft").with_priority("high"))
        .unwrap();
    let updated = repo
        .update_task(original.id, &TaskUpdate::new("final", None))
        .unwrap();
    assert_eq!(updated.priority, "high");
}

#[test]
fn update_rejects_invalid_text_and_leaves_record_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let original = repo.create_task(&NewTask::new("keep me")).unwrap();
    let err = repo
        .update_task(original.id, &TaskUpdate::new("", Some("high".to_string())))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.get_task(original.id).unwrap().unwrap(), original);
}

#[test]
fn update_missing_id_is_not_found_even_with_invalid_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo
        .update_task(5, &TaskUpdate::new("", None))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(5)));
}

#[test]
fn delete_is_hard_and_not_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = repo.create_task(&NewTask::new("gone")).unwrap();
    repo.delete_task(task.id).unwrap();

    assert!(repo.get_task(task.id).unwrap().is_none());
    let err = repo.delete_task(task.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == task.id));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn read_rejects_invalid_persisted_completed_flag() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = repo.create_task(&NewTask::new("flag")).unwrap();
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute("UPDATE tasks SET completed = 7 WHERE id = ?1;", [task.id])
        .unwrap();

    let err = repo.get_task(task.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
