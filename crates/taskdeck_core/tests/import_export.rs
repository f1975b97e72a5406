use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    Priority, SqliteTaskRepository, Status, TaskDraft, TaskRepository, TaskService,
};
use chrono::{NaiveDate, NaiveTime};

fn populated_service(
    conn: &rusqlite::Connection,
) -> TaskService<SqliteTaskRepository<'_>> {
    let repo = SqliteTaskRepository::try_new(conn).unwrap();
    let mut service = TaskService::load(repo).unwrap();

    let mut scheduled = TaskDraft::new("dentist appointment");
    scheduled.due_date = NaiveDate::from_ymd_opt(2025, 7, 1);
    scheduled.due_time = NaiveTime::from_hms_opt(9, 0, 0);
    scheduled.priority = Priority::High;
    service.create(scheduled).unwrap();

    let mut done = TaskDraft::new("file expenses");
    done.status = Status::Completed;
    service.create(done).unwrap();

    service
}

#[test]
fn export_import_round_trips_the_collection() {
    let source_conn = open_db_in_memory().unwrap();
    let source = populated_service(&source_conn);
    let exported = source.export_json().unwrap();

    let target_conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&target_conn).unwrap();
    let mut target = TaskService::load(repo).unwrap();

    let count = target.import_json(&exported).unwrap();
    assert_eq!(count, 2);
    assert_eq!(target.tasks(), source.tasks());
}

#[test]
fn export_is_a_pretty_printed_json_array() {
    let conn = open_db_in_memory().unwrap();
    let service = populated_service(&conn);

    let exported = service.export_json().unwrap();
    assert!(exported.trim_start().starts_with('['));
    assert!(exported.contains('\n'));

    let parsed: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn malformed_import_returns_zero_and_preserves_state() {
    let conn = open_db_in_memory().unwrap();
    let mut service = populated_service(&conn);
    let before = service.tasks().to_vec();

    for payload in ["not json at all", "{\"tasks\": 1}", "[{\"id\": \"oops\"}]"] {
        let count = service.import_json(payload).unwrap();
        assert_eq!(count, 0, "payload `{payload}` must be rejected");
        assert_eq!(service.tasks(), before.as_slice());
    }

    // The persisted collection must be untouched as well.
    let fresh_repo = SqliteTaskRepository::try_new(&conn).unwrap();
    assert_eq!(fresh_repo.load_all().unwrap(), before);
}

#[test]
fn import_replaces_the_whole_collection() {
    let source_conn = open_db_in_memory().unwrap();
    let source = populated_service(&source_conn);
    let exported = source.export_json().unwrap();

    let target_conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&target_conn).unwrap();
    let mut target = TaskService::load(repo).unwrap();
    target.create(TaskDraft::new("will be replaced")).unwrap();

    let count = target.import_json(&exported).unwrap();
    assert_eq!(count, 2);
    assert_eq!(target.tasks().len(), 2);
    assert!(target.tasks().iter().all(|t| t.title != "will be replaced"));
}

#[test]
fn empty_array_import_clears_the_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut service = populated_service(&conn);

    let count = service.import_json("[]").unwrap();
    assert_eq!(count, 0);
    assert!(service.tasks().is_empty());
}
