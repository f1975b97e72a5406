use taskdeck_core::db::migrations::latest_version;
use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    Category, Priority, RepoError, SqliteTaskRepository, Status, TaskDraft, TaskFilter,
    TaskPatch, TaskService, TaskValidationError,
};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

fn service(conn: &Connection) -> TaskService<SqliteTaskRepository<'_>> {
    let repo = SqliteTaskRepository::try_new(conn).unwrap();
    TaskService::load(repo).unwrap()
}

fn draft(title: &str) -> TaskDraft {
    let mut draft = TaskDraft::new(title);
    draft.description = "some details".to_string();
    draft.due_date = NaiveDate::from_ymd_opt(2025, 6, 10);
    draft.due_time = NaiveTime::from_hms_opt(18, 30, 0);
    draft.notes = "bring the list".to_string();
    draft
}

#[test]
fn create_then_read_back_preserves_fields() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn);

    let created = service.create(draft("buy groceries")).unwrap();
    assert!(created.id > 0);

    let loaded = service.get(created.id).unwrap();
    assert_eq!(loaded.title, "buy groceries");
    assert_eq!(loaded.description, "some details");
    assert_eq!(loaded.category, Category::Personal);
    assert_eq!(loaded.priority, Priority::Medium);
    assert_eq!(loaded.status, Status::Initial);
    assert_eq!(loaded.due_date, NaiveDate::from_ymd_opt(2025, 6, 10));
    assert_eq!(loaded.due_time, NaiveTime::from_hms_opt(18, 30, 0));
    assert_eq!(loaded.notes, "bring the list");
}

#[test]
fn rapid_creates_get_unique_monotonic_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn);

    let first = service.create(TaskDraft::new("a")).unwrap();
    let second = service.create(TaskDraft::new("b")).unwrap();
    let third = service.create(TaskDraft::new("c")).unwrap();

    assert!(second.id > first.id);
    assert!(third.id > second.id);
}

#[test]
fn blank_title_is_rejected_before_persistence() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn);

    let err = service.create(TaskDraft::new("   ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::BlankTitle)
    ));
    assert!(service.tasks().is_empty());
}

#[test]
fn update_merges_only_provided_fields() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn);

    let created = service.create(draft("call the bank")).unwrap();
    let updated = service
        .update(created.id, &TaskPatch::status(Status::InProgress))
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, Status::InProgress);
    assert_eq!(updated.title, "call the bank");
    assert_eq!(updated.due_date, created.due_date);
}

#[test]
fn update_unknown_id_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn);

    service.create(draft("stay put")).unwrap();
    let before = service.tasks().to_vec();

    let result = service.update(42, &TaskPatch::status(Status::Completed)).unwrap();
    assert!(result.is_none());
    assert_eq!(service.tasks(), before.as_slice());
}

#[test]
fn delete_removes_by_id() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn);

    let keep = service.create(TaskDraft::new("keep")).unwrap();
    let remove = service.create(TaskDraft::new("remove")).unwrap();

    assert!(service.delete(remove.id).unwrap());
    assert!(service.get(remove.id).is_none());
    assert!(service.get(keep.id).is_some());

    // Deleting again is a reported no-op.
    assert!(!service.delete(remove.id).unwrap());
}

#[test]
fn filter_through_service_combines_predicates() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn);

    let mut work = TaskDraft::new("Quarterly report");
    work.category = Category::Work;
    work.priority = Priority::High;
    service.create(work).unwrap();

    let mut errand = TaskDraft::new("Report lost card");
    errand.priority = Priority::High;
    service.create(errand).unwrap();

    service.create(TaskDraft::new("Water plants")).unwrap();

    let filter = TaskFilter {
        priority: Some(Priority::High),
        search: Some("report".to_string()),
        ..TaskFilter::default()
    };
    let hits = service.filter(&filter);
    assert_eq!(hits.len(), 2);

    let narrowed = TaskFilter {
        category: Some(Category::Work),
        ..filter
    };
    let hits = service.filter(&narrowed);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Quarterly report");
}

#[test]
fn stats_count_lifecycle_and_priority_buckets() {
    let conn = open_db_in_memory().unwrap();
    let mut service = service(&conn);

    let mut urgent = TaskDraft::new("pay invoice");
    urgent.priority = Priority::High;
    service.create(urgent).unwrap();

    let mut done = TaskDraft::new("done already");
    done.status = Status::Completed;
    done.priority = Priority::High;
    service.create(done).unwrap();

    service.create(TaskDraft::new("someday")).unwrap();

    let stats = service.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.high_priority_open, 1);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteTaskRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_kv_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("kv_store"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE kv_store (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "kv_store",
            column: "updated_at"
        })
    ));
}
