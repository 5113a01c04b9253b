use genomerx_core::db::{migrations, open_db, open_db_in_memory};
use genomerx_core::{
    Account, Calendar, ChatRepository, ChatService, EventDraft, EventRepository, MemoryStateStore,
    Role, SqliteStateStore, TaskBoard, TaskDraft, TaskListQuery, TaskPriority, TaskRepository,
};

fn account(email: &str, role: Role) -> Account {
    Account::new("Test", email, "secret1", role)
}

fn chrono_date(value: &str) -> chrono::NaiveDate {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid test date")
}

#[test]
fn tasks_events_and_chat_round_trip_through_the_sqlite_store() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("genomerx.sqlite3");
    let admin = account("admin@x.com", Role::Admin);
    let doctor = account("doctor@x.com", Role::Doctor);

    let (tasks_before, events_before, thread_before) = {
        let conn = open_db(&db_path).expect("open db");
        let store = SqliteStateStore::new(&conn);

        let mut board =
            TaskBoard::new(TaskRepository::load(SqliteStateStore::new(&conn)).expect("tasks"));
        board
            .create(
                &admin,
                TaskDraft {
                    title: "Sequence QC".to_string(),
                    description: "run the QC pipeline".to_string(),
                    assignee: "lab1@x.com".to_string(),
                    priority: TaskPriority::High,
                    due: Some(chrono_date("2025-03-01")),
                },
                1_000,
            )
            .expect("create task");

        let mut calendar =
            Calendar::new(EventRepository::load(SqliteStateStore::new(&conn)).expect("events"));
        calendar
            .create(
                &doctor,
                EventDraft {
                    title: "Tumor board".to_string(),
                    date: chrono_date("2025-03-10"),
                    time_start: "09:00".to_string(),
                    time_end: "10:00".to_string(),
                    location: "Ward 3".to_string(),
                    attendees: vec!["doctor@x.com".to_string(), "admin@x.com".to_string()],
                    description: String::new(),
                },
                2_000,
            )
            .expect("create event");

        let mut chat = ChatService::new(ChatRepository::load(store).expect("chat"));
        let thread_id = chat.open_direct(&admin, &doctor).expect("open thread");
        chat.post(&thread_id, "first", &admin, 1_000).expect("post");
        chat.post(&thread_id, "second", &doctor, 2_000).expect("post");

        let board_view = board.list(&admin, &TaskListQuery::default());
        let calendar_view = calendar.list(&doctor).expect("list events");
        let thread_view = chat.thread(&thread_id);
        (board_view, calendar_view, thread_view)
    };

    // A fresh process over the same file observes structurally equal state.
    let conn = open_db(&db_path).expect("reopen db");
    let board = TaskBoard::new(TaskRepository::load(SqliteStateStore::new(&conn)).expect("tasks"));
    let calendar =
        Calendar::new(EventRepository::load(SqliteStateStore::new(&conn)).expect("events"));
    let chat = ChatService::new(ChatRepository::load(SqliteStateStore::new(&conn)).expect("chat"));

    assert_eq!(board.list(&admin, &TaskListQuery::default()), tasks_before);
    assert_eq!(calendar.list(&doctor).expect("list events"), events_before);
    let thread_id = genomerx_core::direct_thread_id("admin@x.com", "doctor@x.com");
    assert_eq!(chat.thread(&thread_id), thread_before);
}

#[test]
fn malformed_payloads_degrade_to_the_empty_default() {
    let store = MemoryStateStore::new();
    store.put_raw("grx_tasks", "{not json");
    store.put_raw("grx_chat", "[\"wrong shape\"]");

    let board = TaskBoard::new(TaskRepository::load(store.clone()).expect("tasks load"));
    assert!(board
        .list(&account("admin@x.com", Role::Admin), &TaskListQuery::default())
        .is_empty());

    let chat = ChatService::new(ChatRepository::load(store).expect("chat load"));
    assert!(chat.thread(genomerx_core::BROADCAST_CHANNEL_ID).is_empty());
}

#[test]
fn a_failed_write_keeps_the_last_known_good_state() {
    // The repository serializes the replacement collection before swapping;
    // this exercises the read path staying whole after a bad payload lands
    // behind its back.
    let store = MemoryStateStore::new();
    let mut board = TaskBoard::new(TaskRepository::load(store.clone()).expect("tasks load"));
    let admin = account("admin@x.com", Role::Admin);
    board
        .create(
            &admin,
            TaskDraft {
                title: "Sequence QC".to_string(),
                description: String::new(),
                assignee: "lab1@x.com".to_string(),
                priority: TaskPriority::Medium,
                due: None,
            },
            0,
        )
        .expect("create");

    store.put_raw("grx_tasks", "{corrupted later");
    // The in-memory collection is authoritative for this session.
    assert_eq!(board.list(&admin, &TaskListQuery::default()).len(), 1);
}

#[test]
fn migrations_reject_a_newer_schema_version() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let future = migrations::latest_version() + 1;
    conn.execute_batch(&format!("PRAGMA user_version = {future};"))
        .expect("bump user_version");

    let mut conn = conn;
    let err = migrations::apply_migrations(&mut conn).expect_err("newer schema must be rejected");
    assert!(err.to_string().contains("newer than supported"));
}

#[test]
fn open_db_is_idempotent_over_an_existing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("genomerx.sqlite3");
    drop(open_db(&db_path).expect("first open"));

    let conn = open_db(&db_path).expect("second open");
    let version = conn
        .query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .expect("user_version");
    assert_eq!(version, migrations::latest_version());
}
