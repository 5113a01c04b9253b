use genomerx_core::{
    direct_thread_id, Account, ChatError, ChatRepository, ChatService, MemoryStateStore, Role,
    BROADCAST_CHANNEL_ID,
};

fn chat() -> ChatService<MemoryStateStore> {
    let repo = ChatRepository::load(MemoryStateStore::new()).expect("chat repo load");
    ChatService::new(repo)
}

fn account(email: &str, name: &str, role: Role) -> Account {
    Account::new(name, email, "secret1", role)
}

#[test]
fn broadcast_channel_exists_without_registration() {
    let mut chat = chat();
    let lab = account("lab1@x.com", "Lab One", Role::LabStaff);

    let message = chat
        .post(BROADCAST_CHANNEL_ID, "shift handover at 6", &lab, 1_000)
        .expect("post to broadcast");
    assert_eq!(message.channel_id, BROADCAST_CHANNEL_ID);
    assert_eq!(chat.thread(BROADCAST_CHANNEL_ID).len(), 1);
}

#[test]
fn both_participants_resolve_the_same_direct_thread() {
    let mut chat = chat();
    let a = account("a@x.com", "Aicha", Role::Doctor);
    let b = account("b@x.com", "Bram", Role::Researcher);

    let opened_by_a = chat.open_direct(&a, &b).expect("a opens the thread");
    let opened_by_b = chat.open_direct(&b, &a).expect("b opens the thread");
    assert_eq!(opened_by_a, opened_by_b);
    assert_eq!(opened_by_a, direct_thread_id("B@X.com", "a@x.com"));

    chat.post(&opened_by_a, "results are in", &a, 1_000)
        .expect("a posts");
    chat.post(&opened_by_b, "on my way", &b, 2_000).expect("b posts");

    let thread_for_a = chat.thread(&opened_by_a);
    let thread_for_b = chat.thread(&opened_by_b);
    assert_eq!(thread_for_a, thread_for_b);
    assert_eq!(thread_for_a.len(), 2);
    assert_eq!(thread_for_a[0].text, "results are in");
}

#[test]
fn posting_blank_text_or_into_an_unknown_channel_fails() {
    let mut chat = chat();
    let a = account("a@x.com", "Aicha", Role::Doctor);

    let err = chat
        .post(BROADCAST_CHANNEL_ID, "   \n ", &a, 0)
        .expect_err("blank message must fail");
    assert!(matches!(err, ChatError::EmptyMessage));

    let err = chat
        .post("dm:ghost@x.com|other@x.com", "hello?", &a, 0)
        .expect_err("unregistered channel must fail");
    assert!(matches!(err, ChatError::UnknownChannel(_)));
}

#[test]
fn threads_sort_ascending_with_insertion_order_on_ties() {
    let mut chat = chat();
    let a = account("a@x.com", "Aicha", Role::Doctor);
    let b = account("b@x.com", "Bram", Role::Researcher);
    let thread_id = chat.open_direct(&a, &b).expect("open thread");

    chat.post(&thread_id, "late", &a, 5_000).expect("post");
    chat.post(&thread_id, "tie-first", &b, 1_000).expect("post");
    chat.post(&thread_id, "tie-second", &a, 1_000).expect("post");

    let thread = chat.thread(&thread_id);
    let texts: Vec<&str> = thread.iter().map(|message| message.text.as_str()).collect();
    assert_eq!(texts, vec!["tie-first", "tie-second", "late"]);
}

#[test]
fn author_snapshot_is_frozen_at_send_time() {
    let mut chat = chat();
    let mut a = account("a@x.com", "Aicha", Role::Doctor);
    let b = account("b@x.com", "Bram", Role::Researcher);
    let thread_id = chat.open_direct(&a, &b).expect("open thread");

    chat.post(&thread_id, "before rename", &a, 1_000).expect("post");
    a.name = "Dr. Aicha Diallo".to_string();
    chat.post(&thread_id, "after rename", &a, 2_000).expect("post");

    let thread = chat.thread(&thread_id);
    assert_eq!(thread[0].user.name, "Aicha");
    assert_eq!(thread[1].user.name, "Dr. Aicha Diallo");
    assert_eq!(thread[0].user.role, Role::Doctor);
}

#[test]
fn direct_messages_do_not_leak_into_broadcast() {
    let mut chat = chat();
    let a = account("a@x.com", "Aicha", Role::Doctor);
    let b = account("b@x.com", "Bram", Role::Researcher);
    let thread_id = chat.open_direct(&a, &b).expect("open thread");

    chat.post(&thread_id, "private", &a, 1_000).expect("post dm");
    chat.post(BROADCAST_CHANNEL_ID, "public", &a, 1_000)
        .expect("post broadcast");

    assert_eq!(chat.thread(BROADCAST_CHANNEL_ID).len(), 1);
    assert_eq!(chat.thread(&thread_id).len(), 1);
}
