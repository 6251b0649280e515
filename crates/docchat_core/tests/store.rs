use docchat_core::{MessageBody, MessageStore, Role, CLEARED_NOTICE};

#[test]
fn append_preserves_order_and_allocates_monotonic_ids() {
    let mut store = MessageStore::new();

    let first = store.append(Role::User, MessageBody::Text("one".to_string()), Vec::new());
    let second = store.append(Role::Bot, MessageBody::Text("two".to_string()), Vec::new());
    let third = store.append(Role::Bot, MessageBody::Loading, Vec::new());

    assert!(first < second && second < third);
    let ids: Vec<_> = store.messages().iter().map(|message| message.id).collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[test]
fn remove_is_idempotent() {
    let mut store = MessageStore::new();
    let id = store.append(Role::Bot, MessageBody::Loading, Vec::new());

    store.remove(id);
    assert!(!store.contains(id));

    // Removing again is a no-op.
    store.remove(id);
    assert!(store.messages().is_empty());
}

#[test]
fn clear_always_yields_exactly_one_notice() {
    let mut store = MessageStore::new();
    store.clear();
    assert_eq!(store.messages().len(), 1);

    store.append(Role::User, MessageBody::Text("hello".to_string()), Vec::new());
    store.append(Role::User, MessageBody::Text("again".to_string()), Vec::new());
    store.clear();

    assert_eq!(store.messages().len(), 1);
    let notice = &store.messages()[0];
    assert_eq!(notice.role, Role::Bot);
    assert_eq!(notice.body, MessageBody::Text(CLEARED_NOTICE.to_string()));
}

#[test]
fn ids_stay_unique_across_clear() {
    let mut store = MessageStore::new();
    let before = store.append(Role::User, MessageBody::Text("hi".to_string()), Vec::new());

    store.clear();
    let notice_id = store.messages()[0].id;
    let after = store.append(Role::User, MessageBody::Text("hi again".to_string()), Vec::new());

    assert!(notice_id > before);
    assert!(after > notice_id);
}
