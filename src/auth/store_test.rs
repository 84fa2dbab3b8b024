use super::*;

use std::cell::RefCell;
use std::rc::Rc;

fn alice() -> User {
    User { username: "alice".to_owned(), ..User::with_id("u1") }
}

fn counting_listener(store: &AuthStore) -> (Rc<Cell<u32>>, ListenerId) {
    let calls = Rc::new(Cell::new(0));
    let sink = Rc::clone(&calls);
    let id = store.on_change(Box::new(move || sink.set(sink.get() + 1)));
    (calls, id)
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn new_store_is_signed_out() {
    let store = AuthStore::new();
    assert!(store.token().is_empty());
    assert!(store.model().is_none());
    assert!(!store.is_authenticated());
    assert_eq!(store.config(), &SessionConfig::default());
}

// =============================================================
// save / clear
// =============================================================

#[test]
fn save_sets_token_and_model() {
    let store = AuthStore::new();
    store.save("tok", Some(alice()));
    assert_eq!(store.token(), "tok");
    assert_eq!(store.model(), Some(alice()));
    assert!(store.is_authenticated());
}

#[test]
fn token_without_model_is_not_authenticated() {
    let store = AuthStore::new();
    store.save("tok", None);
    assert!(!store.is_authenticated());
}

#[test]
fn clear_signs_out() {
    let store = AuthStore::new();
    store.save("tok", Some(alice()));
    store.clear();
    assert!(store.token().is_empty());
    assert!(store.model().is_none());
}

#[test]
fn save_and_clear_fire_each_listener_once() {
    let store = AuthStore::new();
    let (calls, _) = counting_listener(&store);
    store.save("tok", Some(alice()));
    assert_eq!(calls.get(), 1);
    store.clear();
    assert_eq!(calls.get(), 2);
}

#[test]
fn listener_sees_new_model() {
    let store = Rc::new(AuthStore::new());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let reader = Rc::downgrade(&store);
    let sink = Rc::clone(&seen);
    store.on_change(Box::new(move || {
        if let Some(store) = reader.upgrade() {
            sink.borrow_mut().push(store.model().map(|u| u.id));
        }
    }));

    store.save("tok", Some(alice()));
    store.clear();
    assert_eq!(*seen.borrow(), vec![Some("u1".to_owned()), None]);
}

#[test]
fn listeners_fire_in_registration_order() {
    let store = AuthStore::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for name in ["first", "second", "third"] {
        let order = Rc::clone(&order);
        store.on_change(Box::new(move || order.borrow_mut().push(name)));
    }
    store.clear();
    assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn removed_listener_does_not_fire() {
    let store = AuthStore::new();
    let (calls, id) = counting_listener(&store);
    assert!(store.remove_listener(id));
    assert!(!store.remove_listener(id));
    store.clear();
    assert_eq!(calls.get(), 0);
    assert_eq!(store.listener_count(), 0);
}

// =============================================================
// Snapshots
// =============================================================

#[test]
fn export_then_load_restores_session() {
    let source = AuthStore::new();
    source.save("tok", Some(alice()));
    let json = source.export_snapshot().unwrap();

    let target = AuthStore::new();
    let (calls, _) = counting_listener(&target);
    target.load_snapshot(&json).unwrap();
    assert_eq!(target.snapshot(), source.snapshot());
    assert_eq!(calls.get(), 1);
}

#[test]
fn load_accepts_pocketbase_shape() {
    let store = AuthStore::new();
    store
        .load_snapshot(r#"{"token":"abc","model":{"id":"u1","username":"alice","collectionName":"users"}}"#)
        .unwrap();
    assert_eq!(store.token(), "abc");
    assert_eq!(store.model().map(|u| u.username), Some("alice".to_owned()));
}

#[test]
fn load_with_null_model_signs_out() {
    let store = AuthStore::new();
    store.save("tok", Some(alice()));
    store.load_snapshot(r#"{"token":"","model":null}"#).unwrap();
    assert!(store.model().is_none());
}

#[test]
fn malformed_snapshot_leaves_state_untouched() {
    let store = AuthStore::new();
    store.save("tok", Some(alice()));
    let (calls, _) = counting_listener(&store);

    let err = store.load_snapshot("{not json").unwrap_err();
    assert!(matches!(err, AuthStoreError::Decode(_)));
    assert!(err.to_string().starts_with("malformed auth snapshot"));
    assert_eq!(store.token(), "tok");
    assert_eq!(store.model(), Some(alice()));
    assert_eq!(calls.get(), 0);
}

// =============================================================
// Storage (thread-local map standing in for localStorage)
// =============================================================

fn stored(key: &str) -> Option<AuthSnapshot> {
    storage::memory::read(key).map(|json| serde_json::from_str(&json).unwrap())
}

#[test]
fn local_store_with_empty_storage_starts_signed_out() {
    let store = AuthStore::local(SessionConfig::default().with_storage_key("empty_auth"));
    assert!(store.model().is_none());
    assert_eq!(store.config().storage_key, "empty_auth");
}

#[test]
fn memory_store_never_touches_storage() {
    let store = AuthStore::with_config(SessionConfig::default().with_storage_key("memory_only"));
    store.save("tok", Some(alice()));
    assert!(stored("memory_only").is_none());
}

#[test]
fn local_store_persists_save_and_clear() {
    let store = AuthStore::local(SessionConfig::default().with_storage_key("save_clear"));
    let (calls, _) = counting_listener(&store);

    store.save("tok", Some(alice()));
    assert_eq!(calls.get(), 1);
    assert_eq!(stored("save_clear"), Some(store.snapshot()));

    store.clear();
    assert!(stored("save_clear").is_none());
}

#[test]
fn local_store_persists_loaded_snapshot() {
    let store = AuthStore::local(SessionConfig::default().with_storage_key("caller_load"));
    store.save("old", Some(alice()));
    store.load_snapshot(r#"{"token":"new","model":{"id":"u2"}}"#).unwrap();

    let persisted = stored("caller_load").unwrap();
    assert_eq!(persisted.token, "new");
    assert_eq!(persisted.model, Some(User::with_id("u2")));
}

#[test]
fn failed_load_keeps_persisted_snapshot() {
    let store = AuthStore::local(SessionConfig::default().with_storage_key("bad_load"));
    store.save("tok", Some(alice()));
    assert!(store.load_snapshot("[]").is_err());
    assert_eq!(stored("bad_load").map(|s| s.token), Some("tok".to_owned()));
}

#[test]
fn local_store_restores_previous_session() {
    let config = SessionConfig::default().with_storage_key("restore_auth");
    AuthStore::local(config.clone()).save("tok", Some(alice()));

    let reopened = AuthStore::local(config);
    assert_eq!(reopened.token(), "tok");
    assert_eq!(reopened.model(), Some(alice()));
}

#[test]
fn malformed_stored_snapshot_starts_signed_out() {
    storage::memory::write("corrupt_auth", "{oops");
    let store = AuthStore::local(SessionConfig::default().with_storage_key("corrupt_auth"));
    assert!(store.model().is_none());
    assert!(matches!(store.restore(), Err(AuthStoreError::Decode(_))));
}
