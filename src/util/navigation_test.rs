use super::*;

#[test]
fn location_with_query_omits_empty_search() {
    assert_eq!(location_with_query("/doctor", ""), "/doctor");
    assert_eq!(location_with_query("/doctor", "?"), "/doctor");
}

#[test]
fn location_with_query_accepts_search_with_or_without_marker() {
    assert_eq!(location_with_query("/login", "redirect=/profile"), "/login?redirect=/profile");
    assert_eq!(location_with_query("/login", "?redirect=/profile"), "/login?redirect=/profile");
}

#[test]
fn apply_document_title_is_callable_off_browser() {
    apply_document_title("Home - test");
}

#[test]
fn guard_holds_its_decision_until_the_session_is_loaded() {
    use crate::nav::guard::Decision;
    use crate::util::storage::MemoryStorage;

    let table = RouteTable::default();
    let store = SessionStore::pending(MemoryStorage::new());
    assert_eq!(guard_when_loaded(&table, &store, "/back/dashboard"), None);

    let store = SessionStore::load(MemoryStorage::new());
    let nav = guard_when_loaded(&table, &store, "/back/dashboard").unwrap();
    assert_eq!(nav.decision.href().as_deref(), Some("/login"));
    assert!(matches!(nav.decision, Decision::Redirect(_)));
}

#[test]
fn pending_and_server_sessions_render_the_same_first_frame() {
    use crate::util::storage::{BrowserStorage, MemoryStorage};

    let storage = MemoryStorage::new();
    storage.set_item("token", "tok");
    let client = SessionStore::pending(storage);
    let server = SessionStore::pending(BrowserStorage);
    let table = RouteTable::default();
    assert_eq!(
        guard_when_loaded(&table, &client, "/back/dashboard"),
        guard_when_loaded(&table, &server, "/back/dashboard")
    );
}
