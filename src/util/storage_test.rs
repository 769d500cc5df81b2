use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let store = MemoryStorage::new();
    assert!(store.is_empty());
    store.set_item("token", "abc");
    assert_eq!(store.get_item("token").as_deref(), Some("abc"));
    store.remove_item("token");
    assert_eq!(store.get_item("token"), None);
    assert!(store.is_empty());
}

#[test]
fn memory_storage_clones_share_items() {
    let store = MemoryStorage::new();
    let reloaded = store.clone();
    store.set_item("role", "NURSE");
    assert_eq!(reloaded.get_item("role").as_deref(), Some("NURSE"));
    assert_eq!(reloaded.keys(), vec!["role".to_owned()]);
}

#[test]
fn json_helpers_round_trip_values() {
    let store = MemoryStorage::new();
    save_json(&store, "menus", &vec!["a", "b"]);
    assert_eq!(store.get_item("menus").as_deref(), Some(r#"["a","b"]"#));
    let menus: Option<Vec<String>> = load_json(&store, "menus");
    assert_eq!(menus, Some(vec!["a".to_owned(), "b".to_owned()]));
}

#[test]
fn load_json_treats_malformed_values_as_absent() {
    let store = MemoryStorage::new();
    store.set_item("userInfo", "{not json");
    let value: Option<serde_json::Value> = load_json(&store, "userInfo");
    assert_eq!(value, None);
}

#[test]
fn load_json_of_missing_key_is_none() {
    let store = MemoryStorage::new();
    let value: Option<Vec<String>> = load_json(&store, "menus");
    assert_eq!(value, None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_inert_off_browser() {
    let store = BrowserStorage;
    store.set_item("token", "abc");
    assert_eq!(store.get_item("token"), None);
    store.remove_item("token");
}
