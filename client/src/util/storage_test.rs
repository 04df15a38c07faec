use super::*;
use serde::Deserialize;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Sample {
    name: String,
    count: u32,
}

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert!(store.get("k").is_none());
    store.set("k", "v");
    assert_eq!(store.get("k").as_deref(), Some("v"));
    store.remove("k");
    assert!(store.get("k").is_none());
    assert!(store.is_empty());
}

#[test]
fn memory_store_clones_share_entries() {
    let a = MemoryStore::new();
    let b = a.clone();
    a.set("theme", "dark");
    assert_eq!(b.get("theme").as_deref(), Some("dark"));
    assert_eq!(b.len(), 1);
}

#[test]
fn json_helpers_round_trip_through_store() {
    let store = MemoryStore::new();
    save_json(&store, "sample", &Sample { name: "a".into(), count: 2 });
    let loaded: Option<Sample> = load_json(&store, "sample");
    assert_eq!(loaded, Some(Sample { name: "a".into(), count: 2 }));
}

#[test]
fn load_json_treats_corrupt_entry_as_missing() {
    let store = MemoryStore::new();
    store.set("sample", "{not json");
    assert!(load_json::<Sample, _>(&store, "sample").is_none());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn local_store_is_inert_off_browser() {
    let store = LocalStore;
    store.set("k", "v");
    assert!(store.get("k").is_none());
    store.remove("k");
}
