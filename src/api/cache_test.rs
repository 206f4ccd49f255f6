use super::cache::{PageCache, cache_key};

#[test]
fn cache_key_includes_query() {
    assert_eq!(cache_key("/gallery", None), "/gallery");
    assert_eq!(cache_key("/gallery", Some("")), "/gallery");
    assert_eq!(
        cache_key("/gallery", Some("category=coats")),
        "/gallery?category=coats"
    );
}

#[test]
fn invalidate_drops_all_variants_of_a_path() {
    let cache = PageCache::new();
    cache.insert("/gallery".into(), "all".into());
    cache.insert("/gallery?category=coats".into(), "coats".into());
    cache.insert("/fabrics".into(), "fabrics".into());

    assert_eq!(cache.invalidate(&["/gallery"]), 2);
    assert!(cache.get("/gallery").is_none());
    assert!(cache.get("/gallery?category=coats").is_none());
    assert_eq!(cache.get("/fabrics").as_deref(), Some("fabrics"));
}

#[test]
fn invalidate_does_not_match_prefixes() {
    let cache = PageCache::new();
    cache.insert("/".into(), "home".into());
    cache.insert("/about".into(), "about".into());

    assert_eq!(cache.invalidate(&["/"]), 1);
    assert_eq!(cache.len(), 1);
    assert!(cache.get("/about").is_some());
}

#[test]
fn clones_share_storage() {
    let cache = PageCache::new();
    let other = cache.clone();
    other.insert("/".into(), "home".into());
    assert!(!cache.is_empty());
}

#[test]
fn stale_render_is_not_stored_after_invalidation() {
    let cache = PageCache::new();
    let generation = cache.generation("/gallery?category=coats");

    cache.invalidate(&["/gallery"]);

    assert!(!cache.insert_if_current("/gallery?category=coats".into(), "old".into(), generation));
    assert!(cache.get("/gallery?category=coats").is_none());

    let fresh = cache.generation("/gallery?category=coats");
    assert_ne!(fresh, generation);
    assert!(cache.insert_if_current("/gallery?category=coats".into(), "new".into(), fresh));
    assert_eq!(cache.get("/gallery?category=coats").as_deref(), Some("new"));
}

#[test]
fn invalidation_of_other_paths_keeps_generation() {
    let cache = PageCache::new();
    let generation = cache.generation("/");
    cache.invalidate(&["/fabrics"]);
    assert!(cache.insert_if_current("/".into(), "home".into(), generation));
}

#[test]
fn invalidate_counts_removals_during_concurrent_inserts() {
    let cache = PageCache::new();
    let writer = cache.clone();

    let handle = std::thread::spawn(move || {
        for i in 0..5000 {
            writer.insert(format!("/gallery?category={}", i), "page".into());
            writer.insert(format!("/fabrics?category={}", i), "page".into());
        }
    });

    let mut dropped = 0;
    for _ in 0..2000 {
        dropped += cache.invalidate(&["/gallery"]);
    }
    handle.join().unwrap();
    dropped += cache.invalidate(&["/gallery"]);

    assert_eq!(dropped, 5000);
    assert_eq!(cache.len(), 5000);
}
