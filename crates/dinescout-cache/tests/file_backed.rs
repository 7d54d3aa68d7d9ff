//! Result cache persisted through `FileStore`.

use chrono::{DateTime, Utc};
use dinescout_cache::{CacheLookup, FileStore, ResultCache};
use dinescout_core::{BoundingBox, Region, Venue, VenueCategory};

fn versailles() -> Region {
    Region::new(
        BoundingBox::from_swne(48.790, 2.110, 48.820, 2.160),
        "Versailles (78)",
    )
}

fn sample_venues() -> Vec<Venue> {
    vec![
        Venue {
            id: "101".to_string(),
            name: "La Flottille".to_string(),
            category: VenueCategory::Restaurant,
            cuisine: None,
            rating: 4.6,
            lat: Some(48.81),
            lon: Some(2.11),
        },
        Venue {
            id: "102".to_string(),
            name: "Le Bistrot du Parc".to_string(),
            category: VenueCategory::Bar,
            cuisine: Some("wine".to_string()),
            rating: 3.9,
            lat: None,
            lon: None,
        },
    ]
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("valid timestamp")
}

#[test]
fn entries_persist_across_cache_instances() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let cache = ResultCache::new(FileStore::open(dir.path()).expect("open store"));
        cache.put_at(&versailles(), &sample_venues(), at(1_700_000_000));
    }

    let cache = ResultCache::new(FileStore::open(dir.path()).expect("reopen store"));
    let lookup = cache.get_at(&versailles(), at(1_700_000_000 + 3600));
    assert_eq!(lookup, CacheLookup::Hit(sample_venues()));
}

#[test]
fn ratings_are_stable_across_reads() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = ResultCache::new(FileStore::open(dir.path()).expect("open store"));
    cache.put_at(&versailles(), &sample_venues(), at(0));

    let first = cache.get_at(&versailles(), at(10)).into_hit().expect("hit");
    let second = cache.get_at(&versailles(), at(20)).into_hit().expect("hit");
    let ratings = |v: &[Venue]| v.iter().map(|x| x.rating).collect::<Vec<_>>();
    assert_eq!(ratings(&first), ratings(&second));
    assert_eq!(ratings(&first), vec![4.6, 3.9]);
}

#[test]
fn expired_file_entry_is_a_miss() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = ResultCache::new(FileStore::open(dir.path()).expect("open store"));
    cache.put_at(&versailles(), &sample_venues(), at(0));
    assert_eq!(
        cache.get_at(&versailles(), at(25 * 3600)),
        CacheLookup::Miss
    );
}
