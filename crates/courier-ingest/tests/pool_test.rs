//! Integration tests for connection pool invariants.
//!
//! Covers the write-once slot cache, random topic selection, and credential
//! handling under concurrent acquisition.

use std::{sync::Arc, thread};

use courier_ingest::{transport::mock::MockConnector, ConnectionPool, Credential, IngestConfig};

fn test_config(pool_size: usize, topics: &str) -> IngestConfig {
    IngestConfig {
        topic_endpoint: "https://bus.test/api/events".to_string(),
        topics: topics.to_string(),
        topic_key: "test-key".to_string(),
        pool_size,
    }
}

#[test]
fn acquire_always_returns_a_connection_for_any_pool_size() {
    for pool_size in [1, 2, 7, 100] {
        let connector = MockConnector::new();
        let pool = ConnectionPool::new(&test_config(pool_size, "t1"), Arc::new(connector.clone()));

        for _ in 0..50 {
            pool.acquire().expect("acquire should always succeed with valid config");
        }

        assert!(pool.populated_slots() >= 1);
        assert!(pool.populated_slots() <= pool_size);
        assert_eq!(connector.connection_count(), pool.populated_slots());
    }
}

#[test]
fn populated_slots_never_empty_again() {
    let connector = MockConnector::new();
    let pool = ConnectionPool::new(&test_config(3, "t1"), Arc::new(connector));

    let mut high_water = 0;
    for _ in 0..300 {
        pool.acquire().expect("acquire should succeed");
        let populated = pool.populated_slots();
        assert!(populated >= high_water, "slot count regressed: {populated} < {high_water}");
        high_water = populated;
    }

    assert_eq!(high_water, 3);
}

#[test]
fn topic_selection_covers_the_whole_table() {
    let pool = ConnectionPool::new(&test_config(2, "t1,t2"), Arc::new(MockConnector::new()));

    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(pool.select_topic().expect("selection should succeed"));
    }

    // Uniform selection over two topics reaches both in 200 draws.
    assert_eq!(seen.len(), 2);
    assert!(seen.contains("t1"));
    assert!(seen.contains("t2"));
}

#[test]
fn credential_rotation_applies_only_to_new_connections() {
    let connector = MockConnector::new();
    let pool = Arc::new(ConnectionPool::new(&test_config(2, "t1"), Arc::new(connector.clone())));

    // Populate every slot under the original key.
    while pool.populated_slots() < 2 {
        pool.acquire().expect("acquire should succeed");
    }
    assert_eq!(connector.last_credential().as_deref(), Some("test-key"));

    pool.refresh_credential(Credential::new("rotated-key"));

    // Cached connections are never rebuilt, so the rotated key is unused
    // until a process restart empties the slots.
    for _ in 0..50 {
        pool.acquire().expect("acquire should succeed");
    }
    assert_eq!(connector.connection_count(), 2);
    assert_eq!(connector.last_credential().as_deref(), Some("test-key"));
}

#[test]
fn concurrent_acquisition_stays_within_slot_bounds() {
    let connector = MockConnector::new();
    let pool = Arc::new(ConnectionPool::new(&test_config(8, "t1"), Arc::new(connector.clone())));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for _ in 0..200 {
                    pool.acquire().expect("acquire should succeed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("acquire thread panicked");
    }

    // Exactly one construction per populated slot, even under contention.
    assert_eq!(connector.connection_count(), pool.populated_slots());
    assert!(connector.connection_count() <= 8);
}
