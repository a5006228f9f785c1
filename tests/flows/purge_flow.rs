//! Purge flow: a context reset drains every pending waiter exactly once
//! and leaves a fresh engine context accepting new lookups.

#[path = "../common/fixtures.rs"]
mod fixtures;

use fixtures::{spawn_pump, start, Capture};
use std::sync::Arc;

#[tokio::test]
async fn test_purge_drains_all_pending_waiters() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    // Three keys with 2 + 3 + 1 waiters.
    for _ in 0..2 {
        coalescer
            .lookup(capture.callback(), "example.com", "A", "IN")
            .unwrap();
    }
    for _ in 0..3 {
        coalescer
            .lookup(capture.callback(), "example.org", "AAAA", "IN")
            .unwrap();
    }
    coalescer
        .lookup(capture.callback(), "example.net", "TXT", "IN")
        .unwrap();
    assert_eq!(coalescer.pending_queries(), 3);

    assert!(coalescer.purge());

    // Exactly sum(waiters) invocations, each with no answer, synchronously.
    let results = capture.results();
    assert_eq!(results.len(), 6);
    assert!(results.iter().all(|r| r.is_none()));
    assert_eq!(coalescer.pending_queries(), 0);
}

#[tokio::test]
async fn test_purge_replaces_the_engine_context() {
    let (coalescer, old_pump) = start();
    let old_engine = coalescer.engine();

    coalescer
        .lookup(Box::new(|_| {}), "example.com", "A", "IN")
        .unwrap();
    assert!(coalescer.purge());

    assert!(!Arc::ptr_eq(&old_engine, &coalescer.engine()));
    assert_eq!(coalescer.engine().issued(), 0);
    old_pump.abort();
}

#[tokio::test]
async fn test_lookups_succeed_after_purge() {
    let (coalescer, old_pump) = start();
    coalescer
        .lookup(Box::new(|_| {}), "example.com", "A", "IN")
        .unwrap();

    assert!(coalescer.purge());
    old_pump.abort();
    let _pump = spawn_pump(&coalescer);

    let capture = Capture::default();
    coalescer
        .lookup(capture.callback(), "example.com", "A", "IN")
        .unwrap();
    coalescer.engine().script_a("example.com", &[[93, 184, 216, 34]]);
    capture.wait_for(1).await;
    assert!(capture.results()[0].is_some());
}

#[tokio::test]
async fn test_repeated_purges_are_safe() {
    let (coalescer, _pump) = start();
    assert!(coalescer.purge());
    assert!(coalescer.purge());
    assert_eq!(coalescer.pending_queries(), 0);
}
