//! Coalescing flow: duplicate concurrent lookups share one engine
//! resolution and all receive the same decorated answer.

#[path = "../common/fixtures.rs"]
mod fixtures;

use fixtures::{start, Capture};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_duplicate_lookups_share_one_resolution() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    for _ in 0..5 {
        coalescer
            .lookup(capture.callback(), "example.com", "A", "IN")
            .unwrap();
    }
    assert_eq!(coalescer.engine().issued(), 1);
    assert_eq!(coalescer.pending_queries(), 1);

    coalescer.engine().script_a("example.com", &[[93, 184, 216, 34]]);
    capture.wait_for(5).await;

    let results = capture.results();
    let first = results[0].as_ref().unwrap();
    assert!(results
        .iter()
        .all(|r| Arc::ptr_eq(first, r.as_ref().unwrap())));
    assert_eq!(coalescer.pending_queries(), 0);
}

#[tokio::test]
async fn test_distinct_questions_resolve_independently() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    coalescer
        .lookup(capture.callback(), "example.com", "A", "IN")
        .unwrap();
    coalescer
        .lookup(capture.callback(), "example.org", "A", "IN")
        .unwrap();
    assert_eq!(coalescer.engine().issued(), 2);

    coalescer.engine().script_a("example.org", &[[203, 0, 113, 7]]);
    capture.wait_for(1).await;
    assert_eq!(coalescer.pending_queries(), 1);

    coalescer.engine().script_a("example.com", &[[93, 184, 216, 34]]);
    capture.wait_for(2).await;
    assert_eq!(coalescer.pending_queries(), 0);
}

#[tokio::test]
async fn test_callbacks_fire_in_submission_order() {
    let (coalescer, _pump) = start();
    let order = Arc::new(Mutex::new(Vec::new()));

    for i in 0..4 {
        let order = Arc::clone(&order);
        coalescer
            .lookup(
                Box::new(move |_| order.lock().unwrap().push(i)),
                "example.com",
                "A",
                "IN",
            )
            .unwrap();
    }

    coalescer.engine().script_a("example.com", &[[93, 184, 216, 34]]);
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(2);
    while order.lock().unwrap().len() < 4 {
        assert!(tokio::time::Instant::now() < deadline, "delivery timed out");
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_invalid_lookup_fails_without_touching_the_engine() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    assert!(coalescer
        .lookup(capture.callback(), "a..b", "A", "IN")
        .is_err());
    assert!(coalescer
        .lookup(capture.callback(), "", "A", "IN")
        .is_err());

    // Callbacks already completed synchronously, with no answer.
    let results = capture.results();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.is_none()));
    assert_eq!(coalescer.engine().issued(), 0);
    assert_eq!(coalescer.pending_queries(), 0);
}
