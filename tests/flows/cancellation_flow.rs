//! Cancellation flow: withdrawing one caller's interest never disturbs
//! siblings coalesced onto the same question.

#[path = "../common/fixtures.rs"]
mod fixtures;

use fixtures::{start, Capture};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_cancelled_waiter_is_skipped_on_delivery() {
    let (coalescer, _pump) = start();
    let order = Arc::new(Mutex::new(Vec::new()));

    let mut tokens = Vec::new();
    for i in 0..3 {
        let order = Arc::clone(&order);
        tokens.push(
            coalescer
                .lookup(
                    Box::new(move |_| order.lock().unwrap().push(i)),
                    "example.com",
                    "A",
                    "IN",
                )
                .unwrap(),
        );
    }

    assert!(coalescer.cancel(&tokens[1]));

    coalescer.engine().script_a("example.com", &[[93, 184, 216, 34]]);
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(2);
    while order.lock().unwrap().len() < 2 {
        assert!(tokio::time::Instant::now() < deadline, "delivery timed out");
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    assert_eq!(*order.lock().unwrap(), vec![0, 2]);
}

#[tokio::test]
async fn test_double_cancel_returns_false() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    let token = coalescer
        .lookup(capture.callback(), "example.com", "A", "IN")
        .unwrap();
    let sibling = coalescer
        .lookup(capture.callback(), "example.com", "A", "IN")
        .unwrap();

    assert!(coalescer.cancel(&token));
    assert!(!coalescer.cancel(&token));
    // The sibling is untouched.
    assert_eq!(coalescer.pending_queries(), 1);
    assert!(coalescer.cancel(&sibling));
}

#[tokio::test]
async fn test_last_cancel_tears_down_the_resolution() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    let token = coalescer
        .lookup(capture.callback(), "example.com", "A", "IN")
        .unwrap();
    assert_eq!(coalescer.engine().in_flight(), 1);

    assert!(coalescer.cancel(&token));
    assert_eq!(coalescer.engine().in_flight(), 0);
    assert_eq!(coalescer.pending_queries(), 0);

    // A late script produces nothing: the engine has no queued resolution.
    coalescer.engine().script_a("example.com", &[[93, 184, 216, 34]]);
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(capture.results().is_empty());
}

#[tokio::test]
async fn test_cancel_after_delivery_returns_false() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    let token = coalescer
        .lookup(capture.callback(), "example.com", "A", "IN")
        .unwrap();
    coalescer.engine().script_a("example.com", &[[93, 184, 216, 34]]);
    capture.wait_for(1).await;

    assert!(!coalescer.cancel(&token));
}
