//! End-to-end flows through coalescer, scripted engine, pump and decorator:
//! plain, secure and bogus resolutions as a caller observes them.

#[path = "../common/fixtures.rs"]
mod fixtures;

use fixtures::{start, Capture};
use funnel_dns_domain::{Question, RawAnswer, ResponseCode};
use std::net::Ipv4Addr;

#[tokio::test]
async fn test_plain_a_lookup() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    coalescer
        .lookup(capture.callback(), "example.com", "A", "IN")
        .unwrap();
    coalescer.engine().script_a("example.com", &[[93, 184, 216, 34]]);
    capture.wait_for(1).await;

    let results = capture.results();
    let answer = results[0].as_ref().unwrap();
    assert_eq!(answer.status, ResponseCode::NoError);
    assert!(!answer.secure);
    assert!(answer.bogus.is_none());
    assert_eq!(answer.records().len(), 1);
    assert_eq!(
        answer.records()[0].a(),
        Some(Ipv4Addr::new(93, 184, 216, 34))
    );
}

#[tokio::test]
async fn test_rendering_is_stable_and_formatted() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    coalescer
        .lookup(capture.callback(), "example.com", "A", "IN")
        .unwrap();
    coalescer.engine().script_a("example.com", &[[93, 184, 216, 34]]);
    capture.wait_for(1).await;

    let results = capture.results();
    let answer = results[0].as_ref().unwrap();
    let text = answer.text().to_string();
    assert_eq!(text, "Status: NOERROR\nexample.com\tIN\tA\t93.184.216.34");
    assert_eq!(answer.text(), text);
}

#[tokio::test]
async fn test_secure_lookup() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    let question = Question::new("example.com", "A", "IN").unwrap();
    coalescer.engine().script(
        question,
        RawAnswer::new("example.com", 1, 1, 0)
            .with_record([93, 184, 216, 34])
            .secure(),
    );
    coalescer
        .lookup(capture.callback(), "example.com", "A", "IN")
        .unwrap();
    capture.wait_for(1).await;

    let results = capture.results();
    let answer = results[0].as_ref().unwrap();
    assert!(answer.secure);
    assert!(answer.bogus.is_none());
    assert_eq!(answer.text(), "Status: NOERROR, Secure\nexample.com\tIN\tA\t93.184.216.34");
}

#[tokio::test]
async fn test_bogus_lookup_discards_records() {
    let (coalescer, _pump) = start();
    let capture = Capture::default();

    let question = Question::new("dnssec-failed.org", "A", "IN").unwrap();
    coalescer.engine().script(
        question,
        RawAnswer::new("dnssec-failed.org", 1, 1, 2)
            .with_record([198, 51, 100, 9])
            .with_record([198, 51, 100, 10])
            .bogus("validation failure: signature expired"),
    );
    coalescer
        .lookup(capture.callback(), "dnssec-failed.org", "A", "IN")
        .unwrap();
    capture.wait_for(1).await;

    let results = capture.results();
    let answer = results[0].as_ref().unwrap();
    assert_eq!(
        answer.bogus.as_deref(),
        Some("validation failure: signature expired")
    );
    assert!(answer.records().is_empty());
    assert!(!answer.secure);
    assert_eq!(
        answer.text(),
        "Status: SERVFAIL, Bogus: validation failure: signature expired"
    );
}
