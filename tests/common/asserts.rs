#![allow(dead_code)]

use cors_policy_rs::{Headers, Outcome, RejectionReason};

pub fn assert_allowed(outcome: Outcome) -> Headers {
    match outcome {
        Outcome::Allowed(headers) => headers,
        other => panic!("expected allowed outcome, got {:?}", other),
    }
}

pub fn assert_denied(outcome: Outcome) -> RejectionReason {
    match outcome {
        Outcome::Denied(reason) => reason,
        other => panic!("expected denied outcome, got {:?}", other),
    }
}

pub fn assert_not_cors(outcome: Outcome) {
    assert_eq!(outcome, Outcome::NotCors, "expected request to be ignored");
}
