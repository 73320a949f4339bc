use std::{sync::Mutex, time::Duration};

use simplifier::{RuleTree, Simplifiable, Simplifier};

#[derive(Clone, Debug, Default, PartialEq)]
struct Timestamp(u64);

#[derive(Clone, Debug, PartialEq)]
struct Host(String);

#[derive(Simplifiable)]
struct Job {
    #[simplify(opaque, keep)]
    host: Host,
    name: String,
    #[simplify(opaque, rename = "Timeout")]
    timeout: Duration,
    #[simplify(opaque)]
    started: Timestamp,
    #[simplify(skip)]
    lock: Mutex<u32>,
}

fn main() {
    let simplifier = Simplifier::new(RuleTree::new().remove("Timeout"));
    let simplifier = simplifier.extend(&RuleTree::new().remove("host"));
    let job = Job {
        host: Host("worker-1".into()),
        name: "nightly".into(),
        timeout: Duration::from_secs(30),
        started: Timestamp(1),
        lock: Mutex::new(7),
    };
    let simplified = simplifier.simplify(&job);
    assert_eq!(simplified.timeout, Duration::ZERO);
    assert_eq!(simplified.started, Timestamp(1));
    assert_eq!(*simplified.lock.lock().unwrap(), 0);
    assert_eq!(simplified.name, "nightly");
    assert_eq!(simplified.host, Host("worker-1".into()));
}
