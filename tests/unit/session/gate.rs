use super::*;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, mpsc};
use std::thread;

#[test]
fn idle_gate_runs_immediately() {
    let gate = SingleFlight::new();
    let mut seen = Vec::new();
    assert_eq!(gate.run(7, |r| seen.push(r)), GateOutcome::Ran(1));
    assert_eq!(seen, vec![7]);
    assert!(!gate.is_in_flight());
}

#[test]
fn only_the_latest_pending_request_runs() {
    let gate = Arc::new(SingleFlight::new());
    let ran = Arc::new(Mutex::new(Vec::new()));
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let worker = {
        let gate = Arc::clone(&gate);
        let ran = Arc::clone(&ran);
        thread::spawn(move || {
            gate.run(1, |r| {
                ran.lock().unwrap().push(r);
                if r == 1 {
                    started_tx.send(()).unwrap();
                    release_rx.recv().unwrap();
                }
            })
        })
    };

    started_rx.recv().unwrap();
    assert!(gate.is_in_flight());
    assert_eq!(gate.run(2, |_| panic!("must not run inline")), GateOutcome::Queued);
    assert_eq!(gate.run(3, |_| panic!("must not run inline")), GateOutcome::Queued);
    assert!(gate.has_pending());
    release_tx.send(()).unwrap();

    assert_eq!(worker.join().unwrap(), GateOutcome::Ran(2));
    assert_eq!(*ran.lock().unwrap(), vec![1, 3]);
    assert_eq!(gate.dropped(), 1);
    assert!(!gate.is_in_flight());
}

#[test]
fn panicking_job_does_not_wedge_the_gate() {
    let gate = SingleFlight::new();
    let result = catch_unwind(AssertUnwindSafe(|| gate.run(1, |_| panic!("boom"))));
    assert!(result.is_err());
    assert!(!gate.is_in_flight());
    assert_eq!(gate.run(2, |_| {}), GateOutcome::Ran(1));
}

#[test]
fn closed_gate_discards_requests() {
    let gate = SingleFlight::new();
    gate.close();
    assert!(gate.is_closed());
    assert_eq!(gate.run(1, |_| panic!("closed")), GateOutcome::Closed);
}
