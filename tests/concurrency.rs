//! A request slot driven by a control path and a safety interrupt at once.

use chrono::Utc;
use movement_authority::{
    LifecycleBuilder, LifecycleError, Operation, RequestLifecycle, RequestStatus,
    SharedLifecycle, TrackDirection, TransitionRecord,
};
use parking_lot::Mutex;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

fn moving_slot() -> SharedLifecycle {
    let slot = SharedLifecycle::default();
    slot.submit(TrackDirection::One).unwrap();
    slot.begin().unwrap();
    slot
}

#[test]
fn finish_and_emergency_stop_race_to_one_outcome() {
    for _ in 0..200 {
        let slot = moving_slot();
        let barrier = Arc::new(Barrier::new(2));

        let control = {
            let slot = slot.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                slot.finish()
            })
        };
        let interrupt = {
            let slot = slot.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                slot.emergency_stop()
            })
        };

        let finished = control.join().unwrap();
        let stopped = interrupt.join().unwrap();

        match slot.current_status() {
            RequestStatus::Complete => {
                assert_eq!(finished, Ok(RequestStatus::Complete));
                assert_eq!(
                    stopped,
                    Err(LifecycleError::InvalidTransition {
                        status: RequestStatus::Complete,
                        operation: Operation::EmergencyStop,
                    })
                );
            }
            RequestStatus::EmergencyStop => {
                assert_eq!(stopped, Ok(RequestStatus::EmergencyStop));
                assert!(finished.is_err());
                assert!(slot.read(|l| !l.history().entered(RequestStatus::Complete)));
            }
            other => panic!("unexpected final status {other}"),
        }
    }
}

#[test]
fn concurrent_attempts_serialize_into_history() {
    let applied = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&applied);
    let slot = LifecycleBuilder::new()
        .unbounded_history()
        .observer(move |record: &TransitionRecord| sink.lock().push(record.clone()))
        .build_shared()
        .unwrap();

    let plans: Vec<Vec<Operation>> = vec![
        vec![Operation::Submit, Operation::Begin, Operation::Finish, Operation::Reset],
        vec![Operation::Submit, Operation::EmergencyStop, Operation::Reset],
        vec![Operation::Begin, Operation::Finish, Operation::Submit],
        vec![Operation::EmergencyStop, Operation::Reset, Operation::Submit],
    ];

    let barrier = Arc::new(Barrier::new(plans.len()));
    let handles: Vec<_> = plans
        .into_iter()
        .map(|plan| {
            let slot = slot.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut outcomes = Vec::new();
                for _ in 0..50 {
                    for op in &plan {
                        outcomes.push((*op, slot.apply(*op, &TrackDirection::Two)));
                    }
                }
                outcomes
            })
        })
        .collect();

    let outcomes: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    let records = applied.lock().clone();
    let history = slot.read(|l| l.history().clone());
    assert_eq!(history.transitions(), records.as_slice());

    // Every non-idempotent success left exactly one record.
    for op in [
        Operation::Submit,
        Operation::Begin,
        Operation::Finish,
        Operation::Reset,
    ] {
        let succeeded = outcomes
            .iter()
            .filter(|(o, result)| *o == op && result.is_ok())
            .count();
        let recorded = records.iter().filter(|r| r.operation == op).count();
        assert_eq!(succeeded, recorded, "{op}");
    }

    // The records replay serially on a fresh slot to the same final status.
    let mut replay = RequestLifecycle::new();
    for record in &records {
        assert_eq!(replay.current_status(), record.from);
        assert_eq!(
            replay.apply(record.operation, &record.direction),
            Ok(record.to)
        );
    }
    assert_eq!(replay.current_status(), slot.current_status());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn interrupt_task_stops_a_moving_train() {
    let slot = moving_slot();
    let interrupt = slot.clone();

    let stopped = tokio::spawn(async move { interrupt.emergency_stop() })
        .await
        .unwrap();

    assert_eq!(stopped, Ok(RequestStatus::EmergencyStop));
    assert_eq!(
        slot.finish(),
        Err(LifecycleError::InvalidTransition {
            status: RequestStatus::EmergencyStop,
            operation: Operation::Finish,
        })
    );
    assert_eq!(slot.reset(), Ok(RequestStatus::None));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn deadline_watchdog_aborts_overdue_movement() {
    let slot = moving_slot();
    let watched = slot.clone();
    let deadline = Duration::from_millis(30);

    let watchdog = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(5)).await;
            let overdue = watched.read(|l| {
                l.is_active()
                    && l
                        .time_in_status(Utc::now())
                        .is_some_and(|elapsed| elapsed >= deadline)
            });
            if overdue {
                return watched.emergency_stop();
            }
        }
    });

    let result = tokio::time::timeout(Duration::from_secs(5), watchdog)
        .await
        .expect("watchdog fired before timeout")
        .unwrap();

    assert_eq!(result, Ok(RequestStatus::EmergencyStop));
    let since = slot.read(|l| l.history().transitions()[1].timestamp);
    let stopped_at = slot.read(|l| l.status_since()).unwrap();
    assert!(stopped_at.signed_duration_since(since) >= chrono::Duration::milliseconds(30));
}
