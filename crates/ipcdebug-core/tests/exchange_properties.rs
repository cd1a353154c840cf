use std::thread;

use ipcdebug_core::{
    ChannelKind, Debugger, DebuggerConfig, Insert, Role, ThreadState, Worker, MAX_EVENTS,
    MAX_THREADS,
};

fn events_for(kind: ChannelKind) -> [&'static str; 2] {
    let [writer, reader] = Worker::pair(kind);
    [writer.event(), reader.event()]
}

#[test]
fn each_run_counts_once_and_logs_twice() {
    for kind in ChannelKind::ALL {
        let debugger = Debugger::new();
        debugger.run(kind);
        debugger.run(kind);

        assert_eq!(debugger.channels().op_count(kind), 2);
        assert_eq!(debugger.event_snapshot().len(), 4);
        for other in ChannelKind::ALL.into_iter().filter(|k| *k != kind) {
            assert_eq!(debugger.channels().op_count(other), 0);
        }
    }
}

#[test]
fn first_run_of_each_kind_terminates_both_workers() {
    let debugger = Debugger::new();
    for kind in ChannelKind::ALL {
        let before = debugger.thread_snapshot().len();
        debugger.run(kind);
        let after = debugger.thread_snapshot();
        assert_eq!(after.len(), before + 2);
        assert!(after[before..]
            .iter()
            .all(|record| record.state == ThreadState::Terminated));
    }

    let ids: Vec<u32> = debugger.thread_snapshot().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn event_order_follows_run_order() {
    let debugger = Debugger::new();
    debugger.run_pipe_exchange();
    debugger.run_queue_exchange();
    debugger.run_shared_memory_exchange();

    let events = debugger.event_snapshot();
    assert_eq!(events.len(), 6);
    for (chunk, kind) in events.chunks(2).zip(ChannelKind::ALL) {
        let mut chunk = chunk.to_vec();
        chunk.sort_unstable();
        let mut expected = events_for(kind).map(str::to_string).to_vec();
        expected.sort_unstable();
        assert_eq!(chunk, expected, "events for {kind} out of place");
    }
}

#[test]
fn receiver_sees_either_empty_or_written_payload() {
    for _ in 0..50 {
        let debugger = Debugger::new();
        let [writer, reader] = Worker::pair(ChannelKind::Pipe);
        let (written, observed) = thread::scope(|scope| {
            let w = scope.spawn(|| writer.run(&debugger));
            let r = scope.spawn(|| reader.run(&debugger));
            (w.join().unwrap(), r.join().unwrap())
        });

        assert_eq!(written.role, Role::Writer);
        assert_eq!(written.payload, ChannelKind::Pipe.message());
        assert!(
            observed.payload.is_empty() || observed.payload == ChannelKind::Pipe.message(),
            "unexpected payload {:?}",
            observed.payload
        );

        let events = debugger.event_snapshot();
        let reader_first = events[0] == reader.event();
        assert_eq!(reader_first, observed.payload.is_empty());
    }
}

#[test]
fn registry_stops_growing_at_capacity() {
    let debugger = Debugger::new();
    let full_runs = MAX_THREADS / 2;
    for _ in 0..full_runs {
        debugger.run_shared_memory_exchange();
    }
    assert_eq!(debugger.thread_snapshot().len(), MAX_THREADS);

    debugger.run_shared_memory_exchange();
    debugger.run_pipe_exchange();

    assert_eq!(debugger.thread_snapshot().len(), MAX_THREADS);
    assert_eq!(debugger.capacity_report().threads_dropped, 4);
    assert_eq!(debugger.dashboard_counters().shm_ops as usize, full_runs + 1);
    assert_eq!(debugger.dashboard_counters().pipe_ops, 1);
}

#[test]
fn repeated_names_update_the_oldest_record() {
    let debugger = Debugger::new();
    debugger.run_pipe_exchange();
    debugger.run_pipe_exchange();

    let threads = debugger.thread_snapshot();
    assert_eq!(threads.len(), 4);
    assert!(threads[..2]
        .iter()
        .all(|record| record.state == ThreadState::Terminated));
    assert!(threads[2..]
        .iter()
        .all(|record| record.state == ThreadState::Created));
}

#[test]
fn event_log_never_exceeds_capacity() {
    let debugger = Debugger::new();
    for _ in 0..MAX_EVENTS {
        debugger.simulate_deadlock();
    }
    let before = debugger.event_snapshot();
    assert_eq!(before.len(), MAX_EVENTS);

    debugger.run_queue_exchange();
    assert_eq!(debugger.shutdown_event(), Insert::Dropped);

    assert_eq!(debugger.event_snapshot(), before);
    assert_eq!(debugger.capacity_report().events_dropped, 3);
    assert_eq!(debugger.dashboard_counters().queue_ops, 1);
}

#[test]
fn deadlock_leaves_channels_and_threads_alone() {
    let debugger = Debugger::new();
    debugger.run_pipe_exchange();
    let counters = debugger.dashboard_counters();
    let threads = debugger.thread_snapshot();
    let events = debugger.event_snapshot().len();

    debugger.simulate_deadlock();

    assert_eq!(debugger.dashboard_counters(), counters);
    assert_eq!(debugger.thread_snapshot(), threads);
    assert_eq!(debugger.event_snapshot().len(), events + 1);
}

#[test]
fn concurrent_runs_on_different_channels_do_not_corrupt_log() {
    let debugger = Debugger::with_config(DebuggerConfig {
        max_threads: 1000,
        max_events: 1000,
        ..DebuggerConfig::default()
    });
    let rounds = 20;

    thread::scope(|scope| {
        for kind in ChannelKind::ALL {
            let debugger = &debugger;
            scope.spawn(move || {
                for _ in 0..rounds {
                    debugger.run(kind);
                }
            });
        }
    });

    let counters = debugger.dashboard_counters();
    assert_eq!(counters.pipe_ops, rounds);
    assert_eq!(counters.queue_ops, rounds);
    assert_eq!(counters.shm_ops, rounds);

    let events = debugger.event_snapshot();
    assert_eq!(events.len(), 6 * rounds as usize);
    let known: Vec<&str> = ChannelKind::ALL
        .into_iter()
        .flat_map(events_for)
        .collect();
    assert!(events.iter().all(|e| known.contains(&e.as_str())));
    assert_eq!(debugger.thread_snapshot().len(), 6 * rounds as usize);
}
