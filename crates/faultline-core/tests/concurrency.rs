//! Concurrent access tests for the exception registry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use faultline_core::{Exception, IntManager, StrManager};

const KEYS_PER_WRITER: i64 = 200;

#[test]
fn reads_during_disjoint_writes_see_whole_values() {
    let manager = IntManager::new();

    // Stable keys read by every reader, 0..100.
    manager.add_all((0..100).map(|i| Exception::new(i, format!("stable-{i}")).with_status_code(200)));

    thread::scope(|s| {
        for w in 0..4i64 {
            let manager = manager.clone();
            s.spawn(move || {
                let base = 1_000 + w * KEYS_PER_WRITER;
                for i in base..base + KEYS_PER_WRITER {
                    manager.add(Exception::new(i, format!("v1-{i}")).with_status_code(201));
                    manager.add(Exception::new(i, format!("v2-{i}")).with_status_code(202));
                    if i % 2 == 0 {
                        manager.remove(&i);
                    }
                }
            });
        }

        for _ in 0..4 {
            let manager = manager.clone();
            s.spawn(move || {
                for round in 0..50 {
                    for i in 0..100i64 {
                        let e = manager.get(&i).expect("stable key present");
                        assert_eq!(e.message(), format!("stable-{i}"));
                        assert_eq!(e.status_code(), 200);
                    }
                    // Written keys are absent, or carry a matching message/status pair.
                    let probe = 1_000 + (round * 7) % (4 * KEYS_PER_WRITER);
                    if let Some(e) = manager.get(&probe) {
                        match e.status_code() {
                            201 => assert_eq!(e.message(), format!("v1-{probe}")),
                            202 => assert_eq!(e.message(), format!("v2-{probe}")),
                            other => panic!("unexpected status {other}"),
                        }
                    }
                }
            });
        }
    });

    // Odd keys survive with their final value, even keys were removed.
    assert_eq!(manager.size(), 100 + (4 * KEYS_PER_WRITER as usize) / 2);
    let last = 1_000 + 4 * KEYS_PER_WRITER - 1;
    assert_eq!(manager.get(&last).unwrap().message(), format!("v2-{last}"));
    assert!(manager.get(&1_000).is_none());
}

#[test]
fn concurrent_safe_add_admits_one_winner() {
    let manager = StrManager::new();
    let winners = AtomicUsize::new(0);

    thread::scope(|s| {
        for t in 0..16 {
            let manager = manager.clone();
            let winners = &winners;
            s.spawn(move || {
                let e = Exception::new("SHARED".to_string(), format!("from-{t}"));
                if manager.safe_add(e).is_ok() {
                    winners.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    });

    assert_eq!(winners.load(Ordering::SeqCst), 1);
    assert_eq!(manager.size(), 1);
}

#[test]
fn clones_mutate_independently_across_threads() {
    let manager = StrManager::new();
    manager.add(Exception::new("E1".to_string(), "m1"));

    thread::scope(|s| {
        for t in 0..8 {
            let manager = manager.clone();
            s.spawn(move || {
                let mut e = manager.get(&"E1".to_string()).unwrap();
                e.set_display_message(format!("thread-{t}"))
                    .insert_metadata("thread", t);
                assert_eq!(e.display_message(), format!("thread-{t}"));
            });
        }
    });

    let template = manager.get(&"E1".to_string()).unwrap();
    assert_eq!(template.display_message(), "");
    assert!(template.metadata().is_empty());
}
