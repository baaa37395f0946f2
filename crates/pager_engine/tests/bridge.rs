use std::thread;
use std::time::Duration;

use pager_engine::signal_bridge;

#[test]
fn holds_at_most_one_pending_signal() {
    let (tx, rx) = signal_bridge::<u32>();

    assert!(tx.offer(1));
    assert!(!tx.offer(2));
    assert!(!tx.offer(3));
    assert_eq!(rx.coalesced(), 2);

    assert_eq!(rx.take(), Some(1));
    assert_eq!(rx.take(), None);

    assert!(tx.offer(4));
    assert_eq!(rx.take(), Some(4));
}

#[test]
fn burst_from_another_thread_collapses() {
    let (tx, rx) = signal_bridge::<u32>();
    let producer = {
        let tx = tx.clone();
        thread::spawn(move || (0..1000).filter(|i| tx.offer(*i)).count())
    };
    let queued = producer.join().unwrap();

    assert_eq!(queued, 1);
    assert_eq!(rx.coalesced(), 999);
    assert_eq!(rx.wait(Duration::from_millis(10)), Some(0));
}

#[test]
fn wait_returns_none_when_senders_are_gone() {
    let (tx, rx) = signal_bridge::<u32>();
    drop(tx);
    assert_eq!(rx.wait(Duration::from_millis(10)), None);
}
