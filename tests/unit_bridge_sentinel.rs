use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;

use egg_runner::bridge::run_bridge;

#[test]
fn forwards_lines_in_order_until_eof() {
    let (tx, rx) = mpsc::channel();
    let raised = Arc::new(AtomicUsize::new(0));
    let raise_count = Arc::clone(&raised);

    run_bridge(Cursor::new("alpha\nbeta\ngamma\n"), tx, move || {
        raise_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
    .expect("bridge");

    let forwarded: Vec<String> = rx.iter().collect();
    assert_eq!(forwarded, vec!["alpha", "beta", "gamma"]);
    assert_eq!(raised.load(Ordering::SeqCst), 0, "no interrupt without sentinel");
}

#[test]
fn eof_closes_the_relay() {
    let (tx, rx) = mpsc::channel::<String>();
    run_bridge(Cursor::new(""), tx, || Ok(())).expect("bridge");
    assert!(rx.recv().is_err(), "relay must be closed after EOF");
}

#[test]
fn sentinel_raises_and_stops_forwarding() {
    let (tx, rx) = mpsc::channel();
    let raised = Arc::new(AtomicUsize::new(0));
    let raise_count = Arc::clone(&raised);

    run_bridge(
        Cursor::new("one\nEGG_SIGNAL_SIGINT\ntwo\n"),
        tx,
        move || {
            raise_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    )
    .expect("bridge");

    let forwarded: Vec<String> = rx.iter().collect();
    assert_eq!(forwarded, vec!["one"], "nothing may follow the sentinel");
    assert_eq!(raised.load(Ordering::SeqCst), 1);
}

#[test]
fn caret_c_is_an_interrupt_too() {
    let (tx, rx) = mpsc::channel();
    let raised = Arc::new(AtomicUsize::new(0));
    let raise_count = Arc::clone(&raised);

    run_bridge(Cursor::new("^C\nafter\n"), tx, move || {
        raise_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
    .expect("bridge");

    assert!(rx.iter().next().is_none());
    assert_eq!(raised.load(Ordering::SeqCst), 1);
}

#[test]
fn raise_failure_surfaces_as_error() {
    let (tx, _rx) = mpsc::channel();
    let err = run_bridge(Cursor::new("EGG_SIGNAL_SIGINT\n"), tx, || {
        Err(nix::errno::Errno::EPERM)
    })
    .expect_err("raise failure must propagate");
    assert_eq!(err.raw_os_error(), Some(libc::EPERM));
}

#[test]
fn sentinel_lookalikes_are_forwarded_verbatim() {
    let (tx, rx) = mpsc::channel();
    run_bridge(
        Cursor::new("EGG_SIGNAL_SIGINT_EXTRA\n EGG_SIGNAL_SIGINT\nsay ^C\n"),
        tx,
        || Ok(()),
    )
    .expect("bridge");

    let forwarded: Vec<String> = rx.iter().collect();
    assert_eq!(
        forwarded,
        vec!["EGG_SIGNAL_SIGINT_EXTRA", " EGG_SIGNAL_SIGINT", "say ^C"]
    );
}
