use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counter() -> (Arc<AtomicUsize>, impl Fn(&AuthChange) + Send + Sync + 'static) {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_cb = Arc::clone(&hits);
    (hits, move |_: &AuthChange| {
        hits_cb.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn notify_reaches_every_live_callback() {
    let listeners = AuthListeners::new();
    let (a, cb_a) = counter();
    let (b, cb_b) = counter();
    let _sa = listeners.subscribe(cb_a);
    let _sb = listeners.subscribe(cb_b);

    listeners.notify(&AuthChange::SignedOut);

    assert_eq!(a.load(Ordering::SeqCst), 1);
    assert_eq!(b.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_subscription_stops_callbacks() {
    let listeners = AuthListeners::new();
    let (hits, cb) = counter();
    let sub = listeners.subscribe(cb);
    listeners.notify(&AuthChange::SignedOut);
    drop(sub);
    listeners.notify(&AuthChange::SignedOut);

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(listeners.is_empty());
}

#[test]
fn unsubscribe_removes_only_its_own_callback() {
    let listeners = AuthListeners::new();
    let (kept, cb_kept) = counter();
    let (gone, cb_gone) = counter();
    let _keep = listeners.subscribe(cb_kept);
    listeners.subscribe(cb_gone).unsubscribe();

    listeners.notify(&AuthChange::SignedOut);

    assert_eq!(kept.load(Ordering::SeqCst), 1);
    assert_eq!(gone.load(Ordering::SeqCst), 0);
    assert_eq!(listeners.len(), 1);
}

#[test]
fn subscription_outliving_registry_drops_cleanly() {
    let listeners = AuthListeners::new();
    let (_hits, cb) = counter();
    let sub = listeners.subscribe(cb);
    drop(listeners);
    drop(sub);
}

#[test]
fn callback_may_unsubscribe_during_notify() {
    let listeners = AuthListeners::new();
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let slot_cb = Arc::clone(&slot);
    let sub = listeners.subscribe(move |_| {
        slot_cb.lock().unwrap().take();
    });
    *slot.lock().unwrap() = Some(sub);

    listeners.notify(&AuthChange::SignedOut);

    assert!(listeners.is_empty());
}
