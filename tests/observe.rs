//! Tests for the full observe loop against fake browsing contexts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fraglink::{
    AddressStore, BrowserStore, FragmentSession, MemoryStore, SessionEvent, TokenError,
    TokenSource,
};
use url::Url;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct FixedSource(&'static str);

impl TokenSource for FixedSource {
    fn mint(&self) -> Result<String, TokenError> {
        Ok(self.0.to_string())
    }
}

#[test]
fn test_generates_identifier_without_history_entry() {
    init_logging();

    let store = BrowserStore::new(Url::parse("https://pad.example/document").unwrap());
    let session = FragmentSession::with_uuid(Arc::new(store.clone()));

    let id = session.resolve().unwrap();

    assert_eq!(id.as_str().len(), 36);
    assert_eq!(store.fragment(), format!("#{}", id));
    assert_eq!(store.history_len(), 1);
}

#[test]
fn test_observation_tracks_external_navigation() {
    init_logging();

    let store = MemoryStore::with_fragment("#abc123");
    let session = FragmentSession::with_uuid(Arc::new(store.clone()));

    let observed = session.observe().unwrap();
    assert_eq!(observed.current().as_str(), "abc123");

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let _subscription = observed.subscribe(move |event: &SessionEvent| {
        sink.lock().unwrap().push(event.clone());
    });

    store.navigate("#xyz789");
    assert_eq!(observed.current().as_str(), "xyz789");

    // Re-navigating to the same fragment delivers nothing further
    store.navigate("#xyz789");

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], SessionEvent::Changed { .. }));
    assert_eq!(events[0].previous_id().as_str(), "abc123");
    assert_eq!(events[0].current_id().as_str(), "xyz789");
}

#[test]
fn test_dropped_subscription_is_detached() {
    init_logging();

    let store = MemoryStore::with_fragment("#abc123");
    let session = FragmentSession::with_uuid(Arc::new(store.clone()));
    let observed = session.observe().unwrap();

    let deliveries = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&deliveries);
    let subscription = observed.subscribe(move |_event: &SessionEvent| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.navigate("#first");
    drop(subscription);
    store.navigate("#second");

    assert_eq!(deliveries.load(Ordering::SeqCst), 1);
    // The observable itself keeps tracking
    assert_eq!(observed.current().as_str(), "second");
}

#[test]
fn test_dropped_observable_stops_tracking() {
    init_logging();

    let store = MemoryStore::with_fragment("#abc123");
    let session = FragmentSession::with_uuid(Arc::new(store.clone()));
    let observed = session.observe().unwrap();

    let receiver = observed.watch();
    drop(observed);

    store.navigate("#xyz789");

    // Teardown closed the channel without altering the last published value
    assert!(receiver.has_changed().is_err());
    assert_eq!(receiver.borrow().as_str(), "abc123");
}

#[test]
fn test_external_clear_regenerates_identifier() {
    init_logging();

    let store = MemoryStore::with_fragment("#abc123");
    let session = FragmentSession::with_uuid(Arc::new(store.clone()));
    let observed = session.observe().unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let _subscription = observed.subscribe(move |event: &SessionEvent| {
        sink.lock().unwrap().push(event.clone());
    });

    store.navigate("");

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], SessionEvent::Regenerated { .. }));

    let regenerated = events[0].current_id();
    assert_eq!(regenerated.as_str().len(), 36);
    assert_eq!(observed.current(), *regenerated);
    // The minted identifier was written back in place
    assert_eq!(store.fragment(), format!("#{}", regenerated));
}

#[test]
fn test_back_navigation_restores_previous_identifier() {
    init_logging();

    let store = BrowserStore::new(Url::parse("https://pad.example/document").unwrap());
    let session = FragmentSession::new(
        Arc::new(store.clone()),
        Arc::new(FixedSource("3fae7c5b-9d10-4f2e-8a61-2b04c7d9e815")),
    );

    let observed = session.observe().unwrap();
    let minted = observed.current();

    store.navigate_fragment("#xyz789");
    assert_eq!(observed.current().as_str(), "xyz789");

    assert!(store.back());
    assert_eq!(observed.current(), minted);
    assert_eq!(store.history_len(), 1);
}

#[tokio::test]
async fn test_watch_bridge_delivers_value_transitions() {
    init_logging();

    let store = MemoryStore::with_fragment("#abc123");
    let session = FragmentSession::with_uuid(Arc::new(store.clone()));
    let observed = session.observe().unwrap();

    let mut receiver = observed.watch();
    assert_eq!(receiver.borrow().as_str(), "abc123");

    store.navigate("#xyz789");

    receiver.changed().await.unwrap();
    assert_eq!(receiver.borrow_and_update().as_str(), "xyz789");
}
