//! Shared helpers for client integration tests

#![allow(dead_code)]

use onesignal_client::{Client, Request, Transport, TransportError};
use onesignal_config::{CredentialSource, MapSource};
use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const APP_AUTH_KEY: &str = "app-test-key";
pub const APP_ID: &str = "app-test-id";
pub const USER_AUTH_KEY: &str = "user-test-key";
pub const BASE_URL: &str = "https://onesignal.com/api/v1/";

/// Captures every request instead of sending it
#[derive(Default)]
pub struct RecordingTransport {
    requests: RefCell<Vec<Request>>,
    failure: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose every call fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last(&self) -> Request {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    /// Position of the request in the log
    type Response = usize;

    fn send(&self, request: Request) -> Result<usize, TransportError> {
        if let Some(message) = &self.failure {
            return Err(TransportError::new(message.clone()));
        }
        let mut requests = self.requests.borrow_mut();
        requests.push(request);
        Ok(requests.len())
    }
}

/// Source that counts lookups
pub struct CountingSource {
    inner: MapSource,
    lookups: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: MapSource) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl CredentialSource for CountingSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(key)
    }
}

/// Source whose contents can change after a client has been built
#[derive(Clone, Default)]
pub struct SharedSource {
    inner: Arc<Mutex<MapSource>>,
}

impl SharedSource {
    pub fn set(&self, key: &str, value: &str) {
        self.inner.lock().unwrap().insert(key, value);
    }

    pub fn unset(&self, key: &str) -> Option<String> {
        self.inner.lock().unwrap().remove(key)
    }
}

impl CredentialSource for SharedSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.inner.lock().unwrap().lookup(key)
    }
}

pub fn test_source() -> MapSource {
    MapSource::new()
        .with("OS_APP_AUTH_KEY", APP_AUTH_KEY)
        .with("OS_APP_ID", APP_ID)
        .with("OS_USER_AUTH_KEY", USER_AUTH_KEY)
}

/// Client over `transport` with all three credentials available from the source
pub fn client(transport: &RecordingTransport) -> Client<&RecordingTransport> {
    Client::builder(transport)
        .credential_source(test_source())
        .build()
        .unwrap()
}

pub fn counting_client(
    transport: &RecordingTransport,
    source: Arc<CountingSource>,
) -> Client<&RecordingTransport> {
    Client::builder(transport)
        .credential_source(source)
        .build()
        .unwrap()
}
