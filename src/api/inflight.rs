//! Keyed in-flight sharing and request cancellation.
//!
//! A second call for the same logical operation attaches to the first call's
//! outcome instead of issuing a duplicate request. This replaces the fragile
//! "check a boolean before fetching" pattern list screens otherwise need.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::{AbortHandle, AbortRegistration, BoxFuture, Shared};
use serde_json::Value;

use super::error::ApiError;

/// The outcome of a request, shared verbatim with every attached caller.
pub type Outcome = Result<Value, ApiError>;

type SharedOutcome = Shared<BoxFuture<'static, Outcome>>;

/// Aborts a single request from outside.
///
/// [`CancelHandle::new`] returns the handle plus the registration to put in
/// [`RequestOptions::cancel`](super::RequestOptions). An aborted request
/// resolves to [`ApiError::Cancelled`]; its cleanup hooks still run.
pub struct CancelHandle(AbortHandle);

impl CancelHandle {
    pub fn new() -> (Self, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        (Self(handle), registration)
    }

    pub fn cancel(&self) {
        self.0.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}

/// Map of logical-operation keys to their in-flight outcome.
#[derive(Default)]
pub struct InFlightMap {
    inner: Mutex<HashMap<String, SharedOutcome>>,
}

impl InFlightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations currently running.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True while `key` has a request in flight.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().unwrap().contains_key(key)
    }

    /// Join `key` if it is already running, otherwise start the future that
    /// `make` produces and register it under `key`. The key is released when
    /// the underlying future completes.
    ///
    /// `make` is only invoked on the caller that actually starts the request,
    /// so hooks captured by it run once no matter how many callers attach.
    pub(crate) fn join_or_start<F>(self: &Arc<Self>, key: &str, make: impl FnOnce() -> F) -> SharedOutcome
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        let mut map = self.inner.lock().unwrap();
        if let Some(existing) = map.get(key) {
            return existing.clone();
        }

        let registry = Arc::clone(self);
        let owned_key = key.to_string();
        let fut = make();
        let shared = async move {
            let outcome = fut.await;
            registry.inner.lock().unwrap().remove(&owned_key);
            outcome
        }
        .boxed()
        .shared();

        map.insert(key.to_string(), shared.clone());
        shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn slow_ok(counter: Arc<AtomicUsize>) -> impl Future<Output = Outcome> + Send + 'static {
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(json!({"ok": true}))
        }
    }

    #[tokio::test]
    async fn second_caller_attaches_instead_of_starting() {
        let map = Arc::new(InFlightMap::new());
        let started = Arc::new(AtomicUsize::new(0));

        let first = map.join_or_start("children:list", || slow_ok(Arc::clone(&started)));
        let second = map.join_or_start("children:list", || slow_ok(Arc::clone(&started)));

        let (a, b) = tokio::join!(first, second);
        assert_eq!(a.unwrap(), json!({"ok": true}));
        assert_eq!(b.unwrap(), json!({"ok": true}));
        assert_eq!(started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn key_released_after_completion() {
        let map = Arc::new(InFlightMap::new());
        let started = Arc::new(AtomicUsize::new(0));

        map.join_or_start("k", || slow_ok(Arc::clone(&started))).await.unwrap();
        assert!(!map.contains("k"));
        assert!(map.is_empty());

        // A fresh call after completion starts a new request.
        map.join_or_start("k", || slow_ok(Arc::clone(&started))).await.unwrap();
        assert_eq!(started.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn distinct_keys_run_independently() {
        let map = Arc::new(InFlightMap::new());
        let started = Arc::new(AtomicUsize::new(0));

        let a = map.join_or_start("a", || slow_ok(Arc::clone(&started)));
        let b = map.join_or_start("b", || slow_ok(Arc::clone(&started)));
        assert_eq!(map.len(), 2);

        let _ = tokio::join!(a, b);
        assert_eq!(started.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_shared_too() {
        let map = Arc::new(InFlightMap::new());

        let first = map.join_or_start("fail", || async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err(ApiError::Transport("refused".to_string()))
        });
        let second = map.join_or_start("fail", || async { Ok(json!("never runs")) });

        let (a, b) = tokio::join!(first, second);
        assert!(matches!(a, Err(ApiError::Transport(_))));
        assert!(matches!(b, Err(ApiError::Transport(_))));
    }

    #[test]
    fn cancel_handle_flags_abort() {
        let (handle, _registration) = CancelHandle::new();
        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(handle.is_cancelled());
    }
}
