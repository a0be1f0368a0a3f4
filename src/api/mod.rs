//! The shared HTTP executor every network call goes through.
//!
//! [`ApiClient::request`] is the single entry point. It attaches the
//! session's bearer token, performs the call, and drives the
//! [`RequestHooks`] lifecycle: `on_start(true)`, then exactly one of
//! `on_success` / `on_error`, then `on_start(false)` and `on_final` in the
//! same cleanup step. The structured [`Outcome`] it returns carries the same
//! result, so callers can use either style.
//!
//! The executor never panics and never mutates the session store; the auth
//! flows do that in their own success paths. There are no retries and no
//! timeout: a request runs until it completes, fails, or is aborted through
//! a [`CancelHandle`].

mod error;
mod hooks;
mod inflight;
mod pager;

pub use error::ApiError;
pub use hooks::RequestHooks;
pub use inflight::{CancelHandle, InFlightMap, Outcome};
pub use pager::Pager;
pub use reqwest::Method;

use std::future::Future;
use std::sync::Arc;

use futures::future::{AbortRegistration, Abortable};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::session::SessionStore;

/// Request parameters beyond the endpoint path.
pub struct RequestOptions {
    /// HTTP verb, `GET` by default.
    pub method: Method,
    /// Extra headers; these win over the defaults on name collision.
    pub headers: Vec<(String, String)>,
    /// JSON request body.
    pub body: Option<Value>,
    /// Query-string pairs.
    pub query: Vec<(String, String)>,
    /// Abort registration from [`CancelHandle::new`].
    pub cancel: Option<AbortRegistration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
            query: Vec::new(),
            cancel: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, pairs: &[(String, String)]) -> Self {
        self.query.extend_from_slice(pairs);
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_cancel(mut self, registration: AbortRegistration) -> Self {
        self.cancel = Some(registration);
        self
    }
}

/// Shared HTTP client bound to a base URL and an injected session store.
///
/// Cheap to clone; clones share the connection pool, the session, and the
/// in-flight map.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    in_flight: Arc<InFlightMap>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
            in_flight: Arc::new(InFlightMap::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn in_flight(&self) -> &Arc<InFlightMap> {
        &self.in_flight
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Perform a call against `endpoint` (a path starting with `/`),
    /// driving the full hook lifecycle around the outcome.
    pub async fn request(
        &self,
        endpoint: &str,
        hooks: RequestHooks,
        mut options: RequestOptions,
    ) -> Outcome {
        let cancel = options.cancel.take();
        let call = self.execute(endpoint, options);
        match cancel {
            Some(registration) => {
                drive(hooks, async {
                    match Abortable::new(call, registration).await {
                        Ok(outcome) => outcome,
                        Err(_aborted) => Err(ApiError::Cancelled),
                    }
                })
                .await
            }
            None => drive(hooks, call).await,
        }
    }

    /// Like [`ApiClient::request`], but keyed: if a request with the same
    /// `key` is already in flight, attach to its outcome instead of issuing
    /// a duplicate. Hooks and options are only used by the call that ends up
    /// starting the request.
    pub async fn request_deduped(
        &self,
        key: &str,
        endpoint: &str,
        hooks: RequestHooks,
        options: RequestOptions,
    ) -> Outcome {
        let client = self.clone();
        let endpoint = endpoint.to_string();
        let shared = self.in_flight.join_or_start(key, move || async move {
            client.request(&endpoint, hooks, options).await
        });
        shared.await
    }

    async fn execute(&self, endpoint: &str, options: RequestOptions) -> Outcome {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::Transport("stored token is not a valid header value".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in &options.headers {
            let name: HeaderName = name
                .parse()
                .map_err(|_| ApiError::Transport(format!("invalid header name: {name}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ApiError::Transport(format!("invalid header value for {name}")))?;
            headers.insert(name, value);
        }

        let mut req = self.http.request(options.method, &url).headers(headers);
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        if let Some(body) = &options.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        read_json_response(resp).await
    }
}

/// Map a response to the outcome shape: parse the body as JSON first (a
/// non-JSON body is a decode failure with no status, even on an error
/// response), then split on the status class.
pub(crate) async fn read_json_response(resp: reqwest::Response) -> Outcome {
    let status = resp.status().as_u16();
    let text = resp.text().await?;

    let body: Value = serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;

    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ApiError::Http { status, body })
    }
}

/// Run `call` inside the four-phase hook lifecycle. Shared by the JSON
/// executor and the multipart upload path.
pub(crate) async fn drive(mut hooks: RequestHooks, call: impl Future<Output = Outcome>) -> Outcome {
    hooks.started(true);
    let outcome = call.await;
    match &outcome {
        Ok(data) => hooks.succeeded(data),
        Err(err) => hooks.failed(err),
    }
    // Cleanup step: the loading toggle and the terminal hook run together.
    hooks.started(false);
    hooks.finished();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc as StdArc, Mutex};

    #[test]
    fn options_default_to_get() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
        assert!(options.query.is_empty());
        assert!(options.cancel.is_none());
    }

    #[test]
    fn post_carries_body() {
        let options = RequestOptions::post(json!({"name": "Mia"}));
        assert_eq!(options.method, Method::POST);
        assert_eq!(options.body.unwrap(), json!({"name": "Mia"}));
    }

    #[test]
    fn builders_accumulate() {
        let options = RequestOptions::get()
            .with_query(&[("page".to_string(), "2".to_string())])
            .with_header("X-Request-Id", "abc");
        assert_eq!(options.query.len(), 1);
        assert_eq!(options.headers[0].0, "X-Request-Id");
    }

    #[tokio::test]
    async fn drive_orders_success_lifecycle() {
        let events: StdArc<Mutex<Vec<String>>> = StdArc::default();
        let (e1, e2, e3) = (events.clone(), events.clone(), events.clone());

        let hooks = RequestHooks::new()
            .on_start(move |starting| e1.lock().unwrap().push(format!("start:{starting}")))
            .on_success(move |_| e2.lock().unwrap().push("success".to_string()))
            .on_final(move || e3.lock().unwrap().push("final".to_string()));

        let outcome = drive(hooks, async { Ok(json!({"ok": true})) }).await;
        assert!(outcome.is_ok());
        assert_eq!(
            *events.lock().unwrap(),
            vec!["start:true", "success", "start:false", "final"]
        );
    }

    #[tokio::test]
    async fn drive_orders_error_lifecycle() {
        let events: StdArc<Mutex<Vec<String>>> = StdArc::default();
        let (e1, e2, e3, e4) = (events.clone(), events.clone(), events.clone(), events.clone());

        let hooks = RequestHooks::new()
            .on_start(move |starting| e1.lock().unwrap().push(format!("start:{starting}")))
            .on_success(move |_| e2.lock().unwrap().push("success".to_string()))
            .on_error(move |_| e3.lock().unwrap().push("error".to_string()))
            .on_final(move || e4.lock().unwrap().push("final".to_string()));

        let outcome = drive(hooks, async { Err(ApiError::Transport("down".to_string())) }).await;
        assert!(outcome.is_err());
        assert_eq!(
            *events.lock().unwrap(),
            vec!["start:true", "error", "start:false", "final"]
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let session = StdArc::new(crate::session::MemorySessionStore::new());
        let client = ApiClient::new("http://localhost:9/", session);
        assert_eq!(client.base_url(), "http://localhost:9");
    }
}
