use serde_json::Value;

use super::error::ApiError;

type StartFn = Box<dyn FnMut(bool) + Send>;
type SuccessFn = Box<dyn FnMut(&Value) + Send>;
type ErrorFn = Box<dyn FnMut(&ApiError) + Send>;
type FinalFn = Box<dyn FnMut() + Send>;

/// Optional observers for a request's lifecycle.
///
/// Every request drives the slots in a fixed order: `on_start(true)` before
/// the call goes out, then exactly one of `on_success` / `on_error`, then
/// `on_start(false)` and `on_final` together in the cleanup step. Each slot
/// is optional; an omitted slot is skipped. The structured return value of
/// [`ApiClient::request`](super::ApiClient::request) carries the same
/// outcome, so most callers only hook `on_start` for loading feedback.
#[derive(Default)]
pub struct RequestHooks {
    start: Option<StartFn>,
    success: Option<SuccessFn>,
    error: Option<ErrorFn>,
    terminal: Option<FinalFn>,
}

impl RequestHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with `true` before the call starts and `false` during cleanup.
    /// The pair brackets the outcome, so it maps directly onto a loading flag.
    pub fn on_start(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.start = Some(Box::new(f));
        self
    }

    /// Called at most once, with the parsed response body, on the 2xx path.
    pub fn on_success(mut self, f: impl FnMut(&Value) + Send + 'static) -> Self {
        self.success = Some(Box::new(f));
        self
    }

    /// Called at most once with the failure. Mutually exclusive with success.
    pub fn on_error(mut self, f: impl FnMut(&ApiError) + Send + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }

    /// Called exactly once after either branch; terminal cleanup distinct
    /// from the loading toggle.
    pub fn on_final(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.terminal = Some(Box::new(f));
        self
    }

    pub(crate) fn started(&mut self, starting: bool) {
        if let Some(f) = &mut self.start {
            f(starting);
        }
    }

    pub(crate) fn succeeded(&mut self, data: &Value) {
        if let Some(f) = &mut self.success {
            f(data);
        }
    }

    pub(crate) fn failed(&mut self, err: &ApiError) {
        if let Some(f) = &mut self.error {
            f(err);
        }
    }

    pub(crate) fn finished(&mut self) {
        if let Some(f) = &mut self.terminal {
            f();
        }
    }
}
