//! A minimal terminal spinner, driven by the request lifecycle.
//!
//! [`spinner_hooks`] packages a spinner into a [`RequestHooks`] value: the
//! `on_start(true)` call shows it and the `on_start(false)` cleanup call
//! takes it down, exactly the way a loading flag would toggle.

use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::api::RequestHooks;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(80);

/// A terminal spinner running in a background task.
///
/// Stops when dropped, so a hook closure can hold it in an `Option` and
/// simply `take()` it. Writes to stderr so it doesn't interfere with
/// stdout output.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: tokio::sync::watch::Sender<bool>,
}

impl Spinner {
    /// Start a spinner with the given message (e.g. `"loading children"`).
    pub fn start(message: &str) -> Self {
        let (cancel_tx, mut cancel_rx) = tokio::sync::watch::channel(false);
        let message = message.to_string();

        let handle = tokio::spawn(async move {
            let mut i = 0;
            loop {
                let frame = FRAMES[i % FRAMES.len()];
                // \r moves to start of line, \x1b[2K clears the line
                eprint!("\x1b[2K\r{frame} {message}");
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancel_rx.changed() => break,
                }
                i += 1;
            }
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Stop drawing and clear the spinner line. Synchronous so it can run
    /// inside a hook closure; also invoked by `Drop`.
    pub fn halt(&self) {
        let _ = self.cancel.send(true);
        self.handle.abort();
        eprint!("\x1b[2K\r");
        let _ = std::io::stderr().flush();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.halt();
    }
}

/// Request hooks that show `message` while the call is in flight.
pub fn spinner_hooks(message: &str) -> RequestHooks {
    let message = message.to_string();
    let mut active: Option<Spinner> = None;
    RequestHooks::new().on_start(move |starting| {
        if starting {
            active = Some(Spinner::start(&message));
        } else {
            // Dropping the spinner stops it.
            active.take();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_non_empty() {
        assert!(!FRAMES.is_empty());
        for frame in FRAMES {
            assert!(!frame.is_empty());
        }
    }

    #[test]
    fn frames_are_single_braille_chars() {
        for frame in FRAMES {
            assert_eq!(frame.chars().count(), 1);
        }
    }

    #[tokio::test]
    async fn spinner_starts_and_stops_without_panic() {
        let spinner = Spinner::start("testing");
        tokio::time::sleep(Duration::from_millis(200)).await;
        drop(spinner);
    }

    #[tokio::test]
    async fn spinner_immediate_drop() {
        let spinner = Spinner::start("quick");
        drop(spinner);
    }

    #[tokio::test]
    async fn halt_twice_is_fine() {
        let spinner = Spinner::start("twice");
        spinner.halt();
        drop(spinner);
    }
}
