//! A scoped chronometer.
//!
//! ```
//! use blobseal::timer::{timed, Timer};
//!
//! // Logs "load config: <elapsed>" at info level when `tm` goes out of scope.
//! {
//!     let _tm = Timer::with_log("load config");
//! }
//!
//! // Manual use.
//! let mut tm = Timer::new();
//! let elapsed = tm.stop();
//! assert_eq!(tm.delta().unwrap(), elapsed);
//!
//! // Wrap a call, like a timing decorator.
//! let answer = timed("compute", || 6 * 7);
//! assert_eq!(answer, 42);
//! ```

use std::time::{Duration, Instant};

use tracing::info;

use crate::errors::{BlobError, Result};
use crate::humanize::humanized_duration;

#[derive(Debug)]
pub struct Timer {
    label: Option<String>,
    start: Instant,
    end: Option<Instant>,
}

impl Timer {
    /// Start a silent timer.
    pub fn new() -> Self {
        Self {
            label: None,
            start: Instant::now(),
            end: None,
        }
    }

    /// Start a timer that logs `"{label}: {elapsed}"` each time it is
    /// stopped, and once on drop if it never was.
    pub fn with_log(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            start: Instant::now(),
            end: None,
        }
    }

    /// Record an end instant and return the elapsed time.
    ///
    /// May be called repeatedly; each call moves the end forward.
    pub fn stop(&mut self) -> Duration {
        let end = Instant::now();
        self.end = Some(end);
        let elapsed = end.duration_since(self.start);
        if let Some(label) = &self.label {
            info!("{label}: {}", humanized_duration(elapsed));
        }
        elapsed
    }

    /// Like `stop`, but returns the readable form.
    pub fn partial(&mut self) -> String {
        humanized_duration(self.stop())
    }

    /// Elapsed time up to the last recorded end.
    ///
    /// Fails until the timer has been stopped at least once.
    pub fn delta(&self) -> Result<Duration> {
        self.end
            .map(|end| end.duration_since(self.start))
            .ok_or_else(|| BlobError::InvalidInput("timer has not been stopped yet".into()))
    }

    /// `delta` in human-readable form.
    pub fn readable(&self) -> Result<String> {
        self.delta().map(humanized_duration)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if self.label.is_some() && self.end.is_none() {
            self.stop();
        }
    }
}

/// Run `f` inside a labelled timer and return its result unchanged.
///
/// The elapsed time is logged on every exit path, including a panic
/// unwinding through `f`.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let _tm = Timer::with_log(format!("{label} execution time"));
    f()
}
