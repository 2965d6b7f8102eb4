use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

/// Set once when the player asks to quit (Ctrl-C, Esc, q).
///
/// Display waits block on this signal instead of sleeping so a quit request
/// ends the current round immediately.
pub struct ShutdownSignal {
    triggered: Mutex<bool>,
    condvar: Condvar,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            triggered: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    pub fn trigger(&self) {
        if let Ok(mut triggered) = self.triggered.lock() {
            *triggered = true;
        }
        self.condvar.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.triggered.lock().map(|t| *t).unwrap_or(true)
    }

    /// Sleep for `duration` unless shutdown is triggered first.
    ///
    /// Returns `true` when interrupted.
    pub fn wait(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let Ok(mut triggered) = self.triggered.lock() else {
            return true;
        };
        while !*triggered {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            match self.condvar.wait_timeout(triggered, deadline - now) {
                Ok((guard, _)) => triggered = guard,
                Err(_) => return true,
            }
        }
        true
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a signal and route Ctrl-C to it
pub fn install() -> Result<Arc<ShutdownSignal>> {
    let signal = Arc::new(ShutdownSignal::new());
    let handler = Arc::clone(&signal);
    ctrlc::set_handler(move || {
        debug!("Ctrl-C received");
        handler.trigger();
    })
    .context("Failed to set Ctrl-C handler")?;
    Ok(signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_wait_runs_to_completion() {
        let signal = ShutdownSignal::new();
        let start = Instant::now();
        assert!(!signal.wait(Duration::from_millis(40)));
        assert!(start.elapsed() >= Duration::from_millis(40));
        assert!(!signal.is_shutdown());
    }

    #[test]
    fn test_trigger_wakes_waiter() {
        let signal = Arc::new(ShutdownSignal::new());
        let waiter = Arc::clone(&signal);
        let handle = thread::spawn(move || {
            let start = Instant::now();
            (waiter.wait(Duration::from_secs(10)), start.elapsed())
        });

        thread::sleep(Duration::from_millis(30));
        signal.trigger();

        let (interrupted, elapsed) = handle.join().unwrap();
        assert!(interrupted);
        assert!(elapsed < Duration::from_secs(2));
    }

    #[test]
    fn test_wait_after_trigger_returns_at_once() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        let start = Instant::now();
        assert!(signal.wait(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_zero_wait() {
        let signal = ShutdownSignal::new();
        assert!(!signal.wait(Duration::ZERO));
    }
}
