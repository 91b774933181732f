use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default attempt cap per window.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Millisecond clock, injectable so window boundaries are testable.
pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds.
    fn now_millis(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Manually advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicU64,
}

impl ManualClock {
    /// Create a clock starting at `millis`.
    pub fn new(millis: u64) -> Self {
        Self {
            millis: AtomicU64::new(millis),
        }
    }

    /// Advance the clock.
    pub fn advance(&self, delta: Duration) {
        self.millis
            .fetch_add(delta.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

struct Window {
    count: u32,
    reset_at: u64,
}

/// Per-key fixed-window attempt counter.
///
/// The counter resets entirely at the window boundary, so a burst straddling
/// the boundary can reach `2 x max_attempts` across two adjacent windows.
/// That is the platform's observed behavior, kept deliberately rather than
/// upgraded to a sliding window. State is per-process and not persisted.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    clock: Arc<dyn Clock>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    /// Create a limiter on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a limiter on an injected clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Record an attempt for `key` and decide whether it is allowed.
    ///
    /// A fresh or expired window starts at count 1 and allows. A window at
    /// capacity denies without incrementing.
    pub fn is_allowed(&self, key: &str, max_attempts: u32, window: Duration) -> bool {
        let now = self.clock.now_millis();
        let mut windows = self.windows.lock();

        if let Some(current) = windows.get_mut(key) {
            if now <= current.reset_at {
                if current.count >= max_attempts {
                    return false;
                }
                current.count += 1;
                return true;
            }
        }

        // No window yet, or the old one expired: start fresh.
        windows.insert(
            key.to_string(),
            Window {
                count: 1,
                reset_at: now + window.as_millis() as u64,
            },
        );
        true
    }

    /// [`is_allowed`](Self::is_allowed) with the platform defaults
    /// (5 attempts per 60 seconds).
    pub fn is_allowed_default(&self, key: &str) -> bool {
        self.is_allowed(key, DEFAULT_MAX_ATTEMPTS, DEFAULT_WINDOW)
    }

    /// Drop the window for `key`, e.g. after a successful action.
    pub fn clear(&self, key: &str) {
        self.windows.lock().remove(key);
    }

    /// Attempts left in the current window, or `max_attempts` if no live
    /// window exists.
    pub fn remaining_attempts(&self, key: &str, max_attempts: u32) -> u32 {
        let now = self.clock.now_millis();
        let windows = self.windows.lock();
        match windows.get(key) {
            Some(current) if now <= current.reset_at => {
                max_attempts.saturating_sub(current.count)
            }
            _ => max_attempts,
        }
    }
}
