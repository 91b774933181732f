use crate::error::{SecurityError, SecurityResult};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{error, warn};
use url::Url;

/// Query parameters the platform recognizes. Closed world: anything else is
/// stripped from the visible URL on load.
pub const ALLOWED_PARAMS: [&str; 7] = ["slug", "id", "page", "category", "search", "sort", "filter"];

/// Location/history seam. The browser host reads the address bar and
/// rewrites it without navigation; [`MemoryNavigator`] serves tests and
/// non-browser contexts.
pub trait Navigator: Send + Sync {
    /// The current absolute URL.
    fn current_url(&self) -> String;
    /// Replace the current URL without navigating (history replace).
    fn replace_url(&self, url: &str);
}

/// In-memory navigator holding a single URL.
pub struct MemoryNavigator {
    url: Mutex<String>,
    replacements: AtomicUsize,
}

impl MemoryNavigator {
    /// Create a navigator positioned at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Mutex::new(url.into()),
            replacements: AtomicUsize::new(0),
        }
    }

    /// How many times the URL has been replaced.
    pub fn replacement_count(&self) -> usize {
        self.replacements.load(Ordering::SeqCst)
    }
}

impl Navigator for MemoryNavigator {
    fn current_url(&self) -> String {
        self.url.lock().clone()
    }

    fn replace_url(&self, url: &str) {
        *self.url.lock() = url.to_string();
        self.replacements.fetch_add(1, Ordering::SeqCst);
    }
}

/// Strips unrecognized query parameters from the visible URL.
///
/// Run once per navigation. Allowed parameters keep their order and values;
/// the history rewrite happens only when something was actually removed, so
/// re-running on a clean URL is a no-op. Parse failures are logged and
/// swallowed — this guard never breaks page load.
pub struct UrlParameterGuard {
    allowed: HashSet<String>,
    navigator: Arc<dyn Navigator>,
}

impl UrlParameterGuard {
    /// Guard with the platform's standard parameter allowlist.
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self::with_allowed(navigator, ALLOWED_PARAMS.iter().map(ToString::to_string))
    }

    /// Guard with a custom allowlist.
    pub fn with_allowed(
        navigator: Arc<dyn Navigator>,
        allowed: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            navigator,
        }
    }

    /// Whether a parameter name is recognized.
    pub fn is_parameter_allowed(&self, name: &str) -> bool {
        self.allowed.contains(name)
    }

    /// The recognized parameter names.
    pub fn allowed_parameters(&self) -> Vec<&str> {
        self.allowed.iter().map(String::as_str).collect()
    }

    /// Remove every disallowed query parameter from the current URL and
    /// rewrite history if anything changed. Idempotent; never propagates
    /// errors.
    pub fn validate_and_clean(&self) {
        let current = self.navigator.current_url();
        match self.clean(&current) {
            Ok(Some(cleaned)) => self.navigator.replace_url(&cleaned),
            Ok(None) => {}
            Err(err) => error!(url = %current, %err, "failed to validate URL parameters"),
        }
    }

    /// Returns the rewritten URL, or `None` when nothing had to change.
    fn clean(&self, raw: &str) -> SecurityResult<Option<String>> {
        let mut url = Url::parse(raw).map_err(|e| SecurityError::Url(e.to_string()))?;

        let mut kept: Vec<(String, String)> = Vec::new();
        let mut removed = false;
        for (key, value) in url.query_pairs() {
            if self.allowed.contains(key.as_ref()) {
                kept.push((key.into_owned(), value.into_owned()));
            } else {
                warn!(param = %key, "removed unknown URL parameter");
                removed = true;
            }
        }

        if !removed {
            return Ok(None);
        }

        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept);
        }
        Ok(Some(url.into()))
    }
}
