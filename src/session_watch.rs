use crate::credentials::CredentialStore;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Default liveness-poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(120);

/// Background session-liveness poller.
///
/// Spawns a task that re-reads the [`CredentialStore`] on a fixed interval
/// and fires the callback once authentication lapses (token expired in
/// another tab, cleared by logout, and so on). The task stops itself after
/// firing; [`stop`](Self::stop) or dropping the watcher aborts it
/// deterministically, leaving no orphaned timer.
pub struct SessionWatcher {
    handle: JoinHandle<()>,
}

impl SessionWatcher {
    /// Spawn a watcher polling `store` every `interval`.
    ///
    /// Must be called within a Tokio runtime.
    pub fn spawn<F>(store: CredentialStore, interval: Duration, on_expired: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it so the first
            // real check happens one interval after login.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !store.is_authenticated() {
                    info!("session no longer authenticated, notifying");
                    on_expired();
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Spawn with the platform default interval of 2 minutes.
    pub fn spawn_default<F>(store: CredentialStore, on_expired: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::spawn(store, DEFAULT_POLL_INTERVAL, on_expired)
    }

    /// Whether the polling task has already finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop polling. The task is aborted immediately.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for SessionWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
