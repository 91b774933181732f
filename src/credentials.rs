use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Storage key for the authentication token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the user email.
pub const EMAIL_KEY: &str = "auth_email";
/// Storage key for the user role.
pub const ROLE_KEY: &str = "auth_role";

/// Every key wiped by [`CredentialStore::clear_auth`]. `faculty` and
/// `dormitory` are written by other parts of the platform but cleared here
/// so a logout leaves nothing behind.
pub const CLEARED_KEYS: [&str; 5] = [TOKEN_KEY, EMAIL_KEY, ROLE_KEY, "faculty", "dormitory"];

/// Storage lifetime class for a credential value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Cleared when the browsing context ends.
    #[default]
    Session,
    /// Survives restarts; shared across tabs of the same origin.
    Persistent,
}

/// One storage area. Implementations back a single tier.
///
/// Operations never fail: an unavailable environment is modeled by
/// [`NoopStorage`], which reads nothing and ignores writes.
pub trait Storage: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set(&self, key: &str, value: &str);
    /// Remove a value.
    fn remove(&self, key: &str);
}

/// In-memory storage area, used for tests and non-browser hosts.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry, simulating the end of a browsing context.
    pub fn clear_all(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the area holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// Storage area for environments with no storage at all (server-side
/// rendering). Reads return `None`, writes and removals are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStorage;

impl Storage for NoopStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

/// Authentication token/email/role storage across two tiers.
///
/// Writers pick a [`Tier`]; readers check the session tier first and fall
/// back to the persistent tier. Read precedence, not exclusivity: the same
/// key may legitimately hold a value in both tiers at once.
#[derive(Clone)]
pub struct CredentialStore {
    session: Arc<dyn Storage>,
    persistent: Arc<dyn Storage>,
}

impl CredentialStore {
    /// Build a store over the two tiers.
    pub fn new(session: Arc<dyn Storage>, persistent: Arc<dyn Storage>) -> Self {
        Self {
            session,
            persistent,
        }
    }

    /// Build a store backed by fresh in-memory tiers.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(MemoryStorage::new()),
        )
    }

    /// Build a store for an environment with no storage. Every operation is
    /// a no-op and every read returns `None`.
    pub fn detached() -> Self {
        Self::new(Arc::new(NoopStorage), Arc::new(NoopStorage))
    }

    fn tier(&self, tier: Tier) -> &dyn Storage {
        match tier {
            Tier::Session => self.session.as_ref(),
            Tier::Persistent => self.persistent.as_ref(),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        self.session.get(key).or_else(|| self.persistent.get(key))
    }

    /// Store the authentication token in the given tier.
    pub fn set_token(&self, token: &str, tier: Tier) {
        self.tier(tier).set(TOKEN_KEY, token);
    }

    /// Read the authentication token, session tier first.
    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    /// Store the user email in the given tier.
    pub fn set_email(&self, email: &str, tier: Tier) {
        self.tier(tier).set(EMAIL_KEY, email);
    }

    /// Read the user email, session tier first.
    pub fn email(&self) -> Option<String> {
        self.read(EMAIL_KEY)
    }

    /// Store the user role in the given tier.
    pub fn set_role(&self, role: &str, tier: Tier) {
        self.tier(tier).set(ROLE_KEY, role);
    }

    /// Read the user role, session tier first.
    pub fn role(&self) -> Option<String> {
        self.read(ROLE_KEY)
    }

    /// Remove every authentication key from both tiers, regardless of which
    /// tier originally held it.
    pub fn clear_auth(&self) {
        for key in CLEARED_KEYS {
            self.session.remove(key);
            self.persistent.remove(key);
        }
    }

    /// True iff a non-empty token is retrievable by read precedence.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|token| !token.is_empty())
    }
}
