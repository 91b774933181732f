//! Security primitives for the Senfi student-union web platform.
//!
//! Provides HTML and input sanitization, URL validation, password-strength
//! policy, dual-tier credential storage, fixed-window rate limiting, and a
//! query-parameter allowlist guard used throughout the front end.
//!
//! # Main types
//!
//! - [`HtmlSanitizer`] — Allowlist HTML cleaner with a blocklist fallback.
//! - [`InputSanitizer`] — Free-text, URL, and email sanitization.
//! - [`PasswordPolicy`] — Password-strength validation and classification.
//! - [`CredentialStore`] — Session/persistent-tier token storage.
//! - [`RateLimiter`] — Fixed-window attempt counter for sensitive actions.
//! - [`UrlParameterGuard`] — Query-parameter allowlist scrubber.
//! - [`SessionWatcher`] — Background session-liveness polling.

/// Configuration loading.
pub mod config;
/// Credential storage across session and persistent tiers.
pub mod credentials;
/// Error types.
pub mod error;
/// HTML sanitization with allowlist and fallback engines.
pub mod html;
/// Free-text, URL, and email sanitization.
pub mod input;
/// Password-strength policy.
pub mod password;
/// Sanitization allowlist policy.
pub mod policy;
/// Fixed-window rate limiting.
pub mod rate_limit;
/// Session-liveness polling.
pub mod session_watch;
/// URL query-parameter allowlist guard.
pub mod url_guard;

pub use config::SecurityConfig;
pub use credentials::{CredentialStore, MemoryStorage, NoopStorage, Storage, Tier};
pub use error::{SecurityError, SecurityResult};
pub use html::{EngineKind, HtmlSanitizer, SanitizedHtml};
pub use input::InputSanitizer;
pub use password::{PasswordPolicy, PasswordReport, PasswordRule, PasswordStrength};
pub use policy::SanitizationPolicy;
pub use rate_limit::{Clock, ManualClock, RateLimiter, SystemClock};
pub use session_watch::SessionWatcher;
pub use url_guard::{MemoryNavigator, Navigator, UrlParameterGuard};
