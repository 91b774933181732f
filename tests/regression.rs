#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Regression tests for senfi-security: HtmlSanitizer, InputSanitizer,
//! PasswordPolicy, CredentialStore, RateLimiter, UrlParameterGuard,
//! SessionWatcher, SecurityConfig.

use senfi_security::{
    CredentialStore, EngineKind, HtmlSanitizer, InputSanitizer, ManualClock, MemoryNavigator,
    MemoryStorage, PasswordPolicy, PasswordRule, PasswordStrength, RateLimiter, SecurityConfig,
    Navigator, SessionWatcher, Storage, Tier, UrlParameterGuard,
};
use std::sync::Arc;
use std::time::Duration;

// --- HtmlSanitizer ---

const INJECTION_VECTORS: [&str; 3] = [
    "<script>alert(1)</script>",
    "<img src=x onerror=alert(1)>",
    "<a href='javascript:alert(1)'>x</a>",
];

#[test]
fn test_injection_vectors_defeated_by_both_engines() {
    for sanitizer in [HtmlSanitizer::default(), HtmlSanitizer::fallback_only()] {
        for vector in INJECTION_VECTORS {
            let out = sanitizer.sanitize(vector).into_string().to_lowercase();
            assert!(!out.contains("<script"), "{vector} -> {out}");
            assert!(!out.contains("onerror="), "{vector} -> {out}");
            assert!(!out.contains("javascript:"), "{vector} -> {out}");
        }
    }
}

#[test]
fn test_sanitize_html_idempotent() {
    for sanitizer in [HtmlSanitizer::default(), HtmlSanitizer::fallback_only()] {
        for vector in INJECTION_VECTORS {
            let once = sanitizer.sanitize(vector).into_string();
            let twice = sanitizer.sanitize(&once).into_string();
            assert_eq!(once, twice);
        }
    }
}

#[test]
fn test_engine_provenance_is_queryable() {
    let strict = HtmlSanitizer::default().sanitize("<p>x</p>");
    assert_eq!(strict.engine(), EngineKind::Allowlist);
    assert!(strict.is_strict());

    let weak = HtmlSanitizer::fallback_only().sanitize("<p>x</p>");
    assert_eq!(weak.engine(), EngineKind::BlocklistFallback);
    assert!(!weak.is_strict());
}

#[test]
fn test_allowlist_keeps_rich_blog_content() {
    let sanitizer = HtmlSanitizer::default();
    let post = "<h2>خبر</h2><p>متن <strong>مهم</strong></p>\
                <ul><li>یک</li><li>دو</li></ul>\
                <a href=\"https://senfi.example/blog\" target=\"_blank\" rel=\"noopener\">ادامه</a>";
    let out = sanitizer.sanitize(post).into_string();
    assert!(out.contains("<h2>"));
    assert!(out.contains("<strong>"));
    assert!(out.contains("<li>"));
    assert!(out.contains("href=\"https://senfi.example/blog\""));
}

// --- InputSanitizer + URLs ---

#[test]
fn test_sanitize_input_bounds_length_after_removal() {
    let sanitizer = InputSanitizer::new(10);
    let cleaned = sanitizer.sanitize("<<<<1234567890ABC>>>>");
    assert_eq!(cleaned, "1234567890");
}

#[test]
fn test_sanitize_url_triple() {
    let sanitizer = InputSanitizer::default();
    assert_eq!(sanitizer.sanitize_url("example.com"), "https://example.com");
    assert_eq!(sanitizer.sanitize_url("javascript:alert(1)"), "");
    assert_eq!(sanitizer.sanitize_url("not a url"), "");
}

// --- PasswordPolicy ---

#[test]
fn test_password_boundaries() {
    let policy = PasswordPolicy::new();

    // Exactly 8 chars, all rules satisfied.
    let report = policy.validate("Aa1!bcde");
    assert!(report.is_valid);
    assert_eq!(report.strength, PasswordStrength::Medium);

    // Same shape at 12 chars.
    let report = policy.validate("Aa1!bcdefghi");
    assert!(report.is_valid);
    assert_eq!(report.strength, PasswordStrength::Strong);

    // 12 chars, missing the special character: any error disqualifies
    // strong regardless of length.
    let report = policy.validate("Aa1bcdefghij");
    assert!(!report.is_valid);
    assert!(report.errors.contains(&PasswordRule::SpecialChar));
    assert_ne!(report.strength, PasswordStrength::Strong);

    // 7 chars with several failed rules is weak.
    let report = policy.validate("abcdefg");
    assert!(!report.is_valid);
    assert_eq!(report.strength, PasswordStrength::Weak);
}

#[test]
fn test_password_errors_identify_rules_not_strings() {
    let report = PasswordPolicy::new().validate("alllowercase");
    assert!(report.errors.contains(&PasswordRule::Uppercase));
    assert!(report.errors.contains(&PasswordRule::Digit));
    assert!(report.errors.contains(&PasswordRule::SpecialChar));
    assert!(!report.errors.contains(&PasswordRule::MinLength));
    // Messages stay in lockstep with the rules for UI display.
    assert_eq!(report.messages().len(), report.errors.len());
}

// --- CredentialStore ---

#[test]
fn test_token_tier_precedence_and_session_end() {
    let session = Arc::new(MemoryStorage::new());
    let persistent = Arc::new(MemoryStorage::new());
    let store = CredentialStore::new(session.clone(), persistent);

    store.set_token("A", Tier::Persistent);
    store.set_token("B", Tier::Session);
    assert_eq!(store.token().unwrap(), "B");

    // Browsing context ends: the session tier is wiped, the persistent
    // remember-me value takes over.
    session.clear_all();
    assert_eq!(store.token().unwrap(), "A");
    assert!(store.is_authenticated());
}

#[test]
fn test_clear_auth_wipes_every_key_in_both_tiers() {
    let session = Arc::new(MemoryStorage::new());
    let persistent = Arc::new(MemoryStorage::new());
    let store = CredentialStore::new(session.clone(), persistent.clone());

    store.set_token("t", Tier::Session);
    store.set_email("member@senfi.example", Tier::Persistent);
    store.set_role("admin", Tier::Persistent);
    session.set("faculty", "science");
    persistent.set("dormitory", "block 2");

    store.clear_auth();

    assert!(session.is_empty());
    assert!(persistent.is_empty());
    assert!(!store.is_authenticated());
}

#[test]
fn test_detached_store_never_panics() {
    let store = CredentialStore::detached();
    store.set_token("t", Tier::Persistent);
    store.set_role("admin", Tier::Session);
    store.clear_auth();
    assert!(store.token().is_none());
    assert!(store.role().is_none());
    assert!(!store.is_authenticated());
}

// --- RateLimiter ---

#[test]
fn test_rate_limiter_window_boundary() {
    let clock = Arc::new(ManualClock::new(0));
    let limiter = RateLimiter::with_clock(clock.clone());
    let window = Duration::from_secs(60);

    for attempt in 1..=5 {
        assert!(
            limiter.is_allowed("login:member@senfi.example", 5, window),
            "attempt {attempt} should pass"
        );
    }
    assert!(!limiter.is_allowed("login:member@senfi.example", 5, window));

    clock.advance(window + Duration::from_millis(1));
    assert!(limiter.is_allowed("login:member@senfi.example", 5, window));
    assert_eq!(
        limiter.remaining_attempts("login:member@senfi.example", 5),
        4
    );
}

#[test]
fn test_rate_limiter_clear_after_success() {
    let limiter = RateLimiter::with_clock(Arc::new(ManualClock::new(0)));
    let window = Duration::from_secs(60);

    limiter.is_allowed("verify:code", 2, window);
    limiter.is_allowed("verify:code", 2, window);
    assert!(!limiter.is_allowed("verify:code", 2, window));

    limiter.clear("verify:code");
    assert!(limiter.is_allowed("verify:code", 2, window));
}

// --- UrlParameterGuard ---

#[test]
fn test_url_guard_strips_and_preserves_order() {
    let nav = Arc::new(MemoryNavigator::new(
        "https://senfi.example/blog?id=5&evil=1&page=2",
    ));
    let guard = UrlParameterGuard::new(nav.clone());

    guard.validate_and_clean();
    assert_eq!(nav.current_url(), "https://senfi.example/blog?id=5&page=2");
    assert_eq!(nav.replacement_count(), 1);

    // Re-running on the cleaned URL must not touch history again.
    guard.validate_and_clean();
    assert_eq!(nav.replacement_count(), 1);
}

#[test]
fn test_url_guard_handles_garbage_location() {
    let nav = Arc::new(MemoryNavigator::new("::not-a-url::"));
    let guard = UrlParameterGuard::new(nav.clone());
    guard.validate_and_clean();
    assert_eq!(nav.current_url(), "::not-a-url::");
    assert_eq!(nav.replacement_count(), 0);
}

// --- SessionWatcher ---

#[tokio::test]
async fn test_session_watcher_detects_logout() {
    let store = CredentialStore::in_memory();
    store.set_token("t", Tier::Session);

    let fired = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let flag = fired.clone();
    let _watcher = SessionWatcher::spawn(store.clone(), Duration::from_millis(10), move || {
        flag.store(true, std::sync::atomic::Ordering::SeqCst);
    });

    store.clear_auth();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(fired.load(std::sync::atomic::Ordering::SeqCst));
}

#[tokio::test]
async fn test_session_watcher_stop_is_deterministic() {
    let store = CredentialStore::in_memory();

    let fired = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let flag = fired.clone();
    let watcher = SessionWatcher::spawn(store, Duration::from_millis(30), move || {
        flag.store(true, std::sync::atomic::Ordering::SeqCst);
    });

    watcher.stop();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!fired.load(std::sync::atomic::Ordering::SeqCst));
}

// --- SecurityConfig wiring ---

#[test]
fn test_config_drives_components() {
    let config = SecurityConfig::from_toml_str(
        "max_input_length = 8\nmax_attempts = 2\nwindow_secs = 30\n",
    )
    .unwrap();

    let sanitizer = InputSanitizer::new(config.max_input_length);
    assert_eq!(sanitizer.sanitize("123456789"), "12345678");

    let limiter = RateLimiter::with_clock(Arc::new(ManualClock::new(0)));
    assert!(limiter.is_allowed("k", config.max_attempts, config.window()));
    assert!(limiter.is_allowed("k", config.max_attempts, config.window()));
    assert!(!limiter.is_allowed("k", config.max_attempts, config.window()));
}
