use crate::policy::SanitizationPolicy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::warn;

/// Which engine produced a sanitized string.
///
/// The blocklist fallback only strips known-dangerous constructs; callers
/// that need a strict guarantee must check for [`EngineKind::Allowlist`]
/// rather than trusting the output unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// DOM-aware allowlist engine: only policy-approved markup survives.
    Allowlist,
    /// Pattern-based blocklist scrubber: weaker, removes known vectors only.
    BlocklistFallback,
}

/// Sanitized HTML together with the engine that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedHtml {
    html: String,
    engine: EngineKind,
}

impl SanitizedHtml {
    /// The sanitized markup.
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Consume into the sanitized markup.
    pub fn into_string(self) -> String {
        self.html
    }

    /// Which engine produced this result.
    pub fn engine(&self) -> EngineKind {
        self.engine
    }

    /// True when the allowlist engine produced this result.
    pub fn is_strict(&self) -> bool {
        self.engine == EngineKind::Allowlist
    }
}

impl fmt::Display for SanitizedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// HTML sanitizer with a two-variant strategy.
///
/// The primary path parses and re-serializes the input, keeping only
/// markup approved by the [`SanitizationPolicy`]. The fallback scrubs
/// known-dangerous constructs by pattern. Any primary-path failure is caught
/// and routed to the fallback rather than surfaced to the caller.
pub struct HtmlSanitizer {
    engine: Engine,
}

enum Engine {
    Allowlist {
        cleaner: ammonia::Builder<'static>,
        fallback: FallbackScrubber,
    },
    Fallback(FallbackScrubber),
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new(&SanitizationPolicy::default())
    }
}

impl HtmlSanitizer {
    /// Build a sanitizer using the allowlist engine configured from `policy`.
    pub fn new(policy: &SanitizationPolicy) -> Self {
        let mut cleaner = ammonia::Builder::default();
        cleaner
            .tags(policy.allowed_tags.clone())
            .generic_attributes(policy.allowed_attributes.clone())
            .url_schemes(policy.allowed_url_schemes.clone())
            // The policy allows `rel` explicitly; ammonia forbids that while
            // it also injects its own rel value.
            .link_rel(None)
            .strip_comments(true);

        Self {
            engine: Engine::Allowlist {
                cleaner,
                fallback: FallbackScrubber::new(),
            },
        }
    }

    /// Build a sanitizer that only uses the blocklist fallback.
    ///
    /// For contexts where the allowlist engine must not run. The output
    /// carries [`EngineKind::BlocklistFallback`] and is not safe against
    /// novel vectors.
    pub fn fallback_only() -> Self {
        Self {
            engine: Engine::Fallback(FallbackScrubber::new()),
        }
    }

    /// Sanitize `input`. Never panics; empty input yields an empty result.
    pub fn sanitize(&self, input: &str) -> SanitizedHtml {
        match &self.engine {
            Engine::Allowlist { cleaner, fallback } => {
                if input.is_empty() {
                    return SanitizedHtml {
                        html: String::new(),
                        engine: EngineKind::Allowlist,
                    };
                }
                match catch_unwind(AssertUnwindSafe(|| cleaner.clean(input).to_string())) {
                    Ok(html) => SanitizedHtml {
                        html,
                        engine: EngineKind::Allowlist,
                    },
                    Err(_) => {
                        warn!("allowlist HTML engine failed, using blocklist fallback");
                        SanitizedHtml {
                            html: fallback.scrub(input),
                            engine: EngineKind::BlocklistFallback,
                        }
                    }
                }
            }
            Engine::Fallback(fallback) => SanitizedHtml {
                html: fallback.scrub(input),
                engine: EngineKind::BlocklistFallback,
            },
        }
    }
}

/// Blocklist scrubber: removes known-dangerous elements, protocol strings,
/// and inline event handlers. Weaker than the allowlist engine.
struct FallbackScrubber {
    containers: Vec<Regex>,
    protocols: Regex,
    handlers: Regex,
}

const DANGEROUS_ELEMENTS: [&str; 4] = ["script", "iframe", "object", "embed"];

impl FallbackScrubber {
    #[allow(clippy::expect_used)]
    fn new() -> Self {
        let containers = DANGEROUS_ELEMENTS
            .iter()
            .map(|tag| {
                Regex::new(&format!(r"(?is)<{tag}\b.*?</{tag}>"))
                    .expect("Failed to compile element pattern")
            })
            .collect();
        Self {
            containers,
            protocols: Regex::new(
                r"(?i)javascript:|vbscript:|data:text/html|data:application/javascript",
            )
            .expect("Failed to compile protocol pattern"),
            handlers: Regex::new(r"(?i)on\w+\s*=").expect("Failed to compile handler pattern"),
        }
    }

    fn scrub(&self, input: &str) -> String {
        let mut out = input.to_string();
        for re in &self.containers {
            out = re.replace_all(&out, "").into_owned();
        }
        out = self.protocols.replace_all(&out, "").into_owned();
        out = self.handlers.replace_all(&out, "").into_owned();
        out.trim().to_string()
    }
}
