use serde::Serialize;
use std::collections::HashSet;

/// Allowlists driving the primary HTML sanitization engine.
///
/// Every tag and attribute emitted by the sanitizer is a member of the
/// respective set; URI-valued attributes must carry an allowed scheme (or no
/// scheme at all) or the attribute is dropped. The policy is built once and
/// never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizationPolicy {
    /// Tags kept by the allowlist engine.
    pub allowed_tags: HashSet<&'static str>,
    /// Attributes kept on any allowed tag.
    pub allowed_attributes: HashSet<&'static str>,
    /// URI schemes accepted on `href`/`src` values. Scheme-less (relative)
    /// values pass regardless.
    pub allowed_url_schemes: HashSet<&'static str>,
}

impl Default for SanitizationPolicy {
    fn default() -> Self {
        Self {
            allowed_tags: [
                "p", "br", "strong", "em", "u", "s", "h1", "h2", "h3", "h4", "h5", "h6", "ul",
                "ol", "li", "blockquote", "code", "pre", "a", "img", "div", "span",
            ]
            .into_iter()
            .collect(),
            allowed_attributes: ["href", "src", "alt", "title", "class", "id", "target", "rel"]
                .into_iter()
                .collect(),
            allowed_url_schemes: [
                "http", "https", "ftp", "ftps", "mailto", "tel", "callto", "cid", "xmpp",
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl SanitizationPolicy {
    /// Whether a tag survives sanitization.
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.allowed_tags.contains(tag)
    }

    /// Whether an attribute survives sanitization.
    pub fn allows_attribute(&self, attr: &str) -> bool {
        self.allowed_attributes.contains(attr)
    }

    /// Whether a URI scheme is accepted on URL-valued attributes.
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.allowed_url_schemes.contains(scheme)
    }
}
