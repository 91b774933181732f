use regex::Regex;

/// Default cap on sanitized free-text length, in characters.
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 1000;

/// Sanitizer for free-text form input, URLs, and email addresses.
///
/// All methods are pure and never panic; malformed input maps to a safe
/// default (`""` or `false`) rather than an error.
pub struct InputSanitizer {
    max_length: usize,
    protocols: Regex,
    handlers: Regex,
    url_shape: Regex,
    email: Regex,
}

impl Default for InputSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_LENGTH)
    }
}

impl InputSanitizer {
    /// Create a sanitizer truncating free text to `max_length` characters.
    #[allow(clippy::expect_used)]
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            protocols: Regex::new(
                r"(?i)javascript:|vbscript:|data:text/html|data:application/javascript",
            )
            .expect("Failed to compile protocol pattern"),
            handlers: Regex::new(r"(?i)on\w+\s*=").expect("Failed to compile handler pattern"),
            // Permissive host.tld shape with optional scheme and path.
            url_shape: Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$")
                .expect("Failed to compile URL pattern"),
            email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
                .expect("Failed to compile email pattern"),
        }
    }

    /// Strip dangerous characters and protocol strings from free text.
    ///
    /// Removes literal `<`/`>`, dangerous protocol substrings, and inline
    /// event-handler patterns, trims whitespace, then truncates to the
    /// configured maximum. Truncation runs last, so the result is always at
    /// most `max_length` characters.
    pub fn sanitize(&self, input: &str) -> String {
        let without_angles: String = input.chars().filter(|c| *c != '<' && *c != '>').collect();
        let without_protocols = self.protocols.replace_all(&without_angles, "");
        let without_handlers = self.handlers.replace_all(&without_protocols, "");
        without_handlers.trim().chars().take(self.max_length).collect()
    }

    /// Validate and normalize a URL.
    ///
    /// Returns `""` unless the value matches a permissive `host.tld` shape.
    /// A passing value without a scheme is prefixed with `https://`. Values
    /// starting with `javascript:`, `vbscript:`, or `data:` are rejected
    /// after shape validation so they cannot slip through on shape alone.
    pub fn sanitize_url(&self, input: &str) -> String {
        if input.is_empty() || !self.url_shape.is_match(input) {
            return String::new();
        }

        let url = if input.starts_with("http://") || input.starts_with("https://") {
            input.to_string()
        } else {
            format!("https://{input}")
        };

        if url.starts_with("javascript:") || url.starts_with("vbscript:") || url.starts_with("data:")
        {
            return String::new();
        }

        url
    }

    /// Whether `input` looks like an email address.
    pub fn validate_email(&self, input: &str) -> bool {
        if input.is_empty() {
            return false;
        }
        self.email.is_match(&input.trim().to_lowercase())
    }
}
