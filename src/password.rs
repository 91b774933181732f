use serde::{Deserialize, Serialize};

/// Special characters accepted by the special-character rule.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// One password rule. Each variant carries the fixed user-facing message
/// shown by the platform UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRule {
    /// At least 8 characters.
    MinLength,
    /// Contains an uppercase letter.
    Uppercase,
    /// Contains a lowercase letter.
    Lowercase,
    /// Contains a digit.
    Digit,
    /// Contains one of [`SPECIAL_CHARS`].
    SpecialChar,
}

impl PasswordRule {
    /// The user-facing message for this rule (contract text from the
    /// platform UI, in Persian).
    pub fn message(self) -> &'static str {
        match self {
            Self::MinLength => "رمز عبور باید حداقل 8 کاراکتر باشد",
            Self::Uppercase => "رمز عبور باید شامل حروف بزرگ باشد",
            Self::Lowercase => "رمز عبور باید شامل حروف کوچک باشد",
            Self::Digit => "رمز عبور باید شامل اعداد باشد",
            Self::SpecialChar => "رمز عبور باید شامل کاراکترهای خاص باشد",
        }
    }
}

/// Password strength class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    /// Fails the medium bar.
    Weak,
    /// At least 8 characters with at most 2 failed rules.
    Medium,
    /// At least 12 characters with no failed rules.
    Strong,
}

/// Outcome of validating one password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordReport {
    /// True iff no rule failed.
    pub is_valid: bool,
    /// Rules the password failed, in rule order.
    pub errors: Vec<PasswordRule>,
    /// Strength class.
    pub strength: PasswordStrength,
}

impl PasswordReport {
    /// User-facing messages for the failed rules.
    pub fn messages(&self) -> Vec<&'static str> {
        self.errors.iter().map(|rule| rule.message()).collect()
    }
}

/// Password-strength policy.
///
/// Five rules, each checked independently. Strength keeps the platform's
/// two-branch precedence: `strong` requires length >= 12 and zero errors,
/// otherwise `medium` requires length >= 8 and at most 2 errors, otherwise
/// `weak`. A 12+-character password with a single failed rule therefore
/// drops all the way past `strong` to whatever the medium branch decides —
/// observed behavior, kept as contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Create the policy.
    pub fn new() -> Self {
        Self
    }

    /// Validate `password` against every rule and classify its strength.
    pub fn validate(&self, password: &str) -> PasswordReport {
        let length = password.chars().count();
        let mut errors = Vec::new();

        if length < 8 {
            errors.push(PasswordRule::MinLength);
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push(PasswordRule::Uppercase);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            errors.push(PasswordRule::Lowercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push(PasswordRule::Digit);
        }
        if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
            errors.push(PasswordRule::SpecialChar);
        }

        let strength = if length >= 12 && errors.is_empty() {
            PasswordStrength::Strong
        } else if length >= 8 && errors.len() <= 2 {
            PasswordStrength::Medium
        } else {
            PasswordStrength::Weak
        };

        PasswordReport {
            is_valid: errors.is_empty(),
            errors,
            strength,
        }
    }
}
