//! Customer record, normalization and validation rules.
//!
//! # Responsibility
//! - Define the `Customer` record persisted in the `customers` table.
//! - Provide pure helpers so callers can pre-validate form input.
//!
//! # Invariants
//! - `normalize_phone` keeps ASCII digits only and is idempotent.
//! - A normalized customer has trimmed text fields and `email = None` for
//!   empty input.
//! - Trimming strips ASCII space and control characters (`<= U+0020`) only.
//!   Blankness uses the separator set of [`is_blank`], which excludes the
//!   no-break spaces, so `"\u{a0}"` is a valid name and `"\u{1}"` is not.
//! - `validate()` accepts only phones of 7 to 11 digits, non-blank name and
//!   address, and an absent or pattern-valid email.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shortest accepted phone, in digits.
pub const PHONE_MIN_DIGITS: usize = 7;
/// Longest accepted phone, in digits.
pub const PHONE_MAX_DIGITS: usize = 11;

const INVALID_EMAIL_MESSAGE: &str = "Invalid email. Use format name@example.com.";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Customer record keyed by phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Primary key. Digits only once normalized.
    pub phone: String,
    pub name: String,
    pub address: String,
    /// Optional contact email. Empty input is stored as `None`.
    pub email: Option<String>,
}

/// Validation failure for customer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerValidationError {
    /// Phone does not have 7 to 11 digits after normalization.
    InvalidPhone { digits: usize },
    EmptyName,
    EmptyAddress,
    /// Email is present but does not look like `local@domain.tld`.
    InvalidEmail,
}

impl Display for CustomerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPhone { digits } => write!(
                f,
                "phone must have {PHONE_MIN_DIGITS}-{PHONE_MAX_DIGITS} digits, got {digits}"
            ),
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::EmptyAddress => write!(f, "address cannot be empty"),
            Self::InvalidEmail => write!(f, "{INVALID_EMAIL_MESSAGE}"),
        }
    }
}

impl Error for CustomerValidationError {}

impl Customer {
    /// Creates a customer from raw, possibly unnormalized input.
    pub fn new(
        phone: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            name: name.into(),
            address: address.into(),
            email,
        }
    }

    /// Returns a copy with every field normalized.
    pub fn normalized(&self) -> Self {
        Self {
            phone: normalize_phone(&self.phone),
            name: normalize_text(Some(&self.name)),
            address: normalize_text(Some(&self.address)),
            email: normalize_email(self.email.as_deref()),
        }
    }

    /// Validates an already normalized customer.
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        if !is_valid_phone(&self.phone) {
            return Err(CustomerValidationError::InvalidPhone {
                digits: normalize_phone(&self.phone).len(),
            });
        }
        if !is_valid_name(&self.name) {
            return Err(CustomerValidationError::EmptyName);
        }
        if !is_valid_address(&self.address) {
            return Err(CustomerValidationError::EmptyAddress);
        }
        if email_error(self.email.as_deref().unwrap_or("")).is_some() {
            return Err(CustomerValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Email as stored text, empty when absent.
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}

/// Strips every character that is not an ASCII digit.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Treats missing text as empty and trims surrounding space and control characters.
pub fn normalize_text(raw: Option<&str>) -> String {
    trim_text(raw.unwrap_or("")).to_string()
}

/// Strips leading and trailing characters at or below U+0020.
pub fn trim_text(raw: &str) -> &str {
    raw.trim_matches(|ch: char| ch <= ' ')
}

/// Returns whether every character is a blank separator.
///
/// Blank separators are the Unicode space, line and paragraph separators
/// except the no-break spaces (U+00A0, U+2007, U+202F), plus `\t`, `\n`,
/// U+000B, U+000C, `\r` and U+001C..=U+001F. U+0085 is not blank.
pub fn is_blank(raw: &str) -> bool {
    raw.chars().all(is_blank_char)
}

fn is_blank_char(ch: char) -> bool {
    ('\u{1c}'..='\u{1f}').contains(&ch)
        || (ch.is_whitespace() && !matches!(ch, '\u{85}' | '\u{a0}' | '\u{2007}' | '\u{202f}'))
}

/// Trims an email and folds empty input into `None`.
pub fn normalize_email(raw: Option<&str>) -> Option<String> {
    let trimmed = normalize_text(raw);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Returns whether the phone has 7 to 11 digits after normalization.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = normalize_phone(phone).len();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

pub fn is_valid_name(name: &str) -> bool {
    !is_blank(trim_text(name))
}

pub fn is_valid_address(address: &str) -> bool {
    !is_blank(trim_text(address))
}

/// Returns whether the email is blank or matches `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    let trimmed = trim_text(email);
    is_blank(trimmed) || EMAIL_RE.is_match(trimmed)
}

/// Returns a user-facing message when the email is present and malformed.
pub fn email_error(email: &str) -> Option<&'static str> {
    if is_valid_email(email) {
        None
    } else {
        Some(INVALID_EMAIL_MESSAGE)
    }
}
