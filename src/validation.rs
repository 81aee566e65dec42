use crate::data_models::{ContactForm, ContactSubmission};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use thiserror::Error;
use validator::Validate;

pub const NAME_VIOLATION: &str = "Name must be at least 2 characters long";
pub const EMAIL_VIOLATION: &str = "Please provide a valid email address";
pub const PHONE_VIOLATION: &str = "Please provide a valid phone number";
pub const MESSAGE_VIOLATION: &str = "Message must be at least 10 characters long";

const FIELD_VIOLATIONS: [(&str, &str); 4] = [
    ("name", NAME_VIOLATION),
    ("email", EMAIL_VIOLATION),
    ("phone", PHONE_VIOLATION),
    ("message", MESSAGE_VIOLATION),
];

const NAME_MIN_LEN: usize = 2;
const MESSAGE_MIN_LEN: usize = 10;

// Whitespace as browsers define it for `\s` and `String.prototype.trim`:
// includes U+FEFF, excludes U+0085.
const SPACE_CLASS: &str = r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

pub static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^[^{SPACE_CLASS}@]+@[^{SPACE_CLASS}@]+\.[^{SPACE_CLASS}@]+$"
    ))
    .expect("valid email pattern")
});

// Separators count toward the minimum length, only the character set is checked.
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\+?[0-9{SPACE_CLASS}-]{{10,}}$")).expect("valid phone pattern")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed: {}", .0.join("; "))]
pub struct ValidationError(Vec<&'static str>);

impl ValidationError {
    pub fn errors(&self) -> &[&'static str] {
        &self.0
    }
}

fn is_browser_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Length in UTF-16 code units after trimming, the way the form scripts measure it.
fn trimmed_len(value: &str) -> usize {
    value
        .trim_matches(is_browser_whitespace)
        .encode_utf16()
        .count()
}

fn min_trimmed_len(
    value: &str,
    min: usize,
    message: &'static str,
) -> Result<(), validator::ValidationError> {
    if trimmed_len(value) >= min {
        return Ok(());
    }
    let mut err = validator::ValidationError::new("length");
    err.message = Some(Cow::Borrowed(message));
    Err(err)
}

pub fn validate_name(value: &str) -> Result<(), validator::ValidationError> {
    min_trimmed_len(value, NAME_MIN_LEN, NAME_VIOLATION)
}

pub fn validate_message(value: &str) -> Result<(), validator::ValidationError> {
    min_trimmed_len(value, MESSAGE_MIN_LEN, MESSAGE_VIOLATION)
}

/// Checks every field of a form and returns one message per failing field,
/// ordered name, email, phone, message. An empty result means the form is valid.
pub fn validate_form(form: &ContactForm) -> Vec<&'static str> {
    let Err(errors) = form.validate() else {
        return Vec::new();
    };
    let fields = errors.field_errors();
    FIELD_VIOLATIONS
        .iter()
        .filter(|(field, _)| fields.contains_key(*field))
        .map(|(_, violation)| *violation)
        .collect()
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = ValidationError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let errors = validate_form(&form);
        if !errors.is_empty() {
            return Err(ValidationError(errors));
        }
        Ok(Self {
            name: form.name,
            email: form.email,
            phone: form.phone,
            message: form.message,
        })
    }
}
