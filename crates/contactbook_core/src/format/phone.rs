//! Phone number display formatting.
//!
//! Rules:
//! - Non-digit characters are stripped first.
//! - Up to 10 digits: `(DD) DDDD-DDDD` (landline).
//! - More than 10 digits: `(DD) DDDDD-DDDD` (mobile).
//! - Digit strings that do not fit the pattern are returned unformatted.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("valid non-digit regex"));
static LANDLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})(\d{4})(\d{0,4})$").expect("valid landline regex"));
static MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})(\d{5})(\d{0,4})$").expect("valid mobile regex"));

/// Formats a raw phone number for display.
pub fn format_phone_number(phone: &str) -> String {
    let digits = NON_DIGIT_RE.replace_all(phone, "");
    let pattern = if digits.len() <= 10 {
        &*LANDLINE_RE
    } else {
        &*MOBILE_RE
    };
    pattern.replace(&digits, "($1) $2-$3").into_owned()
}
