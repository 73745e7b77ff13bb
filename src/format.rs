//! Input formatters: postal code and phone masks, slug generation.
//!
//! Pure string transforms. Partial input is always accepted and rendered
//! partially masked; nothing here returns an error.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Raw digits in a full postal code (CEP).
pub const POSTAL_CODE_DIGITS: usize = 8;

/// Raw digits in a mobile phone number with area code.
pub const PHONE_MAX_DIGITS: usize = 11;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_SLUG_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").unwrap());
static UNDERSCORE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Keep only ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Mask a postal code as `NNNNN-NNN`.
///
/// Extra digits beyond the eighth are dropped. The hyphen follows the fifth
/// digit as soon as five are present, so `"01001"` becomes `"01001-"`.
pub fn mask_postal_code(raw: &str) -> String {
    let digits: String = digits_only(raw).chars().take(POSTAL_CODE_DIGITS).collect();
    if digits.len() >= 5 {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits
    }
}

/// Mask a phone number as `(DD) DDDD-DDDD` (landline) or
/// `(DD) DDDDD-DDDD` (11 digits, mobile).
pub fn mask_phone(raw: &str) -> String {
    let digits: String = digits_only(raw).chars().take(PHONE_MAX_DIGITS).collect();
    let n = digits.len();
    match n {
        0 => String::new(),
        1..=2 => format!("({digits}"),
        3..=6 => format!("({}) {}", &digits[..2], &digits[2..]),
        7..=10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

/// Derive a URL-safe slug from a business name.
///
/// Output only contains `[a-z0-9_]`, with no leading, trailing or doubled
/// underscores. Idempotent.
pub fn generate_slug(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let without_marks: String = name.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let collapsed = WHITESPACE_RUN.replace_all(without_marks.trim(), "_");
    let replaced = NON_SLUG_CHAR.replace_all(&collapsed, "_");
    let single = UNDERSCORE_RUN.replace_all(&replaced, "_");

    single.trim_matches('_').to_ascii_lowercase()
}
