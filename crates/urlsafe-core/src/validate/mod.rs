//! Candidate URL validation.
//!
//! Decides whether raw user input is acceptable to submit for a safety check.
//! The rule is a single pattern over the trimmed, lowercased input, with an
//! allowlisted prefix for the provider's known-bad test pages.

mod candidate;

pub use candidate::{CandidateUrl, ValidationRejected, INVALID_INPUT_HINT};

use regex::Regex;
use std::sync::LazyLock;

/// Diagnostic pages served by the safety-check provider for known-bad URL testing.
/// Inputs starting with this prefix bypass the general pattern.
pub const TEST_BYPASS_PREFIX: &str = "http://testsafebrowsing.appspot.com/";

/// Optional scheme, optional `www.`, a name label, a dot, an alphabetic TLD of
/// at least two chars, then optionally a path, query or fragment.
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?[a-z0-9-]+\.[a-z]{2,}([/?#].*)?$")
        .expect("domain pattern is a valid regex")
});

/// Returns true if `input` is an acceptable candidate URL.
///
/// Leading and trailing whitespace is ignored; internal whitespace is not.
///
/// # Examples
///
/// - `is_valid_domain("example.com")` → `true`
/// - `is_valid_domain("https://www.example.com/path?q=1")` → `true`
/// - `is_valid_domain("192.168.0.1")` → `false`
pub fn is_valid_domain(input: &str) -> bool {
    let normalized = input.trim().to_ascii_lowercase();
    if normalized.starts_with(TEST_BYPASS_PREFIX) {
        return true;
    }
    DOMAIN_PATTERN.is_match(&normalized)
}
