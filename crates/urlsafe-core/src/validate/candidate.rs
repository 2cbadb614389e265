//! Validated candidate URL newtype.

use std::fmt;

use super::is_valid_domain;

/// Hint shown to the user when their input is rejected.
pub const INVALID_INPUT_HINT: &str =
    "Please enter a valid website address:\nexample.com, www.example.com or http://www.example.com";

/// Input did not match any accepted format. Expected user feedback, not a system failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", INVALID_INPUT_HINT)]
pub struct ValidationRejected {
    /// The raw input as typed.
    pub input: String,
}

/// A candidate URL that passed validation, stored trimmed with case preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUrl(String);

impl CandidateUrl {
    /// Validates `input` and wraps the trimmed value.
    pub fn parse(input: &str) -> Result<Self, ValidationRejected> {
        if !is_valid_domain(input) {
            tracing::debug!(input, "candidate rejected");
            return Err(ValidationRejected {
                input: input.to_string(),
            });
        }
        Ok(Self(input.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CandidateUrl {
    type Err = ValidationRejected;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_keeps_case() {
        let url = CandidateUrl::parse("  HTTPS://Example.com/Path  ").unwrap();
        assert_eq!(url.as_str(), "HTTPS://Example.com/Path");
        assert_eq!(url.to_string(), "HTTPS://Example.com/Path");
    }

    #[test]
    fn parse_rejects_with_hint() {
        let err = CandidateUrl::parse("notadomain").unwrap_err();
        assert_eq!(err.input, "notadomain");
        assert!(err.to_string().starts_with("Please enter a valid website address"));
    }

    #[test]
    fn parse_rejects_non_ascii_label() {
        let err = CandidateUrl::parse("exa\u{212A}ple.com").unwrap_err();
        assert_eq!(err.input, "exa\u{212A}ple.com");
    }

    #[test]
    fn from_str_matches_parse() {
        let url: CandidateUrl = "www.example.com".parse().unwrap();
        assert_eq!(url.as_str(), "www.example.com");
        assert!("http://".parse::<CandidateUrl>().is_err());
    }
}
