//! Best-effort contact and experience extraction.
//!
//! These heuristics never fail: absence is reported as `None` or `0`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("Invalid email regex"));

static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*\+?\s*(?:years?|yrs?)\b").expect("Invalid experience regex")
});

static NAME_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*name\s*:\s*(.*?)\s*$").expect("Invalid name regex"));

/// Shown wherever a missing field is rendered
pub const NOT_FOUND: &str = "Not found";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    /// 0 when no mention was found
    pub years_experience: u32,
}

impl ContactInfo {
    pub fn extract(text: &str) -> Self {
        Self {
            name: extract_name(text),
            email: extract_email(text),
            years_experience: extract_years_experience(text),
        }
    }

    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or(NOT_FOUND)
    }

    pub fn email_or_default(&self) -> &str {
        self.email.as_deref().unwrap_or(NOT_FOUND)
    }
}

/// First email-looking token in the text
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First "<n> years" / "<n>+ yrs" mention; no aggregation across mentions
pub fn extract_years_experience(text: &str) -> u32 {
    YEARS_RE
        .captures(text)
        .and_then(|cap| cap.get(1))
        .and_then(|n| n.as_str().parse().ok())
        .unwrap_or(0)
}

/// A filled-in `Name:` line, else the first non-empty line that is not a
/// bare label
pub fn extract_name(text: &str) -> Option<String> {
    let labelled = text
        .lines()
        .filter_map(|line| NAME_LABEL_RE.captures(line))
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .find(|name| !name.is_empty())
        .map(str::to_string);

    labelled.or_else(|| {
        text.lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !NAME_LABEL_RE.is_match(line))
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_first_match_wins() {
        assert_eq!(
            extract_email("contact: a@x.com or b@y.com"),
            Some("a@x.com".to_string())
        );
        assert_eq!(
            extract_email("Reach me at jane.doe-smith@mail.example.org."),
            Some("jane.doe-smith@mail.example.org.".to_string())
        );
    }

    #[test]
    fn test_email_not_found() {
        assert_eq!(extract_email("no address here"), None);
        assert_eq!(extract_email("dangling @ sign"), None);
    }

    #[test]
    fn test_years_experience() {
        assert_eq!(extract_years_experience("5+ years of experience"), 5);
        assert_eq!(extract_years_experience("Over 12 Years in industry, 3 yrs lead"), 12);
        assert_eq!(extract_years_experience("7yrs"), 7);
        assert_eq!(extract_years_experience("10 + year contract"), 10);
        assert_eq!(extract_years_experience("no mention at all"), 0);
        assert_eq!(extract_years_experience("2019 yearly review"), 0);
    }

    #[test]
    fn test_years_experience_ignores_non_ascii_digits() {
        assert_eq!(extract_years_experience("\u{0665} years"), 0);
        assert_eq!(extract_years_experience("\u{0665} years, then 4 years abroad"), 4);
    }

    #[test]
    fn test_years_experience_overflow_is_not_found() {
        assert_eq!(extract_years_experience("99999999999999 years"), 0);
    }

    #[test]
    fn test_name_from_label() {
        let text = "Curriculum Vitae\nName: Jane Doe  \nEmail: jane@x.com";
        assert_eq!(extract_name(text), Some("Jane Doe".to_string()));
    }

    #[test]
    fn test_blank_name_label_falls_back_to_first_line() {
        assert_eq!(extract_name("Name:   \nJane Doe"), Some("Jane Doe".to_string()));
        assert_eq!(extract_name("Name:\n\n"), None);
    }

    #[test]
    fn test_name_from_first_line() {
        let text = "\n\n   John Smith\nSoftware Engineer";
        assert_eq!(extract_name(text), Some("John Smith".to_string()));
        assert_eq!(extract_name("   \n\t\n"), None);
    }

    #[test]
    fn test_contact_info_sentinels() {
        let info = ContactInfo::extract("");
        assert_eq!(info.name_or_default(), NOT_FOUND);
        assert_eq!(info.email_or_default(), NOT_FOUND);
        assert_eq!(info.years_experience, 0);
    }
}
