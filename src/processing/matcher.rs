//! Skill matching and scoring

use crate::processing::tokenizer::{normalize_phrase, SkillSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of comparing a required skill set against a candidate skill set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub required: SkillSet,
    pub candidate: SkillSet,
    pub matched: SkillSet,
    pub missing: SkillSet,
    /// Percentage of `required` present in `candidate`, rounded to 2 decimals
    pub score_percent: f64,
}

/// Must-have list split by presence, in the caller's order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MustHaveResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrength {
    Strong,
    Moderate,
    Weak,
}

pub const STRONG_MATCH_THRESHOLD: f64 = 70.0;
pub const MODERATE_MATCH_THRESHOLD: f64 = 40.0;

/// Intersect and diff the two sets and score the overlap.
///
/// An empty `required` set scores 0 rather than being treated as
/// trivially satisfied.
pub fn match_skills(required: &SkillSet, candidate: &SkillSet) -> MatchResult {
    let matched: SkillSet = required.intersection(candidate).cloned().collect();
    let missing: SkillSet = required.difference(candidate).cloned().collect();

    MatchResult {
        score_percent: score_percent(matched.len(), required.len()),
        required: required.clone(),
        candidate: candidate.clone(),
        matched,
        missing,
    }
}

pub fn score_percent(matched: usize, required: usize) -> f64 {
    if required == 0 {
        return 0.0;
    }
    round2(100.0 * matched as f64 / required as f64)
}

/// Two decimals, exact halves to even: 1/32 is 3.12, not 3.13
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Partition `must_have` by presence in `candidate`, keeping list order and
/// duplicates
pub fn partition_must_have(must_have: &[String], candidate: &SkillSet) -> MustHaveResult {
    let mut result = MustHaveResult::default();

    for skill in must_have {
        let normalized = normalize_phrase(skill);
        if normalized.is_empty() {
            continue;
        }
        if candidate.contains(&normalized) {
            result.matched.push(normalized);
        } else {
            result.missing.push(normalized);
        }
    }

    result
}

/// Parse a comma-separated must-have string: "Python, SQL ,,aws"
pub fn parse_must_have_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(normalize_phrase)
        .filter(|s| !s.is_empty())
        .collect()
}

impl MatchResult {
    pub fn strength(&self) -> MatchStrength {
        MatchStrength::from_score(self.score_percent)
    }
}

impl MustHaveResult {
    pub fn all_present(&self) -> bool {
        self.missing.is_empty()
    }
}

impl MatchStrength {
    pub fn from_score(score_percent: f64) -> Self {
        if score_percent >= STRONG_MATCH_THRESHOLD {
            MatchStrength::Strong
        } else if score_percent >= MODERATE_MATCH_THRESHOLD {
            MatchStrength::Moderate
        } else {
            MatchStrength::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchStrength::Strong => "strong match",
            MatchStrength::Moderate => "moderate match",
            MatchStrength::Weak => "weak match",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            MatchStrength::Strong => "Great match! You are ready to apply.",
            MatchStrength::Moderate => "Decent match. You may want to improve your resume.",
            MatchStrength::Weak => "Low match. Consider adding more relevant skills.",
        }
    }
}

impl fmt::Display for MatchStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_partitions_required_set() {
        let required = set(&["python", "sql", "aws"]);
        let candidate = set(&["python", "sql", "docker"]);

        let result = match_skills(&required, &candidate);

        assert_eq!(result.matched, set(&["python", "sql"]));
        assert_eq!(result.missing, set(&["aws"]));
        assert_eq!(result.score_percent, 66.67);

        let union: SkillSet = result.matched.union(&result.missing).cloned().collect();
        assert_eq!(union, required);
        assert!(result.matched.is_disjoint(&result.missing));
    }

    #[test]
    fn test_empty_required_set_scores_zero() {
        let result = match_skills(&SkillSet::new(), &set(&["python"]));
        assert_eq!(result.score_percent, 0.0);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_score_bounds() {
        assert_eq!(score_percent(0, 3), 0.0);
        assert_eq!(score_percent(3, 3), 100.0);
        assert_eq!(score_percent(1, 3), 33.33);
        assert_eq!(score_percent(1, 8), 12.5);
    }

    #[test]
    fn test_strength_bands_include_lower_bound() {
        assert_eq!(MatchStrength::from_score(100.0), MatchStrength::Strong);
        assert_eq!(MatchStrength::from_score(70.0), MatchStrength::Strong);
        assert_eq!(MatchStrength::from_score(69.99), MatchStrength::Moderate);
        assert_eq!(MatchStrength::from_score(40.0), MatchStrength::Moderate);
        assert_eq!(MatchStrength::from_score(39.99), MatchStrength::Weak);
        assert_eq!(MatchStrength::from_score(0.0), MatchStrength::Weak);
    }

    #[test]
    fn test_must_have_preserves_order_and_duplicates() {
        let candidate = set(&["python", "docker"]);
        let must_have = vec![
            "Docker".to_string(),
            "aws".to_string(),
            "python".to_string(),
            "docker".to_string(),
        ];

        let result = partition_must_have(&must_have, &candidate);

        assert_eq!(result.matched, vec!["docker", "python", "docker"]);
        assert_eq!(result.missing, vec!["aws"]);
        assert!(!result.all_present());
    }

    #[test]
    fn test_parse_must_have_list() {
        assert_eq!(
            parse_must_have_list("Python, SQL ,,  machine   learning ,"),
            vec!["python", "sql", "machine learning"]
        );
        assert!(parse_must_have_list(" , ").is_empty());
    }

    #[test]
    fn test_score_rounds_half_to_even() {
        assert_eq!(score_percent(1, 32), 3.12);
        assert_eq!(score_percent(1, 160), 0.62);
        assert_eq!(score_percent(3, 32), 9.38);
    }
}
