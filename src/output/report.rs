//! Report structures built from a screening outcome

use crate::config::VocabularyMode;
use crate::processing::candidate::CandidateRecord;
use crate::processing::matcher::MatchStrength;
use crate::processing::screener::ScreeningOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a formatter needs to render one screening run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub metadata: ReportMetadata,

    /// Skills derived from the job description, sorted
    pub required_skills: Vec<String>,

    pub must_have_skills: Vec<String>,
    pub min_years_experience: u32,

    /// Ranked candidates, best first
    pub candidates: Vec<CandidateSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub screener_version: String,
    /// Job description file, or "inline" for pasted text
    pub job_source: String,
    pub vocabulary_mode: VocabularyMode,
    pub processing_time_ms: u64,
}

/// Fixed-layout summary of one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    /// 1-based position in the ranking
    pub rank: usize,
    pub identifier: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub years_experience: u32,
    pub score_percent: f64,
    pub strength: MatchStrength,
    pub verdict: String,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub must_have_matched: Vec<String>,
    pub must_have_missing: Vec<String>,
    pub meets_experience: bool,
    pub shortlisted: bool,
}

impl ScreeningReport {
    pub fn from_outcome(
        outcome: &ScreeningOutcome,
        job_source: impl Into<String>,
        vocabulary_mode: VocabularyMode,
    ) -> Self {
        let candidates = outcome
            .ranked
            .iter()
            .enumerate()
            .map(|(idx, record)| CandidateSummary::from_record(idx + 1, record))
            .collect();

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                screener_version: env!("CARGO_PKG_VERSION").to_string(),
                job_source: job_source.into(),
                vocabulary_mode,
                processing_time_ms: outcome.processing_time_ms,
            },
            required_skills: outcome.required.iter().cloned().collect(),
            must_have_skills: outcome.must_have_skills.clone(),
            min_years_experience: outcome.min_years_experience,
            candidates,
        }
    }

    /// Keep only shortlisted candidates; ranks are left as assigned
    pub fn shortlist_only(mut self) -> Self {
        self.candidates.retain(|c| c.shortlisted);
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.must_have_skills.is_empty() || self.min_years_experience > 0
    }
}

impl CandidateSummary {
    pub fn from_record(rank: usize, record: &CandidateRecord) -> Self {
        let strength = record.strength();
        let (must_have_matched, must_have_missing) = match &record.must_have {
            Some(result) => (result.matched.clone(), result.missing.clone()),
            None => (Vec::new(), Vec::new()),
        };

        Self {
            rank,
            identifier: record.identifier.clone(),
            name: record.contact.name.clone(),
            email: record.contact.email.clone(),
            years_experience: record.contact.years_experience,
            score_percent: record.score_percent(),
            strength,
            verdict: strength.verdict().to_string(),
            matched: record.match_result.matched.iter().cloned().collect(),
            missing: record.match_result.missing.iter().cloned().collect(),
            must_have_matched,
            must_have_missing,
            meets_experience: record.meets_experience,
            shortlisted: record.passes_filters(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Small two-candidate report used by formatter tests
    pub fn sample_report() -> ScreeningReport {
        ScreeningReport {
            metadata: ReportMetadata {
                generated_at: DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
                screener_version: "0.1.0".to_string(),
                job_source: "job.txt".to_string(),
                vocabulary_mode: VocabularyMode::Reference,
                processing_time_ms: 3,
            },
            required_skills: vec!["aws".into(), "python".into(), "sql".into()],
            must_have_skills: vec!["aws".into()],
            min_years_experience: 2,
            candidates: vec![
                CandidateSummary {
                    rank: 1,
                    identifier: "jane.pdf".into(),
                    name: Some("Jane <Doe>".into()),
                    email: Some("jane@example.com".into()),
                    years_experience: 5,
                    score_percent: 66.67,
                    strength: MatchStrength::Moderate,
                    verdict: MatchStrength::Moderate.verdict().into(),
                    matched: vec!["python".into(), "sql".into()],
                    missing: vec!["aws".into()],
                    must_have_matched: vec![],
                    must_have_missing: vec!["aws".into()],
                    meets_experience: true,
                    shortlisted: false,
                },
                CandidateSummary {
                    rank: 2,
                    identifier: "john.txt".into(),
                    name: None,
                    email: None,
                    years_experience: 0,
                    score_percent: 0.0,
                    strength: MatchStrength::Weak,
                    verdict: MatchStrength::Weak.verdict().into(),
                    matched: vec![],
                    missing: vec!["aws".into(), "python".into(), "sql".into()],
                    must_have_matched: vec![],
                    must_have_missing: vec!["aws".into()],
                    meets_experience: false,
                    shortlisted: false,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::candidate::{CandidateDocument, ScreeningRequest};
    use crate::processing::screener::Screener;
    use crate::processing::tokenizer::{ReferenceVocabulary, TokenizerOptions};

    #[test]
    fn test_report_from_outcome() {
        let options = TokenizerOptions {
            vocabulary: Some(ReferenceVocabulary::new(["python", "sql", "aws"])),
            filter_stop_words: false,
        };
        let screener = Screener::new(&options).unwrap();
        let request = ScreeningRequest::new(
            "Python, SQL, AWS",
            vec![
                CandidateDocument::new("weak.txt", "Weak Candidate\npython"),
                CandidateDocument::new("strong.txt", "Name: Strong\npython sql aws, 4 years"),
            ],
        )
        .with_must_have(vec!["aws".to_string()]);

        let outcome = screener.screen(&request).unwrap();
        let report = ScreeningReport::from_outcome(&outcome, "job.txt", VocabularyMode::Reference);

        assert_eq!(report.required_skills, vec!["aws", "python", "sql"]);
        assert_eq!(report.candidates.len(), 2);

        let first = &report.candidates[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.identifier, "strong.txt");
        assert_eq!(first.name.as_deref(), Some("Strong"));
        assert_eq!(first.strength, MatchStrength::Strong);
        assert!(first.shortlisted);

        let second = &report.candidates[1];
        assert_eq!(second.must_have_missing, vec!["aws"]);
        assert!(!second.shortlisted);

        let shortlisted = report.shortlist_only();
        assert_eq!(shortlisted.candidates.len(), 1);
        assert!(shortlisted.has_filters());
    }
}
