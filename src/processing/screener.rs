//! Screening engine: tokenize, match, extract contact details and rank

use crate::error::{Result, ScreenerError};
use crate::processing::candidate::{CandidateDocument, CandidateRecord, ScreeningRequest};
use crate::processing::contact::ContactInfo;
use crate::processing::matcher::{match_skills, partition_must_have};
use crate::processing::ranking::rank_candidates;
use crate::processing::tokenizer::{SkillSet, Tokenizer, TokenizerOptions};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Runs a `ScreeningRequest` through the matching pipeline
pub struct Screener {
    tokenizer: Tokenizer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    /// Skill set derived from the job description
    pub required: SkillSet,
    /// All candidates, best score first
    pub ranked: Vec<CandidateRecord>,
    pub must_have_skills: Vec<String>,
    pub min_years_experience: u32,
    pub processing_time_ms: u64,
}

impl Screener {
    pub fn new(options: &TokenizerOptions) -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new(options)?,
        })
    }

    pub fn screen(&self, request: &ScreeningRequest) -> Result<ScreeningOutcome> {
        if request.job_description.trim().is_empty() {
            return Err(ScreenerError::InvalidInput(
                "Job description is empty".to_string(),
            ));
        }
        if request.documents.is_empty() {
            return Err(ScreenerError::InvalidInput(
                "No resumes were provided".to_string(),
            ));
        }

        let start_time = Instant::now();

        let required = self.tokenizer.tokenize(&request.job_description);
        info!(
            "Job description yields {} required skills across {} resumes",
            required.len(),
            request.documents.len()
        );
        if required.is_empty() {
            warn!("No required skills found in the job description; every candidate scores 0");
        }

        let mut candidates = Vec::with_capacity(request.documents.len());
        for document in &request.documents {
            let record = self.screen_document(document, &required, request)?;
            debug!(
                "{}: {:.2}% ({} matched, {} missing)",
                record.identifier,
                record.score_percent(),
                record.match_result.matched.len(),
                record.match_result.missing.len()
            );
            candidates.push(record);
        }

        let ranked = rank_candidates(candidates);
        let shortlisted = ranked.iter().filter(|c| c.passes_filters()).count();
        info!(
            "Screened {} resumes, {} pass filters",
            ranked.len(),
            shortlisted
        );

        Ok(ScreeningOutcome {
            required,
            ranked,
            must_have_skills: request.must_have_skills.clone(),
            min_years_experience: request.min_years_experience,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    fn screen_document(
        &self,
        document: &CandidateDocument,
        required: &SkillSet,
        request: &ScreeningRequest,
    ) -> Result<CandidateRecord> {
        if document.text.trim().is_empty() {
            warn!("No text extracted from {}", document.identifier);
        }

        let skills = self.tokenizer.tokenize(&document.text);
        let match_result = match_skills(required, &skills);
        let contact = ContactInfo::extract(&document.text);

        let must_have = if request.must_have_skills.is_empty() {
            None
        } else {
            // Must-have phrases need not be part of the vocabulary, so look
            // them up in the text directly as well.
            let mut present = self
                .tokenizer
                .find_phrases(&document.text, &request.must_have_skills)?;
            present.extend(skills.iter().cloned());
            Some(partition_must_have(&request.must_have_skills, &present))
        };

        Ok(CandidateRecord {
            identifier: document.identifier.clone(),
            extracted_text: document.text.clone(),
            meets_experience: contact.years_experience >= request.min_years_experience,
            skills,
            match_result,
            contact,
            must_have,
        })
    }
}

impl ScreeningOutcome {
    /// Candidates that pass the experience and must-have filters, in rank order
    pub fn shortlist(&self) -> Vec<&CandidateRecord> {
        self.ranked.iter().filter(|c| c.passes_filters()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::tokenizer::ReferenceVocabulary;

    fn screener(phrases: &[&str]) -> Screener {
        let options = TokenizerOptions {
            vocabulary: Some(ReferenceVocabulary::new(phrases.iter().copied())),
            filter_stop_words: false,
        };
        Screener::new(&options).unwrap()
    }

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let screener = screener(&["python", "sql", "aws"]);
        let request = ScreeningRequest::new(
            "Looking for Python, SQL and AWS skills",
            vec![CandidateDocument::new("resume.pdf", "Experienced in python and sql")],
        );

        let outcome = screener.screen(&request).unwrap();
        assert_eq!(outcome.required, set(&["python", "sql", "aws"]));

        let candidate = &outcome.ranked[0];
        assert_eq!(candidate.skills, set(&["python", "sql"]));
        assert_eq!(candidate.match_result.matched, set(&["python", "sql"]));
        assert_eq!(candidate.match_result.missing, set(&["aws"]));
        assert_eq!(candidate.score_percent(), 66.67);
        assert!(candidate.must_have.is_none());
        assert!(candidate.passes_filters());
    }

    #[test]
    fn test_ranking_and_filters() {
        let screener = screener(&["python", "sql", "aws", "docker"]);
        let request = ScreeningRequest::new(
            "Python, SQL, AWS and Docker",
            vec![
                CandidateDocument::new("a.txt", "Ann\nPython only, 1 year"),
                CandidateDocument::new("b.txt", "Bob\nPython, SQL, AWS, Docker, Rust. 6 years"),
                CandidateDocument::new("c.txt", "Cy\nPython and rust, 8+ yrs"),
            ],
        )
        .with_must_have(vec!["rust".to_string(), "python".to_string()])
        .with_min_years_experience(5);

        let outcome = screener.screen(&request).unwrap();
        let order: Vec<&str> = outcome.ranked.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(order, vec!["b.txt", "a.txt", "c.txt"]);

        let ann = &outcome.ranked[1];
        assert!(!ann.meets_experience);
        assert_eq!(ann.must_have.as_ref().unwrap().missing, vec!["rust"]);

        let cy = &outcome.ranked[2];
        assert_eq!(cy.contact.years_experience, 8);
        assert_eq!(cy.must_have.as_ref().unwrap().matched, vec!["rust", "python"]);

        let shortlist: Vec<&str> = outcome.shortlist().iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(shortlist, vec!["b.txt", "c.txt"]);
    }

    #[test]
    fn test_empty_required_set_scores_zero() {
        let screener = screener(&["kubernetes"]);
        let request = ScreeningRequest::new(
            "Friendly office manager wanted",
            vec![CandidateDocument::new("a.txt", "kubernetes")],
        );

        let outcome = screener.screen(&request).unwrap();
        assert!(outcome.required.is_empty());
        assert_eq!(outcome.ranked[0].score_percent(), 0.0);
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let screener = screener(&["python"]);

        let no_job = ScreeningRequest::new("   ", vec![CandidateDocument::new("a.txt", "python")]);
        assert!(matches!(screener.screen(&no_job), Err(ScreenerError::InvalidInput(_))));

        let no_docs = ScreeningRequest::new("python", Vec::new());
        assert!(matches!(screener.screen(&no_docs), Err(ScreenerError::InvalidInput(_))));
    }

    #[test]
    fn test_open_vocabulary_counts_every_token() {
        let screener = Screener::new(&TokenizerOptions::default()).unwrap();
        let request = ScreeningRequest::new(
            "the python and",
            vec![CandidateDocument::new("a.txt", "the python")],
        );

        let outcome = screener.screen(&request).unwrap();
        let candidate = &outcome.ranked[0];
        assert_eq!(candidate.match_result.matched, set(&["python", "the"]));
        assert_eq!(candidate.score_percent(), 66.67);
    }
}
