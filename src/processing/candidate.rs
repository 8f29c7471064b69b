//! Screening request and per-candidate records

use crate::processing::contact::ContactInfo;
use crate::processing::matcher::{MatchResult, MatchStrength, MustHaveResult};
use crate::processing::tokenizer::SkillSet;
use serde::{Deserialize, Serialize};

/// One uploaded document after text extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDocument {
    pub identifier: String,
    pub text: String,
}

/// Everything a single screening run needs; built once, never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRequest {
    pub job_description: String,
    pub documents: Vec<CandidateDocument>,
    pub must_have_skills: Vec<String>,
    pub min_years_experience: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub identifier: String,
    pub extracted_text: String,
    pub skills: SkillSet,
    pub match_result: MatchResult,
    pub contact: ContactInfo,
    /// Present only when the request named must-have skills
    pub must_have: Option<MustHaveResult>,
    pub meets_experience: bool,
}

impl CandidateDocument {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }
}

impl ScreeningRequest {
    pub fn new(job_description: impl Into<String>, documents: Vec<CandidateDocument>) -> Self {
        Self {
            job_description: job_description.into(),
            documents,
            must_have_skills: Vec::new(),
            min_years_experience: 0,
        }
    }

    pub fn with_must_have(mut self, skills: Vec<String>) -> Self {
        self.must_have_skills = skills;
        self
    }

    pub fn with_min_years_experience(mut self, years: u32) -> Self {
        self.min_years_experience = years;
        self
    }
}

impl CandidateRecord {
    pub fn score_percent(&self) -> f64 {
        self.match_result.score_percent
    }

    pub fn strength(&self) -> MatchStrength {
        self.match_result.strength()
    }

    /// Meets the experience threshold and is missing no must-have skill
    pub fn passes_filters(&self) -> bool {
        self.meets_experience
            && self
                .must_have
                .as_ref()
                .map_or(true, MustHaveResult::all_present)
    }
}
