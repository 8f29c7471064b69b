//! Candidate ranking

use crate::processing::candidate::CandidateRecord;

/// Order by score, highest first. The sort is stable, so candidates with
/// equal scores keep their upload order.
pub fn rank_candidates(mut candidates: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
    candidates.sort_by(|a, b| b.score_percent().total_cmp(&a.score_percent()));
    candidates
}
