//! Skill extraction, matching, scoring and ranking

pub mod tokenizer;
pub mod matcher;
pub mod contact;
pub mod candidate;
pub mod ranking;
pub mod screener;
