//! Text normalization and skill tokenization

use crate::error::{Result, ScreenerError};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Normalized (lower-cased, trimmed) skill strings with no duplicates.
pub type SkillSet = BTreeSet<String>;

/// Caller-supplied canonical skill phrases that free text is filtered against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceVocabulary {
    phrases: BTreeSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TokenizerOptions {
    /// `None` switches to open tokenization: every token is a skill
    pub vocabulary: Option<ReferenceVocabulary>,
    /// Drop common English words in open tokenization
    pub filter_stop_words: bool,
}

/// Turns raw text into a `SkillSet`
pub struct Tokenizer {
    filter_stop_words: bool,
    phrase_matcher: Option<PhraseMatcher>,
    stop_words: HashSet<&'static str>,
}

/// Multi-pattern whole-phrase matcher over case-folded text
struct PhraseMatcher {
    automaton: AhoCorasick,
    phrases: Vec<String>,
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "during", "each",
    "etc", "for", "from", "had", "has", "have", "having", "he", "her", "here",
    "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just",
    "me", "more", "most", "my", "no", "not", "of", "on", "only", "or", "other",
    "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some",
    "such", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
];

impl ReferenceVocabulary {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| normalize_phrase(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.contains(&normalize_phrase(phrase))
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.phrases.iter()
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl Tokenizer {
    pub fn new(options: &TokenizerOptions) -> Result<Self> {
        let phrase_matcher = match &options.vocabulary {
            Some(vocabulary) => Some(PhraseMatcher::new(vocabulary.iter().cloned().collect())?),
            None => None,
        };

        Ok(Self {
            filter_stop_words: options.filter_stop_words,
            phrase_matcher,
            stop_words: STOP_WORDS.iter().copied().collect(),
        })
    }

    /// Open tokenizer without a vocabulary or stop-word filtering
    pub fn open() -> Self {
        Self {
            filter_stop_words: false,
            phrase_matcher: None,
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    pub fn uses_vocabulary(&self) -> bool {
        self.phrase_matcher.is_some()
    }

    /// Extract the skill set of `text`
    pub fn tokenize(&self, text: &str) -> SkillSet {
        match &self.phrase_matcher {
            Some(matcher) => matcher.find_all(&fold_text(text)),
            None => self.open_tokens(text),
        }
    }

    /// Which of `phrases` occur in `text` as whole phrases
    pub fn find_phrases(&self, text: &str, phrases: &[String]) -> Result<SkillSet> {
        let phrases: Vec<String> = phrases
            .iter()
            .map(|p| normalize_phrase(p))
            .filter(|p| !p.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let matcher = PhraseMatcher::new(phrases)?;
        Ok(matcher.find_all(&fold_text(text)))
    }

    fn open_tokens(&self, text: &str) -> SkillSet {
        text.to_lowercase()
            .split(|c: char| !is_token_char(c))
            .filter(|token| token.chars().any(char::is_alphanumeric))
            .filter(|token| !(self.filter_stop_words && self.stop_words.contains(token)))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::open()
    }
}

impl PhraseMatcher {
    fn new(phrases: Vec<String>) -> Result<Self> {
        // find_overlapping_iter only supports MatchKind::Standard
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&phrases)
            .map_err(|e| ScreenerError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { automaton, phrases })
    }

    fn find_all(&self, folded: &str) -> SkillSet {
        let mut found = SkillSet::new();
        if self.phrases.is_empty() {
            return found;
        }

        for mat in self.automaton.find_overlapping_iter(folded) {
            if is_word_bounded(folded, mat.start(), mat.end()) {
                found.insert(self.phrases[mat.pattern().as_usize()].clone());
            }
        }

        found
    }
}

/// Lower-case, trim and collapse inner whitespace to single spaces
pub fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-fold text and collapse whitespace runs so multi-word phrases match
/// across line breaks
fn fold_text(text: &str) -> String {
    normalize_phrase(text)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab_tokenizer(phrases: &[&str]) -> Tokenizer {
        let options = TokenizerOptions {
            vocabulary: Some(ReferenceVocabulary::new(phrases.iter().copied())),
            filter_stop_words: false,
        };
        Tokenizer::new(&options).unwrap()
    }

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_java_does_not_match_inside_javascript() {
        let tokenizer = vocab_tokenizer(&["java", "javascript"]);

        assert_eq!(tokenizer.tokenize("JavaScript developer"), set(&["javascript"]));
        assert_eq!(tokenizer.tokenize("I love javascript"), set(&["javascript"]));
        assert_eq!(tokenizer.tokenize("Java and JavaScript"), set(&["java", "javascript"]));
    }

    #[test]
    fn test_multi_word_phrase_matching() {
        let tokenizer = vocab_tokenizer(&["machine learning", "learning"]);

        let skills = tokenizer.tokenize("Applied Machine\n  Learning to fraud");
        assert_eq!(skills, set(&["machine learning", "learning"]));

        let skills = tokenizer.tokenize("machine-learning pipelines");
        assert_eq!(skills, set(&["learning"]));
    }

    #[test]
    fn test_symbol_skills_match_with_boundaries() {
        let tokenizer = vocab_tokenizer(&["c++", "node.js", "c#"]);

        let skills = tokenizer.tokenize("Wrote C++, C# services and Node.js APIs.");
        assert_eq!(skills, set(&["c#", "c++", "node.js"]));

        assert!(tokenizer.tokenize("abc++ code").is_empty());
    }

    #[test]
    fn test_vocabulary_output_is_subset_of_vocabulary() {
        let vocabulary = ["python", "sql", "aws", "docker"];
        let tokenizer = vocab_tokenizer(&vocabulary);

        let skills = tokenizer.tokenize("Python, sql, terraform, DOCKER compose, rust");
        for skill in &skills {
            assert!(vocabulary.contains(&skill.as_str()));
        }
        assert_eq!(skills, set(&["docker", "python", "sql"]));
    }

    #[test]
    fn test_empty_vocabulary_yields_empty_set() {
        let tokenizer = vocab_tokenizer(&[]);
        assert!(tokenizer.uses_vocabulary());
        assert!(tokenizer.tokenize("python everywhere").is_empty());
    }

    #[test]
    fn test_open_tokenization_keeps_symbol_tokens() {
        let tokenizer = Tokenizer::open();

        let tokens = tokenizer.tokenize("C++ and C# developer, the BEST.");
        assert_eq!(tokens, set(&["and", "best", "c#", "c++", "developer", "the"]));
    }

    #[test]
    fn test_open_tokenization_skips_symbol_only_runs() {
        let tokenizer = Tokenizer::open();
        let tokens = tokenizer.tokenize("++ # 5+ years");
        assert_eq!(tokens, set(&["5+", "years"]));
    }

    #[test]
    fn test_stop_word_filtering_is_opt_in() {
        let options = TokenizerOptions {
            vocabulary: None,
            filter_stop_words: true,
        };
        let tokenizer = Tokenizer::new(&options).unwrap();

        let tokens = tokenizer.tokenize("The python and the sql");
        assert_eq!(tokens, set(&["python", "sql"]));
    }

    #[test]
    fn test_find_phrases_outside_vocabulary() {
        let tokenizer = vocab_tokenizer(&["python"]);
        let phrases = vec!["Rust".to_string(), "go".to_string(), " ".to_string()];

        let found = tokenizer.find_phrases("Rust and Golang", &phrases).unwrap();
        assert_eq!(found, set(&["rust"]));
    }

    #[test]
    fn test_vocabulary_normalizes_phrases() {
        let vocabulary = ReferenceVocabulary::new(["  Machine   Learning ", "", "SQL"]);
        assert_eq!(vocabulary.len(), 2);
        assert!(vocabulary.contains("machine learning"));
        assert!(vocabulary.contains("sql"));
    }
}
