//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use crate::processing::tokenizer::{ReferenceVocabulary, TokenizerOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Skill phrases matched when no custom vocabulary is configured.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "c++", "html", "css", "javascript", "react", "node.js",
    "machine learning", "deep learning", "nlp", "pandas", "numpy", "sql",
    "git", "github", "flask", "django", "tensorflow", "keras", "api",
    "data analysis", "data visualization", "communication", "problem solving",
    "cloud", "aws", "azure", "docker", "kubernetes",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub vocabulary: VocabularyConfig,
    pub tokenizer: TokenizerConfig,
    pub screening: ScreeningConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub mode: VocabularyMode,
    pub skills: Vec<String>,
    #[serde(default)]
    pub extra_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyMode {
    /// Match only phrases from the configured vocabulary
    Reference,
    /// Treat every token as a candidate skill
    Open,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    pub filter_stop_words: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningConfig {
    pub min_years_experience: u32,
    pub must_have_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
    pub timestamp_filenames: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
    Pdf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: VocabularyConfig {
                mode: VocabularyMode::Reference,
                skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
                extra_skills: Vec::new(),
            },
            tokenizer: TokenizerConfig {
                filter_stop_words: false,
            },
            screening: ScreeningConfig {
                min_years_experience: 0,
                must_have_skills: Vec::new(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                pretty_json: true,
                timestamp_filenames: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    /// Vocabulary phrases in effect: configured skills plus extras
    pub fn vocabulary_phrases(&self) -> Vec<String> {
        self.vocabulary
            .skills
            .iter()
            .chain(self.vocabulary.extra_skills.iter())
            .cloned()
            .collect()
    }

    pub fn tokenizer_options(&self) -> TokenizerOptions {
        let vocabulary = match self.vocabulary.mode {
            VocabularyMode::Reference => Some(ReferenceVocabulary::new(self.vocabulary_phrases())),
            VocabularyMode::Open => None,
        };

        TokenizerOptions {
            vocabulary,
            filter_stop_words: self.tokenizer.filter_stop_words,
        }
    }
}
