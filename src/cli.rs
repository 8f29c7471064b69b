//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Screen resumes against a job description by skill overlap")]
#[command(long_about = "Extract skills from resumes and a job description, score each resume by the share of required skills it covers, and rank the candidates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score and rank resumes against a job description
    #[command(group(ArgGroup::new("job_input").required(true).args(["job", "job_text"])))]
    Screen {
        /// Resume files (PDF, TXT, MD); repeat for several candidates
        #[arg(short, long = "resume", required = true, num_args = 1..)]
        resumes: Vec<PathBuf>,

        /// Path to job description file (TXT, MD, PDF)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description pasted inline
        #[arg(long)]
        job_text: Option<String>,

        /// Comma-separated must-have skills, e.g. "python, sql"
        #[arg(short, long)]
        must_have: Option<String>,

        /// Minimum years of experience a candidate must mention
        #[arg(long)]
        min_experience: Option<u32>,

        /// Output format: console, json, markdown, html, pdf
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Treat every word as a skill instead of using the vocabulary
        #[arg(long)]
        open_vocabulary: bool,

        /// Drop common English words when using the open vocabulary
        #[arg(long)]
        stop_words: bool,

        /// Only report candidates that pass the must-have and experience filters
        #[arg(long)]
        shortlist_only: bool,

        /// Output detailed results
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show the active skill vocabulary
    Vocabulary,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        "pdf" => Ok(OutputFormat::Pdf),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html, pdf", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
