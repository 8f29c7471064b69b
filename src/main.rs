//! Resume screener: rank resumes against a job description by skill overlap

use clap::Parser;
use log::{error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat, VocabularyMode};
use resume_screener::input::file_detector::{JOB_EXTENSIONS, RESUME_EXTENSIONS};
use resume_screener::input::InputManager;
use resume_screener::output::formatter::{save_report_to_file, suggest_filename};
use resume_screener::output::{ReportGenerator, ScreeningReport};
use resume_screener::processing::matcher::parse_must_have_list;
use resume_screener::{Result, Screener, ScreenerError, ScreeningRequest};
use std::path::{Path, PathBuf};
use std::process;
use unicode_segmentation::UnicodeSegmentation;

struct ScreenArgs {
    resumes: Vec<PathBuf>,
    job: Option<PathBuf>,
    job_text: Option<String>,
    must_have: Option<String>,
    min_experience: Option<u32>,
    output: Option<String>,
    save: Option<PathBuf>,
    open_vocabulary: bool,
    stop_words: bool,
    shortlist_only: bool,
    detailed: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config.as_deref()).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, custom_path: Option<&Path>) -> Result<()> {
    let config_path = custom_path.map(Path::to_path_buf).unwrap_or_else(Config::config_path);

    match command {
        Commands::Screen {
            resumes,
            job,
            job_text,
            must_have,
            min_experience,
            output,
            save,
            open_vocabulary,
            stop_words,
            shortlist_only,
            detailed,
        } => {
            let args = ScreenArgs {
                resumes,
                job,
                job_text,
                must_have,
                min_experience,
                output,
                save,
                open_vocabulary,
                stop_words,
                shortlist_only,
                detailed,
            };
            run_screen(args, config).await?;
        }

        Commands::Vocabulary => match config.tokenizer_options().vocabulary {
            Some(vocabulary) => {
                println!("📚 Reference vocabulary ({} skills)\n", vocabulary.len());
                for phrase in vocabulary.iter() {
                    println!("  • {}", phrase);
                }
            }
            None => {
                println!("📚 Open vocabulary: every token is treated as a skill");
                if config.tokenizer.filter_stop_words {
                    println!("   Common English stop words are filtered out");
                }
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config file: {}", config_path.display());
                println!("Vocabulary mode: {:?}", config.vocabulary.mode);
                println!("Vocabulary size: {}", config.vocabulary_phrases().len());
                println!("Filter stop words: {}", config.tokenizer.filter_stop_words);
                println!("Minimum experience: {} years", config.screening.min_years_experience);
                if !config.screening.must_have_skills.is_empty() {
                    println!("Must-have skills: {}", config.screening.must_have_skills.join(", "));
                }
                println!("Output format: {:?}", config.output.format);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                match custom_path {
                    Some(path) => Config::default().save_to(path)?,
                    None => Config::default().save()?,
                }
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

async fn run_screen(args: ScreenArgs, mut config: Config) -> Result<()> {
    for resume in &args.resumes {
        cli::validate_file_extension(resume, RESUME_EXTENSIONS)
            .map_err(|e| ScreenerError::InvalidInput(format!("Resume file {}: {}", resume.display(), e)))?;
    }
    if let Some(job) = &args.job {
        cli::validate_file_extension(job, JOB_EXTENSIONS)
            .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;
    }

    let output_format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(ScreenerError::InvalidInput)?,
        None => config.output.format,
    };

    if args.open_vocabulary {
        config.vocabulary.mode = VocabularyMode::Open;
    }
    if args.stop_words {
        config.tokenizer.filter_stop_words = true;
    }

    let must_have_skills = match &args.must_have {
        Some(list) => parse_must_have_list(list),
        None => config.screening.must_have_skills.clone(),
    };
    let min_years = args.min_experience.unwrap_or(config.screening.min_years_experience);

    info!("Starting resume screening for {} resumes", args.resumes.len());

    let mut input_manager = InputManager::new().with_progress(true);
    let (job_description, job_source) = match (&args.job, &args.job_text) {
        (Some(path), _) => (input_manager.extract_text(path).await?, path.display().to_string()),
        (None, Some(text)) => (text.clone(), "inline".to_string()),
        (None, None) => {
            return Err(ScreenerError::InvalidInput(
                "Provide a job description with --job or --job-text".to_string(),
            ))
        }
    };

    let documents = input_manager.load_documents(&args.resumes).await?;

    if args.detailed {
        println!("💼 Job Description Preview:");
        println!("{}\n", truncate_text(&job_description, 300));
    }

    let request = ScreeningRequest::new(job_description, documents)
        .with_must_have(must_have_skills)
        .with_min_years_experience(min_years);

    let screener = Screener::new(&config.tokenizer_options())?;
    let outcome = screener.screen(&request)?;

    let mut report = ScreeningReport::from_outcome(&outcome, job_source, config.vocabulary.mode);
    if args.shortlist_only {
        report = report.shortlist_only();
    }

    let generator = ReportGenerator::with_options(
        config.output.color_output && args.save.is_none(),
        args.detailed || config.output.detailed,
        config.output.pretty_json,
    );
    let rendered = generator.generate_report(&report, &output_format)?;

    let save_path = match (&args.save, output_format) {
        (Some(path), _) => Some(path.clone()),
        // Binary output never goes to the terminal
        (None, OutputFormat::Pdf) => Some(PathBuf::from(suggest_filename(
            &output_format,
            &report.metadata.job_source,
            config.output.timestamp_filenames,
        ))),
        (None, _) => None,
    };

    match save_path {
        Some(path) => {
            save_report_to_file(&rendered, &path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => {
            let text = String::from_utf8(rendered)
                .map_err(|e| ScreenerError::OutputFormatting(e.to_string()))?;
            println!("{}", text);
        }
    }

    Ok(())
}

/// Truncate text to at most `max_graphemes`, cutting at a word boundary
fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return text.to_string();
    }

    let truncated = graphemes[..max_graphemes].concat();
    let cut = truncated.rfind(char::is_whitespace).unwrap_or(truncated.len());
    format!("{}...", truncated[..cut].trim_end())
}
