//! Output formatters: console, JSON, Markdown, HTML and PDF

use crate::config::{OutputFormat, VocabularyMode};
use crate::error::Result;
use crate::output::report::{CandidateSummary, ScreeningReport};
use crate::processing::contact::NOT_FOUND;
use crate::processing::matcher::MatchStrength;
use askama::Template;
use colored::{Color, Colorize};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::path::Path;

/// Trait for text-based report formatters
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured consumers
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Renders the fixed per-candidate layout into a PDF document
pub struct PdfFormatter {
    font_size: f32,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
    pdf_formatter: PdfFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Screening Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .candidate {
            background: white;
            padding: 20px 30px;
            margin: 20px 0;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .score-badge {
            display: inline-block;
            padding: 4px 12px;
            border-radius: 16px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .strong { background: #28a745; }
        .moderate { background: #ffc107; color: #000; }
        .weak { background: #dc3545; }
        .missing { color: #dc3545; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border-bottom: 1px solid #e9ecef; padding: 6px; text-align: left; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Resume Screening Report</h1>
    <p>Generated: {{ generated_at }} | Job: {{ job_source }} | Vocabulary: {{ vocabulary_mode }}</p>
    <p><strong>Required skills:</strong> {{ required_skills }}</p>
    {% if has_filters %}
    <p><strong>Must-have:</strong> {{ must_have_skills }} | <strong>Minimum experience:</strong> {{ min_years_experience }} years</p>
    {% endif %}

    <table>
        <tr><th>Rank</th><th>Candidate</th><th>Score</th><th>Match</th><th>Shortlisted</th></tr>
        {% for c in candidates %}
        <tr><td>{{ c.rank }}</td><td>{{ c.identifier }}</td><td>{{ c.score }}%</td><td>{{ c.strength_label }}</td><td>{{ c.shortlisted }}</td></tr>
        {% endfor %}
    </table>

    {% for c in candidates %}
    <div class="candidate">
        <h2>#{{ c.rank }} {{ c.identifier }} <span class="score-badge {{ c.strength_class }}">{{ c.score }}%</span></h2>
        <p><strong>Name:</strong> {{ c.name }}</p>
        <p><strong>Email:</strong> {{ c.email }}</p>
        <p><strong>Experience:</strong> {{ c.years_experience }} years</p>
        <p><strong>Verdict:</strong> {{ c.verdict }}</p>
        <p><strong>Matched skills:</strong> {{ c.matched }}</p>
        <p class="missing"><strong>Missing skills:</strong> {{ c.missing }}</p>
        {% if c.has_must_have %}
        <p><strong>Must-have present:</strong> {{ c.must_have_matched }} | <strong>Must-have missing:</strong> {{ c.must_have_missing }}</p>
        {% endif %}
    </div>
    {% endfor %}

    <p><small>Generated by Resume Screener v{{ version }} in {{ processing_time }}ms</small></p>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    job_source: String,
    vocabulary_mode: String,
    required_skills: String,
    has_filters: bool,
    must_have_skills: String,
    min_years_experience: u32,
    candidates: Vec<HtmlCandidate>,
    version: String,
    processing_time: u64,
}

struct HtmlCandidate {
    rank: usize,
    identifier: String,
    score: String,
    strength_label: String,
    strength_class: String,
    shortlisted: String,
    name: String,
    email: String,
    years_experience: u32,
    verdict: String,
    matched: String,
    missing: String,
    has_must_have: bool,
    must_have_matched: String,
    must_have_missing: String,
}

/// Comma-joined list, or "None" when empty
fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn format_timestamp(report: &ScreeningReport) -> String {
    report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn vocabulary_label(report: &ScreeningReport) -> &'static str {
    match report.metadata.vocabulary_mode {
        VocabularyMode::Reference => "reference",
        VocabularyMode::Open => "open",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn strength_color(strength: MatchStrength) -> Color {
        match strength {
            MatchStrength::Strong => Color::Green,
            MatchStrength::Moderate => Color::Yellow,
            MatchStrength::Weak => Color::Red,
        }
    }

    fn format_score_badge(&self, candidate: &CandidateSummary) -> String {
        let badge = candidate.strength.label().to_uppercase();
        if self.use_colors {
            format!("[{}]", badge.color(Self::strength_color(candidate.strength)).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_candidate(&self, candidate: &CandidateSummary) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header(
            &format!("#{} {}", candidate.rank, candidate.identifier),
            2,
        ));
        output.push_str(&format!(
            "Match Score: {:.2}% {}\n",
            candidate.score_percent,
            self.format_score_badge(candidate)
        ));
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(&candidate.verdict, Self::strength_color(candidate.strength))
        ));
        output.push_str(&format!("Name: {}\n", candidate.name.as_deref().unwrap_or(NOT_FOUND)));
        output.push_str(&format!("Email: {}\n", candidate.email.as_deref().unwrap_or(NOT_FOUND)));
        output.push_str(&format!("Experience: {} years\n", candidate.years_experience));
        output.push_str(&format!(
            "✅ Matched Skills: {}\n",
            self.colorize(&join_or_none(&candidate.matched), Color::Green)
        ));
        output.push_str(&format!(
            "❌ Missing Skills: {}\n",
            self.colorize(&join_or_none(&candidate.missing), Color::Red)
        ));

        if !candidate.must_have_matched.is_empty() || !candidate.must_have_missing.is_empty() {
            output.push_str(&format!(
                "Must-have present: {} | missing: {}\n",
                join_or_none(&candidate.must_have_matched),
                join_or_none(&candidate.must_have_missing)
            ));
        }

        if self.detailed {
            output.push_str(&format!(
                "Meets experience: {} | Shortlisted: {}\n",
                yes_no(candidate.meets_experience),
                yes_no(candidate.shortlisted)
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📄 RESUME SCREENING RESULTS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Job: {} | Candidates: {}\n",
            report.metadata.job_source,
            report.candidates.len()
        ));

        if self.detailed {
            output.push_str(&format!(
                "Skills in JD ({} vocabulary): {}\n",
                vocabulary_label(report),
                join_or_none(&report.required_skills)
            ));
        }

        if report.has_filters() {
            output.push_str(&format!(
                "Filters: must-have [{}], minimum experience {} years\n",
                report.must_have_skills.join(", "),
                report.min_years_experience
            ));
        }

        if report.candidates.is_empty() {
            output.push_str(&self.colorize("\nNo candidates to show.\n", Color::Yellow));
            return Ok(output);
        }

        for candidate in &report.candidates {
            output.push_str(&self.format_candidate(candidate));
        }

        if report.has_filters() {
            let shortlisted: Vec<&str> = report
                .candidates
                .iter()
                .filter(|c| c.shortlisted)
                .map(|c| c.identifier.as_str())
                .collect();

            output.push_str(&self.format_header("Shortlist", 3));
            if shortlisted.is_empty() {
                output.push_str("No candidate passes the filters.\n");
            } else {
                output.push_str(&format!("{}\n", shortlisted.join(", ")));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn strength_badge(strength: MatchStrength) -> &'static str {
        match strength {
            MatchStrength::Strong => "🟢",
            MatchStrength::Moderate => "🟡",
            MatchStrength::Weak => "🔴",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut md = String::new();

        md.push_str("# Resume Screening Report\n\n");
        if self.include_metadata {
            md.push_str(&format!("**Generated:** {}  \n", format_timestamp(report)));
            md.push_str(&format!("**Job description:** {}  \n", report.metadata.job_source));
            md.push_str(&format!("**Vocabulary:** {}\n\n", vocabulary_label(report)));
        }

        md.push_str(&format!(
            "**Skills in JD:** {}\n\n",
            join_or_none(&report.required_skills)
        ));
        if report.has_filters() {
            md.push_str(&format!(
                "**Must-have:** {} | **Minimum experience:** {} years\n\n",
                join_or_none(&report.must_have_skills),
                report.min_years_experience
            ));
        }

        md.push_str("## Ranking\n\n");
        md.push_str("| Rank | Candidate | Score | Match | Shortlisted |\n");
        md.push_str("|------|-----------|-------|-------|-------------|\n");
        for c in &report.candidates {
            md.push_str(&format!(
                "| {} | {} | {:.2}% | {} {} | {} |\n",
                c.rank,
                c.identifier,
                c.score_percent,
                Self::strength_badge(c.strength),
                c.strength.label(),
                yes_no(c.shortlisted)
            ));
        }
        md.push('\n');

        for c in &report.candidates {
            md.push_str(&format!("## {}. {}\n\n", c.rank, c.identifier));
            md.push_str(&format!("- **Name:** {}\n", c.name.as_deref().unwrap_or(NOT_FOUND)));
            md.push_str(&format!("- **Email:** {}\n", c.email.as_deref().unwrap_or(NOT_FOUND)));
            md.push_str(&format!("- **Experience:** {} years\n", c.years_experience));
            md.push_str(&format!("- **Match score:** {:.2}%\n", c.score_percent));
            md.push_str(&format!("- **Verdict:** {}\n", c.verdict));
            md.push_str(&format!("- **Matched skills:** {}\n", join_or_none(&c.matched)));
            md.push_str(&format!("- **Missing skills:** {}\n", join_or_none(&c.missing)));
            if !c.must_have_matched.is_empty() || !c.must_have_missing.is_empty() {
                md.push_str(&format!(
                    "- **Must-have missing:** {}\n",
                    join_or_none(&c.must_have_missing)
                ));
            }
            md.push('\n');
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ScreeningReport) -> HtmlTemplate {
        let candidates = report
            .candidates
            .iter()
            .map(|c| HtmlCandidate {
                rank: c.rank,
                identifier: c.identifier.clone(),
                score: format!("{:.2}", c.score_percent),
                strength_label: c.strength.label().to_string(),
                strength_class: match c.strength {
                    MatchStrength::Strong => "strong",
                    MatchStrength::Moderate => "moderate",
                    MatchStrength::Weak => "weak",
                }
                .to_string(),
                shortlisted: yes_no(c.shortlisted).to_string(),
                name: c.name.clone().unwrap_or_else(|| NOT_FOUND.to_string()),
                email: c.email.clone().unwrap_or_else(|| NOT_FOUND.to_string()),
                years_experience: c.years_experience,
                verdict: c.verdict.clone(),
                matched: join_or_none(&c.matched),
                missing: join_or_none(&c.missing),
                has_must_have: !c.must_have_matched.is_empty() || !c.must_have_missing.is_empty(),
                must_have_matched: join_or_none(&c.must_have_matched),
                must_have_missing: join_or_none(&c.must_have_missing),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: format_timestamp(report),
            job_source: report.metadata.job_source.clone(),
            vocabulary_mode: vocabulary_label(report).to_string(),
            required_skills: join_or_none(&report.required_skills),
            has_filters: report.has_filters(),
            must_have_skills: join_or_none(&report.must_have_skills),
            min_years_experience: report.min_years_experience,
            candidates,
            version: report.metadata.screener_version.clone(),
            processing_time: report.metadata.processing_time_ms,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const WRAP_COLUMNS: usize = 85;

/// Writes lines top-down, starting a new page when the current one is full
struct PdfWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    line_height: f32,
}

impl<'a> PdfWriter<'a> {
    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        if self.y < MARGIN_MM {
            self.new_page();
        }
        self.layer.use_text(pdf_safe(text), size, Mm(MARGIN_MM), Mm(self.y), font);
        self.y -= self.line_height;
    }

    fn wrapped(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        for line in wrap_words(text, WRAP_COLUMNS) {
            self.line(&line, size, font);
        }
    }

    fn gap(&mut self) {
        self.y -= self.line_height / 2.0;
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }
}

/// Builtin PDF fonts only cover Latin-1
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) < 0x100 { c } else { '?' })
        .collect()
}

fn wrap_words(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

impl PdfFormatter {
    pub fn new(font_size: f32) -> Self {
        Self { font_size }
    }

    /// One page per candidate: title, name, email, experience, score,
    /// matched list, missing list
    pub fn render(&self, report: &ScreeningReport) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            "Resume Screening Report",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        let body = self.font_size;
        let title = self.font_size * 1.5;
        let mut writer = PdfWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT_MM - MARGIN_MM,
            line_height: self.font_size * 0.6,
        };

        if report.candidates.is_empty() {
            writer.line("Resume Screening Report", title, &bold);
            writer.gap();
            writer.line("No candidates to report.", body, &regular);
        }

        for (idx, c) in report.candidates.iter().enumerate() {
            if idx > 0 {
                writer.new_page();
            }

            writer.line("Resume Screening Report", title, &bold);
            writer.gap();
            writer.line(&format!("Candidate #{}: {}", c.rank, c.identifier), body, &bold);
            writer.line(&format!("Name: {}", c.name.as_deref().unwrap_or(NOT_FOUND)), body, &regular);
            writer.line(&format!("Email: {}", c.email.as_deref().unwrap_or(NOT_FOUND)), body, &regular);
            writer.line(&format!("Experience: {} years", c.years_experience), body, &regular);
            writer.line(
                &format!("Match Score: {:.2}% ({})", c.score_percent, c.strength.label()),
                body,
                &regular,
            );
            writer.wrapped(&c.verdict, body, &regular);
            writer.gap();

            writer.line("Matched Skills:", body, &bold);
            writer.wrapped(&join_or_none(&c.matched), body, &regular);
            writer.gap();

            writer.line("Missing Skills:", body, &bold);
            writer.wrapped(&join_or_none(&c.missing), body, &regular);

            if !c.must_have_missing.is_empty() {
                writer.gap();
                writer.line("Missing Must-Have Skills:", body, &bold);
                writer.wrapped(&c.must_have_missing.join(", "), body, &regular);
            }
        }

        drop(writer);
        Ok(doc.save_to_bytes()?)
    }
}

impl Default for PdfFormatter {
    fn default() -> Self {
        Self::new(12.0)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
            pdf_formatter: PdfFormatter::default(),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            ..Self::new()
        }
    }

    /// Render `report`; text formats come back as UTF-8 bytes
    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Pdf => self.pdf_formatter.render(report),
            text_format => Ok(self.generate_text(report, text_format)?.into_bytes()),
        }
    }

    fn generate_text(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console | OutputFormat::Pdf => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        };
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &[u8], file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, job_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(job_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "job".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
        OutputFormat::Pdf => "pdf",
    };

    format!("{}_screening{}.{}", base_name, timestamp_suffix, extension)
}
