//! CV Ingestion — turns an uploaded résumé into a `CvRecord`.
//!
//! Parsing is pluggable behind `CvParser`:
//! - `StubCvParser` (default): fixed skill list, ignores content.
//! - `RuleBasedCvParser`: extracts text and matches a skill vocabulary.
//! - An ML-backed parser is a future backend and would implement the same trait.
//!
//! `AppState` holds an `Arc<dyn CvParser>`, chosen at startup via `CV_PARSER`.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// A parsed CV. Immutable once created; a new upload supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvRecord {
    pub id: Uuid,
    #[serde(rename = "name")]
    pub display_name: String,
    /// Insertion order is extraction order.
    pub skills: Vec<String>,
    pub raw_text: String,
}

#[derive(Debug, Error)]
pub enum CvParseError {
    #[error("Uploaded file '{0}' is empty")]
    EmptyFile(String),

    #[error("Unsupported file type for '{filename}' (accepted: {accepted})")]
    UnsupportedFileType { filename: String, accepted: String },

    #[error("Could not read '{filename}': {reason}")]
    Unreadable { filename: String, reason: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Output of a parser backend, before an id is assigned.
#[derive(Debug, Clone)]
pub struct ParsedCv {
    pub skills: Vec<String>,
    pub raw_text: String,
}

pub trait CvParser: Send + Sync {
    /// Lowercase file extensions this backend understands.
    fn accepted_extensions(&self) -> &'static [&'static str];

    fn parse(&self, file_bytes: &[u8], filename: &str) -> Result<ParsedCv, CvParseError>;

    fn name(&self) -> &'static str;
}

/// Which parser backend to construct at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParserKind {
    #[default]
    Stub,
    RuleBased,
}

impl FromStr for ParserKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stub" => Ok(ParserKind::Stub),
            "rule_based" | "rule-based" => Ok(ParserKind::RuleBased),
            other => Err(format!("unknown CV parser '{other}' (expected stub|rule_based)")),
        }
    }
}

impl ParserKind {
    pub fn build(self) -> Box<dyn CvParser> {
        match self {
            ParserKind::Stub => Box::new(StubCvParser),
            ParserKind::RuleBased => Box::new(RuleBasedCvParser::default()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// StubCvParser
// ────────────────────────────────────────────────────────────────────────────

pub const STUB_SKILLS: &[&str] = &[
    "Python",
    "Data Analysis",
    "SQL",
    "Machine Learning",
    "Leadership",
    "Project Management",
];

const STUB_RAW_TEXT: &str = "(full CV text here)";

/// Stand-in parser: same skills for every upload. Never fails.
pub struct StubCvParser;

impl CvParser for StubCvParser {
    fn accepted_extensions(&self) -> &'static [&'static str] {
        &["pdf", "docx"]
    }

    fn parse(&self, _file_bytes: &[u8], _filename: &str) -> Result<ParsedCv, CvParseError> {
        Ok(ParsedCv {
            skills: STUB_SKILLS.iter().map(|s| s.to_string()).collect(),
            raw_text: STUB_RAW_TEXT.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RuleBasedCvParser
// ────────────────────────────────────────────────────────────────────────────

const DEFAULT_VOCABULARY: &[&str] = &[
    "Python",
    "SQL",
    "Excel",
    "Data Analysis",
    "Machine Learning",
    "TensorFlow",
    "PowerBI",
    "Finance",
    "Agile",
    "Roadmaps",
    "Leadership",
    "Project Management",
    "Statistics",
    "R",
    "Tableau",
];

/// Keyword matcher over extracted text. PDFs go through `pdf-extract`;
/// `.txt` uploads are read as UTF-8. DOCX is only accepted by the stub.
pub struct RuleBasedCvParser {
    vocabulary: Vec<String>,
}

impl Default for RuleBasedCvParser {
    fn default() -> Self {
        Self::with_vocabulary(DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect())
    }
}

impl RuleBasedCvParser {
    pub fn with_vocabulary(vocabulary: Vec<String>) -> Self {
        Self { vocabulary }
    }

    fn extract_text(&self, file_bytes: &[u8], filename: &str) -> Result<String, CvParseError> {
        let unreadable = |reason: String| CvParseError::Unreadable {
            filename: filename.to_string(),
            reason,
        };

        match extension_of(filename).as_deref() {
            Some("pdf") => {
                pdf_extract::extract_text_from_mem(file_bytes).map_err(|e| unreadable(format!("{e:?}")))
            }
            Some("txt") => String::from_utf8(file_bytes.to_vec())
                .map_err(|_| unreadable("text file is not valid UTF-8".to_string())),
            _ => Err(unreadable("no text extractor for this file type".to_string())),
        }
    }

    /// Vocabulary skills ordered by their first position in `text`.
    fn match_skills(&self, text: &str) -> Vec<String> {
        let haystack = format!(" {} ", normalize_words(text));
        let mut found: Vec<(usize, &String)> = self
            .vocabulary
            .iter()
            .filter_map(|skill| {
                let needle = format!(" {} ", normalize_words(skill));
                haystack.find(&needle).map(|pos| (pos, skill))
            })
            .collect();
        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, s)| s.clone()).collect()
    }
}

impl CvParser for RuleBasedCvParser {
    fn accepted_extensions(&self) -> &'static [&'static str] {
        &["pdf", "txt"]
    }

    fn parse(&self, file_bytes: &[u8], filename: &str) -> Result<ParsedCv, CvParseError> {
        let raw_text = self.extract_text(file_bytes, filename)?;
        let skills = self.match_skills(&raw_text);
        debug!("Rule-based parser matched {} skills in {filename}", skills.len());
        Ok(ParsedCv { skills, raw_text })
    }

    fn name(&self) -> &'static str {
        "rule_based"
    }
}

/// Lowercases and collapses every non-alphanumeric run into a single space.
fn normalize_words(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

// ────────────────────────────────────────────────────────────────────────────
// Ingestion entry point
// ────────────────────────────────────────────────────────────────────────────

/// Validates the upload, runs the parser, and assigns a fresh id.
pub fn ingest(
    parser: &dyn CvParser,
    file_bytes: &[u8],
    filename: &str,
) -> Result<CvRecord, CvParseError> {
    if file_bytes.is_empty() {
        return Err(CvParseError::EmptyFile(filename.to_string()));
    }

    let accepted = parser.accepted_extensions();
    let supported = extension_of(filename)
        .map(|ext| accepted.contains(&ext.as_str()))
        .unwrap_or(false);
    if !supported {
        return Err(CvParseError::UnsupportedFileType {
            filename: filename.to_string(),
            accepted: accepted.join(", "),
        });
    }

    let parsed = parser.parse(file_bytes, filename)?;

    Ok(CvRecord {
        id: Uuid::new_v4(),
        display_name: filename.to_string(),
        skills: parsed.skills,
        raw_text: parsed.raw_text,
    })
}
