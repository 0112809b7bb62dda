//! Document generation — career advice, cover letters and intro emails.
//!
//! Pure string interpolation over `CvRecord` and `JobPosting` fields. No I/O.
//! Every template is filled with one `render` pass, so placeholder-looking text
//! in a filename, skill or job title is never expanded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::career::catalog::JobPosting;
use crate::career::ingest::CvRecord;
use crate::career::ranker::RankedJob;
use crate::career::templates::{
    render, ADVICE_TEMPLATE, COVER_LETTER_TEMPLATE, HANDS_ON_FRAGMENT, INTRO_EMAIL_TEMPLATE,
};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Cannot generate {0} without at least one ranked job")]
    EmptyInput(&'static str),
}

/// Who the documents are written for and signed by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateProfile {
    pub institution: String,
    pub club: String,
    pub signature: String,
}

impl Default for TemplateProfile {
    fn default() -> Self {
        Self {
            institution: "JHU".to_string(),
            club: "JHU's Data Science Club".to_string(),
            signature: "Student Name".to_string(),
        }
    }
}

/// Career path suggestion pointing at the best-ranked job.
pub fn advice(
    cv: &CvRecord,
    ranked_jobs: &[RankedJob],
    profile: &TemplateProfile,
) -> Result<String, DocumentError> {
    let top = ranked_jobs
        .first()
        .ok_or(DocumentError::EmptyInput("career advice"))?;

    Ok(render(
        ADVICE_TEMPLATE,
        &[
            ("skills", leading_skills(cv, 3).as_str()),
            ("club", profile.club.as_str()),
            ("top_title", top.job.title.as_str()),
        ],
    ))
}

pub fn cover_letter(cv: &CvRecord, job: &JobPosting, profile: &TemplateProfile) -> String {
    render(
        COVER_LETTER_TEMPLATE,
        &[
            ("skills", leading_skills(cv, 3).as_str()),
            ("institution", profile.institution.as_str()),
            ("title", job.title.as_str()),
            ("company", job.company.as_str()),
            ("signature", profile.signature.as_str()),
        ],
    )
}

pub fn intro_email(cv: &CvRecord, job: &JobPosting, profile: &TemplateProfile) -> String {
    let hands_on = cv
        .skills
        .get(2)
        .map(|skill| render(HANDS_ON_FRAGMENT, &[("skill", skill.as_str())]))
        .unwrap_or_default();

    render(
        INTRO_EMAIL_TEMPLATE,
        &[
            ("title", job.title.as_str()),
            ("name", sender_name(&cv.display_name)),
            ("institution", profile.institution.as_str()),
            ("skills", leading_skills(cv, 2).as_str()),
            ("hands_on", hands_on.as_str()),
            ("company", job.company.as_str()),
            ("signature", profile.signature.as_str()),
        ],
    )
}

/// First `n` skills joined with ", " (fewer if the CV has fewer).
fn leading_skills(cv: &CvRecord, n: usize) -> String {
    cv.skills
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Filename up to the first '.', e.g. "jane.doe.pdf" → "jane".
fn sender_name(display_name: &str) -> &str {
    display_name.split('.').next().unwrap_or(display_name)
}
