//! Job Catalog — live job search with a static fallback.
//!
//! The live `JobSource` is optional. Whenever it is missing, slow, or broken the
//! catalog degrades to `static_catalog()` and hands the caller a notice instead
//! of an error, so ranking always has something to work with.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// A single job opening. Read-only for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "keywords")]
    pub keyword_text: String,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Live job search unavailable: {0}")]
    Unavailable(String),
}

/// Where the returned jobs came from. Surfaced for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSourceKind {
    Live,
    StaticFallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub jobs: Vec<JobPosting>,
    /// Informational, non-fatal. Set whenever the fallback was used.
    pub notice: Option<String>,
    pub source: JobSourceKind,
}

// ────────────────────────────────────────────────────────────────────────────
// Static fallback
// ────────────────────────────────────────────────────────────────────────────

fn posting(job_id: &str, title: &str, company: &str, location: &str, keywords: &str) -> JobPosting {
    JobPosting {
        job_id: job_id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        keyword_text: keywords.to_string(),
    }
}

/// The known-good four-row catalog.
pub fn static_catalog() -> Vec<JobPosting> {
    vec![
        posting("1", "Data Analyst", "Acme Corp", "Baltimore, MD", "Python SQL Excel"),
        posting(
            "2",
            "Product Manager",
            "TechNova",
            "Remote",
            "Agile Roadmaps Leadership",
        ),
        posting(
            "3",
            "Machine Learning Engineer",
            "DeepAI",
            "Washington, DC",
            "Machine Learning Python TensorFlow",
        ),
        posting(
            "4",
            "Business Analyst",
            "FinServe",
            "New York, NY",
            "SQL PowerBI Finance",
        ),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Live search
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(&self, skills: &[String]) -> Result<Vec<JobPosting>, SearchError>;

    fn name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    skills: &'a [String],
}

/// HTTP job board client. POSTs the skill list and expects a JSON array of postings.
#[derive(Clone)]
pub struct LiveJobSearch {
    client: Client,
    url: String,
}

impl LiveJobSearch {
    pub fn new(url: String, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl JobSource for LiveJobSearch {
    async fn search(&self, skills: &[String]) -> Result<Vec<JobPosting>, SearchError> {
        let response = self
            .client
            .post(&self.url)
            .json(&SearchRequest { skills })
            .send()
            .await
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Unavailable(format!(
                "job board returned status {status}"
            )));
        }

        response
            .json::<Vec<JobPosting>>()
            .await
            .map_err(|e| SearchError::Unavailable(format!("invalid job board response: {e}")))
    }

    fn name(&self) -> &str {
        "live"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog with fallback
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct JobCatalog {
    live: Option<Arc<dyn JobSource>>,
}

impl JobCatalog {
    pub fn new(live: Option<Arc<dyn JobSource>>) -> Self {
        Self { live }
    }

    /// Static-only catalog.
    pub fn offline() -> Self {
        Self { live: None }
    }

    /// Never fails: any live-search problem degrades to the static catalog.
    pub async fn search(&self, skills: &[String]) -> SearchOutcome {
        match self.try_live(skills).await {
            Ok(jobs) => {
                info!("Live job search returned {} postings", jobs.len());
                SearchOutcome {
                    jobs,
                    notice: None,
                    source: JobSourceKind::Live,
                }
            }
            Err(err) => {
                warn!("{err}; falling back to static catalog");
                SearchOutcome {
                    jobs: static_catalog(),
                    notice: Some(format!("Job search fallback activated: {err}")),
                    source: JobSourceKind::StaticFallback,
                }
            }
        }
    }

    /// Looks up a posting by id within the current search results.
    pub async fn find(&self, skills: &[String], job_id: &str) -> Option<JobPosting> {
        self.search(skills)
            .await
            .jobs
            .into_iter()
            .find(|job| job.job_id == job_id)
    }

    async fn try_live(&self, skills: &[String]) -> Result<Vec<JobPosting>, SearchError> {
        let source = self.live.as_ref().ok_or_else(|| {
            SearchError::Unavailable("live job search not configured".to_string())
        })?;
        let jobs = source.search(skills).await?;
        if jobs.is_empty() {
            return Err(SearchError::Unavailable(format!(
                "{} source returned no postings",
                source.name()
            )));
        }
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FailingSource;

    #[async_trait]
    impl JobSource for FailingSource {
        async fn search(&self, _skills: &[String]) -> Result<Vec<JobPosting>, SearchError> {
            Err(SearchError::Unavailable("connection refused".to_string()))
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    struct EmptySource;

    #[async_trait]
    impl JobSource for EmptySource {
        async fn search(&self, _skills: &[String]) -> Result<Vec<JobPosting>, SearchError> {
            Ok(vec![])
        }
        fn name(&self) -> &str {
            "empty"
        }
    }

    struct FixedSource;

    #[async_trait]
    impl JobSource for FixedSource {
        async fn search(&self, _skills: &[String]) -> Result<Vec<JobPosting>, SearchError> {
            Ok(vec![posting("x9", "Rust Engineer", "Ferris Inc", "Remote", "Rust")])
        }
        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn skills() -> Vec<String> {
        vec!["Python".to_string(), "SQL".to_string()]
    }

    fn static_ids(outcome: &SearchOutcome) -> HashSet<String> {
        outcome.jobs.iter().map(|j| j.job_id.clone()).collect()
    }

    #[test]
    fn test_static_catalog_has_four_unique_jobs() {
        let catalog = static_catalog();
        assert_eq!(catalog.len(), 4);
        let ids: HashSet<_> = catalog.iter().map(|j| j.job_id.as_str()).collect();
        assert_eq!(ids, HashSet::from(["1", "2", "3", "4"]));
        assert_eq!(catalog[2].keyword_text, "Machine Learning Python TensorFlow");
    }

    #[tokio::test]
    async fn test_unconfigured_search_falls_back_with_notice() {
        let outcome = JobCatalog::offline().search(&skills()).await;
        assert_eq!(outcome.source, JobSourceKind::StaticFallback);
        assert_eq!(static_ids(&outcome), HashSet::from(["1", "2", "3", "4"].map(String::from)));
        let notice = outcome.notice.unwrap();
        assert!(notice.starts_with("Job search fallback activated"));
    }

    #[tokio::test]
    async fn test_failing_source_falls_back() {
        let catalog = JobCatalog::new(Some(Arc::new(FailingSource)));
        let outcome = catalog.search(&skills()).await;
        assert_eq!(outcome.jobs, static_catalog());
        assert!(outcome.notice.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_empty_live_result_falls_back() {
        let catalog = JobCatalog::new(Some(Arc::new(EmptySource)));
        let outcome = catalog.search(&skills()).await;
        assert_eq!(outcome.source, JobSourceKind::StaticFallback);
        assert_eq!(outcome.jobs.len(), 4);
    }

    #[tokio::test]
    async fn test_live_results_used_when_available() {
        let catalog = JobCatalog::new(Some(Arc::new(FixedSource)));
        let outcome = catalog.search(&skills()).await;
        assert_eq!(outcome.source, JobSourceKind::Live);
        assert!(outcome.notice.is_none());
        assert_eq!(outcome.jobs[0].job_id, "x9");
    }

    #[tokio::test]
    async fn test_unreachable_live_search_falls_back() {
        // Nothing listens on port 9 locally; the request fails fast.
        let live = LiveJobSearch::new(
            "http://127.0.0.1:9/jobs".to_string(),
            Duration::from_millis(500),
        )
        .unwrap();
        let catalog = JobCatalog::new(Some(Arc::new(live)));
        let outcome = catalog.search(&skills()).await;
        assert_eq!(outcome.source, JobSourceKind::StaticFallback);
        assert_eq!(outcome.jobs.len(), 4);
    }

    #[tokio::test]
    async fn test_silent_live_search_times_out_and_falls_back() {
        // Accepts connections and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let live = LiveJobSearch::new(format!("http://{addr}/jobs"), Duration::from_millis(200))
            .unwrap();
        let catalog = JobCatalog::new(Some(Arc::new(live)));

        let started = std::time::Instant::now();
        let outcome = catalog.search(&skills()).await;
        let elapsed = started.elapsed();

        assert_eq!(outcome.source, JobSourceKind::StaticFallback);
        assert_eq!(outcome.jobs, static_catalog());
        assert!(outcome.notice.is_some());
        assert!(elapsed >= Duration::from_millis(200), "returned before the timeout: {elapsed:?}");
        assert!(elapsed < Duration::from_secs(3), "timeout not enforced: {elapsed:?}");
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let catalog = JobCatalog::offline();
        let job = catalog.find(&skills(), "3").await.unwrap();
        assert_eq!(job.title, "Machine Learning Engineer");
        assert!(catalog.find(&skills(), "99").await.is_none());
    }

    #[test]
    fn test_posting_serializes_keywords_field() {
        let value = serde_json::to_value(&static_catalog()[0]).unwrap();
        assert_eq!(value["keywords"], "Python SQL Excel");
    }
}
