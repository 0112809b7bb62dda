//! Ranker — cosine similarity between the CV vector and each job vector, top-k.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::career::catalog::JobPosting;
use crate::career::embedder::TextEmbedder;
use crate::career::ingest::CvRecord;

/// Added to the norm product so zero vectors score 0 instead of NaN.
const EPSILON: f32 = 1e-9;

/// A posting with its similarity score. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedJob {
    #[serde(flatten)]
    pub job: JobPosting,
    /// Cosine similarity in [-1, 1].
    pub score: f32,
}

#[derive(Debug, Error)]
pub enum RankError {
    #[error("Got {jobs} jobs but {vectors} job vectors")]
    LengthMismatch { jobs: usize, vectors: usize },
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (norm_a * norm_b + EPSILON)
}

/// Scores every job against `cv_vector` and keeps the best `top_k`.
///
/// Sorting is stable: equal scores keep catalog order. A `top_k` larger than
/// the catalog returns the whole catalog ranked.
pub fn rank(
    cv_vector: &[f32],
    jobs: &[JobPosting],
    job_vectors: &[Vec<f32>],
    top_k: usize,
) -> Result<Vec<RankedJob>, RankError> {
    if jobs.len() != job_vectors.len() {
        return Err(RankError::LengthMismatch {
            jobs: jobs.len(),
            vectors: job_vectors.len(),
        });
    }

    let mut ranked: Vec<RankedJob> = jobs
        .iter()
        .zip(job_vectors)
        .map(|(job, vector)| RankedJob {
            job: job.clone(),
            score: cosine_similarity(cv_vector, vector),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_k);
    Ok(ranked)
}

/// Embeds the CV skills and job keywords, then ranks.
pub fn match_jobs(
    embedder: &dyn TextEmbedder,
    cv: &CvRecord,
    jobs: &[JobPosting],
    top_k: usize,
) -> Result<Vec<RankedJob>, RankError> {
    let cv_vector = embedder
        .embed(&[cv.skills.join(" ")])
        .into_iter()
        .next()
        .unwrap_or_default();
    let keywords: Vec<String> = jobs.iter().map(|j| j.keyword_text.clone()).collect();
    let job_vectors = embedder.embed(&keywords);
    rank(&cv_vector, jobs, &job_vectors, top_k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::catalog::static_catalog;
    use crate::career::embedder::SeededEmbedder;
    use crate::career::ingest::{ingest, StubCvParser};

    fn job(id: &str) -> JobPosting {
        JobPosting {
            job_id: id.to_string(),
            title: format!("Job {id}"),
            company: "Co".to_string(),
            location: "Remote".to_string(),
            keyword_text: String::new(),
        }
    }

    #[test]
    fn test_cosine_identical_vectors_is_one() {
        let v = vec![0.3, 0.4, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_cosine_opposite_vectors_is_minus_one() {
        let a = vec![1.0, 2.0];
        let b = vec![-1.0, -2.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero_not_nan() {
        let score = cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_cosine_invariant_to_positive_scaling() {
        let a = vec![0.2, 0.9, 0.1, 0.5];
        let b = vec![0.7, 0.3, 0.8, 0.4];
        let base = cosine_similarity(&a, &b);
        for factor in [0.5_f32, 3.0, 100.0] {
            let scaled: Vec<f32> = a.iter().map(|x| x * factor).collect();
            assert!((cosine_similarity(&scaled, &b) - base).abs() < 1e-5);
            let scaled_b: Vec<f32> = b.iter().map(|x| x * factor).collect();
            assert!((cosine_similarity(&a, &scaled_b) - base).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rank_returns_min_k_len_sorted() {
        let embedder = SeededEmbedder::default();
        let catalog = static_catalog();
        let cv = ingest(&StubCvParser, b"x", "cv.pdf").unwrap();
        for k in 0..6 {
            let ranked = match_jobs(&embedder, &cv, &catalog, k).unwrap();
            assert_eq!(ranked.len(), k.min(catalog.len()));
            assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_scores_within_bounds() {
        let cv = ingest(&StubCvParser, b"x", "cv.pdf").unwrap();
        let ranked = match_jobs(&SeededEmbedder::default(), &cv, &static_catalog(), 10).unwrap();
        assert!(ranked.iter().all(|r| (-1.0..=1.0).contains(&r.score)));
    }

    #[test]
    fn test_first_job_shares_cv_vector() {
        // Both batches reseed, so job 1's vector equals the CV vector.
        let cv = ingest(&StubCvParser, b"x", "cv.pdf").unwrap();
        let ranked = match_jobs(&SeededEmbedder::default(), &cv, &static_catalog(), 3).unwrap();
        assert_eq!(ranked[0].job.job_id, "1");
        assert!((ranked[0].score - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let jobs = vec![job("a"), job("b"), job("c")];
        let same = vec![1.0, 0.0];
        let vectors = vec![same.clone(), vec![0.0, 1.0], same.clone()];
        let ranked = rank(&same, &jobs, &vectors, 3).unwrap();
        let ids: Vec<_> = ranked.iter().map(|r| r.job.job_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let err = rank(&[1.0], &[job("a")], &[], 3).unwrap_err();
        assert!(matches!(err, RankError::LengthMismatch { jobs: 1, vectors: 0 }));
    }

    #[test]
    fn test_empty_catalog_ranks_to_empty() {
        assert!(rank(&[1.0], &[], &[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_ranked_job_flattens_posting() {
        let ranked = RankedJob {
            job: job("a"),
            score: 0.5,
        };
        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["job_id"], "a");
        assert_eq!(value["score"], 0.5);
    }
}
