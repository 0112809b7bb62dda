//! Text embedding capability.
//!
//! `SeededEmbedder` is a placeholder: vectors are seeded pseudo-random draws and
//! carry no meaning about the input text. A real model plugs in behind
//! `TextEmbedder` without touching the ranker.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_DIMENSIONS: usize = 384;
pub const DEFAULT_SEED: u64 = 42;

pub trait TextEmbedder: Send + Sync {
    /// One fixed-length vector per input, in input order.
    fn embed(&self, texts: &[String]) -> Vec<Vec<f32>>;

    fn dimensions(&self) -> usize;

    fn name(&self) -> &str;
}

/// Deterministic random embedder.
///
/// Every call reseeds the generator, so the i-th vector of a batch depends only
/// on the seed and `i`, never on the text or on earlier calls.
#[derive(Debug, Clone)]
pub struct SeededEmbedder {
    seed: u64,
    dimensions: usize,
}

impl Default for SeededEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_DIMENSIONS)
    }
}

impl SeededEmbedder {
    pub fn new(seed: u64, dimensions: usize) -> Self {
        Self { seed, dimensions }
    }
}

impl TextEmbedder for SeededEmbedder {
    fn embed(&self, texts: &[String]) -> Vec<Vec<f32>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        texts
            .iter()
            .map(|_| (0..self.dimensions).map(|_| rng.gen::<f32>()).collect())
            .collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "seeded-random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("text {i}")).collect()
    }

    #[test]
    fn test_fixed_dimensionality() {
        let vectors = SeededEmbedder::default().embed(&texts(4));
        assert_eq!(vectors.len(), 4);
        assert!(vectors.iter().all(|v| v.len() == 384));
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let embedder = SeededEmbedder::new(7, 16);
        assert_eq!(embedder.embed(&texts(3)), embedder.embed(&texts(3)));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = SeededEmbedder::new(1, 16).embed(&texts(1));
        let b = SeededEmbedder::new(2, 16).embed(&texts(1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_row_depends_only_on_position() {
        let embedder = SeededEmbedder::default();
        let single = embedder.embed(&["Python SQL".to_string()]);
        let batch = embedder.embed(&texts(4));
        assert_eq!(single[0], batch[0]);
        assert_ne!(batch[0], batch[1]);
    }

    #[test]
    fn test_values_in_unit_interval() {
        let vectors = SeededEmbedder::default().embed(&texts(2));
        assert!(vectors.iter().flatten().all(|x| (0.0..1.0).contains(x)));
    }

    #[test]
    fn test_empty_batch() {
        assert!(SeededEmbedder::default().embed(&[]).is_empty());
    }
}
