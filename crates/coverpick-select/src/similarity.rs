//! Exact clamped-cosine similarity construction.
//!
//! This is the default [`SimilarityBackend`]: every pairwise similarity is
//! computed exactly and clamped to `[0, 1]` before storage, so the downstream
//! facility-location objective stays monotone and submodular. Negative
//! similarities would let coverage shrink, which breaks the lazy-evaluation
//! argument in [`crate::greedy`].

use coverpick_core::{Result, SimilarityBackend, SimilarityMatrix};

/// Norms at or below this are treated as zero (degenerate vector).
pub(crate) const NORM_EPS: f32 = 1e-9;

/// Dot product over the common prefix of the two slices.
#[inline]
#[must_use]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 norm of a vector.
#[inline]
#[must_use]
pub fn norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when the lengths differ (the pair is incomparable, not an
/// error) and when either vector has zero norm.
#[inline]
#[must_use]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let na = norm(a);
    let nb = norm(b);
    if na > NORM_EPS && nb > NORM_EPS {
        dot(a, b) / (na * nb)
    } else {
        0.0
    }
}

/// Exact pairwise clamped-cosine similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineBackend;

impl SimilarityBackend for CosineBackend {
    fn name(&self) -> &'static str {
        "cosine_exact"
    }

    /// O(n²·d). Only the upper triangle is computed; the mirror entry is
    /// copied, so the matrix is symmetric by construction (length mismatch is
    /// a symmetric predicate, its zero-fill included).
    fn build(&self, embeddings: &[&[f32]]) -> Result<SimilarityMatrix> {
        let n = embeddings.len();
        let mut data = vec![0.0f32; n * n];
        let mut mismatched_pairs = 0u64;
        for i in 0..n {
            for j in i..n {
                if embeddings[i].len() != embeddings[j].len() {
                    mismatched_pairs += 1;
                    continue;
                }
                let s = cosine(embeddings[i], embeddings[j]).clamp(0.0, 1.0);
                data[i * n + j] = s;
                data[j * n + i] = s;
            }
        }
        let degenerate_vectors = embeddings.iter().filter(|v| norm(v) <= NORM_EPS).count() as u64;

        let mut matrix = SimilarityMatrix::from_rows(n, data)?;
        matrix.mismatched_pairs = mismatched_pairs;
        matrix.degenerate_vectors = degenerate_vectors;
        Ok(matrix)
    }
}
