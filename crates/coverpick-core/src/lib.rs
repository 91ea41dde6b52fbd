use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid cardinality: k={k} with {n} candidates")]
    InvalidCardinality { k: usize, n: usize },
    #[error("empty input: no embeddings supplied")]
    EmptyInput,
    #[error("similarity backend failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Pairwise similarity between n items, row-major, entries clamped to [0, 1].
///
/// `data[i * n + j]` is the similarity between items i and j. Construction is
/// backend-specific (see [`SimilarityBackend`]); the greedy engine only reads
/// rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
    /// Vectors with zero (or near-zero) norm; every similarity involving one is 0.
    pub degenerate_vectors: u64,
    /// Unordered pairs zero-filled because the two vectors had different lengths.
    pub mismatched_pairs: u64,
}

impl SimilarityMatrix {
    /// Build from a row-major buffer. `data.len()` must be `n * n`.
    pub fn from_rows(n: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != n * n {
            return Err(Error::Backend(format!(
                "similarity matrix must be {}x{} ({} entries), got {}",
                n,
                n,
                n * n,
                data.len()
            )));
        }
        Ok(Self {
            n,
            data,
            degenerate_vectors: 0,
            mismatched_pairs: 0,
        })
    }

    /// Number of items (the matrix is `len() x len()`).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n + j]
    }

    /// Similarity of item i to every item, as a length-n slice.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Diagnostic warnings accumulated during construction.
    ///
    /// Mismatched or degenerate vectors are not errors (their similarities
    /// are defined as 0), but they usually point at an upstream embedding
    /// bug, so construction counts them.
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.mismatched_pairs > 0 {
            out.push("dimension_mismatch_pairs_zeroed");
        }
        if self.degenerate_vectors > 0 {
            out.push("degenerate_vectors");
        }
        out
    }
}

/// How the shared greedy loop decides to stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StopRule {
    /// Stop after exactly this many selections.
    FixedCount(usize),
    /// Stop at the first selection whose objective gain drops below this
    /// threshold; that selection is excluded from the returned prefix.
    SaturationThreshold(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationConfig {
    /// Minimum mean-coverage gain a selection must add to keep the loop going.
    pub threshold: f32,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self { threshold: 1e-2 }
    }
}

impl SaturationConfig {
    #[must_use]
    pub const fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Result of saturation-based selection.
#[derive(Debug, Clone, Serialize)]
pub struct SaturationSelection {
    /// Selected indices, in selection order (a prefix of the greedy run).
    pub selected: Vec<usize>,
    /// Number of selections kept; always in `1..=n`.
    pub optimal_k: usize,
    /// Mean coverage after each acceptance, including the below-threshold one
    /// that ended the run (if any).
    pub objective_trajectory: Vec<f32>,
    pub warnings: Vec<&'static str>,
}

/// Pluggable similarity-matrix construction.
///
/// The default backend computes exact clamped cosine similarity; callers at
/// scale can substitute an approximate or streaming builder without touching
/// the greedy engine.
pub trait SimilarityBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn build(&self, embeddings: &[&[f32]]) -> Result<SimilarityMatrix>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_rejects_wrong_buffer_size() {
        let err = SimilarityMatrix::from_rows(2, vec![1.0, 0.5, 0.5]).unwrap_err();
        assert!(matches!(err, Error::Backend(_)), "got {err:?}");
    }

    #[test]
    fn matrix_rows_and_entries_agree() {
        let m = SimilarityMatrix::from_rows(2, vec![1.0, 0.25, 0.25, 1.0]).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.row(1), &[0.25, 1.0]);
        assert_eq!(m.get(0, 1), 0.25);
    }

    #[test]
    fn matrix_warnings_name_both_fallbacks() {
        let mut m = SimilarityMatrix::from_rows(1, vec![0.0]).unwrap();
        assert!(m.warnings().is_empty());
        m.degenerate_vectors = 1;
        m.mismatched_pairs = 3;
        assert_eq!(
            m.warnings(),
            vec!["dimension_mismatch_pairs_zeroed", "degenerate_vectors"]
        );
    }

    #[test]
    fn error_messages_carry_the_rejected_parameters() {
        let e = Error::InvalidCardinality { k: 7, n: 3 };
        assert_eq!(e.to_string(), "invalid cardinality: k=7 with 3 candidates");
        assert_eq!(Error::EmptyInput.to_string(), "empty input: no embeddings supplied");
    }

    #[test]
    fn saturation_selection_serializes_with_stable_field_names() {
        let s = SaturationSelection {
            selected: vec![2, 0],
            optimal_k: 2,
            objective_trajectory: vec![0.5, 0.75],
            warnings: vec!["degenerate_vectors"],
        };
        let v: serde_json::Value = serde_json::to_value(&s).unwrap();
        assert_eq!(v["optimal_k"].as_u64(), Some(2));
        assert_eq!(v["selected"][0].as_u64(), Some(2));
        assert_eq!(v["objective_trajectory"][1].as_f64(), Some(0.75));
        assert_eq!(v["warnings"][0].as_str(), Some("degenerate_vectors"));
    }
}
