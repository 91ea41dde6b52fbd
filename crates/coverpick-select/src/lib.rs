//! Diversity selection over embedding vectors.
//!
//! Given n embeddings, pick the subset that best covers the whole set under a
//! monotone submodular facility-location objective, either at a fixed
//! cardinality ([`select_fixed_k`]) or with cardinality chosen automatically
//! by a diminishing-returns rule ([`select_by_saturation`]).
//!
//! Everything here is synchronous, in-memory, and allocated fresh per call;
//! no state survives a selection.

use coverpick_core::{
    Error, Result, SaturationConfig, SaturationSelection, SimilarityBackend, StopRule,
};

pub mod coverage;
pub mod greedy;
pub mod similarity;

pub use coverage::CoverageTracker;
pub use greedy::{GreedyRun, Selector};
pub use similarity::CosineBackend;

fn as_views<V: AsRef<[f32]>>(embeddings: &[V]) -> Vec<&[f32]> {
    embeddings.iter().map(|v| v.as_ref()).collect()
}

/// Select exactly `k` mutually diverse items; returns indices in selection
/// order.
///
/// `k` must satisfy `1 <= k <= embeddings.len()`; anything else is rejected,
/// never clamped. `k == n` needs no ordering work and returns all indices in
/// index order.
pub fn select_fixed_k<V: AsRef<[f32]>>(embeddings: &[V], k: usize) -> Result<Vec<usize>> {
    let n = embeddings.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if k == 0 || k > n {
        return Err(Error::InvalidCardinality { k, n });
    }
    if k == n {
        return Ok((0..n).collect());
    }

    let matrix = CosineBackend.build(&as_views(embeddings))?;
    Ok(Selector::new(&matrix).run(StopRule::FixedCount(k)).selected)
}

/// Select items until the objective's marginal increase drops below
/// `config.threshold`, reporting the chosen cardinality and the objective
/// trajectory.
pub fn select_by_saturation<V: AsRef<[f32]>>(
    embeddings: &[V],
    config: SaturationConfig,
) -> Result<SaturationSelection> {
    let n = embeddings.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }

    let matrix = CosineBackend.build(&as_views(embeddings))?;
    let run = Selector::new(&matrix).run(StopRule::SaturationThreshold(config.threshold));

    let optimal_k = run.saturated_at.unwrap_or(run.selected.len());
    let mut selected = run.selected;
    selected.truncate(optimal_k);

    Ok(SaturationSelection {
        selected,
        optimal_k,
        objective_trajectory: run.objective_trajectory,
        warnings: matrix.warnings(),
    })
}

/// Convenience wrapper for callers holding `(id, embedding)` pairs: runs the
/// given stopping rule and returns the selected ids in selection order.
pub fn select_representatives<I: Clone, V: AsRef<[f32]>>(
    items: &[(I, V)],
    rule: StopRule,
) -> Result<Vec<I>> {
    let n = items.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if let StopRule::FixedCount(k) = rule {
        if k == 0 || k > n {
            return Err(Error::InvalidCardinality { k, n });
        }
        if k == n {
            return Ok(items.iter().map(|(id, _)| id.clone()).collect());
        }
    }

    let views: Vec<&[f32]> = items.iter().map(|(_, v)| v.as_ref()).collect();
    let matrix = CosineBackend.build(&views)?;
    let run = Selector::new(&matrix).run(rule);
    let keep = match rule {
        StopRule::FixedCount(_) => run.selected.len(),
        StopRule::SaturationThreshold(_) => run.saturated_at.unwrap_or(run.selected.len()),
    };

    Ok(run.selected[..keep]
        .iter()
        .map(|&i| items[i].0.clone())
        .collect())
}
