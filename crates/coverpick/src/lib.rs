//! Public facade crate for `coverpick`.
//!
//! This crate intentionally contains no algorithmic logic. It re-exports the
//! backend-agnostic types/traits from `coverpick-core` and the default
//! selection entry points from `coverpick-select`.

pub use coverpick_core::*;

pub use coverpick_select::{
    select_by_saturation, select_fixed_k, select_representatives, CosineBackend, CoverageTracker,
    GreedyRun, Selector,
};
