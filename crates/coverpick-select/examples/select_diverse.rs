//! Pick a diverse subset out of a redundant candidate pool, both with a fixed
//! target size and with the saturation rule choosing the size automatically.
//!
//! Run with: `cargo run -p coverpick-select --example select_diverse`

use coverpick_core::{Result, SaturationConfig};
use coverpick_select::{select_by_saturation, select_fixed_k};

fn main() -> Result<()> {
    // Three topical clusters with uneven redundancy.
    let labels = [
        "rust async runtimes",
        "tokio task scheduling",
        "rust futures explained",
        "sourdough starter basics",
        "feeding a sourdough starter",
        "tidepool ecology field guide",
    ];
    let embeddings: Vec<Vec<f32>> = vec![
        vec![0.95, 0.05, 0.00],
        vec![0.90, 0.10, 0.00],
        vec![0.92, 0.03, 0.05],
        vec![0.05, 0.95, 0.00],
        vec![0.00, 0.92, 0.08],
        vec![0.03, 0.05, 0.95],
    ];

    let top3 = select_fixed_k(&embeddings, 3)?;
    println!("fixed k=3:");
    for &i in &top3 {
        println!("  [{i}] {}", labels[i]);
    }

    let auto = select_by_saturation(&embeddings, SaturationConfig::default())?;
    println!(
        "\nsaturation (threshold {}): optimal_k={}",
        SaturationConfig::default().threshold,
        auto.optimal_k
    );
    for &i in &auto.selected {
        println!("  [{i}] {}", labels[i]);
    }
    println!("trajectory: {:?}", auto.objective_trajectory);

    Ok(())
}
