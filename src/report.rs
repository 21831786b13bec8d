//! Optional, pure formatting utilities over a weight table. The formatter
//! is a pure function of the table and plays no part in the search itself.

use crate::weights::WeightTable;

/// One pair's weight and implied selection probability, structured rather
/// than rendered to text. Feeds [`format_weight_log`] and is the
/// serializable form a caller would emit to a metrics sidecar instead of a
/// human-readable table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairWeight {
    pub pair: usize,
    pub weight: f64,
    /// Share of total weight mass; identical to the selection probability,
    /// since selection is inverse-CDF over the weights.
    pub probability: f64,
}

/// Builds a structured snapshot of every pair's weight and probability.
pub fn weight_snapshot(table: &WeightTable) -> Vec<PairWeight> {
    let weights = table.weights();
    let total: f64 = weights.iter().sum();
    weights
        .iter()
        .enumerate()
        .map(|(pair, &weight)| PairWeight {
            pair,
            weight,
            probability: if total > 0.0 { weight / total } else { 0.0 },
        })
        .collect()
}

/// Renders a human-readable table of pair weights, their share of the total
/// weight mass, and the implied selection probability.
pub fn format_weight_log(table: &WeightTable) -> String {
    let snapshot = weight_snapshot(table);
    let total: f64 = table.weights().iter().sum();
    let mut out = String::new();
    out.push_str("pair   weight        probability\n");
    for row in &snapshot {
        out.push_str(&format!(
            "{:<6} {:<13.6} {:.4}\n",
            row.pair, row.weight, row.probability
        ));
    }
    out.push_str(&format!("total: {total:.6}\n"));
    out
}
