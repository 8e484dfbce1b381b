//! Figure clustering.
//!
//! Folds detector primitives into figure clusters by repeated greedy passes
//! until a pass performs no merge. The scan order is observable: a cluster
//! absorbs later clusters against its already-grown rectangle, so different
//! input orders can give different partitions.

use crate::geometry::{Rect, center_distance, overlap_ratio};

use super::params::ClusterParams;
use super::types::{DetectedPrimitive, FigureCluster};

/// Merge predicate: enough overlap, or centers close enough.
pub fn should_merge(a: &Rect, b: &Rect, params: &ClusterParams) -> bool {
    if overlap_ratio(a, b) >= params.overlap_threshold {
        return true;
    }
    center_distance(a, b) <= params.distance_threshold
}

/// Groups primitives into figure clusters.
///
/// Every primitive starts as its own cluster. Each pass walks the clusters in
/// order; a surviving cluster absorbs every later unconsumed cluster that
/// satisfies [`should_merge`] against its current rectangle. Passes repeat
/// until one performs zero merges. Output order is first-survivor order.
pub fn merge_primitives(primitives: &[DetectedPrimitive], params: &ClusterParams) -> Vec<FigureCluster> {
    if primitives.is_empty() {
        return Vec::new();
    }

    let mut clusters: Vec<FigureCluster> = primitives
        .iter()
        .cloned()
        .map(FigureCluster::singleton)
        .collect();

    let mut pass = 0usize;
    loop {
        let (next, merges) = merge_pass(clusters, params);
        clusters = next;
        pass += 1;
        tracing::debug!(pass, merges, clusters = clusters.len(), "figure merge pass");
        if merges == 0 {
            break;
        }
    }
    clusters
}

/// One left-to-right pass. Returns the surviving clusters and the merge count.
fn merge_pass(clusters: Vec<FigureCluster>, params: &ClusterParams) -> (Vec<FigureCluster>, usize) {
    // A taken slot is a consumed cluster.
    let mut slots: Vec<Option<FigureCluster>> = clusters.into_iter().map(Some).collect();
    let mut survivors = Vec::with_capacity(slots.len());
    let mut merges = 0usize;

    for i in 0..slots.len() {
        let Some(mut current) = slots[i].take() else {
            continue;
        };
        for slot in slots.iter_mut().skip(i + 1) {
            let absorb = slot
                .as_ref()
                .is_some_and(|other| should_merge(&current.rect, &other.rect, params));
            if absorb && let Some(other) = slot.take() {
                current = current.merge(&other);
                merges += 1;
            }
        }
        survivors.push(current);
    }
    (survivors, merges)
}
