//! Clustering and linking parameters.
//!
//! Contains ClusterParams, LinkParams and the PipelineParams bundle.

use serde::{Deserialize, Serialize};

use crate::error::{FigError, Result};

pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 50.0;
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.3;
pub const DEFAULT_CAPTION_THRESHOLD: f64 = 50.0;
pub const DEFAULT_CONTEXT_THRESHOLD: f64 = 150.0;
pub const DEFAULT_FETCH_DISTANCE: f64 = 200.0;

fn check(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FigError::InvalidParameter { name, value })
    }
}

/// Parameters for the figure merge engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    /// Clusters whose centers are at most this far apart (page pixels) merge.
    pub distance_threshold: f64,

    /// Clusters whose overlap ratio is at least this value merge.
    pub overlap_threshold: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

impl ClusterParams {
    /// Creates clustering parameters, rejecting negative or non-finite values.
    pub fn new(distance_threshold: f64, overlap_threshold: f64) -> Result<Self> {
        Ok(Self {
            distance_threshold: check("distance_threshold", distance_threshold)?,
            overlap_threshold: check("overlap_threshold", overlap_threshold)?,
        })
    }
}

/// Parameters for caption and context association.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkParams {
    /// Configured caption distance. Caption candidacy is decided by the
    /// above/below test alone; this value does not gate it.
    pub caption_threshold: f64,

    /// Spans whose centers are at most this far from a figure become context.
    pub context_threshold: f64,

    /// Radius used by [`fetch_context_with`](super::fetch_context_with).
    pub fetch_distance: f64,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            caption_threshold: DEFAULT_CAPTION_THRESHOLD,
            context_threshold: DEFAULT_CONTEXT_THRESHOLD,
            fetch_distance: DEFAULT_FETCH_DISTANCE,
        }
    }
}

impl LinkParams {
    /// Creates linking parameters, rejecting negative or non-finite values.
    pub fn new(caption_threshold: f64, context_threshold: f64, fetch_distance: f64) -> Result<Self> {
        Ok(Self {
            caption_threshold: check("caption_threshold", caption_threshold)?,
            context_threshold: check("context_threshold", context_threshold)?,
            fetch_distance: check("fetch_distance", fetch_distance)?,
        })
    }
}

/// Both parameter sets, as consumed by the page pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub cluster: ClusterParams,
    pub link: LinkParams,
}
