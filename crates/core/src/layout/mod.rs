//! Layout module for figure extraction.
//!
//! This module contains:
//! - Layout data types (DetectedPrimitive, FigureCluster, TextSpan, AnnotatedFigure)
//! - Clustering and linking parameters
//! - The figure merge engine
//! - Caption and context association
//! - Text alignment and region classification helpers

pub mod align;
pub mod caption;
pub mod classify;
pub mod clustering;
pub mod params;
pub mod types;

pub use align::{AlignedText, align_text};
pub use caption::{attach_captions, fetch_context, fetch_context_with};
pub use classify::{DEFAULT_MIN_AREA, classify_region, classify_regions};
pub use clustering::{merge_primitives, should_merge};
pub use params::*;
pub use types::*;
