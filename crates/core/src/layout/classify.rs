//! Aspect-ratio classification of unlabeled detector regions.

use crate::geometry::Rect;

use super::types::{DetectedPrimitive, ElementCategory};

pub const DEFAULT_MIN_AREA: f64 = 1000.0;

/// Labels a region by its shape, or drops it when smaller than `min_area`.
///
/// Wide regions (aspect ratio above 3) are text lines, near-square regions
/// (strictly between 0.5 and 2) are figures, and everything else is a table.
/// A zero-height region has aspect ratio 0.
pub fn classify_region(rect: Rect, min_area: f64) -> Option<DetectedPrimitive> {
    if rect.area() < min_area {
        return None;
    }

    let aspect = if rect.height() > 0.0 {
        rect.width() / rect.height()
    } else {
        0.0
    };

    let (category, confidence) = if aspect > 3.0 {
        (ElementCategory::Text, 0.7)
    } else if aspect > 0.5 && aspect < 2.0 {
        (ElementCategory::Figure, 0.6)
    } else {
        (ElementCategory::Table, 0.5)
    };
    Some(DetectedPrimitive::new(rect, category, confidence))
}

/// Classifies every region, keeping input order and dropping small ones.
pub fn classify_regions(rects: &[Rect], min_area: f64) -> Vec<DetectedPrimitive> {
    rects
        .iter()
        .filter_map(|rect| classify_region(*rect, min_area))
        .collect()
}
