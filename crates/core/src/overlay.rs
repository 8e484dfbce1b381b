//! Drawing plans for visual inspection of detected elements and clusters.
//!
//! Produces the boxes, colors and labels to overlay on a page image; the
//! caller rasterizes them.

use serde::Serialize;

use crate::geometry::Rect;
use crate::layout::{DetectedPrimitive, ElementCategory, FigureCluster};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const FIGURE_COLOR: Rgb = Rgb(0, 128, 255);
const OTHER_COLOR: Rgb = Rgb(128, 128, 128);
const OTHER_MEMBER_COLOR: Rgb = Rgb(200, 200, 200);

impl Rgb {
    /// Moves each channel halfway to white.
    pub fn lighten(self) -> Rgb {
        let half = |c: u8| (f64::from(c) * 0.5 + 255.0 * 0.5) as u8;
        Rgb(half(self.0), half(self.1), half(self.2))
    }
}

/// Display color for a category. Unknown labels render gray.
pub fn category_color(category: ElementCategory) -> Rgb {
    match category {
        ElementCategory::Text => Rgb(255, 0, 0),
        ElementCategory::Figure => Rgb(0, 255, 0),
        ElementCategory::Table => Rgb(0, 0, 255),
        ElementCategory::Title => Rgb(255, 255, 0),
        ElementCategory::List => Rgb(255, 0, 255),
        ElementCategory::Other => OTHER_COLOR,
    }
}

/// One rectangle to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayBox {
    pub rect: Rect,
    pub color: Rgb,
    pub width: u32,
    pub label: Option<String>,
}

/// Line and label settings for overlay plans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub line_width: u32,
    pub font_size: u32,
    pub show_labels: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_width: 3,
            font_size: 20,
            show_labels: true,
        }
    }
}

impl OverlayStyle {
    /// Boxes for raw detector output, labeled `"{category} ({confidence:.2})"`.
    pub fn layout_overlay(&self, primitives: &[DetectedPrimitive]) -> Vec<OverlayBox> {
        primitives
            .iter()
            .map(|p| OverlayBox {
                rect: p.rect,
                color: category_color(p.category),
                width: self.line_width,
                label: self
                    .show_labels
                    .then(|| format!("{} ({:.2})", p.category, p.confidence)),
            })
            .collect()
    }

    /// Boxes for clusters: a thick cluster outline followed by thin, lightened
    /// outlines of its members.
    pub fn figure_overlay(&self, clusters: &[FigureCluster]) -> Vec<OverlayBox> {
        let mut boxes = Vec::new();
        for (i, cluster) in clusters.iter().enumerate() {
            boxes.push(OverlayBox {
                rect: cluster.rect,
                color: FIGURE_COLOR,
                width: self.line_width + 2,
                label: self.show_labels.then(|| {
                    format!(
                        "Fig{} ({:.2}, {}elem)",
                        i + 1,
                        cluster.confidence,
                        cluster.members.len()
                    )
                }),
            });
            for member in &cluster.members {
                let base = match member.category {
                    ElementCategory::Other => OTHER_MEMBER_COLOR,
                    category => category_color(category),
                };
                boxes.push(OverlayBox {
                    rect: member.rect,
                    color: base.lighten(),
                    width: 1,
                    label: None,
                });
            }
        }
        boxes
    }

    /// Top-left corner for a box's label: above the box, or just inside it
    /// when there is no room above.
    pub fn label_anchor(&self, rect: &Rect) -> (f64, f64) {
        let y = rect.y0() - f64::from(self.font_size) - 4.0;
        if y < 0.0 {
            (rect.x0(), rect.y0() + 2.0)
        } else {
            (rect.x0(), y)
        }
    }
}
