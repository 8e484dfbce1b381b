//! Axis-aligned rectangles and the geometric predicates used for clustering
//! and caption association.
//!
//! Coordinates are page-pixel units with the origin at the top-left, so `y0`
//! is the top edge and `y1` the bottom edge of a rectangle.

use serde::{Deserialize, Serialize};

use crate::error::{FigError, Result};

/// An axis-aligned rectangle `(x0, y0)`-`(x1, y1)` with `x1 >= x0` and `y1 >= y0`.
///
/// Zero-area rectangles are legal. Construction goes through [`Rect::new`],
/// which rejects inverted or NaN extents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectRepr")]
pub struct Rect {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

#[derive(Deserialize)]
struct RectRepr {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl TryFrom<RectRepr> for Rect {
    type Error = FigError;

    fn try_from(r: RectRepr) -> Result<Self> {
        Rect::new(r.x0, r.y0, r.x1, r.y1)
    }
}

impl TryFrom<(f64, f64, f64, f64)> for Rect {
    type Error = FigError;

    fn try_from((x0, y0, x1, y1): (f64, f64, f64, f64)) -> Result<Self> {
        Rect::new(x0, y0, x1, y1)
    }
}

impl Rect {
    /// Creates a rectangle, failing with `InvalidGeometry` when `x1 < x0`,
    /// `y1 < y0`, or any coordinate is not finite.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self> {
        let finite = [x0, y0, x1, y1].iter().all(|v| v.is_finite());
        if !finite || x1 < x0 || y1 < y0 {
            return Err(FigError::InvalidGeometry { x0, y0, x1, y1 });
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    #[inline]
    pub fn x0(&self) -> f64 {
        self.x0
    }

    #[inline]
    pub fn y0(&self) -> f64 {
        self.y0
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.x1
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.y1
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Centroid `((x0 + x1) / 2, (y0 + y1) / 2)`.
    pub fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    /// Smallest rectangle enclosing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        // min/max of two valid rectangles is always valid.
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Inclusive intersection test: rectangles that only touch count.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.x1 < other.x0 || self.x0 > other.x1 || self.y1 < other.y0 || self.y0 > other.y1)
    }
}

/// Intersection area over the smaller rectangle's area.
///
/// Returns `0.0` when the rectangles do not intersect or either one has zero
/// area. The result lies in `[0.0, 1.0]` and is symmetric in its arguments.
pub fn overlap_ratio(a: &Rect, b: &Rect) -> f64 {
    let x_overlap = (a.x1.min(b.x1) - a.x0.max(b.x0)).max(0.0);
    let y_overlap = (a.y1.min(b.y1) - a.y0.max(b.y0)).max(0.0);
    let overlap_area = x_overlap * y_overlap;
    if overlap_area == 0.0 {
        return 0.0;
    }

    let min_area = a.area().min(b.area());
    if min_area > 0.0 {
        overlap_area / min_area
    } else {
        0.0
    }
}

/// Euclidean distance between the two rectangles' centroids.
pub fn center_distance(a: &Rect, b: &Rect) -> f64 {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

/// True unless `b` lies entirely left or right of `a`. Touching edges overlap.
pub fn horizontally_overlaps(a: &Rect, b: &Rect) -> bool {
    !(b.x1 < a.x0 || b.x0 > a.x1)
}

/// True iff `text` shares horizontal extent with `figure` and lies wholly
/// below (`text.y0 >= figure.y1`) or wholly above (`text.y1 <= figure.y0`) it.
pub fn is_directly_above_or_below(figure: &Rect, text: &Rect) -> bool {
    if !horizontally_overlaps(figure, text) {
        return false;
    }
    let is_below = text.y0 >= figure.y1;
    let is_above = text.y1 <= figure.y0;
    is_below || is_above
}
