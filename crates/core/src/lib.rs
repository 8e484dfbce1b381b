//! figlink - groups detected page regions into figures and links them to
//! their captions and surrounding text.

pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod overlay;
pub mod pipeline;

pub use error::{FigError, Result};
pub use geometry::Rect;
