//! Per-page figure annotation.
//!
//! Runs the merge engine and caption linker over one page, or over many pages
//! in parallel. Pages share no state, so each runs independently.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::layout::{
    AnnotatedFigure, DetectedPrimitive, PipelineParams, TextSpan, attach_captions,
    merge_primitives,
};

/// Detector and text-extractor output for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    pub page_number: usize,
    #[serde(default)]
    pub primitives: Vec<DetectedPrimitive>,
    #[serde(default)]
    pub text_spans: Vec<TextSpan>,
    /// Rendered page width in pixels, when known.
    #[serde(default)]
    pub page_width: Option<f64>,
    /// Rendered page height in pixels, when known.
    #[serde(default)]
    pub page_height: Option<f64>,
}

impl PageInput {
    /// `(width, height)` when both dimensions are known.
    pub fn page_size(&self) -> Option<(f64, f64)> {
        self.page_width.zip(self.page_height)
    }
}

/// Numbers pages consecutively from `start_page` across the whole slice.
pub fn renumber_pages(pages: &mut [PageInput], start_page: usize) {
    for (i, page) in pages.iter_mut().enumerate() {
        page.page_number = start_page + i;
    }
}

/// Annotated figures for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFigures {
    pub page_number: usize,
    pub figures: Vec<AnnotatedFigure>,
}

/// Clusters a page's primitives and links captions and context text.
pub fn annotate_page(page: &PageInput, params: &PipelineParams) -> PageFigures {
    let clusters = merge_primitives(&page.primitives, &params.cluster);
    let figures = attach_captions(&clusters, &page.text_spans, &params.link);
    tracing::debug!(
        page = page.page_number,
        primitives = page.primitives.len(),
        figures = figures.len(),
        "annotated page"
    );
    PageFigures {
        page_number: page.page_number,
        figures,
    }
}

/// Annotates pages in parallel. Output order follows input order.
pub fn annotate_pages(pages: &[PageInput], params: &PipelineParams) -> Vec<PageFigures> {
    pages
        .par_iter()
        .map(|page| annotate_page(page, params))
        .collect()
}
