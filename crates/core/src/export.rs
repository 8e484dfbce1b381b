//! Figure export records.
//!
//! Builds the per-figure metadata that accompanies each cropped figure image:
//! crop region, output file name and the JSON record set for a whole run.
//! Writing pixels is left to the caller.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FigError, Result};
use crate::geometry::Rect;
use crate::layout::AnnotatedFigure;
use crate::pipeline::{PageFigures, PageInput};

pub const DEFAULT_MARGIN: f64 = 10.0;

/// Image format of the cropped figure files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

/// Bounding rectangle as stored in a metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBoxRecord {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl From<&Rect> for BBoxRecord {
    fn from(rect: &Rect) -> Self {
        Self {
            x0: rect.x0(),
            y0: rect.y0(),
            x1: rect.x1(),
            y1: rect.y1(),
        }
    }
}

/// Metadata for one exported figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureMetadata {
    pub image_path: String,
    pub page_number: usize,
    pub bbox: BBoxRecord,
    /// Margin-expanded crop region, present when the page size is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<BBoxRecord>,
    pub caption: Option<String>,
    #[serde(default)]
    pub linked_text: Vec<String>,
    pub confidence: f64,
}

/// Names and describes cropped figures under an output directory.
#[derive(Debug, Clone)]
pub struct FigureExporter {
    output_dir: PathBuf,
    margin: f64,
    format: ImageFormat,
}

impl FigureExporter {
    /// Creates an exporter. Fails when `margin` is negative or not finite.
    pub fn new(output_dir: impl Into<PathBuf>, margin: f64, format: ImageFormat) -> Result<Self> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(FigError::InvalidParameter {
                name: "margin",
                value: margin,
            });
        }
        Ok(Self {
            output_dir: output_dir.into(),
            margin,
            format,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Expands `rect` by the margin and clamps it to the image bounds.
    ///
    /// Fails with `InvalidGeometry` when the figure lies outside the image.
    pub fn crop_region(&self, rect: &Rect, image_width: f64, image_height: f64) -> Result<Rect> {
        let x0 = (rect.x0() - self.margin).max(0.0);
        let y0 = (rect.y0() - self.margin).max(0.0);
        let x1 = (rect.x1() + self.margin).min(image_width);
        let y1 = (rect.y1() + self.margin).min(image_height);
        Rect::new(x0, y0, x1, y1)
    }

    /// `page{page:03}_fig{index:02}.{ext}`
    pub fn file_name(&self, page_number: usize, figure_index: usize) -> String {
        format!(
            "page{:03}_fig{:02}.{}",
            page_number,
            figure_index,
            self.format.extension()
        )
    }

    pub fn image_path(&self, page_number: usize, figure_index: usize) -> PathBuf {
        self.output_dir.join(self.file_name(page_number, figure_index))
    }

    /// Builds the record for one figure. The bbox is the cluster rectangle;
    /// when the page size is known, `crop` holds the margin-expanded region.
    pub fn metadata_for(
        &self,
        figure: &AnnotatedFigure,
        page_number: usize,
        figure_index: usize,
        page_size: Option<(f64, f64)>,
    ) -> FigureMetadata {
        let rect = &figure.figure.rect;
        let crop = page_size.and_then(|(width, height)| {
            match self.crop_region(rect, width, height) {
                Ok(region) => Some(BBoxRecord::from(&region)),
                Err(e) => {
                    tracing::warn!(page = page_number, figure = figure_index, "no crop region: {e}");
                    None
                }
            }
        });
        FigureMetadata {
            image_path: self
                .image_path(page_number, figure_index)
                .to_string_lossy()
                .into_owned(),
            page_number,
            bbox: BBoxRecord::from(rect),
            crop,
            caption: figure.caption.clone(),
            linked_text: figure.nearby_text.clone(),
            confidence: figure.figure.confidence,
        }
    }

    /// Builds records for a run. Each page keeps its own page number and
    /// size; figures are numbered from 0 within each page.
    pub fn collect(&self, pages: &[PageInput], annotated: &[PageFigures]) -> Vec<FigureMetadata> {
        pages
            .iter()
            .zip(annotated)
            .flat_map(|(input, page)| {
                let page_size = input.page_size();
                page.figures.iter().enumerate().map(move |(fig_idx, fig)| {
                    self.metadata_for(fig, page.page_number, fig_idx, page_size)
                })
            })
            .collect()
    }
}

impl Default for FigureExporter {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("figures"),
            margin: DEFAULT_MARGIN,
            format: ImageFormat::Png,
        }
    }
}

/// Serializes a run's records as a pretty-printed JSON array.
pub fn metadata_to_json(records: &[FigureMetadata]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
