//! figlink - Group detected page regions into figures and link captions
//!
//! Reads per-page detector and text-extractor output as JSON, clusters the
//! detected regions into figures, attaches captions and nearby text, and
//! writes figure metadata, annotated figures or overlay plans as JSON.

use clap::{Parser, ValueEnum};
use figlink_core::error::{FigError, Result};
use figlink_core::export::{FigureExporter, ImageFormat, metadata_to_json};
use figlink_core::layout::{ClusterParams, LinkParams, PipelineParams};
use figlink_core::overlay::{OverlayBox, OverlayStyle};
use figlink_core::pipeline::{PageFigures, PageInput, annotate_pages, renumber_pages};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Output type for the processed pages.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// Figure metadata records (default)
    #[default]
    Metadata,
    /// Annotated figures grouped by page
    Annotated,
    /// Overlay drawing plans grouped by page
    Overlay,
}

/// Image format for exported figure paths.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum FormatArg {
    #[default]
    Png,
    Jpeg,
}

impl From<FormatArg> for ImageFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Group detected page regions into figures and link their captions.
#[derive(Parser, Debug)]
#[command(name = "figlink")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more JSON files, each an array of page inputs
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long)]
    debug: bool,

    // === Clustering options ===
    /// Maximum center distance (pixels) for two regions to merge
    #[arg(long = "distance-threshold", default_value = "50.0")]
    distance_threshold: f64,

    /// Minimum overlap ratio for two regions to merge
    #[arg(long = "overlap-threshold", default_value = "0.3")]
    overlap_threshold: f64,

    // === Linking options ===
    /// Configured caption distance (pixels)
    #[arg(long = "caption-threshold", default_value = "50.0")]
    caption_threshold: f64,

    /// Maximum center distance (pixels) for context text
    #[arg(long = "context-threshold", default_value = "150.0")]
    context_threshold: f64,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "metadata")]
    output_type: OutputType,

    /// Directory that figure image paths are placed under
    #[arg(short = 'O', long = "output-dir", default_value = "figures")]
    output_dir: PathBuf,

    /// Margin (pixels) added around each figure when cropping
    #[arg(long, default_value = "10.0")]
    margin: f64,

    /// Image format of exported figures
    #[arg(long, value_enum, default_value = "png")]
    format: FormatArg,

    /// Renumber pages consecutively across all files, starting here
    #[arg(long = "start-page")]
    start_page: Option<usize>,
}

#[derive(Serialize)]
struct PageOverlay {
    page_number: usize,
    elements: Vec<OverlayBox>,
    figures: Vec<OverlayBox>,
}

fn build_params(args: &Args) -> Result<PipelineParams> {
    let defaults = LinkParams::default();
    Ok(PipelineParams {
        cluster: ClusterParams::new(args.distance_threshold, args.overlap_threshold)?,
        link: LinkParams::new(
            args.caption_threshold,
            args.context_threshold,
            defaults.fetch_distance,
        )?,
    })
}

fn load_pages(path: &Path) -> Result<Vec<PageInput>> {
    let reader = BufReader::new(File::open(path)?);
    let pages: Vec<PageInput> = serde_json::from_reader(reader)?;
    tracing::debug!(path = %path.display(), pages = pages.len(), "loaded page inputs");
    Ok(pages)
}

fn overlays(pages: &[PageInput], annotated: &[PageFigures]) -> Vec<PageOverlay> {
    let style = OverlayStyle::default();
    pages
        .iter()
        .zip(annotated)
        .map(|(input, page)| {
            let clusters: Vec<_> = page.figures.iter().map(|f| f.figure.clone()).collect();
            PageOverlay {
                page_number: page.page_number,
                elements: style.layout_overlay(&input.primitives),
                figures: style.figure_overlay(&clusters),
            }
        })
        .collect()
}

fn run(args: &Args) -> Result<()> {
    let params = build_params(args)?;
    let exporter = FigureExporter::new(args.output_dir.clone(), args.margin, args.format.into())?;

    let mut pages = Vec::new();
    for path in &args.files {
        if !path.exists() {
            return Err(FigError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )));
        }
        pages.extend(load_pages(path)?);
    }
    if let Some(start) = args.start_page {
        renumber_pages(&mut pages, start);
    }

    let annotated = annotate_pages(&pages, &params);

    let json = match args.output_type {
        OutputType::Metadata => metadata_to_json(&exporter.collect(&pages, &annotated))?,
        OutputType::Annotated => serde_json::to_string_pretty(&annotated)?,
        OutputType::Overlay => serde_json::to_string_pretty(&overlays(&pages, &annotated))?,
    };

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        Box::new(BufWriter::new(File::create(&args.outfile)?))
    };
    writeln!(output, "{}", json)?;
    output.flush()?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
