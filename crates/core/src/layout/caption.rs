//! Caption and context association.
//!
//! A caption is the nearest text span lying directly above or below a figure.
//! Context is every span whose center is within the context radius.

use ordered_float::OrderedFloat;

use crate::geometry::{center_distance, is_directly_above_or_below};

use super::params::LinkParams;
use super::types::{AnnotatedFigure, FigureCluster, TextSpan};

/// Attaches a caption and nearby context text to each figure.
///
/// Produces one [`AnnotatedFigure`] per input figure, in input order. Caption
/// ties go to the first span in scan order; context keeps scan order.
pub fn attach_captions(
    figures: &[FigureCluster],
    spans: &[TextSpan],
    params: &LinkParams,
) -> Vec<AnnotatedFigure> {
    figures
        .iter()
        .map(|figure| annotate(figure, spans, params))
        .collect()
}

fn annotate(figure: &FigureCluster, spans: &[TextSpan], params: &LinkParams) -> AnnotatedFigure {
    let mut caption: Option<&TextSpan> = None;
    let mut caption_distance = f64::INFINITY;
    let mut nearby_text = Vec::new();

    for span in spans {
        let distance = center_distance(&figure.rect, &span.rect);

        if is_directly_above_or_below(&figure.rect, &span.rect) && distance < caption_distance {
            caption = Some(span);
            caption_distance = distance;
        }

        if distance <= params.context_threshold {
            nearby_text.push(span.text.clone());
        }
    }

    if caption.is_some() && caption_distance > params.caption_threshold {
        tracing::trace!(
            distance = caption_distance,
            threshold = params.caption_threshold,
            "caption selected beyond caption threshold"
        );
    }

    AnnotatedFigure {
        figure: figure.clone(),
        caption: caption.map(|span| span.text.clone()),
        nearby_text,
    }
}

/// Returns the spans within `max_distance` of the figure, nearest first.
///
/// The sort is stable, so equidistant spans keep their input order.
pub fn fetch_context<'a>(
    figure: &FigureCluster,
    spans: &'a [TextSpan],
    max_distance: f64,
) -> Vec<&'a TextSpan> {
    let mut within: Vec<(f64, &TextSpan)> = spans
        .iter()
        .map(|span| (center_distance(&figure.rect, &span.rect), span))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    within.sort_by_key(|(distance, _)| OrderedFloat(*distance));
    within.into_iter().map(|(_, span)| span).collect()
}

/// [`fetch_context`] with the radius taken from `params.fetch_distance`.
pub fn fetch_context_with<'a>(
    figure: &FigureCluster,
    spans: &'a [TextSpan],
    params: &LinkParams,
) -> Vec<&'a TextSpan> {
    fetch_context(figure, spans, params.fetch_distance)
}
