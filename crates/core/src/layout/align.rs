//! Matching page text to detected primitives by rectangle contact.

use itertools::Itertools;

use super::types::{DetectedPrimitive, TextSpan};

/// A primitive paired with the text that touches it.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedText<'a> {
    pub primitive: &'a DetectedPrimitive,
    pub text: String,
}

/// Pairs each primitive with the space-joined text of every span whose
/// rectangle touches or overlaps it, in span order.
///
/// Primitives with no touching span get an empty string.
pub fn align_text<'a>(primitives: &'a [DetectedPrimitive], spans: &[TextSpan]) -> Vec<AlignedText<'a>> {
    primitives
        .iter()
        .map(|primitive| {
            let joined = spans
                .iter()
                .filter(|span| primitive.rect.intersects(&span.rect))
                .map(|span| span.text.as_str())
                .join(" ");
            AlignedText {
                primitive,
                text: joined.trim().to_string(),
            }
        })
        .collect()
}
