//! Layout data model: detector primitives, figure clusters, text spans and
//! annotated figures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FigError;
use crate::geometry::Rect;

/// Element category assigned by the region detector.
///
/// `Other` is the fallback for labels outside the fixed set; it only affects
/// how an element is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementCategory {
    Text,
    Figure,
    Table,
    Title,
    List,
    #[serde(other)]
    Other,
}

impl ElementCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementCategory::Text => "text",
            ElementCategory::Figure => "figure",
            ElementCategory::Table => "table",
            ElementCategory::Title => "title",
            ElementCategory::List => "list",
            ElementCategory::Other => "other",
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementCategory {
    type Err = FigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ElementCategory::Text),
            "figure" => Ok(ElementCategory::Figure),
            "table" => Ok(ElementCategory::Table),
            "title" => Ok(ElementCategory::Title),
            "list" => Ok(ElementCategory::List),
            other => Err(FigError::UnknownCategory(other.to_string())),
        }
    }
}

/// A typed, confidence-scored rectangle produced by the region detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedPrimitive {
    pub rect: Rect,
    pub category: ElementCategory,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
}

impl DetectedPrimitive {
    pub fn new(rect: Rect, category: ElementCategory, confidence: f64) -> Self {
        Self {
            rect,
            category,
            confidence,
        }
    }
}

/// A group of primitives treated as one logical figure.
///
/// `rect` is always the minimal rectangle enclosing every member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureCluster {
    pub rect: Rect,
    pub members: Vec<DetectedPrimitive>,
    pub confidence: f64,
}

impl FigureCluster {
    /// Wraps a single primitive, taking over its rectangle and confidence.
    pub fn singleton(primitive: DetectedPrimitive) -> Self {
        Self {
            rect: primitive.rect,
            confidence: primitive.confidence,
            members: vec![primitive],
        }
    }

    /// Returns a new cluster covering `self` and `other`.
    ///
    /// Members are `self`'s followed by `other`'s; confidence is the mean of
    /// the two confidences. Neither input is modified.
    pub fn merge(&self, other: &FigureCluster) -> FigureCluster {
        let mut members = Vec::with_capacity(self.members.len() + other.members.len());
        members.extend(self.members.iter().cloned());
        members.extend(other.members.iter().cloned());
        FigureCluster {
            rect: self.rect.union(&other.rect),
            members,
            confidence: (self.confidence + other.confidence) / 2.0,
        }
    }
}

/// A positioned piece of page text from the text extractor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub rect: Rect,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, rect: Rect) -> Self {
        Self {
            text: text.into(),
            rect,
        }
    }
}

/// A figure cluster with its caption and nearby context text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedFigure {
    pub figure: FigureCluster,
    pub caption: Option<String>,
    #[serde(default)]
    pub nearby_text: Vec<String>,
}

impl AnnotatedFigure {
    pub fn new(figure: FigureCluster) -> Self {
        Self {
            figure,
            caption: None,
            nearby_text: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(x0: f64, y0: f64, x1: f64, y1: f64, confidence: f64) -> DetectedPrimitive {
        DetectedPrimitive::new(
            Rect::new(x0, y0, x1, y1).unwrap(),
            ElementCategory::Figure,
            confidence,
        )
    }

    #[test]
    fn merge_is_pure_and_ordered() {
        let a = FigureCluster::singleton(prim(10.0, 10.0, 50.0, 50.0, 0.8));
        let b = FigureCluster::singleton(prim(60.0, 0.0, 100.0, 40.0, 0.4));
        let merged = a.merge(&b);

        assert_eq!(merged.rect.as_tuple(), (10.0, 0.0, 100.0, 50.0));
        assert!((merged.confidence - 0.6).abs() < 1e-12);
        assert_eq!(merged.members, vec![a.members[0].clone(), b.members[0].clone()]);
        assert_eq!(a.members.len(), 1);
        assert_eq!(b.members.len(), 1);
    }

    #[test]
    fn category_parse_and_display() {
        assert_eq!("table".parse::<ElementCategory>().unwrap(), ElementCategory::Table);
        assert_eq!(ElementCategory::List.to_string(), "list");
        assert!(matches!(
            "chart".parse::<ElementCategory>(),
            Err(FigError::UnknownCategory(s)) if s == "chart"
        ));
    }

    #[test]
    fn unknown_label_deserializes_to_other() {
        let json = r#"{"rect":{"x0":0,"y0":0,"x1":1,"y1":1},"category":"chart","confidence":0.5}"#;
        let p: DetectedPrimitive = serde_json::from_str(json).unwrap();
        assert_eq!(p.category, ElementCategory::Other);
    }

    #[test]
    fn inverted_rect_fails_to_deserialize() {
        let json = r#"{"text":"x","rect":{"x0":5,"y0":0,"x1":1,"y1":1}}"#;
        assert!(serde_json::from_str::<TextSpan>(json).is_err());
    }

    #[test]
    fn nearby_text_defaults_to_empty() {
        let fig = FigureCluster::singleton(prim(0.0, 0.0, 1.0, 1.0, 1.0));
        assert!(AnnotatedFigure::new(fig).nearby_text.is_empty());
    }
}
