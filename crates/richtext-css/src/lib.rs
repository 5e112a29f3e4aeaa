//! # Richtext CSS
//!
//! Stylesheet parsing and style specification for the richtext engine.
//!
//! ## Design Goals
//!
//! 1. **Partial specs**: every style field is independently set or inherited
//! 2. **Best effort**: a malformed rule or clause never fails the stylesheet
//! 3. **Value types**: colors and specs carry no identity beyond their contents

pub mod color;
pub mod stylesheet;

pub use color::{parse_color, Color, ColorError};
pub use stylesheet::Stylesheet;

/// Paragraph alignment keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justified,
    Natural,
}

/// Parse an alignment keyword. Keywords match exactly; anything else is `None`.
pub fn parse_alignment(value: &str) -> Option<TextAlignment> {
    match value {
        "left" => Some(TextAlignment::Left),
        "center" => Some(TextAlignment::Center),
        "right" => Some(TextAlignment::Right),
        "justified" => Some(TextAlignment::Justified),
        "natural" => Some(TextAlignment::Natural),
        _ => None,
    }
}

/// A partial style specification.
///
/// `None` means "inherit". An unset field falls through to the parent when
/// specs merge, which is not the same as a field explicitly set to some
/// default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSpec {
    pub font_name: Option<String>,
    pub font_size: Option<f32>,
    pub color: Option<Color>,
    pub alignment: Option<TextAlignment>,
    pub line_height: Option<f32>,
    pub baseline_offset: Option<f32>,
}

impl StyleSpec {
    /// Override-merge: every field set on `self` wins, every unset field
    /// keeps the parent's value. The full destructure keeps the merge
    /// honest when a field is added.
    pub fn merged_over(&self, parent: &StyleSpec) -> StyleSpec {
        let StyleSpec {
            font_name,
            font_size,
            color,
            alignment,
            line_height,
            baseline_offset,
        } = self.clone();
        StyleSpec {
            font_name: font_name.or_else(|| parent.font_name.clone()),
            font_size: font_size.or(parent.font_size),
            color: color.or(parent.color),
            alignment: alignment.or(parent.alignment),
            line_height: line_height.or(parent.line_height),
            baseline_offset: baseline_offset.or(parent.baseline_offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_field_independent() {
        let parent = StyleSpec {
            font_size: Some(10.0),
            color: Some(Color::from_rgba8(255, 0, 0, 255)),
            ..Default::default()
        };
        let child = StyleSpec {
            color: Some(Color::from_rgba8(0, 0, 255, 255)),
            ..Default::default()
        };
        let merged = child.merged_over(&parent);
        assert_eq!(merged.font_size, Some(10.0));
        assert_eq!(merged.color, Some(Color::from_rgba8(0, 0, 255, 255)));
        assert_eq!(merged.alignment, None);
    }

    #[test]
    fn empty_child_inherits_everything() {
        let parent = StyleSpec {
            font_name: Some("Helvetica".to_string()),
            line_height: Some(1.5),
            ..Default::default()
        };
        assert_eq!(StyleSpec::default().merged_over(&parent), parent);
    }

    #[test]
    fn alignment_keywords_match_exactly() {
        assert_eq!(parse_alignment("center"), Some(TextAlignment::Center));
        assert_eq!(parse_alignment("natural"), Some(TextAlignment::Natural));
        assert_eq!(parse_alignment("Center"), None);
        assert_eq!(parse_alignment("middle"), None);
    }
}
