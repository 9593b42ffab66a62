//! Text run representation with formatting
//!
//! A text run is a span of text with consistent formatting applied.
//! This is the fundamental unit for rendering formatted text in DOCX.

use serde::Deserialize;

/// Largest `w:sz` value WordprocessingML accepts (1638pt)
pub const MAX_FONT_SIZE_HALF_POINTS: usize = 3276;

/// A span of text with consistent formatting
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Bold formatting
    #[serde(default)]
    pub bold: bool,

    /// Italic formatting
    #[serde(default)]
    pub italic: bool,

    /// Font size in points, inherited from the paragraph style when absent
    #[serde(default, rename = "size")]
    pub font_size_pt: Option<f32>,
}

impl TextRun {
    /// Create a new plain text run
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            font_size_pt: None,
        }
    }

    /// Mark this run as bold
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Mark this run as italic
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set an explicit font size in points
    pub fn size(mut self, points: f32) -> Self {
        self.font_size_pt = Some(points);
        self
    }

    /// Check if this text run has any formatting applied
    pub fn has_formatting(&self) -> bool {
        self.bold || self.italic || self.font_size_pt.is_some()
    }

    /// Font size in half-points, the unit WordprocessingML uses for `w:sz`
    pub fn size_half_points(&self) -> Option<usize> {
        self.font_size_pt.map(|pt| (pt * 2.0).round() as usize)
    }
}
