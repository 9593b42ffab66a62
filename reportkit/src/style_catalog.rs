//! Closed catalog of semantic styles
//!
//! Every structural style a report may use is enumerated here together with
//! the rendering directive the DOCX backend applies for it. The set is fixed:
//! tokens outside it fail to resolve.

use crate::content_tree::{Alignment, ListStyle};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Deepest section heading level the catalog knows about
pub const MAX_HEADING_LEVEL: u8 = 9;

/// Style token outside the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown style '{0}'")]
pub struct UnknownStyleError(pub String);

/// A symbolic style name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    /// Plain body paragraph
    Normal,
    /// Document title (heading level 0)
    Title,
    /// Centered italic subtitle line
    Subtitle,
    /// Section heading, levels 1 through 9
    Heading(u8),
    /// Bulleted list item
    ListBullet,
    /// Numbered list item
    ListNumber,
    /// Bold inline run
    Bold,
    /// Italic inline run
    Italic,
    /// Left paragraph alignment
    AlignLeft,
    /// Centered paragraph alignment
    AlignCenter,
    /// Right paragraph alignment
    AlignRight,
}

impl StyleToken {
    /// Token for a heading at the given level (0 maps to the title)
    pub fn heading(level: u8) -> Self {
        if level == 0 {
            StyleToken::Title
        } else {
            StyleToken::Heading(level)
        }
    }
}

impl From<Alignment> for StyleToken {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::Left => StyleToken::AlignLeft,
            Alignment::Center => StyleToken::AlignCenter,
            Alignment::Right => StyleToken::AlignRight,
        }
    }
}

impl From<ListStyle> for StyleToken {
    fn from(style: ListStyle) -> Self {
        match style {
            ListStyle::Bullet => StyleToken::ListBullet,
            ListStyle::Number => StyleToken::ListNumber,
        }
    }
}

impl TryFrom<StyleToken> for ListStyle {
    type Error = UnknownStyleError;

    fn try_from(token: StyleToken) -> Result<Self, Self::Error> {
        match token {
            StyleToken::ListBullet => Ok(ListStyle::Bullet),
            StyleToken::ListNumber => Ok(ListStyle::Number),
            other => Err(UnknownStyleError(format!("{} (not a list style)", other))),
        }
    }
}

impl fmt::Display for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleToken::Normal => write!(f, "Normal"),
            StyleToken::Title => write!(f, "Title"),
            StyleToken::Subtitle => write!(f, "Subtitle"),
            StyleToken::Heading(level) => write!(f, "Heading {}", level),
            StyleToken::ListBullet => write!(f, "List Bullet"),
            StyleToken::ListNumber => write!(f, "List Number"),
            StyleToken::Bold => write!(f, "Bold"),
            StyleToken::Italic => write!(f, "Italic"),
            StyleToken::AlignLeft => write!(f, "Left"),
            StyleToken::AlignCenter => write!(f, "Center"),
            StyleToken::AlignRight => write!(f, "Right"),
        }
    }
}

impl FromStr for StyleToken {
    type Err = UnknownStyleError;

    /// Parse a human style name such as `"List Bullet"` or `"Heading 2"`.
    ///
    /// Matching ignores case and whitespace. The parsed token must also
    /// resolve, so `"Heading 12"` is rejected here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        let token = match key.as_str() {
            "normal" => StyleToken::Normal,
            "title" => StyleToken::Title,
            "subtitle" => StyleToken::Subtitle,
            "listbullet" => StyleToken::ListBullet,
            "listnumber" => StyleToken::ListNumber,
            "bold" => StyleToken::Bold,
            "italic" => StyleToken::Italic,
            "left" => StyleToken::AlignLeft,
            "center" => StyleToken::AlignCenter,
            "right" => StyleToken::AlignRight,
            _ => key
                .strip_prefix("heading")
                .and_then(|level| level.parse::<u8>().ok())
                .map(StyleToken::heading)
                .ok_or_else(|| UnknownStyleError(s.to_string()))?,
        };

        resolve(token).map_err(|_| UnknownStyleError(s.to_string()))?;
        Ok(token)
    }
}

/// Concrete formatting the renderer applies for a style token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderDirective {
    /// Paragraph style ID registered in the output document, if any
    pub style_id: Option<&'static str>,
    /// Display name of the style
    pub display_name: &'static str,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Font size in half-points
    pub size_half_points: Option<usize>,
    /// Paragraph alignment
    pub alignment: Option<Alignment>,
}

impl RenderDirective {
    const fn named(display_name: &'static str) -> Self {
        Self {
            style_id: None,
            display_name,
            bold: false,
            italic: false,
            size_half_points: None,
            alignment: None,
        }
    }

    const fn paragraph_style(style_id: &'static str, display_name: &'static str) -> Self {
        Self {
            style_id: Some(style_id),
            ..Self::named(display_name)
        }
    }
}

/// Get the heading style ID and display name for a section level
fn heading_style(level: u8) -> Option<(&'static str, &'static str)> {
    match level {
        1 => Some(("Heading1", "Heading 1")),
        2 => Some(("Heading2", "Heading 2")),
        3 => Some(("Heading3", "Heading 3")),
        4 => Some(("Heading4", "Heading 4")),
        5 => Some(("Heading5", "Heading 5")),
        6 => Some(("Heading6", "Heading 6")),
        7 => Some(("Heading7", "Heading 7")),
        8 => Some(("Heading8", "Heading 8")),
        9 => Some(("Heading9", "Heading 9")),
        _ => None,
    }
}

/// Heading sizes in half-points, progressively smaller with depth
fn heading_size(level: u8) -> usize {
    match level {
        1 => 32,
        2 => 28,
        3 => 26,
        4 => 24,
        5 => 22,
        _ => 20,
    }
}

/// Resolve a style token to its rendering directive
pub fn resolve(token: StyleToken) -> Result<RenderDirective, UnknownStyleError> {
    let directive = match token {
        StyleToken::Normal => RenderDirective::named("Normal"),
        StyleToken::Title => RenderDirective {
            bold: true,
            size_half_points: Some(56),
            ..RenderDirective::paragraph_style("Title", "Title")
        },
        // Applied as run and paragraph formatting; no style is registered
        StyleToken::Subtitle => RenderDirective {
            italic: true,
            size_half_points: Some(24),
            alignment: Some(Alignment::Center),
            ..RenderDirective::named("Subtitle")
        },
        StyleToken::Heading(level) => {
            let (style_id, display_name) =
                heading_style(level).ok_or_else(|| UnknownStyleError(token.to_string()))?;
            RenderDirective {
                bold: true,
                size_half_points: Some(heading_size(level)),
                ..RenderDirective::paragraph_style(style_id, display_name)
            }
        }
        StyleToken::ListBullet => RenderDirective::paragraph_style("ListBullet", "List Bullet"),
        StyleToken::ListNumber => RenderDirective::paragraph_style("ListNumber", "List Number"),
        StyleToken::Bold => RenderDirective {
            bold: true,
            ..RenderDirective::named("Bold")
        },
        StyleToken::Italic => RenderDirective {
            italic: true,
            ..RenderDirective::named("Italic")
        },
        StyleToken::AlignLeft => RenderDirective {
            alignment: Some(Alignment::Left),
            ..RenderDirective::named("Left")
        },
        StyleToken::AlignCenter => RenderDirective {
            alignment: Some(Alignment::Center),
            ..RenderDirective::named("Center")
        },
        StyleToken::AlignRight => RenderDirective {
            alignment: Some(Alignment::Right),
            ..RenderDirective::named("Right")
        },
    };

    Ok(directive)
}

/// Every token in the catalog, in presentation order
pub fn catalog() -> Vec<StyleToken> {
    let mut tokens = vec![StyleToken::Normal, StyleToken::Title, StyleToken::Subtitle];
    tokens.extend((1..=MAX_HEADING_LEVEL).map(StyleToken::Heading));
    tokens.extend([
        StyleToken::ListBullet,
        StyleToken::ListNumber,
        StyleToken::Bold,
        StyleToken::Italic,
        StyleToken::AlignLeft,
        StyleToken::AlignCenter,
        StyleToken::AlignRight,
    ]);
    tokens
}
