//! Shared type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Paragraph alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Flush left (the default)
    #[default]
    Left,
    /// Centered
    Center,
    /// Flush right
    Right,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Left => write!(f, "left"),
            Alignment::Center => write!(f, "center"),
            Alignment::Right => write!(f, "right"),
        }
    }
}

/// List rendering style for a list-item paragraph
///
/// Consecutive list items sharing the same style form one visual list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListStyle {
    /// Bulleted list ("List Bullet")
    Bullet,
    /// Numbered list ("List Number")
    Number,
}

impl fmt::Display for ListStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListStyle::Bullet => write!(f, "List Bullet"),
            ListStyle::Number => write!(f, "List Number"),
        }
    }
}
