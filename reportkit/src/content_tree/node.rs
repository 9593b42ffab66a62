//! Block-level content nodes
//!
//! This module defines the structured representation of report content
//! at the block level (headings, paragraphs and list items).

use super::text_run::TextRun;
use super::types::{Alignment, ListStyle};

/// Block-level report element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A heading with level and formatted text
    Heading {
        /// Heading level (0 = document title, 1..=9 = nested sections)
        level: u8,
        /// Formatted text runs comprising the heading content
        runs: Vec<TextRun>,
        /// Paragraph alignment of the heading
        alignment: Alignment,
    },

    /// A paragraph of formatted text, or a list item when `list_style` is set
    Paragraph {
        /// Formatted text runs in insertion order
        runs: Vec<TextRun>,
        /// List membership; `None` for body paragraphs
        list_style: Option<ListStyle>,
        /// Paragraph alignment
        alignment: Alignment,
    },
}

impl Node {
    /// Text runs of this node, in order
    pub fn runs(&self) -> &[TextRun] {
        match self {
            Node::Heading { runs, .. } | Node::Paragraph { runs, .. } => runs,
        }
    }

    /// Alignment of this node
    pub fn alignment(&self) -> Alignment {
        match self {
            Node::Heading { alignment, .. } | Node::Paragraph { alignment, .. } => *alignment,
        }
    }

    /// List style if this node is a list item
    pub fn list_style(&self) -> Option<ListStyle> {
        match self {
            Node::Paragraph { list_style, .. } => *list_style,
            Node::Heading { .. } => None,
        }
    }

    /// Whether this node is a list item
    pub fn is_list_item(&self) -> bool {
        self.list_style().is_some()
    }

    /// Concatenated text of all runs
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(|r| r.text.as_str()).collect()
    }

    /// Number of whitespace-separated words across all runs
    pub fn word_count(&self) -> usize {
        self.plain_text().split_whitespace().count()
    }

    /// Human-readable name of the node kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Heading { .. } => "Heading",
            Node::Paragraph {
                list_style: Some(_),
                ..
            } => "ListItem",
            Node::Paragraph { .. } => "Paragraph",
        }
    }
}
