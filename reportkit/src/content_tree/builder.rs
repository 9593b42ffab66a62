//! Append-only document builder and the sealed document it produces

use super::error::BuildError;
use super::node::Node;
use super::text_run::{TextRun, MAX_FONT_SIZE_HALF_POINTS};
use super::types::{Alignment, ListStyle};
use crate::style_catalog::{self, StyleToken};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of per-builder identities so handles cannot cross documents
static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Lifecycle state of a document under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Accepting appends
    Open,
    /// Immutable; nodes have been handed to a `SealedDocument`
    Sealed,
}

/// Reference to a node appended to a specific builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    document: u64,
    index: usize,
}

impl NodeHandle {
    /// Position of the node in document order
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Builds an ordered sequence of report nodes
///
/// The builder exclusively owns the nodes while open. `seal` moves them into
/// an immutable [`SealedDocument`]; every later mutation fails.
#[derive(Debug)]
pub struct DocumentBuilder {
    id: u64,
    state: DocumentState,
    nodes: Vec<Node>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Create a new empty, open document
    pub fn new() -> Self {
        Self {
            id: NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed),
            state: DocumentState::Open,
            nodes: Vec::new(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Number of nodes appended so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no nodes have been appended
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a heading containing `text` as a single unstyled run
    ///
    /// # Parameters
    /// * `text` - Heading text
    /// * `level` - 0 for the document title, 1..=9 for sections
    /// * `alignment` - Paragraph alignment
    ///
    /// # Returns
    /// * `Ok(NodeHandle)` - Handle accepting further runs via `add_run`
    /// * `Err(BuildError)` - Document is sealed or the level is outside the catalog
    pub fn add_heading(
        &mut self,
        text: impl Into<String>,
        level: u8,
        alignment: Alignment,
    ) -> Result<NodeHandle, BuildError> {
        self.ensure_open()?;
        style_catalog::resolve(StyleToken::heading(level))?;
        let text = text.into();
        check_text(&text)?;

        Ok(self.push(Node::Heading {
            level,
            runs: vec![TextRun::new(text)],
            alignment,
        }))
    }

    /// Append an empty paragraph
    pub fn add_paragraph(&mut self, alignment: Alignment) -> Result<NodeHandle, BuildError> {
        self.ensure_open()?;

        Ok(self.push(Node::Paragraph {
            runs: Vec::new(),
            list_style: None,
            alignment,
        }))
    }

    /// Append a paragraph holding one plain run
    pub fn add_text_paragraph(
        &mut self,
        text: impl Into<String>,
        alignment: Alignment,
    ) -> Result<NodeHandle, BuildError> {
        let handle = self.add_paragraph(alignment)?;
        self.add_run(handle, TextRun::new(text))?;
        Ok(handle)
    }

    /// Append a run to the heading or paragraph named by `handle`
    ///
    /// Runs keep call order. List items do not accept extra runs.
    pub fn add_run(&mut self, handle: NodeHandle, run: TextRun) -> Result<(), BuildError> {
        self.ensure_open()?;

        if handle.document != self.id {
            return Err(BuildError::InvalidHandle {
                reason: "handle belongs to a different document".to_string(),
            });
        }

        if let Some(points) = run.font_size_pt {
            check_font_size(points)?;
        }
        check_text(&run.text)?;

        let node = self
            .nodes
            .get_mut(handle.index)
            .ok_or_else(|| BuildError::InvalidHandle {
                reason: format!("no node at index {}", handle.index),
            })?;

        match node {
            Node::Heading { runs, .. }
            | Node::Paragraph {
                runs,
                list_style: None,
                ..
            } => {
                runs.push(run);
                Ok(())
            }
            Node::Paragraph { .. } => Err(BuildError::InvalidHandle {
                reason: format!("node {} is a list item and takes no extra runs", handle.index),
            }),
        }
    }

    /// Append a list item containing `text` as a single unstyled run
    pub fn add_list_item(
        &mut self,
        text: impl Into<String>,
        style: ListStyle,
    ) -> Result<NodeHandle, BuildError> {
        self.ensure_open()?;
        style_catalog::resolve(StyleToken::from(style))?;
        let text = text.into();
        check_text(&text)?;

        Ok(self.push(Node::Paragraph {
            runs: vec![TextRun::new(text)],
            list_style: Some(style),
            alignment: Alignment::Left,
        }))
    }

    /// Transition the document to `Sealed` and hand out its nodes
    ///
    /// A second call fails with `AlreadySealed`.
    pub fn seal(&mut self) -> Result<SealedDocument, BuildError> {
        if self.state == DocumentState::Sealed {
            return Err(BuildError::AlreadySealed);
        }

        self.state = DocumentState::Sealed;
        let nodes = std::mem::take(&mut self.nodes);
        log::debug!("Sealed document {} with {} nodes", self.id, nodes.len());

        Ok(SealedDocument {
            nodes: nodes.into(),
        })
    }

    fn ensure_open(&self) -> Result<(), BuildError> {
        match self.state {
            DocumentState::Open => Ok(()),
            DocumentState::Sealed => Err(BuildError::SealedDocument),
        }
    }

    fn push(&mut self, node: Node) -> NodeHandle {
        let handle = NodeHandle {
            document: self.id,
            index: self.nodes.len(),
        };
        self.nodes.push(node);
        handle
    }
}

/// Reject sizes that do not survive conversion to whole half-points
fn check_font_size(points: f32) -> Result<(), BuildError> {
    let half_points = (points * 2.0).round();
    let max = MAX_FONT_SIZE_HALF_POINTS as f32;
    if half_points.is_finite() && (1.0..=max).contains(&half_points) {
        Ok(())
    } else {
        Err(BuildError::InvalidFontSize(points))
    }
}

/// Reject characters outside the XML 1.0 `Char` production
fn check_text(text: &str) -> Result<(), BuildError> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(BuildError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Immutable, render-ready document
///
/// Cloning is cheap and clones share the same nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct SealedDocument {
    nodes: Arc<[Node]>,
}

impl SealedDocument {
    /// Nodes in document order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of top-level nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total word count across all nodes
    pub fn word_count(&self) -> usize {
        self.nodes.iter().map(Node::word_count).sum()
    }

    /// Number of heading nodes
    pub fn heading_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Heading { .. }))
            .count()
    }

    /// Number of list-item nodes
    pub fn list_item_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_list_item()).count()
    }
}
