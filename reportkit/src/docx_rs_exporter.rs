//! DOCX export using the docx-rs library
//!
//! This module renders sealed documents to Microsoft Word (.docx) format
//! using the `docx-rs` crate. Documents are created from scratch: paragraph
//! styles are registered from the style catalog, so no template file is
//! needed.

use crate::content_tree::{Alignment, ListStyle, Node, SealedDocument, TextRun};
use crate::renderer::{DocumentRenderer, RenderError};
use crate::style_catalog::{self, RenderDirective, StyleToken};
use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, Paragraph, Run, SpecialIndentType, Start, Style,
    StyleType,
};
use itertools::Itertools;
use std::io::Cursor;

/// First numbering ID handed out for list instances
const FIRST_NUMBERING_ID: usize = 2;

/// Left indent of a list paragraph in twips
const LIST_INDENT_TWIPS: i32 = 720;

/// Renders sealed documents to `.docx` files
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    /// Create a new DOCX renderer
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for DocxRenderer {
    fn format_name(&self) -> &'static str {
        "DOCX"
    }

    fn encode(&self, doc: &SealedDocument) -> Result<Vec<u8>, RenderError> {
        let docx = build_docx(doc)?;

        let mut buffer = Vec::new();
        docx.build()
            .pack(&mut Cursor::new(&mut buffer))
            .map_err(|e| RenderError::Format(format!("Failed to pack DOCX: {}", e)))?;

        Ok(buffer)
    }
}

/// Build the in-memory docx-rs document for a sealed document
fn build_docx(doc: &SealedDocument) -> Result<Docx, RenderError> {
    let mut docx = add_catalog_styles(Docx::new())?;
    let mut numbering = ListNumbering::new();

    // Each maximal chunk of consecutive list items with the same style is one
    // visual list and gets its own numbering instance.
    let chunks = doc.nodes().iter().chunk_by(|node| node.list_style());
    for (list_style, nodes) in &chunks {
        match list_style {
            Some(style) => {
                let (updated, num_id) = numbering.create_list(docx, style);
                docx = updated;
                for node in nodes {
                    docx = docx.add_paragraph(create_list_paragraph(node, style, num_id)?);
                }
            }
            None => {
                for node in nodes {
                    docx = docx.add_paragraph(create_block_paragraph(node)?);
                }
            }
        }
    }

    log::debug!(
        "Built DOCX with {} nodes and {} list instances",
        doc.len(),
        numbering.lists_created()
    );
    Ok(docx)
}

/// Register a paragraph style for every catalog entry that names one
fn add_catalog_styles(mut docx: Docx) -> Result<Docx, RenderError> {
    for token in style_catalog::catalog() {
        let directive = style_catalog::resolve(token)?;
        if let Some(style_id) = directive.style_id {
            docx = docx.add_style(create_paragraph_style(style_id, &directive));
        }
    }
    Ok(docx)
}

/// Create a paragraph style from a rendering directive
fn create_paragraph_style(style_id: &str, directive: &RenderDirective) -> Style {
    let mut style = Style::new(style_id, StyleType::Paragraph).name(directive.display_name);

    if directive.bold {
        style = style.bold();
    }
    if directive.italic {
        style = style.italic();
    }
    if let Some(size) = directive.size_half_points {
        style = style.size(size);
    }
    if let Some(alignment) = directive.alignment {
        style = style.align(alignment_to_docx_alignment(alignment));
    }

    style
}

/// Create a heading or body paragraph
fn create_block_paragraph(node: &Node) -> Result<Paragraph, RenderError> {
    let mut para = Paragraph::new();

    if let Node::Heading { level, .. } = node {
        let directive = style_catalog::resolve(StyleToken::heading(*level))?;
        if let Some(style_id) = directive.style_id {
            para = para.style(style_id);
        }
    }

    para = apply_alignment(para, node.alignment())?;
    add_runs(para, node.runs())
}

/// Create a list paragraph bound to a numbering instance
fn create_list_paragraph(
    node: &Node,
    style: ListStyle,
    num_id: usize,
) -> Result<Paragraph, RenderError> {
    let directive = style_catalog::resolve(StyleToken::from(style))?;

    let mut para = Paragraph::new().numbering(NumberingId::new(num_id), IndentLevel::new(0));
    if let Some(style_id) = directive.style_id {
        para = para.style(style_id);
    }

    para = apply_alignment(para, node.alignment())?;
    add_runs(para, node.runs())
}

/// Apply paragraph alignment through the catalog
fn apply_alignment(para: Paragraph, alignment: Alignment) -> Result<Paragraph, RenderError> {
    let directive = style_catalog::resolve(StyleToken::from(alignment))?;
    Ok(match directive.alignment {
        Some(resolved) => para.align(alignment_to_docx_alignment(resolved)),
        None => para,
    })
}

/// Append runs to a paragraph in order
fn add_runs(mut para: Paragraph, runs: &[TextRun]) -> Result<Paragraph, RenderError> {
    for text_run in runs {
        para = para.add_run(create_run(text_run)?);
    }
    Ok(para)
}

/// Create a docx Run from a TextRun with appropriate formatting
fn create_run(text_run: &TextRun) -> Result<Run, RenderError> {
    let mut run = Run::new().add_text(&text_run.text);

    if text_run.bold && style_catalog::resolve(StyleToken::Bold)?.bold {
        run = run.bold();
    }
    if text_run.italic && style_catalog::resolve(StyleToken::Italic)?.italic {
        run = run.italic();
    }
    if let Some(size) = text_run.size_half_points() {
        run = run.size(size);
    }

    Ok(run)
}

/// Convert Alignment to AlignmentType for paragraph formatting
fn alignment_to_docx_alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
    }
}

/// Hands out numbering definitions, one per visual list
#[derive(Debug)]
struct ListNumbering {
    next_id: usize,
}

impl ListNumbering {
    fn new() -> Self {
        Self {
            next_id: FIRST_NUMBERING_ID,
        }
    }

    fn lists_created(&self) -> usize {
        self.next_id - FIRST_NUMBERING_ID
    }

    /// Register a fresh abstract numbering and numbering instance for a list
    fn create_list(&mut self, docx: Docx, style: ListStyle) -> (Docx, usize) {
        let id = self.next_id;
        self.next_id += 1;

        let level = match style {
            ListStyle::Bullet => create_list_level("bullet", "•", 360),
            ListStyle::Number => create_list_level("decimal", "%1.", 420),
        };

        let docx = docx
            .add_abstract_numbering(AbstractNumbering::new(id).add_level(level))
            .add_numbering(Numbering::new(id, id));

        (docx, id)
    }
}

/// Create the single list level used by report lists
fn create_list_level(format: &str, text: &str, hanging: i32) -> Level {
    Level::new(
        0,
        Start::new(1),
        NumberFormat::new(format),
        LevelText::new(text),
        LevelJc::new("left"),
    )
    .indent(
        Some(LIST_INDENT_TWIPS),
        Some(SpecialIndentType::Hanging(hanging)),
        None,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_tree::DocumentBuilder;

    #[test]
    fn test_empty_document_encodes() {
        let doc = DocumentBuilder::new().seal().unwrap();
        let bytes = DocxRenderer::new().encode(&doc).unwrap();
        // Every DOCX is a zip archive
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_numbering_restarts_per_list() {
        let mut numbering = ListNumbering::new();
        let (docx, first) = numbering.create_list(Docx::new(), ListStyle::Number);
        let (_, second) = numbering.create_list(docx, ListStyle::Number);
        assert_ne!(first, second);
        assert_eq!(numbering.lists_created(), 2);
    }

    #[test]
    fn test_catalog_styles_register() {
        assert!(add_catalog_styles(Docx::new()).is_ok());
    }

    #[test]
    fn test_only_referenced_styles_are_written() {
        use std::io::Read;

        let doc = DocumentBuilder::new().seal().unwrap();
        let bytes = DocxRenderer::new().encode(&doc).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut styles = String::new();
        archive
            .by_name("word/styles.xml")
            .unwrap()
            .read_to_string(&mut styles)
            .unwrap();

        for style_id in ["Title", "Heading1", "Heading9", "ListBullet", "ListNumber"] {
            assert!(
                styles.contains(&format!("w:styleId=\"{}\"", style_id)),
                "missing {}",
                style_id
            );
        }
        assert!(!styles.contains("w:styleId=\"Subtitle\""));
    }
}
