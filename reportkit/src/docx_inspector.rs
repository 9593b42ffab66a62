//! Read rendered DOCX files back into the content tree model
//!
//! Only the structure this crate writes is reconstructed: paragraph styles
//! (title, headings, list styles), paragraph alignment and run formatting
//! (bold, italic, size). Everything else in the package is ignored.

use crate::content_tree::{Alignment, ListStyle, Node, TextRun};
use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use zip::read::ZipArchive;

/// Archive member holding the document body
const DOCUMENT_PART: &str = "word/document.xml";

static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:body\b[^>]*>(.*)</w:body>").unwrap());
static PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:p\b[^>]*?(?:/>|>(.*?)</w:p>)").unwrap()
});
static PARAGRAPH_PROPS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:pPr\b[^>]*?(?:/>|>(.*?)</w:pPr>)").unwrap());
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<w:pStyle\s+w:val="([^"]*)""#).unwrap());
static JC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<w:jc\s+w:val="([^"]*)""#).unwrap());
static RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:r\b[^>]*?(?:/>|>(.*?)</w:r>)").unwrap());
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<w:b(?:\s+w:val="([^"]*)")?\s*/>"#).unwrap());
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<w:i(?:\s+w:val="([^"]*)")?\s*/>"#).unwrap());
static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<w:sz\s+w:val="(\d+)""#).unwrap());
static TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*?)?(?:/>|>(.*?)</w:t>)").unwrap()
});
static HEADING_STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Heading(\d)$").unwrap());

/// Errors that can occur while reading a DOCX file back
#[derive(Error, Debug)]
pub enum InspectError {
    /// File could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a readable zip archive
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A required package part is absent
    #[error("Missing package part: {0}")]
    MissingPart(&'static str),

    /// The document XML does not have the expected shape
    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// Read the nodes of a DOCX file in document order
pub fn inspect(path: &Path) -> Result<Vec<Node>, InspectError> {
    let file = std::fs::File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let xml = read_part(&mut archive, DOCUMENT_PART)?;
    let nodes = parse_document_xml(&xml)?;
    log::debug!("Read {} nodes from {}", nodes.len(), path.display());
    Ok(nodes)
}

/// Read a package member as UTF-8 text
fn read_part<R: std::io::Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &'static str,
) -> Result<String, InspectError> {
    let mut part = archive.by_name(name).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => InspectError::MissingPart(name),
        other => InspectError::Zip(other),
    })?;

    let mut content = String::new();
    part.read_to_string(&mut content)?;
    Ok(content)
}

/// Parse `word/document.xml` into nodes
pub fn parse_document_xml(xml: &str) -> Result<Vec<Node>, InspectError> {
    let body = BODY_RE
        .captures(xml)
        .and_then(|c| c.get(1))
        .ok_or_else(|| InspectError::Malformed("no <w:body> element".to_string()))?
        .as_str();

    Ok(PARAGRAPH_RE
        .captures_iter(body)
        .map(|c| parse_paragraph(c.get(1).map_or("", |m| m.as_str())))
        .collect())
}

/// Parse the inner XML of one `<w:p>` element
fn parse_paragraph(inner: &str) -> Node {
    let props = PARAGRAPH_PROPS_RE
        .captures(inner)
        .map(|c| c.get(1).map_or("", |m| m.as_str()))
        .unwrap_or("");
    let content = PARAGRAPH_PROPS_RE.replace(inner, "");

    let style = first_capture(&STYLE_RE, props);
    let alignment = match first_capture(&JC_RE, props) {
        Some("center") => Alignment::Center,
        Some("right") | Some("end") => Alignment::Right,
        _ => Alignment::Left,
    };

    let runs: Vec<TextRun> = RUN_RE
        .captures_iter(&content)
        .map(|c| parse_run(c.get(1).map_or("", |m| m.as_str())))
        .collect();

    match style {
        Some("Title") => Node::Heading {
            level: 0,
            runs,
            alignment,
        },
        Some("ListBullet") => Node::Paragraph {
            runs,
            list_style: Some(ListStyle::Bullet),
            alignment,
        },
        Some("ListNumber") => Node::Paragraph {
            runs,
            list_style: Some(ListStyle::Number),
            alignment,
        },
        Some(other) => match heading_level(other) {
            Some(level) => Node::Heading {
                level,
                runs,
                alignment,
            },
            None => Node::Paragraph {
                runs,
                list_style: None,
                alignment,
            },
        },
        None => Node::Paragraph {
            runs,
            list_style: None,
            alignment,
        },
    }
}

/// Parse the inner XML of one `<w:r>` element
fn parse_run(inner: &str) -> TextRun {
    let text: String = TEXT_RE
        .captures_iter(inner)
        .filter_map(|c| c.get(1))
        .map(|m| unescape_xml(m.as_str()))
        .collect();

    TextRun {
        text,
        bold: toggle_is_on(&BOLD_RE, inner),
        italic: toggle_is_on(&ITALIC_RE, inner),
        font_size_pt: first_capture(&SIZE_RE, inner)
            .and_then(|v| v.parse::<f32>().ok())
            .map(|half_points| half_points / 2.0),
    }
}

/// Heading level encoded in a `HeadingN` style ID
fn heading_level(style_id: &str) -> Option<u8> {
    HEADING_STYLE_RE
        .captures(style_id)
        .and_then(|c| c[1].parse().ok())
        .filter(|level| *level > 0)
}

/// Evaluate an on/off property such as `<w:b/>` or `<w:b w:val="false"/>`
fn toggle_is_on(re: &Regex, xml: &str) -> bool {
    match re.captures(xml) {
        Some(c) => !matches!(
            c.get(1).map(|m| m.as_str()),
            Some("false") | Some("0") | Some("off")
        ),
        None => false,
    }
}

fn first_capture<'a>(re: &Regex, xml: &'a str) -> Option<&'a str> {
    re.captures(xml).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Replace the predefined XML entities and numeric character references
fn unescape_xml(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('&') {
        result.push_str(&rest[..start]);
        let after = &rest[start..];
        let Some(end) = after.find(';') else {
            result.push_str(after);
            return result;
        };

        let entity = &after[1..end];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };

        match decoded {
            Some(c) => result.push(c),
            None => result.push_str(&after[..=end]),
        }
        rest = &after[end + 1..];
    }
    result.push_str(rest);
    result
}
