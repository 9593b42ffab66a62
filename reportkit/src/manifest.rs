//! Report manifests loaded from TOML
//!
//! A manifest describes a report as data: an optional `[report]` table with
//! settings and an ordered list of `[[node]]` entries that are replayed
//! through the [`DocumentBuilder`].

use crate::content_tree::{
    Alignment, BuildError, DocumentBuilder, ListStyle, SealedDocument, TextRun,
};
use crate::style_catalog::{self, StyleToken, UnknownStyleError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output path used when neither the caller nor the manifest names one
pub const DEFAULT_OUTPUT: &str = "report.docx";

/// A complete report manifest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Report-level settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Node specifications in document order
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeSpec>,
}

/// Settings from the `[report]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Human-readable report name, used in log output
    pub title: Option<String>,

    /// Default output path, relative to the working directory
    pub output: Option<PathBuf>,
}

/// One `[[node]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum NodeSpec {
    /// A heading; level 0 is the document title
    Heading {
        /// Heading text
        text: String,
        /// Heading level
        level: u8,
        /// Paragraph alignment
        #[serde(default)]
        alignment: Alignment,
    },

    /// A body paragraph
    ///
    /// `text` becomes a leading plain run (bold if `bold` is set); `runs`
    /// follow in order. Without either, the paragraph is empty.
    Paragraph {
        /// Paragraph style name: "Normal" or "Subtitle"
        #[serde(default)]
        style: Option<String>,
        /// Paragraph alignment; defaults to the style's alignment, then left
        #[serde(default)]
        alignment: Option<Alignment>,
        /// Leading run text
        #[serde(default)]
        text: Option<String>,
        /// Whether the leading run is bold
        #[serde(default)]
        bold: bool,
        /// Additional formatted runs
        #[serde(default)]
        runs: Vec<TextRun>,
    },

    /// A list item
    ListItem {
        /// Item text
        text: String,
        /// List style name: "List Bullet" or "List Number"
        style: String,
    },
}

impl Manifest {
    /// Load a manifest from a TOML file
    ///
    /// # Parameters
    /// * `path` - Path to the manifest file
    ///
    /// # Returns
    /// * `Ok(Manifest)` - Successfully loaded manifest
    /// * `Err(ManifestError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    /// Parse a manifest from TOML text
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Output path, preferring `requested` over the manifest setting
    pub fn output_path(&self, requested: Option<PathBuf>) -> PathBuf {
        requested
            .or_else(|| self.report.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Replay every node through a fresh builder and seal the result
    pub fn build(&self) -> Result<SealedDocument, ManifestError> {
        log::info!(
            "Building report '{}' from {} node specs",
            self.report.title.as_deref().unwrap_or("untitled"),
            self.nodes.len()
        );

        let mut builder = DocumentBuilder::new();
        for (index, spec) in self.nodes.iter().enumerate() {
            append_node(&mut builder, spec)
                .map_err(|source| ManifestError::Build { index, source })?;
        }

        Ok(builder.seal()?)
    }
}

/// Append a single node spec to the builder
fn append_node(builder: &mut DocumentBuilder, spec: &NodeSpec) -> Result<(), BuildError> {
    match spec {
        NodeSpec::Heading {
            text,
            level,
            alignment,
        } => {
            builder.add_heading(text.as_str(), *level, *alignment)?;
        }
        NodeSpec::Paragraph {
            style,
            alignment,
            text,
            bold,
            runs,
        } => {
            let token = paragraph_style(style.as_deref())?;
            let directive = style_catalog::resolve(token)?;
            let alignment = alignment.or(directive.alignment).unwrap_or_default();
            let handle = builder.add_paragraph(alignment)?;

            let leading = text.iter().filter(|t| !t.is_empty()).map(|t| TextRun {
                bold: *bold,
                ..TextRun::new(t.as_str())
            });
            for mut run in leading.chain(runs.iter().cloned()) {
                run.bold |= directive.bold;
                run.italic |= directive.italic;
                if run.font_size_pt.is_none() {
                    run.font_size_pt = directive.size_half_points.map(|hp| hp as f32 / 2.0);
                }
                builder.add_run(handle, run)?;
            }
        }
        NodeSpec::ListItem { text, style } => {
            let token: StyleToken = style.parse()?;
            let list_style = ListStyle::try_from(token)?;
            builder.add_list_item(text.as_str(), list_style)?;
        }
    }
    Ok(())
}

/// Resolve a paragraph style name; only body-text styles are accepted
fn paragraph_style(name: Option<&str>) -> Result<StyleToken, UnknownStyleError> {
    let Some(name) = name else {
        return Ok(StyleToken::Normal);
    };

    match name.parse::<StyleToken>()? {
        token @ (StyleToken::Normal | StyleToken::Subtitle) => Ok(token),
        other => Err(UnknownStyleError(format!(
            "{} (not a paragraph style)",
            other
        ))),
    }
}

/// Errors that can occur when loading or building a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// IO error when reading the manifest
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A node spec was rejected by the builder
    #[error("Node {index}: {source}")]
    Build {
        /// Position of the offending `[[node]]` entry
        index: usize,
        /// Underlying builder error
        #[source]
        source: BuildError,
    },

    /// Sealing the finished document failed
    #[error("Failed to seal document: {0}")]
    Seal(#[from] BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_tree::Node;

    #[test]
    fn test_parse_example_manifest() {
        let toml_content = r#"
[report]
title = "Example"
output = "out/example.docx"

[[node]]
kind = "heading"
level = 0
text = "Title"
alignment = "center"

[[node]]
kind = "paragraph"
style = "Subtitle"
runs = [{ text = "Subject" }]

[[node]]
kind = "paragraph"
text = "Conclusion: keep it."
bold = true

[[node]]
kind = "list_item"
style = "List Number"
text = "First"
"#;

        let manifest = Manifest::parse(toml_content).unwrap();
        assert_eq!(manifest.report.title.as_deref(), Some("Example"));
        assert_eq!(manifest.nodes.len(), 4);

        let doc = manifest.build().unwrap();
        assert_eq!(doc.len(), 4);

        assert_eq!(
            doc.nodes()[0],
            Node::Heading {
                level: 0,
                runs: vec![TextRun::new("Title")],
                alignment: Alignment::Center,
            }
        );
        assert_eq!(
            doc.nodes()[1],
            Node::Paragraph {
                runs: vec![TextRun::new("Subject").italic().size(12.0)],
                list_style: None,
                alignment: Alignment::Center,
            }
        );
        assert_eq!(doc.nodes()[2].runs(), &[TextRun::new("Conclusion: keep it.").bold()]);
        assert_eq!(doc.nodes()[3].list_style(), Some(ListStyle::Number));
    }

    #[test]
    fn test_leading_text_precedes_runs() {
        let manifest = Manifest::parse(
            r#"
[[node]]
kind = "paragraph"
text = "Conflict: "
bold = true
runs = [{ text = "How to detect FOG?" }]
"#,
        )
        .unwrap();

        let doc = manifest.build().unwrap();
        let runs = doc.nodes()[0].runs();
        assert_eq!(runs.len(), 2);
        assert!(runs[0].bold);
        assert!(!runs[1].bold);
    }

    #[test]
    fn test_empty_paragraph_has_no_runs() {
        let manifest = Manifest::parse("[[node]]\nkind = \"paragraph\"\ntext = \"\"\n").unwrap();
        let doc = manifest.build().unwrap();
        assert!(doc.nodes()[0].runs().is_empty());
    }

    #[test]
    fn test_unknown_list_style() {
        let manifest = Manifest::parse(
            "[[node]]\nkind = \"heading\"\nlevel = 1\ntext = \"A\"\n\n[[node]]\nkind = \"list_item\"\nstyle = \"List Dash\"\ntext = \"x\"\n",
        )
        .unwrap();

        match manifest.build().unwrap_err() {
            ManifestError::Build {
                index,
                source: BuildError::UnknownStyle(err),
            } => {
                assert_eq!(index, 1);
                assert_eq!(err, UnknownStyleError("List Dash".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_list_style_on_list_item() {
        let manifest =
            Manifest::parse("[[node]]\nkind = \"list_item\"\nstyle = \"Bold\"\ntext = \"x\"\n")
                .unwrap();
        assert!(matches!(
            manifest.build(),
            Err(ManifestError::Build {
                source: BuildError::UnknownStyle(_),
                ..
            })
        ));
    }

    #[test]
    fn test_heading_style_on_paragraph_is_rejected() {
        assert!(paragraph_style(Some("Heading 1")).is_err());
        assert_eq!(paragraph_style(None), Ok(StyleToken::Normal));
        assert_eq!(paragraph_style(Some("subtitle")), Ok(StyleToken::Subtitle));
    }

    #[test]
    fn test_invalid_kind_is_parse_error() {
        let err = Manifest::parse("[[node]]\nkind = \"table\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn test_misspelled_keys_are_parse_errors() {
        let heading = "[[node]]\nkind = \"heading\"\nlevel = 1\ntext = \"A\"\naligment = \"center\"\n";
        let report = "[report]\ntitel = \"Typo\"\n";
        let run = "[[node]]\nkind = \"paragraph\"\nruns = [{ text = \"x\", itallic = true }]\n";
        let table = "[reprot]\ntitle = \"Typo\"\n";

        for content in [heading, report, run, table] {
            assert!(
                matches!(Manifest::parse(content), Err(ManifestError::Parse(_))),
                "should reject: {}",
                content
            );
        }
    }

    #[test]
    fn test_output_path_precedence() {
        let manifest = Manifest::parse("[report]\noutput = \"Technical_Report.docx\"\n").unwrap();
        assert_eq!(
            manifest.output_path(None),
            PathBuf::from("Technical_Report.docx")
        );
        assert_eq!(
            manifest.output_path(Some(PathBuf::from("other.docx"))),
            PathBuf::from("other.docx")
        );
        assert_eq!(
            Manifest::default().output_path(None),
            PathBuf::from(DEFAULT_OUTPUT)
        );
    }

    #[test]
    fn test_empty_manifest_builds_empty_document() {
        let doc = Manifest::parse("").unwrap().build().unwrap();
        assert!(doc.is_empty());
    }
}
