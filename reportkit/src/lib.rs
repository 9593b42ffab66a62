//! reportkit - structured report assembly
//!
//! Reports are assembled as an ordered content tree (headings, paragraphs,
//! styled runs and lists), sealed, and rendered to Microsoft Word (.docx)
//! files. Report content can be supplied programmatically through
//! [`DocumentBuilder`] or as a TOML [`Manifest`].

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod content_tree;
pub mod docx_inspector;
pub mod docx_rs_exporter;
pub mod manifest;
pub mod renderer;
pub mod style_catalog;

pub use content_tree::{
    Alignment, BuildError, DocumentBuilder, DocumentState, ListStyle, Node, NodeHandle,
    SealedDocument, TextRun,
};
pub use docx_inspector::{inspect, InspectError};
pub use docx_rs_exporter::DocxRenderer;
pub use manifest::{Manifest, ManifestError};
pub use renderer::{DocumentRenderer, RenderError};
pub use style_catalog::{RenderDirective, StyleToken, UnknownStyleError};
