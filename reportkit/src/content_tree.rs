//! In-memory content tree for report assembly
//!
//! This module defines the node model (headings, paragraphs, list items and
//! their text runs) and the append-only builder that produces an immutable
//! [`SealedDocument`] ready for rendering.

// Submodules
mod builder;
mod error;
mod node;
mod text_run;
mod types;

// Re-export public types
pub use builder::{DocumentBuilder, DocumentState, NodeHandle, SealedDocument};
pub use error::BuildError;
pub use node::Node;
pub use text_run::TextRun;
pub use types::{Alignment, ListStyle};
