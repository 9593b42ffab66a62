//! Error types for content tree construction

use crate::style_catalog::UnknownStyleError;
use thiserror::Error;

/// Errors that can occur while building a document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// Handle does not name a run-accepting node in this document
    #[error("Invalid node handle: {reason}")]
    InvalidHandle {
        /// Why the handle was rejected
        reason: String,
    },

    /// Mutation attempted after the document was sealed
    #[error("Document is sealed and can no longer be modified")]
    SealedDocument,

    /// `seal` called on an already sealed document
    #[error("Document has already been sealed")]
    AlreadySealed,

    /// Style token outside the catalog
    #[error(transparent)]
    UnknownStyle(#[from] UnknownStyleError),

    /// Font size does not fit the 0.5..=1638 point range of the format
    #[error("Font size must be between 0.5 and 1638 points, got {0}")]
    InvalidFontSize(f32),

    /// Text holds a character that XML documents cannot carry
    #[error("Text contains a character that cannot be stored: {0:?}")]
    InvalidCharacter(char),
}
