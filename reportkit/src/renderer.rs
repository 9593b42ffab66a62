//! Renderer interface and shared write discipline
//!
//! A renderer turns a [`SealedDocument`] into a file. Whatever the backend,
//! the destination either receives the complete artifact or is left as it
//! was: output is staged in a temporary file next to the destination and
//! renamed into place only after it has been fully written.

use crate::content_tree::SealedDocument;
use crate::style_catalog::UnknownStyleError;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while rendering a document
#[derive(Error, Debug)]
pub enum RenderError {
    /// Destination could not be created, written or closed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend failed to encode the document
    #[error("Format error: {0}")]
    Format(String),

    /// A node carried a style the catalog cannot resolve
    #[error(transparent)]
    Style(#[from] UnknownStyleError),
}

/// Serializes sealed documents to persisted files
pub trait DocumentRenderer {
    /// Short name of the output format (used in log output)
    fn format_name(&self) -> &'static str;

    /// Encode the document to bytes
    fn encode(&self, doc: &SealedDocument) -> Result<Vec<u8>, RenderError>;

    /// Render the document to `destination`
    ///
    /// # Parameters
    /// * `doc` - The sealed document to render
    /// * `destination` - Path where the file will be written
    ///
    /// # Returns
    /// * `Ok(())` - The complete file is in place
    /// * `Err(RenderError)` - Nothing was written to `destination`
    fn render(&self, doc: &SealedDocument, destination: &Path) -> Result<(), RenderError> {
        log::info!(
            "Rendering {} nodes as {} to {}",
            doc.len(),
            self.format_name(),
            destination.display()
        );
        let bytes = self.encode(doc)?;
        write_atomically(destination, &bytes)?;
        log::info!("Wrote {} bytes to {}", bytes.len(), destination.display());
        Ok(())
    }
}

/// Write `bytes` to `destination` via a temporary file and rename
///
/// The temporary file lives in the destination's directory so the final
/// rename never crosses filesystems. It is removed if any step fails.
pub fn write_atomically(destination: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".reportkit-")
        .suffix(".tmp")
        .tempfile_in(directory)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;

    staged
        .persist(destination)
        .map_err(|e| RenderError::Io(e.error))?;

    Ok(())
}
