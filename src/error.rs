//! Typed failure kinds for building and loading equation SVGs.
//!
//! Build and load failures are separate types so callers can branch on the
//! failure kind instead of string-matching messages: a `BuildError` means the
//! external pipeline (or the annotation of its output) went wrong, a
//! `LoadError` means an existing file could not be read back.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from embedding or extracting the `desc` metadata block.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// XML parse or write error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Rewritten XML was not valid UTF-8
    #[error("metadata output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Input has no `<svg>` root element to attach metadata to
    #[error("no <svg> root element found")]
    MissingRoot,

    /// No `<desc>` metadata wrapper in the file
    #[error("no <desc> metadata element found")]
    MissingDesc,

    /// The `<desc>` wrapper does not hold the expected fields
    #[error("expected {expected} metadata fields under <desc>, found {found}")]
    FieldCount { expected: usize, found: usize },
}

/// Failure of the external compile pipeline or of annotating its output.
///
/// Intermediate files are left on disk when a build fails.
#[derive(Error, Debug)]
pub enum BuildError {
    /// I/O error writing the source or reading the produced SVG
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Could not launch an external tool (typically: not installed)
    #[error("failed to launch `{tool}`: {source}")]
    Launch {
        tool: &'static str,
        source: io::Error,
    },

    /// An external tool exited with a non-zero status
    #[error("`{tool}` exited with {status}")]
    ToolFailed {
        tool: &'static str,
        status: std::process::ExitStatus,
    },

    /// The pipeline exited cleanly but produced no SVG
    #[error("pipeline produced no output file at {0}")]
    MissingOutput(PathBuf),

    /// The produced SVG could not be annotated with metadata
    #[error("failed to embed metadata: {0}")]
    Metadata(#[from] MetadataError),
}

/// Failure to reconstruct a document from an existing SVG file.
///
/// A load either fully succeeds or leaves the target document untouched.
#[derive(Error, Debug)]
pub enum LoadError {
    /// File missing or unreadable
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Not well-formed XML, or the metadata structure is absent
    #[error("{0}")]
    Metadata(#[from] MetadataError),

    /// The embedded scale is not a positive integer
    #[error("embedded scale {value:?} is not an integer: {source}")]
    Scale {
        value: String,
        source: ParseIntError,
    },
}
