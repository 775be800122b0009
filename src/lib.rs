//! laveqed
//!
//! Compile LaTeX equation fragments into SVG images and round-trip the
//! source by embedding it as metadata inside the generated file.
//!
//! This library provides:
//! - Document assembly (boilerplate + equation + timestamp substitution)
//! - Driving the external `latex`/`dvisvgm` pipeline
//! - Embedding and extracting LaTeX source as SVG metadata
//! - Typed build/load failure kinds

pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod metadata;
pub mod toolchain;

// Re-exports for clean public API
pub use codec::DocumentCodec;
pub use config::Config;
pub use document::Document;
pub use error::{BuildError, LoadError, MetadataError};
pub use toolchain::{LatexToolchain, Toolchain};
