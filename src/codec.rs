//! Build and load operations tying documents, the toolchain, and the SVG
//! metadata format together.

use crate::document::{Document, timestamp_now};
use crate::error::{BuildError, LoadError, MetadataError};
use crate::metadata::{self, EmbeddedSource, METADATA_TAGS};
use crate::toolchain::{LatexToolchain, Toolchain};
use std::fs;
use std::path::{Path, PathBuf};

/// Position of the equation among the `desc` children (the file format's
/// read contract is positional).
const EQUATION_FIELD: usize = 1;

/// Compiles a [`Document`] into a self-describing SVG and reconstructs
/// documents from previously produced files.
///
/// All artifacts live under the explicit working directory given at
/// construction. Operations are synchronous and blocking; concurrent builds
/// with the same document name in the same directory are unsafe (last writer
/// wins) and must be serialized by the caller.
pub struct DocumentCodec<T = LatexToolchain> {
    workdir: PathBuf,
    toolchain: T,
}

impl DocumentCodec<LatexToolchain> {
    /// Codec using the real `latex`/`dvisvgm` pipeline in `workdir`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self::with_toolchain(workdir, LatexToolchain)
    }
}

impl<T: Toolchain> DocumentCodec<T> {
    /// Codec with a custom pipeline implementation (tests, alternative
    /// converters).
    pub fn with_toolchain(workdir: impl Into<PathBuf>, toolchain: T) -> Self {
        Self {
            workdir: workdir.into(),
            toolchain,
        }
    }

    /// Directory all artifacts are read from and written to.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// The pipeline implementation in use.
    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// Compile `document` into `<name>.svg` and embed its source as
    /// metadata. Returns the path of the produced SVG.
    ///
    /// On pipeline failure the intermediates are left on disk for
    /// inspection; nothing is retried. On success, intermediates are
    /// deleted when `cleanup_after_build` is set (the SVG always stays).
    pub fn build(&self, document: &Document) -> Result<PathBuf, BuildError> {
        // One timestamp per build: the tex source and the embedded preamble
        // must resolve %NOW% to the same instant.
        let now = timestamp_now();
        let basename = document.name();
        let tex_path = self.artifact(basename, "tex");
        let svg_path = self.artifact(basename, "svg");

        log::info!("building {}", svg_path.display());
        fs::write(&tex_path, document.source(&now))?;

        self.toolchain.compile(&self.workdir, basename)?;
        self.toolchain
            .to_svg(&self.workdir, basename, document.scale)?;

        if !svg_path.exists() {
            return Err(BuildError::MissingOutput(svg_path));
        }

        if document.cleanup_after_build {
            self.cleanup(basename);
        }

        self.embed_metadata(document, &now, &svg_path)?;
        Ok(svg_path)
    }

    /// Populate `document` from the metadata embedded in `filename`
    /// (resolved against the working directory, `.svg` appended if absent).
    ///
    /// In `equation_only` mode only the equation field is read; otherwise
    /// preamble, equation, postamble and scale are all restored. The load is
    /// atomic: `document` is only mutated after every field has been
    /// extracted successfully, and `name` is then set to the file's base
    /// name.
    pub fn load(&self, document: &mut Document, filename: &str) -> Result<(), LoadError> {
        let filename = if filename.ends_with(".svg") {
            filename.to_string()
        } else {
            format!("{filename}.svg")
        };
        let svg = fs::read_to_string(self.workdir.join(&filename))?;
        let fields = metadata::extract(&svg)?;

        if document.equation_only {
            // Positional read per the file format; the tag check is only
            // defensive.
            // Only the fields up to the equation need to exist in this mode
            let field = fields.get(EQUATION_FIELD).ok_or_else(|| {
                MetadataError::FieldCount {
                    expected: EQUATION_FIELD + 1,
                    found: fields.len(),
                }
            })?;
            if field.tag != METADATA_TAGS[EQUATION_FIELD] {
                log::warn!(
                    "metadata field {} is tagged <{}>, expected <{}>",
                    EQUATION_FIELD,
                    field.tag,
                    METADATA_TAGS[EQUATION_FIELD]
                );
            }
            document.equation = field.value.clone();
        } else {
            if fields.len() != METADATA_TAGS.len() {
                return Err(MetadataError::FieldCount {
                    expected: METADATA_TAGS.len(),
                    found: fields.len(),
                }
                .into());
            }
            let scale = fields[3]
                .value
                .parse::<u32>()
                .map_err(|source| LoadError::Scale {
                    value: fields[3].value.clone(),
                    source,
                })?;
            document.preamble = fields[0].value.clone();
            document.equation = fields[1].value.clone();
            document.postamble = fields[2].value.clone();
            document.scale = scale;
        }

        document.set_name(&filename);
        Ok(())
    }

    fn embed_metadata(
        &self,
        document: &Document,
        now: &str,
        svg_path: &Path,
    ) -> Result<(), BuildError> {
        let source = EmbeddedSource {
            preamble: document
                .preamble
                .replace(crate::document::TIMESTAMP_PLACEHOLDER, now),
            equation: document.equation.clone(),
            postamble: document.postamble.clone(),
            scale: document.scale.to_string(),
        };
        let svg = fs::read_to_string(svg_path)?;
        let annotated = metadata::embed(&svg, &source)?;
        fs::write(svg_path, annotated)?;
        Ok(())
    }

    /// Delete the intermediate build artifacts for `basename`. Never touches
    /// the final SVG; failures are logged and ignored.
    fn cleanup(&self, basename: &str) {
        for ext in ["aux", "log", "dvi", "tex"] {
            let path = self.artifact(basename, ext);
            if let Err(err) = fs::remove_file(&path) {
                log::warn!("could not remove {}: {err}", path.display());
            }
        }
    }

    fn artifact(&self, basename: &str, ext: &str) -> PathBuf {
        self.workdir.join(format!("{basename}.{ext}"))
    }
}
