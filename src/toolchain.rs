//! External LaTeX toolchain invocation.
//!
//! The compile pipeline is two blocking subprocess calls: `latex` producing a
//! DVI, then `dvisvgm` converting it to an SVG at the requested scale. Both
//! run in an explicit working directory, never in the process-wide one. The
//! [`Toolchain`] trait is the seam that lets tests drive the codec without a
//! TeX installation.

use crate::error::BuildError;
use std::path::Path;
use std::process::Command;

/// The external compiler pipeline: LaTeX source to DVI, DVI to SVG.
///
/// Implementations block until the tool exits and surface any non-zero exit
/// as a [`BuildError`]. No timeout is imposed here.
pub trait Toolchain {
    /// Compile `<basename>.tex` in `workdir` into `<basename>.dvi`.
    fn compile(&self, workdir: &Path, basename: &str) -> Result<(), BuildError>;

    /// Convert `<basename>.dvi` in `workdir` into `<basename>.svg`, with
    /// exact bounding-box metrics and `scale` applied both horizontally and
    /// vertically.
    fn to_svg(&self, workdir: &Path, basename: &str, scale: u32) -> Result<(), BuildError>;
}

/// The real pipeline: `latex -interaction=batchmode` then
/// `dvisvgm --exact -c S,S -n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexToolchain;

impl LatexToolchain {
    fn run(mut command: Command, tool: &'static str) -> Result<(), BuildError> {
        log::debug!("running {command:?}");
        let status = command
            .status()
            .map_err(|source| BuildError::Launch { tool, source })?;
        if !status.success() {
            return Err(BuildError::ToolFailed { tool, status });
        }
        Ok(())
    }
}

impl Toolchain for LatexToolchain {
    fn compile(&self, workdir: &Path, basename: &str) -> Result<(), BuildError> {
        let mut command = Command::new("latex");
        command
            .current_dir(workdir)
            .arg("-interaction=batchmode")
            .arg(format!("{basename}.tex"));
        Self::run(command, "latex")
    }

    fn to_svg(&self, workdir: &Path, basename: &str, scale: u32) -> Result<(), BuildError> {
        let mut command = Command::new("dvisvgm");
        command
            .current_dir(workdir)
            .arg("--exact")
            .arg("-c")
            .arg(format!("{scale},{scale}"))
            .arg("-n")
            .arg(format!("{basename}.dvi"));
        Self::run(command, "dvisvgm")
    }
}
