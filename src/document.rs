//! The editable unit: a LaTeX equation plus its boilerplate and output scale.

/// Placeholder in the preamble template, replaced by the build timestamp
/// when the document text is materialized. `%...%` rather than `{...}` so
/// the template needs no brace escaping against LaTeX.
pub const TIMESTAMP_PLACEHOLDER: &str = "%NOW%";

/// Default LaTeX boilerplate preceding the equation.
pub const DEFAULT_PREAMBLE: &str = "% Created by laveqed (%NOW%)\n\
\\documentclass{article}\n\
\\usepackage{amssymb,amsmath,xcolor}\n\
\\pagestyle{empty}\n\
\\begin{document}\n\
\\begin{align*}\n";

/// Default LaTeX boilerplate closing the document.
pub const DEFAULT_POSTAMBLE: &str = "\n\\end{align*}\n\\end{document}";

/// Default output magnification passed to the SVG converter.
pub const DEFAULT_SCALE: u32 = 4;

/// Default base name for on-disk artifacts.
pub const DEFAULT_NAME: &str = "laveqed";

/// Strip any trailing `.svg` suffix from a base name.
///
/// Idempotent, and also collapses stacked suffixes (`eq.svg.svg` → `eq`) so
/// the result can always be safely re-appended with `.svg`.
pub fn normalize_name(name: &str) -> &str {
    name.trim_end_matches(".svg")
}

/// In-memory representation of a LaTeX fragment plus its boilerplate and
/// output scale. Built fresh with defaults or populated from an existing
/// SVG's embedded metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// LaTeX boilerplate preceding the equation; may contain the timestamp
    /// placeholder, which stays literal until the text is materialized.
    pub preamble: String,
    /// User-authored LaTeX body, passed through verbatim.
    pub equation: String,
    /// LaTeX boilerplate closing the document.
    pub postamble: String,
    /// Output magnification, serialized as its decimal string form.
    pub scale: u32,
    /// When true, a successful build deletes the aux/log/dvi/tex
    /// intermediates, leaving only the final SVG.
    pub cleanup_after_build: bool,
    /// Reduced load mode: extract only the equation text, leaving
    /// preamble/postamble/scale untouched.
    pub equation_only: bool,
    /// Base filename for all artifacts. Never carries a `.svg` suffix;
    /// normalized on assignment.
    name: String,
}

impl Document {
    /// A document with the default boilerplate around `equation`.
    pub fn new(equation: impl Into<String>) -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            equation: equation.into(),
            postamble: DEFAULT_POSTAMBLE.to_string(),
            scale: DEFAULT_SCALE,
            cleanup_after_build: true,
            equation_only: false,
            name: DEFAULT_NAME.to_string(),
        }
    }

    /// Base filename without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the base filename, stripping any `.svg` suffix.
    pub fn set_name(&mut self, name: &str) {
        self.name = normalize_name(name).to_string();
    }

    /// Builder-style variant of [`set_name`](Self::set_name).
    pub fn with_name(mut self, name: &str) -> Self {
        self.set_name(name);
        self
    }

    /// The complete LaTeX document text, with every timestamp placeholder
    /// replaced by `now`. No escaping or validation: malformed LaTeX is the
    /// caller's responsibility and surfaces as a compiler failure.
    pub fn source(&self, now: &str) -> String {
        let mut text =
            String::with_capacity(self.preamble.len() + self.equation.len() + self.postamble.len());
        text.push_str(&self.preamble);
        text.push_str(&self.equation);
        text.push_str(&self.postamble);
        text.replace(TIMESTAMP_PLACEHOLDER, now)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

/// Current local time as `YYYY-MM-DD_HH-MM-SS`, the format substituted for
/// the timestamp placeholder and used for default artifact names.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}
