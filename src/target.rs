//! Output format context supplied by the caller.

/// Output formats, grouped by how code must be emitted for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Latex,
    Beamer,
    Html,
    Other,
}

impl OutputFormat {
    /// Map a pandoc writer name (as passed to JSON filters) to a format group.
    ///
    /// Extension suffixes like `latex+raw_tex` or `html5-smart` are ignored.
    pub fn from_pandoc(name: &str) -> OutputFormat {
        let base = name
            .split(['+', '-'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match base.as_str() {
            "latex" | "pdf" => OutputFormat::Latex,
            "beamer" => OutputFormat::Beamer,
            "html" | "html4" | "html5" | "revealjs" | "slidy" | "slideous" | "s5" | "dzslides"
            | "epub" | "epub2" | "epub3" | "chunkedhtml" => OutputFormat::Html,
            _ => OutputFormat::Other,
        }
    }

    /// Whether raw LaTeX, and hence minted, reaches the final output.
    pub fn supports_minted(self) -> bool {
        matches!(self, OutputFormat::Latex | OutputFormat::Beamer)
    }
}

/// Per-run rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    pub format: OutputFormat,
    /// Whether the host pipeline runs its own syntax highlighter
    /// (i.e. pandoc was *not* given `--no-highlight`).
    pub highlighting_enabled: bool,
}

impl RenderTarget {
    pub fn new(format: OutputFormat, highlighting_enabled: bool) -> Self {
        Self {
            format,
            highlighting_enabled,
        }
    }
}
