//! Configuration options for HTML to Markdown conversion.

/// Which parsing front end builds the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ParserMode {
    /// Spec-compliant html5ever tree builder with full error recovery.
    #[default]
    Html5ever,
    /// The `tl` tokenizer. Faster on well-formed markup.
    /// Falls back to html5ever when `tl` rejects the input or the result is
    /// misnested.
    Fast,
}

/// Options that drive the renderer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Collapse runs of tabs and spaces in text nodes outside `<pre>`.
    pub clean_whitespaces: bool,

    /// Maximum element nesting depth rendered before the subtree is dropped.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            clean_whitespaces: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Default nesting limit for the recursive renderer.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Main conversion options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionOptions {
    /// Parsing front end.
    pub parser: ParserMode,

    /// Collapse runs of tabs and spaces. Disable for transcripts where
    /// whitespace inside unfenced code must survive untouched.
    pub clean_whitespaces: bool,

    /// Strip injected markup and "Copy code" buttons from rendered fences.
    pub cleanup_code_fences: bool,

    /// Run the same cleanup over raw `<pre>` blocks before parsing.
    pub preclean_code_markup: bool,

    /// Encoding label used by [`crate::convert_bytes`] when no BOM is present.
    pub encoding: Option<String>,

    /// Maximum element nesting depth rendered.
    pub max_depth: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            parser: ParserMode::default(),
            clean_whitespaces: true,
            cleanup_code_fences: true,
            preclean_code_markup: false,
            encoding: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConversionOptions {
    /// Preset for chat transcripts (ShareGPT-style exports).
    ///
    /// Whitespace is kept exactly and `<pre>` blocks are cleaned before parsing.
    #[must_use]
    pub fn transcript() -> Self {
        Self {
            parser: ParserMode::Html5ever,
            clean_whitespaces: false,
            cleanup_code_fences: true,
            preclean_code_markup: true,
            ..Self::default()
        }
    }

    /// Renderer view of these options.
    #[must_use]
    pub const fn render_options(&self) -> RenderOptions {
        RenderOptions {
            clean_whitespaces: self.clean_whitespaces,
            max_depth: self.max_depth,
        }
    }
}
