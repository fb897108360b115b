//! HTML to Markdown conversion tuned for chat transcripts.
//!
//! The pipeline has three stages:
//!
//! 1. Parse markup into an arena [`Document`] with one of two front ends
//!    ([`ParserMode::Html5ever`] or the faster [`ParserMode::Fast`]).
//! 2. Render the tree bottom-up through a static table of per-tag converters.
//! 3. Clean up fenced code blocks, moving "Copy code" labels into the fence
//!    language and dropping leftover inline markup.
//!
//! ```
//! use markdownify::{ConversionOptions, convert};
//!
//! let markdown = convert("<h1>Title</h1><p>Hello <b>world</b></p>", &ConversionOptions::default()).unwrap();
//! assert_eq!(markdown, "Title\n=====\nHello **world**\n");
//! ```

use std::io::Read;

pub mod cleanup;
pub mod converter;
pub mod dom;
pub mod encoding;
pub mod error;
pub mod options;
pub mod text;

pub use cleanup::{cleanup_code_fences, cleanup_code_markup};
pub use converter::{render, render_tree};
pub use dom::{Document, NodeId, NodeKind, NodeRef, parse};
pub use error::{ConversionError, Result};
pub use options::{ConversionOptions, DEFAULT_MAX_DEPTH, ParserMode, RenderOptions};

/// Convert HTML to Markdown.
///
/// # Errors
///
/// Returns [`ConversionError::FrontEnd`] when the parsing front end rejects
/// the input.
pub fn convert(html: &str, options: &ConversionOptions) -> Result<String> {
    let precleaned;
    let html = if options.preclean_code_markup {
        precleaned = cleanup_code_markup(html);
        precleaned.as_str()
    } else {
        html
    };

    log::debug!("parsing {} bytes with {:?}", html.len(), options.parser);
    let mut document = parse(html, options.parser)?;
    let markdown = render(&mut document, &options.render_options());

    if options.cleanup_code_fences {
        Ok(cleanup_code_fences(&markdown))
    } else {
        Ok(markdown)
    }
}

/// Decode raw bytes and convert them.
///
/// Decoding honours a byte order mark first, then `options.encoding`, then
/// falls back to UTF-8.
///
/// # Errors
///
/// Returns [`ConversionError::Encoding`] for an unknown encoding label, or
/// any error of [`convert`].
pub fn convert_bytes(bytes: &[u8], options: &ConversionOptions) -> Result<String> {
    let html = encoding::decode(bytes, options.encoding.as_deref())?;
    convert(&html, options)
}

/// Read all of `reader`, then decode and convert it like [`convert_bytes`].
///
/// # Errors
///
/// Returns [`ConversionError::Io`] when reading fails, or any error of
/// [`convert_bytes`].
pub fn convert_reader(mut reader: impl Read, options: &ConversionOptions) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    convert_bytes(&bytes, options)
}

/// Convert a chat transcript with [`ConversionOptions::transcript`].
///
/// # Errors
///
/// See [`convert`].
pub fn convert_transcript(html: &str) -> Result<String> {
    convert(html, &ConversionOptions::transcript())
}
