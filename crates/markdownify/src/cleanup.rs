//! Code block cleanup for chat-transcript HTML.
//!
//! Transcripts scraped from chat UIs wrap every code block in decorative
//! markup: a language label and a "Copy code" button injected before the
//! code. This module scans for code blocks, strips leftover inline tags and
//! moves the language label onto the block opener.
//!
//! The same scan runs over two syntaxes: rendered Markdown fences, and raw
//! `<pre>` markup before parsing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::converter::FENCE;

/// Lowercase tags of three or more letters, opening or closing.
static REMOVE_HTML_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[a-z]{3,}[^>]*>").expect("valid tag regex"));

/// Copy-button signature: optional `class="lang"`, optional `>`, optional
/// inline language token, then one or more "copy code".
static CHECK_COPY_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^\s*(?:class="(\S{0,10})")?>?(\S{0,10})(?:copy\s*code)+"#).expect("valid copy-code regex")
});

/// Delimiters and opener rewriting for one code block syntax.
struct FenceSyntax {
    open: &'static str,
    close: &'static str,
    /// Whether the opener extends to the end of its line (Markdown info string).
    open_line: bool,
    rewrite_open: fn(&str) -> String,
}

const MARKDOWN: FenceSyntax = FenceSyntax {
    open: FENCE,
    close: FENCE,
    open_line: true,
    rewrite_open: markdown_opener,
};

const HTML_PRE: FenceSyntax = FenceSyntax {
    open: "<pre",
    close: "</pre>",
    open_line: false,
    rewrite_open: pre_opener,
};

fn markdown_opener(language: &str) -> String {
    format!("{FENCE}{language}")
}

fn pre_opener(language: &str) -> String {
    format!(r#"<pre class="{language}">"#)
}

/// Effective language of a copy-button signature: the inline token wins
/// over the class value.
fn signature_language<'t>(captures: &regex::Captures<'t>) -> &'t str {
    [captures.get(2), captures.get(1)]
        .into_iter()
        .flatten()
        .map(|m| m.as_str())
        .find(|language| !language.is_empty())
        .unwrap_or("")
}

fn cleanup_blocks(text: &str, syntax: &FenceSyntax) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open_start) = rest.find(syntax.open) {
        let after_token = open_start + syntax.open.len();
        let body_start = if syntax.open_line {
            match rest[after_token..].find('\n') {
                Some(eol) => after_token + eol + 1,
                None => break,
            }
        } else {
            after_token
        };
        let Some(close_offset) = rest[body_start..].find(syntax.close) else {
            break;
        };
        let body_end = body_start + close_offset;

        let opener = &rest[open_start..body_start];
        let body = REMOVE_HTML_TAGS.replace_all(&rest[body_start..body_end], "");

        out.push_str(&rest[..open_start]);
        if let Some(captures) = CHECK_COPY_CODE.captures(&body) {
            let language = signature_language(&captures);
            let mut code = &body[captures.get(0).map_or(0, |m| m.end())..];
            log::trace!("rewriting code block opener with language {language:?}");
            out.push_str(&(syntax.rewrite_open)(language));
            if syntax.open_line {
                out.push('\n');
                // The signature line's own break belongs to the removed label.
                code = code.strip_prefix('\n').unwrap_or(code);
            }
            out.push_str(code);
        } else {
            out.push_str(opener);
            out.push_str(&body);
        }
        out.push_str(syntax.close);
        rest = &rest[body_end + syntax.close.len()..];
    }

    out.push_str(rest);
    out
}

/// Clean fenced code blocks in rendered Markdown.
///
/// Unterminated fences leave the remainder of the text untouched.
#[must_use]
pub fn cleanup_code_fences(markdown: &str) -> String {
    cleanup_blocks(markdown, &MARKDOWN)
}

/// Clean `<pre>` blocks in raw markup before it is parsed, moving a detected
/// language into the `class` attribute.
#[must_use]
pub fn cleanup_code_markup(html: &str) -> String {
    cleanup_blocks(html, &HTML_PRE)
}
