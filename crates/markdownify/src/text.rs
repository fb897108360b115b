//! Text node normalization: whitespace collapsing, Markdown escaping and
//! trimming by structural position.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::NodeRef;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t ]+").expect("valid whitespace regex"));

/// Collapse runs of tabs and spaces into one space. Newlines are kept.
#[must_use]
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE_RE.replace_all(text, " ")
}

/// Backslash-escape `_` and `*`.
#[must_use]
pub fn escape_markdown(text: &str) -> Cow<'_, str> {
    if !text.contains(['_', '*']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if matches!(ch, '_' | '*') {
            out.push('\\');
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

/// Split text into (leading space, trailing space, trimmed core).
///
/// Only a literal space counts as a boundary to keep; the core is trimmed of
/// all whitespace.
#[must_use]
pub fn chomp(text: &str) -> (&'static str, &'static str, &str) {
    let prefix = if text.starts_with(' ') { " " } else { "" };
    let suffix = if text.ends_with(' ') { " " } else { "" };
    (prefix, suffix, text.trim())
}

/// Normalize one text node according to where it sits in the tree.
///
/// * Outside `<pre>` (and outside `<code>` directly in `<pre>`), runs of
///   tabs and spaces collapse when `clean_whitespaces` is set.
/// * Outside `<pre>` and `<code>`, `_` and `*` are escaped.
/// * The last text of an `<li>`, or text right before a nested list, loses
///   trailing whitespace.
#[must_use]
pub fn process_text<'a>(node: NodeRef<'a>, clean_whitespaces: bool) -> Cow<'a, str> {
    let text = node.text().unwrap_or("");
    let Some(parent) = node.parent() else {
        return Cow::Borrowed(text);
    };
    let name = parent.name().unwrap_or("");
    let is_pre = name == "pre";
    let is_code = name == "code";

    let mut out = Cow::Borrowed(text);

    if clean_whitespaces && !(is_pre || (is_code && parent.parent_name() == Some("pre"))) {
        let collapsed = match collapse_whitespace(&out) {
            Cow::Owned(collapsed) => Some(collapsed),
            Cow::Borrowed(_) => None,
        };
        if let Some(collapsed) = collapsed {
            out = Cow::Owned(collapsed);
        }
    }

    if !is_pre && !is_code {
        let escaped = match escape_markdown(&out) {
            Cow::Owned(escaped) => Some(escaped),
            Cow::Borrowed(_) => None,
        };
        if let Some(escaped) = escaped {
            out = Cow::Owned(escaped);
        }
    }

    if name == "li" && node.next_sibling().is_none_or(|next| next.is("ul") || next.is("ol")) {
        out = match out {
            Cow::Borrowed(borrowed) => Cow::Borrowed(borrowed.trim_end()),
            Cow::Owned(mut owned) => {
                owned.truncate(owned.trim_end().len());
                Cow::Owned(owned)
            }
        };
    }

    out
}
