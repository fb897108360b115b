//! Block converters: fences, headings, quotes, rules, paragraphs.

use crate::dom::NodeRef;

/// Fence delimiter emitted around `<pre>` content.
pub const FENCE: &str = "```";

/// Language hint of a `<pre>`: the first token of its `class` attribute.
fn code_language<'a>(el: &NodeRef<'a>) -> &'a str {
    el.attr("class")
        .and_then(|class| class.split_whitespace().next())
        .unwrap_or("")
}

pub(crate) fn convert_pre(el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let language = code_language(&el);
    format!("\n{FENCE}{language}\n{text}\n{FENCE}\n")
}

fn setext_heading(text: &str, underline: char) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    let width = text.chars().count();
    let rule: String = std::iter::repeat_n(underline, width).collect();
    format!("{text}\n{rule}\n")
}

fn atx_heading(level: usize, text: &str, as_inline: bool) -> String {
    if as_inline {
        return text.to_string();
    }
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    format!("{} {text}\n", "#".repeat(level))
}

pub(crate) fn convert_h1(_el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    setext_heading(text, '=')
}

pub(crate) fn convert_h2(_el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    setext_heading(text, '-')
}

pub(crate) fn convert_h3(_el: NodeRef<'_>, text: &str, as_inline: bool) -> String {
    atx_heading(3, text, as_inline)
}

pub(crate) fn convert_h4(_el: NodeRef<'_>, text: &str, as_inline: bool) -> String {
    atx_heading(4, text, as_inline)
}

pub(crate) fn convert_h5(_el: NodeRef<'_>, text: &str, as_inline: bool) -> String {
    atx_heading(5, text, as_inline)
}

pub(crate) fn convert_h6(_el: NodeRef<'_>, text: &str, as_inline: bool) -> String {
    atx_heading(6, text, as_inline)
}

pub(crate) fn convert_blockquote(_el: NodeRef<'_>, text: &str, as_inline: bool) -> String {
    if as_inline || text.is_empty() {
        return text.to_string();
    }
    let quoted: Vec<String> = text.trim().split('\n').map(|line| format!("> {line}")).collect();
    format!("\n{}\n", quoted.join("\n"))
}

pub(crate) fn convert_hr(_el: NodeRef<'_>, _text: &str, _as_inline: bool) -> String {
    "\n\n---\n\n".to_string()
}

pub(crate) fn convert_p(_el: NodeRef<'_>, text: &str, as_inline: bool) -> String {
    if as_inline { text.to_string() } else { format!("{text}\n") }
}
