//! `tl` front end.
//!
//! `tl` tokenizes without the HTML tree-construction rules, which makes it
//! several times faster than html5ever on large inputs. Raw text is not
//! entity-decoded by `tl`, so text and attribute values are decoded here.
//!
//! Without tree construction, implied end tags are never inserted: an
//! unclosed `<li>` swallows the next one. [`has_misnesting`] detects the
//! shapes that only arise that way so the caller can repair with html5ever.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Document, NodeId, NodeRef};
use crate::error::Result;

/// Processing instructions and `<!...>` declarations other than comments.
/// html5ever reads these as bogus comments that end at the first `>`.
static DECLARATIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(?:\?|![^-])[^>]*>").expect("valid declaration regex"));

pub(super) fn parse(html: &str) -> Result<Document> {
    let html = strip_declarations(html);
    let dom = tl::parse(&html, tl::ParserOptions::default())?;
    let parser = dom.parser();

    let mut doc = Document::new();
    let root = doc.root();

    let mut stack: Vec<(tl::NodeHandle, NodeId)> = dom.children().iter().rev().map(|handle| (*handle, root)).collect();

    while let Some((handle, parent)) = stack.pop() {
        let Some(node) = handle.get(parser) else { continue };
        match node {
            tl::Node::Tag(tag) => {
                let name = tag.name().as_utf8_str().to_ascii_lowercase();
                let id = doc.append_element(parent, name, collect_attributes(tag));
                let children: Vec<tl::NodeHandle> = tag.children().top().iter().copied().collect();
                stack.extend(children.into_iter().rev().map(|child| (child, id)));
            }
            tl::Node::Raw(bytes) => {
                let raw = bytes.as_utf8_str();
                let parent_ref = doc.node(parent);
                // A newline directly after `<pre>` is not content.
                let text = if parent_ref.is("pre") && parent_ref.child_ids().is_empty() {
                    raw.strip_prefix('\n').unwrap_or(&raw)
                } else {
                    raw.as_ref()
                };
                if !text.is_empty() {
                    doc.append_text(parent, &html_escape::decode_html_entities(text));
                }
            }
            tl::Node::Comment(_) => {}
        }
    }

    Ok(doc)
}

fn strip_declarations(html: &str) -> Cow<'_, str> {
    if html.contains("<?") || html.contains("<!") {
        DECLARATIONS.replace_all(html, "")
    } else {
        Cow::Borrowed(html)
    }
}

fn collect_attributes(tag: &tl::HTMLTag<'_>) -> Vec<(String, String)> {
    let mut attributes: Vec<(String, String)> = tag
        .attributes()
        .iter()
        .map(|(key, value)| {
            let value = value.map(|v| html_escape::decode_html_entities(&v).into_owned());
            (key.to_ascii_lowercase(), value.unwrap_or_default())
        })
        .collect();

    // `id` and `class` live in dedicated slots on some `tl` versions.
    for name in ["id", "class"] {
        if attributes.iter().any(|(key, _)| key == name) {
            continue;
        }
        if let Some(value) = tag.attributes().get(name).flatten() {
            let value = html_escape::decode_html_entities(&value.as_utf8_str()).into_owned();
            attributes.push((name.to_string(), value));
        }
    }

    attributes
}

/// Elements whose end tag is implied by an opening tag of the same name.
fn closes_itself(name: &str) -> bool {
    matches!(name, "li" | "p" | "dt" | "dd" | "tr" | "td" | "th" | "option")
}

fn is_inline_element(name: &str) -> bool {
    matches!(
        name,
        "abbr"
            | "b"
            | "bdi"
            | "bdo"
            | "cite"
            | "code"
            | "dfn"
            | "em"
            | "i"
            | "kbd"
            | "label"
            | "mark"
            | "q"
            | "s"
            | "samp"
            | "small"
            | "span"
            | "strong"
            | "sub"
            | "sup"
            | "time"
            | "u"
            | "var"
    )
}

fn is_block_element(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "dd"
            | "div"
            | "dl"
            | "dt"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "ul"
    )
}

fn inside_preformatted(node: NodeRef<'_>) -> bool {
    node.ancestors().any(|ancestor| ancestor.is("pre") || ancestor.is("code"))
}

/// True when the tree has a shape a browser would never build: an element
/// nested directly in one that its own start tag closes (`<li>` in `<li>`,
/// `<p>` in `<p>`), or a block element under an inline one. Content of
/// `<pre>` and `<code>` is not checked.
#[must_use]
pub(super) fn has_misnesting(doc: &Document) -> bool {
    doc.node(doc.root()).descendants().any(|node| {
        let Some(name) = node.name() else { return false };
        let same_as_parent = closes_itself(name) && node.parent_name() == Some(name);
        let block_in_inline = is_block_element(name)
            && node
                .ancestors()
                .any(|ancestor| ancestor.name().is_some_and(is_inline_element));
        (same_as_parent || block_in_inline) && !inside_preformatted(node)
    })
}
