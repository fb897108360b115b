//! Main conversion pipeline for HTML to Markdown.
//!
//! Rendering is a single bottom-up pass: every element's children are
//! rendered and concatenated first, then the element's converter (if any)
//! turns that text into Markdown. Converters only read the tree.

use std::cell::Cell;

use crate::converter::registry;
use crate::dom::{Document, NodeId, NodeKind, NodeRef};
use crate::options::RenderOptions;
use crate::text::process_text;

/// Elements that take part in list/table nesting. Whitespace-only text
/// between them is noise and gets pruned before rendering.
const STRUCTURAL_TAGS: [&str; 10] = ["ol", "ul", "li", "table", "thead", "tbody", "tfoot", "tr", "td", "th"];

fn is_structural(name: Option<&str>) -> bool {
    name.is_some_and(|name| STRUCTURAL_TAGS.contains(&name))
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn is_cell(name: &str) -> bool {
    matches!(name, "td" | "th")
}

/// Remove whitespace-only text children of structural elements when both
/// neighbours are absent or structural.
///
/// Siblings are read live, so a removal is visible to the next check.
pub fn prune_structural_whitespace(doc: &mut Document) {
    let root = doc.root();
    let containers: Vec<NodeId> = doc
        .node(root)
        .descendants()
        .filter(|node| is_structural(node.name()))
        .map(|node| node.id())
        .collect();

    for container in containers {
        let children: Vec<NodeId> = doc.node(container).child_ids().to_vec();
        for child in children {
            let node = doc.node(child);
            let Some(text) = node.text() else { continue };
            if !text.chars().all(char::is_whitespace) {
                continue;
            }
            let prev_ok = node.previous_sibling().is_none_or(|prev| is_structural(prev.name()));
            let next_ok = node.next_sibling().is_none_or(|next| is_structural(next.name()));
            if prev_ok && next_ok {
                doc.detach(child);
            }
        }
    }
}

/// Render a pruned document. The root's own converter is never applied.
#[must_use]
pub fn render_tree(doc: &Document, options: &RenderOptions) -> String {
    let renderer = Renderer {
        options,
        depth_exceeded: Cell::new(false),
    };
    renderer.process_tag(doc.node(doc.root()), false, true, 0)
}

/// Prune and render in one call.
pub fn render(doc: &mut Document, options: &RenderOptions) -> String {
    prune_structural_whitespace(doc);
    render_tree(doc, options)
}

struct Renderer<'o> {
    options: &'o RenderOptions,
    depth_exceeded: Cell<bool>,
}

impl Renderer<'_> {
    fn process_tag(&self, node: NodeRef<'_>, as_inline: bool, children_only: bool, depth: usize) -> String {
        let name = node.name().unwrap_or("");
        // Headings and cells cannot hold block constructs.
        let convert_children_as_inline = as_inline || (!children_only && (is_heading(name) || is_cell(name)));

        let mut text = String::new();
        for child in node.children() {
            match child.kind() {
                NodeKind::Text(_) => text.push_str(&process_text(child, self.options.clean_whitespaces)),
                NodeKind::Element(_) => {
                    if depth >= self.options.max_depth {
                        self.warn_depth(depth);
                        continue;
                    }
                    text.push_str(&self.process_tag(child, convert_children_as_inline, false, depth + 1));
                }
                NodeKind::Document => {}
            }
        }

        if children_only {
            return text;
        }
        match registry::lookup(name) {
            Some(convert) => convert(node, &text, as_inline),
            None => text,
        }
    }

    fn warn_depth(&self, depth: usize) {
        if !self.depth_exceeded.replace(true) {
            log::warn!("nesting deeper than {depth} levels, dropping the remaining subtree");
        }
    }
}
