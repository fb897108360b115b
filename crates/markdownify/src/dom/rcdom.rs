//! html5ever front end.
//!
//! html5ever implements the WHATWG tree-construction algorithm, so it never
//! rejects input: misnested and unclosed tags are repaired the way browsers
//! repair them. The resulting `RcDom` is copied into the arena.

use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::{Document, NodeId};
use crate::error::{ConversionError, Result};

pub(super) fn parse(html: &str) -> Result<Document> {
    let dom = html5ever::parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|err| ConversionError::FrontEnd(err.to_string()))?;

    let mut doc = Document::new();
    let root = doc.root();

    // Explicit stack: nesting depth is unbounded by input.
    let mut stack: Vec<(Handle, NodeId)> = dom
        .document
        .children
        .borrow()
        .iter()
        .rev()
        .map(|child| (child.clone(), root))
        .collect();

    while let Some((handle, parent)) = stack.pop() {
        match &handle.data {
            NodeData::Element { name, attrs, .. } => {
                let attributes = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (lowercase(&attr.name.local), attr.value.to_string()))
                    .collect();
                let id = doc.append_element(parent, lowercase(&name.local), attributes);
                for child in handle.children.borrow().iter().rev() {
                    stack.push((child.clone(), id));
                }
            }
            NodeData::Text { contents } => {
                doc.append_text(parent, &contents.borrow());
            }
            NodeData::Document => {
                for child in handle.children.borrow().iter().rev() {
                    stack.push((child.clone(), parent));
                }
            }
            NodeData::Doctype { .. } | NodeData::Comment { .. } | NodeData::ProcessingInstruction { .. } => {}
        }
    }

    Ok(doc)
}

fn lowercase(name: &str) -> String {
    name.to_ascii_lowercase()
}
