//! Arena-backed document tree handed to the renderer.
//!
//! Both parsing front ends copy their output into a [`Document`]. Nodes are
//! owned by the arena in a flat `Vec`; parent and sibling links are plain
//! indices, so there are no reference cycles and lookups are O(1).

mod fast;
mod rcdom;

use crate::error::Result;
use crate::options::ParserMode;

/// Index of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// An element: lowercase tag name plus attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub name: String,
    /// Attributes in source order. Names are lowercase.
    pub attributes: Vec<(String, String)>,
}

impl Element {
    /// Look up an attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The synthetic root.
    Document,
    /// An element node.
    Element(Element),
    /// A text node.
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                prev_sibling: None,
                next_sibling: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node handle.
    #[must_use]
    pub const fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    /// Append a new element under `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        attributes: Vec<(String, String)>,
    ) -> NodeId {
        self.push(
            parent,
            NodeKind::Element(Element {
                name: name.into(),
                attributes,
            }),
        )
    }

    /// Append text under `parent`, merging into a directly preceding text node.
    ///
    /// Front ends drop comments, which can leave two text runs adjacent.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        if let Some(&last) = self.nodes[parent.index()].children.last() {
            if let NodeKind::Text(existing) = &mut self.nodes[last.index()].kind {
                existing.push_str(text);
                return last;
            }
        }
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        let prev_sibling = self.nodes[parent.index()].children.last().copied();
        if let Some(prev) = prev_sibling {
            self.nodes[prev.index()].next_sibling = Some(id);
        }
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            prev_sibling,
            next_sibling: None,
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Remove a node from its parent, relinking its former siblings.
    ///
    /// The node stays allocated but is no longer reachable from the root.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let data = &self.nodes[id.index()];
            (data.parent, data.prev_sibling, data.next_sibling)
        };
        if let Some(prev) = prev {
            self.nodes[prev.index()].next_sibling = next;
        }
        if let Some(next) = next {
            self.nodes[next.index()].prev_sibling = prev;
        }
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.retain(|child| *child != id);
        }
        let data = &mut self.nodes[id.index()];
        data.parent = None;
        data.prev_sibling = None;
        data.next_sibling = None;
    }
}

/// A cheap, copyable view of one node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a NodeData {
        &self.doc.nodes[self.id.index()]
    }

    /// Arena index of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Node payload.
    #[must_use]
    pub fn kind(&self) -> &'a NodeKind {
        &self.data().kind
    }

    /// Element payload, if this is an element.
    #[must_use]
    pub fn element(&self) -> Option<&'a Element> {
        match self.kind() {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Tag name of an element; `None` for text and the root.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.element().map(|element| element.name.as_str())
    }

    /// True when this is an element with the given tag name.
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.name() == Some(tag)
    }

    /// Text content of a text node.
    #[must_use]
    pub fn text(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Attribute value, `None` when absent or when this is not an element.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element().and_then(|element| element.attr(name))
    }

    /// Attribute value with an empty-string default.
    #[must_use]
    pub fn attr_or_empty(&self, name: &str) -> &'a str {
        self.attr(name).unwrap_or("")
    }

    /// Parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| self.doc.node(id))
    }

    /// Tag name of the parent element.
    #[must_use]
    pub fn parent_name(&self) -> Option<&'a str> {
        self.parent().and_then(|parent| parent.name())
    }

    /// Previous sibling of any kind.
    #[must_use]
    pub fn previous_sibling(&self) -> Option<Self> {
        self.data().prev_sibling.map(|id| self.doc.node(id))
    }

    /// Next sibling of any kind.
    #[must_use]
    pub fn next_sibling(&self) -> Option<Self> {
        self.data().next_sibling.map(|id| self.doc.node(id))
    }

    /// Child ids in document order.
    #[must_use]
    pub fn child_ids(&self) -> &'a [NodeId] {
        &self.data().children
    }

    /// Children in document order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.data().children.iter().map(move |id| doc.node(*id))
    }

    /// Position of this node among its parent's children.
    #[must_use]
    pub fn index_in_parent(&self) -> Option<usize> {
        let parent = self.parent()?;
        parent.child_ids().iter().position(|id| *id == self.id)
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        std::iter::successors(self.parent(), NodeRef::parent)
    }

    /// All descendants in document order, excluding this node.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.child_ids().to_vec();
        stack.reverse();
        Descendants { doc: self.doc, stack }
    }
}

/// Pre-order iterator over a subtree, driven by an explicit stack.
#[derive(Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.doc.node(id);
        self.stack.extend(node.child_ids().iter().rev().copied());
        Some(node)
    }
}

/// Parse markup into a [`Document`] with the selected front end.
///
/// Comments, doctypes and processing instructions never reach the tree.
/// The fast front end hands markup it cannot nest the way a browser would
/// (an unclosed `<li>` or `<p>`, a block inside an inline element) to
/// html5ever.
///
/// # Errors
///
/// Returns [`crate::ConversionError::FrontEnd`] when the front end rejects the input.
pub fn parse(html: &str, mode: ParserMode) -> Result<Document> {
    match mode {
        ParserMode::Html5ever => rcdom::parse(html),
        ParserMode::Fast => match fast::parse(html) {
            Ok(doc) if !fast::has_misnesting(&doc) => Ok(doc),
            Ok(_) => {
                log::debug!("misnested markup, repairing with html5ever");
                rcdom::parse(html)
            }
            Err(err) => {
                log::debug!("tl rejected input ({err}), retrying with html5ever");
                rcdom::parse(html)
            }
        },
    }
}
