//! Owned document tree with stable node handles.
//!
//! Nodes are stored by value inside their parent; the outside world holds
//! [`NodeId`] handles and goes through [`Document`] for every read or write.
//! Handles stay valid across content replacement of *other* nodes and go
//! stale only when the node they point at is removed from the tree, which
//! callers can detect because every accessor answers `Option` or `bool`.

use super::entities::{escape_attr, escape_text};
use super::parser::{is_void_element, parse_document, parse_fragment};

/// Stable handle to a node of a [`Document`].
///
/// Ids are assigned in document order during parsing and never reused by
/// the document that allocated them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(raw: u32) -> NodeId {
        NodeId(raw)
    }
}

/// A single element attribute. Names are lowercased by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: String, value: String) -> Attr {
        Attr { name, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        id: NodeId,
        name: String,
        attrs: Vec<Attr>,
        children: Vec<Node>,
    },
    Text {
        id: NodeId,
        text: String,
    },
    Comment {
        id: NodeId,
        text: String,
    },
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Element { id, .. } | Node::Text { id, .. } | Node::Comment { id, .. } => *id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    children: Vec<Node>,
    doctype: Option<String>,
    next_id: u32,
}

impl Document {
    /// Parse markup into a document. Never fails; malformed input degrades
    /// per the lexer and builder rules.
    pub fn parse(input: &str) -> Document {
        parse_document(input)
    }

    pub(crate) fn from_parts(children: Vec<Node>, doctype: Option<String>, next_id: u32) -> Document {
        Document {
            children,
            doctype,
            next_id,
        }
    }

    pub fn root_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// First element in document order whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut found = None;
        self.for_each_element(&mut |node_id, _, attrs| {
            if found.is_none() && attr_value(attrs, "id") == Some(id) {
                found = Some(node_id);
            }
        });
        found
    }

    /// All elements carrying `class` in their space-separated class list,
    /// in document order.
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.for_each_element(&mut |node_id, _, attrs| {
            let classes = attr_value(attrs, "class").unwrap_or("");
            if classes.split_whitespace().any(|candidate| candidate == class) {
                found.push(node_id);
            }
        });
        found
    }

    /// All elements with the given tag name (matched case-insensitively),
    /// in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.for_each_element(&mut |node_id, name, _| {
            if name.eq_ignore_ascii_case(tag) {
                found.push(node_id);
            }
        });
        found
    }

    /// All elements whose concatenated descendant text contains `needle`.
    /// An element containing a matching child is itself a match.
    pub fn elements_containing_text(&self, needle: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        for_each_element_node(&self.children, &mut |node| {
            let mut text = String::new();
            collect_text(node.children(), &mut text);
            if text.contains(needle) {
                found.push(node.id());
            }
        });
        found
    }

    pub fn contains(&self, id: NodeId) -> bool {
        find_node(&self.children, id).is_some()
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match find_node(&self.children, id)? {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match find_node(&self.children, id)? {
            Node::Element { attrs, .. } => attr_value(attrs, name),
            _ => None,
        }
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        find_node(&self.children, id).map_or(0, |node| node.children().len())
    }

    /// The text of the node's single child, provided that child is a text
    /// node and the only child. This is the shape content replacement can
    /// faithfully restore, so reference resolution insists on it.
    pub fn sole_text_child(&self, id: NodeId) -> Option<&str> {
        match find_node(&self.children, id)?.children() {
            [Node::Text { text, .. }] => Some(text),
            _ => None,
        }
    }

    /// Concatenated descendant text of the node, in document order.
    pub fn text_content(&self, id: NodeId) -> Option<String> {
        let node = find_node(&self.children, id)?;
        let mut out = String::new();
        match node {
            Node::Text { text, .. } => out.push_str(text),
            _ => collect_text(node.children(), &mut out),
        }
        Some(out)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Set (or add) an attribute on an element. Returns `false` when the
    /// handle no longer resolves to an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        match find_node_mut(&mut self.children, id) {
            Some(Node::Element { attrs, .. }) => {
                set_attr_value(attrs, name, value);
                true
            }
            _ => false,
        }
    }

    /// Replace an element's content with freshly parsed markup. Children
    /// of the old content become stale; the element's own handle survives.
    pub fn set_markup(&mut self, id: NodeId, markup: &str) -> bool {
        let fragment = parse_fragment(markup, &mut self.next_id);
        match find_node_mut(&mut self.children, id) {
            Some(node) => match node.children_mut() {
                Some(children) => {
                    *children = fragment;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Merge `direction: <direction>` into the element's inline style,
    /// replacing any previous direction declaration.
    pub fn set_inline_direction(&mut self, id: NodeId, direction: &str) -> bool {
        match find_node_mut(&mut self.children, id) {
            Some(Node::Element { attrs, .. }) => {
                let merged = merge_style_direction(attr_value(attrs, "style").unwrap_or(""), direction);
                set_attr_value(attrs, "style", &merged);
                true
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype);
            out.push('>');
        }
        for child in &self.children {
            serialize_node(child, &mut out);
        }
        out
    }

    /// Serialized content of an element, excluding the element itself.
    pub fn inner_html(&self, id: NodeId) -> Option<String> {
        let node = find_node(&self.children, id)?;
        let mut out = String::new();
        let raw = matches!(node, Node::Element { name, .. } if is_rawtext_element(name));
        for child in node.children() {
            if raw {
                serialize_raw(child, &mut out);
            } else {
                serialize_node(child, &mut out);
            }
        }
        Some(out)
    }

    fn for_each_element(&self, visit: &mut dyn FnMut(NodeId, &str, &[Attr])) {
        for_each_element_node(&self.children, &mut |node| {
            if let Node::Element { id, name, attrs, .. } = node {
                visit(*id, name, attrs);
            }
        });
    }
}

fn attr_value<'a>(attrs: &'a [Attr], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|attr| attr.name.eq_ignore_ascii_case(name))
        .map(|attr| attr.value.as_str())
}

fn set_attr_value(attrs: &mut Vec<Attr>, name: &str, value: &str) {
    match attrs.iter_mut().find(|attr| attr.name.eq_ignore_ascii_case(name)) {
        Some(attr) => attr.value = value.to_string(),
        None => attrs.push(Attr::new(name.to_ascii_lowercase(), value.to_string())),
    }
}

fn merge_style_direction(style: &str, direction: &str) -> String {
    let mut declarations: Vec<String> = style
        .split(';')
        .map(str::trim)
        .filter(|declaration| !declaration.is_empty())
        .filter(|declaration| {
            declaration
                .split(':')
                .next()
                .map_or(true, |property| !property.trim().eq_ignore_ascii_case("direction"))
        })
        .map(str::to_string)
        .collect();
    declarations.push(format!("direction: {direction}"));
    declarations.join("; ")
}

fn find_node(nodes: &[Node], id: NodeId) -> Option<&Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_node(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn find_node_mut(nodes: &mut [Node], id: NodeId) -> Option<&mut Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(children) = node.children_mut() {
            if let Some(found) = find_node_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn for_each_element_node<'a>(nodes: &'a [Node], visit: &mut dyn FnMut(&'a Node)) {
    for node in nodes {
        if let Node::Element { children, .. } = node {
            visit(node);
            for_each_element_node(children, visit);
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text { text, .. } => out.push_str(text),
            Node::Element { children, .. } => collect_text(children, out),
            Node::Comment { .. } => {}
        }
    }
}

fn is_rawtext_element(name: &str) -> bool {
    matches!(name, "script" | "style")
}

fn serialize_node(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => out.push_str(&escape_text(text)),
        Node::Comment { text, .. } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::Element {
            name,
            attrs,
            children,
            ..
        } => {
            out.push('<');
            out.push_str(name);
            for attr in attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&escape_attr(&attr.value));
                out.push('"');
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            let raw = is_rawtext_element(name);
            for child in children {
                if raw {
                    serialize_raw(child, out);
                } else {
                    serialize_node(child, out);
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

fn serialize_raw(node: &Node, out: &mut String) {
    if let Node::Text { text, .. } = node {
        out.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_handles_stable_across_content_replacement() {
        let mut document = Document::parse("<p id=\"a\">old</p><p id=\"b\">other</p>");
        let a = document.element_by_id("a").unwrap();
        let b = document.element_by_id("b").unwrap();

        assert!(document.set_markup(a, "new <b>bold</b>"));

        assert_eq!(document.text_content(a).as_deref(), Some("new bold"));
        assert_eq!(document.text_content(b).as_deref(), Some("other"));
        assert_eq!(document.element_by_id("b"), Some(b));
    }

    #[test]
    fn should_report_stale_handles() {
        let mut document = Document::parse("<div id=\"outer\"><span id=\"inner\">x</span></div>");
        let inner = document.element_by_id("inner").unwrap();
        let outer = document.element_by_id("outer").unwrap();

        assert!(document.set_markup(outer, "gone"));

        assert!(!document.contains(inner));
        assert!(!document.set_attribute(inner, "title", "t"));
        assert_eq!(document.text_content(inner), None);
    }

    #[test]
    fn should_merge_direction_into_existing_style() {
        let mut document = Document::parse("<p id=\"x\" style=\"color: red; direction: ltr\">hi</p>");
        let x = document.element_by_id("x").unwrap();

        assert!(document.set_inline_direction(x, "rtl"));

        assert_eq!(
            document.attribute(x, "style"),
            Some("color: red; direction: rtl")
        );
    }

    #[test]
    fn should_match_classes_exactly_within_the_class_list() {
        let document = Document::parse(
            "<p class=\"localized\">a</p><p class=\"localized wide\">b</p><p class=\"localized-not\">c</p>",
        );
        assert_eq!(document.elements_by_class("localized").len(), 2);
    }

    #[test]
    fn should_find_elements_containing_text() {
        let document = Document::parse("<div><p id=\"x\">some text</p></div>");
        let matches = document.elements_containing_text("some text");
        // both the paragraph and its ancestor contain the text
        assert_eq!(matches.len(), 2);
        let x = document.element_by_id("x").unwrap();
        assert!(matches.contains(&x));
        assert_eq!(document.sole_text_child(x), Some("some text"));
    }

    #[test]
    fn should_serialize_with_escaping_and_void_elements() {
        let html = "<p title=\"a &quot;b&quot;\">x &amp; y<br>z</p>";
        assert_eq!(Document::parse(html).to_html(), html);
    }
}
