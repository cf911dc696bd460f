//! Tree construction from the token stream.
//!
//! A simple open-element stack: unknown end tags are dropped, unclosed
//! elements are closed at end of input, and void elements never take
//! children. Implied end tags are not inserted (a `<li>` does not close a
//! preceding `<li>`), so documents are expected to close the elements they
//! open. There is deliberately no error surface; any input yields a tree.

use super::lexer::{tokenize, Token};
use super::tree::{Attr, Document, Node, NodeId};

/// Elements that never have content and take no end tag.
pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

pub fn parse_document(input: &str) -> Document {
    let mut next_id: u32 = 1;
    let mut doctype = None;
    let children = build(tokenize(input), &mut next_id, &mut doctype);
    Document::from_parts(children, doctype, next_id)
}

/// Parse a markup fragment, allocating node ids from `next_id`. Used both
/// for document parsing and for replacing an element's content in place.
pub fn parse_fragment(input: &str, next_id: &mut u32) -> Vec<Node> {
    build(tokenize(input), next_id, &mut None)
}

struct OpenElement {
    id: NodeId,
    name: String,
    attrs: Vec<Attr>,
    children: Vec<Node>,
}

fn build(tokens: Vec<Token>, next_id: &mut u32, doctype: &mut Option<String>) -> Vec<Node> {
    let mut roots: Vec<Node> = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();

    fn alloc(counter: &mut u32) -> NodeId {
        let id = NodeId::new(*counter);
        *counter += 1;
        id
    }

    fn attach(roots: &mut Vec<Node>, stack: &mut [OpenElement], node: Node) {
        match stack.last_mut() {
            Some(open) => open.children.push(node),
            None => roots.push(node),
        }
    }

    for token in tokens {
        match token {
            Token::Doctype(value) => {
                if doctype.is_none() {
                    *doctype = Some(value);
                }
            }
            Token::Text(text) => {
                let node = Node::Text {
                    id: alloc(next_id),
                    text,
                };
                attach(&mut roots, &mut stack, node);
            }
            Token::Comment(text) => {
                let node = Node::Comment {
                    id: alloc(next_id),
                    text,
                };
                attach(&mut roots, &mut stack, node);
            }
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => {
                if self_closing || is_void_element(&name) {
                    let node = Node::Element {
                        id: alloc(next_id),
                        name,
                        attrs,
                        children: Vec::new(),
                    };
                    attach(&mut roots, &mut stack, node);
                } else {
                    stack.push(OpenElement {
                        id: alloc(next_id),
                        name,
                        attrs,
                        children: Vec::new(),
                    });
                }
            }
            Token::EndTag(name) => {
                match stack.iter().rposition(|open| open.name == name) {
                    Some(index) => {
                        // implicitly close anything opened after the match
                        while stack.len() > index {
                            let open = match stack.pop() {
                                Some(open) => open,
                                None => break,
                            };
                            let node = Node::Element {
                                id: open.id,
                                name: open.name,
                                attrs: open.attrs,
                                children: open.children,
                            };
                            attach(&mut roots, &mut stack, node);
                        }
                    }
                    None => {
                        log::trace!(target: "localizer.dom", "dropping unmatched </{name}>");
                    }
                }
            }
        }
    }

    while let Some(open) = stack.pop() {
        let node = Node::Element {
            id: open.id,
            name: open.name,
            attrs: open.attrs,
            children: open.children,
        };
        attach(&mut roots, &mut stack, node);
    }

    roots
}
