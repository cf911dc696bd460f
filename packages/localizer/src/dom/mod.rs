//! In-memory HTML document substrate.
//!
//! The localization engine never touches a live browser; it works on this
//! owned tree instead. [`Document::parse`] accepts any input (the lexer and
//! builder are tolerant by design), queries answer in document order, and
//! mutations go through [`NodeId`] handles so references survive unrelated
//! edits.

mod entities;
mod lexer;
mod parser;
mod tree;

pub use tree::{Attr, Document, Node, NodeId};
