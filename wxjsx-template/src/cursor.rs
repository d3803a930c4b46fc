use std::iter::Peekable;
use std::vec::IntoIter;

use crate::attrs::{ELIF, ELSE};
use crate::template_ast::Node;

/// Forward-only walk over one sibling list, with the one-node lookahead the
/// conditional chain needs.
pub struct Cursor {
    nodes: Peekable<IntoIter<Node>>,
}

impl Cursor {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes: nodes.into_iter().peekable(),
        }
    }

    /// True iff the next sibling carries `wx:elif` or `wx:else`.
    pub fn peek_continues_chain(&mut self) -> bool {
        self.nodes.peek().is_some_and(continues_chain)
    }

    /// Advances only when the next sibling continues a conditional chain.
    pub fn next_if_continues_chain(&mut self) -> Option<Node> {
        self.nodes.next_if(continues_chain)
    }
}

impl Iterator for Cursor {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        self.nodes.next()
    }
}

fn continues_chain(node: &Node) -> bool {
    match node {
        Node::Element(el) => el.has_attr(ELIF) || el.has_attr(ELSE),
        Node::Text { .. } | Node::Other => false,
    }
}
