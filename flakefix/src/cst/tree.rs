//! Index-addressed syntax tree.
//!
//! The tree-sitter tree is flattened into an arena once per parse; parent,
//! child and sibling relations become index lookups.

use super::node::{NodeId, NodeKind, SyntaxNode};
use crate::position::Position;
use crate::utils::LineIndex;
use std::ops::Range;

/// A parsed source file.
#[derive(Debug)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<SyntaxNode>,
    line_index: LineIndex,
}

impl SyntaxTree {
    /// Flatten a tree-sitter tree into the arena.
    pub(crate) fn from_tree_sitter(tree: &tree_sitter::Tree, source: &str) -> Self {
        let mut nodes: Vec<SyntaxNode> = Vec::new();
        let mut cursor = tree.walk();
        let mut stack = vec![push_node(&mut nodes, cursor.node(), None, None)];

        'walk: loop {
            if cursor.goto_first_child() {
                let parent = stack.last().copied();
                let id = push_node(&mut nodes, cursor.node(), cursor.field_name(), parent);
                stack.push(id);
                continue;
            }
            loop {
                stack.pop();
                if cursor.goto_next_sibling() {
                    let parent = stack.last().copied();
                    let id = push_node(&mut nodes, cursor.node(), cursor.field_name(), parent);
                    stack.push(id);
                    break;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        Self {
            source: source.to_owned(),
            nodes,
            line_index: LineIndex::new(source),
        }
    }

    /// Offset/position conversions for the parsed text.
    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    /// Kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    /// Children of a node in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The sibling right after `id`, if any.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        let parent = node.parent?;
        self.children(parent).get(node.index_in_parent + 1).copied()
    }

    /// The sibling right before `id`, if any.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        let parent = node.parent?;
        let index = node.index_in_parent.checked_sub(1)?;
        self.children(parent).get(index).copied()
    }

    /// First child filling the given grammar field.
    #[must_use]
    pub fn child_by_field(&self, id: NodeId, field: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.node(*child).field == Some(field))
    }

    /// Source text of a node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        let node = self.node(id);
        &self.source[node.start_byte..node.end_byte]
    }

    /// Text of a 1-indexed line without its terminator.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&str> {
        let start = self.line_index.line_start(line)?;
        let end = self.line_index.next_line_start(line);
        Some(self.source[start..end].trim_end_matches(['\n', '\r']))
    }

    /// Position of the first syntax error, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<Position> {
        self.nodes
            .iter()
            .find(|n| n.kind == NodeKind::Error)
            .map(|n| n.start)
    }

    /// Ids of all nodes matching `predicate`, in document order.
    pub fn find_all<'a>(
        &'a self,
        predicate: impl Fn(NodeKind) -> bool + 'a,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| predicate(n.kind))
            .map(|(i, _)| NodeId(i))
    }

    /// The innermost node matching `predicate` that contains `position`.
    ///
    /// Nodes are stored in pre-order, so among all containing matches the
    /// last one is the deepest.
    #[must_use]
    pub fn find_enclosing<'a>(
        &'a self,
        position: Position,
        predicate: impl Fn(NodeKind) -> bool + 'a,
    ) -> Option<NodeId> {
        self.find_all(predicate)
            .filter(|id| self.node(*id).contains(position))
            .last()
    }

    /// Horizontal whitespace immediately before a node on its own line.
    #[must_use]
    pub fn leading_trivia(&self, id: NodeId) -> Range<usize> {
        let end = self.node(id).start_byte;
        let start = self.source[..end]
            .trim_end_matches([' ', '\t'])
            .len();
        start..end
    }

    /// Whether only indentation precedes the node on its line.
    #[must_use]
    pub fn starts_line(&self, id: NodeId) -> bool {
        let start = self.leading_trivia(id).start;
        start == 0 || self.source.as_bytes()[start - 1] == b'\n'
    }

    /// Byte offset after any spaces or tabs following `offset`.
    #[must_use]
    pub fn skip_horizontal_whitespace(&self, offset: usize) -> usize {
        let rest = &self.source[offset..];
        offset + (rest.len() - rest.trim_start_matches([' ', '\t']).len())
    }

    /// Whether nothing but whitespace follows `offset` up to the end of its line.
    #[must_use]
    pub fn rest_of_line_is_blank(&self, offset: usize) -> bool {
        let end = self.source[offset..]
            .find('\n')
            .map_or(self.source.len(), |i| offset + i);
        self.source[offset..end].trim().is_empty()
    }

    /// Position of a byte offset.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        self.line_index.position(offset)
    }
}

fn push_node(
    nodes: &mut Vec<SyntaxNode>,
    node: tree_sitter::Node<'_>,
    field: Option<&'static str>,
    parent: Option<NodeId>,
) -> NodeId {
    let id = NodeId(nodes.len());
    let kind = if node.is_missing() {
        NodeKind::Error
    } else {
        NodeKind::classify(node.kind(), node.is_named())
    };
    let index_in_parent = parent.map_or(0, |p| nodes[p.0].children.len());

    nodes.push(SyntaxNode {
        kind,
        field,
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
        start: node.start_position().into(),
        end: node.end_position().into(),
        parent,
        children: Vec::new(),
        index_in_parent,
    });
    if let Some(p) = parent {
        nodes[p.0].children.push(id);
    }
    id
}
