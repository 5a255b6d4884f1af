//! Node kinds and arena nodes of the syntax tree.

use crate::position::Position;

/// Stable index of a node inside a [`super::SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

/// The closed set of node kinds the fixers reason about.
///
/// Everything the grammar produces that none of the fixers needs collapses
/// into [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// File root.
    Module,
    /// Indented suite of statements.
    Block,
    /// `import a, b as c`
    ImportStatement,
    /// `from m import a, b`
    ImportFromStatement,
    /// `a.b.c`
    DottedName,
    /// `a.b as c`
    AliasedImport,
    /// `..pkg` in a from-import.
    RelativeImport,
    /// The run of dots of a relative import.
    ImportPrefix,
    /// `*`
    WildcardImport,
    /// A bare name.
    Identifier,
    /// The `import` keyword.
    ImportKeyword,
    /// `,`
    Separator,
    /// `;`
    Semicolon,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `# ...`
    Comment,
    /// Backslash ending a physical line inside a statement.
    LineContinuation,
    /// String literal.
    String,
    /// Unparseable region or missing token.
    Error,
    /// Anything else.
    Other,
}

impl NodeKind {
    /// Map a tree-sitter-python kind name onto the closed set.
    #[must_use]
    pub fn classify(kind: &str, is_named: bool) -> Self {
        match (kind, is_named) {
            ("module", true) => Self::Module,
            ("block", true) => Self::Block,
            ("import_statement", true) => Self::ImportStatement,
            ("import_from_statement", true) => Self::ImportFromStatement,
            ("dotted_name", true) => Self::DottedName,
            ("aliased_import", true) => Self::AliasedImport,
            ("relative_import", true) => Self::RelativeImport,
            ("import_prefix", true) => Self::ImportPrefix,
            ("wildcard_import", true) => Self::WildcardImport,
            ("identifier", true) => Self::Identifier,
            ("comment", true) => Self::Comment,
            ("line_continuation", _) => Self::LineContinuation,
            ("string", true) => Self::String,
            ("ERROR", _) => Self::Error,
            ("import", false) => Self::ImportKeyword,
            (",", false) => Self::Separator,
            (";", false) => Self::Semicolon,
            ("(", false) => Self::OpenParen,
            (")", false) => Self::CloseParen,
            _ => Self::Other,
        }
    }

    /// Whether the node is an import statement of either form.
    #[must_use]
    pub const fn is_import(self) -> bool {
        matches!(self, Self::ImportStatement | Self::ImportFromStatement)
    }

    /// Whether the node carries no code (comments).
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        match self {
            Self::Comment | Self::LineContinuation => true,
            Self::Module
            | Self::Block
            | Self::ImportStatement
            | Self::ImportFromStatement
            | Self::DottedName
            | Self::AliasedImport
            | Self::RelativeImport
            | Self::ImportPrefix
            | Self::WildcardImport
            | Self::Identifier
            | Self::ImportKeyword
            | Self::Separator
            | Self::Semicolon
            | Self::OpenParen
            | Self::CloseParen
            | Self::String
            | Self::Error
            | Self::Other => false,
        }
    }
}

/// A node of the arena with exact source location.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    /// Classified kind.
    pub kind: NodeKind,
    /// Grammar field this node fills in its parent (`name`, `alias`, ...).
    pub field: Option<&'static str>,
    /// Start byte offset (inclusive).
    pub start_byte: usize,
    /// End byte offset (exclusive).
    pub end_byte: usize,
    /// Start position (byte column).
    pub start: Position,
    /// End position (byte column).
    pub end: Position,
    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Children in source order.
    pub children: Vec<NodeId>,
    /// Position of this node in its parent's `children`.
    pub index_in_parent: usize,
}

impl SyntaxNode {
    /// Whether `position` lies within this node (end inclusive).
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}
