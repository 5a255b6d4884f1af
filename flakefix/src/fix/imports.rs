//! Unused-import removal (`F401`).
//!
//! The file is parsed once, every diagnostic is resolved to the import
//! statement and imported name it describes, and the deletions are computed
//! as [`Span`]s, merged, and spliced out. Any diagnostic that cannot be
//! resolved aborts the fix for the whole file.

use super::registry::FileFixer;
use super::span::{merge_spans, Span};
use super::splice::{starts_file, LineSplicer};
use super::FixError;
use crate::constants::{IMPORT_MESSAGE_RE, UNUSED_IMPORT_CODE};
use crate::cst::{CstParser, NodeId, NodeKind, SyntaxTree};
use crate::diagnostics::Diagnostic;
use crate::position::{char_to_byte_column, Position};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Removes imported names reported as unused.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnusedImportFixer;

impl FileFixer for UnusedImportFixer {
    fn code(&self) -> &'static str {
        UNUSED_IMPORT_CODE
    }

    fn description(&self) -> &'static str {
        "remove unused imports"
    }

    fn fix(&self, diagnostics: &[Diagnostic], content: &str) -> Result<String, FixError> {
        remove_unused_imports(diagnostics, content)
    }
}

/// Remove every import named by `diagnostics` from `content`.
///
/// # Errors
/// - [`FixError::FatalSyntax`] if the file does not parse
/// - [`FixError::UnresolvableReference`] if a diagnostic does not match an
///   imported name
/// - [`FixError::Splice`] if the computed deletions are inconsistent
pub fn remove_unused_imports(diagnostics: &[Diagnostic], content: &str) -> Result<String, FixError> {
    if diagnostics.is_empty() {
        return Ok(content.to_owned());
    }

    let tree = CstParser::new()?.parse(content)?;
    if let Some(position) = tree.first_error() {
        return Err(FixError::FatalSyntax {
            message: format!("syntax error at {position}"),
        });
    }

    let mut unique: Vec<&Diagnostic> = diagnostics.iter().collect();
    unique.sort();
    unique.dedup();

    // Statement id -> diagnostics, in order of first appearance.
    let mut groups: Vec<(NodeId, Vec<&Diagnostic>)> = Vec::new();
    let mut group_of: FxHashMap<NodeId, usize> = FxHashMap::default();
    for diagnostic in unique {
        let statement = locate_statement(&tree, diagnostic)?;
        let slot = *group_of.entry(statement).or_insert_with(|| {
            groups.push((statement, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(diagnostic);
    }

    let mut spans = Vec::new();
    for (statement, group) in &groups {
        let import = ImportStatement::new(&tree, *statement)?;
        spans.extend(import.removal_spans(group)?);
    }

    let merged = merge_spans(spans);
    let at_file_start = merged.first().is_some_and(starts_file);

    let mut splicer = LineSplicer::new(content);
    splicer.add_spans(merged);
    let text = splicer.apply()?;

    Ok(if at_file_start {
        drop_doubled_leading_blank_line(&text).to_owned()
    } else {
        text
    })
}

/// Find the import statement a diagnostic points into.
fn locate_statement(tree: &SyntaxTree, diagnostic: &Diagnostic) -> Result<NodeId, FixError> {
    let line = tree
        .line_text(diagnostic.line())
        .ok_or_else(|| FixError::unresolvable(diagnostic, "line is outside the file"))?;
    let column = char_to_byte_column(line, diagnostic.column()).unwrap_or(line.len());
    let position = Position::new(diagnostic.line(), column);

    tree.find_enclosing(position, NodeKind::is_import)
        .or_else(|| {
            tree.find_all(NodeKind::is_import)
                .find(|id| tree.node(*id).start.line == diagnostic.line())
        })
        .ok_or_else(|| FixError::unresolvable(diagnostic, "no import statement at this position"))
}

/// Drop the first line of `text` when it and the line after it are both blank.
fn drop_doubled_leading_blank_line(text: &str) -> &str {
    let mut lines = text.lines();
    match (lines.next(), lines.next()) {
        (Some(first), Some(second)) if first.trim().is_empty() && second.trim().is_empty() => {
            text.find('\n').map_or(text, |newline| &text[newline + 1..])
        }
        _ => text,
    }
}

/// Module part of a `from` import.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ModulePath {
    /// Number of leading dots.
    level: usize,
    /// Dotted module name without the dots, possibly empty.
    dotted: String,
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ".".repeat(self.level), self.dotted)
    }
}

/// One imported name of a statement.
#[derive(Debug, Clone)]
struct ImportedName {
    node: NodeId,
    /// Index into [`ImportStatement::elements`].
    element: usize,
    path: String,
    alias: Option<String>,
}

/// Which separator a removed name takes with it.
#[derive(Debug, Clone, Copy)]
enum Claim {
    Preceding(usize),
    Following(usize),
}

/// An import statement viewed as a list of names and separators.
struct ImportStatement<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
    /// Imported names and `,` separators after the `import` keyword.
    elements: Vec<NodeId>,
    names: Vec<ImportedName>,
    module: Option<ModulePath>,
    parenthesized: bool,
}

impl<'t> ImportStatement<'t> {
    fn new(tree: &'t SyntaxTree, id: NodeId) -> Result<Self, FixError> {
        let unsupported = |what: &str| FixError::UnresolvableReference {
            line: tree.node(id).start.line,
            code: UNUSED_IMPORT_CODE.to_owned(),
            message: tree.text(id).to_owned(),
            reason: format!("unsupported import statement: {what}"),
        };

        let children = tree.children(id);
        let keyword = children
            .iter()
            .position(|c| tree.kind(*c) == NodeKind::ImportKeyword)
            .ok_or_else(|| unsupported("missing `import` keyword"))?;

        let mut elements = Vec::new();
        let mut names = Vec::new();
        let mut parenthesized = false;
        for &child in &children[keyword + 1..] {
            match tree.kind(child) {
                NodeKind::DottedName | NodeKind::AliasedImport | NodeKind::WildcardImport => {
                    let (path, alias) = imported_name(tree, child)
                        .ok_or_else(|| unsupported("malformed imported name"))?;
                    names.push(ImportedName {
                        node: child,
                        element: elements.len(),
                        path,
                        alias,
                    });
                    elements.push(child);
                }
                NodeKind::Separator => elements.push(child),
                NodeKind::OpenParen => parenthesized = true,
                NodeKind::CloseParen | NodeKind::Comment | NodeKind::LineContinuation => {}
                NodeKind::Module
                | NodeKind::Block
                | NodeKind::ImportStatement
                | NodeKind::ImportFromStatement
                | NodeKind::RelativeImport
                | NodeKind::ImportPrefix
                | NodeKind::Identifier
                | NodeKind::ImportKeyword
                | NodeKind::Semicolon
                | NodeKind::String
                | NodeKind::Error
                | NodeKind::Other => return Err(unsupported(tree.text(child))),
            }
        }

        let module = match tree.kind(id) {
            NodeKind::ImportFromStatement => Some(
                module_path(tree, id).ok_or_else(|| unsupported("unrecognized module name"))?,
            ),
            _ => None,
        };

        Ok(Self {
            tree,
            id,
            elements,
            names,
            module,
            parenthesized,
        })
    }

    fn is_separator(&self, element: usize) -> bool {
        self.elements
            .get(element)
            .is_some_and(|id| self.tree.kind(*id) == NodeKind::Separator)
    }

    /// The `(name, alias)` a diagnostic refers to, relative to this statement.
    fn target(&self, diagnostic: &Diagnostic) -> Result<(String, Option<String>), FixError> {
        let captures = IMPORT_MESSAGE_RE()
            .captures(&diagnostic.message)
            .ok_or_else(|| FixError::unresolvable(diagnostic, "no quoted import name in message"))?;
        let path = captures.get(1).map_or("", |m| m.as_str());
        let alias = captures.get(2).map(|m| m.as_str().to_owned());

        let Some(module) = &self.module else {
            return Ok((path.to_owned(), alias));
        };

        let level = path.chars().take_while(|c| *c == '.').count();
        if level != module.level {
            return Err(FixError::unresolvable(
                diagnostic,
                format!(
                    "relative level {level} does not match `from {module}` (level {})",
                    module.level
                ),
            ));
        }
        let rest = &path[level..];
        let name = if module.dotted.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix(module.dotted.as_str())
                .and_then(|r| r.strip_prefix('.'))
        };
        name.filter(|n| !n.is_empty())
            .map(|n| (n.to_owned(), alias))
            .ok_or_else(|| {
                FixError::unresolvable(diagnostic, format!("'{path}' is not imported from `{module}`"))
            })
    }

    /// Deletion spans removing the names `diagnostics` refer to.
    fn removal_spans(&self, diagnostics: &[&Diagnostic]) -> Result<Vec<Span>, FixError> {
        let mut matched: Vec<usize> = Vec::with_capacity(diagnostics.len());
        for diagnostic in diagnostics {
            let (name, alias) = self.target(diagnostic)?;
            let found = self
                .names
                .iter()
                .enumerate()
                .find(|(i, n)| !matched.contains(i) && n.path == name && n.alias == alias)
                .map(|(i, _)| i)
                .ok_or_else(|| {
                    FixError::unresolvable(diagnostic, format!("`{name}` is not imported here"))
                })?;
            matched.push(found);
        }

        if matched.len() == self.names.len() {
            return self.statement_span().map(|span| vec![span]);
        }
        matched.sort_unstable();
        Ok(self.partial_spans(&matched))
    }

    /// Spans removing some names of the list, keeping punctuation valid.
    fn partial_spans(&self, matched: &[usize]) -> Vec<Span> {
        let tree = self.tree;
        let mut removed: FxHashSet<usize> = FxHashSet::default();
        let mut claimed: FxHashSet<usize> = FxHashSet::default();
        let mut spans = Vec::new();

        for &index in matched {
            let name = &self.names[index];
            let node = tree.node(name.node);
            removed.insert(name.element);

            let preceding = name
                .element
                .checked_sub(1)
                .filter(|e| self.is_separator(*e) && !claimed.contains(e));
            let following = Some(name.element + 1)
                .filter(|e| self.is_separator(*e) && !claimed.contains(e));
            let same_line = preceding
                .filter(|e| tree.node(self.elements[*e]).end.line == node.start.line);

            let claim = same_line
                .map(Claim::Preceding)
                .or(following.map(Claim::Following))
                .or(preceding.map(Claim::Preceding));

            let (start, end) = match claim {
                Some(Claim::Preceding(e)) => {
                    claimed.insert(e);
                    (tree.node(self.elements[e]).start_byte, node.end_byte)
                }
                Some(Claim::Following(e)) => {
                    claimed.insert(e);
                    let separator_end = tree.node(self.elements[e]).end_byte;
                    (node.start_byte, tree.skip_horizontal_whitespace(separator_end))
                }
                None => (node.start_byte, node.end_byte),
            };
            spans.push(Span::new(tree.position(start), tree.position(end)));
        }

        // Separators left dangling at the front or doubled up.
        let mut kept: Vec<usize> = Vec::new();
        let mut after_separator = true;
        for element in 0..self.elements.len() {
            if removed.contains(&element) || claimed.contains(&element) {
                continue;
            }
            let is_separator = self.is_separator(element);
            if is_separator && after_separator {
                let node = tree.node(self.elements[element]);
                let end = tree.skip_horizontal_whitespace(node.end_byte);
                spans.push(Span::new(tree.position(node.start_byte), tree.position(end)));
                continue;
            }
            after_separator = is_separator;
            kept.push(element);
        }

        // A separator now ending the list. Parenthesized lists that already
        // ended with one keep it.
        let trailing_allowed = self.parenthesized
            && self
                .elements
                .len()
                .checked_sub(1)
                .is_some_and(|e| self.is_separator(e));
        if let Some(&last) = kept.last() {
            if self.is_separator(last) && !trailing_allowed {
                let node = tree.node(self.elements[last]);
                spans.push(Span::new(
                    tree.position(node.start_byte),
                    tree.position(node.end_byte),
                ));
            }
        }

        spans
    }

    /// Span removing the whole statement.
    fn statement_span(&self) -> Result<Span, FixError> {
        let tree = self.tree;
        let node = tree.node(self.id);

        if let Some(parent) = tree.parent(self.id) {
            if tree.kind(parent) == NodeKind::Block {
                let statements = tree
                    .children(parent)
                    .iter()
                    .filter(|c| {
                        let kind = tree.kind(**c);
                        !kind.is_trivia() && kind != NodeKind::Semicolon
                    })
                    .count();
                if statements == 1 {
                    return Err(FixError::UnresolvableReference {
                        line: node.start.line,
                        code: UNUSED_IMPORT_CODE.to_owned(),
                        message: tree.text(self.id).to_owned(),
                        reason: "removing the only statement of a block".to_owned(),
                    });
                }
            }
        }

        let is_semicolon = |id: &NodeId| tree.kind(*id) == NodeKind::Semicolon;
        let next_semicolon = tree
            .next_sibling(self.id)
            .filter(|s| is_semicolon(s) && tree.node(*s).start.line == node.end.line);
        let prev_semicolon = tree
            .prev_sibling(self.id)
            .filter(|s| is_semicolon(s) && tree.node(*s).end.line == node.start.line);

        let mut start = node.start_byte;
        let mut end = match next_semicolon {
            Some(semicolon) => tree.skip_horizontal_whitespace(tree.node(semicolon).end_byte),
            None => node.end_byte,
        };

        if tree.starts_line(self.id) && tree.rest_of_line_is_blank(end) {
            start = tree.leading_trivia(self.id).start;
            end = tree.line_index().next_line_start(tree.position(end).line);
        } else if let (None, Some(semicolon)) = (next_semicolon, prev_semicolon) {
            start = tree.node(semicolon).start_byte;
        } else if next_semicolon.is_none() {
            end = tree.skip_horizontal_whitespace(end);
        }

        Ok(Span::new(tree.position(start), tree.position(end)))
    }
}

/// Dotted path and alias of an imported-name node.
fn imported_name(tree: &SyntaxTree, id: NodeId) -> Option<(String, Option<String>)> {
    match tree.kind(id) {
        NodeKind::DottedName => Some((compact(tree.text(id)), None)),
        NodeKind::WildcardImport => Some(("*".to_owned(), None)),
        NodeKind::AliasedImport => {
            let name = tree.child_by_field(id, "name")?;
            let alias = tree.child_by_field(id, "alias")?;
            Some((compact(tree.text(name)), Some(compact(tree.text(alias)))))
        }
        _ => None,
    }
}

/// The `module_name` of a `from` import.
fn module_path(tree: &SyntaxTree, id: NodeId) -> Option<ModulePath> {
    let module = tree.child_by_field(id, "module_name")?;
    match tree.kind(module) {
        NodeKind::DottedName => Some(ModulePath {
            level: 0,
            dotted: compact(tree.text(module)),
        }),
        NodeKind::RelativeImport => {
            let mut path = ModulePath {
                level: 0,
                dotted: String::new(),
            };
            for &child in tree.children(module) {
                match tree.kind(child) {
                    NodeKind::ImportPrefix => {
                        path.level = tree.text(child).chars().filter(|c| *c == '.').count();
                    }
                    NodeKind::DottedName => path.dotted = compact(tree.text(child)),
                    _ => {}
                }
            }
            Some(path)
        }
        _ => None,
    }
}

/// Source text with all whitespace removed (`os . path` -> `os.path`).
fn compact(text: &str) -> String {
    text.split_whitespace().collect()
}
