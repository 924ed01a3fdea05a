//! Tree-sitter Go parser wrapper. Recovery trees are kept even when the source is broken.

use std::fmt;

use tree_sitter::{Node, Parser, Tree};

const SNIPPET_MAX_CHARS: usize = 24;

/// Location of a syntax error: 1-based line and column (bytes within the line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPos {
    pub line: usize,
    pub column: usize,
    pub byte: usize,
}

impl ErrorPos {
    fn of(node: Node<'_>) -> Self {
        let point = node.start_position();
        Self {
            line: point.row + 1,
            column: point.column + 1,
            byte: node.start_byte(),
        }
    }
}

impl fmt::Display for ErrorPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Text the grammar could not place.
    Unexpected { pos: ErrorPos, text: String },
    /// A token or node the grammar expected but did not find.
    Missing { pos: ErrorPos, expected: String },
    /// The parser produced no tree at all.
    NoTree,
}

impl SyntaxError {
    pub fn pos(&self) -> Option<ErrorPos> {
        match self {
            SyntaxError::Unexpected { pos, .. } | SyntaxError::Missing { pos, .. } => Some(*pos),
            SyntaxError::NoTree => None,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::Unexpected { pos, text } if text.is_empty() => {
                write!(f, "{}: syntax error", pos)
            }
            SyntaxError::Unexpected { pos, text } => {
                write!(f, "{}: syntax error: unexpected {}", pos, text)
            }
            SyntaxError::Missing { pos, expected } => {
                write!(f, "{}: syntax error: missing {}", pos, expected)
            }
            SyntaxError::NoTree => write!(f, "source could not be parsed"),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Every error from one parse, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxErrors(Vec<SyntaxError>);

impl SyntaxErrors {
    pub fn new(errors: Vec<SyntaxError>) -> Self {
        Self(errors)
    }

    pub fn as_slice(&self) -> &[SyntaxError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxError> {
        self.0.iter()
    }
}

impl fmt::Display for SyntaxErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxErrors {}

impl<'a> IntoIterator for &'a SyntaxErrors {
    type Item = &'a SyntaxError;
    type IntoIter = std::slice::Iter<'a, SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of one parse: whatever tree could be built, plus every error met on the way.
///
/// Both halves are meaningful together; a broken file still yields a tree worth
/// highlighting.
pub struct ParseOutcome {
    pub tree: Option<Tree>,
    pub errors: Vec<SyntaxError>,
}

pub struct GoParser {
    parser: Option<Parser>,
}

impl GoParser {
    pub fn new() -> Self {
        let mut parser = Parser::new();
        let parser = match parser.set_language(tree_sitter_go::language()) {
            Ok(()) => Some(parser),
            Err(err) => {
                tracing::warn!(error = %err, "go grammar unavailable");
                None
            }
        };
        Self { parser }
    }

    pub fn parse(&mut self, source: &str) -> ParseOutcome {
        let tree = self
            .parser
            .as_mut()
            .and_then(|parser| parser.parse(source, None));
        let Some(tree) = tree else {
            return ParseOutcome {
                tree: None,
                errors: vec![SyntaxError::NoTree],
            };
        };

        let errors = collect_errors(tree.root_node(), source);
        ParseOutcome {
            tree: Some(tree),
            errors,
        }
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_errors(root: Node<'_>, source: &str) -> Vec<SyntaxError> {
    let mut errors = Vec::new();
    if !root.has_error() {
        return errors;
    }

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() {
            errors.push(SyntaxError::Missing {
                pos: ErrorPos::of(node),
                expected: describe_kind(node),
            });
            continue;
        }
        if node.is_error() {
            errors.push(SyntaxError::Unexpected {
                pos: ErrorPos::of(node),
                text: snippet(source, node),
            });
        }
        if !node.has_error() {
            continue;
        }

        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
    errors
}

fn describe_kind(node: Node<'_>) -> String {
    if node.is_named() {
        node.kind().replace('_', " ")
    } else {
        format!("{:?}", node.kind())
    }
}

fn snippet(source: &str, node: Node<'_>) -> String {
    let Some(text) = source.get(node.start_byte()..node.end_byte()) else {
        return String::new();
    };
    let first_line = text.lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return String::new();
    }
    if first_line.chars().count() > SNIPPET_MAX_CHARS {
        let cut: String = first_line.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{:?}...", cut)
    } else {
        format!("{:?}", first_line)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/syntax/parser.rs"]
mod tests;
