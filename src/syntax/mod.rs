//! Go syntax highlighting: parse, classify, and map byte ranges to rune-offset layers.

mod go;
mod layers;
mod node;
mod offsets;
mod parser;
mod resolve;
mod util;

use std::sync::Arc;

use serde::Serialize;

use crate::theme::Theme;

pub use self::layers::{aggregate, Layer, Layers, Span};
pub use self::offsets::OffsetTable;
pub use self::parser::{ErrorPos, GoParser, ParseOutcome, SyntaxError, SyntaxErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    Keyword = 0,
    Comment = 1,
    String = 2,
    Rune = 3,
    Number = 4,
    /// `true`, `false`, `nil`, `iota`.
    Constant = 5,
    ImportPath = 6,
    /// Name introduced by a package-level declaration.
    Declaration = 7,
    Label = 8,
    Operator = 9,
    /// Reference to a predeclared identifier such as `string` or `len`.
    Builtin = 10,
    /// Reference that nothing in the file or its imports declares.
    Unresolved = 11,
}

impl Category {
    pub const COUNT: usize = 12;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Keyword,
        Self::Comment,
        Self::String,
        Self::Rune,
        Self::Number,
        Self::Constant,
        Self::ImportPath,
        Self::Declaration,
        Self::Label,
        Self::Operator,
        Self::Builtin,
        Self::Unresolved,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Comment => "comment",
            Self::String => "string",
            Self::Rune => "rune",
            Self::Number => "number",
            Self::Constant => "constant",
            Self::ImportPath => "import_path",
            Self::Declaration => "declaration",
            Self::Label => "label",
            Self::Operator => "operator",
            Self::Builtin => "builtin",
            Self::Unresolved => "unresolved",
        }
    }
}

const _: () = assert!(Category::COUNT == 12);
const _: () = assert!(Category::Unresolved as usize == Category::COUNT - 1);

/// One highlight request in byte coordinates: `len` bytes from `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission {
    pub category: Category,
    pub start: usize,
    pub len: usize,
}

/// A highlighting session for one document.
///
/// [`Syntax::parse`] replaces every derived artifact (offset table, errors, layers) at once;
/// [`Syntax::layers`] reflects the most recent parse.
pub struct Syntax {
    theme: Arc<Theme>,
    parser: GoParser,
    offsets: OffsetTable,
    layers: Layers,
    errors: SyntaxErrors,
}

impl Syntax {
    pub fn new(theme: impl Into<Arc<Theme>>) -> Self {
        Self {
            theme: theme.into(),
            parser: GoParser::new(),
            offsets: OffsetTable::default(),
            layers: Layers::default(),
            errors: SyntaxErrors::default(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Parses `source` and rebuilds the layers.
    ///
    /// Syntax errors are returned, but the layers are rebuilt from whatever tree the parser
    /// recovered either way.
    pub fn parse(&mut self, source: &str) -> Result<(), SyntaxErrors> {
        let _span = tracing::debug_span!("syntax.parse", bytes = source.len()).entered();

        self.offsets = OffsetTable::build(source);
        let outcome = self.parser.parse(source);
        let emissions = match &outcome.tree {
            Some(tree) => go::build(tree.root_node(), source),
            None => Vec::new(),
        };
        self.layers = aggregate(&emissions, &self.offsets, &self.theme);
        self.errors = SyntaxErrors::new(outcome.errors);

        tracing::debug!(
            emissions = emissions.len(),
            layers = self.layers.len(),
            spans = self.layers.span_count(),
            errors = self.errors.len(),
            "syntax layers rebuilt"
        );

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.clone())
        }
    }

    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    /// The layer `category` is painted into, if its style was used by the last parse.
    pub fn layer(&self, category: Category) -> Option<&Layer> {
        let style = self.theme.style(category)?;
        self.layers.get(&style)
    }

    pub fn errors(&self) -> &SyntaxErrors {
        &self.errors
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }
}

/// Byte-range emissions for `source`, before styling. Empty when no tree could be built.
pub fn emissions(source: &str) -> (Vec<Emission>, Vec<SyntaxError>) {
    let outcome = GoParser::new().parse(source);
    let emissions = match &outcome.tree {
        Some(tree) => go::build(tree.root_node(), source),
        None => Vec::new(),
    };
    (emissions, outcome.errors)
}

#[cfg(test)]
#[path = "../../tests/unit/syntax/mod.rs"]
mod tests;
