//! Go layer builder: turns a (possibly recovered) syntax tree into categorized byte ranges.

use tree_sitter::Node;

use super::node::{GoNode, Keyword, Literal};
use super::resolve::{self, Binding};
use super::util::{children, field_children, named_children, node_is_field, same_node};
use super::{Category, Emission};

/// What the walk does with one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    /// Record the node; its children are not visited.
    Emit(Category),
    Descend,
    Skip,
}

/// Emits in a fixed order: package keyword, import specs, comments, declaration contents,
/// then identifier references the file does not bind.
pub(crate) fn build(root: Node<'_>, source: &str) -> Vec<Emission> {
    let mut out = Emissions::default();

    if let Some(keyword) = package_keyword(root) {
        out.push(Category::Keyword, keyword);
    }

    let (imports, comments) = collect_imports_and_comments(root);
    for spec in imports {
        out.push(Category::ImportPath, spec);
    }
    for comment in comments {
        out.push(Category::Comment, comment);
    }

    for decl in named_children(root) {
        if !matches!(GoNode::of(decl), GoNode::PackageClause | GoNode::Comment) {
            walk_declaration(decl, &mut out);
        }
    }

    for reference in resolve::resolve(root, source) {
        let category = match reference.binding {
            Binding::Builtin => Category::Builtin,
            Binding::Unresolved => Category::Unresolved,
        };
        out.push_range(category, reference.start, reference.end);
    }

    out.0
}

#[derive(Default)]
struct Emissions(Vec<Emission>);

impl Emissions {
    fn push(&mut self, category: Category, node: Node<'_>) {
        self.push_range(category, node.start_byte(), node.end_byte());
    }

    /// Zero-length ranges come from recovery (missing tokens) and are dropped.
    fn push_range(&mut self, category: Category, start: usize, end: usize) {
        if end <= start {
            return;
        }
        self.0.push(Emission {
            category,
            start,
            len: end - start,
        });
    }
}

fn package_keyword(root: Node<'_>) -> Option<Node<'_>> {
    let clause = named_children(root).find(|child| GoNode::of(*child) == GoNode::PackageClause)?;
    children(clause).find(|child| {
        !child.is_missing() && GoNode::of(*child) == GoNode::Keyword(Keyword::Package)
    })
}

/// Import specs and comments anywhere in the tree, each in source order.
fn collect_imports_and_comments(root: Node<'_>) -> (Vec<Node<'_>>, Vec<Node<'_>>) {
    let mut imports = Vec::new();
    let mut comments = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match GoNode::of(node) {
            GoNode::Comment => {
                comments.push(node);
                continue;
            }
            GoNode::ImportSpec => imports.push(node),
            GoNode::Literal(_) => continue,
            _ => {}
        }
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
    (imports, comments)
}

fn walk_declaration(decl: Node<'_>, out: &mut Emissions) {
    let mut stack = vec![decl];
    while let Some(node) = stack.pop() {
        match classify(node) {
            Visit::Emit(category) => {
                out.push(category, node);
                continue;
            }
            Visit::Skip => continue,
            Visit::Descend => {}
        }

        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
}

fn classify(node: Node<'_>) -> Visit {
    match GoNode::of(node) {
        GoNode::Keyword(_) => Visit::Emit(Category::Keyword),
        GoNode::Literal(literal) => Visit::Emit(literal_category(literal)),
        GoNode::Constant(_) => Visit::Emit(Category::Constant),
        GoNode::LabelName => Visit::Emit(Category::Label),
        GoNode::Operator => Visit::Emit(Category::Operator),

        GoNode::Identifier | GoNode::TypeIdentifier | GoNode::FieldIdentifier => {
            if declares_top_level_name(node) {
                Visit::Emit(Category::Declaration)
            } else {
                Visit::Skip
            }
        }

        // Owned by the import and comment passes.
        GoNode::ImportSpec | GoNode::Comment => Visit::Skip,

        GoNode::PackageIdentifier
        | GoNode::BlankIdentifier
        | GoNode::Dot
        | GoNode::EscapeSequence
        | GoNode::Punctuation => Visit::Skip,

        GoNode::SourceFile
        | GoNode::PackageClause
        | GoNode::ImportDeclaration
        | GoNode::Error
        | GoNode::FunctionDeclaration
        | GoNode::MethodDeclaration
        | GoNode::TypeDeclaration
        | GoNode::TypeSpec
        | GoNode::TypeAlias
        | GoNode::VarDeclaration
        | GoNode::VarSpec
        | GoNode::ConstDeclaration
        | GoNode::ConstSpec
        | GoNode::Block
        | GoNode::FuncLiteral
        | GoNode::FunctionType
        | GoNode::MethodSpec
        | GoNode::ParameterList
        | GoNode::TypeParameterList
        | GoNode::ParameterDeclaration
        | GoNode::VariadicParameterDeclaration
        | GoNode::TypeParameterDeclaration
        | GoNode::ShortVarDeclaration
        | GoNode::RangeClause
        | GoNode::ReceiveStatement
        | GoNode::ForStatement
        | GoNode::IfStatement
        | GoNode::ExpressionSwitchStatement
        | GoNode::TypeSwitchStatement
        | GoNode::SelectStatement
        | GoNode::ExpressionCase
        | GoNode::TypeCase
        | GoNode::DefaultCase
        | GoNode::CommunicationCase
        | GoNode::KeyedElement
        | GoNode::LiteralElement
        | GoNode::QualifiedType
        | GoNode::GenericType
        | GoNode::TypeArguments
        | GoNode::ExpressionList
        | GoNode::Other => Visit::Descend,
    }
}

fn literal_category(literal: Literal) -> Category {
    match literal {
        Literal::InterpretedString | Literal::RawString => Category::String,
        Literal::Rune => Category::Rune,
        Literal::Int | Literal::Float | Literal::Imaginary => Category::Number,
    }
}

/// Whether `node` is the name a package-level declaration introduces.
fn declares_top_level_name(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    match GoNode::of(parent) {
        GoNode::FunctionDeclaration | GoNode::MethodDeclaration => {
            node_is_field(parent, "name", node)
        }
        GoNode::TypeSpec | GoNode::TypeAlias | GoNode::VarSpec | GoNode::ConstSpec => {
            field_children(parent, "name")
                .into_iter()
                .any(|name| same_node(name, node))
                && spec_is_top_level(parent)
        }
        _ => false,
    }
}

fn spec_is_top_level(spec: Node<'_>) -> bool {
    let mut current = spec.parent();
    while let Some(node) = current {
        match GoNode::of(node) {
            GoNode::TypeDeclaration | GoNode::VarDeclaration | GoNode::ConstDeclaration => {
                return node
                    .parent()
                    .is_some_and(|parent| GoNode::of(parent) == GoNode::SourceFile);
            }
            GoNode::Other => current = node.parent(),
            _ => return false,
        }
    }
    false
}

#[cfg(test)]
#[path = "../../tests/unit/syntax/go.rs"]
mod tests;
