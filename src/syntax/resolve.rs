//! Single-file scope walk: finds identifier references that nothing in the file binds.
//!
//! Only syntax is consulted. Package-level names are visible everywhere, local names from
//! the point their declaration completes, imports by their alias or last path element.

use compact_str::CompactString;
use rustc_hash::FxHashSet;
use tree_sitter::Node;

use super::node::GoNode;
use super::util::{children, field_children, named_children, node_text, same_node, specs_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Binding {
    /// A predeclared Go identifier (`string`, `len`, ...) not shadowed in the file.
    Builtin,
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Reference {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) binding: Binding,
}

/// Returns the references that did not bind to a declaration in the file, in source order.
pub(crate) fn resolve(root: Node<'_>, source: &str) -> Vec<Reference> {
    let mut resolver = Resolver::new(source);
    resolver.collect_file_scope(root);
    resolver.walk(root);
    resolver.references
}

type Scope = FxHashSet<CompactString>;

/// One deferred step of the walk.
#[derive(Debug, Clone, Copy)]
enum Task<'t> {
    Visit(Node<'t>),
    Declare(Node<'t>),
    /// Left side of `:=` or a type switch alias: identifiers are declared, anything else is
    /// visited.
    DeclareList(Node<'t>),
    EnterScope,
    ExitScope,
}

struct Resolver<'s> {
    source: &'s str,
    package: Scope,
    imports: Scope,
    dot_import: bool,
    scopes: Vec<Scope>,
    references: Vec<Reference>,
}

impl<'s> Resolver<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            package: Scope::default(),
            imports: Scope::default(),
            dot_import: false,
            scopes: Vec::new(),
            references: Vec::new(),
        }
    }

    fn collect_file_scope(&mut self, root: Node<'_>) {
        for decl in named_children(root) {
            match GoNode::of(decl) {
                GoNode::FunctionDeclaration => {
                    if let Some(name) = decl.child_by_field_name("name") {
                        self.declare_in_package(name);
                    }
                }
                GoNode::TypeDeclaration | GoNode::VarDeclaration | GoNode::ConstDeclaration => {
                    for spec in specs_of(decl) {
                        for name in field_children(spec, "name") {
                            self.declare_in_package(name);
                        }
                    }
                }
                GoNode::ImportDeclaration => {
                    for spec in specs_of(decl) {
                        self.declare_import(spec);
                    }
                }
                _ => {}
            }
        }
    }

    fn declare_in_package(&mut self, name: Node<'_>) {
        if let Some(text) = node_text(self.source, name) {
            if !text.is_empty() && text != "_" {
                self.package.insert(CompactString::new(text));
            }
        }
    }

    fn declare_import(&mut self, spec: Node<'_>) {
        if let Some(name) = spec.child_by_field_name("name") {
            match GoNode::of(name) {
                GoNode::Dot => self.dot_import = true,
                GoNode::PackageIdentifier | GoNode::Identifier => {
                    if let Some(text) = node_text(self.source, name) {
                        self.imports.insert(CompactString::new(text));
                    }
                }
                _ => {}
            }
            return;
        }

        let Some(path) = spec
            .child_by_field_name("path")
            .and_then(|path| node_text(self.source, path))
        else {
            return;
        };
        if let Some(name) = import_name_from_path(path) {
            self.imports.insert(CompactString::new(name));
        }
    }

    /// Runs the walk off an explicit work stack, so nesting depth is bounded by the heap
    /// rather than the thread stack.
    fn walk<'t>(&mut self, root: Node<'t>) {
        let mut stack = vec![Task::Visit(root)];
        let mut plan = Vec::new();
        while let Some(task) = stack.pop() {
            match task {
                Task::Visit(node) => self.visit(node, &mut plan),
                Task::Declare(name) => self.declare(name),
                Task::DeclareList(list) => plan_declare_list(list, &mut plan),
                Task::EnterScope => self.scopes.push(Scope::default()),
                Task::ExitScope => {
                    self.scopes.pop();
                }
            }
            // `plan` is in execution order; the stack pops from the back.
            stack.extend(plan.drain(..).rev());
        }
    }

    fn visit<'t>(&mut self, node: Node<'t>, plan: &mut Vec<Task<'t>>) {
        match GoNode::of(node) {
            GoNode::Identifier | GoNode::TypeIdentifier => self.reference(node),
            GoNode::QualifiedType => {
                if let Some(package) = node.child_by_field_name("package") {
                    self.reference(package);
                }
            }

            GoNode::FunctionDeclaration
            | GoNode::MethodDeclaration
            | GoNode::FuncLiteral
            | GoNode::FunctionType
            | GoNode::MethodSpec => plan_function(node, plan),
            GoNode::TypeParameterList => {
                // `[S ~[]E, E any]`: every name is in scope for every constraint.
                for decl in named_children(node) {
                    let names = field_children(decl, "name");
                    for name in &names {
                        self.declare(*name);
                    }
                    plan_children_except(decl, &names, plan);
                }
            }
            GoNode::ParameterDeclaration
            | GoNode::VariadicParameterDeclaration
            | GoNode::TypeParameterDeclaration
            | GoNode::VarSpec
            | GoNode::ConstSpec => {
                let names = field_children(node, "name");
                plan_children_except(node, &names, plan);
                plan.extend(names.into_iter().map(Task::Declare));
            }
            GoNode::TypeSpec | GoNode::TypeAlias => {
                let name = node.child_by_field_name("name");
                if let Some(name) = name {
                    self.declare(name);
                }
                plan.push(Task::EnterScope);
                plan_children_except(node, name.as_slice(), plan);
                plan.push(Task::ExitScope);
            }
            GoNode::ShortVarDeclaration => plan_define(node, plan),
            GoNode::RangeClause | GoNode::ReceiveStatement => {
                if children(node).any(|child| child.kind() == ":=") {
                    plan_define(node, plan);
                } else {
                    plan_children_except(node, &[], plan);
                }
            }
            GoNode::TypeSwitchStatement => plan_type_switch(node, plan),
            GoNode::KeyedElement => {
                // `T{Name: v}`: a bare identifier key may name a struct field.
                let key = named_children(node).next();
                for child in children(node) {
                    if key.is_some_and(|key| same_node(key, child)) && is_bare_key(child) {
                        continue;
                    }
                    plan.push(Task::Visit(child));
                }
            }

            GoNode::Block
            | GoNode::ForStatement
            | GoNode::IfStatement
            | GoNode::ExpressionSwitchStatement
            | GoNode::SelectStatement
            | GoNode::ExpressionCase
            | GoNode::TypeCase
            | GoNode::DefaultCase
            | GoNode::CommunicationCase => {
                plan.push(Task::EnterScope);
                plan_children_except(node, &[], plan);
                plan.push(Task::ExitScope);
            }

            GoNode::SourceFile
            | GoNode::Error
            | GoNode::TypeDeclaration
            | GoNode::VarDeclaration
            | GoNode::ConstDeclaration
            | GoNode::GenericType
            | GoNode::TypeArguments
            | GoNode::LiteralElement
            | GoNode::ExpressionList
            | GoNode::ParameterList
            | GoNode::Other => plan_children_except(node, &[], plan),

            GoNode::PackageClause
            | GoNode::ImportDeclaration
            | GoNode::ImportSpec
            | GoNode::Comment
            | GoNode::FieldIdentifier
            | GoNode::PackageIdentifier
            | GoNode::BlankIdentifier
            | GoNode::LabelName
            | GoNode::Dot
            | GoNode::Keyword(_)
            | GoNode::Literal(_)
            | GoNode::Constant(_)
            | GoNode::EscapeSequence
            | GoNode::Operator
            | GoNode::Punctuation => {}
        }
    }

    fn declare(&mut self, name: Node<'_>) {
        let Some(text) = node_text(self.source, name) else {
            return;
        };
        if text.is_empty() || text == "_" {
            return;
        }
        match self.scopes.last_mut() {
            Some(scope) => {
                scope.insert(CompactString::new(text));
            }
            None => {
                self.package.insert(CompactString::new(text));
            }
        }
    }

    fn reference(&mut self, node: Node<'_>) {
        let Some(text) = node_text(self.source, node) else {
            return;
        };
        if text.is_empty() || text == "_" || self.is_bound(text) {
            return;
        }

        let binding = if is_predeclared(text) {
            Binding::Builtin
        } else if self.dot_import {
            return;
        } else {
            Binding::Unresolved
        };
        self.references.push(Reference {
            start: node.start_byte(),
            end: node.end_byte(),
            binding,
        });
    }

    fn is_bound(&self, name: &str) -> bool {
        self.scopes.iter().rev().any(|scope| scope.contains(name))
            || self.package.contains(name)
            || self.imports.contains(name)
    }
}

fn plan_children_except<'t>(node: Node<'t>, skip: &[Node<'t>], plan: &mut Vec<Task<'t>>) {
    for child in children(node) {
        if !skip.iter().any(|name| same_node(*name, child)) {
            plan.push(Task::Visit(child));
        }
    }
}

/// Declarations, literals and signatures: the signature's names live in a scope of their
/// own that the body shares.
fn plan_function<'t>(node: Node<'t>, plan: &mut Vec<Task<'t>>) {
    plan.push(Task::EnterScope);
    if GoNode::of(node) == GoNode::MethodDeclaration {
        plan.extend(receiver_type_parameters(node).into_iter().map(Task::Declare));
    }
    let name = node.child_by_field_name("name");
    plan_children_except(node, name.as_slice(), plan);
    plan.push(Task::ExitScope);
}

/// `left := right`: the right side sees the names from before the statement.
fn plan_define<'t>(node: Node<'t>, plan: &mut Vec<Task<'t>>) {
    let Some(left) = node.child_by_field_name("left") else {
        plan_children_except(node, &[], plan);
        return;
    };
    plan_children_except(node, &[left], plan);
    plan.push(Task::DeclareList(left));
}

/// `switch v := x.(type)`: the alias is bound from the first clause on.
fn plan_type_switch<'t>(node: Node<'t>, plan: &mut Vec<Task<'t>>) {
    let alias = node.child_by_field_name("alias");
    let mut alias_declared = false;
    plan.push(Task::EnterScope);
    for child in children(node) {
        if alias.is_some_and(|alias| same_node(alias, child)) {
            continue;
        }
        if !alias_declared && matches!(GoNode::of(child), GoNode::TypeCase | GoNode::DefaultCase)
        {
            if let Some(alias) = alias {
                plan.push(Task::DeclareList(alias));
            }
            alias_declared = true;
        }
        plan.push(Task::Visit(child));
    }
    plan.push(Task::ExitScope);
}

fn plan_declare_list<'t>(list: Node<'t>, plan: &mut Vec<Task<'t>>) {
    let declare_or_visit = |node: Node<'t>| match GoNode::of(node) {
        GoNode::Identifier => Task::Declare(node),
        _ => Task::Visit(node),
    };
    if GoNode::of(list) == GoNode::ExpressionList {
        plan.extend(named_children(list).map(declare_or_visit));
    } else {
        plan.push(declare_or_visit(list));
    }
}

/// `func (l *List[T]) ...`: the receiver's type arguments name the method's type parameters.
fn receiver_type_parameters(method: Node<'_>) -> Vec<Node<'_>> {
    let mut names = Vec::new();
    let Some(receiver) = method.child_by_field_name("receiver") else {
        return names;
    };
    for param in named_children(receiver) {
        let mut ty = param.child_by_field_name("type");
        while let Some(node) = ty {
            match GoNode::of(node) {
                GoNode::GenericType => {
                    let args = named_children(node)
                        .find(|child| GoNode::of(*child) == GoNode::TypeArguments);
                    if let Some(args) = args {
                        names.extend(named_children(args).filter_map(type_argument_name));
                    }
                    break;
                }
                // pointer_type, parenthesized_type
                GoNode::Other => ty = node.named_child(0),
                _ => break,
            }
        }
    }
    names
}

fn type_argument_name(arg: Node<'_>) -> Option<Node<'_>> {
    match GoNode::of(arg) {
        GoNode::TypeIdentifier => Some(arg),
        GoNode::Other if arg.named_child_count() == 1 => arg
            .named_child(0)
            .filter(|inner| GoNode::of(*inner) == GoNode::TypeIdentifier),
        _ => None,
    }
}

fn is_bare_key(key: Node<'_>) -> bool {
    match GoNode::of(key) {
        GoNode::Identifier | GoNode::FieldIdentifier => true,
        GoNode::LiteralElement => {
            key.named_child_count() == 1
                && key
                    .named_child(0)
                    .is_some_and(|inner| GoNode::of(inner) == GoNode::Identifier)
        }
        _ => false,
    }
}

/// Package name a plain import binds: the last path element, minus a major-version suffix
/// (`example.com/mod/v2` and `gopkg.in/yaml.v3` bind `mod` and `yaml`).
pub(crate) fn import_name_from_path(path: &str) -> Option<&str> {
    let path = path.trim_matches(|c| c == '"' || c == '`');
    let mut elements = path.rsplit('/').filter(|element| !element.is_empty());
    let last = elements.next()?;
    if is_major_version(last) {
        return elements.next().or(Some(last));
    }
    if let Some((base, version)) = last.rsplit_once('.') {
        if is_major_version(version) && !base.is_empty() {
            return Some(base);
        }
    }
    Some(last)
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

pub(crate) fn is_predeclared(name: &str) -> bool {
    matches!(
        name,
        "any"
            | "bool"
            | "byte"
            | "comparable"
            | "complex64"
            | "complex128"
            | "error"
            | "float32"
            | "float64"
            | "int"
            | "int8"
            | "int16"
            | "int32"
            | "int64"
            | "rune"
            | "string"
            | "uint"
            | "uint8"
            | "uint16"
            | "uint32"
            | "uint64"
            | "uintptr"
            | "true"
            | "false"
            | "iota"
            | "nil"
            | "append"
            | "cap"
            | "clear"
            | "close"
            | "complex"
            | "copy"
            | "delete"
            | "imag"
            | "len"
            | "make"
            | "max"
            | "min"
            | "new"
            | "panic"
            | "print"
            | "println"
            | "real"
            | "recover"
    )
}

#[cfg(test)]
#[path = "../../tests/unit/syntax/resolve.rs"]
mod tests;
