//! Closed model of the Go grammar node kinds the highlighter and resolver care about.
//!
//! Tree-sitter reports node kinds as strings; [`GoNode::of`] maps them once so the rest of
//! the crate dispatches with exhaustive `match`es.

use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl Keyword {
    pub(crate) const COUNT: usize = 25;

    fn from_token(token: &str) -> Option<Self> {
        let keyword = match token {
            "break" => Self::Break,
            "case" => Self::Case,
            "chan" => Self::Chan,
            "const" => Self::Const,
            "continue" => Self::Continue,
            "default" => Self::Default,
            "defer" => Self::Defer,
            "else" => Self::Else,
            "fallthrough" => Self::Fallthrough,
            "for" => Self::For,
            "func" => Self::Func,
            "go" => Self::Go,
            "goto" => Self::Goto,
            "if" => Self::If,
            "import" => Self::Import,
            "interface" => Self::Interface,
            "map" => Self::Map,
            "package" => Self::Package,
            "range" => Self::Range,
            "return" => Self::Return,
            "select" => Self::Select,
            "struct" => Self::Struct,
            "switch" => Self::Switch,
            "type" => Self::Type,
            "var" => Self::Var,
            _ => return None,
        };
        Some(keyword)
    }
}

const _: () = assert!(Keyword::COUNT == Keyword::Var as usize + 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    InterpretedString,
    RawString,
    Rune,
    Int,
    Float,
    Imaginary,
}

/// Predeclared constants the grammar gives their own node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constant {
    True,
    False,
    Nil,
    Iota,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GoNode {
    SourceFile,
    PackageClause,
    ImportDeclaration,
    ImportSpec,
    Comment,
    Error,

    FunctionDeclaration,
    MethodDeclaration,
    TypeDeclaration,
    TypeSpec,
    TypeAlias,
    VarDeclaration,
    VarSpec,
    ConstDeclaration,
    ConstSpec,

    Block,
    FuncLiteral,
    FunctionType,
    MethodSpec,
    ParameterList,
    TypeParameterList,
    ParameterDeclaration,
    VariadicParameterDeclaration,
    TypeParameterDeclaration,
    ShortVarDeclaration,
    RangeClause,
    ReceiveStatement,
    ForStatement,
    IfStatement,
    ExpressionSwitchStatement,
    TypeSwitchStatement,
    SelectStatement,
    ExpressionCase,
    TypeCase,
    DefaultCase,
    CommunicationCase,
    KeyedElement,
    LiteralElement,
    QualifiedType,
    GenericType,
    TypeArguments,
    ExpressionList,

    Identifier,
    TypeIdentifier,
    FieldIdentifier,
    PackageIdentifier,
    BlankIdentifier,
    LabelName,
    Dot,

    Keyword(Keyword),
    Literal(Literal),
    Constant(Constant),
    EscapeSequence,
    Operator,
    Punctuation,

    /// Any grammar construct with no dedicated handling; walked through transparently.
    Other,
}

impl GoNode {
    pub(crate) fn of(node: Node<'_>) -> Self {
        let kind = node.kind();
        if !node.is_named() {
            return Self::of_token(kind);
        }
        match kind {
            "source_file" => Self::SourceFile,
            "package_clause" => Self::PackageClause,
            "import_declaration" => Self::ImportDeclaration,
            "import_spec" => Self::ImportSpec,
            "comment" => Self::Comment,
            "ERROR" => Self::Error,

            "function_declaration" => Self::FunctionDeclaration,
            "method_declaration" => Self::MethodDeclaration,
            "type_declaration" => Self::TypeDeclaration,
            "type_spec" => Self::TypeSpec,
            "type_alias" => Self::TypeAlias,
            "var_declaration" => Self::VarDeclaration,
            "var_spec" => Self::VarSpec,
            "const_declaration" => Self::ConstDeclaration,
            "const_spec" => Self::ConstSpec,

            "block" => Self::Block,
            "func_literal" => Self::FuncLiteral,
            "function_type" => Self::FunctionType,
            "method_spec" | "method_elem" => Self::MethodSpec,
            "parameter_list" => Self::ParameterList,
            "type_parameter_list" => Self::TypeParameterList,
            "parameter_declaration" => Self::ParameterDeclaration,
            "variadic_parameter_declaration" => Self::VariadicParameterDeclaration,
            "type_parameter_declaration" => Self::TypeParameterDeclaration,
            "short_var_declaration" => Self::ShortVarDeclaration,
            "range_clause" => Self::RangeClause,
            "receive_statement" => Self::ReceiveStatement,
            "for_statement" => Self::ForStatement,
            "if_statement" => Self::IfStatement,
            "expression_switch_statement" => Self::ExpressionSwitchStatement,
            "type_switch_statement" => Self::TypeSwitchStatement,
            "select_statement" => Self::SelectStatement,
            "expression_case" => Self::ExpressionCase,
            "type_case" => Self::TypeCase,
            "default_case" => Self::DefaultCase,
            "communication_case" => Self::CommunicationCase,
            "keyed_element" => Self::KeyedElement,
            "literal_element" => Self::LiteralElement,
            "qualified_type" => Self::QualifiedType,
            "generic_type" => Self::GenericType,
            "type_arguments" => Self::TypeArguments,
            "expression_list" => Self::ExpressionList,

            "identifier" => Self::Identifier,
            "type_identifier" => Self::TypeIdentifier,
            "field_identifier" => Self::FieldIdentifier,
            "package_identifier" => Self::PackageIdentifier,
            "blank_identifier" => Self::BlankIdentifier,
            "label_name" => Self::LabelName,
            "dot" => Self::Dot,

            "interpreted_string_literal" => Self::Literal(Literal::InterpretedString),
            "raw_string_literal" => Self::Literal(Literal::RawString),
            "rune_literal" => Self::Literal(Literal::Rune),
            "int_literal" => Self::Literal(Literal::Int),
            "float_literal" => Self::Literal(Literal::Float),
            "imaginary_literal" => Self::Literal(Literal::Imaginary),
            "escape_sequence" => Self::EscapeSequence,

            "true" => Self::Constant(Constant::True),
            "false" => Self::Constant(Constant::False),
            "nil" => Self::Constant(Constant::Nil),
            "iota" => Self::Constant(Constant::Iota),

            _ => Self::Other,
        }
    }

    fn of_token(token: &str) -> Self {
        if let Some(keyword) = Keyword::from_token(token) {
            return Self::Keyword(keyword);
        }
        if is_operator(token) {
            return Self::Operator;
        }
        Self::Punctuation
    }
}

fn is_operator(token: &str) -> bool {
    matches!(
        token,
        "+" | "-"
            | "*"
            | "/"
            | "%"
            | "&"
            | "|"
            | "^"
            | "<<"
            | ">>"
            | "&^"
            | "+="
            | "-="
            | "*="
            | "/="
            | "%="
            | "&="
            | "|="
            | "^="
            | "<<="
            | ">>="
            | "&^="
            | "&&"
            | "||"
            | "<-"
            | "++"
            | "--"
            | "=="
            | "<"
            | ">"
            | "="
            | "!"
            | "~"
            | "!="
            | "<="
            | ">="
            | ":="
            | "..."
    )
}
