//! Node kinds and field names of the concrete syntax tree.

use std::fmt;

/// Grammar production a node was built from.
///
/// A node may also carry a presentation alias (see [`super::SyntaxNode::alias`]): a local `var` is built by the
/// `FieldDeclaration` production but presented as `VariableDeclaration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Module,

    // ========== Module-level statements ==========
    PackageStatement,
    ImportStatement,
    UsingStatement,
    PreprocessorDirective,
    Metadata,

    // ========== Declarations ==========
    ClassDeclaration,
    ClassBody,
    TypeParameters,
    TypeParameter,
    FieldDeclaration,
    PropertyAccessors,
    MethodDeclaration,
    ParameterList,
    Parameter,
    TypedefDeclaration,
    /// Presentation alias of a `FieldDeclaration` inside a function body.
    VariableDeclaration,
    /// Presentation alias of a `MethodDeclaration` inside a function body.
    LocalFunction,

    // ========== Statements ==========
    Block,
    ExpressionStatement,
    EmptyStatement,
    IfStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,

    // ========== Expressions ==========
    Identifier,
    ThisExpression,
    SuperExpression,
    ParenthesizedExpression,
    TypeCheckExpression,
    CastExpression,
    TypeTraceExpression,
    UntypedExpression,
    ReturnExpression,
    BreakExpression,
    ContinueExpression,
    RangeForExpression,
    SwitchExpression,
    SwitchCase,
    DefaultCase,
    ArrowFunction,
    FunctionExpression,
    IfExpression,
    BinaryExpression,
    AssignmentExpression,
    TernaryExpression,
    UnaryExpression,
    PostfixExpression,
    MemberExpression,
    SubscriptExpression,
    CallExpression,
    Arguments,
    NewExpression,
    MacroReification,

    // ========== Literals ==========
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    Interpolation,
    BoolLiteral,
    NullLiteral,
    RegexLiteral,
    ArrayLiteral,
    MapLiteral,
    ObjectLiteral,
    Pair,

    // ========== Types ==========
    NamedType,
    TypeArguments,
    FunctionType,
    ParenthesizedType,
    StructuralType,
    /// Member of a structural type; presented as `Pair`.
    StructuralTypeMember,
    OptionalType,

    // ========== Recovery ==========
    /// Tokens that could not be parsed, kept verbatim.
    Error,
    /// Zero-width placeholder for a required token that is absent.
    Missing,
}

impl SyntaxKind {
    /// Presentation name used by S-expression and JSON dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            SyntaxKind::Module => "module",
            SyntaxKind::PackageStatement => "package_statement",
            SyntaxKind::ImportStatement => "import_statement",
            SyntaxKind::UsingStatement => "using_statement",
            SyntaxKind::PreprocessorDirective => "preprocessor_directive",
            SyntaxKind::Metadata => "metadata",
            SyntaxKind::ClassDeclaration => "class_declaration",
            SyntaxKind::ClassBody => "class_body",
            SyntaxKind::TypeParameters => "type_parameters",
            SyntaxKind::TypeParameter => "type_parameter",
            SyntaxKind::FieldDeclaration => "field_declaration",
            SyntaxKind::PropertyAccessors => "property_accessors",
            SyntaxKind::MethodDeclaration => "method_declaration",
            SyntaxKind::ParameterList => "parameter_list",
            SyntaxKind::Parameter => "parameter",
            SyntaxKind::TypedefDeclaration => "typedef_declaration",
            SyntaxKind::VariableDeclaration => "variable_declaration",
            SyntaxKind::LocalFunction => "local_function",
            SyntaxKind::Block => "block",
            SyntaxKind::ExpressionStatement => "expression_statement",
            SyntaxKind::EmptyStatement => "empty_statement",
            SyntaxKind::IfStatement => "if_statement",
            SyntaxKind::WhileStatement => "while_statement",
            SyntaxKind::DoWhileStatement => "do_while_statement",
            SyntaxKind::ForStatement => "for_statement",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::ThisExpression => "this_expression",
            SyntaxKind::SuperExpression => "super_expression",
            SyntaxKind::ParenthesizedExpression => "parenthesized_expression",
            SyntaxKind::TypeCheckExpression => "type_check_expression",
            SyntaxKind::CastExpression => "cast_expression",
            SyntaxKind::TypeTraceExpression => "type_trace_expression",
            SyntaxKind::UntypedExpression => "untyped_expression",
            SyntaxKind::ReturnExpression => "return_expression",
            SyntaxKind::BreakExpression => "break_expression",
            SyntaxKind::ContinueExpression => "continue_expression",
            SyntaxKind::RangeForExpression => "range_for_expression",
            SyntaxKind::SwitchExpression => "switch_expression",
            SyntaxKind::SwitchCase => "switch_case",
            SyntaxKind::DefaultCase => "default_case",
            SyntaxKind::ArrowFunction => "arrow_function",
            SyntaxKind::FunctionExpression => "function_expression",
            SyntaxKind::IfExpression => "if_expression",
            SyntaxKind::BinaryExpression => "binary_expression",
            SyntaxKind::AssignmentExpression => "assignment_expression",
            SyntaxKind::TernaryExpression => "ternary_expression",
            SyntaxKind::UnaryExpression => "unary_expression",
            SyntaxKind::PostfixExpression => "postfix_expression",
            SyntaxKind::MemberExpression => "member_expression",
            SyntaxKind::SubscriptExpression => "subscript_expression",
            SyntaxKind::CallExpression => "call_expression",
            SyntaxKind::Arguments => "arguments",
            SyntaxKind::NewExpression => "new_expression",
            SyntaxKind::MacroReification => "macro_reification",
            SyntaxKind::IntegerLiteral => "integer",
            SyntaxKind::FloatLiteral => "float",
            SyntaxKind::StringLiteral => "string",
            SyntaxKind::Interpolation => "interpolation",
            SyntaxKind::BoolLiteral => "bool",
            SyntaxKind::NullLiteral => "null",
            SyntaxKind::RegexLiteral => "regex",
            SyntaxKind::ArrayLiteral => "array",
            SyntaxKind::MapLiteral => "map",
            SyntaxKind::ObjectLiteral => "object",
            SyntaxKind::Pair => "pair",
            SyntaxKind::NamedType => "type",
            SyntaxKind::TypeArguments => "type_arguments",
            SyntaxKind::FunctionType => "function_type",
            SyntaxKind::ParenthesizedType => "parenthesized_type",
            SyntaxKind::StructuralType => "structure_type",
            SyntaxKind::StructuralTypeMember => "structure_type_member",
            SyntaxKind::OptionalType => "optional_type",
            SyntaxKind::Error => "ERROR",
            SyntaxKind::Missing => "MISSING",
        }
    }

    /// Return `true` for the recovery placeholders `Error` and `Missing`.
    pub fn is_recovery(self) -> bool {
        matches!(self, SyntaxKind::Error | SyntaxKind::Missing)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name under which a child is reachable from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Accessors,
    Alias,
    Alternative,
    Arguments,
    Body,
    Condition,
    Consequence,
    Constraint,
    Default,
    Expression,
    Function,
    Guard,
    Index,
    Interface,
    Iterator,
    Key,
    Left,
    Metadata,
    Modifier,
    Name,
    Object,
    Operand,
    Operator,
    Optional,
    Parameter,
    Parameters,
    Path,
    Pattern,
    Property,
    ReturnType,
    Right,
    Subject,
    Superclass,
    Type,
    TypeArguments,
    TypeParameters,
    Value,
    Wildcard,
}

impl FieldName {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Accessors => "accessors",
            FieldName::Alias => "alias",
            FieldName::Alternative => "alternative",
            FieldName::Arguments => "arguments",
            FieldName::Body => "body",
            FieldName::Condition => "condition",
            FieldName::Consequence => "consequence",
            FieldName::Constraint => "constraint",
            FieldName::Default => "default",
            FieldName::Expression => "expression",
            FieldName::Function => "function",
            FieldName::Guard => "guard",
            FieldName::Index => "index",
            FieldName::Interface => "interface",
            FieldName::Iterator => "iterator",
            FieldName::Key => "key",
            FieldName::Left => "left",
            FieldName::Metadata => "metadata",
            FieldName::Modifier => "modifier",
            FieldName::Name => "name",
            FieldName::Object => "object",
            FieldName::Operand => "operand",
            FieldName::Operator => "operator",
            FieldName::Optional => "optional",
            FieldName::Parameter => "parameter",
            FieldName::Parameters => "parameters",
            FieldName::Path => "path",
            FieldName::Pattern => "pattern",
            FieldName::Property => "property",
            FieldName::ReturnType => "return_type",
            FieldName::Right => "right",
            FieldName::Subject => "subject",
            FieldName::Superclass => "superclass",
            FieldName::Type => "type",
            FieldName::TypeArguments => "type_arguments",
            FieldName::TypeParameters => "type_parameters",
            FieldName::Value => "value",
            FieldName::Wildcard => "wildcard",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
