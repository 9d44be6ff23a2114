//! Semantic analyzer interface: the extractor's only view of the program.
//!
//! Parsing, name resolution and type inference live behind
//! [`SemanticAnalyzer`]. The extractor never owns analyzer data: symbols,
//! types and nodes are exchanged as opaque handles that stay valid for the
//! lifetime of the analyzer session that produced them.

pub mod memory;
pub mod syntax;

use serde::Serialize;
use syntax::SourceFile;

/// Handle to a symbol in the analyzer's symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

/// Handle to a semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

/// Handle to a node of the analyzer's syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

/// A raw documentation tag, e.g. `@see Other` → `("see", "Other")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsDocTag {
    pub name: String,
    pub text: String,
}

impl JsDocTag {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Resolved call signature of a callable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub type_parameters: Vec<TypeParameterInfo>,
    /// Parameter symbols in declared order.
    pub parameters: Vec<SymbolId>,
    pub return_type: TypeId,
}

/// A generic type parameter as seen by the checker.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterInfo {
    pub symbol: SymbolId,
    pub default: Option<TypeId>,
    pub constraint: Option<TypeId>,
}

/// The declaration that introduces a value symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueDeclaration {
    Variable(NodeId),
    Function(NodeId),
    Parameter(ParameterDeclaration),
}

impl ValueDeclaration {
    pub fn node(&self) -> NodeId {
        match self {
            ValueDeclaration::Variable(node) | ValueDeclaration::Function(node) => *node,
            ValueDeclaration::Parameter(param) => param.node,
        }
    }
}

/// Syntax of a single parameter declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    pub node: NodeId,
    /// Default-value expression, if any.
    pub initializer: Option<NodeId>,
    /// `...rest`
    pub dot_dot_dot: bool,
    /// `name?`
    pub question: bool,
}

/// Read-only oracle over one type-checked program snapshot.
///
/// Every method is a pure query; calling it twice with the same arguments
/// yields the same answer for the lifetime of the analyzer.
///
/// Handles are only meaningful to the analyzer that issued them. Given a
/// foreign handle, an implementation answers with empty or `None` values
/// rather than panicking.
pub trait SemanticAnalyzer {
    /// All source files of the program, in program order.
    fn source_files(&self) -> &[SourceFile];

    /// Resolve a name-bearing node to its symbol.
    fn symbol_at(&self, name: NodeId) -> Option<SymbolId>;

    fn symbol_name(&self, symbol: SymbolId) -> String;

    /// Lead documentation-comment text, possibly empty.
    fn documentation_of(&self, symbol: SymbolId) -> String;

    /// All documentation tags attached to the symbol, in source order.
    fn tags_of(&self, symbol: SymbolId) -> Vec<JsDocTag>;

    fn value_declaration(&self, symbol: SymbolId) -> Option<ValueDeclaration>;

    /// Type of the value `symbol` at the given declaration site.
    fn type_of_symbol_at(&self, symbol: SymbolId, site: NodeId) -> TypeId;

    /// Declared type of a type symbol (the aliased type for a type alias).
    fn declared_type_of(&self, symbol: SymbolId) -> TypeId;

    fn signature_of(&self, declaration: NodeId) -> Option<Signature>;

    /// Text of the `@returns` tag on a callable declaration.
    fn return_tag_of(&self, declaration: NodeId) -> Option<String>;

    fn is_exported(&self, symbol: SymbolId) -> bool;

    /// Human-readable form of a type, for renderers.
    fn type_to_string(&self, ty: TypeId) -> String;

    /// Source text of a node, for renderers.
    fn node_text(&self, node: NodeId) -> String;
}
