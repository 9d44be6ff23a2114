//! In-memory analyzer built from declaration specs.
//!
//! Stands in for a real type checker: declarations are registered with their
//! raw doc comments and type text, and the analyzer answers the extractor's
//! queries from plain tables. Parameter and type-parameter summaries fall
//! back to the owning function's `@param` / `@template` tags, and the
//! `@returns` tag is exposed per declaration, as a checker would do.
//!
//! ```
//! use docparser::analyzer::memory::{FunctionSpec, MemoryAnalyzer, ParameterSpec};
//!
//! let mut analyzer = MemoryAnalyzer::new();
//! let file = analyzer.add_source_file("math.ts");
//! analyzer.add_function(
//!     file,
//!     FunctionSpec::new("add", "number")
//!         .doc("/** Adds two numbers. */")
//!         .parameter(ParameterSpec::new("a", "number"))
//!         .exported(),
//! );
//! let docs = docparser::extract(&analyzer).unwrap();
//! assert_eq!(docs[0].members[0].name, "add");
//! ```

use super::syntax::{
    ClassDeclaration, EnumDeclaration, FunctionDeclaration, InterfaceDeclaration, SourceFile,
    Statement, TypeAliasDeclaration, VariableDeclaration, VariableStatement,
};
use super::{
    JsDocTag, NodeId, ParameterDeclaration, SemanticAnalyzer, Signature, SymbolId, TypeId,
    TypeParameterInfo, ValueDeclaration,
};
use crate::jsdoc::{self, DocComment};
use std::collections::HashMap;

/// Type used when nothing more specific is known.
pub const ANY: TypeId = TypeId(0);

#[derive(Debug, Default)]
struct SymbolData {
    name: String,
    documentation: String,
    tags: Vec<JsDocTag>,
    exported: bool,
    value_declaration: Option<ValueDeclaration>,
    value_type: Option<TypeId>,
    declared_type: Option<TypeId>,
}

/// Answers for handles this analyzer never issued.
static UNKNOWN_SYMBOL: SymbolData = SymbolData {
    name: String::new(),
    documentation: String::new(),
    tags: Vec::new(),
    exported: false,
    value_declaration: None,
    value_type: None,
    declared_type: None,
};

/// Table-backed [`SemanticAnalyzer`].
#[derive(Debug)]
pub struct MemoryAnalyzer {
    files: Vec<SourceFile>,
    symbols: Vec<SymbolData>,
    types: Vec<String>,
    type_ids: HashMap<String, TypeId>,
    /// Source text per node, indexed by `NodeId`.
    nodes: Vec<String>,
    name_symbols: HashMap<NodeId, SymbolId>,
    /// Class and interface names, the only valid heritage targets.
    type_names: HashMap<String, SymbolId>,
    /// Heritage name nodes, bound on lookup so later declarations count.
    references: HashMap<NodeId, String>,
    signatures: HashMap<NodeId, Signature>,
    return_tags: HashMap<NodeId, String>,
}

impl Default for MemoryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAnalyzer {
    pub fn new() -> Self {
        let mut analyzer = Self {
            files: Vec::new(),
            symbols: Vec::new(),
            types: Vec::new(),
            type_ids: HashMap::new(),
            nodes: Vec::new(),
            name_symbols: HashMap::new(),
            type_names: HashMap::new(),
            references: HashMap::new(),
            signatures: HashMap::new(),
            return_tags: HashMap::new(),
        };
        analyzer.intern_type("any");
        analyzer
    }

    // -- Program construction -------------------------------------------------

    /// Add a source file; returns its index for the `add_*` calls.
    pub fn add_source_file(&mut self, file_name: &str) -> usize {
        self.files.push(SourceFile::new(file_name));
        self.files.len() - 1
    }

    /// Add an ambient declaration file (`.d.ts`).
    pub fn add_declaration_file(&mut self, file_name: &str) -> usize {
        let mut file = SourceFile::new(file_name);
        file.is_declaration_file = true;
        self.files.push(file);
        self.files.len() - 1
    }

    /// Add a variable statement declaring every spec in one list
    /// (`const a = 1, b = 2;`). Returns the statement node.
    pub fn add_variables(&mut self, file: usize, specs: Vec<VariableSpec>) -> NodeId {
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        let statement = self.node(format!("const {};", names.join(", ")));

        let mut declarations = Vec::with_capacity(specs.len());
        for spec in specs {
            let node = self.node(spec.name.clone());
            let comment = parse_doc(spec.doc.as_deref());
            let (name, symbol) = self.declare(&spec.name, &comment, spec.exported);
            let ty = self.intern_type(&spec.ty);
            let data = self.symbol_mut(symbol);
            data.value_declaration = Some(ValueDeclaration::Variable(node));
            data.value_type = Some(ty);
            declarations.push(VariableDeclaration { node, name });
        }

        self.files[file]
            .statements
            .push(Statement::Variable(VariableStatement {
                node: statement,
                declarations,
            }));
        statement
    }

    /// Add a single-variable statement.
    pub fn add_variable(&mut self, file: usize, spec: VariableSpec) -> NodeId {
        self.add_variables(file, vec![spec])
    }

    /// Add a function declaration. Returns the declaration node.
    pub fn add_function(&mut self, file: usize, spec: FunctionSpec) -> NodeId {
        let node = self.node(format!(
            "function {}()",
            spec.name.as_deref().unwrap_or_default()
        ));
        let comment = parse_doc(spec.doc.as_deref());

        let name = spec.name.as_deref().map(|name| {
            let (name_node, symbol) = self.declare(name, &comment, spec.exported);
            self.symbol_mut(symbol).value_declaration = Some(ValueDeclaration::Function(node));
            name_node
        });

        let mut type_parameters = Vec::with_capacity(spec.type_parameters.len());
        for tp in spec.type_parameters {
            let summary = tp.doc.or_else(|| comment.template(&tp.name));
            let symbol = self.new_symbol(&tp.name, summary.unwrap_or_default());
            type_parameters.push(TypeParameterInfo {
                symbol,
                default: tp.default.map(|t| self.intern_type(&t)),
                constraint: tp.constraint.map(|t| self.intern_type(&t)),
            });
        }

        let mut parameters = Vec::with_capacity(spec.parameters.len());
        for param in spec.parameters {
            let param_node = self.node(param.name.clone());
            let initializer = param.default.map(|expr| self.node(expr));
            let summary = param.doc.or_else(|| comment.param(&param.name));
            let symbol = self.new_symbol(&param.name, summary.unwrap_or_default());
            let ty = self.intern_type(&param.ty);
            let data = self.symbol_mut(symbol);
            data.value_declaration = Some(ValueDeclaration::Parameter(ParameterDeclaration {
                node: param_node,
                initializer,
                dot_dot_dot: param.spread,
                question: param.question,
            }));
            data.value_type = Some(ty);
            parameters.push(symbol);
        }

        let return_type = self.intern_type(&spec.return_type);
        self.signatures.insert(
            node,
            Signature {
                type_parameters,
                parameters,
                return_type,
            },
        );
        if let Some(returns) = comment.returns() {
            self.return_tags.insert(node, returns);
        }

        self.files[file]
            .statements
            .push(Statement::Function(FunctionDeclaration { node, name }));
        node
    }

    pub fn add_class(&mut self, file: usize, spec: ClassSpec) -> NodeId {
        let node = self.node(format!(
            "class {}",
            spec.name.as_deref().unwrap_or_default()
        ));
        let comment = parse_doc(spec.doc.as_deref());
        let name = spec.name.as_deref().map(|name| {
            let (name_node, symbol) = self.declare(name, &comment, spec.exported);
            self.declare_type_name(name, symbol);
            name_node
        });
        let extends = spec.extends.map(|base| self.reference(&base));
        let implements = spec
            .implements
            .iter()
            .map(|interface| self.reference(interface))
            .collect();

        self.files[file]
            .statements
            .push(Statement::Class(ClassDeclaration {
                node,
                name,
                extends,
                implements,
            }));
        node
    }

    pub fn add_interface(&mut self, file: usize, spec: InterfaceSpec) -> NodeId {
        let node = self.node(format!("interface {}", spec.name));
        let comment = parse_doc(spec.doc.as_deref());
        let (name, symbol) = self.declare(&spec.name, &comment, spec.exported);
        self.declare_type_name(&spec.name, symbol);
        let extends = spec
            .extends
            .iter()
            .map(|base| self.reference(base))
            .collect();

        self.files[file]
            .statements
            .push(Statement::Interface(InterfaceDeclaration {
                node,
                name,
                extends,
            }));
        node
    }

    pub fn add_enum(&mut self, file: usize, spec: EnumSpec) -> NodeId {
        let node = self.node(format!("enum {}", spec.name));
        let comment = parse_doc(spec.doc.as_deref());
        let (name, _) = self.declare(&spec.name, &comment, spec.exported);

        self.files[file]
            .statements
            .push(Statement::Enum(EnumDeclaration { node, name }));
        node
    }

    pub fn add_type_alias(&mut self, file: usize, spec: TypeAliasSpec) -> NodeId {
        let node = self.node(format!("type {} = {}", spec.name, spec.ty));
        let comment = parse_doc(spec.doc.as_deref());
        let (name, symbol) = self.declare(&spec.name, &comment, spec.exported);
        let ty = self.intern_type(&spec.ty);
        self.symbol_mut(symbol).declared_type = Some(ty);

        self.files[file]
            .statements
            .push(Statement::TypeAlias(TypeAliasDeclaration { node, name }));
        node
    }

    /// Add a statement the extractor has no use for (imports, expressions).
    pub fn add_other_statement(&mut self, file: usize, text: &str) -> NodeId {
        let node = self.node(text);
        self.files[file].statements.push(Statement::Other(node));
        node
    }

    // -- Lookups and overrides ------------------------------------------------

    /// First symbol registered under `name`.
    pub fn symbol_named(&self, name: &str) -> Option<SymbolId> {
        self.symbols
            .iter()
            .position(|s| s.name == name)
            .map(|i| SymbolId(i as u32))
    }

    /// Intern a type by its display text.
    pub fn intern_type(&mut self, text: &str) -> TypeId {
        if let Some(&id) = self.type_ids.get(text) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(text.to_string());
        self.type_ids.insert(text.to_string(), id);
        id
    }

    /// Ignored for handles this analyzer never issued.
    pub fn set_exported(&mut self, symbol: SymbolId, exported: bool) {
        if let Some(data) = self.symbols.get_mut(symbol.0 as usize) {
            data.exported = exported;
        }
    }

    /// Replace a symbol's value declaration, e.g. to model a checker that
    /// lost track of where a parameter was declared.
    pub fn set_value_declaration(&mut self, symbol: SymbolId, declaration: Option<ValueDeclaration>) {
        if let Some(data) = self.symbols.get_mut(symbol.0 as usize) {
            data.value_declaration = declaration;
        }
    }

    /// Drop the call signature recorded for a function declaration.
    pub fn remove_signature(&mut self, declaration: NodeId) -> Option<Signature> {
        self.signatures.remove(&declaration)
    }

    // -- Internals ------------------------------------------------------------

    fn node(&mut self, text: impl Into<String>) -> NodeId {
        self.nodes.push(text.into());
        NodeId(self.nodes.len() as u32 - 1)
    }

    fn new_symbol(&mut self, name: &str, documentation: String) -> SymbolId {
        self.symbols.push(SymbolData {
            name: name.to_string(),
            documentation,
            ..Default::default()
        });
        SymbolId(self.symbols.len() as u32 - 1)
    }

    /// Create a name node bound to a fresh documented symbol.
    fn declare(&mut self, name: &str, comment: &DocComment, exported: bool) -> (NodeId, SymbolId) {
        let name_node = self.node(name);
        let symbol = self.new_symbol(name, comment.summary.clone());
        let data = self.symbol_mut(symbol);
        data.tags = comment.tags.clone();
        data.exported = exported;
        self.name_symbols.insert(name_node, symbol);
        (name_node, symbol)
    }

    /// Declarations of one name merge; the first one owns the symbol.
    fn declare_type_name(&mut self, name: &str, symbol: SymbolId) {
        self.type_names.entry(name.to_string()).or_insert(symbol);
    }

    /// A node naming a class or interface anywhere in the program; left
    /// unbound when no such declaration exists.
    fn reference(&mut self, name: &str) -> NodeId {
        let node = self.node(name);
        self.references.insert(node, name.to_string());
        node
    }

    fn symbol(&self, symbol: SymbolId) -> &SymbolData {
        self.symbols
            .get(symbol.0 as usize)
            .unwrap_or(&UNKNOWN_SYMBOL)
    }

    // Only called with handles fresh from `new_symbol`.
    fn symbol_mut(&mut self, symbol: SymbolId) -> &mut SymbolData {
        &mut self.symbols[symbol.0 as usize]
    }
}

fn parse_doc(raw: Option<&str>) -> DocComment {
    raw.map(jsdoc::parse).unwrap_or_default()
}

impl SemanticAnalyzer for MemoryAnalyzer {
    fn source_files(&self) -> &[SourceFile] {
        &self.files
    }

    fn symbol_at(&self, name: NodeId) -> Option<SymbolId> {
        if let Some(&symbol) = self.name_symbols.get(&name) {
            return Some(symbol);
        }
        let referenced = self.references.get(&name)?;
        self.type_names.get(referenced).copied()
    }

    fn symbol_name(&self, symbol: SymbolId) -> String {
        self.symbol(symbol).name.clone()
    }

    fn documentation_of(&self, symbol: SymbolId) -> String {
        self.symbol(symbol).documentation.clone()
    }

    fn tags_of(&self, symbol: SymbolId) -> Vec<JsDocTag> {
        self.symbol(symbol).tags.clone()
    }

    fn value_declaration(&self, symbol: SymbolId) -> Option<ValueDeclaration> {
        self.symbol(symbol).value_declaration.clone()
    }

    fn type_of_symbol_at(&self, symbol: SymbolId, _site: NodeId) -> TypeId {
        self.symbol(symbol).value_type.unwrap_or(ANY)
    }

    fn declared_type_of(&self, symbol: SymbolId) -> TypeId {
        let data = self.symbol(symbol);
        data.declared_type.or(data.value_type).unwrap_or(ANY)
    }

    fn signature_of(&self, declaration: NodeId) -> Option<Signature> {
        self.signatures.get(&declaration).cloned()
    }

    fn return_tag_of(&self, declaration: NodeId) -> Option<String> {
        self.return_tags.get(&declaration).cloned()
    }

    fn is_exported(&self, symbol: SymbolId) -> bool {
        self.symbol(symbol).exported
    }

    fn type_to_string(&self, ty: TypeId) -> String {
        self.types
            .get(ty.0 as usize)
            .cloned()
            .unwrap_or_else(|| "any".to_string())
    }

    fn node_text(&self, node: NodeId) -> String {
        self.nodes.get(node.0 as usize).cloned().unwrap_or_default()
    }
}

// -- Declaration specs --------------------------------------------------------

/// `[export] const name: ty`
#[derive(Debug, Clone)]
pub struct VariableSpec {
    name: String,
    ty: String,
    doc: Option<String>,
    exported: bool,
}

impl VariableSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            exported: false,
        }
    }

    /// Raw `/** ... */` comment.
    pub fn doc(mut self, raw: impl Into<String>) -> Self {
        self.doc = Some(raw.into());
        self
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }
}

/// `[export] function name<T...>(params...): return_type`
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    name: Option<String>,
    return_type: String,
    doc: Option<String>,
    exported: bool,
    type_parameters: Vec<TypeParameterSpec>,
    parameters: Vec<ParameterSpec>,
}

impl FunctionSpec {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::anonymous(return_type)
        }
    }

    /// `export default function () {}`
    pub fn anonymous(return_type: impl Into<String>) -> Self {
        Self {
            name: None,
            return_type: return_type.into(),
            doc: None,
            exported: false,
            type_parameters: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn doc(mut self, raw: impl Into<String>) -> Self {
        self.doc = Some(raw.into());
        self
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn type_parameter(mut self, tp: TypeParameterSpec) -> Self {
        self.type_parameters.push(tp);
        self
    }

    pub fn parameter(mut self, param: ParameterSpec) -> Self {
        self.parameters.push(param);
        self
    }
}

/// `name?: ty = default` or `...name: ty`
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    name: String,
    ty: String,
    doc: Option<String>,
    default: Option<String>,
    spread: bool,
    question: bool,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            default: None,
            spread: false,
            question: false,
        }
    }

    /// Summary overriding the function's `@param` tag.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    /// Default-value expression source.
    pub fn default(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    pub fn spread(mut self) -> Self {
        self.spread = true;
        self
    }

    /// Marked with `?`.
    pub fn optional(mut self) -> Self {
        self.question = true;
        self
    }
}

/// `T extends constraint = default`
#[derive(Debug, Clone)]
pub struct TypeParameterSpec {
    name: String,
    doc: Option<String>,
    constraint: Option<String>,
    default: Option<String>,
}

impl TypeParameterSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            constraint: None,
            default: None,
        }
    }

    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    pub fn extends(mut self, ty: impl Into<String>) -> Self {
        self.constraint = Some(ty.into());
        self
    }

    pub fn default(mut self, ty: impl Into<String>) -> Self {
        self.default = Some(ty.into());
        self
    }
}

/// `[export] class Name extends Base implements I1, I2`
#[derive(Debug, Clone, Default)]
pub struct ClassSpec {
    name: Option<String>,
    doc: Option<String>,
    exported: bool,
    extends: Option<String>,
    implements: Vec<String>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn doc(mut self, raw: impl Into<String>) -> Self {
        self.doc = Some(raw.into());
        self
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.extends = Some(base.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }
}

/// `[export] interface Name extends A, B`
#[derive(Debug, Clone)]
pub struct InterfaceSpec {
    name: String,
    doc: Option<String>,
    exported: bool,
    extends: Vec<String>,
}

impl InterfaceSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            exported: false,
            extends: Vec::new(),
        }
    }

    pub fn doc(mut self, raw: impl Into<String>) -> Self {
        self.doc = Some(raw.into());
        self
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.extends.push(base.into());
        self
    }
}

/// `[export] enum Name`
#[derive(Debug, Clone)]
pub struct EnumSpec {
    name: String,
    doc: Option<String>,
    exported: bool,
}

impl EnumSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            exported: false,
        }
    }

    pub fn doc(mut self, raw: impl Into<String>) -> Self {
        self.doc = Some(raw.into());
        self
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }
}

/// `[export] type Name = ty`
#[derive(Debug, Clone)]
pub struct TypeAliasSpec {
    name: String,
    ty: String,
    doc: Option<String>,
    exported: bool,
}

impl TypeAliasSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            exported: false,
        }
    }

    pub fn doc(mut self, raw: impl Into<String>) -> Self {
        self.doc = Some(raw.into());
        self
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }
}
