//! Top-level declaration tree handed out by the analyzer.
//!
//! Only the shape the extractor dispatches on is modelled; everything below
//! a statement is reachable through [`NodeId`] handles.

use super::NodeId;

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_name: String,
    /// Ambient declaration file (`.d.ts`).
    pub is_declaration_file: bool,
    pub statements: Vec<Statement>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            is_declaration_file: false,
            statements: Vec::new(),
        }
    }
}

/// A top-level statement.
#[derive(Debug, Clone)]
pub enum Statement {
    Variable(VariableStatement),
    Function(FunctionDeclaration),
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    TypeAlias(TypeAliasDeclaration),
    /// Imports, expression statements and the like.
    Other(NodeId),
}

impl Statement {
    pub fn node(&self) -> NodeId {
        match self {
            Statement::Variable(s) => s.node,
            Statement::Function(s) => s.node,
            Statement::Class(s) => s.node,
            Statement::Interface(s) => s.node,
            Statement::Enum(s) => s.node,
            Statement::TypeAlias(s) => s.node,
            Statement::Other(node) => *node,
        }
    }
}

/// `const a = 1, b = 2;`
#[derive(Debug, Clone)]
pub struct VariableStatement {
    pub node: NodeId,
    pub declarations: Vec<VariableDeclaration>,
}

#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    pub node: NodeId,
    pub name: NodeId,
}

#[derive(Debug, Clone)]
pub struct FunctionDeclaration {
    pub node: NodeId,
    /// `None` for `export default function () {}`.
    pub name: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct ClassDeclaration {
    pub node: NodeId,
    pub name: Option<NodeId>,
    /// Expression in the `extends` clause.
    pub extends: Option<NodeId>,
    pub implements: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct InterfaceDeclaration {
    pub node: NodeId,
    pub name: NodeId,
    pub extends: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct EnumDeclaration {
    pub node: NodeId,
    pub name: NodeId,
}

#[derive(Debug, Clone)]
pub struct TypeAliasDeclaration {
    pub node: NodeId,
    pub name: NodeId,
}
