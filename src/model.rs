//! Data model for extracted documentation — format-agnostic.
//!
//! Records reference analyzer data through handles only. A renderer that
//! needs type text or default-value source asks the analyzer that produced
//! the records.

use crate::analyzer::{NodeId, SemanticAnalyzer, SymbolId, TypeId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Documentation for one processed source file.
#[derive(Debug, Clone, Serialize)]
pub struct DocSourceFile {
    pub file_name: String,
    /// Top-level members in declaration order.
    pub members: Vec<DocMember>,
}

/// A documented declaration.
#[derive(Debug, Clone, Serialize)]
pub struct DocMember {
    pub symbol: SymbolId,
    pub name: String,
    /// Lead comment text, extended by `@summary` tags.
    pub summary: String,
    /// @description / @desc / @remark
    pub description: Option<String>,
    /// @see / @seeAlso / @seealso
    pub see_also: Vec<String>,
    /// @example / @sample / @demo, fenced
    pub example: Option<String>,
    /// Every other tag, last occurrence wins
    pub custom_tags: BTreeMap<String, String>,
    #[serde(flatten)]
    pub kind: MemberKind,
}

impl DocMember {
    /// Empty record for `symbol`; tags are applied afterwards.
    pub fn new(symbol: SymbolId, name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            symbol,
            name: name.into(),
            summary: String::new(),
            description: None,
            see_also: Vec::new(),
            example: None,
            custom_tags: BTreeMap::new(),
            kind,
        }
    }

    /// Whether the declaration is exported. Asked of the analyzer on every
    /// call rather than cached on the record.
    pub fn is_exported<A: SemanticAnalyzer + ?Sized>(&self, analyzer: &A) -> bool {
        analyzer.is_exported(self.symbol)
    }

    pub fn as_method(&self) -> Option<&DocMethod> {
        match &self.kind {
            MemberKind::Method(method) => Some(method),
            _ => None,
        }
    }

    /// Type of a field or the aliased type of a type alias.
    pub fn value_type(&self) -> Option<TypeId> {
        match &self.kind {
            MemberKind::Field { ty } | MemberKind::TypeAlias { ty } => Some(*ty),
            _ => None,
        }
    }

    /// Nested members of a class, interface or enum.
    pub fn members(&self) -> &[DocMember] {
        match &self.kind {
            MemberKind::Class(class) => &class.members,
            MemberKind::Interface(interface) => &interface.members,
            MemberKind::Enum(e) => &e.members,
            _ => &[],
        }
    }
}

/// The closed set of member variants.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberKind {
    Field { ty: TypeId },
    Method(DocMethod),
    Class(DocClass),
    Interface(DocInterface),
    Enum(DocEnum),
    TypeAlias { ty: TypeId },
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Field { .. } => "field",
            MemberKind::Method(_) => "method",
            MemberKind::Class(_) => "class",
            MemberKind::Interface(_) => "interface",
            MemberKind::Enum(_) => "enum",
            MemberKind::TypeAlias { .. } => "type_alias",
        }
    }
}

/// Signature data of a function or method.
#[derive(Debug, Clone, Serialize)]
pub struct DocMethod {
    pub type_parameters: Vec<DocTypeParameter>,
    pub parameters: Vec<DocParameter>,
    pub return_type: TypeId,
    /// From the @returns tag
    pub return_summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DocClass {
    /// Base class symbol
    pub extends: Option<SymbolId>,
    pub implements: Vec<SymbolId>,
    pub members: Vec<DocMember>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DocInterface {
    pub extends: Vec<SymbolId>,
    pub members: Vec<DocMember>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DocEnum {
    pub members: Vec<DocMember>,
}

/// A value parameter of a callable.
#[derive(Debug, Clone, Serialize)]
pub struct DocParameter {
    pub symbol: SymbolId,
    pub name: String,
    pub summary: String,
    pub ty: TypeId,
    /// Spread, defaulted, or marked with `?`
    pub optional: bool,
    pub spread: bool,
    /// Default-value expression node
    pub default: Option<NodeId>,
}

/// A generic type parameter of a callable.
#[derive(Debug, Clone, Serialize)]
pub struct DocTypeParameter {
    pub symbol: SymbolId,
    pub name: String,
    pub summary: String,
    pub default: Option<TypeId>,
    /// Constraint type
    pub extends: Option<TypeId>,
}
