//! Documentation extraction from an analyzed program.
//!
//! Walks the top-level statements of every source file and maps each
//! documentable declaration onto a [`DocMember`], in declaration order.

pub mod signature;
pub mod tags;

use crate::analyzer::syntax::{
    ClassDeclaration, FunctionDeclaration, InterfaceDeclaration, SourceFile, Statement,
    VariableStatement,
};
use crate::analyzer::{NodeId, SemanticAnalyzer, SymbolId};
use crate::config::Settings;
use crate::error::{ExtractError, Result};
use crate::model::{DocClass, DocEnum, DocInterface, DocMember, DocSourceFile, MemberKind};
use tracing::{debug, trace};

/// Extracts documentation through a [`SemanticAnalyzer`].
pub struct DocExtractor<'a, A: SemanticAnalyzer + ?Sized> {
    analyzer: &'a A,
    settings: Settings,
}

impl<'a, A: SemanticAnalyzer + ?Sized> DocExtractor<'a, A> {
    pub fn new(analyzer: &'a A) -> Self {
        Self {
            analyzer,
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Extract every source file of the program.
    ///
    /// All-or-nothing: the first error aborts the pass.
    pub fn extract(&self) -> Result<Vec<DocSourceFile>> {
        let mut result = Vec::new();
        for file in self.analyzer.source_files() {
            if file.is_declaration_file && !self.settings.include_declaration_files {
                debug!("skipping declaration file {}", file.file_name);
                continue;
            }
            result.push(self.extract_source_file(file)?);
        }
        Ok(result)
    }

    /// Extract the top-level members of one source file.
    pub fn extract_source_file(&self, file: &SourceFile) -> Result<DocSourceFile> {
        let mut members = Vec::new();
        for statement in &file.statements {
            self.visit_statement(file, statement, &mut members)?;
        }
        debug!("extracted {} members from {}", members.len(), file.file_name);
        Ok(DocSourceFile {
            file_name: file.file_name.clone(),
            members,
        })
    }

    fn visit_statement(
        &self,
        file: &SourceFile,
        statement: &Statement,
        members: &mut Vec<DocMember>,
    ) -> Result<()> {
        match statement {
            Statement::Variable(s) => self.visit_variable_statement(file, s, members)?,
            Statement::Function(s) => members.push(self.visit_function(file, s)?),
            Statement::Class(s) if self.settings.type_declarations => {
                members.push(self.visit_class(file, s)?)
            }
            Statement::Interface(s) if self.settings.type_declarations => {
                members.push(self.visit_interface(file, s)?)
            }
            Statement::Enum(s) if self.settings.type_declarations => {
                let symbol = self.resolve(file, Some(s.name), s.node)?;
                members.push(self.init_member(symbol, MemberKind::Enum(DocEnum::default())));
            }
            Statement::TypeAlias(s) if self.settings.type_declarations => {
                let symbol = self.resolve(file, Some(s.name), s.node)?;
                let ty = self.analyzer.declared_type_of(symbol);
                members.push(self.init_member(symbol, MemberKind::TypeAlias { ty }));
            }
            other => {
                trace!("ignoring statement {:?}", other.node());
            }
        }
        Ok(())
    }

    fn visit_variable_statement(
        &self,
        file: &SourceFile,
        statement: &VariableStatement,
        members: &mut Vec<DocMember>,
    ) -> Result<()> {
        for declaration in &statement.declarations {
            let symbol = self.resolve(file, Some(declaration.name), declaration.node)?;
            let site = self.analyzer.value_declaration(symbol).ok_or_else(|| {
                ExtractError::MissingValueDeclaration {
                    name: self.analyzer.symbol_name(symbol),
                }
            })?;
            let ty = self.analyzer.type_of_symbol_at(symbol, site.node());
            members.push(self.init_member(symbol, MemberKind::Field { ty }));
        }
        Ok(())
    }

    fn visit_function(
        &self,
        file: &SourceFile,
        declaration: &FunctionDeclaration,
    ) -> Result<DocMember> {
        let symbol = self.resolve(file, declaration.name, declaration.node)?;
        let name = self.analyzer.symbol_name(symbol);
        let method = signature::extract_signature(self.analyzer, declaration.node, &name)?;
        Ok(self.init_member(symbol, MemberKind::Method(method)))
    }

    // Nested members are not traversed; `members` stays empty.
    fn visit_class(&self, file: &SourceFile, declaration: &ClassDeclaration) -> Result<DocMember> {
        let symbol = self.resolve(file, declaration.name, declaration.node)?;
        let class = DocClass {
            extends: declaration.extends.and_then(|node| self.heritage(node)),
            implements: declaration
                .implements
                .iter()
                .filter_map(|&node| self.heritage(node))
                .collect(),
            members: Vec::new(),
        };
        Ok(self.init_member(symbol, MemberKind::Class(class)))
    }

    fn visit_interface(
        &self,
        file: &SourceFile,
        declaration: &InterfaceDeclaration,
    ) -> Result<DocMember> {
        let symbol = self.resolve(file, Some(declaration.name), declaration.node)?;
        let interface = DocInterface {
            extends: declaration
                .extends
                .iter()
                .filter_map(|&node| self.heritage(node))
                .collect(),
            members: Vec::new(),
        };
        Ok(self.init_member(symbol, MemberKind::Interface(interface)))
    }

    /// Resolve a declaration's name node; a missing name, a missing symbol
    /// or an empty symbol name is fatal.
    fn resolve(&self, file: &SourceFile, name: Option<NodeId>, node: NodeId) -> Result<SymbolId> {
        name.and_then(|name| self.analyzer.symbol_at(name))
            .filter(|&symbol| !self.analyzer.symbol_name(symbol).is_empty())
            .ok_or_else(|| ExtractError::UnresolvedSymbol {
                file: file.file_name.clone(),
                node,
            })
    }

    /// Heritage clauses may name types from outside the program.
    fn heritage(&self, node: NodeId) -> Option<SymbolId> {
        let symbol = self.analyzer.symbol_at(node);
        if symbol.is_none() {
            trace!("unresolved heritage reference {:?}", node);
        }
        symbol
    }

    /// Fill name, summary and tag-derived fields.
    fn init_member(&self, symbol: SymbolId, kind: MemberKind) -> DocMember {
        let mut member = DocMember::new(symbol, self.analyzer.symbol_name(symbol), kind);
        member.summary = self.analyzer.documentation_of(symbol);
        trace!("documenting {} {}", member.kind.as_str(), member.name);
        for tag in self.analyzer.tags_of(symbol) {
            trace!("  @{} on {}", tag.name, member.name);
            tags::apply_tag(&mut member, &tag, &self.settings.example_language);
        }
        member
    }
}
