//! docparser — documentation model extraction for type-checked programs.
//!
//! Given a [`SemanticAnalyzer`] over a TypeScript-like program, produces one
//! [`DocSourceFile`] per source file holding a [`DocMember`] for every
//! top-level variable and function, in declaration order:
//!
//! 1. **Visit** — [`DocExtractor`] walks the top-level statements
//! 2. **Classify** — documentation tags are routed onto structured fields
//!    or the custom-tag bag ([`extract::tags`])
//! 3. **Signature** — callables get their type parameters, parameters and
//!    return type flattened ([`extract::signature`])
//!
//! Parsing, name resolution and type inference stay with the analyzer;
//! [`analyzer::memory::MemoryAnalyzer`] is a table-backed implementation.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod extract;
pub mod jsdoc;
pub mod model;

pub use analyzer::SemanticAnalyzer;
pub use config::Settings;
pub use error::{ExtractError, Result};
pub use extract::DocExtractor;
pub use model::*;

/// Extract documentation with default settings.
pub fn extract<A: SemanticAnalyzer + ?Sized>(analyzer: &A) -> Result<Vec<DocSourceFile>> {
    DocExtractor::new(analyzer).extract()
}

/// Extract documentation with explicit settings.
pub fn extract_with<A: SemanticAnalyzer + ?Sized>(
    analyzer: &A,
    settings: Settings,
) -> Result<Vec<DocSourceFile>> {
    DocExtractor::new(analyzer).with_settings(settings).extract()
}
