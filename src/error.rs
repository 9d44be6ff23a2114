//! Error types for an extraction pass.
//!
//! Every variant means the analyzer broke one of its own guarantees for an
//! already-checked program, so all of them abort the pass.

use crate::analyzer::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{file}: declaration at node {node:?} has no resolvable symbol")]
    UnresolvedSymbol { file: String, node: NodeId },

    #[error("`{name}` has no value declaration")]
    MissingValueDeclaration { name: String },

    #[error("function `{name}` has no call signature")]
    MissingSignature { name: String },

    #[error("parameter `{parameter}` of `{function}` is not declared by a parameter declaration")]
    NotAParameter { function: String, parameter: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
