//! Error types for the checker and the text loaders.
use std::io;

use thiserror::Error;

/// The graph handed to the checker violates the structural contract of [Graph](crate::graph::Graph):
/// vertices are listed once, every neighbour must be a vertex of the graph and adjacency
/// must be symmetric.
///
/// Vertex identifiers are rendered with their `Debug` representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("vertex {vertex} is listed more than once")]
    DuplicateVertex { vertex: String },

    #[error("vertex {missing} is a neighbour of {vertex} but not part of the graph")]
    MissingVertex { vertex: String, missing: String },

    #[error("adjacency is not symmetric: {to} is a neighbour of {from} but not vice versa")]
    AsymmetricAdjacency { from: String, to: String },
}

/// Failure while reading a graph from text.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// `line` is 1-based.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("invalid file `{0}`, the supported extensions are `.txt` and `.gz`")]
    UnsupportedFormat(String),
}

impl LoadError {
    pub(crate) fn syntax(line:usize, message:impl Into<String>) -> Self {
        LoadError::Syntax { line, message: message.into() }
    }
}
