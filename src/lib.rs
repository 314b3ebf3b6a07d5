#![allow(non_snake_case)]
//!
//! Bipartiteness verification for sparse graphs.
//!
//! A graph is bipartite if its vertices can be split into two sets such that no edge lies
//! inside either set. This crate decides the question with a breadth-first two-colouring
//! that runs over all connected components and reports every edge that violates the
//! colouring. The check can optionally record a trace of every colouring step, which is
//! useful to replay or animate the algorithm.
//!
//! ```rust
//! use bicolour::graph::*;
//! use bicolour::algorithms::GraphAlgorithms;
//! use bicolour::labelgraph::LabelGraph;
//! use bicolour::parse::parse_str;
//!
//! let graph = parse_str("
//!     [vertices]
//!     ana type=user
//!     [edges]
//!     ana x matrix
//!     bia x matrix
//! ").unwrap();
//!
//! let result = graph.bipartition().unwrap();
//! assert!(result.is_bipartite());
//! assert_eq!(result.partition_zero(), &["ana", "bia"]);
//! assert_eq!(result.partition_one(), &["matrix"]);
//!
//! let odd = LabelGraph::cycle(5);
//! assert!(!odd.is_bipartite().unwrap());
//! ```
//!
//! Graphs are read through [io] (plain or gzipped text, see [parse] for the format) or built
//! by hand via [labelgraph::LabelGraph]. The checker itself works on anything that
//! implements [graph::Graph].

pub mod graph;
pub mod labelgraph;
pub mod iterators;
pub mod algorithms;
pub mod bipartite;
pub mod trace;
pub mod result;
pub mod error;
pub mod parse;
pub mod io;
pub mod report;
