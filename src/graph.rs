//! Core graph abstraction shared by the checker and the loaders.
//!
//! Vertices are opaque identifiers of any type `V: Hash + Eq + Clone + Debug`. Implementations
//! must iterate vertices and neighbourhoods in a fixed order, otherwise results of the
//! [bipartiteness checker](crate::bipartite) are not reproducible.
use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use indexmap::{IndexMap, IndexSet};

use std::fmt::Debug;
use std::hash::Hash;

/// An undirected edge given by its two endpoints.
pub type Edge<V> = (V, V);
pub type VertexSet<V> = FxHashSet<V>;
pub type VertexMap<V, T> = FxHashMap<V, T>;

/// Insertion-ordered set of vertices.
pub type OrderedSet<V> = IndexSet<V, FxBuildHasher>;

/// Insertion-ordered map keyed by vertex.
pub type OrderedMap<V, T> = IndexMap<V, T, FxBuildHasher>;

/// Trait bound collecting everything a vertex identifier has to support.
pub trait VertexId: Hash + Eq + Clone + Debug {}
impl<T> VertexId for T where T: Hash + Eq + Clone + Debug {}

/// Read-only access to an undirected graph.
///
/// The checker only ever calls the methods of this trait, which means any adjacency
/// structure can be verified as long as it iterates deterministically. Nothing here
/// enforces symmetry: implementations outside this crate may violate it, which the
/// checker reports as a [StructuralError](crate::error::StructuralError).
pub trait Graph<V> where V: VertexId {
    fn num_vertices(&self) -> usize;
    fn num_edges(&self) -> usize;

    fn contains(&self, u:&V) -> bool;

    fn adjacent(&self, u:&V, v:&V) -> bool;
    fn degree(&self, u:&V) -> usize;

    /// Vertices in insertion order. Every call starts a fresh iteration.
    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item=&'a V> + 'a>;

    /// Neighbours of `u` in the order the edges were declared. Absent vertices
    /// have no neighbours.
    fn neighbours<'a>(&'a self, u:&V) -> Box<dyn Iterator<Item=&'a V> + 'a>;

    fn len(&self) -> usize {
        self.num_vertices()
    }

    fn is_empty(&self) -> bool {
        self.num_vertices() == 0
    }
}

/// Graphs that can be built incrementally. There are deliberately no removal operations.
pub trait MutableGraph<V>: Graph<V> where V: VertexId {
    fn new() -> Self;
    fn with_capacity(n_guess:usize) -> Self;

    /// Inserts `u` if absent. Returns `true` if the vertex is new.
    fn add_vertex(&mut self, u:&V) -> bool;

    /// Inserts the edge $uv$ together with missing endpoints. Returns `true` if the
    /// edge is new.
    fn add_edge(&mut self, u:&V, v:&V) -> bool;

    fn add_vertices<I>(&mut self, vertices:I) where I: IntoIterator<Item=V> {
        for v in vertices {
            self.add_vertex(&v);
        }
    }

    fn add_edges<I>(&mut self, edges:I) where I: IntoIterator<Item=Edge<V>> {
        for (u,v) in edges {
            self.add_edge(&u, &v);
        }
    }
}
