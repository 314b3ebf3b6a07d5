//!
//! Insertion-ordered graph with optional per-vertex metadata. This is the structure the
//! [text loader](crate::io) produces and the one the checker is usually run on.
//!
//! Both the vertex order and the order of every neighbourhood are the order in which
//! vertices and edges were declared, which makes every traversal over a `LabelGraph`
//! reproducible:
//!
//! ```rust
//! use bicolour::graph::*;
//! use bicolour::labelgraph::LabelGraph;
//!
//! let mut graph:LabelGraph<&str> = LabelGraph::new();
//! graph.add_edge(&"c", &"a");
//! graph.add_edge(&"a", &"b");
//! graph.add_edge(&"c", &"a"); // no-op, the edge exists already
//!
//! assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![&"c", &"a", &"b"]);
//! assert_eq!(graph.neighbours(&"a").collect::<Vec<_>>(), vec![&"c", &"b"]);
//! assert_eq!(graph.num_edges(), 2);
//! ```
//!
//! Metadata (a position and free-form attributes) travels with a vertex but is never
//! looked at by the checker:
//!
//! ```rust
//! use bicolour::graph::*;
//! use bicolour::labelgraph::{LabelGraph, VertexData};
//!
//! let mut graph:LabelGraph<String> = LabelGraph::new();
//! let data = VertexData::new().with_position(0.1, 0.9).with_attribute("type", "user");
//! graph.add_vertex_with(&"ana".to_string(), data);
//!
//! let ana = "ana".to_string();
//! assert_eq!(graph.attribute(&ana, "type"), Some("user"));
//! assert_eq!(graph.position(&ana).map(|p| p.x), Some(0.1));
//! ```
//!
//! Graphs over `u32` can be generated from a few named families:
//!
//! ```rust
//! use bicolour::graph::*;
//! use bicolour::iterators::*;
//! use bicolour::labelgraph::LabelGraph;
//!
//! let graph = LabelGraph::cycle(4);
//! assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0,1),(0,3),(1,2),(2,3)]);
//!
//! let graph = LabelGraph::biclique(2, 3);
//! assert_eq!(graph.num_edges(), 6);
//! ```
use fxhash::FxHashMap;
use serde::Serialize;

use crate::graph::*;
use crate::iterators::*;

/// Planar coordinates of a vertex, used by external renderers only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x:f64, y:f64) -> Self {
        Position { x, y }
    }
}

/// Optional metadata attached to a vertex.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VertexData {
    pub position: Option<Position>,
    pub attributes: FxHashMap<String, String>,
}

impl VertexData {
    pub fn new() -> Self {
        VertexData::default()
    }

    #[must_use]
    pub fn with_position(mut self, x:f64, y:f64) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key:&str, value:&str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.attributes.is_empty()
    }

    /// Merges `other` into `self`: a given position replaces the current one,
    /// attributes are added or overwritten key by key.
    pub fn merge(&mut self, other:VertexData) {
        if other.position.is_some() {
            self.position = other.position;
        }
        self.attributes.extend(other.attributes);
    }
}

/// Undirected, append-only graph which remembers insertion order.
#[derive(Debug, Clone)]
pub struct LabelGraph<V> where V: VertexId {
    adj: OrderedMap<V, OrderedSet<V>>,
    data: FxHashMap<V, VertexData>,
    m: usize
}

impl<V> PartialEq for LabelGraph<V> where V: VertexId {
    fn eq(&self, other: &Self) -> bool {
        if self.num_vertices() != other.num_vertices() {
            return false
        }
        if self.num_edges() != other.num_edges() {
            return false
        }
        // Order is irrelevant for equality, only the structure and metadata count.
        self.adj == other.adj && self.data == other.data
    }
}

impl<V> Default for LabelGraph<V> where V: VertexId {
    fn default() -> Self {
        <LabelGraph<V> as MutableGraph<V>>::new()
    }
}

impl<V> Graph<V> for LabelGraph<V> where V: VertexId {
    fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    fn num_edges(&self) -> usize {
        self.m
    }

    fn contains(&self, u:&V) -> bool {
        self.adj.contains_key(u)
    }

    fn adjacent(&self, u:&V, v:&V) -> bool {
        match self.adj.get(u) {
            Some(N) => N.contains(v),
            _ => false
        }
    }

    /// Number of distinct neighbours, so a self-loop counts once.
    fn degree(&self, u:&V) -> usize {
        self.adj.get(u).map_or(0, |N| N.len())
    }

    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item=&'a V> + 'a> {
        Box::new(self.adj.keys())
    }

    fn neighbours<'a>(&'a self, u:&V) -> Box<dyn Iterator<Item=&'a V> + 'a> {
        match self.adj.get(u) {
            Some(N) => Box::new(N.iter()),
            None => Box::new(std::iter::empty())
        }
    }
}

impl<V> MutableGraph<V> for LabelGraph<V> where V: VertexId {
    fn new() -> Self {
        LabelGraph {
            adj: OrderedMap::default(),
            data: FxHashMap::default(),
            m: 0
        }
    }

    fn with_capacity(n_guess:usize) -> Self {
        LabelGraph {
            adj: OrderedMap::with_capacity_and_hasher(n_guess, Default::default()),
            data: FxHashMap::default(),
            m: 0
        }
    }

    fn add_vertex(&mut self, u:&V) -> bool {
        if self.adj.contains_key(u) {
            false
        } else {
            self.adj.insert(u.clone(), OrderedSet::default());
            true
        }
    }

    fn add_edge(&mut self, u:&V, v:&V) -> bool {
        self.add_vertex(u);
        self.add_vertex(v);
        if self.adjacent(u, v) {
            return false
        }

        // For a self-loop both inserts hit the same set, the second one is a no-op.
        self.adj.entry(u.clone()).or_default().insert(v.clone());
        self.adj.entry(v.clone()).or_default().insert(u.clone());
        self.m += 1;
        true
    }
}

impl<V> LabelGraph<V> where V: VertexId {
    /// Inserts `u` with the given metadata. If `u` already exists its metadata is
    /// merged with `data` (see [VertexData::merge]).
    ///
    /// Returns `true` if the vertex is new.
    pub fn add_vertex_with(&mut self, u:&V, data:VertexData) -> bool {
        let added = self.add_vertex(u);
        if !data.is_empty() {
            self.data.entry(u.clone()).or_default().merge(data);
        }
        added
    }

    pub fn vertex_data(&self, u:&V) -> Option<&VertexData> {
        self.data.get(u)
    }

    pub fn position(&self, u:&V) -> Option<Position> {
        self.data.get(u).and_then(|d| d.position)
    }

    pub fn attributes(&self, u:&V) -> Option<&FxHashMap<String, String>> {
        self.data.get(u).map(|d| &d.attributes)
    }

    pub fn attribute(&self, u:&V, key:&str) -> Option<&str> {
        self.attributes(u)?.get(key).map(String::as_str)
    }

    /// Vertices with a known position, in insertion order.
    pub fn positions(&self) -> impl Iterator<Item=(&V, Position)> + '_ {
        self.adj.keys().filter_map(|v| self.position(v).map(|p| (v, p)))
    }

    /// Whether any vertex carries metadata.
    pub fn has_metadata(&self) -> bool {
        self.data.values().any(|d| !d.is_empty())
    }
}

impl LabelGraph<u32> {
    /// Generates a path on `n` vertices.
    pub fn path(n:u32) -> LabelGraph<u32> {
        let mut res = LabelGraph::with_capacity(n as usize);
        if n == 1 {
            res.add_vertex(&0);
        }
        for u in 1..n {
            res.add_edge(&(u-1), &u);
        }

        res
    }

    /// Generates a cycle on `n` vertices. For $n = 1$ this is a single self-loop.
    pub fn cycle(n:u32) -> LabelGraph<u32> {
        let mut res = LabelGraph::with_capacity(n as usize);
        for u in 0..n {
            let v = (u+1) % n;
            res.add_edge(&u,&v);
        }

        res
    }

    /// Generates a matching on `2n` vertices.
    pub fn matching(n:u32) -> LabelGraph<u32> {
        let mut res = LabelGraph::with_capacity(2*n as usize);
        for u in 0..n {
            let v = u+n;
            res.add_edge(&u,&v);
        }

        res
    }

    /// Generates a star with `n` leaves, so `n+1` vertices total.
    pub fn star(n:u32) -> LabelGraph<u32> {
        LabelGraph::biclique(1, n)
    }

    /// Generates a complete graph (clique) on `n` vertices.
    pub fn clique(n:u32) -> LabelGraph<u32> {
        let mut res = LabelGraph::with_capacity(n as usize);
        for u in 0..n {
            res.add_vertex(&u);
            for v in (u+1)..n {
                res.add_edge(&u,&v);
            }
        }

        res
    }

    /// Generates a complete bipartite graph (biclique) on `s`+`t` vertices.
    pub fn biclique(s:u32, t:u32) -> LabelGraph<u32> {
        let mut res = LabelGraph::with_capacity((s+t) as usize);
        res.add_vertices(0..(s+t));
        for u in 0..s {
            for v in s..(s+t) {
                res.add_edge(&u,&v);
            }
        }

        res
    }

    /// Creates a new graph that is the disjoint union of `self` and `graph`.
    /// The vertices of the second graph are relabelled to avoid index clashes
    /// and come after all vertices of `self`.
    pub fn disj_union(&self, graph:&impl Graph<u32>) -> LabelGraph<u32> {
        let mut res = LabelGraph::with_capacity(self.len() + graph.len());

        let offset:u32 = self.vertices().max().map_or(0, |v| v+1);

        res.add_vertices(self.vertices().cloned());
        res.add_edges(self.edges());

        res.add_vertices(graph.vertices().map(|v| v+offset));
        res.add_edges(graph.edges().map(|(u,v)| (u+offset,v+offset)));

        res
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic_operations() {
        let mut G:LabelGraph<&str> = LabelGraph::new();
        assert!(G.is_empty());
        assert!(G.add_vertex(&"a"));
        assert!(!G.add_vertex(&"a"));
        assert_eq!(G.num_edges(), 0);

        assert!(G.add_edge(&"a", &"b"));
        assert!(!G.add_edge(&"b", &"a"));
        assert_eq!(G.num_vertices(), 2);
        assert_eq!(G.num_edges(), 1);
        assert_eq!(G.degree(&"a"), 1);
        assert_eq!(G.degree(&"b"), 1);
        assert_eq!(G.degree(&"zzz"), 0);
        assert!(G.adjacent(&"a", &"b"));
        assert!(G.adjacent(&"b", &"a"));
        assert!(!G.adjacent(&"a", &"a"));
    }

    #[test]
    fn symmetric_adjacency() {
        let mut G:LabelGraph<u32> = LabelGraph::new();
        G.add_edges(vec![(0,1),(1,2),(2,0),(3,3)]);

        for u in G.vertices() {
            for v in G.neighbours(u) {
                assert!(G.adjacent(v, u), "{} -> {} is not mirrored", u, v);
            }
        }
    }

    #[test]
    fn insertion_order() {
        let mut G:LabelGraph<&str> = LabelGraph::new();
        G.add_vertex(&"z");
        G.add_edge(&"m", &"a");
        G.add_edge(&"m", &"z");
        G.add_edge(&"m", &"b");

        assert_eq!(G.vertices().collect::<Vec<_>>(), vec![&"z", &"m", &"a", &"b"]);
        assert_eq!(G.neighbours(&"m").collect::<Vec<_>>(), vec![&"a", &"z", &"b"]);

        // Iteration is restartable
        assert_eq!(G.vertices().count(), 4);
        assert_eq!(G.vertices().count(), 4);
    }

    #[test]
    fn missing_vertex_has_no_neighbours() {
        let G = LabelGraph::path(3);
        assert_eq!(G.neighbours(&17).count(), 0);
    }

    #[test]
    fn self_loops() {
        let mut G:LabelGraph<u32> = LabelGraph::new();
        assert!(G.add_edge(&0, &0));
        assert!(!G.add_edge(&0, &0));

        assert_eq!(G.num_vertices(), 1);
        assert_eq!(G.num_edges(), 1);
        assert_eq!(G.neighbours(&0).collect::<Vec<_>>(), vec![&0]);
    }

    #[test]
    fn metadata_merge() {
        let mut G:LabelGraph<String> = LabelGraph::new();
        let u = "u".to_string();
        let v = "v".to_string();

        G.add_edge(&u, &v);
        assert!(!G.has_metadata());
        assert!(G.vertex_data(&u).is_none());

        assert!(!G.add_vertex_with(&u, VertexData::new().with_attribute("type", "user")));
        assert!(!G.add_vertex_with(&u, VertexData::new().with_position(1.0, 2.0).with_attribute("age", "7")));
        assert!(G.has_metadata());

        assert_eq!(G.attribute(&u, "type"), Some("user"));
        assert_eq!(G.attribute(&u, "age"), Some("7"));
        assert_eq!(G.position(&u), Some(Position::new(1.0, 2.0)));
        assert_eq!(G.attribute(&v, "type"), None);

        // A later merge without position keeps the old one
        G.add_vertex_with(&u, VertexData::new().with_attribute("type", "admin"));
        assert_eq!(G.position(&u), Some(Position::new(1.0, 2.0)));
        assert_eq!(G.attribute(&u, "type"), Some("admin"));

        assert_eq!(G.positions().collect::<Vec<_>>(), vec![(&u, Position::new(1.0, 2.0))]);
    }

    #[test]
    fn equality() {
        let mut G:LabelGraph<u32> = LabelGraph::new();
        G.add_edge(&0, &1);
        G.add_edge(&1, &2);

        let mut H:LabelGraph<u32> = LabelGraph::new();
        H.add_edge(&2, &1);
        H.add_edge(&1, &0);

        assert_eq!(G, H);
        H.add_edge(&0, &2);
        assert_ne!(G, H);
    }

    #[test]
    fn generators() {
        assert_eq!(LabelGraph::path(0).num_vertices(), 0);
        assert_eq!(LabelGraph::path(1).num_vertices(), 1);
        assert_eq!(LabelGraph::path(5).num_edges(), 4);
        assert_eq!(LabelGraph::cycle(5).num_edges(), 5);
        assert_eq!(LabelGraph::cycle(1).num_edges(), 1);
        assert_eq!(LabelGraph::matching(4).num_vertices(), 8);
        assert_eq!(LabelGraph::matching(4).num_edges(), 4);
        assert_eq!(LabelGraph::star(4).num_edges(), 4);
        assert_eq!(LabelGraph::clique(5).num_edges(), 10);
        assert_eq!(LabelGraph::clique(1).num_vertices(), 1);
        assert_eq!(LabelGraph::biclique(3, 4).num_edges(), 12);
        assert_eq!(LabelGraph::biclique(3, 0).num_vertices(), 3);
    }

    #[test]
    fn disjoint_union() {
        let P = LabelGraph::path(2);
        let C = LabelGraph::cycle(3);
        let U = P.disj_union(&C);

        assert_eq!(U.num_vertices(), 5);
        assert_eq!(U.num_edges(), 4);
        assert_eq!(U.vertices().cloned().collect::<Vec<_>>(), vec![0,1,2,3,4]);
        assert!(U.adjacent(&2, &4));
        assert!(!U.adjacent(&1, &2));
    }
}
