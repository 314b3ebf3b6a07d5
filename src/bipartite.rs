//!
//! Bipartiteness verification by breadth-first two-colouring.
//!
//! Components are discovered by iterating the vertices of the graph in insertion order. Every
//! vertex which has not been coloured yet starts a new component: it receives [Colour::Zero]
//! and is put into a FIFO queue. Dequeued vertices hand the opposite colour to all uncoloured
//! neighbours, and every edge whose endpoints end up with the same colour is reported as a
//! [Conflict]. The graph is bipartite iff no conflict is found.
//!
//! ```rust
//! use bicolour::graph::*;
//! use bicolour::algorithms::GraphAlgorithms;
//! use bicolour::bipartite::Conflict;
//! use bicolour::labelgraph::LabelGraph;
//!
//! let mut graph:LabelGraph<u32> = LabelGraph::new();
//! graph.add_edges(vec![(1,2),(2,3),(3,1)]);
//!
//! let result = graph.bipartition().unwrap();
//! assert!(!result.is_bipartite());
//! assert_eq!(result.partition_zero(), &[1]);
//! assert_eq!(result.partition_one(), &[2,3]);
//! assert_eq!(result.conflicts(), &[Conflict(2,3)]);
//! ```
//!
//! The whole run takes $O(|V| + |E|)$ time. Results only depend on the iteration order of
//! the graph, so repeated runs on the same graph produce equal results.
use std::collections::VecDeque;
use std::fmt;

use fxhash::FxHashSet;
use serde::{Serialize, Serializer};
use tracing::{debug, trace, warn};

use crate::error::StructuralError;
use crate::graph::*;
use crate::iterators::NVertexIterator;
use crate::result::Bipartition;
use crate::trace::BipartiteTrace;

/// One of the two colour classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Colour {
    Zero,
    One
}

impl Colour {
    pub fn opposite(self) -> Colour {
        match self {
            Colour::Zero => Colour::One,
            Colour::One => Colour::Zero
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Colour::Zero => 0,
            Colour::One => 1
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl Serialize for Colour {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_u8(self.index())
    }
}

/// An edge whose endpoints received the same colour, oriented as it was detected: the
/// first vertex is the one whose neighbourhood was being scanned.
///
/// Conflicts are unordered pairs, a graph never reports both $(u,v)$ and $(v,u)$. A
/// self-loop on $x$ is reported as $(x,x)$.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Conflict<V>(pub V, pub V);

impl<V> Conflict<V> where V: PartialEq {
    /// Whether `self` and `other` describe the same undirected edge.
    pub fn same_edge(&self, other:&Conflict<V>) -> bool {
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }

    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }
}

impl<V> fmt::Display for Conflict<V> where V: fmt::Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.0, self.1)
    }
}

/// Life cycle of a single vertex during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexState {
    Unvisited,
    /// Coloured, but its neighbourhood has not been fully scanned yet.
    Queued,
    Processed
}

/// Life cycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Done
}

/// Options for a single call to [check].
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Record a [Step](crate::trace::Step) after every atomic action.
    pub record_steps: bool,
    /// Stop recording after this many steps. The colouring itself always runs to the end.
    pub max_steps: Option<usize>,
}

impl CheckOptions {
    pub fn new() -> Self {
        CheckOptions::default()
    }

    #[must_use]
    pub fn record_steps(mut self, record:bool) -> Self {
        self.record_steps = record;
        self
    }

    #[must_use]
    pub fn max_steps(mut self, limit:usize) -> Self {
        self.max_steps = Some(limit);
        self
    }
}

/// Verifies that `graph` is bipartite and returns the colouring together with all conflicts.
///
/// The structure of `graph` is validated first (see [validate]); on failure no colouring is
/// attempted. If `options.record_steps` is set the result carries the step trace, cut off
/// after `options.max_steps` steps; no snapshot past the limit is ever taken. Use
/// [BipartiteTrace] directly to consume the trace lazily.
#[tracing::instrument(level = "debug", skip_all, fields(n = graph.num_vertices(), m = graph.num_edges()))]
pub fn check<V, G>(graph:&G, options:&CheckOptions) -> Result<Bipartition<V>, StructuralError>
    where V: VertexId, G: Graph<V>
{
    let mut trace = BipartiteTrace::new(graph)?;
    if options.record_steps {
        let limit = options.max_steps.unwrap_or(usize::MAX);
        let steps:Vec<_> = trace.by_ref().take(limit).collect();
        debug!(steps = steps.len(), limit = ?options.max_steps, "recorded step trace");
        Ok(trace.into_bipartition_with(steps))
    } else {
        Ok(trace.into_bipartition())
    }
}

/// Checks that `graph` lists every vertex once, that every neighbour of every vertex is
/// itself a vertex of `graph` and that adjacency is symmetric.
pub fn validate<V, G>(graph:&G) -> Result<(), StructuralError> where V: VertexId, G: Graph<V> {
    let mut seen:VertexSet<&V> = VertexSet::default();
    for u in graph.vertices() {
        if !seen.insert(u) {
            warn!(vertex = ?u, "vertex is listed more than once");
            return Err(StructuralError::DuplicateVertex { vertex: format!("{u:?}") })
        }
    }

    for u in graph.vertices() {
        for v in graph.neighbours(u) {
            if !graph.contains(v) {
                warn!(vertex = ?u, missing = ?v, "neighbour is not a vertex of the graph");
                return Err(StructuralError::MissingVertex {
                    vertex: format!("{u:?}"),
                    missing: format!("{v:?}"),
                })
            }
            if !graph.adjacent(v, u) {
                warn!(from = ?u, to = ?v, "asymmetric adjacency");
                return Err(StructuralError::AsymmetricAdjacency {
                    from: format!("{u:?}"),
                    to: format!("{v:?}"),
                })
            }
        }
    }

    Ok(())
}

/// A single atomic action of the colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action<'a, V> {
    /// `root` starts a new component and received colour zero.
    Root(&'a V),
    /// `neighbour` of the scanned `vertex` received the opposite colour.
    Coloured { vertex: &'a V, neighbour: &'a V },
    /// The edge `vertex`-`neighbour` was recorded as a new conflict.
    Conflict { vertex: &'a V, neighbour: &'a V },
}

/// State of one colouring run. Every run owns its colours, queue and conflicts.
pub(crate) struct Colouring<'a, V, G> where V: VertexId, G: Graph<V> {
    graph: &'a G,
    roots: NVertexIterator<'a, V>,
    colours: OrderedMap<V, Colour>,
    queue: VecDeque<&'a V>,
    processed: OrderedSet<V>,
    conflicts: Vec<Conflict<V>>,
    recorded: FxHashSet<(&'a V, &'a V)>,
    scanning: Option<(&'a V, NVertexIterator<'a, V>)>,
    run: RunState,
    components: usize,
}

impl<'a, V, G> Colouring<'a, V, G> where V: VertexId, G: Graph<V> {
    /// Creates a run without validating `graph`.
    pub(crate) fn new(graph:&'a G) -> Self {
        Colouring {
            graph,
            roots: graph.vertices(),
            colours: OrderedMap::with_capacity_and_hasher(graph.num_vertices(), Default::default()),
            queue: VecDeque::new(),
            processed: OrderedSet::with_capacity_and_hasher(graph.num_vertices(), Default::default()),
            conflicts: Vec::new(),
            recorded: FxHashSet::default(),
            scanning: None,
            run: RunState::Idle,
            components: 0,
        }
    }

    pub(crate) fn graph(&self) -> &'a G {
        self.graph
    }

    /// Performs work until the next atomic action happened and returns it, or `None`
    /// once every vertex is processed.
    pub(crate) fn advance(&mut self) -> Option<Action<'a, V>> {
        if self.run == RunState::Done {
            return None
        }
        self.run = RunState::Running;

        loop {
            let scan = match self.scanning.as_mut() {
                Some((a, neighbours)) => Some((*a, neighbours.next())),
                None => None
            };

            match scan {
                Some((a, Some(b))) => {
                    if let Some(action) = self.visit(a, b) {
                        return Some(action)
                    }
                }
                Some((a, None)) => {
                    self.processed.insert(a.clone());
                    self.scanning = None;
                }
                None => {
                    if let Some(a) = self.queue.pop_front() {
                        self.scanning = Some((a, self.graph.neighbours(a)));
                        continue;
                    }

                    let Some(root) = self.next_root() else {
                        self.run = RunState::Done;
                        debug!(components = self.components, conflicts = self.conflicts.len(), "colouring finished");
                        return None
                    };

                    self.components += 1;
                    debug!(root = ?root, component = self.components, "starting component");
                    self.colours.insert(root.clone(), Colour::Zero);
                    self.queue.push_back(root);
                    return Some(Action::Root(root))
                }
            }
        }
    }

    /// Runs the colouring to completion.
    pub(crate) fn finish(&mut self) {
        while self.advance().is_some() {}
    }

    fn next_root(&mut self) -> Option<&'a V> {
        loop {
            let r = self.roots.next()?;
            if !self.colours.contains_key(r) {
                return Some(r)
            }
        }
    }

    fn visit(&mut self, a:&'a V, b:&'a V) -> Option<Action<'a, V>> {
        // Only coloured vertices are ever scanned
        let colour_a = self.colours[a];

        match self.colours.get(b).copied() {
            None => {
                self.colours.insert(b.clone(), colour_a.opposite());
                self.queue.push_back(b);
                Some(Action::Coloured { vertex: a, neighbour: b })
            }
            Some(colour_b) if colour_b == colour_a => {
                if self.recorded.contains(&(a, b)) || self.recorded.contains(&(b, a)) {
                    return None
                }
                trace!(u = ?a, v = ?b, colour = colour_a.index(), "conflicting edge");
                self.recorded.insert((a, b));
                self.conflicts.push(Conflict(a.clone(), b.clone()));
                Some(Action::Conflict { vertex: a, neighbour: b })
            }
            Some(_) => None
        }
    }

    pub(crate) fn state(&self) -> RunState {
        self.run
    }

    pub(crate) fn vertex_state(&self, v:&V) -> VertexState {
        if self.processed.contains(v) {
            VertexState::Processed
        } else if self.colours.contains_key(v) {
            VertexState::Queued
        } else {
            VertexState::Unvisited
        }
    }

    pub(crate) fn colours(&self) -> &OrderedMap<V, Colour> {
        &self.colours
    }

    pub(crate) fn queue(&self) -> impl Iterator<Item=&'a V> + '_ {
        self.queue.iter().copied()
    }

    pub(crate) fn processed(&self) -> &OrderedSet<V> {
        &self.processed
    }

    pub(crate) fn conflicts(&self) -> &[Conflict<V>] {
        &self.conflicts
    }

    pub(crate) fn components(&self) -> usize {
        self.components
    }

    pub(crate) fn into_parts(self) -> (OrderedMap<V, Colour>, Vec<Conflict<V>>) {
        (self.colours, self.conflicts)
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
    use crate::iterators::*;
    use crate::labelgraph::LabelGraph;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn triangle() -> LabelGraph<u32> {
        let mut G = LabelGraph::new();
        G.add_edges(vec![(1,2),(2,3),(3,1)]);
        G
    }

    /// Every vertex is in exactly one partition and an edge is reported as a conflict
    /// iff both endpoints share a colour.
    fn assert_consistent<V:VertexId>(G:&LabelGraph<V>, res:&Bipartition<V>) {
        assert_eq!(res.partition_zero().len() + res.partition_one().len(), G.num_vertices());
        for v in G.vertices() {
            let in_zero = res.partition_zero().contains(v);
            let in_one = res.partition_one().contains(v);
            assert!(in_zero ^ in_one, "{:?} must be in exactly one partition", v);
        }

        for (u,v) in G.edges() {
            let same = res.colour_of(&u) == res.colour_of(&v);
            let reported = res.conflicts().iter().any(|c| c.same_edge(&Conflict(u.clone(), v.clone())));
            assert_eq!(same, reported, "edge {:?}-{:?}", u, v);
        }
        assert_eq!(res.is_bipartite(), res.conflicts().is_empty());
    }

    #[test]
    fn empty_graph() {
        let G:LabelGraph<u32> = LabelGraph::new();
        let res = check(&G, &CheckOptions::default()).unwrap();

        assert!(res.is_bipartite());
        assert!(res.partition_zero().is_empty());
        assert!(res.partition_one().is_empty());
        assert!(res.conflicts().is_empty());
    }

    #[test]
    fn single_edge() {
        let mut G:LabelGraph<&str> = LabelGraph::new();
        G.add_edge(&"A", &"B");
        let res = check(&G, &CheckOptions::default()).unwrap();

        assert!(res.is_bipartite());
        assert_eq!(res.partition_zero(), &["A"]);
        assert_eq!(res.partition_one(), &["B"]);
        assert_eq!(res.colour_of(&"A"), Some(Colour::Zero));
        assert_eq!(res.colour_of(&"B"), Some(Colour::One));
    }

    #[test]
    fn triangle_conflict() {
        let G = triangle();
        let res = check(&G, &CheckOptions::default()).unwrap();

        assert!(!res.is_bipartite());
        assert_eq!(res.conflicts(), &[Conflict(2,3)]);
        assert_eq!(res.partition_zero(), &[1]);
        assert_eq!(res.partition_one(), &[2,3]);
        assert_consistent(&G, &res);
    }

    #[test]
    fn self_loop() {
        let mut G:LabelGraph<&str> = LabelGraph::new();
        G.add_edge(&"X", &"X");
        let res = check(&G, &CheckOptions::default()).unwrap();

        assert!(!res.is_bipartite());
        assert_eq!(res.conflicts(), &[Conflict("X","X")]);
        assert!(res.conflicts()[0].is_loop());
        assert_eq!(res.partition_zero(), &["X"]);
    }

    #[test]
    fn self_loop_inside_bipartite_component() {
        let mut G:LabelGraph<u32> = LabelGraph::path(3);
        G.add_edge(&1, &1);
        let res = check(&G, &CheckOptions::default()).unwrap();

        assert_eq!(res.conflicts(), &[Conflict(1,1)]);
        assert_eq!(res.partition_zero(), &[0,2]);
        assert_eq!(res.partition_one(), &[1]);
    }

    #[test]
    fn disconnected_components() {
        let mut G:LabelGraph<&str> = LabelGraph::new();
        G.add_edge(&"A", &"B");
        G.add_edges(vec![("1","2"),("2","3"),("3","1")]);
        G.add_vertex(&"lonely");
        let res = check(&G, &CheckOptions::default()).unwrap();

        assert!(!res.is_bipartite());
        assert_eq!(res.conflicts(), &[Conflict("2","3")]);
        assert_eq!(res.colour_of(&"A"), Some(Colour::Zero));
        assert_eq!(res.colour_of(&"B"), Some(Colour::One));
        // Isolated vertices form their own component and receive colour zero
        assert_eq!(res.colour_of(&"lonely"), Some(Colour::Zero));
        assert_eq!(res.partition_zero(), &["A", "1", "lonely"]);
        assert_eq!(res.partition_one(), &["B", "2", "3"]);
        assert_consistent(&G, &res);
    }

    #[test]
    fn conflicts_are_deduplicated() {
        // Both endpoints of 1-2 see the conflict, only the first detection counts
        let G = LabelGraph::clique(4);
        let res = check(&G, &CheckOptions::default()).unwrap();

        for (i, c) in res.conflicts().iter().enumerate() {
            for d in &res.conflicts()[i+1..] {
                assert!(!c.same_edge(d), "{:?} reported twice", c);
            }
        }
        // 0 | 1,2,3: every edge among 1,2,3 conflicts
        assert_eq!(res.conflicts(), &[Conflict(1,2), Conflict(1,3), Conflict(2,3)]);
        assert_consistent(&G, &res);
    }

    #[test]
    fn idempotent() {
        let G = LabelGraph::cycle(7).disj_union(&LabelGraph::clique(5));
        let first = check(&G, &CheckOptions::default()).unwrap();
        let second = check(&G, &CheckOptions::default()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.conflicts(), second.conflicts());
    }

    #[test]
    fn known_families() {
        for n in 2..12 {
            assert!(check(&LabelGraph::path(n), &CheckOptions::default()).unwrap().is_bipartite());
            assert!(check(&LabelGraph::biclique(n, n+1), &CheckOptions::default()).unwrap().is_bipartite());
            assert!(check(&LabelGraph::matching(n), &CheckOptions::default()).unwrap().is_bipartite());

            let cycle = check(&LabelGraph::cycle(n+1), &CheckOptions::default()).unwrap();
            assert_eq!(cycle.is_bipartite(), (n+1) % 2 == 0);
        }
        assert!(!check(&LabelGraph::cycle(1), &CheckOptions::default()).unwrap().is_bipartite());
    }

    #[test]
    fn random_graphs() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..50 {
            let s:u32 = rng.gen_range(1..20);
            let t:u32 = rng.gen_range(1..20);

            // Random subgraph of a biclique, always bipartite
            let mut B:LabelGraph<u32> = LabelGraph::new();
            B.add_vertices(0..(s+t));
            for u in 0..s {
                for v in s..(s+t) {
                    if rng.gen_bool(0.3) {
                        B.add_edge(&u, &v);
                    }
                }
            }
            let res = check(&B, &CheckOptions::default()).unwrap();
            assert!(res.is_bipartite());
            assert_consistent(&B, &res);

            // Arbitrary random graph, possibly with loops
            let n = s+t;
            let mut G:LabelGraph<u32> = LabelGraph::new();
            for _ in 0..rng.gen_range(0..3*n) {
                G.add_edge(&rng.gen_range(0..n), &rng.gen_range(0..n));
            }
            let res = check(&G, &CheckOptions::default()).unwrap();
            assert_consistent(&G, &res);
        }
    }

    /// Adjacency structure which does not enforce symmetry.
    struct RawGraph {
        adj: Vec<(u32, Vec<u32>)>
    }

    impl Graph<u32> for RawGraph {
        fn num_vertices(&self) -> usize { self.adj.len() }
        fn num_edges(&self) -> usize { self.adj.iter().map(|(_, N)| N.len()).sum() }
        fn contains(&self, u:&u32) -> bool { self.adj.iter().any(|(v, _)| v == u) }
        fn adjacent(&self, u:&u32, v:&u32) -> bool {
            self.adj.iter().any(|(x, N)| x == u && N.contains(v))
        }
        fn degree(&self, u:&u32) -> usize { self.neighbours(u).count() }
        fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item=&'a u32> + 'a> {
            Box::new(self.adj.iter().map(|(v, _)| v))
        }
        fn neighbours<'a>(&'a self, u:&u32) -> Box<dyn Iterator<Item=&'a u32> + 'a> {
            let u = *u;
            Box::new(self.adj.iter().filter(move |(v, _)| *v == u).flat_map(|(_, N)| N.iter()))
        }
    }

    #[test]
    fn asymmetric_graph_is_rejected() {
        let G = RawGraph { adj: vec![(0, vec![1]), (1, vec![])] };
        let err = check(&G, &CheckOptions::default()).unwrap_err();

        assert_eq!(err, StructuralError::AsymmetricAdjacency { from: "0".into(), to: "1".into() });
    }

    #[test]
    fn dangling_neighbour_is_rejected() {
        let G = RawGraph { adj: vec![(0, vec![1]), (1, vec![0, 7])] };
        let err = check(&G, &CheckOptions::new().record_steps(true)).unwrap_err();

        assert_eq!(err, StructuralError::MissingVertex { vertex: "1".into(), missing: "7".into() });
    }

    #[test]
    fn step_recording_is_capped() {
        let G = LabelGraph::cycle(9).disj_union(&LabelGraph::path(4));
        let full = check(&G, &CheckOptions::new().record_steps(true)).unwrap();
        let capped = check(&G, &CheckOptions::new().record_steps(true).max_steps(3)).unwrap();

        let all = full.steps().unwrap();
        assert!(all.len() > 3);
        assert_eq!(capped.steps().unwrap(), &all[..3]);

        // The colouring still covers the whole graph
        assert_eq!(capped.colours(), full.colours());
        assert_eq!(capped.conflicts(), full.conflicts());
        assert_eq!(capped.partitions(), full.partitions());

        let roomy = check(&G, &CheckOptions::new().record_steps(true).max_steps(1000)).unwrap();
        assert_eq!(roomy.steps(), full.steps());

        // Without recording the limit has no effect
        let plain = check(&G, &CheckOptions::new().max_steps(3)).unwrap();
        assert!(plain.steps().is_none());
    }

    #[test]
    fn repeated_vertex_is_rejected() {
        let G = RawGraph { adj: vec![(0, vec![1]), (1, vec![0]), (0, vec![1])] };
        let err = check(&G, &CheckOptions::default()).unwrap_err();

        assert_eq!(err, StructuralError::DuplicateVertex { vertex: "0".into() });
    }

    #[test]
    #[should_panic(expected = "edge")]
    fn missing_conflict_is_inconsistent() {
        let G = triangle();
        let res = check(&G, &CheckOptions::default()).unwrap();

        // Same colouring, conflicts dropped
        let dropped = Bipartition::assemble(&G, res.colours().clone(), vec![], None);
        assert_consistent(&G, &dropped);
    }

    #[test]
    fn foreign_graph_implementation() {
        let G = RawGraph { adj: vec![(0, vec![1, 2]), (1, vec![0]), (2, vec![0])] };
        let res = check(&G, &CheckOptions::default()).unwrap();

        assert!(res.is_bipartite());
        assert_eq!(res.partition_zero(), &[0]);
        assert_eq!(res.partition_one(), &[1,2]);
    }

    #[test]
    fn independent_runs_on_threads() {
        let graphs = vec![LabelGraph::cycle(5), LabelGraph::cycle(6), LabelGraph::biclique(3,3)];
        let results:Vec<_> = std::thread::scope(|s| {
            let handles:Vec<_> = graphs.iter()
                .map(|G| s.spawn(move || check(G, &CheckOptions::default())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
        });

        assert_eq!(results.iter().map(|r| r.is_bipartite()).collect::<Vec<_>>(), vec![false, true, true]);
        for (G, res) in graphs.iter().zip(&results) {
            assert_eq!(res, &check(G, &CheckOptions::default()).unwrap());
        }
    }
}
