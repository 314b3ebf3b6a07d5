//!
//! Lazy step-by-step replay of the [bipartiteness check](crate::bipartite).
//!
//! A [BipartiteTrace] advances the colouring by exactly one atomic action per call to
//! `next()` and returns a [Step] describing the state right after that action. Nothing is
//! computed ahead of time, so a consumer that only wants the first few frames pays only for
//! those:
//!
//! ```rust
//! use bicolour::graph::*;
//! use bicolour::algorithms::GraphAlgorithms;
//! use bicolour::labelgraph::LabelGraph;
//! use bicolour::trace::StepKind;
//!
//! let graph = LabelGraph::cycle(5);
//! let first:Vec<_> = graph.trace().unwrap().take(2).collect();
//!
//! assert_eq!(first[0].kind, StepKind::ComponentRoot);
//! assert_eq!(first[1].kind, StepKind::ColourNeighbour);
//! assert_eq!(first[1].queue, vec![1]);
//! ```
//!
//! Steps are emitted for three kinds of actions:
//!  - a vertex becomes the root of a new component ([StepKind::ComponentRoot]),
//!  - an uncoloured neighbour receives a colour ([StepKind::ColourNeighbour]),
//!  - an edge is recorded as a new conflict ([StepKind::Conflict]).
//!
//! Dequeuing a vertex, scanning an edge whose endpoints already differ and detecting an
//! already recorded conflict a second time do not produce steps. Snapshots are cumulative,
//! so steps have to be consumed in the order they are emitted.
use serde::Serialize;

use crate::bipartite::{Action, Colour, Colouring, Conflict, RunState, VertexState};
use crate::error::StructuralError;
use crate::graph::*;
use crate::result::Bipartition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    ComponentRoot,
    ColourNeighbour,
    Conflict
}

/// Snapshot of the algorithm state right after one atomic action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step<V> where V: VertexId {
    pub kind: StepKind,
    /// The new root for [StepKind::ComponentRoot], otherwise the vertex whose
    /// neighbourhood is being scanned.
    pub vertex: V,
    /// The edge examined by the action, `None` for component roots.
    pub edge: Option<Edge<V>>,
    /// Queue contents, front first.
    pub queue: Vec<V>,
    /// Vertices whose neighbourhood has been scanned completely, in scan order.
    pub processed: Vec<V>,
    pub colours: OrderedMap<V, Colour>,
    pub conflicts: Vec<Conflict<V>>,
}

/// Iterator over the [Steps](Step) of one colouring run.
///
/// Dropping the trace early cancels the run. Use [BipartiteTrace::restart] to replay it
/// from the start.
pub struct BipartiteTrace<'a, V, G> where V: VertexId, G: Graph<V> {
    colouring: Colouring<'a, V, G>,
}

impl<'a, V, G> BipartiteTrace<'a, V, G> where V: VertexId, G: Graph<V> {
    /// Validates `graph` (see [validate](crate::bipartite::validate)) and prepares a run.
    pub fn new(graph:&'a G) -> Result<Self, StructuralError> {
        crate::bipartite::validate(graph)?;
        Ok(BipartiteTrace { colouring: Colouring::new(graph) })
    }

    /// Returns a fresh trace over the same graph, positioned before the first step.
    pub fn restart(&self) -> BipartiteTrace<'a, V, G> {
        BipartiteTrace { colouring: Colouring::new(self.colouring.graph()) }
    }

    pub fn state(&self) -> RunState {
        self.colouring.state()
    }

    pub fn vertex_state(&self, v:&V) -> VertexState {
        self.colouring.vertex_state(v)
    }

    /// Number of components discovered so far.
    pub fn components(&self) -> usize {
        self.colouring.components()
    }

    /// Completes the run without recording further steps and returns the result.
    pub fn into_bipartition(self) -> Bipartition<V> {
        self.assemble(None)
    }

    pub(crate) fn into_bipartition_with(self, steps:Vec<Step<V>>) -> Bipartition<V> {
        self.assemble(Some(steps))
    }

    fn assemble(mut self, steps:Option<Vec<Step<V>>>) -> Bipartition<V> {
        self.colouring.finish();
        let graph = self.colouring.graph();
        let (colours, conflicts) = self.colouring.into_parts();
        Bipartition::assemble(graph, colours, conflicts, steps)
    }

    fn snapshot(&self, kind:StepKind, vertex:&V, edge:Option<(&V, &V)>) -> Step<V> {
        Step {
            kind,
            vertex: vertex.clone(),
            edge: edge.map(|(u,v)| (u.clone(), v.clone())),
            queue: self.colouring.queue().cloned().collect(),
            processed: self.colouring.processed().iter().cloned().collect(),
            colours: self.colouring.colours().clone(),
            conflicts: self.colouring.conflicts().to_vec(),
        }
    }
}

impl<'a, V, G> Iterator for BipartiteTrace<'a, V, G> where V: VertexId, G: Graph<V> {
    type Item = Step<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match self.colouring.advance()? {
            Action::Root(r) => self.snapshot(StepKind::ComponentRoot, r, None),
            Action::Coloured { vertex, neighbour } =>
                self.snapshot(StepKind::ColourNeighbour, vertex, Some((vertex, neighbour))),
            Action::Conflict { vertex, neighbour } =>
                self.snapshot(StepKind::Conflict, vertex, Some((vertex, neighbour))),
        };

        Some(step)
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
