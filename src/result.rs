use serde::Serialize;

use crate::bipartite::{Colour, Conflict};
use crate::graph::*;
use crate::trace::Step;

/// Outcome of a bipartiteness check.
///
/// Both partitions list their vertices in the insertion order of the checked graph,
/// conflicts appear in the order in which they were detected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bipartition<V> where V: VertexId {
    is_bipartite: bool,
    partition_zero: Vec<V>,
    partition_one: Vec<V>,
    conflicts: Vec<Conflict<V>>,
    colours: OrderedMap<V, Colour>,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<Step<V>>>,
}

impl<V> Bipartition<V> where V: VertexId {
    /// Groups the vertices of `graph` by colour and packs everything into a result.
    /// Vertices of `graph` without a colour are left out of both partitions.
    pub fn assemble<G>(graph:&G, colours:OrderedMap<V, Colour>, conflicts:Vec<Conflict<V>>,
                       steps:Option<Vec<Step<V>>>) -> Bipartition<V> where G: Graph<V> {
        let mut partition_zero = Vec::new();
        let mut partition_one = Vec::new();
        for v in graph.vertices() {
            match colours.get(v) {
                Some(Colour::Zero) => partition_zero.push(v.clone()),
                Some(Colour::One) => partition_one.push(v.clone()),
                None => {}
            }
        }

        Bipartition {
            is_bipartite: conflicts.is_empty(),
            partition_zero,
            partition_one,
            conflicts,
            colours,
            steps,
        }
    }

    pub fn is_bipartite(&self) -> bool {
        self.is_bipartite
    }

    pub fn partition_zero(&self) -> &[V] {
        &self.partition_zero
    }

    pub fn partition_one(&self) -> &[V] {
        &self.partition_one
    }

    pub fn partition(&self, colour:Colour) -> &[V] {
        match colour {
            Colour::Zero => &self.partition_zero,
            Colour::One => &self.partition_one
        }
    }

    pub fn partitions(&self) -> (&[V], &[V]) {
        (&self.partition_zero, &self.partition_one)
    }

    pub fn conflicts(&self) -> &[Conflict<V>] {
        &self.conflicts
    }

    /// Colour of every vertex, in the order the vertices were coloured.
    pub fn colours(&self) -> &OrderedMap<V, Colour> {
        &self.colours
    }

    pub fn colour_of(&self, v:&V) -> Option<Colour> {
        self.colours.get(v).copied()
    }

    /// The step trace, if it was requested.
    pub fn steps(&self) -> Option<&[Step<V>]> {
        self.steps.as_deref()
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
