use union_find_rs::prelude::{DisjointSets, UnionFind};

use crate::bipartite::{check, CheckOptions};
use crate::error::StructuralError;
use crate::graph::*;
use crate::iterators::*;
use crate::result::Bipartition;
use crate::trace::BipartiteTrace;

/// Algorithms available on every [Graph].
pub trait GraphAlgorithms<V>: Graph<V> + Sized where V: VertexId {
    /// Connected components. Each component lists its vertices in insertion order and
    /// components are ordered by their first vertex.
    fn components(&self) -> Vec<Vec<V>>;

    fn num_components(&self) -> usize {
        self.components().len()
    }

    /// Two-colours the graph and reports all conflicting edges. See [check].
    fn bipartition(&self) -> Result<Bipartition<V>, StructuralError> {
        check(self, &CheckOptions::default())
    }

    /// Like [bipartition](GraphAlgorithms::bipartition), but the result carries the full
    /// step trace.
    fn bipartition_with_steps(&self) -> Result<Bipartition<V>, StructuralError> {
        check(self, &CheckOptions::new().record_steps(true))
    }

    fn is_bipartite(&self) -> Result<bool, StructuralError> {
        Ok(self.bipartition()?.is_bipartite())
    }

    /// Lazily replays the check one step at a time.
    fn trace(&self) -> Result<BipartiteTrace<'_, V, Self>, StructuralError> {
        BipartiteTrace::new(self)
    }
}

impl<V, G> GraphAlgorithms<V> for G where V: VertexId, G: Graph<V> {

    #[allow(unused_must_use)]
    fn components(&self) -> Vec<Vec<V>> {
        let order:Vec<&V> = self.vertices().collect();
        let index:VertexMap<&V, usize> = order.iter().enumerate().map(|(i,v)| (*v,i)).collect();
        let mut dsets:DisjointSets<usize> = DisjointSets::new();

        for i in 0..order.len() {
            // This returns a Result<()> but the potential 'error' (adding
            // an element that already exists) will not happen.
            dsets.make_set(i);
        }

        for (u,v) in self.edges() {
            let (Some(iu), Some(iv)) = (index.get(&u), index.get(&v)) else {
                continue
            };

            // `union` must only ever link the roots of two different sets
            if let (Ok(ru), Ok(rv)) = (dsets.find_set(iu), dsets.find_set(iv)) {
                if ru != rv {
                    dsets.union(&ru, &rv);
                }
            }
        }

        let mut comps:Vec<Vec<usize>> = dsets.into_iter()
            .map(|comp| {
                let mut comp:Vec<_> = comp.into_iter().collect();
                comp.sort_unstable();
                comp
            })
            .collect();
        comps.sort_unstable_by_key(|comp| comp.first().copied());

        comps.into_iter()
             .map(|comp| comp.into_iter().map(|i| order[i].clone()).collect())
             .collect()
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
