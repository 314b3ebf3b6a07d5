use fxhash::FxHashMap;

use crate::graph::*;

/// Allows iteration over all edges of a graph, each undirected edge reported exactly
/// once and oriented by vertex insertion order.
pub trait EdgeIterable<V>: Graph<V> + Sized where V: VertexId {
    fn edges(&self) -> EdgeIterator<'_, V, Self> {
        EdgeIterator::new(self)
    }
}

impl<V, G> EdgeIterable<V> for G where V: VertexId, G: Graph<V> {}

/// Allows iteration over all pairs $(v, N(v))$ of a graph.
pub trait NeighbourhoodIterable<V>: Graph<V> + Sized where V: VertexId {
    fn neighbourhoods(&self) -> NIterator<'_, V, Self> {
        NIterator::new(self)
    }
}

impl<V, G> NeighbourhoodIterable<V> for G where V: VertexId, G: Graph<V> {}

pub type NVertexIterator<'a, V> = Box<dyn Iterator<Item=&'a V> + 'a>;

/*
    Neighbourhood iterator for graphs. At each step,
    the iterator returns a pair (v,N(v)).
*/
pub struct NIterator<'a, V, G> where V: VertexId, G: Graph<V> {
    graph: &'a G,
    v_it: NVertexIterator<'a, V>,
}

impl<'a, V, G> NIterator<'a, V, G> where V: VertexId, G: Graph<V> {
    pub fn new(graph: &'a G) -> NIterator<'a, V, G> {
        NIterator {
            graph,
            v_it: graph.vertices(),
        }
    }
}

impl<'a, V, G> Iterator for NIterator<'a, V, G> where V: VertexId, G: Graph<V> {
    type Item = (&'a V, NVertexIterator<'a, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.v_it.next()?;
        let N = self.graph.neighbours(v);

        Some((v, N))
    }
}

/*
    Edge iterator for graphs. Neighbours which are not vertices of
    the graph are skipped.
*/
pub struct EdgeIterator<'a, V, G> where V: VertexId, G: Graph<V> {
    N_it: NIterator<'a, V, G>,
    index: FxHashMap<&'a V, usize>,
    curr_v: Option<&'a V>,
    curr_i: usize,
    curr_it: Option<NVertexIterator<'a, V>>,
}

impl<'a, V, G> EdgeIterator<'a, V, G> where V: VertexId, G: Graph<V> {
    pub fn new(graph: &'a G) -> EdgeIterator<'a, V, G> {
        let index = graph.vertices().enumerate().map(|(i,v)| (v,i)).collect();
        let mut res = EdgeIterator {
            N_it: graph.neighbourhoods(),
            index,
            curr_v: None,
            curr_i: 0,
            curr_it: None,
        };
        res.advance();
        res
    }

    fn advance(&mut self) {
        if let Some((v, it)) = self.N_it.next() {
            if self.curr_v.is_some() {
                self.curr_i += 1;
            }
            self.curr_v = Some(v);
            self.curr_it = Some(it);
        } else {
            self.curr_it = None;
        }
    }
}

impl<'a, V, G> Iterator for EdgeIterator<'a, V, G> where V: VertexId, G: Graph<V> {
    type Item = Edge<V>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(it) = self.curr_it.as_mut() {
            let Some(u) = it.next() else {
                self.advance();
                continue;
            };

            // Tie-breaking so we only return every edge once
            match (self.curr_v, self.index.get(u)) {
                (Some(v), Some(&iu)) if iu >= self.curr_i => return Some((v.clone(), u.clone())),
                _ => continue
            }
        }

        None
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
