//! Serializable summary of a check, combining the result with the graph's metadata.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::algorithms::GraphAlgorithms;
use crate::bipartite::{Colour, Conflict};
use crate::graph::*;
use crate::labelgraph::{LabelGraph, Position};
use crate::result::Bipartition;
use crate::trace::Step;

/// Attribute used by default to label the two partitions.
pub const DEFAULT_LABEL_KEY: &str = "type";

#[derive(Debug, Serialize)]
pub struct Report<'a, V> where V: VertexId {
    pub is_bipartite: bool,
    pub components: usize,
    pub partition_zero: &'a [V],
    pub partition_one: &'a [V],
    pub conflicts: &'a [Conflict<V>],
    pub colours: &'a OrderedMap<V, Colour>,
    pub positions: OrderedMap<&'a V, Position>,
    pub attributes: OrderedMap<&'a V, BTreeMap<&'a str, &'a str>>,
    /// Most common value of the label attribute per colour.
    pub partition_labels: BTreeMap<u8, &'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<&'a [Step<V>]>,
}

impl<'a, V> Report<'a, V> where V: VertexId {
    pub fn new(graph:&'a LabelGraph<V>, result:&'a Bipartition<V>, label_key:&str) -> Self {
        let positions = graph.positions().collect();
        let attributes = graph.vertices()
            .filter_map(|v| {
                let attrs = graph.attributes(v)?;
                if attrs.is_empty() {
                    return None
                }
                Some((v, attrs.iter().map(|(k, x)| (k.as_str(), x.as_str())).collect()))
            })
            .collect();

        let mut partition_labels = BTreeMap::new();
        for colour in [Colour::Zero, Colour::One] {
            if let Some(label) = dominant_attribute(graph, result.partition(colour), label_key) {
                partition_labels.insert(colour.index(), label);
            }
        }

        Report {
            is_bipartite: result.is_bipartite(),
            components: graph.num_components(),
            partition_zero: result.partition_zero(),
            partition_one: result.partition_one(),
            conflicts: result.conflicts(),
            colours: result.colours(),
            positions,
            attributes,
            partition_labels,
            steps: result.steps(),
        }
    }
}

/// Most common value of attribute `key` among `vertices`. Ties go to the value that
/// occurs first.
pub fn dominant_attribute<'a, V>(graph:&'a LabelGraph<V>, vertices:&[V], key:&str) -> Option<&'a str>
    where V: VertexId
{
    let mut counts:OrderedMap<&str, usize> = OrderedMap::default();
    for v in vertices {
        if let Some(value) = graph.attribute(v, key) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    // `max_by_key` keeps the last maximum, so iterate backwards
    counts.into_iter().rev().max_by_key(|(_, n)| *n).map(|(value, _)| value)
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
