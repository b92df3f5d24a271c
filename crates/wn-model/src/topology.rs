//! Collection-route topology.
//!
//! The route is a path graph: depot → dumpster × N → depot. Built once,
//! before the first tick; the traversal order seeds the agent registry.

use petgraph::graph::{NodeIndex, UnGraph};

use crate::{ModelError, ModelResult};

/// What sits at a route node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Depot,
    Dumpster,
}

/// The generated route: the graph plus the depot-to-depot traversal order.
pub struct Route {
    pub graph: UnGraph<NodeKind, f64>,
    /// Node indices in traversal order; `order[0]` and `order[len - 1]`
    /// are the depots.
    pub order: Vec<NodeIndex>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn kind(&self, position: usize) -> NodeKind {
        self.graph[self.order[position]]
    }
}

/// Build a straight collection route of `nb_nodes` nodes with unit-length
/// segments.
pub fn generate_route(nb_nodes: usize) -> ModelResult<Route> {
    if nb_nodes < 3 {
        return Err(ModelError::Construction(format!(
            "route needs at least 3 nodes, got {nb_nodes}"
        )));
    }

    let mut graph = UnGraph::new_undirected();
    let mut order = Vec::with_capacity(nb_nodes);
    for i in 0..nb_nodes {
        let kind = if i == 0 || i == nb_nodes - 1 {
            NodeKind::Depot
        } else {
            NodeKind::Dumpster
        };
        order.push(graph.add_node(kind));
    }
    for pair in order.windows(2) {
        graph.add_edge(pair[0], pair[1], 1.0);
    }

    Ok(Route { graph, order })
}
