//! Graph transformer - fold pair connections into a renderable node/edge set

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::connection::PairMetric;
use crate::value_objects::Snowflake;

/// One participant in the connection graph
///
/// Totals are folded from every connection the user appears in; a user
/// with zero connections never becomes a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub user_id: Snowflake,
    pub total_connections: i64,
    pub total_weight: f64,
}

/// One undirected edge, carrying the pairwise metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: Snowflake,
    pub target: Snowflake,
    pub weight: f64,
}

/// Presentation-ready weighted graph
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectionGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl ConnectionGraph {
    /// Fold a connection list into nodes and edges
    ///
    /// Pure function of its input: one edge per connection in input order,
    /// nodes sorted by user id. Safe to call repeatedly on the same list.
    pub fn build<T: PairMetric>(connections: &[T]) -> Self {
        let mut totals: BTreeMap<Snowflake, (i64, f64)> = BTreeMap::new();
        let mut edges = Vec::with_capacity(connections.len());

        for conn in connections {
            let pair = conn.pair();
            let weight = conn.weight();

            for user in [pair.lo(), pair.hi()] {
                let entry = totals.entry(user.clone()).or_insert((0, 0.0));
                entry.0 += 1;
                entry.1 += weight;
            }

            edges.push(GraphEdge {
                source: pair.lo().clone(),
                target: pair.hi().clone(),
                weight,
            });
        }

        let nodes = totals
            .into_iter()
            .map(|(user_id, (total_connections, total_weight))| GraphNode {
                user_id,
                total_connections,
                total_weight,
            })
            .collect();

        Self { nodes, edges }
    }

    /// Check for the empty graph
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
