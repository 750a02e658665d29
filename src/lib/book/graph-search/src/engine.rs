/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

use crate::error::{GraphSearchError, InvalidGraphReason};
use crate::{Int, NodeId, Position, Route};

/// Owns a fixed weighted graph and the node positions used by the A* heuristic.
///
/// The searches themselves live in sibling modules as further `impl` blocks. None of them take
/// `&mut self`; the engine never changes after [`GraphSearchEngine::new`] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSearchEngine {
    weights: Vec<Vec<Int>>,

    // adjacency[node] is every (neighbor, weight) with a positive weight, ascending by neighbor.
    adjacency: Vec<Vec<(NodeId, Int)>>,

    positions: Vec<Position>,
}

impl GraphSearchEngine {
    /// Create an engine from a square, symmetric, non-negative weight matrix and a position for
    /// every node. A weight of 0 means "no edge". Diagonal entries are never traversed.
    pub fn new<P>(weights: Vec<Vec<Int>>, positions: P) -> Result<Self, GraphSearchError>
    where
        P: IntoIterator<Item = (NodeId, Position)>,
    {
        let node_count = weights.len();
        validate_weights(&weights)?;

        let mut table: Vec<Option<Position>> = vec![None; node_count];
        for (node, position) in positions {
            let slot = table
                .get_mut(node)
                .ok_or(InvalidGraphReason::PositionOutOfRange { node, node_count })?;
            if slot.replace(position).is_some() {
                return Err(InvalidGraphReason::DuplicatePosition(node).into());
            }
        }
        let positions = table
            .into_iter()
            .enumerate()
            .map(|(node, position)| position.ok_or(InvalidGraphReason::MissingPosition(node)))
            .collect::<Result<Vec<_>, _>>()?;

        let adjacency: Vec<Vec<(NodeId, Int)>> = weights
            .iter()
            .enumerate()
            .map(|(from, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(to, &weight)| to != from && weight > 0)
                    .map(|(to, &weight)| (to, weight))
                    .collect()
            })
            .collect();

        let edge_count = adjacency.iter().map(Vec::len).sum::<usize>() / 2;
        tracing::debug!(node_count, edge_count, "built graph search engine");

        Ok(Self {
            weights,
            adjacency,
            positions,
        })
    }

    /// Number of nodes. Valid ids are `0..node_count()`.
    pub fn node_count(&self) -> usize {
        self.weights.len()
    }

    /// All nodes joined to `node` by a positive weight, in ascending node id order.
    pub fn neighbors(&self, node: NodeId) -> Result<&[(NodeId, Int)], GraphSearchError> {
        self.check_node(node)?;
        Ok(self.adjacent(node))
    }

    /// Weight of the edge between two nodes, or `None` if they are not adjacent.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Result<Option<Int>, GraphSearchError> {
        self.check_node(from)?;
        self.check_node(to)?;
        Ok(self.weight(from, to))
    }

    /// Position of a node.
    pub fn position(&self, node: NodeId) -> Result<Position, GraphSearchError> {
        self.check_node(node)?;
        Ok(self.positions[node])
    }

    /// Total weight of an arbitrary node sequence. `None` if two consecutive nodes are not
    /// adjacent, i.e. the sequence is not a walk through the graph.
    pub fn path_cost(&self, nodes: &[NodeId]) -> Result<Option<Int>, GraphSearchError> {
        for &node in nodes {
            self.check_node(node)?;
        }
        Ok(nodes.windows(2).try_fold(0, |cost: Int, pair| {
            self.weight(pair[0], pair[1])
                .map(|weight| cost.saturating_add(weight))
        }))
    }

    pub(crate) fn check_node(&self, node: NodeId) -> Result<(), GraphSearchError> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(GraphSearchError::UnknownNode {
                node,
                node_count: self.node_count(),
            })
        }
    }

    // Callers must have checked `node` already.
    pub(crate) fn adjacent(&self, node: NodeId) -> &[(NodeId, Int)] {
        &self.adjacency[node]
    }

    pub(crate) fn position_of(&self, node: NodeId) -> &Position {
        &self.positions[node]
    }

    fn weight(&self, from: NodeId, to: NodeId) -> Option<Int> {
        let weight = self.weights[from][to];
        (from != to && weight > 0).then_some(weight)
    }

    // Build a route from nodes known to form a walk.
    pub(crate) fn route(&self, nodes: Vec<NodeId>) -> Route {
        let cost = nodes
            .windows(2)
            .map(|pair| self.weights[pair[0]][pair[1]])
            .fold(0, Int::saturating_add);
        Route { nodes, cost }
    }
}

fn validate_weights(weights: &[Vec<Int>]) -> Result<(), InvalidGraphReason> {
    let node_count = weights.len();
    for (row, entries) in weights.iter().enumerate() {
        if entries.len() != node_count {
            return Err(InvalidGraphReason::NotSquare {
                row,
                len: entries.len(),
                expected: node_count,
            });
        }
    }

    for from in 0..node_count {
        for to in 0..node_count {
            let weight = weights[from][to];
            if weight < 0 {
                return Err(InvalidGraphReason::NegativeWeight { from, to, weight });
            }
            if to > from && weight != weights[to][from] {
                return Err(InvalidGraphReason::Asymmetric {
                    from,
                    to,
                    forward: weight,
                    backward: weights[to][from],
                });
            }
        }
    }
    Ok(())
}
