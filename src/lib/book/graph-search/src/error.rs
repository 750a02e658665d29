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

//! Errors raised by the search engine. Failing to find a path is not one of them.

use crate::{Int, NodeId};

/// Graph search error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphSearchError {
    /// The weight matrix or position table was rejected at construction time.
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] InvalidGraphReason),

    /// A node id outside `0..node_count` was supplied.
    #[error("unknown node {node}: graph has {node_count} nodes")]
    UnknownNode {
        /// The offending id.
        node: NodeId,

        /// Number of nodes in the graph.
        node_count: usize,
    },
}

/// Why a graph was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidGraphReason {
    /// A row of the weight matrix has the wrong length.
    #[error("weight matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Row index.
        row: usize,

        /// Actual row length.
        len: usize,

        /// Number of rows.
        expected: usize,
    },

    /// Weights must be non-negative.
    #[error("negative weight {weight} on edge {from} - {to}")]
    NegativeWeight {
        /// Row index.
        from: NodeId,

        /// Column index.
        to: NodeId,

        /// The negative weight.
        weight: Int,
    },

    /// `weights[from][to]` differs from `weights[to][from]`.
    #[error("weight matrix is not symmetric: {from} -> {to} is {forward}, {to} -> {from} is {backward}")]
    Asymmetric {
        /// Row index.
        from: NodeId,

        /// Column index.
        to: NodeId,

        /// `weights[from][to]`.
        forward: Int,

        /// `weights[to][from]`.
        backward: Int,
    },

    /// A node has no position.
    #[error("no position for node {0}")]
    MissingPosition(NodeId),

    /// The position table names a node the weight matrix does not have.
    #[error("position given for node {node} but graph has {node_count} nodes")]
    PositionOutOfRange {
        /// The offending id.
        node: NodeId,

        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// The position table names the same node twice.
    #[error("position given twice for node {0}")]
    DuplicatePosition(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_graph_message_includes_reason() {
        let error: GraphSearchError = InvalidGraphReason::Asymmetric {
            from: 1,
            to: 2,
            forward: 3,
            backward: 4,
        }
        .into();
        assert_eq!(
            error.to_string(),
            "invalid graph: weight matrix is not symmetric: 1 -> 2 is 3, 2 -> 1 is 4"
        );
    }

    #[test]
    fn test_unknown_node_message() {
        let error = GraphSearchError::UnknownNode {
            node: 12,
            node_count: 12,
        };
        assert_eq!(error.to_string(), "unknown node 12: graph has 12 nodes");
    }
}
