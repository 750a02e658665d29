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

//! Graph configuration files.
//!
//! A graph is described either by its weight matrix, where node `i` is labelled `"i"`:
//!
//! ```json
//! {"kind": "matrix", "weights": [[0, 2], [2, 0]], "positions": [{"x": 0, "y": 0}, {"x": 1, "y": 1}]}
//! ```
//!
//! or by labelled nodes and undirected edges:
//!
//! ```json
//! {
//!   "kind": "edges",
//!   "nodes": [{"label": "A", "position": {"x": 0, "y": 0}}, {"label": "B", "position": {"x": 1, "y": 0}}],
//!   "edges": [{"from": "A", "to": "B", "weight": 3}]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GraphSearchError;
use crate::{GraphSearchEngine, HashMap, HeuristicViolation, Int, NodeId, Position, Route};

/// Config error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read graph config {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,

        /// Underlying error.
        source: std::io::Error,
    },

    /// The config is not valid JSON or does not match the schema.
    #[error("failed to parse graph config: {0}")]
    Json(#[from] serde_json::Error),

    /// Two nodes share a label.
    #[error("duplicate node label: {0}")]
    DuplicateLabel(String),

    /// A label does not name any node.
    #[error("unknown node label: {0}")]
    UnknownLabel(String),

    /// An edge was listed with a zero or negative weight.
    #[error("edge {from} - {to} must have a positive weight, got {weight}")]
    NonPositiveWeight {
        /// Label of one end.
        from: String,

        /// Label of the other end.
        to: String,

        /// The rejected weight.
        weight: Int,
    },

    /// The same edge was listed twice with different weights.
    #[error("conflicting weights for edge {from} - {to}: {first} and {second}")]
    ConflictingEdge {
        /// Label of one end.
        from: String,

        /// Label of the other end.
        to: String,

        /// Weight seen first.
        first: Int,

        /// Weight seen second.
        second: Int,
    },

    /// The described graph was rejected by the engine.
    #[error(transparent)]
    Graph(#[from] GraphSearchError),
}

/// Serializable description of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphConfig {
    /// Symmetric weight matrix plus one position per row.
    Matrix {
        /// `weights[i][j]` is the weight of the edge between `i` and `j`, 0 for none.
        weights: Vec<Vec<Int>>,

        /// `positions[i]` is the position of node `i`.
        positions: Vec<Position>,
    },

    /// Labelled nodes and undirected edges.
    Edges {
        /// Nodes, in id order.
        nodes: Vec<NodeSpec>,

        /// Undirected edges between labelled nodes.
        edges: Vec<EdgeSpec>,
    },
}

/// A labelled node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Unique label.
    pub label: String,

    /// Position used by the heuristic.
    pub position: Position,
}

/// An undirected, weighted edge between two labelled nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Label of one end.
    pub from: String,

    /// Label of the other end.
    pub to: String,

    /// Edge weight. Must be positive; leave the edge out instead of giving it weight 0.
    pub weight: Int,
}

impl GraphConfig {
    /// Parse a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "read graph config");
        Self::from_json_str(&contents)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the config and build an engine.
    pub fn build(&self) -> Result<LoadedGraph, ConfigError> {
        match self {
            GraphConfig::Matrix { weights, positions } => {
                let engine =
                    GraphSearchEngine::new(weights.clone(), positions.iter().copied().enumerate())?;
                let labels: Vec<String> =
                    (0..engine.node_count()).map(|node| node.to_string()).collect();
                let ids = index_labels(&labels)?;
                Ok(LoadedGraph {
                    engine,
                    labels,
                    ids,
                })
            }
            GraphConfig::Edges { nodes, edges } => {
                let labels: Vec<String> = nodes.iter().map(|node| node.label.clone()).collect();
                let ids = index_labels(&labels)?;
                let lookup = |label: &str| {
                    ids.get(label)
                        .copied()
                        .ok_or_else(|| ConfigError::UnknownLabel(label.to_string()))
                };

                let mut weights = vec![vec![0; nodes.len()]; nodes.len()];
                for edge in edges {
                    let from = lookup(&edge.from)?;
                    let to = lookup(&edge.to)?;
                    if edge.weight <= 0 {
                        return Err(ConfigError::NonPositiveWeight {
                            from: edge.from.clone(),
                            to: edge.to.clone(),
                            weight: edge.weight,
                        });
                    }
                    let existing = weights[from][to];
                    if existing != 0 && existing != edge.weight {
                        return Err(ConfigError::ConflictingEdge {
                            from: edge.from.clone(),
                            to: edge.to.clone(),
                            first: existing,
                            second: edge.weight,
                        });
                    }
                    weights[from][to] = edge.weight;
                    weights[to][from] = edge.weight;
                }

                let positions = nodes.iter().map(|node| node.position).enumerate();
                let engine = GraphSearchEngine::new(weights, positions)?;
                Ok(LoadedGraph {
                    engine,
                    labels,
                    ids,
                })
            }
        }
    }
}

fn index_labels(labels: &[String]) -> Result<HashMap<String, NodeId>, ConfigError> {
    let mut ids: HashMap<String, NodeId> = HashMap::default();
    for (node, label) in labels.iter().enumerate() {
        if ids.insert(label.clone(), node).is_some() {
            return Err(ConfigError::DuplicateLabel(label.clone()));
        }
    }
    Ok(ids)
}

/// An engine together with the labels of its nodes.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    engine: GraphSearchEngine,
    labels: Vec<String>,
    ids: HashMap<String, NodeId>,
}

impl LoadedGraph {
    /// The engine.
    pub fn engine(&self) -> &GraphSearchEngine {
        &self.engine
    }

    /// Drop the labels and keep the engine.
    pub fn into_engine(self) -> GraphSearchEngine {
        self.engine
    }

    /// Labels, indexed by node id.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Resolve a label to a node id.
    pub fn node_id(&self, label: &str) -> Result<NodeId, ConfigError> {
        self.ids
            .get(label)
            .copied()
            .ok_or_else(|| ConfigError::UnknownLabel(label.to_string()))
    }

    /// Label of a node id.
    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    /// Labels of `nodes`, e.g. `"1 → 2 → 3"`. Unknown ids are printed as numbers.
    pub fn format_nodes(&self, nodes: &[NodeId]) -> String {
        nodes
            .iter()
            .map(|&node| self.display_label(node))
            .collect::<Vec<_>>()
            .join(" → ")
    }

    /// Like [`HeuristicViolation`]'s `Display`, but with labels.
    pub fn format_violation(&self, violation: &HeuristicViolation) -> String {
        violation.format_with(|node| self.display_label(node))
    }

    fn display_label(&self, node: NodeId) -> String {
        match self.label(node) {
            Some(label) => label.to_string(),
            None => node.to_string(),
        }
    }

    /// Like [`Route`]'s `Display`, but with labels.
    pub fn format_route(&self, route: &Route) -> String {
        format!(
            "{} (Cost: {}, Hops: {})",
            self.format_nodes(&route.nodes),
            route.cost,
            route.hops()
        )
    }
}
