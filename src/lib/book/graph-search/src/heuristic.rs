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

// Admissible and consistent heuristics, see section 3.5.4 page 88.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::GraphSearchError;
use crate::{GraphSearchEngine, Int, NodeId};

impl GraphSearchEngine {
    /// Manhattan distance between the positions of two nodes.
    pub fn heuristic(&self, from: NodeId, to: NodeId) -> Result<Int, GraphSearchError> {
        self.check_node(from)?;
        self.check_node(to)?;
        Ok(self.position_of(from).manhattan_distance(self.position_of(to)))
    }

    /// Check `h(n, g) <= w(n, n') + h(n', g)` for every node `n`, every neighbor `n'` and every
    /// goal `g`.
    ///
    /// This is a design-time diagnostic for the graph and position table; searches never call
    /// it.
    #[tracing::instrument(skip(self))]
    pub fn verify_heuristic_consistency(&self) -> ConsistencyReport {
        let node_count = self.node_count();
        let mut violations = Vec::new();
        for node in 0..node_count {
            for &(neighbor, weight) in self.adjacent(node) {
                for goal in 0..node_count {
                    let estimate = self
                        .position_of(node)
                        .manhattan_distance(self.position_of(goal));
                    let bound = weight.saturating_add(
                        self.position_of(neighbor)
                            .manhattan_distance(self.position_of(goal)),
                    );
                    if estimate > bound {
                        violations.push(HeuristicViolation {
                            node,
                            neighbor,
                            goal,
                            estimate,
                            bound,
                        });
                    }
                }
            }
        }

        if violations.is_empty() {
            tracing::debug!("heuristic is consistent");
        } else {
            tracing::warn!(violations = violations.len(), "heuristic is inconsistent");
        }
        ConsistencyReport { violations }
    }
}

/// A single edge and goal for which the heuristic drops by more than the edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeuristicViolation {
    /// The node `n`.
    pub node: NodeId,

    /// The neighbor `n'`.
    pub neighbor: NodeId,

    /// The goal `g`.
    pub goal: NodeId,

    /// `h(n, g)`.
    pub estimate: Int,

    /// `w(n, n') + h(n', g)`, which `estimate` exceeds.
    pub bound: Int,
}

impl HeuristicViolation {
    /// Describe the violation, naming nodes with `label`, e.g.
    /// `"Node 10→4 (goal 4): h(10) = 4 > 1 = cost + h(4)"`.
    pub fn format_with<L, F>(&self, label: F) -> String
    where
        L: Display,
        F: Fn(NodeId) -> L,
    {
        format!(
            "Node {}→{} (goal {}): h({}) = {} > {} = cost + h({})",
            label(self.node),
            label(self.neighbor),
            label(self.goal),
            label(self.node),
            self.estimate,
            self.bound,
            label(self.neighbor)
        )
    }
}

impl Display for HeuristicViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_with(|node| node))
    }
}

/// Result of [`GraphSearchEngine::verify_heuristic_consistency`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    violations: Vec<HeuristicViolation>,
}

impl ConsistencyReport {
    /// True if no violation was found.
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }

    /// Every violation, ordered by (node, neighbor, goal).
    pub fn violations(&self) -> &[HeuristicViolation] {
        &self.violations
    }
}
