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

use crate::error::GraphSearchError;
use crate::{GraphSearchEngine, NodeId, Route};

impl GraphSearchEngine {
    /// Enumerate every simple route from `start` to `goal` with at most `max_length` nodes.
    ///
    /// This is an exhaustive backtracking depth-first search and is exponential in the size of
    /// the graph. `max_length` bounds the depth of the search; the backtracking stack lives on
    /// the heap, so long routes do not grow the call stack. Routes are returned in discovery
    /// order, i.e. ascending neighbor id at every branch.
    #[tracing::instrument(skip(self))]
    pub fn enumerate_all_paths(
        &self,
        start: NodeId,
        goal: NodeId,
        max_length: usize,
    ) -> Result<Vec<Route>, GraphSearchError> {
        self.check_node(start)?;
        self.check_node(goal)?;

        let mut enumeration = PathEnumeration {
            engine: self,
            goal,
            max_length,
            path: Vec::with_capacity(max_length.min(self.node_count())),
            on_path: vec![false; self.node_count()],
            routes: Vec::new(),
        };
        if max_length > 0 {
            enumeration.run(start);
        }

        tracing::debug!(count = enumeration.routes.len(), "enumerated paths");
        Ok(enumeration.routes)
    }

    /// Every node reachable from `start`, in depth-first visitation order. `start` comes first.
    #[tracing::instrument(skip(self))]
    pub fn reachable_from(&self, start: NodeId) -> Result<Vec<NodeId>, GraphSearchError> {
        self.check_node(start)?;

        let mut visited = vec![false; self.node_count()];
        let mut order = vec![start];
        visited[start] = true;

        // Each frame is a node and the index of the next neighbor to try, which reproduces the
        // order of the recursive formulation without growing the call stack.
        let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];
        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            match self.adjacent(node).get(next) {
                Some(&(neighbor, _)) => {
                    frame.1 += 1;
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        order.push(neighbor);
                        stack.push((neighbor, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }

        tracing::debug!(count = order.len(), "reachable nodes");
        Ok(order)
    }
}

// State of one enumerate_all_paths call. `on_path` mirrors `path`, so a node can be reused by
// sibling branches once the branch that visited it has been backtracked.
struct PathEnumeration<'a> {
    engine: &'a GraphSearchEngine,
    goal: NodeId,
    max_length: usize,
    path: Vec<NodeId>,
    on_path: Vec<bool>,
    routes: Vec<Route>,
}

impl PathEnumeration<'_> {
    fn run(&mut self, start: NodeId) {
        // frames[i] is the index of the next neighbor of path[i] to try. Only nodes that can be
        // extended get a frame, so frames and path always have the same length.
        let mut frames: Vec<usize> = Vec::new();
        if self.enter(start) {
            frames.push(0);
        }

        while let Some(frame) = frames.last_mut() {
            let next = *frame;
            *frame += 1;
            let Some(&node) = self.path.last() else {
                break;
            };
            match self.engine.adjacent(node).get(next) {
                Some(&(neighbor, _)) => {
                    if !self.on_path[neighbor] && self.enter(neighbor) {
                        frames.push(0);
                    }
                }
                None => {
                    frames.pop();
                    self.leave();
                }
            }
        }
    }

    // Push `node` onto the path, recording a route if it is the goal. Returns true if the node
    // stays on the path to be extended; otherwise it has already been popped again.
    fn enter(&mut self, node: NodeId) -> bool {
        self.path.push(node);
        self.on_path[node] = true;

        if node == self.goal {
            self.routes.push(self.engine.route(self.path.clone()));
        } else if self.path.len() < self.max_length {
            return true;
        }
        self.leave();
        false
    }

    fn leave(&mut self) {
        if let Some(node) = self.path.pop() {
            self.on_path[node] = false;
        }
    }
}
