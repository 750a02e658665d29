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

// Breadth-first search, see section 3.4.1 page 76.
// Dijkstra's algorithm / uniform-cost search, see section 3.4.2 page 77.
// A* search, see section 3.5.2 page 85.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::error::GraphSearchError;
use crate::{GraphSearchEngine, HashMap, HashSet, Int, NodeId, Route, SearchResult};

impl GraphSearchEngine {
    /// Find the route with the fewest hops, ignoring weights.
    ///
    /// Neighbors are expanded in ascending id order and the goal is tested when it is generated,
    /// so among several fewest-hop routes the first one discovered in FIFO order is returned. The
    /// returned [`Route`] still carries its weighted cost; its hop count is [`Route::hops`].
    #[tracing::instrument(skip(self))]
    pub fn breadth_first_search(
        &self,
        start: NodeId,
        goal: NodeId,
    ) -> Result<SearchResult, GraphSearchError> {
        self.check_node(start)?;
        self.check_node(goal)?;
        if start == goal {
            return Ok(SearchResult::Found(Route::trivial(start)));
        }

        let mut came_from: HashMap<NodeId, NodeId> = HashMap::default();
        let mut visited: HashSet<NodeId> = HashSet::default();
        let mut frontier: VecDeque<NodeId> = VecDeque::new();
        visited.insert(start);
        frontier.push_back(start);

        while let Some(current) = frontier.pop_front() {
            tracing::trace!(current, "expanding");
            for &(neighbor, _) in self.adjacent(current) {
                if !visited.insert(neighbor) {
                    continue;
                }
                came_from.insert(neighbor, current);
                if neighbor == goal {
                    let route = self.route(reconstruct_path(&came_from, goal));
                    tracing::debug!(hops = route.hops(), "goal reached");
                    return Ok(SearchResult::Found(route));
                }
                frontier.push_back(neighbor);
            }
        }

        tracing::debug!("goal unreachable");
        Ok(SearchResult::NotFound)
    }

    /// Find every route with the minimum hop count, sorted in ascending lexicographic order of
    /// node ids. Empty if the goal is unreachable.
    #[tracing::instrument(skip(self))]
    pub fn all_fewest_hop_paths(
        &self,
        start: NodeId,
        goal: NodeId,
    ) -> Result<Vec<Route>, GraphSearchError> {
        self.check_node(start)?;
        self.check_node(goal)?;

        let depths = self.hop_depths(start);
        let Some(goal_depth) = depths[goal] else {
            tracing::debug!("goal unreachable");
            return Ok(Vec::new());
        };

        // Walk back from the goal, only stepping to neighbors exactly one level closer to the
        // start. Every such walk ends at the start, the only node at depth 0.
        let mut reversed_paths: Vec<Vec<NodeId>> = Vec::new();
        let mut stack: Vec<Vec<NodeId>> = vec![vec![goal]];
        while let Some(partial) = stack.pop() {
            let Some(&head) = partial.last() else {
                continue;
            };
            let head_depth = goal_depth + 1 - partial.len();
            if head_depth == 0 {
                reversed_paths.push(partial);
                continue;
            }
            for &(neighbor, _) in self.adjacent(head) {
                if depths[neighbor] == Some(head_depth - 1) {
                    let mut extended = partial.clone();
                    extended.push(neighbor);
                    stack.push(extended);
                }
            }
        }

        let mut routes: Vec<Route> = reversed_paths
            .into_iter()
            .map(|mut nodes| {
                nodes.reverse();
                self.route(nodes)
            })
            .collect();
        routes.sort_unstable_by(|a, b| a.nodes.cmp(&b.nodes));
        tracing::debug!(count = routes.len(), hops = goal_depth, "fewest-hop paths found");
        Ok(routes)
    }

    /// Find the cheapest route with Dijkstra's algorithm (uniform-cost search).
    ///
    /// A node is finalized the first time it is popped from the frontier; later, stale entries
    /// for it are discarded. Ties between equal costs go to the lower node id.
    #[tracing::instrument(skip(self))]
    pub fn dijkstra(&self, start: NodeId, goal: NodeId) -> Result<SearchResult, GraphSearchError> {
        self.check_node(start)?;
        self.check_node(goal)?;
        Ok(self.best_first(start, goal, |_| 0))
    }

    /// Find the cheapest route with A* search, using [`GraphSearchEngine::heuristic`] towards
    /// `goal`.
    ///
    /// The result is only guaranteed optimal when the heuristic is consistent for this graph,
    /// which is not checked here; see [`GraphSearchEngine::verify_heuristic_consistency`]. Ties
    /// are broken by (priority, accumulated cost, node id).
    #[tracing::instrument(skip(self))]
    pub fn a_star(&self, start: NodeId, goal: NodeId) -> Result<SearchResult, GraphSearchError> {
        self.check_node(start)?;
        self.check_node(goal)?;
        let goal_position = *self.position_of(goal);
        Ok(self.best_first(start, goal, |node| {
            self.position_of(node).manhattan_distance(&goal_position)
        }))
    }

    // Shared frontier loop of Dijkstra and A*. Entries are (accumulated + estimate, accumulated,
    // node); with a zero estimate this is plain uniform-cost search.
    fn best_first<F>(&self, start: NodeId, goal: NodeId, estimate: F) -> SearchResult
    where
        F: Fn(NodeId) -> Int,
    {
        if start == goal {
            return SearchResult::Found(Route::trivial(start));
        }

        let mut frontier: BinaryHeap<Reverse<(Int, Int, NodeId)>> = BinaryHeap::new();
        let mut best_cost: HashMap<NodeId, Int> = HashMap::default();
        let mut came_from: HashMap<NodeId, NodeId> = HashMap::default();
        let mut finalized: HashSet<NodeId> = HashSet::default();

        best_cost.insert(start, 0);
        frontier.push(Reverse((estimate(start), 0, start)));

        while let Some(Reverse((priority, cost, current))) = frontier.pop() {
            if !finalized.insert(current) {
                continue;
            }
            tracing::trace!(current, cost, priority, "finalized");

            if current == goal {
                let nodes = reconstruct_path(&came_from, goal);
                tracing::debug!(cost, hops = nodes.len() - 1, "goal reached");
                return SearchResult::Found(Route { nodes, cost });
            }

            for &(neighbor, weight) in self.adjacent(current) {
                if finalized.contains(&neighbor) {
                    continue;
                }
                let candidate = cost.saturating_add(weight);
                let improves = best_cost
                    .get(&neighbor)
                    .map_or(true, |&known| candidate < known);
                if improves {
                    best_cost.insert(neighbor, candidate);
                    came_from.insert(neighbor, current);
                    let priority = candidate.saturating_add(estimate(neighbor));
                    frontier.push(Reverse((priority, candidate, neighbor)));
                }
            }
        }

        tracing::debug!("goal unreachable");
        SearchResult::NotFound
    }

    // Hop distance from `start` to every node; `None` where unreachable.
    fn hop_depths(&self, start: NodeId) -> Vec<Option<usize>> {
        let mut depths: Vec<Option<usize>> = vec![None; self.node_count()];
        let mut frontier: VecDeque<NodeId> = VecDeque::new();
        depths[start] = Some(0);
        frontier.push_back(start);
        while let Some(current) = frontier.pop_front() {
            let next_depth = depths[current].map(|depth| depth + 1);
            for &(neighbor, _) in self.adjacent(current) {
                if depths[neighbor].is_none() {
                    depths[neighbor] = next_depth;
                    frontier.push_back(neighbor);
                }
            }
        }
        depths
    }
}

// Follow back-pointers from the goal to the node without one, i.e. the start.
fn reconstruct_path(came_from: &HashMap<NodeId, NodeId>, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
