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

#![warn(missing_docs)]

//! Uninformed and informed search over a small weighted graph.
//!
//! See:
//! -  Chapter 3: Solving Problems by Searching, sections 3.4 and 3.5.
//!
//! A [`GraphSearchEngine`] owns an immutable, symmetric weight matrix and a table of node
//! positions. Every search is a read-only function of the engine and its arguments, so a single
//! engine can be shared between threads without locking.
//!
//! "No path" is a normal outcome ([`SearchResult::NotFound`] or an empty list). Errors are only
//! returned for malformed graphs and for node ids outside the graph.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod config;
mod engine;
mod enumerate;
pub mod error;
pub mod fixtures;
pub mod generate;
mod heuristic;
mod search;
pub mod summary;

#[cfg(test)]
mod properties;

pub use config::{ConfigError, GraphConfig, LoadedGraph};
pub use engine::GraphSearchEngine;
pub use error::{GraphSearchError, InvalidGraphReason};
pub use heuristic::{ConsistencyReport, HeuristicViolation};
pub use summary::PathSummary;

/// Edge weights, path costs and heuristic estimates.
pub type Int = i64;

/// Nodes are identified by their row in the weight matrix.
pub type NodeId = usize;

/// Seedable random number generator used by [`generate`].
pub type Rng = rand_pcg::Pcg64;

pub(crate) type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub(crate) type HashSet<K> = rustc_hash::FxHashSet<K>;

/// Location of a node on the plane. Only used to estimate remaining distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,

    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (taxicab) distance to another position.
    pub fn manhattan_distance(&self, other: &Position) -> Int {
        let dx = Int::from(self.x) - Int::from(other.x);
        let dy = Int::from(self.y) - Int::from(other.y);
        dx.abs() + dy.abs()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A simple path through the graph together with its total edge weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    /// Visited nodes, from start to goal inclusive.
    pub nodes: Vec<NodeId>,

    /// Sum of the edge weights along `nodes`.
    pub cost: Int,
}

impl Route {
    /// The zero-length route used when start and goal coincide.
    pub fn trivial(node: NodeId) -> Self {
        Self {
            nodes: vec![node],
            cost: 0,
        }
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// First node of the route.
    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Last node of the route.
    pub fn goal(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

// e.g. "0 → 4 → 10 (Cost: 2, Hops: 2)"
impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nodes = self
            .nodes
            .iter()
            .map(|node| node.to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        write!(f, "{} (Cost: {}, Hops: {})", nodes, self.cost, self.hops())
    }
}

/// Outcome of a single start-to-goal search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResult {
    /// The goal was reached.
    Found(Route),

    /// The goal is unreachable from the start. Equivalent to an infinite cost.
    NotFound,
}

impl SearchResult {
    /// Whether the goal was reached.
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }

    /// The route, if one was found.
    pub fn route(&self) -> Option<&Route> {
        match self {
            SearchResult::Found(route) => Some(route),
            SearchResult::NotFound => None,
        }
    }

    /// Consume the result, returning the route if one was found.
    pub fn into_route(self) -> Option<Route> {
        match self {
            SearchResult::Found(route) => Some(route),
            SearchResult::NotFound => None,
        }
    }

    /// Total edge weight of the route. `None` stands for infinity.
    pub fn cost(&self) -> Option<Int> {
        self.route().map(|route| route.cost)
    }

    /// Hop count of the route. `None` stands for infinity.
    pub fn hops(&self) -> Option<usize> {
        self.route().map(Route::hops)
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchResult::Found(route) => route.fmt(f),
            SearchResult::NotFound => write!(f, "No path found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance_is_symmetric() {
        let a = Position::new(0, 4);
        let b = Position::new(2, 2);
        assert_eq!(a.manhattan_distance(&b), 4);
        assert_eq!(b.manhattan_distance(&a), 4);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn test_manhattan_distance_does_not_overflow_at_extremes() {
        let a = Position::new(i32::MIN, i32::MIN);
        let b = Position::new(i32::MAX, i32::MAX);
        assert_eq!(a.manhattan_distance(&b), 2 * (2 * Int::from(i32::MAX) + 1));
    }

    #[test]
    fn test_route_display() {
        let route = Route {
            nodes: vec![0, 4, 10],
            cost: 2,
        };
        assert_eq!(route.to_string(), "0 → 4 → 10 (Cost: 2, Hops: 2)");
        assert_eq!(route.start(), Some(0));
        assert_eq!(route.goal(), Some(10));
    }

    #[test]
    fn test_trivial_route_has_no_hops() {
        let route = Route::trivial(3);
        assert_eq!(route.hops(), 0);
        assert_eq!(route.cost, 0);
        assert_eq!(route.nodes, vec![3]);
    }

    #[test]
    fn test_not_found_has_no_cost() {
        let result = SearchResult::NotFound;
        assert!(!result.is_found());
        assert_eq!(result.cost(), None);
        assert_eq!(result.hops(), None);
        assert_eq!(result.to_string(), "No path found");
    }

    #[test]
    fn test_search_result_serializes_with_status_tag() {
        let found = SearchResult::Found(Route {
            nodes: vec![0, 4, 10],
            cost: 2,
        });
        let json = serde_json::to_value(&found).expect("serialize failed");
        assert_eq!(
            json,
            serde_json::json!({"status": "found", "nodes": [0, 4, 10], "cost": 2})
        );

        let not_found = serde_json::to_value(SearchResult::NotFound).expect("serialize failed");
        assert_eq!(not_found, serde_json::json!({"status": "not_found"}));
    }
}
