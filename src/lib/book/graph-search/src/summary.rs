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

//! Statistics over a set of enumerated routes.

use serde::{Deserialize, Serialize};

use crate::{Int, Route};

/// Cost and length extremes of a non-empty set of routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSummary {
    /// Number of routes.
    pub total: usize,

    /// Lowest cost.
    pub min_cost: Int,

    /// Highest cost.
    pub max_cost: Int,

    /// Fewest hops.
    pub min_hops: usize,

    /// Most hops.
    pub max_hops: usize,

    /// The first route with the lowest cost.
    pub cheapest: Route,

    /// The first route with the fewest hops.
    pub fewest_hops: Route,
}

impl PathSummary {
    /// Summarise `routes`, or `None` if there are none. Ties go to the earliest route.
    pub fn from_routes(routes: &[Route]) -> Option<Self> {
        let cheapest = routes.iter().min_by_key(|route| route.cost)?;
        let fewest_hops = routes.iter().min_by_key(|route| route.hops())?;
        let max_cost = routes.iter().map(|route| route.cost).max()?;
        let max_hops = routes.iter().map(Route::hops).max()?;
        Some(Self {
            total: routes.len(),
            min_cost: cheapest.cost,
            max_cost,
            min_hops: fewest_hops.hops(),
            max_hops,
            cheapest: cheapest.clone(),
            fewest_hops: fewest_hops.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_empty_has_no_summary() {
        assert_eq!(PathSummary::from_routes(&[]), None);
    }

    #[test]
    fn test_ties_go_to_first_route() {
        let routes = vec![
            Route {
                nodes: vec![0, 1, 3],
                cost: 2,
            },
            Route {
                nodes: vec![0, 2, 3],
                cost: 2,
            },
            Route {
                nodes: vec![0, 1, 2, 3],
                cost: 5,
            },
        ];
        let summary = PathSummary::from_routes(&routes).expect("routes are not empty");
        assert_eq!(summary.total, 3);
        assert_eq!(summary.min_cost, 2);
        assert_eq!(summary.max_cost, 5);
        assert_eq!(summary.min_hops, 2);
        assert_eq!(summary.max_hops, 3);
        assert_eq!(summary.cheapest, routes[0]);
        assert_eq!(summary.fewest_hops, routes[0]);
    }

    #[test]
    fn test_surveillance_robot_summary() {
        let engine = fixtures::surveillance_robot()
            .build()
            .expect("reference graph is valid")
            .into_engine();
        let routes = engine.enumerate_all_paths(0, 10, 10).expect("nodes exist");
        let summary = PathSummary::from_routes(&routes).expect("0 reaches 10");
        assert_eq!(summary.total, routes.len());
        assert_eq!(summary.min_cost, 2);
        assert_eq!(summary.cheapest.nodes, vec![0, 4, 10]);
        assert_eq!(summary.min_hops, 2);
        assert!(summary.max_hops <= 9);
        assert_eq!(
            Some(summary.min_cost),
            engine.dijkstra(0, 10).expect("nodes exist").cost()
        );
    }
}
