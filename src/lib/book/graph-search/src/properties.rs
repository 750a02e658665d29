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

// Cross-checks between the searches on small random graphs.

use proptest::prelude::*;

use crate::generate::{random_graph, seeded_rng, GeneratorConfig};
use crate::{GraphSearchEngine, NodeId, SearchResult};

fn generated(
    seed: u64,
    nodes: usize,
    edge_probability: f64,
    max_extra_weight: i64,
) -> GraphSearchEngine {
    let config = GeneratorConfig {
        nodes,
        width: 3,
        height: 3,
        edge_probability,
        max_extra_weight,
    };
    random_graph(&config, &mut seeded_rng(seed))
        .expect("generator config is valid")
        .build()
        .expect("generated graph is valid")
        .into_engine()
}

fn all_pairs(engine: &GraphSearchEngine) -> impl Iterator<Item = (NodeId, NodeId)> {
    let node_count = engine.node_count();
    (0..node_count).flat_map(move |start| (0..node_count).map(move |goal| (start, goal)))
}

proptest! {
    #[test]
    fn test_generated_heuristic_is_consistent(
        seed in any::<u64>(),
        nodes in 1..=7usize,
        edge_probability in 0.0..=1.0f64,
        max_extra_weight in 0..=3i64,
    ) {
        let engine = generated(seed, nodes, edge_probability, max_extra_weight);
        let report = engine.verify_heuristic_consistency();
        prop_assert!(report.is_consistent(), "violations: {:?}", report.violations());
    }

    #[test]
    fn test_a_star_cost_equals_dijkstra_cost(
        seed in any::<u64>(),
        nodes in 1..=7usize,
        edge_probability in 0.0..=1.0f64,
        max_extra_weight in 0..=3i64,
    ) {
        let engine = generated(seed, nodes, edge_probability, max_extra_weight);
        for (start, goal) in all_pairs(&engine) {
            let dijkstra = engine.dijkstra(start, goal).expect("nodes exist");
            let a_star = engine.a_star(start, goal).expect("nodes exist");
            prop_assert_eq!(dijkstra.cost(), a_star.cost(), "{} -> {}", start, goal);
            if let Some(route) = a_star.route() {
                prop_assert_eq!(engine.path_cost(&route.nodes), Ok(Some(route.cost)));
            }
        }
    }

    #[test]
    fn test_enumeration_agrees_with_optimal_searches(
        seed in any::<u64>(),
        nodes in 1..=7usize,
        edge_probability in 0.0..=1.0f64,
        max_extra_weight in 0..=3i64,
    ) {
        let engine = generated(seed, nodes, edge_probability, max_extra_weight);
        for (start, goal) in all_pairs(&engine) {
            let routes = engine
                .enumerate_all_paths(start, goal, nodes)
                .expect("nodes exist");
            let bfs = engine.breadth_first_search(start, goal).expect("nodes exist");
            let dijkstra = engine.dijkstra(start, goal).expect("nodes exist");

            prop_assert_eq!(routes.is_empty(), !bfs.is_found());
            prop_assert_eq!(routes.iter().map(|route| route.cost).min(), dijkstra.cost());
            prop_assert_eq!(routes.iter().map(|route| route.hops()).min(), bfs.hops());

            for route in &routes {
                prop_assert!(route.nodes.len() <= nodes);
                let mut distinct = route.nodes.clone();
                distinct.sort_unstable();
                distinct.dedup();
                prop_assert_eq!(distinct.len(), route.nodes.len());
            }
        }
    }

    #[test]
    fn test_fewest_hop_paths_share_the_bfs_hop_count(
        seed in any::<u64>(),
        nodes in 1..=7usize,
        edge_probability in 0.0..=1.0f64,
    ) {
        let engine = generated(seed, nodes, edge_probability, 0);
        for (start, goal) in all_pairs(&engine) {
            let fewest = engine.all_fewest_hop_paths(start, goal).expect("nodes exist");
            match engine.breadth_first_search(start, goal).expect("nodes exist") {
                SearchResult::Found(route) => {
                    prop_assert!(fewest.contains(&route), "{} not in {:?}", route, fewest);
                    for other in &fewest {
                        prop_assert_eq!(other.hops(), route.hops());
                    }
                    let mut sorted = fewest.clone();
                    sorted.sort_by(|a, b| a.nodes.cmp(&b.nodes));
                    prop_assert_eq!(sorted, fewest);
                }
                SearchResult::NotFound => prop_assert!(fewest.is_empty()),
            }
        }
    }

    #[test]
    fn test_reachable_iff_found(
        seed in any::<u64>(),
        nodes in 1..=7usize,
        edge_probability in 0.0..=0.5f64,
    ) {
        let engine = generated(seed, nodes, edge_probability, 1);
        for start in 0..engine.node_count() {
            let reachable = engine.reachable_from(start).expect("node exists");
            prop_assert_eq!(reachable.first(), Some(&start));
            for goal in 0..engine.node_count() {
                let found = engine.breadth_first_search(start, goal).expect("nodes exist");
                prop_assert_eq!(reachable.contains(&goal), found.is_found());
            }
        }
    }

    #[test]
    fn test_searches_are_idempotent(
        seed in any::<u64>(),
        nodes in 1..=7usize,
        edge_probability in 0.0..=1.0f64,
    ) {
        let engine = generated(seed, nodes, edge_probability, 2);
        let goal = nodes - 1;
        prop_assert_eq!(engine.breadth_first_search(0, goal), engine.breadth_first_search(0, goal));
        prop_assert_eq!(engine.dijkstra(0, goal), engine.dijkstra(0, goal));
        prop_assert_eq!(engine.a_star(0, goal), engine.a_star(0, goal));
        prop_assert_eq!(
            engine.enumerate_all_paths(0, goal, nodes),
            engine.enumerate_all_paths(0, goal, nodes)
        );
    }
}
