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

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use graph_search::generate::{random_graph, seeded_rng, GeneratorConfig};
use graph_search::{
    fixtures, GraphConfig, GraphSearchError, Int, LoadedGraph, NodeId, PathSummary, Route,
    SearchResult,
};
use rayon::prelude::*;
use serde::Serialize;

use crate::cli::{Algorithm, Cli, Command};

/// How a successful command should exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    InconsistentHeuristic,
}

pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<Outcome> {
    // Generate writes a new graph, so only the other commands read one.
    let graph = || load_graph(cli.graph.as_deref());
    match &cli.command {
        Command::Demo {
            start,
            goal,
            max_length,
        } => demo(&graph()?, start, goal, *max_length, out)?,
        Command::Search {
            algorithm,
            start,
            goal,
            max_length,
            json,
        } => search(&graph()?, *algorithm, start, goal, *max_length, *json, out)?,
        Command::Reachable { start, json } => reachable(&graph()?, start, *json, out)?,
        Command::VerifyHeuristic { json } => return verify_heuristic(&graph()?, *json, out),
        Command::Compare { json } => compare(&graph()?, *json, out)?,
        Command::Generate {
            nodes,
            width,
            height,
            edge_probability,
            max_extra_weight,
            seed,
        } => {
            let config = GeneratorConfig {
                nodes: *nodes,
                width: *width,
                height: *height,
                edge_probability: *edge_probability,
                max_extra_weight: *max_extra_weight,
            };
            generate(&config, *seed, out)?
        }
    }
    Ok(Outcome::Success)
}

fn load_graph(path: Option<&Path>) -> anyhow::Result<LoadedGraph> {
    let config = match path {
        Some(path) => GraphConfig::from_json_file(path)
            .with_context(|| format!("failed to load graph from {}", path.display()))?,
        None => fixtures::surveillance_robot(),
    };
    let graph = config.build().context("invalid graph config")?;
    tracing::debug!(nodes = graph.engine().node_count(), "loaded graph");
    Ok(graph)
}

fn node(graph: &LoadedGraph, label: &str) -> anyhow::Result<NodeId> {
    graph
        .node_id(label)
        .with_context(|| format!("no node labelled {:?}", label))
}

fn write_result<W: Write>(
    graph: &LoadedGraph,
    description: &str,
    result: &SearchResult,
    out: &mut W,
) -> anyhow::Result<()> {
    match result {
        SearchResult::Found(route) => {
            writeln!(out, "{}: {}", description, graph.format_route(route))?
        }
        SearchResult::NotFound => writeln!(out, "{}: No path found", description)?,
    }
    Ok(())
}

fn demo<W: Write>(
    graph: &LoadedGraph,
    start_label: &str,
    goal_label: &str,
    max_length: usize,
    out: &mut W,
) -> anyhow::Result<()> {
    let start = node(graph, start_label)?;
    let goal = node(graph, goal_label)?;
    let engine = graph.engine();

    writeln!(
        out,
        "Surveillance Robot Pathfinding: Node {} to Node {}",
        start_label, goal_label
    )?;
    writeln!(out, "{}", "=".repeat(60))?;

    let bfs = engine.breadth_first_search(start, goal)?;
    write_result(graph, "Path with fewest stopovers (BFS)", &bfs, out)?;

    writeln!(
        out,
        "\nAll possible paths from {} to {}:",
        start_label, goal_label
    )?;
    let routes = engine.enumerate_all_paths(start, goal, max_length)?;
    if routes.is_empty() {
        writeln!(out, "  No paths found")?;
    }
    for (index, route) in routes.iter().enumerate() {
        writeln!(out, "  Path {}: {}", index + 1, graph.format_route(route))?;
    }

    writeln!(out)?;
    write_result(
        graph,
        "Cheapest path (Dijkstra)",
        &engine.dijkstra(start, goal)?,
        out,
    )?;
    write_result(graph, "Cheapest path (A*)", &engine.a_star(start, goal)?, out)?;

    let reachable = engine.reachable_from(start)?;
    writeln!(
        out,
        "\nAll nodes reachable from {}: [{}]",
        start_label,
        reachable
            .iter()
            .map(|&node| graph.label(node).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(", ")
    )?;

    writeln!(out, "\nVerifying heuristic consistency:")?;
    writeln!(
        out,
        "For consistency: h(n) <= cost(n,n') + h(n') for all neighbors n'"
    )?;
    let report = engine.verify_heuristic_consistency();
    if report.is_consistent() {
        writeln!(out, "✓ Heuristic is consistent!")?;
    } else {
        writeln!(out, "✗ Heuristic inconsistencies found:")?;
        for violation in report.violations().iter().take(5) {
            writeln!(out, "  {}", graph.format_violation(violation))?;
        }
    }

    writeln!(out, "\nPath Analysis Summary:")?;
    writeln!(out, "{}", "-".repeat(30))?;
    if let Some(summary) = PathSummary::from_routes(&routes) {
        writeln!(out, "Total paths found: {}", summary.total)?;
        writeln!(out, "Cost range: {} - {}", summary.min_cost, summary.max_cost)?;
        writeln!(out, "Hops range: {} - {}", summary.min_hops, summary.max_hops)?;
        writeln!(out, "\nOptimal paths:")?;
        writeln!(
            out,
            "Minimum cost: {} (Cost: {})",
            graph.format_nodes(&summary.cheapest.nodes),
            summary.cheapest.cost
        )?;
        writeln!(
            out,
            "Minimum hops: {} (Hops: {})",
            graph.format_nodes(&summary.fewest_hops.nodes),
            summary.fewest_hops.hops()
        )?;
    }
    Ok(())
}

// JSON form of a route, with labels alongside node ids.
#[derive(Debug, Serialize)]
struct RouteOutput {
    labels: Vec<String>,
    nodes: Vec<NodeId>,
    cost: Int,
    hops: usize,
}

impl RouteOutput {
    fn new(graph: &LoadedGraph, route: &Route) -> Self {
        Self {
            labels: route
                .nodes
                .iter()
                .map(|&node| graph.label(node).unwrap_or("?").to_string())
                .collect(),
            nodes: route.nodes.clone(),
            cost: route.cost,
            hops: route.hops(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SearchOutput {
    Found { route: RouteOutput },
    NotFound,
}

fn search<W: Write>(
    graph: &LoadedGraph,
    algorithm: Algorithm,
    start_label: &str,
    goal_label: &str,
    max_length: usize,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let start = node(graph, start_label)?;
    let goal = node(graph, goal_label)?;
    let engine = graph.engine();

    let single = match algorithm {
        Algorithm::Bfs => Some(engine.breadth_first_search(start, goal)?),
        Algorithm::Dijkstra => Some(engine.dijkstra(start, goal)?),
        Algorithm::AStar => Some(engine.a_star(start, goal)?),
        Algorithm::FewestHops | Algorithm::AllPaths => None,
    };
    if let Some(result) = single {
        if json {
            let output = match &result {
                SearchResult::Found(route) => SearchOutput::Found {
                    route: RouteOutput::new(graph, route),
                },
                SearchResult::NotFound => SearchOutput::NotFound,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        } else {
            match &result {
                SearchResult::Found(route) => writeln!(out, "{}", graph.format_route(route))?,
                SearchResult::NotFound => writeln!(out, "No path found")?,
            }
        }
        return Ok(());
    }

    let routes = match algorithm {
        Algorithm::FewestHops => engine.all_fewest_hop_paths(start, goal)?,
        _ => engine.enumerate_all_paths(start, goal, max_length)?,
    };
    if json {
        let output: Vec<RouteOutput> = routes
            .iter()
            .map(|route| RouteOutput::new(graph, route))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else if routes.is_empty() {
        writeln!(out, "No path found")?;
    } else {
        for route in &routes {
            writeln!(out, "{}", graph.format_route(route))?;
        }
    }
    Ok(())
}

fn reachable<W: Write>(
    graph: &LoadedGraph,
    start_label: &str,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let start = node(graph, start_label)?;
    let labels: Vec<&str> = graph
        .engine()
        .reachable_from(start)?
        .into_iter()
        .map(|node| graph.label(node).unwrap_or("?"))
        .collect();
    if json {
        writeln!(out, "{}", serde_json::to_string(&labels)?)?;
    } else {
        writeln!(out, "{}", labels.join(", "))?;
    }
    Ok(())
}

fn verify_heuristic<W: Write>(
    graph: &LoadedGraph,
    json: bool,
    out: &mut W,
) -> anyhow::Result<Outcome> {
    let report = graph.engine().verify_heuristic_consistency();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else if report.is_consistent() {
        writeln!(out, "✓ Heuristic is consistent!")?;
    } else {
        writeln!(
            out,
            "✗ Heuristic inconsistencies found: {}",
            report.violations().len()
        )?;
        for violation in report.violations() {
            writeln!(out, "  {}", graph.format_violation(violation))?;
        }
    }

    if report.is_consistent() {
        Ok(Outcome::Success)
    } else {
        Ok(Outcome::InconsistentHeuristic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Comparison {
    start: String,
    goal: String,
    dijkstra: Option<Int>,
    a_star: Option<Int>,
}

#[derive(Debug, Serialize)]
struct ComparisonReport {
    pairs: usize,
    disagreements: Vec<Comparison>,
}

fn compare_all_pairs(graph: &LoadedGraph) -> anyhow::Result<ComparisonReport> {
    let engine = graph.engine();
    let node_count = engine.node_count();
    let pairs: Vec<(NodeId, NodeId)> = (0..node_count)
        .flat_map(|start| (0..node_count).map(move |goal| (start, goal)))
        .collect();

    let comparisons = pairs
        .par_iter()
        .map(|&(start, goal)| -> Result<Comparison, GraphSearchError> {
            Ok(Comparison {
                start: graph.label(start).unwrap_or("?").to_string(),
                goal: graph.label(goal).unwrap_or("?").to_string(),
                dijkstra: engine.dijkstra(start, goal)?.cost(),
                a_star: engine.a_star(start, goal)?.cost(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let disagreements: Vec<Comparison> = comparisons
        .into_iter()
        .filter(|comparison| comparison.dijkstra != comparison.a_star)
        .collect();
    if !disagreements.is_empty() {
        tracing::warn!(
            count = disagreements.len(),
            "A* and Dijkstra disagree on some costs"
        );
    }
    Ok(ComparisonReport {
        pairs: pairs.len(),
        disagreements,
    })
}

fn compare<W: Write>(graph: &LoadedGraph, json: bool, out: &mut W) -> anyhow::Result<()> {
    let report = compare_all_pairs(graph)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    let describe =
        |cost: Option<Int>| cost.map_or_else(|| "unreachable".to_string(), |c| c.to_string());
    for comparison in &report.disagreements {
        writeln!(
            out,
            "{} → {}: Dijkstra {}, A* {}",
            comparison.start,
            comparison.goal,
            describe(comparison.dijkstra),
            describe(comparison.a_star)
        )?;
    }
    writeln!(
        out,
        "Compared {} pairs: {} disagree",
        report.pairs,
        report.disagreements.len()
    )?;
    Ok(())
}

fn generate<W: Write>(config: &GeneratorConfig, seed: u64, out: &mut W) -> anyhow::Result<()> {
    let graph = random_graph(config, &mut seeded_rng(seed)).context("invalid generator settings")?;
    writeln!(out, "{}", graph.to_json_pretty()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run_args(args: &[&str]) -> (anyhow::Result<Outcome>, String) {
        let cli = Cli::try_parse_from(
            std::iter::once("ch03-surveillance-robot").chain(args.iter().copied()),
        )
        .expect("parse failed");
        let mut out = Vec::new();
        let outcome = run(&cli, &mut out);
        (outcome, String::from_utf8(out).expect("output is utf-8"))
    }

    #[test]
    fn test_demo_on_reference_graph() {
        let (outcome, output) = run_args(&["demo"]);
        assert_eq!(outcome.expect("demo failed"), Outcome::Success);
        assert!(output.starts_with("Surveillance Robot Pathfinding: Node 0 to Node 10\n"));
        assert!(
            output.contains("Path with fewest stopovers (BFS): 0 → 4 → 10 (Cost: 2, Hops: 2)")
        );
        assert!(output.contains("  Path 1: 0 → 1 → 2 → 3 → 4 → 10 (Cost: 5, Hops: 5)"));
        assert!(output.contains("Cheapest path (Dijkstra): 0 → 4 → 10 (Cost: 2, Hops: 2)"));
        assert!(output.contains("Cheapest path (A*): 0 → 4 → 10 (Cost: 2, Hops: 2)"));
        assert!(output.contains(
            "All nodes reachable from 0: [0, 1, 2, 3, 4, 10, 5, 6, 11, 7, 9, 8]"
        ));
        assert!(output.contains("✗ Heuristic inconsistencies found:"));
        assert!(output.contains("Minimum cost: 0 → 4 → 10 (Cost: 2)"));
        assert!(output.contains("Minimum hops: 0 → 4 → 10 (Hops: 2)"));
    }

    #[test]
    fn test_search_json() {
        let (outcome, output) = run_args(&[
            "search", "dijkstra", "--start", "0", "--goal", "10", "--json",
        ]);
        assert_eq!(outcome.expect("search failed"), Outcome::Success);
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(value["status"], "found");
        assert_eq!(value["route"]["cost"], 2);
        assert_eq!(value["route"]["nodes"], serde_json::json!([0, 4, 10]));
    }

    #[test]
    fn test_search_fewest_hops() {
        let (outcome, output) =
            run_args(&["search", "fewest-hops", "--start", "0", "--goal", "10"]);
        assert_eq!(outcome.expect("search failed"), Outcome::Success);
        assert_eq!(
            output,
            "0 → 4 → 10 (Cost: 2, Hops: 2)\n0 → 5 → 10 (Cost: 3, Hops: 2)\n"
        );
    }

    #[test]
    fn test_search_unknown_label_is_error() {
        let (outcome, _) = run_args(&["search", "bfs", "--start", "0", "--goal", "nowhere"]);
        assert!(outcome.is_err());
    }

    #[test]
    fn test_reachable() {
        let (outcome, output) = run_args(&["reachable", "--start", "11", "--json"]);
        assert_eq!(outcome.expect("reachable failed"), Outcome::Success);
        let labels: Vec<String> = serde_json::from_str(&output).expect("valid json");
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "11");
    }

    #[test]
    fn test_verify_heuristic_reports_inconsistency() {
        let (outcome, output) = run_args(&["verify-heuristic"]);
        assert_eq!(
            outcome.expect("verify failed"),
            Outcome::InconsistentHeuristic
        );
        assert!(output.contains("  Node 4→10 (goal 10): h(4) = 4 > 1 = cost + h(10)"));
    }

    #[test]
    fn test_city_grid_from_file() {
        let path = std::env::temp_dir().join(format!(
            "ch03-surveillance-robot-city-grid-{}.json",
            std::process::id()
        ));
        let json = fixtures::city_grid()
            .to_json_pretty()
            .expect("serialize failed");
        std::fs::write(&path, json).expect("write failed");
        let path_arg = path.to_string_lossy().to_string();

        let (verify, _) = run_args(&["verify-heuristic", "--graph", &path_arg]);
        let (search, output) = run_args(&[
            "search", "a-star", "--start", "1", "--goal", "9", "--graph", &path_arg,
        ]);
        let (comparison, compared) = run_args(&["compare", "--graph", &path_arg]);
        let _ = std::fs::remove_file(&path);

        assert_eq!(verify.expect("verify failed"), Outcome::Success);
        assert_eq!(search.expect("search failed"), Outcome::Success);
        assert_eq!(output, "1 → 2 → 3 → 6 → 9 (Cost: 32, Hops: 4)\n");
        assert_eq!(comparison.expect("compare failed"), Outcome::Success);
        assert_eq!(compared, "Compared 81 pairs: 0 disagree\n");
    }

    #[test]
    fn test_missing_graph_file_is_error() {
        let (outcome, _) = run_args(&["demo", "--graph", "/nonexistent/graph.json"]);
        assert!(outcome.is_err());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let args = ["generate", "--nodes", "5", "--width", "3", "--height", "3", "--seed", "9"];
        let (first, first_output) = run_args(&args);
        let (second, second_output) = run_args(&args);
        assert_eq!(first.expect("generate failed"), Outcome::Success);
        assert_eq!(second.expect("generate failed"), Outcome::Success);
        assert_eq!(first_output, second_output);
        let config = GraphConfig::from_json_str(&first_output).expect("valid config");
        assert_eq!(
            config.build().expect("valid graph").engine().node_count(),
            5
        );
    }

    #[test]
    fn test_generate_does_not_read_graph() {
        let args = [
            "generate",
            "--nodes",
            "3",
            "--width",
            "2",
            "--height",
            "2",
            "--graph",
            "/nonexistent/graph.json",
        ];
        let (outcome, output) = run_args(&args);
        assert_eq!(outcome.expect("generate failed"), Outcome::Success);
        let config = GraphConfig::from_json_str(&output).expect("valid config");
        assert_eq!(
            config.build().expect("valid graph").engine().node_count(),
            3
        );
    }

    #[test]
    fn test_generate_rejects_too_many_nodes() {
        let (outcome, _) =
            run_args(&["generate", "--nodes", "10", "--width", "3", "--height", "3"]);
        assert!(outcome.is_err());
    }
}
