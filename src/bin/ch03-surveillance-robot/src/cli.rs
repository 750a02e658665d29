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

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Path finding for a surveillance robot patrolling a small weighted graph.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    /// JSON graph config. Defaults to the built-in 12-node surveillance graph.
    #[arg(long, global = true, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log filter, e.g. `debug` or `graph_search=trace`.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every search between two nodes and print a report.
    Demo {
        #[arg(long, default_value = "0")]
        start: String,

        #[arg(long, default_value = "10")]
        goal: String,

        /// Longest route to enumerate, in nodes.
        #[arg(long, default_value_t = 10)]
        max_length: usize,
    },

    /// Run one search.
    Search {
        #[arg(value_enum)]
        algorithm: Algorithm,

        #[arg(long)]
        start: String,

        #[arg(long)]
        goal: String,

        /// Longest route to enumerate with `all-paths`, in nodes.
        #[arg(long, default_value_t = 10)]
        max_length: usize,

        #[arg(long)]
        json: bool,
    },

    /// List the nodes reachable from a node, in depth-first order.
    Reachable {
        #[arg(long)]
        start: String,

        #[arg(long)]
        json: bool,
    },

    /// Check that the Manhattan heuristic is consistent. Exits with status 1 if it is not.
    VerifyHeuristic {
        #[arg(long)]
        json: bool,
    },

    /// Compare Dijkstra and A* costs for every pair of nodes.
    Compare {
        #[arg(long)]
        json: bool,
    },

    /// Print a random graph config.
    Generate {
        #[arg(long)]
        nodes: usize,

        #[arg(long)]
        width: i32,

        #[arg(long)]
        height: i32,

        #[arg(long, default_value_t = 0.3)]
        edge_probability: f64,

        #[arg(long, default_value_t = 2)]
        max_extra_weight: i64,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Fewest hops, ignoring weights.
    Bfs,

    /// Every route with the fewest hops.
    FewestHops,

    /// Cheapest route, uniform-cost.
    Dijkstra,

    /// Cheapest route, guided by the Manhattan heuristic.
    AStar,

    /// Every simple route up to `--max-length` nodes.
    AllPaths,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "ch03-surveillance-robot",
            "search",
            "a-star",
            "--start",
            "0",
            "--goal",
            "10",
            "--json",
            "-v",
        ])
        .expect("parse failed");
        assert!(cli.verbose);
        match cli.command {
            Command::Search {
                algorithm,
                start,
                goal,
                json,
                ..
            } => {
                assert_eq!(algorithm, Algorithm::AStar);
                assert_eq!(start, "0");
                assert_eq!(goal, "10");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_demo_defaults() {
        let cli = Cli::try_parse_from(["ch03-surveillance-robot", "demo"]).expect("parse failed");
        match cli.command {
            Command::Demo {
                start,
                goal,
                max_length,
            } => {
                assert_eq!((start.as_str(), goal.as_str(), max_length), ("0", "10", 10));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.graph, None);
    }
}
