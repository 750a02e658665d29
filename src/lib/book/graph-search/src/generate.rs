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

//! Random graphs on a grid.
//!
//! Nodes are placed on distinct cells of a `width` by `height` grid and every pair of nodes is
//! joined with probability `edge_probability`. An edge weighs the Manhattan distance between its
//! ends plus a random extra in `0..=max_extra_weight`, so the Manhattan heuristic of a generated
//! graph is always consistent.

use rand::Rng as _;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::{GraphConfig, Int, Position, Rng};

/// Parameters of [`random_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of nodes.
    pub nodes: usize,

    /// Number of grid columns.
    pub width: i32,

    /// Number of grid rows.
    pub height: i32,

    /// Probability that any given pair of nodes is joined by an edge.
    pub edge_probability: f64,

    /// Largest weight added on top of the Manhattan distance.
    pub max_extra_weight: Int,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: 12,
            width: 4,
            height: 4,
            edge_probability: 0.3,
            max_extra_weight: 2,
        }
    }
}

/// Invalid [`GeneratorConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    /// The grid is not strictly positive in both directions.
    #[error("grid must be at least 1x1, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i32,

        /// Requested height.
        height: i32,
    },

    /// More nodes than grid cells.
    #[error("cannot place {nodes} nodes on {cells} grid cells")]
    TooManyNodes {
        /// Requested number of nodes.
        nodes: usize,

        /// Number of grid cells.
        cells: usize,
    },

    /// The edge probability is outside `[0, 1]`.
    #[error("edge probability must be between 0 and 1, got {0}")]
    InvalidProbability(f64),

    /// The extra weight is negative.
    #[error("max extra weight must not be negative, got {0}")]
    NegativeExtraWeight(Int),
}

/// Generator seeded the same way on every platform.
pub fn seeded_rng(seed: u64) -> Rng {
    Rng::seed_from_u64(seed)
}

/// Generate a random matrix graph. The same config and generator state always produce the same
/// graph.
pub fn random_graph(config: &GeneratorConfig, rng: &mut Rng) -> Result<GraphConfig, GenerateError> {
    if config.width <= 0 || config.height <= 0 {
        return Err(GenerateError::InvalidDimensions {
            width: config.width,
            height: config.height,
        });
    }
    let width = config.width as usize;
    let cells = width.saturating_mul(config.height as usize);
    if config.nodes > cells {
        return Err(GenerateError::TooManyNodes {
            nodes: config.nodes,
            cells,
        });
    }
    if !(0.0..=1.0).contains(&config.edge_probability) {
        return Err(GenerateError::InvalidProbability(config.edge_probability));
    }
    if config.max_extra_weight < 0 {
        return Err(GenerateError::NegativeExtraWeight(config.max_extra_weight));
    }

    let positions: Vec<Position> = rand::seq::index::sample(rng, cells, config.nodes)
        .into_iter()
        .map(|cell| Position::new((cell % width) as i32, (cell / width) as i32))
        .collect();

    let mut weights = vec![vec![0; config.nodes]; config.nodes];
    for from in 0..config.nodes {
        for to in (from + 1)..config.nodes {
            if rng.gen_bool(config.edge_probability) {
                let extra = rng.gen_range(0..=config.max_extra_weight);
                let weight = positions[from].manhattan_distance(&positions[to]) + extra;
                weights[from][to] = weight;
                weights[to][from] = weight;
            }
        }
    }

    tracing::debug!(nodes = config.nodes, "generated random graph");
    Ok(GraphConfig::Matrix { weights, positions })
}
