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

//! Small graphs used by the exercises and the tests.

use crate::config::{EdgeSpec, GraphConfig, NodeSpec};
use crate::{Int, Position};

const SURVEILLANCE_ROBOT_WEIGHTS: [[Int; 12]; 12] = [
    // 0  1  2  3  4  5  6  7  8  9 10 11
    [0, 1, 1, 1, 1, 2, 2, 0, 0, 0, 0, 0], // 0
    [1, 0, 1, 1, 1, 0, 0, 0, 1, 0, 0, 0], // 1
    [1, 1, 0, 1, 1, 0, 0, 0, 0, 1, 0, 0], // 2
    [1, 1, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0], // 3
    [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 0], // 4
    [2, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0], // 5
    [2, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1], // 6
    [0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0], // 7
    [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // 8
    [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0], // 9
    [0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0], // 10
    [0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0], // 11
];

const SURVEILLANCE_ROBOT_POSITIONS: [(i32, i32); 12] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
    (2, 3),
];

// Rows of the 3x3 grid, labelled 1 to 9 left to right, top to bottom.
const CITY_GRID_EDGES: [(&str, &str, Int); 12] = [
    ("1", "2", 3),
    ("1", "4", 5),
    ("2", "3", 5),
    ("2", "5", 7),
    ("3", "6", 9),
    ("4", "5", 9),
    ("4", "7", 11),
    ("5", "6", 11),
    ("5", "8", 13),
    ("6", "9", 15),
    ("7", "8", 15),
    ("8", "9", 17),
];

/// The 12-node surveillance robot graph. Nodes are labelled by their index.
///
/// Note that its Manhattan heuristic is not consistent, e.g. nodes 4 and 10 are joined by an
/// edge of weight 1 but are four squares apart.
pub fn surveillance_robot() -> GraphConfig {
    GraphConfig::Matrix {
        weights: SURVEILLANCE_ROBOT_WEIGHTS
            .iter()
            .map(|row| row.to_vec())
            .collect(),
        positions: SURVEILLANCE_ROBOT_POSITIONS
            .iter()
            .map(|&(x, y)| Position::new(x, y))
            .collect(),
    }
}

/// A 3x3 city grid with weighted streets, labelled `"1"` to `"9"`. The cheapest route from
/// `"1"` to `"9"` costs 32.
pub fn city_grid() -> GraphConfig {
    let nodes = (0..9)
        .map(|index: i32| NodeSpec {
            label: (index + 1).to_string(),
            position: Position::new(index % 3, index / 3),
        })
        .collect();
    let edges = CITY_GRID_EDGES
        .iter()
        .map(|&(from, to, weight)| EdgeSpec {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        })
        .collect();
    GraphConfig::Edges { nodes, edges }
}

/// Four nodes on a cycle, `"1" - "2" - "4" - "3" - "1"`, with unit weights. There are two
/// fewest-hop routes from `"1"` to `"4"`.
pub fn diamond() -> GraphConfig {
    let nodes = [("1", 0, 1), ("2", 1, 0), ("3", 1, 2), ("4", 2, 1)]
        .iter()
        .map(|&(label, x, y)| NodeSpec {
            label: label.to_string(),
            position: Position::new(x, y),
        })
        .collect();
    let edges = [("1", "2"), ("1", "3"), ("2", "4"), ("3", "4")]
        .iter()
        .map(|&(from, to)| EdgeSpec {
            from: from.to_string(),
            to: to.to_string(),
            weight: 1,
        })
        .collect();
    GraphConfig::Edges { nodes, edges }
}
