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

//! Chapter 3, Surveillance Robot.

// A robot patrols a building whose rooms and corridors form a small weighted graph. Find the route
// with the fewest stopovers, list every route, find the route that uses the least energy, list
// the rooms the robot can reach, and check whether straight-line distance on the floor plan is a
// consistent heuristic for A*.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod logging;

use cli::Cli;
use commands::Outcome;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref()) {
        eprintln!("warning: failed to initialize logging: {:#}", e);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match commands::run(&cli, &mut out) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::InconsistentHeuristic) => ExitCode::from(1),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
