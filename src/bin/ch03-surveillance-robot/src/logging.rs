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

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_ENV: &str = "SURVEILLANCE_ROBOT_LOG";

/// Install a stderr subscriber. `SURVEILLANCE_ROBOT_LOG` wins over `--log-level`, which wins
/// over `--verbose`.
pub fn init_tracing(verbose: bool, log_level: Option<&str>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directives(verbose, log_level)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;
    Ok(())
}

fn default_directives(verbose: bool, log_level: Option<&str>) -> String {
    let level = match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => return level.to_string(),
        (_, Some(level)) => level,
        (true, None) => "debug",
        (false, None) => "warn",
    };
    format!("graph_search={level},ch03_surveillance_robot={level}")
}
