// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod add;
pub mod export;
pub mod list;

use anyhow::{Context, Result};

use crate::models::Kind;

/// Reads the `--type` argument shared by every subcommand.
pub fn kind_of(m: &clap::ArgMatches) -> Result<Kind> {
    let raw = m.get_one::<String>("type").context("--type is required")?;
    raw.parse::<Kind>().map_err(anyhow::Error::msg)
}
