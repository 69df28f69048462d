// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let path = config::config_path()?;
            let cfg = config::load()?;
            println!("Config file: {}", path.display());
            println!(
                "Server URL: {}",
                cfg.server_url
                    .as_deref()
                    .unwrap_or(config::DEFAULT_SERVER_URL)
            );
        }
        Some(("set-server", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            let mut cfg = config::load()?;
            cfg.server_url = Some(url.clone());
            config::save(&cfg)?;
            println!("Server URL set to {}", url);
        }
        _ => {}
    }
    Ok(())
}
