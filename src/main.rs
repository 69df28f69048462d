// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cashplan::api::HttpBackend;
use cashplan::store::{AppStore, ToastKind};
use cashplan::{cli, commands, config};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::build_cli().get_matches();

    // Config is purely local; no server needed.
    if let Some(("config", sub)) = matches.subcommand() {
        return commands::config_cmd::handle(sub);
    }

    let server_url =
        config::resolve_server_url(matches.get_one::<String>("server").map(String::as_str))?;

    if let Some(("doctor", _)) = matches.subcommand() {
        let backend = HttpBackend::new(&server_url)?;
        return commands::doctor::handle(&backend);
    }

    let mut store = AppStore::new(Box::new(HttpBackend::new(&server_url)?));

    match matches.subcommand() {
        Some(("account", sub)) => commands::accounts::handle(&mut store, sub)?,
        Some(("event", sub)) => commands::events::handle(&mut store, sub)?,
        Some(("exception", sub)) => commands::exceptions::handle(&mut store, sub)?,
        Some(("schedule", sub)) => commands::schedule::handle(&mut store, sub)?,
        Some(("balances", sub)) => commands::balances::handle(&mut store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    report_toasts(&store)
}

fn report_toasts(store: &AppStore) -> Result<()> {
    let mut failed = false;
    for toast in store.toasts() {
        match toast.kind {
            ToastKind::Error => {
                failed = true;
                eprintln!("error: {}", toast.text);
            }
            ToastKind::Warning => eprintln!("warning: {}", toast.text),
            _ => println!("{}", toast.text),
        }
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
