// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::AccountCreate;
use crate::store::AppStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            store.create_account(AccountCreate {
                name: name.clone(),
                color: color.clone(),
            });
        }
        Some(("list", sub)) => {
            if !store.fetch_app_state() {
                return Ok(());
            }
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let accounts = store.accounts();
            if !maybe_print_json(json_flag, jsonl_flag, &accounts)? {
                let rows: Vec<Vec<String>> = accounts
                    .iter()
                    .map(|a| vec![a.id.clone(), a.name.clone(), a.color.clone()])
                    .collect();
                println!("{}", pretty_table(&["ID", "Name", "Color"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
