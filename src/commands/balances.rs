// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::AccountBalance;
use crate::store::AppStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut AppStore, m: &clap::ArgMatches) -> Result<()> {
    if let Some(months) = m.get_one::<u32>("months") {
        store.set_chart_date_range(*months);
    }
    if !store.fetch_app_state() {
        return Ok(());
    }
    let today = chrono::Utc::now().date_naive();
    let account = m.get_one::<String>("account");
    let data: Vec<&AccountBalance> = store
        .filtered_account_balances(today)
        .into_iter()
        .filter(|b| account.map_or(true, |a| &b.account_id == a))
        .collect();

    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    b.date.to_string(),
                    account_name(store, &b.account_id),
                    b.balance.to_string(),
                    b.event_id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Account", "Balance", "Event"], rows)
        );
    }
    Ok(())
}

fn account_name(store: &AppStore, id: &str) -> String {
    store
        .accounts()
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| id.to_string())
}
