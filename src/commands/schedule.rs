// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};

use crate::models::{Event, EventOccurrence};
use crate::schedule;
use crate::store::AppStore;
use crate::utils::{maybe_print_json, parse_date, parse_kind, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        Some(("preview", sub)) => preview(sub)?,
        _ => {}
    }
    Ok(())
}

fn list(store: &mut AppStore, sub: &clap::ArgMatches) -> Result<()> {
    if !store.fetch_app_state() {
        return Ok(());
    }
    let from = match sub.get_one::<String>("from") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };
    let to = match sub.get_one::<String>("to") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };
    let account = sub.get_one::<String>("account");

    let data: Vec<&EventOccurrence> = store
        .occurrences()
        .iter()
        .filter(|o| from.map_or(true, |d| o.date >= d))
        .filter(|o| to.map_or(true, |d| o.date <= d))
        .filter(|o| account.map_or(true, |a| &o.account_id == a))
        .collect();

    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|o| {
                vec![
                    o.date.to_string(),
                    o.event_name.clone(),
                    o.event_kind.as_str().to_string(),
                    o.amount.to_string(),
                    o.account_id.clone(),
                    o.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Event", "Type", "Amount", "Account", "Occurrence ID"],
                rows,
            )
        );
    }
    Ok(())
}

// Expands a rule locally; the server never sees it.
fn preview(sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;
    let years = sub
        .get_one::<u32>("years")
        .copied()
        .unwrap_or(schedule::DEFAULT_HORIZON_YEARS);

    let event = Event {
        id: "preview".to_string(),
        name: sub.get_one::<String>("name").unwrap().clone(),
        category: "preview".to_string(),
        account: String::new(),
        amount: *sub.get_one::<i64>("amount").unwrap(),
        start,
        rrule: sub.get_one::<String>("rrule").cloned(),
        kind,
        exceptions: BTreeMap::new(),
    };
    let until = start
        .checked_add_months(Months::new(12 * years))
        .unwrap_or(NaiveDate::MAX);
    let occurrences = schedule::expand_event(&event, until)?;

    let rows: Vec<Vec<String>> = occurrences
        .iter()
        .map(|o| {
            vec![
                o.date.to_string(),
                o.amount.to_string(),
                o.event_kind.as_str().to_string(),
                o.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Amount", "Type", "Occurrence ID"], rows)
    );
    Ok(())
}
