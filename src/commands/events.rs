// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use crate::models::EventCreate;
use crate::store::{AppStore, ToastKind};
use crate::utils::{maybe_print_json, parse_date, parse_kind, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            store.delete_event(sub.get_one::<String>("id").unwrap());
        }
        Some(("update", sub)) => update(store, sub)?,
        Some(("inspect", sub)) => inspect(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut AppStore, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;
    store.create_event(EventCreate {
        name: sub.get_one::<String>("name").unwrap().clone(),
        category: sub.get_one::<String>("category").unwrap().clone(),
        account: sub.get_one::<String>("account").unwrap().clone(),
        amount: *sub.get_one::<i64>("amount").unwrap(),
        start,
        rrule: sub.get_one::<String>("rrule").cloned(),
        kind,
        exceptions: BTreeMap::new(),
    });
    Ok(())
}

fn list(store: &mut AppStore, sub: &clap::ArgMatches) -> Result<()> {
    if !store.fetch_app_state() {
        return Ok(());
    }
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let events = store.events();
    if !maybe_print_json(json_flag, jsonl_flag, &events)? {
        let rows: Vec<Vec<String>> = events
            .iter()
            .map(|e| {
                vec![
                    e.id.clone(),
                    e.name.clone(),
                    e.category.clone(),
                    e.account.clone(),
                    e.amount.to_string(),
                    e.kind.as_str().to_string(),
                    e.start.to_string(),
                    e.recurrence().unwrap_or("-").to_string(),
                    e.exceptions.len().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Name", "Category", "Account", "Amount", "Type", "Start", "RRule",
                    "Exceptions",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn update(store: &mut AppStore, sub: &clap::ArgMatches) -> Result<()> {
    if !store.fetch_app_state() {
        return Ok(());
    }
    let id = sub.get_one::<String>("id").unwrap();
    let Some(event) = store.event(id).cloned() else {
        store.show_toast("Event not found", ToastKind::Error);
        return Ok(());
    };
    let mut payload = event.to_payload();
    if let Some(name) = sub.get_one::<String>("name") {
        payload.name = name.clone();
    }
    if let Some(category) = sub.get_one::<String>("category") {
        payload.category = category.clone();
    }
    if let Some(account) = sub.get_one::<String>("account") {
        payload.account = account.clone();
    }
    if let Some(amount) = sub.get_one::<i64>("amount") {
        payload.amount = *amount;
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        payload.kind = parse_kind(kind)?;
    }
    if let Some(start) = sub.get_one::<String>("start") {
        payload.start = parse_date(start)?;
    }
    if let Some(rrule) = sub.get_one::<String>("rrule") {
        payload.rrule = Some(rrule.clone());
    }
    if sub.get_flag("clear-rrule") {
        payload.rrule = None;
    }
    // Failures are already toasted by the store.
    let _ = store.replace_event(id, payload);
    Ok(())
}

fn inspect(store: &mut AppStore, sub: &clap::ArgMatches) -> Result<()> {
    if !store.fetch_app_state() {
        return Ok(());
    }
    let occurrence_id = sub.get_one::<String>("occurrence").unwrap();
    match store.select_event_occurrence(occurrence_id) {
        Ok(()) => {
            let occ = store
                .occurrences()
                .iter()
                .find(|o| o.id == *occurrence_id);
            let event = store.editing_event();
            if let (Some(occ), Some(event)) = (occ, event) {
                let mut rows = vec![
                    vec!["Occurrence".to_string(), occ.id.clone()],
                    vec!["Date".to_string(), occ.date.to_string()],
                    vec!["Amount".to_string(), occ.amount.to_string()],
                    vec![
                        "Event".to_string(),
                        format!("{} ({})", event.name, event.id),
                    ],
                    vec!["Category".to_string(), event.category.clone()],
                    vec!["Account".to_string(), event.account.clone()],
                    vec!["Type".to_string(), event.kind.as_str().to_string()],
                    vec!["Start".to_string(), event.start.to_string()],
                    vec![
                        "RRule".to_string(),
                        event.recurrence().unwrap_or("-").to_string(),
                    ],
                ];
                for (date, exc) in &event.exceptions {
                    let detail = match exc.amount {
                        Some(n) => format!("{} ({})", exc.kind.as_str(), n),
                        None => exc.kind.as_str().to_string(),
                    };
                    rows.push(vec![format!("Exception {}", date), detail]);
                }
                println!("{}", pretty_table(&["Field", "Value"], rows));
            }
        }
        Err(err) => store.show_toast(err.to_string(), ToastKind::Error),
    }
    Ok(())
}
