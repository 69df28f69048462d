// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::api::{ApiError, BackendApi};
use crate::schedule;
use crate::utils::{pretty_table, validate_exception_date};
use anyhow::Result;

pub fn handle(api: &dyn BackendApi) -> Result<()> {
    let rows = match issues(api) {
        Ok(rows) => rows,
        Err(err) => {
            println!("doctor: cannot reach the server: {}", err);
            return Ok(());
        }
    };
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn issues(api: &dyn BackendApi) -> Result<Vec<Vec<String>>, ApiError> {
    let state = api.app_state()?;
    let mut rows = Vec::new();

    // 1) Events referencing accounts the server does not know
    let account_ids: HashSet<&str> = state.accounts.iter().map(|a| a.id.as_str()).collect();
    for event in &state.events {
        if !account_ids.contains(event.account.as_str()) {
            rows.push(vec![
                "unknown_account".into(),
                format!(
                    "event {} ({}) references account {}",
                    event.id, event.name, event.account
                ),
            ]);
        }
    }

    // 2) Exception keys that are not calendar dates
    for event in &state.events {
        for date in event.exceptions.keys() {
            if validate_exception_date(date).is_err() {
                rows.push(vec![
                    "bad_exception_date".into(),
                    format!("event {} ({}): '{}'", event.id, event.name, date),
                ]);
            }
        }
    }

    // 3) Recurrence rules that fail to parse
    for event in &state.events {
        if let Some(rule) = event.recurrence() {
            if let Err(err) = schedule::check_rule(rule, event.start) {
                rows.push(vec![
                    "bad_rrule".into(),
                    format!("event {} ({}): {}", event.id, event.name, err),
                ]);
            }
        }
    }

    // 4) Collection endpoints should agree with the state snapshot
    let accounts = api.accounts()?;
    if accounts.len() != state.accounts.len() {
        rows.push(vec![
            "state_mismatch".into(),
            format!(
                "/api/accounts returns {} rows, state has {}",
                accounts.len(),
                state.accounts.len()
            ),
        ]);
    }
    let events = api.events()?;
    if events.len() != state.events.len() {
        rows.push(vec![
            "state_mismatch".into(),
            format!(
                "/api/events returns {} rows, state has {}",
                events.len(),
                state.events.len()
            ),
        ]);
    }

    Ok(rows)
}
