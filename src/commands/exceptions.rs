// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Exception;
use crate::store::AppStore;
use anyhow::Result;

pub fn handle(store: &mut AppStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            if !store.fetch_app_state() {
                return Ok(());
            }
            let event_id = sub.get_one::<String>("event").unwrap();
            let date = sub.get_one::<String>("date").unwrap();
            // --skip and --amount conflict; no amount means skip.
            let exception = match sub.get_one::<i64>("amount") {
                Some(amount) => Exception::single(*amount),
                None => Exception::skip(),
            };
            let _ = store.add_event_exception(event_id, date, exception);
        }
        Some(("rm", sub)) => {
            if !store.fetch_app_state() {
                return Ok(());
            }
            let event_id = sub.get_one::<String>("event").unwrap();
            let date = sub.get_one::<String>("date").unwrap();
            store.remove_event_exception(event_id, date);
        }
        _ => {}
    }
    Ok(())
}
