// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{Duration, Months, NaiveDate, NaiveTime};
use rrule::RRuleSet;

use crate::api::ApiError;
use crate::models::{
    Account, AccountBalance, AppState, Event, EventKind, EventOccurrence, Exception,
    ExceptionKind,
};

/// How far past today the projection runs, matching the server.
pub const DEFAULT_HORIZON_YEARS: u32 = 4;

// Cap on occurrences per event. Hourly rules over a four-year horizon fit
// comfortably; anything denser is truncated with a warning.
const MAX_OCCURRENCES: u16 = u16::MAX;

pub fn projection_end(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_months(Months::new(12 * DEFAULT_HORIZON_YEARS))
        .unwrap_or(NaiveDate::MAX)
}

fn rule_set(rule: &str, start: NaiveDate) -> Result<RRuleSet, ApiError> {
    let dtstart = start.and_time(NaiveTime::MIN).and_utc();
    format!("DTSTART:{}\nRRULE:{}", dtstart.format("%Y%m%dT%H%M%SZ"), rule)
        .parse::<RRuleSet>()
        .map_err(|e| ApiError::Validation(format!("invalid recurrence rule '{}': {}", rule, e)))
}

/// Parses a recurrence rule without expanding it.
pub fn check_rule(rule: &str, start: NaiveDate) -> Result<(), ApiError> {
    rule_set(rule, start).map(|_| ())
}

/// Expands an event into its raw occurrences. Rule expansion runs up to
/// and including `until`; a one-off always yields its single occurrence,
/// horizon or not. Exceptions are not applied here; see
/// [`apply_exceptions`].
pub fn expand_event(event: &Event, until: NaiveDate) -> Result<Vec<EventOccurrence>, ApiError> {
    let dates: Vec<NaiveDate> = match event.recurrence() {
        None => vec![event.start],
        Some(rule) => {
            // Occurrences land at midnight, so an end-of-day bound makes the
            // horizon inclusive.
            let end = until.and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
                - Duration::seconds(1);
            let result = rule_set(rule, event.start)?
                .before(end.with_timezone(&rrule::Tz::UTC))
                .all(MAX_OCCURRENCES);
            if result.limited {
                tracing::warn!(
                    event_id = %event.id,
                    "recurrence expansion truncated at {} occurrences",
                    MAX_OCCURRENCES
                );
            }
            result.dates.into_iter().map(|d| d.date_naive()).collect()
        }
    };

    let mut occurrences = Vec::with_capacity(dates.len());
    let mut prev: Option<NaiveDate> = None;
    let mut seq = 0u32;
    for date in dates {
        // Dates arrive sorted, so repeats are adjacent. Suffix repeats to
        // keep occurrence ids unique.
        if prev == Some(date) {
            seq += 1;
        } else {
            seq = 0;
        }
        prev = Some(date);
        let id = if seq == 0 {
            format!("{}-{}", event.id, date)
        } else {
            format!("{}-{}-{}", event.id, date, seq)
        };
        occurrences.push(EventOccurrence {
            id,
            date,
            amount: event.amount,
            event_id: event.id.clone(),
            account_id: event.account.clone(),
            event_kind: event.kind,
            event_name: event.name.clone(),
        });
    }
    Ok(occurrences)
}

/// Applies per-date exceptions to raw occurrences. Skips drop the occurrence,
/// singles replace the amount for that date only.
pub fn apply_exceptions(
    occurrences: Vec<EventOccurrence>,
    exceptions: &BTreeMap<String, Exception>,
) -> Vec<EventOccurrence> {
    occurrences
        .into_iter()
        .filter_map(|mut occ| {
            match exceptions.get(&occ.date.to_string()) {
                None => Some(occ),
                Some(exc) => match exc.kind {
                    ExceptionKind::Skip => None,
                    ExceptionKind::Single => {
                        // A single with no amount reads as zero, as the
                        // server does.
                        occ.amount = exc.amount.unwrap_or_default();
                        Some(occ)
                    }
                    ExceptionKind::Forever => {
                        tracing::warn!(
                            occurrence_id = %occ.id,
                            "'forever' exceptions are not implemented; ignoring"
                        );
                        Some(occ)
                    }
                },
            }
        })
        .collect()
}

/// Projects the full application state from accounts and events: every
/// occurrence up to `until`, with running balances per account.
pub fn compute_state(accounts: &[Account], events: &[Event], until: NaiveDate) -> AppState {
    let mut occurrences: Vec<EventOccurrence> = Vec::new();
    for event in events {
        match expand_event(event, until) {
            Ok(raw) => occurrences.extend(apply_exceptions(raw, &event.exceptions)),
            Err(err) => {
                tracing::warn!(event_id = %event.id, "skipping event: {}", err);
            }
        }
    }
    // Stable by date: same-day occurrences keep event order.
    occurrences.sort_by_key(|occ| occ.date);

    // Balance rows follow the account list: one date-ordered run per
    // known account. Occurrences pointing at unknown accounts stay in
    // the occurrence list but produce no rows.
    let mut rows: Vec<AccountBalance> = Vec::with_capacity(occurrences.len());
    for account in accounts {
        let mut balance = 0i64;
        for occ in occurrences.iter().filter(|o| o.account_id == account.id) {
            match occ.event_kind {
                EventKind::Income => balance += occ.amount,
                EventKind::Expense => balance -= occ.amount,
            }
            rows.push(AccountBalance {
                date: occ.date,
                balance,
                account_id: occ.account_id.clone(),
                event_id: occ.event_id.clone(),
            });
        }
    }

    AppState {
        event_occurrences: occurrences,
        account_balances: rows,
        events: events.to_vec(),
        accounts: accounts.to_vec(),
    }
}
