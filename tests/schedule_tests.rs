// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use cashplan::api::ApiError;
use cashplan::models::{Account, Event, EventKind, EventOccurrence, Exception};
use cashplan::schedule;

mod common;
use common::ymd;

fn rent(id: &str, rrule: Option<&str>) -> Event {
    Event {
        id: id.to_string(),
        name: "Rent".to_string(),
        category: "housing".to_string(),
        account: "a1".to_string(),
        amount: 100,
        start: ymd(2024, 1, 1),
        rrule: rrule.map(|s| s.to_string()),
        kind: EventKind::Expense,
        exceptions: BTreeMap::new(),
    }
}

fn dates(occurrences: &[EventOccurrence]) -> Vec<NaiveDate> {
    occurrences.iter().map(|o| o.date).collect()
}

#[test]
fn monthly_rule_expands_to_first_of_each_month() {
    let event = rent("e1", Some("FREQ=MONTHLY"));
    let occurrences = schedule::expand_event(&event, ymd(2024, 5, 31)).unwrap();

    assert_eq!(
        dates(&occurrences),
        vec![
            ymd(2024, 1, 1),
            ymd(2024, 2, 1),
            ymd(2024, 3, 1),
            ymd(2024, 4, 1),
            ymd(2024, 5, 1),
        ]
    );
    let first = &occurrences[0];
    assert_eq!(first.id, "e1-2024-01-01");
    assert_eq!(first.amount, 100);
    assert_eq!(first.event_id, "e1");
    assert_eq!(first.account_id, "a1");
    assert_eq!(first.event_kind, EventKind::Expense);
    assert_eq!(first.event_name, "Rent");
}

#[test]
fn horizon_includes_occurrences_on_the_end_date() {
    let event = rent("e1", Some("FREQ=MONTHLY"));
    let occurrences = schedule::expand_event(&event, ymd(2024, 3, 1)).unwrap();
    assert_eq!(
        dates(&occurrences),
        vec![ymd(2024, 1, 1), ymd(2024, 2, 1), ymd(2024, 3, 1)]
    );
}

#[test]
fn one_off_event_yields_a_single_occurrence() {
    let event = rent("e1", None);
    let occurrences = schedule::expand_event(&event, ymd(2028, 1, 1)).unwrap();
    assert_eq!(dates(&occurrences), vec![ymd(2024, 1, 1)]);
    assert_eq!(occurrences[0].id, "e1-2024-01-01");
}

#[test]
fn one_offs_ignore_the_horizon() {
    // Only rule expansion is bounded; a balloon payment years past the
    // projection window still shows up.
    let mut event = rent("e1", None);
    event.start = ymd(2031, 6, 1);

    let occurrences = schedule::expand_event(&event, ymd(2028, 1, 15)).unwrap();
    assert_eq!(dates(&occurrences), vec![ymd(2031, 6, 1)]);
}

#[test]
fn empty_rule_string_means_one_off() {
    let event = rent("e1", Some(""));
    let occurrences = schedule::expand_event(&event, ymd(2028, 1, 1)).unwrap();
    assert_eq!(dates(&occurrences), vec![ymd(2024, 1, 1)]);
}

#[test]
fn invalid_rule_is_a_validation_error() {
    let event = rent("e1", Some("FREQ=NEVER"));
    let err = schedule::expand_event(&event, ymd(2024, 12, 31)).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn same_day_occurrences_get_distinct_ids() {
    let event = rent("e1", Some("FREQ=HOURLY;COUNT=3"));
    let occurrences = schedule::expand_event(&event, ymd(2024, 1, 2)).unwrap();
    let ids: Vec<&str> = occurrences.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["e1-2024-01-01", "e1-2024-01-01-1", "e1-2024-01-01-2"]
    );
}

#[test]
fn skip_exception_drops_only_that_date() {
    let mut event = rent("e1", Some("FREQ=MONTHLY"));
    event
        .exceptions
        .insert("2024-03-01".to_string(), Exception::skip());

    let raw = schedule::expand_event(&event, ymd(2024, 5, 31)).unwrap();
    let cooked = schedule::apply_exceptions(raw, &event.exceptions);
    assert_eq!(
        dates(&cooked),
        vec![
            ymd(2024, 1, 1),
            ymd(2024, 2, 1),
            ymd(2024, 4, 1),
            ymd(2024, 5, 1),
        ]
    );
}

#[test]
fn skip_exception_applies_to_one_offs_too() {
    let mut event = rent("e1", None);
    event
        .exceptions
        .insert("2024-01-01".to_string(), Exception::skip());

    let raw = schedule::expand_event(&event, ymd(2024, 12, 31)).unwrap();
    let cooked = schedule::apply_exceptions(raw, &event.exceptions);
    assert!(cooked.is_empty());
}

#[test]
fn single_exception_overrides_exactly_one_amount() {
    let mut event = rent("e1", Some("FREQ=MONTHLY"));
    event
        .exceptions
        .insert("2024-02-01".to_string(), Exception::single(250));

    let raw = schedule::expand_event(&event, ymd(2024, 4, 30)).unwrap();
    let cooked = schedule::apply_exceptions(raw, &event.exceptions);
    let amounts: Vec<i64> = cooked.iter().map(|o| o.amount).collect();
    assert_eq!(amounts, vec![100, 250, 100, 100]);
}

#[test]
fn single_exception_without_amount_reads_as_zero() {
    let mut event = rent("e1", None);
    event.exceptions.insert(
        "2024-01-01".to_string(),
        Exception {
            kind: cashplan::models::ExceptionKind::Single,
            amount: None,
        },
    );

    let raw = schedule::expand_event(&event, ymd(2024, 12, 31)).unwrap();
    let cooked = schedule::apply_exceptions(raw, &event.exceptions);
    assert_eq!(cooked[0].amount, 0);
}

#[test]
fn forever_exception_passes_through_unchanged() {
    let mut event = rent("e1", Some("FREQ=MONTHLY"));
    event.exceptions.insert(
        "2024-02-01".to_string(),
        Exception {
            kind: cashplan::models::ExceptionKind::Forever,
            amount: Some(999),
        },
    );

    let raw = schedule::expand_event(&event, ymd(2024, 3, 31)).unwrap();
    let cooked = schedule::apply_exceptions(raw, &event.exceptions);
    assert_eq!(dates(&cooked), vec![ymd(2024, 1, 1), ymd(2024, 2, 1), ymd(2024, 3, 1)]);
    let amounts: Vec<i64> = cooked.iter().map(|o| o.amount).collect();
    assert_eq!(amounts, vec![100, 100, 100]);
}

#[test]
fn balances_follow_income_and_expense_signs() {
    let accounts = vec![Account {
        id: "a1".to_string(),
        name: "Checking".to_string(),
        color: "#4e79a7".to_string(),
    }];
    let salary = Event {
        id: "e1".to_string(),
        name: "Salary".to_string(),
        category: "income".to_string(),
        account: "a1".to_string(),
        amount: 1000,
        start: ymd(2024, 1, 5),
        rrule: Some("FREQ=MONTHLY".to_string()),
        kind: EventKind::Income,
        exceptions: BTreeMap::new(),
    };
    let mut rent = rent("e2", Some("FREQ=MONTHLY"));
    rent.amount = 400;
    rent.start = ymd(2024, 1, 10);

    let state = schedule::compute_state(&accounts, &[salary, rent], ymd(2024, 2, 28));

    let balances: Vec<i64> = state.account_balances.iter().map(|b| b.balance).collect();
    assert_eq!(balances, vec![1000, 600, 1600, 1200]);
    assert!(state.account_balances.iter().all(|b| b.account_id == "a1"));
    assert_eq!(state.account_balances[0].event_id, "e1");
    assert_eq!(state.account_balances[1].event_id, "e2");
    assert_eq!(state.accounts.len(), 1);
    assert_eq!(state.events.len(), 2);
}

#[test]
fn balance_rows_follow_the_account_list() {
    let accounts = vec![
        Account {
            id: "a1".to_string(),
            name: "Checking".to_string(),
            color: "#4e79a7".to_string(),
        },
        Account {
            id: "a2".to_string(),
            name: "Savings".to_string(),
            color: "#e15759".to_string(),
        },
    ];
    let expense = rent("e1", Some("FREQ=MONTHLY"));
    let mut deposit = rent("e2", Some("FREQ=MONTHLY"));
    deposit.name = "Deposit".to_string();
    deposit.account = "a2".to_string();
    deposit.kind = EventKind::Income;
    deposit.amount = 1000;
    deposit.start = ymd(2024, 1, 5);
    let mut orphan = rent("e3", None);
    orphan.account = "ghost".to_string();

    let state =
        schedule::compute_state(&accounts, &[expense, deposit, orphan], ymd(2024, 2, 28));

    // The occurrence list keeps every event, known account or not.
    assert!(state
        .event_occurrences
        .iter()
        .any(|o| o.account_id == "ghost"));

    // Balance rows come grouped per account in account-list order, and
    // unknown accounts get none.
    let rows: Vec<(&str, i64)> = state
        .account_balances
        .iter()
        .map(|b| (b.account_id.as_str(), b.balance))
        .collect();
    assert_eq!(
        rows,
        vec![("a1", -100), ("a1", -200), ("a2", 1000), ("a2", 2000)]
    );
}

#[test]
fn compute_state_skips_events_with_bad_rules() {
    let accounts = vec![Account {
        id: "a1".to_string(),
        name: "Checking".to_string(),
        color: "#4e79a7".to_string(),
    }];
    let good = rent("e1", Some("FREQ=MONTHLY"));
    let bad = rent("e2", Some("FREQ=NEVER"));

    let state = schedule::compute_state(&accounts, &[good, bad], ymd(2024, 2, 28));

    assert!(state.event_occurrences.iter().all(|o| o.event_id == "e1"));
    assert_eq!(state.event_occurrences.len(), 2);
    // The broken event is still listed; only its occurrences are missing.
    assert_eq!(state.events.len(), 2);
}
