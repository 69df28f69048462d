// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountCreate {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Income,
    Expense,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Income => "income",
            EventKind::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionKind {
    Skip,
    Single,
    Forever,
}

impl ExceptionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExceptionKind::Skip => "skip",
            ExceptionKind::Single => "single",
            ExceptionKind::Forever => "forever",
        }
    }
}

/// Per-date override for one occurrence of a recurring event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exception {
    #[serde(rename = "type")]
    pub kind: ExceptionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

impl Exception {
    pub fn skip() -> Self {
        Exception {
            kind: ExceptionKind::Skip,
            amount: None,
        }
    }

    pub fn single(amount: i64) -> Self {
        Exception {
            kind: ExceptionKind::Single,
            amount: Some(amount),
        }
    }
}

// The server marshals a nil exception map as null, not {}.
fn exceptions_or_empty<'de, D>(de: D) -> Result<BTreeMap<String, Exception>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::deserialize(de)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub category: String,
    pub account: String, // Account.id; not enforced referentially on the client
    pub amount: i64,
    pub start: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrule: Option<String>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, deserialize_with = "exceptions_or_empty")]
    pub exceptions: BTreeMap<String, Exception>,
}

impl Event {
    /// The recurrence rule, if any. The server serializes a missing rule
    /// as the empty string, so both spellings count as "one-off".
    pub fn recurrence(&self) -> Option<&str> {
        self.rrule.as_deref().filter(|r| !r.is_empty())
    }

    /// Full payload for the replace protocol: every field copied, id dropped.
    pub fn to_payload(&self) -> EventCreate {
        EventCreate {
            name: self.name.clone(),
            category: self.category.clone(),
            account: self.account.clone(),
            amount: self.amount,
            start: self.start,
            rrule: self.rrule.clone(),
            kind: self.kind,
            exceptions: self.exceptions.clone(),
        }
    }

    /// Payload with `date` overridden by `exception`; the event itself is
    /// left untouched.
    pub fn with_exception(&self, date: &str, exception: Exception) -> EventCreate {
        let mut payload = self.to_payload();
        payload.exceptions.insert(date.to_string(), exception);
        payload
    }

    /// Payload with the override for `date` dropped. Removing a date that
    /// has no override is a no-op, not an error.
    pub fn without_exception(&self, date: &str) -> EventCreate {
        let mut payload = self.to_payload();
        payload.exceptions.remove(date);
        payload
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCreate {
    pub name: String,
    pub category: String,
    pub account: String,
    pub amount: i64,
    pub start: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrule: Option<String>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, deserialize_with = "exceptions_or_empty")]
    pub exceptions: BTreeMap<String, Exception>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOccurrence {
    pub id: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub event_id: String,
    pub account_id: String,
    #[serde(rename = "eventType")]
    pub event_kind: EventKind,
    pub event_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub date: NaiveDate,
    pub balance: i64,
    pub account_id: String,
    pub event_id: String,
}

/// Full state snapshot as served by `GET /api/state`. Replaced wholesale
/// on every refetch, never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    // The wire name is misspelled upstream; keep it verbatim.
    #[serde(rename = "eventOccurances")]
    pub event_occurrences: Vec<EventOccurrence>,
    pub account_balances: Vec<AccountBalance>,
    pub events: Vec<Event>,
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
