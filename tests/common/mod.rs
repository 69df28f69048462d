// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::cell::{RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::NaiveDate;

use cashplan::api::{ApiError, BackendApi};
use cashplan::models::{Account, AccountCreate, AppState, Event, EventCreate, EventKind};
use cashplan::schedule;
use cashplan::store::AppStore;

/// What the fake server holds between requests. Tests reach in through
/// [`InMemoryBackend::state`] to assert on it or to flip failure switches.
pub struct BackendState {
    pub accounts: Vec<Account>,
    pub events: Vec<Event>,
    pub next_id: u32,
    pub fail_create_event: bool,
    pub fail_delete_event: bool,
    pub fail_state: bool,
    pub today: NaiveDate,
}

/// In-memory stand-in for the real server: id assignment, account name
/// conflicts, event account checks, delete by id, and a full projection
/// on every state read.
#[derive(Clone)]
pub struct InMemoryBackend {
    state: Rc<RefCell<BackendState>>,
}

impl InMemoryBackend {
    pub fn new(today: NaiveDate) -> Self {
        InMemoryBackend {
            state: Rc::new(RefCell::new(BackendState {
                accounts: Vec::new(),
                events: Vec::new(),
                next_id: 1,
                fail_create_event: false,
                fail_delete_event: false,
                fail_state: false,
                today,
            })),
        }
    }

    pub fn state(&self) -> RefMut<'_, BackendState> {
        self.state.borrow_mut()
    }

    fn assign_id(&self) -> String {
        let mut s = self.state.borrow_mut();
        let id = format!("{:08x}", s.next_id);
        s.next_id += 1;
        id
    }
}

impl BackendApi for InMemoryBackend {
    fn app_state(&self) -> Result<AppState, ApiError> {
        let s = self.state.borrow();
        if s.fail_state {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(schedule::compute_state(
            &s.accounts,
            &s.events,
            schedule::projection_end(s.today),
        ))
    }

    fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        let s = self.state.borrow();
        if s.fail_state {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(s.accounts.clone())
    }

    fn create_account(&self, account: &AccountCreate) -> Result<Account, ApiError> {
        {
            let s = self.state.borrow();
            if s.accounts.iter().any(|a| a.name == account.name) {
                return Err(ApiError::Network("name already in use".to_string()));
            }
        }
        let created = Account {
            id: self.assign_id(),
            name: account.name.clone(),
            color: account.color.clone(),
        };
        self.state.borrow_mut().accounts.push(created.clone());
        Ok(created)
    }

    fn events(&self) -> Result<Vec<Event>, ApiError> {
        let s = self.state.borrow();
        if s.fail_state {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(s.events.clone())
    }

    fn create_event(&self, event: &EventCreate) -> Result<Event, ApiError> {
        {
            let s = self.state.borrow();
            if s.fail_create_event {
                return Err(ApiError::Network("connection reset by peer".to_string()));
            }
            if !s.accounts.iter().any(|a| a.id == event.account) {
                return Err(ApiError::Network("account not found".to_string()));
            }
        }
        let created = Event {
            id: self.assign_id(),
            name: event.name.clone(),
            category: event.category.clone(),
            account: event.account.clone(),
            amount: event.amount,
            start: event.start,
            rrule: event.rrule.clone(),
            kind: event.kind,
            exceptions: event.exceptions.clone(),
        };
        self.state.borrow_mut().events.push(created.clone());
        Ok(created)
    }

    fn delete_event(&self, id: &str) -> Result<(), ApiError> {
        let mut s = self.state.borrow_mut();
        if s.fail_delete_event {
            return Err(ApiError::Network("connection reset by peer".to_string()));
        }
        let before = s.events.len();
        s.events.retain(|e| e.id != id);
        if s.events.len() == before {
            return Err(ApiError::NotFound(format!(
                "event with ID {} not found",
                id
            )));
        }
        Ok(())
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn setup() -> (InMemoryBackend, AppStore) {
    let backend = InMemoryBackend::new(today());
    let store = AppStore::new(Box::new(backend.clone()));
    (backend, store)
}

pub fn seed_account(backend: &InMemoryBackend, name: &str) -> String {
    backend
        .create_account(&AccountCreate {
            name: name.to_string(),
            color: "#4e79a7".to_string(),
        })
        .unwrap()
        .id
}

/// A monthly expense of 100 starting 2024-01-01, or a one-off when
/// `rrule` is None.
pub fn seed_event(backend: &InMemoryBackend, account_id: &str, rrule: Option<&str>) -> String {
    backend
        .create_event(&EventCreate {
            name: "Rent".to_string(),
            category: "housing".to_string(),
            account: account_id.to_string(),
            amount: 100,
            start: ymd(2024, 1, 1),
            rrule: rrule.map(|s| s.to_string()),
            kind: EventKind::Expense,
            exceptions: BTreeMap::new(),
        })
        .unwrap()
        .id
}
