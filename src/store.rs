// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::{Duration, Instant};

use chrono::{Months, NaiveDate};

use crate::api::{ApiError, DynBackendApi};
use crate::models::{
    Account, AccountBalance, AccountCreate, AppState, Event, EventCreate, EventOccurrence,
    Exception, ExceptionKind,
};
use crate::utils::validate_exception_date;

/// Toasts stay visible this long, then expire.
pub const TOAST_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

/// Client-side state: the latest server snapshot plus selection, editing,
/// chart range and toast feedback. All mutation goes through the action
/// methods, which talk to the backend and refetch.
pub struct AppStore {
    api: DynBackendApi,
    state: AppState,
    selected_occurrence_id: Option<String>,
    editing_event: Option<Event>,
    chart_range_months: u32,
    toasts: Vec<Toast>,
}

impl AppStore {
    pub fn new(api: DynBackendApi) -> Self {
        AppStore {
            api,
            state: AppState::default(),
            selected_occurrence_id: None,
            editing_event: None,
            chart_range_months: 3,
            toasts: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn accounts(&self) -> &[Account] {
        &self.state.accounts
    }

    pub fn events(&self) -> &[Event] {
        &self.state.events
    }

    pub fn occurrences(&self) -> &[EventOccurrence] {
        &self.state.event_occurrences
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.state.events.iter().find(|e| e.id == id)
    }

    pub fn selected_occurrence_id(&self) -> Option<&str> {
        self.selected_occurrence_id.as_deref()
    }

    pub fn editing_event(&self) -> Option<&Event> {
        self.editing_event.as_ref()
    }

    pub fn chart_date_range_months(&self) -> u32 {
        self.chart_range_months
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// The most recent toast, if it has not expired as of `now`.
    pub fn active_toast(&self, now: Instant) -> Option<&Toast> {
        self.toasts
            .last()
            .filter(|t| now.duration_since(t.shown_at) < TOAST_DISMISS_AFTER)
    }

    pub fn show_toast(&mut self, text: impl Into<String>, kind: ToastKind) {
        self.toasts.push(Toast {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    fn handle_api_error(&mut self, err: &ApiError) {
        self.show_toast(err.to_string(), ToastKind::Error);
    }

    /// Pulls a fresh snapshot from the backend. On failure the previous
    /// snapshot is kept and an error toast is shown.
    pub fn fetch_app_state(&mut self) -> bool {
        match self.api.app_state() {
            Ok(state) => {
                tracing::debug!(
                    accounts = state.accounts.len(),
                    events = state.events.len(),
                    occurrences = state.event_occurrences.len(),
                    "fetched app state"
                );
                self.state = state;
                true
            }
            Err(err) => {
                self.handle_api_error(&err);
                false
            }
        }
    }

    pub fn create_account(&mut self, account: AccountCreate) -> bool {
        match self.api.create_account(&account) {
            Ok(_) => {
                self.fetch_app_state();
                self.show_toast("Account created successfully", ToastKind::Success);
                true
            }
            Err(err) => {
                self.handle_api_error(&err);
                false
            }
        }
    }

    pub fn create_event(&mut self, event: EventCreate) -> bool {
        match self.api.create_event(&event) {
            Ok(_) => {
                self.fetch_app_state();
                self.show_toast("Event created successfully", ToastKind::Success);
                true
            }
            Err(err) => {
                self.handle_api_error(&err);
                false
            }
        }
    }

    pub fn delete_event(&mut self, id: &str) -> bool {
        match self.api.delete_event(id) {
            Ok(()) => {
                self.fetch_app_state();
                if self.editing_event.as_ref().is_some_and(|e| e.id == id) {
                    self.selected_occurrence_id = None;
                    self.editing_event = None;
                }
                self.show_toast("Event deleted successfully", ToastKind::Success);
                true
            }
            Err(err) => {
                self.handle_api_error(&err);
                false
            }
        }
    }

    /// Replaces an event by deleting the old one and creating `payload` in
    /// its place. The two calls are not atomic: if the create fails after
    /// the delete succeeded, the event is gone. In that case an error toast
    /// is shown once, the snapshot is refetched to reconcile, and the error
    /// is returned.
    pub fn replace_event(&mut self, old_id: &str, payload: EventCreate) -> Result<(), ApiError> {
        let result = self
            .api
            .delete_event(old_id)
            .and_then(|_| self.api.create_event(&payload).map(|_| ()));
        match result {
            Ok(()) => {
                self.fetch_app_state();
                self.selected_occurrence_id = None;
                self.editing_event = None;
                self.show_toast("Event updated successfully", ToastKind::Success);
                Ok(())
            }
            Err(err) => {
                self.handle_api_error(&err);
                // Reconcile with whatever the server now holds. A failure
                // here is dropped; the error already shown covers it.
                if let Ok(state) = self.api.app_state() {
                    self.state = state;
                }
                Err(err)
            }
        }
    }

    /// Adds or overwrites the exception at `date` on the given event and
    /// pushes the change to the backend via [`Self::replace_event`].
    pub fn add_event_exception(
        &mut self,
        event_id: &str,
        date: &str,
        exception: Exception,
    ) -> Result<(), ApiError> {
        if let Err(err) = validate_exception_date(date) {
            self.handle_api_error(&err);
            return Err(err);
        }
        if exception.kind == ExceptionKind::Forever {
            let err = ApiError::Validation("forever exceptions are not supported".to_string());
            self.handle_api_error(&err);
            return Err(err);
        }
        let Some(event) = self.event(event_id).cloned() else {
            let err = ApiError::NotFound("Event not found".to_string());
            self.handle_api_error(&err);
            return Err(err);
        };
        tracing::debug!(event_id, date, kind = exception.kind.as_str(), "adding exception");
        self.replace_event(event_id, event.with_exception(date, exception))
    }

    pub fn remove_event_exception(&mut self, event_id: &str, date: &str) -> bool {
        let Some(event) = self.event(event_id).cloned() else {
            self.show_toast("Event not found", ToastKind::Error);
            return false;
        };
        match self.replace_event(event_id, event.without_exception(date)) {
            Ok(()) => {
                self.show_toast("Exception removed successfully", ToastKind::Success);
                true
            }
            Err(_) => {
                self.show_toast("Failed to remove exception", ToastKind::Error);
                false
            }
        }
    }

    /// Records the selection, then resolves the occurrence and its parent
    /// event into the editing slot. The selection sticks even when
    /// resolution fails.
    pub fn select_event_occurrence(&mut self, occurrence_id: &str) -> Result<(), ApiError> {
        self.selected_occurrence_id = Some(occurrence_id.to_string());
        let Some(occurrence) = self
            .state
            .event_occurrences
            .iter()
            .find(|o| o.id == occurrence_id)
        else {
            return Err(ApiError::NotFound(format!(
                "Occurrence '{}' not found",
                occurrence_id
            )));
        };
        // Occurrence ids are opaque; the parent comes from the eventId field.
        let Some(event) = self
            .state
            .events
            .iter()
            .find(|e| e.id == occurrence.event_id)
        else {
            return Err(ApiError::NotFound(format!(
                "Event '{}' not found",
                occurrence.event_id
            )));
        };
        tracing::debug!(occurrence_id, event_id = %event.id, "selected occurrence");
        self.editing_event = Some(event.clone());
        Ok(())
    }

    pub fn set_chart_date_range(&mut self, months: u32) {
        self.chart_range_months = months;
    }

    /// Balance rows within the chart window: one month back from `today`
    /// through `chart_date_range_months` ahead, inclusive on both ends.
    /// Ranges past the calendar clamp to its end.
    pub fn filtered_account_balances(&self, today: NaiveDate) -> Vec<&AccountBalance> {
        let from = today - Months::new(1);
        let to = today
            .checked_add_months(Months::new(self.chart_range_months))
            .unwrap_or(NaiveDate::MAX);
        self.state
            .account_balances
            .iter()
            .filter(|b| b.date >= from && b.date <= to)
            .collect()
    }
}
