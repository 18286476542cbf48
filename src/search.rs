//! Search Controller
//!
//! Tracks the single live server search. Starting a new search aborts the
//! previous request, and any completion carrying an older ticket is
//! dropped, so a slow stale response can never replace newer results.

use chrono::{DateTime, Utc};
use futures::future::{AbortHandle, AbortRegistration};
use serde_json::Value;

use crate::error::AppError;
use crate::models::Item;
use crate::normalize::parse_untyped_items;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching(u64),
}

/// Identifies one dispatched search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// What the caller must do after `begin`
#[derive(Debug)]
pub enum SearchStart {
    /// Blank query: show the unfiltered listing, no request
    Restore,
    /// Send the request, wrapped with `registration` so it can be aborted
    Dispatch {
        ticket: SearchTicket,
        query: String,
        registration: AbortRegistration,
    },
}

/// What the view should show after a search completes
#[derive(Debug, PartialEq)]
pub enum SearchOutcome {
    /// Show these results in place of the listing
    Results(Vec<Item>),
    /// A newer search owns the view; change nothing
    Stale,
    /// Superseded before completion; change nothing, report nothing
    Cancelled,
    /// Report `message`; when `fallback` is set, filter the listing
    /// locally by the query instead of showing an empty grid
    Failed { message: String, fallback: bool },
}

#[derive(Debug)]
pub struct SearchController {
    state: SearchState,
    next_id: u64,
    in_flight: Option<AbortHandle>,
    fallback_to_local: bool,
}

impl SearchController {
    pub fn new(fallback_to_local: bool) -> Self {
        Self {
            state: SearchState::Idle,
            next_id: 0,
            in_flight: None,
            fallback_to_local,
        }
    }

    #[cfg(test)]
    fn state(&self) -> SearchState {
        self.state
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Start a search for `query`, superseding any outstanding one
    pub fn begin(&mut self, query: &str) -> SearchStart {
        self.abort_in_flight();
        let query = query.trim();
        if query.is_empty() {
            self.state = SearchState::Idle;
            return SearchStart::Restore;
        }

        self.next_id += 1;
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(handle);
        self.state = SearchState::Searching(self.next_id);
        SearchStart::Dispatch {
            ticket: SearchTicket(self.next_id),
            query: query.to_string(),
            registration,
        }
    }

    fn is_current(&self, ticket: SearchTicket) -> bool {
        self.state == SearchState::Searching(ticket.0)
    }

    /// Settle a dispatched search with the raw response body
    pub fn finish(
        &mut self,
        ticket: SearchTicket,
        result: Result<Value, AppError>,
        now: DateTime<Utc>,
    ) -> SearchOutcome {
        if !self.is_current(ticket) {
            return SearchOutcome::Stale;
        }
        self.in_flight = None;
        self.state = SearchState::Idle;

        match result {
            Ok(body) => SearchOutcome::Results(parse_untyped_items(&body, now)),
            Err(err) if err.is_cancelled() => SearchOutcome::Cancelled,
            Err(err) => SearchOutcome::Failed {
                message: err.user_message(),
                fallback: self.fallback_to_local,
            },
        }
    }
}
