//! Generic asynchronous load state shared by every view.
//!
//! A view calls [`AsyncLoad::begin`] when it issues a request and hands the
//! returned [`LoadTicket`] to the spawned task. When the task reports back,
//! [`AsyncLoad::settle`] applies the result only if the ticket is still the
//! latest one issued by that same load and the load has not been disposed.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LOAD_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Ready(T),
    Failed(String),
}

/// Identifies one request issued by one [`AsyncLoad`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    load_id: u64,
    generation: u64,
}

#[derive(Debug)]
pub struct AsyncLoad<T> {
    label: &'static str,
    error_message: &'static str,
    load_id: u64,
    generation: u64,
    disposed: bool,
    state: LoadState<T>,
}

impl<T> AsyncLoad<T> {
    /// Starts out `Pending`, so a view reads as loading before its first request.
    pub fn new(label: &'static str, error_message: &'static str) -> Self {
        Self {
            label,
            error_message,
            load_id: NEXT_LOAD_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
            disposed: false,
            state: LoadState::Pending,
        }
    }

    /// Discard any previous value or error and issue a new ticket.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Pending;
        LoadTicket {
            load_id: self.load_id,
            generation: self.generation,
        }
    }

    /// Apply a finished request. Returns `false` when the result was dropped.
    pub fn settle<E: Display>(&mut self, ticket: LoadTicket, result: Result<T, E>) -> bool {
        if self.disposed {
            tracing::debug!(load = self.label, "Dropping result for disposed view");
            return false;
        }
        if ticket.load_id != self.load_id || ticket.generation != self.generation {
            tracing::debug!(
                load = self.label,
                ticket = ticket.generation,
                current = self.generation,
                "Dropping stale result"
            );
            return false;
        }

        self.state = match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => {
                tracing::warn!(load = self.label, error = %e, "{}", self.error_message);
                LoadState::Failed(self.error_message.to_string())
            }
        };
        true
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }
}
