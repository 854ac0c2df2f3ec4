//! Remote resource lifecycle
//!
//! Every page follows the same pattern: fetch on mount, show a form when the
//! resource does not exist yet, show the detail view once it does. The
//! lifecycle is:
//!
//! ```text
//! Loading ──► Empty ──► Submitting ──► Populated
//!    │          ▲            │             │
//!    └──────────┼────────────┼───► Populated ──► Submitting ──► Populated
//!               └── failure ─┘  (failure returns to the prior phase)
//! ```
//!
//! Transitions that start an operation hand out a [`Ticket`]; the matching
//! `finish_*` call must present it. A ticket is void once the resource is
//! disposed (page unmounted) or a newer operation superseded it, so late
//! responses are dropped instead of mutating state nobody renders.

use std::fmt;
use thiserror::Error;

use crate::api::ApiResult;

/// Where a resource is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Initial fetch in flight
    Loading,
    /// Fetched, nothing exists yet
    Empty,
    /// A create/submit request is in flight
    Submitting,
    /// Resource present
    Populated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Loading => "loading",
            Phase::Empty => "empty",
            Phase::Submitting => "submitting",
            Phase::Populated => "populated",
        };
        f.write_str(s)
    }
}

/// Proof that an operation was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    id: u64,
    epoch: u64,
}

/// What happened when an operation finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// Result stored
    Applied,
    /// Operation failed; the message is what the page shows
    Failed(String),
    /// Ticket was stale; nothing changed
    Discarded,
}

impl Settled {
    pub fn is_applied(&self) -> bool {
        matches!(self, Settled::Applied)
    }
}

/// Rejected transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Still loading")]
    NotReady,

    #[error("Page is no longer active")]
    Disposed,

    #[error("Answer all questions before submitting ({answered}/{total} answered)")]
    Incomplete { answered: usize, total: usize },

    #[error("Already submitted")]
    AlreadySubmitted,
}

/// State of one remotely-owned resource
#[derive(Debug, Clone)]
pub struct RemoteResource<T> {
    phase: Phase,
    prior: Phase,
    value: Option<T>,
    error: Option<String>,
    epoch: u64,
    next_id: u64,
    in_flight: Option<u64>,
    disposed: bool,
}

impl<T> Default for RemoteResource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RemoteResource<T> {
    /// A resource about to be fetched
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            prior: Phase::Loading,
            value: None,
            error: None,
            epoch: 0,
            next_id: 0,
            in_flight: None,
            disposed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Mutable access for local, client-only edits
    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Last failure message, cleared when the next operation starts
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn issue(&mut self) -> Ticket {
        self.next_id += 1;
        self.in_flight = Some(self.next_id);
        Ticket {
            id: self.next_id,
            epoch: self.epoch,
        }
    }

    fn accepts(&self, ticket: Ticket) -> bool {
        !self.disposed && ticket.epoch == self.epoch && self.in_flight == Some(ticket.id)
    }

    /// Start (or restart) the fetch
    pub fn begin_load(&mut self) -> Result<Ticket, ResourceError> {
        if self.disposed {
            return Err(ResourceError::Disposed);
        }
        if self.phase == Phase::Submitting {
            return Err(ResourceError::AlreadySubmitting);
        }
        self.phase = Phase::Loading;
        self.error = None;
        Ok(self.issue())
    }

    /// Store the fetch result. A failed fetch falls back to whatever was
    /// shown before: the detail view if a value exists, otherwise the form.
    pub fn finish_load(&mut self, ticket: Ticket, result: ApiResult<Option<T>>) -> Settled {
        if !self.accepts(ticket) {
            tracing::debug!("Discarding stale load result");
            return Settled::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(value) => {
                self.value = value;
                self.phase = self.resting_phase();
                Settled::Applied
            }
            Err(e) => {
                let message = e.to_string();
                self.phase = self.resting_phase();
                self.error = Some(message.clone());
                Settled::Failed(message)
            }
        }
    }

    /// Atomically move from a stable phase to `Submitting`.
    ///
    /// The check and the transition happen in one call, so a second click
    /// that arrives before the first request returns is rejected.
    pub fn begin_submit(&mut self) -> Result<Ticket, ResourceError> {
        if self.disposed {
            return Err(ResourceError::Disposed);
        }
        match self.phase {
            Phase::Submitting => Err(ResourceError::AlreadySubmitting),
            Phase::Loading => Err(ResourceError::NotReady),
            Phase::Empty | Phase::Populated => {
                self.prior = self.phase;
                self.phase = Phase::Submitting;
                self.error = None;
                Ok(self.issue())
            }
        }
    }

    /// Finish a submission whose response replaces the value
    pub fn finish_submit(&mut self, ticket: Ticket, result: ApiResult<T>) -> Settled {
        self.finish_submit_with(ticket, result, |slot, value| *slot = Some(value))
    }

    /// Finish a submission whose response is merged into the value
    pub fn finish_submit_with<R>(
        &mut self,
        ticket: Ticket,
        result: ApiResult<R>,
        apply: impl FnOnce(&mut Option<T>, R),
    ) -> Settled {
        if !self.accepts(ticket) {
            tracing::debug!("Discarding stale submit result");
            return Settled::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(response) => {
                apply(&mut self.value, response);
                self.phase = self.resting_phase();
                Settled::Applied
            }
            Err(e) => {
                let message = e.to_string();
                self.phase = self.prior;
                self.error = Some(message.clone());
                Settled::Failed(message)
            }
        }
    }

    /// Abandon an operation that failed before reaching the network
    pub fn abort(&mut self, ticket: Ticket, message: impl Into<String>) -> Settled {
        if !self.accepts(ticket) {
            return Settled::Discarded;
        }
        self.in_flight = None;
        let message = message.into();
        self.phase = if self.phase == Phase::Submitting {
            self.prior
        } else {
            self.resting_phase()
        };
        self.error = Some(message.clone());
        Settled::Failed(message)
    }

    /// The page is gone; every outstanding ticket becomes void
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.epoch += 1;
        self.in_flight = None;
    }

    fn resting_phase(&self) -> Phase {
        if self.value.is_some() {
            Phase::Populated
        } else {
            Phase::Empty
        }
    }
}
