//! Conversion session state machine.
//!
//! One [`Session`] lives for the whole page. It owns the identifier of the
//! active task and the handle of its poll timer, so the "one active task,
//! one timer" rule is enforced in a single place:
//!
//! ```text
//! Idle ──upload──▶ Uploading ──task_id──▶ Polling ──completed──▶ Completed
//!                      │                     │
//!                      └──error──▶ Failed ◀──┘ failed
//! ```
//!
//! Every upload starts a new *ticket*. Async work carries the ticket it was
//! started with, and anything that comes back with an older ticket is
//! ignored. The session knows nothing about the DOM; the controller feeds
//! it events and renders whatever it decides.

use thiserror::Error;

use crate::types::{StatusResponse, TaskStatus};

/// Identifies one upload attempt.
pub type Ticket = u64;

/// A cancellable repeating timer.
pub trait PollTimer {
    fn cancel(self);
}

impl PollTimer for gloo_timers::callback::Interval {
    fn cancel(self) {
        drop(gloo_timers::callback::Interval::cancel(self));
    }
}

/// Where the current conversion stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Polling { task_id: String },
    Completed { task_id: String },
    Failed,
}

impl Phase {
    /// Upload or polling in progress; the upload control stays disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Uploading | Phase::Polling { .. })
    }

    /// Whether the upload control is disabled: nothing accepted yet, or a
    /// conversion is still running.
    pub fn upload_disabled(&self, has_selection: bool) -> bool {
        !has_selection || self.is_busy()
    }

    /// Task the phase refers to, if any.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Phase::Polling { task_id } | Phase::Completed { task_id } => Some(task_id),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("an upload is already in progress")]
    Busy,
}

/// A status request the controller should issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollRequest {
    pub ticket: Ticket,
    pub task_id: String,
}

/// What a status response did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// Response belongs to an older upload; nothing to render.
    Stale,
    /// Task still running, keep polling.
    Running,
    /// Task finished, timer stopped.
    Completed,
    /// Server reported a failure with this message, timer stopped.
    Failed(String),
}

pub struct Session<T: PollTimer> {
    phase: Phase,
    ticket: Ticket,
    timer: Option<T>,
    in_flight: bool,
    poll_failures: u32,
}

impl<T: PollTimer> Default for Session<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PollTimer> Session<T> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            ticket: 0,
            timer: None,
            in_flight: false,
            poll_failures: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether `ticket` still belongs to the latest upload.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.ticket
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Start a new upload, abandoning whatever task was being polled.
    pub fn begin_upload(&mut self) -> Result<Ticket, SessionError> {
        if self.phase == Phase::Uploading {
            return Err(SessionError::Busy);
        }
        self.stop_timer();
        self.ticket += 1;
        self.phase = Phase::Uploading;
        self.in_flight = false;
        self.poll_failures = 0;
        Ok(self.ticket)
    }

    /// The server accepted the file. Returns `false` for a stale ticket.
    pub fn upload_succeeded(&mut self, ticket: Ticket, task_id: String) -> bool {
        if !self.is_current(ticket) || self.phase != Phase::Uploading {
            return false;
        }
        self.phase = Phase::Polling { task_id };
        true
    }

    /// The upload request failed. Returns `false` for a stale ticket.
    pub fn upload_failed(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket) || self.phase != Phase::Uploading {
            return false;
        }
        self.phase = Phase::Failed;
        true
    }

    /// Install the poll timer for `ticket`, cancelling any previous one.
    ///
    /// A timer offered for a stale ticket or outside of polling is cancelled
    /// right away and `false` is returned.
    pub fn attach_timer(&mut self, ticket: Ticket, timer: T) -> bool {
        if !self.is_current(ticket) || !matches!(self.phase, Phase::Polling { .. }) {
            timer.cancel();
            return false;
        }
        self.stop_timer();
        self.timer = Some(timer);
        true
    }

    /// Called on every timer tick. Returns the request to issue, or `None`
    /// when not polling or when the previous request has not answered yet.
    pub fn begin_poll(&mut self) -> Option<PollRequest> {
        let Phase::Polling { task_id } = &self.phase else {
            return None;
        };
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(PollRequest {
            ticket: self.ticket,
            task_id: task_id.clone(),
        })
    }

    /// Feed a status response back.
    pub fn finish_poll(&mut self, ticket: Ticket, response: &StatusResponse) -> PollOutcome {
        if !self.is_current(ticket) {
            return PollOutcome::Stale;
        }
        let Phase::Polling { task_id } = &self.phase else {
            return PollOutcome::Stale;
        };
        let task_id = task_id.clone();
        self.in_flight = false;
        self.poll_failures = 0;

        if !response.status.is_terminal() {
            return PollOutcome::Running;
        }
        self.stop_timer();
        if response.status == TaskStatus::Completed {
            self.phase = Phase::Completed { task_id };
            PollOutcome::Completed
        } else {
            self.phase = Phase::Failed;
            PollOutcome::Failed(response.failure_message().to_string())
        }
    }

    /// A poll request failed (network, HTTP or decoding). Polling goes on;
    /// returns the number of consecutive failures, or `None` if stale.
    pub fn poll_failed(&mut self, ticket: Ticket) -> Option<u32> {
        if !self.is_current(ticket) || !matches!(self.phase, Phase::Polling { .. }) {
            return None;
        }
        self.in_flight = false;
        self.poll_failures += 1;
        Some(self.poll_failures)
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}
