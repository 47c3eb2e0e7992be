//! Per-table session history and billing queries.

use crate::event::ClientName;
use crate::time::Minutes;

/// One contiguous interval during which a client occupies a table.
///
/// `end` is `None` while the session is still open; it is set exactly once
/// when the client stands up or the club closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub start: Minutes,
    pub end: Option<Minutes>,
    pub client: ClientName,
}

impl Session {
    /// Duration in minutes, `None` while the session is open.
    fn duration(&self) -> Option<u32> {
        self.end.map(|end| self.start.minutes_until(end))
    }
}

/// A physical table and its append-only session history.
///
/// The full history is retained: billing runs over every closed session at
/// the end of the day.
#[derive(Debug, Clone, Default)]
pub struct Table {
    sessions: Vec<Session>,
}

impl Table {
    /// Opens a new session. The caller guarantees the table is not busy.
    pub fn start_session(&mut self, time: Minutes, client: ClientName) {
        debug_assert!(!self.is_busy(), "table already has an open session");
        self.sessions.push(Session {
            start: time,
            end: None,
            client,
        });
    }

    /// Closes the open session, if any.
    pub fn end_session(&mut self, time: Minutes) {
        if let Some(open) = self.sessions.last_mut().filter(|s| s.end.is_none()) {
            open.end = Some(time);
        }
    }

    /// True iff the most recent session exists and has no end time yet.
    pub fn is_busy(&self) -> bool {
        self.sessions.last().is_some_and(|s| s.end.is_none())
    }

    /// Total occupied time in minutes, over closed sessions.
    pub fn total_time(&self) -> u32 {
        self.sessions.iter().filter_map(Session::duration).sum()
    }

    /// Billable hours: every started hour of a session is charged in full.
    pub fn billed_hours(&self) -> u64 {
        self.sessions
            .iter()
            .filter_map(Session::duration)
            .map(|minutes| u64::from(minutes.div_ceil(60)))
            .sum()
    }

    /// The recorded sessions, oldest first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }
}
