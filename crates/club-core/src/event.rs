//! Typed event vocabulary for the club log.
//!
//! The wire format identifies event kinds by small integers (1-4 incoming,
//! 11-13 outgoing). Inside the crate each kind is an enum variant carrying
//! its typed payload, so the state machine matches exhaustively and malformed
//! payloads cannot be represented at all.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::time::Minutes;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("valid regex"));

/// A validated client name.
///
/// Names are non-empty and drawn from `[a-z0-9_-]`. Construction is the only
/// place the syntax is checked; everything downstream can trust the value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientName(String);

impl ClientName {
    /// Creates a validated name.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidName> {
        let name = name.into();
        if NAME_RE.is_match(&name) {
            Ok(Self(name))
        } else {
            Err(InvalidName(name))
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error type for strings that are not a valid client name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidName(String);

impl fmt::Display for InvalidName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid client name: {:?}", self.0)
    }
}

impl std::error::Error for InvalidName {}

/// An incoming request from the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Wire id 1: the client walks in.
    Arrive { client: ClientName },
    /// Wire id 2: the client takes (or switches to) a table.
    ///
    /// The table number is whatever the log said; only the state machine
    /// knows whether such a table exists.
    SitDown { client: ClientName, table: u64 },
    /// Wire id 3: the client joins the waiting queue.
    JoinQueue { client: ClientName },
    /// Wire id 4: the client leaves on their own.
    Leave { client: ClientName },
}

impl Request {
    /// The integer id this request carries on the wire.
    pub const fn wire_id(&self) -> u8 {
        match self {
            Self::Arrive { .. } => 1,
            Self::SitDown { .. } => 2,
            Self::JoinQueue { .. } => 3,
            Self::Leave { .. } => 4,
        }
    }

    /// The client the request is about.
    pub const fn client(&self) -> &ClientName {
        match self {
            Self::Arrive { client }
            | Self::SitDown { client, .. }
            | Self::JoinQueue { client }
            | Self::Leave { client } => client,
        }
    }

    /// Body tokens joined with single spaces, as they appear on the wire.
    pub fn body(&self) -> String {
        match self {
            Self::Arrive { client } | Self::JoinQueue { client } | Self::Leave { client } => {
                client.to_string()
            }
            Self::SitDown { client, table } => format!("{client} {table}"),
        }
    }
}

/// Why a request was refused.
///
/// Each variant maps to the fixed machine-readable token carried by error
/// events (wire id 13).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Arrival outside working hours.
    NotOpenYet,
    /// Arrival of a client already inside.
    YouShallNotPass,
    /// Request naming a client who never arrived (or already left).
    ClientUnknown,
    /// The target table is occupied or does not exist.
    PlaceIsBusy,
    /// Queueing while at least one table is still free.
    ICanWaitNoLonger,
}

impl Rejection {
    /// The wire token for this rejection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotOpenYet => "NotOpenYet",
            Self::YouShallNotPass => "YouShallNotPass",
            Self::ClientUnknown => "ClientUnknown",
            Self::PlaceIsBusy => "PlaceIsBusy",
            Self::ICanWaitNoLonger => "ICanWaitNoLonger!",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event generated by the simulator itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Wire id 11: a client is made to leave (queue overflow or closing time).
    ForcedLeave { client: ClientName },
    /// Wire id 12: the queue head takes a table that just became free.
    SeatedFromQueue { client: ClientName, table: u32 },
    /// Wire id 13: a request was refused.
    Rejected(Rejection),
}

impl Notice {
    /// The integer id this notice carries on the wire.
    pub const fn wire_id(&self) -> u8 {
        match self {
            Self::ForcedLeave { .. } => 11,
            Self::SeatedFromQueue { .. } => 12,
            Self::Rejected(_) => 13,
        }
    }

    /// Body tokens joined with single spaces, as they appear on the wire.
    pub fn body(&self) -> String {
        match self {
            Self::ForcedLeave { client } => client.to_string(),
            Self::SeatedFromQueue { client, table } => format!("{client} {table}"),
            Self::Rejected(reason) => reason.to_string(),
        }
    }
}

/// A timestamped incoming event, as replayed from the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incoming {
    pub time: Minutes,
    pub request: Request,
}

impl Incoming {
    /// Renders the event back into its wire line.
    pub fn wire_line(&self) -> String {
        format!("{} {} {}", self.time, self.request.wire_id(), self.request.body())
    }
}

/// A timestamped outgoing event, generated during the replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub time: Minutes,
    pub notice: Notice,
}

impl Outgoing {
    /// Renders the event into its wire line.
    pub fn wire_line(&self) -> String {
        format!("{} {} {}", self.time, self.notice.wire_id(), self.notice.body())
    }
}
