//! Line codec for the club log and the replay driver.
//!
//! The input is line-oriented: three header lines (table count, working
//! hours, hour cost) followed by one event per line. Any structural problem
//! is fatal for the whole run; the error carries the raw offending line so
//! the caller can echo it as the only diagnostic.

use std::str::FromStr;

use thiserror::Error;

use crate::club::{Club, WorkingHours};
use crate::event::{ClientName, Incoming, Request};
use crate::time::Minutes;

/// A structurally invalid input. Every variant keeps the raw line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing header line")]
    MissingHeader,

    #[error("invalid table count: {line:?}")]
    InvalidTableCount { line: String },

    #[error("invalid working hours: {line:?}")]
    InvalidWorkingHours { line: String },

    #[error("working hours out of order: {line:?}")]
    HoursOutOfOrder { line: String },

    #[error("invalid hour cost: {line:?}")]
    InvalidHourCost { line: String },

    #[error("invalid event time: {line:?}")]
    InvalidEventTime { line: String },

    #[error("unknown event id: {line:?}")]
    UnknownEventId { line: String },

    #[error("invalid client name: {line:?}")]
    InvalidClientName { line: String },

    #[error("malformed event body: {line:?}")]
    MalformedBody { line: String },
}

impl ParseError {
    /// The offending input line, verbatim.
    pub fn raw_line(&self) -> &str {
        match self {
            Self::MissingHeader => "",
            Self::InvalidTableCount { line }
            | Self::InvalidWorkingHours { line }
            | Self::HoursOutOfOrder { line }
            | Self::InvalidHourCost { line }
            | Self::InvalidEventTime { line }
            | Self::UnknownEventId { line }
            | Self::InvalidClientName { line }
            | Self::MalformedBody { line } => line,
        }
    }
}

/// Positive decimal integer without sign or leading zero.
fn parse_positive(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

/// Header line 1: the number of tables.
pub fn parse_table_count(line: &str) -> Result<u32, ParseError> {
    parse_positive(line).ok_or_else(|| ParseError::InvalidTableCount {
        line: line.to_string(),
    })
}

/// Header line 2: `HH:MM HH:MM`, opening strictly before closing.
pub fn parse_working_hours(line: &str) -> Result<WorkingHours, ParseError> {
    let invalid = || ParseError::InvalidWorkingHours {
        line: line.to_string(),
    };
    let tokens: Vec<&str> = line.split(' ').collect();
    let [open, close] = tokens.as_slice() else {
        return Err(invalid());
    };
    let open = Minutes::from_str(open).map_err(|_| invalid())?;
    let close = Minutes::from_str(close).map_err(|_| invalid())?;
    WorkingHours::new(open, close).ok_or_else(|| ParseError::HoursOutOfOrder {
        line: line.to_string(),
    })
}

/// Header line 3: cost per started hour.
pub fn parse_hour_cost(line: &str) -> Result<u64, ParseError> {
    parse_positive(line)
        .map(u64::from)
        .ok_or_else(|| ParseError::InvalidHourCost {
            line: line.to_string(),
        })
}

/// One event line: `HH:MM ID name [table]`.
///
/// The id must be one of the four incoming kinds and the body arity must
/// match it; the sit-down table token must be all digits (whether the table
/// actually exists is the state machine's concern, not the codec's).
pub fn parse_request(line: &str) -> Result<Incoming, ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    let (&time, &id, body) = match tokens.as_slice() {
        [time, id, body @ ..] if !body.is_empty() => (time, id, body),
        _ => {
            return Err(ParseError::MalformedBody {
                line: line.to_string(),
            });
        }
    };

    let time = Minutes::from_str(time).map_err(|_| ParseError::InvalidEventTime {
        line: line.to_string(),
    })?;
    let client = ClientName::new(body[0]).map_err(|_| ParseError::InvalidClientName {
        line: line.to_string(),
    })?;

    let malformed = || ParseError::MalformedBody {
        line: line.to_string(),
    };
    let request = match id {
        "1" | "3" | "4" => {
            if body.len() != 1 {
                return Err(malformed());
            }
            match id {
                "1" => Request::Arrive { client },
                "3" => Request::JoinQueue { client },
                _ => Request::Leave { client },
            }
        }
        "2" => {
            let [_, table] = body else {
                return Err(malformed());
            };
            if table.is_empty() || !table.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            // Magnitude is not a codec concern: a number too large for any
            // club saturates and is rejected downstream as an unusable seat.
            let table: u64 = table.parse().unwrap_or(u64::MAX);
            Request::SitDown { client, table }
        }
        _ => {
            return Err(ParseError::UnknownEventId {
                line: line.to_string(),
            });
        }
    };

    Ok(Incoming { time, request })
}

/// Replays a whole input file: three header lines, then every event in file
/// order, then the end-of-day sweep. Returns the finalized club, ready for
/// reporting.
pub fn simulate(input: &str) -> Result<Club, ParseError> {
    let mut lines = input.lines();
    let mut header = || lines.next().ok_or(ParseError::MissingHeader);

    let table_count = parse_table_count(header()?)?;
    let hours = parse_working_hours(header()?)?;
    let hour_cost = parse_hour_cost(header()?)?;
    tracing::debug!(table_count, hour_cost, "club configured");

    let mut club = Club::new(table_count, hours, hour_cost);
    for line in lines {
        club.process(parse_request(line)?);
    }
    club.close();
    Ok(club)
}
