//! Core domain logic for the computer-club day simulator.
//!
//! This crate contains the types and logic for:
//! - Event replay: the club state machine that validates and applies one
//!   event at a time, generating derived events along the way
//! - Billing: per-table session histories and started-hour charges
//! - The line codec for the log format and the closing report assembly

pub mod club;
pub mod event;
pub mod parse;
pub mod report;
pub mod table;
pub mod time;

pub use club::{Club, WorkingHours};
pub use event::{ClientName, Incoming, Notice, Outgoing, Rejection, Request};
pub use parse::{ParseError, simulate};
pub use time::Minutes;
