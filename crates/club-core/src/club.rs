//! The club state machine.
//!
//! `Club` owns the whole day's state: table histories, the client registry,
//! the waiting queue and both event logs. Events are applied one at a time
//! and each application may append derived events (queue admissions, forced
//! departures, rejections) to the outgoing log.

use std::collections::{HashMap, VecDeque};

use crate::event::{ClientName, Incoming, Notice, Outgoing, Rejection, Request};
use crate::table::Table;
use crate::time::Minutes;

/// The club's admission window. An arrival at `t` is accepted only when
/// `open <= t < close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub open: Minutes,
    pub close: Minutes,
}

impl WorkingHours {
    /// Creates a window, rejecting `open >= close`.
    pub fn new(open: Minutes, close: Minutes) -> Option<Self> {
        (open < close).then_some(Self { open, close })
    }
}

/// Per-client state while the client is inside the club.
///
/// An entry exists in the registry iff the client has arrived and not yet
/// departed; membership is the presence of the entry itself.
#[derive(Debug)]
struct ClientState {
    table: Option<u32>,
    waiting: bool,
}

/// Aggregate state for one simulated day.
#[derive(Debug)]
pub struct Club {
    hours: WorkingHours,
    hour_cost: u64,
    tables: Vec<Table>,
    empty_tables: usize,
    clients: HashMap<ClientName, ClientState>,
    queue: VecDeque<ClientName>,
    incoming: Vec<Incoming>,
    outgoing: Vec<Outgoing>,
}

impl Club {
    /// Creates a club with `table_count` empty tables (ids `1..=table_count`).
    pub fn new(table_count: u32, hours: WorkingHours, hour_cost: u64) -> Self {
        let table_count = table_count as usize;
        Self {
            hours,
            hour_cost,
            tables: vec![Table::default(); table_count],
            empty_tables: table_count,
            clients: HashMap::new(),
            queue: VecDeque::new(),
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub const fn hours(&self) -> WorkingHours {
        self.hours
    }

    pub const fn hour_cost(&self) -> u64 {
        self.hour_cost
    }

    /// Tables with their 1-based ids, in ascending order.
    pub fn tables(&self) -> impl Iterator<Item = (u32, &Table)> {
        self.tables
            .iter()
            .enumerate()
            .map(|(idx, table)| (idx as u32 + 1, table))
    }

    /// Incoming events, in replay order.
    pub fn incoming(&self) -> &[Incoming] {
        &self.incoming
    }

    /// Generated events, in generation order.
    pub fn outgoing(&self) -> &[Outgoing] {
        &self.outgoing
    }

    /// Applies one incoming event, recording it and any derived events.
    pub fn process(&mut self, incoming: Incoming) {
        tracing::debug!(line = %incoming.wire_line(), "processing event");
        let time = incoming.time;
        let request = incoming.request.clone();
        self.incoming.push(incoming);

        match request {
            Request::Arrive { client } => self.on_arrive(time, &client),
            Request::SitDown { client, table } => self.on_sit_down(time, &client, table),
            Request::JoinQueue { client } => self.on_join_queue(time, client),
            Request::Leave { client } => self.on_leave(time, &client),
        }
    }

    /// End-of-day sweep: every client still inside is forced out at closing
    /// time, in lexicographic name order. No queue admission follows; the
    /// club is closing and no new sessions start.
    pub fn close(&mut self) {
        let mut remaining: Vec<ClientName> = self.clients.keys().cloned().collect();
        remaining.sort();

        let close = self.hours.close;
        for client in remaining {
            self.emit(close, Notice::ForcedLeave {
                client: client.clone(),
            });
            if let Some(state) = self.clients.remove(&client) {
                if let Some(table) = state.table {
                    self.release_table(close, table);
                }
            }
        }
        self.queue.clear();
    }

    fn on_arrive(&mut self, time: Minutes, client: &ClientName) {
        if time < self.hours.open || time >= self.hours.close {
            self.reject(time, Rejection::NotOpenYet);
            return;
        }
        if self.clients.contains_key(client) {
            self.reject(time, Rejection::YouShallNotPass);
            return;
        }
        self.clients.insert(client.clone(), ClientState {
            table: None,
            waiting: false,
        });
    }

    fn on_sit_down(&mut self, time: Minutes, client: &ClientName, table: u64) {
        // Registration is checked before any table state is consulted.
        let Some(state) = self.clients.get(client) else {
            self.reject(time, Rejection::ClientUnknown);
            return;
        };
        let seated_at = state.table;
        // An id outside [1, N] can never be seated at; the table set is fixed.
        if table == 0 || table > self.tables.len() as u64 {
            self.reject(time, Rejection::PlaceIsBusy);
            return;
        }
        let table = table as u32;
        if self.table(table).is_busy() {
            self.reject(time, Rejection::PlaceIsBusy);
            return;
        }

        match seated_at {
            None => self.seat(time, client.clone(), table),
            Some(freed) => {
                // Switch: vacate first, then take the new seat, then let the
                // queue head claim the freed table.
                self.release_table(time, freed);
                self.seat(time, client.clone(), table);
                self.admit_from_queue(time, freed);
            }
        }
    }

    fn on_join_queue(&mut self, time: Minutes, client: ClientName) {
        if !self.clients.contains_key(&client) {
            self.reject(time, Rejection::ClientUnknown);
            return;
        }
        if self.empty_tables > 0 {
            self.reject(time, Rejection::ICanWaitNoLonger);
            return;
        }
        if self.queue.len() > self.tables.len() {
            self.force_leave(time, client);
            return;
        }
        // Idempotent: a client waits at most once.
        if let Some(state) = self.clients.get_mut(&client) {
            if !state.waiting {
                state.waiting = true;
                self.queue.push_back(client);
            }
        }
    }

    fn on_leave(&mut self, time: Minutes, client: &ClientName) {
        if !self.clients.contains_key(client) {
            self.reject(time, Rejection::ClientUnknown);
            return;
        }
        self.depart(time, client);
    }

    /// System-generated departure, identical to a voluntary leave for state
    /// purposes.
    fn force_leave(&mut self, time: Minutes, client: ClientName) {
        self.emit(time, Notice::ForcedLeave {
            client: client.clone(),
        });
        self.depart(time, &client);
    }

    /// Removes the client from the club: queue entry, open session and
    /// registry entry. A freed table is offered to the queue head.
    fn depart(&mut self, time: Minutes, client: &ClientName) {
        let Some(state) = self.clients.remove(client) else {
            return;
        };
        if state.waiting {
            self.queue.retain(|waiting| waiting != client);
        }
        if let Some(table) = state.table {
            self.release_table(time, table);
            self.admit_from_queue(time, table);
        }
    }

    /// Offers a free table to the head of the queue. Emits a seating notice
    /// when someone was waiting; otherwise the table simply stays free.
    fn admit_from_queue(&mut self, time: Minutes, table: u32) {
        let Some(next) = self.queue.pop_front() else {
            return;
        };
        if let Some(state) = self.clients.get_mut(&next) {
            state.waiting = false;
        }
        self.seat(time, next.clone(), table);
        self.emit(time, Notice::SeatedFromQueue {
            client: next,
            table,
        });
    }

    fn seat(&mut self, time: Minutes, client: ClientName, table: u32) {
        debug_assert!(self.clients.contains_key(&client), "seating an unregistered client");
        if let Some(state) = self.clients.get_mut(&client) {
            state.table = Some(table);
        }
        self.table_mut(table).start_session(time, client);
        self.empty_tables -= 1;
    }

    fn release_table(&mut self, time: Minutes, table: u32) {
        self.table_mut(table).end_session(time);
        self.empty_tables += 1;
    }

    fn reject(&mut self, time: Minutes, reason: Rejection) {
        self.emit(time, Notice::Rejected(reason));
    }

    fn emit(&mut self, time: Minutes, notice: Notice) {
        let outgoing = Outgoing { time, notice };
        tracing::trace!(line = %outgoing.wire_line(), "generated event");
        self.outgoing.push(outgoing);
    }

    fn table(&self, id: u32) -> &Table {
        &self.tables[id as usize - 1]
    }

    fn table_mut(&mut self, id: u32) -> &mut Table {
        &mut self.tables[id as usize - 1]
    }
}
