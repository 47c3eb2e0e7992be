//! End-of-day report assembly.
//!
//! Merges the incoming and outgoing event logs into one chronological view
//! and appends per-table revenue and busy-time totals. Two surfaces: the
//! plain-text wire form and a structured form for JSON output.

use std::fmt::Write;

use serde::Serialize;

use crate::club::Club;
use crate::time::Minutes;

/// One line of the merged chronological log.
#[derive(Debug, Clone, Serialize)]
pub struct LogLine {
    pub time: Minutes,
    pub id: u8,
    pub body: String,
}

/// Per-table totals for the closing report.
#[derive(Debug, Clone, Serialize)]
pub struct TableTotals {
    pub table: u32,
    pub revenue: u64,
    pub busy_time: String,
}

/// The complete report in structured form.
#[derive(Debug, Serialize)]
pub struct ReportData {
    pub opened_at: Minutes,
    pub closed_at: Minutes,
    pub events: Vec<LogLine>,
    pub tables: Vec<TableTotals>,
}

/// Builds the structured report from a finalized club.
pub fn report(club: &Club) -> ReportData {
    let incoming = club.incoming().iter().map(|event| LogLine {
        time: event.time,
        id: event.request.wire_id(),
        body: event.request.body(),
    });
    let outgoing = club.outgoing().iter().map(|event| LogLine {
        time: event.time,
        id: event.notice.wire_id(),
        body: event.notice.body(),
    });

    // Incoming events precede outgoing ones in the chain, so the stable sort
    // keeps same-minute incoming activity ahead of anything it triggered.
    let mut events: Vec<LogLine> = incoming.chain(outgoing).collect();
    events.sort_by_key(|line| line.time);

    let tables = club
        .tables()
        .map(|(table, history)| TableTotals {
            table,
            revenue: history.billed_hours() * club.hour_cost(),
            busy_time: format_busy_time(history.total_time()),
        })
        .collect();

    ReportData {
        opened_at: club.hours().open,
        closed_at: club.hours().close,
        events,
        tables,
    }
}

/// Renders the plain-text report exactly as it goes to standard output.
pub fn render(club: &Club) -> String {
    let data = report(club);
    let mut out = String::new();
    let _ = writeln!(out, "{}", data.opened_at);
    for event in &data.events {
        let _ = writeln!(out, "{} {} {}", event.time, event.id, event.body);
    }
    let _ = writeln!(out, "{}", data.closed_at);
    for totals in &data.tables {
        let _ = writeln!(out, "{} {} {}", totals.table, totals.revenue, totals.busy_time);
    }
    out
}

/// Total busy minutes as `HH:MM`. Per-table totals never reach a full day,
/// since a table's sessions cannot overlap.
fn format_busy_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::WorkingHours;
    use crate::event::{ClientName, Incoming, Request};
    use crate::parse::simulate;

    fn at(s: &str) -> Minutes {
        s.parse().unwrap()
    }

    #[test]
    fn single_client_full_day() {
        let input = "1\n08:00 20:00\n10\n\
                     08:00 1 client1\n\
                     08:05 2 client1 1\n";
        let club = simulate(input).unwrap();

        insta::assert_snapshot!(render(&club), @r"
        08:00
        08:00 1 client1
        08:05 2 client1 1
        20:00 11 client1
        20:00
        1 120 11:55
        ");
    }

    #[test]
    fn same_minute_incoming_sorts_before_outgoing() {
        // The second arrival at 09:00 is rejected; its error event shares the
        // minute with both arrivals and must come after them.
        let input = "1\n09:00 19:00\n10\n\
                     09:00 1 alice\n\
                     09:00 1 alice\n\
                     09:01 4 alice\n";
        let club = simulate(input).unwrap();

        insta::assert_snapshot!(render(&club), @r"
        09:00
        09:00 1 alice
        09:00 1 alice
        09:00 13 YouShallNotPass
        09:01 4 alice
        19:00
        1 0 00:00
        ");
    }

    #[test]
    fn queue_and_tables_reported_in_order() {
        let input = "2\n09:00 19:00\n5\n\
                     09:00 1 a\n\
                     09:00 1 b\n\
                     09:00 1 c\n\
                     09:10 2 a 1\n\
                     09:10 2 b 2\n\
                     09:20 3 c\n\
                     10:10 4 a\n\
                     11:10 4 c\n";
        let club = simulate(input).unwrap();

        insta::assert_snapshot!(render(&club), @r"
        09:00
        09:00 1 a
        09:00 1 b
        09:00 1 c
        09:10 2 a 1
        09:10 2 b 2
        09:20 3 c
        10:10 4 a
        10:10 12 c 1
        11:10 4 c
        19:00 11 b
        19:00
        1 10 02:00
        2 50 09:50
        ");
    }

    #[test]
    fn structured_report_matches_text_content() {
        let input = "1\n08:00 20:00\n10\n08:00 1 client1\n08:05 2 client1 1\n";
        let club = simulate(input).unwrap();
        let data = report(&club);

        assert_eq!(data.opened_at, at("08:00"));
        assert_eq!(data.closed_at, at("20:00"));
        assert_eq!(data.events.len(), 3);
        assert_eq!(data.tables.len(), 1);
        assert_eq!(data.tables[0].revenue, 120);
        assert_eq!(data.tables[0].busy_time, "11:55");

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["opened_at"], "08:00");
        assert_eq!(json["events"][2]["id"], 11);
        assert_eq!(json["tables"][0]["revenue"], 120);
    }

    #[test]
    fn empty_day_reports_idle_tables() {
        let hours = WorkingHours::new(at("09:00"), at("19:00")).unwrap();
        let mut club = Club::new(2, hours, 7);
        club.close();

        insta::assert_snapshot!(render(&club), @r"
        09:00
        19:00
        1 0 00:00
        2 0 00:00
        ");
    }

    #[test]
    fn render_reproduces_wire_lines_verbatim() {
        let hours = WorkingHours::new(at("09:00"), at("19:00")).unwrap();
        let mut club = Club::new(1, hours, 10);
        let incoming = Incoming {
            time: at("09:30"),
            request: Request::Arrive {
                client: ClientName::new("kot_e-2").unwrap(),
            },
        };
        let line = incoming.wire_line();
        club.process(incoming);

        assert!(render(&club).contains(&line));
    }
}
