//! Operator-facing output
//!
//! Colored outcome lines and the scan history table. Rendering only; all
//! decisions were made by the time data arrives here.

use colored::Colorize;
use prettytable::{row, Table};

use crate::history::ScanHistoryEntry;
use crate::payload::types::DecodedPayload;
use crate::validation::types::{ValidationOutcome, ValidationStatus};

pub fn render_outcome(outcome: &ValidationOutcome) {
    match outcome.status {
        ValidationStatus::Valid => {
            println!(
                "{} {} ticket",
                "VALID".green().bold(),
                outcome.ticket_type.to_string().to_lowercase()
            );
            if let Some(attendee) = &outcome.attendee {
                println!("  attendee: {} ({})", attendee.name, attendee.phone);
            }
            if let Some(event) = &outcome.event {
                match (&event.start_date, &event.end_date) {
                    (Some(start), Some(end)) => {
                        println!("  event: {} ({} - {})", event.name, start, end)
                    }
                    _ => println!("  event: {}", event.name),
                }
            }
            if let Some(voucher) = &outcome.voucher {
                println!("  voucher: {}", voucher);
            }
        }
        ValidationStatus::AlreadyScanned => {
            match &outcome.scanned_at {
                Some(at) => println!("{} at {}", "ALREADY SCANNED".yellow().bold(), at),
                None => println!("{}", "ALREADY SCANNED".yellow().bold()),
            }
            if let Some(message) = &outcome.message {
                println!("  {}", message.dimmed());
            }
        }
        ValidationStatus::Invalid => {
            println!("{}", "INVALID TICKET".red().bold());
            if let Some(message) = &outcome.message {
                println!("  {}", message);
            }
        }
        ValidationStatus::Error => {
            println!("{}", "VALIDATION ERROR".red().bold());
            if let Some(message) = &outcome.message {
                println!("  {}", message);
            }
        }
    }
}

/// A payload without a ticket identity is content, not a failure
pub fn render_non_ticket(payload: &DecodedPayload) {
    println!("{}", "SCANNED CONTENT".cyan().bold());
    println!("  {}", payload.raw_text);
}

pub fn render_hint(hint: &str) {
    println!("{} {}", "HINT".blue().bold(), hint);
}

pub fn history_table(entries: &[ScanHistoryEntry]) -> Table {
    let mut table = Table::new();
    table.add_row(row![b->"#", b->"Scanned at", b->"Format", b->"Payload"]);
    for (index, entry) in entries.iter().enumerate() {
        table.add_row(row![
            index + 1,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.format,
            entry.payload_text
        ]);
    }
    table
}

pub fn print_history(entries: &[ScanHistoryEntry]) {
    if entries.is_empty() {
        return;
    }
    println!("\n{}", "Session scan history (newest first):".bold());
    history_table(entries).printstd();
}
