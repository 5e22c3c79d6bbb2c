//! Terminal rendering of engine snapshots.

use crate::engine::Snapshot;
use crate::request::{describe_pending, describe_resolved, ApprovalRequest, RequestStatus};
use colored::Colorize;

/// Print the full pending + resolved view.
pub fn print_snapshot(snapshot: &Snapshot) {
    println!();
    println!("  {}", "Pending".bold());
    println!("  {}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".dimmed());

    if snapshot.is_idle() {
        println!("  {}", "Nothing to do!".bold());
        println!("  {}", "Go grab a coffee ☕".dimmed());
    } else {
        for (index, request) in snapshot.pending.iter().enumerate() {
            print_pending(index + 1, request);
        }
    }

    if snapshot.in_flight {
        println!();
        println!("  {} {}", "⏳".yellow(), "Sending decision...".yellow());
    }

    println!();
    println!("  {}", "Previous Requests".bold());
    println!("  {}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".dimmed());
    if snapshot.resolved.is_empty() {
        println!("  {}", "(none yet)".dimmed());
    }
    for request in &snapshot.resolved {
        print_resolved(request);
    }
    println!();
}

fn print_pending(number: usize, request: &ApprovalRequest) {
    println!(
        "  {}. {} {}  {}",
        number.to_string().bold(),
        "🔔".yellow(),
        request.kind.label().bold(),
        short_id(&request.id).dimmed()
    );
    println!("     {}", describe_pending(&request.kind));
}

fn print_resolved(request: &ApprovalRequest) {
    let badge = match request.status {
        RequestStatus::Approved => " APPROVED ".on_green().white().bold(),
        RequestStatus::Rejected => " REJECTED ".on_red().white().bold(),
        RequestStatus::Requested => " REQUESTED ".on_yellow().black().bold(),
    };
    println!("  {} {}", badge, request.kind.label().bold());
    println!("     {}", describe_resolved(&request.kind));
}

/// Print the commands available while watching.
pub fn print_help() {
    println!();
    println!("  {}", "Commands:".dimmed());
    println!("    {}   approve request n (or an id prefix)", "a <n>".bold());
    println!("    {}   reject request n (or an id prefix)", "r <n>".bold());
    println!("    {}       show the lists again", "l".bold());
    println!("    {}       quit", "q".bold());
    println!();
}

/// First 8 characters of an id, enough to tell requests apart on screen.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
