//! Console output formatting.
//!
//! Each operation has a `format_*` function returning strings and a thin
//! `print_*` wrapper that writes to stdout. Format functions are pure so
//! tests can assert on output without capturing stdout.
//!
//! The tool is chatty in a narrow way: one indented line per file it
//! touched (resized, removed, skipped vector), one summary line per run.
//! Fresh outputs are silent — reporting unchanged files on every run
//! would drown the lines that matter.

use crate::mutate::DeleteOutcome;
use crate::process::RegenEvent;
use std::path::Path;

/// One line per regeneration event; `None` for events not worth a line.
pub fn format_regen_event(event: &RegenEvent) -> Option<String> {
    match event {
        RegenEvent::Resized { output } => Some(format!("  {output}")),
        RegenEvent::Fresh { .. } => None,
        RegenEvent::Vector { file_name } => Some(format!("  (SVG: {file_name} — no resize)")),
    }
}

/// Summary line after a regeneration pass.
pub fn format_done(page_path: &Path, asset_count: usize) -> String {
    format!(
        "Done. Open {} ({} assets).",
        page_path.display(),
        asset_count
    )
}

/// One line per removed file.
pub fn format_removed(name: &str) -> String {
    format!("  removed {name}")
}

/// Outcome line for a CLI delete; silent when there was nothing to delete.
pub fn format_delete_outcome(name: &str, outcome: &DeleteOutcome) -> Option<String> {
    match outcome {
        DeleteOutcome::Deleted { .. } => Some(format!("Deleted {name}. Regenerating...")),
        DeleteOutcome::Missing => None,
    }
}

pub fn print_regen_events(events: &[RegenEvent]) {
    for event in events {
        if let Some(line) = format_regen_event(event) {
            println!("{line}");
        }
    }
}

pub fn print_removed(names: &[String]) {
    for name in names {
        println!("{}", format_removed(name));
    }
}
