use std::path::Path;

use colored::Colorize;

use crate::cleaner::{Notice, ScanEntry, SweepSummary};
use crate::error::SweepError;
use crate::utils::format_size;

pub fn print_clean_header(all: bool) {
    let header = if all {
        "Cleaning all cache files..."
    } else {
        "Cleaning specified cache files..."
    };
    println!("{}", header.bold());
}

/// Render one sweep notice. Called concurrently from deletion units; each
/// notice is a single `println!` so lines never tear.
pub fn print_notice(notice: &Notice<'_>) {
    match notice {
        Notice::Cleaning(candidate) => print_cleaning(&candidate.path),
        Notice::WouldClean {
            candidate,
            size_bytes,
        } => print_would_clean(&candidate.path, *size_bytes),
        Notice::Removed { candidate, freed } => print_deleted(&candidate.path, *freed),
        Notice::Failed(err) => print_error(err),
    }
}

pub fn print_cleaning(path: &Path) {
    println!("Cleaning {}...", path.display());
}

pub fn print_would_clean(path: &Path, size: u64) {
    println!(
        "{} {}  {}",
        "Would clean".cyan(),
        path.display(),
        format_size(size).yellow()
    );
}

pub fn print_deleted(path: &Path, freed: u64) {
    println!(
        "  {} {}  {}",
        "Deleted".red(),
        path.display().to_string().dimmed(),
        format_size(freed).yellow()
    );
}

pub fn print_error(err: &SweepError) {
    println!("{}", err.to_string().red());
}

pub fn print_clean_complete(summary: &SweepSummary) {
    println!("{}", "Cache cleaning completed.".green().bold());

    if summary.dry_run {
        println!(
            "{}",
            format!(
                "Dry run: {} entries would be removed. Nothing was deleted.",
                summary.scheduled
            )
            .yellow()
        );
        return;
    }

    let mut line = format!(
        "{} removed, {} freed",
        summary.removed,
        format_size(summary.bytes_freed)
    );
    if summary.failed > 0 {
        line.push_str(&format!(", {} failed", summary.failed));
    }
    if summary.cancelled > 0 {
        line.push_str(&format!(", {} skipped after timeout", summary.cancelled));
    }
    println!("{}", line.dimmed());
}

pub fn print_report_entry(entry: &ScanEntry, human: bool) {
    if human {
        println!("{}: {}", entry.name, format_size(entry.size_bytes));
    } else {
        println!("{}: {} bytes", entry.name, entry.size_bytes);
    }
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "Warning:".red().bold(), msg.red());
}

pub fn print_info(msg: &str) {
    println!("{} {}", "Info:".cyan().bold(), msg);
}
