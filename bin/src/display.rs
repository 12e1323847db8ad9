//! Progress and summary output for the leanbars CLI.

use indicatif::{ProgressBar, ProgressStyle};
use leanbars_lib::RunSummary;

/// Creates the day progress bar, hidden in quiet mode.
pub(crate) fn progress_bar(total_days: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total_days);
    let style = ProgressStyle::default_bar()
        .template(concat!(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ",
            "{pos}/{len} days ({percent}%) {msg}",
        ))
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("=>-"));
    pb.set_style(style);
    pb
}

/// Prints run totals to stdout and every failed unit to stderr.
pub(crate) fn print_summary(summary: &RunSummary, quiet: bool) {
    if !quiet {
        println!(
            "Converted {} day(s), {} bar(s) written, {} day(s) without ticks",
            summary.days_processed, summary.bars_written, summary.days_missing
        );
    }

    if !summary.failures.is_empty() {
        eprintln!("{} day(s) had failures:", summary.days_failed);
        for failure in &summary.failures {
            eprintln!("  {failure}");
        }
    }
}
