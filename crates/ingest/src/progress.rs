//! Progress reporting for batched loads.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress tracker for the insert batches of one table.
pub struct LoadProgress {
    bar: ProgressBar,
    start: Instant,
}

impl LoadProgress {
    /// Create a progress tracker over `total_batches` insert batches.
    pub fn new(table: &str, total_batches: u64) -> Self {
        let bar = ProgressBar::new(total_batches);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) | {msg}")
                .expect("Invalid progress template")
                .progress_chars("#>-"),
        );
        bar.set_message(format!("Loading {table}"));

        LoadProgress {
            bar,
            start: Instant::now(),
        }
    }

    /// Mark one batch committed.
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Clear the bar and return elapsed time.
    pub fn finish(self) -> std::time::Duration {
        self.bar.finish_and_clear();
        self.start.elapsed()
    }
}
