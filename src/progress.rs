//! Progress display for downloads and file copies
//!
//! indicatif draws to stderr and stays hidden when stderr is not a terminal, so
//! scripted runs and tests see no progress output.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner shown while a content source is fetched
pub fn fetch_spinner(what: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner} Downloading {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS);
    pb.set_style(style);
    pb.set_message(what.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Progress display for the files of one install run
pub struct ProgressDisplay {
    file_pb: ProgressBar,
}

impl ProgressDisplay {
    pub fn new(total_files: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("  [{bar:40.green/yellow}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");
        let file_pb = ProgressBar::new(total_files);
        file_pb.set_style(style);
        Self { file_pb }
    }

    /// Display that never draws
    pub fn hidden() -> Self {
        Self {
            file_pb: ProgressBar::hidden(),
        }
    }

    pub fn update_file(&self, file_path: &str) {
        // Truncate long paths for display
        let display_path = if file_path.chars().count() > 50 {
            let tail: String = file_path
                .chars()
                .rev()
                .take(47)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{tail}")
        } else {
            file_path.to_string()
        };
        self.file_pb.set_message(display_path);
        self.file_pb.inc(1);
    }

    pub fn finish(&self) {
        self.file_pb.finish_and_clear();
    }

    pub fn abandon(&self) {
        self.file_pb.abandon();
    }
}
