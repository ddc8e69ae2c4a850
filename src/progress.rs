//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Progress bar over the dump files of one pipeline
#[derive(Debug)]
pub struct ProgressReporter {
    pub files_pb: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create progress reporter for a pipeline over `total_files` dumps
    pub fn new_for_pipeline(label: &str, total_files: u64) -> Self {
        Self {
            files_pb: Some(create_progress_bar(total_files, label)),
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self { files_pb: None }
    }

    /// Mark one more file as handled
    pub fn advance(&self, path: &Path) {
        if let Some(pb) = &self.files_pb {
            pb.set_message(path.display().to_string());
            pb.inc(1);
        }
    }

    pub fn finish(&mut self, message: &str) {
        if let Some(pb) = self.files_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(pb) = self.files_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a progress bar with known total
fn create_progress_bar(total: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} {wide_msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    pb.set_prefix(label.to_string());
    pb
}
