//! Parallel categorization of source image files
//!
//! Every file is described independently on the rayon pool and the results
//! are merged afterwards in input order, so a failing file only ever costs
//! its own record.

use crate::io::configuration::SUMMARY_SAMPLE_COUNT;
use crate::io::error::Result;
use crate::io::image::get_image_files;
use crate::palette::metadata::ImageMetadata;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Source file left out of the palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// File that could not be categorized
    pub path: PathBuf,
    /// Rendered error that caused the skip
    pub reason: String,
}

/// Outcome of a categorization batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categorization {
    /// Successfully described images, in input order
    pub records: Vec<ImageMetadata>,
    /// Files that failed, in input order
    pub skipped: Vec<SkippedFile>,
}

impl Categorization {
    /// Number of files looked at
    pub fn processed(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    /// Log counts and a few sample records
    pub fn log_summary(&self) {
        tracing::info!(
            categorized = self.records.len(),
            skipped = self.skipped.len(),
            "Categorization finished"
        );
        for record in self.records.iter().take(SUMMARY_SAMPLE_COUNT) {
            tracing::info!(
                file = %record.filename,
                width = record.width,
                height = record.height,
                rgb = ?record.avg_color_rgb,
                hex = %record.avg_color_hex,
                "Sample"
            );
        }
    }
}

/// Describe each file, skipping the ones that fail
///
/// `progress` is advanced once per file; pass `ProgressBar::hidden()` to
/// run silently.
pub fn categorize_files(files: &[PathBuf], progress: &ProgressBar) -> Categorization {
    let outcomes: Vec<_> = files
        .par_iter()
        .map(|path| {
            let outcome = ImageMetadata::from_path(path);
            progress.inc(1);
            (path, outcome)
        })
        .collect();

    let mut categorization = Categorization::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(record) => categorization.records.push(record),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Skipping source image");
                categorization.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: error.to_string(),
                });
            }
        }
    }

    categorization
}

/// Discover and categorize every supported image below a directory
///
/// # Errors
///
/// Returns an error if the directory does not exist or cannot be read.
/// Individual files that fail to decode are skipped, not reported here.
pub fn categorize_directory(
    directory: &Path,
    extensions: &[String],
    progress: &ProgressBar,
) -> Result<Categorization> {
    let files = get_image_files(directory, extensions)?;
    tracing::info!(directory = %directory.display(), found = files.len(), "Scanned source directory");

    if files.is_empty() {
        tracing::warn!(directory = %directory.display(), "No source images found");
        return Ok(Categorization::default());
    }

    progress.set_length(files.len() as u64);
    let categorization = categorize_files(&files, progress);
    progress.finish_and_clear();
    Ok(categorization)
}
