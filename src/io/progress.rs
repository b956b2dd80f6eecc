//! Progress display for categorization scans and collage batches

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Steps every collage goes through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollageStage {
    /// Averaging the target grid sections
    Sections,
    /// Assigning palette images to sections
    Matching,
    /// Decoding and resizing matched source images
    Tiles,
    /// Compositing the canvas
    Rendering,
    /// Writing the output file
    Export,
}

impl CollageStage {
    /// All stages in execution order
    pub const ALL: [Self; 5] = [
        Self::Sections,
        Self::Matching,
        Self::Tiles,
        Self::Rendering,
        Self::Export,
    ];

    /// Short label shown next to the bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sections => "sections",
            Self::Matching => "matching",
            Self::Tiles => "tiles",
            Self::Rendering => "rendering",
            Self::Export => "export",
        }
    }

    /// One-based position in [`Self::ALL`]
    pub const fn step(self) -> usize {
        match self {
            Self::Sections => 1,
            Self::Matching => 2,
            Self::Tiles => 3,
            Self::Rendering => 4,
            Self::Export => 5,
        }
    }
}

/// Coordinates progress display for collage batches
///
/// Automatically switches between individual progress bars (for small batches)
/// and an extra batch progress bar (for large batches) based on file count
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    /// Stores (`filename`, `completed_steps`, `stage_label`) for rolling window display
    file_states: Vec<(String, usize, &'static str)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:20.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Targets: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

static SCAN_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Categorizing: [{{bar:{PROGRESS_BAR_WIDTH}.green/blue}}] {{pos}}/{{len}} ({{eta}})"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Bar for a categorization scan over `file_count` files
    pub fn scan_bar(&self, file_count: usize) -> ProgressBar {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(SCAN_STYLE.clone());
        self.multi_progress.add(bar)
    }

    /// Initialize progress bars based on target count
    pub fn initialize(&mut self, file_count: usize) {
        // Switch to batch mode for large file sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(CollageStage::ALL.len() as u64);
            pb.set_style(STAGE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Register a target before its first stage starts
    pub fn start_file(&mut self, index: usize, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, (String::new(), 0, ""));
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = (display_name, 0, "queued");
        }
        self.update_bars();
    }

    /// Report that a target entered `stage`
    pub fn enter_stage(&mut self, index: usize, stage: CollageStage) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.1 = stage.step() - 1;
            state.2 = stage.label();
        }
        self.update_bars();
    }

    /// Mark target as completed and update batch progress
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = CollageStage::ALL.len();
            state.2 = "done";
        }
        tracing::debug!(index, ?elapsed, "Target finished");
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All targets processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active targets
    fn update_bars(&self) {
        let active: Vec<_> = self
            .file_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, steps, label)) in visible.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_position(*steps as u64);
                bar.set_message(*label);
                bar.set_prefix(name.clone());
            }
        }

        // Clear any unused bars
        for bar_idx in visible.len()..self.file_bars.len() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_position(0);
                bar.set_message("");
                bar.set_prefix(String::new());
            }
        }
    }
}
