//! Multi-set progress tracking with automatic batching for large directories

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates progress display for batch operations
///
/// Automatically switches between individual progress bars (for small batches)
/// and a single batch progress bar (for large batches) based on texture set count
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    set_bars: Vec<ProgressBar>,
    set_count: usize,
    /// Per-set display state for the rolling window
    set_states: Vec<SetState>,
}

#[derive(Debug, Clone, Default)]
struct SetState {
    name: String,
    label: &'static str,
    current: usize,
    total: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Sets: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            set_bars: Vec::new(),
            set_count: 0,
            set_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on texture set count
    pub fn initialize(&mut self, set_count: usize) {
        self.set_count = set_count;

        // Switch to batch mode for large sets to avoid terminal spam
        if set_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(set_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = set_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.set_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of texture sets being tracked
    pub const fn set_count(&self) -> usize {
        self.set_count
    }

    /// Configure progress bar for a new texture set
    pub fn start_set(&mut self, index: usize, prefix: &Path, stages: usize) {
        let name = prefix
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.set_states.len() {
            self.set_states.resize(index + 1, SetState::default());
        }
        if let Some(state) = self.set_states.get_mut(index) {
            *state = SetState {
                name,
                label: "",
                current: 0,
                total: stages,
            };
        }
        self.update_bars();
    }

    /// Report the stage about to run
    pub fn update_stage(&mut self, index: usize, position: usize, label: &'static str) {
        if let Some(state) = self.set_states.get_mut(index) {
            state.current = position;
            state.label = label;
        }
        self.update_bars();
    }

    /// Mark texture set as completed and update batch progress
    pub fn complete_set(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.set_states.get_mut(index) {
            state.name = format!("✓ {} ({:.1}s)", state.name, elapsed.as_secs_f32());
            state.current = state.total;
            state.label = "done";
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All texture sets processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active sets
    fn update_bars(&self) {
        let active: Vec<&SetState> = self
            .set_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, state) in visible.iter().enumerate() {
            if let Some(bar) = self.set_bars.get(bar_idx) {
                bar.set_length(state.total as u64);
                bar.set_position(state.current as u64);
                bar.set_message(format!("{:>9}", state.label));
                bar.set_prefix(state.name.clone());
            }
        }

        // Clear any unused bars
        for bar_idx in visible.len()..self.set_bars.len() {
            if let Some(bar) = self.set_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
