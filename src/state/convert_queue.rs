/// Batch conversion queue
///
/// Dropped paths accumulate here until an explicit convert run. Only `.svg`
/// paths enter the queue; everything else is skipped silently at this
/// boundary.
use std::path::{Path, PathBuf};

use crate::transcode::is_svg_path;

/// Per-file status of one queued input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertStatus {
    /// Waiting for the next convert run
    Pending,

    /// Converted to the given output path
    Converted { output: PathBuf },

    /// Last run failed for this input
    Failed { message: String },
}

impl ConvertStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ConvertStatus::Pending)
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, ConvertStatus::Converted { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ConvertStatus::Failed { .. })
    }
}

/// One queued input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertItem {
    path: PathBuf,
    status: ConvertStatus,
}

impl ConvertItem {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status(&self) -> &ConvertStatus {
        &self.status
    }
}

/// FIFO queue of conversion inputs with per-file outcomes.
#[derive(Debug, Default)]
pub struct ConvertQueue {
    items: Vec<ConvertItem>,
}

impl ConvertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the `.svg` paths from a drop, skipping non-SVG files and paths
    /// already queued. Returns how many items were added.
    pub fn enqueue(&mut self, paths: &[PathBuf]) -> usize {
        let mut added = 0;
        for path in paths {
            if !is_svg_path(path) {
                continue;
            }
            if self.items.iter().any(|item| item.path == *path) {
                continue;
            }
            self.items.push(ConvertItem {
                path: path.clone(),
                status: ConvertStatus::Pending,
            });
            added += 1;
        }
        added
    }

    pub fn items(&self) -> &[ConvertItem] {
        &self.items
    }

    /// All queued input paths in queue order. A convert run processes every
    /// item, including previously converted ones.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.items.iter().map(|item| item.path.clone()).collect()
    }

    /// Record one run's outcomes, index-aligned with [`Self::paths`].
    pub fn apply_results(&mut self, results: Vec<Result<PathBuf, String>>) {
        for (item, result) in self.items.iter_mut().zip(results) {
            item.status = match result {
                Ok(output) => ConvertStatus::Converted { output },
                Err(message) => ConvertStatus::Failed { message },
            };
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn converted_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.status.is_converted())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.status.is_failed())
            .count()
    }
}
