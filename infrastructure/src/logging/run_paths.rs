//! File names for one process run.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Log file locations sharing the run's start-time suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLogPaths {
    dir: PathBuf,
    stamp: String,
}

impl RunLogPaths {
    pub fn new(dir: impl Into<PathBuf>, started_at: DateTime<Local>) -> Self {
        Self {
            dir: dir.into(),
            stamp: started_at.format("%Y%m%d_%H%M%S").to_string(),
        }
    }

    /// Paths for a run starting now.
    pub fn starting_now(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, Local::now())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    /// `chatdev_trace_<stamp>.jsonl`
    pub fn trace_file(&self) -> PathBuf {
        self.dir.join(format!("chatdev_trace_{}.jsonl", self.stamp))
    }

    /// File name (without directory) of the plain-text execution log.
    pub fn execution_file_name(&self) -> String {
        format!("execution_{}.log", self.stamp)
    }

    pub fn execution_file(&self) -> PathBuf {
        self.dir.join(self.execution_file_name())
    }
}
