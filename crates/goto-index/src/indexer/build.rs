//! Build state and progress tracking.

use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// State of the most recently started build.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum BuildState {
    Idle = 0,
    Scanning = 1,
    Published = 2,
    Failed = 3,
}

impl BuildState {
    pub fn load(atomic: &AtomicU8) -> Self {
        match atomic.load(Ordering::Acquire) {
            1 => Self::Scanning,
            2 => Self::Published,
            3 => Self::Failed,
            _ => Self::Idle,
        }
    }

    pub fn store(self, atomic: &AtomicU8) {
        atomic.store(self as u8, Ordering::Release);
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Published => "published",
            Self::Failed => "failed",
        }
    }
}

/// How a single build ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The generation is live.
    Published {
        epoch: u64,
        nodes: usize,
        entries: usize,
    },
    /// A newer build started first; nothing was published.
    Aborted { epoch: u64 },
}

impl BuildOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Counters for one build. A fresh instance is installed per build so a
/// cancelled scan cannot bleed into the numbers of its successor.
#[derive(Debug, Default)]
pub struct BuildProgress {
    pub scanned_dirs: AtomicUsize,
    pub skipped: AtomicUsize,
    pub errors: AtomicUsize,
    pub started_at: AtomicU64,
    pub finished_at: AtomicU64,
}

impl BuildProgress {
    pub fn started_now() -> Self {
        let progress = Self::default();
        progress.started_at.store(unix_now_secs(), Ordering::Relaxed);
        progress
    }

    pub fn mark_finished(&self) {
        self.finished_at.store(unix_now_secs(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            scanned_dirs: self.scanned_dirs.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            started_at: zero_to_none(self.started_at.load(Ordering::Relaxed)),
            finished_at: zero_to_none(self.finished_at.load(Ordering::Relaxed)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub scanned_dirs: usize,
    pub skipped: usize,
    pub errors: usize,
    pub started_at: Option<u64>,
    pub finished_at: Option<u64>,
}

/// Returns the current Unix timestamp in seconds.
pub fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

pub fn zero_to_none(value: u64) -> Option<u64> {
    if value == 0 {
        None
    } else {
        Some(value)
    }
}
