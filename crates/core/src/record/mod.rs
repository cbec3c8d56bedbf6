use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use serde::{Deserialize, Serialize};

use crate::{SortAlgorithm, SortOutcome};

/// Instrumentation counters updated by the sort worker and read by the
/// presentation layer.
#[derive(Debug, Default)]
pub struct SortMetrics {
    comparisons: AtomicU64,
    array_accesses: AtomicU64,
}

impl SortMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_comparison(&self) {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_accesses(&self, count: u64) {
        self.array_accesses.fetch_add(count, Ordering::Relaxed);
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons.load(Ordering::Relaxed)
    }

    pub fn array_accesses(&self) -> u64 {
        self.array_accesses.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.comparisons.store(0, Ordering::Relaxed);
        self.array_accesses.store(0, Ordering::Relaxed);
    }
}

/// Summary of a finished (or cancelled) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub algorithm: SortAlgorithm,
    pub outcome: SortOutcome,
    pub elements: usize,
    pub comparisons: u64,
    pub array_accesses: u64,
    pub elapsed_ms: u128,
}

/// Tracks the wall-clock duration of a run so a [`RunReport`] can be produced
/// once the worker has been joined.
#[derive(Debug, Clone)]
pub struct RunRecorder {
    algorithm: SortAlgorithm,
    started: Instant,
}

impl RunRecorder {
    pub fn start(algorithm: SortAlgorithm) -> Self {
        Self {
            algorithm,
            started: Instant::now(),
        }
    }

    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    pub fn finish(self, outcome: SortOutcome, metrics: &SortMetrics, elements: usize) -> RunReport {
        RunReport {
            algorithm: self.algorithm,
            outcome,
            elements,
            comparisons: metrics.comparisons(),
            array_accesses: metrics.array_accesses(),
            elapsed_ms: self.started.elapsed().as_millis(),
        }
    }
}
