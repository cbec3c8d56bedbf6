//! Execution controller: owns the sticks, launches and cancels the sort
//! worker, and exposes the live counters to the presentation layer.

mod board;

use std::{
    sync::{Arc, Mutex, MutexGuard},
    thread::{self, JoinHandle},
    time::Duration,
};

use rand::{rngs::SmallRng, SeedableRng};

pub use board::Board;

use crate::{
    layout::{self, StickLayout},
    render::{Canvas, StickSprite, Viewport},
    sort::{self, SortRun},
    CollectionConfig, ColorRole, Result, RunFlag, RunRecorder, RunReport, SortAlgorithm,
    SortMetrics, SortOutcome, SortState, SortVizError, SoundService, StepPacer, Stick,
};

/// State shared between the controller and its sort worker.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) board: Mutex<Board>,
    pub(crate) metrics: SortMetrics,
    pub(crate) flag: RunFlag,
}

impl Shared {
    pub(crate) fn new(board: Board) -> Self {
        Self {
            board: Mutex::new(board),
            metrics: SortMetrics::new(),
            flag: RunFlag::new(),
        }
    }

    pub(crate) fn lock_board(&self) -> Result<MutexGuard<'_, Board>> {
        self.board
            .lock()
            .map_err(|_| SortVizError::Poisoned("stick board"))
    }
}

/// The running worker plus the bookkeeping needed to report on it.
struct Worker {
    handle: JoinHandle<Result<SortOutcome>>,
    recorder: RunRecorder,
}

/// Controller for one row of sticks.
pub struct StickCollection {
    config: CollectionConfig,
    shared: Arc<Shared>,
    audio: Arc<dyn SoundService>,
    rng: SmallRng,
    worker: Option<Worker>,
    algorithm: Option<SortAlgorithm>,
    step_delay: Duration,
    last_report: Option<RunReport>,
    initialized: bool,
}

impl StickCollection {
    pub fn new(config: CollectionConfig, audio: Arc<dyn SoundService>) -> Self {
        Self::with_rng(config, audio, SmallRng::from_os_rng())
    }

    /// Creates a collection whose shuffles are reproducible.
    pub fn with_seed(config: CollectionConfig, audio: Arc<dyn SoundService>, seed: u64) -> Self {
        Self::with_rng(config, audio, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: CollectionConfig, audio: Arc<dyn SoundService>, rng: SmallRng) -> Self {
        Self {
            config,
            shared: Arc::new(Shared::new(Board::default())),
            audio,
            rng,
            worker: None,
            algorithm: None,
            step_delay: Duration::ZERO,
            last_report: None,
            initialized: false,
        }
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Builds the configured number of sticks with strictly increasing
    /// heights, then shuffles them. Any running sort is cancelled and joined
    /// first.
    pub fn initialize(&mut self, viewport: &dyn Viewport) -> Result<()> {
        self.stop_worker()?;
        self.config.validate()?;

        let layout = StickLayout::for_viewport(&self.config, viewport.size().x)?;
        let count = self.config.number_of_elements;
        let sticks = (0..count)
            .map(|index| {
                let height = layout::compute_height(index, count, layout.max_height);
                Stick::new(index as u32, layout.size_for(height))
            })
            .collect();
        *self.shared.lock_board()? = Board::new(sticks, layout);
        self.initialized = true;
        tracing::info!(elements = count, "initialized stick collection");

        self.reset()
    }

    /// Replaces the sticks with the given values, in the given order. Unlike
    /// [`initialize`](Self::initialize) nothing is shuffled.
    pub fn load_values(&mut self, values: &[u32], viewport: &dyn Viewport) -> Result<()> {
        self.stop_worker()?;
        let board = Board::from_values(values, &self.config, viewport.size().x)?;
        *self.shared.lock_board()? = board;
        self.initialized = true;
        self.reset_run_state()?;
        tracing::debug!(elements = values.len(), "loaded explicit stick values");
        Ok(())
    }

    /// Cancels the running sort (waiting for the worker to exit), reshuffles
    /// and clears colours, counters and delay.
    pub fn reset(&mut self) -> Result<()> {
        self.stop_worker()?;
        self.shuffle_sticks()?;
        self.reset_run_state()?;
        tracing::info!("collection reset");
        Ok(())
    }

    fn reset_run_state(&mut self) -> Result<()> {
        self.shared.lock_board()?.paint_all(ColorRole::Idle);
        self.shared.metrics.reset();
        self.step_delay = Duration::ZERO;
        Ok(())
    }

    /// Applies a uniform random permutation and repositions every stick.
    pub fn shuffle_sticks(&mut self) -> Result<()> {
        self.shared.lock_board()?.shuffle(&mut self.rng);
        Ok(())
    }

    /// Starts `algorithm` on a background worker with fresh counters and
    /// idle colours. Rejected while another sort is running.
    pub fn sort_elements(&mut self, algorithm: SortAlgorithm) -> Result<()> {
        if !self.initialized {
            return Err(SortVizError::NotInitialized);
        }
        if let Some(worker) = &self.worker {
            let running = worker.recorder.algorithm();
            tracing::warn!(requested = %algorithm, %running, "sort already in progress");
            return Err(SortVizError::SortInProgress(running));
        }

        self.reset_run_state()?;
        self.algorithm = Some(algorithm);
        self.step_delay = self.config.delays.step_for(algorithm);
        self.last_report = None;
        self.shared.flag.start();

        let shared = self.shared.clone();
        let audio = self.audio.clone();
        let step = StepPacer::new(self.step_delay);
        let sweep = StepPacer::new(self.config.delays.completion_sweep());
        let spawned = thread::Builder::new()
            .name(format!("sort-{algorithm:?}").to_lowercase())
            .spawn(move || {
                let run = SortRun::new(&shared, audio.as_ref(), step, sweep)?;
                sort::execute(&run, algorithm)
            });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(err) => {
                self.shared.flag.cancel();
                return Err(err.into());
            }
        };

        tracing::info!(%algorithm, delay_ms = self.step_delay.as_millis() as u64, "sort started");
        self.worker = Some(Worker {
            handle,
            recorder: RunRecorder::start(algorithm),
        });
        Ok(())
    }

    /// Per-frame bookkeeping: once the worker has exited it is joined, the
    /// run state returns to idle and a report is recorded.
    pub fn update(&mut self) -> Result<()> {
        let finished = self
            .worker
            .as_ref()
            .map(|worker| worker.handle.is_finished())
            .unwrap_or(false);
        if finished {
            self.shared.flag.cancel();
            self.join_worker()?;
        }
        Ok(())
    }

    /// Draws every stick onto the canvas using the configured palette.
    pub fn render(&self, canvas: &mut dyn Canvas) -> Result<()> {
        let board = self.shared.lock_board()?;
        for stick in board.sticks() {
            let color = self.config.palette.color(stick.color());
            canvas.fill_rect(stick.view.position, stick.view.size, color);
        }
        Ok(())
    }

    /// Consistent copy of the sticks as they should be drawn right now.
    pub fn snapshot(&self) -> Result<Vec<StickSprite>> {
        let board = self.shared.lock_board()?;
        Ok(board
            .sticks()
            .iter()
            .map(|stick| StickSprite {
                value: stick.value,
                position: stick.view.position,
                size: stick.view.size,
                role: stick.color(),
                color: self.config.palette.color(stick.color()),
            })
            .collect())
    }

    pub fn values(&self) -> Result<Vec<u32>> {
        Ok(self.shared.lock_board()?.values())
    }

    pub fn is_sorted(&self) -> Result<bool> {
        Ok(self.shared.lock_board()?.is_sorted())
    }

    /// Cancels and joins the worker, then releases every stick. Safe to call
    /// more than once.
    pub fn destroy(&mut self) -> Result<()> {
        self.step_delay = Duration::ZERO;
        self.stop_worker()?;
        if self.initialized {
            self.shared.lock_board()?.clear();
            self.initialized = false;
            tracing::info!("stick collection destroyed");
        }
        Ok(())
    }

    pub fn sort_state(&self) -> SortState {
        self.shared.flag.state()
    }

    pub fn is_sorting(&self) -> bool {
        self.worker.is_some()
    }

    pub fn sort_algorithm(&self) -> Option<SortAlgorithm> {
        self.algorithm
    }

    pub fn number_of_comparisons(&self) -> u64 {
        self.shared.metrics.comparisons()
    }

    pub fn number_of_array_accesses(&self) -> u64 {
        self.shared.metrics.array_accesses()
    }

    /// Sticks on the board, or the configured count before the board exists.
    pub fn number_of_sticks(&self) -> Result<usize> {
        if !self.initialized {
            return Ok(self.config.number_of_elements);
        }
        Ok(self.shared.lock_board()?.len())
    }

    pub fn delay(&self) -> Duration {
        self.step_delay
    }

    /// Complexity class of the selected algorithm, empty before the first sort.
    pub fn time_complexity(&self) -> &'static str {
        self.algorithm
            .map(SortAlgorithm::time_complexity)
            .unwrap_or("")
    }

    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    pub fn last_outcome(&self) -> Option<SortOutcome> {
        self.last_report.as_ref().map(|report| report.outcome)
    }

    fn stop_worker(&mut self) -> Result<()> {
        self.shared.flag.cancel();
        self.join_worker()
    }

    fn join_worker(&mut self) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        let outcome = worker
            .handle
            .join()
            .map_err(|_| SortVizError::WorkerPanicked)??;
        let elements = self.shared.lock_board()?.len();
        let report = worker
            .recorder
            .finish(outcome, &self.shared.metrics, elements);
        tracing::info!(
            algorithm = %report.algorithm,
            outcome = ?report.outcome,
            comparisons = report.comparisons,
            array_accesses = report.array_accesses,
            elapsed_ms = report.elapsed_ms as u64,
            "sort finished"
        );
        self.last_report = Some(report);
        Ok(())
    }
}

impl Drop for StickCollection {
    fn drop(&mut self) {
        if let Err(err) = self.destroy() {
            tracing::warn!(%err, "failed to tear down stick collection");
        }
    }
}

impl std::fmt::Debug for StickCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StickCollection")
            .field("elements", &self.number_of_sticks().ok())
            .field("state", &self.sort_state())
            .field("algorithm", &self.algorithm)
            .field("comparisons", &self.number_of_comparisons())
            .field("array_accesses", &self.number_of_array_accesses())
            .finish()
    }
}
