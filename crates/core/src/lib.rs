//! Core library for the Sorting Sticks visualiser.
//!
//! A [`StickCollection`] owns a row of value-bearing bars and animates a
//! classic sorting algorithm over them on a background worker. The worker
//! mutates the shared board one step at a time, pausing between steps, while
//! a separate [`FrameLoop`] samples and draws the board every frame.
//! Windowing, drawing and sound playback stay outside the crate behind the
//! [`Canvas`], [`Viewport`] and [`SoundService`] traits.

pub mod audio;
pub mod collection;
pub mod config;
pub mod error;
pub mod layout;
pub mod pacing;
pub mod record;
pub mod render;
pub mod sort;
pub mod stick;

pub use audio::{CueRecorder, SilentSound, SoundCue, SoundService, TracingSound};
pub use collection::{Board, StickCollection};
pub use config::{AppConfig, CollectionConfig, DelayConfig, Palette, Rgba, WindowConfig};
pub use error::{Result, SortVizError};
pub use layout::StickLayout;
pub use pacing::{RunFlag, SortState, StepPacer};
pub use record::{RunRecorder, RunReport, SortMetrics};
pub use render::{Canvas, DrawnRect, FrameLoop, RecordingCanvas, StickSprite, Viewport};
pub use sort::{SortAlgorithm, SortOutcome};
pub use stick::{ColorRole, Stick, StickView, Vec2};
