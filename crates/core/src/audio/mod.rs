use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Cues emitted by the sort worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Played on every comparison, swap or placement.
    Compare,
    /// Played once the completion sweep has marked every stick.
    Completion,
}

/// Playback service the engine calls into. Implementations must be callable
/// from the sort worker thread and must not block for long.
pub trait SoundService: Send + Sync {
    fn play(&self, cue: SoundCue);
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSound;

impl SoundService for SilentSound {
    fn play(&self, _cue: SoundCue) {}
}

/// Emits every cue as a trace event, handy for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSound;

impl SoundService for TracingSound {
    fn play(&self, cue: SoundCue) {
        match cue {
            SoundCue::Compare => tracing::trace!(?cue, "sound cue"),
            SoundCue::Completion => tracing::info!(?cue, "sound cue"),
        }
    }
}

/// Keeps every cue it receives so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct CueRecorder {
    cues: Mutex<Vec<SoundCue>>,
}

impl CueRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the cues recorded so far.
    pub fn cues(&self) -> Vec<SoundCue> {
        self.cues
            .lock()
            .map(|cues| cues.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, cue: SoundCue) -> usize {
        self.cues
            .lock()
            .map(|cues| cues.iter().filter(|c| **c == cue).count())
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut cues) = self.cues.lock() {
            cues.clear();
        }
    }
}

impl SoundService for CueRecorder {
    fn play(&self, cue: SoundCue) {
        if let Ok(mut cues) = self.cues.lock() {
            cues.push(cue);
        }
    }
}
