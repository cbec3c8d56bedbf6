use std::{thread, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{ColorRole, Result, Rgba, StickCollection, Vec2};

/// Anything that can report the size of the surface sticks are laid out on.
pub trait Viewport {
    fn size(&self) -> Vec2;
}

/// Rectangle drawing backend. Windowing libraries, terminals and tests plug
/// in here.
pub trait Canvas: Viewport {
    /// Called once at the start of every frame.
    fn clear(&mut self) {}

    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Rgba);
}

/// Drawable copy of a single stick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickSprite {
    pub value: u32,
    pub position: Vec2,
    pub size: Vec2,
    pub role: ColorRole,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnRect {
    pub position: Vec2,
    pub size: Vec2,
    pub color: Rgba,
}

/// In-memory canvas that keeps the rectangles of the most recent frame.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    size: Vec2,
    rects: Vec<DrawnRect>,
    frames: u64,
}

impl RecordingCanvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            rects: Vec::new(),
            frames: 0,
        }
    }

    pub fn rects(&self) -> &[DrawnRect] {
        &self.rects
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Viewport for RecordingCanvas {
    fn size(&self) -> Vec2 {
        self.size
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.rects.clear();
        self.frames += 1;
    }

    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Rgba) {
        self.rects.push(DrawnRect {
            position,
            size,
            color,
        });
    }
}

/// Fixed-rate update/render cycle. The loop never blocks on the sort worker;
/// it samples whatever state the board holds when the frame starts.
#[derive(Debug, Clone, Copy)]
pub struct FrameLoop {
    frame_interval: Duration,
    max_frames: Option<u64>,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::with_fps(60)
    }
}

impl FrameLoop {
    pub fn with_fps(fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            frame_interval: Duration::from_secs(1) / fps,
            max_frames: None,
        }
    }

    pub fn max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Renders a single frame.
    pub fn frame(&self, collection: &mut StickCollection, canvas: &mut dyn Canvas) -> Result<()> {
        collection.update()?;
        canvas.clear();
        collection.render(canvas)
    }

    /// Runs frames until the collection has no active sort or the frame cap
    /// is reached. Returns the number of frames rendered.
    pub fn run_until_idle(
        &self,
        collection: &mut StickCollection,
        canvas: &mut dyn Canvas,
    ) -> Result<u64> {
        let mut frames = 0;
        loop {
            self.frame(collection, canvas)?;
            frames += 1;

            if !collection.is_sorting() {
                break;
            }
            if self.max_frames.is_some_and(|max| frames >= max) {
                tracing::debug!(frames, "frame cap reached with sort still running");
                break;
            }
            thread::sleep(self.frame_interval);
        }
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{CollectionConfig, DelayConfig, SilentSound, SortAlgorithm, SortOutcome};

    fn collection(delays: DelayConfig) -> (StickCollection, RecordingCanvas) {
        let config = CollectionConfig {
            number_of_elements: 16,
            delays,
            ..Default::default()
        };
        let canvas = RecordingCanvas::new(Vec2::new(800.0, 600.0));
        let mut collection = StickCollection::with_seed(config, Arc::new(SilentSound), 9);
        collection.initialize(&canvas).unwrap();
        (collection, canvas)
    }

    #[test]
    fn runs_until_the_sort_finishes() {
        let (mut collection, mut canvas) = collection(DelayConfig::instant());
        collection.sort_elements(SortAlgorithm::Merge).unwrap();

        let frames = FrameLoop::with_fps(500)
            .run_until_idle(&mut collection, &mut canvas)
            .unwrap();

        assert!(frames >= 1);
        assert_eq!(canvas.frames(), frames);
        assert_eq!(canvas.rects().len(), 16);
        assert_eq!(collection.last_outcome(), Some(SortOutcome::Completed));
        let placed = collection.config().palette.placed;
        assert!(canvas.rects().iter().all(|rect| rect.color == placed));
    }

    #[test]
    fn frame_cap_stops_a_slow_sort() {
        let delays = DelayConfig {
            bubble_ms: 50,
            ..DelayConfig::instant()
        };
        let (mut collection, mut canvas) = collection(delays);
        collection.sort_elements(SortAlgorithm::Bubble).unwrap();

        let frames = FrameLoop::with_fps(1000)
            .max_frames(3)
            .run_until_idle(&mut collection, &mut canvas)
            .unwrap();

        assert_eq!(frames, 3);
        assert!(collection.is_sorting());
        collection.reset().unwrap();
        assert!(!collection.is_sorting());
    }

    #[test]
    fn sprites_sit_on_the_baseline() {
        let (collection, _) = collection(DelayConfig::instant());
        let baseline = collection.config().element_y_position;
        for sprite in collection.snapshot().unwrap() {
            assert!((sprite.position.y + sprite.size.y - baseline).abs() < 1e-3);
            assert_eq!(sprite.role, ColorRole::Idle);
        }
    }
}
