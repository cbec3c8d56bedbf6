use super::{SortOutcome, SortRun};
use crate::{ColorRole, Result, SoundCue};

/// Resets every stick to idle, then marks them placed left to right. Only a
/// sweep that reaches the end uninterrupted counts as completed.
pub(super) fn sweep(run: &SortRun<'_>) -> Result<SortOutcome> {
    run.board()?.paint_all(ColorRole::Idle);

    for index in 0..run.len() {
        if run.cancelled() {
            return Ok(SortOutcome::Cancelled);
        }
        run.cue();
        run.paint(&[index], ColorRole::Placed)?;
        if !run.sweep_pause() {
            return Ok(SortOutcome::Cancelled);
        }
    }

    if run.cancelled() {
        return Ok(SortOutcome::Cancelled);
    }
    run.play(SoundCue::Completion);
    Ok(SortOutcome::Completed)
}
