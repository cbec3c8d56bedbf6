use super::SortRun;
use crate::{ColorRole, Result};

/// Shift-based insertion. The key travels left one slot per step while the
/// predecessors it passes move right.
pub(super) fn sort(run: &SortRun<'_>) -> Result<()> {
    for i in 1..run.len() {
        if run.cancelled() {
            break;
        }

        let key = run.value(i)?;
        run.count_accesses(1);
        run.paint(&[i], ColorRole::Processing)?;
        if !run.pause() {
            run.paint(&[i], ColorRole::Idle)?;
            break;
        }

        // Current slot of the key.
        let mut j = i;
        while j > 0 {
            if run.cancelled() {
                break;
            }

            run.count_comparison(1);
            {
                let mut board = run.board()?;
                if board.value(j - 1) <= key {
                    break;
                }
                board.swap(j - 1, j);
                board.paint(j, ColorRole::Processing);
            }
            run.count_accesses(1);
            j -= 1;

            run.cue();
            let resumed = run.pause();
            run.paint(&[j + 1], ColorRole::Selected)?;
            if !resumed {
                break;
            }
        }

        run.count_accesses(1);
        run.paint(&[j], ColorRole::TemporaryHighlight)?;
        run.cue();
        let resumed = run.pause();
        run.paint(&[j], ColorRole::Selected)?;
        if !resumed {
            break;
        }
    }

    Ok(())
}
