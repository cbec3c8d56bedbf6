use super::SortRun;
use crate::{ColorRole, Result};

/// Adjacent-swap passes over a shrinking unsorted prefix. Stops after the
/// first pass that performs no swap.
pub(super) fn sort(run: &SortRun<'_>) -> Result<()> {
    let n = run.len();

    for pass in 0..n {
        if run.cancelled() {
            break;
        }

        let mut swapped = false;
        for j in 1..n - pass {
            if run.cancelled() {
                break;
            }

            run.count_comparison(2);
            run.cue();
            run.paint(&[j - 1, j], ColorRole::Processing)?;
            if !run.pause() {
                run.paint(&[j - 1, j], ColorRole::Idle)?;
                break;
            }

            {
                let mut board = run.board()?;
                if board.value(j - 1) > board.value(j) {
                    board.swap(j - 1, j);
                    swapped = true;
                }
                board.paint(j - 1, ColorRole::Idle);
                board.paint(j, ColorRole::Idle);
            }
        }

        if run.cancelled() {
            break;
        }
        run.paint(&[n - pass - 1], ColorRole::Placed)?;
        if !swapped {
            break;
        }
    }

    Ok(())
}
