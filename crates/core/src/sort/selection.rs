use super::SortRun;
use crate::{ColorRole, Result};

/// Scans the unsorted suffix for its minimum and swaps it into place.
pub(super) fn sort(run: &SortRun<'_>) -> Result<()> {
    let n = run.len();
    if n < 2 {
        return Ok(());
    }

    for i in 0..n - 1 {
        if run.cancelled() {
            break;
        }

        let mut min = i;
        run.paint(&[i], ColorRole::Selected)?;

        for j in i + 1..n {
            if run.cancelled() {
                break;
            }

            run.count_comparison(2);
            run.cue();
            run.paint(&[j], ColorRole::Processing)?;
            if !run.pause() {
                run.paint(&[j], ColorRole::Idle)?;
                break;
            }

            let mut board = run.board()?;
            if board.value(j) < board.value(min) {
                if min != i {
                    board.paint(min, ColorRole::Idle);
                }
                min = j;
                board.paint(min, ColorRole::TemporaryHighlight);
            } else {
                board.paint(j, ColorRole::Idle);
            }
        }

        if run.cancelled() {
            break;
        }

        run.count_accesses(3);
        let mut board = run.board()?;
        board.swap(min, i);
        if min != i {
            board.paint(min, ColorRole::Idle);
        }
        board.paint(i, ColorRole::Placed);
    }

    if !run.cancelled() {
        run.paint(&[n - 1], ColorRole::Placed)?;
    }
    Ok(())
}
