use super::SortRun;
use crate::{ColorRole, Result};

pub(super) fn sort_in_place(run: &SortRun<'_>) -> Result<()> {
    if run.len() > 1 {
        in_place_sort(run, 0, run.len() - 1)?;
    }
    Ok(())
}

pub(super) fn sort_buffered(run: &SortRun<'_>) -> Result<()> {
    if run.len() > 1 {
        buffered_sort(run, 0, run.len() - 1)?;
    }
    Ok(())
}

fn in_place_sort(run: &SortRun<'_>, left: usize, right: usize) -> Result<()> {
    if left >= right || run.cancelled() {
        return Ok(());
    }
    let mid = left + (right - left) / 2;
    in_place_sort(run, left, mid)?;
    in_place_sort(run, mid + 1, right)?;
    in_place_merge(run, left, mid, right)
}

/// Merges `[left, mid]` with `[mid + 1, right]` without auxiliary storage:
/// every out-of-order stick from the right half is rotated into place, which
/// costs two accesses per shifted slot.
fn in_place_merge(run: &SortRun<'_>, mut left: usize, mut mid: usize, right: usize) -> Result<()> {
    let mut start2 = mid + 1;

    run.count_comparison(2);
    if run.value(mid)? <= run.value(start2)? {
        return Ok(());
    }

    while left <= mid && start2 <= right {
        if run.cancelled() {
            break;
        }

        run.count_comparison(2);
        {
            let mut board = run.board()?;
            if board.value(left) > board.value(start2) {
                board.rotate_right(left..=start2);
                run.count_accesses(2 * (start2 - left) as u64 + 1);
                mid += 1;
                start2 += 1;
            }
            left += 1;
            board.paint(left - 1, ColorRole::Processing);
        }

        run.cue();
        let resumed = run.pause();
        run.paint(&[left - 1], ColorRole::Idle)?;
        if !resumed {
            break;
        }
    }

    Ok(())
}

fn buffered_sort(run: &SortRun<'_>, left: usize, right: usize) -> Result<()> {
    if left >= right || run.cancelled() {
        return Ok(());
    }
    let mid = left + (right - left) / 2;
    buffered_sort(run, left, mid)?;
    buffered_sort(run, mid + 1, right)?;
    buffered_merge(run, left, mid, right)
}

/// Copies `[left, right]` into a buffer, then writes the two halves back in
/// order. A cancelled merge still writes every buffered stick back so the
/// board never loses or duplicates an element.
fn buffered_merge(run: &SortRun<'_>, left: usize, mid: usize, right: usize) -> Result<()> {
    if run.cancelled() {
        return Ok(());
    }

    let buffer = {
        let mut board = run.board()?;
        for index in left..=right {
            board.paint(index, ColorRole::TemporaryHighlight);
        }
        board.clone_range(left..=right)
    };
    run.count_accesses(buffer.len() as u64);
    if !run.pause() {
        let mut board = run.board()?;
        for index in left..=right {
            board.paint(index, ColorRole::Idle);
        }
        return Ok(());
    }

    let split = mid - left + 1;
    let (mut i, mut j) = (0, split);
    let mut flushing = false;
    for slot in left..=right {
        let take_left = if i < split && j < buffer.len() {
            run.count_comparison(2);
            buffer[i].value <= buffer[j].value
        } else {
            i < split
        };
        let stick = if take_left {
            i += 1;
            buffer[i - 1].clone()
        } else {
            j += 1;
            buffer[j - 1].clone()
        };
        run.count_accesses(1);

        flushing = flushing || run.cancelled();
        {
            let mut board = run.board()?;
            board.place(slot, stick);
            let role = if flushing {
                ColorRole::Idle
            } else {
                ColorRole::Processing
            };
            board.paint(slot, role);
        }

        if !flushing {
            run.cue();
            flushing = !run.pause();
            run.paint(&[slot], ColorRole::Idle)?;
        }
    }

    Ok(())
}
