//! Instrumented, interruptible sorting algorithms.
//!
//! Every algorithm works in place on the shared [`Board`], takes the board
//! lock only for the duration of a single mutation, and sleeps between
//! visual steps with the lock released so the presentation loop can render.
//! Cancellation is observed at every loop boundary through the shared
//! [`RunFlag`].

mod bubble;
mod completion;
mod insertion;
mod merge;
mod selection;

use std::{fmt, sync::MutexGuard};

use serde::{Deserialize, Serialize};

use crate::{
    collection::{Board, Shared},
    ColorRole, Result, SoundCue, SoundService, StepPacer,
};

/// Algorithms the collection knows how to animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Selection,
    /// Merge sort that shifts sticks by rotation instead of using a buffer.
    InPlaceMerge,
    /// Merge sort that copies both halves into a temporary buffer.
    Merge,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Selection,
        SortAlgorithm::InPlaceMerge,
        SortAlgorithm::Merge,
    ];

    pub fn time_complexity(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble | SortAlgorithm::Insertion | SortAlgorithm::Selection => "O(n^2)",
            SortAlgorithm::InPlaceMerge | SortAlgorithm::Merge => "O(n log n)",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::InPlaceMerge => "In-Place Merge Sort",
            SortAlgorithm::Merge => "Merge Sort",
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a sort worker ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOutcome {
    /// The algorithm finished and the completion sweep marked every stick.
    Completed,
    /// The run flag was cleared before the sweep could finish.
    Cancelled,
}

/// Everything an algorithm needs for one run.
pub(crate) struct SortRun<'a> {
    shared: &'a Shared,
    audio: &'a dyn SoundService,
    step: StepPacer,
    sweep: StepPacer,
    len: usize,
}

impl<'a> SortRun<'a> {
    pub(crate) fn new(
        shared: &'a Shared,
        audio: &'a dyn SoundService,
        step: StepPacer,
        sweep: StepPacer,
    ) -> Result<Self> {
        let len = shared.lock_board()?.len();
        Ok(Self {
            shared,
            audio,
            step,
            sweep,
            len,
        })
    }

    fn len(&self) -> usize {
        self.len
    }

    fn cancelled(&self) -> bool {
        !self.shared.flag.is_sorting()
    }

    fn board(&self) -> Result<MutexGuard<'a, Board>> {
        self.shared.lock_board()
    }

    fn value(&self, index: usize) -> Result<u32> {
        Ok(self.board()?.value(index))
    }

    fn paint(&self, indices: &[usize], role: ColorRole) -> Result<()> {
        let mut board = self.board()?;
        for index in indices {
            board.paint(*index, role);
        }
        Ok(())
    }

    /// Counts one comparison that read `accesses` sticks.
    fn count_comparison(&self, accesses: u64) {
        self.shared.metrics.record_comparison();
        self.shared.metrics.record_accesses(accesses);
    }

    fn count_accesses(&self, accesses: u64) {
        self.shared.metrics.record_accesses(accesses);
    }

    fn cue(&self) {
        self.audio.play(SoundCue::Compare);
    }

    fn play(&self, cue: SoundCue) {
        self.audio.play(cue);
    }

    fn pause(&self) -> bool {
        self.step.wait(&self.shared.flag)
    }

    fn sweep_pause(&self) -> bool {
        self.sweep.wait(&self.shared.flag)
    }
}

/// Runs `algorithm` to completion or cancellation, followed by the
/// completion sweep when the body was not interrupted.
pub(crate) fn execute(run: &SortRun<'_>, algorithm: SortAlgorithm) -> Result<SortOutcome> {
    body(run, algorithm)?;
    if run.cancelled() {
        return Ok(SortOutcome::Cancelled);
    }
    completion::sweep(run)
}

fn body(run: &SortRun<'_>, algorithm: SortAlgorithm) -> Result<()> {
    match algorithm {
        SortAlgorithm::Bubble => bubble::sort(run),
        SortAlgorithm::Insertion => insertion::sort(run),
        SortAlgorithm::Selection => selection::sort(run),
        SortAlgorithm::InPlaceMerge => merge::sort_in_place(run),
        SortAlgorithm::Merge => merge::sort_buffered(run),
    }
}


#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::test_support::{run_cancelled_at, run_to_end, watch_body};
    use super::*;

    fn positions(frame: &[ColorRole], role: ColorRole) -> Vec<usize> {
        frame
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == role)
            .map(|(i, _)| i)
            .collect()
    }

    fn sorted_copy(values: &[u32]) -> Vec<u32> {
        let mut expected = values.to_vec();
        expected.sort_unstable();
        expected
    }

    #[test]
    fn every_algorithm_sorts_and_completes() {
        let input = [9, 3, 7, 1, 8, 2, 2, 6, 0, 5];
        for algorithm in SortAlgorithm::ALL {
            let finished = run_to_end(algorithm, &input);
            assert_eq!(finished.values, sorted_copy(&input), "{algorithm}");
            assert_eq!(finished.outcome, SortOutcome::Completed, "{algorithm}");
            assert!(
                finished.colors.iter().all(|c| *c == ColorRole::Placed),
                "{algorithm} should leave every stick placed"
            );
            assert_eq!(finished.cues.count(SoundCue::Completion), 1);
            assert!(finished.cues.count(SoundCue::Compare) >= input.len());
        }
    }

    #[test]
    fn bubble_sort_scenario_with_duplicates() {
        let finished = run_to_end(SortAlgorithm::Bubble, &[3, 1, 4, 1, 5]);
        assert_eq!(finished.values, vec![1, 1, 3, 4, 5]);
        // Passes of 4, 3 and 2 comparisons; the third performs no swap.
        assert_eq!(finished.comparisons, 9);
        assert!(finished.accesses > finished.comparisons);
    }

    #[test]
    fn bubble_sort_exits_after_one_clean_pass() {
        let finished = run_to_end(SortAlgorithm::Bubble, &[0, 1, 2, 3, 4, 5]);
        assert_eq!(finished.comparisons, 5);
        assert_eq!(finished.accesses, 10);
    }

    #[test]
    fn favourable_input_never_costs_more_comparisons() {
        let sorted: Vec<u32> = (0..12).collect();
        let reversed: Vec<u32> = (0..12).rev().collect();
        for algorithm in [
            SortAlgorithm::Bubble,
            SortAlgorithm::Insertion,
            SortAlgorithm::Selection,
        ] {
            let best = run_to_end(algorithm, &sorted).comparisons;
            let worst = run_to_end(algorithm, &reversed).comparisons;
            assert!(best <= worst, "{algorithm}: {best} > {worst}");
        }
        assert_eq!(run_to_end(SortAlgorithm::Insertion, &sorted).comparisons, 11);
        assert_eq!(run_to_end(SortAlgorithm::Selection, &reversed).comparisons, 66);
    }

    #[test]
    fn buffered_merge_touches_every_element_twice() {
        let finished = run_to_end(SortAlgorithm::Merge, &[5, 4, 3, 2, 1]);
        assert_eq!(finished.values, vec![1, 2, 3, 4, 5]);
        assert!(finished.accesses >= 2 * 5);
        assert!(finished.comparisons > 0);
    }

    #[test]
    fn in_place_merge_counts_shifts() {
        let finished = run_to_end(SortAlgorithm::InPlaceMerge, &[2, 1]);
        assert_eq!(finished.values, vec![1, 2]);
        // Early check + loop comparison (2 accesses each) + one shift (2) + placement (1).
        assert_eq!(finished.comparisons, 2);
        assert_eq!(finished.accesses, 7);
    }

    #[test]
    fn bubble_placed_suffix_only_grows() {
        let input: Vec<u32> = (0..10).rev().collect();
        let watched = watch_body(SortAlgorithm::Bubble, &input);
        let n = input.len();

        let mut previous = 0;
        for frame in &watched.frames {
            let placed = positions(frame, ColorRole::Placed);
            assert!(placed.iter().all(|i| *i >= n - placed.len()), "{frame:?}");
            assert!(placed.len() >= previous);
            previous = placed.len();
        }
        assert!(previous > 0);
        assert_eq!(watched.values, (0..10).collect::<Vec<u32>>());
    }

    #[test]
    fn selection_keeps_a_single_candidate() {
        let input = [4, 7, 3, 9, 1, 8, 0, 6, 2, 5];
        let watched = watch_body(SortAlgorithm::Selection, &input);

        let mut previous = 0;
        for frame in &watched.frames {
            assert!(positions(frame, ColorRole::TemporaryHighlight).len() <= 1, "{frame:?}");
            let placed = positions(frame, ColorRole::Placed);
            assert!(placed.iter().all(|i| *i < placed.len()), "{frame:?}");
            assert!(placed.len() >= previous);
            previous = placed.len();
        }
        assert!(watched.colors.iter().all(|c| *c == ColorRole::Placed));
    }

    #[test]
    fn insertion_settles_keys_as_selected() {
        let watched = watch_body(SortAlgorithm::Insertion, &[3, 1, 2, 0]);
        assert_eq!(watched.values, vec![0, 1, 2, 3]);
        assert!(
            watched.colors.iter().all(|c| *c == ColorRole::Selected),
            "{:?}",
            watched.colors
        );
        assert!(watched
            .frames
            .iter()
            .any(|frame| frame.contains(&ColorRole::TemporaryHighlight)));
    }

    #[test]
    fn buffered_merge_writes_back_over_highlighted_copies() {
        let watched = watch_body(SortAlgorithm::Merge, &[5, 4, 3, 2, 1]);
        assert_eq!(watched.values, vec![1, 2, 3, 4, 5]);
        assert!(!watched.frames.is_empty());

        for frame in &watched.frames {
            let processing = positions(frame, ColorRole::Processing);
            assert_eq!(processing.len(), 1, "{frame:?}");
            let pending = positions(frame, ColorRole::TemporaryHighlight);
            assert!(pending.iter().all(|i| *i > processing[0]), "{frame:?}");
        }
        assert!(watched
            .frames
            .iter()
            .any(|frame| frame.contains(&ColorRole::TemporaryHighlight)));
        assert!(watched.colors.iter().all(|c| *c == ColorRole::Idle));
    }

    #[test]
    fn interrupted_pause_skips_the_pending_swap() {
        let finished = run_cancelled_at(SortAlgorithm::Bubble, &[1, 0, 2], 1);
        assert_eq!(finished.outcome, SortOutcome::Cancelled);
        assert_eq!(finished.values, vec![1, 0, 2]);
        assert_eq!(finished.comparisons, 1);
        assert!(finished.colors.iter().all(|c| *c == ColorRole::Idle));
    }

    #[test]
    fn interrupted_selection_leaves_no_candidate_behind() {
        let finished = run_cancelled_at(SortAlgorithm::Selection, &[3, 2, 1, 0], 2);
        assert_eq!(finished.outcome, SortOutcome::Cancelled);
        assert_eq!(finished.values, vec![3, 2, 1, 0]);
        assert_eq!(finished.comparisons, 2);
        assert!(!finished.colors.contains(&ColorRole::Processing));
    }

    #[test]
    fn interrupted_buffered_merge_flushes_its_buffer() {
        let finished = run_cancelled_at(SortAlgorithm::Merge, &[5, 4, 3, 2, 1], 3);
        assert_eq!(finished.outcome, SortOutcome::Cancelled);
        assert_eq!(sorted_copy(&finished.values), vec![1, 2, 3, 4, 5]);
        assert!(finished.colors.iter().all(|c| *c == ColorRole::Idle));
        assert!(finished.values != vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn complexity_labels() {
        assert_eq!(SortAlgorithm::Bubble.time_complexity(), "O(n^2)");
        assert_eq!(SortAlgorithm::Selection.time_complexity(), "O(n^2)");
        assert_eq!(SortAlgorithm::Merge.time_complexity(), "O(n log n)");
        assert_eq!(SortAlgorithm::InPlaceMerge.time_complexity(), "O(n log n)");
        assert_eq!(SortAlgorithm::Insertion.to_string(), "Insertion Sort");
    }

    proptest! {
        #[test]
        fn algorithms_sort_arbitrary_input(values in prop::collection::vec(0u32..64, 2..40)) {
            let expected = sorted_copy(&values);
            for algorithm in SortAlgorithm::ALL {
                let finished = run_to_end(algorithm, &values);
                prop_assert_eq!(&finished.values, &expected);
                prop_assert_eq!(finished.outcome, SortOutcome::Completed);
            }
        }
    }
}
