use std::ops::RangeInclusive;

use rand::{seq::SliceRandom, Rng};

use crate::{
    layout::{self, StickLayout},
    CollectionConfig, ColorRole, Result, Stick,
};

/// The ordered sticks plus the geometry used to place them. Every reordering
/// goes through a method that repositions afterwards.
#[derive(Debug, Clone, Default)]
pub struct Board {
    sticks: Vec<Stick>,
    layout: Option<StickLayout>,
}

impl Board {
    pub fn new(sticks: Vec<Stick>, layout: StickLayout) -> Self {
        let mut board = Self {
            sticks,
            layout: Some(layout),
        };
        board.reposition();
        board
    }

    pub fn len(&self) -> usize {
        self.sticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sticks.is_empty()
    }

    pub fn sticks(&self) -> &[Stick] {
        &self.sticks
    }

    pub fn layout(&self) -> Option<&StickLayout> {
        self.layout.as_ref()
    }

    pub fn value(&self, index: usize) -> u32 {
        self.sticks[index].value
    }

    pub fn values(&self) -> Vec<u32> {
        self.sticks.iter().map(|stick| stick.value).collect()
    }

    pub fn is_sorted(&self) -> bool {
        self.sticks.windows(2).all(|pair| pair[0].value <= pair[1].value)
    }

    pub fn paint(&mut self, index: usize, role: ColorRole) {
        self.sticks[index].paint(role);
    }

    pub fn paint_all(&mut self, role: ColorRole) {
        for stick in &mut self.sticks {
            stick.paint(role);
        }
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.sticks.swap(a, b);
        self.reposition();
    }

    /// Moves the stick at the end of `range` to its start, shifting the rest
    /// one slot to the right.
    pub fn rotate_right(&mut self, range: RangeInclusive<usize>) {
        self.sticks[range].rotate_right(1);
        self.reposition();
    }

    pub fn clone_range(&self, range: RangeInclusive<usize>) -> Vec<Stick> {
        self.sticks[range].to_vec()
    }

    /// Puts `stick` at `index`, replacing whatever occupied it.
    pub fn place(&mut self, index: usize, stick: Stick) {
        self.sticks[index] = stick;
        self.reposition();
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.sticks.shuffle(rng);
        self.reposition();
    }

    pub fn reposition(&mut self) {
        if let Some(layout) = &self.layout {
            layout::reposition_all(&mut self.sticks, layout);
        }
    }

    pub fn clear(&mut self) {
        self.sticks.clear();
        self.layout = None;
    }

    /// Builds a board holding one stick per value. Heights scale with the
    /// value so the largest one reaches the configured maximum.
    pub fn from_values(
        values: &[u32],
        config: &CollectionConfig,
        viewport_width: f32,
    ) -> Result<Self> {
        let config = CollectionConfig {
            number_of_elements: values.len(),
            ..config.clone()
        };
        let layout = StickLayout::for_viewport(&config, viewport_width)?;
        let max_value = values.iter().copied().max().unwrap_or(0);
        let sticks = values
            .iter()
            .map(|value| {
                let height = layout::height_for_value(*value, max_value, layout.max_height);
                Stick::new(*value, layout.size_for(height))
            })
            .collect();
        Ok(Self::new(sticks, layout))
    }
}
