use crate::{CollectionConfig, Result, SortVizError, Stick, Vec2};

/// Geometry shared by every stick of a collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickLayout {
    pub stick_width: f32,
    pub spacing: f32,
    pub baseline_y: f32,
    pub max_height: f32,
}

impl StickLayout {
    /// Derives the layout for the configured element count on a viewport of
    /// the given width.
    pub fn for_viewport(config: &CollectionConfig, viewport_width: f32) -> Result<Self> {
        let (stick_width, spacing) = compute_width(config, viewport_width)?;
        tracing::debug!(stick_width, spacing, viewport_width, "computed stick layout");
        Ok(Self {
            stick_width,
            spacing,
            baseline_y: config.element_y_position,
            max_height: config.max_element_height,
        })
    }

    pub fn size_for(&self, height: f32) -> Vec2 {
        Vec2::new(self.stick_width, height)
    }
}

/// Returns `(stick_width, spacing)`. The total gap is `space_percentage` of
/// the viewport, split across `N - 1` gaps; the rest is split across `N` sticks.
pub fn compute_width(config: &CollectionConfig, viewport_width: f32) -> Result<(f32, f32)> {
    config.validate()?;
    if !viewport_width.is_finite() || viewport_width <= 0.0 {
        return Err(SortVizError::invalid_config(format!(
            "viewport width must be positive, got {viewport_width}"
        )));
    }

    let count = config.number_of_elements as f32;
    let total_spacing = config.space_percentage * viewport_width;
    let spacing = total_spacing / (count - 1.0);
    let stick_width = (viewport_width - total_spacing) / count;
    Ok((stick_width, spacing))
}

/// Height of the stick created at `index`, strictly increasing with the index.
pub fn compute_height(index: usize, count: usize, max_height: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    (index + 1) as f32 / count as f32 * max_height
}

/// Height for an arbitrary value, scaled so the largest value reaches
/// `max_height`. Matches [`compute_height`] when values are `0..count`.
pub fn height_for_value(value: u32, max_value: u32, max_height: f32) -> f32 {
    (value as f32 + 1.0) / (max_value as f32 + 1.0) * max_height
}

/// Places every stick left to right in its current order, resting on the
/// baseline.
pub fn reposition_all(sticks: &mut [Stick], layout: &StickLayout) {
    for (index, stick) in sticks.iter_mut().enumerate() {
        let x = index as f32 * (stick.view.size.x + layout.spacing);
        let y = layout.baseline_y - stick.view.size.y;
        stick.view.position = Vec2::new(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(count: usize) -> CollectionConfig {
        CollectionConfig {
            number_of_elements: count,
            space_percentage: 0.1,
            max_element_height: 100.0,
            element_y_position: 200.0,
            ..Default::default()
        }
    }

    #[test]
    fn width_and_spacing_fill_the_viewport() {
        let (width, spacing) = compute_width(&config(10), 1000.0).unwrap();
        assert!((spacing - 100.0 / 9.0).abs() < 1e-4);
        assert!((width - 90.0).abs() < 1e-4);
        let used = width * 10.0 + spacing * 9.0;
        assert!((used - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_counts_fail_fast() {
        assert!(matches!(
            compute_width(&config(1), 1000.0),
            Err(SortVizError::InvalidConfig(_))
        ));
        assert!(compute_width(&config(0), 1000.0).is_err());
        assert!(compute_width(&config(5), 0.0).is_err());
    }

    #[test]
    fn heights_increase_with_index() {
        let heights: Vec<f32> = (0..5).map(|i| compute_height(i, 5, 100.0)).collect();
        assert!(heights.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(heights[4], 100.0);
        assert_eq!(height_for_value(4, 4, 100.0), heights[4]);
        assert_eq!(height_for_value(0, 4, 100.0), heights[0]);
    }

    #[test]
    fn repositions_in_sequence_order() {
        let layout = StickLayout::for_viewport(&config(3), 300.0).unwrap();
        let mut sticks: Vec<Stick> = [30.0, 10.0, 20.0]
            .into_iter()
            .enumerate()
            .map(|(i, h)| Stick::new(i as u32, layout.size_for(h)))
            .collect();

        reposition_all(&mut sticks, &layout);

        let step = layout.stick_width + layout.spacing;
        for (i, stick) in sticks.iter().enumerate() {
            assert!((stick.view.position.x - i as f32 * step).abs() < 1e-4);
            assert_eq!(stick.view.position.y + stick.view.size.y, 200.0);
        }
    }
}
