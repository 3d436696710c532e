//! Per-axis scaling state.
//!
//! [`AxisSet::recompute`] folds every chart's bounds and every area's
//! footprint into one `[min, max]` range per axis, then derives the grid
//! step, the rounded range and the side of the range the grid faces.

use std::ops::{Index, IndexMut};

use flyplot_chart::{AreaSpec, Axis, Chart3D};
use flyplot_core::math::{Extent, ceil_to_step};
use flyplot_core::profiling::profile_function;

use crate::label::{NameLabels, ValueLabels};

/// Grid steps are whole multiples of this.
pub const STEP_UNIT: f64 = 100.0;

/// Target number of grid divisions across an axis.
pub const DIVISIONS: f64 = 10.0;

/// Which end of an axis range the grid plane sits on.
///
/// `Positive` puts the plane normal to this axis at `min`, `Negative` at
/// `max`. The camera-facing correction flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Positive,
    Negative,
}

impl Direction {
    /// `+1.0` or `-1.0`.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Direction::Positive
    }
}

/// Of `max` and `min`, the one with the larger magnitude. Ties go to `max`.
pub fn abs_max(max: f64, min: f64) -> f64 {
    if min.abs() > max.abs() { min } else { max }
}

/// Of `max` and `min`, the one with the smaller magnitude. Ties go to `max`.
pub fn abs_min(max: f64, min: f64) -> f64 {
    if min.abs() < max.abs() { min } else { max }
}

/// The scalar part of an [`AxisState`], cheap to copy into placement code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFrame {
    pub min: f64,
    pub max: f64,
    pub size: f64,
    pub delta: f64,
    pub space: f64,
    pub amax: f64,
    pub amin: f64,
    pub direction: Direction,
}

impl AxisFrame {
    /// Build a frame for an already rounded range.
    ///
    /// The direction is negative when the smaller-magnitude end is `max`.
    pub fn from_range(min: f64, max: f64, space: f64) -> Self {
        let amax = abs_max(max, min);
        let amin = abs_min(max, min);
        Self {
            min,
            max,
            size: max - min,
            delta: (max + min) / 2.0,
            space,
            amax,
            amin,
            direction: if amin == max {
                Direction::Negative
            } else {
                Direction::Positive
            },
        }
    }

    /// `direction` as `+1.0` / `-1.0`.
    pub fn dir(&self) -> f64 {
        self.direction.sign()
    }

    /// The end of the range the grid plane normal to this axis sits on.
    pub fn plane_offset(&self) -> f64 {
        match self.direction {
            Direction::Positive => self.min,
            Direction::Negative => self.max,
        }
    }

    /// The end opposite [`AxisFrame::plane_offset`].
    pub fn far_end(&self) -> f64 {
        match self.direction {
            Direction::Positive => self.max,
            Direction::Negative => self.min,
        }
    }

    /// Number of grid lines across the range.
    pub fn tick_count(&self) -> usize {
        if self.space <= 0.0 {
            return 1;
        }
        (self.size / self.space).round().max(0.0) as usize + 1
    }
}

/// Range, grid step and label state for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisState {
    pub frame: AxisFrame,
    /// Tick value glyphs.
    pub values: ValueLabels,
    /// Axis name glyphs.
    pub names: NameLabels,
}

impl AxisState {
    /// Axis covering `[min, max]` with grid step `space`.
    pub fn new(min: f64, max: f64, space: f64) -> Self {
        Self {
            frame: AxisFrame::from_range(min, max, space),
            values: ValueLabels::for_step(space),
            names: NameLabels::default(),
        }
    }
}

/// The three axis states of a scene, indexed by [`Axis`].
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSet {
    axes: [AxisState; 3],
    default_step: f64,
}

impl Default for AxisSet {
    fn default() -> Self {
        Self::new(Extent::new(0.0, 1000.0), STEP_UNIT)
    }
}

impl AxisSet {
    /// Every axis covering `range` with grid step `step`. A step that is not
    /// a positive number falls back to [`STEP_UNIT`].
    pub fn new(range: Extent, step: f64) -> Self {
        let step = if step.is_finite() && step > 0.0 { step } else { STEP_UNIT };
        let axis = AxisState::new(range.min, range.max, step);
        Self {
            axes: [axis.clone(), axis.clone(), axis],
            default_step: step,
        }
    }

    /// Set the tilt of every label on every axis.
    pub fn with_label_angle(mut self, degrees: f64) -> Self {
        for axis in &mut self.axes {
            axis.values.angle = degrees;
            axis.names.angle = degrees;
        }
        self
    }

    /// Frames of all three axes in `x, y, z` order.
    pub fn frames(&self) -> [AxisFrame; 3] {
        [self.axes[0].frame, self.axes[1].frame, self.axes[2].frame]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, &AxisState)> {
        Axis::ALL.into_iter().zip(self.axes.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Axis, &mut AxisState)> {
        Axis::ALL.into_iter().zip(self.axes.iter_mut())
    }

    /// Smallest grid step over the three axes.
    pub fn min_space(&self) -> f64 {
        self.axes.iter().map(|a| a.frame.space).fold(f64::INFINITY, f64::min)
    }

    /// Rebuild ranges from the full chart and area set.
    ///
    /// Each axis starts from `[0, 0]`, so the origin is always inside the
    /// grid. An axis with nothing on it keeps the default step. Label glyph
    /// sizes follow the smallest step, so text has one scale across axes.
    pub fn recompute<'a, C, A>(&mut self, charts: C, areas: A)
    where
        C: IntoIterator<Item = &'a Chart3D>,
        A: IntoIterator<Item = &'a AreaSpec>,
    {
        profile_function!();

        let mut bounds = [Extent::new(0.0, 0.0); 3];
        for chart in charts {
            for (extent, info) in bounds.iter_mut().zip(&chart.axes) {
                extent.merge(&info.extent());
            }
        }
        for area in areas {
            for axis in Axis::ALL {
                bounds[axis.index()].merge(&area.footprint(axis));
            }
        }

        let spaces = bounds.map(|b| {
            let span = b.span();
            if span == 0.0 {
                self.default_step
            } else {
                (span / DIVISIONS / STEP_UNIT).ceil() * STEP_UNIT
            }
        });

        for ((axis, state), (bound, space)) in self.iter_mut().zip(bounds.into_iter().zip(spaces)) {
            let min = ceil_to_step(bound.min, space);
            let max = ceil_to_step(bound.max, space);
            state.frame = AxisFrame::from_range(min, max, space);
            tracing::debug!(
                "Axis {}: data [{}, {}] -> grid [{}, {}] step {} ({:?})",
                axis,
                bound.min,
                bound.max,
                min,
                max,
                space,
                state.frame.direction
            );
        }

        let min_space = self.min_space();
        for (_, state) in self.iter_mut() {
            state.values.resize_for(min_space);
            state.names.resize_for(min_space);
        }
    }
}

impl Index<Axis> for AxisSet {
    type Output = AxisState;

    fn index(&self, axis: Axis) -> &AxisState {
        &self.axes[axis.index()]
    }
}

impl IndexMut<Axis> for AxisSet {
    fn index_mut(&mut self, axis: Axis) -> &mut AxisState {
        &mut self.axes[axis.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyplot_chart::{AxisInfo, ChartSource};
    use flyplot_core::math::DVec3;

    fn chart(bounds: [(f64, f64); 3]) -> Chart3D {
        Chart3D {
            source: ChartSource::new("/t/c.txt"),
            name: String::new(),
            axes: bounds.map(|(min, max)| AxisInfo {
                min,
                max,
                ..Default::default()
            }),
            times: vec![],
            coords: vec![],
            cube: vec![],
            areas: vec![],
        }
    }

    #[test]
    fn test_abs_min_max() {
        assert_eq!(abs_max(200.0, -500.0), -500.0);
        assert_eq!(abs_min(200.0, -500.0), 200.0);
        assert_eq!(abs_max(500.0, -500.0), 500.0);
        assert_eq!(abs_min(500.0, -500.0), 500.0);
    }

    #[test]
    fn test_defaults() {
        let axes = AxisSet::default();
        for (_, state) in axes.iter() {
            assert_eq!((state.frame.min, state.frame.max), (0.0, 1000.0));
            assert_eq!(state.frame.space, 100.0);
            assert_eq!(state.frame.delta, 500.0);
            assert_eq!(state.frame.direction, Direction::Positive);
            assert_eq!(state.values.size, 60.0);
            assert_eq!(state.values.offset, 40.0);
            assert_eq!(state.names.size, 100.0);
            assert_eq!(state.names.offset, 200.0);
            assert_eq!(state.names.step, 100.0);
        }
    }

    #[test]
    fn test_empty_keeps_default_step() {
        let mut axes = AxisSet::default();
        axes.recompute([], []);
        for (_, state) in axes.iter() {
            assert_eq!(state.frame.space, 100.0);
            assert_eq!((state.frame.min, state.frame.max), (0.0, 0.0));
            assert_eq!(state.frame.direction, Direction::Negative);
        }
    }

    #[test]
    fn test_zero_step_falls_back_to_unit() {
        for step in [0.0, -50.0, f64::NAN] {
            let mut axes = AxisSet::new(Extent::new(0.0, 1000.0), step);
            assert_eq!(axes[Axis::X].frame.space, STEP_UNIT);
            axes.recompute([], []);
            for (_, state) in axes.iter() {
                assert_eq!(state.frame.space, STEP_UNIT);
                assert!(state.frame.max.is_finite() && state.frame.min.is_finite());
            }
        }
    }

    #[test]
    fn test_negative_range_direction() {
        let mut axes = AxisSet::default();
        let c = chart([(-480.0, 150.0), (0.0, 2500.0), (-900.0, -100.0)]);
        axes.recompute([&c], []);

        let x = axes[Axis::X].frame;
        assert_eq!(x.space, 100.0);
        assert_eq!((x.min, x.max), (-500.0, 200.0));
        assert_eq!((x.amax, x.amin), (-500.0, 200.0));
        assert_eq!(x.direction, Direction::Negative);
        assert_eq!(x.plane_offset(), 200.0);

        let y = axes[Axis::Y].frame;
        assert_eq!(y.space, 300.0);
        assert_eq!((y.min, y.max), (0.0, 2700.0));
        assert_eq!(y.direction, Direction::Positive);

        // accumulator starts at zero, so z reaches up to the origin
        let z = axes[Axis::Z].frame;
        assert_eq!((z.min, z.max), (-900.0, 0.0));
        assert_eq!(z.direction, Direction::Negative);
    }

    #[test]
    fn test_label_sizes_follow_min_space() {
        let mut axes = AxisSet::default();
        let c = chart([(0.0, 5000.0), (0.0, 900.0), (0.0, 3000.0)]);
        axes.recompute([&c], []);
        assert_eq!(axes.min_space(), 100.0);
        for (_, state) in axes.iter() {
            assert_eq!(state.values.size, 60.0);
            assert_eq!(state.names.offset, 200.0);
        }
        assert_eq!(axes[Axis::X].frame.space, 500.0);
    }

    #[test]
    fn test_area_only_bounds() {
        let mut axes = AxisSet::default();
        let area = AreaSpec::new(DVec3::new(5.0, 5.0, 0.0), 10.0);
        axes.recompute([], [&area]);
        let x = axes[Axis::X].frame;
        assert_eq!((x.min, x.max), (-100.0, 100.0));
        assert_ne!((x.min, x.max), (0.0, 0.0));
    }

    #[test]
    fn test_tick_count() {
        assert_eq!(AxisFrame::from_range(-500.0, 200.0, 100.0).tick_count(), 8);
        assert_eq!(AxisFrame::from_range(0.0, 0.0, 100.0).tick_count(), 1);
    }
}
