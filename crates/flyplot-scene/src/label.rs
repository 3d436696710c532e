//! Axis name and tick value glyphs.
//!
//! Every glyph transform is rebuilt from scratch out of the three
//! [`AxisFrame`]s and the glyph's measured size. Placing twice with the same
//! frames gives the same transforms.
//!
//! Each axis has its own recipe:
//! 1. move to a reference corner of the grid picked from the other two
//!    axes' directions,
//! 2. rotate about z, then x (and z again for the z axis names),
//! 3. push out from the grid edge by the configured offset plus half the
//!    glyph,
//! 4. stack successive glyphs by the grid step (ticks) or label step (names).

use flyplot_chart::Axis;
use flyplot_core::alloc::HashSet;
use flyplot_core::math::{DVec2, DVec3, round_to};

use crate::axis::{AxisFrame, AxisSet};
use crate::transform::{GlyphFrame, Transform3D};

/// Tilt applied to label text, in degrees.
pub const DEFAULT_LABEL_ANGLE: f64 = 15.0;

/// Measures rendered text.
pub trait TextMetrics {
    /// Width and height of `text` at font `size`, in scene units.
    fn measure(&self, text: &str, size: f64) -> DVec2;
}

/// Fixed-advance metrics: every character is `advance * size` wide and a
/// line is `line_height * size` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f64,
    pub line_height: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, size: f64) -> DVec2 {
        let chars = text.chars().count() as f64;
        DVec2::new(chars * self.advance * size, self.line_height * size)
    }
}

/// A text quad placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub text: String,
    /// Font size.
    pub size: f64,
    pub width: f64,
    pub height: f64,
    pub transform: Transform3D,
}

impl Glyph {
    /// Measure `text` and center it on the origin.
    pub fn new(text: impl Into<String>, size: f64, metrics: &dyn TextMetrics) -> Self {
        let text = text.into();
        let extent = metrics.measure(&text, size);
        let mut glyph = Self {
            text,
            size,
            width: extent.x,
            height: extent.y,
            transform: Transform3D::IDENTITY,
        };
        glyph.transform = glyph.frame().transform();
        glyph
    }

    /// A fresh frame for this glyph's size.
    pub fn frame(&self) -> GlyphFrame {
        GlyphFrame::new(self.width, self.height)
    }

    /// World position of the image corners: top-left, top-right,
    /// bottom-right, bottom-left.
    pub fn corners(&self) -> [DVec3; 4] {
        let (w, h) = (self.width, self.height);
        [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, w, 0.0),
            DVec3::new(h, w, 0.0),
            DVec3::new(h, 0.0, 0.0),
        ]
        .map(|p| self.transform.transform_point(p))
    }

    /// World position of the image center.
    pub fn center(&self) -> DVec3 {
        self.transform
            .transform_point(DVec3::new(self.height / 2.0, self.width / 2.0, 0.0))
    }
}

/// Tick text for a grid line value: rounded to two decimals, no trailing
/// zeros.
pub fn format_tick(value: f64) -> String {
    round_to(value, 2).to_string()
}

/// Tick value glyphs of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueLabels {
    pub size: f64,
    /// Gap between the grid edge and the text.
    pub offset: f64,
    pub angle: f64,
    pub glyphs: Vec<Glyph>,
}

impl ValueLabels {
    /// Geometry for a grid step of `step`.
    pub fn for_step(step: f64) -> Self {
        Self {
            size: 0.6 * step,
            offset: 0.4 * step,
            angle: DEFAULT_LABEL_ANGLE,
            glyphs: Vec::new(),
        }
    }

    pub fn resize_for(&mut self, min_space: f64) {
        self.size = 0.6 * min_space;
        self.offset = 0.4 * min_space;
    }

    /// Replace the glyphs with one per grid line of `frame`.
    pub fn regenerate(&mut self, frame: &AxisFrame, metrics: &dyn TextMetrics) {
        self.glyphs = (0..frame.tick_count())
            .map(|i| {
                let value = frame.min + i as f64 * frame.space;
                Glyph::new(format_tick(value), self.size, metrics)
            })
            .collect();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(|g| g.text.as_str())
    }
}

impl Default for ValueLabels {
    fn default() -> Self {
        Self::for_step(100.0)
    }
}

/// Axis name glyphs of one axis, one per distinct `"name, unit"` text.
#[derive(Debug, Clone, PartialEq)]
pub struct NameLabels {
    pub size: f64,
    /// Gap between the grid edge and the first name.
    pub offset: f64,
    /// Gap between stacked names.
    pub step: f64,
    pub angle: f64,
    pub glyphs: Vec<Glyph>,
    seen: HashSet<String>,
}

impl NameLabels {
    /// Geometry for a grid step of `step`.
    pub fn for_step(step: f64) -> Self {
        Self {
            size: step,
            offset: 2.0 * step,
            step,
            angle: DEFAULT_LABEL_ANGLE,
            glyphs: Vec::new(),
            seen: HashSet::default(),
        }
    }

    pub fn resize_for(&mut self, min_space: f64) {
        self.size = min_space;
        self.offset = 2.0 * min_space;
        self.step = min_space;
    }

    /// Add a name unless it is empty or already shown. Returns whether a
    /// glyph was added.
    pub fn add(&mut self, text: &str, metrics: &dyn TextMetrics) -> bool {
        if text.is_empty() || !self.seen.insert(text.to_string()) {
            return false;
        }
        self.glyphs.push(Glyph::new(text, self.size, metrics));
        true
    }

    /// Re-measure every glyph at the current size.
    pub fn remeasure(&mut self, metrics: &dyn TextMetrics) {
        for glyph in &mut self.glyphs {
            *glyph = Glyph::new(std::mem::take(&mut glyph.text), self.size, metrics);
        }
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
        self.seen.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(|g| g.text.as_str())
    }
}

impl Default for NameLabels {
    fn default() -> Self {
        Self::for_step(100.0)
    }
}

/// Where a group of glyphs starts and how it is turned.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    corner: DVec3,
    /// Applied in order; a zero angle is a no-op.
    rotations: [(f64, DVec3); 3],
}

impl Anchor {
    fn new(corner: DVec3, rz: f64, rx: f64) -> Self {
        Self {
            corner,
            rotations: [(rz, DVec3::Z), (rx, DVec3::X), (0.0, DVec3::Z)],
        }
    }

    fn frame(&self, glyph: &Glyph) -> GlyphFrame {
        let mut frame = glyph
            .frame()
            .translate(self.corner.x, self.corner.y, self.corner.z);
        for (degrees, axis) in self.rotations {
            frame = frame.rotate(degrees, axis);
        }
        frame
    }
}

fn flip_if(cond: bool) -> f64 {
    if cond { 180.0 } else { 0.0 }
}

fn name_anchor(axis: Axis, [x, y, z]: &[AxisFrame; 3]) -> Anchor {
    let rx_under = flip_if(!z.direction.is_positive());
    match axis {
        Axis::X => Anchor::new(
            DVec3::new(x.delta, y.far_end(), z.plane_offset()),
            flip_if(y.direction.is_positive()),
            rx_under,
        ),
        Axis::Y => Anchor::new(
            DVec3::new(x.far_end(), y.delta, z.plane_offset()),
            90.0 * x.dir(),
            rx_under,
        ),
        Axis::Z => {
            let mut anchor = Anchor::new(
                DVec3::new(x.far_end(), y.plane_offset(), z.delta),
                flip_if(y.direction.is_positive()),
                90.0,
            );
            anchor.rotations[2] = (-90.0 * x.dir() * z.dir() * y.dir(), DVec3::Z);
            anchor
        }
    }
}

fn value_anchor(axis: Axis, [x, y, z]: &[AxisFrame; 3]) -> Anchor {
    let rx_under = flip_if(!z.direction.is_positive());
    match axis {
        Axis::X => Anchor::new(
            DVec3::new(x.min, y.far_end(), z.plane_offset()),
            90.0 * x.dir(),
            rx_under,
        ),
        Axis::Y => Anchor::new(
            DVec3::new(x.far_end(), y.min, z.plane_offset()),
            flip_if(y.direction.is_positive()),
            rx_under,
        ),
        Axis::Z => Anchor::new(
            DVec3::new(x.far_end(), y.plane_offset(), z.min),
            flip_if(y.direction.is_positive()),
            90.0,
        ),
    }
}

/// Lay out the name glyphs of `axis`.
pub fn place_names(axis: Axis, frames: &[AxisFrame; 3], labels: &mut NameLabels) {
    let anchor = name_anchor(axis, frames);
    let zd = frames[Axis::Z.index()].dir();

    let mut across = labels.offset;
    for glyph in &mut labels.glyphs {
        across += glyph.height / 2.0;
        let frame = anchor
            .frame(glyph)
            .translate(0.0, -zd * glyph.height / 2.0, 0.0)
            .translate(0.0, -zd * across, 0.0);
        glyph.transform = frame.transform();
        across += labels.step;
        tracing::trace!("Name '{}' on {} at {}", glyph.text, axis, glyph.center());
    }
}

/// Lay out the tick value glyphs of `axis`.
pub fn place_values(axis: Axis, frames: &[AxisFrame; 3], labels: &mut ValueLabels) {
    let Some(last_height) = labels.glyphs.last().map(|g| g.height) else {
        return;
    };
    let anchor = value_anchor(axis, frames);
    let [x, y, z] = frames;
    let (xd, yd, zd) = (x.dir(), y.dir(), z.dir());
    let space = frames[axis.index()].space;

    // along-text push away from the grid edge, per unit of (offset + w/2)
    let push = match axis {
        Axis::X => xd * yd,
        Axis::Y | Axis::Z => -xd * yd,
    };
    // across-text step between successive ticks, per unit of space
    let stack = match axis {
        Axis::X => -xd * zd,
        Axis::Y => -yd * zd,
        Axis::Z => 1.0,
    };
    // first or last tick gets half a glyph away from the adjacent plane
    let nudge = match axis {
        Axis::X => None,
        Axis::Y => Some((if yd > 0.0 { 0 } else { labels.glyphs.len() - 1 }, -zd)),
        Axis::Z => Some((if zd > 0.0 { 0 } else { labels.glyphs.len() - 1 }, zd)),
    };

    for (i, glyph) in labels.glyphs.iter_mut().enumerate() {
        let mut frame = anchor
            .frame(glyph)
            .translate(push * (labels.offset + glyph.width / 2.0), 0.0, 0.0)
            .translate(0.0, stack * i as f64 * space, 0.0);
        if let Some((index, sign)) = nudge
            && index == i
        {
            frame = frame.translate(0.0, sign * last_height / 2.0, 0.0);
        }
        glyph.transform = frame.transform();
        tracing::trace!("Tick '{}' on {} at {}", glyph.text, axis, glyph.center());
    }
}

/// Lay out every glyph on every axis.
pub fn place_all(axes: &mut AxisSet) {
    let frames = axes.frames();
    for (axis, state) in axes.iter_mut() {
        place_names(axis, &frames, &mut state.names);
        place_values(axis, &frames, &mut state.values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Direction;

    fn frames() -> [AxisFrame; 3] {
        [AxisFrame::from_range(0.0, 1000.0, 100.0); 3]
    }

    fn close(a: DVec3, b: DVec3) -> bool {
        a.abs_diff_eq(b, 1e-6)
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(-500.0), "-500");
        assert_eq!(format_tick(12.5), "12.5");
        assert_eq!(format_tick(0.1 + 0.2), "0.3");
        assert_eq!(format_tick(-0.0), "0");
    }

    #[test]
    fn test_monospace_metrics() {
        let size = MonospaceMetrics::default().measure("1000", 60.0);
        assert!((size.x - 144.0).abs() < 1e-9);
        assert!((size.y - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_regenerate_ticks() {
        let mut values = ValueLabels::for_step(100.0);
        let frame = AxisFrame::from_range(-500.0, 200.0, 100.0);
        values.regenerate(&frame, &MonospaceMetrics::default());
        let texts: Vec<_> = values.texts().collect();
        assert_eq!(texts, ["-500", "-400", "-300", "-200", "-100", "0", "100", "200"]);
    }

    #[test]
    fn test_names_dedup() {
        let metrics = MonospaceMetrics::default();
        let mut names = NameLabels::default();
        assert!(names.add("Time, s", &metrics));
        assert!(!names.add("Time, s", &metrics));
        assert!(!names.add("", &metrics));
        assert!(names.add("Range, km", &metrics));
        assert_eq!(names.glyphs.len(), 2);

        names.resize_for(300.0);
        names.remeasure(&metrics);
        assert_eq!(names.glyphs[0].size, 300.0);
        assert_eq!(names.texts().collect::<Vec<_>>(), ["Time, s", "Range, km"]);
    }

    fn placed_ticks(axis: Axis, frames: &[AxisFrame; 3]) -> ValueLabels {
        let mut values = ValueLabels::for_step(100.0);
        values.regenerate(&frames[axis.index()], &MonospaceMetrics::default());
        place_values(axis, frames, &mut values);
        values
    }

    fn reading_direction(glyph: &Glyph) -> DVec3 {
        let [tl, tr, _, _] = glyph.corners();
        (tr - tl).normalize()
    }

    #[test]
    fn test_x_ticks_step_along_x() {
        let values = placed_ticks(Axis::X, &frames());

        // centered on each grid line, pushed past the far y edge by the offset
        for (i, glyph) in values.glyphs.iter().enumerate() {
            let expected = DVec3::new(100.0 * i as f64, 1000.0 + values.offset + glyph.width / 2.0, 0.0);
            assert!(close(glyph.center(), expected), "tick {}: {}", i, glyph.center());
            assert!(close(reading_direction(glyph), DVec3::Y));
        }
        assert!(close(values.glyphs[0].center(), DVec3::new(0.0, 1058.0, 0.0)));
    }

    #[test]
    fn test_x_ticks_keep_position_when_x_flips() {
        let mut frames = frames();
        frames[0].direction = Direction::Negative;
        let values = placed_ticks(Axis::X, &frames);

        for (i, glyph) in values.glyphs.iter().enumerate() {
            let expected = DVec3::new(100.0 * i as f64, 1000.0 + values.offset + glyph.width / 2.0, 0.0);
            assert!(close(glyph.center(), expected), "tick {}: {}", i, glyph.center());
            // text turns to read the other way
            assert!(close(reading_direction(glyph), -DVec3::Y));
        }
    }

    #[test]
    fn test_y_ticks_nudge_first_when_positive() {
        let values = placed_ticks(Axis::Y, &frames());
        let h = values.glyphs[0].height;

        for (i, glyph) in values.glyphs.iter().enumerate() {
            let y = if i == 0 { h / 2.0 } else { 100.0 * i as f64 };
            let expected = DVec3::new(1000.0 + values.offset + glyph.width / 2.0, y, 0.0);
            assert!(close(glyph.center(), expected), "tick {}: {}", i, glyph.center());
        }
    }

    #[test]
    fn test_y_ticks_nudge_last_when_negative() {
        let mut frames = frames();
        frames[1].direction = Direction::Negative;
        let values = placed_ticks(Axis::Y, &frames);
        let last = values.glyphs.len() - 1;
        let h = values.glyphs[last].height;

        for (i, glyph) in values.glyphs.iter().enumerate() {
            let y = if i == last { 1000.0 - h / 2.0 } else { 100.0 * i as f64 };
            let expected = DVec3::new(1000.0 + values.offset + glyph.width / 2.0, y, 0.0);
            assert!(close(glyph.center(), expected), "tick {}: {}", i, glyph.center());
            assert!(close(reading_direction(glyph), DVec3::X));
        }
    }

    #[test]
    fn test_y_ticks_move_to_min_x_when_x_flips() {
        let mut frames = frames();
        frames[0].direction = Direction::Negative;
        let values = placed_ticks(Axis::Y, &frames);
        let h = values.glyphs[0].height;

        for (i, glyph) in values.glyphs.iter().enumerate() {
            let y = if i == 0 { h / 2.0 } else { 100.0 * i as f64 };
            let expected = DVec3::new(-(values.offset + glyph.width / 2.0), y, 0.0);
            assert!(close(glyph.center(), expected), "tick {}: {}", i, glyph.center());
        }
    }

    #[test]
    fn test_z_ticks_nudge_last_when_negative() {
        let mut frames = frames();
        frames[2].direction = Direction::Negative;
        let values = placed_ticks(Axis::Z, &frames);
        let last = values.glyphs.len() - 1;
        let h = values.glyphs[last].height;

        for (i, glyph) in values.glyphs.iter().enumerate() {
            let z = if i == last { 1000.0 - h / 2.0 } else { 100.0 * i as f64 };
            let expected = DVec3::new(1000.0 + values.offset + glyph.width / 2.0, 0.0, z);
            assert!(close(glyph.center(), expected), "tick {}: {}", i, glyph.center());
        }
    }

    #[test]
    fn test_z_ticks_climb() {
        let metrics = MonospaceMetrics::default();
        let frames = frames();
        let mut values = ValueLabels::for_step(100.0);
        values.regenerate(&frames[2], &metrics);
        place_values(Axis::Z, &frames, &mut values);

        let zs: Vec<f64> = values.glyphs.iter().map(|g| g.center().z).collect();
        // the first tick is nudged up by half a glyph
        let h = values.glyphs[0].height;
        assert!((zs[2] - zs[1] - 100.0).abs() < 1e-6);
        assert!((zs[1] - zs[0] - (100.0 - h / 2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_placement_is_not_cumulative() {
        let metrics = MonospaceMetrics::default();
        let mut axes = AxisSet::default();
        for (axis, state) in axes.iter_mut() {
            state.names.add(&format!("{} name, m", axis), &metrics);
            let frame = state.frame;
            state.values.regenerate(&frame, &metrics);
        }
        place_all(&mut axes);
        let once = axes.clone();
        place_all(&mut axes);
        assert_eq!(once, axes);
    }

    #[test]
    fn test_flip_moves_x_names_to_other_edge() {
        let metrics = MonospaceMetrics::default();
        let mut frames = frames();
        let mut names = NameLabels::default();
        names.add("East, m", &metrics);

        place_names(Axis::X, &frames, &mut names);
        let before = names.glyphs[0].center();
        assert!(before.y > 1000.0);

        frames[1].direction = Direction::Negative;
        place_names(Axis::X, &frames, &mut names);
        let after = names.glyphs[0].center();
        assert!(after.y < 0.0);
        assert!((after.x - before.x).abs() < names.glyphs[0].width + names.glyphs[0].height);
    }

    #[test]
    fn test_glyph_corners_span_size() {
        let glyph = Glyph::new("12", 50.0, &MonospaceMetrics::default());
        let [tl, tr, br, _bl] = glyph.corners();
        assert!(((tr - tl).length() - glyph.width).abs() < 1e-9);
        assert!(((br - tr).length() - glyph.height).abs() < 1e-9);
        assert!(close(glyph.center(), DVec3::ZERO));
        // text reads along +x with its top toward +y
        assert!(close((tr - tl).normalize(), DVec3::X));
        assert!(close((tr - br).normalize(), DVec3::Y));
    }
}
