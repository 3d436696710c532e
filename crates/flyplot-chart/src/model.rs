//! Parsed chart records.

use std::fmt;

use flyplot_core::math::{DVec3, Extent};

use crate::source::ChartSource;

/// Dimensionality declared by a chart file's `type` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    TwoD,
    ThreeD,
}

impl ChartKind {
    /// The tag as written in files (`"2D"` or `"3D"`).
    pub fn tag(self) -> &'static str {
        match self {
            ChartKind::TwoD => "2D",
            ChartKind::ThreeD => "3D",
        }
    }

    /// Parse a tag, ignoring case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "2D" => Some(ChartKind::TwoD),
            "3D" => Some(ChartKind::ThreeD),
            _ => None,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in `x, y, z` order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position in `x, y, z` order.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two remaining axes, in `x, y, z` order.
    pub const fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    /// Lower-case letter used in files and logs.
    pub const fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    /// Unit vector along this axis.
    pub const fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }

    /// This axis' component of `v`.
    pub fn of(self, v: DVec3) -> f64 {
        v[self.index()]
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Name and unit from an axis header line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisLabel {
    pub name: String,
    pub unit: String,
}

impl AxisLabel {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }

    /// `"name, unit"`, or just the name when there is no unit.
    pub fn title(&self) -> String {
        if self.unit.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.unit)
        }
    }

    /// Whether the header was never given.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.unit.is_empty()
    }
}

/// Axis header plus the bounds of everything plotted on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisInfo {
    pub label: AxisLabel,
    pub min: f64,
    pub max: f64,
}

impl AxisInfo {
    /// Widen the bounds to include `value`.
    pub fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// The bounds as an [`Extent`].
    pub fn extent(&self) -> Extent {
        Extent::new(self.min, self.max)
    }
}

/// A circular region of interest: `radius x y [z]` in files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSpec {
    pub radius: f64,
    pub center: DVec3,
}

impl AreaSpec {
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { radius, center }
    }

    /// The interval this area covers on `axis`.
    ///
    /// The disk lies in the XY plane, so on Z it covers only its center.
    pub fn footprint(&self, axis: Axis) -> Extent {
        let c = axis.of(self.center);
        match axis {
            Axis::X | Axis::Y => Extent::new(c - self.radius, c + self.radius),
            Axis::Z => Extent::new(c, c),
        }
    }
}

/// A parsed 3D trajectory chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart3D {
    pub source: ChartSource,
    pub name: String,
    pub axes: [AxisInfo; 3],
    /// Sample timestamps, parallel to `coords`.
    pub times: Vec<f64>,
    pub coords: Vec<DVec3>,
    /// Bounding-box corner points.
    pub cube: Vec<DVec3>,
    pub areas: Vec<AreaSpec>,
}

impl Chart3D {
    /// Header and bounds for `axis`.
    pub fn axis(&self, axis: Axis) -> &AxisInfo {
        &self.axes[axis.index()]
    }

    /// Append timestamped samples, widening the axis bounds.
    pub fn extend<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = (f64, DVec3)>,
    {
        for (t, p) in samples {
            self.times.push(t);
            self.coords.push(p);
            for axis in Axis::ALL {
                self.axes[axis.index()].include(axis.of(p));
            }
        }
    }

    /// Whether every coordinate, cube corner and area footprint lies inside
    /// the axis bounds.
    pub fn bounds_cover_data(&self) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            let info = self.axis(axis);
            let inside = |v: f64| v >= info.min && v <= info.max;
            self.coords.iter().chain(&self.cube).all(|p| inside(axis.of(*p)))
                && self.areas.iter().all(|a| {
                    let f = a.footprint(axis);
                    inside(f.min) && inside(f.max)
                })
        })
    }
}

/// A parsed 2D series chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart2D {
    pub source: ChartSource,
    pub name: String,
    pub axes: [AxisLabel; 2],
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub areas: Vec<AreaSpec>,
}

impl Chart2D {
    pub fn x_label(&self) -> &AxisLabel {
        &self.axes[0]
    }

    pub fn y_label(&self) -> &AxisLabel {
        &self.axes[1]
    }

    /// Append samples. Extra values on the longer side are dropped.
    pub fn extend(&mut self, x: &[f64], y: &[f64]) {
        let n = x.len().min(y.len());
        self.x.extend_from_slice(&x[..n]);
        self.y.extend_from_slice(&y[..n]);
    }

    /// Bounds of the series on x and y, `None` if there are no samples.
    pub fn series_extent(&self) -> Option<(Extent, Extent)> {
        if self.x.is_empty() {
            return None;
        }
        let mut ex = Extent::EMPTY;
        let mut ey = Extent::EMPTY;
        for (&x, &y) in self.x.iter().zip(&self.y) {
            ex.include(x);
            ey.include(y);
        }
        Some((ex, ey))
    }
}

/// Either kind of chart, as returned by [`crate::load_chart`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnyChart {
    TwoD(Chart2D),
    ThreeD(Chart3D),
}

impl AnyChart {
    pub fn kind(&self) -> ChartKind {
        match self {
            AnyChart::TwoD(_) => ChartKind::TwoD,
            AnyChart::ThreeD(_) => ChartKind::ThreeD,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AnyChart::TwoD(c) => &c.name,
            AnyChart::ThreeD(c) => &c.name,
        }
    }

    pub fn source(&self) -> &ChartSource {
        match self {
            AnyChart::TwoD(c) => &c.source,
            AnyChart::ThreeD(c) => &c.source,
        }
    }
}
