//! Test utilities for flyplot.
//!
//! - [`ChartFixture`] writes chart files into a throwaway directory.
//! - [`ChartText`] assembles chart file text line by line.
//! - [`approx_eq`] and [`assert_approx_eq!`] compare floats.
//!
//! # Example
//!
//! ```rust
//! use flyplot_test_utils::{ChartFixture, ChartText};
//!
//! let fixture = ChartFixture::new("runs");
//! let path = fixture.write(
//!     "flight.txt",
//!     &ChartText::new("3D").axis('x', "East", "m").sample(0.0, [1.0, 2.0, 3.0]).build(),
//! );
//! assert!(path.ends_with("runs/flight.txt"));
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Default tolerance for [`approx_eq`].
pub const EPSILON: f64 = 1e-9;

/// A temporary directory holding chart files under a named parent directory.
///
/// The parent name is what shows up in a chart's short path. The directory
/// is removed when the fixture is dropped.
pub struct ChartFixture {
    _root: TempDir,
    dir: PathBuf,
}

impl ChartFixture {
    /// Create `<tmp>/<parent>/`.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new(parent: &str) -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        let dir = root.path().join(parent);
        std::fs::create_dir_all(&dir).expect("failed to create fixture dir");
        Self { _root: root, dir }
    }

    /// The directory files are written into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `contents` to `<dir>/<name>` and return the full path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(name);
        std::fs::write(&path, contents).expect("failed to write fixture file");
        path
    }

    /// Path of a file that was never written.
    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// Builder for chart file text.
#[derive(Debug, Clone, Default)]
pub struct ChartText {
    header: String,
    cube: Vec<[f64; 3]>,
    areas: Vec<Vec<f64>>,
    samples: Vec<String>,
}

impl ChartText {
    /// Start a chart with `type: <kind>`.
    pub fn new(kind: &str) -> Self {
        Self {
            header: format!("type: {}\n", kind),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        let _ = writeln!(self.header, "name: {}", name);
        self
    }

    pub fn axis(mut self, axis: char, name: &str, unit: &str) -> Self {
        let _ = writeln!(self.header, "{}: {} | {}", axis, name, unit);
        self
    }

    pub fn cube(mut self, corner: [f64; 3]) -> Self {
        self.cube.push(corner);
        self
    }

    /// Area line `radius x y [z]`.
    pub fn area(mut self, radius: f64, center: &[f64]) -> Self {
        let mut line = vec![radius];
        line.extend_from_slice(center);
        self.areas.push(line);
        self
    }

    /// 3D sample `t -> x y z`.
    pub fn sample(mut self, t: f64, p: [f64; 3]) -> Self {
        self.samples.push(format!("{} -> {} {} {}", t, p[0], p[1], p[2]));
        self
    }

    /// 2D sample `x -> y`.
    pub fn point(mut self, x: f64, y: f64) -> Self {
        self.samples.push(format!("{} -> {}", x, y));
        self
    }

    /// `n` samples along a line from `from` to `to`, timestamps `0..n`.
    pub fn track(mut self, n: usize, from: [f64; 3], to: [f64; 3]) -> Self {
        let steps = n.saturating_sub(1).max(1) as f64;
        for i in 0..n {
            let k = i as f64 / steps;
            let p = [0, 1, 2].map(|j| from[j] + (to[j] - from[j]) * k);
            self = self.sample(i as f64, p);
        }
        self
    }

    pub fn build(&self) -> String {
        let mut out = self.header.clone();
        if !self.cube.is_empty() {
            out.push_str("cube\n");
            for c in &self.cube {
                let _ = writeln!(out, "{} {} {}", c[0], c[1], c[2]);
            }
        }
        if !self.areas.is_empty() {
            out.push_str("areas\n");
            for a in &self.areas {
                let fields: Vec<String> = a.iter().map(f64::to_string).collect();
                let _ = writeln!(out, "{}", fields.join(" "));
            }
        }
        if !self.samples.is_empty() {
            out.push_str("coords\n");
            for s in &self.samples {
                let _ = writeln!(out, "{}", s);
            }
        }
        out
    }
}

/// Whether `a` and `b` differ by at most [`EPSILON`], relative to their
/// magnitude when that exceeds 1.
pub fn approx_eq(a: f64, b: f64) -> bool {
    approx_eq_eps(a, b, EPSILON)
}

/// [`approx_eq`] with an explicit tolerance.
pub fn approx_eq_eps(a: f64, b: f64, eps: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= eps * scale
}

/// Element-wise [`approx_eq`] over three components.
pub fn approx_eq3(a: [f64; 3], b: [f64; 3]) -> bool {
    a.iter().zip(&b).all(|(x, y)| approx_eq(*x, *y))
}

/// Assert two floats are within [`EPSILON`] of each other.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {{
        let (a, b) = ($a, $b);
        assert!($crate::approx_eq(a, b), "{} != {} (within {})", a, b, $crate::EPSILON);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = ChartFixture::new("runs");
        let path = fixture.write("a.txt", "type: 3D\n");
        assert_eq!(path.parent().and_then(Path::file_name), Some("runs".as_ref()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "type: 3D\n");
        assert!(!fixture.missing("b.txt").exists());
    }

    #[test]
    fn test_chart_text() {
        let text = ChartText::new("3D")
            .name("Demo")
            .axis('x', "East", "m")
            .area(10.0, &[5.0, 5.0])
            .sample(0.0, [1.0, 2.0, 3.0])
            .build();
        assert_eq!(
            text,
            "type: 3D\nname: Demo\nx: East | m\nareas\n10 5 5\ncoords\n0 -> 1 2 3\n"
        );
    }

    #[test]
    fn test_track_endpoints() {
        let text = ChartText::new("3D").track(3, [0.0; 3], [10.0, 20.0, 30.0]).build();
        assert!(text.contains("0 -> 0 0 0\n"));
        assert!(text.contains("1 -> 5 10 15\n"));
        assert!(text.contains("2 -> 10 20 30\n"));
    }

    #[test]
    fn test_approx() {
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert!(!approx_eq(1.0, 1.001));
        assert!(approx_eq3([1.0, 2.0, 3.0], [1.0, 2.0, 3.0 + 1e-12]));
        assert_approx_eq!(1e6 + 1e-4, 1e6);
    }
}
