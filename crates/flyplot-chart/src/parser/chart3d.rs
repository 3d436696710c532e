use flyplot_core::math::{DVec3, Extent};

use super::{ChartParser, Line, Section, SectionHandler, dispatch, format_error, parse_numbers};
use crate::error::{ChartResult, FormatError};
use crate::model::{AreaSpec, Axis, AxisInfo, AxisLabel, Chart3D, ChartKind};
use crate::source::ChartSource;

/// Parser for `type: 3D` chart files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser3DChartFile;

impl ChartParser for Parser3DChartFile {
    type Chart = Chart3D;

    fn kind(&self) -> ChartKind {
        ChartKind::ThreeD
    }

    fn parse_str(&self, source: ChartSource, text: &str) -> ChartResult<Chart3D> {
        let mut builder = Chart3DBuilder::default();
        if let Err(error) = dispatch(text, &mut builder) {
            return Err(format_error(&source, error));
        }
        let chart = builder.finish(source).map_err(|(source, error)| format_error(&source, error))?;

        tracing::debug!(
            "Parsed 3D chart '{}' from {}: {} samples, {} cube corners, {} areas",
            chart.name,
            chart.source.short_path(),
            chart.coords.len(),
            chart.cube.len(),
            chart.areas.len()
        );
        Ok(chart)
    }
}

#[derive(Default)]
struct Chart3DBuilder {
    name: String,
    type_seen: bool,
    labels: [AxisLabel; 3],
    extents: [Extent; 3],
    times: Vec<f64>,
    coords: Vec<DVec3>,
    cube: Vec<DVec3>,
    areas: Vec<AreaSpec>,
}

impl Chart3DBuilder {
    fn include(&mut self, point: DVec3) {
        for axis in Axis::ALL {
            self.extents[axis.index()].include(axis.of(point));
        }
    }

    fn finish(self, source: ChartSource) -> Result<Chart3D, (ChartSource, FormatError)> {
        if !self.type_seen {
            return Err((
                source,
                FormatError::MissingSection {
                    section: Section::Type,
                },
            ));
        }

        let [lx, ly, lz] = self.labels;
        let axis = |label: AxisLabel, extent: Extent| {
            let (min, max) = extent.or_zero();
            AxisInfo { label, min, max }
        };
        let [ex, ey, ez] = self.extents;

        Ok(Chart3D {
            source,
            name: self.name,
            axes: [axis(lx, ex), axis(ly, ey), axis(lz, ez)],
            times: self.times,
            coords: self.coords,
            cube: self.cube,
            areas: self.areas,
        })
    }
}

impl SectionHandler for Chart3DBuilder {
    fn accepts(&self, _section: Section) -> bool {
        true
    }

    fn header(&mut self, section: Section, line: &Line<'_>) -> Result<(), FormatError> {
        match section {
            Section::Name => self.name = line.value().to_string(),
            Section::Type => {
                let found = line.value().to_ascii_uppercase();
                if ChartKind::from_tag(&found) != Some(ChartKind::ThreeD) {
                    return Err(FormatError::TypeMismatch {
                        expected: ChartKind::ThreeD,
                        found,
                    });
                }
                self.type_seen = true;
            }
            Section::X => self.labels[0] = parse_axis_header(line),
            Section::Y => self.labels[1] = parse_axis_header(line),
            Section::Z => self.labels[2] = parse_axis_header(line),
            Section::Cube | Section::Areas | Section::Coords => {}
        }
        Ok(())
    }

    fn data(&mut self, section: Section, line: &Line<'_>) -> Result<(), FormatError> {
        match section {
            Section::Cube => {
                let corner = match line.numbers(section)?[..] {
                    [x, y, z] => DVec3::new(x, y, z),
                    _ => {
                        return Err(FormatError::MalformedLine {
                            line: line.number,
                            section,
                            reason: "expected `<x> <y> <z>`",
                        });
                    }
                };
                self.cube.push(corner);
                self.include(corner);
            }
            Section::Areas => {
                let area = parse_area(line)?;
                for axis in Axis::ALL {
                    self.extents[axis.index()].merge(&area.footprint(axis));
                }
                self.areas.push(area);
            }
            Section::Coords => {
                let (t, point) = parse_sample(line)?;
                self.times.push(t);
                self.coords.push(point);
                self.include(point);
            }
            _ => {}
        }
        Ok(())
    }
}

/// `<axis>: <name> | <unit>`
pub(super) fn parse_axis_header(line: &Line<'_>) -> AxisLabel {
    match line.value().split_once('|') {
        Some((name, unit)) => AxisLabel::new(name.trim(), unit.trim()),
        None => {
            tracing::warn!("Axis header on line {} has no `| unit` part", line.number);
            AxisLabel::new(line.value(), "")
        }
    }
}

/// `<radius> <x> <y> [<z>]`
pub(super) fn parse_area(line: &Line<'_>) -> Result<AreaSpec, FormatError> {
    match line.numbers(Section::Areas)?[..] {
        [r, x, y] => Ok(AreaSpec::new(DVec3::new(x, y, 0.0), r)),
        [r, x, y, z] => Ok(AreaSpec::new(DVec3::new(x, y, z), r)),
        _ => Err(FormatError::MalformedLine {
            line: line.number,
            section: Section::Areas,
            reason: "expected `<radius> <x> <y> [<z>]`",
        }),
    }
}

/// `<t> -> <x> <y> <z>`
fn parse_sample(line: &Line<'_>) -> Result<(f64, DVec3), FormatError> {
    let malformed = FormatError::MalformedLine {
        line: line.number,
        section: Section::Coords,
        reason: "expected `<t> -> <x> <y> <z>`",
    };
    let Some((time, point)) = line.text.split_once("->") else {
        return Err(malformed);
    };
    let time = parse_numbers(time, line.number, Section::Coords)?;
    let point = parse_numbers(point, line.number, Section::Coords)?;
    match (&time[..], &point[..]) {
        ([t], [x, y, z]) => Ok((*t, DVec3::new(*x, *y, *z))),
        _ => Err(malformed),
    }
}
