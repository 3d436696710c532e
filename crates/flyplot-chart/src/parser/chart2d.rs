use super::chart3d::{parse_area, parse_axis_header};
use super::{ChartParser, Line, Section, SectionHandler, dispatch, format_error, parse_numbers};
use crate::error::{ChartResult, FormatError};
use crate::model::{AreaSpec, AxisLabel, Chart2D, ChartKind};
use crate::source::ChartSource;

/// Parser for `type: 2D` chart files.
///
/// Accepts `name`, `type`, `x`, `y`, `areas` and `coords`. A `z` header or a
/// `cube` block is not part of the 2D format and reads as a comment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser2DChartFile;

impl ChartParser for Parser2DChartFile {
    type Chart = Chart2D;

    fn kind(&self) -> ChartKind {
        ChartKind::TwoD
    }

    fn parse_str(&self, source: ChartSource, text: &str) -> ChartResult<Chart2D> {
        let mut builder = Chart2DBuilder::default();
        if let Err(error) = dispatch(text, &mut builder) {
            return Err(format_error(&source, error));
        }
        if !builder.type_seen {
            return Err(format_error(
                &source,
                FormatError::MissingSection {
                    section: Section::Type,
                },
            ));
        }

        let chart = Chart2D {
            source,
            name: builder.name,
            axes: builder.labels,
            x: builder.x,
            y: builder.y,
            areas: builder.areas,
        };
        tracing::debug!(
            "Parsed 2D chart '{}' from {}: {} samples, {} areas",
            chart.name,
            chart.source.short_path(),
            chart.x.len(),
            chart.areas.len()
        );
        Ok(chart)
    }
}

#[derive(Default)]
struct Chart2DBuilder {
    name: String,
    type_seen: bool,
    labels: [AxisLabel; 2],
    x: Vec<f64>,
    y: Vec<f64>,
    areas: Vec<AreaSpec>,
}

impl SectionHandler for Chart2DBuilder {
    fn accepts(&self, section: Section) -> bool {
        !matches!(section, Section::Z | Section::Cube)
    }

    fn header(&mut self, section: Section, line: &Line<'_>) -> Result<(), FormatError> {
        match section {
            Section::Name => self.name = line.value().to_string(),
            Section::Type => {
                let found = line.value().to_ascii_uppercase();
                if ChartKind::from_tag(&found) != Some(ChartKind::TwoD) {
                    return Err(FormatError::TypeMismatch {
                        expected: ChartKind::TwoD,
                        found,
                    });
                }
                self.type_seen = true;
            }
            Section::X => self.labels[0] = parse_axis_header(line),
            Section::Y => self.labels[1] = parse_axis_header(line),
            _ => {}
        }
        Ok(())
    }

    fn data(&mut self, section: Section, line: &Line<'_>) -> Result<(), FormatError> {
        match section {
            Section::Areas => self.areas.push(parse_area(line)?),
            Section::Coords => {
                let malformed = FormatError::MalformedLine {
                    line: line.number,
                    section,
                    reason: "expected `<x> -> <y>`",
                };
                let Some((x, y)) = line.text.split_once("->") else {
                    return Err(malformed);
                };
                let x = parse_numbers(x, line.number, section)?;
                let y = parse_numbers(y, line.number, section)?;
                match (&x[..], &y[..]) {
                    ([x], [y]) => {
                        self.x.push(*x);
                        self.y.push(*y);
                    }
                    _ => return Err(malformed),
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ChartResult<Chart2D> {
        Parser2DChartFile.parse_str(ChartSource::new("/data/series/speed.txt"), text)
    }

    #[test]
    fn test_series() {
        let chart = parse(
            "name: Speed\ntype: 2D\nx: Time | s\ny: Speed | m/s\ncoords\n0 -> 10\n0.5 -> 12.5\n1 -> -3\n",
        )
        .unwrap();
        assert_eq!(chart.name, "Speed");
        assert_eq!(chart.x, vec![0.0, 0.5, 1.0]);
        assert_eq!(chart.y, vec![10.0, 12.5, -3.0]);
        assert_eq!(chart.y_label().title(), "Speed, m/s");
    }

    #[test]
    fn test_rejects_3d_file() {
        let err = parse("type: 3D\ncoords\n0 -> 1 2 3\n").unwrap_err();
        assert_eq!(
            err.format_error(),
            Some(&FormatError::TypeMismatch {
                expected: ChartKind::TwoD,
                found: "3D".to_string()
            })
        );
        assert!(err.to_string().contains("chart type \"3D\" is not 2D"));
    }

    #[test]
    fn test_three_value_sample_is_malformed() {
        let err = parse("type: 2D\ncoords\n0 -> 1 2\n").unwrap_err();
        assert!(matches!(
            err.format_error(),
            Some(FormatError::MalformedLine {
                line: 3,
                section: Section::Coords,
                ..
            })
        ));
    }

    #[test]
    fn test_areas_and_cube_comment() {
        let chart = parse("type: 2D\ncube\nareas\n2 1 1\n").unwrap();
        assert_eq!(chart.areas.len(), 1);
        assert_eq!(chart.areas[0].radius, 2.0);
    }
}
