//! Line-oriented chart file reader.
//!
//! A file is a sequence of sections introduced by keyword lines:
//!
//! ```text
//! name: Flight 12
//! type: 3D
//! x: East | m
//! y: North | m
//! z: Altitude | m
//! cube
//! 0 0 0
//! 1000 1000 500
//! areas
//! 50 200 300
//! coords
//! 0.0 -> 10 20 30
//! 0.5 -> 12 21 33
//! ```
//!
//! Data blocks (`cube`, `areas`, `coords`) run until the first line that
//! does not start with a number. That line is handed back to the dispatch
//! loop and treated as the next header, so blocks may appear in any order
//! and any number of times. Lines that are neither keywords nor numbers are
//! comments; `#` starts a trailing comment anywhere.

mod chart2d;
mod chart3d;

use std::fmt;
use std::path::Path;

use crate::error::{ChartError, ChartResult, FormatError};
use crate::model::{AnyChart, ChartKind};
use crate::source::{ChartSource, read_chart_file};

pub use chart2d::Parser2DChartFile;
pub use chart3d::Parser3DChartFile;

/// Section keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Name,
    Type,
    X,
    Y,
    Z,
    Cube,
    Areas,
    Coords,
}

impl Section {
    /// The keyword as written in files.
    pub fn keyword(self) -> &'static str {
        match self {
            Section::Name => "name",
            Section::Type => "type",
            Section::X => "x",
            Section::Y => "y",
            Section::Z => "z",
            Section::Cube => "cube",
            Section::Areas => "areas",
            Section::Coords => "coords",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "name" => Some(Section::Name),
            "type" => Some(Section::Type),
            "x" => Some(Section::X),
            "y" => Some(Section::Y),
            "z" => Some(Section::Z),
            "cube" => Some(Section::Cube),
            "areas" => Some(Section::Areas),
            "coords" => Some(Section::Coords),
            _ => None,
        }
    }

    /// Whether the section is followed by numeric data lines.
    pub fn is_block(self) -> bool {
        matches!(self, Section::Cube | Section::Areas | Section::Coords)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One input line with comments stripped and whitespace trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    /// The section this line opens, if it is a header.
    pub fn section(&self) -> Option<Section> {
        let word = self
            .text
            .split(|c: char| c == ':' || c.is_whitespace())
            .next()
            .unwrap_or("");
        Section::from_keyword(word)
    }

    /// Text after the header keyword (after `:` when present).
    pub fn value(&self) -> &'a str {
        match self.text.split_once(':') {
            Some((_, rest)) => rest.trim(),
            None => {
                let word_len = self.text.find(char::is_whitespace).unwrap_or(self.text.len());
                self.text[word_len..].trim()
            }
        }
    }

    /// Whether the line starts with a number (optionally signed).
    pub fn is_numeric(&self) -> bool {
        let mut chars = self.text.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('-' | '+' | '.') => matches!(chars.next(), Some(c) if c.is_ascii_digit() || c == '.'),
            _ => false,
        }
    }

    /// Parse every whitespace-separated token as a finite number.
    pub fn numbers(&self, section: Section) -> Result<Vec<f64>, FormatError> {
        parse_numbers(self.text, self.number, section)
    }
}

pub(crate) fn parse_numbers(text: &str, line: usize, section: Section) -> Result<Vec<f64>, FormatError> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| FormatError::InvalidNumber {
                    line,
                    section,
                    token: token.to_string(),
                })
        })
        .collect()
}

/// Sequential reader over the lines of a file.
pub struct LineCursor<'a> {
    lines: std::str::Lines<'a>,
    number: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            number: 0,
        }
    }

    /// The next line, or `None` at end of input.
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        let raw = self.lines.next()?;
        self.number += 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        Some(Line {
            number: self.number,
            text,
        })
    }
}

/// Receives sections from [`dispatch`].
///
/// Returning an error from any method stops the dispatch loop; nothing after
/// the failing line is read.
pub trait SectionHandler {
    /// Whether `section` is a keyword for this chart kind. Unaccepted
    /// keywords are treated as comments.
    fn accepts(&self, section: Section) -> bool;

    /// Handle the header line that opened `section`.
    fn header(&mut self, section: Section, line: &Line<'_>) -> Result<(), FormatError>;

    /// Handle one data line of a block section.
    fn data(&mut self, section: Section, line: &Line<'_>) -> Result<(), FormatError>;
}

/// Run the section dispatch loop over `text`.
///
/// Each handler step returns the next unconsumed line, which is then
/// classified again. The loop is flat, so file size does not affect stack
/// depth.
pub fn dispatch<H: SectionHandler>(text: &str, handler: &mut H) -> Result<(), FormatError> {
    let mut cursor = LineCursor::new(text);
    let mut pending = cursor.next_line();

    while let Some(line) = pending {
        pending = match line.section().filter(|s| handler.accepts(*s)) {
            Some(section) => {
                handler.header(section, &line)?;
                if section.is_block() {
                    consume_block(section, &mut cursor, handler)?
                } else {
                    cursor.next_line()
                }
            }
            None => {
                if line.is_numeric() {
                    tracing::warn!("Skipping data line {} outside of any block", line.number);
                }
                cursor.next_line()
            }
        };
    }

    Ok(())
}

fn consume_block<'a, H: SectionHandler>(
    section: Section,
    cursor: &mut LineCursor<'a>,
    handler: &mut H,
) -> Result<Option<Line<'a>>, FormatError> {
    while let Some(line) = cursor.next_line() {
        if !line.is_numeric() {
            return Ok(Some(line));
        }
        handler.data(section, &line)?;
    }
    Ok(None)
}

/// Trait for parsers producing one chart kind.
///
/// # Example
///
/// ```no_run
/// use flyplot_chart::{ChartParser, Parser3DChartFile};
///
/// let chart = Parser3DChartFile.load("runs/flight.txt")?;
/// println!("{} samples", chart.coords.len());
/// # Ok::<(), flyplot_chart::ChartError>(())
/// ```
pub trait ChartParser {
    /// The chart record this parser produces.
    type Chart;

    /// The dimensionality the file must declare.
    fn kind(&self) -> ChartKind;

    /// Parse chart text already in memory.
    fn parse_str(&self, source: ChartSource, text: &str) -> ChartResult<Self::Chart>;

    /// Read and parse a chart file.
    fn load(&self, path: impl AsRef<Path>) -> ChartResult<Self::Chart> {
        let (source, text) = read_chart_file(path)?;
        self.parse_str(source, &text)
    }
}

pub(crate) fn format_error(source: &ChartSource, error: FormatError) -> ChartError {
    ChartError::Format {
        path: source.display_path(),
        error,
    }
}

/// Load a chart file of either kind, picking the parser from its `type` line.
pub fn load_chart(path: impl AsRef<Path>) -> ChartResult<AnyChart> {
    let (source, text) = read_chart_file(path)?;

    let mut cursor = LineCursor::new(&text);
    let mut tag = None;
    while let Some(line) = cursor.next_line() {
        if line.section() == Some(Section::Type) {
            tag = Some(line.value().to_ascii_uppercase());
            break;
        }
    }

    let Some(tag) = tag else {
        return Err(format_error(
            &source,
            FormatError::MissingSection {
                section: Section::Type,
            },
        ));
    };

    match ChartKind::from_tag(&tag) {
        Some(ChartKind::TwoD) => Parser2DChartFile.parse_str(source, &text).map(AnyChart::TwoD),
        Some(ChartKind::ThreeD) => Parser3DChartFile.parse_str(source, &text).map(AnyChart::ThreeD),
        None => Err(format_error(
            &source,
            FormatError::TypeMismatch {
                expected: ChartKind::ThreeD,
                found: tag,
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Line<'_> {
        Line { number: 1, text }
    }

    #[test]
    fn test_keyword_is_leading_word() {
        assert_eq!(line("x: Time | s").section(), Some(Section::X));
        assert_eq!(line("coords").section(), Some(Section::Coords));
        assert_eq!(line("xylophone notes").section(), None);
        assert_eq!(line("Some free text").section(), None);
    }

    #[test]
    fn test_value() {
        assert_eq!(line("name: Flight 12").value(), "Flight 12");
        assert_eq!(line("name Flight 12").value(), "Flight 12");
        assert_eq!(line("type:3d").value(), "3d");
    }

    #[test]
    fn test_numeric_leading() {
        assert!(line("12 3 4").is_numeric());
        assert!(line("-5 3 4").is_numeric());
        assert!(line(".5 -> 1").is_numeric());
        assert!(!line("-> 1").is_numeric());
        assert!(!line("cube").is_numeric());
        assert!(!line("").is_numeric());
    }

    #[test]
    fn test_cursor_strips_comments() {
        let mut cursor = LineCursor::new("type: 3D   # or 2D\n\n  coords  \n");
        let first = cursor.next_line().unwrap();
        assert_eq!(first.text, "type: 3D");
        assert_eq!(cursor.next_line().unwrap().text, "");
        let third = cursor.next_line().unwrap();
        assert_eq!(third.number, 3);
        assert_eq!(third.text, "coords");
        assert!(cursor.next_line().is_none());
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_numbers("1 2 abc", 7, Section::Cube).unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidNumber {
                line: 7,
                section: Section::Cube,
                token: "abc".to_string()
            }
        );
        assert!(parse_numbers("1 inf", 1, Section::Cube).is_err());
    }

    /// Records the order in which the loop hands out sections.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SectionHandler for Recorder {
        fn accepts(&self, section: Section) -> bool {
            section != Section::Z
        }

        fn header(&mut self, section: Section, _line: &Line<'_>) -> Result<(), FormatError> {
            self.events.push(format!("[{}]", section));
            Ok(())
        }

        fn data(&mut self, _section: Section, line: &Line<'_>) -> Result<(), FormatError> {
            self.events.push(line.text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_redispatches_block_terminator() {
        let text = "cube\n1 2 3\nareas\n5 1 1\ncomment\n9 9 9\nz: ignored\ncoords\n0 -> 1 2 3";
        let mut rec = Recorder::default();
        dispatch(text, &mut rec).unwrap();
        assert_eq!(
            rec.events,
            vec!["[cube]", "1 2 3", "[areas]", "5 1 1", "[coords]", "0 -> 1 2 3"]
        );
    }
}
