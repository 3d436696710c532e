//! Where a chart came from, and reading it off disk.

use std::path::{Component, Path, PathBuf};

use crate::error::{ChartError, ChartResult};

/// Location of a chart file.
///
/// Keeps the absolute path for identity lookups and a two-component short
/// form (`parent/file`) for list widgets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartSource {
    path: PathBuf,
    short_path: String,
}

impl ChartSource {
    /// Resolve `path` against the current directory and fold away `.` and
    /// `..` components.
    ///
    /// The file does not have to exist, so symlinks are left alone.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = resolve(path.as_ref());
        let short_path = short_path_of(&path);
        Self { path, short_path }
    }

    /// The absolute path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parent directory name joined with the file name.
    pub fn short_path(&self) -> &str {
        &self.short_path
    }

    /// The absolute path as a display string.
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Whether this source points at `path` once both are resolved.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        resolve(path.as_ref()) == self.path
    }
}

fn resolve(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn short_path_of(path: &Path) -> String {
    let file = path.file_name().map(PathBuf::from).unwrap_or_default();
    match path.parent().and_then(Path::file_name) {
        Some(dir) => PathBuf::from(dir).join(file).display().to_string(),
        None => file.display().to_string(),
    }
}

/// Read a chart file as UTF-8 text.
///
/// A missing file maps to [`ChartError::NotFound`]; every other failure,
/// including invalid UTF-8, to [`ChartError::Io`].
pub fn read_chart_file(path: impl AsRef<Path>) -> ChartResult<(ChartSource, String)> {
    let source = ChartSource::new(path);
    let text = std::fs::read_to_string(source.path()).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ChartError::NotFound {
                path: source.display_path(),
            }
        } else {
            ChartError::Io {
                path: source.path().to_path_buf(),
                source: e,
            }
        }
    })?;
    Ok((source, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_path() {
        let source = ChartSource::new("/data/runs/flight.txt");
        assert_eq!(source.path(), Path::new("/data/runs/flight.txt"));
        assert_eq!(source.short_path(), "runs/flight.txt");
    }

    #[test]
    fn test_short_path_at_root() {
        let source = ChartSource::new("/flight.txt");
        assert_eq!(source.short_path(), "flight.txt");
    }

    #[test]
    fn test_relative_is_made_absolute() {
        let source = ChartSource::new("flight.txt");
        assert!(source.path().is_absolute());
        assert!(source.matches("flight.txt"));
    }

    #[test]
    fn test_dot_components_are_folded() {
        let source = ChartSource::new("/data/runs/../flight.txt");
        assert_eq!(source.path(), Path::new("/data/flight.txt"));
        assert_eq!(source.short_path(), "data/flight.txt");

        let source = ChartSource::new("/data/./runs/./flight.txt");
        assert_eq!(source.path(), Path::new("/data/runs/flight.txt"));
    }

    #[test]
    fn test_parent_above_root_stays_at_root() {
        let source = ChartSource::new("/../flight.txt");
        assert_eq!(source.path(), Path::new("/flight.txt"));
    }

    #[test]
    fn test_matches_equivalent_spellings() {
        let source = ChartSource::new("/data/runs/../flight.txt");
        assert!(source.matches("/data/flight.txt"));
        assert!(source.matches("/data/./flight.txt"));
        assert!(source.matches("/data/runs/x/../../flight.txt"));
        assert!(!source.matches("/data/runs/flight.txt"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_chart_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ChartError::NotFound { .. }));
    }
}
