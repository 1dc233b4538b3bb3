use snafu::{ResultExt, Snafu};
use tracing::debug;

use super::Status;

const SEGMENT_SEPARATOR: char = '/';

/// A single repository path split into its segments, optionally tagged with the
/// change it underwent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    segments: Vec<String>,
    status: Option<Status>,
}

impl PathRecord {
    pub fn new(path: &str, status: Option<Status>) -> Result<Self, RecordError> {
        if path.is_empty() {
            return Err(RecordError::EmptyPath);
        }

        let segments = path
            .split(SEGMENT_SEPARATOR)
            .map(|segment| {
                if segment.is_empty() {
                    EmptySegmentSnafu { path }.fail()
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments, status })
    }

    /// Parses a line of `git ls-tree --name-only` output.
    pub fn from_path_line(line: &str) -> Result<Self, RecordError> {
        Self::new(line, None)
    }

    /// Parses a line of `git diff-tree --name-status` output.
    ///
    /// A line without any whitespace is taken as a bare path without status.
    /// Otherwise everything before the first whitespace character must be a
    /// known status code and everything after it is the path.
    pub fn from_status_line(line: &str) -> Result<Self, RecordError> {
        match line.split_once(char::is_whitespace) {
            None => Self::new(line, None),
            Some((code, path)) => {
                let status = Status::try_from(code)?;
                Self::new(path, Some(status))
            }
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }
}

/// Parses every non-blank line as a plain path.
pub fn parse_path_lines<I, S>(lines: I) -> Result<Vec<PathRecord>, RecordError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines(lines, PathRecord::from_path_line)
}

/// Parses every non-blank line as an optionally status-tagged path.
pub fn parse_status_lines<I, S>(lines: I) -> Result<Vec<PathRecord>, RecordError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines(lines, PathRecord::from_status_line)
}

fn parse_lines<I, S>(
    lines: I,
    parse: impl Fn(&str) -> Result<PathRecord, RecordError>,
) -> Result<Vec<PathRecord>, RecordError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let records = lines
        .into_iter()
        .enumerate()
        .filter(|(_, line)| !line.as_ref().trim().is_empty())
        .map(|(index, line)| {
            parse(line.as_ref()).context(AtLineSnafu {
                line_number: index + 1,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Parsed {} path records", records.len());
    Ok(records)
}

#[derive(Debug, Snafu)]
pub enum RecordError {
    #[snafu(display("Unknown status code '{}'", code))]
    UnknownStatus { code: String },
    #[snafu(display("Record has an empty path"))]
    EmptyPath,
    #[snafu(display("Path '{}' contains an empty segment", path))]
    EmptySegment { path: String },
    #[snafu(display("Malformed record on line {}", line_number))]
    AtLine {
        line_number: usize,
        #[snafu(source(from(RecordError, Box::new)))]
        source: Box<RecordError>,
    },
}
