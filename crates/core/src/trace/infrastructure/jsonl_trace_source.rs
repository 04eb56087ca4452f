//! Recorded gaze traces in JSON Lines form.
//!
//! One object per processed frame: `{"t": 1.25, "x": 0.48}`. A `null` or
//! absent `x` marks a frame where no face was detected. `t` is seconds on
//! the session clock and must never decrease.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::session::gaze_source::{GazeObservation, GazeSource};

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("failed to open trace {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read trace {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: invalid timestamp {t}")]
    InvalidTimestamp { line: usize, t: f64 },
    #[error("line {line}: timestamp {t} is earlier than previous {previous}")]
    NonMonotonic { line: usize, t: f64, previous: f64 },
}

#[derive(Deserialize)]
struct TraceRow {
    t: f64,
    #[serde(default)]
    x: Option<f64>,
}

pub struct JsonlTraceSource {
    path: PathBuf,
    reader: BufReader<File>,
}

impl JsonlTraceSource {
    pub fn open(path: &Path) -> Result<Self, TraceError> {
        let file = File::open(path).map_err(|e| TraceError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
        })
    }
}

impl GazeSource for JsonlTraceSource {
    fn observations(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<GazeObservation, Box<dyn std::error::Error>>> + '_> {
        let path = &self.path;
        let mut previous: Option<f64> = None;
        let mut lines = (&mut self.reader).lines().enumerate();

        Box::new(std::iter::from_fn(
            move || -> Option<Result<GazeObservation, Box<dyn std::error::Error>>> {
                for (index, line) in lines.by_ref() {
                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            return Some(Err(TraceError::Read {
                                path: path.clone(),
                                source: e,
                            }
                            .into()))
                        }
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(parse_row(&line, index + 1, &mut previous).map_err(Into::into));
                }
                None
            },
        ))
    }

    fn close(&mut self) {
        log::debug!("Closed gaze trace {}", self.path.display());
    }
}

fn parse_row(
    text: &str,
    line: usize,
    previous: &mut Option<f64>,
) -> Result<GazeObservation, TraceError> {
    let row: TraceRow =
        serde_json::from_str(text).map_err(|e| TraceError::Parse { line, source: e })?;

    let at = Duration::try_from_secs_f64(row.t)
        .map_err(|_| TraceError::InvalidTimestamp { line, t: row.t })?;

    if let Some(prev) = *previous {
        if row.t < prev {
            return Err(TraceError::NonMonotonic {
                line,
                t: row.t,
                previous: prev,
            });
        }
    }
    *previous = Some(row.t);

    Ok(GazeObservation::new(at, row.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn trace_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn read_all(contents: &str) -> Vec<Result<GazeObservation, String>> {
        let file = trace_file(contents);
        let mut source = JsonlTraceSource::open(file.path()).unwrap();
        let rows = source
            .observations()
            .map(|r| r.map_err(|e| e.to_string()))
            .collect();
        source.close();
        rows
    }

    #[test]
    fn test_reads_samples_and_missing_faces() {
        let rows = read_all(
            "{\"t\": 0.0, \"x\": 0.5}\n\
             {\"t\": 0.033, \"x\": null}\n\
             {\"t\": 0.066}\n\
             {\"t\": 0.1, \"x\": 0.71}\n",
        );
        let rows: Vec<_> = rows.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], GazeObservation::new(Duration::ZERO, Some(0.5)));
        assert_eq!(rows[1].eye_x, None);
        assert_eq!(rows[2].eye_x, None);
        assert_eq!(rows[3].at, Duration::from_secs_f64(0.1));
    }

    #[test]
    fn test_skips_blank_lines() {
        let rows = read_all("\n{\"t\": 1.0, \"x\": 0.4}\n   \n{\"t\": 2.0, \"x\": 0.6}\n");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_equal_timestamps_allowed() {
        let rows = read_all("{\"t\": 1.0, \"x\": 0.4}\n{\"t\": 1.0, \"x\": 0.6}\n");
        assert!(rows.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let rows = read_all("{\"t\": 1.0, \"x\": 0.4}\n\nnot json\n");
        let err = rows[1].as_ref().unwrap_err();
        assert!(err.starts_with("line 3:"), "unexpected error: {err}");
    }

    #[rstest]
    #[case::negative("{\"t\": -0.5, \"x\": 0.4}")]
    #[case::missing_t("{\"x\": 0.4}")]
    fn test_rejects_bad_timestamp(#[case] row: &str) {
        let rows = read_all(row);
        assert!(rows[0].is_err());
    }

    #[test]
    fn test_rejects_decreasing_timestamp() {
        let rows = read_all("{\"t\": 2.0, \"x\": 0.4}\n{\"t\": 1.5, \"x\": 0.4}\n");
        let err = rows[1].as_ref().unwrap_err();
        assert!(err.contains("earlier than previous"));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonlTraceSource::open(&dir.path().join("missing.jsonl"));
        assert!(matches!(result, Err(TraceError::Open { .. })));
    }
}
