//! Coastline contour files.
//!
//! A contour file is a flat list of `lon lat` records. Polylines are
//! separated by a record whose longitude equals a sentinel value (999 by
//! default). Every polyline is expected to be closed by such a record,
//! including the last one.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::utils::{for_each_record, open_text, parse_field};
use super::{ContourSet, Coordinate, DataReader, Segment};
use crate::error::ReadError;

pub const DEFAULT_SENTINEL: f64 = 999.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContourOptions {
    pub sentinel: f64,
    /// Emit points that follow the last sentinel instead of dropping them.
    pub flush_incomplete_trailing_segment: bool,
}

impl Default for ContourOptions {
    fn default() -> Self {
        ContourOptions {
            sentinel: DEFAULT_SENTINEL,
            flush_incomplete_trailing_segment: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmenterState {
    /// At least one point has been added since the last boundary.
    Accumulating,
    /// Nothing pending: start of input or right after a sentinel.
    JustClosed,
}

/// Single-pass splitter turning a stream of records into segments.
#[derive(Debug)]
pub struct ContourSegmenter {
    options: ContourOptions,
    // Reported in `MalformedRecord` errors.
    source: PathBuf,
    state: SegmenterState,
    current: Segment,
    segments: Vec<Segment>,
}

impl ContourSegmenter {
    pub fn new(options: ContourOptions) -> Self {
        ContourSegmenter {
            options,
            source: PathBuf::new(),
            state: SegmenterState::JustClosed,
            current: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Names the file the records come from.
    pub fn with_source(mut self, source: impl AsRef<Path>) -> Self {
        self.source = source.as_ref().to_path_buf();
        self
    }

    pub fn state(&self) -> SegmenterState {
        self.state
    }

    pub fn is_sentinel(&self, lon: f64) -> bool {
        // Exact comparison: the sentinel is a marker, not a measurement.
        lon == self.options.sentinel
    }

    /// Closes the segment being built, even when it holds no point.
    fn close(&mut self) {
        self.segments.push(std::mem::take(&mut self.current));
        self.state = SegmenterState::JustClosed;
    }

    fn push_point(&mut self, point: Coordinate) {
        self.current.push(point);
        self.state = SegmenterState::Accumulating;
    }

    /// Feeds one tokenized record. A sentinel longitude closes the current
    /// segment, anything else adds a point to it.
    pub fn push(&mut self, tokens: &[&str], line: usize) -> Result<(), ReadError> {
        let lon = self.field(tokens, 0, "longitude", line)?;
        if self.is_sentinel(lon) {
            self.close();
            return Ok(());
        }

        let lat = self.field(tokens, 1, "latitude", line)?;
        self.push_point(Coordinate::new(lon, lat));
        Ok(())
    }

    fn field(&self, tokens: &[&str], index: usize, name: &str, line: usize) -> Result<f64, ReadError> {
        parse_field(tokens, index, name, line).map_err(|e| match e {
            ReadError::MalformedRecord { line, reason, .. } => {
                ReadError::malformed(&self.source, line, reason)
            }
            other => other,
        })
    }

    pub fn finish(mut self) -> ContourSet {
        if self.state == SegmenterState::Accumulating && self.options.flush_incomplete_trailing_segment
        {
            self.close();
        }
        ContourSet::new(self.segments)
    }
}

pub struct ContourReader {
    pub file_name: PathBuf,
    pub options: ContourOptions,
}

impl ContourReader {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        ContourReader {
            file_name: file_name.into(),
            options: ContourOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ContourOptions) -> Self {
        self.options = options;
        self
    }
}

impl DataReader for ContourReader {
    type Output = ContourSet;

    fn read_data(&self) -> Result<ContourSet, ReadError> {
        let reader = open_text(&self.file_name)?;
        let mut segmenter = ContourSegmenter::new(self.options).with_source(&self.file_name);

        for_each_record(&self.file_name, reader, |line, tokens| segmenter.push(tokens, line))?;

        Ok(segmenter.finish())
    }
}
