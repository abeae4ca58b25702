//! Cruise-leg position logs.
//!
//! One record per line; the third and fourth whitespace-separated columns
//! hold longitude and latitude. Leading columns (station, time) are ignored.

use std::path::PathBuf;

use super::utils::{for_each_record, open_text, parse_field};
use super::{Coordinate, DataReader, Track};
use crate::error::ReadError;

const LON_COLUMN: usize = 2;
const LAT_COLUMN: usize = 3;

pub struct LegReader {
    pub file_name: PathBuf,
}

impl LegReader {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        LegReader {
            file_name: file_name.into(),
        }
    }
}

impl DataReader for LegReader {
    type Output = Track;

    fn read_data(&self) -> Result<Track, ReadError> {
        let reader = open_text(&self.file_name)?;
        let mut points = Vec::new();

        for_each_record(&self.file_name, reader, |line, tokens| {
            let lon = parse_field(tokens, LON_COLUMN, "longitude", line)?;
            let lat = parse_field(tokens, LAT_COLUMN, "latitude", line)?;
            points.push(Coordinate::new(lon, lat));
            Ok(())
        })?;

        Ok(Track::new(points))
    }
}
