use chrono::NaiveDate;
use std::fmt;

use crate::error::ReadError;

pub trait DataReader {
    type Output;

    fn read_data(&self) -> Result<Self::Output, ReadError>;
}

/// A longitude/latitude pair, in the units found in the source file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Coordinate { lon, lat }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lon, lat): (f64, f64)) -> Self {
        Coordinate { lon, lat }
    }
}

/// Ordered positions of one cruise leg, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    points: Vec<Coordinate>,
}

impl Track {
    pub(crate) fn new(points: Vec<Coordinate>) -> Self {
        Track { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn lons(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.lon).collect()
    }

    pub fn lats(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.lat).collect()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lon_min, lon_max) = extent(self.points.iter().map(|p| p.lon));
        let (lat_min, lat_max) = extent(self.points.iter().map(|p| p.lat));

        write!(
            f,
            "Points: {}\nLongitude: {} .. {}\nLatitude: {} .. {}",
            self.points.len(),
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        )
    }
}

/// One polyline of a contour file (an island or a stretch of coastline).
pub type Segment = Vec<Coordinate>;

/// All polylines of a contour file, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContourSet {
    segments: Vec<Segment>,
}

impl ContourSet {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        ContourSet { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

/// Row-major two-dimensional array.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    values: Vec<T>,
}

impl<T> Grid<T> {
    /// Returns `None` when `values` does not hold exactly `rows * cols` cells.
    pub fn new(rows: usize, cols: usize, values: Vec<T>) -> Option<Self> {
        if rows.checked_mul(cols)? != values.len() {
            return None;
        }
        Some(Grid { rows, cols, values })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values.get(row * self.cols + col)
    }
}

/// Geophysical SST field together with its quality flags.
///
/// Level-2 products carry either the long-wave `sst`/`qual_sst` pair or the
/// mid-wave `sst4`/`qual_sst4` pair, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    Primary { sst: Grid<f64>, quality: Grid<i32> },
    Secondary { sst: Grid<f64>, quality: Grid<i32> },
}

impl Measurement {
    pub fn sst(&self) -> &Grid<f64> {
        match self {
            Measurement::Primary { sst, .. } | Measurement::Secondary { sst, .. } => sst,
        }
    }

    pub fn quality(&self) -> &Grid<i32> {
        match self {
            Measurement::Primary { quality, .. } | Measurement::Secondary { quality, .. } => quality,
        }
    }

    pub fn variable_name(&self) -> &'static str {
        match self {
            Measurement::Primary { .. } => "sst",
            Measurement::Secondary { .. } => "sst4",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Swath {
    platform: String,
    year: i32,
    day: i32,
    longitude: Grid<f64>,
    latitude: Grid<f64>,
    measurement: Measurement,
}

impl Swath {
    /// Builds a swath, rejecting grids that are not co-indexed.
    pub fn new(
        platform: String,
        year: i32,
        day: i32,
        longitude: Grid<f64>,
        latitude: Grid<f64>,
        measurement: Measurement,
    ) -> Result<Self, String> {
        let shape = longitude.shape();
        let shapes = [
            ("latitude", latitude.shape()),
            (measurement.variable_name(), measurement.sst().shape()),
            ("quality", measurement.quality().shape()),
        ];

        for (name, other) in shapes {
            if other != shape {
                return Err(format!(
                    "{} has shape {:?} but longitude has shape {:?}",
                    name, other, shape
                ));
            }
        }

        Ok(Swath {
            platform,
            year,
            day,
            longitude,
            latitude,
            measurement,
        })
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn day(&self) -> i32 {
        self.day
    }

    pub fn longitude(&self) -> &Grid<f64> {
        &self.longitude
    }

    pub fn latitude(&self) -> &Grid<f64> {
        &self.latitude
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    pub fn shape(&self) -> (usize, usize) {
        self.longitude.shape()
    }

    /// Calendar date of the acquisition, assuming a single-day granule.
    pub fn acquisition_date(&self) -> Option<NaiveDate> {
        let ordinal = u32::try_from(self.day).ok()?;
        NaiveDate::from_yo_opt(self.year, ordinal)
    }
}

impl fmt::Display for Swath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.shape();
        let (sst_min, sst_max) = extent(self.measurement.sst().values().iter().copied());
        let date = self
            .acquisition_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("{} day {}", self.year, self.day));

        write!(
            f,
            "Platform: {}\nDate: {}\nVariable: {}\nShape: {} x {}\nMin value: {}\nMax value: {}",
            self.platform,
            date,
            self.measurement.variable_name(),
            rows,
            cols,
            sst_min,
            sst_max,
        )
    }
}

/// Outcome of a swath read: a missing file is a valid, empty result.
#[derive(Debug, Clone, PartialEq)]
pub enum SwathRead {
    Present(Swath),
    Absent,
}

impl SwathRead {
    pub fn is_absent(&self) -> bool {
        matches!(self, SwathRead::Absent)
    }

    pub fn present(self) -> Option<Swath> {
        match self {
            SwathRead::Present(swath) => Some(swath),
            SwathRead::Absent => None,
        }
    }
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|x| !x.is_nan())
        .fold((f64::NAN, f64::NAN), |(lo, hi), x| (lo.min(x), hi.max(x)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> Grid<f64> {
        Grid::new(rows, cols, vec![0.0; rows * cols]).unwrap()
    }

    fn quality(rows: usize, cols: usize) -> Grid<i32> {
        Grid::new(rows, cols, vec![0; rows * cols]).unwrap()
    }

    #[test]
    fn test_grid_rejects_wrong_length() {
        assert!(Grid::new(2, 3, vec![0.0; 5]).is_none());
        assert!(Grid::new(2, 3, vec![0.0; 6]).is_some());
    }

    #[test]
    fn test_grid_is_row_major() {
        let g = Grid::new(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(g.get(0, 2), Some(&3));
        assert_eq!(g.get(1, 0), Some(&4));
        assert_eq!(g.get(2, 0), None);
        assert_eq!(g.get(0, 3), None);
    }

    #[test]
    fn test_swath_rejects_mismatched_shapes() {
        let measurement = Measurement::Primary {
            sst: grid(2, 3),
            quality: quality(3, 2),
        };
        let result = Swath::new("Aqua".into(), 2014, 150, grid(2, 3), grid(2, 3), measurement);
        assert!(result.is_err());
    }

    #[test]
    fn test_acquisition_date_from_day_of_year() {
        let measurement = Measurement::Secondary {
            sst: grid(1, 1),
            quality: quality(1, 1),
        };
        let swath =
            Swath::new("Terra".into(), 2014, 32, grid(1, 1), grid(1, 1), measurement).unwrap();
        assert_eq!(
            swath.acquisition_date(),
            NaiveDate::from_ymd_opt(2014, 2, 1)
        );
        assert_eq!(swath.measurement().variable_name(), "sst4");
    }

    #[test]
    fn test_track_columns() {
        let track = Track::new(vec![Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)]);
        assert_eq!(track.lons(), vec![1.0, 3.0]);
        assert_eq!(track.lats(), vec![2.0, 4.0]);
    }
}
