pub mod contour;
pub mod leg;
pub mod swath;
pub mod types;
pub mod utils;

pub use contour::{ContourOptions, ContourReader, ContourSegmenter, SegmenterState};
pub use leg::LegReader;
pub use swath::SwathReader;
pub use types::{
    ContourSet, Coordinate, DataReader, Grid, Measurement, Segment, Swath, SwathRead, Track,
};

use crate::error::ReadError;
use std::path::Path;

pub fn read_leg_track(file_name: impl AsRef<Path>) -> Result<Track, ReadError> {
    LegReader::new(file_name.as_ref()).read_data()
}

pub fn read_contours(
    file_name: impl AsRef<Path>,
    options: ContourOptions,
) -> Result<ContourSet, ReadError> {
    ContourReader::new(file_name.as_ref())
        .with_options(options)
        .read_data()
}

pub fn read_swath(file_name: impl AsRef<Path>) -> Result<SwathRead, ReadError> {
    SwathReader::new(file_name.as_ref()).read_data()
}
