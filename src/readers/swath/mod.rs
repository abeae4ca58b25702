//! Level-2 satellite SST swaths.
//!
//! A granule is a grouped NetCDF-4 file with a global `platform` attribute,
//! per-scan-line `year`/`day`, navigation `longitude`/`latitude` and one of
//! the two SST products with its quality flags.

pub mod nc;

use std::path::PathBuf;
use thiserror::Error;

use super::{DataReader, Grid, Measurement, Swath, SwathRead};
use crate::error::ReadError;

pub use nc::NcSwathFile;

pub const PLATFORM_ATTRIBUTE: &str = "platform";
pub const SCAN_LINE_GROUP: &str = "scan_line_attributes";
pub const NAVIGATION_GROUP: &str = "navigation_data";
pub const GEOPHYSICAL_GROUP: &str = "geophysical_data";

const PRIMARY_PAIR: (&str, &str) = ("sst", "qual_sst");
const SECONDARY_PAIR: (&str, &str) = ("sst4", "qual_sst4");

#[derive(Error, Debug, PartialEq)]
pub enum SourceError {
    #[error("missing global attribute '{0}'")]
    MissingAttribute(String),

    #[error("missing group '{0}'")]
    MissingGroup(String),

    #[error("missing variable '{variable}' in group '{group}'")]
    MissingVariable { group: String, variable: String },

    #[error("{0}")]
    Structure(String),

    #[error("{0}")]
    Backend(String),
}

/// Values of one variable, flattened in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawVariable<T> {
    pub shape: Vec<usize>,
    pub values: Vec<T>,
}

impl<T> RawVariable<T> {
    fn into_grid(self, name: &str) -> Result<Grid<T>, SourceError> {
        let &[rows, cols] = &self.shape[..] else {
            return Err(SourceError::Structure(format!(
                "variable '{}' must be two-dimensional, found {} dimension(s)",
                name,
                self.shape.len()
            )));
        };

        Grid::new(rows, cols, self.values).ok_or_else(|| {
            SourceError::Structure(format!(
                "variable '{}' does not hold {} x {} values",
                name, rows, cols
            ))
        })
    }

    fn first(self, name: &str) -> Result<T, SourceError> {
        self.values
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::Structure(format!("variable '{}' is empty", name)))
    }
}

/// Read access to a grouped scientific dataset.
pub trait SwathSource {
    fn global_string_attribute(&self, name: &str) -> Result<String, SourceError>;

    /// Reads a variable as floats, with packing and fill values resolved.
    fn read_f64(&self, group: &str, variable: &str) -> Result<RawVariable<f64>, SourceError>;

    fn read_i32(&self, group: &str, variable: &str) -> Result<RawVariable<i32>, SourceError>;
}

fn read_measurement_pair<S: SwathSource>(
    source: &S,
    (sst_name, qual_name): (&str, &str),
) -> Result<(Grid<f64>, Grid<i32>), SourceError> {
    let sst = source
        .read_f64(GEOPHYSICAL_GROUP, sst_name)?
        .into_grid(sst_name)?;
    let quality = source
        .read_i32(GEOPHYSICAL_GROUP, qual_name)?
        .into_grid(qual_name)?;
    Ok((sst, quality))
}

/// Reads `sst`/`qual_sst`, or `sst4`/`qual_sst4` when the first pair is not
/// in the file. Any other failure is returned as is.
pub fn read_measurement<S: SwathSource>(source: &S) -> Result<Measurement, SourceError> {
    match read_measurement_pair(source, PRIMARY_PAIR) {
        Ok((sst, quality)) => Ok(Measurement::Primary { sst, quality }),
        Err(SourceError::MissingVariable { .. }) => {
            match read_measurement_pair(source, SECONDARY_PAIR) {
                Ok((sst, quality)) => Ok(Measurement::Secondary { sst, quality }),
                Err(SourceError::MissingVariable { .. }) => Err(SourceError::Structure(format!(
                    "group '{}' holds neither {}/{} nor {}/{}",
                    GEOPHYSICAL_GROUP,
                    PRIMARY_PAIR.0,
                    PRIMARY_PAIR.1,
                    SECONDARY_PAIR.0,
                    SECONDARY_PAIR.1
                ))),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

/// Builds a swath from any source. The whole granule is assumed to be
/// acquired on a single day, so only the first `year` and `day` are used.
pub fn extract_swath<S: SwathSource>(source: &S) -> Result<Swath, SourceError> {
    let platform = source.global_string_attribute(PLATFORM_ATTRIBUTE)?;

    let year = source.read_i32(SCAN_LINE_GROUP, "year")?.first("year")?;
    let day = source.read_i32(SCAN_LINE_GROUP, "day")?.first("day")?;

    let longitude = source
        .read_f64(NAVIGATION_GROUP, "longitude")?
        .into_grid("longitude")?;
    let latitude = source
        .read_f64(NAVIGATION_GROUP, "latitude")?
        .into_grid("latitude")?;

    let measurement = read_measurement(source)?;

    Swath::new(platform, year, day, longitude, latitude, measurement)
        .map_err(SourceError::Structure)
}

pub struct SwathReader {
    pub file_name: PathBuf,
}

impl SwathReader {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        SwathReader {
            file_name: file_name.into(),
        }
    }
}

impl DataReader for SwathReader {
    type Output = SwathRead;

    fn read_data(&self) -> Result<SwathRead, ReadError> {
        if !self.file_name.exists() {
            return Ok(SwathRead::Absent);
        }

        let to_read_error = |e: SourceError| ReadError::swath_format(&self.file_name, e.to_string());

        // The handle is closed when `file` goes out of scope, on every path.
        let file = NcSwathFile::open(&self.file_name).map_err(to_read_error)?;
        let swath = extract_swath(&file).map_err(to_read_error)?;

        Ok(SwathRead::Present(swath))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[derive(Default)]
    struct MemorySource {
        attributes: HashMap<String, String>,
        floats: HashMap<(String, String), RawVariable<f64>>,
        ints: HashMap<(String, String), RawVariable<i32>>,
    }

    impl MemorySource {
        fn granule(rows: usize, cols: usize) -> Self {
            let n = rows * cols;
            let mut source = MemorySource::default();
            source
                .attributes
                .insert(PLATFORM_ATTRIBUTE.into(), "Aqua".into());
            source.int(SCAN_LINE_GROUP, "year", vec![rows], vec![2014; rows]);
            source.int(SCAN_LINE_GROUP, "day", vec![rows], vec![145; rows]);
            source.float(
                NAVIGATION_GROUP,
                "longitude",
                vec![rows, cols],
                (0..n).map(|i| -5.0 + i as f64 * 0.1).collect(),
            );
            source.float(
                NAVIGATION_GROUP,
                "latitude",
                vec![rows, cols],
                (0..n).map(|i| 36.0 + i as f64 * 0.1).collect(),
            );
            source
        }

        fn float(&mut self, group: &str, name: &str, shape: Vec<usize>, values: Vec<f64>) {
            self.floats
                .insert((group.into(), name.into()), RawVariable { shape, values });
        }

        fn int(&mut self, group: &str, name: &str, shape: Vec<usize>, values: Vec<i32>) {
            self.ints
                .insert((group.into(), name.into()), RawVariable { shape, values });
        }

        fn has_group(&self, group: &str) -> bool {
            self.floats.keys().chain(self.ints.keys()).any(|(g, _)| g == group)
        }

        fn lookup<T: Clone>(
            &self,
            table: &HashMap<(String, String), RawVariable<T>>,
            group: &str,
            variable: &str,
        ) -> Result<RawVariable<T>, SourceError> {
            if !self.has_group(group) {
                return Err(SourceError::MissingGroup(group.into()));
            }
            table
                .get(&(group.to_string(), variable.to_string()))
                .cloned()
                .ok_or_else(|| SourceError::MissingVariable {
                    group: group.into(),
                    variable: variable.into(),
                })
        }
    }

    impl SwathSource for MemorySource {
        fn global_string_attribute(&self, name: &str) -> Result<String, SourceError> {
            self.attributes
                .get(name)
                .cloned()
                .ok_or_else(|| SourceError::MissingAttribute(name.into()))
        }

        fn read_f64(&self, group: &str, variable: &str) -> Result<RawVariable<f64>, SourceError> {
            self.lookup(&self.floats, group, variable)
        }

        fn read_i32(&self, group: &str, variable: &str) -> Result<RawVariable<i32>, SourceError> {
            self.lookup(&self.ints, group, variable)
        }
    }

    #[test]
    fn test_primary_variant_preferred() {
        let mut source = MemorySource::granule(2, 3);
        source.float(GEOPHYSICAL_GROUP, "sst", vec![2, 3], vec![18.5; 6]);
        source.int(GEOPHYSICAL_GROUP, "qual_sst", vec![2, 3], vec![0; 6]);
        source.float(GEOPHYSICAL_GROUP, "sst4", vec![2, 3], vec![1.0; 6]);
        source.int(GEOPHYSICAL_GROUP, "qual_sst4", vec![2, 3], vec![4; 6]);

        let swath = extract_swath(&source).unwrap();

        assert!(matches!(swath.measurement(), Measurement::Primary { .. }));
        assert_eq!(swath.measurement().sst().values(), &[18.5; 6]);
        assert_eq!(swath.platform(), "Aqua");
        assert_eq!(swath.year(), 2014);
        assert_eq!(swath.day(), 145);
        assert_eq!(swath.shape(), (2, 3));
    }

    #[test]
    fn test_falls_back_to_sst4() {
        let mut source = MemorySource::granule(2, 2);
        source.float(GEOPHYSICAL_GROUP, "sst4", vec![2, 2], vec![20.0, 20.5, 21.0, 21.5]);
        source.int(GEOPHYSICAL_GROUP, "qual_sst4", vec![2, 2], vec![0, 1, 2, 3]);

        let swath = extract_swath(&source).unwrap();

        match swath.measurement() {
            Measurement::Secondary { sst, quality } => {
                assert_eq!(sst.get(1, 0), Some(&21.0));
                assert_eq!(quality.get(1, 1), Some(&3));
            }
            other => panic!("expected sst4 variant, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_quality_companion_falls_back_too() {
        let mut source = MemorySource::granule(1, 2);
        source.float(GEOPHYSICAL_GROUP, "sst", vec![1, 2], vec![10.0, 11.0]);
        source.float(GEOPHYSICAL_GROUP, "sst4", vec![1, 2], vec![12.0, 13.0]);
        source.int(GEOPHYSICAL_GROUP, "qual_sst4", vec![1, 2], vec![0, 0]);

        let measurement = read_measurement(&source).unwrap();

        assert_eq!(measurement.variable_name(), "sst4");
    }

    #[test]
    fn test_both_variants_missing_is_an_error() {
        let mut source = MemorySource::granule(2, 2);
        source.float(GEOPHYSICAL_GROUP, "chlor_a", vec![2, 2], vec![0.1; 4]);

        let err = extract_swath(&source).unwrap_err();

        match err {
            SourceError::Structure(reason) => assert!(reason.contains("sst4")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_group_is_not_a_fallback() {
        let source = MemorySource::granule(2, 2);

        let err = extract_swath(&source).unwrap_err();

        assert_eq!(err, SourceError::MissingGroup(GEOPHYSICAL_GROUP.into()));
    }

    #[test]
    fn test_one_dimensional_grid_rejected() {
        let mut source = MemorySource::granule(2, 2);
        source.float(NAVIGATION_GROUP, "longitude", vec![4], vec![0.0; 4]);
        source.float(GEOPHYSICAL_GROUP, "sst", vec![2, 2], vec![0.0; 4]);
        source.int(GEOPHYSICAL_GROUP, "qual_sst", vec![2, 2], vec![0; 4]);

        let err = extract_swath(&source).unwrap_err();

        assert!(matches!(err, SourceError::Structure(_)));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut source = MemorySource::granule(2, 2);
        source.float(GEOPHYSICAL_GROUP, "sst", vec![1, 4], vec![0.0; 4]);
        source.int(GEOPHYSICAL_GROUP, "qual_sst", vec![1, 4], vec![0; 4]);

        let err = extract_swath(&source).unwrap_err();

        assert!(matches!(err, SourceError::Structure(_)));
    }

    #[test]
    fn test_empty_year_rejected() {
        let mut source = MemorySource::granule(2, 2);
        source.int(SCAN_LINE_GROUP, "year", vec![0], vec![]);
        source.float(GEOPHYSICAL_GROUP, "sst", vec![2, 2], vec![0.0; 4]);
        source.int(GEOPHYSICAL_GROUP, "qual_sst", vec![2, 2], vec![0; 4]);

        assert!(extract_swath(&source).is_err());
    }

    #[test]
    fn test_missing_platform_rejected() {
        let mut source = MemorySource::granule(1, 1);
        source.attributes.clear();

        let err = extract_swath(&source).unwrap_err();

        assert_eq!(err, SourceError::MissingAttribute(PLATFORM_ATTRIBUTE.into()));
    }

    #[test]
    fn test_nonexistent_path_is_absent() {
        let dir = tempdir().unwrap();
        let read = SwathReader::new(dir.path().join("A2014145.L2_LAC_SST.nc"))
            .read_data()
            .unwrap();
        assert!(read.is_absent());
    }

    #[test]
    fn test_non_netcdf_file_is_format_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.nc");
        std::fs::write(&path, b"not a netcdf file").unwrap();

        let err = SwathReader::new(&path).read_data().unwrap_err();

        assert!(matches!(err, ReadError::SwathFormat { .. }));
    }
}
