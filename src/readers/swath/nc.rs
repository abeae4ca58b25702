use std::path::Path;

use super::{RawVariable, SourceError, SwathSource};

/// A swath granule opened with the native netcdf library.
///
/// The underlying handle is closed when this value is dropped.
pub struct NcSwathFile {
    file: netcdf::File,
}

impl NcSwathFile {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = netcdf::open(path)
            .map_err(|e| SourceError::Backend(format!("Failed to open NetCDF: {}", e)))?;
        Ok(NcSwathFile { file })
    }

    fn with_variable<T>(
        &self,
        group: &str,
        variable: &str,
        read: impl FnOnce(&netcdf::Variable) -> Result<T, SourceError>,
    ) -> Result<T, SourceError> {
        let nc_group = self
            .file
            .group(group)
            .map_err(|e| SourceError::Backend(format!("Failed to open group {}: {}", group, e)))?
            .ok_or_else(|| SourceError::MissingGroup(group.to_string()))?;

        let var = nc_group
            .variable(variable)
            .ok_or_else(|| SourceError::MissingVariable {
                group: group.to_string(),
                variable: variable.to_string(),
            })?;

        read(&var)
    }
}

fn shape_of(var: &netcdf::Variable) -> Vec<usize> {
    var.dimensions().iter().map(|d| d.len()).collect()
}

fn read_error(name: &str, e: netcdf::Error) -> SourceError {
    SourceError::Backend(format!("Failed to read {}: {}", name, e))
}

/// Check if a variable has an attribute with the given name.
/// Avoids HDF5 error output when looking up optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

/// Packing and masking attributes of a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Packing {
    scale_factor: f64,
    add_offset: f64,
    fill_value: Option<f64>,
    valid_min: Option<f64>,
    valid_max: Option<f64>,
}

impl Packing {
    fn of(var: &netcdf::Variable) -> Self {
        Packing {
            scale_factor: get_f64_attr(var, "scale_factor").unwrap_or(1.0),
            add_offset: get_f64_attr(var, "add_offset").unwrap_or(0.0),
            fill_value: get_f64_attr(var, "_FillValue"),
            valid_min: get_f64_attr(var, "valid_min"),
            valid_max: get_f64_attr(var, "valid_max"),
        }
    }

    /// Masked cells become NaN; the range check applies to packed values.
    fn unpack(&self, raw: f64) -> f64 {
        let masked = self.fill_value.is_some_and(|fv| raw == fv)
            || self.valid_min.is_some_and(|min| raw < min)
            || self.valid_max.is_some_and(|max| raw > max);

        if masked {
            f64::NAN
        } else {
            raw * self.scale_factor + self.add_offset
        }
    }
}

impl SwathSource for NcSwathFile {
    fn global_string_attribute(&self, name: &str) -> Result<String, SourceError> {
        let attr = self
            .file
            .attribute(name)
            .ok_or_else(|| SourceError::MissingAttribute(name.to_string()))?;

        match attr.value().map_err(|e| read_error(name, e))? {
            netcdf::AttributeValue::Str(value) => Ok(value),
            netcdf::AttributeValue::Strs(values) => Ok(values.join(" ")),
            other => Err(SourceError::Structure(format!(
                "attribute '{}' is not a string: {:?}",
                name, other
            ))),
        }
    }

    fn read_f64(&self, group: &str, variable: &str) -> Result<RawVariable<f64>, SourceError> {
        self.with_variable(group, variable, |var| {
            let raw: Vec<f64> = var.get_values(..).map_err(|e| read_error(variable, e))?;
            let packing = Packing::of(var);

            Ok(RawVariable {
                shape: shape_of(var),
                values: raw.into_iter().map(|v| packing.unpack(v)).collect(),
            })
        })
    }

    fn read_i32(&self, group: &str, variable: &str) -> Result<RawVariable<i32>, SourceError> {
        self.with_variable(group, variable, |var| {
            let values: Vec<i32> = var.get_values(..).map_err(|e| read_error(variable, e))?;

            Ok(RawVariable {
                shape: shape_of(var),
                values,
            })
        })
    }
}
