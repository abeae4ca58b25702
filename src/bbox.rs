use serde::Deserialize;
use std::str::FromStr;

/// Map region in native longitude/latitude.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "BboxHelper")]
pub struct Bbox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

#[derive(Deserialize)]
struct BboxHelper {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl TryFrom<BboxHelper> for Bbox {
    type Error = String;

    fn try_from(h: BboxHelper) -> Result<Self, Self::Error> {
        Bbox::new(h.xmin, h.xmax, h.ymin, h.ymax)
    }
}

impl Bbox {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, String> {
        if !(-180.0..=180.0).contains(&xmin) || !(-180.0..=180.0).contains(&xmax) {
            return Err("Longitude values must be between -180 and 180".to_string());
        }

        if !(-90.0..=90.0).contains(&ymin) || !(-90.0..=90.0).contains(&ymax) {
            return Err("Latitude values must be between -90 and 90".to_string());
        }

        if xmin > xmax || ymin > ymax {
            return Err("Min values must be <= max values".to_string());
        }

        Ok(Bbox {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.xmin..=self.xmax).contains(&lon) && (self.ymin..=self.ymax).contains(&lat)
    }
}

/// Parses `xmin,xmax,ymin,ymax`.
impl FromStr for Bbox {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid bbox value in '{}': {}", s, e))?;

        match values[..] {
            [xmin, xmax, ymin, ymax] => Bbox::new(xmin, xmax, ymin, ymax),
            _ => Err(format!(
                "Expected 4 comma-separated values (xmin,xmax,ymin,ymax), got {}",
                values.len()
            )),
        }
    }
}
