use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::Level;

use crate::bbox::Bbox;
use crate::graticule::Graticule;
use crate::readers::ContourOptions;

pub mod error;
pub use error::ConfigError;

pub const DEFAULT_LOG_FILE: &str = "logs/stareso.log";
pub const DEFAULT_SWATH_PATTERN: &str = "*.nc";

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: Level,
    /// Log file, appended to. `None` logs to stderr only.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: Level::DEBUG,
            file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub bbox: Bbox,
    pub dlon: f64,
    pub dlat: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    contour: ContourOptions,
    logging: LoggingConfig,
    map: Option<MapConfig>,
    swath_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            contour: ContourOptions::default(),
            logging: LoggingConfig::default(),
            map: None,
            swath_pattern: DEFAULT_SWATH_PATTERN.to_string(),
        }
    }
}

// Every section is optional. Values are validated here so that a loaded
// Config is always usable as is.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            contour: Option<ContourOptions>,
            logging: Option<LoggingHelper>,
            map: Option<MapHelper>,
            swath_pattern: Option<String>,
        }

        #[derive(Deserialize)]
        struct LoggingHelper {
            level: Option<String>,
            // Explicit null disables the file output.
            #[serde(default = "default_log_file")]
            file: Option<PathBuf>,
        }

        #[derive(Deserialize)]
        struct MapHelper {
            bbox: Bbox,
            dlon: f64,
            dlat: f64,
        }

        fn default_log_file() -> Option<PathBuf> {
            Some(PathBuf::from(DEFAULT_LOG_FILE))
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        let contour = helper.contour.unwrap_or_default();
        if !contour.sentinel.is_finite() {
            return Err(D::Error::custom(ConfigError::InvalidSentinel(
                contour.sentinel,
            )));
        }

        let logging = match helper.logging {
            Some(l) => {
                let level = match l.level {
                    Some(name) => Level::from_str(&name)
                        .map_err(|_| D::Error::custom(ConfigError::InvalidLogLevel(name)))?,
                    None => Level::DEBUG,
                };
                LoggingConfig {
                    level,
                    file: l.file,
                }
            }
            None => LoggingConfig::default(),
        };

        // The bbox validates itself; the spacing must give a usable graticule.
        let map = if let Some(m) = helper.map {
            Graticule::new(&m.bbox, m.dlon, m.dlat).map_err(|reason| {
                D::Error::custom(ConfigError::InvalidSpacing {
                    dlon: m.dlon,
                    dlat: m.dlat,
                    reason,
                })
            })?;

            Some(MapConfig {
                bbox: m.bbox,
                dlon: m.dlon,
                dlat: m.dlat,
            })
        } else {
            None
        };

        Ok(Config {
            contour,
            logging,
            map,
            swath_pattern: helper
                .swath_pattern
                .unwrap_or_else(|| DEFAULT_SWATH_PATTERN.to_string()),
        })
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn contour(&self) -> ContourOptions {
        self.contour
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn map(&self) -> Option<&MapConfig> {
        self.map.as_ref()
    }

    pub fn swath_pattern(&self) -> &str {
        &self.swath_pattern
    }

    pub fn set_contour(&mut self, contour: ContourOptions) {
        self.contour = contour;
    }

    pub fn set_log_level(&mut self, level: Level) {
        self.logging.level = level;
    }
}
