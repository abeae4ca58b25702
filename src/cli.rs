//! Command-line interface for the stareso readers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

use crate::bbox::Bbox;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "stareso",
    version,
    about = "Read cruise legs, coastline contours and Level-2 SST swaths"
)]
pub struct Args {
    /// JSON configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Read a cruise-leg position log
    Leg {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Split a coastline contour file into segments
    Contour {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Longitude value marking the end of a segment
        #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
        sentinel: Option<f64>,

        /// Keep points after the last sentinel as a final segment
        #[arg(long = "flush-trailing")]
        flush_trailing: bool,
    },
    /// Read a Level-2 SST swath
    Swath {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Read every swath file under a directory
    Batch {
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// File name pattern, e.g. "*.L2_LAC_SST*.nc"
        #[arg(long, value_name = "GLOB")]
        pattern: Option<String>,
    },
    /// Print graticule tick positions for a map region
    Graticule {
        /// Region as xmin,xmax,ymin,ymax
        #[arg(long, value_name = "BBOX", allow_hyphen_values = true)]
        bbox: Option<Bbox>,

        #[arg(long, value_name = "DEG")]
        dlon: Option<f64>,

        #[arg(long, value_name = "DEG")]
        dlat: Option<f64>,
    },
}

impl Args {
    /// Level requested on the command line, if any.
    pub fn log_level(&self) -> Option<Level> {
        match self.verbose {
            0 => None,
            1 => Some(Level::DEBUG),
            _ => Some(Level::TRACE),
        }
    }
}
