//! Readers turning oceanographic campaign data into plain coordinate and
//! variable sequences: cruise-leg position logs, coastline contour files
//! and Level-2 satellite SST swaths.

pub mod batch;
pub mod bbox;
pub mod cli;
pub mod config;
pub mod error;
pub mod graticule;
pub mod logging;
pub mod readers;

pub use error::{ReadError, Result};
