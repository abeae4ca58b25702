use clap::Parser;
use std::process;
use tracing::{debug, error};

use stareso::batch::BatchRunner;
use stareso::cli::{Args, Commands};
use stareso::config::Config;
use stareso::graticule::Graticule;
use stareso::logging;
use stareso::readers::{self, ContourOptions, SwathRead};

fn main() {
    let args = Args::parse();

    let mut config = match &args.config_file {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    if let Some(level) = args.log_level() {
        config.set_log_level(level);
    }

    if let Err(e) = logging::init(config.logging()) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(args.command, &config) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Leg { file } => {
            let track = readers::read_leg_track(&file)?;
            debug!("Read {} leg positions from {}", track.len(), file.display());
            println!("{}", track);
        }
        Commands::Contour {
            file,
            sentinel,
            flush_trailing,
        } => {
            let defaults = config.contour();
            let options = ContourOptions {
                sentinel: sentinel.unwrap_or(defaults.sentinel),
                flush_incomplete_trailing_segment: flush_trailing
                    || defaults.flush_incomplete_trailing_segment,
            };

            let contours = readers::read_contours(&file, options)?;
            debug!(
                "Read {} contour segments from {}",
                contours.len(),
                file.display()
            );

            println!(
                "Segments: {}, Total points: {}",
                contours.len(),
                contours.point_count()
            );
            for (i, segment) in contours.segments().iter().enumerate() {
                println!("  {}: {} points", i + 1, segment.len());
            }
        }
        Commands::Swath { file } => match readers::read_swath(&file)? {
            SwathRead::Present(swath) => println!("{}", swath),
            SwathRead::Absent => println!("No swath file at {}", file.display()),
        },
        Commands::Batch { dir, pattern } => {
            let pattern = pattern.as_deref().unwrap_or(config.swath_pattern());
            let runner = BatchRunner::from_directory(&dir, pattern)?;
            let report = runner.process();

            println!(
                "Swath files: {}, Read: {}, Absent: {}, Failed: {}",
                report.outcomes.len(),
                report.read_count(),
                report.absent_count(),
                report.failed_count()
            );
            for swath in report.swaths() {
                let date = swath
                    .acquisition_date()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "unknown date".to_string());
                println!(
                    "  {} {} {}",
                    swath.platform(),
                    date,
                    swath.measurement().variable_name()
                );
            }
        }
        Commands::Graticule { bbox, dlon, dlat } => {
            let map = config.map();
            let bbox = bbox
                .or_else(|| map.map(|m| m.bbox))
                .ok_or("No map region given (use --bbox or a config file)")?;
            let dlon = dlon.or_else(|| map.map(|m| m.dlon)).unwrap_or(1.0);
            let dlat = dlat.or_else(|| map.map(|m| m.dlat)).unwrap_or(1.0);
            let graticule = Graticule::new(&bbox, dlon, dlat)?;
            println!("Parallels: {:?}", graticule.parallels.positions);
            println!("Meridians: {:?}", graticule.meridians.positions);
        }
    }

    Ok(())
}
