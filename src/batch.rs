use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::ReadError;
use crate::readers::{DataReader, Swath, SwathRead, SwathReader};

#[derive(Debug)]
pub enum SwathOutcome {
    Read(Swath),
    Absent,
    Failed(ReadError),
}

#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<(PathBuf, SwathOutcome)>,
}

impl BatchReport {
    pub fn read_count(&self) -> usize {
        self.count(|o| matches!(o, SwathOutcome::Read(_)))
    }

    pub fn absent_count(&self) -> usize {
        self.count(|o| matches!(o, SwathOutcome::Absent))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, SwathOutcome::Failed(_)))
    }

    pub fn swaths(&self) -> impl Iterator<Item = &Swath> {
        self.outcomes.iter().filter_map(|(_, o)| match o {
            SwathOutcome::Read(swath) => Some(swath),
            _ => None,
        })
    }

    fn count(&self, f: impl Fn(&SwathOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| f(o)).count()
    }
}

/// Reads a list of swath files one by one. A failing file is logged and
/// recorded; the remaining files are still read.
#[derive(Debug)]
pub struct BatchRunner {
    files: Vec<PathBuf>,
}

impl BatchRunner {
    pub fn new(files: Vec<PathBuf>) -> Self {
        BatchRunner { files }
    }

    /// Collects files under `base_dir` whose name matches `pattern`,
    /// sorted by path.
    pub fn from_directory(base_dir: &Path, pattern: &str) -> Result<Self, String> {
        let pattern = Pattern::new(pattern)
            .map_err(|e| format!("Invalid file pattern '{}': {}", pattern, e))?;

        if !base_dir.is_dir() {
            return Err(format!("Not a directory: {}", base_dir.display()));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(base_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| {
                entry.file_type().is_file()
                    && pattern.matches(&entry.file_name().to_string_lossy())
            })
            .map(|entry| entry.into_path())
            .collect();
        files.sort();

        debug!(
            "Found {} file(s) matching '{}' under {}",
            files.len(),
            pattern,
            base_dir.display()
        );

        Ok(BatchRunner { files })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn process(&self) -> BatchReport {
        let mut outcomes = Vec::with_capacity(self.files.len());

        for path in &self.files {
            let outcome = match SwathReader::new(path).read_data() {
                Ok(SwathRead::Present(swath)) => {
                    info!(
                        "Read {} swath from {} ({} x {}, {})",
                        swath.platform(),
                        path.display(),
                        swath.shape().0,
                        swath.shape().1,
                        swath.measurement().variable_name()
                    );
                    SwathOutcome::Read(swath)
                }
                Ok(SwathRead::Absent) => {
                    warn!("Swath file {} is absent, skipping", path.display());
                    SwathOutcome::Absent
                }
                Err(e) => {
                    warn!("Could not read {}: {}", path.display(), e);
                    SwathOutcome::Failed(e)
                }
            };
            outcomes.push((path.clone(), outcome));
        }

        let report = BatchReport { outcomes };
        info!(
            "Batch done: {} read, {} absent, {} failed",
            report.read_count(),
            report.absent_count(),
            report.failed_count()
        );
        report
    }
}
