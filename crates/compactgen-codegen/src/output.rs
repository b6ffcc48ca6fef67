//! Writing rendered units to disk

use crate::error::{EmissionError, EmissionResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// One rendered source file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub relative_path: PathBuf,
    pub contents: String,
}

impl GeneratedUnit {
    pub fn new(relative_path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            contents: contents.into(),
        }
    }
}

/// Files touched by [`write_units`], as full paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

impl WriteReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}

/// Write every unit under `output_dir`.
///
/// Each file is replaced atomically. A file whose current content already
/// matches is not rewritten. The first failure aborts the run.
pub fn write_units(output_dir: &Path, units: &[GeneratedUnit]) -> EmissionResult<WriteReport> {
    let mut report = WriteReport::default();

    for unit in units {
        let path = output_dir.join(&unit.relative_path);
        if fs::read(&path).is_ok_and(|existing| existing == unit.contents.as_bytes()) {
            debug!(path = %path.display(), "unchanged");
            report.unchanged.push(path);
            continue;
        }

        write_atomically(&path, unit.contents.as_bytes())?;
        debug!(path = %path.display(), bytes = unit.contents.len(), "written");
        report.written.push(path);
    }

    info!(
        written = report.written.len(),
        unchanged = report.unchanged.len(),
        output_dir = %output_dir.display(),
        "wrote generated files"
    );
    Ok(report)
}

fn write_atomically(path: &Path, contents: &[u8]) -> EmissionResult<()> {
    let failure = |source: std::io::Error| EmissionError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(failure)?;

    let mut file = NamedTempFile::new_in(dir).map_err(failure)?;
    file.write_all(contents).map_err(failure)?;
    file.flush().map_err(failure)?;
    file.persist(path).map_err(|err| failure(err.error))?;
    Ok(())
}
