//! Writers for normalized sequences (CSV) and verification reports (JSON).

use std::fs;
use std::path::{Path, PathBuf};

use gesture_dtw::Sequence;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::report::VerificationReport;

/// Writes a [`Sequence`] as CSV with a `d0,d1,...` header.
pub struct SequenceWriter {
    path: PathBuf,
}

impl SequenceWriter {
    /// Create a writer targeting `path`. Nothing is written until [`write`](Self::write).
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Write every sample of `seq`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::OutputDirCreate`] | Parent directory cannot be created |
    /// | [`IoError::WriteFile`] | File cannot be created |
    /// | [`IoError::CsvWrite`] | A record cannot be written |
    #[instrument(skip_all, fields(path = %self.path.display(), n = seq.len()))]
    pub fn write(&self, seq: &Sequence) -> Result<(), IoError> {
        ensure_parent(&self.path)?;
        let file = fs::File::create(&self.path).map_err(|e| IoError::WriteFile {
            path: self.path.clone(),
            source: e,
        })?;
        let mut wtr = csv::Writer::from_writer(file);

        let header: Vec<String> = (0..seq.dim()).map(|d| format!("d{d}")).collect();
        wtr.write_record(&header).map_err(|e| self.csv_error(e))?;
        for sample in seq {
            wtr.write_record(sample.iter().map(f64::to_string))
                .map_err(|e| self.csv_error(e))?;
        }
        wtr.flush().map_err(|e| IoError::WriteFile {
            path: self.path.clone(),
            source: e,
        })?;

        info!("sequence written");
        Ok(())
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvWrite {
            path: self.path.clone(),
            source: e,
        }
    }
}

/// Writes a [`VerificationReport`] as pretty-printed JSON.
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    /// Create a writer targeting `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Serialize and write `report`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::OutputDirCreate`] | Parent directory cannot be created |
    /// | [`IoError::Serialize`] | The report cannot be serialized |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn write(&self, report: &VerificationReport) -> Result<(), IoError> {
        ensure_parent(&self.path)?;
        let json = serde_json::to_string_pretty(report).map_err(|e| IoError::Serialize {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, json).map_err(|e| IoError::WriteFile {
            path: self.path.clone(),
            source: e,
        })?;

        info!(verdict = %report.verdict, "verification report written");
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> Result<(), IoError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(|e| IoError::OutputDirCreate {
            path: dir.to_path_buf(),
            source: e,
        })?;
        debug!(dir = %dir.display(), "output directory ready");
    }
    Ok(())
}
