//! Captured gesture reader (CSV or JSON) with full input validation.

use std::path::{Path, PathBuf};

use gesture_dtw::Sequence;
use tracing::{debug, info, instrument};

use crate::IoError;

/// On-disk layout of a captured sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceFormat {
    /// Header row, then one sample per row: `x,y,z`.
    Csv,
    /// Array of sample arrays: `[[x, y, z], ...]`.
    Json,
}

impl SequenceFormat {
    /// Pick a format from the file extension: `.json` is JSON, anything else CSV.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Reads one captured gesture from a file into a [`Sequence`].
///
/// Expected CSV format:
/// - Header row required (one name per axis, e.g. `x,y,z`)
/// - One sample per row, all rows with the header's column count
///
/// Expected JSON format: a non-empty array of equal-length numeric arrays.
///
/// Dimensionality is taken from the header (CSV) or the first sample (JSON).
/// Capacity defaults to the number of samples read; set it with
/// [`with_capacity`](Self::with_capacity) to enforce a capture limit.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::JsonParse`] | JSON is not an array of numeric arrays |
/// | [`IoError::EmptySequence`] | Zero samples |
/// | [`IoError::InconsistentRowLength`] | Row width differs from the header / first row |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, or unparseable float |
/// | [`IoError::Sequence`] | More samples than the configured capacity, or zero-width rows |
pub struct SequenceReader {
    path: PathBuf,
    format: SequenceFormat,
    capacity: Option<usize>,
}

impl SequenceReader {
    /// Create a new reader for the given file, inferring the format from its extension.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            format: SequenceFormat::from_path(path),
            capacity: None,
        }
    }

    /// Override the inferred format.
    #[must_use]
    pub fn with_format(mut self, format: SequenceFormat) -> Self {
        self.format = format;
        self
    }

    /// Reject files holding more than `capacity` samples.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Read and validate the file, returning a [`Sequence`].
    #[instrument(skip(self), fields(path = %self.path.display(), format = ?self.format))]
    pub fn read(&self) -> Result<Sequence, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        let rows = match self.format {
            SequenceFormat::Csv => self.read_csv(file)?,
            SequenceFormat::Json => self.read_json(file)?,
        };

        if rows.is_empty() {
            return Err(IoError::EmptySequence {
                path: self.path.clone(),
            });
        }

        let capacity = self.capacity.unwrap_or(rows.len());
        let seq = Sequence::from_rows(&rows, capacity).map_err(|e| IoError::Sequence {
            path: self.path.clone(),
            source: e,
        })?;

        info!(n = seq.len(), dim = seq.dim(), "sequence loaded");
        Ok(seq)
    }

    fn read_csv(&self, file: std::fs::File) -> Result<Vec<Vec<f64>>, IoError> {
        // flexible(true) so that our InconsistentRowLength check fires instead
        // of a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?;
        let expected = header.len();
        debug!(expected, "read CSV header");

        let mut rows = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;

            if record.len() != expected {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected,
                    got: record.len(),
                });
            }

            let mut values = Vec::with_capacity(expected);
            for (col_index, raw) in record.iter().enumerate() {
                let value = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| IoError::NonFiniteValue {
                        path: self.path.clone(),
                        row_index,
                        col_index,
                        raw: raw.to_string(),
                    })?;
                values.push(value);
            }
            rows.push(values);
        }
        Ok(rows)
    }

    fn read_json(&self, file: std::fs::File) -> Result<Vec<Vec<f64>>, IoError> {
        let rows: Vec<Vec<f64>> =
            serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| {
                IoError::JsonParse {
                    path: self.path.clone(),
                    source: e,
                }
            })?;

        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some((row_index, row)) =
                rows.iter().enumerate().find(|(_, r)| r.len() != expected)
            {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected,
                    got: row.len(),
                });
            }
        }
        Ok(rows)
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}
