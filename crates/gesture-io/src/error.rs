//! I/O error types for gesture-io.

use std::path::PathBuf;

use gesture_dtw::DtwError;

/// Errors from reading captured sequences and writing results.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when a JSON capture is not an array of numeric arrays.
    #[error("JSON parse error in {path}")]
    JsonParse {
        /// Path to the JSON file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Returned when the file holds no samples.
    #[error("empty sequence (no samples) in {path}")]
    EmptySequence {
        /// Path to the input file.
        path: PathBuf,
    },

    /// Returned when a sample row has a different number of components than the first.
    #[error("inconsistent row length in {path}: row {row_index} has {got} components, expected {expected}")]
    InconsistentRowLength {
        /// Path to the input file.
        path: PathBuf,
        /// Zero-based sample index (excluding header).
        row_index: usize,
        /// Expected number of components (header width or first row).
        expected: usize,
        /// Actual number of components in this row.
        got: usize,
    },

    /// Returned when a cell value is NaN, Inf, or otherwise not a finite float.
    #[error("non-finite value in {path}: row {row_index}, column {col_index}, raw value \"{raw}\"")]
    NonFiniteValue {
        /// Path to the input file.
        path: PathBuf,
        /// Zero-based sample index (excluding header).
        row_index: usize,
        /// Zero-based component index.
        col_index: usize,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Returned when the parsed rows do not form a valid sequence (e.g. too many samples).
    #[error("invalid sequence in {path}")]
    Sequence {
        /// Path to the input file.
        path: PathBuf,
        /// Underlying validation error.
        source: DtwError,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a CSV output record cannot be written.
    #[error("cannot write CSV record to {path}")]
    CsvWrite {
        /// Path being written.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when a report cannot be serialized.
    #[error("cannot serialize report for {path}")]
    Serialize {
        /// Path the report was destined for.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
