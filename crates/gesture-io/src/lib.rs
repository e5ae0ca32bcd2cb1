//! File I/O, validation, and serialization for the gesture-lock harness.

mod error;
mod reader;
mod report;
mod writer;

pub use error::IoError;
pub use reader::{SequenceFormat, SequenceReader};
pub use report::VerificationReport;
pub use writer::{ReportWriter, SequenceWriter};
