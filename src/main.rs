use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use gesture_dtw::{Dtw, DtwError, GestureConfig, GestureLock, Sequence, standard_scale};
use gesture_io::{ReportWriter, SequenceReader, SequenceWriter, VerificationReport};

#[derive(Parser)]
#[command(name = "gesture-lock")]
#[command(about = "Gesture-based unlock: compare motion captures by dynamic time warping")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

/// Shared comparison parameters.
#[derive(Args, Debug, Clone)]
struct ComparisonArgs {
    /// Maximum samples per capture (2 s at 50 Hz = 100; at most 4096)
    #[arg(long, default_value_t = gesture_dtw::DEFAULT_MAX_LEN)]
    max_len: usize,

    /// Motion axes per sample
    #[arg(long, default_value_t = gesture_dtw::DEFAULT_DIM)]
    dim: usize,

    /// Minkowski exponent of the per-sample distance (2 = Euclidean, 1 = Manhattan)
    #[arg(long, default_value_t = 2.0)]
    p_norm: f64,

    /// Highest alignment cost accepted as a match
    #[arg(long, default_value_t = gesture_dtw::DEFAULT_TOLERANCE)]
    tolerance: f64,
}

#[derive(Subcommand)]
enum Command {
    /// Enroll the key capture, verify the candidate against it, and print the verdict
    Compare {
        /// Key gesture capture (CSV with header, or JSON array of samples)
        #[arg(long)]
        key: PathBuf,

        /// Candidate gesture capture
        #[arg(long)]
        candidate: PathBuf,

        /// Also write the verification report to this JSON file
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        comparison: ComparisonArgs,
    },

    /// Print the DTW alignment cost between two captures and whether it is within tolerance
    Score {
        /// First capture
        #[arg(long)]
        key: PathBuf,

        /// Second capture
        #[arg(long)]
        candidate: PathBuf,

        /// Align the captures as read, without standard scaling
        #[arg(long, default_value_t = false)]
        raw: bool,

        #[command(flatten)]
        comparison: ComparisonArgs,
    },

    /// Standard-scale a capture and write it as CSV
    Normalize {
        /// Capture to normalize
        #[arg(long)]
        input: PathBuf,

        /// Output CSV path
        #[arg(long)]
        output: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct ScoreOutput {
    score: f64,
    tolerance: f64,
    within_tolerance: bool,
    margin: f64,
    p_norm: f64,
    normalized: bool,
    key_len: usize,
    candidate_len: usize,
}

#[derive(Serialize)]
struct NormalizeOutput {
    n_samples: usize,
    dim: usize,
    means: Vec<f64>,
    stds: Vec<f64>,
    degenerate: Vec<usize>,
}

fn build_config(args: &ComparisonArgs) -> Result<GestureConfig> {
    let config = GestureConfig::new()
        .with_max_len(args.max_len)?
        .with_dim(args.dim)?
        .with_p_norm(args.p_norm)?
        .with_tolerance(args.tolerance)?;
    Ok(config)
}

fn read_capture(path: &Path, max_len: usize, what: &str) -> Result<Sequence> {
    let seq = SequenceReader::new(path)
        .with_capacity(max_len)
        .read()
        .with_context(|| format!("failed to read {what} capture"))?;
    info!(what, n = seq.len(), dim = seq.dim(), "capture loaded");
    Ok(seq)
}

fn check_dim(seq: &Sequence, config: &GestureConfig, what: &str) -> Result<()> {
    if seq.dim() != config.dim() {
        return Err(DtwError::DimensionMismatch {
            key: config.dim(),
            candidate: seq.dim(),
        })
        .with_context(|| format!("{what} capture does not have --dim components"));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Compare {
            key,
            candidate,
            report,
            comparison,
        } => {
            let config = build_config(&comparison).context("invalid comparison settings")?;

            // 1. Read captures
            let key_seq = read_capture(&key, config.max_len(), "key")?;
            let candidate_seq = read_capture(&candidate, config.max_len(), "candidate")?;
            let (key_len, candidate_len) = (key_seq.len(), candidate_seq.len());

            // 2. Enroll, then verify
            let mut lock = GestureLock::new(config);
            let key_stats = lock.enroll(key_seq).context("enrollment failed")?;
            let attempt = lock.verify(candidate_seq).context("verification failed")?;

            // 3. Report
            let summary =
                VerificationReport::new(&config, key_len, &key_stats, candidate_len, &attempt);
            if let Some(path) = report {
                ReportWriter::new(&path).write(&summary)?;
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Score {
            key,
            candidate,
            raw,
            comparison,
        } => {
            let config = build_config(&comparison).context("invalid comparison settings")?;

            let mut key_seq = read_capture(&key, config.max_len(), "key")?;
            let mut candidate_seq = read_capture(&candidate, config.max_len(), "candidate")?;
            check_dim(&key_seq, &config, "key")?;
            check_dim(&candidate_seq, &config, "candidate")?;
            if !raw {
                standard_scale(&mut key_seq);
                standard_scale(&mut candidate_seq);
            }

            let score = Dtw::new(config.p_norm())
                .distance(&key_seq, &candidate_seq)
                .context("alignment failed")?;

            let tolerance = config.tolerance();
            let output = ScoreOutput {
                score: score.value(),
                tolerance: tolerance.value(),
                within_tolerance: score.within(tolerance),
                margin: score.margin(tolerance),
                p_norm: config.p_norm().value(),
                normalized: !raw,
                key_len: key_seq.len(),
                candidate_len: candidate_seq.len(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Normalize { input, output } => {
            let mut seq = SequenceReader::new(&input)
                .read()
                .context("failed to read capture")?;
            let stats = standard_scale(&mut seq);
            SequenceWriter::new(&output).write(&seq)?;

            let summary = NormalizeOutput {
                n_samples: seq.len(),
                dim: seq.dim(),
                means: stats.means,
                stds: stats.stds,
                degenerate: stats.degenerate,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
