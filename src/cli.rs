//! Command line surface of the `chroma-key` binary.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;

use crate::chroma_key::auto_key::JumpComparison;
use crate::chroma_key::threshold_key::ReferenceSampling;
use crate::grid::GridConfig;
use crate::pipeline::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "chroma-key")]
#[command(version, about = "Replace a chroma background with another image", long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Foreground image shot against the chroma background
    #[arg(value_name = "FOREGROUND")]
    pub foreground: PathBuf,

    /// Image that replaces the chroma background
    #[arg(value_name = "BACKGROUND")]
    pub background: PathBuf,

    /// Color distance threshold for the first output; unparsable text reads as 0
    #[arg(value_name = "THRESHOLD", allow_hyphen_values = true)]
    pub threshold: String,

    /// Output composited with THRESHOLD
    #[arg(value_name = "OUT1")]
    pub output_threshold: PathBuf,

    /// Output composited with the self-calibrated threshold
    #[arg(value_name = "OUT2")]
    pub output_auto: PathBuf,

    /// Ignored extra arguments
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Width and height every input image must have
    #[arg(long, value_name = "N", default_value_t = GridConfig::default().dimension)]
    pub size: u32,

    /// How the border strips are averaged for THRESHOLD keying
    #[arg(long, value_enum, default_value_t = SamplingArg::Faithful)]
    pub sampling: SamplingArg,

    /// Keep only pixels strictly beyond the calibrated threshold
    #[arg(long)]
    pub strict_jump: bool,

    /// Also write both masks as grayscale images into DIR
    #[arg(long, value_name = "DIR")]
    pub mask_dir: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Number of positional arguments a run needs.
pub const REQUIRED_ARGS: usize = 5;

/// Whether a parse failure on a command line of `arg_count` arguments
/// (program name excluded) is answered with the usage line and exit 0.
///
/// A missing positional always is. An unknown dash argument is when the
/// command line is too short to hold every positional anyway.
pub fn is_usage_notice(kind: ErrorKind, arg_count: usize) -> bool {
    match kind {
        ErrorKind::MissingRequiredArgument => true,
        ErrorKind::UnknownArgument => arg_count < REQUIRED_ARGS,
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplingArg {
    /// Count the corner where both strips overlap twice
    Faithful,
    /// Count every strip pixel once
    Deduplicated,
}

impl From<SamplingArg> for ReferenceSampling {
    fn from(arg: SamplingArg) -> Self {
        match arg {
            SamplingArg::Faithful => Self::Faithful,
            SamplingArg::Deduplicated => Self::Deduplicated,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new(
            &self.foreground,
            &self.background,
            parse_threshold(&self.threshold),
            &self.output_threshold,
            &self.output_auto,
        );
        config.grid = GridConfig::new(self.size);
        config.sampling = self.sampling.into();
        config.comparison = if self.strict_jump {
            JumpComparison::Strict
        } else {
            JumpComparison::Inclusive
        };
        config.mask_dir = self.mask_dir.clone();
        config
    }
}

/// Parses a threshold the way C `atof` does.
///
/// Leading whitespace is skipped and the longest prefix that forms a
/// decimal number is used. Text without such a prefix yields `0.0`.
pub fn parse_threshold(text: &str) -> f64 {
    let text = text.trim_start();
    text[..numeric_prefix_len(text)].parse().unwrap_or(0.0)
}

/// Length of the longest `[+-]digits[.digits][(e|E)[+-]digits]` prefix.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = digits_from(end);
    end += integer;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if integer > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer == 0 && fraction == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    end
}
