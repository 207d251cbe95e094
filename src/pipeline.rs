//! End-to-end compositing run.
//!
//! Loads the foreground and background grids, then runs the fixed threshold
//! classifier and the self-calibrating classifier one after the other,
//! writing one composite per classifier.

use std::path::PathBuf;

use image::Rgb;
use log::info;

use crate::chroma_key::auto_key::{AutoClassifier, AutoThreshold, JumpComparison};
use crate::chroma_key::classifier::ChromaKey;
use crate::chroma_key::threshold_key::{BorderStrips, ReferenceSampling, ThresholdClassifier};
use crate::error::PipelineError;
use crate::grid::{read_grid, write_grid, write_mask, GridConfig};

/// Name of the threshold classifier mask inside [`PipelineConfig::mask_dir`].
pub const THRESHOLD_MASK_FILE: &str = "threshold_mask.bmp";
/// Name of the self-calibrating classifier mask inside [`PipelineConfig::mask_dir`].
pub const AUTO_MASK_FILE: &str = "auto_mask.bmp";

/// Inputs and options of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub foreground: PathBuf,
    pub background: PathBuf,
    pub threshold: f64,
    /// Composite produced with the caller supplied threshold.
    pub output_threshold: PathBuf,
    /// Composite produced with the calibrated threshold.
    pub output_auto: PathBuf,
    pub grid: GridConfig,
    pub strips: BorderStrips,
    pub sampling: ReferenceSampling,
    pub comparison: JumpComparison,
    /// When set, both masks are written here as grayscale images.
    pub mask_dir: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(
        foreground: impl Into<PathBuf>,
        background: impl Into<PathBuf>,
        threshold: f64,
        output_threshold: impl Into<PathBuf>,
        output_auto: impl Into<PathBuf>,
    ) -> Self {
        Self {
            foreground: foreground.into(),
            background: background.into(),
            threshold,
            output_threshold: output_threshold.into(),
            output_auto: output_auto.into(),
            grid: GridConfig::default(),
            strips: BorderStrips::default(),
            sampling: ReferenceSampling::default(),
            comparison: JumpComparison::default(),
            mask_dir: None,
        }
    }

    fn threshold_classifier(&self) -> ThresholdClassifier {
        ThresholdClassifier::new(self.threshold)
            .with_strips(self.strips)
            .with_sampling(self.sampling)
    }

    fn auto_classifier(&self) -> AutoClassifier {
        AutoClassifier::new().with_comparison(self.comparison)
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Reference color estimated from the border strips.
    pub threshold_reference: Rgb<u8>,
    /// Foreground pixels kept by the threshold classifier.
    pub threshold_foreground: usize,
    pub auto_threshold: AutoThreshold,
    /// Foreground pixels kept by the self-calibrating classifier.
    pub auto_foreground: usize,
}

/// Runs both classifiers and writes their composites.
///
/// Stages run in order and the first failure aborts the rest, so the first
/// output may exist when writing the second one fails.
///
/// # Errors
///
/// * `PipelineError::Grid` - When an input cannot be read or an output cannot be written
/// * `PipelineError::ChromaKey` - When a classifier rejects the input
pub fn run(config: &PipelineConfig) -> Result<RunReport, PipelineError> {
    let foreground = read_grid(&config.foreground, &config.grid)?;
    let background = read_grid(&config.background, &config.grid)?;

    let threshold_classifier = config.threshold_classifier();
    let (threshold_mask, threshold_reference) =
        threshold_classifier.classify_with_reference(&foreground)?;
    let output = foreground.composite_over(&background, &threshold_mask)?;
    write_grid(&config.output_threshold, &output)?;
    info!(
        "threshold key: reference {:?}, threshold {}, {} foreground pixels",
        threshold_reference.0,
        config.threshold,
        threshold_mask.foreground_count()
    );

    let auto_classifier = config.auto_classifier();
    let (auto_mask, auto_threshold) = auto_classifier.classify_calibrated(&foreground)?;
    let output = foreground.composite_over(&background, &auto_mask)?;
    write_grid(&config.output_auto, &output)?;

    if let Some(dir) = &config.mask_dir {
        write_mask(dir.join(THRESHOLD_MASK_FILE), &threshold_mask)?;
        write_mask(dir.join(AUTO_MASK_FILE), &auto_mask)?;
    }

    Ok(RunReport {
        threshold_reference,
        threshold_foreground: threshold_mask.foreground_count(),
        auto_threshold,
        auto_foreground: auto_mask.foreground_count(),
    })
}
