mod chroma_key;
pub mod cli;
mod error;
pub mod grid;
pub mod pipeline;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use chroma_key::auto_key::{AutoClassifier, AutoThreshold, JumpComparison};
pub use chroma_key::classifier::{ChromaKey, Classifier};
pub use chroma_key::composite::composite;
pub use chroma_key::distance::{max_rgb_distance, rgb_distance};
pub use chroma_key::mask::Mask;
pub use chroma_key::threshold_key::{BorderStrips, ReferenceSampling, ThresholdClassifier};
pub use error::{ChromaKeyError, GridError, PipelineError};
pub use grid::GridConfig;
pub use pipeline::{run, PipelineConfig, RunReport};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
