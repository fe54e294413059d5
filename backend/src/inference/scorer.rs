use std::path::Path;

use image::imageops::FilterType;
use tract_onnx::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("model artifact not found: {0}")]
    Unavailable(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("{0}")]
    Model(String),
    #[error("model produced no output")]
    EmptyOutput,
}

impl From<TractError> for ScoreError {
    fn from(err: TractError) -> Self {
        ScoreError::Model(err.to_string())
    }
}

/// Scoring capability: image on disk in, raw scalar out. The production
/// implementation is [`OnnxScorer`]; tests substitute fixed-value stubs.
pub trait Scorer: Send + Sync {
    fn score(&self, artifact: &Path, image_path: &Path) -> Result<f32, ScoreError>;
}

pub const INPUT_SIZE: u32 = 224;

/// Loads the ONNX artifact fresh on every call, decodes and resizes the image
/// to 224x224, scales pixels to [0, 1], and returns the first element of the
/// output tensor.
#[derive(Clone, Copy, Default)]
pub struct OnnxScorer;

impl Scorer for OnnxScorer {
    fn score(&self, artifact: &Path, image_path: &Path) -> Result<f32, ScoreError> {
        if !artifact.exists() {
            return Err(ScoreError::Unavailable(artifact.display().to_string()));
        }

        let img = image::open(image_path)?;
        let resized = img
            .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
            .to_rgb8();

        let size = INPUT_SIZE as usize;
        // NHWC batch of one, matching the exported classifiers.
        let input = tract_ndarray::Array4::from_shape_fn((1, size, size, 3), |(_, y, x, c)| {
            resized.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
        });

        let model = tract_onnx::onnx()
            .model_for_path(artifact)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, size, size, 3)),
            )?
            .into_optimized()?
            .into_runnable()?;

        let result = model.run(tvec!(input.into_tensor().into()))?;
        let output = result[0].to_array_view::<f32>()?;
        output.iter().copied().next().ok_or(ScoreError::EmptyOutput)
    }
}
