use std::path::Path;

use ndarray::Array3;
use ort::{GraphOptimizationLevel, Session};
use tracing::info;

use crate::{
    config::Config,
    detection::RawDetections,
    error::{Error, Result},
};

/// Owns the inference session; it is released when the model is dropped.
pub struct DetectionModel {
    session: Session,
    input_name: String,
}

impl DetectionModel {
    pub fn new(config: &Config) -> Result<Self> {
        let model_path = Path::new(&config.model_path);
        let model_bytes = std::fs::read(model_path).map_err(|e| Error::io(model_path, e))?;

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.intra_threads)?
            .commit_from_memory(&model_bytes)?;

        info!("Model loaded from {}", model_path.display());

        Ok(Self {
            session,
            input_name: config.input_name.clone(),
        })
    }

    /// Runs one `[3, H, W]` tensor and returns the boxes, labels and
    /// confidences outputs, in that order.
    pub fn predict(&self, input: Array3<f32>) -> Result<RawDetections> {
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input.view()]?)?;

        if outputs.len() < 3 {
            return Err(Error::MalformedInput(format!(
                "expected 3 model outputs, got {}",
                outputs.len()
            )));
        }

        let boxes = outputs[0].try_extract_tensor::<f32>()?;
        let labels = outputs[1].try_extract_tensor::<i64>()?;
        let confidences = outputs[2].try_extract_tensor::<f32>()?;

        Ok(RawDetections {
            boxes: boxes.iter().copied().collect(),
            labels: labels.iter().copied().collect(),
            confidences: confidences.iter().copied().collect(),
        })
    }
}
