use std::path::Path;

use clap::Parser;
use image::ImageReader;
use ort::CPUExecutionProvider;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod detection;
mod drawing;
mod error;
mod labels;

use config::Config;
use detection::{
    decode_predictions,
    model::DetectionModel,
    preprocessing::{resize_to_shorter_side, to_input_tensor},
};
use drawing::{save_jpeg, Renderer};
use error::{Error, Result};
use labels::COCO_LABELS;

/// Runs Faster R-CNN over a fixed input image and writes the annotated result.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {}

fn load_image(path: &Path) -> Result<image::DynamicImage> {
    ImageReader::open(path)
        .map_err(|e| Error::io(path, e))?
        .with_guessed_format()
        .map_err(|e| Error::io(path, e))?
        .decode()
        .map_err(Error::ImageDecode)
}

/// Returns the number of predictions drawn on the output image.
fn run(config: &Config) -> Result<usize> {
    let image = load_image(Path::new(&config.image_path))?;
    info!(
        "Loaded {} ({}x{})",
        config.image_path,
        image.width(),
        image.height()
    );

    let mut resized = resize_to_shorter_side(&image, config.shorter_side);
    let input = to_input_tensor(&resized, config);
    info!(
        "Resized to {}x{}, input tensor {:?}",
        resized.width(),
        resized.height(),
        input.shape()
    );

    let model = DetectionModel::new(config)?;
    let raw = model.predict(input)?;
    drop(model);

    let predictions = decode_predictions(&raw, config.confidence_threshold, &COCO_LABELS)?;
    if predictions.is_empty() {
        warn!(
            "No detection reached confidence {}",
            config.confidence_threshold
        );
    } else {
        info!(
            "{} of {} detections kept",
            predictions.len(),
            raw.labels.len()
        );
    }

    let renderer = Renderer::load(config)?;
    renderer.render(&mut resized, &predictions);
    save_jpeg(&resized, &config.output_path)?;

    Ok(predictions.len())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    ort::init()
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .commit()?;

    let config = Config::default();
    match run(&config) {
        Ok(count) => {
            info!("Done, {} predictions written to {}", count, config.output_path);
            Ok(())
        }
        Err(err) => {
            error!(kind = ?err.kind(), "{err}");
            Err(err.into())
        }
    }
}
