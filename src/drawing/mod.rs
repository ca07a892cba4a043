pub mod caption;
pub mod rectangle;

use std::path::Path;

use ab_glyph::FontVec;
use image::{ImageFormat, Rgb, RgbImage};
use tracing::info;

use crate::{
    config::Config,
    detection::Prediction,
    error::{Error, Result},
};

use caption::draw_caption;
use rectangle::draw_box;

pub struct Renderer {
    font: FontVec,
    font_size: f32,
    color: Rgb<u8>,
    thickness: u32,
}

impl Renderer {
    pub fn load(config: &Config) -> Result<Self> {
        let font_path = Path::new(&config.font_path);
        let font_data = std::fs::read(font_path).map_err(|e| Error::io(font_path, e))?;
        let font = FontVec::try_from_vec(font_data).map_err(|_| Error::Font {
            path: font_path.to_path_buf(),
        })?;

        Ok(Self {
            font,
            font_size: config.font_size,
            color: config.box_color,
            thickness: config.line_thickness,
        })
    }

    pub fn render(&self, image: &mut RgbImage, predictions: &[Prediction]) {
        draw_predictions(
            image,
            predictions,
            self.thickness,
            |_| self.color,
            |image, prediction, color| {
                draw_caption(image, prediction, color, &self.font, self.font_size)
            },
        );
    }
}

/// Draws each box and then calls `annotate` for it, in prediction order, so
/// later predictions paint over earlier ones.
pub fn draw_predictions(
    image: &mut RgbImage,
    predictions: &[Prediction],
    thickness: u32,
    color_of: impl Fn(usize) -> Rgb<u8>,
    mut annotate: impl FnMut(&mut RgbImage, &Prediction, Rgb<u8>),
) {
    for (i, prediction) in predictions.iter().enumerate() {
        let color = color_of(i);
        draw_box(image, &prediction.bbox, color, thickness);
        annotate(image, prediction, color);
    }
}

/// Encodes `image` as JPEG at `path`, replacing any existing file.
pub fn save_jpeg(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    image
        .save_with_format(path, ImageFormat::Jpeg)
        .map_err(Error::ImageEncode)?;

    info!("Saved annotated image to {}", path.display());

    Ok(())
}
