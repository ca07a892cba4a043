use ab_glyph::{Font, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

use crate::detection::Prediction;

pub fn format_caption(prediction: &Prediction) -> String {
    format!("{}, {:.2}", prediction.label, prediction.confidence)
}

/// Writes the caption with its top-left corner at the box's `(x_min, y_min)`.
pub fn draw_caption(
    image: &mut RgbImage,
    prediction: &Prediction,
    color: Rgb<u8>,
    font: &impl Font,
    font_size: f32,
) {
    let x = prediction.bbox.x_min as i32;
    let y = prediction.bbox.y_min as i32;

    draw_text_mut(
        image,
        color,
        x,
        y,
        PxScale::from(font_size),
        font,
        &format_caption(prediction),
    );
}
