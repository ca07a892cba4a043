use crate::config::Config;
use image::{imageops::FilterType, DynamicImage, GenericImageView, RgbImage};
use ndarray::Array3;

/// Scales the image so its shorter side is `shorter_side` pixels.
pub fn resize_to_shorter_side(image: &DynamicImage, shorter_side: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let ratio = shorter_side as f32 / width.min(height) as f32;
    let new_width = (ratio * width as f32) as u32;
    let new_height = (ratio * height as f32) as u32;

    image
        .resize_exact(new_width, new_height, FilterType::CatmullRom)
        .to_rgb8()
}

pub fn padded_dimension(size: u32, multiple: u32) -> u32 {
    size.div_ceil(multiple) * multiple
}

/// Channel-first `[3, H, W]` tensor in B, G, R order with the per-channel
/// mean removed. H and W are padded up to `pad_multiple`; the padding is zero.
pub fn to_input_tensor(rgb_image: &RgbImage, config: &Config) -> Array3<f32> {
    let height = padded_dimension(rgb_image.height(), config.pad_multiple) as usize;
    let width = padded_dimension(rgb_image.width(), config.pad_multiple) as usize;
    let [mean_b, mean_g, mean_r] = config.channel_mean;

    let mut input = Array3::zeros((3, height, width));
    for (x, y, pixel) in rgb_image.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        let [r, g, b] = pixel.0;
        input[[0, y, x]] = b as f32 - mean_b;
        input[[1, y, x]] = g as f32 - mean_g;
        input[[2, y, x]] = r as f32 - mean_r;
    }

    input
}
