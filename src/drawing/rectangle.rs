use image::{Rgb, RgbImage};

use crate::detection::BoundingBox;

/// Draws the outline of `bbox`, clamped to the image. The outline grows
/// right and down by `thickness` pixels. Reversed corners are drawn as if
/// they had been swapped. Boxes that miss the image draw nothing.
pub fn draw_box(image: &mut RgbImage, bbox: &BoundingBox, color: Rgb<u8>, thickness: u32) {
    let corners = [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max];
    if !corners.iter().all(|v| v.is_finite()) {
        return;
    }

    let (width, height) = (image.width() as f32, image.height() as f32);
    let left = bbox.x_min.min(bbox.x_max);
    let right = bbox.x_min.max(bbox.x_max);
    let top = bbox.y_min.min(bbox.y_max);
    let bottom = bbox.y_min.max(bbox.y_max);

    // Also rejects empty images.
    let visible = right >= 0.0 && left < width && bottom >= 0.0 && top < height;
    if !visible {
        return;
    }

    let clamp_x = |v: f32| v.max(0.0).min(width - 1.0) as u32;
    let clamp_y = |v: f32| v.max(0.0).min(height - 1.0) as u32;

    let x1 = clamp_x(left);
    let x2 = clamp_x(right);
    let y1 = clamp_y(top);
    let y2 = clamp_y(bottom);

    // Horizontal edges
    for dy in 0..thickness {
        let y1_thick = y1.saturating_add(dy);
        let y2_thick = y2.saturating_add(dy);

        for x in x1..=x2 {
            if y1_thick < image.height() {
                image.put_pixel(x, y1_thick, color);
            }
            if y2_thick < image.height() {
                image.put_pixel(x, y2_thick, color);
            }
        }
    }

    // Vertical edges
    for dx in 0..thickness {
        let x1_thick = x1.saturating_add(dx);
        let x2_thick = x2.saturating_add(dx);

        for y in y1..=y2 {
            if x1_thick < image.width() {
                image.put_pixel(x1_thick, y, color);
            }
            if x2_thick < image.width() {
                image.put_pixel(x2_thick, y, color);
            }
        }
    }
}
