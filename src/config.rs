use image::Rgb;

pub struct Config {
    pub model_path: String,
    pub image_path: String,
    pub output_path: String,
    pub font_path: String,
    pub input_name: String,
    pub shorter_side: u32,
    pub pad_multiple: u32,
    /// Subtracted from the B, G and R channels, in that order.
    pub channel_mean: [f32; 3],
    pub confidence_threshold: f32,
    pub intra_threads: usize,
    pub box_color: Rgb<u8>,
    pub line_thickness: u32,
    pub font_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: "res/models/FasterRCNN-12-int8.onnx".to_string(),
            image_path: "res/images/input.jpg".to_string(),
            output_path: "res/images/output.jpg".to_string(),
            font_path: "res/fonts/DejaVuSans.ttf".to_string(),
            input_name: "image".to_string(),
            shorter_side: 800,
            pad_multiple: 32,
            channel_mean: [102.9801, 115.9465, 122.7717],
            confidence_threshold: 0.7,
            intra_threads: 4,
            box_color: Rgb([255, 0, 0]),
            line_thickness: 2,
            font_size: 16.0,
        }
    }
}
