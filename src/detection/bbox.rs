/// Box corners in the coordinate space of the resized, padded model input.
/// Corner ordering is whatever the model produced and is not checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    pub const fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Builds a box from four consecutive `(x_min, y_min, x_max, y_max)` values.
    pub fn from_slice(corners: &[f32]) -> Option<Self> {
        match *corners {
            [x_min, y_min, x_max, y_max] => Some(Self::new(x_min, y_min, x_max, y_max)),
            _ => None,
        }
    }
}
