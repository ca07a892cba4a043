use crate::error::{Error, Result};

/// Fixed lookup from model class id to display name. Index 0 is the
/// background class and maps to an empty string.
#[derive(Debug, Clone, Copy)]
pub struct LabelTable {
    names: &'static [&'static str],
}

impl LabelTable {
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    pub fn lookup(&self, index: i64) -> Result<&'static str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.names.get(i))
            .copied()
            .ok_or(Error::OutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

pub static COCO_LABELS: LabelTable = LabelTable::new(&[
    "",
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
]);
