pub mod bbox;
pub mod model;
pub mod preprocessing;

pub use bbox::BoundingBox;

use tracing::debug;

use crate::{
    error::{Error, Result},
    labels::LabelTable,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub bbox: BoundingBox,
    pub label: &'static str,
    pub confidence: f32,
}

/// The three positionally correlated model outputs: detection `i` owns
/// `boxes[4i..4i + 4]`, `labels[i]` and `confidences[i]`.
#[derive(Debug, Clone, Default)]
pub struct RawDetections {
    pub boxes: Vec<f32>,
    pub labels: Vec<i64>,
    pub confidences: Vec<f32>,
}

impl RawDetections {
    /// Returns the detection count once the array lengths agree.
    pub fn validate(&self) -> Result<usize> {
        if self.boxes.len() % 4 != 0 {
            return Err(Error::MalformedInput(format!(
                "box array length {} is not a multiple of 4",
                self.boxes.len()
            )));
        }

        let count = self.labels.len();
        if self.confidences.len() != count || self.boxes.len() / 4 != count {
            return Err(Error::MalformedInput(format!(
                "{} boxes, {} labels and {} confidences do not line up",
                self.boxes.len() / 4,
                count,
                self.confidences.len()
            )));
        }

        Ok(count)
    }
}

/// Keeps every detection whose confidence is at least `min_confidence`, in
/// model order. Labels are only resolved for detections that are kept.
pub fn decode_predictions(
    raw: &RawDetections,
    min_confidence: f32,
    labels: &LabelTable,
) -> Result<Vec<Prediction>> {
    let count = raw.validate()?;
    let mut predictions = Vec::new();

    for i in 0..count {
        let confidence = raw.confidences[i];
        // NaN never passes.
        let passes = confidence >= min_confidence;
        if !passes {
            continue;
        }

        let bbox = BoundingBox::from_slice(&raw.boxes[i * 4..i * 4 + 4])
            .ok_or_else(|| Error::MalformedInput(format!("truncated box at detection {i}")))?;
        let label = labels.lookup(raw.labels[i])?;

        debug!(
            "Detection {}: label={:?}, confidence={:.3}, bbox=({:.1}, {:.1}, {:.1}, {:.1})",
            i, label, confidence, bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max
        );

        predictions.push(Prediction {
            bbox,
            label,
            confidence,
        });
    }

    Ok(predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, labels::COCO_LABELS};

    fn raw(boxes: &[f32], labels: &[i64], confidences: &[f32]) -> RawDetections {
        RawDetections {
            boxes: boxes.to_vec(),
            labels: labels.to_vec(),
            confidences: confidences.to_vec(),
        }
    }

    #[test]
    fn keeps_only_confident_detections() {
        let input = raw(
            &[0.0, 0.0, 10.0, 10.0, 5.0, 5.0, 15.0, 15.0],
            &[1, 2],
            &[0.9, 0.5],
        );

        let predictions = decode_predictions(&input, 0.7, &COCO_LABELS).unwrap();

        assert_eq!(
            predictions,
            vec![Prediction {
                bbox: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
                label: "person",
                confidence: 0.9,
            }]
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let input = raw(
            &[0.0, 0.0, 10.0, 10.0, 5.0, 5.0, 15.0, 15.0],
            &[3, 4],
            &[0.7, 0.69],
        );

        let predictions = decode_predictions(&input, 0.7, &COCO_LABELS).unwrap();

        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].label, "car");
        assert_eq!(predictions[0].confidence, 0.7);
    }

    #[test]
    fn empty_output_decodes_to_nothing() {
        let predictions = decode_predictions(&RawDetections::default(), 0.7, &COCO_LABELS).unwrap();
        assert!(predictions.is_empty());
    }

    #[test]
    fn unknown_label_on_kept_detection_is_out_of_range() {
        let input = raw(&[0.0, 0.0, 1.0, 1.0], &[999], &[0.95]);

        let err = decode_predictions(&input, 0.7, &COCO_LABELS).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(matches!(err, Error::OutOfRange { index: 999, len: 81 }));
    }

    #[test]
    fn nan_confidence_is_skipped() {
        let input = raw(
            &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0],
            &[1, 2],
            &[f32::NAN, 0.8],
        );

        let predictions = decode_predictions(&input, 0.7, &COCO_LABELS).unwrap();

        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].label, "bicycle");
        assert!(predictions.iter().all(|p| p.confidence >= 0.7));
    }

    #[test]
    fn unknown_label_on_skipped_detection_is_ignored() {
        let input = raw(&[0.0, 0.0, 1.0, 1.0], &[999], &[0.1]);
        let predictions = decode_predictions(&input, 0.7, &COCO_LABELS).unwrap();
        assert!(predictions.is_empty());
    }

    // Every detection is visited, including the last one in the arrays.
    #[test]
    fn final_detection_is_kept() {
        let input = raw(
            &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 5.0, 5.0],
            &[1, 2, 3],
            &[0.8, 0.8, 0.8],
        );

        let predictions = decode_predictions(&input, 0.7, &COCO_LABELS).unwrap();

        assert_eq!(predictions.len(), 3);
        assert_eq!(predictions[2].label, "car");
        assert_eq!(predictions[2].bbox, BoundingBox::new(4.0, 4.0, 5.0, 5.0));
    }

    #[test]
    fn preserves_model_order() {
        let input = raw(
            &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 5.0, 5.0],
            &[17, 16, 18],
            &[0.75, 0.99, 0.8],
        );

        let labels: Vec<_> = decode_predictions(&input, 0.7, &COCO_LABELS)
            .unwrap()
            .into_iter()
            .map(|p| p.label)
            .collect();

        assert_eq!(labels, vec!["dog", "cat", "horse"]);
    }

    #[test]
    fn raising_threshold_never_adds_predictions() {
        let input = raw(
            &[0.0; 20],
            &[1, 2, 3, 4, 5],
            &[0.1, 0.45, 0.7, 0.71, 0.99],
        );

        let mut previous = usize::MAX;
        for threshold in [0.0, 0.1, 0.5, 0.7, 0.71, 0.9, 1.0] {
            let count = decode_predictions(&input, threshold, &COCO_LABELS)
                .unwrap()
                .len();
            assert!(count <= previous);
            assert!(count <= 5);
            previous = count;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn mismatched_lengths_are_malformed() {
        let cases = [
            raw(&[0.0, 0.0, 1.0], &[], &[]),
            raw(&[0.0, 0.0, 1.0, 1.0], &[1, 2], &[0.9, 0.9]),
            raw(&[0.0, 0.0, 1.0, 1.0], &[1], &[]),
        ];

        for input in cases {
            let err = decode_predictions(&input, 0.7, &COCO_LABELS).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedInput);
        }
    }
}
