//! Object detection results produced by the detector collaborator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// A single detected object with bounding box and classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Detection {
    /// COCO class ID (0 = person, 2 = car, etc.)
    pub class_id: u32,
    /// Bounding box in frame pixel coordinates
    pub bbox: BoundingBox,
    /// Detection confidence [0, 1]
    pub confidence: f32,
}

impl Detection {
    /// Create a new detection.
    pub fn new(class_id: u32, bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            class_id,
            bbox,
            confidence,
        }
    }

    /// Check if this is a person detection.
    pub fn is_person(&self) -> bool {
        self.class_id == 0
    }
}

/// COCO class names (80 classes).
pub const COCO_CLASSES: &[&str] = &[
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck",
    "boat", "traffic light", "fire hydrant", "stop sign", "parking meter", "bench",
    "bird", "cat", "dog", "horse", "sheep", "cow", "elephant", "bear", "zebra",
    "giraffe", "backpack", "umbrella", "handbag", "tie", "suitcase", "frisbee",
    "skis", "snowboard", "sports ball", "kite", "baseball bat", "baseball glove",
    "skateboard", "surfboard", "tennis racket", "bottle", "wine glass", "cup",
    "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich", "orange",
    "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch",
    "potted plant", "bed", "dining table", "toilet", "tv", "laptop", "mouse",
    "remote", "keyboard", "cell phone", "microwave", "oven", "toaster", "sink",
    "refrigerator", "book", "clock", "vase", "scissors", "teddy bear", "hair drier",
    "toothbrush",
];

/// Look up the COCO class name for a class ID.
///
/// Returns `"unknown"` for IDs outside the table.
pub fn class_name(class_id: u32) -> &'static str {
    COCO_CLASSES
        .get(class_id as usize)
        .copied()
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_lookup() {
        assert_eq!(class_name(0), "person");
        assert_eq!(class_name(2), "car");
        assert_eq!(class_name(999), "unknown");
    }

    #[test]
    fn test_is_person() {
        let person = Detection::new(0, BoundingBox::new(0, 0, 10, 10), 0.9);
        let car = Detection::new(2, BoundingBox::new(0, 0, 10, 10), 0.9);
        assert!(person.is_person());
        assert!(!car.is_person());
    }
}
