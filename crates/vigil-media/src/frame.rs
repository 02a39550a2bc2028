//! The frame type that flows between capture, detection and encoding.

use serde::{Deserialize, Serialize};

/// A single captured video frame.
///
/// The core never inspects pixel data; it carries the buffer between the
/// capture, detection and encode collaborators unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Zero-based index within the capture stream
    pub index: u64,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Raw pixel data, owned by the capture collaborator's format
    pub data: Vec<u8>,
}

impl Frame {
    /// Create a frame with an empty pixel buffer (test and probe use).
    pub fn empty(index: u64, width: u32, height: u32) -> Self {
        Self {
            index,
            width,
            height,
            data: Vec::new(),
        }
    }
}

/// Properties reported by the capture collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamProperties {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Nominal frame rate reported by the device
    pub nominal_fps: f64,
}

impl StreamProperties {
    pub fn new(width: u32, height: u32, nominal_fps: f64) -> Self {
        Self {
            width,
            height,
            nominal_fps,
        }
    }
}
