//! Device capture boundaries.
//!
//! # Responsibility
//! - Define the microphone/camera contracts the host platform implements.
//! - Classify capture failures so permission problems and empty recordings
//!   surface as distinct errors.
//!
//! # Invariants
//! - Captured media is consumed exactly once per interaction; there are no
//!   retries at this layer.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Device kind named in permission errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureDevice {
    Microphone,
    Camera,
}

impl Display for CaptureDevice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Microphone => write!(f, "microphone"),
            Self::Camera => write!(f, "camera"),
        }
    }
}

/// Capture-layer errors.
///
/// Empty recordings are deliberately distinct from permission denials: the
/// UI tells the user to hold the button longer for one and to open system
/// settings for the other.
#[derive(Debug)]
pub enum CaptureError {
    /// The user denied (or never granted) the device permission.
    PermissionDenied { device: CaptureDevice },
    /// Recording stopped without producing any audio data.
    EmptyRecording,
    /// The device produced no usable media for another reason.
    Device(String),
}

impl Display for CaptureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied { device } => {
                write!(f, "{device} permission denied")
            }
            Self::EmptyRecording => write!(f, "recording produced no audio"),
            Self::Device(message) => write!(f, "capture failed: {message}"),
        }
    }
}

impl Error for CaptureError {}

/// One captured media payload, handed to the extraction boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedMedia {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Press-and-hold microphone recording boundary.
pub trait AudioRecorder {
    /// Begins recording; fails fast on missing permission.
    fn start(&mut self) -> Result<(), CaptureError>;
    /// Stops recording and yields the captured audio.
    fn stop(&mut self) -> Result<CapturedMedia, CaptureError>;
}

/// Single-shot camera boundary.
pub trait PhotoCamera {
    /// Takes one picture and yields the processed image bytes.
    fn capture(&mut self) -> Result<CapturedMedia, CaptureError>;
}
