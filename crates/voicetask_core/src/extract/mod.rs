//! AI extraction boundary: request shapes and response intake.
//!
//! # Responsibility
//! - Build the structured prompt sent to the external model for voice and
//!   photo captures.
//! - Define the opaque backend contract and the intake step that turns a
//!   free-text response into validated task records.
//!
//! # Invariants
//! - The backend is never trusted: every field of the response is coerced
//!   or rejected before a task record exists.
//! - A failed intake commits nothing.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod intake;

pub use intake::intake_tasks;

/// Instruction for voice captures: tasks spoken aloud, small talk ignored.
pub const VOICE_INSTRUCTION: &str = "Extract the tasks mentioned in this audio and reply with a \
JSON array. Keys: { title: string, time: string (HH:MM format, null when absent) }. Example: \
[{\"title\":\"meeting\",\"time\":\"14:00\"}]. Ignore small talk. Reply with JSON only.";

/// Instruction for photo captures: tasks written in a photographed document.
pub const PHOTO_INSTRUCTION: &str = "Extract the actionable tasks, and their times when present, \
from the document or notes in this image and reply with a JSON array. Keys: { title: string, \
time: string (HH:MM format, null when absent) }. Example: [{\"title\":\"buy milk\",\"time\":null},\
{\"title\":\"dentist\",\"time\":\"15:30\"}]. Reply with JSON only.";

pub const VOICE_MIME_TYPE: &str = "audio/m4a";
pub const PHOTO_MIME_TYPE: &str = "image/jpeg";

/// One extraction call: an instruction plus a single inline binary payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub instruction: &'static str,
    pub mime_type: String,
    pub payload: Vec<u8>,
}

impl ExtractionRequest {
    /// Builds the request for a recorded voice memo.
    pub fn voice(payload: Vec<u8>) -> Self {
        Self {
            instruction: VOICE_INSTRUCTION,
            mime_type: VOICE_MIME_TYPE.to_string(),
            payload,
        }
    }

    /// Builds the request for a captured photo.
    pub fn photo(payload: Vec<u8>) -> Self {
        Self {
            instruction: PHOTO_INSTRUCTION,
            mime_type: PHOTO_MIME_TYPE.to_string(),
            payload,
        }
    }
}

/// Opaque external AI boundary.
///
/// Implementations perform one request/response exchange and return the
/// model's free-form text; no retries, no streaming.
pub trait ExtractionBackend {
    fn generate(&self, request: &ExtractionRequest) -> Result<String, ExtractionError>;
}

/// Errors of the extraction boundary and intake step.
#[derive(Debug)]
pub enum ExtractionError {
    /// Response text contains no bracketed object array.
    NoTaskArray,
    /// The located array is not valid JSON.
    InvalidJson(serde_json::Error),
    /// The backend call itself failed.
    Backend(String),
}

impl Display for ExtractionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTaskArray => write!(f, "AI response contains no task array"),
            Self::InvalidJson(err) => write!(f, "AI task array does not parse: {err}"),
            Self::Backend(message) => write!(f, "extraction backend failed: {message}"),
        }
    }
}

impl Error for ExtractionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            _ => None,
        }
    }
}
