//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations, scheduling decisions and boundary calls
//!   into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage and boundary details.

use crate::capture::CaptureError;
use crate::extract::ExtractionError;
use crate::model::time::TimeError;
use crate::notify::NotifyError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod capture_service;
pub mod task_service;

/// Use-case level error union surfaced to the UI as a one-shot message.
///
/// Every variant is terminal for the current operation; nothing here is
/// retried automatically.
#[derive(Debug)]
pub enum FlowError {
    /// Manual entry with a blank title.
    EmptyTitle,
    /// Target task does not exist (already completed on another screen).
    TaskNotFound(String),
    Capture(CaptureError),
    Extraction(ExtractionError),
    Notify(NotifyError),
    Time(TimeError),
}

impl Display for FlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Capture(err) => write!(f, "{err}"),
            Self::Extraction(err) => write!(f, "{err}"),
            Self::Notify(err) => write!(f, "{err}"),
            Self::Time(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FlowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Capture(err) => Some(err),
            Self::Extraction(err) => Some(err),
            Self::Notify(err) => Some(err),
            Self::Time(err) => Some(err),
            Self::EmptyTitle | Self::TaskNotFound(_) => None,
        }
    }
}

impl From<CaptureError> for FlowError {
    fn from(value: CaptureError) -> Self {
        Self::Capture(value)
    }
}

impl From<ExtractionError> for FlowError {
    fn from(value: ExtractionError) -> Self {
        Self::Extraction(value)
    }
}

impl From<NotifyError> for FlowError {
    fn from(value: NotifyError) -> Self {
        Self::Notify(value)
    }
}

impl From<TimeError> for FlowError {
    fn from(value: TimeError) -> Self {
        Self::Time(value)
    }
}
