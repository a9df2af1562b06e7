//! Capture-to-task flows for voice and photo input.
//!
//! # Responsibility
//! - Drive one capture boundary, the extraction backend and the intake
//!   step, appending the resulting tasks.
//!
//! # Invariants
//! - Any failure aborts the flow with nothing committed.
//! - Each captured payload is consumed exactly once; no retries.

use crate::capture::{AudioRecorder, CaptureError, PhotoCamera};
use crate::extract::{intake_tasks, ExtractionBackend, ExtractionRequest};
use crate::model::task::Task;
use crate::service::task_service::TaskService;
use crate::service::FlowError;
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use log::{info, warn};

/// Completes a press-and-hold voice capture: stop the recorder, run
/// extraction, append the parsed tasks.
pub fn finish_voice_capture<S: KeyValueStore>(
    recorder: &mut dyn AudioRecorder,
    backend: &dyn ExtractionBackend,
    service: &mut TaskService<S>,
    today: NaiveDate,
) -> Result<Vec<Task>, FlowError> {
    let media = recorder.stop()?;
    if media.bytes.is_empty() {
        // Released before anything was recorded; distinct from permission
        // failures so the UI can say "hold to record".
        warn!("event=voice_capture module=service status=error error_code=empty_recording");
        return Err(CaptureError::EmptyRecording.into());
    }

    let extracted = run_extraction(
        backend,
        ExtractionRequest::voice(media.bytes),
        today,
        "voice_capture",
    )?;
    Ok(service.append_extracted(extracted))
}

/// Runs a single photo capture through extraction and appends the results.
pub fn capture_photo_tasks<S: KeyValueStore>(
    camera: &mut dyn PhotoCamera,
    backend: &dyn ExtractionBackend,
    service: &mut TaskService<S>,
    today: NaiveDate,
) -> Result<Vec<Task>, FlowError> {
    let media = camera.capture()?;
    let extracted = run_extraction(
        backend,
        ExtractionRequest::photo(media.bytes),
        today,
        "photo_capture",
    )?;
    Ok(service.append_extracted(extracted))
}

fn run_extraction(
    backend: &dyn ExtractionBackend,
    request: ExtractionRequest,
    today: NaiveDate,
    event: &'static str,
) -> Result<Vec<Task>, FlowError> {
    let payload_bytes = request.payload.len();
    let response = backend.generate(&request).map_err(|err| {
        warn!(
            "event={event} module=service status=error error_code=backend_failed error={err}"
        );
        FlowError::Extraction(err)
    })?;

    let tasks = intake_tasks(&response, today).map_err(|err| {
        warn!("event={event} module=service status=error error_code=intake_failed error={err}");
        FlowError::Extraction(err)
    })?;

    info!(
        "event={event} module=service status=ok payload_bytes={payload_bytes} extracted={}",
        tasks.len()
    );
    Ok(tasks)
}
