use chrono::NaiveDate;
use std::cell::RefCell;
use voicetask_core::db::open_db_in_memory;
use voicetask_core::{
    capture_photo_tasks, finish_voice_capture, AudioRecorder, CaptureDevice, CaptureError,
    CapturedMedia, ExtractionBackend, ExtractionError, ExtractionRequest, FlowError, PhotoCamera,
    SqliteKeyValueStore, TaskService,
};

fn day(text: &str) -> NaiveDate {
    text.parse().expect("valid test date")
}

struct FakeRecorder {
    result: Option<Result<CapturedMedia, CaptureError>>,
}

impl FakeRecorder {
    fn with_audio(bytes: &[u8]) -> Self {
        Self {
            result: Some(Ok(CapturedMedia {
                bytes: bytes.to_vec(),
                mime_type: "audio/m4a".to_string(),
            })),
        }
    }

    fn failing(error: CaptureError) -> Self {
        Self {
            result: Some(Err(error)),
        }
    }
}

impl AudioRecorder for FakeRecorder {
    fn start(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<CapturedMedia, CaptureError> {
        self.result
            .take()
            .expect("stop called more than once in test")
    }
}

struct FakeCamera {
    result: Option<Result<CapturedMedia, CaptureError>>,
}

impl PhotoCamera for FakeCamera {
    fn capture(&mut self) -> Result<CapturedMedia, CaptureError> {
        self.result
            .take()
            .expect("capture called more than once in test")
    }
}

/// Backend double returning a canned response and recording the request.
struct CannedBackend {
    /// `None` makes the call fail with a backend error.
    response: Option<String>,
    seen: RefCell<Vec<(String, usize)>>,
}

impl CannedBackend {
    fn replying(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            response: None,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl ExtractionBackend for CannedBackend {
    fn generate(&self, request: &ExtractionRequest) -> Result<String, ExtractionError> {
        self.seen
            .borrow_mut()
            .push((request.mime_type.clone(), request.payload.len()));
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(ExtractionError::Backend("canned failure".to_string())),
        }
    }
}

fn sqlite_service(conn: &rusqlite::Connection) -> TaskService<SqliteKeyValueStore<'_>> {
    TaskService::new(SqliteKeyValueStore::new(conn))
}

#[test]
fn voice_capture_appends_extracted_tasks() {
    let conn = open_db_in_memory().unwrap();
    let mut service = sqlite_service(&conn);
    let mut recorder = FakeRecorder::with_audio(b"pcm-bytes");
    let backend = CannedBackend::replying(
        r#"Sure! Here are the tasks:
           [{"title":"buy milk","time":"16:00"},{"title":"call dentist","time":null}]"#,
    );

    let added = finish_voice_capture(&mut recorder, &backend, &mut service, day("2024-03-05"))
        .unwrap();
    assert_eq!(added.len(), 2);
    assert_eq!(added[0].title, "buy milk");
    assert_eq!(added[0].time.as_deref(), Some("16:00"));
    assert_eq!(added[1].title, "call dentist");
    assert!(added[1].time.is_none());
    assert_eq!(added[1].date, "2024-03-05");

    // Tasks reached the service list, not just the return value.
    assert_eq!(service.tasks().len(), 2);

    let seen = backend.seen.borrow();
    assert_eq!(seen.as_slice(), [("audio/m4a".to_string(), 9)]);
}

#[test]
fn empty_recording_aborts_before_the_backend() {
    let conn = open_db_in_memory().unwrap();
    let mut service = sqlite_service(&conn);
    let mut recorder = FakeRecorder::with_audio(b"");
    let backend = CannedBackend::replying("[]");

    let err = finish_voice_capture(&mut recorder, &backend, &mut service, day("2024-03-05"))
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::Capture(CaptureError::EmptyRecording)
    ));
    assert!(backend.seen.borrow().is_empty());
    assert!(service.tasks().is_empty());
}

#[test]
fn microphone_permission_failure_propagates() {
    let conn = open_db_in_memory().unwrap();
    let mut service = sqlite_service(&conn);
    let mut recorder = FakeRecorder::failing(CaptureError::PermissionDenied {
        device: CaptureDevice::Microphone,
    });
    let backend = CannedBackend::replying("[]");

    let err = finish_voice_capture(&mut recorder, &backend, &mut service, day("2024-03-05"))
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::Capture(CaptureError::PermissionDenied {
            device: CaptureDevice::Microphone
        })
    ));
}

#[test]
fn backend_failure_commits_nothing() {
    let conn = open_db_in_memory().unwrap();
    let mut service = sqlite_service(&conn);
    let mut recorder = FakeRecorder::with_audio(b"pcm");
    let backend = CannedBackend::failing();

    let err = finish_voice_capture(&mut recorder, &backend, &mut service, day("2024-03-05"))
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::Extraction(ExtractionError::Backend(_))
    ));
    assert!(service.tasks().is_empty());
}

#[test]
fn response_without_task_array_commits_nothing() {
    let conn = open_db_in_memory().unwrap();
    let mut service = sqlite_service(&conn);
    let mut recorder = FakeRecorder::with_audio(b"pcm");
    let backend = CannedBackend::replying("I could not hear any tasks in that clip.");

    let err = finish_voice_capture(&mut recorder, &backend, &mut service, day("2024-03-05"))
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::Extraction(ExtractionError::NoTaskArray)
    ));
    assert!(service.tasks().is_empty());
}

#[test]
fn photo_capture_appends_extracted_tasks() {
    let conn = open_db_in_memory().unwrap();
    let mut service = sqlite_service(&conn);
    let mut camera = FakeCamera {
        result: Some(Ok(CapturedMedia {
            bytes: b"jpeg-bytes".to_vec(),
            mime_type: "image/jpeg".to_string(),
        })),
    };
    let backend = CannedBackend::replying(r#"[{"title":"pay invoice","time":"11:30"}]"#);

    let added =
        capture_photo_tasks(&mut camera, &backend, &mut service, day("2024-03-05")).unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].title, "pay invoice");
    assert_eq!(added[0].time.as_deref(), Some("11:30"));

    let seen = backend.seen.borrow();
    assert_eq!(seen.as_slice(), [("image/jpeg".to_string(), 10)]);
}

#[test]
fn camera_permission_failure_propagates() {
    let conn = open_db_in_memory().unwrap();
    let mut service = sqlite_service(&conn);
    let mut camera = FakeCamera {
        result: Some(Err(CaptureError::PermissionDenied {
            device: CaptureDevice::Camera,
        })),
    };
    let backend = CannedBackend::replying("[]");

    let err =
        capture_photo_tasks(&mut camera, &backend, &mut service, day("2024-03-05")).unwrap_err();
    assert!(matches!(
        err,
        FlowError::Capture(CaptureError::PermissionDenied {
            device: CaptureDevice::Camera
        })
    ));
}
