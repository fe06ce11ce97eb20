use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use domain_upload::{
    exception::UploadException,
    mock::MockUploadTransport,
    model::{
        entity::{FileCollection, FileEntry},
        vo::{
            ByteProgress, PartBody, SessionState, TransportEvent, TransportResponse, UploadEvent,
            UploadEventKind, UploadRequest,
        },
        ByteMeasure,
    },
    service::{UploadSessionService, UploadTransport},
};
use infrastructure_event::{Event, Handler};
use serde_json::json;
use service_upload::{UploadFiles, UploadSessionImpl};
use url::Url;

/// Replays a fixed list of signals and keeps the requests it was given.
struct ScriptedTransport {
    script: Vec<TransportEvent>,
    requests: Mutex<Vec<UploadRequest>>,
}

impl ScriptedTransport {
    fn new(script: Vec<TransportEvent>) -> Arc<Self> {
        Arc::new(Self {
            script,
            requests: Mutex::new(vec![]),
        })
    }

    fn last_request(&self) -> UploadRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl UploadTransport for ScriptedTransport {
    async fn send(
        &self,
        request: UploadRequest,
        signals: flume::Sender<TransportEvent>,
    ) -> anyhow::Result<()> {
        self.requests.lock().unwrap().push(request);
        for event in self.script.iter().cloned() {
            signals.send(event)?;
        }
        Ok(())
    }
}

fn destination() -> Url {
    Url::parse("http://localhost:8080/upload").unwrap()
}

fn sized(sizes: &[usize]) -> FileCollection {
    sizes
        .iter()
        .enumerate()
        .map(|(i, size)| FileEntry::new(format!("file-{i}.bin"), vec![7u8; *size]))
        .collect()
}

fn ok(body: &str) -> TransportEvent {
    TransportEvent::ResponseReceived(TransportResponse {
        status: 200,
        body: body.to_owned(),
    })
}

type Recorded = Arc<Mutex<Vec<UploadEvent>>>;

fn record_all(session: &UploadSessionImpl) -> Recorded {
    let recorded: Recorded = Arc::new(Mutex::new(vec![]));
    for kind in [
        UploadEventKind::UploadProgress,
        UploadEventKind::Progress,
        UploadEventKind::UploadComplete,
        UploadEventKind::Load,
        UploadEventKind::Error,
    ] {
        let recorded = recorded.clone();
        session.on(
            kind,
            Arc::new(move |event: &UploadEvent| recorded.lock().unwrap().push(event.clone())),
        );
    }
    recorded
}

fn kinds(recorded: &Recorded) -> Vec<UploadEventKind> {
    recorded.lock().unwrap().iter().map(Event::kind).collect()
}

fn uploaded(files: &FileCollection) -> Vec<u64> {
    files.iter().map(ByteMeasure::uploaded_size).collect()
}

#[tokio::test]
async fn progress_is_distributed_over_files_in_order() {
    let transport = ScriptedTransport::new(vec![
        TransportEvent::SendStarted,
        TransportEvent::SendProgress(ByteProgress::new(150, Some(350))),
        TransportEvent::SendProgress(ByteProgress::new(350, Some(350))),
        TransportEvent::SendCompleted(ByteProgress::new(350, Some(350))),
        TransportEvent::Progress(ByteProgress::new(2, Some(2))),
        ok("stored"),
    ]);
    let session =
        UploadSessionImpl::new(destination(), sized(&[100, 200, 50]), transport.clone(), None)
            .unwrap();
    let recorded = record_all(&session);

    let response = session.upload(None).await.unwrap();
    assert_eq!(response.body, "stored");
    assert_eq!(session.state().await, SessionState::Completed);
    assert_eq!(
        kinds(&recorded),
        vec![
            UploadEventKind::UploadProgress,
            UploadEventKind::UploadProgress,
            UploadEventKind::UploadComplete,
            UploadEventKind::Progress,
            UploadEventKind::Load,
        ]
    );

    let recorded = recorded.lock().unwrap();
    let UploadEvent::UploadProgress { progress, files } = &recorded[0] else {
        panic!("expected uploadprogress, got {:?}", recorded[0]);
    };
    assert_eq!(progress.loaded, 150);
    assert_eq!(uploaded(files), vec![100, 50, 0]);
    assert_eq!(files.current().map(FileEntry::name), Some("file-1.bin"));

    let UploadEvent::UploadProgress { files, .. } = &recorded[1] else {
        panic!("expected uploadprogress, got {:?}", recorded[1]);
    };
    assert_eq!(uploaded(files), vec![100, 200, 50]);
    assert_eq!(files.uploaded_size(), 350);

    let request = transport.last_request();
    assert_eq!(request.method, "POST");
    assert!(request.parts.iter().all(|part| part.name == "files[]"));
    assert_eq!(
        request.files().map(FileEntry::name).collect::<Vec<_>>(),
        vec!["file-0.bin", "file-1.bin", "file-2.bin"]
    );
}

#[tokio::test]
async fn empty_collection_uploads_and_completes() {
    let transport = ScriptedTransport::new(vec![
        TransportEvent::SendStarted,
        TransportEvent::SendCompleted(ByteProgress::new(0, Some(0))),
        ok(""),
    ]);
    let session =
        UploadSessionImpl::new(destination(), FileCollection::default(), transport.clone(), None)
            .unwrap();
    let completions = Arc::new(Mutex::new(0));
    let on_complete: Handler<UploadEvent> = {
        let completions = completions.clone();
        Arc::new(move |event: &UploadEvent| {
            assert!(matches!(event, UploadEvent::UploadComplete { .. }));
            *completions.lock().unwrap() += 1;
        })
    };

    session.upload(Some(on_complete)).await.unwrap();
    assert_eq!(*completions.lock().unwrap(), 1);
    assert!(transport.last_request().parts.is_empty());
}

#[tokio::test]
async fn payload_offsets_win_over_raw_body_counter() {
    let transport = ScriptedTransport::new(vec![
        TransportEvent::SendStarted,
        TransportEvent::SendProgress(ByteProgress {
            loaded: 180,
            total: Some(400),
            payload_loaded: Some(100),
        }),
        ok("done"),
    ]);
    let session =
        UploadSessionImpl::new(destination(), sized(&[100, 200]), transport, None).unwrap();
    session.upload(None).await.unwrap();
    assert_eq!(uploaded(&session.files().await), vec![100, 0]);
}

#[tokio::test]
async fn unknown_length_ticks_publish_without_redistributing() {
    let transport = ScriptedTransport::new(vec![
        TransportEvent::SendStarted,
        TransportEvent::SendProgress(ByteProgress::new(150, None)),
        ok("done"),
    ]);
    let session =
        UploadSessionImpl::new(destination(), sized(&[100, 200]), transport, None).unwrap();
    let recorded = record_all(&session);
    session.upload(None).await.unwrap();

    let recorded = recorded.lock().unwrap();
    let UploadEvent::UploadProgress { files, .. } = &recorded[0] else {
        panic!("expected uploadprogress, got {:?}", recorded[0]);
    };
    assert_eq!(uploaded(files), vec![0, 0]);
    assert!(files.iter().all(FileEntry::is_tracked));
}

#[tokio::test]
async fn second_upload_is_rejected() {
    let mut transport = MockUploadTransport::new();
    transport.expect_send().times(1).returning(|_, signals| {
        signals.send(TransportEvent::SendStarted)?;
        signals.send(TransportEvent::ResponseReceived(TransportResponse {
            status: 201,
            body: "created".to_owned(),
        }))?;
        Ok(())
    });
    let session =
        UploadSessionImpl::new(destination(), sized(&[10]), Arc::new(transport), None).unwrap();

    assert_eq!(session.upload(None).await.unwrap().status, 201);
    assert!(matches!(
        session.upload(None).await,
        Err(UploadException::AlreadyStarted)
    ));
}

#[tokio::test]
async fn rejected_response_fails_the_session() {
    let transport = ScriptedTransport::new(vec![
        TransportEvent::SendStarted,
        TransportEvent::SendCompleted(ByteProgress::new(10, Some(10))),
        TransportEvent::ResponseReceived(TransportResponse {
            status: 413,
            body: "too large".to_owned(),
        }),
    ]);
    let session = UploadSessionImpl::new(destination(), sized(&[10]), transport, None).unwrap();
    let recorded = record_all(&session);

    let Err(UploadException::TransferFailed { failure }) = session.upload(None).await else {
        panic!("expected a transfer failure");
    };
    assert_eq!(failure.status, Some(413));
    assert_eq!(failure.body.as_deref(), Some("too large"));
    assert_eq!(session.state().await, SessionState::Failed);
    assert_eq!(
        kinds(&recorded),
        vec![UploadEventKind::UploadComplete, UploadEventKind::Error]
    );
}

#[tokio::test]
async fn transport_error_is_published_as_error_event() {
    let mut transport = MockUploadTransport::new();
    transport.expect_send().returning(|_, signals| {
        signals.send(TransportEvent::SendStarted)?;
        Err(anyhow::anyhow!("connection refused"))
    });
    let session =
        UploadSessionImpl::new(destination(), sized(&[10]), Arc::new(transport), None).unwrap();
    let recorded = record_all(&session);

    assert!(session.upload(None).await.is_err());
    let recorded = recorded.lock().unwrap();
    let [UploadEvent::Error { failure }] = recorded.as_slice() else {
        panic!("expected a single error event, got {recorded:?}");
    };
    assert!(failure.message.contains("connection refused"));
    assert_eq!(failure.status, None);
}

#[tokio::test]
async fn silent_transport_does_not_hang_the_session() {
    let transport = ScriptedTransport::new(vec![TransportEvent::SendStarted]);
    let session = UploadSessionImpl::new(destination(), sized(&[10]), transport, None).unwrap();
    assert!(matches!(
        session.upload(None).await,
        Err(UploadException::TransferFailed { .. })
    ));
    assert_eq!(session.state().await, SessionState::Failed);
}

#[tokio::test]
async fn handlers_can_be_removed_and_are_released_at_the_end() {
    let transport = ScriptedTransport::new(vec![
        TransportEvent::SendStarted,
        TransportEvent::SendProgress(ByteProgress::new(5, Some(10))),
        ok("done"),
    ]);
    let session = UploadSessionImpl::new(destination(), sized(&[10]), transport, None).unwrap();
    let hits = Arc::new(Mutex::new(vec![]));
    let make = |tag: &'static str| -> Handler<UploadEvent> {
        let hits = hits.clone();
        Arc::new(move |_: &UploadEvent| hits.lock().unwrap().push(tag))
    };
    let kept = make("kept");
    let removed = make("removed");
    session.on(UploadEventKind::UploadProgress, removed.clone());
    session.on(UploadEventKind::UploadProgress, kept.clone());
    session.off(UploadEventKind::UploadProgress, &removed);
    session.off(UploadEventKind::Error, &removed);

    session.upload(None).await.unwrap();
    assert_eq!(*hits.lock().unwrap(), vec!["kept"]);
    assert_eq!(Arc::strong_count(&kept), 1);
}

#[tokio::test]
async fn embedders_can_drive_the_state_machine() {
    let transport = ScriptedTransport::new(vec![]);
    let session = UploadSessionImpl::builder()
        .destination(destination())
        .files(sized(&[100, 200, 50]))
        .transport(transport)
        .build();

    // Ticks before the send started are ignored.
    session
        .dispatch(TransportEvent::SendProgress(ByteProgress::new(50, Some(350))))
        .await;
    assert_eq!(session.state().await, SessionState::Idle);
    assert!(session.files().await.iter().all(|file| !file.is_tracked()));

    session.dispatch(TransportEvent::SendStarted).await;
    assert_eq!(session.state().await, SessionState::Sending);
    session
        .dispatch(TransportEvent::SendProgress(ByteProgress::new(150, Some(350))))
        .await;
    let files = session.files().await;
    assert_eq!(uploaded(&files), vec![100, 50, 0]);
    assert_eq!(files.current_index(), Some(1));

    session.dispatch(ok("done")).await;
    assert_eq!(session.state().await, SessionState::Completed);
    session.dispatch(TransportEvent::SendStarted).await;
    assert_eq!(session.state().await, SessionState::Completed);
}

#[tokio::test]
async fn data_options_follow_the_files() {
    let transport = ScriptedTransport::new(vec![TransportEvent::SendStarted, ok("done")]);
    let session = sized(&[3, 4])
        .upload_to(
            destination(),
            transport.clone(),
            Some(json!({ "field": "photos", "method": "put", "data": { "album": "trip", "n": 2 } })),
        )
        .unwrap();
    assert_eq!(session.options().method, "PUT");

    session.upload(None).await.unwrap();
    let request = transport.last_request();
    assert_eq!(request.method, "PUT");
    let names: Vec<_> = request.parts.iter().map(|part| part.name.as_str()).collect();
    assert_eq!(names, vec!["photos", "photos", "album", "n"]);
    assert_eq!(request.parts[3].body, PartBody::Text("2".to_owned()));
}

#[test]
fn malformed_overlay_fails_at_construction() {
    let transport = ScriptedTransport::new(vec![]);
    let result = sized(&[1]).upload_to(destination(), transport, Some(json!(["PUT"])));
    assert!(matches!(result, Err(UploadException::InvalidOption { .. })));
}
