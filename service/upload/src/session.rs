use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use domain_upload::{
    exception::{UploadException, UploadResult},
    model::{
        entity::FileCollection,
        vo::{
            SessionOptions, SessionState, TransportEvent, TransportFailure, TransportResponse,
            UploadEvent, UploadEventKind, UploadRequest,
        },
    },
    service::{UploadSessionService, UploadTransport},
};
use infrastructure_event::{Handler, Notifier};
use serde_json::Value;
use tokio::sync::Mutex;
use typed_builder::TypedBuilder;
use url::Url;

use crate::options::merge_options;

#[derive(Default)]
struct Lifecycle {
    state: SessionState,
    outcome: Option<Result<TransportResponse, TransportFailure>>,
}

/// Upload session over an [`UploadTransport`].
///
/// The builder takes options as given; [`UploadSessionImpl::new`] merges and
/// validates an overlay first.
#[derive(TypedBuilder)]
pub struct UploadSessionImpl {
    destination: Url,
    #[builder(setter(transform = |files: FileCollection| Mutex::new(files)))]
    files: Mutex<FileCollection>,
    #[builder(default)]
    options: SessionOptions,
    transport: Arc<dyn UploadTransport>,
    #[builder(default, setter(skip))]
    notifier: Notifier<UploadEvent>,
    #[builder(default, setter(skip))]
    lifecycle: Mutex<Lifecycle>,
    #[builder(default, setter(skip))]
    started: AtomicBool,
}

impl UploadSessionImpl {
    /// Build a session, merging `overlay` onto the default options.
    pub fn new(
        destination: Url,
        files: FileCollection,
        transport: Arc<dyn UploadTransport>,
        overlay: Option<Value>,
    ) -> UploadResult<Self> {
        Ok(Self::builder()
            .destination(destination)
            .files(files)
            .options(merge_options(overlay)?)
            .transport(transport)
            .build())
    }

    pub fn destination(&self) -> &Url {
        &self.destination
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    async fn finish(&self, outcome: Result<TransportResponse, TransportFailure>) {
        let event = {
            let mut lifecycle = self.lifecycle.lock().await;
            let event = match &outcome {
                Ok(response) => {
                    lifecycle.state = SessionState::Completed;
                    tracing::info!(
                        "Upload to {} completed with status {}",
                        self.destination,
                        response.status
                    );
                    UploadEvent::Load {
                        response: response.clone(),
                    }
                }
                Err(failure) => {
                    lifecycle.state = SessionState::Failed;
                    tracing::error!("Upload to {} failed: {failure}", self.destination);
                    UploadEvent::Error {
                        failure: failure.clone(),
                    }
                }
            };
            lifecycle.outcome = Some(outcome);
            event
        };
        self.notifier.emit(&event);
        // Terminal, nothing is published any more.
        self.notifier.clear();
    }

    async fn outcome(&self) -> UploadResult<TransportResponse> {
        match &self.lifecycle.lock().await.outcome {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(failure)) => Err(UploadException::TransferFailed {
                failure: failure.clone(),
            }),
            None => Err(anyhow::anyhow!("upload session ended without an outcome").into()),
        }
    }
}

#[async_trait]
impl UploadSessionService for UploadSessionImpl {
    fn on(&self, kind: UploadEventKind, handler: Handler<UploadEvent>) {
        self.notifier.on(kind, handler);
    }

    fn off(&self, kind: UploadEventKind, handler: &Handler<UploadEvent>) {
        self.notifier.off(&kind, handler);
    }

    #[tracing::instrument(skip_all, fields(destination = %self.destination))]
    async fn upload(
        &self,
        on_complete: Option<Handler<UploadEvent>>,
    ) -> UploadResult<TransportResponse> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(UploadException::AlreadyStarted);
        }
        if let Some(handler) = on_complete {
            self.notifier.on(UploadEventKind::UploadComplete, handler);
        }

        let request = {
            let files = self.files.lock().await;
            UploadRequest::new(self.destination.clone(), &files, &self.options)
        };
        tracing::debug!(
            "Sending {} part(s) with {} to {}",
            request.parts.len(),
            request.method,
            request.destination
        );

        let (signals, receiver) = flume::unbounded();
        let drain = async {
            while let Ok(event) = receiver.recv_async().await {
                self.dispatch(event).await;
            }
        };
        let (sent, ()) = futures::join!(self.transport.send(request, signals), drain);

        if !self.state().await.is_terminal() {
            let failure = match sent {
                Err(e) => TransportFailure::new(format!("{e:#}")),
                Ok(()) => TransportFailure::new("the transport finished without a response"),
            };
            self.dispatch(TransportEvent::Failed(failure)).await;
        } else if let Err(e) = sent {
            tracing::warn!("Transport reported an error after the upload ended: {e:#}");
        }
        self.outcome().await
    }

    async fn dispatch(&self, event: TransportEvent) {
        let state = self.lifecycle.lock().await.state;
        if state.is_terminal() {
            tracing::warn!("Ignoring {event:?}, the session already ended {state:?}");
            return;
        }
        match event {
            TransportEvent::SendStarted => {
                if state != SessionState::Idle {
                    tracing::warn!("Ignoring a repeated send start");
                    return;
                }
                self.files.lock().await.reset_progress();
                self.lifecycle.lock().await.state = SessionState::Sending;
                tracing::debug!("Started sending to {}", self.destination);
            }
            TransportEvent::SendProgress(progress) => {
                if state != SessionState::Sending {
                    tracing::warn!("Ignoring send progress while {state:?}");
                    return;
                }
                let files = {
                    let mut files = self.files.lock().await;
                    if progress.length_computable() {
                        let current = files.distribute(progress.distributable());
                        tracing::trace!(
                            loaded = progress.distributable(),
                            current = ?current,
                            "Redistributed upload progress"
                        );
                    }
                    files.clone()
                };
                self.notifier.emit(&UploadEvent::UploadProgress { progress, files });
            }
            TransportEvent::SendCompleted(progress) => {
                if state != SessionState::Sending {
                    tracing::warn!("Ignoring send completion while {state:?}");
                    return;
                }
                tracing::debug!("Request body sent, waiting for the response");
                self.notifier.emit(&UploadEvent::UploadComplete { progress });
            }
            TransportEvent::Progress(progress) => {
                self.notifier.emit(&UploadEvent::Progress { progress });
            }
            TransportEvent::ResponseReceived(response) => {
                if response.is_success() {
                    self.finish(Ok(response)).await;
                } else {
                    self.finish(Err(response.into())).await;
                }
            }
            TransportEvent::Failed(failure) => self.finish(Err(failure)).await,
        }
    }

    async fn state(&self) -> SessionState {
        self.lifecycle.lock().await.state
    }

    async fn files(&self) -> FileCollection {
        self.files.lock().await.clone()
    }
}
