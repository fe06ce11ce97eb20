use async_trait::async_trait;
use infrastructure_event::Handler;

use crate::exception::UploadResult;
use crate::model::entity::FileCollection;
use crate::model::vo::{SessionState, TransportEvent, TransportResponse, UploadEvent, UploadEventKind};

/// # Upload session
///
/// Owns one transfer of a file collection to a destination. Goes
/// `Idle -> Sending -> Completed | Failed` and publishes [`UploadEvent`]s on the way.
#[async_trait]
pub trait UploadSessionService: Send + Sync {
    /// Subscribe `handler` to `kind`.
    fn on(&self, kind: UploadEventKind, handler: Handler<UploadEvent>);

    /// Unsubscribe `handler` from `kind`, a no-op when it isn't subscribed.
    fn off(&self, kind: UploadEventKind, handler: &Handler<UploadEvent>);

    /// Send the collection.
    ///
    /// `on_complete` is subscribed to `uploadcomplete`. Errors with
    /// `AlreadyStarted` when called twice and with `TransferFailed` when the
    /// session ends `Failed`.
    async fn upload(
        &self,
        on_complete: Option<Handler<UploadEvent>>,
    ) -> UploadResult<TransportResponse>;

    /// Feed one transport signal through the state machine.
    async fn dispatch(&self, event: TransportEvent);

    async fn state(&self) -> SessionState;

    /// Snapshot of the collection with its current progress.
    async fn files(&self) -> FileCollection;
}
