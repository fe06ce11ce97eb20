use async_trait::async_trait;

use crate::model::vo::{TransportEvent, UploadRequest};

/// # Upload transport
///
/// Sends one multipart request and reports its lifecycle through `signals`,
/// in the order documented on [`TransportEvent`].
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Send `request`, returning once the response is received or the
    /// transfer broke off.
    ///
    /// Returning `Err` without having sent [`TransportEvent::Failed`] is fine,
    /// the session turns it into a failure.
    async fn send(
        &self,
        request: UploadRequest,
        signals: flume::Sender<TransportEvent>,
    ) -> anyhow::Result<()>;
}
