use std::sync::Arc;

use domain_upload::{
    exception::UploadResult,
    model::{
        entity::FileCollection,
        vo::{TransportResponse, UploadEvent},
    },
    service::{UploadSessionService, UploadTransport},
};
use infrastructure_event::Handler;
use serde_json::Value;
use service_upload::{merge_options, UploadSessionImpl};
use typed_builder::TypedBuilder;
use url::Url;

use crate::{config::UploaderConfig, infrastructure::ReqwestTransport};

/// Entry point holding a transport and the options every session starts from.
#[derive(TypedBuilder)]
pub struct FileListUploader {
    transport: Arc<dyn UploadTransport>,
    #[builder(default)]
    defaults: Value,
}

impl FileListUploader {
    pub fn from_config(config: &UploaderConfig) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::from_config(config.transport())?;
        Ok(Self {
            transport: Arc::new(transport),
            defaults: config.session().clone(),
        })
    }

    /// A fresh session, `overlay` merged over the configured defaults.
    pub fn session(
        &self,
        destination: Url,
        files: FileCollection,
        overlay: Option<Value>,
    ) -> UploadResult<UploadSessionImpl> {
        let defaults = Some(self.defaults.clone()).filter(|defaults| !defaults.is_null());
        let options = merge_options(defaults.into_iter().chain(overlay))?;
        tracing::debug!(
            "New session for {} file(s) to {destination} with {}",
            files.len(),
            options.method
        );
        Ok(UploadSessionImpl::builder()
            .destination(destination)
            .files(files)
            .options(options)
            .transport(self.transport.clone())
            .build())
    }

    /// Create a session and run it to the end.
    pub async fn upload(
        &self,
        destination: Url,
        files: FileCollection,
        overlay: Option<Value>,
        on_complete: Option<Handler<UploadEvent>>,
    ) -> UploadResult<TransportResponse> {
        let session = self.session(destination, files, overlay)?;
        session.upload(on_complete).await
    }
}
