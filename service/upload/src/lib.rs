mod options;
mod session;

use std::sync::Arc;

use domain_upload::{
    exception::UploadResult, model::entity::FileCollection, service::UploadTransport,
};
use serde_json::Value;
use url::Url;

#[rustfmt::skip]
pub use {
    options::merge_options,
    session::UploadSessionImpl,
};

/// Start an upload session straight from a collection.
pub trait UploadFiles {
    fn upload_to(
        self,
        destination: Url,
        transport: Arc<dyn UploadTransport>,
        overlay: Option<Value>,
    ) -> UploadResult<UploadSessionImpl>;
}

impl UploadFiles for FileCollection {
    fn upload_to(
        self,
        destination: Url,
        transport: Arc<dyn UploadTransport>,
        overlay: Option<Value>,
    ) -> UploadResult<UploadSessionImpl> {
        UploadSessionImpl::new(destination, self, transport, overlay)
    }
}
