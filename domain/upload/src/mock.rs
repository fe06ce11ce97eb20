use async_trait::async_trait;
use bytes::Bytes;
use mockall::mock;
use url::Url;

use crate::{
    model::{
        entity::FileEntry,
        vo::{TransportEvent, UploadRequest},
    },
    service::{ObjectUrlService, UploadTransport},
};

mock! {
    pub UploadTransport {}
    #[async_trait]
    impl UploadTransport for UploadTransport {
        async fn send(
            &self,
            request: UploadRequest,
            signals: flume::Sender<TransportEvent>,
        ) -> anyhow::Result<()>;
    }
}

mock! {
    pub ObjectUrlService {}
    impl ObjectUrlService for ObjectUrlService {
        fn create_url(&self, file: &FileEntry) -> anyhow::Result<Url>;
        fn revoke_url(&self, url: &Url) -> anyhow::Result<()>;
        fn resolve(&self, url: &Url) -> Option<Bytes>;
    }
}
