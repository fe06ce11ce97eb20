use anyhow::Context;
use bytes::Bytes;
use dashmap::DashMap;
use domain_upload::{model::entity::FileEntry, service::ObjectUrlService};
use url::Url;
use uuid::Uuid;

/// In-memory object URL registry minting `blob:<origin>/<uuid>` references.
pub struct BlobUrlStore {
    origin: String,
    blobs: DashMap<Uuid, Bytes>,
}

impl Default for BlobUrlStore {
    fn default() -> Self {
        Self::new("null")
    }
}

impl BlobUrlStore {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            blobs: DashMap::new(),
        }
    }

    /// Number of live references.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    fn id_of(url: &Url) -> Option<Uuid> {
        if url.scheme() != "blob" {
            return None;
        }
        let (_, id) = url.path().rsplit_once('/')?;
        Uuid::parse_str(id).ok()
    }
}

impl ObjectUrlService for BlobUrlStore {
    fn create_url(&self, file: &FileEntry) -> anyhow::Result<Url> {
        let id = Uuid::new_v4();
        let url = Url::parse(&format!("blob:{}/{id}", self.origin))
            .with_context(|| format!("minting an object url for {}", file.name()))?;
        self.blobs.insert(id, file.content().clone());
        tracing::trace!("Created {url} for {}", file.name());
        Ok(url)
    }

    fn revoke_url(&self, url: &Url) -> anyhow::Result<()> {
        let id = Self::id_of(url).with_context(|| format!("{url} is not an object url"))?;
        if self.blobs.remove(&id).is_none() {
            tracing::debug!("Revoking {url}, which is already gone");
        }
        Ok(())
    }

    fn resolve(&self, url: &Url) -> Option<Bytes> {
        Self::id_of(url).and_then(|id| self.blobs.get(&id).map(|blob| blob.value().clone()))
    }
}
