use bytes::Bytes;
use url::Url;

use crate::model::ByteMeasure;
use crate::service::ObjectUrlService;

/// One in-memory file to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// File name sent with the multipart part.
    name: String,
    /// File content, cloning shares the buffer.
    content: Bytes,
    /// Content type of the part, the transport decides when absent.
    mime: Option<String>,
    /// Uploaded bytes, absent until a session starts sending.
    uploaded: Option<u64>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            mime: None,
            uploaded: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    /// Whether a session has started sending this entry.
    pub fn is_tracked(&self) -> bool {
        self.uploaded.is_some()
    }

    /// Record uploaded bytes, clamped to the entry size.
    pub fn set_uploaded_size(&mut self, uploaded: u64) {
        self.uploaded = Some(uploaded.min(self.size()));
    }

    /// Mint a fresh object URL for the content.
    ///
    /// Every call creates a new reference; revoking it through
    /// [`ObjectUrlService::revoke_url`] is up to the caller.
    pub fn url(&self, urls: &dyn ObjectUrlService) -> anyhow::Result<Url> {
        urls.create_url(self)
    }
}

impl ByteMeasure for FileEntry {
    fn size(&self) -> u64 {
        self.content.len() as u64
    }

    fn uploaded_size(&self) -> u64 {
        self.uploaded.unwrap_or_default()
    }
}
