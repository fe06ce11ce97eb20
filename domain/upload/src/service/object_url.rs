use bytes::Bytes;
use url::Url;

use crate::model::entity::FileEntry;

/// Revocable references to file content.
///
/// References live until revoked; nothing in this crate revokes them.
pub trait ObjectUrlService: Send + Sync {
    /// Mint a new reference to `file`'s content.
    fn create_url(&self, file: &FileEntry) -> anyhow::Result<Url>;

    /// Release a reference. Revoking an unknown URL is not an error.
    fn revoke_url(&self, url: &Url) -> anyhow::Result<()>;

    /// Content behind a live reference.
    fn resolve(&self, url: &Url) -> Option<Bytes>;
}
