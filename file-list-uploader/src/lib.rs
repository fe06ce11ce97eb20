//! Upload a list of files in one multipart request and follow per-file progress.
//!
//! ```no_run
//! use file_list_uploader::prelude::*;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let uploader = FileListUploader::from_config(&UploaderConfig::load(&[])?)?;
//! let files: FileCollection = vec![
//!     FileEntry::new("a.txt", "first"),
//!     FileEntry::new("b.txt", "second"),
//! ]
//! .into();
//! let session = uploader.session("http://localhost:8080/upload".parse()?, files, None)?;
//! session.on(
//!     UploadEventKind::UploadProgress,
//!     std::sync::Arc::new(|event: &UploadEvent| {
//!         if let UploadEvent::UploadProgress { files, .. } = event {
//!             println!("{:.1}%", files.percent_uploaded() * 100.0);
//!         }
//!     }),
//! );
//! session.upload(None).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
pub mod infrastructure;

#[rustfmt::skip]
pub use {
    client::FileListUploader,
    config::{TransportConfig, UploaderConfig},
};

pub mod prelude {
    pub use domain_upload::{
        exception::{UploadException, UploadResult},
        model::{
            entity::{FileCollection, FileEntry},
            human_size,
            vo::{
                ByteProgress, SessionOptions, SessionState, TransportFailure, TransportResponse,
                UploadEvent, UploadEventKind,
            },
            ByteMeasure,
        },
        service::{ObjectUrlService, UploadSessionService, UploadTransport},
    };
    pub use infrastructure_config::initialize_telemetry;
    pub use infrastructure_event::Handler;
    pub use service_upload::{UploadFiles, UploadSessionImpl};

    pub use crate::{
        infrastructure::{BlobUrlStore, ReqwestTransport},
        FileListUploader, UploaderConfig,
    };
}
