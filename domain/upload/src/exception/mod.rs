use crate::model::vo::TransportFailure;

pub type UploadResult<T> = Result<T, UploadException>;

#[derive(Debug, thiserror::Error)]
pub enum UploadException {
    #[error("The upload session was already started, a session uploads only once.")]
    AlreadyStarted,

    #[error("Invalid session option `{key}`: {reason}.")]
    InvalidOption { key: String, reason: String },

    #[error("The upload failed: {failure}.")]
    TransferFailed { failure: TransportFailure },

    #[error("Upload internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for UploadException {
    fn from(e: anyhow::Error) -> Self {
        UploadException::InternalError { source: e }
    }
}
