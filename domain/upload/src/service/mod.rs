mod object_url;
mod transport;
mod upload_session;

#[rustfmt::skip]
pub use {
    object_url::ObjectUrlService,
    transport::UploadTransport,
    upload_session::UploadSessionService,
};
