mod object_url;
mod transport;

#[rustfmt::skip]
pub use {
    object_url::BlobUrlStore,
    transport::ReqwestTransport,
};
