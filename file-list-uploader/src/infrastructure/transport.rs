use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::Context;
use bytes::Bytes;
use domain_upload::{
    model::{
        entity::FileEntry,
        vo::{ByteProgress, PartBody, TransportEvent, TransportResponse, UploadRequest},
        ByteMeasure,
    },
    service::UploadTransport,
};
use futures::StreamExt;
use reqwest::{
    multipart::{Form, Part},
    Body, Method,
};
use typed_builder::TypedBuilder;

use crate::config::TransportConfig;

/// Multipart transport over `reqwest`.
///
/// File parts are streamed in `chunk_size` slices and every slice handed to
/// the connection is reported as a payload offset, so progress excludes the
/// multipart framing.
#[derive(TypedBuilder)]
pub struct ReqwestTransport {
    #[builder(default = Arc::new(reqwest::Client::new()))]
    client: Arc<reqwest::Client>,
    #[builder(default = TransportConfig::default_chunk_size())]
    chunk_size: usize,
    #[builder(default, setter(strip_option))]
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn from_config(config: &TransportConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent().as_str())
            .build()
            .context("building the http client")?;
        Ok(Self {
            client: Arc::new(client),
            chunk_size: *config.chunk_size(),
            timeout: (*config.timeout_ms()).map(Duration::from_millis),
        })
    }

    fn file_part(
        &self,
        file: &FileEntry,
        counter: Arc<AtomicU64>,
        payload_total: u64,
        signals: flume::WeakSender<TransportEvent>,
    ) -> anyhow::Result<Part> {
        let chunk_size = self.chunk_size.max(1);
        let content = file.content().clone();
        let chunks: Vec<Bytes> = (0..content.len())
            .step_by(chunk_size)
            .map(|start| content.slice(start..(start + chunk_size).min(content.len())))
            .collect();
        let stream = futures::stream::iter(chunks).map(move |chunk| {
            let len = chunk.len() as u64;
            let loaded = counter.fetch_add(len, Ordering::SeqCst) + len;
            if let Some(signals) = signals.upgrade() {
                let _ = signals.send(TransportEvent::SendProgress(ByteProgress::payload(
                    loaded,
                    payload_total,
                )));
            }
            Ok::<_, std::io::Error>(chunk)
        });

        let mut part = Part::stream_with_length(Body::wrap_stream(stream), file.size())
            .file_name(file.name().to_owned());
        if let Some(mime) = file.mime() {
            part = part
                .mime_str(mime)
                .with_context(|| format!("invalid mime type {mime} for {}", file.name()))?;
        }
        Ok(part)
    }
}

#[async_trait::async_trait]
impl UploadTransport for ReqwestTransport {
    #[tracing::instrument(skip_all, fields(destination = %request.destination))]
    async fn send(
        &self,
        request: UploadRequest,
        signals: flume::Sender<TransportEvent>,
    ) -> anyhow::Result<()> {
        let method = Method::from_bytes(request.method.as_bytes())
            .with_context(|| format!("invalid http method {}", request.method))?;
        let payload_total: u64 = request.files().map(ByteMeasure::size).sum();
        let counter = Arc::new(AtomicU64::new(0));

        let mut form = Form::new();
        for part in request.parts.iter() {
            form = match &part.body {
                PartBody::File(file) => form.part(
                    part.name.clone(),
                    self.file_part(file, counter.clone(), payload_total, signals.downgrade())?,
                ),
                PartBody::Text(text) => form.text(part.name.clone(), text.clone()),
            };
        }

        let mut builder = self
            .client
            .request(method, request.destination.clone())
            .multipart(form);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        signals.send(TransportEvent::SendStarted)?;
        let response = builder
            .send()
            .await
            .with_context(|| format!("sending to {}", request.destination))?;
        signals.send(TransportEvent::SendCompleted(ByteProgress::payload(
            counter.load(Ordering::SeqCst),
            payload_total,
        )))?;

        let status = response.status().as_u16();
        let total = response.content_length();
        tracing::debug!("Response {status} from {}", request.destination);
        let mut received = 0u64;
        let mut body = vec![];
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.context("reading the response body")?;
            received += chunk.len() as u64;
            body.extend_from_slice(&chunk);
            signals.send(TransportEvent::Progress(ByteProgress::new(received, total)))?;
        }

        signals.send(TransportEvent::ResponseReceived(TransportResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        }))?;
        Ok(())
    }
}
