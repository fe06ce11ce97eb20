use std::path::PathBuf;

use getset::Getters;
use infrastructure_config::{build_config, TelemetryConfig};
use serde::*;
use serde_json::Value;

#[derive(Default, Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct UploaderConfig {
    #[serde(default)]
    telemetry: TelemetryConfig,
    #[serde(default)]
    transport: TransportConfig,
    /// Options overlay applied to every session before the per-call one.
    #[serde(default)]
    session: Value,
}

impl UploaderConfig {
    /// Read `uploader.yaml`, `extra_files` and `UPLOADER__*` variables.
    pub fn load(extra_files: &[PathBuf]) -> anyhow::Result<Self> {
        Ok(build_config("uploader", "UPLOADER", extra_files)?.try_deserialize()?)
    }
}

#[derive(Deserialize, Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct TransportConfig {
    /// Whole request timeout, none by default.
    #[serde(default)]
    timeout_ms: Option<u64>,
    /// Size of the slices file bodies are streamed in.
    #[serde(default = "TransportConfig::default_chunk_size")]
    chunk_size: usize,
    #[serde(default = "TransportConfig::default_user_agent")]
    user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            chunk_size: Self::default_chunk_size(),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl TransportConfig {
    pub(crate) fn default_chunk_size() -> usize {
        64 * 1024
    }
    fn default_user_agent() -> String {
        format!("file-list-uploader/{}", env!("CARGO_PKG_VERSION"))
    }
}
