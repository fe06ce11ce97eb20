use std::{fmt, str::FromStr};

use infrastructure_event::Event;

use crate::model::entity::FileCollection;
use crate::model::vo::{ByteProgress, TransportFailure, TransportResponse};

/// Names of the events an upload session publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadEventKind {
    /// `uploadprogress`
    UploadProgress,
    /// `progress`
    Progress,
    /// `uploadcomplete`
    UploadComplete,
    /// `load`
    Load,
    /// `error`
    Error,
}

impl UploadEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadEventKind::UploadProgress => "uploadprogress",
            UploadEventKind::Progress => "progress",
            UploadEventKind::UploadComplete => "uploadcomplete",
            UploadEventKind::Load => "load",
            UploadEventKind::Error => "error",
        }
    }
}

impl fmt::Display for UploadEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown upload event: {0}.")]
pub struct UnknownEventKind(pub String);

impl FromStr for UploadEventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "uploadprogress" => UploadEventKind::UploadProgress,
            "progress" => UploadEventKind::Progress,
            "uploadcomplete" => UploadEventKind::UploadComplete,
            "load" => UploadEventKind::Load,
            "error" => UploadEventKind::Error,
            other => return Err(UnknownEventKind(other.to_owned())),
        })
    }
}

/// Event published by an upload session.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    /// Per file progress was recomputed.
    UploadProgress {
        progress: ByteProgress,
        /// Snapshot of the collection after the recomputation.
        files: FileCollection,
    },
    /// Round trip progress, passed through from the transport.
    Progress { progress: ByteProgress },
    /// The body finished sending; the response is still pending.
    UploadComplete { progress: ByteProgress },
    /// A success response arrived.
    Load { response: TransportResponse },
    /// The transfer failed.
    Error { failure: TransportFailure },
}

impl Event for UploadEvent {
    type Kind = UploadEventKind;

    fn kind(&self) -> UploadEventKind {
        match self {
            UploadEvent::UploadProgress { .. } => UploadEventKind::UploadProgress,
            UploadEvent::Progress { .. } => UploadEventKind::Progress,
            UploadEvent::UploadComplete { .. } => UploadEventKind::UploadComplete,
            UploadEvent::Load { .. } => UploadEventKind::Load,
            UploadEvent::Error { .. } => UploadEventKind::Error,
        }
    }
}
