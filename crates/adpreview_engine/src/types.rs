use std::fmt;

use adpreview_core::{BatchId, SlotIndex};
use bytes::Bytes;

use crate::ArchiveError;

/// A selected file with its payload loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// An inline frame rendering `srcdoc` as HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFrame {
    pub srcdoc: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewNode {
    Frame(InlineFrame),
    Error { message: String },
}

impl PreviewNode {
    pub fn error(err: &PreviewError) -> Self {
        PreviewNode::Error {
            message: format!("Error: {err}"),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PreviewNode::Error { .. })
    }
}

impl fmt::Display for PreviewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewNode::Frame(frame) => write!(
                f,
                "frame {}x{} ({} bytes)",
                frame.width,
                frame.height,
                frame.srcdoc.len()
            ),
            PreviewNode::Error { message } => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    NodeReady {
        batch: BatchId,
        slot: SlotIndex,
        node: PreviewNode,
    },
    BatchFinished {
        batch: BatchId,
        cancelled: bool,
    },
}

/// Per-file failures. Each one becomes an error node; none aborts a batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    #[error("{file_name} is not a ZIP archive ({media_type})")]
    WrongFileType {
        file_name: String,
        media_type: String,
    },
    #[error("No index.html found in {file_name}")]
    MissingEntry { file_name: String },
    #[error("Could not open {file_name} as a ZIP archive: {source}")]
    DecodeFailure {
        file_name: String,
        source: ArchiveError,
    },
    #[error("Could not read {entry} in {file_name}: {source}")]
    EntryUnreadable {
        file_name: String,
        entry: String,
        source: ArchiveError,
    },
    #[error("{file_name} is {actual} bytes, above the {max_bytes} byte limit")]
    TooLarge {
        file_name: String,
        max_bytes: u64,
        actual: u64,
    },
    #[error("Could not read {file_name}: {message}")]
    Unreadable { file_name: String, message: String },
}
