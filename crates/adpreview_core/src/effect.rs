use crate::{BatchId, FileRef, SlotIndex};

/// One archive to preview, bound to the container slot its node goes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub slot: SlotIndex,
    pub file: FileRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Stop work on a batch that has been superseded by a newer selection.
    CancelBatch { batch: BatchId },
    /// Preview the requests in slot order.
    PreviewBatch {
        batch: BatchId,
        requests: Vec<PreviewRequest>,
    },
}
