use crate::{BatchId, Phase, SlotContent, SlotIndex};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub batch: BatchId,
    pub phase: Phase,
    pub slots: Vec<SlotView>,
    pub skipped_files: usize,
    pub stale_results_discarded: u64,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn frame_count(&self) -> usize {
        self.count(|content| matches!(content, SlotContent::Frame { .. }))
    }

    pub fn error_count(&self) -> usize {
        self.count(|content| matches!(content, SlotContent::Error { .. }))
    }

    pub fn pending_count(&self) -> usize {
        self.count(|content| matches!(content, SlotContent::Pending))
    }

    fn count(&self, predicate: impl Fn(&SlotContent) -> bool) -> usize {
        self.slots
            .iter()
            .filter(|slot| predicate(&slot.content))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub slot: SlotIndex,
    pub file_name: String,
    pub content: SlotContent,
}
