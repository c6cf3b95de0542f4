use std::path::PathBuf;

use crate::view_model::{AppViewModel, SlotView};
use crate::{is_zip_media_type, PreviewRequest};

/// Generation identifier of a preview batch. 0 means no batch has run yet.
pub type BatchId = u64;
/// Position of a preview node in the container.
pub type SlotIndex = usize;

/// A user-selected file as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    /// Display name, used in error messages.
    pub name: String,
    /// Declared media type.
    pub media_type: String,
    /// Where the engine reads the bytes from.
    pub location: PathBuf,
}

impl FileRef {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        location: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            location: location.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    Pending,
    Frame { html: String, width: u32, height: u32 },
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Processing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    file_name: String,
    content: SlotContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    batch: BatchId,
    phase: Phase,
    slots: Vec<Slot>,
    skipped_files: usize,
    stale_results_discarded: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch(&self) -> BatchId {
        self.batch
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            batch: self.batch,
            phase: self.phase,
            slots: self
                .slots
                .iter()
                .enumerate()
                .map(|(slot, entry)| SlotView {
                    slot,
                    file_name: entry.file_name.clone(),
                    content: entry.content.clone(),
                })
                .collect(),
            skipped_files: self.skipped_files,
            stale_results_discarded: self.stale_results_discarded,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Starts a new batch: clears the container and reserves one slot per ZIP file.
    pub(crate) fn begin_batch(&mut self, files: Vec<FileRef>) -> (BatchId, Vec<PreviewRequest>) {
        self.batch += 1;
        self.slots.clear();
        self.skipped_files = 0;
        self.dirty = true;

        let mut requests = Vec::with_capacity(files.len());
        for file in files {
            if !is_zip_media_type(&file.media_type) {
                self.skipped_files += 1;
                continue;
            }
            let slot = self.slots.len();
            self.slots.push(Slot {
                file_name: file.name.clone(),
                content: SlotContent::Pending,
            });
            requests.push(PreviewRequest { slot, file });
        }

        self.phase = if requests.is_empty() {
            Phase::Idle
        } else {
            Phase::Processing
        };
        (self.batch, requests)
    }

    /// Stores a finished node. Results from superseded batches are dropped.
    pub(crate) fn fill_slot(&mut self, batch: BatchId, slot: SlotIndex, content: SlotContent) {
        if batch != self.batch {
            self.stale_results_discarded += 1;
            return;
        }
        if let Some(entry) = self.slots.get_mut(slot) {
            entry.content = content;
            self.dirty = true;
        }
    }

    pub(crate) fn finish_batch(&mut self, batch: BatchId) {
        if batch != self.batch || self.phase == Phase::Idle {
            return;
        }
        // A batch that ends with empty slots still owes one node per file.
        for entry in &mut self.slots {
            if entry.content == SlotContent::Pending {
                entry.content = SlotContent::Error {
                    message: format!("Error: Preview of {} did not complete", entry.file_name),
                };
            }
        }
        self.phase = Phase::Idle;
        self.dirty = true;
    }
}
