#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a new set of files. Replaces whatever the container shows.
    FilesSelected(Vec<crate::FileRef>),
    /// Engine finished one file of a batch.
    SlotReady {
        batch: crate::BatchId,
        slot: crate::SlotIndex,
        content: crate::SlotContent,
    },
    /// Engine finished (or abandoned) a batch.
    BatchFinished { batch: crate::BatchId },
    /// Fallback for placeholder wiring.
    NoOp,
}
