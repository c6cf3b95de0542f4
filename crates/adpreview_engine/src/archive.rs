use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArchiveError {
    #[error("invalid archive: {0}")]
    Invalid(String),
    #[error("entry not found: {0}")]
    EntryNotFound(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("entry expands beyond the {max_bytes} byte limit")]
    EntryTooLarge { max_bytes: u64 },
    #[error("entry is not valid {encoding} text")]
    Text { encoding: String },
    #[error("archive task failed: {0}")]
    Task(String),
}

/// Decodes raw archive bytes into a handle that can list and read entries.
#[async_trait::async_trait]
pub trait ArchiveReader: Send + Sync {
    async fn open(&self, bytes: Bytes) -> Result<Box<dyn ArchiveHandle>, ArchiveError>;
}

/// One decoded archive. Dropped once its entry has been read.
#[async_trait::async_trait]
pub trait ArchiveHandle: Send + Sync {
    /// Entry names in the order the decoder produced them.
    fn entry_names(&self) -> Vec<String>;

    async fn read_text(&self, name: &str) -> Result<String, ArchiveError>;
}
