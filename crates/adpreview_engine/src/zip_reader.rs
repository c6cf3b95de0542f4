use std::io::{Cursor, Read};

use bytes::Bytes;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::{
    decode_text, ArchiveError, ArchiveHandle, ArchiveReader, DEFAULT_MAX_ARCHIVE_BYTES,
};

/// [`ArchiveReader`] backed by the `zip` crate. Decoding runs on tokio's blocking pool.
///
/// Entries are never inflated past `max_entry_bytes`, whatever their headers claim.
#[derive(Debug, Clone, Copy)]
pub struct ZipArchiveReader {
    max_entry_bytes: u64,
}

impl ZipArchiveReader {
    pub fn new() -> Self {
        Self::with_max_entry_bytes(DEFAULT_MAX_ARCHIVE_BYTES)
    }

    pub fn with_max_entry_bytes(max_entry_bytes: u64) -> Self {
        Self { max_entry_bytes }
    }
}

impl Default for ZipArchiveReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ArchiveReader for ZipArchiveReader {
    async fn open(&self, bytes: Bytes) -> Result<Box<dyn ArchiveHandle>, ArchiveError> {
        let max_entry_bytes = self.max_entry_bytes;
        let handle = tokio::task::spawn_blocking(move || ZipHandle::decode(bytes, max_entry_bytes))
            .await
            .map_err(|err| ArchiveError::Task(err.to_string()))??;
        Ok(Box::new(handle))
    }
}

struct ZipHandle {
    archive: ZipArchive<Cursor<Bytes>>,
    names: Vec<String>,
    max_entry_bytes: u64,
}

impl ZipHandle {
    fn decode(bytes: Bytes, max_entry_bytes: u64) -> Result<Self, ArchiveError> {
        let archive = ZipArchive::new(Cursor::new(bytes)).map_err(map_zip_error)?;
        let names = archive.file_names().map(str::to_owned).collect();
        Ok(Self {
            archive,
            names,
            max_entry_bytes,
        })
    }
}

#[async_trait::async_trait]
impl ArchiveHandle for ZipHandle {
    fn entry_names(&self) -> Vec<String> {
        self.names.clone()
    }

    async fn read_text(&self, name: &str) -> Result<String, ArchiveError> {
        // Clones share the parsed central directory; only the cursor is copied.
        let mut archive = self.archive.clone();
        let name = name.to_owned();
        let max_bytes = self.max_entry_bytes;
        let bytes = tokio::task::spawn_blocking(move || {
            let mut entry = archive.by_name(&name).map_err(|err| match err {
                ZipError::FileNotFound => ArchiveError::EntryNotFound(name.clone()),
                other => map_zip_error(other),
            })?;
            if entry.size() > max_bytes {
                return Err(ArchiveError::EntryTooLarge { max_bytes });
            }
            let mut buf = Vec::with_capacity(entry.size().min(1 << 20) as usize);
            Read::by_ref(&mut entry)
                .take(max_bytes.saturating_add(1))
                .read_to_end(&mut buf)
                .map_err(|err| ArchiveError::Io(err.to_string()))?;
            // Declared sizes are not trusted.
            if buf.len() as u64 > max_bytes {
                return Err(ArchiveError::EntryTooLarge { max_bytes });
            }
            Ok::<_, ArchiveError>(buf)
        })
        .await
        .map_err(|err| ArchiveError::Task(err.to_string()))??;

        decode_text(&bytes)
    }
}

fn map_zip_error(err: ZipError) -> ArchiveError {
    match err {
        ZipError::Io(io) => ArchiveError::Io(io.to_string()),
        other => ArchiveError::Invalid(other.to_string()),
    }
}
