use std::sync::Arc;

use adpreview_core::is_zip_media_type;
use preview_logging::{preview_debug, preview_info, preview_warn};

use crate::{find_index_entry, ArchiveReader, InlineFrame, PreviewError, PreviewNode, SelectedFile};

/// Standard medium-rectangle ad unit.
pub const DEFAULT_FRAME_WIDTH: u32 = 300;
pub const DEFAULT_FRAME_HEIGHT: u32 = 250;
pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSettings {
    pub frame_width: u32,
    pub frame_height: u32,
    pub max_archive_bytes: u64,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
        }
    }
}

/// Turns one selected archive into one preview node.
pub struct PreviewPipeline {
    reader: Arc<dyn ArchiveReader>,
    settings: PreviewSettings,
}

impl PreviewPipeline {
    pub fn new(reader: Arc<dyn ArchiveReader>, settings: PreviewSettings) -> Self {
        Self { reader, settings }
    }

    /// Previews every ZIP file of a selection, one after another, in selection order.
    ///
    /// Files of any other media type produce no node.
    pub async fn process_selection(&self, files: &[SelectedFile]) -> Vec<PreviewNode> {
        let mut nodes = Vec::with_capacity(files.len());
        for file in files {
            if !is_zip_media_type(&file.media_type) {
                preview_debug!("Skipping {} ({})", file.name, file.media_type);
                continue;
            }
            nodes.push(self.preview(file).await);
        }
        nodes
    }

    /// Previews a single archive. Failures are folded into an error node.
    pub async fn preview(&self, file: &SelectedFile) -> PreviewNode {
        match self.try_preview(file).await {
            Ok(frame) => {
                preview_info!("Rendered {} ({} bytes of HTML)", file.name, frame.srcdoc.len());
                PreviewNode::Frame(frame)
            }
            Err(err) => {
                preview_warn!("Preview of {} failed: {}", file.name, err);
                PreviewNode::error(&err)
            }
        }
    }

    async fn try_preview(&self, file: &SelectedFile) -> Result<InlineFrame, PreviewError> {
        if !is_zip_media_type(&file.media_type) {
            return Err(PreviewError::WrongFileType {
                file_name: file.name.clone(),
                media_type: file.media_type.clone(),
            });
        }
        self.check_size(&file.name, file.bytes.len() as u64)?;

        let archive = self
            .reader
            .open(file.bytes.clone())
            .await
            .map_err(|source| PreviewError::DecodeFailure {
                file_name: file.name.clone(),
                source,
            })?;

        let names = archive.entry_names();
        let entry = find_index_entry(&names).ok_or_else(|| PreviewError::MissingEntry {
            file_name: file.name.clone(),
        })?;
        preview_debug!("{}: using entry {} of {}", file.name, entry, names.len());

        let html = archive
            .read_text(entry)
            .await
            .map_err(|source| PreviewError::EntryUnreadable {
                file_name: file.name.clone(),
                entry: entry.to_string(),
                source,
            })?;

        Ok(InlineFrame {
            srcdoc: html,
            width: self.settings.frame_width,
            height: self.settings.frame_height,
        })
    }

    pub(crate) fn check_size(&self, file_name: &str, actual: u64) -> Result<(), PreviewError> {
        let max_bytes = self.settings.max_archive_bytes;
        if actual > max_bytes {
            return Err(PreviewError::TooLarge {
                file_name: file_name.to_string(),
                max_bytes,
                actual,
            });
        }
        Ok(())
    }
}
