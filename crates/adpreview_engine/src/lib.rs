//! Ad preview engine: archive reading, preview pipeline and batch execution.
mod archive;
mod decode;
mod engine;
mod locate;
mod persist;
mod pipeline;
mod types;
mod zip_reader;

pub use archive::{ArchiveError, ArchiveHandle, ArchiveReader};
pub use decode::decode_text;
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use locate::{find_index_entry, INDEX_ENTRY_SUFFIX};
pub use persist::{ensure_output_dir, PageWriter, PersistError, PREVIEW_PAGE_FILENAME};
pub use pipeline::{
    PreviewPipeline, PreviewSettings, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH,
    DEFAULT_MAX_ARCHIVE_BYTES,
};
pub use types::{EngineEvent, InlineFrame, PreviewError, PreviewNode, SelectedFile};
pub use zip_reader::ZipArchiveReader;
