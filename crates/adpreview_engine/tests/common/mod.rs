#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use adpreview_engine::{ArchiveError, ArchiveHandle, ArchiveReader, EngineEvent, EventSink};
use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(preview_logging::initialize_for_tests);
}

/// Builds a real ZIP archive in memory.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Entry content; `None` fails to read as text.
type FakeEntry = (String, Option<String>);

/// In-memory archive reader keyed by payload bytes. Unknown payloads fail to decode.
#[derive(Default, Clone)]
pub struct MemoryArchiveReader {
    archives: HashMap<Vec<u8>, Vec<FakeEntry>>,
    delay: Option<Duration>,
}

impl MemoryArchiveReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_archive(mut self, payload: &[u8], entries: &[(&str, &str)]) -> Self {
        let entries = entries
            .iter()
            .map(|(name, content)| (name.to_string(), Some(content.to_string())))
            .collect();
        self.archives.insert(payload.to_vec(), entries);
        self
    }

    pub fn with_unreadable_entry(mut self, payload: &[u8], name: &str) -> Self {
        self.archives
            .insert(payload.to_vec(), vec![(name.to_string(), None)]);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait::async_trait]
impl ArchiveReader for MemoryArchiveReader {
    async fn open(&self, bytes: Bytes) -> Result<Box<dyn ArchiveHandle>, ArchiveError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.archives.get(bytes.as_ref()) {
            Some(entries) => Ok(Box::new(MemoryArchive {
                entries: entries.clone(),
            })),
            None => Err(ArchiveError::Invalid("unknown payload".to_string())),
        }
    }
}

struct MemoryArchive {
    entries: Vec<FakeEntry>,
}

#[async_trait::async_trait]
impl ArchiveHandle for MemoryArchive {
    fn entry_names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    async fn read_text(&self, name: &str) -> Result<String, ArchiveError> {
        match self.entries.iter().find(|(entry, _)| entry == name) {
            Some((_, Some(content))) => Ok(content.clone()),
            Some((_, None)) => Err(ArchiveError::Text {
                encoding: "UTF-8".to_string(),
            }),
            None => Err(ArchiveError::EntryNotFound(name.to_string())),
        }
    }
}

#[derive(Default, Clone)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Polls until `batch` reports `BatchFinished`, or panics after a few seconds.
    pub fn wait_for_batch(&self, batch: u64) -> Vec<EngineEvent> {
        for _ in 0..500 {
            let events = self.snapshot();
            let finished = events.iter().any(|event| {
                matches!(event, EngineEvent::BatchFinished { batch: b, .. } if *b == batch)
            });
            if finished {
                return events;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("batch {batch} did not finish; events: {:?}", self.snapshot());
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
