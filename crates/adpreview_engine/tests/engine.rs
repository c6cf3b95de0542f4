mod common;

use std::fs;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use adpreview_core::{FileRef, PreviewRequest};
use adpreview_engine::{
    ChannelEventSink, EngineEvent, EngineHandle, InlineFrame, PreviewNode, PreviewSettings,
    ZipArchiveReader,
};
use common::{build_zip, init_logging, MemoryArchiveReader, TestSink};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn request(slot: usize, dir: &TempDir, name: &str, payload: &[u8]) -> PreviewRequest {
    let location = dir.path().join(name);
    fs::write(&location, payload).unwrap();
    PreviewRequest {
        slot,
        file: FileRef::new(name, "application/zip", location),
    }
}

#[test]
fn batch_emits_nodes_in_slot_order_then_finishes() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let (event_tx, event_rx) = mpsc::channel();
    let engine = EngineHandle::new(
        PreviewSettings::default(),
        Arc::new(ZipArchiveReader::new()),
        Arc::new(ChannelEventSink::new(event_tx)),
    )
    .unwrap();

    engine.preview_batch(
        1,
        vec![
            request(0, &dir, "ad1.zip", &build_zip(&[("index.html", "<b>hi</b>")])),
            request(1, &dir, "ad2.zip", &build_zip(&[])),
        ],
    );

    let events: Vec<EngineEvent> = (0..3)
        .map(|_| event_rx.recv_timeout(Duration::from_secs(5)).unwrap())
        .collect();
    assert_eq!(
        events,
        vec![
            EngineEvent::NodeReady {
                batch: 1,
                slot: 0,
                node: PreviewNode::Frame(InlineFrame {
                    srcdoc: "<b>hi</b>".to_string(),
                    width: 300,
                    height: 250,
                }),
            },
            EngineEvent::NodeReady {
                batch: 1,
                slot: 1,
                node: PreviewNode::Error {
                    message: "Error: No index.html found in ad2.zip".to_string(),
                },
            },
            EngineEvent::BatchFinished {
                batch: 1,
                cancelled: false,
            },
        ]
    );
}

#[test]
fn unreadable_file_only_affects_its_own_slot() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let sink = TestSink::new();
    let engine = EngineHandle::new(
        PreviewSettings::default(),
        Arc::new(ZipArchiveReader::new()),
        Arc::new(sink.clone()),
    )
    .unwrap();

    let missing = PreviewRequest {
        slot: 0,
        file: FileRef::new("gone.zip", "application/zip", dir.path().join("gone.zip")),
    };
    engine.preview_batch(
        4,
        vec![
            missing,
            request(1, &dir, "ok.zip", &build_zip(&[("index.html", "ok")])),
        ],
    );

    let events = sink.wait_for_batch(4);
    assert_eq!(events.len(), 3);
    match &events[0] {
        EngineEvent::NodeReady {
            slot: 0,
            node: PreviewNode::Error { message },
            ..
        } => assert!(message.starts_with("Error: Could not read gone.zip")),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(
        &events[1],
        EngineEvent::NodeReady {
            slot: 1,
            node: PreviewNode::Frame(_),
            ..
        }
    ));
}

#[test]
fn new_batch_cancels_the_running_one() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let sink = TestSink::new();
    let reader = MemoryArchiveReader::new()
        .with_archive(b"slow", &[("index.html", "old")])
        .with_archive(b"fresh", &[("index.html", "new")])
        .with_delay(Duration::from_millis(200));
    let engine = EngineHandle::new(
        PreviewSettings::default(),
        Arc::new(reader),
        Arc::new(sink.clone()),
    )
    .unwrap();

    engine.preview_batch(
        1,
        vec![
            request(0, &dir, "a.zip", b"slow"),
            request(1, &dir, "b.zip", b"slow"),
        ],
    );
    std::thread::sleep(Duration::from_millis(50));
    engine.preview_batch(2, vec![request(0, &dir, "c.zip", b"fresh")]);

    let events = sink.wait_for_batch(2);
    assert!(events.contains(&EngineEvent::BatchFinished {
        batch: 1,
        cancelled: true,
    }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, EngineEvent::NodeReady { batch: 1, .. })));
    assert!(events.contains(&EngineEvent::NodeReady {
        batch: 2,
        slot: 0,
        node: PreviewNode::Frame(InlineFrame {
            srcdoc: "new".to_string(),
            width: 300,
            height: 250,
        }),
    }));
}

#[test]
fn cancel_ignores_batches_that_are_not_running() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let sink = TestSink::new();
    let reader = MemoryArchiveReader::new()
        .with_archive(b"ad", &[("index.html", "ad")])
        .with_delay(Duration::from_millis(30));
    let engine = EngineHandle::new(
        PreviewSettings::default(),
        Arc::new(reader),
        Arc::new(sink.clone()),
    )
    .unwrap();

    engine.preview_batch(3, vec![request(0, &dir, "ad.zip", b"ad")]);
    engine.cancel(2);

    let events = sink.wait_for_batch(3);
    assert_eq!(
        events.last(),
        Some(&EngineEvent::BatchFinished {
            batch: 3,
            cancelled: false,
        })
    );
}

#[test]
fn oversized_file_is_rejected_from_metadata() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let sink = TestSink::new();
    let settings = PreviewSettings {
        max_archive_bytes: 8,
        ..PreviewSettings::default()
    };
    let engine =
        EngineHandle::new(settings, Arc::new(ZipArchiveReader::new()), Arc::new(sink.clone()))
            .unwrap();

    let payload = build_zip(&[("index.html", "<p>big</p>")]);
    let size = payload.len();
    engine.preview_batch(1, vec![request(0, &dir, "big.zip", &payload)]);

    let events = sink.wait_for_batch(1);
    assert_eq!(
        events[0],
        EngineEvent::NodeReady {
            batch: 1,
            slot: 0,
            node: PreviewNode::Error {
                message: format!("Error: big.zip is {size} bytes, above the 8 byte limit"),
            },
        }
    );
}
