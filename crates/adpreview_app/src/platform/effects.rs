use std::sync::{mpsc, Arc};

use adpreview_core::{Effect, Msg, SlotContent};
use adpreview_engine::{
    EngineError, EngineEvent, EngineHandle, EventSink, PreviewNode, PreviewSettings,
    ZipArchiveReader,
};
use preview_logging::{preview_debug, preview_info};

use super::app::AppInput;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: PreviewSettings,
        input_tx: mpsc::Sender<AppInput>,
    ) -> Result<Self, EngineError> {
        let sink = Arc::new(MsgSink { tx: input_tx });
        let reader = Arc::new(ZipArchiveReader::with_max_entry_bytes(
            settings.max_archive_bytes,
        ));
        let engine = EngineHandle::new(settings, reader, sink)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CancelBatch { batch } => {
                    preview_info!("CancelBatch batch={}", batch);
                    self.engine.cancel(batch);
                }
                Effect::PreviewBatch { batch, requests } => {
                    preview_info!("PreviewBatch batch={} files={}", batch, requests.len());
                    self.engine.preview_batch(batch, requests);
                }
            }
        }
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppInput>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppInput::Core(map_event(event)));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::NodeReady { batch, slot, node } => Msg::SlotReady {
            batch,
            slot,
            content: map_node(node),
        },
        EngineEvent::BatchFinished { batch, cancelled } => {
            if cancelled {
                preview_debug!("Engine dropped batch {}", batch);
            }
            Msg::BatchFinished { batch }
        }
    }
}

fn map_node(node: PreviewNode) -> SlotContent {
    match node {
        PreviewNode::Frame(frame) => SlotContent::Frame {
            html: frame.srcdoc,
            width: frame.width,
            height: frame.height,
        },
        PreviewNode::Error { message } => SlotContent::Error { message },
    }
}
