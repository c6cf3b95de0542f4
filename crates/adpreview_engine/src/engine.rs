use std::sync::{mpsc, Arc};
use std::thread;

use adpreview_core::{BatchId, PreviewRequest};
use preview_logging::{preview_debug, preview_info, set_current_batch};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::{
    ArchiveReader, EngineEvent, PreviewError, PreviewNode, PreviewPipeline, PreviewSettings,
    SelectedFile,
};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start preview engine: {0}")]
    Startup(#[from] std::io::Error),
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Preview {
        batch: BatchId,
        requests: Vec<PreviewRequest>,
    },
    Cancel {
        batch: BatchId,
    },
}

/// Runs preview batches on a dedicated single-threaded tokio runtime.
///
/// At most one batch is live: starting a new one cancels the previous one.
/// Dropping the handle stops the engine thread.
pub struct EngineHandle {
    cmd_tx: UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        settings: PreviewSettings,
        reader: Arc<dyn ArchiveReader>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = unbounded_channel();
        let pipeline = Arc::new(PreviewPipeline::new(reader, settings));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("preview-engine".to_string())
            .spawn(move || runtime.block_on(command_loop(cmd_rx, pipeline, sink)))?;

        Ok(Self { cmd_tx })
    }

    pub fn preview_batch(&self, batch: BatchId, requests: Vec<PreviewRequest>) {
        let _ = self.cmd_tx.send(EngineCommand::Preview { batch, requests });
    }

    pub fn cancel(&self, batch: BatchId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { batch });
    }
}

async fn command_loop(
    mut cmd_rx: UnboundedReceiver<EngineCommand>,
    pipeline: Arc<PreviewPipeline>,
    sink: Arc<dyn EventSink>,
) {
    let mut running: Option<(BatchId, CancellationToken)> = None;

    while let Some(command) = cmd_rx.recv().await {
        match command {
            EngineCommand::Preview { batch, requests } => {
                if let Some((previous, token)) = running.take() {
                    preview_debug!("Batch {} superseded by {}", previous, batch);
                    token.cancel();
                }
                let token = CancellationToken::new();
                running = Some((batch, token.clone()));
                tokio::spawn(run_batch(
                    pipeline.clone(),
                    sink.clone(),
                    batch,
                    requests,
                    token,
                ));
            }
            EngineCommand::Cancel { batch } => {
                if running.as_ref().is_some_and(|(current, _)| *current == batch) {
                    if let Some((_, token)) = running.take() {
                        token.cancel();
                    }
                }
            }
        }
    }
}

async fn run_batch(
    pipeline: Arc<PreviewPipeline>,
    sink: Arc<dyn EventSink>,
    batch: BatchId,
    requests: Vec<PreviewRequest>,
    token: CancellationToken,
) {
    set_current_batch(batch);
    preview_info!("Starting batch with {} archive(s)", requests.len());

    for request in requests {
        set_current_batch(batch);
        let node = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            node = preview_request(&pipeline, &request) => Some(node),
        };
        let Some(node) = node else {
            preview_info!("Batch cancelled");
            sink.emit(EngineEvent::BatchFinished {
                batch,
                cancelled: true,
            });
            return;
        };
        sink.emit(EngineEvent::NodeReady {
            batch,
            slot: request.slot,
            node,
        });
    }

    set_current_batch(batch);
    preview_info!("Batch complete");
    sink.emit(EngineEvent::BatchFinished {
        batch,
        cancelled: false,
    });
}

async fn preview_request(pipeline: &PreviewPipeline, request: &PreviewRequest) -> PreviewNode {
    let file = &request.file;

    if let Ok(meta) = tokio::fs::metadata(&file.location).await {
        if let Err(err) = pipeline.check_size(&file.name, meta.len()) {
            return PreviewNode::error(&err);
        }
    }

    match tokio::fs::read(&file.location).await {
        Ok(bytes) => {
            let selected = SelectedFile::new(file.name.clone(), file.media_type.clone(), bytes);
            pipeline.preview(&selected).await
        }
        Err(err) => PreviewNode::error(&PreviewError::Unreadable {
            file_name: file.name.clone(),
            message: err.to_string(),
        }),
    }
}
