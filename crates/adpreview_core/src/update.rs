use crate::{AppState, Effect, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => {
            // Only one batch may touch the container; the previous one is told to stop
            // and anything it still reports is discarded by batch id.
            let superseded = (state.phase() == Phase::Processing).then(|| state.batch());
            let (batch, requests) = state.begin_batch(files);

            let mut effects = Vec::with_capacity(2);
            if let Some(previous) = superseded {
                effects.push(Effect::CancelBatch { batch: previous });
            }
            if !requests.is_empty() {
                effects.push(Effect::PreviewBatch { batch, requests });
            }
            effects
        }
        Msg::SlotReady {
            batch,
            slot,
            content,
        } => {
            state.fill_slot(batch, slot, content);
            Vec::new()
        }
        Msg::BatchFinished { batch } => {
            state.finish_batch(batch);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
