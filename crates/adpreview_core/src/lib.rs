//! Ad preview core: pure selection state machine and view-model helpers.
mod effect;
mod media;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, PreviewRequest};
pub use media::is_zip_media_type;
pub use msg::Msg;
pub use state::{AppState, BatchId, FileRef, Phase, SlotContent, SlotIndex};
pub use update::update;
pub use view_model::{AppViewModel, SlotView};
