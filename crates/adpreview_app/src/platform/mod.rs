mod app;
pub mod config;
mod effects;
pub mod logging;
mod page;
mod selection;

pub use app::{run_app, RunOptions};
