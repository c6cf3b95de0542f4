use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use adpreview_core::{update, AppState, AppViewModel, Msg, Phase};
use adpreview_engine::PageWriter;
use anyhow::Context;
use chrono::Utc;
use preview_logging::{preview_info, preview_warn};

use super::config::PreviewConfig;
use super::effects::EffectRunner;
use super::page::{render_page, status_text};
use super::selection::{parse_selection_line, selection_from_paths};

/// Everything the message loop reacts to.
pub enum AppInput {
    Core(Msg),
    /// No more selections will arrive.
    InputClosed,
}

pub struct RunOptions {
    pub files: Vec<PathBuf>,
    pub from_stdin: bool,
    pub config: PreviewConfig,
}

/// Runs selections to completion and returns the path of the written page.
pub fn run_app(options: RunOptions) -> anyhow::Result<PathBuf> {
    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let runner = EffectRunner::new(options.config.preview_settings(), input_tx.clone())?;
    let writer = PageWriter::new(options.config.output_dir.clone());
    let mut session = Session::new(runner, writer, options.config.page_title.clone());
    session.write_page()?;

    if options.from_stdin {
        spawn_stdin_reader(input_tx);
    } else {
        let files = selection_from_paths(&options.files);
        let _ = input_tx.send(AppInput::Core(Msg::FilesSelected(files)));
        let _ = input_tx.send(AppInput::InputClosed);
        drop(input_tx);
    }

    session.run(input_rx)?;
    Ok(session.writer.target().to_path_buf())
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    preview_warn!("Stopped reading selections: {}", err);
                    break;
                }
            };
            let files = selection_from_paths(&parse_selection_line(&line));
            if input_tx.send(AppInput::Core(Msg::FilesSelected(files))).is_err() {
                return;
            }
        }
        let _ = input_tx.send(AppInput::InputClosed);
    });
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    writer: PageWriter,
    title: String,
}

impl Session {
    fn new(runner: EffectRunner, writer: PageWriter, title: String) -> Self {
        Self {
            state: AppState::new(),
            runner,
            writer,
            title,
        }
    }

    /// Processes messages until input is closed and no batch is running.
    fn run(&mut self, input_rx: mpsc::Receiver<AppInput>) -> anyhow::Result<()> {
        let mut input_open = true;
        while input_open || self.state.phase() == Phase::Processing {
            match input_rx.recv() {
                Ok(AppInput::Core(msg)) => self.dispatch_msg(msg)?,
                Ok(AppInput::InputClosed) => input_open = false,
                Err(_) => break,
            }
        }
        Ok(())
    }

    fn dispatch_msg(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            self.write_page()?;
        }
        Ok(())
    }

    fn write_page(&self) -> anyhow::Result<()> {
        let view: AppViewModel = self.state.view();
        let generated_at = Utc::now().to_rfc3339();
        let html = render_page(&view, &self.title, &generated_at);
        let target = self
            .writer
            .write(&html)
            .with_context(|| format!("writing {}", self.writer.target().display()))?;
        preview_info!("{} -> {}", status_text(&view), target.display());
        Ok(())
    }
}
