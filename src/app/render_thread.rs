//! Background render thread.
//!
//! The thread owns the terminal for the whole session and draws snapshots of
//! AppState sent from the event loop, so input stays responsive while a
//! frame is being drawn.

use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::state::AppState;

type Term = Terminal<CrosstermBackend<Stdout>>;

enum RenderCommand {
    Render(Box<AppState>),
    Shutdown,
}

/// Handle to the background render thread.
pub struct RenderThread {
    cmd_tx: SyncSender<RenderCommand>,
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Spawn the render thread. Terminal setup and teardown happen on it.
    pub fn spawn() -> io::Result<Self> {
        // Capacity 1: only the latest snapshot matters
        let (cmd_tx, cmd_rx) = mpsc::sync_channel::<RenderCommand>(1);

        let handle = thread::Builder::new()
            .name("render".to_string())
            .spawn(move || match enter_terminal() {
                Ok(mut terminal) => {
                    render_loop(&mut terminal, &cmd_rx);
                    leave_terminal(&mut terminal);
                }
                Err(e) => {
                    tracing::error!("Failed to set up terminal: {}", e);
                    disable_raw_mode().ok();
                }
            })?;

        Ok(Self {
            cmd_tx,
            handle: Some(handle),
        })
    }

    /// Queue a snapshot for drawing without blocking. Returns false when the
    /// thread is still busy with the previous frame and this one was dropped.
    pub fn render(&self, state: AppState) -> bool {
        match self.cmd_tx.try_send(RenderCommand::Render(Box::new(state))) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::trace!("Render thread busy, skipping frame");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("Render thread disconnected");
                true
            }
        }
    }

    /// Stop the thread and wait for the terminal to be restored.
    pub fn shutdown(mut self) {
        let _ = self.cmd_tx.send(RenderCommand::Shutdown);

        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

fn enter_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn render_loop(terminal: &mut Term, cmd_rx: &Receiver<RenderCommand>) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            RenderCommand::Render(state) => {
                if let Err(e) = terminal.draw(|f| crate::ui::render(f, &state)) {
                    tracing::error!("Render error: {}", e);
                }
            }
            RenderCommand::Shutdown => break,
        }
    }
}

fn leave_terminal(terminal: &mut Term) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}
