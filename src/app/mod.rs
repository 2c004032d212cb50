//! Application core - manages state, the AI actor, and coordination

mod actions;
mod event_loop;
pub mod render_thread;
pub mod session;
pub mod state;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use render_thread::RenderThread;

use crate::ai::{AiActorHandle, AiCommand, spawn_ai_actor};
use crate::config::Config;
use crate::constants::{SPLIT_RATIO_MAX, SPLIT_RATIO_MIN};
use crate::input::KeyBindings;
use crate::store::{PromptStore, seed_inbox};
use state::AppState;

pub struct App {
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    /// Persisted prompt templates
    pub(crate) prompt_store: PromptStore,
    /// Seed inbox document
    pub(crate) inbox_path: PathBuf,
    /// AI actor handle (None if no API key is configured)
    pub(crate) ai_actor: Option<AiActorHandle>,
    /// Dirty flag: when true, UI needs re-render. Skips renders when nothing changed.
    pub(crate) dirty: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let prompt_store = PromptStore::new(config.prompts_path()?);
        let inbox_path = config.inbox_path()?;

        // First run: write the bundled documents
        prompt_store.seed()?;
        seed_inbox(&inbox_path)?;

        let ai_actor = match config.ai.build_client() {
            Ok(client) => Some(spawn_ai_actor(Arc::new(client))),
            Err(e) => {
                tracing::warn!("AI features unavailable: {}", e);
                None
            }
        };

        Ok(Self::from_parts(config, prompt_store, inbox_path, ai_actor))
    }

    pub(crate) fn from_parts(
        config: &Config,
        prompt_store: PromptStore,
        inbox_path: PathBuf,
        ai_actor: Option<AiActorHandle>,
    ) -> Self {
        let state = AppState {
            split_ratio: config.ui.split_ratio.clamp(SPLIT_RATIO_MIN, SPLIT_RATIO_MAX),
            ai_available: ai_actor.is_some(),
            ..Default::default()
        };

        let mut app = Self {
            state,
            bindings: KeyBindings::new(&config.ui.keybinding_mode),
            prompt_store,
            inbox_path,
            ai_actor,
            dirty: true, // Start dirty for initial render
        };

        app.reload_prompts();
        if app.state.ai_available {
            app.state.set_status("Press L to load the inbox, . for help");
        } else {
            app.state
                .set_status("AI disabled: set ai.api_key or MAILMIND_API_KEY");
        }

        app
    }

    pub async fn run(&mut self) -> Result<()> {
        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn()?;

        let result = self.event_loop(&render_thread);

        // Shutdown render thread (handles terminal cleanup)
        render_thread.shutdown();

        if let Some(ai) = &self.ai_actor {
            ai.cmd_tx.send(AiCommand::Shutdown).await.ok();
        }

        result
    }
}
