//! The console application: turns parsed input into session operations.
//!
//! Narration and suggestion fetches run as background tasks so the operator
//! can keep typing while the service thinks; everything else completes
//! before the next prompt. All output goes through one channel.

use std::sync::Arc;

use dmscreen_core::clock::Clock;
use dmscreen_core::service::RemoteCampaignService;
use dmscreen_session::application::coordinator::TurnCoordinator;
use dmscreen_session::application::loader::SessionLoader;
use dmscreen_session::domain::commands::{
    RequestSuggestions, ResumeCampaign, RollDice, StartCampaign, SubmitNarration,
};
use dmscreen_session::domain::state::SessionState;
use dmscreen_session::domain::store::SessionStore;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::console::{HELP, Input};
use crate::render;

/// Whether the console keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Output sink shared with background tasks. Lines sent after the reader
/// has gone away are dropped.
#[derive(Debug, Clone)]
struct Output(UnboundedSender<String>);

impl Output {
    fn say(&self, line: impl Into<String>) {
        let _ = self.0.send(line.into());
    }
}

/// The operator console.
#[derive(Debug)]
pub struct App {
    coordinator: Arc<TurnCoordinator>,
    loader: SessionLoader,
    out: Output,
}

impl App {
    /// Creates a console over a fresh session store.
    #[must_use]
    pub fn new(
        service: Arc<dyn RemoteCampaignService>,
        clock: Arc<dyn Clock>,
        out: UnboundedSender<String>,
    ) -> Self {
        let store = Arc::new(SessionStore::new());
        Self {
            coordinator: Arc::new(TurnCoordinator::new(
                Arc::clone(&store),
                Arc::clone(&service),
                clock,
            )),
            loader: SessionLoader::new(store, service),
            out: Output(out),
        }
    }

    /// Current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.coordinator.store().current()
    }

    /// Writes one line of output.
    pub fn say(&self, line: impl Into<String>) {
        self.out.say(line);
    }

    /// Handles one parsed input line.
    ///
    /// Returns the background task, if one was started, next to the flow.
    pub async fn dispatch(&self, input: Input) -> (Flow, Option<JoinHandle<()>>) {
        debug!(?input, "dispatching");
        match input {
            Input::Nothing => {}
            Input::Quit => return (Flow::Quit, None),
            Input::Help => self.say(HELP),
            Input::Narrate(text) => return (Flow::Continue, Some(self.narrate(text))),
            Input::Suggest(context) => return (Flow::Continue, Some(self.suggest(context))),
            Input::NewCampaign(draft) => {
                match self.loader.start_campaign(StartCampaign::new(draft)).await {
                    Ok(state) => self.say(render::party(&state)),
                    Err(error) => self.say(format!("! {error}")),
                }
            }
            Input::Resume(campaign_id) => {
                match self.loader.resume(ResumeCampaign::new(campaign_id)).await {
                    Ok(state) => {
                        self.say(render::party(&state));
                        self.say(render::log(&state));
                    }
                    Err(error) => self.say(format!("! {error}")),
                }
            }
            Input::Roll(spec) => match self.coordinator.roll_dice(RollDice::new(spec)).await {
                Ok(result) => self.say(render::roll(&result)),
                Err(error) => self.say(format!("! {error}")),
            },
            Input::Party => self.say(render::party(&self.snapshot())),
            Input::Log => self.say(render::log(&self.snapshot())),
            Input::Abandon => {
                self.coordinator.abandon_campaign();
                self.say("Campaign abandoned. Start a new one with /new or /resume.");
            }
        }
        (Flow::Continue, None)
    }

    fn narrate(&self, text: String) -> JoinHandle<()> {
        let coordinator = Arc::clone(&self.coordinator);
        let out = self.out.clone();
        tokio::spawn(async move {
            match coordinator.submit_narration(SubmitNarration::new(text)).await {
                Ok(turn) => {
                    let state = coordinator.store().current();
                    for message in &turn {
                        out.say(render::message_line(&state, message));
                    }
                }
                Err(rejected) => {
                    out.say(format!("! {}", rejected.error));
                    out.say(format!("  (draft kept: {})", rejected.draft));
                }
            }
        })
    }

    fn suggest(&self, context: Option<String>) -> JoinHandle<()> {
        let coordinator = Arc::clone(&self.coordinator);
        let out = self.out.clone();
        tokio::spawn(async move {
            match coordinator
                .request_suggestions(RequestSuggestions::new(context))
                .await
            {
                Ok(suggestions) => out.say(render::suggestions(&suggestions)),
                Err(error) => out.say(format!("! {error}")),
            }
        })
    }
}
