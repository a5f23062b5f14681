/// SessionCore: single-owner event loop for the browsing session.
///
/// The UI never mutates `SessionState` directly.  Key and mouse input become
/// `Command`s sent over an mpsc channel; this loop applies them through the
/// `StateManager` and broadcasts `BroadcastMessage::StateUpdated` after every
/// change.
///
/// Assistant calls run on their own tasks so selection and playback stay
/// responsive while a request is in flight.  The task posts its answer back
/// into this loop as `CoreEvent::AssistantResolved`, tagged with the ticket
/// issued at submission; answers for superseded tickets are dropped.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};
use tune_proto::assistant::Assistant;
use tune_proto::protocol::Command;
use tune_proto::query::QueryTicket;
use tune_proto::selection::SelectOutcome;
use tune_proto::state::StateManager;

use crate::BroadcastMessage;

// ── CoreEvent ─────────────────────────────────────────────────────────────────

/// All inputs into the SessionCore loop.
#[derive(Debug)]
pub enum CoreEvent {
    /// A command from the TUI.
    ClientCommand(Command),
    /// An assistant task finished.
    AssistantResolved { ticket: QueryTicket, text: String },
    /// Shutdown requested.
    Shutdown,
}

// ── SessionCore ───────────────────────────────────────────────────────────────

pub struct SessionCore {
    state_manager: Arc<StateManager>,
    assistant: Arc<dyn Assistant>,
    /// Handed to assistant tasks so they can report back into this loop.
    event_tx: mpsc::Sender<CoreEvent>,
    broadcast_tx: broadcast::Sender<BroadcastMessage>,
}

impl SessionCore {
    pub fn new(
        state_manager: Arc<StateManager>,
        assistant: Arc<dyn Assistant>,
        broadcast_tx: broadcast::Sender<BroadcastMessage>,
        event_tx: mpsc::Sender<CoreEvent>,
    ) -> Self {
        Self {
            state_manager,
            assistant,
            event_tx,
            broadcast_tx,
        }
    }

    pub fn state_manager(&self) -> Arc<StateManager> {
        Arc::clone(&self.state_manager)
    }

    /// Run the core event loop.  Returns on `Shutdown` or when every sender
    /// has been dropped.
    pub async fn run(mut self, mut event_rx: mpsc::Receiver<CoreEvent>) {
        info!("SessionCore: starting event loop");
        while let Some(evt) = event_rx.recv().await {
            if !self.handle_event(evt).await {
                info!("SessionCore: shutdown requested");
                return;
            }
        }
        info!("SessionCore: event channel closed, shutting down");
    }

    /// Apply one event.  Returns `false` when the loop should stop.
    pub async fn handle_event(&mut self, evt: CoreEvent) -> bool {
        match evt {
            CoreEvent::Shutdown => return false,
            CoreEvent::ClientCommand(cmd) => {
                info!("SessionCore: command {:?}", cmd);
                self.handle_command(cmd).await;
            }
            CoreEvent::AssistantResolved { ticket, text } => {
                if self.state_manager.resolve_query(ticket, text).await {
                    info!("SessionCore: assistant answer applied (ticket {})", ticket.0);
                    self.notify();
                } else {
                    debug!("SessionCore: dropping stale assistant answer (ticket {})", ticket.0);
                }
            }
        }
        true
    }

    async fn handle_command(&mut self, cmd: Command) {
        let changed = match cmd {
            Command::EnterMain => self.state_manager.enter_main().await,
            Command::SelectTrack { id } => {
                if self.state_manager.select_track(&id).await == SelectOutcome::IndexUnchanged {
                    warn!("SessionCore: track id {:?} not in catalog", id);
                }
                true
            }
            Command::Advance { direction } => {
                let moved = self.state_manager.advance(direction).await;
                debug!("SessionCore: advance {:?} -> {:?}", direction, moved);
                moved.is_some()
            }
            Command::TogglePlayPause => {
                let playing = self.state_manager.toggle_play_pause().await;
                debug!("SessionCore: playing = {}", playing);
                true
            }
            Command::SetCarouselIndex { index } => {
                self.state_manager.set_carousel_index(index).await.is_some()
            }
            Command::SetActiveCategory { id } => {
                self.state_manager.set_active_category(&id).await;
                true
            }
            Command::SubmitQuery { text } => match self.state_manager.begin_query(&text).await {
                Some(ticket) => {
                    self.spawn_assistant(ticket, text);
                    true
                }
                None => {
                    debug!("SessionCore: ignoring blank query");
                    false
                }
            },
            Command::DismissResult => {
                self.state_manager.dismiss_result().await;
                true
            }
        };

        if changed {
            self.notify();
        }
    }

    fn spawn_assistant(&self, ticket: QueryTicket, mood: String) {
        let assistant = Arc::clone(&self.assistant);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let text = assistant.recommend(&mood).await;
            if tx
                .send(CoreEvent::AssistantResolved { ticket, text })
                .await
                .is_err()
            {
                debug!("SessionCore: loop gone before assistant answered");
            }
        });
    }

    fn notify(&self) {
        // No receivers is fine; the UI may not have subscribed yet.
        let _ = self.broadcast_tx.send(BroadcastMessage::StateUpdated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::{BoxFuture, FutureExt};
    use std::time::Duration;
    use tokio::sync::Notify;
    use tune_proto::catalog::Catalog;
    use tune_proto::protocol::ViewMode;
    use tune_proto::selection::Direction;

    /// Answers only after the test releases the gate.
    struct GatedAssistant {
        gate: Arc<Notify>,
        reply: String,
    }

    impl Assistant for GatedAssistant {
        fn recommend<'a>(&'a self, _mood: &'a str) -> BoxFuture<'a, String> {
            async move {
                self.gate.notified().await;
                self.reply.clone()
            }
            .boxed()
        }
    }

    struct Harness {
        core: SessionCore,
        event_rx: mpsc::Receiver<CoreEvent>,
        updates: broadcast::Receiver<BroadcastMessage>,
        gate: Arc<Notify>,
    }

    fn harness(reply: &str) -> Harness {
        let gate = Arc::new(Notify::new());
        let assistant = Arc::new(GatedAssistant {
            gate: Arc::clone(&gate),
            reply: reply.to_string(),
        });
        let sm = Arc::new(StateManager::new(Catalog::seed(), ViewMode::Main).unwrap());
        let (broadcast_tx, updates) = broadcast::channel(64);
        let (event_tx, event_rx) = mpsc::channel(64);
        Harness {
            core: SessionCore::new(sm, assistant, broadcast_tx, event_tx),
            event_rx,
            updates,
            gate,
        }
    }

    async fn submit(core: &mut SessionCore, text: &str) {
        core.handle_event(CoreEvent::ClientCommand(Command::SubmitQuery {
            text: text.to_string(),
        }))
        .await;
    }

    async fn next_event(rx: &mut mpsc::Receiver<CoreEvent>) -> CoreEvent {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("assistant task timed out")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn submit_sets_loading_then_resolves() {
        let mut h = harness("1. Track X — Artist Y");

        submit(&mut h.core, "chill evening").await;
        let state = h.core.state_manager().get_state().await;
        assert!(state.query.is_loading);
        assert_eq!(state.query.query_text, "chill evening");
        assert_eq!(state.query.last_result, None);
        assert!(matches!(
            h.updates.try_recv(),
            Ok(BroadcastMessage::StateUpdated)
        ));

        h.gate.notify_one();
        let evt = next_event(&mut h.event_rx).await;
        assert!(h.core.handle_event(evt).await);

        let state = h.core.state_manager().get_state().await;
        assert!(!state.query.is_loading);
        assert_eq!(
            state.query.last_result.as_deref(),
            Some("1. Track X — Artist Y")
        );
    }

    #[tokio::test]
    async fn blank_query_is_a_no_op() {
        let mut h = harness("unused");
        let before = h.core.state_manager().get_state().await;

        submit(&mut h.core, "   ").await;
        let after = h.core.state_manager().get_state().await;
        assert_eq!(after.rev, before.rev);
        assert!(!after.query.is_loading);
        assert!(h.updates.try_recv().is_err());
        assert!(h.event_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn superseded_answer_is_dropped() {
        let mut h = harness("never delivered");
        submit(&mut h.core, "first").await;
        submit(&mut h.core, "second").await;

        h.core
            .handle_event(CoreEvent::AssistantResolved {
                ticket: QueryTicket(1),
                text: "stale".to_string(),
            })
            .await;
        let state = h.core.state_manager().get_state().await;
        assert!(state.query.is_loading);
        assert_eq!(state.query.last_result, None);

        h.core
            .handle_event(CoreEvent::AssistantResolved {
                ticket: QueryTicket(2),
                text: "fresh".to_string(),
            })
            .await;
        let state = h.core.state_manager().get_state().await;
        assert!(!state.query.is_loading);
        assert_eq!(state.query.last_result.as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn selection_works_while_query_in_flight() {
        let mut h = harness("later");
        submit(&mut h.core, "focus music").await;

        h.core
            .handle_event(CoreEvent::ClientCommand(Command::Advance {
                direction: Direction::Next,
            }))
            .await;
        h.core
            .handle_event(CoreEvent::ClientCommand(Command::TogglePlayPause))
            .await;

        let state = h.core.state_manager().get_state().await;
        assert!(state.query.is_loading);
        assert_eq!(state.selection.current_track_id, "2");
        assert_eq!(state.selection.carousel_index, 1);
        assert!(state.selection.is_playing);
    }

    #[tokio::test]
    async fn redundant_enter_main_does_not_broadcast() {
        let mut h = harness("unused");
        h.core
            .handle_event(CoreEvent::ClientCommand(Command::EnterMain))
            .await;
        assert!(h.updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let h = harness("unused");
        let (tx, rx) = mpsc::channel(4);
        let task = tokio::spawn(h.core.run(rx));
        tx.send(CoreEvent::Shutdown).await.unwrap();
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("core did not stop")
            .unwrap();
    }
}
