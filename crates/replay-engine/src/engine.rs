//! The submit/pull-loop state machine.
//!
//! One user submission appends a Customer turn, then pulls scripted
//! Agent turns with awaited delays until the script calls for user
//! input again. The busy flag gates submissions for the whole pull;
//! selection auto-follows Agent turns that carry a thinking payload.

use std::sync::Arc;
use std::time::Duration;

use replay_core::{
    ConversationTurn, ReplayResult, Script, ScriptedTurn, Speaker, Thinking, TurnId,
};
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, trace, warn};

use crate::cursor::ScriptCursor;
use crate::event::{DEFAULT_EVENT_CAPACITY, ReplayEvent};

/// Delays used by the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Pause before each pulled Agent turn, unless the scripted turn
    /// overrides it.
    pub agent_delay: Duration,
    /// Cosmetic pause before a freshly appended turn is marked
    /// selected.
    pub selection_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            agent_delay: Duration::from_millis(2000),
            selection_delay: Duration::from_millis(100),
        }
    }
}

/// Result of a [`ReplayEngine::submit`] call.
///
/// A rejected submission is a silent no-op by contract — the outcome
/// exists so frontends can tell, not to surface an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The Customer turn was appended with this id and the pull loop
    /// started.
    Accepted(TurnId),
    /// Empty input, or a pull is already in progress; the log is
    /// untouched.
    Ignored,
}

impl SubmitOutcome {
    /// Whether the submission was applied.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// What the detail panel renders for the currently selected turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedView {
    /// Id of the selected turn.
    pub id: TurnId,
    /// The Agent comment shown above the payload.
    pub text: String,
    /// The structured payload.
    pub thinking: Thinking,
}

/// Interior state guarded by a single lock.
struct EngineState {
    cursor: ScriptCursor,
    log: Vec<ConversationTurn>,
    next_id: TurnId,
    busy: bool,
    selection: Option<TurnId>,
}

impl EngineState {
    /// Hand out the next turn id.
    fn allocate_id(&mut self) -> ReplayResult<TurnId> {
        let id = self.next_id;
        self.next_id = id.next().ok_or(replay_core::ReplayError::TurnIdExhausted)?;
        Ok(id)
    }
}

/// What a pull-loop iteration decided to do next.
enum Step {
    /// Another Agent turn follows; loop again after this delay.
    Chain(Duration),
    /// The script calls for user input (or ran out); the loop is done.
    Done,
}

/// The conversation controller.
///
/// Cheap to clone; all clones share the same state and event stream.
/// Mutations happen under a single `RwLock`, so a delayed step always
/// sees the latest state rather than a stale copy.
#[derive(Clone)]
pub struct ReplayEngine {
    state: Arc<RwLock<EngineState>>,
    events: broadcast::Sender<ReplayEvent>,
    timing: Timing,
}

impl ReplayEngine {
    /// Create an engine over a script with default timing.
    #[must_use]
    pub fn new(script: Script) -> Self {
        Self::with_timing(script, Timing::default())
    }

    /// Create an engine with explicit timing (tests shrink the delays).
    #[must_use]
    pub fn with_timing(script: Script, timing: Timing) -> Self {
        let (events, _) = broadcast::channel(DEFAULT_EVENT_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(EngineState {
                cursor: ScriptCursor::new(script),
                log: Vec::new(),
                next_id: TurnId::FIRST,
                busy: false,
                selection: None,
            })),
            events,
            timing,
        }
    }

    /// Subscribe to state change events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ReplayEvent> {
        self.events.subscribe()
    }

    /// Submit user input — the only mutating inbound operation.
    ///
    /// Whitespace-only input and submissions while the dispatcher is
    /// busy are ignored without touching the log. Otherwise the
    /// Customer turn is appended synchronously and the Agent pull loop
    /// starts in the background.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            trace!("ignoring empty submission");
            return SubmitOutcome::Ignored;
        }

        let mut state = self.state.write().await;
        if state.busy {
            trace!("ignoring submission while busy");
            return SubmitOutcome::Ignored;
        }

        let id = match state.allocate_id() {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "dropping submission");
                return SubmitOutcome::Ignored;
            },
        };
        let turn = ConversationTurn::customer(id, text);
        state.log.push(turn.clone());
        state.busy = true;

        // Initial delay honors the about-to-be-pulled turn's override.
        let initial_delay = state
            .cursor
            .peek_next_agent_turn()
            .map_or(self.timing.agent_delay, |next| self.turn_delay(next));
        drop(state);

        debug!(%id, "customer turn appended, starting pull loop");
        self.emit(ReplayEvent::TurnAppended(turn));

        let engine = self.clone();
        tokio::spawn(async move { engine.pull_loop(initial_delay).await });

        SubmitOutcome::Accepted(id)
    }

    /// Select a turn by id.
    ///
    /// Only Agent turns carrying a thinking payload can hold the
    /// selection; anything else clears it.
    pub async fn select(&self, id: TurnId) {
        let mut state = self.state.write().await;
        let selectable = state
            .log
            .iter()
            .any(|turn| turn.id == id && turn.has_thinking());
        let selection = selectable.then_some(id);
        state.selection = selection;
        drop(state);
        self.emit(ReplayEvent::SelectionChanged(selection));
    }

    /// Snapshot of the conversation log, in append order.
    pub async fn turns(&self) -> Vec<ConversationTurn> {
        self.state.read().await.log.clone()
    }

    /// Whether the dispatcher is currently pulling Agent turns.
    pub async fn is_busy(&self) -> bool {
        self.state.read().await.busy
    }

    /// Currently selected turn id, if any.
    pub async fn selection(&self) -> Option<TurnId> {
        self.state.read().await.selection
    }

    /// Text and payload of the selected turn, for the detail panel.
    pub async fn selected_view(&self) -> Option<SelectedView> {
        let state = self.state.read().await;
        let id = state.selection?;
        let turn = state.log.iter().find(|turn| turn.id == id)?;
        let thinking = turn.thinking.clone()?;
        Some(SelectedView {
            id,
            text: turn.text.clone(),
            thinking,
        })
    }

    /// The pull loop: sleep, pull one Agent turn, decide whether to
    /// chain. Termination is the single guard in [`Self::step`] — the
    /// peeked turn is a Customer turn, or nothing is left.
    async fn pull_loop(self, mut delay: Duration) {
        loop {
            tokio::time::sleep(delay).await;
            match self.step().await {
                Ok(Step::Chain(next_delay)) => delay = next_delay,
                Ok(Step::Done) => break,
                Err(e) => {
                    // Treated as graceful exhaustion: no partial turn
                    // is left behind and the session stays usable.
                    warn!(error = %e, "agent turn pull failed, stopping");
                    self.finish().await;
                    break;
                },
            }
        }
    }

    /// One pull-loop iteration, entered after its delay has elapsed.
    /// Re-reads the latest state under the lock.
    async fn step(&self) -> ReplayResult<Step> {
        let mut state = self.state.write().await;

        let Some(scripted) = state.cursor.find_next_agent_turn().cloned() else {
            state.busy = false;
            drop(state);
            debug!("script exhausted, returning to idle");
            self.emit(ReplayEvent::Idle);
            return Ok(Step::Done);
        };

        let id = state.allocate_id()?;
        let turn = ConversationTurn {
            id,
            speaker: Speaker::Agent,
            text: scripted.text,
            thinking: scripted.thinking,
        };
        let has_thinking = turn.has_thinking();
        state.log.push(turn.clone());

        let chain_delay = match state.cursor.peek() {
            Some(next) if next.is_agent() => Some(self.turn_delay(next)),
            _ => None,
        };
        if chain_delay.is_none() {
            state.busy = false;
        }
        drop(state);

        debug!(%id, chained = chain_delay.is_some(), "agent turn appended");
        self.emit(ReplayEvent::TurnAppended(turn));
        if has_thinking {
            self.schedule_selection(id);
        }

        match chain_delay {
            Some(next_delay) => Ok(Step::Chain(next_delay)),
            None => {
                self.emit(ReplayEvent::Idle);
                Ok(Step::Done)
            },
        }
    }

    /// Apply the selection after the cosmetic delay, off the loop's
    /// critical path.
    fn schedule_selection(&self, id: TurnId) {
        let engine = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(engine.timing.selection_delay).await;
            let mut state = engine.state.write().await;
            state.selection = Some(id);
            drop(state);
            engine.emit(ReplayEvent::SelectionChanged(Some(id)));
        });
    }

    /// Clear the busy flag and announce idle (error path).
    async fn finish(&self) {
        let mut state = self.state.write().await;
        state.busy = false;
        drop(state);
        self.emit(ReplayEvent::Idle);
    }

    fn turn_delay(&self, turn: &ScriptedTurn) -> Duration {
        turn.delay
            .map_or(self.timing.agent_delay, Duration::from_millis)
    }

    fn emit(&self, event: ReplayEvent) {
        if self.events.send(event.clone()).is_err() {
            // No receivers - this is fine.
            trace!(kind = event.kind(), "no receivers for event");
        }
    }
}
