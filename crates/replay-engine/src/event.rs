//! Events broadcast by the engine to rendering frontends.

use replay_core::{ConversationTurn, TurnId};

/// Default capacity of the engine's broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// State change notifications emitted by [`crate::ReplayEngine`].
///
/// Events are delivered in append order. A frontend that only polls
/// the read accessors can ignore them entirely; the transcript mode
/// drives its whole output from this stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    /// A turn (either speaker) was appended to the conversation log.
    TurnAppended(ConversationTurn),
    /// The selection moved to a new turn, or was cleared.
    SelectionChanged(Option<TurnId>),
    /// The dispatcher finished its pull loop; input is accepted again.
    Idle,
}

impl ReplayEvent {
    /// Short tag for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TurnAppended(_) => "turn_appended",
            Self::SelectionChanged(_) => "selection_changed",
            Self::Idle => "idle",
        }
    }
}
