//! Conversation data model.

use serde::{Deserialize, Serialize};

use crate::thinking::Thinking;

/// Who authored a turn.
///
/// The wire format uses the Korean customer tag (`"고객"`) that the
/// original data feed ships with; the Agent tag is literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    /// The human side of the conversation.
    #[serde(rename = "고객")]
    Customer,
    /// The scripted agent side.
    #[serde(rename = "Agent")]
    Agent,
}

impl Speaker {
    /// Display label used by frontends.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Agent => "DiVE Agent",
        }
    }
}

/// Unique, strictly increasing identifier for a conversation turn.
///
/// Ids are assigned in append order across both speakers; they are
/// never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(pub u64);

impl TurnId {
    /// The first id handed out in a fresh session.
    pub const FIRST: Self = Self(1);

    /// The id that follows this one, or `None` if the id space is
    /// exhausted.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A turn that has been appended to the conversation log.
///
/// Created by materializing a [`crate::ScriptedTurn`] (Agent) or from
/// raw user input (Customer). Append-only: never mutated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Unique, monotonically increasing id.
    pub id: TurnId,
    /// Who authored the turn.
    pub speaker: Speaker,
    /// The message text.
    pub text: String,
    /// Structured detail payload, present on some Agent turns only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<Thinking>,
}

impl ConversationTurn {
    /// Build a Customer turn from raw user input.
    #[must_use]
    pub fn customer(id: TurnId, text: impl Into<String>) -> Self {
        Self {
            id,
            speaker: Speaker::Customer,
            text: text.into(),
            thinking: None,
        }
    }

    /// Whether this turn can drive the thinking panel.
    #[must_use]
    pub fn has_thinking(&self) -> bool {
        self.speaker == Speaker::Agent && self.thinking.is_some()
    }
}
