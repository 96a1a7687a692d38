//! Script wire format and loader.
//!
//! A script is an ordered sequence of pre-authored turns, loaded once
//! at startup and read-only afterwards. The feed shape is:
//!
//! ```json
//! [{"speaker": "고객", "text": "..."},
//!  {"speaker": "Agent", "text": "...", "thinking": {...}, "delay": 1200}]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReplayError, ReplayResult};
use crate::thinking::Thinking;
use crate::types::Speaker;

/// The demo feed bundled with the repository, used when no script file
/// is given on the command line.
const BUNDLED_DEMO: &str = include_str!("../data/demo.json");

/// A pre-authored message in the replay data.
///
/// Missing `text` is not validated against — it deserializes to the
/// empty string and flows through like any other text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedTurn {
    /// Fixed speaker of this turn.
    pub speaker: Speaker,
    /// Message text.
    #[serde(default)]
    pub text: String,
    /// Optional detail payload (Agent turns only in practice).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<Thinking>,
    /// Per-turn delay override in milliseconds. When absent the
    /// dispatcher's default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
}

impl ScriptedTurn {
    /// Whether this is an Agent turn.
    #[must_use]
    pub fn is_agent(&self) -> bool {
        self.speaker == Speaker::Agent
    }
}

/// An immutable, ordered sequence of scripted turns.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    turns: Vec<ScriptedTurn>,
}

impl Script {
    /// Build a script from already-parsed turns (used by tests and the
    /// engine's own fixtures).
    #[must_use]
    pub fn new(turns: Vec<ScriptedTurn>) -> Self {
        Self { turns }
    }

    /// Parse a script from its JSON wire form.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        let turns: Vec<ScriptedTurn> = serde_json::from_str(json)?;
        Ok(Self { turns })
    }

    /// Load a script from a file on disk.
    pub fn from_path(path: &Path) -> ReplayResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::ScriptIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The demo feed shipped with the repository.
    ///
    /// # Panics
    ///
    /// Panics if the bundled feed is malformed, which is a build defect
    /// caught by `bundled_demo_parses` in this module's tests.
    #[must_use]
    pub fn bundled_demo() -> Self {
        Self::from_json(BUNDLED_DEMO).expect("bundled demo feed is valid JSON")
    }

    /// The ordered turns.
    #[must_use]
    pub fn turns(&self) -> &[ScriptedTurn] {
        &self.turns
    }

    /// Number of scripted turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the script has no turns at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_feed() {
        let script = Script::from_json(
            r#"[
                {"speaker": "고객", "text": "hi"},
                {"speaker": "Agent", "text": "hello", "delay": 1200}
            ]"#,
        )
        .unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.turns()[0].speaker, Speaker::Customer);
        assert!(script.turns()[1].is_agent());
        assert_eq!(script.turns()[1].delay, Some(1200));
    }

    #[test]
    fn missing_text_defaults_to_empty() {
        let script = Script::from_json(r#"[{"speaker": "Agent"}]"#).unwrap();
        assert_eq!(script.turns()[0].text, "");
    }

    #[test]
    fn unknown_speaker_is_a_parse_error() {
        let err = Script::from_json(r#"[{"speaker": "Robot", "text": "x"}]"#).unwrap_err();
        assert!(matches!(err, ReplayError::Script(_)));
    }

    #[test]
    fn thinking_payload_parses_inside_feed() {
        let script = Script::from_json(
            r#"[{
                "speaker": "Agent",
                "text": "analysis done",
                "thinking": {
                    "title": "Customer analysis",
                    "sections": [{
                        "heading": "Predictions",
                        "predictions": [{"product": "Washer", "score": 93}]
                    }]
                }
            }]"#,
        )
        .unwrap();
        let thinking = script.turns()[0].thinking.as_ref().unwrap();
        assert_eq!(thinking.title, "Customer analysis");
        assert!(thinking.sections[0].predictions.as_ref().unwrap()[0].is_high_score());
    }

    #[test]
    fn from_path_missing_file_reports_path() {
        let err = Script::from_path(Path::new("/nonexistent/feed.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/feed.json"));
    }

    #[test]
    fn bundled_demo_parses() {
        let script = Script::bundled_demo();
        assert!(!script.is_empty());
        // The demo must contain at least one Agent turn with a payload,
        // otherwise the thinking panel can never light up.
        assert!(
            script
                .turns()
                .iter()
                .any(|t| t.is_agent() && t.thinking.is_some())
        );
        // And at least one consecutive Agent pair so chaining is visible.
        assert!(
            script
                .turns()
                .windows(2)
                .any(|w| w[0].is_agent() && w[1].is_agent())
        );
    }
}
