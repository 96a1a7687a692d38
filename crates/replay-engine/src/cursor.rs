//! Linear cursor over the scripted turn sequence.

use replay_core::{Script, ScriptedTurn};

/// Position marker tracking progress through a [`Script`].
///
/// The offset is monotonically non-decreasing and always points just
/// past the last consumed turn. It never rewinds and never advances
/// past the end of the sequence.
#[derive(Debug, Clone)]
pub struct ScriptCursor {
    script: Script,
    offset: usize,
}

impl ScriptCursor {
    /// Create a cursor at the start of a script.
    #[must_use]
    pub fn new(script: Script) -> Self {
        Self { script, offset: 0 }
    }

    /// Consume and return the next Agent turn.
    ///
    /// Scans forward from the current offset, skipping Customer turns.
    /// On a hit the offset moves just past the returned turn. At
    /// exhaustion this returns `None` and keeps returning `None` on
    /// repeated calls without moving the offset further.
    pub fn find_next_agent_turn(&mut self) -> Option<&ScriptedTurn> {
        let found = self
            .script
            .turns()
            .iter()
            .enumerate()
            .skip(self.offset)
            .find(|(_, turn)| turn.is_agent())
            .map(|(index, _)| index)?;
        self.offset = found.saturating_add(1);
        self.script.turns().get(found)
    }

    /// The turn at the current offset, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&ScriptedTurn> {
        self.script.turns().get(self.offset)
    }

    /// The next Agent turn that [`Self::find_next_agent_turn`] would
    /// return, without consuming anything.
    #[must_use]
    pub fn peek_next_agent_turn(&self) -> Option<&ScriptedTurn> {
        self.script
            .turns()
            .iter()
            .skip(self.offset)
            .find(|turn| turn.is_agent())
    }

    /// Current offset into the script.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use replay_core::Speaker;

    use super::*;

    fn turn(speaker: Speaker, text: &str) -> ScriptedTurn {
        ScriptedTurn {
            speaker,
            text: text.to_string(),
            thinking: None,
            delay: None,
        }
    }

    fn cursor(turns: Vec<ScriptedTurn>) -> ScriptCursor {
        ScriptCursor::new(Script::new(turns))
    }

    #[test]
    fn skips_customer_turns() {
        let mut cursor = cursor(vec![
            turn(Speaker::Customer, "c1"),
            turn(Speaker::Customer, "c2"),
            turn(Speaker::Agent, "a1"),
        ]);
        let found = cursor.find_next_agent_turn().unwrap();
        assert_eq!(found.text, "a1");
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn consecutive_agent_turns_come_out_in_order() {
        let mut cursor = cursor(vec![
            turn(Speaker::Agent, "a1"),
            turn(Speaker::Agent, "a2"),
        ]);
        assert_eq!(cursor.find_next_agent_turn().unwrap().text, "a1");
        assert_eq!(cursor.find_next_agent_turn().unwrap().text, "a2");
        assert!(cursor.find_next_agent_turn().is_none());
    }

    #[test]
    fn exhaustion_is_idempotent() {
        let mut cursor = cursor(vec![
            turn(Speaker::Agent, "a1"),
            turn(Speaker::Customer, "trailing"),
        ]);
        cursor.find_next_agent_turn();
        let offset_after = cursor.offset();

        assert!(cursor.find_next_agent_turn().is_none());
        assert!(cursor.find_next_agent_turn().is_none());
        assert_eq!(cursor.offset(), offset_after);
    }

    #[test]
    fn empty_script_yields_nothing() {
        let mut cursor = cursor(vec![]);
        assert!(cursor.find_next_agent_turn().is_none());
        assert!(cursor.peek().is_none());
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut cursor = cursor(vec![
            turn(Speaker::Agent, "a1"),
            turn(Speaker::Customer, "c1"),
        ]);
        cursor.find_next_agent_turn();

        assert_eq!(cursor.peek().unwrap().text, "c1");
        assert_eq!(cursor.peek().unwrap().text, "c1");
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn peek_next_agent_skips_customers_without_moving() {
        let cursor = cursor(vec![
            turn(Speaker::Customer, "c1"),
            turn(Speaker::Agent, "a1"),
        ]);
        assert_eq!(cursor.peek_next_agent_turn().unwrap().text, "a1");
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn offset_is_monotone() {
        let mut cursor = cursor(vec![
            turn(Speaker::Customer, "c1"),
            turn(Speaker::Agent, "a1"),
            turn(Speaker::Agent, "a2"),
        ]);
        let mut last = cursor.offset();
        while cursor.find_next_agent_turn().is_some() {
            assert!(cursor.offset() > last);
            last = cursor.offset();
        }
        assert_eq!(cursor.offset(), 3);
    }
}
