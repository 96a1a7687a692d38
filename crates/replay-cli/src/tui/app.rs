//! TUI application state and the chat panel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use replay_core::{ConversationTurn, Speaker, TurnId};
use replay_engine::{ReplayEngine, SelectedView};

use super::thinking_panel;

const CUSTOMER_COLOR: Color = Color::Green;
const AGENT_COLOR: Color = Color::Magenta;
const SELECTED_MARKER: &str = "▌ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AppAction {
    None,
    Quit,
}

/// Snapshot-driven application state.
///
/// The engine owns the truth; `refresh` re-reads it after every engine
/// event so the draw path never blocks on the state lock.
pub(super) struct App {
    engine: ReplayEngine,
    turns: Vec<ConversationTurn>,
    busy: bool,
    selection: Option<TurnId>,
    view: Option<SelectedView>,
    input: String,
    /// Keyboard navigation position in the chat log.
    nav: Option<usize>,
}

impl App {
    pub(super) fn new(engine: ReplayEngine) -> Self {
        Self {
            engine,
            turns: Vec::new(),
            busy: false,
            selection: None,
            view: None,
            input: String::new(),
            nav: None,
        }
    }

    /// Re-read the latest engine state.
    pub(super) async fn refresh(&mut self) {
        self.turns = self.engine.turns().await;
        self.busy = self.engine.is_busy().await;
        self.selection = self.engine.selection().await;
        self.view = self.engine.selected_view().await;
        // Keep the nav cursor on the engine's selection when it moves.
        if let Some(id) = self.selection {
            self.nav = self.turns.iter().position(|turn| turn.id == id);
        }
    }

    pub(super) async fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return AppAction::Quit;
            },
            KeyCode::Enter => {
                if self.engine.submit(&self.input).await.is_accepted() {
                    self.input.clear();
                    self.refresh().await;
                }
            },
            KeyCode::Backspace => {
                self.input.pop();
            },
            KeyCode::Up => self.move_nav(-1).await,
            KeyCode::Down => self.move_nav(1).await,
            KeyCode::Char(c) => self.input.push(c),
            _ => {},
        }
        AppAction::None
    }

    /// Move the navigation cursor and route the landing turn through
    /// the engine's selection rules (turns without a payload clear the
    /// panel).
    async fn move_nav(&mut self, delta: i64) {
        if self.turns.is_empty() {
            return;
        }
        let last = self.turns.len().saturating_sub(1);
        let current = self.nav.unwrap_or(last);
        let target = if delta < 0 {
            current.saturating_sub(1)
        } else {
            current.saturating_add(1).min(last)
        };
        self.nav = Some(target);
        let id = self.turns[target].id;
        self.engine.select(id).await;
        self.refresh().await;
        // refresh snaps nav onto the selection; restore the cursor so
        // plain turns stay reachable.
        self.nav = Some(target);
    }

    pub(super) fn draw(&self, frame: &mut Frame<'_>) {
        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(frame.area());

        let chat = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(panels[0]);

        self.draw_messages(frame, chat[0]);
        self.draw_input(frame, chat[1]);
        thinking_panel::draw(frame, panels[1], self.view.as_ref());
    }

    fn draw_messages(&self, frame: &mut Frame<'_>, area: Rect) {
        let mut lines: Vec<Line<'_>> = Vec::new();
        for (index, turn) in self.turns.iter().enumerate() {
            let color = match turn.speaker {
                Speaker::Customer => CUSTOMER_COLOR,
                Speaker::Agent => AGENT_COLOR,
            };
            let is_selected = self.selection == Some(turn.id);
            let is_nav = self.nav == Some(index);

            let mut label = vec![Span::styled(
                turn.speaker.label().to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )];
            if turn.has_thinking() {
                label.push(Span::styled(
                    "  💭",
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }
            if is_selected {
                label.insert(0, Span::styled(SELECTED_MARKER, Style::default().fg(color)));
            }
            lines.push(Line::from(label));

            let text_style = if is_nav {
                Style::default().add_modifier(Modifier::REVERSED)
            } else if is_selected {
                Style::default()
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            lines.push(Line::from(Span::styled(turn.text.clone(), text_style)));
            lines.push(Line::default());
        }

        let block = Block::default().borders(Borders::ALL).title("Conversation");
        let inner_height = usize::from(area.height.saturating_sub(2));
        let scroll = lines.len().saturating_sub(inner_height);
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_input(&self, frame: &mut Frame<'_>, area: Rect) {
        let (title, style) = if self.busy {
            (
                "Agent is responding…",
                Style::default().add_modifier(Modifier::DIM),
            )
        } else {
            ("Type a message, Enter to send", Style::default())
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let paragraph = Paragraph::new(self.input.as_str()).style(style).block(block);
        frame.render_widget(paragraph, area);

        if !self.busy {
            let x = area
                .x
                .saturating_add(1)
                .saturating_add(u16::try_from(self.input.chars().count()).unwrap_or(u16::MAX));
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y.saturating_add(1)));
        }
    }
}

#[cfg(test)]
mod tests {
    use replay_core::{Script, ScriptedTurn, Thinking};

    use super::*;

    fn scripted(speaker: Speaker, text: &str, thinking: bool) -> ScriptedTurn {
        ScriptedTurn {
            speaker,
            text: text.to_string(),
            thinking: thinking.then(|| Thinking {
                title: "t".to_string(),
                sections: Vec::new(),
            }),
            delay: None,
        }
    }

    async fn played_app(turns: Vec<ScriptedTurn>) -> App {
        let engine = ReplayEngine::new(Script::new(turns));
        let mut rx = engine.subscribe();
        engine.submit("hello").await;
        // Drain until idle so the app sees the full log.
        loop {
            if rx.recv().await.unwrap() == replay_engine::ReplayEvent::Idle {
                break;
            }
        }
        let mut app = App::new(engine);
        app.refresh().await;
        app
    }

    #[tokio::test(start_paused = true)]
    async fn enter_submits_and_clears_input() {
        let engine = ReplayEngine::new(Script::new(vec![scripted(Speaker::Agent, "a1", false)]));
        let mut app = App::new(engine);
        for c in "hi there".chars() {
            app.handle_key(KeyEvent::from(KeyCode::Char(c))).await;
        }
        app.handle_key(KeyEvent::from(KeyCode::Enter)).await;
        assert!(app.input.is_empty());
        assert_eq!(app.turns.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn enter_on_empty_input_is_noop() {
        let engine = ReplayEngine::new(Script::new(vec![scripted(Speaker::Agent, "a1", false)]));
        let mut app = App::new(engine);
        app.handle_key(KeyEvent::from(KeyCode::Enter)).await;
        assert!(app.turns.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn esc_and_ctrl_c_quit() {
        let engine = ReplayEngine::new(Script::new(vec![]));
        let mut app = App::new(engine);
        assert_eq!(
            app.handle_key(KeyEvent::from(KeyCode::Esc)).await,
            AppAction::Quit
        );
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .await,
            AppAction::Quit
        );
    }

    #[tokio::test(start_paused = true)]
    async fn nav_to_plain_turn_clears_panel() {
        let mut app = played_app(vec![
            scripted(Speaker::Agent, "with detail", true),
            scripted(Speaker::Agent, "plain", false),
        ])
        .await;
        // Log: customer, with-detail, plain. Selection sits on the
        // detail turn after the cosmetic delay.
        assert!(app.selection.is_some());

        // Navigate down to the plain turn: selection clears.
        app.handle_key(KeyEvent::from(KeyCode::Down)).await;
        assert_eq!(app.selection, None);
        assert!(app.view.is_none());

        // Navigate back up: the detail turn reselects.
        app.handle_key(KeyEvent::from(KeyCode::Up)).await;
        assert!(app.selection.is_some());
        assert!(app.view.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn nav_clamps_at_ends() {
        let mut app = played_app(vec![scripted(Speaker::Agent, "a1", false)]).await;
        app.handle_key(KeyEvent::from(KeyCode::Down)).await;
        app.handle_key(KeyEvent::from(KeyCode::Down)).await;
        assert_eq!(app.nav, Some(1));
        app.handle_key(KeyEvent::from(KeyCode::Up)).await;
        app.handle_key(KeyEvent::from(KeyCode::Up)).await;
        app.handle_key(KeyEvent::from(KeyCode::Up)).await;
        assert_eq!(app.nav, Some(0));
    }
}
