//! Interactive two-panel TUI.
//!
//! Left panel: the chat log and the input line. Right panel: the
//! thinking payload of the selected Agent turn. The layout mirrors the
//! original 40/60 split.

use std::time::Duration;

use crossterm::event::{Event, KeyEventKind};
use replay_engine::ReplayEngine;
use tokio::sync::broadcast::error::RecvError;

mod app;
mod thinking_panel;

use app::{App, AppAction};

/// Input poll cadence. Engine events interrupt the wait, so this only
/// bounds keyboard latency.
const TICK: Duration = Duration::from_millis(33);

/// Run the TUI until the user quits.
pub(crate) async fn run(engine: ReplayEngine) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, engine).await;
    ratatui::restore();
    result
}

async fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    engine: ReplayEngine,
) -> anyhow::Result<()> {
    let mut rx = engine.subscribe();
    let mut app = App::new(engine);
    app.refresh().await;

    let mut tick = tokio::time::interval(TICK);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        tokio::select! {
            event = rx.recv() => match event {
                Ok(_) | Err(RecvError::Lagged(_)) => app.refresh().await,
                Err(RecvError::Closed) => return Ok(()),
            },
            _ = tick.tick() => {
                while crossterm::event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = crossterm::event::read()?
                        && key.kind == KeyEventKind::Press
                        && app.handle_key(key).await == AppAction::Quit
                    {
                        return Ok(());
                    }
                }
            },
        }
    }
}
