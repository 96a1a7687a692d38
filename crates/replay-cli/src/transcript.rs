//! Non-interactive playback to stdout.
//!
//! Replays the script's own Customer turns as the submissions, so the
//! whole canned conversation plays end to end without a keyboard. The
//! output is plain text suitable for piping.

use std::time::Duration;

use replay_core::{ConversationTurn, Script, Speaker};
use replay_engine::{ReplayEngine, ReplayEvent, SelectedView};
use tokio::sync::broadcast::error::RecvError;

use crate::render::{cell_text, strip_bold};
use crate::theme::Theme;

/// Wait this long after the final idle for the trailing cosmetic
/// selection before giving up on it.
const TRAILING_SELECTION_WAIT: Duration = Duration::from_millis(500);

/// Play the whole script to stdout.
pub(crate) async fn run(engine: &ReplayEngine, script: &Script) -> anyhow::Result<()> {
    let mut rx = engine.subscribe();

    let prompts: Vec<String> = script
        .turns()
        .iter()
        .filter(|turn| turn.speaker == Speaker::Customer)
        .map(|turn| turn.text.clone())
        .collect();

    println!("{}", Theme::header("Conversation replay"));
    println!("{}", Theme::separator());

    for prompt in prompts {
        if !engine.submit(&prompt).await.is_accepted() {
            // Can only happen with an empty scripted prompt.
            tracing::warn!("scripted prompt was rejected, skipping");
            continue;
        }
        drain_turn(engine, &mut rx).await?;
    }

    // The last selection lands after the cosmetic delay, past the
    // final idle.
    if let Ok(Ok(ReplayEvent::SelectionChanged(Some(_)))) =
        tokio::time::timeout(TRAILING_SELECTION_WAIT, rx.recv()).await
        && let Some(view) = engine.selected_view().await
    {
        print_thinking(&view);
    }

    println!("{}", Theme::dimmed("Script exhausted. Goodbye!"));
    Ok(())
}

/// Print events for one submission until the dispatcher idles.
async fn drain_turn(
    engine: &ReplayEngine,
    rx: &mut tokio::sync::broadcast::Receiver<ReplayEvent>,
) -> anyhow::Result<()> {
    loop {
        match rx.recv().await {
            Ok(ReplayEvent::TurnAppended(turn)) => print_turn(&turn),
            Ok(ReplayEvent::SelectionChanged(Some(_))) => {
                if let Some(view) = engine.selected_view().await {
                    print_thinking(&view);
                }
            },
            Ok(ReplayEvent::SelectionChanged(None)) => {},
            Ok(ReplayEvent::Idle) => return Ok(()),
            Err(RecvError::Lagged(skipped)) => {
                println!("{}", Theme::warning(&format!("{skipped} events dropped")));
            },
            Err(RecvError::Closed) => anyhow::bail!("engine event stream closed"),
        }
    }
}

fn print_turn(turn: &ConversationTurn) {
    println!("{} {}", Theme::speaker(turn.speaker), turn.text);
    println!();
}

/// Compact rendering of a thinking payload.
fn print_thinking(view: &SelectedView) {
    println!("{}", Theme::separator());
    println!("{}", Theme::header(&view.thinking.title));

    for section in &view.thinking.sections {
        println!();
        println!("  {}", Theme::section_heading(&section.heading));
        if let Some(content) = &section.content {
            println!("  {}", strip_bold(content));
        }
        for inference in section.inferences.iter().flatten() {
            println!("  • {}: {}", inference.heading, strip_bold(&inference.content));
        }
        if let Some(table) = &section.table {
            for row in &table.rows {
                let cells: Vec<String> = table
                    .columns
                    .iter()
                    .map(|col| format!("{col}={}", cell_text(row.get(col))))
                    .collect();
                println!("  {}", Theme::dimmed(&cells.join("  ")));
            }
        }
        for prediction in section.predictions.iter().flatten() {
            println!("  {:<40} {}", prediction.product, Theme::score_bar(prediction));
        }
    }
    println!("{}", Theme::separator());
    println!();
}

