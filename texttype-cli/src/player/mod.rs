//! Interactive terminal player
//!
//! Slides are typed one after another into a fresh [TerminalSink]. Between
//! slides the player either waits for an advance key or holds for the
//! configured gap, depending on `viewer.advance`. After the last slide the
//! final frame stays up until any key is pressed.

mod input;
mod sink;
mod terminal;
pub mod ui;

use crate::error::CliError;
use input::Input;
use ratatui::backend::Backend;
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use sink::TerminalSink;
use std::io::{self, IsTerminal};
use std::time::Duration;
use terminal::TerminalGuard;
use texttype_config::{AdvanceMode, ViewerConfig};
use texttype_core::texttype::{CancelToken, Slide, TypeError, Typewriter, TypingOptions};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};
use ui::{Chrome, Phase};

pub async fn play(
    slides: &[Slide],
    viewer: &ViewerConfig,
    options: TypingOptions,
) -> Result<(), CliError> {
    if !io::stdout().is_terminal() {
        return Err(CliError::NotATerminal);
    }

    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let typewriter = Typewriter::new(options);
    let (mut inputs, _reader) = input::spawn(typewriter.cancel_token());

    let total = slides.len();
    for (index, slide) in slides.iter().enumerate() {
        let chrome = Chrome::new(slide, index, total, viewer);
        let mut sink = TerminalSink::new(&mut terminal, chrome);
        sink.redraw();

        match typewriter.type_markup(&slide.body, &mut sink).await {
            Ok(summary) => debug!(slide = index + 1, typed = summary.typed_units, "slide typed"),
            Err(TypeError::Cancelled { summary }) => {
                info!(slide = index + 1, typed = summary.typed_units, "stopped by user");
                sink.take_error()?;
                return Ok(());
            }
        }
        sink.take_error()?;

        drain(&mut inputs);
        let proceed = if index + 1 == total {
            sink.set_phase(Phase::Done);
            wait_for_any_key(&mut inputs, &mut sink).await;
            false
        } else {
            match viewer.advance {
                AdvanceMode::Key => {
                    sink.set_phase(Phase::WaitingForKey);
                    wait_for_advance(&mut inputs, &mut sink).await
                }
                AdvanceMode::Auto => {
                    sink.set_phase(Phase::Advancing);
                    let gap = Duration::from_millis(viewer.slide_gap_ms);
                    hold(gap, &typewriter.cancel_token()).await
                }
            }
        };
        sink.take_error()?;

        if !proceed {
            break;
        }
    }

    Ok(())
}

/// Keys pressed while a slide was typing don't count towards advancing.
fn drain(inputs: &mut UnboundedReceiver<Input>) {
    while inputs.try_recv().is_ok() {}
}

/// `true` to move on, `false` to quit.
async fn wait_for_advance<B: Backend>(
    inputs: &mut UnboundedReceiver<Input>,
    sink: &mut TerminalSink<'_, B>,
) -> bool {
    loop {
        match inputs.recv().await {
            Some(Input::Advance) => return true,
            Some(Input::Quit) | None => return false,
            Some(Input::Redraw) => sink.redraw(),
            Some(Input::Other) => {}
        }
    }
}

async fn wait_for_any_key<B: Backend>(
    inputs: &mut UnboundedReceiver<Input>,
    sink: &mut TerminalSink<'_, B>,
) {
    loop {
        match inputs.recv().await {
            Some(Input::Redraw) => sink.redraw(),
            _ => return,
        }
    }
}

/// Sleep for `gap` unless cancelled first. `true` when the gap elapsed.
async fn hold(gap: Duration, cancel: &CancelToken) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(gap) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn hold_runs_out_the_gap() {
        assert!(hold(Duration::from_millis(500), &CancelToken::new()).await);
    }

    #[tokio::test]
    async fn hold_stops_on_cancel() {
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(!hold(Duration::from_secs(3600), &cancel).await);
    }

    #[tokio::test]
    async fn drain_discards_queued_keys() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.send(Input::Advance).unwrap();
        tx.send(Input::Other).unwrap();
        drain(&mut rx);
        assert!(rx.try_recv().is_err());
    }
}
