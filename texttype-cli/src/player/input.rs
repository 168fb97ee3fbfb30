//! Keyboard polling off the async thread.
//!
//! crossterm's event API blocks, so keys are read on a blocking task and
//! forwarded over a channel. Quit requests also cancel the running slide
//! directly: the player may be mid-run and not reading the channel.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use texttype_core::texttype::CancelToken;
use tokio::sync::mpsc;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Advance,
    Quit,
    /// The terminal was resized.
    Redraw,
    /// Any other key.
    Other,
}

pub fn classify(key: KeyEvent) -> Input {
    if key.kind != KeyEventKind::Press {
        return Input::Other;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Input::Quit,
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Right => Input::Advance,
        _ => Input::Other,
    }
}

/// Stops the polling task when dropped.
pub struct KeyReader {
    stop: Arc<AtomicBool>,
}

impl Drop for KeyReader {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

pub fn spawn(cancel: CancelToken) -> (mpsc::UnboundedReceiver<Input>, KeyReader) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);

    tokio::task::spawn_blocking(move || {
        while !flag.load(Ordering::Relaxed) {
            let input = match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => classify(key),
                    Ok(Event::Resize(_, _)) => Input::Redraw,
                    Ok(_) => continue,
                    Err(err) => {
                        debug!(%err, "key reader stopped");
                        Input::Quit
                    }
                },
                Err(err) => {
                    debug!(%err, "key reader stopped");
                    Input::Quit
                }
            };

            if input == Input::Quit {
                cancel.cancel();
            }
            if tx.send(input).is_err() || input == Input::Quit {
                break;
            }
        }
    });

    (rx, KeyReader { stop })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(classify(press(KeyCode::Char('q'), KeyModifiers::NONE)), Input::Quit);
        assert_eq!(classify(press(KeyCode::Esc, KeyModifiers::NONE)), Input::Quit);
        assert_eq!(
            classify(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Input::Quit
        );
    }

    #[test]
    fn advance_keys() {
        for code in [KeyCode::Char(' '), KeyCode::Enter, KeyCode::Right] {
            assert_eq!(classify(press(code, KeyModifiers::NONE)), Input::Advance);
        }
    }

    #[test]
    fn plain_c_and_releases_are_ignored() {
        assert_eq!(classify(press(KeyCode::Char('c'), KeyModifiers::NONE)), Input::Other);

        let mut release = press(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(classify(release), Input::Other);
    }
}
