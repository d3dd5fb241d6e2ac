use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::warn;

use crate::typewriter::TypewriterFrame;

/// Rows moved per mouse wheel notch
const WHEEL_ROWS: i32 = 3;

/// How long the reader thread blocks before checking for shutdown
const READER_POLL: Duration = Duration::from_millis(50);

/// Polls crossterm for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Wait up to the tick rate for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if !event::poll(self.tick_rate)? {
            return Ok(Some(AppEvent::Tick));
        }

        let event = match event::read()? {
            // Release events arrive on some platforms; only presses count
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => Some(AppEvent::Scroll(WHEEL_ROWS)),
                MouseEventKind::ScrollUp => Some(AppEvent::Scroll(-WHEEL_ROWS)),
                _ => None,
            },
            _ => None,
        };
        Ok(event)
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Mouse wheel, in rows (positive is down)
    Scroll(i32),
    Tick,
}

/// Reads terminal events on a blocking thread so the main loop can await
/// them next to typewriter frames. The thread exits once the receiver is
/// dropped.
pub fn spawn_event_reader() -> UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let handler = EventHandler::new(READER_POLL);
        while !tx.is_closed() {
            match handler.next() {
                Ok(Some(AppEvent::Tick)) | Ok(None) => {}
                Ok(Some(event)) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Terminal event reader stopped: {}", e);
                    break;
                }
            }
        }
    });

    rx
}

/// Why the main loop woke up
#[derive(Debug)]
pub enum Wake {
    Frame(TypewriterFrame),
    Event(AppEvent),
    /// Nothing arrived within the timeout
    Tick,
    /// The terminal event reader is gone
    Closed,
}

/// Wait for the next typewriter frame, terminal event or timeout.
///
/// Every frame wakes the loop on its own, so each one gets drawn no matter
/// how the tick rate compares to the typing speed.
pub async fn next_wake(
    frames: &mut UnboundedReceiver<TypewriterFrame>,
    events: &mut UnboundedReceiver<AppEvent>,
    timeout: Duration,
) -> Wake {
    tokio::select! {
        biased;
        Some(frame) = frames.recv() => Wake::Frame(frame),
        event = events.recv() => match event {
            Some(event) => Wake::Event(event),
            None => Wake::Closed,
        },
        _ = tokio::time::sleep(timeout) => Wake::Tick,
    }
}

#[cfg(test)]
mod tests {
    use folio_core::TypewriterAnimator;

    use super::*;
    use crate::typewriter::TypewriterTask;

    #[tokio::test(start_paused = true)]
    async fn test_every_typewriter_frame_wakes_the_loop() {
        let animator = TypewriterAnimator::with_defaults(["Hello"]).unwrap();
        let (frame_tx, mut frames) = mpsc::unbounded_channel();
        let (_event_tx, mut events) = mpsc::unbounded_channel::<AppEvent>();
        let _task = TypewriterTask::spawn(animator, frame_tx);

        // Tick rate slower than the 50ms delete speed
        let tick_rate = Duration::from_millis(100);
        let mut drawn = Vec::new();
        while drawn.len() < 10 {
            if let Wake::Frame(frame) = next_wake(&mut frames, &mut events, tick_rate).await {
                drawn.push(frame.text);
            }
        }

        assert_eq!(
            drawn,
            vec!["H", "He", "Hel", "Hell", "Hello", "Hell", "Hel", "He", "H", ""]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_wake_is_a_tick() {
        let (_frame_tx, mut frames) = mpsc::unbounded_channel::<TypewriterFrame>();
        let (_event_tx, mut events) = mpsc::unbounded_channel::<AppEvent>();
        let wake = next_wake(&mut frames, &mut events, Duration::from_millis(100)).await;
        assert!(matches!(wake, Wake::Tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_reader_is_reported() {
        let (_frame_tx, mut frames) = mpsc::unbounded_channel::<TypewriterFrame>();
        let (event_tx, mut events) = mpsc::unbounded_channel::<AppEvent>();
        drop(event_tx);
        let wake = next_wake(&mut frames, &mut events, Duration::from_secs(1)).await;
        assert!(matches!(wake, Wake::Closed));
    }
}
