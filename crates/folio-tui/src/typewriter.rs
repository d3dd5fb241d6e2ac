//! Drives a `TypewriterAnimator` from a background tokio task

use folio_core::{TypeMode, TypewriterAnimator};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// What the hero line should show after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterFrame {
    pub text: String,
    pub mode: TypeMode,
    pub phrase_index: usize,
}

/// Handle to the running typewriter.
///
/// The task owns the animator, sends one frame per tick and then sleeps for
/// the delay the tick asked for. Dropping the handle aborts the task, so no
/// tick fires after teardown.
pub struct TypewriterTask {
    handle: JoinHandle<()>,
}

impl TypewriterTask {
    /// Start ticking; must be called from within a tokio runtime
    pub fn spawn(mut animator: TypewriterAnimator, tx: UnboundedSender<TypewriterFrame>) -> Self {
        let handle = tokio::spawn(async move {
            loop {
                let tick = animator.tick();
                let frame = TypewriterFrame {
                    text: animator.displayed().to_string(),
                    mode: tick.mode,
                    phrase_index: tick.phrase_index,
                };
                if tx.send(frame).is_err() {
                    debug!("typewriter receiver dropped, stopping");
                    break;
                }
                tokio::time::sleep(tick.delay).await;
            }
        });

        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TypewriterTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use folio_core::TypewriterTiming;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_frames_follow_tick_delays() {
        let animator =
            TypewriterAnimator::new(["Go", "Rust"], TypewriterTiming::default()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let _task = TypewriterTask::spawn(animator, tx);

        let mut texts = Vec::new();
        for _ in 0..4 {
            texts.push(rx.recv().await.unwrap().text);
        }
        assert_eq!(texts, vec!["G", "Go", "G", ""]);
        // 100ms type + 2000ms pause + 50ms delete before the fourth frame
        assert_eq!(start.elapsed(), Duration::from_millis(2150));

        let next = rx.recv().await.unwrap();
        assert_eq!(next.text, "R");
        assert_eq!(next.phrase_index, 1);
        assert_eq!(next.mode, TypeMode::Typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticking() {
        let animator = TypewriterAnimator::with_defaults(["Hello"]).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = TypewriterTask::spawn(animator, tx);

        assert_eq!(rx.recv().await.unwrap().text, "H");
        drop(task);

        // The aborted task drops its sender, closing the channel
        while rx.recv().await.is_some() {}
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let animator = TypewriterAnimator::with_defaults(["Hi"]).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let task = TypewriterTask::spawn(animator, tx);
        drop(rx);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(task.is_finished());
    }
}
