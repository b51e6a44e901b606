//! Progressive character-by-character reveal of bot text and titles.
//!
//! Each target (response text, conversation title) has one slot holding the
//! cancellation token of its running animation. Starting a new animation
//! cancels the slot's previous token first, so ticks of a superseded
//! animation never interleave with the new one.

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// Every prefix up to the full text was delivered.
    Completed,
    /// A newer animation on the same target cancelled this one.
    Superseded,
}

/// Resolves when the animation finishes or is superseded.
///
/// Dropping the handle does not stop the animation.
pub struct AnimationHandle {
    task: JoinHandle<AnimationOutcome>,
}

impl AnimationHandle {
    pub async fn finished(self) -> AnimationOutcome {
        self.task.await.unwrap_or(AnimationOutcome::Superseded)
    }
}

#[derive(Default)]
pub struct TypingAnimator {
    text: Mutex<Option<CancellationToken>>,
    title: Mutex<Option<CancellationToken>>,
}

impl TypingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveal `full` one character per `interval`, calling `on_tick` with
    /// each longer prefix. Supersedes any text animation still running.
    pub fn animate_text<F>(&self, full: String, interval: Duration, on_tick: F) -> AnimationHandle
    where
        F: FnMut(&str) + Send + 'static,
    {
        Self::start(&self.text, "text", full, interval, on_tick)
    }

    /// Same as [`animate_text`](Self::animate_text), on the title slot.
    pub fn animate_title<F>(&self, full: String, interval: Duration, on_tick: F) -> AnimationHandle
    where
        F: FnMut(&str) + Send + 'static,
    {
        Self::start(&self.title, "title", full, interval, on_tick)
    }

    /// Cancel both slots.
    pub fn cancel_all(&self) {
        for slot in [&self.text, &self.title] {
            if let Ok(mut slot) = slot.lock() {
                if let Some(token) = slot.take() {
                    token.cancel();
                }
            }
        }
    }

    fn start<F>(
        slot: &Mutex<Option<CancellationToken>>,
        target: &'static str,
        full: String,
        interval: Duration,
        mut on_tick: F,
    ) -> AnimationHandle
    where
        F: FnMut(&str) + Send + 'static,
    {
        let token = CancellationToken::new();
        if let Ok(mut slot) = slot.lock() {
            if let Some(previous) = slot.replace(token.clone()) {
                previous.cancel();
            }
        }

        let task = tokio::spawn(async move {
            let ends = full
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .collect::<Vec<_>>();
            for end in ends {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!(target_slot = target, "animation superseded");
                        return AnimationOutcome::Superseded;
                    }
                    _ = tokio::time::sleep(interval) => {}
                }
                // Cancellation may land while the timer fires.
                if token.is_cancelled() {
                    return AnimationOutcome::Superseded;
                }
                on_tick(&full[..end]);
            }
            AnimationOutcome::Completed
        });

        AnimationHandle { task }
    }
}
