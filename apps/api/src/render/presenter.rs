#![allow(dead_code)]

//! Incremental reveal of an annotated stream onto a surface.
//!
//! A `Presenter` owns at most one live reveal loop. Each loop runs as a tokio task
//! and checks its `CancelToken` before every step, so cancelling only stops further
//! painting; whatever prefix is already on the surface stays there.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::{JoinError, JoinHandle};
use tracing::debug;
use uuid::Uuid;

use crate::imperfection::AnnotatedChar;
use crate::render::plan::{RevealMode, RevealPlan};

/// Where revealed characters go: a DOM node, a terminal, a test buffer.
pub trait RevealSurface: Send + 'static {
    fn clear(&mut self);

    fn paint(&mut self, ch: &AnnotatedChar);

    fn paint_all(&mut self, chars: &[AnnotatedChar]) {
        for ch in chars {
            self.paint(ch);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealOutcome {
    /// Characters painted before the loop stopped.
    pub revealed: usize,
    pub completed: bool,
}

/// Handle to one running presentation.
#[derive(Debug)]
pub struct PresentationHandle {
    id: Uuid,
    token: CancelToken,
    task: JoinHandle<RevealOutcome>,
}

impl PresentationHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits for the loop to stop, either at the end of the stream or at the first
    /// step after cancellation.
    pub async fn finished(self) -> Result<RevealOutcome, JoinError> {
        self.task.await
    }
}

/// Starts reveals and guarantees that only the latest one keeps advancing.
#[derive(Debug, Default)]
pub struct Presenter {
    active: Option<(Uuid, CancelToken)>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any in-flight reveal, then spawns a new one on the current runtime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn present<S: RevealSurface>(
        &mut self,
        chars: Vec<AnnotatedChar>,
        plan: RevealPlan,
        surface: S,
    ) -> PresentationHandle {
        if let Some((previous, token)) = self.active.take() {
            debug!(presentation_id = %previous, "superseding in-flight reveal");
            token.cancel();
        }

        let id = Uuid::new_v4();
        let token = CancelToken::new();
        debug!(
            presentation_id = %id,
            mode = ?plan.mode,
            chars = chars.len(),
            "starting reveal"
        );

        let task = tokio::spawn(run_reveal(chars, plan, surface, token.clone()));
        self.active = Some((id, token.clone()));

        PresentationHandle { id, token, task }
    }

    /// Cancels the in-flight reveal, if any.
    pub fn cancel_active(&mut self) {
        if let Some((_, token)) = self.active.take() {
            token.cancel();
        }
    }
}

async fn run_reveal<S: RevealSurface>(
    chars: Vec<AnnotatedChar>,
    plan: RevealPlan,
    mut surface: S,
    token: CancelToken,
) -> RevealOutcome {
    if token.is_cancelled() {
        return RevealOutcome {
            revealed: 0,
            completed: false,
        };
    }

    surface.clear();

    if plan.mode == RevealMode::Instant {
        surface.paint_all(&chars);
        return RevealOutcome {
            revealed: chars.len(),
            completed: true,
        };
    }

    for (idx, ch) in chars.iter().enumerate() {
        if token.is_cancelled() {
            return RevealOutcome {
                revealed: idx,
                completed: false,
            };
        }
        surface.paint(ch);
        let delay = plan.delays.get(idx).copied().unwrap_or_default();
        tokio::time::sleep(delay).await;
    }

    RevealOutcome {
        revealed: chars.len(),
        completed: true,
    }
}

/// In-memory surface; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct BufferSurface(Arc<Mutex<Vec<AnnotatedChar>>>);

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<AnnotatedChar> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RevealSurface for BufferSurface {
    fn clear(&mut self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn paint(&mut self, ch: &AnnotatedChar) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(*ch);
    }

    fn paint_all(&mut self, chars: &[AnnotatedChar]) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(chars);
    }
}
