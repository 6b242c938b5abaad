//! Loading → Ready state machine for a single page instance.
//!
//! ```text
//!  new() ──► Loading ──mount()──► [sleep artificial_delay] ──► Ready
//!                │                          │
//!                └──── drop / teardown() ───┴──► timer aborted, no update
//! ```
//!
//! The state is published through a `tokio::sync::watch` channel. The
//! sender is consumed by the one transition, so a page can reach `Ready`
//! at most once and never leaves it.

use super::{PageOptions, PageState, Signals};
use tokio::{runtime::Handle, sync::watch, task::JoinHandle};

pub struct PageController {
    options: PageOptions,
    runtime: Handle,
    state: watch::Receiver<PageState>,
    /// Taken by the first `mount`; `None` afterwards.
    publisher: Option<watch::Sender<PageState>>,
    /// Delayed transition, aborted on teardown.
    pending: Option<JoinHandle<()>>,
}

impl PageController {
    /// Create a controller in the `Loading` state.
    ///
    /// `runtime` drives the delay timer; it is unused when the delay is zero.
    pub fn new(options: PageOptions, runtime: Handle) -> Self {
        let (publisher, state) = watch::channel(PageState::default());
        Self {
            options,
            runtime,
            state,
            publisher: Some(publisher),
            pending: None,
        }
    }

    /// Read the signals, classify them, and schedule the Ready transition.
    ///
    /// Only the first call has any effect.
    pub fn mount(&mut self, signals: &Signals) {
        let Some(publisher) = self.publisher.take() else {
            return;
        };

        let ready = PageState::classified(signals);
        let delay = self.options.artificial_delay;

        if delay.is_zero() {
            publisher.send_replace(ready);
            return;
        }

        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            publisher.send_replace(ready);
        }));
    }

    /// Current snapshot.
    pub fn state(&self) -> PageState {
        *self.state.borrow()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.state.clone()
    }

    /// Whether a delayed transition is scheduled but has not fired.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Wait for the Ready state.
    ///
    /// Returns `None` if the transition can no longer happen: the page was
    /// never mounted and its publisher is gone, or the timer was aborted.
    pub async fn ready(&self) -> Option<PageState> {
        if self.publisher.is_some() {
            return None;
        }
        let mut state = self.subscribe();
        let ready = state.wait_for(PageState::is_ready).await.ok()?;
        Some(*ready)
    }

    /// Tear the page down, cancelling any pending transition.
    pub fn teardown(self) {
        drop(self);
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
