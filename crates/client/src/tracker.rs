//! Progress tracking for multi-step workflows.
//!
//! A [`ProcessTracker`] holds a titled, ordered list of step labels plus a
//! cursor and a percentage, and publishes every change on a
//! [`tokio::sync::watch`] channel for whatever renders the progress dialog.
//!
//! Step indices and explicit percentages are clamped into range rather than
//! rejected; callers are trusted to advance in order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::config::ProgressConfig;

/// A workflow with a closed, ordered set of steps.
pub trait ProcessSteps: Copy + Eq + 'static {
    /// Dialog title.
    const TITLE: &'static str;

    /// Every step, in order.
    const ALL: &'static [Self];

    /// Label shown for this step.
    fn label(self) -> &'static str;

    /// Position of this step in [`Self::ALL`].
    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or_default()
    }
}

/// Snapshot of the progress dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessState {
    pub title: String,
    pub description: Option<String>,
    pub steps: Vec<String>,
    pub current_step: usize,
    /// Percentage in `0.0..=100.0`.
    pub progress: f64,
    pub is_open: bool,
}

impl Default for ProcessState {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            steps: Vec::new(),
            current_step: 0,
            progress: 0.0,
            is_open: false,
        }
    }
}

impl ProcessState {
    /// Label of the current step.
    #[must_use]
    pub fn current_label(&self) -> Option<&str> {
        self.steps.get(self.current_step).map(String::as_str)
    }
}

/// Holder of one progress dialog's state.
#[derive(Debug, Clone)]
pub struct ProcessTracker {
    state: Arc<watch::Sender<ProcessState>>,
    generation: Arc<AtomicU64>,
    auto_hide: Duration,
}

impl Default for ProcessTracker {
    fn default() -> Self {
        Self::new(ProgressConfig::default())
    }
}

impl ProcessTracker {
    #[must_use]
    pub fn new(config: ProgressConfig) -> Self {
        let (state, _) = watch::channel(ProcessState::default());
        Self {
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            auto_hide: config.auto_hide,
        }
    }

    /// Watch state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProcessState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> ProcessState {
        self.state.borrow().clone()
    }

    /// Open the dialog at step 0 / 0 %, superseding any pending auto-hide.
    pub fn start<I, L>(&self, title: &str, steps: I, description: Option<&str>)
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let state = ProcessState {
            title: title.to_string(),
            description: description.map(str::to_string),
            steps: steps.into_iter().map(Into::into).collect(),
            current_step: 0,
            progress: 0.0,
            is_open: true,
        };
        tracing::debug!(title, steps = state.steps.len(), "Process started");
        self.state.send_replace(state);
    }

    /// [`start`](Self::start) with a workflow's own title and steps.
    pub fn start_process<P: ProcessSteps>(&self, description: Option<&str>) {
        self.start(P::TITLE, P::ALL.iter().map(|s| s.label()), description);
    }

    /// Move to `step`. Progress becomes `explicit_progress` when given,
    /// otherwise `(step + 1) / steps * 100`.
    pub fn advance(&self, step: usize, explicit_progress: Option<f64>) {
        self.state.send_modify(|state| {
            let count = state.steps.len();
            state.current_step = step.min(count.saturating_sub(1));
            state.progress = explicit_progress.map_or_else(
                || step_progress(state.current_step, count),
                clamp_progress,
            );
        });
    }

    /// [`advance`](Self::advance) to a workflow step.
    pub fn advance_to<P: ProcessSteps>(&self, step: P) {
        self.advance(step.index(), None);
    }

    /// Force 100 % on the last step, then hide after the configured delay.
    pub fn complete(&self) {
        self.state.send_modify(|state| {
            state.current_step = state.steps.len().saturating_sub(1);
            state.progress = 100.0;
        });

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("No async runtime; progress dialog will stay open until closed");
            return;
        };

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let delay = self.auto_hide;
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) == generation {
                state.send_modify(|state| state.is_open = false);
            }
        });
    }

    /// Hide immediately, keeping progress and cursor.
    pub fn close(&self) {
        self.state.send_modify(|state| state.is_open = false);
    }
}

#[allow(clippy::cast_precision_loss)] // Step counts are tiny
fn step_progress(step: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    clamp_progress((step + 1) as f64 / count as f64 * 100.0)
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    }
}
