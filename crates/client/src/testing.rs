//! Test helpers, compiled for unit tests and with the `test-util` feature.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

/// Number of `ERROR` events seen by a [`count_errors`] subscriber.
#[derive(Debug, Clone, Default)]
pub struct ErrorCount(Arc<AtomicUsize>);

impl ErrorCount {
    #[must_use]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

struct ErrorCountLayer(ErrorCount);

impl<S: Subscriber> Layer<S> for ErrorCountLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            (self.0).0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Install a thread-local subscriber counting `ERROR` events until the
/// guard is dropped.
#[must_use]
pub fn count_errors() -> (DefaultGuard, ErrorCount) {
    let count = ErrorCount::default();
    let subscriber = tracing_subscriber::registry().with(ErrorCountLayer(count.clone()));
    (tracing::subscriber::set_default(subscriber), count)
}
