//! Owns the carousel's timers and publishes the authoritative index stream.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use super::engine::{Activation, CarouselEngine, IndexChange, ResizeOutcome};
use super::style::ItemStyle;
use super::wheel::Step;

/// A mounted carousel.
///
/// The autoplay timer exists only while the viewport is mobile. It is started on
/// mount, restarted when the viewport class changes and aborted on drop, so no
/// callback can touch the engine after the carousel is gone.
pub struct CarouselDriver {
    engine: Arc<Mutex<CarouselEngine>>,
    index_tx: Arc<watch::Sender<usize>>,
    autoplay: Option<JoinHandle<()>>,
}

impl CarouselDriver {
    /// Mounts the engine. Must be called from within a Tokio runtime.
    #[must_use]
    pub fn mount(engine: CarouselEngine) -> Self {
        let (index_tx, _) = watch::channel(engine.focal_index());
        let mut driver = Self {
            engine: Arc::new(Mutex::new(engine)),
            index_tx: Arc::new(index_tx),
            autoplay: None,
        };
        driver.sync_autoplay();
        driver
    }

    /// Subscribes to focal index updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index_tx.subscribe()
    }

    /// Returns the focal index.
    #[must_use]
    pub fn focal_index(&self) -> usize {
        self.engine.lock().focal_index()
    }

    /// Runs a read-only closure against the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&CarouselEngine) -> R) -> R {
        f(&self.engine.lock())
    }

    /// Returns whether the autoplay timer is running.
    #[must_use]
    pub fn is_autoplay_running(&self) -> bool {
        self.autoplay.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Next control.
    pub fn next(&self) -> Option<IndexChange> {
        let change = self.engine.lock().navigate(Step::Forward, Instant::now());
        self.publish(change)
    }

    /// Previous control.
    pub fn previous(&self) -> Option<IndexChange> {
        let change = self.engine.lock().navigate(Step::Backward, Instant::now());
        self.publish(change)
    }

    /// Wheel input.
    pub fn wheel(&self, delta: f64) -> Option<IndexChange> {
        let change = self.engine.lock().wheel(delta, Instant::now());
        self.publish(change)
    }

    /// Touch start.
    pub fn touch_start(&self, x: f64) {
        self.engine.lock().touch_start(x, Instant::now());
    }

    /// Touch end.
    pub fn touch_end(&self, x: f64) -> Option<IndexChange> {
        let change = self.engine.lock().touch_end(x, Instant::now());
        self.publish(change)
    }

    /// Item activation.
    pub fn activate(&self, index: usize) -> Activation {
        let activation = self.engine.lock().activate(index, Instant::now());
        if let Activation::Focused(change) = activation {
            self.publish(Some(change));
        }
        activation
    }

    /// Hover state.
    pub fn set_hovered(&self, index: Option<usize>) {
        self.engine.lock().set_hovered(index);
    }

    /// Current item styles.
    #[must_use]
    pub fn styles(&self) -> Vec<ItemStyle> {
        self.engine.lock().styles()
    }

    /// Viewport resize. Restarts the autoplay timer if the viewport class changed.
    pub fn resize(&mut self, viewport_width: u32) -> ResizeOutcome {
        let outcome = self.engine.lock().resize(viewport_width);
        if outcome.viewport_changed {
            self.stop_autoplay();
            self.sync_autoplay();
        }
        outcome
    }

    /// Tears the carousel down, clearing every timer.
    pub fn unmount(mut self) {
        self.stop_autoplay();
    }

    fn publish(&self, change: Option<IndexChange>) -> Option<IndexChange> {
        if let Some(change) = change {
            self.index_tx.send_replace(change.to);
        }
        change
    }

    fn sync_autoplay(&mut self) {
        let (mobile, period) = {
            let engine = self.engine.lock();
            (engine.viewport().is_mobile(), engine.settings().autoplay_interval)
        };

        if !mobile {
            self.stop_autoplay();
            return;
        }
        if self.autoplay.is_some() {
            return;
        }

        let engine = Arc::clone(&self.engine);
        let index_tx = Arc::clone(&self.index_tx);

        self.autoplay = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let change = engine.lock().autoplay_tick(Instant::now());
                if let Some(change) = change {
                    index_tx.send_replace(change.to);
                }
            }
        }));

        debug!(period_ms = period.as_millis(), "Autoplay timer started");
    }

    fn stop_autoplay(&mut self) {
        if let Some(handle) = self.autoplay.take() {
            handle.abort();
            debug!("Autoplay timer cleared");
        }
    }
}

impl Drop for CarouselDriver {
    fn drop(&mut self) {
        self.stop_autoplay();
    }
}
