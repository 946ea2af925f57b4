// SPDX-License-Identifier: MPL-2.0
//! Async host loop on a tokio current-thread runtime.
//!
//! The engine itself is host-driven. [`Driver::run`] is a ready-made host:
//! it sleeps until the next timer deadline, ticks at a fixed frame interval
//! while something animates, and wakes early when a [`DriverHandle`]
//! mutates the engine. The engine is `!Send`, so the loop must be awaited
//! on the thread that owns it.

use crate::center::NotificationCenter;
use crate::domain::timing::EngineConfig;
use crate::scheduler::Clock;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tracing::{debug, trace};

/// Default frame interval (about 60 frames per second).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Clock backed by tokio's timer, so paused test time applies to the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Cloneable access to a driven engine.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    center: Rc<RefCell<NotificationCenter<TokioClock>>>,
    wake: Rc<Notify>,
}

impl DriverHandle {
    /// Runs `f` against the engine and wakes the loop so new deadlines apply.
    pub fn with<R>(&self, f: impl FnOnce(&mut NotificationCenter<TokioClock>) -> R) -> R {
        let result = f(&mut self.center.borrow_mut());
        self.wake.notify_one();
        result
    }

    /// Runs `f` against the engine without waking the loop.
    pub fn inspect<R>(&self, f: impl FnOnce(&NotificationCenter<TokioClock>) -> R) -> R {
        f(&self.center.borrow())
    }
}

/// Owns the engine and runs its timers and frames.
#[derive(Debug)]
pub struct Driver {
    center: Rc<RefCell<NotificationCenter<TokioClock>>>,
    wake: Rc<Notify>,
    frame_interval: Duration,
}

impl Driver {
    /// Creates a driver around a fresh engine.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_center(NotificationCenter::new(config, TokioClock))
    }

    /// Creates a driver around an existing engine.
    #[must_use]
    pub fn with_center(center: NotificationCenter<TokioClock>) -> Self {
        Self {
            center: Rc::new(RefCell::new(center)),
            wake: Rc::new(Notify::new()),
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    /// Overrides the frame interval. Zero is raised to one millisecond.
    #[must_use]
    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Returns a handle for mutating the engine while the loop runs.
    #[must_use]
    pub fn handle(&self) -> DriverHandle {
        DriverHandle {
            center: Rc::clone(&self.center),
            wake: Rc::clone(&self.wake),
        }
    }

    fn next_wakeup(&self) -> Option<tokio::time::Instant> {
        let center = self.center.borrow();
        let frame_at = center
            .is_animating()
            .then(|| center.now() + self.frame_interval);
        let at = match (center.next_deadline(), frame_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        at.map(tokio::time::Instant::from_std)
    }

    /// Runs until `shutdown` completes, then tears the engine down.
    pub async fn run(self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        debug!(interval_ms = self.frame_interval.as_millis(), "driver started");

        loop {
            let wakeup = self.next_wakeup();
            let sleep = async {
                match wakeup {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                biased;

                () = &mut shutdown => break,

                () = self.wake.notified() => {
                    trace!("driver woken by mutation");
                }

                () = sleep => {
                    let (fired, frames) = self.center.borrow_mut().tick();
                    trace!(fired, frames, "driver tick");
                }
            }
        }

        self.center.borrow_mut().shutdown();
        debug!("driver stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::StateKind;

    #[tokio::test(start_paused = true)]
    async fn collapses_on_schedule_without_real_waiting() {
        let driver = Driver::new(EngineConfig::default());
        let handle = driver.handle();
        let added = handle.with(|center| center.info("hello", "greeting"));

        let observer = handle.clone();
        let shutdown = async move {
            tokio::time::sleep(Duration::from_secs(6)).await;
            let kind = observer.inspect(|center| center.controller().kind_of(added.id));
            assert_eq!(kind, Some(StateKind::CollapsedIcon));
        };

        driver.run(shutdown).await;

        handle.inspect(|center| {
            assert_eq!(center.pending_timers(), 0);
            assert_eq!(center.pending_frames(), 0);
            assert!(center.collapsed().is_empty());
        });
    }

    #[tokio::test(start_paused = true)]
    async fn success_is_dismissed_by_the_loop() {
        let driver = Driver::new(EngineConfig::default()).frame_interval(Duration::from_millis(50));
        let handle = driver.handle();
        let added = handle.with(|center| center.success("saved", "save"));

        let observer = handle.clone();
        let shutdown = async move {
            tokio::time::sleep(Duration::from_millis(3_100)).await;
            assert!(!observer.inspect(|center| center.store().contains(added.id)));
        };

        driver.run(shutdown).await;
    }

    #[tokio::test(start_paused = true)]
    async fn idle_driver_stops_on_shutdown() {
        let driver = Driver::new(EngineConfig::default());
        let handle = driver.handle();
        driver.run(std::future::ready(())).await;
        handle.inspect(|center| assert!(!center.has_any()));
    }
}
