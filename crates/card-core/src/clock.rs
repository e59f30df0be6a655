//! Frame clocks.
//!
//! A clock calls a tick once per displayed frame with the time elapsed since
//! it started. The web frontend drives ticks from `requestAnimationFrame`;
//! native hosts and tests use [`SteppedClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub type TickFn = Box<dyn FnMut(Duration)>;

/// Stops a running tick from being scheduled again.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

pub trait FrameClock {
    fn start(&mut self, tick: TickFn) -> CancelHandle;
}

/// Clock advanced explicitly by its owner.
pub struct SteppedClock {
    step: Duration,
    now: Duration,
    ticks: Vec<(TickFn, CancelHandle)>,
}

impl SteppedClock {
    /// `step` is the frame interval used by [`SteppedClock::advance`].
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            now: Duration::ZERO,
            ticks: Vec::new(),
        }
    }

    /// 60 Hz.
    pub fn display_rate() -> Self {
        Self::new(Duration::from_micros(16_667))
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `frames` frames of `step` each. Returns the number of tick calls.
    pub fn advance(&mut self, frames: usize) -> usize {
        let mut calls = 0;
        for _ in 0..frames {
            let at = self.now + self.step;
            calls += self.tick_at(at);
        }
        calls
    }

    /// Run one frame at an externally measured time. Time never goes back.
    pub fn tick_at(&mut self, now: Duration) -> usize {
        self.now = self.now.max(now);
        self.prune();
        let mut calls = 0;
        for (tick, handle) in self.ticks.iter_mut() {
            if handle.is_cancelled() {
                continue;
            }
            tick(self.now);
            calls += 1;
        }
        calls
    }

    /// Drop ticks whose handles were cancelled, releasing what they captured.
    pub fn prune(&mut self) {
        self.ticks.retain(|(_, handle)| !handle.is_cancelled());
    }

    pub fn active(&self) -> usize {
        self.ticks.iter().filter(|(_, h)| !h.is_cancelled()).count()
    }
}

impl FrameClock for SteppedClock {
    fn start(&mut self, tick: TickFn) -> CancelHandle {
        let handle = CancelHandle::new();
        self.ticks.push((tick, handle.clone()));
        handle
    }
}
