//! Interval Hook

use gloo_timers::callback::Interval;
use leptos::prelude::*;

use crate::Latest;

/// Starts periodic timers. Dropping the returned timer cancels it.
pub trait TimerHost: 'static {
    type Timer: 'static;

    fn start(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Timer;
}

/// `setInterval` through gloo-timers
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

impl TimerHost for BrowserTimers {
    type Timer = Interval;

    fn start(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Interval {
        Interval::new(period_ms, tick)
    }
}

/// The running timer of one hook instance.
struct IntervalSlot<H: TimerHost> {
    host: H,
    tick: Latest<()>,
    timer: Option<H::Timer>,
}

impl<H: TimerHost> IntervalSlot<H> {
    fn new(host: H, tick: Latest<()>) -> Self {
        Self { host, tick, timer: None }
    }

    /// Cancel the current timer, then start one for `period_ms` unless it is 0.
    fn rearm(&mut self, period_ms: u32) {
        self.timer = None;
        if period_ms == 0 {
            return;
        }
        let tick = self.tick.clone();
        self.timer = Some(self.host.start(period_ms, Box::new(move || tick.call(()))));
    }
}

/// Run `callback` every `period_ms` milliseconds.
///
/// A period of 0 stops the timer. Changing the period restarts it. The
/// returned handle can swap the callback without touching the timer.
/// The timer is cancelled when the owning scope is disposed.
pub fn use_interval<F>(callback: F, period_ms: impl Into<Signal<u32>>) -> Latest<()>
where
    F: FnMut() + 'static,
{
    use_interval_with(BrowserTimers, callback, period_ms)
}

/// `use_interval` on an explicit timer host.
pub fn use_interval_with<H, F>(host: H, mut callback: F, period_ms: impl Into<Signal<u32>>) -> Latest<()>
where
    H: TimerHost,
    F: FnMut() + 'static,
{
    let saved = Latest::new(move |()| callback());
    let period = period_ms.into();

    // Disposing the owner drops the slot and with it the timer.
    let slot = StoredValue::new_local(IntervalSlot::new(host, saved.clone()));

    Effect::new(move |_| {
        let ms = period.get();
        slot.update_value(|slot| slot.rearm(ms));
    });

    saved
}
