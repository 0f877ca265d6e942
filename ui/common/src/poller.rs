//! Fixed interval polling.
//!
//! One timer per data source. Registering a source again replaces its timer,
//! and shutting the scheduler down clears every timer and invalidates every
//! [`PollGuard`] handed out, so late responses can be dropped by the caller.
//! Ticks do not wait for the previous fetch to finish.

use std::{cell::Cell, collections::HashMap, rc::Rc, time::Duration};

use crate::config::PollIntervals;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Poller {
    LiveLocation,
    FallAlert,
    SosLocations,
    ActivitySummary,
}

impl Poller {
    pub fn interval(&self, intervals: &PollIntervals) -> Duration {
        match self {
            Poller::LiveLocation => intervals.live_location,
            Poller::FallAlert => intervals.fall_alert,
            Poller::SosLocations => intervals.sos_locations,
            Poller::ActivitySummary => intervals.activity_summary,
        }
    }
}

pub type Tick = Box<dyn FnMut()>;

/// Source of repeating timers
pub trait Timer {
    type Handle;

    fn every(&mut self, period: Duration, tick: Tick) -> Self::Handle;
    fn clear(&mut self, handle: Self::Handle);
}

/// Request generation token. Stays live until the registration that produced
/// it is cancelled or the scheduler shuts down.
#[derive(Debug, Clone)]
pub struct PollGuard {
    live: Rc<Cell<bool>>,
}

impl PollGuard {
    fn new() -> Self {
        Self {
            live: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    fn revoke(&self) {
        self.live.set(false);
    }
}

struct Registration<H> {
    handle: H,
    guard: PollGuard,
}

pub struct Scheduler<T: Timer> {
    timer: T,
    pollers: HashMap<Poller, Registration<T::Handle>>,
    session: PollGuard,
}

impl<T: Timer> Scheduler<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            pollers: HashMap::new(),
            session: PollGuard::new(),
        }
    }

    /// Run `fetch` now and then every `period` until cancelled
    pub fn register<F>(&mut self, id: Poller, period: Duration, mut fetch: F)
    where
        F: FnMut(PollGuard) + 'static,
    {
        if !self.session.is_live() {
            log::warn!("Scheduler is shut down, not starting {id:?}");
            return;
        }

        self.cancel(id);

        let guard = PollGuard::new();
        fetch(guard.clone());

        let tick_guard = guard.clone();
        let handle = self.timer.every(
            period,
            Box::new(move || {
                if tick_guard.is_live() {
                    fetch(tick_guard.clone());
                }
            }),
        );

        log::debug!("Started {id:?} poller every {period:?}");
        self.pollers.insert(id, Registration { handle, guard });
    }

    pub fn cancel(&mut self, id: Poller) -> bool {
        match self.pollers.remove(&id) {
            Some(reg) => {
                reg.guard.revoke();
                self.timer.clear(reg.handle);
                log::debug!("Stopped {id:?} poller");
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, id: Poller) -> bool {
        self.pollers.contains_key(&id)
    }

    /// Guard for one-shot requests, revoked on shutdown
    pub fn session_guard(&self) -> PollGuard {
        self.session.clone()
    }

    pub fn shutdown(&mut self) {
        self.session.revoke();
        let ids: Vec<Poller> = self.pollers.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }
}

impl<T: Timer> Drop for Scheduler<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}


#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::{fake::FakeTimer, *};

    fn counter() -> (Rc<RefCell<u32>>, impl FnMut(PollGuard) + 'static) {
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        (count, move |_guard| *c.borrow_mut() += 1)
    }

    #[test]
    fn fires_immediately_then_every_period() {
        let timer = FakeTimer::default();
        let mut scheduler = Scheduler::new(timer.clone());
        let (count, fetch) = counter();

        scheduler.register(Poller::FallAlert, Duration::from_secs(5), fetch);
        assert_eq!(*count.borrow(), 1);

        timer.advance(Duration::from_secs(4));
        assert_eq!(*count.borrow(), 1);
        timer.advance(Duration::from_secs(1));
        assert_eq!(*count.borrow(), 2);
        timer.advance(Duration::from_secs(15));
        assert_eq!(*count.borrow(), 5);
    }

    #[test]
    fn re_registering_keeps_a_single_timer() {
        let timer = FakeTimer::default();
        let mut scheduler = Scheduler::new(timer.clone());
        let (first, fetch_first) = counter();
        let (second, fetch_second) = counter();

        scheduler.register(Poller::LiveLocation, Duration::from_secs(3), fetch_first);
        scheduler.register(Poller::LiveLocation, Duration::from_secs(3), fetch_second);
        assert_eq!(timer.active(), 1);

        timer.advance(Duration::from_secs(3));
        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 2);
    }

    #[test]
    fn cancel_revokes_guard() {
        let timer = FakeTimer::default();
        let mut scheduler = Scheduler::new(timer.clone());
        let kept = Rc::new(RefCell::new(None));
        let k = kept.clone();

        scheduler.register(Poller::SosLocations, Duration::from_secs(300), move |g| {
            *k.borrow_mut() = Some(g)
        });
        let guard = kept.borrow().clone().unwrap();
        assert!(guard.is_live());
        assert!(scheduler.is_active(Poller::SosLocations));

        assert!(scheduler.cancel(Poller::SosLocations));
        assert!(!guard.is_live());
        assert!(!scheduler.is_active(Poller::SosLocations));
        assert!(!scheduler.cancel(Poller::SosLocations));
        assert_eq!(timer.active(), 0);
    }

    #[test]
    fn shutdown_stops_everything() {
        let timer = FakeTimer::default();
        let mut scheduler = Scheduler::new(timer.clone());
        let (count, fetch) = counter();
        let (other, fetch_other) = counter();

        scheduler.register(Poller::LiveLocation, Duration::from_secs(3), fetch);
        scheduler.register(Poller::FallAlert, Duration::from_secs(5), fetch_other);
        let session = scheduler.session_guard();

        scheduler.shutdown();
        assert!(!session.is_live());
        assert_eq!(timer.active(), 0);

        timer.advance(Duration::from_secs(60));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(*other.borrow(), 1);

        let (late, fetch_late) = counter();
        scheduler.register(Poller::ActivitySummary, Duration::from_secs(1), fetch_late);
        assert_eq!(*late.borrow(), 0);
    }

    #[test]
    fn drop_clears_timers() {
        let timer = FakeTimer::default();
        {
            let mut scheduler = Scheduler::new(timer.clone());
            let (_count, fetch) = counter();
            scheduler.register(Poller::ActivitySummary, Duration::from_secs(300), fetch);
            assert_eq!(timer.active(), 1);
        }
        assert_eq!(timer.active(), 0);
    }
}
