use std::{cell::RefCell, time::Duration};

use leptos::{set_interval_with_handle, IntervalHandle};
use ui_common::{poller::Tick, Timer};

/// Browser intervals through Leptos
#[derive(Debug, Default, Copy, Clone)]
pub struct LeptosTimer;

impl Timer for LeptosTimer {
    type Handle = Option<IntervalHandle>;

    fn every(&mut self, period: Duration, tick: Tick) -> Self::Handle {
        let tick = RefCell::new(tick);
        match set_interval_with_handle(move || (tick.borrow_mut())(), period) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("Cannot start interval: {e:?}");
                None
            }
        }
    }

    fn clear(&mut self, handle: Self::Handle) {
        if let Some(handle) = handle {
            handle.clear();
        }
    }
}
