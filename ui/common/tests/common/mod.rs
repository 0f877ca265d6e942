use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

use ui_common::{poller::Tick, HomeLocation, Timer};

/// Timer whose ticks only run when the test fires them
#[derive(Clone, Default)]
pub struct ManualTimer {
    ticks: Rc<RefCell<BTreeMap<u32, (Duration, Tick)>>>,
    next: Rc<RefCell<u32>>,
}

impl ManualTimer {
    pub fn active(&self) -> usize {
        self.ticks.borrow().len()
    }

    /// Fire every registered timer once
    pub fn fire_all(&self) {
        let ids: Vec<u32> = self.ticks.borrow().keys().copied().collect();
        for id in ids {
            let taken = self.ticks.borrow_mut().remove(&id);
            if let Some((period, mut tick)) = taken {
                tick();
                self.ticks.borrow_mut().insert(id, (period, tick));
            }
        }
    }
}

impl Timer for ManualTimer {
    type Handle = u32;

    fn every(&mut self, period: Duration, tick: Tick) -> u32 {
        let mut next = self.next.borrow_mut();
        *next += 1;
        self.ticks.borrow_mut().insert(*next, (period, tick));
        *next
    }

    fn clear(&mut self, handle: u32) {
        self.ticks.borrow_mut().remove(&handle);
    }
}

pub fn home_json(radius: f64) -> String {
    format!(
        r#"{{"latitude":-6.2,"longitude":106.8,"radius":{radius},"nama":"Panti Lansia","time":"2024-11-20T08:30:00Z"}}"#
    )
}

pub fn home(radius: f64) -> HomeLocation {
    serde_json::from_str(&home_json(radius)).unwrap()
}
