//! Ownership of the repeating tick source.
//!
//! The handle type is generic so the browser build can store a
//! `gloo_timers::callback::Interval` (cancelled on drop) while tests store a
//! drop counter.

/// Holds a tick handle for exactly as long as the stopwatch is running.
#[derive(Debug)]
pub struct TickSlot<H> {
    handle: Option<H>,
}

impl<H> Default for TickSlot<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> TickSlot<H> {
    /// Acquire a handle on entering the running state, drop it on leaving.
    /// Repeated calls with the same flag are no-ops; at most one handle exists.
    pub fn sync(&mut self, running: bool, acquire: impl FnOnce() -> H) {
        match (running, self.handle.is_some()) {
            (true, false) => self.handle = Some(acquire()),
            (false, true) => self.release(),
            _ => {}
        }
    }

    /// Drop the handle, if any.
    pub fn release(&mut self) {
        self.handle = None;
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NotifyPolicy, TickStrategy, Timekeeper};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counters {
        acquired: Cell<u32>,
        released: Cell<u32>,
    }

    struct Handle(Rc<Counters>);

    impl Drop for Handle {
        fn drop(&mut self) {
            self.0.released.set(self.0.released.get() + 1);
        }
    }

    fn acquire(c: &Rc<Counters>) -> impl FnOnce() -> Handle {
        let c = c.clone();
        move || {
            c.acquired.set(c.acquired.get() + 1);
            Handle(c.clone())
        }
    }

    #[test]
    fn follows_start_pause_reset() {
        let counters = Rc::new(Counters::default());
        let mut slot = TickSlot::default();
        let mut tk = Timekeeper::new(NotifyPolicy::Once, TickStrategy::Anchored);

        tk.start(0);
        slot.sync(tk.is_running(), acquire(&counters));
        assert!(slot.is_armed());

        // Re-render while still running must not stack a second timer.
        slot.sync(tk.is_running(), acquire(&counters));
        assert_eq!(counters.acquired.get(), 1);

        tk.pause();
        slot.sync(tk.is_running(), acquire(&counters));
        assert!(!slot.is_armed());
        assert_eq!(counters.released.get(), 1);

        tk.start(100);
        slot.sync(tk.is_running(), acquire(&counters));
        tk.reset();
        slot.sync(tk.is_running(), acquire(&counters));
        assert!(!slot.is_armed());
        assert_eq!(counters.acquired.get(), 2);
        assert_eq!(counters.released.get(), 2);
    }

    #[test]
    fn teardown_releases_running_handle() {
        let counters = Rc::new(Counters::default());
        {
            let mut slot = TickSlot::default();
            slot.sync(true, acquire(&counters));
        }
        assert_eq!(counters.acquired.get(), 1);
        assert_eq!(counters.released.get(), 1);

        let mut slot = TickSlot::default();
        slot.sync(true, acquire(&counters));
        slot.release();
        assert!(!slot.is_armed());
        assert_eq!(counters.released.get(), 2);
    }

    #[test]
    fn idle_never_acquires() {
        let counters = Rc::new(Counters::default());
        let mut slot: TickSlot<Handle> = TickSlot::default();
        slot.sync(false, acquire(&counters));
        slot.release();
        assert_eq!(counters.acquired.get(), 0);
        assert_eq!(counters.released.get(), 0);
    }
}
