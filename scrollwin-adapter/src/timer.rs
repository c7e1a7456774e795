use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use scrollwin::TimerToken;

/// A host's delayed-callback primitive, used for the scroll quiescence timer.
///
/// [`crate::VirtualList`] schedules at most one timer at a time and always cancels the
/// previous one before scheduling the next, on dispose, and on drop. When a scheduled timer
/// elapses, the host delivers its token back through [`crate::VirtualList::on_timer_fired`].
pub trait TimerDriver {
    /// Schedules a one-shot timer due at `deadline_ms`.
    fn schedule(&mut self, token: TimerToken, deadline_ms: u64);

    /// Cancels a timer. Unknown or already fired tokens must be ignored.
    fn cancel(&mut self, token: TimerToken);
}

impl<D: TimerDriver + ?Sized> TimerDriver for Rc<RefCell<D>> {
    fn schedule(&mut self, token: TimerToken, deadline_ms: u64) {
        self.borrow_mut().schedule(token, deadline_ms);
    }

    fn cancel(&mut self, token: TimerToken) {
        self.borrow_mut().cancel(token);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingTimer {
    pub token: TimerToken,
    pub deadline_ms: u64,
}

/// A deterministic, frame-driven timer queue.
///
/// Useful for hosts that run their own loop (TUIs, game-style UIs) and for tests: share it as
/// `Rc<RefCell<ManualTimers>>`, hand one clone to the list and drain due tokens from the
/// other each frame.
#[derive(Clone, Debug, Default)]
pub struct ManualTimers {
    pending: Vec<PendingTimer>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn pending(&self) -> &[PendingTimer] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.pending.iter().map(|t| t.deadline_ms).min()
    }

    /// Removes and returns every timer due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<TimerToken> {
        let mut due: Vec<PendingTimer> = Vec::new();
        self.pending.retain(|t| {
            if t.deadline_ms <= now_ms {
                due.push(*t);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|t| (t.deadline_ms, t.token));
        due.into_iter().map(|t| t.token).collect()
    }
}

impl TimerDriver for ManualTimers {
    fn schedule(&mut self, token: TimerToken, deadline_ms: u64) {
        self.pending.push(PendingTimer { token, deadline_ms });
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|t| t.token != token);
    }
}
