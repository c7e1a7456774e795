/// Default quiescence delay before a scrolling viewport is considered idle.
pub const DEFAULT_SCROLLING_RESET_DELAY_MS: u64 = 150;

/// Whether the viewport is actively scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    Scrolling,
}

/// Identifies one arming of the quiescence timer.
///
/// Every scroll event re-arms the timer under a fresh token; only the most recent token can
/// bring the machine back to [`ScrollPhase::Idle`]. Hosts that schedule a real delayed callback
/// hand the token back through [`ScrollStateMachine::on_timer_fired`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ArmedTimer {
    token: TimerToken,
    deadline_ms: u64,
}

/// Tracks `Idle`/`Scrolling` from host-reported scroll events and time.
///
/// The machine never reads a clock. Time arrives as `now_ms` on every call, and the timer is
/// either polled via [`Self::tick`] or fired by the host via [`Self::on_timer_fired`]. After
/// [`Self::dispose`] the timer is gone for good and no input changes the phase.
#[derive(Clone, Debug)]
pub struct ScrollStateMachine {
    phase: ScrollPhase,
    delay_ms: u64,
    armed: Option<ArmedTimer>,
    generation: u64,
    disposed: bool,
}

impl Default for ScrollStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLLING_RESET_DELAY_MS)
    }
}

impl ScrollStateMachine {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            phase: ScrollPhase::Idle,
            delay_ms,
            armed: None,
            generation: 0,
            disposed: false,
        }
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_scrolling(&self) -> bool {
        self.phase == ScrollPhase::Scrolling
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Changes the quiescence delay. An armed timer keeps its original deadline.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// The token of the currently armed timer, if any.
    pub fn armed_token(&self) -> Option<TimerToken> {
        self.armed.map(|t| t.token)
    }

    /// When the armed timer elapses, if one is armed.
    pub fn deadline_ms(&self) -> Option<u64> {
        self.armed.map(|t| t.deadline_ms)
    }

    /// Records a scroll event and (re-)arms the quiescence timer.
    ///
    /// Returns the new token, or `None` once disposed. The previous token, if any, is
    /// cancelled.
    pub fn on_scroll_event(&mut self, now_ms: u64) -> Option<TimerToken> {
        if self.disposed {
            vdebug!(now_ms, "scroll event after dispose ignored");
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        let token = TimerToken(self.generation);
        self.armed = Some(ArmedTimer {
            token,
            deadline_ms: now_ms.saturating_add(self.delay_ms),
        });
        self.phase = ScrollPhase::Scrolling;
        Some(token)
    }

    /// Delivers a host-scheduled timer callback.
    ///
    /// Returns `true` if this settled the machine to `Idle`. Stale tokens, early deliveries and
    /// deliveries after dispose are ignored.
    pub fn on_timer_fired(&mut self, token: TimerToken, now_ms: u64) -> bool {
        let Some(armed) = self.armed else {
            return false;
        };
        if self.disposed || armed.token != token {
            vdebug!(token = token.get(), "stale quiescence timer ignored");
            return false;
        }
        if now_ms < armed.deadline_ms {
            return false;
        }
        self.settle();
        true
    }

    /// Polls the armed timer. Returns `true` if this settled the machine to `Idle`.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.armed {
            Some(armed) if !self.disposed && now_ms >= armed.deadline_ms => {
                self.settle();
                true
            }
            _ => false,
        }
    }

    /// Settles immediately, for hosts that get a native scroll-end signal.
    ///
    /// Returns `true` if the machine was scrolling.
    pub fn on_scroll_end(&mut self) -> bool {
        if self.disposed || self.phase == ScrollPhase::Idle {
            return false;
        }
        self.settle();
        true
    }

    /// Cancels the timer permanently. Returns the token that was armed, if any.
    pub fn dispose(&mut self) -> Option<TimerToken> {
        self.disposed = true;
        self.phase = ScrollPhase::Idle;
        self.armed.take().map(|t| t.token)
    }

    fn settle(&mut self) {
        self.armed = None;
        self.phase = ScrollPhase::Idle;
    }
}
