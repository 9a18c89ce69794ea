/// Identifies one arm request of the long-press timer.
///
/// The host hands the token back with the timeout so a callback scheduled
/// for an earlier gesture can be told apart from the live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u32);

impl TimerToken {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Single outstanding long-press timer owned by a session.
#[derive(Clone, Copy, Debug, Default)]
pub struct LongPressTimer {
    issued: u32,
    armed: Option<TimerToken>,
}

impl LongPressTimer {
    pub const fn new() -> Self {
        Self {
            issued: 0,
            armed: None,
        }
    }

    pub const fn armed(&self) -> Option<TimerToken> {
        self.armed
    }

    /// Arms a fresh token; any token still armed becomes stale.
    pub fn arm(&mut self) -> TimerToken {
        self.issued = self.issued.wrapping_add(1);
        let token = TimerToken(self.issued);
        self.armed = Some(token);
        token
    }

    /// Disarms the timer. Calling it with nothing armed is a no-op.
    pub fn cancel(&mut self) -> Option<TimerToken> {
        self.armed.take()
    }

    /// Consumes a timeout; only the currently armed token is accepted.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.armed == Some(token) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}
