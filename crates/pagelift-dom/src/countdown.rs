#![forbid(unsafe_code)]

//! Countdown collaborator contract.
//!
//! The per-second decrement of the displayed remaining time is owned by an
//! external collaborator (on the original pages, markup rendered by the
//! server plus whatever script updates it). The quiz controller never
//! decrements anything itself; once per second the host samples this source
//! and forwards the value as a timer tick.

/// Source of the currently displayed remaining-time value, in seconds.
pub trait CountdownSource {
    /// Sample the displayed value.
    ///
    /// `None` means the display is absent or unreadable right now; the host
    /// skips the tick rather than forwarding a guess.
    fn time_left(&self) -> Option<i64>;
}

/// Scripted countdown for tests: replays a fixed sequence of samples.
#[derive(Debug, Default)]
pub struct ScriptedCountdown {
    samples: std::cell::RefCell<std::collections::VecDeque<Option<i64>>>,
}

impl ScriptedCountdown {
    #[must_use]
    pub fn new(samples: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self {
            samples: std::cell::RefCell::new(samples.into_iter().collect()),
        }
    }
}

impl CountdownSource for ScriptedCountdown {
    fn time_left(&self) -> Option<i64> {
        self.samples.borrow_mut().pop_front().flatten()
    }
}
