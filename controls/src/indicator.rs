//! Transient "gesture active" indicator.
//!
//! The indicator is shown at the start of every recognized gesture and hidden
//! by a deferred timeout. The timeout itself lives in the host (a forgotten
//! `gloo_timers` callback in the browser); this module decides whether a
//! given expiry should actually hide the indicator.

#[cfg(test)]
#[path = "indicator_test.rs"]
mod indicator_test;

use serde::Deserialize;

/// How overlapping indicator timeouts interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HidePolicy {
    /// Every expiry hides the indicator, even if a newer gesture re-showed it.
    /// A gesture started shortly before an older timeout fires loses its
    /// indicator early.
    #[default]
    FireAndForget,
    /// Only the expiry belonging to the most recent `show` hides it.
    CancelOnRestart,
}

/// Handle for one scheduled hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct Indicator {
    policy: HidePolicy,
    visible: bool,
    generation: u64,
}

impl Indicator {
    #[must_use]
    pub fn new(policy: HidePolicy) -> Self {
        Self { policy, visible: false, generation: 0 }
    }

    /// Show the indicator. The host must call [`Indicator::expire`] with the
    /// returned ticket once the display duration elapses.
    pub fn show(&mut self) -> HideTicket {
        self.generation += 1;
        self.visible = true;
        HideTicket(self.generation)
    }

    /// A scheduled hide fired. Returns `true` if the indicator was hidden.
    pub fn expire(&mut self, ticket: HideTicket) -> bool {
        let hide = match self.policy {
            HidePolicy::FireAndForget => true,
            HidePolicy::CancelOnRestart => ticket.0 == self.generation,
        };
        if hide {
            self.visible = false;
        }
        hide
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn policy(&self) -> HidePolicy {
        self.policy
    }
}
