//! Page state: a small state machine plus the async driver that feeds it.
use serde::Serialize;

use crate::params::Prerequisites;

pub use driver::{Loader, ViewDriver, ViewHandle};
mod driver;

/// What a page renders. Exactly one variant describes the latest fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "camelCase")]
pub enum ViewState<T> {
    Idle,
    Loading,
    Error(String),
    Success(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Monotonic id of a fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cycle(u64);

/// Holds the current [`ViewState`] and the latest cycle.
///
/// Every transition starts a new cycle, so results that arrive for an older cycle are
/// ignored by [`View::settle`].
#[derive(Debug)]
pub struct View<T> {
    state: ViewState<T>,
    latest: Cycle,
}

impl<T> Default for View<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> View<T> {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle,
            latest: Cycle(0),
        }
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn latest(&self) -> Cycle {
        self.latest
    }

    fn next_cycle(&mut self, state: ViewState<T>) -> Cycle {
        self.latest = Cycle(self.latest.0 + 1);
        self.state = state;
        self.latest
    }

    /// Enter `Loading` for a new cycle.
    pub fn begin(&mut self) -> Cycle {
        self.next_cycle(ViewState::Loading)
    }

    /// Apply a fetch result. Returns `false` and leaves the state untouched when `cycle`
    /// has been superseded.
    pub fn settle(&mut self, cycle: Cycle, outcome: Result<T, String>) -> bool {
        if cycle != self.latest {
            return false;
        }
        self.state = match outcome {
            Ok(data) => ViewState::Success(data),
            Err(message) => ViewState::Error(message),
        };
        true
    }

    /// React to new prerequisites. Returns the cycle and parameters to fetch with, if any.
    pub fn apply<P>(&mut self, prerequisites: Prerequisites<P>) -> Option<(Cycle, P)> {
        match prerequisites {
            Prerequisites::Pending => {
                self.next_cycle(ViewState::Idle);
                None
            }
            Prerequisites::Invalid(message) => {
                self.next_cycle(ViewState::Error(message.to_string()));
                None
            }
            Prerequisites::Ready(params) => Some((self.begin(), params)),
        }
    }
}
