use std::time::{Duration, Instant};

/// Measures how long a round has been played, excluding time spent paused.
///
/// All methods take the current time as an argument.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Stopwatch {
    /// Time accumulated before the current running stretch
    banked: Duration,
    state: StopwatchState,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum StopwatchState {
    #[default]
    Unstarted,
    Running {
        since: Instant,
    },
    Paused,
}

impl Stopwatch {
    pub(crate) fn new() -> Stopwatch {
        Stopwatch::default()
    }

    pub(crate) fn start(&mut self, now: Instant) {
        if self.state == StopwatchState::Unstarted {
            self.state = StopwatchState::Running { since: now };
        } else {
            tracing::warn!("Stopwatch started twice");
        }
    }

    /// Reset the elapsed time to zero and start running again
    pub(crate) fn restart(&mut self, now: Instant) {
        if self.state == StopwatchState::Unstarted {
            tracing::warn!("Restarting a stopwatch that was never started");
        }
        self.banked = Duration::ZERO;
        self.state = StopwatchState::Running { since: now };
    }

    pub(crate) fn pause(&mut self, now: Instant) {
        match self.state {
            StopwatchState::Running { since } => {
                self.banked += now.saturating_duration_since(since);
                self.state = StopwatchState::Paused;
            }
            StopwatchState::Unstarted => tracing::warn!("Cannot pause: stopwatch not started"),
            StopwatchState::Paused => tracing::warn!("Cannot pause: stopwatch already paused"),
        }
    }

    pub(crate) fn resume(&mut self, now: Instant) {
        match self.state {
            StopwatchState::Paused => self.state = StopwatchState::Running { since: now },
            StopwatchState::Unstarted => tracing::warn!("Cannot resume: stopwatch not started"),
            StopwatchState::Running { .. } => {
                tracing::warn!("Cannot resume: stopwatch not paused");
            }
        }
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.state == StopwatchState::Paused
    }

    pub(crate) fn is_running(&self) -> bool {
        matches!(self.state, StopwatchState::Running { .. })
    }

    pub(crate) fn elapsed(&self, now: Instant) -> Duration {
        match self.state {
            StopwatchState::Running { since } => self.banked + now.saturating_duration_since(since),
            StopwatchState::Unstarted | StopwatchState::Paused => self.banked,
        }
    }
}
