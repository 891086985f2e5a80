//! Simulation playback state machine.
//!
//! Playback steps through program lines one per timer tick. The host owns
//! the timer and asks [`Playback::interval`] how often to call
//! [`Playback::advance`].

use std::time::Duration;

/// Default playback speed in percent
pub const DEFAULT_SPEED: u32 = 100;

/// Shortest tick interval in milliseconds
const MIN_INTERVAL_MS: u64 = 10;

/// Interval at speed 0, in milliseconds
const BASE_INTERVAL_MS: u64 = 200;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Running,
    Paused,
}

impl PlaybackState {
    /// Returns the name of the state.
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "Idle",
            PlaybackState::Running => "Running",
            PlaybackState::Paused => "Paused",
        }
    }
}

/// Result of one timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One more line was processed
    Progress { current: usize, total: usize },
    /// The end was reached and playback stopped
    Finished,
    /// Playback is not running; nothing happened
    Inactive,
}

/// Tick interval for a speed percentage: `max(10, 200 - speed)` ms
pub fn interval_for_speed(speed: u32) -> Duration {
    let ms = BASE_INTERVAL_MS
        .saturating_sub(u64::from(speed))
        .max(MIN_INTERVAL_MS);
    Duration::from_millis(ms)
}

/// Line-counting playback
#[derive(Debug, Clone)]
pub struct Playback {
    state: PlaybackState,
    current: usize,
    total: usize,
    interval: Duration,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            state: PlaybackState::Idle,
            current: 0,
            total: 0,
            interval: interval_for_speed(DEFAULT_SPEED),
        }
    }
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewind to the first line and set the number of lines to play.
    ///
    /// The run state is kept, so a running playback continues with the new
    /// program on the next tick.
    pub fn rewind(&mut self, total: usize) {
        self.current = 0;
        self.total = total;
    }

    /// Start or resume at `speed`.
    ///
    /// The interval is updated even when already running. Returns true if
    /// playback transitioned into [`PlaybackState::Running`].
    pub fn start(&mut self, speed: u32) -> bool {
        self.interval = interval_for_speed(speed);
        if self.state == PlaybackState::Running {
            return false;
        }
        self.state = PlaybackState::Running;
        true
    }

    /// Returns true if playback was running
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Running {
            return false;
        }
        self.state = PlaybackState::Paused;
        true
    }

    /// Halt and rewind to the first line
    pub fn stop(&mut self) {
        self.state = PlaybackState::Idle;
        self.current = 0;
    }

    /// Process one tick
    pub fn advance(&mut self) -> Step {
        if self.state != PlaybackState::Running {
            return Step::Inactive;
        }
        if self.current >= self.total {
            self.stop();
            return Step::Finished;
        }
        self.current += 1;
        Step::Progress {
            current: self.current,
            total: self.total,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Percentage of lines processed; an empty program counts as complete
    pub fn progress_percentage(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.current as f64 / self.total as f64 * 100.0
    }
}
