//! Trace player: transport controls over a [`StepTrace`]
//!
//! The player owns a trace and an explicit [`PlayerState`]. All transport
//! operations are synchronous and never fail; moving past either end of the
//! trace is a no-op that reports `false`.
//!
//! # Output log
//!
//! The output pane shows a forward-accumulating log, not a per-step field.
//! Stepping forward appends the entered step's output. Stepping backward
//! rebuilds the log from step 0, since a step's output may have been derived
//! from resolved inputs and cannot be safely "un-appended".
//!
//! # Auto-play
//!
//! Playback is driven by a [`Ticker`] that the UI event loop polls through
//! [`TracePlayer::tick`]. Time is passed in explicitly so playback can be
//! tested without sleeping.

pub mod error;
pub mod ticker;

pub use error::PlayerError;
pub use ticker::Ticker;

use crate::trace::{ExecutionStep, StepTrace, VariableSnapshot};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default delay between auto-play steps
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Mutable playback state, separate from the trace it indexes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    /// Always a valid index into the player's trace
    pub current_index: usize,
    pub is_playing: bool,
    pub tick_interval_ms: u64,
    pub accumulated_outputs: Vec<String>,
}

/// What the UI renders for the current position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceView<'a> {
    pub index: usize,
    pub total: usize,
    pub step: &'a ExecutionStep,
    pub outputs: &'a [String],
}

impl<'a> TraceView<'a> {
    pub fn variables(&self) -> &'a [VariableSnapshot] {
        &self.step.variables
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.index + 1 >= self.total
    }
}

/// Result of polling the playback timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, or the next tick is not due yet
    Idle,
    /// Advanced one step
    Advanced,
    /// The tick found the last step and stopped playback
    Finished,
}

#[derive(Debug, Clone)]
pub struct TracePlayer {
    trace: StepTrace,
    state: PlayerState,
    ticker: Ticker,
}

impl TracePlayer {
    /// Create a paused player positioned at step 0
    pub fn new(trace: StepTrace, tick_interval_ms: u64) -> Result<Self, PlayerError> {
        if trace.is_empty() {
            return Err(PlayerError::EmptyTrace);
        }
        if tick_interval_ms == 0 {
            return Err(PlayerError::InvalidSpeed(tick_interval_ms));
        }

        let state = PlayerState {
            current_index: 0,
            is_playing: false,
            tick_interval_ms,
            accumulated_outputs: trace.outputs_through(0),
        };

        Ok(TracePlayer {
            trace,
            state,
            ticker: Ticker::new(Duration::from_millis(tick_interval_ms)),
        })
    }

    pub fn trace(&self) -> &StepTrace {
        &self.trace
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn total_steps(&self) -> usize {
        self.trace.len()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.state.tick_interval_ms
    }

    pub fn outputs(&self) -> &[String] {
        &self.state.accumulated_outputs
    }

    /// The step at the current index
    pub fn current_step(&self) -> &ExecutionStep {
        // current_index is kept in 0..len and the trace is never empty
        &self.trace.steps()[self.state.current_index]
    }

    /// Project the current state onto the trace
    pub fn current_view(&self) -> TraceView<'_> {
        TraceView {
            index: self.state.current_index,
            total: self.trace.len(),
            step: self.current_step(),
            outputs: &self.state.accumulated_outputs,
        }
    }

    /// Advance one step. Returns false at the last step.
    pub fn step_forward(&mut self) -> bool {
        let next = self.state.current_index + 1;
        let Some(step) = self.trace.step_at(next) else {
            return false;
        };

        if let Some(output) = &step.output {
            self.state.accumulated_outputs.push(output.clone());
        }
        self.state.current_index = next;
        debug!(index = next, line = step.line_number, "step forward");
        true
    }

    /// Go back one step and rebuild the output log. Returns false at step 0.
    pub fn step_backward(&mut self) -> bool {
        if self.state.current_index == 0 {
            return false;
        }

        self.state.current_index -= 1;
        self.state.accumulated_outputs = self.trace.outputs_through(self.state.current_index);
        debug!(index = self.state.current_index, "step backward");
        true
    }

    /// Stop playback and return to step 0
    pub fn reset(&mut self) {
        self.stop();
        self.state.current_index = 0;
        self.state.accumulated_outputs = self.trace.outputs_through(0);
        debug!("reset");
    }

    /// Step forward until the last step; returns how many steps were taken
    pub fn jump_to_end(&mut self) -> usize {
        self.stop();
        let mut stepped = 0;
        while self.step_forward() {
            stepped += 1;
        }
        stepped
    }

    /// Start or stop auto-play. Does not move the current index.
    pub fn set_playing(&mut self, playing: bool, now: Instant) {
        if playing == self.state.is_playing {
            return;
        }

        if playing {
            self.state.is_playing = true;
            self.ticker.arm(now);
            info!(
                index = self.state.current_index,
                interval_ms = self.state.tick_interval_ms,
                "playback started"
            );
        } else {
            self.stop();
            info!(index = self.state.current_index, "playback paused");
        }
    }

    pub fn toggle_playing(&mut self, now: Instant) {
        self.set_playing(!self.state.is_playing, now);
    }

    /// Change the auto-play interval.
    ///
    /// While playing, the pending tick is cancelled and the next one is
    /// scheduled `ms` after `now`.
    pub fn set_speed(&mut self, ms: u64, now: Instant) -> Result<(), PlayerError> {
        if ms == 0 {
            return Err(PlayerError::InvalidSpeed(ms));
        }

        self.state.tick_interval_ms = ms;
        self.ticker.set_interval(Duration::from_millis(ms), now);
        debug!(interval_ms = ms, "speed changed");
        Ok(())
    }

    /// Poll the playback timer
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if !self.state.is_playing || !self.ticker.poll(now) {
            return TickOutcome::Idle;
        }

        if self.step_forward() {
            TickOutcome::Advanced
        } else {
            self.stop();
            info!(index = self.state.current_index, "playback complete");
            TickOutcome::Finished
        }
    }

    /// Deadline of the next auto-play tick, if one is pending
    pub fn next_tick_due(&self) -> Option<Instant> {
        self.ticker.next_due()
    }

    fn stop(&mut self) {
        self.state.is_playing = false;
        self.ticker.disarm();
    }
}
