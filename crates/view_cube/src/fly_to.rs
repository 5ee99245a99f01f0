//! Animated camera re-orientation.
//!
//! Every request bumps a generation counter and replaces the in-flight state, so
//! the newest request always wins. Frame callbacks carry the [`FlyTicket`] they
//! were scheduled with and do nothing once their generation is stale.

use std::time::{Duration, Instant};

use glam::Quat;
use settings::Easing;
use tracing::{debug, trace};

use crate::camera::unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlyTicket {
    generation: u64,
}

impl FlyTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlyPhase {
    Idle,
    Animating,
    /// Duration elapsed but the final frame has not been emitted yet
    Completing,
}

/// One emitted orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyFrame {
    pub orientation: Quat,
    /// Linear progress in `[0, 1]` before easing
    pub progress: f32,
    pub generation: u64,
    pub finished: bool,
}

/// Outcome of a fly-to request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlyStart {
    Scheduled(FlyTicket),
    /// Zero-duration requests finish on the spot with this single frame.
    Resolved(FlyFrame),
}

impl FlyStart {
    pub fn generation(&self) -> u64 {
        match self {
            FlyStart::Scheduled(ticket) => ticket.generation,
            FlyStart::Resolved(frame) => frame.generation,
        }
    }
}

#[derive(Debug, Clone)]
struct FlyState {
    start: Quat,
    target: Quat,
    started_at: Instant,
    duration: Duration,
    generation: u64,
}

impl FlyState {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Default)]
pub struct FlyToController {
    state: Option<FlyState>,
    generation: u64,
    easing: Easing,
}

impl FlyToController {
    pub fn new(easing: Easing) -> Self {
        Self {
            state: None,
            generation: 0,
            easing,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticket of the animation in flight, if any.
    pub fn ticket(&self) -> Option<FlyTicket> {
        self.state.as_ref().map(|state| FlyTicket {
            generation: state.generation,
        })
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn target(&self) -> Option<Quat> {
        self.state.as_ref().map(|state| state.target)
    }

    pub fn phase(&self, now: Instant) -> FlyPhase {
        match &self.state {
            None => FlyPhase::Idle,
            Some(state) if state.progress(now) < 1.0 => FlyPhase::Animating,
            Some(_) => FlyPhase::Completing,
        }
    }

    /// Start flying from `from` to `target`, dropping whatever was in flight.
    pub fn request_fly_to(
        &mut self,
        from: Quat,
        target: Quat,
        duration: Duration,
        now: Instant,
    ) -> FlyStart {
        self.generation += 1;
        let generation = self.generation;
        if let Some(previous) = self.state.take() {
            debug!(
                "fly-to {} superseded by {}",
                previous.generation, generation
            );
        }

        let target = unit(target);
        if duration.is_zero() {
            debug!("fly-to {generation} resolved immediately");
            return FlyStart::Resolved(FlyFrame {
                orientation: target,
                progress: 1.0,
                generation,
                finished: true,
            });
        }

        debug!("fly-to {generation} started ({} ms)", duration.as_millis());
        self.state = Some(FlyState {
            start: unit(from),
            target,
            started_at: now,
            duration,
            generation,
        });
        FlyStart::Scheduled(FlyTicket { generation })
    }

    /// Drop the animation in flight without emitting anything.
    ///
    /// Returns the generation that was cancelled.
    pub fn cancel(&mut self) -> Option<u64> {
        let state = self.state.take()?;
        debug!("fly-to {} cancelled", state.generation);
        Some(state.generation)
    }

    /// Advance the animation a callback was scheduled for.
    pub fn advance(&mut self, ticket: FlyTicket, now: Instant) -> Option<FlyFrame> {
        let state = self.state.as_ref()?;
        if ticket.generation != state.generation {
            trace!(
                "ignoring stale fly-to frame {} (current {})",
                ticket.generation,
                state.generation
            );
            return None;
        }

        let progress = state.progress(now);
        if progress >= 1.0 {
            let frame = FlyFrame {
                orientation: state.target,
                progress: 1.0,
                generation: state.generation,
                finished: true,
            };
            self.state = None;
            debug!("fly-to {} finished", frame.generation);
            return Some(frame);
        }

        let eased = self.easing.apply(progress);
        Some(FlyFrame {
            orientation: state.start.slerp(state.target, eased).normalize(),
            progress,
            generation: state.generation,
            finished: false,
        })
    }

    /// Advance whatever is currently in flight.
    pub fn tick(&mut self, now: Instant) -> Option<FlyFrame> {
        let ticket = self.ticket()?;
        self.advance(ticket, now)
    }
}
