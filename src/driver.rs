//! The loop driver: owns the single live arena and decides when ticks run.
//!
//! A frontend feeds input events between ticks with [`Session::handle`] and
//! calls [`Session::step`] once per frame.  Once the arena reaches game over
//! `step` reports [`Flow::Stopped`] and stops ticking until a restart event
//! arrives, so the loop never needs a display-refresh callback.

use log::info;
use rand::Rng;

use crate::clock::Clock;
use crate::compute::{init_state, restart, shoot_bullet, start, tick};
use crate::config::ArenaConfig;
use crate::entities::{ArenaState, GameStatus, SoundCue};
use crate::input::{InputEvent, InputState};

/// Whether another tick should be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stopped,
}

pub struct Session<C: Clock, R: Rng> {
    state: ArenaState,
    input: InputState,
    clock: C,
    rng: R,
}

impl<C: Clock, R: Rng> Session<C, R> {
    /// Start a fresh arena: the first wave is spawned immediately.
    pub fn new(config: ArenaConfig, clock: C, rng: R) -> Self {
        Self::with_state(start(&init_state(config)), clock, rng)
    }

    /// Resume from an existing arena state.
    pub fn with_state(state: ArenaState, clock: C, rng: R) -> Self {
        Session {
            state,
            input: InputState::default(),
            clock,
            rng,
        }
    }

    pub fn state(&self) -> &ArenaState {
        &self.state
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    /// Whether the next frame should run a tick.
    pub fn flow(&self) -> Flow {
        if self.state.is_running() {
            Flow::Continue
        } else {
            Flow::Stopped
        }
    }

    /// Apply one input event.  Only called between ticks, so a tick always
    /// sees a consistent set of flags.
    pub fn handle(&mut self, event: InputEvent) -> Flow {
        self.input = self.input.apply(event);
        match event {
            InputEvent::Fire => {
                self.state = shoot_bullet(&self.state, self.clock.now_ms());
            }
            InputEvent::Restart if self.state.status == GameStatus::GameOver => {
                self.state = restart(&self.state);
                info!("session resumed");
            }
            _ => {}
        }
        self.flow()
    }

    /// Run one tick if the arena is live.  A stopped arena is left alone.
    pub fn step(&mut self) -> Flow {
        if self.flow() == Flow::Stopped {
            return Flow::Stopped;
        }
        self.state = tick(&self.state, &self.input, &mut self.rng);
        let flow = self.flow();
        if flow == Flow::Stopped {
            info!("loop stopped after frame {}", self.state.frame);
        }
        flow
    }

    /// Step until the arena stops or `max_ticks` have run.  Returns the
    /// number of ticks actually run.
    pub fn run_until_stopped(&mut self, max_ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < max_ticks && self.flow() == Flow::Continue {
            self.step();
            ran += 1;
        }
        ran
    }

    /// Drain the sound cues emitted since the last call.
    pub fn take_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.state.cues)
    }
}
