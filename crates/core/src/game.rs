//! The session: one authoritative world snapshot plus the intents that advance it.
//!
//! `Game` is the only holder of the current [`WorldState`]. Every change it makes is a
//! [`Transition`] pushed through [`engine::apply`](crate::engine::apply); subscribers see each
//! committed transition exactly once, after the new snapshot is in place.

mod encounters;
mod floor_transition;
mod hash;

#[cfg(test)]
pub(crate) mod test_support;

use std::mem;

use log::trace;

use crate::config::GameConfig;
use crate::engine::{Transition, apply};
use crate::error::{SessionError, TransitionError};
use crate::journal::InputJournal;
use crate::rng::GameRng;
use crate::state::WorldState;
use crate::types::{Direction, Intent, LogEvent, MoveOutcome};

pub use hash::snapshot_hash;

/// Notified after every committed transition with the snapshot it produced.
pub trait Observer {
    fn on_transition(&mut self, state: &WorldState, transition: &Transition);
}

impl<F> Observer for F
where
    F: FnMut(&WorldState, &Transition),
{
    fn on_transition(&mut self, state: &WorldState, transition: &Transition) {
        self(state, transition);
    }
}

pub struct Game {
    config: GameConfig,
    seed: u64,
    rng: GameRng,
    state: WorldState,
    observers: Vec<Box<dyn Observer>>,
    log: Vec<LogEvent>,
    transitions_applied: u64,
    journal: InputJournal,
}

impl Game {
    /// Starts a run: validates `config`, then generates and populates the first level.
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let state = WorldState::initial(&config);
        let mut game = Self {
            config,
            seed,
            rng: GameRng::seed_from_u64(seed),
            state,
            observers: Vec::new(),
            log: Vec::new(),
            transitions_applied: 0,
            journal: InputJournal::new(seed),
        };
        game.restart()?;
        Ok(game)
    }

    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Hands pending notifications to the caller, leaving the log empty.
    pub fn drain_log(&mut self) -> Vec<LogEvent> {
        mem::take(&mut self.log)
    }

    pub fn journal(&self) -> &InputJournal {
        &self.journal
    }

    pub fn transitions_applied(&self) -> u64 {
        self.transitions_applied
    }

    pub fn snapshot_hash(&self) -> u64 {
        snapshot_hash(&self.state)
    }

    /// Dispatches a recorded intent. Movement reports what it turned into; the rest report `None`.
    pub fn apply_intent(&mut self, intent: &Intent) -> Result<Option<MoveOutcome>, SessionError> {
        match *intent {
            Intent::Move(direction) => self.move_player(direction).map(Some),
            Intent::NewGame => self.new_game().map(|()| None),
            Intent::ToggleDarkness => self.toggle_darkness().map(|()| None),
            Intent::Resize { width, height } => self.resize(width, height).map(|()| None),
        }
    }

    pub fn new_game(&mut self) -> Result<(), SessionError> {
        self.journal.append(Intent::NewGame);
        self.restart()
    }

    pub fn move_player(&mut self, direction: Direction) -> Result<MoveOutcome, SessionError> {
        self.journal.append(Intent::Move(direction));
        self.resolve_move(direction)
    }

    pub fn toggle_darkness(&mut self) -> Result<(), SessionError> {
        self.journal.append(Intent::ToggleDarkness);
        self.commit(Transition::ToggleDarkness)?;
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SessionError> {
        self.journal.append(Intent::Resize { width, height });
        self.commit(Transition::SetViewport { width, height })?;
        Ok(())
    }

    /// Applies one transition, publishes the result and notifies subscribers.
    fn commit(&mut self, transition: Transition) -> Result<(), TransitionError> {
        self.state = apply(&self.state, &transition)?;
        self.announce(&transition);
        Ok(())
    }

    /// Subscribers always see `self.state` as the snapshot `transition` produced.
    fn announce(&mut self, transition: &Transition) {
        trace!("applied {}", transition.name());
        self.transitions_applied += 1;
        for observer in &mut self.observers {
            observer.on_transition(&self.state, transition);
        }
    }
}
