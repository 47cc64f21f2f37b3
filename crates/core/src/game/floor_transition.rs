//! Level installation: fresh runs, descending through the exit and spawning a level's roster.
//! A level is staged on a private copy of the state and only published once it is complete.

use log::info;

use super::*;
use crate::mapgen::{self, find_empty_floor_block, find_empty_floor_cell, level_roster};
use crate::state::Viewport;
use crate::types::{EntityId, EntityKind};

/// A level being assembled off to the side. Each step keeps the snapshot it produced so the
/// session can replay them to subscribers once the whole level is in place.
struct Staged {
    state: WorldState,
    steps: Vec<(WorldState, Transition)>,
}

impl Staged {
    fn new(state: WorldState) -> Self {
        Self { state, steps: Vec::new() }
    }

    fn commit(&mut self, transition: Transition) -> Result<(), TransitionError> {
        let next = apply(&self.state, &transition)?;
        self.steps.push((next.clone(), transition));
        self.state = next;
        Ok(())
    }
}

impl Game {
    /// Throws the current run away: baseline player, level one, a new grid. The last known
    /// viewport survives the reset. On error the current run is left exactly as it was.
    pub(super) fn restart(&mut self) -> Result<(), SessionError> {
        let grid = mapgen::generate(&self.config.generation, &mut self.rng)?;
        let viewport = self.state.viewport();

        let mut staged = Staged::new(WorldState::initial(&self.config));
        staged.commit(Transition::ResetGrid { grid: grid.into() })?;
        self.populate_level(&mut staged)?;
        if viewport != staged.state.viewport() {
            let Viewport { width, height } = viewport;
            staged.commit(Transition::SetViewport { width, height })?;
        }
        self.publish(staged);
        info!("new run started with {} entities on level 1", self.state.entities().len());
        Ok(())
    }

    pub(super) fn descend(&mut self) -> Result<MoveOutcome, SessionError> {
        let grid = mapgen::generate(&self.config.generation, &mut self.rng)?;
        let mut staged = Staged::new(self.state.clone());
        staged.commit(Transition::ResetBoard)?;
        staged.commit(Transition::SetGrid { grid: grid.into() })?;
        staged.commit(Transition::NextLevel)?;
        self.populate_level(&mut staged)?;
        self.publish(staged);

        let level = self.state.level();
        info!("descended to level {level}");
        self.log.push(LogEvent::NextLevel { level });
        Ok(MoveOutcome::Descended { level })
    }

    /// Places the player on a free floor cell, then spawns the level's roster around them.
    fn populate_level(&mut self, staged: &mut Staged) -> Result<(), SessionError> {
        let samples = self.config.rules.max_free_cell_samples;
        let pos = find_empty_floor_cell(
            staged.state.grid(),
            staged.state.index(),
            &mut self.rng,
            samples,
        )?;
        staged.commit(Transition::SetLocation { id: EntityId::player(), pos })?;

        for spawn in level_roster(staged.state.level(), &self.config.rules) {
            let size = spawn.kind.footprint();
            let pos = find_empty_floor_block(
                staged.state.grid(),
                staged.state.index(),
                &mut self.rng,
                size,
                samples,
            )?;
            let transition = match spawn.kind {
                EntityKind::Boss => {
                    Transition::AddBoss { attack: spawn.attack, health: spawn.health, pos }
                }
                kind => Transition::SpawnEntity {
                    id: spawn.id,
                    kind,
                    health: spawn.health,
                    attack: spawn.attack,
                    pos,
                },
            };
            staged.commit(transition)?;
        }
        Ok(())
    }

    fn publish(&mut self, staged: Staged) {
        for (state, transition) in staged.steps {
            self.state = state;
            self.announce(&transition);
        }
    }
}
