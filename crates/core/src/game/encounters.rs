//! What happens when the player steps into a cell: plain moves, pickups, fights and the exit.

use log::{debug, info};

use super::*;
use crate::combat::{self, CombatOutcome, Exchange};
use crate::state::Entity;
use crate::types::{EntityId, EntityKind, RunOutcome};

impl Game {
    pub(super) fn resolve_move(
        &mut self,
        direction: Direction,
    ) -> Result<MoveOutcome, SessionError> {
        let Some(from) = self.state.player().and_then(|player| player.pos) else {
            return Ok(MoveOutcome::Blocked);
        };
        let to = from.step(direction);
        if !self.state.grid().is_floor(to) {
            return Ok(MoveOutcome::Blocked);
        }

        let step = Transition::MoveEntity { id: EntityId::player(), delta: direction.delta() };
        let Some((id, entity)) =
            self.state.entity_at(to).map(|(id, entity)| (id.clone(), entity.clone()))
        else {
            self.commit(step)?;
            return Ok(MoveOutcome::Moved);
        };

        match entity.kind {
            EntityKind::Weapon => {
                self.commit(Transition::SwitchWeapon {
                    weapon: id.as_str().to_string(),
                    attack_bonus: entity.attack,
                })?;
                self.commit(Transition::RemoveEntity { id: id.clone() })?;
                self.commit(step)?;
                self.log.push(LogEvent::WeaponUnlocked { name: id.clone() });
                Ok(MoveOutcome::PickedUpWeapon { name: id, attack_bonus: entity.attack })
            }
            EntityKind::Health => {
                let amount = entity.health;
                self.commit(Transition::AddHealth { id: EntityId::player(), amount })?;
                self.commit(Transition::RemoveEntity { id })?;
                self.commit(step)?;
                self.log.push(LogEvent::HealthAdded { amount });
                Ok(MoveOutcome::Healed { amount })
            }
            EntityKind::Enemy | EntityKind::Boss => self.fight(id, &entity),
            EntityKind::Exit => self.descend(),
            EntityKind::Player => Ok(MoveOutcome::Blocked),
        }
    }

    fn fight(&mut self, enemy_id: EntityId, enemy: &Entity) -> Result<MoveOutcome, SessionError> {
        let player_id = EntityId::player();
        let Some(player) = self.state.player().cloned() else {
            return Err(TransitionError::UnknownEntity(player_id).into());
        };
        let range = self.config.rules.damage_range;
        let exchange = combat::resolve(&player, enemy, range, &mut self.rng);
        debug!(
            "{enemy_id} fight: player deals {}, takes {}",
            exchange.attacker_damage_dealt, exchange.defender_damage_dealt
        );

        match combat::evaluate(&player, enemy, exchange) {
            CombatOutcome::AttackerDefeated(_) => {
                info!("player killed by {enemy_id} on level {}", self.state.level());
                self.log.push(LogEvent::PlayerKilled);
                self.restart()?;
                Ok(MoveOutcome::Finished(RunOutcome::Defeat))
            }
            CombatOutcome::Exchange(Exchange { attacker_damage_dealt, defender_damage_dealt }) => {
                self.commit(Transition::DealDamage {
                    id: enemy_id.clone(),
                    amount: attacker_damage_dealt,
                })?;
                self.commit(Transition::DealDamage {
                    id: player_id,
                    amount: defender_damage_dealt,
                })?;
                let health = self.state.entity(&enemy_id).map_or(0, |enemy| enemy.health);
                self.log.push(LogEvent::DamageReceived { amount: defender_damage_dealt });
                self.log.push(LogEvent::EnemyHealthRemaining { enemy: enemy_id, health });
                Ok(MoveOutcome::Fought {
                    dealt: attacker_damage_dealt,
                    received: defender_damage_dealt,
                })
            }
            CombatOutcome::DefenderDefeated(_) if enemy.kind == EntityKind::Boss => {
                info!("boss defeated on level {}", self.state.level());
                self.log.push(LogEvent::BossDefeated);
                self.restart()?;
                Ok(MoveOutcome::Finished(RunOutcome::Victory))
            }
            CombatOutcome::DefenderDefeated(_) => {
                let xp = self.config.rules.enemy_xp(self.state.level());
                self.commit(Transition::AddXp { amount: xp })?;
                self.commit(Transition::RemoveEntity { id: enemy_id.clone() })?;
                self.log.push(LogEvent::EnemyDefeated { enemy: enemy_id.clone(), xp });
                self.level_up_if_due()?;
                Ok(MoveOutcome::EnemyDefeated { enemy: enemy_id, xp })
            }
        }
    }

    /// Crossing the xp threshold grants one level, scaled by the level being reached.
    fn level_up_if_due(&mut self) -> Result<(), SessionError> {
        let Some(progress) = self.state.player_progress() else {
            return Ok(());
        };
        if progress.xp_to_next > 0 {
            return Ok(());
        }
        let (attack_gain, health_gain, xp_to_next) =
            self.config.rules.level_up_gains(progress.level);
        let reached = progress.level + 1;
        self.commit(Transition::LevelUpPlayer { attack_gain, health_gain, xp_to_next })?;
        info!("player reached level {reached}");
        self.log.push(LogEvent::LeveledUp { level: reached });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;
    use crate::types::Pos;

    fn arena(extra: &[Transition]) -> Game {
        game_with_state(apply_all(&player_in_open_room(Pos::new(2, 2)), extra))
    }

    #[test]
    fn walls_block_without_any_transition() {
        let mut game = game_with_state(player_in_open_room(Pos::new(1, 1)));
        assert_eq!(game.move_player(Direction::North), Ok(MoveOutcome::Blocked));
        assert_eq!(game.transitions_applied(), 0);
    }

    #[test]
    fn empty_floor_just_moves() {
        let mut game = arena(&[]);
        assert_eq!(game.move_player(Direction::South), Ok(MoveOutcome::Moved));
        assert_eq!(game.state().player().and_then(|p| p.pos), Some(Pos::new(2, 3)));
    }

    #[test]
    fn weapon_pickup_stacks_attack_and_frees_the_cell() {
        let mut game = arena(&[spawn_at("Staff", EntityKind::Weapon, 0, 5, Pos::new(3, 2))]);
        assert_eq!(
            game.move_player(Direction::East),
            Ok(MoveOutcome::PickedUpWeapon { name: "Staff".into(), attack_bonus: 5 })
        );
        let state = game.state();
        assert_eq!(state.player().map(|p| (p.attack, p.pos)), Some((15, Some(Pos::new(3, 2)))));
        assert_eq!(state.player_progress().map(|p| p.weapon.as_str()), Some("Staff"));
        assert!(state.entity(&"Staff".into()).is_none());
        assert_eq!(game.log(), &[LogEvent::WeaponUnlocked { name: "Staff".into() }]);
    }

    #[test]
    fn health_pickup_heals_the_player() {
        let mut game = arena(&[spawn_at("health0", EntityKind::Health, 40, 0, Pos::new(2, 1))]);
        assert_eq!(game.move_player(Direction::North), Ok(MoveOutcome::Healed { amount: 40 }));
        assert_eq!(game.state().player().map(|p| p.health), Some(140));
        assert_eq!(game.state().check_invariants(), Ok(()));
    }

    #[test]
    fn sturdy_enemy_exchanges_blows_and_stays() {
        let mut game = arena(&[
            Transition::SwitchWeapon { weapon: "Hammer".into(), attack_bonus: 10 },
            spawn_at("e1", EntityKind::Enemy, 30, 15, Pos::new(3, 2)),
        ]);
        let outcome = game.move_player(Direction::East).expect("fight");
        let MoveOutcome::Fought { dealt, received } = outcome else {
            panic!("expected an exchange, got {outcome:?}");
        };
        assert!((15..20).contains(&dealt));
        assert!((10..15).contains(&received));

        let state = game.state();
        assert_eq!(state.entity(&"e1".into()).map(|e| e.health), Some(30 - dealt));
        assert_eq!(state.player().map(|p| p.health), Some(100 - received));
        assert_eq!(state.player().and_then(|p| p.pos), Some(Pos::new(2, 2)));
    }

    #[test]
    fn defeated_enemy_awards_level_scaled_xp() {
        let mut game = arena(&[spawn_at("e1", EntityKind::Enemy, 1, 15, Pos::new(3, 2))]);
        assert_eq!(
            game.move_player(Direction::East),
            Ok(MoveOutcome::EnemyDefeated { enemy: "e1".into(), xp: 20 })
        );
        let state = game.state();
        assert!(state.entity(&"e1".into()).is_none());
        assert_eq!(state.player_progress().map(|p| (p.xp, p.xp_to_next)), Some((20, 40)));
        assert_eq!(state.player().and_then(|p| p.pos), Some(Pos::new(2, 2)));
    }

    #[test]
    fn crossing_the_threshold_levels_up_once() {
        let mut game = arena(&[
            Transition::AddXp { amount: 50 },
            spawn_at("e1", EntityKind::Enemy, 1, 15, Pos::new(3, 2)),
        ]);
        game.move_player(Direction::East).expect("fight");

        let state = game.state();
        let progress = state.player_progress().expect("progress");
        assert_eq!(progress.level, 2);
        assert_eq!(progress.xp_to_next, 180);
        assert_eq!(state.player().map(|p| (p.attack, p.health)), Some((30, 110)));
        assert!(game.log().contains(&LogEvent::LeveledUp { level: 2 }));
    }

    #[test]
    fn lethal_counter_restarts_the_run() {
        let mut game = arena(&[
            Transition::DealDamage { id: EntityId::player(), amount: 95 },
            spawn_at("e1", EntityKind::Enemy, 100, 15, Pos::new(3, 2)),
        ]);
        assert_eq!(
            game.move_player(Direction::East),
            Ok(MoveOutcome::Finished(RunOutcome::Defeat))
        );
        let state = game.state();
        assert_eq!(state.player().map(|p| p.health), Some(100));
        assert_eq!(state.level(), 1);
        assert_eq!(state.entities().len(), 17);
        assert_eq!(state.check_invariants(), Ok(()));
        assert!(game.log().contains(&LogEvent::PlayerKilled));
    }

    #[test]
    fn slaying_the_boss_wins_and_restarts() {
        let mut game =
            arena(&[Transition::AddBoss { attack: 125, health: 1, pos: Pos::new(3, 1) }]);
        assert_eq!(
            game.move_player(Direction::East),
            Ok(MoveOutcome::Finished(RunOutcome::Victory))
        );
        assert!(game.log().contains(&LogEvent::BossDefeated));
        assert_eq!(game.state().level(), 1);
        assert!(game.state().entity(&EntityId::boss()).is_none());
    }

    #[test]
    fn exit_descends_to_a_freshly_populated_level() {
        let mut game = arena(&[spawn_at("exit", EntityKind::Exit, 0, 0, Pos::new(3, 2))]);
        assert_eq!(game.move_player(Direction::East), Ok(MoveOutcome::Descended { level: 2 }));
        let state = game.state();
        assert_eq!(state.level(), 2);
        assert_eq!(state.grid().width(), 100);
        assert_eq!(state.entities().len(), 17);
        assert_eq!(state.entity(&"Hammer".into()).map(|e| e.attack), Some(10));
        assert_eq!(state.entity(&"enemy0".into()).map(|e| e.health), Some(45));
        assert_eq!(state.check_invariants(), Ok(()));
        assert!(game.log().contains(&LogEvent::NextLevel { level: 2 }));
    }
}
