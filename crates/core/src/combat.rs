//! Damage rolls and the outcome policy for one round of melee.
//! Rolls are pure functions of the attack values and the rng; nothing here touches world state.

use crate::rng::GameRng;
use crate::state::Entity;

/// Attack power jittered downwards by up to `range`: uniform over `attack - range..attack`.
pub fn delivered_damage(attack: i32, range: i32, rng: &mut GameRng) -> i32 {
    if range <= 0 {
        return attack;
    }
    attack.saturating_sub(range).saturating_add(rng.below(range as u32) as i32)
}

/// Damage each side would deal this round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exchange {
    pub attacker_damage_dealt: i32,
    pub defender_damage_dealt: i32,
}

/// Rolls the attacker first, then the defender's counter-hit.
pub fn resolve(attacker: &Entity, defender: &Entity, range: i32, rng: &mut GameRng) -> Exchange {
    let attacker_damage_dealt = delivered_damage(attacker.attack, range, rng);
    let defender_damage_dealt = delivered_damage(defender.attack, range, rng);
    Exchange { attacker_damage_dealt, defender_damage_dealt }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Both sides take their damage and the fight goes on next turn.
    Exchange(Exchange),
    /// The attacker's hit finishes the defender; no counter-hit lands.
    DefenderDefeated(Exchange),
    /// The counter-hit would finish the attacker, so no damage is applied at all.
    AttackerDefeated(Exchange),
}

/// Decides a round before any damage is applied. The attacker's own defeat takes precedence
/// over an even exchange.
pub fn evaluate(attacker: &Entity, defender: &Entity, exchange: Exchange) -> CombatOutcome {
    if defender.health > exchange.attacker_damage_dealt {
        if exchange.defender_damage_dealt >= attacker.health {
            CombatOutcome::AttackerDefeated(exchange)
        } else {
            CombatOutcome::Exchange(exchange)
        }
    } else {
        CombatOutcome::DefenderDefeated(exchange)
    }
}
