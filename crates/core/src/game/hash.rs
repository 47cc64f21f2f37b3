//! Stable snapshot hashing for deterministic verification.
//! The hash covers everything a replay must reproduce; field order is fixed.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::state::WorldState;

pub fn snapshot_hash(state: &WorldState) -> u64 {
    let mut hasher = Xxh3::new();
    hasher.write(&state.grid().canonical_bytes());
    hasher.write_u32(state.level());
    hasher.write_u8(u8::from(state.in_darkness()));
    hasher.write_u32(state.viewport().width);
    hasher.write_u32(state.viewport().height);

    hasher.write_usize(state.entities().len());
    for (id, entity) in state.entities() {
        write_str(&mut hasher, id.as_str());
        hasher.write_u8(entity.kind as u8);
        hasher.write_i32(entity.health);
        hasher.write_i32(entity.attack);
        match entity.pos {
            Some(pos) => {
                hasher.write_u8(1);
                hasher.write_i32(pos.x);
                hasher.write_i32(pos.y);
            }
            None => hasher.write_u8(0),
        }
        hasher.write_u8(u8::from(entity.progression.is_some()));
        if let Some(progress) = &entity.progression {
            write_str(&mut hasher, &progress.weapon);
            hasher.write_i32(progress.attack_bonus);
            hasher.write_u32(progress.level);
            hasher.write_i32(progress.xp);
            hasher.write_i32(progress.xp_to_next);
            hasher.write_usize(progress.inventory.len());
            for item in &progress.inventory {
                write_str(&mut hasher, item);
            }
        }
    }

    hasher.write_usize(state.index().len());
    for (pos, id) in state.index().iter() {
        hasher.write_i32(pos.x);
        hasher.write_i32(pos.y);
        write_str(&mut hasher, id.as_str());
    }
    hasher.finish()
}

/// Length-prefixed, so neighbouring strings cannot run into each other.
fn write_str(hasher: &mut Xxh3, text: &str) {
    hasher.write_usize(text.len());
    hasher.write(text.as_bytes());
}
