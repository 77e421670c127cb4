//! Raids against the settlement's buildings

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::BuildingKind;
use crate::map::HexMap;
use crate::settlement::Settlement;

/// Raid damage before scaling by turn
pub const RAID_BASE_DAMAGE: u32 = 15;

/// A raid always does at least this much damage
pub const MIN_RAID_DAMAGE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaidKind {
    Bandits,
    Wolves,
}

/// Damage a raid of this kind deals on `turn`, before defenses
pub fn raid_base_damage(turn: u32, kind: RaidKind) -> u32 {
    let base = RAID_BASE_DAMAGE + (turn as f64 * 1.5).floor() as u32;
    match kind {
        RaidKind::Bandits => base,
        RaidKind::Wolves => (base as f64 * 0.6).floor() as u32,
    }
}

/// Damage blocked by complete defensive buildings: `10 + level × 5` each
pub fn raid_defense(settlement: &Settlement) -> u32 {
    settlement
        .completed_buildings()
        .filter(|b| b.kind.is_defensive())
        .map(|b| 10 + b.level as u32 * 5)
        .sum()
}

/// Hit one random complete building (never the Town Center)
///
/// A building brought to zero hp is kept but must be rebuilt: its
/// construction countdown restarts and the hex mark follows. Returns the
/// human-readable outcome.
pub fn execute_raid(settlement: &mut Settlement, map: &mut HexMap, kind: RaidKind, rng: &mut impl Rng) -> String {
    let targets: Vec<usize> = settlement
        .buildings
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_complete() && b.kind != BuildingKind::TownCenter)
        .map(|(i, _)| i)
        .collect();
    if targets.is_empty() {
        return "Your settlement has nothing to raid.".to_string();
    }

    let defense = raid_defense(settlement);
    let damage = raid_base_damage(settlement.turn, kind)
        .saturating_sub(defense)
        .max(MIN_RAID_DAMAGE);

    let target = &mut settlement.buildings[targets[rng.gen_range(0..targets.len())]];
    target.hp -= damage as i32;

    let mut parts = vec![format!("{} took {} damage", target.kind.key().replace('_', " "), damage)];
    if defense > 0 {
        parts.push(format!("defenses blocked {} damage", defense));
    }
    if target.hp <= 0 {
        target.destroy_for_rebuild();
        map.set_building_turns(target.coord, target.turns_remaining);
        parts.push(format!("{} destroyed! Needs rebuilding.", target.kind.name()));
    }

    tracing::debug!(?kind, damage, defense, "raid resolved");
    parts.join(". ")
}
