//! Unit-versus-unit combat
//!
//! Catalog stats are never touched; situational buffs come in as
//! `CombatModifiers` added on top of the unit's base attack and defense.

use serde::{Deserialize, Serialize};

use crate::catalog::HeroAbility;
use crate::settlement::Unit;

/// Attack bonus for a unit standing next to a rallying hero
pub const RALLY_BONUS: i32 = 2;

/// Additive buffs applied to one side of a fight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatModifiers {
    pub attack: i32,
    pub defense: i32,
}

impl CombatModifiers {
    pub fn attack(bonus: i32) -> Self {
        Self {
            attack: bonus,
            defense: 0,
        }
    }
}

/// Result of a single exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub attacker: String,
    pub defender: String,
    pub damage_to_defender: i32,
    /// Zero when the defender died before striking back
    pub damage_to_attacker: i32,
    pub attacker_hp: i32,
    pub defender_hp: i32,
    pub log: String,
}

impl CombatOutcome {
    pub fn defender_defeated(&self) -> bool {
        self.defender_hp <= 0
    }

    pub fn attacker_defeated(&self) -> bool {
        self.attacker_hp <= 0
    }
}

/// `max(1, attack - floor(defense / 2))`
fn strike_damage(attack: i32, defense: i32) -> i32 {
    (attack - defense.div_euclid(2)).max(1)
}

/// Resolve one attack: the attacker strikes, and a surviving defender
/// strikes back
///
/// Dead units stay in place; pruning them is up to the caller.
pub fn resolve_combat(
    attacker: &mut Unit,
    defender: &mut Unit,
    attacker_mods: CombatModifiers,
    defender_mods: CombatModifiers,
) -> CombatOutcome {
    let a_def = attacker.def();
    let d_def = defender.def();

    let damage_to_defender = strike_damage(
        a_def.attack + attacker_mods.attack,
        d_def.defense + defender_mods.defense,
    );
    defender.hp -= damage_to_defender;
    let mut log = format!(
        "{} attacks {} for {} damage",
        a_def.name, d_def.name, damage_to_defender
    );

    let mut damage_to_attacker = 0;
    if defender.hp > 0 {
        damage_to_attacker = strike_damage(
            d_def.attack + defender_mods.attack,
            a_def.defense + attacker_mods.defense,
        );
        attacker.hp -= damage_to_attacker;
        log.push_str(&format!(". {} retaliates for {} damage", d_def.name, damage_to_attacker));
    }

    if defender.hp <= 0 {
        log.push_str(&format!(". {} defeated!", d_def.name));
    }
    if attacker.hp <= 0 {
        log.push_str(&format!(". {} defeated!", a_def.name));
    }

    tracing::debug!(%log, "combat resolved");

    CombatOutcome {
        attacker: a_def.name.to_string(),
        defender: d_def.name.to_string(),
        damage_to_defender,
        damage_to_attacker,
        attacker_hp: attacker.hp,
        defender_hp: defender.hp,
        log,
    }
}

/// Rally bonus for a unit at `unit`'s hex from adjacent allied heroes
pub fn rally_bonus(unit: &Unit, allies: &[Unit]) -> i32 {
    let rallied = allies.iter().any(|ally| {
        ally.id != unit.id
            && ally.is_alive()
            && ally.coord.is_adjacent(&unit.coord)
            && ally.def().ability == Some(HeroAbility::Rally)
    });
    if rallied {
        RALLY_BONUS
    } else {
        0
    }
}
