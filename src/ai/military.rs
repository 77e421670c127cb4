//! AI army: greedy movement toward the player and adjacent attacks

use crate::catalog::BuildingKind;
use crate::map::{HexCoord, HexMap, Terrain};
use crate::settlement::Settlement;
use crate::units::{resolve_combat, CombatModifiers, CombatOutcome};

/// Total ready attack at which the AI marches on the player's Town Center
pub const AGGRESSION_THRESHOLD: i32 = 15;

/// Sum of attack over ready units
pub fn military_strength(ai: &Settlement) -> i32 {
    ai.units
        .iter()
        .filter(|u| u.is_ready())
        .map(|u| u.def().attack)
        .sum()
}

/// Where AI units are heading this turn
///
/// Aggressive armies go for the player's Town Center; otherwise they hold
/// the midpoint between the two Town Centers. `None` without a player
/// Town Center.
pub fn movement_goal(ai: &Settlement, player: &Settlement) -> Option<HexCoord> {
    let target = player.town_center()?.coord;
    if military_strength(ai) >= AGGRESSION_THRESHOLD {
        return Some(target);
    }
    Some(match ai.town_center() {
        Some(tc) => tc.coord.midpoint(&target),
        None => target,
    })
}

/// Step every ready AI unit one hex closer to the goal
///
/// A unit only moves when some neighbour is strictly closer; ties go to
/// the first neighbour in the fixed neighbour order.
pub fn move_phase(ai: &mut Settlement, player: &Settlement, map: &HexMap) {
    let Some(goal) = movement_goal(ai, player) else {
        return;
    };

    for i in 0..ai.units.len() {
        let unit = &ai.units[i];
        if !unit.is_ready() || unit.moves_left <= 0.0 {
            continue;
        }

        let mut best = unit.coord;
        let mut best_dist = unit.coord.distance(&goal);
        for next in unit.coord.neighbors() {
            match map.terrain(&next) {
                None | Some(Terrain::Water) => continue,
                Some(_) => {}
            }
            let friendly = ai.units.iter().enumerate().any(|(j, u)| j != i && u.coord == next);
            if friendly || player.units.iter().any(|u| u.coord == next) {
                continue;
            }
            let dist = next.distance(&goal);
            if dist < best_dist {
                best = next;
                best_dist = dist;
            }
        }

        let unit = &mut ai.units[i];
        if best != unit.coord {
            unit.coord = best;
            unit.moves_left -= 1.0;
        }
    }
}

/// Every ready AI unit hits at most one adjacent target
///
/// Per neighbour, a live player unit is fought first; otherwise a complete
/// player building with no unit on it takes the attacker's attack as
/// damage. A destroyed Town Center stays at zero hp; other buildings go
/// back to a full rebuild.
pub fn attack_phase(
    ai: &mut Settlement,
    player: &mut Settlement,
    map: &mut HexMap,
    logs: &mut Vec<String>,
    attacks: &mut Vec<CombatOutcome>,
) {
    for i in 0..ai.units.len() {
        if !ai.units[i].is_ready() || !ai.units[i].is_alive() {
            continue;
        }

        for next in ai.units[i].coord.neighbors() {
            if let Some(target) = player.units.iter().position(|u| u.coord == next && u.is_alive()) {
                let outcome = resolve_combat(
                    &mut ai.units[i],
                    &mut player.units[target],
                    CombatModifiers::default(),
                    CombatModifiers::default(),
                );
                logs.push(format!("AI: {}", outcome.log));
                if !player.units[target].is_alive() {
                    player.units.remove(target);
                }
                attacks.push(outcome);
                break;
            }

            if player.units.iter().any(|u| u.coord == next) {
                continue;
            }
            let Some(building) = player.building_at_mut(next).filter(|b| b.is_complete()) else {
                continue;
            };

            let damage = ai.units[i].def().attack;
            building.hp -= damage;
            let name = building.kind.name();
            logs.push(format!("AI attacks {} for {} damage", name, damage));

            if building.hp <= 0 {
                building.hp = 0;
                if building.kind == BuildingKind::TownCenter {
                    logs.push("AI destroyed your Town Center!".to_string());
                } else {
                    building.destroy_for_rebuild();
                    map.set_building_turns(building.coord, building.turns_remaining);
                    logs.push(format!("AI destroyed {}!", name));
                }
                tracing::debug!(building = name, at = %next, "AI destroyed a building");
            }
            break;
        }
    }
}
