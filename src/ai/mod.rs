//! Scripted AI opponent
//!
//! The AI mirrors the player's economy with difficulty-scaled yields,
//! builds and trains from fixed priority lists, and walks its army toward
//! the player one hex per turn.

pub mod economy;
pub mod military;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{starting_resources, BuildingKind, UnitKind};
use crate::core::types::{Difficulty, Owner, Race, Resources};
use crate::map::{HexCoord, HexMap};
use crate::settlement::Settlement;
use crate::units::{refresh_units, CombatOutcome};

pub use economy::{
    advance_ai_construction, ai_build_time, build_limit, build_phase, find_valid_hex, gather_ai_resources, train_phase,
    training_order, BUILD_PRIORITY,
};
pub use military::{attack_phase, military_strength, move_phase, movement_goal, AGGRESSION_THRESHOLD};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiTurnReport {
    pub logs: Vec<String>,
    pub built_buildings: Vec<BuildingKind>,
    pub trained_units: Vec<UnitKind>,
    pub attacks: Vec<CombatOutcome>,
}

/// Where the AI tries to found its Town Center on a `size` map
pub fn ai_spawn_point(size: i32) -> HexCoord {
    let at = size - size / 4;
    HexCoord::new(at, at)
}

/// Set up the AI opponent on the far side of the map
///
/// The AI plays one of the two races the player did not pick and starts
/// with a difficulty-scaled stockpile. Without any valid hex near its spawn
/// point it starts with no Town Center, and is defeated from the outset.
pub fn create_ai(
    player_race: Race,
    difficulty: Difficulty,
    map_size: i32,
    map: &mut HexMap,
    rng: &mut impl Rng,
) -> Settlement {
    let candidates: Vec<Race> = Race::ALL.into_iter().filter(|r| *r != player_race).collect();
    let race = candidates[rng.gen_range(0..candidates.len())];

    let mut ai = Settlement::new(race, difficulty, Owner::Ai);
    ai.turn = 0;

    let multiplier = difficulty.ai_resource_multiplier();
    let mut resources = Resources::new();
    for (resource, amount) in starting_resources(race).iter() {
        resources.set(resource, (amount as f64 * multiplier).floor() as u32);
    }
    ai.resources = resources;

    let spawn = ai_spawn_point(map_size);
    match find_valid_hex(spawn, BuildingKind::TownCenter, map, &ai.resources) {
        Some(coord) => {
            economy::place_ai_building(&mut ai, BuildingKind::TownCenter, coord, map);
            if let Some(tc) = ai.town_center_mut() {
                tc.workers = 2;
            }
        }
        None => tracing::warn!(%spawn, "no valid hex for the AI Town Center"),
    }
    ai.recalc_population_cap();

    tracing::info!(race = %race, %difficulty, "AI opponent created");
    ai
}

/// Run one full AI turn against the player
///
/// Order: turn counter, gathering, construction, growth, build, train,
/// unit refresh, movement, attacks, then dead AI units are removed.
pub fn process_ai_turn(ai: &mut Settlement, player: &mut Settlement, map: &mut HexMap) -> AiTurnReport {
    let mut report = AiTurnReport::default();
    ai.turn += 1;

    gather_ai_resources(ai, map);
    advance_ai_construction(ai, map, &mut report.logs);
    ai.grow_population();

    if let Some(kind) = build_phase(ai, map, &mut report.logs) {
        report.built_buildings.push(kind);
    }
    if let Some(kind) = train_phase(ai, &mut report.logs) {
        report.trained_units.push(kind);
    }

    refresh_units(&mut ai.units);
    move_phase(ai, player, map);
    attack_phase(ai, player, map, &mut report.logs, &mut report.attacks);
    ai.prune_dead_units();

    tracing::debug!(
        turn = ai.turn,
        buildings = ai.buildings.len(),
        units = ai.units.len(),
        attacks = report.attacks.len(),
        "AI turn done"
    );
    report
}

/// The AI is beaten once its Town Center is gone or at zero hp
pub fn is_defeated(ai: &Settlement) -> bool {
    ai.town_center().map_or(true, |tc| tc.is_destroyed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ResourceType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_create_ai_on_far_side() {
        let mut map = HexMap::generate_simple(20, 20, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ai = create_ai(Race::Human, Difficulty::Easy, 20, &mut map, &mut rng);

        assert_ne!(ai.race, Race::Human);
        assert_eq!(ai.owner, Owner::Ai);
        assert_eq!(ai.turn, 0);
        let tc = ai.town_center().unwrap();
        assert!(tc.is_complete());
        assert_eq!(tc.workers, 2);
        assert!(tc.coord.distance(&ai_spawn_point(20)) <= 40);
        assert!(map.get(&tc.coord).unwrap().building.is_some());
        assert_eq!(ai.population.cap, 5);

        let full = starting_resources(ai.race).get(ResourceType::Food);
        assert_eq!(ai.resources.get(ResourceType::Food), full / 2);
        assert!(!is_defeated(&ai));
    }

    #[test]
    fn test_defeat_checks() {
        let mut ai = Settlement::new(Race::Orc, Difficulty::Normal, Owner::Ai);
        assert!(is_defeated(&ai));
        ai.buildings.push(crate::settlement::Building::new(
            BuildingKind::TownCenter,
            HexCoord::new(0, 0),
            0,
            Owner::Ai,
        ));
        assert!(!is_defeated(&ai));
        ai.buildings[0].hp = 0;
        assert!(is_defeated(&ai));
    }

    #[test]
    fn test_ai_turn_builds_and_grows() {
        let mut map = HexMap::generate_simple(16, 16, 7);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut player = Settlement::new(Race::Elf, Difficulty::Normal, Owner::Player);
        let mut ai = create_ai(Race::Elf, Difficulty::Normal, 16, &mut map, &mut rng);

        let report = process_ai_turn(&mut ai, &mut player, &mut map);
        assert_eq!(ai.turn, 1);
        assert_eq!(report.built_buildings.len(), 1);
        assert_eq!(report.logs[0], format!("AI builds {}", report.built_buildings[0].name()));
    }
}
