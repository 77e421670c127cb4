//! End-of-turn resolution for one settlement
//!
//! Runs in a fixed order: turn counter, gathering, construction,
//! hex improvements, research, population cap, growth.

use serde::{Deserialize, Serialize};

use crate::catalog::{building_yield, terrain_bonus, BuildingKind};
use crate::core::types::{ResourceType, Resources};
use crate::map::{HexCoord, HexMap};
use crate::settlement::{Settlement, GROWTH_FOOD_COST};

/// A building that finished construction this turn
///
/// The map mark is not touched here; the caller syncs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingCompleted {
    pub kind: BuildingKind,
    pub coord: HexCoord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Everything added to the stockpile this turn
    pub gathered: Resources,
    /// Everything taken out by the pipeline itself (growth food)
    pub consumed: Resources,
    pub completed_techs: Vec<String>,
    pub completed_buildings: Vec<BuildingCompleted>,
    pub population_grew: bool,
}

/// Worker ratio of a building: filled slots over total, 1.0 without slots
pub fn worker_ratio(workers: u32, slots: u32) -> f64 {
    if slots == 0 {
        1.0
    } else {
        workers as f64 / slots as f64
    }
}

/// Resolve one end-turn for the settlement
pub fn process_turn(settlement: &mut Settlement, map: &HexMap) -> TurnReport {
    let mut report = TurnReport::default();
    settlement.turn += 1;

    gather(settlement, map, &mut report.gathered);

    for building in settlement.buildings.iter_mut() {
        if building.turns_remaining == 0 {
            continue;
        }
        building.turns_remaining -= 1;
        if building.turns_remaining == 0 {
            // a rebuilt building comes back at full strength
            if building.hp <= 0 {
                building.hp = building.max_hp;
            }
            report.completed_buildings.push(BuildingCompleted {
                kind: building.kind,
                coord: building.coord,
            });
        }
    }

    for improvement in settlement.improvements.iter_mut() {
        improvement.turns_remaining = improvement.turns_remaining.saturating_sub(1);
    }
    for improvement in settlement.improvements.iter().filter(|i| i.turns_remaining == 0) {
        report.gathered.add_all(&improvement.bonus);
    }

    report.completed_techs = settlement.tech.advance(settlement.race);

    settlement.recalc_population_cap();

    settlement.resources.add_all(&report.gathered);
    if settlement.grow_population() {
        report.population_grew = true;
        report.consumed.add(ResourceType::Food, GROWTH_FOOD_COST);
    }

    tracing::debug!(
        turn = settlement.turn,
        race = %settlement.race,
        gathered = report.gathered.total(),
        completed = report.completed_buildings.len(),
        "turn resolved"
    );
    report
}

/// Yields of every complete building into `gathered`
///
/// A building with worker slots but no workers produces nothing, terrain
/// bonus included.
fn gather(settlement: &Settlement, map: &HexMap, gathered: &mut Resources) {
    for building in settlement.completed_buildings() {
        let def = building.kind.def();
        if def.worker_slots > 0 && building.workers == 0 {
            continue;
        }
        let ratio = worker_ratio(building.workers, def.worker_slots).min(1.0);
        gathered.add_amounts(&building_yield(def.production, settlement.race, ratio, 1.0));

        if let Some((resource, amount)) = map.terrain(&building.coord).and_then(terrain_bonus) {
            gathered.add(resource, amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Difficulty, Owner, Race};
    use crate::map::{HexTile, Terrain};
    use crate::settlement::{Building, HexImprovement};

    fn map() -> HexMap {
        HexMap::from_tiles([
            HexTile::new(HexCoord::new(0, 0), Terrain::Plains),
            HexTile::new(HexCoord::new(1, 0), Terrain::Plains),
            HexTile::new(HexCoord::new(2, 0), Terrain::Forest),
        ])
    }

    fn settlement() -> Settlement {
        Settlement::new(Race::Human, Difficulty::Normal, Owner::Player)
    }

    #[test]
    fn test_turn_increments() {
        let mut s = settlement();
        process_turn(&mut s, &map());
        assert_eq!(s.turn, 2);
    }

    #[test]
    fn test_unstaffed_building_yields_nothing() {
        let mut s = settlement();
        s.buildings.push(Building::new(BuildingKind::LumberMill, HexCoord::new(2, 0), 0, Owner::Player));
        let report = process_turn(&mut s, &map());
        assert!(report.gathered.is_empty());
    }

    #[test]
    fn test_worker_ratio_and_terrain_bonus() {
        let mut s = settlement();
        let mut mill = Building::new(BuildingKind::LumberMill, HexCoord::new(2, 0), 0, Owner::Player);
        mill.workers = 1;
        s.buildings.push(mill);

        let report = process_turn(&mut s, &map());
        // floor(6 * 1.0 * 0.5) + 1 forest bonus
        assert_eq!(report.gathered.get(ResourceType::Wood), 4);
        assert_eq!(s.resources.get(ResourceType::Wood), 34);
    }

    #[test]
    fn test_completion_reported_once() {
        let mut s = settlement();
        s.buildings.push(Building::new(BuildingKind::Farm, HexCoord::new(1, 0), 2, Owner::Player));

        let first = process_turn(&mut s, &map());
        assert!(first.completed_buildings.is_empty());
        let second = process_turn(&mut s, &map());
        assert_eq!(
            second.completed_buildings,
            vec![BuildingCompleted {
                kind: BuildingKind::Farm,
                coord: HexCoord::new(1, 0)
            }]
        );
        assert!(process_turn(&mut s, &map()).completed_buildings.is_empty());
    }

    #[test]
    fn test_rebuild_restores_hp() {
        let mut s = settlement();
        let mut farm = Building::new(BuildingKind::Farm, HexCoord::new(1, 0), 0, Owner::Player);
        farm.destroy_for_rebuild();
        s.buildings.push(farm);
        process_turn(&mut s, &map());
        process_turn(&mut s, &map());
        assert_eq!(s.buildings[0].hp, 40);
    }

    #[test]
    fn test_improvement_yields_every_turn_once_done() {
        let mut s = settlement();
        s.improvements.push(HexImprovement {
            coord: HexCoord::new(2, 0),
            turns_remaining: 2,
            bonus: Resources::from_amounts(&[(ResourceType::Wood, 2)]),
        });

        assert!(process_turn(&mut s, &map()).gathered.is_empty());
        for _ in 0..3 {
            let report = process_turn(&mut s, &map());
            assert_eq!(report.gathered.get(ResourceType::Wood), 2);
        }
    }

    #[test]
    fn test_growth_and_cap() {
        let mut s = settlement();
        s.buildings.push(Building::new(BuildingKind::TownCenter, HexCoord::new(0, 0), 0, Owner::Player));
        s.buildings.push(Building::new(BuildingKind::Farm, HexCoord::new(1, 0), 0, Owner::Player));

        let report = process_turn(&mut s, &map());
        assert_eq!(s.population.cap, 8);
        assert!(report.population_grew);
        assert_eq!(s.population.current, 6);
        assert_eq!(report.consumed.get(ResourceType::Food), 5);
    }

    #[test]
    fn test_no_buildings_means_no_cap() {
        let mut s = settlement();
        let report = process_turn(&mut s, &map());
        assert_eq!(s.population.cap, 0);
        assert!(!report.population_grew);
        assert_eq!(s.population.current, 5);
    }
}
