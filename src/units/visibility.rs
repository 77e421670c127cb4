//! Fog of war

use std::collections::HashSet;

use crate::map::{HexCoord, HexMap};
use crate::settlement::Settlement;

/// Vision radius of every complete building
pub const BUILDING_VISION: i32 = 2;

/// Hexes a settlement can currently see
///
/// Living, ready units see up to their vision range; complete buildings
/// see `BUILDING_VISION` hexes around them.
pub fn visible_hexes(settlement: &Settlement, map: &HexMap) -> HashSet<HexCoord> {
    let mut sources: Vec<(HexCoord, i32)> = settlement
        .units
        .iter()
        .filter(|u| u.is_alive() && u.is_ready())
        .map(|u| (u.coord, u.def().vision_range))
        .collect();
    sources.extend(
        settlement
            .completed_buildings()
            .map(|b| (b.coord, BUILDING_VISION)),
    );

    map.tiles()
        .map(|tile| tile.coord)
        .filter(|coord| sources.iter().any(|(at, range)| at.distance(coord) <= *range))
        .collect()
}

/// Merge the current view into the settlement's explored set
///
/// Explored hexes are never forgotten.
pub fn reveal(settlement: &mut Settlement, visible: &HashSet<HexCoord>) {
    settlement.explored.extend(visible.iter().copied());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuildingKind, UnitKind};
    use crate::core::types::{Difficulty, Owner, Race};
    use crate::settlement::{Building, Unit, UnitId};

    fn scout(coord: HexCoord, turns_to_ready: u32) -> Unit {
        Unit {
            id: UnitId(0),
            kind: UnitKind::ArcherElf,
            coord,
            hp: 22,
            max_hp: 22,
            moves_left: 0.0,
            turns_to_ready,
            owner: Owner::Player,
            charge_active: false,
        }
    }

    #[test]
    fn test_building_vision() {
        let map = HexMap::generate_simple(12, 12, 3);
        let mut s = Settlement::new(Race::Elf, Difficulty::Normal, Owner::Player);
        s.buildings.push(Building::new(BuildingKind::Farm, HexCoord::new(5, 5), 0, Owner::Player));

        let visible = visible_hexes(&s, &map);
        assert!(visible.contains(&HexCoord::new(7, 5)));
        assert!(!visible.contains(&HexCoord::new(8, 5)));
    }

    #[test]
    fn test_training_units_are_blind() {
        let map = HexMap::generate_simple(12, 12, 3);
        let mut s = Settlement::new(Race::Elf, Difficulty::Normal, Owner::Player);
        s.units.push(scout(HexCoord::new(0, 0), 1));
        assert!(visible_hexes(&s, &map).is_empty());

        s.units[0].turns_to_ready = 0;
        let visible = visible_hexes(&s, &map);
        assert!(visible.contains(&HexCoord::new(5, 0)));
        assert!(!visible.contains(&HexCoord::new(6, 0)));
    }

    #[test]
    fn test_explored_is_monotonic() {
        let map = HexMap::generate_simple(12, 12, 3);
        let mut s = Settlement::new(Race::Elf, Difficulty::Normal, Owner::Player);
        s.units.push(scout(HexCoord::new(0, 0), 0));
        let first = visible_hexes(&s, &map);
        reveal(&mut s, &first);

        s.units[0].coord = HexCoord::new(11, 11);
        let second = visible_hexes(&s, &map);
        reveal(&mut s, &second);

        assert!(first.iter().all(|c| s.explored.contains(c)));
        assert!(second.iter().all(|c| s.explored.contains(c)));
    }
}
