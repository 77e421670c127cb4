//! Movement range and path cost over terrain
//!
//! Both searches are relaxations over fractional terrain costs. A hex is
//! revisited only on strict improvement and every step spends a positive
//! cost, so both terminate on any map.

use std::collections::{BinaryHeap, HashMap, VecDeque};

use crate::map::{HexCoord, HexMap};
use crate::settlement::Unit;

/// Cost charged when the destination cannot be reached at all
pub const UNREACHABLE_MOVE_COST: f32 = 1.0;

/// A hex a unit can move to this turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReachableHex {
    pub coord: HexCoord,
    /// An enemy stands here: moving in means attacking
    pub has_enemy: bool,
    /// Movement budget left on arrival
    pub remaining: f32,
}

/// Every hex the unit can reach with its remaining moves
///
/// Hexes with a friendly unit are left out. Hexes with an enemy are
/// included (flagged) but the search does not continue past them.
pub fn movement_range(unit: &Unit, map: &HexMap, friendly: &[Unit], enemy: &[Unit]) -> Vec<ReachableHex> {
    let budget = unit.moves_left;
    if budget <= 0.0 {
        return Vec::new();
    }

    let mut best: HashMap<HexCoord, f32> = HashMap::new();
    best.insert(unit.coord, budget);
    let mut queue = VecDeque::from([(unit.coord, budget)]);
    let mut reachable: Vec<ReachableHex> = Vec::new();
    let mut index: HashMap<HexCoord, usize> = HashMap::new();

    while let Some((current, remaining)) = queue.pop_front() {
        for next in current.neighbors() {
            let Some(cost) = map.terrain(&next).and_then(|t| t.movement_cost()) else {
                continue;
            };
            let left = remaining - cost;
            if left < 0.0 {
                continue;
            }
            if best.get(&next).is_some_and(|&prev| prev >= left) {
                continue;
            }
            best.insert(next, left);

            if friendly.iter().any(|u| u.coord == next && u.id != unit.id) {
                continue;
            }
            let has_enemy = enemy.iter().any(|u| u.coord == next);

            match index.get(&next) {
                Some(&i) => reachable[i].remaining = left,
                None => {
                    index.insert(next, reachable.len());
                    reachable.push(ReachableHex {
                        coord: next,
                        has_enemy,
                        remaining: left,
                    });
                }
            }

            if !has_enemy {
                queue.push_back((next, left));
            }
        }
    }

    reachable
}

/// Cheapest terrain cost from `from` to `to`, ignoring units
///
/// Zero when `from == to`; `UNREACHABLE_MOVE_COST` when no path exists.
pub fn path_cost(map: &HexMap, from: HexCoord, to: HexCoord) -> f32 {
    if from == to {
        return 0.0;
    }

    struct Node {
        coord: HexCoord,
        cost: f32,
    }

    impl PartialEq for Node {
        fn eq(&self, other: &Self) -> bool {
            self.coord == other.coord
        }
    }
    impl Eq for Node {}

    impl Ord for Node {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            other
                .cost
                .partial_cmp(&self.cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        }
    }
    impl PartialOrd for Node {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    let mut open_set = BinaryHeap::new();
    let mut g_score: HashMap<HexCoord, f32> = HashMap::new();
    g_score.insert(from, 0.0);
    open_set.push(Node { coord: from, cost: 0.0 });

    while let Some(current) = open_set.pop() {
        if current.coord == to {
            return current.cost;
        }
        if g_score.get(&current.coord).is_some_and(|&g| current.cost > g) {
            continue;
        }

        for next in current.coord.neighbors() {
            let Some(step) = map.terrain(&next).and_then(|t| t.movement_cost()) else {
                continue;
            };
            let tentative = current.cost + step;
            if g_score.get(&next).is_some_and(|&g| g <= tentative) {
                continue;
            }
            g_score.insert(next, tentative);
            open_set.push(Node {
                coord: next,
                cost: tentative,
            });
        }
    }

    UNREACHABLE_MOVE_COST
}

/// Move a unit, spending the cheapest path cost (never below zero)
///
/// Validation against `movement_range` is the caller's job.
pub fn move_unit(unit: &mut Unit, to: HexCoord, map: &HexMap) -> f32 {
    let cost = path_cost(map, unit.coord, to);
    unit.moves_left = (unit.moves_left - cost).max(0.0);
    unit.coord = to;
    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitKind;
    use crate::core::types::Owner;
    use crate::map::{HexTile, Terrain};
    use crate::settlement::UnitId;

    fn unit_at(id: u64, coord: HexCoord, moves: f32, owner: Owner) -> Unit {
        Unit {
            id: UnitId(id),
            kind: UnitKind::WarriorHuman,
            coord,
            hp: 40,
            max_hp: 40,
            moves_left: moves,
            turns_to_ready: 0,
            owner,
            charge_active: false,
        }
    }

    fn line_map(terrains: &[Terrain]) -> HexMap {
        HexMap::from_tiles(
            terrains
                .iter()
                .enumerate()
                .map(|(q, t)| HexTile::new(HexCoord::new(q as i32, 0), *t)),
        )
    }

    #[test]
    fn test_range_respects_terrain_costs() {
        let map = line_map(&[Terrain::Plains, Terrain::Forest, Terrain::Plains, Terrain::Plains]);
        let unit = unit_at(0, HexCoord::new(0, 0), 3.0, Owner::Player);
        let range = movement_range(&unit, &map, &[], &[]);
        let coords: Vec<_> = range.iter().map(|r| r.coord).collect();

        assert!(coords.contains(&HexCoord::new(1, 0)));
        assert!(coords.contains(&HexCoord::new(2, 0)));
        assert!(!coords.contains(&HexCoord::new(3, 0)));
    }

    #[test]
    fn test_range_empty_without_moves() {
        let map = line_map(&[Terrain::Plains, Terrain::Plains]);
        let unit = unit_at(0, HexCoord::new(0, 0), 0.0, Owner::Player);
        assert!(movement_range(&unit, &map, &[], &[]).is_empty());
    }

    #[test]
    fn test_water_blocks() {
        let map = line_map(&[Terrain::Plains, Terrain::Water, Terrain::Plains]);
        let unit = unit_at(0, HexCoord::new(0, 0), 5.0, Owner::Player);
        assert!(movement_range(&unit, &map, &[], &[]).is_empty());
        assert_eq!(path_cost(&map, HexCoord::new(0, 0), HexCoord::new(2, 0)), UNREACHABLE_MOVE_COST);
    }

    #[test]
    fn test_units_shape_the_range() {
        let map = line_map(&[Terrain::Plains; 4]);
        let unit = unit_at(0, HexCoord::new(0, 0), 3.0, Owner::Player);
        let enemy = [unit_at(7, HexCoord::new(2, 0), 3.0, Owner::Ai)];

        let range = movement_range(&unit, &map, &[], &enemy);
        assert_eq!(range.len(), 2);
        assert!(range.iter().any(|r| r.coord == HexCoord::new(2, 0) && r.has_enemy));

        let friend = [unit.clone(), unit_at(1, HexCoord::new(1, 0), 3.0, Owner::Player)];
        assert!(movement_range(&unit, &map, &friend, &[]).is_empty());
    }

    #[test]
    fn test_path_cost_takes_cheapest_route() {
        let map = HexMap::from_tiles([
            HexTile::new(HexCoord::new(0, 0), Terrain::Plains),
            HexTile::new(HexCoord::new(1, 0), Terrain::Mountain),
            HexTile::new(HexCoord::new(2, 0), Terrain::Plains),
            HexTile::new(HexCoord::new(1, -1), Terrain::Plains),
            HexTile::new(HexCoord::new(2, -1), Terrain::Plains),
        ]);
        assert_eq!(path_cost(&map, HexCoord::new(0, 0), HexCoord::new(2, 0)), 3.0);
        assert_eq!(path_cost(&map, HexCoord::new(0, 0), HexCoord::new(1, 0)), 2.0);
        assert_eq!(path_cost(&map, HexCoord::new(0, 0), HexCoord::new(0, 0)), 0.0);
    }

    #[test]
    fn test_move_unit_floors_budget() {
        let map = line_map(&[Terrain::Plains, Terrain::Mountain]);
        let mut unit = unit_at(0, HexCoord::new(0, 0), 1.5, Owner::Player);
        let cost = move_unit(&mut unit, HexCoord::new(1, 0), &map);
        assert_eq!(cost, 2.0);
        assert_eq!(unit.moves_left, 0.0);
        assert_eq!(unit.coord, HexCoord::new(1, 0));
    }
}
