//! Integration tests for unit movement and combat
//!
//! Covers:
//! - Movement range over costly terrain (swamp rings, mixed maps)
//! - Agreement between the range search and the cheapest path cost
//! - Combat bookkeeping: hp lost equals damage reported, minimum damage,
//!   and no counter-attack from a dead defender
//!
//! The property tests run on random terrain and random unit stats.

use proptest::prelude::*;

use mythic_realms::catalog::UnitKind;
use mythic_realms::core::types::Owner;
use mythic_realms::map::{HexCoord, HexMap, HexTile, Terrain};
use mythic_realms::settlement::{Unit, UnitId};
use mythic_realms::units::{movement_range, path_cost, resolve_combat, CombatModifiers};

const TERRAINS: [Terrain; 6] = [
    Terrain::Plains,
    Terrain::Forest,
    Terrain::Mountain,
    Terrain::Water,
    Terrain::Desert,
    Terrain::Swamp,
];

const FIGHTERS: [UnitKind; 6] = [
    UnitKind::Worker,
    UnitKind::WarriorHuman,
    UnitKind::WarriorOrc,
    UnitKind::ArcherElf,
    UnitKind::MageHuman,
    UnitKind::HeroOrc,
];

fn unit(id: u64, kind: UnitKind, coord: HexCoord, moves: f32, owner: Owner) -> Unit {
    let hp = kind.def().hp;
    Unit {
        id: UnitId(id),
        kind,
        coord,
        hp,
        max_hp: hp,
        moves_left: moves,
        turns_to_ready: 0,
        owner,
        charge_active: false,
    }
}

fn uniform(size: i32, terrain: Terrain) -> HexMap {
    let mut tiles = Vec::new();
    for q in 0..size {
        for r in 0..size {
            tiles.push(HexTile::new(HexCoord::new(q, r), terrain));
        }
    }
    HexMap::from_tiles(tiles)
}

fn from_indices(size: i32, cells: &[usize]) -> HexMap {
    let mut tiles = Vec::new();
    for q in 0..size {
        for r in 0..size {
            let terrain = TERRAINS[cells[(q * size + r) as usize] % TERRAINS.len()];
            tiles.push(HexTile::new(HexCoord::new(q, r), terrain));
        }
    }
    HexMap::from_tiles(tiles)
}

// ============================================================================
// Movement Range
// ============================================================================

/// Two moves on swamp reach the first ring with nothing left over
#[test]
fn test_swamp_ring_with_two_moves() {
    let map = uniform(11, Terrain::Swamp);
    let center = HexCoord::new(5, 5);
    let walker = unit(0, UnitKind::WarriorHuman, center, 2.0, Owner::Player);

    let range = movement_range(&walker, &map, &[], &[]);
    assert_eq!(range.len(), 6);
    assert!(range.iter().all(|r| r.coord.distance(&center) == 1));
    assert!(range.iter().all(|r| r.remaining == 0.0));
}

/// On all-swamp ground a unit with 3 moves reaches exactly the first ring
#[test]
fn test_swamp_ring_with_three_moves() {
    let map = uniform(11, Terrain::Swamp);
    let center = HexCoord::new(5, 5);
    let walker = unit(0, UnitKind::WarriorHuman, center, 3.0, Owner::Player);

    let range = movement_range(&walker, &map, &[], &[]);
    assert_eq!(range.len(), 6);
    assert!(range.iter().all(|r| r.coord.distance(&center) == 1));
    assert!(range.iter().all(|r| r.remaining == 1.0));
}

/// Four moves on swamp reach both rings and never the start hex
#[test]
fn test_swamp_two_rings_with_four_moves() {
    let map = uniform(11, Terrain::Swamp);
    let center = HexCoord::new(5, 5);
    let walker = unit(0, UnitKind::ArcherElf, center, 4.0, Owner::Player);

    let range = movement_range(&walker, &map, &[], &[]);
    assert_eq!(range.len(), 18);
    assert!(range.iter().all(|r| r.coord != center));
    assert_eq!(range.iter().filter(|r| r.remaining == 0.0).count(), 12);
}

/// An enemy in the first ring is reachable but blocks nothing else
#[test]
fn test_enemy_hex_is_flagged_not_expanded() {
    let map = uniform(11, Terrain::Plains);
    let center = HexCoord::new(5, 5);
    let walker = unit(0, UnitKind::WarriorHuman, center, 1.0, Owner::Player);
    let enemy = [unit(9, UnitKind::WarriorOrc, HexCoord::new(6, 5), 3.0, Owner::Ai)];

    let range = movement_range(&walker, &map, &[], &enemy);
    assert_eq!(range.len(), 6);
    let flagged: Vec<_> = range.iter().filter(|r| r.has_enemy).collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].coord, HexCoord::new(6, 5));
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// The range search terminates on any terrain and agrees with path cost
    #[test]
    fn prop_range_matches_path_cost(
        cells in prop::collection::vec(0usize..6, 64),
        q in 0i32..8,
        r in 0i32..8,
        moves in 0u32..7,
    ) {
        let map = from_indices(8, &cells);
        let start = HexCoord::new(q, r);
        let budget = moves as f32;
        let walker = unit(0, UnitKind::WarriorHuman, start, budget, Owner::Player);

        let range = movement_range(&walker, &map, &[], &[]);
        prop_assert!(range.len() <= 63);
        for hex in &range {
            prop_assert!(hex.coord != start);
            prop_assert!(hex.remaining >= 0.0 && hex.remaining <= budget);
            let cost = path_cost(&map, start, hex.coord);
            prop_assert!((budget - cost - hex.remaining).abs() < 1e-4);
            prop_assert_ne!(map.terrain(&hex.coord), Some(Terrain::Water));
        }
    }

    /// Reported damage is exactly the hp each side lost
    #[test]
    fn prop_combat_conserves_hp(
        a in 0usize..6,
        d in 0usize..6,
        defender_hp in 1i32..60,
        bonus in 0i32..4,
    ) {
        let mut attacker = unit(0, FIGHTERS[a], HexCoord::new(0, 0), 3.0, Owner::Player);
        let mut defender = unit(1, FIGHTERS[d], HexCoord::new(1, 0), 3.0, Owner::Ai);
        defender.hp = defender_hp;
        let attacker_before = attacker.hp;

        let outcome = resolve_combat(
            &mut attacker,
            &mut defender,
            CombatModifiers::attack(bonus),
            CombatModifiers::default(),
        );

        prop_assert!(outcome.damage_to_defender >= 1);
        prop_assert_eq!(defender_hp - defender.hp, outcome.damage_to_defender);
        prop_assert_eq!(attacker_before - attacker.hp, outcome.damage_to_attacker);
        prop_assert_eq!(outcome.defender_hp, defender.hp);
        if defender.hp <= 0 {
            prop_assert_eq!(outcome.damage_to_attacker, 0);
        } else {
            prop_assert!(outcome.damage_to_attacker >= 1);
        }
    }
}
