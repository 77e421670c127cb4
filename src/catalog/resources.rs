//! Starting stockpiles, race gathering bonuses and terrain bonuses

use crate::core::types::{Race, ResourceType, Resources};
use crate::map::Terrain;

/// Starting stockpile for a race
pub fn starting_resources(race: Race) -> Resources {
    use crate::core::types::ResourceType::*;
    let amounts: [(ResourceType, u32); 5] = match race {
        Race::Human => [(Food, 50), (Wood, 30), (Stone, 20), (Gold, 30), (Mana, 5)],
        Race::Elf => [(Food, 40), (Wood, 50), (Stone, 10), (Gold, 20), (Mana, 15)],
        Race::Orc => [(Food, 60), (Wood, 20), (Stone, 40), (Gold, 15), (Mana, 5)],
    };
    Resources::from_amounts(&amounts)
}

/// Multiplier a race applies to building output of one resource
pub fn race_bonus(race: Race, resource: ResourceType) -> f64 {
    match (race, resource) {
        (Race::Human, ResourceType::Gold) => 1.5,
        (Race::Elf, ResourceType::Wood) => 1.5,
        (Race::Elf, ResourceType::Mana) => 1.3,
        (Race::Orc, ResourceType::Stone) => 1.5,
        _ => 1.0,
    }
}

/// Flat per-turn bonus a completed building gets from the hex it stands on
///
/// Not scaled by workers or race.
pub fn terrain_bonus(terrain: Terrain) -> Option<(ResourceType, u32)> {
    match terrain {
        Terrain::Forest => Some((ResourceType::Wood, 1)),
        Terrain::Mountain => Some((ResourceType::Stone, 1)),
        Terrain::Desert => Some((ResourceType::Gold, 1)),
        Terrain::Swamp => Some((ResourceType::Mana, 1)),
        Terrain::Plains | Terrain::Water => None,
    }
}

/// Turns a hex improvement takes before it starts yielding
pub const IMPROVEMENT_TURNS: u32 = 3;

/// Per-turn yield of a finished hex improvement; water cannot be improved
pub fn improvement_bonus(terrain: Terrain) -> Option<(ResourceType, u32)> {
    match terrain {
        Terrain::Plains => Some((ResourceType::Food, 2)),
        Terrain::Forest => Some((ResourceType::Wood, 2)),
        Terrain::Mountain => Some((ResourceType::Stone, 2)),
        Terrain::Desert => Some((ResourceType::Gold, 2)),
        Terrain::Swamp => Some((ResourceType::Mana, 2)),
        Terrain::Water => None,
    }
}

/// Output of one building for one turn
///
/// Each entry is `floor(base * race_bonus * worker_ratio * multiplier)`;
/// zero entries are dropped.
pub fn building_yield(
    production: &[(ResourceType, u32)],
    race: Race,
    worker_ratio: f64,
    multiplier: f64,
) -> Vec<(ResourceType, u32)> {
    production
        .iter()
        .map(|&(resource, base)| {
            let amount = base as f64 * race_bonus(race, resource) * worker_ratio * multiplier;
            (resource, amount.floor().max(0.0) as u32)
        })
        .filter(|(_, amount)| *amount > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_resources() {
        let human = starting_resources(Race::Human);
        assert_eq!(human.get(ResourceType::Food), 50);
        assert_eq!(human.get(ResourceType::Gold), 30);
        assert_eq!(starting_resources(Race::Elf).get(ResourceType::Mana), 15);
        assert_eq!(starting_resources(Race::Orc).get(ResourceType::Stone), 40);
    }

    #[test]
    fn test_building_yield_floors() {
        let out = building_yield(&[(ResourceType::Food, 6)], Race::Human, 0.5, 1.0);
        assert_eq!(out, vec![(ResourceType::Food, 3)]);

        let gold = building_yield(&[(ResourceType::Gold, 5)], Race::Human, 0.5, 1.0);
        assert_eq!(gold, vec![(ResourceType::Gold, 3)]);

        let mana = building_yield(&[(ResourceType::Mana, 3)], Race::Elf, 1.0, 1.0);
        assert_eq!(mana, vec![(ResourceType::Mana, 3)]);
    }

    #[test]
    fn test_zero_yield_dropped() {
        let out = building_yield(&[(ResourceType::Wood, 1)], Race::Human, 0.5, 1.0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_plains_has_no_terrain_bonus() {
        assert_eq!(terrain_bonus(Terrain::Plains), None);
        assert_eq!(terrain_bonus(Terrain::Forest), Some((ResourceType::Wood, 1)));
    }

    #[test]
    fn test_improvement_bonus_follows_terrain() {
        assert_eq!(improvement_bonus(Terrain::Plains), Some((ResourceType::Food, 2)));
        assert_eq!(improvement_bonus(Terrain::Swamp), Some((ResourceType::Mana, 2)));
        assert_eq!(improvement_bonus(Terrain::Water), None);
    }
}
