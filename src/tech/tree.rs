//! Race tech trees
//!
//! Each race researches along three branches (economy, military, magic).
//! Prerequisites always point earlier in the same race's table.

use serde::{Deserialize, Serialize};

use crate::catalog::BuildingKind;
use crate::core::types::{Amounts, Race};
use crate::core::types::ResourceType::{Food, Gold, Mana, Stone, Wood};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Economy,
    Military,
    Magic,
}

#[derive(Debug)]
pub struct TechDef {
    pub id: &'static str,
    pub name: &'static str,
    pub branch: Branch,
    pub cost: Amounts,
    pub turns_to_research: u32,
    pub prerequisites: &'static [&'static str],
    pub unlocks: &'static [BuildingKind],
}

static HUMAN_TREE: [TechDef; 9] = [
    TechDef {
        id: "agriculture",
        name: "Agriculture",
        branch: Branch::Economy,
        cost: &[(Food, 20), (Gold, 10)],
        turns_to_research: 3,
        prerequisites: &[],
        unlocks: &[BuildingKind::Farm],
    },
    TechDef {
        id: "commerce",
        name: "Commerce",
        branch: Branch::Economy,
        cost: &[(Food, 30), (Gold, 20)],
        turns_to_research: 4,
        prerequisites: &["agriculture"],
        unlocks: &[BuildingKind::Market],
    },
    TechDef {
        id: "masonry",
        name: "Masonry",
        branch: Branch::Economy,
        cost: &[(Wood, 20), (Stone, 15), (Gold, 10)],
        turns_to_research: 3,
        prerequisites: &[],
        unlocks: &[BuildingKind::Quarry, BuildingKind::Walls],
    },
    TechDef {
        id: "mining",
        name: "Mining",
        branch: Branch::Economy,
        cost: &[(Wood, 25), (Stone, 20), (Gold, 15)],
        turns_to_research: 4,
        prerequisites: &["masonry"],
        unlocks: &[BuildingKind::Mine],
    },
    TechDef {
        id: "militia",
        name: "Militia",
        branch: Branch::Military,
        cost: &[(Food, 25), (Wood, 15), (Gold, 15)],
        turns_to_research: 3,
        prerequisites: &[],
        unlocks: &[BuildingKind::Barracks],
    },
    TechDef {
        id: "fortification",
        name: "Fortification",
        branch: Branch::Military,
        cost: &[(Wood, 30), (Stone, 40), (Gold, 20)],
        turns_to_research: 5,
        prerequisites: &["militia", "masonry"],
        unlocks: &[BuildingKind::Castle],
    },
    TechDef {
        id: "scripture",
        name: "Scripture",
        branch: Branch::Magic,
        cost: &[(Gold, 25), (Mana, 10)],
        turns_to_research: 4,
        prerequisites: &[],
        unlocks: &[BuildingKind::Chapel],
    },
    TechDef {
        id: "arcane_studies",
        name: "Arcane Studies",
        branch: Branch::Magic,
        cost: &[(Gold, 30), (Mana, 20)],
        turns_to_research: 5,
        prerequisites: &["scripture"],
        unlocks: &[BuildingKind::MageTower],
    },
    TechDef {
        id: "divine_mandate",
        name: "Divine Mandate",
        branch: Branch::Magic,
        cost: &[(Food, 50), (Gold, 60), (Mana, 30)],
        turns_to_research: 8,
        prerequisites: &["fortification", "arcane_studies"],
        unlocks: &[BuildingKind::GrandCathedral],
    },
];

static ELF_TREE: [TechDef; 9] = [
    TechDef {
        id: "herbalism",
        name: "Herbalism",
        branch: Branch::Economy,
        cost: &[(Food, 15), (Wood, 10)],
        turns_to_research: 3,
        prerequisites: &[],
        unlocks: &[BuildingKind::Farm],
    },
    TechDef {
        id: "forestry",
        name: "Forestry",
        branch: Branch::Economy,
        cost: &[(Food, 15), (Wood, 20)],
        turns_to_research: 3,
        prerequisites: &[],
        unlocks: &[BuildingKind::LumberMill],
    },
    TechDef {
        id: "nature_bond",
        name: "Nature Bond",
        branch: Branch::Economy,
        cost: &[(Wood, 30), (Mana, 15)],
        turns_to_research: 4,
        prerequisites: &["forestry"],
        unlocks: &[BuildingKind::TreeOfLife],
    },
    TechDef {
        id: "stonecraft",
        name: "Stonecraft",
        branch: Branch::Economy,
        cost: &[(Wood, 20), (Stone, 15), (Gold, 10)],
        turns_to_research: 4,
        prerequisites: &[],
        unlocks: &[BuildingKind::Quarry, BuildingKind::Mine, BuildingKind::Walls],
    },
    TechDef {
        id: "sentinels",
        name: "Sentinels",
        branch: Branch::Military,
        cost: &[(Wood, 20), (Gold, 15), (Mana, 5)],
        turns_to_research: 3,
        prerequisites: &[],
        unlocks: &[BuildingKind::Barracks],
    },
    TechDef {
        id: "moonlight",
        name: "Moonlight",
        branch: Branch::Magic,
        cost: &[(Wood, 15), (Mana, 15)],
        turns_to_research: 3,
        prerequisites: &[],
        unlocks: &[BuildingKind::Moonwell],
    },
    TechDef {
        id: "arcane_lore",
        name: "Arcane Lore",
        branch: Branch::Magic,
        cost: &[(Gold, 20), (Mana, 20)],
        turns_to_research: 4,
        prerequisites: &["moonlight"],
        unlocks: &[BuildingKind::MageTower],
    },
    TechDef {
        id: "ancient_knowledge",
        name: "Ancient Knowledge",
        branch: Branch::Magic,
        cost: &[(Wood, 25), (Gold, 25), (Mana, 25)],
        turns_to_research: 5,
        prerequisites: &["arcane_lore"],
        unlocks: &[BuildingKind::AncientArchive],
    },
    TechDef {
        id: "world_tree",
        name: "World Tree",
        branch: Branch::Magic,
        cost: &[(Wood, 60), (Gold, 40), (Mana, 50)],
        turns_to_research: 8,
        prerequisites: &["nature_bond", "ancient_knowledge"],
        unlocks: &[BuildingKind::WorldTree],
    },
];

static ORC_TREE: [TechDef; 9] = [
    TechDef {
        id: "foraging",
        name: "Foraging",
        branch: Branch::Economy,
        cost: &[(Food, 15), (Stone, 10)],
        turns_to_research: 2,
        prerequisites: &[],
        unlocks: &[BuildingKind::Farm],
    },
    TechDef {
        id: "logging",
        name: "Logging",
        branch: Branch::Economy,
        cost: &[(Food, 10), (Wood, 10), (Stone, 5)],
        turns_to_research: 3,
        prerequisites: &[],
        unlocks: &[BuildingKind::LumberMill],
    },
    TechDef {
        id: "excavation",
        name: "Excavation",
        branch: Branch::Economy,
        cost: &[(Food, 15), (Stone, 20), (Gold, 5)],
        turns_to_research: 3,
        prerequisites: &[],
        unlocks: &[BuildingKind::Quarry, BuildingKind::Mine, BuildingKind::Walls],
    },
    TechDef {
        id: "war_drums",
        name: "War Drums",
        branch: Branch::Military,
        cost: &[(Food, 20), (Stone, 15)],
        turns_to_research: 2,
        prerequisites: &[],
        unlocks: &[BuildingKind::Barracks],
    },
    TechDef {
        id: "blood_forge_tech",
        name: "Blood Smithing",
        branch: Branch::Military,
        cost: &[(Food, 30), (Stone, 30), (Gold, 15)],
        turns_to_research: 4,
        prerequisites: &["war_drums", "excavation"],
        unlocks: &[BuildingKind::BloodForge],
    },
    TechDef {
        id: "war_pit_tech",
        name: "War Pits",
        branch: Branch::Military,
        cost: &[(Food, 40), (Stone, 25), (Gold, 20)],
        turns_to_research: 5,
        prerequisites: &["blood_forge_tech"],
        unlocks: &[BuildingKind::WarPit],
    },
    TechDef {
        id: "spirit_call",
        name: "Spirit Call",
        branch: Branch::Magic,
        cost: &[(Food, 15), (Stone, 10), (Mana, 10)],
        turns_to_research: 3,
        prerequisites: &[],
        unlocks: &[BuildingKind::Totem],
    },
    TechDef {
        id: "shamanism",
        name: "Shamanism",
        branch: Branch::Magic,
        cost: &[(Stone, 20), (Gold, 15), (Mana, 15)],
        turns_to_research: 4,
        prerequisites: &["spirit_call"],
        unlocks: &[BuildingKind::MageTower],
    },
    TechDef {
        id: "warlord_ascension",
        name: "Warlord Ascension",
        branch: Branch::Magic,
        cost: &[(Food, 60), (Stone, 50), (Gold, 30), (Mana, 20)],
        turns_to_research: 8,
        prerequisites: &["war_pit_tech", "shamanism"],
        unlocks: &[BuildingKind::SkullThrone],
    },
];

/// The full tree for a race, in display order
pub fn tree_for(race: Race) -> &'static [TechDef] {
    match race {
        Race::Human => &HUMAN_TREE,
        Race::Elf => &ELF_TREE,
        Race::Orc => &ORC_TREE,
    }
}

pub fn find_tech(race: Race, id: &str) -> Option<&'static TechDef> {
    tree_for(race).iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerequisites_resolve_within_race() {
        for race in Race::ALL {
            let tree = tree_for(race);
            for (idx, tech) in tree.iter().enumerate() {
                for prereq in tech.prerequisites {
                    let pos = tree.iter().position(|t| t.id == *prereq);
                    assert!(pos.is_some(), "{} missing prereq {}", tech.id, prereq);
                    assert!(pos.unwrap() < idx);
                }
            }
        }
    }

    #[test]
    fn test_capstones_unlock_ultimates() {
        for race in Race::ALL {
            let ultimate = BuildingKind::ultimate_for(race);
            assert!(tree_for(race).iter().any(|t| t.unlocks.contains(&ultimate)));
        }
    }

    #[test]
    fn test_find_tech() {
        assert_eq!(find_tech(Race::Orc, "foraging").map(|t| t.turns_to_research), Some(2));
        assert!(find_tech(Race::Human, "foraging").is_none());
    }
}
