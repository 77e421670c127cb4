//! Building definitions, upgrade costs and placement rules

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::ActionError;
use crate::core::types::{Amounts, Race, Resources};
use crate::map::{HexTile, Terrain};

use crate::core::types::ResourceType::{Food, Gold, Mana, Stone, Wood};

/// Highest level a building can be upgraded to
pub const MAX_LEVEL: u8 = 3;

const ALL_RACES: &[Race] = &[Race::Human, Race::Elf, Race::Orc];

/// Type of building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    TownCenter,
    Farm,
    LumberMill,
    Quarry,
    Mine,
    Barracks,
    MageTower,
    Walls,
    // Human
    Market,
    Castle,
    Chapel,
    GrandCathedral,
    // Elf
    TreeOfLife,
    Moonwell,
    AncientArchive,
    WorldTree,
    // Orc
    WarPit,
    BloodForge,
    Totem,
    SkullThrone,
}

/// Static definition of a building type
#[derive(Debug)]
pub struct BuildingDef {
    pub name: &'static str,
    pub cost: Amounts,
    pub turns_to_build: u32,
    /// Base output per turn at level 1 with all worker slots filled
    pub production: Amounts,
    /// Workers the building can employ; zero means it runs unstaffed
    pub worker_slots: u32,
    /// Added to the settlement cap per level once complete
    pub population_cap: u32,
    pub required_terrain: &'static [Terrain],
    pub races: &'static [Race],
    /// Hit points at level 1
    pub base_hp: u32,
}

static TOWN_CENTER: BuildingDef = BuildingDef {
    name: "Town Center",
    cost: &[],
    turns_to_build: 0,
    production: &[(Food, 2), (Wood, 1), (Stone, 1), (Gold, 2)],
    worker_slots: 2,
    population_cap: 5,
    required_terrain: &[Terrain::Plains, Terrain::Desert],
    races: ALL_RACES,
    base_hp: 100,
};

static FARM: BuildingDef = BuildingDef {
    name: "Farm",
    cost: &[(Wood, 15), (Gold, 5)],
    turns_to_build: 2,
    production: &[(Food, 6)],
    worker_slots: 2,
    population_cap: 3,
    required_terrain: &[Terrain::Plains],
    races: ALL_RACES,
    base_hp: 40,
};

static LUMBER_MILL: BuildingDef = BuildingDef {
    name: "Lumber Mill",
    cost: &[(Food, 10), (Wood, 5), (Stone, 5), (Gold, 5)],
    turns_to_build: 2,
    production: &[(Wood, 6)],
    worker_slots: 2,
    population_cap: 0,
    required_terrain: &[Terrain::Forest],
    races: ALL_RACES,
    base_hp: 50,
};

static QUARRY: BuildingDef = BuildingDef {
    name: "Quarry",
    cost: &[(Food, 10), (Wood, 10), (Gold, 5)],
    turns_to_build: 2,
    production: &[(Stone, 6)],
    worker_slots: 2,
    population_cap: 0,
    required_terrain: &[Terrain::Mountain],
    races: ALL_RACES,
    base_hp: 60,
};

static MINE: BuildingDef = BuildingDef {
    name: "Mine",
    cost: &[(Food, 10), (Wood, 15), (Stone, 10)],
    turns_to_build: 3,
    production: &[(Gold, 5)],
    worker_slots: 2,
    population_cap: 0,
    required_terrain: &[Terrain::Mountain, Terrain::Desert],
    races: ALL_RACES,
    base_hp: 60,
};

static BARRACKS: BuildingDef = BuildingDef {
    name: "Barracks",
    cost: &[(Food, 15), (Wood, 25), (Stone, 15), (Gold, 10)],
    turns_to_build: 3,
    production: &[],
    worker_slots: 1,
    population_cap: 0,
    required_terrain: &[Terrain::Plains, Terrain::Desert],
    races: ALL_RACES,
    base_hp: 80,
};

static MAGE_TOWER: BuildingDef = BuildingDef {
    name: "Mage Tower",
    cost: &[(Food, 10), (Wood, 15), (Stone, 20), (Gold, 15), (Mana, 8)],
    turns_to_build: 4,
    production: &[(Mana, 3)],
    worker_slots: 1,
    population_cap: 0,
    required_terrain: &[Terrain::Plains, Terrain::Forest],
    races: ALL_RACES,
    base_hp: 50,
};

static WALLS: BuildingDef = BuildingDef {
    name: "Walls",
    cost: &[(Wood, 10), (Stone, 30), (Gold, 5)],
    turns_to_build: 3,
    production: &[],
    worker_slots: 0,
    population_cap: 0,
    required_terrain: &[Terrain::Plains, Terrain::Desert, Terrain::Mountain],
    races: ALL_RACES,
    base_hp: 120,
};

static MARKET: BuildingDef = BuildingDef {
    name: "Market",
    cost: &[(Food, 15), (Wood, 25), (Stone, 10), (Gold, 10)],
    turns_to_build: 3,
    production: &[(Gold, 6)],
    worker_slots: 2,
    population_cap: 0,
    required_terrain: &[Terrain::Plains, Terrain::Desert],
    races: &[Race::Human],
    base_hp: 50,
};

static CASTLE: BuildingDef = BuildingDef {
    name: "Castle",
    cost: &[(Food, 20), (Wood, 40), (Stone, 50), (Gold, 30)],
    turns_to_build: 6,
    production: &[(Stone, 2), (Gold, 3)],
    worker_slots: 2,
    population_cap: 5,
    required_terrain: &[Terrain::Plains, Terrain::Mountain],
    races: &[Race::Human],
    base_hp: 120,
};

static CHAPEL: BuildingDef = BuildingDef {
    name: "Chapel",
    cost: &[(Food, 10), (Wood, 20), (Stone, 15), (Gold, 15), (Mana, 5)],
    turns_to_build: 4,
    production: &[(Gold, 1), (Mana, 3)],
    worker_slots: 1,
    population_cap: 0,
    required_terrain: &[Terrain::Plains, Terrain::Forest],
    races: &[Race::Human],
    base_hp: 50,
};

static GRAND_CATHEDRAL: BuildingDef = BuildingDef {
    name: "Grand Cathedral",
    cost: &[(Food, 40), (Wood, 60), (Stone, 80), (Gold, 60), (Mana, 30)],
    turns_to_build: 10,
    production: &[(Food, 2), (Gold, 8), (Mana, 5)],
    worker_slots: 3,
    population_cap: 8,
    required_terrain: &[Terrain::Plains],
    races: &[Race::Human],
    base_hp: 150,
};

static TREE_OF_LIFE: BuildingDef = BuildingDef {
    name: "Tree of Life",
    cost: &[(Food, 10), (Wood, 30), (Stone, 5), (Gold, 10), (Mana, 10)],
    turns_to_build: 4,
    production: &[(Food, 2), (Wood, 4), (Mana, 1)],
    worker_slots: 2,
    population_cap: 4,
    required_terrain: &[Terrain::Forest, Terrain::Plains],
    races: &[Race::Elf],
    base_hp: 70,
};

static MOONWELL: BuildingDef = BuildingDef {
    name: "Moonwell",
    cost: &[(Food, 5), (Wood, 15), (Stone, 10), (Gold, 10), (Mana, 10)],
    turns_to_build: 3,
    production: &[(Mana, 5)],
    worker_slots: 1,
    population_cap: 0,
    required_terrain: &[Terrain::Forest, Terrain::Plains],
    races: &[Race::Elf],
    base_hp: 50,
};

static ANCIENT_ARCHIVE: BuildingDef = BuildingDef {
    name: "Ancient Archive",
    cost: &[(Food, 10), (Wood, 25), (Stone, 20), (Gold, 25), (Mana, 20)],
    turns_to_build: 5,
    production: &[(Gold, 3), (Mana, 4)],
    worker_slots: 2,
    population_cap: 0,
    required_terrain: &[Terrain::Forest],
    races: &[Race::Elf],
    base_hp: 60,
};

static WORLD_TREE: BuildingDef = BuildingDef {
    name: "World Tree",
    cost: &[(Food, 30), (Wood, 80), (Stone, 20), (Gold, 40), (Mana, 50)],
    turns_to_build: 10,
    production: &[(Food, 3), (Wood, 6), (Gold, 2), (Mana, 8)],
    worker_slots: 3,
    population_cap: 10,
    required_terrain: &[Terrain::Forest],
    races: &[Race::Elf],
    base_hp: 160,
};

static WAR_PIT: BuildingDef = BuildingDef {
    name: "War Pit",
    cost: &[(Food, 30), (Wood, 20), (Stone, 35), (Gold, 15)],
    turns_to_build: 5,
    production: &[(Stone, 2)],
    worker_slots: 2,
    population_cap: 4,
    required_terrain: &[Terrain::Plains, Terrain::Desert],
    races: &[Race::Orc],
    base_hp: 90,
};

static BLOOD_FORGE: BuildingDef = BuildingDef {
    name: "Blood Forge",
    cost: &[(Food, 20), (Wood, 25), (Stone, 30), (Gold, 20)],
    turns_to_build: 4,
    production: &[(Stone, 3), (Gold, 3)],
    worker_slots: 2,
    population_cap: 0,
    required_terrain: &[Terrain::Mountain, Terrain::Desert],
    races: &[Race::Orc],
    base_hp: 70,
};

static TOTEM: BuildingDef = BuildingDef {
    name: "Totem",
    cost: &[(Food, 10), (Wood, 15), (Stone, 15), (Gold, 5), (Mana, 5)],
    turns_to_build: 3,
    production: &[(Mana, 4)],
    worker_slots: 1,
    population_cap: 0,
    required_terrain: &[Terrain::Plains, Terrain::Desert, Terrain::Forest],
    races: &[Race::Orc],
    base_hp: 40,
};

static SKULL_THRONE: BuildingDef = BuildingDef {
    name: "Skull Throne",
    cost: &[(Food, 50), (Wood, 30), (Stone, 70), (Gold, 40), (Mana, 20)],
    turns_to_build: 10,
    production: &[(Food, 4), (Stone, 5), (Gold, 5), (Mana, 3)],
    worker_slots: 3,
    population_cap: 8,
    required_terrain: &[Terrain::Plains, Terrain::Desert],
    races: &[Race::Orc],
    base_hp: 150,
};

const UPGRADE_TO_2: Amounts = &[(Food, 15), (Wood, 25), (Stone, 20), (Gold, 15)];
const UPGRADE_TO_3: Amounts = &[(Food, 30), (Wood, 50), (Stone, 40), (Gold, 30), (Mana, 5)];

impl BuildingKind {
    pub const ALL: [BuildingKind; 20] = [
        BuildingKind::TownCenter,
        BuildingKind::Farm,
        BuildingKind::LumberMill,
        BuildingKind::Quarry,
        BuildingKind::Mine,
        BuildingKind::Barracks,
        BuildingKind::MageTower,
        BuildingKind::Walls,
        BuildingKind::Market,
        BuildingKind::Castle,
        BuildingKind::Chapel,
        BuildingKind::GrandCathedral,
        BuildingKind::TreeOfLife,
        BuildingKind::Moonwell,
        BuildingKind::AncientArchive,
        BuildingKind::WorldTree,
        BuildingKind::WarPit,
        BuildingKind::BloodForge,
        BuildingKind::Totem,
        BuildingKind::SkullThrone,
    ];

    pub fn def(&self) -> &'static BuildingDef {
        match self {
            BuildingKind::TownCenter => &TOWN_CENTER,
            BuildingKind::Farm => &FARM,
            BuildingKind::LumberMill => &LUMBER_MILL,
            BuildingKind::Quarry => &QUARRY,
            BuildingKind::Mine => &MINE,
            BuildingKind::Barracks => &BARRACKS,
            BuildingKind::MageTower => &MAGE_TOWER,
            BuildingKind::Walls => &WALLS,
            BuildingKind::Market => &MARKET,
            BuildingKind::Castle => &CASTLE,
            BuildingKind::Chapel => &CHAPEL,
            BuildingKind::GrandCathedral => &GRAND_CATHEDRAL,
            BuildingKind::TreeOfLife => &TREE_OF_LIFE,
            BuildingKind::Moonwell => &MOONWELL,
            BuildingKind::AncientArchive => &ANCIENT_ARCHIVE,
            BuildingKind::WorldTree => &WORLD_TREE,
            BuildingKind::WarPit => &WAR_PIT,
            BuildingKind::BloodForge => &BLOOD_FORGE,
            BuildingKind::Totem => &TOTEM,
            BuildingKind::SkullThrone => &SKULL_THRONE,
        }
    }

    /// Snake-case key, as used in save files and tech unlock lists
    pub fn key(&self) -> &'static str {
        match self {
            BuildingKind::TownCenter => "town_center",
            BuildingKind::Farm => "farm",
            BuildingKind::LumberMill => "lumber_mill",
            BuildingKind::Quarry => "quarry",
            BuildingKind::Mine => "mine",
            BuildingKind::Barracks => "barracks",
            BuildingKind::MageTower => "mage_tower",
            BuildingKind::Walls => "walls",
            BuildingKind::Market => "market",
            BuildingKind::Castle => "castle",
            BuildingKind::Chapel => "chapel",
            BuildingKind::GrandCathedral => "grand_cathedral",
            BuildingKind::TreeOfLife => "tree_of_life",
            BuildingKind::Moonwell => "moonwell",
            BuildingKind::AncientArchive => "ancient_archive",
            BuildingKind::WorldTree => "world_tree",
            BuildingKind::WarPit => "war_pit",
            BuildingKind::BloodForge => "blood_forge",
            BuildingKind::Totem => "totem",
            BuildingKind::SkullThrone => "skull_throne",
        }
    }

    pub fn from_key(key: &str) -> Option<BuildingKind> {
        BuildingKind::ALL.into_iter().find(|k| k.key() == key)
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    pub fn available_to(&self, race: Race) -> bool {
        self.def().races.contains(&race)
    }

    /// Buildings that blunt raids
    pub fn is_defensive(&self) -> bool {
        matches!(
            self,
            BuildingKind::Walls | BuildingKind::Barracks | BuildingKind::Castle | BuildingKind::WarPit
        )
    }

    /// Hit points for a building of this kind at the given level
    pub fn max_hp(&self, level: u8) -> i32 {
        (self.def().base_hp * level.max(1) as u32) as i32
    }

    /// Race-specific building whose completion wins the game
    pub fn ultimate_for(race: Race) -> BuildingKind {
        match race {
            Race::Human => BuildingKind::GrandCathedral,
            Race::Elf => BuildingKind::WorldTree,
            Race::Orc => BuildingKind::SkullThrone,
        }
    }
}

impl FromStr for BuildingKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildingKind::from_key(s).ok_or(ActionError::UnknownBuilding)
    }
}

/// Buildings a race can construct, in catalog order
pub fn buildings_for_race(race: Race) -> impl Iterator<Item = BuildingKind> {
    BuildingKind::ALL.into_iter().filter(move |k| k.available_to(race))
}

/// Cost of upgrading to `next_level`, if that level exists
pub fn upgrade_cost(next_level: u8) -> Option<Amounts> {
    match next_level {
        2 => Some(UPGRADE_TO_2),
        3 => Some(UPGRADE_TO_3),
        _ => None,
    }
}

/// Check whether a building of `kind` can go on `tile`
///
/// Order of checks: terrain, water, existing building, cost.
pub fn check_placement(kind: BuildingKind, tile: &HexTile, resources: &Resources) -> Result<(), ActionError> {
    let def = kind.def();

    if !def.required_terrain.contains(&tile.terrain) {
        let names: Vec<&str> = def.required_terrain.iter().map(|t| t.name()).collect();
        return Err(ActionError::WrongTerrain(names.join(" or ")));
    }

    if tile.terrain == Terrain::Water {
        return Err(ActionError::WaterHex);
    }

    if tile.building.is_some() {
        return Err(ActionError::HexOccupied);
    }

    if let Some(missing) = resources.shortfall(def.cost) {
        return Err(ActionError::NotEnough(missing));
    }

    Ok(())
}
