//! Settlement state: stockpile, buildings, units, population and research

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{starting_resources, BuildingKind, UnitDef, UnitKind};
use crate::core::types::{Difficulty, Owner, Race, ResourceType, Resources};
use crate::map::{HexBuilding, HexCoord};
use crate::tech::TechState;

/// Population a settlement starts with (and its starting cap)
pub const STARTING_POPULATION: u32 = 5;

/// Food spent to grow the population by one
pub const GROWTH_FOOD_COST: u32 = 5;

/// A placed building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub coord: HexCoord,
    /// Zero once construction (or rebuilding) is done
    pub turns_remaining: u32,
    pub level: u8,
    #[serde(default)]
    pub workers: u32,
    #[serde(default)]
    pub hp: i32,
    #[serde(default)]
    pub max_hp: i32,
    #[serde(default)]
    pub owner: Owner,
}

impl Building {
    pub fn new(kind: BuildingKind, coord: HexCoord, turns_remaining: u32, owner: Owner) -> Self {
        let max_hp = kind.max_hp(1);
        Self {
            kind,
            coord,
            turns_remaining,
            level: 1,
            workers: 0,
            hp: max_hp,
            max_hp,
            owner,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.turns_remaining == 0
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp <= 0
    }

    /// The record written onto the building's hex
    pub fn hex_mark(&self) -> HexBuilding {
        HexBuilding {
            kind: self.kind,
            turns_remaining: self.turns_remaining,
            level: self.level,
            owner: self.owner,
        }
    }

    /// Knock the building down to a rebuild: zero hp, full build time again
    pub fn destroy_for_rebuild(&mut self) {
        self.hp = 0;
        self.turns_remaining = self.kind.def().turns_to_build;
    }
}

/// Stable identifier for a unit within its settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u64);

/// A trained (or training) unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub coord: HexCoord,
    pub hp: i32,
    pub max_hp: i32,
    /// Remaining movement budget this turn; terrain costs are fractional
    pub moves_left: f32,
    /// Training turns left; the unit cannot act until this reaches zero
    pub turns_to_ready: u32,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub charge_active: bool,
}

impl Unit {
    pub fn def(&self) -> &'static UnitDef {
        self.kind.def()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_ready(&self) -> bool {
        self.turns_to_ready == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    pub current: u32,
    /// Growth stops at the cap; events may push `current` past it
    pub cap: u32,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            current: STARTING_POPULATION,
            cap: STARTING_POPULATION,
        }
    }
}

/// A hex improvement in progress or finished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexImprovement {
    pub coord: HexCoord,
    pub turns_remaining: u32,
    /// Yield applied every turn once finished
    pub bonus: Resources,
}

/// One side of the game: the player's settlement or the AI's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub race: Race,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub owner: Owner,
    pub turn: u32,
    pub resources: Resources,
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub population: Population,
    #[serde(default)]
    pub explored: BTreeSet<HexCoord>,
    #[serde(default)]
    pub improvements: Vec<HexImprovement>,
    #[serde(default)]
    pub tech: TechState,
    #[serde(default)]
    next_unit_id: u64,
}

impl Settlement {
    /// Fresh settlement on turn 1 with the race's starting stockpile
    pub fn new(race: Race, difficulty: Difficulty, owner: Owner) -> Self {
        Self {
            race,
            difficulty,
            owner,
            turn: 1,
            resources: starting_resources(race),
            buildings: Vec::new(),
            units: Vec::new(),
            population: Population::default(),
            explored: BTreeSet::new(),
            improvements: Vec::new(),
            tech: TechState::new(race),
            next_unit_id: 0,
        }
    }

    /// Fill in fields that older snapshots did not carry
    pub fn normalize(&mut self) {
        if self.tech.is_empty() {
            self.tech = TechState::new(self.race);
        }
        for building in &mut self.buildings {
            if building.max_hp <= 0 {
                building.max_hp = building.kind.max_hp(building.level);
                building.hp = building.max_hp;
            }
        }
        let highest = self.units.iter().map(|u| u.id.0 + 1).max().unwrap_or(0);
        self.next_unit_id = self.next_unit_id.max(highest);
    }

    pub fn allocate_unit_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    pub fn town_center(&self) -> Option<&Building> {
        self.buildings.iter().find(|b| b.kind == BuildingKind::TownCenter)
    }

    pub fn town_center_mut(&mut self) -> Option<&mut Building> {
        self.buildings.iter_mut().find(|b| b.kind == BuildingKind::TownCenter)
    }

    pub fn building_at(&self, coord: HexCoord) -> Option<&Building> {
        self.buildings.iter().find(|b| b.coord == coord)
    }

    pub fn building_at_mut(&mut self, coord: HexCoord) -> Option<&mut Building> {
        self.buildings.iter_mut().find(|b| b.coord == coord)
    }

    pub fn completed_buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter().filter(|b| b.is_complete())
    }

    /// Number of complete buildings of one kind
    pub fn completed_count(&self, kind: BuildingKind) -> usize {
        self.completed_buildings().filter(|b| b.kind == kind).count()
    }

    pub fn count_of(&self, kind: BuildingKind) -> usize {
        self.buildings.iter().filter(|b| b.kind == kind).count()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn unit_at(&self, coord: HexCoord) -> Option<&Unit> {
        self.units.iter().find(|u| u.coord == coord)
    }

    pub fn has_hero(&self) -> bool {
        self.units.iter().any(|u| u.kind.is_hero())
    }

    pub fn assigned_workers(&self) -> u32 {
        self.buildings.iter().map(|b| b.workers).sum()
    }

    pub fn available_workers(&self) -> u32 {
        self.population.current.saturating_sub(self.assigned_workers())
    }

    /// Cap = sum of `population_cap × level` over complete buildings
    pub fn recalc_population_cap(&mut self) {
        self.population.cap = self
            .completed_buildings()
            .map(|b| b.kind.def().population_cap * b.level as u32)
            .sum();
    }

    /// Grow by one if below cap and food allows; returns whether it grew
    pub fn grow_population(&mut self) -> bool {
        if self.population.current < self.population.cap
            && self.resources.get(ResourceType::Food) >= GROWTH_FOOD_COST
        {
            self.resources.remove(ResourceType::Food, GROWTH_FOOD_COST);
            self.population.current += 1;
            return true;
        }
        false
    }

    /// Remove units with no hp left
    pub fn prune_dead_units(&mut self) -> usize {
        let before = self.units.len();
        self.units.retain(|u| u.is_alive());
        before - self.units.len()
    }

    /// Highest level among complete buildings
    pub fn max_building_level(&self) -> u8 {
        self.completed_buildings().map(|b| b.level).max().unwrap_or(0)
    }
}
