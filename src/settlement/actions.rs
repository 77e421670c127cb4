//! Player-facing settlement actions
//!
//! Each action validates first and only then mutates, so a rejected call
//! leaves both the settlement and the map untouched.

use super::state::{Building, HexImprovement, Settlement};
use crate::catalog::{check_placement, improvement_bonus, upgrade_cost, BuildingKind, IMPROVEMENT_TURNS, MAX_LEVEL};
use crate::core::error::ActionError;
use crate::core::types::Resources;
use crate::map::{HexCoord, HexImprovementMark, HexMap, Terrain};

impl Settlement {
    /// Place a new building, paying its cost and marking the hex
    ///
    /// Buildings with no build time (the Town Center) are complete at once.
    pub fn place_building(&mut self, kind: BuildingKind, coord: HexCoord, map: &mut HexMap) -> Result<(), ActionError> {
        if !kind.available_to(self.race) {
            return Err(ActionError::BuildingNotForRace(kind.name()));
        }
        let tile = map.get(&coord).ok_or(ActionError::NoSuchHex)?;
        check_placement(kind, tile, &self.resources)?;

        let def = kind.def();
        self.resources.pay(def.cost)?;
        let building = Building::new(kind, coord, def.turns_to_build, self.owner);
        map.mark_building(coord, building.hex_mark());
        self.buildings.push(building);

        tracing::debug!(race = %self.race, building = kind.name(), %coord, "building placed");
        Ok(())
    }

    /// Raise a complete building one level; hp grows with the new maximum
    pub fn upgrade_building(&mut self, coord: HexCoord, map: &mut HexMap) -> Result<u8, ActionError> {
        let building = self.building_at(coord).ok_or(ActionError::NoBuilding)?;
        if !building.is_complete() {
            return Err(ActionError::UnderConstruction);
        }
        if building.level >= MAX_LEVEL {
            return Err(ActionError::MaxLevel);
        }
        let next_level = building.level + 1;
        let cost = upgrade_cost(next_level).ok_or(ActionError::MaxLevel)?;
        self.resources.pay(cost)?;

        let building = self.building_at_mut(coord).ok_or(ActionError::NoBuilding)?;
        let new_max = building.kind.max_hp(next_level);
        building.hp += new_max - building.max_hp;
        building.max_hp = new_max;
        building.level = next_level;
        map.set_building_level(coord, next_level);

        tracing::debug!(building = building.kind.name(), level = next_level, "building upgraded");
        Ok(next_level)
    }

    pub fn assign_worker(&mut self, coord: HexCoord) -> Result<(), ActionError> {
        let idle = self.available_workers();
        let building = self.building_at_mut(coord).ok_or(ActionError::NoBuilding)?;
        if building.workers >= building.kind.def().worker_slots {
            return Err(ActionError::WorkerSlotsFull);
        }
        if idle == 0 {
            return Err(ActionError::NoIdleWorkers);
        }
        building.workers += 1;
        Ok(())
    }

    pub fn unassign_worker(&mut self, coord: HexCoord) -> Result<(), ActionError> {
        let building = self.building_at_mut(coord).ok_or(ActionError::NoBuilding)?;
        if building.workers == 0 {
            return Err(ActionError::NoWorkersAssigned);
        }
        building.workers -= 1;
        Ok(())
    }

    /// Begin improving a hex; it yields its terrain's bonus every turn once done
    pub fn start_improvement(&mut self, coord: HexCoord, map: &mut HexMap) -> Result<(), ActionError> {
        let tile = map.get_mut(&coord).ok_or(ActionError::NoSuchHex)?;
        if tile.terrain == Terrain::Water {
            return Err(ActionError::WaterHex);
        }
        if tile.improvement.is_some() || self.improvements.iter().any(|i| i.coord == coord) {
            return Err(ActionError::AlreadyImproved);
        }
        let (resource, amount) = improvement_bonus(tile.terrain).ok_or(ActionError::WaterHex)?;
        let bonus = Resources::from_amounts(&[(resource, amount)]);

        tile.improvement = Some(HexImprovementMark {
            turns_remaining: IMPROVEMENT_TURNS,
            bonus: bonus.clone(),
        });
        self.improvements.push(HexImprovement {
            coord,
            turns_remaining: IMPROVEMENT_TURNS,
            bonus,
        });
        Ok(())
    }

    pub fn start_research(&mut self, tech_id: &str) -> Result<(), ActionError> {
        self.tech.start_research(self.race, tech_id, &mut self.resources)
    }
}
