//! Unit training

use crate::catalog::UnitKind;
use crate::core::error::ActionError;
use crate::map::HexCoord;
use crate::settlement::{Settlement, Unit, UnitId};

/// Check whether `kind` can be trained; on success returns the spawn hex
///
/// Checks run in order: race, cost, population, a free training
/// building, the one-hero limit.
pub fn can_train_unit(settlement: &Settlement, kind: UnitKind) -> Result<HexCoord, ActionError> {
    let def = kind.def();
    if !kind.available_to(settlement.race) {
        return Err(ActionError::UnknownUnit);
    }

    if let Some(missing) = settlement.resources.shortfall(def.cost) {
        return Err(ActionError::NotEnough(missing));
    }

    // Every unit needs a citizen beyond those already serving
    if settlement.population.current as usize <= settlement.units.len() {
        return Err(ActionError::NotEnoughPopulation);
    }

    let spawn = settlement
        .completed_buildings()
        .filter(|b| b.kind == def.train_at)
        .map(|b| b.coord)
        .find(|coord| settlement.unit_at(*coord).is_none())
        .ok_or_else(|| ActionError::RequiresBuilding(def.train_at.name().to_string()))?;

    if kind.is_hero() && settlement.has_hero() {
        return Err(ActionError::HeroLimit);
    }

    Ok(spawn)
}

/// Pay for and start training a unit on its training building's hex
///
/// The unit cannot move until its training countdown reaches zero.
pub fn train_unit(settlement: &mut Settlement, kind: UnitKind) -> Result<UnitId, ActionError> {
    let spawn = can_train_unit(settlement, kind)?;
    let def = kind.def();
    settlement.resources.pay(def.cost)?;

    let id = settlement.allocate_unit_id();
    settlement.units.push(Unit {
        id,
        kind,
        coord: spawn,
        hp: def.hp,
        max_hp: def.hp,
        moves_left: 0.0,
        turns_to_ready: def.train_turns,
        owner: settlement.owner,
        charge_active: false,
    });

    tracing::debug!(race = %settlement.race, unit = def.name, at = %spawn, "unit training started");
    Ok(id)
}
