//! Start-of-turn unit processing: training countdowns, movement refresh,
//! hero abilities and exploration

use std::collections::HashSet;

use super::visibility::{reveal, visible_hexes};
use crate::catalog::HeroAbility;
use crate::core::error::ActionError;
use crate::map::{HexCoord, HexMap};
use crate::settlement::{Settlement, Unit};

/// Most hp an area heal restores to one unit per turn
pub const AREA_HEAL_AMOUNT: i32 = 10;

#[derive(Debug, Clone, Default)]
pub struct UnitTurnReport {
    pub logs: Vec<String>,
    pub visible: HashSet<HexCoord>,
}

/// Tick training and restore movement
///
/// Units finishing training get their full move range. Ready units refresh
/// to their move range (nothing carries over); an active charge doubles it
/// once and is spent.
pub fn refresh_units(units: &mut [Unit]) -> Vec<String> {
    let mut logs = Vec::new();
    for unit in units.iter_mut() {
        let def = unit.def();
        if unit.turns_to_ready > 0 {
            unit.turns_to_ready -= 1;
            if unit.turns_to_ready == 0 {
                unit.moves_left = def.move_range as f32;
                logs.push(format!("{} is ready!", def.name));
            }
            continue;
        }

        let mut range = def.move_range as f32;
        if unit.charge_active && def.ability == Some(HeroAbility::Charge) {
            range *= 2.0;
            logs.push(format!("{} charges forward with double movement!", def.name));
        }
        unit.charge_active = false;
        unit.moves_left = range;
    }
    logs
}

/// Area-heal heroes mend adjacent friendly units
pub fn apply_hero_abilities(units: &mut [Unit]) -> Vec<String> {
    let healers: Vec<(usize, HexCoord, &'static str)> = units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.is_alive() && u.def().ability == Some(HeroAbility::AreaHeal))
        .map(|(i, u)| (i, u.coord, u.name()))
        .collect();

    let mut logs = Vec::new();
    for (healer_idx, at, healer_name) in healers {
        for (i, ally) in units.iter_mut().enumerate() {
            if i == healer_idx || !ally.is_alive() || !ally.coord.is_adjacent(&at) {
                continue;
            }
            let healed = AREA_HEAL_AMOUNT.min(ally.max_hp - ally.hp);
            if healed > 0 {
                ally.hp += healed;
                logs.push(format!("{} heals {} for {} HP", healer_name, ally.name(), healed));
            }
        }
    }
    logs
}

/// Full unit phase for one side
///
/// Order: training and movement refresh, hero abilities, exploration,
/// then dead units are removed.
pub fn process_unit_turn(settlement: &mut Settlement, map: &HexMap) -> UnitTurnReport {
    let mut logs = refresh_units(&mut settlement.units);
    logs.extend(apply_hero_abilities(&mut settlement.units));

    let visible = visible_hexes(settlement, map);
    reveal(settlement, &visible);

    let removed = settlement.prune_dead_units();
    if removed > 0 {
        tracing::debug!(removed, "pruned dead units");
    }

    UnitTurnReport { logs, visible }
}

/// Arm a charge-capable hero so its next refresh doubles its movement
pub fn activate_charge(unit: &mut Unit) -> Result<(), ActionError> {
    if unit.def().ability != Some(HeroAbility::Charge) {
        return Err(ActionError::NoChargeAbility);
    }
    if unit.charge_active {
        return Err(ActionError::ChargeActive);
    }
    unit.charge_active = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitKind;
    use crate::core::types::{Difficulty, Owner, Race};
    use crate::settlement::UnitId;

    fn unit(id: u64, kind: UnitKind, coord: HexCoord) -> Unit {
        let hp = kind.def().hp;
        Unit {
            id: UnitId(id),
            kind,
            coord,
            hp,
            max_hp: hp,
            moves_left: 0.0,
            turns_to_ready: 0,
            owner: Owner::Player,
            charge_active: false,
        }
    }

    #[test]
    fn test_training_countdown_then_ready() {
        let mut units = vec![unit(0, UnitKind::WarriorOrc, HexCoord::new(0, 0))];
        units[0].turns_to_ready = 2;

        assert!(refresh_units(&mut units).is_empty());
        assert_eq!(units[0].moves_left, 0.0);
        assert_eq!(refresh_units(&mut units), vec!["Grunt is ready!".to_string()]);
        assert_eq!(units[0].moves_left, 3.0);
    }

    #[test]
    fn test_refresh_does_not_carry_over() {
        let mut units = vec![unit(0, UnitKind::WarriorElf, HexCoord::new(0, 0))];
        units[0].moves_left = 1.5;
        refresh_units(&mut units);
        assert_eq!(units[0].moves_left, 4.0);
    }

    #[test]
    fn test_charge_doubles_once() {
        let mut units = vec![unit(0, UnitKind::HeroOrc, HexCoord::new(0, 0))];
        activate_charge(&mut units[0]).unwrap();
        assert_eq!(activate_charge(&mut units[0]), Err(ActionError::ChargeActive));

        let logs = refresh_units(&mut units);
        assert_eq!(units[0].moves_left, 6.0);
        assert_eq!(logs, vec!["Warchief charges forward with double movement!".to_string()]);
        assert!(!units[0].charge_active);

        refresh_units(&mut units);
        assert_eq!(units[0].moves_left, 3.0);
    }

    #[test]
    fn test_charge_needs_ability() {
        let mut grunt = unit(0, UnitKind::WarriorOrc, HexCoord::new(0, 0));
        assert_eq!(activate_charge(&mut grunt), Err(ActionError::NoChargeAbility));
    }

    #[test]
    fn test_area_heal_caps_at_max() {
        let mut units = vec![
            unit(0, UnitKind::HeroElf, HexCoord::new(0, 0)),
            unit(1, UnitKind::WarriorElf, HexCoord::new(1, 0)),
            unit(2, UnitKind::ArcherElf, HexCoord::new(0, 1)),
            unit(3, UnitKind::ArcherElf, HexCoord::new(3, 3)),
        ];
        units[1].hp = 20;
        units[2].hp = 18;
        units[3].hp = 1;

        let logs = apply_hero_abilities(&mut units);
        assert_eq!(units[1].hp, 30);
        assert_eq!(units[2].hp, 22);
        assert_eq!(units[3].hp, 1);
        assert_eq!(logs[0], "Archmage heals Sentinel for 10 HP");
        assert_eq!(logs[1], "Archmage heals Ranger for 4 HP");
    }

    #[test]
    fn test_process_unit_turn_prunes_and_explores() {
        let map = HexMap::generate_simple(10, 10, 9);
        let mut s = Settlement::new(Race::Human, Difficulty::Normal, Owner::Player);
        s.units.push(unit(0, UnitKind::WarriorHuman, HexCoord::new(2, 2)));
        s.units.push(unit(1, UnitKind::WarriorHuman, HexCoord::new(6, 6)));
        s.units[1].hp = 0;

        let report = process_unit_turn(&mut s, &map);
        assert_eq!(s.units.len(), 1);
        assert!(report.visible.contains(&HexCoord::new(2, 2)));
        assert!(s.explored.contains(&HexCoord::new(5, 2)));
    }
}
