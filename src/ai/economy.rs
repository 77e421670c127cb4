//! AI economy: placement search, gathering, construction, build and train orders

use crate::catalog::{
    building_yield, check_placement, terrain_bonus, units_for_race, BuildingKind, UnitKind, UnitRole,
};
use crate::core::types::{Difficulty, Resources};
use crate::map::{HexCoord, HexMap};
use crate::settlement::{Building, Settlement};
use crate::units::{can_train_unit, train_unit};

/// Order the AI considers new buildings in
pub const BUILD_PRIORITY: [BuildingKind; 7] = [
    BuildingKind::Farm,
    BuildingKind::LumberMill,
    BuildingKind::Quarry,
    BuildingKind::Mine,
    BuildingKind::Barracks,
    BuildingKind::MageTower,
    BuildingKind::Walls,
];

/// Placement search gives up beyond this many rings
pub const SEARCH_RADIUS: i32 = 20;

/// Most buildings of one kind the AI will own
pub fn build_limit(kind: BuildingKind) -> usize {
    if kind == BuildingKind::Farm {
        4
    } else {
        3
    }
}

/// First hex near `center` where `kind` may be placed
///
/// Scans square rings of growing radius, `dq` then `dr` ascending.
pub fn find_valid_hex(center: HexCoord, kind: BuildingKind, map: &HexMap, resources: &Resources) -> Option<HexCoord> {
    for radius in 0..SEARCH_RADIUS {
        for dq in -radius..=radius {
            for dr in -radius..=radius {
                let coord = HexCoord::new(center.q + dq, center.r + dr);
                let Some(tile) = map.get(&coord) else {
                    continue;
                };
                if check_placement(kind, tile, resources).is_ok() {
                    return Some(coord);
                }
            }
        }
    }
    None
}

/// Build time for the AI at its difficulty, never below one turn
pub fn ai_build_time(kind: BuildingKind, difficulty: Difficulty) -> u32 {
    if kind == BuildingKind::TownCenter {
        return 0;
    }
    let scaled = (kind.def().turns_to_build as f64 * difficulty.ai_build_speed()).round() as u32;
    scaled.max(1)
}

/// Pay for a building and put it down at `coord`
///
/// The caller has already found the hex valid and affordable.
pub(crate) fn place_ai_building(ai: &mut Settlement, kind: BuildingKind, coord: HexCoord, map: &mut HexMap) {
    for &(resource, amount) in kind.def().cost {
        ai.resources.remove(resource, amount);
    }
    let building = Building::new(kind, coord, ai_build_time(kind, ai.difficulty), ai.owner);
    map.mark_building(coord, building.hex_mark());
    ai.buildings.push(building);
}

/// Yields of every complete AI building, scaled by difficulty
///
/// The AI staffs its buildings implicitly: the worker ratio is the
/// population spread over two slots per building.
pub fn gather_ai_resources(ai: &mut Settlement, map: &HexMap) -> Resources {
    let multiplier = ai.difficulty.ai_resource_multiplier();
    let staffed = if ai.buildings.is_empty() {
        1.0
    } else {
        (ai.population.current as f64 / (ai.buildings.len() as f64 * 2.0)).min(1.0)
    };

    let mut gathered = Resources::new();
    for building in ai.completed_buildings() {
        let def = building.kind.def();
        let ratio = if def.worker_slots > 0 { staffed } else { 1.0 };
        gathered.add_amounts(&building_yield(def.production, ai.race, ratio, multiplier));
        if let Some((resource, amount)) = map.terrain(&building.coord).and_then(terrain_bonus) {
            gathered.add(resource, amount);
        }
    }
    ai.resources.add_all(&gathered);
    gathered
}

/// Tick construction; completed buildings get their hex mark synced
pub fn advance_ai_construction(ai: &mut Settlement, map: &mut HexMap, logs: &mut Vec<String>) {
    for building in ai.buildings.iter_mut().filter(|b| !b.is_complete()) {
        building.turns_remaining -= 1;
        if building.is_complete() {
            if building.hp <= 0 {
                building.hp = building.max_hp;
            }
            map.set_building_turns(building.coord, 0);
            logs.push(format!("AI completed {}", building.kind.name()));
        }
    }
    ai.recalc_population_cap();
}

/// Start at most one building, first affordable kind in priority order
pub fn build_phase(ai: &mut Settlement, map: &mut HexMap, logs: &mut Vec<String>) -> Option<BuildingKind> {
    for kind in BUILD_PRIORITY {
        if !kind.available_to(ai.race) || ai.count_of(kind) >= build_limit(kind) {
            continue;
        }
        if !ai.resources.has_materials(kind.def().cost) {
            continue;
        }
        let center = ai.town_center()?.coord;
        let Some(coord) = find_valid_hex(center, kind, map, &ai.resources) else {
            continue;
        };

        place_ai_building(ai, kind, coord, map);
        logs.push(format!("AI builds {}", kind.name()));
        tracing::debug!(race = %ai.race, building = kind.name(), at = %coord, "AI builds");
        return Some(kind);
    }
    None
}

/// Military units the AI trains, warriors first
pub fn training_order(ai: &Settlement) -> Vec<UnitKind> {
    let mut order: Vec<UnitKind> = units_for_race(ai.race)
        .filter(|k| !matches!(k.def().role, UnitRole::Worker | UnitRole::Hero))
        .collect();
    order.sort_by_key(|k| k.def().role);
    order
}

/// Train at most one unit, first that passes the training checks
pub fn train_phase(ai: &mut Settlement, logs: &mut Vec<String>) -> Option<UnitKind> {
    let kind = training_order(ai)
        .into_iter()
        .find(|k| can_train_unit(ai, *k).is_ok())?;
    train_unit(ai, kind).ok()?;
    logs.push(format!("AI trains {}", kind.name()));
    Some(kind)
}
