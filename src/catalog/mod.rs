//! Static game data: resources, buildings and units
//!
//! Catalogs are immutable. Anything that changes a stat during play
//! (rally, charge) is applied as a modifier at the call site.

pub mod buildings;
pub mod resources;
pub mod units;

pub use buildings::{buildings_for_race, check_placement, upgrade_cost, BuildingDef, BuildingKind, MAX_LEVEL};
pub use resources::{
    building_yield, improvement_bonus, race_bonus, starting_resources, terrain_bonus, IMPROVEMENT_TURNS,
};
pub use units::{trainable_units, units_for_race, HeroAbility, UnitDef, UnitKind, UnitRole};
