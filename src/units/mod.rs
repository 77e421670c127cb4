//! Unit movement, combat, fog of war and training

pub mod combat;
pub mod movement;
pub mod refresh;
pub mod training;
pub mod visibility;

pub use combat::{rally_bonus, resolve_combat, CombatModifiers, CombatOutcome, RALLY_BONUS};
pub use movement::{move_unit, movement_range, path_cost, ReachableHex, UNREACHABLE_MOVE_COST};
pub use refresh::{activate_charge, apply_hero_abilities, process_unit_turn, refresh_units, UnitTurnReport};
pub use training::{can_train_unit, train_unit};
pub use visibility::{reveal, visible_hexes, BUILDING_VISION};
