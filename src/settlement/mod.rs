//! Settlement state and the actions a side can take on it

pub mod actions;
pub mod state;

pub use state::{
    Building, HexImprovement, Population, Settlement, Unit, UnitId, GROWTH_FOOD_COST, STARTING_POPULATION,
};
