//! Hex map - the keyed terrain dataset the simulation runs on
//!
//! Terrain is fixed once generated; the simulation only writes building
//! and improvement marks.

pub mod grid;
pub mod hex;

pub use grid::{HexBuilding, HexImprovementMark, HexMap, HexTile};
pub use hex::{HexCoord, StrategicResource, Terrain};
