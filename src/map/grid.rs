//! The hex dataset the simulation reads terrain from and marks buildings on

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::hex::{HexCoord, StrategicResource, Terrain};
use crate::catalog::BuildingKind;
use crate::core::types::{Owner, Resources};

/// Building record stored on a hex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexBuilding {
    pub kind: BuildingKind,
    pub turns_remaining: u32,
    pub level: u8,
    #[serde(default)]
    pub owner: Owner,
}

/// Improvement record stored on a hex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexImprovementMark {
    pub turns_remaining: u32,
    pub bonus: Resources,
}

/// A single hex tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexTile {
    pub coord: HexCoord,
    pub terrain: Terrain,
    #[serde(default)]
    pub resource: Option<StrategicResource>,
    #[serde(default)]
    pub river: bool,
    #[serde(default)]
    pub building: Option<HexBuilding>,
    #[serde(default)]
    pub improvement: Option<HexImprovementMark>,
}

impl HexTile {
    pub fn new(coord: HexCoord, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            resource: None,
            river: false,
            building: None,
            improvement: None,
        }
    }

    pub fn with_resource(mut self, resource: StrategicResource) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn with_river(mut self) -> Self {
        self.river = true;
        self
    }
}

/// Serialized form of the map: a flat tile list in (r, q) order
#[derive(Serialize, Deserialize)]
struct MapRecord {
    width: i32,
    height: i32,
    tiles: Vec<HexTile>,
}

/// The map containing all hex tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "MapRecord", into = "MapRecord")]
pub struct HexMap {
    pub hexes: HashMap<HexCoord, HexTile>,
    pub width: i32,
    pub height: i32,
}

impl From<MapRecord> for HexMap {
    fn from(record: MapRecord) -> Self {
        let mut map = HexMap::new(record.width, record.height);
        for tile in record.tiles {
            map.insert(tile);
        }
        map
    }
}

impl From<HexMap> for MapRecord {
    fn from(map: HexMap) -> Self {
        let mut tiles: Vec<HexTile> = map.hexes.into_values().collect();
        tiles.sort_by_key(|t| (t.coord.r, t.coord.q));
        MapRecord {
            width: map.width,
            height: map.height,
            tiles,
        }
    }
}

impl HexMap {
    /// Create a new empty map
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            hexes: HashMap::new(),
            width,
            height,
        }
    }

    /// Build a map from an arbitrary tile set (tests, hand-made scenarios)
    pub fn from_tiles(tiles: impl IntoIterator<Item = HexTile>) -> Self {
        let mut map = Self::new(0, 0);
        for tile in tiles {
            map.width = map.width.max(tile.coord.q + 1);
            map.height = map.height.max(tile.coord.r + 1);
            map.insert(tile);
        }
        map
    }

    /// Generate a simple map with varied terrain
    ///
    /// Stand-in for the real map generator: a hash of the coordinate picks
    /// terrain, strategic resources and rivers deterministically.
    pub fn generate_simple(width: i32, height: i32, seed: u64) -> Self {
        let mut map = Self::new(width, height);

        for q in 0..width {
            for r in 0..height {
                let coord = HexCoord::new(q, r);
                let hash = Self::simple_hash(q, r, seed);
                let terrain = match hash % 10 {
                    0..=3 => Terrain::Plains,
                    4 | 5 => Terrain::Forest,
                    6 => Terrain::Mountain,
                    7 => Terrain::Desert,
                    8 => Terrain::Swamp,
                    _ => Terrain::Water,
                };
                let mut tile = HexTile::new(coord, terrain);

                let roll = (hash >> 8) % 100;
                tile.resource = match (terrain, roll) {
                    (Terrain::Mountain | Terrain::Plains, 0..=5) => Some(StrategicResource::Iron),
                    (Terrain::Mountain | Terrain::Forest, 6..=9) => Some(StrategicResource::Crystal),
                    (Terrain::Plains, 10..=14) => Some(StrategicResource::FertileSoil),
                    (Terrain::Desert | Terrain::Mountain, 15..=18) => Some(StrategicResource::GoldVein),
                    (Terrain::Forest | Terrain::Swamp, 19..=21) => Some(StrategicResource::ManaSpring),
                    _ => None,
                };
                if terrain != Terrain::Water && (hash >> 16) % 17 == 0 {
                    tile = tile.with_river();
                }

                map.hexes.insert(coord, tile);
            }
        }

        map
    }

    fn simple_hash(q: i32, r: i32, seed: u64) -> u64 {
        let mut h = seed;
        h = h.wrapping_mul(31).wrapping_add(q as u64);
        h = h.wrapping_mul(31).wrapping_add(r as u64);
        h = h.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        h ^ (h >> 29)
    }

    pub fn insert(&mut self, tile: HexTile) {
        self.hexes.insert(tile.coord, tile);
    }

    /// Get a tile at the given coordinate
    pub fn get(&self, coord: &HexCoord) -> Option<&HexTile> {
        self.hexes.get(coord)
    }

    /// Get a mutable tile at the given coordinate
    pub fn get_mut(&mut self, coord: &HexCoord) -> Option<&mut HexTile> {
        self.hexes.get_mut(coord)
    }

    /// Check if a coordinate is on the map
    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.hexes.contains_key(coord)
    }

    pub fn terrain(&self, coord: &HexCoord) -> Option<Terrain> {
        self.get(coord).map(|t| t.terrain)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &HexTile> {
        self.hexes.values()
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    /// Record (or overwrite) the building mark on a hex
    pub fn mark_building(&mut self, coord: HexCoord, mark: HexBuilding) {
        if let Some(tile) = self.get_mut(&coord) {
            tile.building = Some(mark);
        }
    }

    /// Sync the construction countdown of an existing building mark
    pub fn set_building_turns(&mut self, coord: HexCoord, turns_remaining: u32) {
        if let Some(building) = self.get_mut(&coord).and_then(|t| t.building.as_mut()) {
            building.turns_remaining = turns_remaining;
        }
    }

    pub fn set_building_level(&mut self, coord: HexCoord, level: u8) {
        if let Some(building) = self.get_mut(&coord).and_then(|t| t.building.as_mut()) {
            building.level = level;
        }
    }

    pub fn clear_building(&mut self, coord: HexCoord) {
        if let Some(tile) = self.get_mut(&coord) {
            tile.building = None;
        }
    }
}
