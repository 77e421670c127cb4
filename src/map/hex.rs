//! Axial hex coordinates and terrain

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axial hex coordinate (q, r system)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// All 6 adjacent hexes
    ///
    /// The order is fixed and breaks ties in greedy movement.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        [
            HexCoord::new(self.q + 1, self.r),
            HexCoord::new(self.q - 1, self.r),
            HexCoord::new(self.q, self.r + 1),
            HexCoord::new(self.q, self.r - 1),
            HexCoord::new(self.q + 1, self.r - 1),
            HexCoord::new(self.q - 1, self.r + 1),
        ]
    }

    /// Convert to cube coordinates (x = q, y = -q - r, z = r)
    pub fn to_cube(&self) -> (i32, i32, i32) {
        let x = self.q;
        let z = self.r;
        let y = -x - z;
        (x, y, z)
    }

    /// Exact hex distance: Chebyshev distance in cube space
    pub fn distance(&self, other: &HexCoord) -> i32 {
        let (ax, ay, az) = self.to_cube();
        let (bx, by, bz) = other.to_cube();
        (ax - bx).abs().max((ay - by).abs()).max((az - bz).abs())
    }

    pub fn is_adjacent(&self, other: &HexCoord) -> bool {
        self.distance(other) == 1
    }

    /// Midpoint of two hexes, halves rounded toward positive infinity
    pub fn midpoint(&self, other: &HexCoord) -> HexCoord {
        HexCoord::new(
            (self.q + other.q + 1).div_euclid(2),
            (self.r + other.r + 1).div_euclid(2),
        )
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// Terrain types affecting movement, placement and yields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    #[default]
    Plains,
    Forest,
    Mountain,
    Water,
    Desert,
    Swamp,
}

impl Terrain {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plains => "plains",
            Self::Forest => "forest",
            Self::Mountain => "mountain",
            Self::Water => "water",
            Self::Desert => "desert",
            Self::Swamp => "swamp",
        }
    }

    /// Movement points spent entering this hex, `None` when impassable
    pub fn movement_cost(&self) -> Option<f32> {
        match self {
            Self::Plains | Self::Desert => Some(1.0),
            Self::Forest => Some(1.5),
            Self::Mountain | Self::Swamp => Some(2.0),
            Self::Water => None,
        }
    }

    pub fn is_passable(&self) -> bool {
        self.movement_cost().is_some()
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategic resource markers left by the map generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategicResource {
    Iron,
    Crystal,
    FertileSoil,
    GoldVein,
    ManaSpring,
}
