//! Core type definitions used throughout the codebase

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::error::ActionError;

/// Playable races
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    Human,
    Elf,
    Orc,
}

impl Race {
    pub const ALL: [Race; 3] = [Race::Human, Race::Elf, Race::Orc];

    pub fn name(&self) -> &'static str {
        match self {
            Race::Human => "human",
            Race::Elf => "elf",
            Race::Orc => "orc",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Race {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Race::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown race '{}' (expected human, elf or orc)", s))
    }
}

/// Difficulty tag, shared by the player's victory thresholds and the AI's economy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Scales the population and survival victory targets
    pub fn victory_multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.4,
        }
    }

    /// Scales the AI's starting stock and every AI yield
    pub fn ai_resource_multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Scales AI build times (lower is faster)
    pub fn ai_build_speed(&self) -> f64 {
        match self {
            Difficulty::Easy | Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.6,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown difficulty '{}' (expected easy, normal or hard)", s))
    }
}

/// Which side owns a building or unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    #[default]
    Player,
    Ai,
}

/// The five stockpiled resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Food,
    Wood,
    Stone,
    Gold,
    Mana,
}

impl ResourceType {
    /// Canonical order; every iteration over a stockpile goes through this
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Food,
        ResourceType::Wood,
        ResourceType::Stone,
        ResourceType::Gold,
        ResourceType::Mana,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Food => "food",
            ResourceType::Wood => "wood",
            ResourceType::Stone => "stone",
            ResourceType::Gold => "gold",
            ResourceType::Mana => "mana",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A static cost or yield table, as stored in the catalogs
pub type Amounts = &'static [(ResourceType, u32)];

/// Resource stockpile for a settlement
///
/// Amounts never go below zero: `remove` saturates and `pay` checks first.
/// Serialized as a map in canonical order with zero entries left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ResourceType, u32>", into = "BTreeMap<ResourceType, u32>")]
pub struct Resources {
    amounts: AHashMap<ResourceType, u32>,
}

impl From<BTreeMap<ResourceType, u32>> for Resources {
    fn from(amounts: BTreeMap<ResourceType, u32>) -> Self {
        Self {
            amounts: amounts.into_iter().collect(),
        }
    }
}

impl From<Resources> for BTreeMap<ResourceType, u32> {
    fn from(resources: Resources) -> Self {
        resources.iter().collect()
    }
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_amounts(amounts: &[(ResourceType, u32)]) -> Self {
        let mut resources = Self::new();
        resources.add_amounts(amounts);
        resources
    }

    pub fn get(&self, resource: ResourceType) -> u32 {
        self.amounts.get(&resource).copied().unwrap_or(0)
    }

    pub fn set(&mut self, resource: ResourceType, amount: u32) {
        self.amounts.insert(resource, amount);
    }

    pub fn add(&mut self, resource: ResourceType, amount: u32) {
        let entry = self.amounts.entry(resource).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Remove up to `amount`, returns what was actually removed
    pub fn remove(&mut self, resource: ResourceType, amount: u32) -> u32 {
        let entry = self.amounts.entry(resource).or_insert(0);
        let removed = amount.min(*entry);
        *entry -= removed;
        removed
    }

    pub fn add_amounts(&mut self, amounts: &[(ResourceType, u32)]) {
        for &(resource, amount) in amounts {
            self.add(resource, amount);
        }
    }

    pub fn add_all(&mut self, other: &Resources) {
        for (resource, amount) in other.iter() {
            self.add(resource, amount);
        }
    }

    /// Non-zero entries in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, u32)> + '_ {
        ResourceType::ALL
            .into_iter()
            .map(|r| (r, self.get(r)))
            .filter(|(_, amount)| *amount > 0)
    }

    pub fn total(&self) -> u32 {
        ResourceType::ALL.iter().map(|r| self.get(*r)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// First resource (in canonical order) that falls short of the requirements
    pub fn shortfall(&self, requirements: &[(ResourceType, u32)]) -> Option<ResourceType> {
        ResourceType::ALL.into_iter().find(|r| {
            let needed: u32 = requirements
                .iter()
                .filter(|(res, _)| res == r)
                .map(|(_, amount)| *amount)
                .sum();
            self.get(*r) < needed
        })
    }

    /// Check if the stockpile covers all requirements
    pub fn has_materials(&self, requirements: &[(ResourceType, u32)]) -> bool {
        self.shortfall(requirements).is_none()
    }

    /// Deduct a cost atomically, or name the first missing resource
    pub fn pay(&mut self, cost: &[(ResourceType, u32)]) -> Result<(), ActionError> {
        if let Some(missing) = self.shortfall(cost) {
            return Err(ActionError::NotEnough(missing));
        }
        for &(resource, amount) in cost {
            self.remove(resource, amount);
        }
        Ok(())
    }
}

impl PartialEq for Resources {
    fn eq(&self, other: &Self) -> bool {
        ResourceType::ALL.iter().all(|r| self.get(*r) == other.get(*r))
    }
}

impl Eq for Resources {}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = ResourceType::ALL
            .iter()
            .map(|r| format!("{} {}", r, self.get(*r)))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_race_and_difficulty() {
        assert_eq!("Orc".parse::<Race>(), Ok(Race::Orc));
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("dwarf".parse::<Race>().is_err());
    }

    #[test]
    fn test_resources_display_lists_all() {
        let r = Resources::from_amounts(&[(ResourceType::Wood, 4)]);
        assert_eq!(r.to_string(), "food 0, wood 4, stone 0, gold 0, mana 0");
    }

    #[test]
    fn test_resources_add_remove() {
        let mut res = Resources::new();
        res.add(ResourceType::Wood, 30);
        assert_eq!(res.get(ResourceType::Wood), 30);

        assert_eq!(res.remove(ResourceType::Wood, 50), 30);
        assert_eq!(res.get(ResourceType::Wood), 0);
    }

    #[test]
    fn test_pay_is_atomic() {
        let mut res = Resources::from_amounts(&[(ResourceType::Wood, 10), (ResourceType::Gold, 3)]);
        let err = res
            .pay(&[(ResourceType::Wood, 5), (ResourceType::Gold, 5)])
            .unwrap_err();
        assert_eq!(err, ActionError::NotEnough(ResourceType::Gold));
        assert_eq!(res.get(ResourceType::Wood), 10);

        res.pay(&[(ResourceType::Wood, 5)]).unwrap();
        assert_eq!(res.get(ResourceType::Wood), 5);
    }

    #[test]
    fn test_shortfall_uses_canonical_order() {
        let res = Resources::new();
        let missing = res.shortfall(&[(ResourceType::Gold, 1), (ResourceType::Food, 1)]);
        assert_eq!(missing, Some(ResourceType::Food));
    }

    #[test]
    fn test_equality_ignores_zero_entries() {
        let mut a = Resources::new();
        a.set(ResourceType::Mana, 0);
        assert_eq!(a, Resources::new());
    }

    #[test]
    fn test_resources_json_round_trip() {
        let res = Resources::from_amounts(&[(ResourceType::Food, 50), (ResourceType::Mana, 5)]);
        let json = serde_json::to_string(&res).unwrap();
        let back: Resources = serde_json::from_str(&json).unwrap();
        assert_eq!(res, back);
    }
}
