//! Unit definitions: costs, combat stats, training building and hero abilities

use serde::{Deserialize, Serialize};

use super::buildings::BuildingKind;
use crate::core::types::{Amounts, Race};
use crate::core::types::ResourceType::{Food, Gold, Mana, Stone, Wood};

/// Broad unit role; the AI trains in role order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UnitRole {
    Warrior,
    Archer,
    Mage,
    Worker,
    Hero,
}

/// Special abilities carried by hero units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroAbility {
    /// +2 attack for friendly units adjacent to the hero
    Rally,
    /// Heals adjacent friendly units each turn
    AreaHeal,
    /// Doubles the hero's move range for one turn when activated
    Charge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Worker,
    WarriorHuman,
    WarriorElf,
    WarriorOrc,
    ArcherHuman,
    ArcherElf,
    ArcherOrc,
    MageHuman,
    MageElf,
    MageOrc,
    HeroHuman,
    HeroElf,
    HeroOrc,
}

#[derive(Debug)]
pub struct UnitDef {
    pub name: &'static str,
    pub role: UnitRole,
    pub cost: Amounts,
    pub train_turns: u32,
    pub train_at: BuildingKind,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub move_range: u32,
    pub vision_range: i32,
    pub races: &'static [Race],
    pub ability: Option<HeroAbility>,
}

static WORKER: UnitDef = UnitDef {
    name: "Worker",
    role: UnitRole::Worker,
    cost: &[(Food, 10), (Gold, 5)],
    train_turns: 1,
    train_at: BuildingKind::TownCenter,
    hp: 15,
    attack: 2,
    defense: 1,
    move_range: 2,
    vision_range: 2,
    races: &[Race::Human, Race::Elf, Race::Orc],
    ability: None,
};

static FOOTMAN: UnitDef = UnitDef {
    name: "Footman",
    role: UnitRole::Warrior,
    cost: &[(Food, 15), (Wood, 5), (Gold, 10)],
    train_turns: 2,
    train_at: BuildingKind::Barracks,
    hp: 40,
    attack: 8,
    defense: 5,
    move_range: 3,
    vision_range: 3,
    races: &[Race::Human],
    ability: None,
};

static SENTINEL: UnitDef = UnitDef {
    name: "Sentinel",
    role: UnitRole::Warrior,
    cost: &[(Food, 12), (Wood, 10), (Gold, 8)],
    train_turns: 2,
    train_at: BuildingKind::Barracks,
    hp: 35,
    attack: 7,
    defense: 4,
    move_range: 4,
    vision_range: 4,
    races: &[Race::Elf],
    ability: None,
};

static GRUNT: UnitDef = UnitDef {
    name: "Grunt",
    role: UnitRole::Warrior,
    cost: &[(Food, 20), (Wood, 5), (Stone, 5), (Gold, 8)],
    train_turns: 2,
    train_at: BuildingKind::Barracks,
    hp: 50,
    attack: 10,
    defense: 3,
    move_range: 3,
    vision_range: 2,
    races: &[Race::Orc],
    ability: None,
};

static CROSSBOWMAN: UnitDef = UnitDef {
    name: "Crossbowman",
    role: UnitRole::Archer,
    cost: &[(Food, 12), (Wood, 15), (Gold, 10)],
    train_turns: 2,
    train_at: BuildingKind::Barracks,
    hp: 25,
    attack: 10,
    defense: 2,
    move_range: 3,
    vision_range: 4,
    races: &[Race::Human],
    ability: None,
};

static RANGER: UnitDef = UnitDef {
    name: "Ranger",
    role: UnitRole::Archer,
    cost: &[(Food, 10), (Wood, 12), (Gold, 8)],
    train_turns: 2,
    train_at: BuildingKind::Barracks,
    hp: 22,
    attack: 11,
    defense: 2,
    move_range: 4,
    vision_range: 5,
    races: &[Race::Elf],
    ability: None,
};

static AXE_THROWER: UnitDef = UnitDef {
    name: "Axe Thrower",
    role: UnitRole::Archer,
    cost: &[(Food, 15), (Wood, 10), (Stone, 5), (Gold, 8)],
    train_turns: 2,
    train_at: BuildingKind::Barracks,
    hp: 30,
    attack: 9,
    defense: 3,
    move_range: 3,
    vision_range: 3,
    races: &[Race::Orc],
    ability: None,
};

static CLERIC: UnitDef = UnitDef {
    name: "Cleric",
    role: UnitRole::Mage,
    cost: &[(Food, 10), (Wood, 5), (Gold, 15), (Mana, 10)],
    train_turns: 3,
    train_at: BuildingKind::MageTower,
    hp: 20,
    attack: 7,
    defense: 2,
    move_range: 2,
    vision_range: 4,
    races: &[Race::Human],
    ability: None,
};

static DRUID: UnitDef = UnitDef {
    name: "Druid",
    role: UnitRole::Mage,
    cost: &[(Food, 8), (Wood, 5), (Gold, 10), (Mana, 15)],
    train_turns: 3,
    train_at: BuildingKind::MageTower,
    hp: 18,
    attack: 8,
    defense: 1,
    move_range: 3,
    vision_range: 5,
    races: &[Race::Elf],
    ability: None,
};

static SHAMAN: UnitDef = UnitDef {
    name: "Shaman",
    role: UnitRole::Mage,
    cost: &[(Food, 12), (Wood, 5), (Stone, 5), (Gold, 10), (Mana, 10)],
    train_turns: 3,
    train_at: BuildingKind::MageTower,
    hp: 22,
    attack: 9,
    defense: 2,
    move_range: 2,
    vision_range: 3,
    races: &[Race::Orc],
    ability: None,
};

static KNIGHT_COMMANDER: UnitDef = UnitDef {
    name: "Knight Commander",
    role: UnitRole::Hero,
    cost: &[(Food, 30), (Wood, 10), (Stone, 10), (Gold, 40), (Mana, 10)],
    train_turns: 4,
    train_at: BuildingKind::Castle,
    hp: 60,
    attack: 12,
    defense: 8,
    move_range: 3,
    vision_range: 4,
    races: &[Race::Human],
    ability: Some(HeroAbility::Rally),
};

static ARCHMAGE: UnitDef = UnitDef {
    name: "Archmage",
    role: UnitRole::Hero,
    cost: &[(Food, 20), (Wood, 10), (Stone, 5), (Gold, 30), (Mana, 30)],
    train_turns: 4,
    train_at: BuildingKind::AncientArchive,
    hp: 40,
    attack: 14,
    defense: 4,
    move_range: 3,
    vision_range: 5,
    races: &[Race::Elf],
    ability: Some(HeroAbility::AreaHeal),
};

static WARCHIEF: UnitDef = UnitDef {
    name: "Warchief",
    role: UnitRole::Hero,
    cost: &[(Food, 40), (Wood, 10), (Stone, 15), (Gold, 30), (Mana, 5)],
    train_turns: 4,
    train_at: BuildingKind::WarPit,
    hp: 70,
    attack: 15,
    defense: 6,
    move_range: 3,
    vision_range: 3,
    races: &[Race::Orc],
    ability: Some(HeroAbility::Charge),
};

impl UnitKind {
    pub const ALL: [UnitKind; 13] = [
        UnitKind::Worker,
        UnitKind::WarriorHuman,
        UnitKind::WarriorElf,
        UnitKind::WarriorOrc,
        UnitKind::ArcherHuman,
        UnitKind::ArcherElf,
        UnitKind::ArcherOrc,
        UnitKind::MageHuman,
        UnitKind::MageElf,
        UnitKind::MageOrc,
        UnitKind::HeroHuman,
        UnitKind::HeroElf,
        UnitKind::HeroOrc,
    ];

    pub fn def(&self) -> &'static UnitDef {
        match self {
            UnitKind::Worker => &WORKER,
            UnitKind::WarriorHuman => &FOOTMAN,
            UnitKind::WarriorElf => &SENTINEL,
            UnitKind::WarriorOrc => &GRUNT,
            UnitKind::ArcherHuman => &CROSSBOWMAN,
            UnitKind::ArcherElf => &RANGER,
            UnitKind::ArcherOrc => &AXE_THROWER,
            UnitKind::MageHuman => &CLERIC,
            UnitKind::MageElf => &DRUID,
            UnitKind::MageOrc => &SHAMAN,
            UnitKind::HeroHuman => &KNIGHT_COMMANDER,
            UnitKind::HeroElf => &ARCHMAGE,
            UnitKind::HeroOrc => &WARCHIEF,
        }
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    pub fn is_hero(&self) -> bool {
        self.def().role == UnitRole::Hero
    }

    pub fn available_to(&self, race: Race) -> bool {
        self.def().races.contains(&race)
    }
}

/// Units a race can train, in catalog order
pub fn units_for_race(race: Race) -> impl Iterator<Item = UnitKind> {
    UnitKind::ALL.into_iter().filter(move |k| k.available_to(race))
}

/// Units a race can train at a given building
pub fn trainable_units(building: BuildingKind, race: Race) -> Vec<UnitKind> {
    units_for_race(race)
        .filter(|k| k.def().train_at == building)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_race_has_one_hero() {
        for race in Race::ALL {
            let heroes = units_for_race(race).filter(|k| k.is_hero()).count();
            assert_eq!(heroes, 1);
        }
    }

    #[test]
    fn test_trainable_at_barracks() {
        let orc = trainable_units(BuildingKind::Barracks, Race::Orc);
        assert_eq!(orc, vec![UnitKind::WarriorOrc, UnitKind::ArcherOrc]);
        assert_eq!(
            trainable_units(BuildingKind::TownCenter, Race::Elf),
            vec![UnitKind::Worker]
        );
    }

    #[test]
    fn test_hero_abilities() {
        assert_eq!(UnitKind::HeroHuman.def().ability, Some(HeroAbility::Rally));
        assert_eq!(UnitKind::HeroElf.def().ability, Some(HeroAbility::AreaHeal));
        assert_eq!(UnitKind::HeroOrc.def().ability, Some(HeroAbility::Charge));
        assert_eq!(UnitKind::WarriorOrc.def().ability, None);
    }

    #[test]
    fn test_serde_key() {
        let json = serde_json::to_string(&UnitKind::ArcherElf).unwrap();
        assert_eq!(json, "\"archer_elf\"");
    }
}
