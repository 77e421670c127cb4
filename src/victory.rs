//! Win and loss conditions, and the end-of-game summary

use serde::{Deserialize, Serialize};

use crate::ai;
use crate::catalog::BuildingKind;
use crate::core::types::{Difficulty, Race, Resources};
use crate::settlement::Settlement;
use crate::storyteller::StorytellerState;

/// Population target before the difficulty multiplier
pub const BASE_POPULATION_TARGET: u32 = 25;

/// Turns to survive before the difficulty multiplier
pub const BASE_SURVIVAL_TURNS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "reason", rename_all = "lowercase")]
pub enum GameOutcome {
    Victory(String),
    Defeat(String),
}

impl GameOutcome {
    pub fn is_victory(&self) -> bool {
        matches!(self, GameOutcome::Victory(_))
    }

    pub fn reason(&self) -> &str {
        match self {
            GameOutcome::Victory(reason) | GameOutcome::Defeat(reason) => reason,
        }
    }
}

fn scaled(base: u32, difficulty: Difficulty) -> u32 {
    (base as f64 * difficulty.victory_multiplier()).ceil() as u32
}

pub fn population_target(difficulty: Difficulty) -> u32 {
    scaled(BASE_POPULATION_TARGET, difficulty)
}

pub fn survival_target(difficulty: Difficulty) -> u32 {
    scaled(BASE_SURVIVAL_TURNS, difficulty)
}

/// First satisfied win condition, in priority order
///
/// Destroying the enemy Town Center only counts when there is an enemy.
pub fn check_victory(player: &Settlement, enemy: Option<&Settlement>) -> Option<GameOutcome> {
    if enemy.is_some_and(ai::is_defeated) {
        return Some(GameOutcome::Victory("Destroyed the enemy Town Center!".to_string()));
    }

    let ultimate = BuildingKind::ultimate_for(player.race);
    if player.completed_count(ultimate) > 0 {
        return Some(GameOutcome::Victory(format!("Built the {}!", ultimate.name())));
    }

    let population = population_target(player.difficulty);
    if player.population.current >= population {
        return Some(GameOutcome::Victory(format!("Reached population {}!", population)));
    }

    let turns = survival_target(player.difficulty);
    if player.turn >= turns {
        return Some(GameOutcome::Victory(format!("Survived {} turns!", turns)));
    }
    None
}

pub fn check_defeat(player: &Settlement) -> Option<GameOutcome> {
    if player.town_center().map_or(true, |tc| tc.is_destroyed()) {
        return Some(GameOutcome::Defeat("Your Town Center was destroyed!".to_string()));
    }
    if player.population.current == 0 {
        return Some(GameOutcome::Defeat(
            "Your settlement has no remaining population.".to_string(),
        ));
    }
    None
}

/// Victory is checked before defeat
pub fn evaluate(player: &Settlement, enemy: Option<&Settlement>) -> Option<GameOutcome> {
    check_victory(player, enemy).or_else(|| check_defeat(player))
}

/// Enemy figures for the summary screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub race: Race,
    pub buildings: usize,
    pub units: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub race: Race,
    pub difficulty: Difficulty,
    pub turns: u32,
    pub population: u32,
    pub population_cap: u32,
    pub buildings: usize,
    pub max_building_level: u8,
    pub units: usize,
    pub heroes: usize,
    pub techs_researched: usize,
    pub quests_completed: u32,
    pub events_experienced: usize,
    pub total_resources: u32,
    pub resources: Resources,
    pub enemy: Option<EnemyStats>,
}

pub fn collect_stats(player: &Settlement, storyteller: &StorytellerState, enemy: Option<&Settlement>) -> GameStats {
    GameStats {
        race: player.race,
        difficulty: player.difficulty,
        turns: player.turn,
        population: player.population.current,
        population_cap: player.population.cap,
        buildings: player.completed_buildings().count(),
        max_building_level: player.max_building_level(),
        units: player.units.len(),
        heroes: player.units.iter().filter(|u| u.kind.is_hero()).count(),
        techs_researched: player.tech.completed_count(),
        quests_completed: storyteller.completed_quest_count,
        events_experienced: storyteller.event_log.len(),
        total_resources: player.resources.total(),
        resources: player.resources.clone(),
        enemy: enemy.map(|e| EnemyStats {
            race: e.race,
            buildings: e.completed_buildings().count(),
            units: e.units.len(),
        }),
    }
}
