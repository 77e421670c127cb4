//! A whole game: the player's settlement, the optional AI, the storyteller
//! and the shared map, advanced one end-turn at a time

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::ai::{self, find_valid_hex, AiTurnReport};
use crate::catalog::{BuildingKind, UnitKind};
use crate::core::config::GameConfig;
use crate::core::error::{ActionError, RealmError, Result};
use crate::core::types::{Difficulty, Owner};
use crate::map::{HexCoord, HexMap};
use crate::settlement::{Settlement, UnitId};
use crate::simulation::{process_turn, TurnReport};
use crate::storyteller::{process_storyteller_turn, StorytellerReport, StorytellerState};
use crate::units::{
    activate_charge, movement_range, move_unit, process_unit_turn, rally_bonus, resolve_combat, reveal, train_unit,
    visible_hexes, CombatModifiers, CombatOutcome, ReachableHex,
};
use crate::victory::{self, GameOutcome, GameStats};

/// Workers assigned to a freshly founded Town Center
pub const STARTING_TC_WORKERS: u32 = 2;

/// Everything that happened during one end-turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndTurnReport {
    pub turn: u32,
    pub pipeline: TurnReport,
    pub unit_logs: Vec<String>,
    pub storyteller: StorytellerReport,
    pub ai: Option<AiTurnReport>,
    pub outcome: Option<GameOutcome>,
}

/// What a player attack hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum AttackResult {
    Unit(CombatOutcome),
    Building {
        kind: BuildingKind,
        damage: i32,
        destroyed: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub map_size: i32,
    pub player: Settlement,
    #[serde(default)]
    pub ai: Option<Settlement>,
    #[serde(default)]
    pub storyteller: StorytellerState,
    pub map: HexMap,
    #[serde(default)]
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Generate the map and found both settlements
    ///
    /// The player's Town Center goes on the first valid hex near
    /// `(size/4, size/4)`.
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate().map_err(RealmError::InvalidConfig)?;

        let size = config.map_size;
        let mut map = HexMap::generate_simple(size, size, config.seed);
        let mut player = Settlement::new(config.race, config.difficulty, Owner::Player);

        let spawn = HexCoord::new(size / 4, size / 4);
        let tc = find_valid_hex(spawn, BuildingKind::TownCenter, &map, &player.resources).ok_or_else(|| {
            RealmError::InvalidConfig(format!("no valid Town Center hex near {} for seed {}", spawn, config.seed))
        })?;
        player.place_building(BuildingKind::TownCenter, tc, &mut map)?;
        if let Some(town_center) = player.town_center_mut() {
            town_center.workers = STARTING_TC_WORKERS;
        }
        player.recalc_population_cap();
        let visible = visible_hexes(&player, &map);
        reveal(&mut player, &visible);

        let ai = if config.ai_enabled {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            Some(ai::create_ai(config.race, config.difficulty, size, &mut map, &mut rng))
        } else {
            None
        };

        tracing::info!(
            race = %config.race,
            difficulty = %config.difficulty,
            seed = config.seed,
            ai = config.ai_enabled,
            "new game"
        );

        Ok(Self {
            seed: config.seed,
            difficulty: config.difficulty,
            map_size: size,
            player,
            ai,
            storyteller: StorytellerState::default(),
            map,
            outcome: None,
        })
    }

    pub fn turn(&self) -> u32 {
        self.player.turn
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Random stream for the current turn, derived from the game seed
    fn turn_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed ^ (self.player.turn as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    fn ensure_running(&self) -> std::result::Result<(), ActionError> {
        if self.is_over() {
            return Err(ActionError::GameOver);
        }
        Ok(())
    }

    /// Resolve one end-turn
    ///
    /// Order: settlement pipeline, player unit turn, storyteller, AI turn,
    /// then victory before defeat.
    pub fn end_turn(&mut self) -> std::result::Result<EndTurnReport, ActionError> {
        self.ensure_running()?;

        let pipeline = process_turn(&mut self.player, &self.map);
        for done in &pipeline.completed_buildings {
            self.map.set_building_turns(done.coord, 0);
        }
        self.sync_improvement_marks();

        let units = process_unit_turn(&mut self.player, &self.map);

        let mut rng = self.turn_rng();
        let storyteller = process_storyteller_turn(&mut self.player, &mut self.storyteller, &mut self.map, &mut rng);

        let ai = self
            .ai
            .as_mut()
            .map(|opponent| ai::process_ai_turn(opponent, &mut self.player, &mut self.map));

        let outcome = victory::evaluate(&self.player, self.ai.as_ref());
        if let Some(outcome) = &outcome {
            tracing::info!(turn = self.player.turn, reason = outcome.reason(), victory = outcome.is_victory(), "game over");
        }
        self.outcome = outcome.clone();

        tracing::info!(
            turn = self.player.turn,
            population = self.player.population.current,
            gathered = pipeline.gathered.total(),
            "turn ended"
        );

        Ok(EndTurnReport {
            turn: self.player.turn,
            pipeline,
            unit_logs: units.logs,
            storyteller,
            ai,
            outcome,
        })
    }

    fn sync_improvement_marks(&mut self) {
        for improvement in &self.player.improvements {
            if let Some(mark) = self
                .map
                .get_mut(&improvement.coord)
                .and_then(|t| t.improvement.as_mut())
            {
                mark.turns_remaining = improvement.turns_remaining;
            }
        }
    }

    // === PLAYER ACTIONS ===

    pub fn place_building(&mut self, kind: BuildingKind, coord: HexCoord) -> std::result::Result<(), ActionError> {
        self.ensure_running()?;
        self.player.place_building(kind, coord, &mut self.map)
    }

    pub fn upgrade_building(&mut self, coord: HexCoord) -> std::result::Result<u8, ActionError> {
        self.ensure_running()?;
        self.player.upgrade_building(coord, &mut self.map)
    }

    pub fn assign_worker(&mut self, coord: HexCoord) -> std::result::Result<(), ActionError> {
        self.ensure_running()?;
        self.player.assign_worker(coord)
    }

    pub fn unassign_worker(&mut self, coord: HexCoord) -> std::result::Result<(), ActionError> {
        self.ensure_running()?;
        self.player.unassign_worker(coord)
    }

    pub fn start_improvement(&mut self, coord: HexCoord) -> std::result::Result<(), ActionError> {
        self.ensure_running()?;
        self.player.start_improvement(coord, &mut self.map)
    }

    pub fn train_unit(&mut self, kind: UnitKind) -> std::result::Result<UnitId, ActionError> {
        self.ensure_running()?;
        train_unit(&mut self.player, kind)
    }

    pub fn start_research(&mut self, tech_id: &str) -> std::result::Result<(), ActionError> {
        self.ensure_running()?;
        self.player.start_research(tech_id)
    }

    pub fn activate_charge(&mut self, id: UnitId) -> std::result::Result<(), ActionError> {
        self.ensure_running()?;
        let unit = self.player.unit_mut(id).ok_or(ActionError::NoSuchUnit)?;
        activate_charge(unit)
    }

    /// Hexes a player unit could move to (or attack into) right now
    pub fn reachable(&self, id: UnitId) -> std::result::Result<Vec<ReachableHex>, ActionError> {
        let unit = self.player.unit(id).ok_or(ActionError::NoSuchUnit)?;
        let enemy = self.ai.as_ref().map_or(&[][..], |ai| ai.units.as_slice());
        Ok(movement_range(unit, &self.map, &self.player.units, enemy))
    }

    /// Move a ready unit to a reachable, unoccupied hex
    ///
    /// Returns the movement points spent. Newly seen hexes are explored.
    pub fn move_unit(&mut self, id: UnitId, to: HexCoord) -> std::result::Result<f32, ActionError> {
        self.ensure_running()?;
        let unit = self.player.unit(id).ok_or(ActionError::NoSuchUnit)?;
        if !unit.is_ready() {
            return Err(ActionError::UnitNotReady);
        }
        let reachable = self.reachable(id)?;
        if !reachable.iter().any(|h| h.coord == to && !h.has_enemy) {
            return Err(ActionError::OutOfRange);
        }

        let unit = self.player.unit_mut(id).ok_or(ActionError::NoSuchUnit)?;
        let cost = move_unit(unit, to, &self.map);
        let visible = visible_hexes(&self.player, &self.map);
        reveal(&mut self.player, &visible);
        Ok(cost)
    }

    /// Attack the AI unit or building on an adjacent hex
    ///
    /// Rally bonuses apply to the attacker. The attacking unit's movement
    /// ends, so a unit attacks at most once a turn; a destroyed AI building is removed along with its hex mark.
    pub fn attack(&mut self, id: UnitId, target: HexCoord) -> std::result::Result<AttackResult, ActionError> {
        self.ensure_running()?;
        let ai = self.ai.as_mut().ok_or(ActionError::NoTarget)?;
        let attacker_idx = self
            .player
            .units
            .iter()
            .position(|u| u.id == id && u.is_alive())
            .ok_or(ActionError::NoSuchUnit)?;
        let attacker = &self.player.units[attacker_idx];
        if !attacker.is_ready() {
            return Err(ActionError::UnitNotReady);
        }
        if attacker.moves_left <= 0.0 {
            return Err(ActionError::NoMovesLeft);
        }
        if !attacker.coord.is_adjacent(&target) {
            return Err(ActionError::NotAdjacent);
        }

        let result = if let Some(defender_idx) = ai.units.iter().position(|u| u.coord == target && u.is_alive()) {
            let bonus = rally_bonus(attacker, &self.player.units);
            let outcome = resolve_combat(
                &mut self.player.units[attacker_idx],
                &mut ai.units[defender_idx],
                CombatModifiers::attack(bonus),
                CombatModifiers::default(),
            );
            ai.prune_dead_units();
            AttackResult::Unit(outcome)
        } else if let Some(building_idx) = ai.buildings.iter().position(|b| b.coord == target) {
            let damage = attacker.def().attack;
            let building = &mut ai.buildings[building_idx];
            building.hp -= damage;
            let kind = building.kind;
            let destroyed = building.is_destroyed();
            if destroyed {
                ai.buildings.remove(building_idx);
                self.map.clear_building(target);
            }
            tracing::debug!(building = kind.name(), damage, destroyed, "player attacked AI building");
            AttackResult::Building { kind, damage, destroyed }
        } else {
            return Err(ActionError::NoTarget);
        };

        if let Some(unit) = self.player.units.get_mut(attacker_idx) {
            unit.moves_left = 0.0;
        }
        self.player.prune_dead_units();
        Ok(result)
    }

    pub fn stats(&self) -> GameStats {
        victory::collect_stats(&self.player, &self.storyteller, self.ai.as_ref())
    }

    // === SNAPSHOTS ===

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a snapshot; fields missing from older snapshots get defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let mut game: Game = serde_json::from_str(json)?;
        game.player.normalize();
        if let Some(ai) = game.ai.as_mut() {
            ai.normalize();
        }
        Ok(game)
    }
}
