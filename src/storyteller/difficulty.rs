//! Settlement power scoring and event category weighting

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::StorytellerState;
use crate::settlement::Settlement;

/// Challenge weight multiplier while a recent challenge is still fresh
pub const CHALLENGE_COOLDOWN_FACTOR: f64 = 0.3;

/// Challenges never fire up to and including this turn
pub const GRACE_TURNS: u32 = 3;

/// No new quests while this many are active
pub const MAX_ACTIVE_QUESTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Boon,
    Challenge,
    Story,
    Quest,
    Nothing,
}

impl EventCategory {
    /// Order matching the weight arrays
    pub const ALL: [EventCategory; 5] = [
        EventCategory::Boon,
        EventCategory::Challenge,
        EventCategory::Story,
        EventCategory::Quest,
        EventCategory::Nothing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventCategory::Boon => "boon",
            EventCategory::Challenge => "challenge",
            EventCategory::Story => "story",
            EventCategory::Quest => "quest",
            EventCategory::Nothing => "nothing",
        }
    }
}

/// How developed a settlement is
pub fn settlement_power(settlement: &Settlement) -> f64 {
    settlement.completed_buildings().count() as f64 * 10.0
        + settlement.population.current as f64 * 5.0
        + settlement.resources.total() as f64 * 0.1
        + settlement.turn as f64 * 2.0
}

/// Tier 0-3 by power thresholds 50 / 120 / 250
pub fn difficulty_tier(power: f64) -> usize {
    if power < 50.0 {
        0
    } else if power < 120.0 {
        1
    } else if power < 250.0 {
        2
    } else {
        3
    }
}

const TIER_WEIGHTS: [[u32; 5]; 4] = [
    [30, 5, 20, 15, 30],
    [25, 15, 15, 20, 25],
    [20, 25, 10, 20, 25],
    [15, 35, 10, 15, 25],
];

/// Category weights `[boon, challenge, story, quest, nothing]` for this turn
pub fn event_weights(settlement: &Settlement, state: &StorytellerState) -> [u32; 5] {
    let mut weights = TIER_WEIGHTS[difficulty_tier(settlement_power(settlement))];
    let turn = settlement.turn;

    if state.last_major_event_turn + 1 >= turn {
        weights[1] = (weights[1] as f64 * CHALLENGE_COOLDOWN_FACTOR).floor() as u32;
    }
    if state.active_quests.len() >= MAX_ACTIVE_QUESTS {
        weights[3] = 0;
    }
    if turn <= GRACE_TURNS {
        weights[1] = 0;
    }
    weights
}

/// Weighted draw over the categories; nothing when every weight is zero
pub fn pick_category(weights: &[u32; 5], rng: &mut impl Rng) -> EventCategory {
    match WeightedIndex::new(weights) {
        Ok(dist) => EventCategory::ALL[dist.sample(rng)],
        Err(_) => EventCategory::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuildingKind;
    use crate::core::types::{Difficulty, Owner, Race, ResourceType, Resources};
    use crate::map::HexCoord;
    use crate::settlement::Building;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn settlement() -> Settlement {
        let mut s = Settlement::new(Race::Human, Difficulty::Normal, Owner::Player);
        s.resources = Resources::new();
        s
    }

    #[test]
    fn test_power_formula() {
        let mut s = settlement();
        s.turn = 10;
        s.buildings.push(Building::new(BuildingKind::Farm, HexCoord::new(0, 0), 0, Owner::Player));
        s.buildings.push(Building::new(BuildingKind::Farm, HexCoord::new(1, 0), 2, Owner::Player));
        s.resources.add(ResourceType::Gold, 100);
        // 10 + 25 + 10 + 20
        assert_eq!(settlement_power(&s), 65.0);
        assert_eq!(difficulty_tier(65.0), 1);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(difficulty_tier(49.9), 0);
        assert_eq!(difficulty_tier(50.0), 1);
        assert_eq!(difficulty_tier(120.0), 2);
        assert_eq!(difficulty_tier(250.0), 3);
    }

    #[test]
    fn test_grace_period_blocks_challenges() {
        let mut s = settlement();
        s.turn = 3;
        let weights = event_weights(&s, &StorytellerState::default());
        assert_eq!(weights, [30, 0, 20, 15, 30]);
    }

    #[test]
    fn test_recent_challenge_damps_weight() {
        let mut s = settlement();
        s.turn = 40;
        s.population.current = 20;
        let state = StorytellerState {
            last_major_event_turn: 39,
            ..Default::default()
        };
        // power 80 + 100 = 180 -> tier 2, challenge floor(25 * 0.3)
        assert_eq!(event_weights(&s, &state)[1], 7);

        let stale = StorytellerState {
            last_major_event_turn: 38,
            ..Default::default()
        };
        assert_eq!(event_weights(&s, &stale)[1], 25);
    }

    #[test]
    fn test_all_zero_weights_pick_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(pick_category(&[0; 5], &mut rng), EventCategory::Nothing);
        assert_eq!(pick_category(&[0, 0, 7, 0, 0], &mut rng), EventCategory::Story);
    }
}
