//! Quests: generated objectives with a deadline and a reward

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::pick;
use crate::catalog::BuildingKind;
use crate::core::types::{ResourceType, Resources};
use crate::settlement::Settlement;

/// Buildings a build quest may ask for
pub const QUEST_BUILDINGS: [BuildingKind; 6] = [
    BuildingKind::Farm,
    BuildingKind::LumberMill,
    BuildingKind::Quarry,
    BuildingKind::Mine,
    BuildingKind::Barracks,
    BuildingKind::Walls,
];

/// Resources a stockpile quest may ask for
pub const QUEST_RESOURCES: [ResourceType; 4] = [
    ResourceType::Food,
    ResourceType::Wood,
    ResourceType::Stone,
    ResourceType::Gold,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestObjective {
    /// Have `count` complete buildings of `kind`
    Build { kind: BuildingKind, count: u32 },
    /// Reach a population of `target`
    Population { target: u32 },
    /// Hold at least `amount` of `resource`
    Resource { resource: ResourceType, amount: u32 },
}

impl QuestObjective {
    pub fn target(&self) -> u32 {
        match self {
            QuestObjective::Build { count, .. } => *count,
            QuestObjective::Population { target } => *target,
            QuestObjective::Resource { amount, .. } => *amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub resources: Resources,
    /// Extra citizens, capped at the settlement's population cap
    #[serde(default)]
    pub population: u32,
}

impl Reward {
    /// Pay the reward out to the settlement
    pub fn apply(&self, settlement: &mut Settlement) {
        settlement.resources.add_all(&self.resources);
        if self.population > 0 {
            let pop = &mut settlement.population;
            pop.current = pop.cap.min(pop.current + self.population);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestProgress {
    pub current: u32,
    pub target: u32,
}

impl QuestProgress {
    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    pub description: String,
    pub objective: QuestObjective,
    pub turns_remaining: u32,
    pub reward: Reward,
}

impl Quest {
    /// Live progress against the settlement; never stored
    pub fn progress(&self, settlement: &Settlement) -> QuestProgress {
        let target = self.objective.target();
        let value = match &self.objective {
            QuestObjective::Build { kind, .. } => settlement.completed_count(*kind) as u32,
            QuestObjective::Population { .. } => settlement.population.current,
            QuestObjective::Resource { resource, .. } => settlement.resources.get(*resource),
        };
        QuestProgress {
            current: value.min(target),
            target,
        }
    }
}

/// One or two resource bundles of 15-39 each, sometimes a population bonus
pub fn generate_reward(rng: &mut impl Rng) -> Reward {
    let mut reward = Reward::default();
    let bundles = rng.gen_range(1..=2);
    for _ in 0..bundles {
        let resource = *pick(rng, &ResourceType::ALL);
        reward.resources.add(resource, rng.gen_range(15..40));
    }
    if rng.gen_bool(0.3) {
        reward.population = rng.gen_range(1..=2);
    }
    reward
}

/// Draw a new quest from one of the three templates
pub fn generate_quest(settlement: &Settlement, rng: &mut impl Rng) -> Quest {
    match rng.gen_range(0..3) {
        0 => {
            let kind = *pick(rng, &QUEST_BUILDINGS);
            let count: u32 = rng.gen_range(1..=2);
            let plural = if count > 1 { "s" } else { "" };
            Quest {
                name: format!("Build {} {}{}", count, kind.name(), plural),
                description: format!(
                    "Construct {} {}{} to strengthen your settlement.",
                    count,
                    kind.name(),
                    plural
                ),
                objective: QuestObjective::Build { kind, count },
                turns_remaining: 8 + count * 3,
                reward: generate_reward(rng),
            }
        }
        1 => {
            let target = settlement.population.current + rng.gen_range(2..=4);
            Quest {
                name: format!("Reach Population {}", target),
                description: format!("Grow your settlement to {} citizens.", target),
                objective: QuestObjective::Population { target },
                turns_remaining: rng.gen_range(10..=14),
                reward: generate_reward(rng),
            }
        }
        _ => {
            let resource = *pick(rng, &QUEST_RESOURCES);
            let amount = settlement.resources.get(resource) + rng.gen_range(30..70);
            Quest {
                name: format!("Stockpile {} {}", amount, resource),
                description: format!("Accumulate at least {} {} in your stores.", amount, resource),
                objective: QuestObjective::Resource { resource, amount },
                turns_remaining: rng.gen_range(8..=13),
                reward: generate_reward(rng),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Difficulty, Owner, Race};
    use crate::map::HexCoord;
    use crate::settlement::Building;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn settlement() -> Settlement {
        Settlement::new(Race::Orc, Difficulty::Normal, Owner::Player)
    }

    fn quest(objective: QuestObjective) -> Quest {
        Quest {
            name: "test".into(),
            description: String::new(),
            objective,
            turns_remaining: 5,
            reward: Reward::default(),
        }
    }

    #[test]
    fn test_build_progress_counts_complete_only() {
        let mut s = settlement();
        s.buildings.push(Building::new(BuildingKind::Farm, HexCoord::new(0, 0), 0, Owner::Player));
        s.buildings.push(Building::new(BuildingKind::Farm, HexCoord::new(1, 0), 1, Owner::Player));

        let q = quest(QuestObjective::Build {
            kind: BuildingKind::Farm,
            count: 2,
        });
        assert_eq!(q.progress(&s), QuestProgress { current: 1, target: 2 });

        s.buildings[1].turns_remaining = 0;
        assert!(q.progress(&s).is_complete());
    }

    #[test]
    fn test_progress_is_clamped() {
        let s = settlement();
        let q = quest(QuestObjective::Resource {
            resource: ResourceType::Food,
            amount: 10,
        });
        assert_eq!(q.progress(&s).current, 10);
    }

    #[test]
    fn test_reward_population_respects_cap() {
        let mut s = settlement();
        s.population.cap = 6;
        let reward = Reward {
            resources: Resources::from_amounts(&[(ResourceType::Gold, 20)]),
            population: 2,
        };
        reward.apply(&mut s);
        assert_eq!(s.population.current, 6);
        assert_eq!(s.resources.get(ResourceType::Gold), 35);
    }

    #[test]
    fn test_generated_quests_are_in_range() {
        let s = settlement();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let q = generate_quest(&s, &mut rng);
            match q.objective {
                QuestObjective::Build { count, .. } => {
                    assert!((1..=2).contains(&count));
                    assert_eq!(q.turns_remaining, 8 + count * 3);
                }
                QuestObjective::Population { target } => {
                    assert!((7..=9).contains(&target));
                    assert!((10..=14).contains(&q.turns_remaining));
                }
                QuestObjective::Resource { resource, amount } => {
                    let have = s.resources.get(resource);
                    assert!(amount >= have + 30 && amount < have + 70);
                    assert!((8..=13).contains(&q.turns_remaining));
                }
            }
            let total = q.reward.resources.total();
            assert!((15..=78).contains(&total));
            assert!(q.reward.population <= 2);
        }
    }

    #[test]
    fn test_quest_names() {
        let s = settlement();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..30 {
            let q = generate_quest(&s, &mut rng);
            if let QuestObjective::Build { kind, count: 2 } = q.objective {
                assert_eq!(q.name, format!("Build 2 {}s", kind.name()));
            }
        }
    }
}
