//! Storyteller: procedural events, quests and raids scaled to settlement power
//!
//! Each turn the storyteller first settles active quests, then draws one
//! category (boon, challenge, story, quest or nothing) from weights that
//! depend on how developed the settlement is.

pub mod difficulty;
pub mod events;
pub mod quests;
pub mod raid;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::map::HexMap;
use crate::settlement::Settlement;

pub use difficulty::{difficulty_tier, event_weights, pick_category, settlement_power, EventCategory};
pub use events::{apply_event, boons, challenges, stories, EventDef, EventEffect};
pub use quests::{generate_quest, generate_reward, Quest, QuestObjective, QuestProgress, Reward};
pub use raid::{execute_raid, raid_base_damage, raid_defense, RaidKind};

/// An event that fired, as reported and as kept in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryEvent {
    pub turn: u32,
    pub category: EventCategory,
    pub name: String,
    pub text: String,
    pub result: String,
    #[serde(default)]
    pub is_raid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorytellerState {
    /// Turn of the last challenge, zero if none yet
    #[serde(default)]
    pub last_major_event_turn: u32,
    #[serde(default)]
    pub last_event_turn: u32,
    #[serde(default)]
    pub event_log: Vec<StoryEvent>,
    #[serde(default)]
    pub active_quests: Vec<Quest>,
    #[serde(default)]
    pub completed_quest_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorytellerReport {
    pub event: Option<StoryEvent>,
    pub completed_quests: Vec<Quest>,
    pub failed_quests: Vec<Quest>,
    pub new_quest: Option<Quest>,
}

/// Tick every active quest: completion wins over running out of time
fn settle_quests(settlement: &mut Settlement, state: &mut StorytellerState, report: &mut StorytellerReport) {
    let quests = std::mem::take(&mut state.active_quests);
    for mut quest in quests {
        quest.turns_remaining = quest.turns_remaining.saturating_sub(1);
        if quest.progress(settlement).is_complete() {
            quest.reward.apply(settlement);
            state.completed_quest_count += 1;
            tracing::debug!(quest = %quest.name, "quest completed");
            report.completed_quests.push(quest);
        } else if quest.turns_remaining == 0 {
            tracing::debug!(quest = %quest.name, "quest failed");
            report.failed_quests.push(quest);
        } else {
            state.active_quests.push(quest);
        }
    }
}

/// Run the storyteller for the settlement's current turn
pub fn process_storyteller_turn(
    settlement: &mut Settlement,
    state: &mut StorytellerState,
    map: &mut HexMap,
    rng: &mut impl Rng,
) -> StorytellerReport {
    let mut report = StorytellerReport::default();
    settle_quests(settlement, state, &mut report);

    let weights = event_weights(settlement, state);
    let category = pick_category(&weights, rng);
    let pool = match category {
        EventCategory::Boon => boons(),
        EventCategory::Challenge => challenges(),
        EventCategory::Story => stories(),
        EventCategory::Quest => {
            let quest = generate_quest(settlement, rng);
            tracing::debug!(quest = %quest.name, "quest offered");
            state.active_quests.push(quest.clone());
            report.new_quest = Some(quest);
            return report;
        }
        EventCategory::Nothing => return report,
    };

    let def = &pool[rng.gen_range(0..pool.len())];
    let result = apply_event(def, settlement, map, rng);
    let event = StoryEvent {
        turn: settlement.turn,
        category,
        name: def.name.to_string(),
        text: def.text.to_string(),
        result,
        is_raid: def.is_raid(),
    };
    tracing::debug!(turn = event.turn, category = category.name(), name = %event.name, "storyteller event");

    if category == EventCategory::Challenge {
        state.last_major_event_turn = settlement.turn;
    }
    state.last_event_turn = settlement.turn;
    state.event_log.push(event.clone());
    report.event = Some(event);
    report
}
