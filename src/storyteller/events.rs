//! Event pools and their effects on a settlement

use std::ops::RangeInclusive;

use rand::Rng;

use super::raid::{execute_raid, RaidKind};
use crate::core::types::ResourceType;
use crate::map::HexMap;
use crate::settlement::Settlement;

const COMMON_RESOURCES: &[ResourceType] = &[
    ResourceType::Food,
    ResourceType::Wood,
    ResourceType::Stone,
    ResourceType::Gold,
];

const BUILDING_MATERIALS: &[ResourceType] = &[ResourceType::Wood, ResourceType::Stone, ResourceType::Gold];

/// What an event does when it fires
#[derive(Debug, Clone)]
pub enum EventEffect {
    /// New citizens, capped at the population cap
    Settlers(RangeInclusive<u32>),
    /// Gain a rolled amount of one resource picked from the pool
    Gain(&'static [ResourceType], RangeInclusive<u32>),
    /// Lose a rolled amount of one resource, never more than stored
    Loss(&'static [ResourceType], RangeInclusive<u32>),
    /// Lose 15% of the population (at least one); one citizen always survives
    Plague,
    Raid(RaidKind),
    /// Flavor text only
    Flavor,
}

#[derive(Debug, Clone)]
pub struct EventDef {
    pub name: &'static str,
    pub text: &'static str,
    pub effect: EventEffect,
}

impl EventDef {
    pub fn is_raid(&self) -> bool {
        matches!(self.effect, EventEffect::Raid(_))
    }
}

pub fn boons() -> Vec<EventDef> {
    vec![
        EventDef {
            name: "Wandering Settlers",
            text: "A group of travelers seeks refuge in your settlement.",
            effect: EventEffect::Settlers(1..=2),
        },
        EventDef {
            name: "Resource Discovery",
            text: "Your workers discovered a rich deposit nearby!",
            effect: EventEffect::Gain(COMMON_RESOURCES, 15..=34),
        },
        EventDef {
            name: "Favorable Weather",
            text: "Clear skies and warm rain bless your farmlands.",
            effect: EventEffect::Gain(&[ResourceType::Food], 10..=24),
        },
        EventDef {
            name: "Trade Caravan",
            text: "A merchant caravan passes through, trading generously.",
            effect: EventEffect::Gain(&[ResourceType::Gold], 10..=24),
        },
        EventDef {
            name: "Mana Surge",
            text: "A ley line flares beneath your settlement, releasing magical energy.",
            effect: EventEffect::Gain(&[ResourceType::Mana], 5..=14),
        },
    ]
}

pub fn challenges() -> Vec<EventDef> {
    vec![
        EventDef {
            name: "Bandit Raid",
            text: "A band of raiders attacks your settlement!",
            effect: EventEffect::Raid(RaidKind::Bandits),
        },
        EventDef {
            name: "Plague",
            text: "A mysterious sickness spreads through your people.",
            effect: EventEffect::Plague,
        },
        EventDef {
            name: "Drought",
            text: "A dry spell withers your crops.",
            effect: EventEffect::Loss(&[ResourceType::Food], 10..=24),
        },
        EventDef {
            name: "Resource Shortage",
            text: "Supply lines are disrupted. Stores are depleted.",
            effect: EventEffect::Loss(BUILDING_MATERIALS, 10..=19),
        },
        EventDef {
            name: "Wolf Attack",
            text: "Wolves descend from the hills, threatening your workers!",
            effect: EventEffect::Raid(RaidKind::Wolves),
        },
    ]
}

pub fn stories() -> Vec<EventDef> {
    vec![
        EventDef {
            name: "Travelers Arrive",
            text: "Weary travelers bring tales of distant kingdoms and strange lands.",
            effect: EventEffect::Flavor,
        },
        EventDef {
            name: "Omen in the Sky",
            text: "A strange light streaks across the night sky. Your people whisper of portents.",
            effect: EventEffect::Flavor,
        },
        EventDef {
            name: "Ancient Ruins Found",
            text: "Scouts report crumbling ruins at the edge of your territory.",
            effect: EventEffect::Gain(&[ResourceType::Gold], 3..=7),
        },
        EventDef {
            name: "Festival",
            text: "Your people hold a spontaneous celebration. Morale soars!",
            effect: EventEffect::Flavor,
        },
        EventDef {
            name: "Mysterious Stranger",
            text: "A hooded figure offers cryptic advice, then vanishes into the night.",
            effect: EventEffect::Gain(&[ResourceType::Mana], 2..=5),
        },
    ]
}

pub(crate) fn pick<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Apply an event to the settlement, returning the result line
///
/// Flavor events return an empty string.
pub fn apply_event(event: &EventDef, settlement: &mut Settlement, map: &mut HexMap, rng: &mut impl Rng) -> String {
    match &event.effect {
        EventEffect::Settlers(range) => {
            let gain = rng.gen_range(range.clone());
            let pop = &mut settlement.population;
            pop.current = pop.cap.min(pop.current + gain);
            format!("+{} population", gain)
        }
        EventEffect::Gain(pool, range) => {
            let resource = *pick(rng, pool);
            let amount = rng.gen_range(range.clone());
            settlement.resources.add(resource, amount);
            format!("+{} {}", amount, resource)
        }
        EventEffect::Loss(pool, range) => {
            let resource = *pick(rng, pool);
            let lost = settlement.resources.remove(resource, rng.gen_range(range.clone()));
            format!("-{} {}", lost, resource)
        }
        EventEffect::Plague => {
            let pop = &mut settlement.population;
            let loss = ((pop.current as f64 * 0.15).floor() as u32).max(1);
            pop.current = pop.current.saturating_sub(loss).max(1);
            format!("-{} population", loss)
        }
        EventEffect::Raid(kind) => execute_raid(settlement, map, *kind, rng),
        EventEffect::Flavor => String::new(),
    }
}
