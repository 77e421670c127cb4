//! Per-settlement research progress

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::tree::{find_tech, tree_for};
use crate::catalog::BuildingKind;
use crate::core::error::ActionError;
use crate::core::types::{Race, Resources};

/// Research status of a single node
///
/// Moves only forward: locked -> available -> researching -> completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechStatus {
    #[default]
    Locked,
    Available,
    Researching,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TechNode {
    pub status: TechStatus,
    #[serde(default)]
    pub turns_remaining: u32,
}

/// Research state keyed by tech id
///
/// Ids not found in the race's tree (old or corrupt saves) are carried
/// along but never advanced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechState {
    nodes: BTreeMap<String, TechNode>,
}

impl TechState {
    /// Fresh state: root techs available, everything else locked
    pub fn new(race: Race) -> Self {
        let nodes = tree_for(race)
            .iter()
            .map(|tech| {
                let status = if tech.prerequisites.is_empty() {
                    TechStatus::Available
                } else {
                    TechStatus::Locked
                };
                (
                    tech.id.to_string(),
                    TechNode {
                        status,
                        turns_remaining: 0,
                    },
                )
            })
            .collect();
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&TechNode> {
        self.nodes.get(id)
    }

    pub fn status(&self, id: &str) -> Option<TechStatus> {
        self.nodes.get(id).map(|n| n.status)
    }

    pub fn completed_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.status == TechStatus::Completed)
            .count()
    }

    /// Id of the tech being researched, if any
    pub fn current_research(&self) -> Option<&str> {
        self.nodes
            .iter()
            .find(|(_, n)| n.status == TechStatus::Researching)
            .map(|(id, _)| id.as_str())
    }

    pub fn can_research(&self, race: Race, id: &str, resources: &Resources) -> Result<(), ActionError> {
        let tech = find_tech(race, id).ok_or(ActionError::UnknownTech)?;
        let node = self.nodes.get(id).copied().unwrap_or_default();

        match node.status {
            TechStatus::Completed => return Err(ActionError::AlreadyResearched),
            TechStatus::Researching => return Err(ActionError::AlreadyResearching),
            TechStatus::Locked => return Err(ActionError::PrerequisitesNotMet),
            TechStatus::Available => {}
        }

        if let Some(busy) = self.current_research() {
            let name = find_tech(race, busy).map(|t| t.name).unwrap_or("another tech");
            return Err(ActionError::ResearchBusy(name));
        }

        if let Some(missing) = resources.shortfall(tech.cost) {
            return Err(ActionError::NotEnough(missing));
        }

        Ok(())
    }

    /// Validate, pay and start researching
    pub fn start_research(&mut self, race: Race, id: &str, resources: &mut Resources) -> Result<(), ActionError> {
        self.can_research(race, id, resources)?;
        let tech = find_tech(race, id).ok_or(ActionError::UnknownTech)?;
        resources.pay(tech.cost)?;

        let node = self.nodes.entry(id.to_string()).or_default();
        node.status = TechStatus::Researching;
        node.turns_remaining = tech.turns_to_research;
        tracing::debug!(tech = id, turns = tech.turns_to_research, "research started");
        Ok(())
    }

    /// Tick the active research; returns the ids completed this turn
    pub fn advance(&mut self, race: Race) -> Vec<String> {
        let mut completed = Vec::new();

        for (id, node) in self.nodes.iter_mut() {
            if node.status != TechStatus::Researching {
                continue;
            }
            if find_tech(race, id).is_none() {
                tracing::warn!(tech = %id, "skipping unknown tech in research state");
                continue;
            }
            node.turns_remaining = node.turns_remaining.saturating_sub(1);
            if node.turns_remaining == 0 {
                node.status = TechStatus::Completed;
                completed.push(id.clone());
            }
        }

        if !completed.is_empty() {
            self.refresh_available(race);
        }

        completed
    }

    /// Promote locked techs whose prerequisites are all completed
    pub fn refresh_available(&mut self, race: Race) {
        for tech in tree_for(race) {
            if self.status(tech.id).unwrap_or_default() != TechStatus::Locked {
                continue;
            }
            let all_met = tech
                .prerequisites
                .iter()
                .all(|p| self.status(p) == Some(TechStatus::Completed));
            if all_met {
                self.nodes.entry(tech.id.to_string()).or_default().status = TechStatus::Available;
            }
        }
    }

    /// Buildings unlocked by completed research; the Town Center always is
    pub fn unlocked_buildings(&self, race: Race) -> BTreeSet<BuildingKind> {
        let mut unlocked = BTreeSet::from([BuildingKind::TownCenter]);
        for (id, node) in &self.nodes {
            if node.status != TechStatus::Completed {
                continue;
            }
            if let Some(tech) = find_tech(race, id) {
                unlocked.extend(tech.unlocks.iter().copied());
            }
        }
        unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::starting_resources;
    use crate::core::types::ResourceType;

    #[test]
    fn test_new_state_roots_available() {
        let state = TechState::new(Race::Human);
        assert_eq!(state.status("agriculture"), Some(TechStatus::Available));
        assert_eq!(state.status("commerce"), Some(TechStatus::Locked));
        assert_eq!(state.current_research(), None);
    }

    #[test]
    fn test_research_lifecycle() {
        let race = Race::Human;
        let mut state = TechState::new(race);
        let mut res = starting_resources(race);

        state.start_research(race, "agriculture", &mut res).unwrap();
        assert_eq!(res.get(ResourceType::Food), 30);
        assert_eq!(res.get(ResourceType::Gold), 20);
        assert_eq!(state.current_research(), Some("agriculture"));

        assert!(state.advance(race).is_empty());
        assert!(state.advance(race).is_empty());
        assert_eq!(state.advance(race), vec!["agriculture".to_string()]);

        assert_eq!(state.status("agriculture"), Some(TechStatus::Completed));
        assert_eq!(state.status("commerce"), Some(TechStatus::Available));
        assert!(state.unlocked_buildings(race).contains(&BuildingKind::Farm));
    }

    #[test]
    fn test_rejection_reasons() {
        let race = Race::Human;
        let mut state = TechState::new(race);
        let mut res = starting_resources(race);

        assert_eq!(
            state.can_research(race, "alchemy", &res),
            Err(ActionError::UnknownTech)
        );
        assert_eq!(
            state.can_research(race, "commerce", &res),
            Err(ActionError::PrerequisitesNotMet)
        );

        state.start_research(race, "agriculture", &mut res).unwrap();
        assert_eq!(
            state.can_research(race, "agriculture", &res),
            Err(ActionError::AlreadyResearching)
        );
        assert_eq!(
            state.can_research(race, "militia", &res),
            Err(ActionError::ResearchBusy("Agriculture"))
        );
    }

    #[test]
    fn test_cost_checked_last() {
        let race = Race::Elf;
        let state = TechState::new(race);
        assert_eq!(
            state.can_research(race, "moonlight", &Resources::new()),
            Err(ActionError::NotEnough(ResourceType::Wood))
        );
    }

    #[test]
    fn test_dependent_waits_for_all_prerequisites() {
        let race = Race::Human;
        let mut state = TechState::new(race);
        let mut res = Resources::from_amounts(&[
            (ResourceType::Food, 500),
            (ResourceType::Wood, 500),
            (ResourceType::Stone, 500),
            (ResourceType::Gold, 500),
        ]);

        state.start_research(race, "militia", &mut res).unwrap();
        for _ in 0..3 {
            state.advance(race);
        }
        assert_eq!(state.status("fortification"), Some(TechStatus::Locked));

        state.start_research(race, "masonry", &mut res).unwrap();
        for _ in 0..3 {
            state.advance(race);
        }
        assert_eq!(state.status("fortification"), Some(TechStatus::Available));
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let race = Race::Orc;
        let mut state = TechState::new(race);
        state.nodes.insert(
            "lost_art".into(),
            TechNode {
                status: TechStatus::Researching,
                turns_remaining: 1,
            },
        );
        assert!(state.advance(race).is_empty());
        assert_eq!(state.status("lost_art"), Some(TechStatus::Researching));
    }
}
