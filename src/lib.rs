//! Mythic Realms - turn-based hex settlement strategy
//!
//! The player grows a settlement on a hex map against a scripted AI
//! opponent and a storyteller that throws boons, raids and quests at it.
//! [`Game`] drives everything one end-turn at a time.

pub mod ai;
pub mod catalog;
pub mod core;
pub mod game;
pub mod map;
pub mod settlement;
pub mod simulation;
pub mod storyteller;
pub mod tech;
pub mod units;
pub mod victory;

pub use crate::core::{ActionError, GameConfig, RealmError, Result};
pub use game::{AttackResult, EndTurnReport, Game};
pub use victory::{GameOutcome, GameStats};
