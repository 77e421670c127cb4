//! Per-turn settlement simulation

pub mod turn;

pub use turn::{process_turn, worker_ratio, BuildingCompleted, TurnReport};
