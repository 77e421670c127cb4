use thiserror::Error;

use crate::core::types::ResourceType;

#[derive(Error, Debug)]
pub enum RealmError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Action rejected: {0}")]
    Rejected(#[from] ActionError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RealmError>;

/// Why a player or AI action was refused.
///
/// The `Display` text is the reason string shown to the player.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    // === PLACEMENT ===
    #[error("Unknown building type")]
    UnknownBuilding,

    #[error("{0} is not available to this race")]
    BuildingNotForRace(&'static str),

    #[error("Requires {0} terrain")]
    WrongTerrain(String),

    #[error("Cannot build on water")]
    WaterHex,

    #[error("Hex already has a building")]
    HexOccupied,

    #[error("No such hex")]
    NoSuchHex,

    #[error("Not enough {0}")]
    NotEnough(ResourceType),

    // === BUILDINGS ===
    #[error("No building at that hex")]
    NoBuilding,

    #[error("Still under construction")]
    UnderConstruction,

    #[error("Already max level")]
    MaxLevel,

    #[error("All worker slots are filled")]
    WorkerSlotsFull,

    #[error("No available workers")]
    NoIdleWorkers,

    #[error("No workers assigned")]
    NoWorkersAssigned,

    #[error("Hex already has an improvement")]
    AlreadyImproved,

    // === RESEARCH ===
    #[error("Unknown tech")]
    UnknownTech,

    #[error("Already researched")]
    AlreadyResearched,

    #[error("Already researching")]
    AlreadyResearching,

    #[error("Prerequisites not met")]
    PrerequisitesNotMet,

    #[error("Already researching {0}")]
    ResearchBusy(&'static str),

    // === UNITS ===
    #[error("Unknown unit type")]
    UnknownUnit,

    #[error("Not enough population")]
    NotEnoughPopulation,

    #[error("Requires completed {0}")]
    RequiresBuilding(String),

    #[error("Only one hero allowed")]
    HeroLimit,

    #[error("No such unit")]
    NoSuchUnit,

    #[error("Unit is not ready")]
    UnitNotReady,

    #[error("Unit has no moves left this turn")]
    NoMovesLeft,

    #[error("Destination is out of range")]
    OutOfRange,

    #[error("Target is not adjacent")]
    NotAdjacent,

    #[error("Nothing to attack there")]
    NoTarget,

    #[error("Unit has no charge ability")]
    NoChargeAbility,

    #[error("Charge already active")]
    ChargeActive,

    #[error("The game is over")]
    GameOver,
}
