use thiserror::Error;

use super::types::{MaskType, TurnPhase};
use crate::cards::ZoneName;

/// Coarse classification of an [`ActionError`], used by the HTTP layer to
/// pick a status code without matching every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or rule-breaking request (400).
    Validation,
    /// Wrong credentials (401).
    Unauthenticated,
    /// Known caller, action not allowed right now (403).
    Forbidden,
    /// Referenced entity does not exist (404).
    NotFound,
    /// Request raced a concurrent change and is no longer applicable (409).
    Conflict,
    /// State corruption the engine refuses to act on (500).
    Internal,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("player not found in this session")]
    PlayerNotFound,
    #[error("target player not found in this session")]
    TargetPlayerNotFound,
    #[error("only the host can {0}")]
    HostOnly(&'static str),
    #[error("incorrect password")]
    WrongPassword,
    #[error("the game has already started")]
    GameAlreadyStarted,
    #[error("the lobby is full")]
    LobbyFull,
    #[error("that name is already taken in this lobby")]
    NameTaken,
    #[error("need between {min} and {max} players to start, have {actual}")]
    PlayerCount { min: usize, max: usize, actual: usize },
    #[error("not your turn")]
    NotYourTurn,
    #[error("action requires the {expected} phase, but the game is in {actual}")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },
    #[error("unknown victory condition `{0}`")]
    UnknownVictoryCondition(String),
    #[error("victory condition is no longer available")]
    VictoryConditionTaken,
    #[error("you have already selected a victory condition")]
    VictoryConditionAlreadySelected,
    #[error("no victory condition to reveal")]
    NoVictoryCondition,
    #[error("victory condition is already revealed")]
    VictoryConditionAlreadyRevealed,
    #[error("card not found in hand")]
    CardNotInHand,
    #[error("no secret on the {0} mask")]
    MaskEmpty(MaskType),
    #[error("the {0} mask already holds a secret")]
    MaskOccupied(MaskType),
    #[error("the eclipse mask cannot be targeted by a reveal")]
    EclipseNotRevealable,
    #[error("declared draw cost does not match the selection")]
    DrawCostMismatch { declared: u32, computed: u32 },
    #[error("not enough gold: need {need}, have {have}")]
    InsufficientGold { need: u32, have: u32 },
    #[error("selected cards are no longer on top of the deck")]
    StaleDrawOffer,
    #[error("cannot move to {0} from your current zone")]
    IllegalMove(ZoneName),
    #[error("you have already moved this turn")]
    AlreadyMoved,
    #[error("cannot request a reveal of your own hand")]
    SelfHandReveal,
    #[error("no matching hand reveal request is pending")]
    NoPendingHandRevealRequest,
    #[error("{0}")]
    Validation(String),
    #[error("internal state error: {0}")]
    Invariant(&'static str),
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        use ActionError::*;
        match self {
            PlayerNotFound | TargetPlayerNotFound => ErrorKind::NotFound,
            WrongPassword => ErrorKind::Unauthenticated,
            HostOnly(_) | GameAlreadyStarted | NotYourTurn | WrongPhase { .. } => {
                ErrorKind::Forbidden
            }
            InsufficientGold { .. } => ErrorKind::Forbidden,
            LobbyFull | NameTaken | VictoryConditionTaken | StaleDrawOffer => ErrorKind::Conflict,
            PlayerCount { .. }
            | UnknownVictoryCondition(_)
            | VictoryConditionAlreadySelected
            | NoVictoryCondition
            | VictoryConditionAlreadyRevealed
            | CardNotInHand
            | MaskEmpty(_)
            | MaskOccupied(_)
            | EclipseNotRevealable
            | DrawCostMismatch { .. }
            | IllegalMove(_)
            | AlreadyMoved
            | SelfHandReveal
            | NoPendingHandRevealRequest
            | Validation(_) => ErrorKind::Validation,
            Invariant(_) => ErrorKind::Internal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}

/// Structural self-check, run by tests after every transition.
pub trait InvariantCheck {
    fn validate_invariants(&self) -> Result<(), StateError>;
}
