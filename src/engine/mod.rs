//! The game engine: state model, action set and the pure processor that
//! advances one session per submitted action.

pub mod actions;
#[allow(clippy::module_inception)]
pub mod engine;
pub mod errors;
pub mod rules;
pub mod setup;
pub mod state;
pub mod types;

pub use actions::Action;
pub use engine::{Applied, Engine, OfferedCard, Persist, Reply};
pub use errors::{ActionError, ErrorKind, InvariantCheck, StateError};
pub use setup::{join, new_lobby};
pub use state::GameState;
pub use types::{
    CardRef, HandRevealRequest, Masks, MaskType, Player, PlayerId, Resource, RevealedHand,
    RevealedMask, SessionId, Timestamp, TurnPhase, WinRecord, Zone,
};

#[cfg(test)]
mod tests;
