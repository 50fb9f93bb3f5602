pub mod cards;
pub mod engine;
pub mod server;
pub mod store;

pub use engine::{Action, Engine, GameState};
