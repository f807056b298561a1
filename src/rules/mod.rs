//! Game rules: the engine, energy accrual, events and render snapshots.
//!
//! [`GameEngine`] is the only owner of game state. Everything outside it
//! (renderers, input handling) talks to it through commands, observers and
//! snapshots.

pub mod energy;
pub mod event;
pub mod snapshot;
pub mod engine;

pub use energy::{collect_energy, factory_yield, EnergyYield};
pub use event::{EventLog, GameEvent, GameObserver};
pub use snapshot::{EdgeView, RenderSnapshot, VertexView};
pub use engine::{GameEngine, MoveOutcome, PlayerState, Rejection};
