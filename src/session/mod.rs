//! Typing session lifecycle: a pure state machine plus the engine that runs it.

mod engine;
mod state;
mod timer;

pub use engine::SessionEngine;
pub use state::{Effect, Phase, SessionEvent, SessionMode, SessionState, SessionSummary, Transition};
pub use timer::CountdownTimer;
