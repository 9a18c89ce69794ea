//! Level state machine driven by dial touches.

pub mod actions;
pub mod engine;
pub mod entry;
pub mod events;
pub mod timer;
pub mod types;

pub use actions::{SessionCommand, SessionOutput, SESSION_COMMAND_CAPACITY};
pub use engine::{
    GameSession, SessionConfig, DEFAULT_CENTER, DEFAULT_LONG_PRESS_MS, DEFAULT_MIN_RADIUS,
};
pub use entry::{EntryBuffer, EntryText, TextStyle, ENTRY_TEXT_CAPACITY};
pub use events::SessionEvent;
pub use timer::{LongPressTimer, TimerToken};
pub use types::{
    GamePhase, GameSnapshot, LevelDefinition, LevelTable, RoundOutcome, MAX_LEVELS,
};
