//! Circular dial-pad touch classifier and the level game it drives.

pub mod assets;
pub mod config;
pub mod dial;
pub mod game;
pub mod replay;

pub use assets::{AssetResolver, ImageRef, ResourceAssets};
pub use config::{ConfigError, DialConfig};
pub use dial::{classify, DialGeometry, DialSector, SpecialKey, TouchPoint};
pub use game::{GameSession, SessionCommand, SessionConfig, SessionEvent, SessionOutput};
