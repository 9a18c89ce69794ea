use crate::dial::DialSector;

use super::entry::EntryText;
use super::timer::TimerToken;

pub const MAX_LEVELS: usize = 100;

pub(crate) const CONGRATULATIONS_TEXT: &str = "Congratulations!";
pub(crate) const GAME_OVER_TEXT: &str = "Game Over";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelDefinition {
    pub expected_digit: DialSector,
    pub image: String,
}

impl LevelDefinition {
    pub fn new(expected_digit: DialSector, image: impl Into<String>) -> Self {
        Self {
            expected_digit,
            image: image.into(),
        }
    }
}

/// Answers and background images for levels `1..=total`.
///
/// Level 0 is the "not started" state and has no row of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelTable {
    levels: Vec<LevelDefinition>,
}

impl LevelTable {
    /// Rows past [`MAX_LEVELS`] are dropped.
    pub fn new(mut levels: Vec<LevelDefinition>) -> Self {
        if levels.len() > MAX_LEVELS {
            log::warn!(
                "game: level table has {} rows; keeping first {MAX_LEVELS}",
                levels.len()
            );
            levels.truncate(MAX_LEVELS);
        }
        Self { levels }
    }

    /// Four levels answered by their own number.
    pub fn reference() -> Self {
        let levels = (1u8..=4)
            .filter_map(|level| {
                DialSector::new(level)
                    .map(|digit| LevelDefinition::new(digit, format!("lv{level}.png")))
            })
            .collect();
        Self { levels }
    }

    pub fn total(&self) -> u16 {
        self.levels.len() as u16
    }

    pub fn get(&self, level: u16) -> Option<&LevelDefinition> {
        let index = usize::from(level).checked_sub(1)?;
        self.levels.get(index)
    }

    pub fn expected_digit(&self, level: u16) -> Option<DialSector> {
        self.get(level).map(|def| def.expected_digit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::reference()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    InProgress,
}

impl GamePhase {
    pub const fn for_level(level: u16) -> Self {
        if level == 0 {
            Self::NotStarted
        } else {
            Self::InProgress
        }
    }
}

/// Result of a confirmed digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Advanced {
        level: u16,
    },
    Won,
    Lost {
        level: u16,
        expected: Option<DialSector>,
        touched: DialSector,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub level: u16,
    pub total_levels: u16,
    pub pending_digit: Option<DialSector>,
    pub long_press_armed: Option<TimerToken>,
    pub entry: EntryText,
}
