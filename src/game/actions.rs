use crate::assets::ImageRef;
use crate::dial::DialSector;

use super::entry::{EntryText, TextStyle};
use super::timer::TimerToken;
use super::types::RoundOutcome;

pub const SESSION_COMMAND_CAPACITY: usize = 4;

/// Instruction for the display sink or the timer service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    SetText { text: EntryText, style: TextStyle },
    SetImage(ImageRef),
    PlayTouchFeedback(DialSector),
    ArmLongPress { token: TimerToken, delay_ms: u64 },
    CancelLongPress { token: TimerToken },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionOutput {
    pub commands: heapless::Vec<SessionCommand, SESSION_COMMAND_CAPACITY>,
    pub outcome: Option<RoundOutcome>,
}

impl SessionOutput {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.outcome.is_none()
    }

    pub fn last_text(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|command| match command {
            SessionCommand::SetText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.commands.iter().find_map(|command| match command {
            SessionCommand::SetImage(image) => Some(image),
            _ => None,
        })
    }

    pub fn armed_timer(&self) -> Option<(TimerToken, u64)> {
        self.commands.iter().find_map(|command| match command {
            SessionCommand::ArmLongPress { token, delay_ms } => Some((*token, *delay_ms)),
            _ => None,
        })
    }

    pub fn cancelled_timer(&self) -> Option<TimerToken> {
        self.commands.iter().find_map(|command| match command {
            SessionCommand::CancelLongPress { token } => Some(*token),
            _ => None,
        })
    }
}

// Machine-side effects, resolved into commands by the engine once the event
// has been dispatched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Effect {
    Text(EntryText),
    LevelImage(u16),
    Feedback(DialSector),
    ArmTimer(TimerToken),
    CancelTimer(TimerToken),
}
