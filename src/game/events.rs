use crate::dial::TouchPoint;

use super::timer::TimerToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    PointerDown(TouchPoint),
    PointerMove(TouchPoint),
    PointerUp(TouchPoint),
    LongPressTimeout(TimerToken),
    Backspace,
    ClearEntry,
}
