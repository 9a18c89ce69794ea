use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::assets::AssetResolver;
use crate::dial::{DialGeometry, DialSector, TouchPoint};

use super::actions::{Effect, SessionCommand, SessionOutput, SESSION_COMMAND_CAPACITY};
use super::entry::{EntryBuffer, TextStyle, DEFAULT_ENTRY_MAX_LEN};
use super::events::SessionEvent;
use super::timer::{LongPressTimer, TimerToken};
use super::types::{
    GamePhase, GameSnapshot, LevelTable, RoundOutcome, CONGRATULATIONS_TEXT, GAME_OVER_TEXT,
};

pub const DEFAULT_CENTER: TouchPoint = TouchPoint::new(180, 180);
pub const DEFAULT_MIN_RADIUS: f32 = 110.0;
pub const DEFAULT_LONG_PRESS_MS: u64 = 700;

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub geometry: DialGeometry,
    pub long_press_ms: u64,
    pub entry_max_len: usize,
    pub levels: LevelTable,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            geometry: DialGeometry::new(DEFAULT_CENTER, DEFAULT_MIN_RADIUS),
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            entry_max_len: DEFAULT_ENTRY_MAX_LEN,
            levels: LevelTable::reference(),
        }
    }
}

/// One running game on one dial.
///
/// Events go in through [`handle`](GameSession::handle); everything the host
/// has to show or schedule comes back in the returned [`SessionOutput`].
pub struct GameSession<A> {
    machine: statig::blocking::StateMachine<DialMachine>,
    assets: A,
    long_press_ms: u64,
}

impl<A: AssetResolver> GameSession<A> {
    pub fn new(config: SessionConfig, assets: A) -> Self {
        let entry = EntryBuffer::new(config.entry_max_len);
        Self {
            machine: DialMachine::new(config.geometry, config.levels, entry).state_machine(),
            assets,
            long_press_ms: config.long_press_ms,
        }
    }

    pub fn handle(&mut self, event: SessionEvent) -> SessionOutput {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        self.finish(context)
    }

    pub fn pointer_down(&mut self, x: i32, y: i32) -> SessionOutput {
        self.handle(SessionEvent::PointerDown(TouchPoint::new(x, y)))
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) -> SessionOutput {
        self.handle(SessionEvent::PointerMove(TouchPoint::new(x, y)))
    }

    pub fn pointer_up(&mut self, x: i32, y: i32) -> SessionOutput {
        self.handle(SessionEvent::PointerUp(TouchPoint::new(x, y)))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let inner = self.machine.inner();
        GameSnapshot {
            phase: GamePhase::for_level(inner.level),
            level: inner.level,
            total_levels: inner.levels.total(),
            pending_digit: inner.pending,
            long_press_armed: inner.timer.armed(),
            entry: inner.entry.text().clone(),
        }
    }

    fn finish(&self, context: DispatchContext) -> SessionOutput {
        let mut output = SessionOutput {
            outcome: context.outcome,
            ..SessionOutput::default()
        };
        for effect in context.effects {
            let command = self.resolve(effect);
            if output.commands.push(command).is_err() {
                log::warn!("game: command buffer full; dropping command");
            }
        }
        output
    }

    fn resolve(&self, effect: Effect) -> SessionCommand {
        match effect {
            Effect::Text(text) => {
                let style = TextStyle::for_len(text.len());
                SessionCommand::SetText { text, style }
            }
            Effect::LevelImage(level) => SessionCommand::SetImage(self.assets.level_image(level)),
            Effect::Feedback(sector) => SessionCommand::PlayTouchFeedback(sector),
            Effect::ArmTimer(token) => SessionCommand::ArmLongPress {
                token,
                delay_ms: self.long_press_ms,
            },
            Effect::CancelTimer(token) => SessionCommand::CancelLongPress { token },
        }
    }
}

#[derive(Default)]
struct DispatchContext {
    effects: heapless::Vec<Effect, SESSION_COMMAND_CAPACITY>,
    outcome: Option<RoundOutcome>,
}

impl DispatchContext {
    fn emit(&mut self, effect: Effect) {
        if self.effects.push(effect).is_err() {
            log::warn!("game: effect buffer full; dropping effect");
        }
    }
}

struct DialMachine {
    geometry: DialGeometry,
    levels: LevelTable,
    level: u16,
    pending: Option<DialSector>,
    timer: LongPressTimer,
    entry: EntryBuffer,
}

impl DialMachine {
    fn new(geometry: DialGeometry, levels: LevelTable, entry: EntryBuffer) -> Self {
        Self {
            geometry,
            levels,
            level: 0,
            pending: None,
            timer: LongPressTimer::new(),
            entry,
        }
    }

    fn begin_press(&mut self, context: &mut DispatchContext, point: TouchPoint) -> Outcome<State> {
        self.cancel_timer(context);
        self.pending = self.geometry.classify(point);

        let Some(sector) = self.pending else {
            return Transition(State::cancelled());
        };

        log::debug!("game: press sector={} x={} y={}", sector, point.x, point.y);
        context.emit(Effect::Feedback(sector));
        if sector.special_key().is_some() {
            let token = self.timer.arm();
            context.emit(Effect::ArmTimer(token));
        }
        Transition(State::pressed())
    }

    fn cancel_timer(&mut self, context: &mut DispatchContext) {
        if let Some(token) = self.timer.cancel() {
            context.emit(Effect::CancelTimer(token));
        }
    }

    fn show_text(&mut self, context: &mut DispatchContext, message: &str) {
        self.entry.show(message);
        context.emit(Effect::Text(self.entry.text().clone()));
    }

    fn resolve_long_press(&mut self, context: &mut DispatchContext, token: TimerToken) -> bool {
        if !self.timer.fire(token) {
            log::debug!("game: stale long-press token={}", token.raw());
            return false;
        }
        let Some(key) = self.pending.and_then(DialSector::special_key) else {
            return false;
        };

        self.pending = None;
        if self.entry.append(key.symbol()) {
            context.emit(Effect::Text(self.entry.text().clone()));
        }
        log::debug!("game: long press symbol={}", key.symbol());
        true
    }

    fn confirm_digit(&mut self, context: &mut DispatchContext, touched: DialSector) {
        let expected = self.levels.expected_digit(self.level);
        let outcome = if self.level == 0 || expected == Some(touched) {
            self.level += 1;
            if self.level > self.levels.total() {
                self.level = 0;
                self.show_text(context, CONGRATULATIONS_TEXT);
                log::info!("game: all {} levels cleared", self.levels.total());
                RoundOutcome::Won
            } else {
                context.emit(Effect::LevelImage(self.level));
                self.entry.show_level(self.level);
                context.emit(Effect::Text(self.entry.text().clone()));
                log::info!("game: level {} reached", self.level);
                RoundOutcome::Advanced { level: self.level }
            }
        } else {
            let level = self.level;
            self.level = 0;
            self.show_text(context, GAME_OVER_TEXT);
            match expected {
                Some(expected) => log::info!(
                    "game: game over at level {} expected={} touched={}",
                    level,
                    expected,
                    touched
                ),
                None => log::warn!("game: game over at level {level} with no answer in table"),
            }
            RoundOutcome::Lost {
                level,
                expected,
                touched,
            }
        };
        context.outcome = Some(outcome);
    }
}

#[state_machine(initial = "State::idle()")]
impl DialMachine {
    #[state(superstate = "session")]
    fn idle(&mut self, context: &mut DispatchContext, event: &SessionEvent) -> Outcome<State> {
        match event {
            SessionEvent::PointerDown(point) => self.begin_press(context, *point),
            SessionEvent::PointerMove(_)
            | SessionEvent::PointerUp(_)
            | SessionEvent::LongPressTimeout(_) => Handled,
            _ => Super,
        }
    }

    #[state(superstate = "session")]
    fn pressed(&mut self, context: &mut DispatchContext, event: &SessionEvent) -> Outcome<State> {
        match event {
            SessionEvent::PointerDown(point) => self.begin_press(context, *point),
            SessionEvent::PointerMove(point) => {
                if self.geometry.classify(*point) == self.pending {
                    return Handled;
                }
                log::debug!("game: press slid off sector; cancelled");
                self.pending = None;
                self.cancel_timer(context);
                Transition(State::cancelled())
            }
            SessionEvent::LongPressTimeout(token) => {
                if self.resolve_long_press(context, *token) {
                    Transition(State::cancelled())
                } else {
                    Handled
                }
            }
            SessionEvent::PointerUp(_) => {
                self.cancel_timer(context);
                if let Some(touched) = self.pending.take() {
                    self.confirm_digit(context, touched);
                }
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    // Pointer still down, but nothing left to confirm.
    #[state(superstate = "session")]
    fn cancelled(&mut self, context: &mut DispatchContext, event: &SessionEvent) -> Outcome<State> {
        match event {
            SessionEvent::PointerDown(point) => self.begin_press(context, *point),
            SessionEvent::PointerMove(_) | SessionEvent::LongPressTimeout(_) => Handled,
            SessionEvent::PointerUp(_) => {
                self.cancel_timer(context);
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    #[superstate]
    fn session(&mut self, context: &mut DispatchContext, event: &SessionEvent) -> Outcome<State> {
        match event {
            SessionEvent::Backspace => {
                if self.entry.backspace() {
                    context.emit(Effect::Text(self.entry.text().clone()));
                }
                Handled
            }
            SessionEvent::ClearEntry => {
                if self.entry.clear() {
                    context.emit(Effect::Text(self.entry.text().clone()));
                }
                Handled
            }
            _ => Handled,
        }
    }
}
