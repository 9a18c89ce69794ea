//! Offline replay of recorded dial traces.
//!
//! A trace is a CSV file of timestamped pointer and key events:
//!
//! ```text
//! dial_trace,ms,kind,x,y
//! pointer,0,down,200,150
//! pointer,40,up,200,150
//! key,900,backspace
//! ```
//!
//! The long-press timer runs on a virtual clock: an armed timer fires at
//! `armed_at + delay_ms`, before any trace event stamped at or after that
//! moment. A timer still armed after the last event fires at the end.

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::assets::AssetResolver;
use crate::dial::TouchPoint;
use crate::game::{GameSession, RoundOutcome, SessionCommand, SessionEvent, TimerToken};


pub const TRACE_HEADER: &str = "dial_trace,ms,kind,x,y";
pub const OUTPUT_HEADER: &str = "command,ms,label,detail";

#[derive(Debug)]
pub enum ReplayError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, line: usize, msg: String },
    Mismatch { expected: Vec<String>, actual: Vec<String> },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Parse { path, line, msg } => write!(f, "{}:{line} {msg}", path.display()),
            Self::Mismatch { expected, actual } => write!(
                f,
                "command sequence mismatch\nexpected: {}\nactual:   {}",
                expected.join(","),
                actual.join(",")
            ),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceInput {
    Down(TouchPoint),
    Move(TouchPoint),
    Up(TouchPoint),
    Backspace,
    Clear,
}

impl TraceInput {
    fn event(self) -> SessionEvent {
        match self {
            Self::Down(point) => SessionEvent::PointerDown(point),
            Self::Move(point) => SessionEvent::PointerMove(point),
            Self::Up(point) => SessionEvent::PointerUp(point),
            Self::Backspace => SessionEvent::Backspace,
            Self::Clear => SessionEvent::ClearEntry,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    pub ms: u64,
    pub input: TraceInput,
}

/// One emitted command or round outcome, stamped with virtual time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayLine {
    pub ms: u64,
    pub label: &'static str,
    pub detail: String,
}

impl fmt::Display for ReplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command,{},{},{}", self.ms, self.label, self.detail)
    }
}

pub fn parse_trace(path: &Path) -> Result<Vec<TraceRecord>, ReplayError> {
    let file = File::open(path).map_err(|source| io_error(path, source))?;
    parse_trace_reader(BufReader::new(file), path)
}

/// Parses trace lines; `origin` is only used in error messages.
pub fn parse_trace_reader(
    reader: impl BufRead,
    origin: &Path,
) -> Result<Vec<TraceRecord>, ReplayError> {
    let mut out = Vec::new();
    let mut last_ms = 0u64;
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result.map_err(|source| io_error(origin, source))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == TRACE_HEADER {
            continue;
        }

        let record = parse_record(trimmed).map_err(|msg| ReplayError::Parse {
            path: origin.to_path_buf(),
            line: line_no,
            msg,
        })?;
        if record.ms < last_ms {
            return Err(ReplayError::Parse {
                path: origin.to_path_buf(),
                line: line_no,
                msg: format!("timestamp {} goes backwards (previous {last_ms})", record.ms),
            });
        }
        last_ms = record.ms;
        out.push(record);
    }
    Ok(out)
}

fn parse_record(line: &str) -> Result<TraceRecord, String> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    let source = parts.first().copied().unwrap_or_default();
    match source {
        "pointer" => {
            if parts.len() != 5 {
                return Err("invalid pointer line, expected 5 columns".into());
            }
            let ms = parse_field::<u64>(parts[1], "ms")?;
            let point = TouchPoint::new(
                parse_field::<i32>(parts[3], "x")?,
                parse_field::<i32>(parts[4], "y")?,
            );
            let input = match parts[2].to_ascii_lowercase().as_str() {
                "down" => TraceInput::Down(point),
                "move" => TraceInput::Move(point),
                "up" => TraceInput::Up(point),
                other => return Err(format!("invalid pointer kind '{other}'")),
            };
            Ok(TraceRecord { ms, input })
        }
        "key" => {
            if parts.len() != 3 {
                return Err("invalid key line, expected 3 columns".into());
            }
            let ms = parse_field::<u64>(parts[1], "ms")?;
            let input = match parts[2].to_ascii_lowercase().as_str() {
                "backspace" => TraceInput::Backspace,
                "clear" => TraceInput::Clear,
                other => return Err(format!("invalid key '{other}'")),
            };
            Ok(TraceRecord { ms, input })
        }
        other => Err(format!("unknown record type '{other}'")),
    }
}

fn parse_field<T>(raw: &str, field: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| format!("invalid {field} '{raw}': {e}"))
}

/// Reads an expected-labels file: one label per line, `#` comments allowed.
pub fn parse_expected_labels(path: &Path) -> Result<Vec<String>, ReplayError> {
    let file = File::open(path).map_err(|source| io_error(path, source))?;
    let mut labels = Vec::new();
    for (line_no, line_result) in BufReader::new(file).lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result.map_err(|source| io_error(path, source))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let label = normalize_label(token).ok_or_else(|| ReplayError::Parse {
            path: path.to_path_buf(),
            line: line_no,
            msg: format!("invalid expected label: {token}"),
        })?;
        labels.push(label.to_string());
    }
    Ok(labels)
}

fn normalize_label(label: &str) -> Option<&'static str> {
    match label.to_ascii_lowercase().as_str() {
        "text" => Some("text"),
        "image" => Some("image"),
        "feedback" => Some("feedback"),
        "arm" => Some("arm"),
        "cancel" => Some("cancel"),
        "advanced" => Some("advanced"),
        "won" => Some("won"),
        "lost" => Some("lost"),
        _ => None,
    }
}

pub fn compare_labels(expected: &[String], actual: &[ReplayLine]) -> Result<(), ReplayError> {
    let actual: Vec<String> = actual.iter().map(|line| line.label.to_string()).collect();
    if actual == expected {
        Ok(())
    } else {
        Err(ReplayError::Mismatch {
            expected: expected.to_vec(),
            actual,
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct VirtualTimer {
    armed: Option<(TimerToken, u64)>,
}

impl VirtualTimer {
    fn due(&self, now_ms: u64) -> Option<(TimerToken, u64)> {
        self.armed.filter(|(_, deadline)| *deadline <= now_ms)
    }

    fn apply(&mut self, now_ms: u64, command: &SessionCommand) {
        match command {
            SessionCommand::ArmLongPress { token, delay_ms } => {
                self.armed = Some((*token, now_ms.saturating_add(*delay_ms)));
            }
            SessionCommand::CancelLongPress { token } => {
                if self.armed.is_some_and(|(armed, _)| armed == *token) {
                    self.armed = None;
                }
            }
            _ => {}
        }
    }
}

/// Drives `session` through `records` and collects everything it emitted.
pub fn run<A: AssetResolver>(
    session: &mut GameSession<A>,
    records: &[TraceRecord],
) -> Vec<ReplayLine> {
    let mut timer = VirtualTimer::default();
    let mut lines = Vec::new();

    for record in records {
        while let Some((token, deadline)) = timer.due(record.ms) {
            timer.armed = None;
            dispatch(
                session,
                &mut timer,
                &mut lines,
                deadline,
                SessionEvent::LongPressTimeout(token),
            );
        }
        dispatch(session, &mut timer, &mut lines, record.ms, record.input.event());
    }

    if let Some((token, deadline)) = timer.armed.take() {
        dispatch(
            session,
            &mut timer,
            &mut lines,
            deadline,
            SessionEvent::LongPressTimeout(token),
        );
    }

    log::debug!(
        "replay: {} records produced {} lines",
        records.len(),
        lines.len()
    );
    lines
}

fn dispatch<A: AssetResolver>(
    session: &mut GameSession<A>,
    timer: &mut VirtualTimer,
    lines: &mut Vec<ReplayLine>,
    ms: u64,
    event: SessionEvent,
) {
    let output = session.handle(event);
    for command in &output.commands {
        timer.apply(ms, command);
        lines.push(command_line(ms, command));
    }
    if let Some(outcome) = output.outcome {
        lines.push(outcome_line(ms, outcome));
    }
}

fn command_line(ms: u64, command: &SessionCommand) -> ReplayLine {
    let (label, detail) = match command {
        SessionCommand::SetText { text, style } => ("text", format!("{}:{}", style.label(), text)),
        SessionCommand::SetImage(image) => ("image", image.to_string()),
        SessionCommand::PlayTouchFeedback(sector) => ("feedback", sector.to_string()),
        SessionCommand::ArmLongPress { token, delay_ms } => {
            ("arm", format!("{}:{delay_ms}", token.raw()))
        }
        SessionCommand::CancelLongPress { token } => ("cancel", token.raw().to_string()),
    };
    ReplayLine { ms, label, detail }
}

fn outcome_line(ms: u64, outcome: RoundOutcome) -> ReplayLine {
    let (label, detail) = match outcome {
        RoundOutcome::Advanced { level } => ("advanced", level.to_string()),
        RoundOutcome::Won => ("won", String::new()),
        RoundOutcome::Lost {
            level,
            expected,
            touched,
        } => {
            let expected = expected.map_or_else(|| "-".to_string(), |digit| digit.to_string());
            ("lost", format!("{level}:{expected}:{touched}"))
        }
    };
    ReplayLine { ms, label, detail }
}

fn io_error(path: &Path, source: io::Error) -> ReplayError {
    ReplayError::Io {
        path: path.to_path_buf(),
        source,
    }
}
