//! User-facing status lines.
//!
//! Diagnostics go through `tracing`; these helpers print what the user asked
//! for. Each line has a [`Status`] that decides its prefix, colour, stream and
//! whether the current mode shows it.

use console::{Emoji, style};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// 0 = normal, 1+ = verbose.
static VERBOSITY: AtomicU8 = AtomicU8::new(0);

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
    Error,
    Info,
    /// Extra detail, verbose mode only.
    Detail,
}

impl Status {
    fn prefix(self) -> Option<Emoji<'static, 'static>> {
        match self {
            Status::Success => Some(Emoji("✅ ", "OK ")),
            Status::Warning => Some(Emoji("⚠️  ", "!! ")),
            Status::Error => Some(Emoji("❌ ", "ERR ")),
            Status::Info => Some(Emoji("ℹ️  ", "i ")),
            Status::Detail => None,
        }
    }

    /// Warnings and errors go to stderr so stdout stays clean for piping.
    fn to_stderr(self) -> bool {
        matches!(self, Status::Warning | Status::Error)
    }

    /// Whether a line of this status is printed under the given mode.
    pub fn visible(self, quiet: bool, verbose: bool) -> bool {
        match self {
            Status::Error => true,
            Status::Detail => verbose && !quiet,
            _ => !quiet,
        }
    }

    fn render(self, msg: &str) -> String {
        let styled = match self {
            Status::Success => style(msg).green(),
            Status::Warning => style(msg).yellow(),
            Status::Error => style(msg).red().bold(),
            Status::Info => style(msg).cyan(),
            Status::Detail => style(msg).dim(),
        };
        match self.prefix() {
            Some(prefix) => format!("{prefix} {styled}"),
            None => styled.to_string(),
        }
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::SeqCst);
}

pub fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::SeqCst)
}

pub fn set_verbosity(level: u8) {
    VERBOSITY.store(level, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSITY.load(Ordering::SeqCst) >= 1
}

/// Print `msg` if the current mode shows `status`.
pub fn emit(status: Status, msg: &str) {
    if !status.visible(is_quiet(), is_verbose()) {
        return;
    }
    let line = status.render(msg);
    if status.to_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn success(msg: &str) {
    emit(Status::Success, msg);
}

pub fn warning(msg: &str) {
    emit(Status::Warning, msg);
}

/// Never suppressed.
pub fn error(msg: &str) {
    emit(Status::Error, msg);
}

pub fn info(msg: &str) {
    emit(Status::Info, msg);
}

pub fn verbose(msg: &str) {
    emit(Status::Detail, msg);
}
