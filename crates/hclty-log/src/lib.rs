//! Diagnostic output for the `hclty` type algebra.
//!
//! The algebra is pure and silent by default. Unification and conversion
//! checks can report the branch they took through [`trace!`] and [`debug!`],
//! which a host (an editor plugin, a language server, a test harness) turns on
//! with [`set_level`] or the `HCLTY_LOG` environment variable.
//!
//! Each record is one stderr line:
//!
//! ```text
//! hclty DEBUG check::convert | list(string) is not convertible to number
//! ```
//!
//! The crate name is stripped from the module path so records stay short.
//! Level names are coloured only when stderr is a terminal.
//!
//! # Example
//!
//! ```
//! use hclty_log::{debug, trace, Level};
//!
//! hclty_log::set_level(Level::Debug);
//!
//! debug!("candidate types: {:?}", ["string", "number"]);
//! trace!("suppressed at debug level");
//! ```

use std::fmt;
use std::io::{IsTerminal, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable read by [`init_from_env`].
pub const ENV_VAR: &str = "HCLTY_LOG";

/// Severity of a record, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warn = 1,
    /// Default threshold; the algebra never logs at this level or above.
    Info = 2,
    /// Failed conversions and unifications surfaced as errors
    Debug = 3,
    /// Branch decisions inside unification
    Trace = 4,
}

impl Level {
    const ALL: [Level; 5] = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    /// Upper-case name used in rendered records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    const fn ansi(self) -> &'static str {
        match self {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;34",
            Level::Debug => "2;36",
            Level::Trace => "2;37",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
    input: String,
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown log level `{}` (expected error, warn, info, debug or trace)",
            self.input
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Case-insensitive, surrounding whitespace ignored.
    ///
    /// ```
    /// use hclty_log::Level;
    ///
    /// assert_eq!("trace".parse(), Ok(Level::Trace));
    /// assert_eq!(" Warn ".parse(), Ok(Level::Warn));
    /// assert!("verbose".parse::<Level>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseLevelError {
                input: name.to_string(),
            })
    }
}

static MAX_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Least severe level that is currently emitted.
pub fn max_level() -> Level {
    let raw = MAX_LEVEL.load(Ordering::Relaxed);
    Level::ALL
        .get(usize::from(raw))
        .copied()
        .unwrap_or(Level::Trace)
}

/// Sets the least severe level that is still emitted.
pub fn set_level(level: Level) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Sets the level from its name.
///
/// ```
/// hclty_log::set_level_from_str("debug").unwrap();
/// assert!(hclty_log::set_level_from_str("loud").is_err());
/// ```
pub fn set_level_from_str(s: &str) -> Result<(), ParseLevelError> {
    set_level(s.parse()?);
    Ok(())
}

/// Whether a record at `level` would be written.
#[inline]
pub fn enabled(level: Level) -> bool {
    level <= max_level()
}

/// Interprets the raw value of [`ENV_VAR`]; unset or blank keeps the level.
fn parse_env_level(raw: Option<&str>) -> Result<Option<Level>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|err| format!("{ENV_VAR}: {err}")),
    }
}

/// Configures the level from the `HCLTY_LOG` environment variable.
///
/// Returns the level that was applied, or `None` when the variable is unset
/// or blank.
pub fn init_from_env() -> Result<Option<Level>, String> {
    let raw = std::env::var(ENV_VAR).ok();
    let level = parse_env_level(raw.as_deref())?;
    if let Some(level) = level {
        set_level(level);
    }
    Ok(level)
}

/// A single diagnostic, borrowed from the call site.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: Level,
    /// Module path of the call site.
    pub target: &'a str,
    pub args: fmt::Arguments<'a>,
}

impl Record<'_> {
    /// Module path relative to the crate root; the root itself stays as is.
    fn short_target(&self) -> &str {
        match self.target.split_once("::") {
            Some((_, rest)) => rest,
            None => self.target,
        }
    }

    fn render(&self, out: &mut impl fmt::Write, color: bool) -> fmt::Result {
        if color {
            write!(out, "hclty \x1b[{}m{:<5}\x1b[0m", self.level.ansi(), self.level)?;
        } else {
            write!(out, "hclty {:<5}", self.level)?;
        }
        write!(out, " {} | {}", self.short_target(), self.args)
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

#[doc(hidden)]
pub fn __emit(record: Record<'_>) {
    let stderr = std::io::stderr();
    let color = stderr.is_terminal();
    let mut line = String::new();
    if record.render(&mut line, color).is_err() {
        return;
    }
    // Write errors on stderr are dropped.
    let _ = writeln!(stderr.lock(), "{line}");
}

/// Writes a record at `level` if it passes the current threshold.
///
/// Formatting arguments are not evaluated when the record is filtered out.
///
/// ```
/// use hclty_log::{log, Level};
///
/// log!(Level::Warn, "object field {} shadowed", "tags");
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {{
        let level: $crate::Level = $level;
        if $crate::enabled(level) {
            $crate::__emit($crate::Record {
                level,
                target: module_path!(),
                args: format_args!($($arg)+),
            });
        }
    }};
}

/// Writes a [`Level::Debug`] record.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, $($arg)+)
    };
}

/// Writes a [`Level::Trace`] record.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Trace, $($arg)+)
    };
}
