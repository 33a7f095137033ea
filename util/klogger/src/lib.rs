// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Kernel logger used from the first instruction of the boot path.
//!
//! The logger never allocates, so it can be installed before the heap
//! exists. On bare metal every byte goes through [`LoggerAdapter`], which the
//! platform implements; with the `std` feature (and in tests) output goes to
//! the host's stdout.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate log;

use core::fmt::{self, Write};

#[cfg(not(any(test, feature = "std")))]
use crate_interface::call_interface;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
pub use log::{debug, error, info, trace, warn};

/// Prints to the kernel console, without a trailing newline.
#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => {
        let _ = $crate::print_fmt(format_args!($($arg)*));
    }
}

/// Prints to the kernel console, with a trailing newline.
#[macro_export]
macro_rules! kprintln {
    () => { $crate::kprint!("\n") };
    ($($arg:tt)*) => {
        let _ = $crate::print_fmt(format_args!("{}\n", format_args!($($arg)*)));
    }
}

/// Wraps text in an ANSI SGR color sequence.
macro_rules! paint {
    ($sgr:expr, $($arg:tt)*) => {
        format_args!("\u{1B}[{}m{}\u{1B}[m", $sgr, format_args!($($arg)*))
    };
}

const SGR_FRAME: u8 = 37;

const fn level_sgr(level: Level) -> u8 {
    match level {
        Level::Error => 31,
        Level::Warn => 33,
        Level::Info => 32,
        Level::Debug => 36,
        Level::Trace => 90,
    }
}

/// Hooks the platform provides to the logger.
#[crate_interface::def_interface]
pub trait LoggerAdapter {
    /// Writes raw text to the console.
    fn write_str(s: &str);
    /// Time since boot.
    fn now() -> core::time::Duration;
    /// The current CPU, once per-CPU data is set up.
    fn cpu_id() -> Option<usize>;
    /// The name of the running thread, once threading exists.
    fn thread_name() -> Option<&'static str>;
}

/// Where a record was emitted from: ` cpu:thread`, ` cpu` or nothing.
///
/// Early in boot neither per-CPU data nor threads exist.
#[cfg_attr(any(test, feature = "std"), allow(dead_code))]
struct Origin {
    cpu: Option<usize>,
    thread: Option<&'static str>,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.cpu, self.thread) {
            (Some(cpu), Some(thread)) => write!(f, " {cpu}:{thread}"),
            (Some(cpu), None) => write!(f, " {cpu}"),
            (None, _) => Ok(()),
        }
    }
}

struct KernelLogger;

impl Write for KernelLogger {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        #[cfg(any(test, feature = "std"))]
        std::print!("{s}");
        #[cfg(not(any(test, feature = "std")))]
        call_interface!(LoggerAdapter::write_str, s);
        Ok(())
    }
}

impl Log for KernelLogger {
    #[inline]
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let target = record.target();
        let line = record.line().unwrap_or(0);
        let sgr = level_sgr(level);

        cfg_if::cfg_if! {
            if #[cfg(any(test, feature = "std"))] {
                let stamp = chrono::Local::now().format("%H:%M:%S%.6f");
                let _ = print_fmt(paint!(
                    SGR_FRAME,
                    "[{stamp} {level:<5} {target}:{line}] {}\n",
                    paint!(sgr, "{}", record.args()),
                ));
            } else {
                let uptime = call_interface!(LoggerAdapter::now);
                let origin = Origin {
                    cpu: call_interface!(LoggerAdapter::cpu_id),
                    thread: call_interface!(LoggerAdapter::thread_name),
                };
                let _ = print_fmt(paint!(
                    SGR_FRAME,
                    "[{:>3}.{:06}{origin} {target}:{line}] {}\n",
                    uptime.as_secs(),
                    uptime.subsec_micros(),
                    paint!(sgr, "{}", record.args()),
                ));
            }
        }
    }

    fn flush(&self) {}
}

/// Writes formatted text to the console, serialized against other writers.
pub fn print_fmt(args: fmt::Arguments) -> fmt::Result {
    static LOCK: spin::Mutex<()> = spin::Mutex::new(());

    let _guard = LOCK.lock();
    KernelLogger.write_fmt(args)
}

/// Parses a log level name.
///
/// Accepts the `log` crate names (`off`, `error`, `warn`, `info`, `debug`,
/// `trace`, any case) and the classic debug-print levels: `always` and
/// `critical` map to `error`, `spew` maps to `trace`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("always") || name.eq_ignore_ascii_case("critical") {
        return Some(LevelFilter::Error);
    }
    if name.eq_ignore_ascii_case("spew") {
        return Some(LevelFilter::Trace);
    }
    name.parse().ok()
}

/// Installs the kernel logger with the given maximum level.
///
/// Fails if another logger was installed first; the level is still applied.
pub fn init_klogger(level: LevelFilter) -> Result<(), SetLoggerError> {
    let res = log::set_logger(&KernelLogger);
    log::set_max_level(level);
    res
}

/// Changes the maximum log level by name, see [`parse_level`].
///
/// Unknown names leave the current level in place and return `false`.
pub fn set_log_level(level: &str) -> bool {
    match parse_level(level) {
        Some(lf) => {
            log::set_max_level(lf);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::{Origin, parse_level};

    #[test]
    fn origin_shows_what_is_known() {
        let full = Origin {
            cpu: Some(1),
            thread: Some("bootstrap2"),
        };
        let cpu_only = Origin {
            cpu: Some(0),
            thread: None,
        };
        let none = Origin {
            cpu: None,
            thread: Some("ignored"),
        };
        assert_eq!(full.to_string(), " 1:bootstrap2");
        assert_eq!(cpu_only.to_string(), " 0");
        assert_eq!(none.to_string(), "");
    }

    #[test]
    fn parses_log_crate_names() {
        assert_eq!(parse_level("warn"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("TRACE"), Some(LevelFilter::Trace));
        assert_eq!(parse_level(" info "), Some(LevelFilter::Info));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
    }

    #[test]
    fn parses_debug_print_names() {
        assert_eq!(parse_level("spew"), Some(LevelFilter::Trace));
        assert_eq!(parse_level("always"), Some(LevelFilter::Error));
        assert_eq!(parse_level("Critical"), Some(LevelFilter::Error));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(parse_level(""), None);
    }
}
