// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Boot configuration.
//!
//! Defaults are compile-time constants. A kernel build can override them
//! through environment variables read at build time:
//!
//! | Variable           | Field        | Default |
//! |--------------------|--------------|---------|
//! | `KBOOT_LOG`        | `log_level`  | `warn`  |
//! | `KBOOT_PRIORITY`   | `priority`   | `16`    |
//! | `KBOOT_STACK_SIZE` | `stack_size` | `8192`  |

/// Number of scheduler priorities.
pub const NUM_PRIORITIES: i32 = 32;
/// Priority of the bootstrap thread, the middle of the range.
pub const DEFAULT_PRIORITY: i32 = NUM_PRIORITIES / 2;
/// Stack size of the bootstrap thread.
pub const DEFAULT_STACK_SIZE: usize = 8192;
/// The CPU that runs the boot path.
pub const BOOT_CPU: usize = 0;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Parameters of one boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootConfig {
    /// Priority of the bootstrap thread.
    pub priority: i32,
    /// Stack size of the bootstrap thread, in bytes.
    pub stack_size: usize,
    /// CPU the bootstrap thread is pinned to.
    pub boot_cpu: usize,
    /// Initial log level, see `klogger::parse_level`.
    pub log_level: &'static str,
}

impl BootConfig {
    /// The defaults, overridden by any `KBOOT_*` variable set at build time.
    ///
    /// Overrides that do not parse are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(level) = option_env!("KBOOT_LOG") {
            config.log_level = level;
        }
        if let Some(raw) = option_env!("KBOOT_PRIORITY") {
            match raw.parse() {
                Ok(prio) if (0..NUM_PRIORITIES).contains(&prio) => config.priority = prio,
                _ => warn!("ignoring KBOOT_PRIORITY={raw}"),
            }
        }
        if let Some(raw) = option_env!("KBOOT_STACK_SIZE") {
            match raw.parse() {
                Ok(size) if size > 0 => config.stack_size = size,
                _ => warn!("ignoring KBOOT_STACK_SIZE={raw}"),
            }
        }
        config
    }
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            priority: DEFAULT_PRIORITY,
            stack_size: DEFAULT_STACK_SIZE,
            boot_cpu: BOOT_CPU,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}
