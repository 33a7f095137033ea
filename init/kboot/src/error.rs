// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use core::fmt;

use crate::level::InitLevel;

/// Everything that can go wrong on the boot path itself.
///
/// Hooks have no error channel; only contract violations of the sequencer
/// and failures of the boot path's own steps are reported here. All of them
/// are fatal once they reach the top of the boot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// A level range with `lo > hi`.
    InvertedRange { lo: InitLevel, hi: InitLevel },
    /// A range that does not start right after the previous one.
    OutOfOrder {
        expected: InitLevel,
        found: InitLevel,
    },
    /// A range requested after `LAST` has already been run.
    SequenceFinished { found: InitLevel },
    /// The scheduler could not allocate a thread.
    ThreadCreate { name: &'static str },
    /// The boot arguments were captured before.
    ArgsAlreadyCaptured,
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::InvertedRange { lo, hi } => {
                write!(f, "inverted init level range [{lo}, {hi}]")
            }
            BootError::OutOfOrder { expected, found } => write!(
                f,
                "init level range starts at {found}, expected {expected}"
            ),
            BootError::SequenceFinished { found } => write!(
                f,
                "init level range starting at {found} requested after LAST"
            ),
            BootError::ThreadCreate { name } => write!(f, "failed to create thread `{name}`"),
            BootError::ArgsAlreadyCaptured => write!(f, "boot arguments already captured"),
        }
    }
}

impl core::error::Error for BootError {}
