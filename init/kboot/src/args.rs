// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Boot arguments handed over by the loader.

use core::fmt;

use spin::Once;

use crate::error::BootError;

/// Number of words the loader passes to the kernel entry.
pub const BOOT_ARG_COUNT: usize = 4;

/// The raw words the loader passed to the kernel entry, unvalidated.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct BootArgs([usize; BOOT_ARG_COUNT]);

impl BootArgs {
    pub const fn new(arg0: usize, arg1: usize, arg2: usize, arg3: usize) -> Self {
        Self([arg0, arg1, arg2, arg3])
    }

    /// The `idx`-th word, if `idx < 4`.
    pub fn get(&self, idx: usize) -> Option<usize> {
        self.0.get(idx).copied()
    }

    pub const fn as_array(&self) -> &[usize; BOOT_ARG_COUNT] {
        &self.0
    }
}

impl From<[usize; BOOT_ARG_COUNT]> for BootArgs {
    fn from(words: [usize; BOOT_ARG_COUNT]) -> Self {
        Self(words)
    }
}

impl fmt::Display for BootArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a0, a1, a2, a3] = self.0;
        write!(f, "{a0:#x} {a1:#x} {a2:#x} {a3:#x}")
    }
}

static BOOT_ARGS: Once<BootArgs> = Once::new();

/// Records the loader's arguments for the rest of the kernel's lifetime.
///
/// Called once, first thing on the boot CPU. A second call leaves the
/// stored words untouched and fails with [`BootError::ArgsAlreadyCaptured`].
pub fn capture(
    arg0: usize,
    arg1: usize,
    arg2: usize,
    arg3: usize,
) -> Result<&'static BootArgs, BootError> {
    let mut fresh = false;
    let args = BOOT_ARGS.call_once(|| {
        fresh = true;
        BootArgs::new(arg0, arg1, arg2, arg3)
    });
    if fresh {
        Ok(args)
    } else {
        Err(BootError::ArgsAlreadyCaptured)
    }
}

/// The captured boot arguments, `None` before [`capture`].
pub fn boot_args() -> Option<&'static BootArgs> {
    BOOT_ARGS.get()
}
