// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Hook entries and their link-time table.

use core::fmt;

use linkme::distributed_slice;

use crate::level::InitLevel;

/// A unit of boot work bound to one initialization level.
///
/// Hooks take nothing and return nothing. A hook that hits an unrecoverable
/// condition must halt the system itself; the sequencer never looks at the
/// outcome.
pub struct InitHook {
    name: &'static str,
    level: InitLevel,
    func: fn(),
}

impl InitHook {
    pub const fn new(name: &'static str, level: InitLevel, func: fn()) -> Self {
        Self { name, level, func }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn level(&self) -> InitLevel {
        self.level
    }

    #[inline]
    pub(crate) fn call(&self) {
        (self.func)()
    }
}

impl fmt::Debug for InitHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitHook")
            .field("name", &self.name)
            .field("level", &self.level)
            .finish()
    }
}

/// Hooks registered with [`init_hook`](crate::init_hook) across every crate
/// linked into the image.
///
/// Entries from different crates appear in link order; the registry only
/// relies on that order between hooks of the same level.
#[distributed_slice]
pub static INIT_HOOKS: [InitHook];
