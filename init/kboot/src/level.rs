// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! The initialization level axis.
//!
//! Boot walks a single, totally ordered axis of `u32` levels from
//! [`InitLevel::EARLIEST`] to [`InitLevel::LAST`]. A handful of points on it
//! are named after what the system guarantees once boot reaches them; hooks
//! may also sit between named points, e.g. `InitLevel::PLATFORM.before(1)`.

use core::fmt;

use crate::error::BootError;

/// A position on the initialization axis.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct InitLevel(u32);

impl InitLevel {
    pub const EARLIEST: Self = Self(0x1);
    pub const ARCH_EARLY: Self = Self(0x1_0000);
    pub const PLATFORM_EARLY: Self = Self(0x2_0000);
    pub const TARGET_EARLY: Self = Self(0x3_0000);
    /// The heap is usable.
    pub const HEAP: Self = Self(0x4_0000);
    /// Kernel address space is set up.
    pub const VM: Self = Self(0x5_0000);
    /// Core kernel data structures exist.
    pub const KERNEL: Self = Self(0x6_0000);
    /// Hooks run in a schedulable thread and may block.
    pub const THREADING: Self = Self(0x7_0000);
    pub const ARCH: Self = Self(0x8_0000);
    pub const PLATFORM: Self = Self(0x9_0000);
    pub const TARGET: Self = Self(0xa_0000);
    pub const APPS: Self = Self(0xb_0000);
    pub const LAST: Self = Self(u32::MAX);

    /// Every named level, in ascending order.
    pub const NAMED: [(InitLevel, &'static str); 13] = [
        (Self::EARLIEST, "EARLIEST"),
        (Self::ARCH_EARLY, "ARCH_EARLY"),
        (Self::PLATFORM_EARLY, "PLATFORM_EARLY"),
        (Self::TARGET_EARLY, "TARGET_EARLY"),
        (Self::HEAP, "HEAP"),
        (Self::VM, "VM"),
        (Self::KERNEL, "KERNEL"),
        (Self::THREADING, "THREADING"),
        (Self::ARCH, "ARCH"),
        (Self::PLATFORM, "PLATFORM"),
        (Self::TARGET, "TARGET"),
        (Self::APPS, "APPS"),
        (Self::LAST, "LAST"),
    ];

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The level `delta` steps above `self`.
    ///
    /// # Panics
    /// If the result would not fit on the axis.
    pub const fn offset(self, delta: u32) -> Self {
        match self.0.checked_add(delta) {
            Some(raw) => Self(raw),
            None => panic!("init level overflow"),
        }
    }

    /// The level `delta` steps below `self`.
    ///
    /// # Panics
    /// If the result would be negative.
    pub const fn before(self, delta: u32) -> Self {
        match self.0.checked_sub(delta) {
            Some(raw) => Self(raw),
            None => panic!("init level underflow"),
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    pub const fn prev(self) -> Option<Self> {
        match self.0.checked_sub(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// The name of this level if it is one of the named points.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(level, _)| *level == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for InitLevel {
    /// Renders the level relative to the closest named point, e.g. `HEAP`,
    /// `HEAP+0x3` or `PLATFORM-0x1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        let below = Self::NAMED.iter().rev().find(|(level, _)| *level < *self);
        let above = Self::NAMED.iter().find(|(level, _)| *level > *self);
        match (below, above) {
            (Some((lo, lo_name)), Some((hi, hi_name))) => {
                let up = self.0 - lo.0;
                let down = hi.0 - self.0;
                if down < up {
                    write!(f, "{hi_name}-{down:#x}")
                } else {
                    write!(f, "{lo_name}+{up:#x}")
                }
            }
            (None, Some((hi, hi_name))) => write!(f, "{hi_name}-{:#x}", hi.0 - self.0),
            (Some((lo, lo_name)), None) => write!(f, "{lo_name}+{:#x}", self.0 - lo.0),
            (None, None) => write!(f, "{:#x}", self.0),
        }
    }
}

impl fmt::Debug for InitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InitLevel({self} = {:#x})", self.0)
    }
}

/// A closed range `[lo, hi]` of levels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LevelRange {
    lo: InitLevel,
    hi: InitLevel,
}

impl LevelRange {
    /// The whole axis.
    pub const FULL: Self = Self {
        lo: InitLevel::EARLIEST,
        hi: InitLevel::LAST,
    };

    /// Builds `[lo, hi]`. Fails if `lo > hi`.
    pub fn new(lo: InitLevel, hi: InitLevel) -> Result<Self, BootError> {
        if lo > hi {
            return Err(BootError::InvertedRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub const fn lo(&self) -> InitLevel {
        self.lo
    }

    pub const fn hi(&self) -> InitLevel {
        self.hi
    }

    #[inline]
    pub fn contains(&self, level: InitLevel) -> bool {
        self.lo <= level && level <= self.hi
    }
}

impl fmt::Display for LevelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
