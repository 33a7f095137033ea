// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! The level sequencer.
//!
//! The sequencer runs the hooks of one level range at a time and remembers
//! where it stopped. Ranges must tile the axis: the first one starts at
//! [`InitLevel::EARLIEST`], each later one starts right after the previous
//! end, and the last one ends at [`InitLevel::LAST`]. That makes "no level is
//! entered twice" and "no level is skipped" properties of the sequencer
//! rather than of its callers.
//!
//! There is exactly one sequencer per boot. It is created on the boot stack
//! and moved into the bootstrap thread, so it is never driven from two
//! places at once.

use crate::{
    error::BootError,
    level::{InitLevel, LevelRange},
    registry::Registry,
};

/// Runs registered hooks over adjoining level ranges.
pub struct LevelSequencer<'a> {
    registry: Registry<'a>,
    /// First level of the next range; `None` once `LAST` has run.
    next: Option<InitLevel>,
    hooks_run: usize,
    ranges_run: usize,
}

impl<'a> LevelSequencer<'a> {
    pub const fn new(registry: Registry<'a>) -> Self {
        Self {
            registry,
            next: Some(InitLevel::EARLIEST),
            hooks_run: 0,
            ranges_run: 0,
        }
    }

    pub const fn registry(&self) -> Registry<'a> {
        self.registry
    }

    /// The level the next range must start at, `None` when complete.
    pub const fn next_level(&self) -> Option<InitLevel> {
        self.next
    }

    /// Whether the whole axis has been run.
    pub const fn is_complete(&self) -> bool {
        self.next.is_none()
    }

    /// Hooks invoked so far.
    pub const fn hooks_run(&self) -> usize {
        self.hooks_run
    }

    /// Ranges run so far.
    pub const fn ranges_run(&self) -> usize {
        self.ranges_run
    }

    /// Runs every hook in `[lo, hi]`, in order, exactly once.
    ///
    /// Returns the number of hooks invoked. The range is checked before any
    /// hook runs; on error nothing is invoked and the position is unchanged.
    pub fn try_run(&mut self, lo: InitLevel, hi: InitLevel) -> Result<usize, BootError> {
        let range = LevelRange::new(lo, hi)?;
        let expected = self
            .next
            .ok_or(BootError::SequenceFinished { found: lo })?;
        if lo != expected {
            return Err(BootError::OutOfOrder { expected, found: lo });
        }

        debug!("init levels {range}");
        let mut count = 0;
        for hook in self.registry.hooks_in(range) {
            trace!("calling hook `{}` at level {}", hook.name(), hook.level());
            hook.call();
            count += 1;
        }

        self.next = hi.next();
        self.hooks_run += count;
        self.ranges_run += 1;
        Ok(count)
    }

    /// Runs every hook in `[lo, hi]`.
    ///
    /// # Panics
    /// On any range that does not continue the sequence; see
    /// [`try_run`](Self::try_run).
    pub fn run(&mut self, lo: InitLevel, hi: InitLevel) -> usize {
        match self.try_run(lo, hi) {
            Ok(count) => count,
            Err(err) => panic!("level sequencer: {err}"),
        }
    }

    /// Runs every remaining level strictly below `level`.
    ///
    /// # Panics
    /// If `level` is not above the next level to run, or the sequence is
    /// already complete.
    pub fn advance_to(&mut self, level: InitLevel) -> usize {
        let lo = match self.next {
            Some(lo) => lo,
            None => panic!("level sequencer: advance to {level} after LAST"),
        };
        match level.prev() {
            Some(hi) => self.run(lo, hi),
            None => panic!("level sequencer: cannot advance below {level}"),
        }
    }

    /// Runs every remaining level up to and including `LAST`.
    ///
    /// # Panics
    /// If the sequence is already complete.
    pub fn finish(&mut self) -> usize {
        match self.next {
            Some(lo) => self.run(lo, InitLevel::LAST),
            None => panic!("level sequencer: already complete"),
        }
    }
}
