// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! The initialization-level registry.
//!
//! A [`Registry`] is a read-only view over a table of hooks. Asking it for a
//! level range yields the hooks inside the range ordered by level, then by
//! their position in the table. Nothing here allocates: the first ranges are
//! walked long before the heap exists.

use core::slice;

use crate::{
    error::BootError,
    hook::{INIT_HOOKS, InitHook},
    level::{InitLevel, LevelRange},
};

/// A read-only, ordered view over registered hooks.
#[derive(Clone, Copy, Debug)]
pub struct Registry<'a> {
    hooks: &'a [InitHook],
}

impl<'a> Registry<'a> {
    /// A registry over an explicit table. Table order is registration order.
    pub const fn new(hooks: &'a [InitHook]) -> Self {
        Self { hooks }
    }

    /// A registry without any hook.
    pub const fn empty() -> Registry<'static> {
        Registry { hooks: &[] }
    }

    /// The registry of every hook declared with [`init_hook`](crate::init_hook).
    pub fn linked() -> Registry<'static> {
        let hooks: &'static [InitHook] = &INIT_HOOKS;
        Registry::new(hooks)
    }

    pub const fn len(&self) -> usize {
        self.hooks.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// All hooks, in registration order.
    pub fn iter(&self) -> slice::Iter<'a, InitHook> {
        self.hooks.iter()
    }

    /// The hooks whose level lies in `range`, in execution order.
    pub fn hooks_in(&self, range: LevelRange) -> HooksInRange<'a> {
        HooksInRange {
            hooks: self.hooks,
            range,
            last: None,
        }
    }

    /// Same as [`hooks_in`](Self::hooks_in) over `[lo, hi]`.
    pub fn hooks_between(
        &self,
        lo: InitLevel,
        hi: InitLevel,
    ) -> Result<HooksInRange<'a>, BootError> {
        Ok(self.hooks_in(LevelRange::new(lo, hi)?))
    }
}

/// Iterator over the hooks of one level range, see [`Registry::hooks_in`].
///
/// Each step scans the table for the smallest `(level, index)` pair after
/// the one produced last.
pub struct HooksInRange<'a> {
    hooks: &'a [InitHook],
    range: LevelRange,
    last: Option<(InitLevel, usize)>,
}

impl<'a> Iterator for HooksInRange<'a> {
    type Item = &'a InitHook;

    fn next(&mut self) -> Option<&'a InitHook> {
        let mut best: Option<(InitLevel, usize)> = None;
        for (idx, hook) in self.hooks.iter().enumerate() {
            let key = (hook.level(), idx);
            if !self.range.contains(key.0) {
                continue;
            }
            if self.last.is_some_and(|last| key <= last) {
                continue;
            }
            if best.is_none_or(|b| key < b) {
                best = Some(key);
            }
        }
        let (level, idx) = best?;
        self.last = Some((level, idx));
        Some(&self.hooks[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::{
        hook::InitHook,
        level::{InitLevel, LevelRange},
    };

    fn nop() {}

    const L3: InitLevel = InitLevel::new(3);
    const L5: InitLevel = InitLevel::new(5);

    static TABLE: [InitHook; 5] = [
        InitHook::new("h3", L5, nop),
        InitHook::new("h1", L3, nop),
        InitHook::new("outside", InitLevel::new(9), nop),
        InitHook::new("h2", L3, nop),
        InitHook::new("h0", InitLevel::new(1), nop),
    ];

    fn names(registry: Registry<'_>, lo: InitLevel, hi: InitLevel) -> Vec<&'static str> {
        registry
            .hooks_between(lo, hi)
            .unwrap()
            .map(|h| h.name())
            .collect()
    }

    #[test]
    fn orders_by_level_then_registration() {
        let registry = Registry::new(&TABLE);
        assert_eq!(names(registry, L3, L5), ["h1", "h2", "h3"]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let registry = Registry::new(&TABLE);
        assert_eq!(names(registry, L5, L5), ["h3"]);
        assert_eq!(names(registry, InitLevel::new(1), L3), ["h0", "h1", "h2"]);
        assert!(names(registry, InitLevel::new(6), InitLevel::new(8)).is_empty());
    }

    #[test]
    fn full_range_visits_every_hook_once() {
        let registry = Registry::new(&TABLE);
        let all: Vec<_> = registry.hooks_in(LevelRange::FULL).map(|h| h.name()).collect();
        assert_eq!(all, ["h0", "h1", "h2", "h3", "outside"]);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn same_query_same_order() {
        let registry = Registry::new(&TABLE);
        let a: Vec<_> = registry.hooks_in(LevelRange::FULL).map(|h| h.name()).collect();
        let b: Vec<_> = registry.hooks_in(LevelRange::FULL).map(|h| h.name()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn inverted_query_is_an_error() {
        let registry = Registry::new(&TABLE);
        assert!(registry.hooks_between(L5, L3).is_err());
    }

    #[test]
    fn empty_registry_yields_nothing() {
        let registry = Registry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.hooks_in(LevelRange::FULL).count(), 0);
    }
}
