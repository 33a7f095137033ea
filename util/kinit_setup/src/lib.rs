// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Static constructors, run once the heap is up.
//!
//! Constructors are zero-argument functions registered with
//! [`register_init`]. They may allocate, so the boot path calls them only
//! after the heap initializer has returned and before any kernel subsystem
//! starts.
#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

pub use macros::register_init;

/// A static constructor.
pub type Ctor = extern "C" fn();

/// An ordered table of static constructors.
#[derive(Clone, Copy)]
pub struct CtorTable<'a> {
    ctors: &'a [Ctor],
}

impl<'a> CtorTable<'a> {
    /// Wraps an explicit constructor table.
    pub const fn new(ctors: &'a [Ctor]) -> Self {
        Self { ctors }
    }

    /// A table without constructors.
    pub const fn empty() -> CtorTable<'static> {
        CtorTable { ctors: &[] }
    }

    /// Number of constructors in the table.
    pub const fn len(&self) -> usize {
        self.ctors.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.ctors.is_empty()
    }

    /// Invokes every constructor exactly once, in table order.
    ///
    /// Returns the number of constructors called.
    pub fn call_all(&self) -> usize {
        for (idx, ctor) in self.ctors.iter().enumerate() {
            trace!("calling constructor #{idx} at {:p}", *ctor as *const ());
            ctor();
        }
        self.ctors.len()
    }
}

#[cfg(target_os = "none")]
mod linked {
    use super::{Ctor, CtorTable};

    /// Placeholder for the `.init_array` section, so that
    /// the `__init_array_start` and `__init_array_end` symbols can be generated.
    #[unsafe(link_section = ".init_array")]
    #[used]
    static _SECTION_PLACE_HOLDER: [u8; 0] = [];

    unsafe extern "C" {
        static __init_array_start: Ctor;
        static __init_array_end: Ctor;
    }

    /// The constructor table collected by the linker in `.init_array`.
    ///
    /// # Notes
    /// The linker script must keep `.init_array` contiguous and bracket it
    /// with `__init_array_start` and `__init_array_end`.
    pub fn linked() -> CtorTable<'static> {
        // SAFETY: the linker script defines both symbols around a contiguous
        // array of constructor pointers.
        unsafe {
            let start = &raw const __init_array_start;
            let end = &raw const __init_array_end;
            let len = end.offset_from(start) as usize;
            CtorTable::new(core::slice::from_raw_parts(start, len))
        }
    }
}

#[cfg(target_os = "none")]
pub use linked::linked;
