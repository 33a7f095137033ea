// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Staged boot-time initialization of x-kernel.
//!
//! Boot proceeds along a single, totally ordered axis of [`InitLevel`]s.
//! Subsystems attach work to a level with [`init_hook`]; the
//! [`LevelSequencer`] runs those hooks range by range while the boot path
//! calls the platform's bring-up steps in between. Once the kernel level is
//! reached the rest of boot moves into a schedulable thread and the boot
//! stack becomes the idle loop.
//!
//! ```ignore
//! use kboot::{InitLevel, init_hook};
//!
//! #[init_hook(level = InitLevel::PLATFORM)]
//! fn probe_uart() {
//!     // runs in `bootstrap2`, after `arch_init`, before `platform_init`
//! }
//! ```
//!
//! On bare-metal targets the crate also provides the kernel entry
//! (`__kplat_main`) and the panic handler; the heap crate linked into the
//! image must provide the global allocator.
#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;
extern crate alloc;
extern crate self as kboot;

pub mod args;
pub mod boot;
pub mod config;
pub mod error;
pub mod hook;
pub mod idle;
pub mod level;
pub mod platform;
pub mod registry;
pub mod sequencer;
pub mod thread;

#[cfg(target_os = "none")]
mod lang_items;

#[doc(hidden)]
pub use linkme;

pub use args::{BootArgs, boot_args};
pub use boot::{BootSequence, fatal};
pub use config::BootConfig;
pub use error::BootError;
pub use hook::{INIT_HOOKS, InitHook};
pub use kinit_setup::{Ctor, CtorTable, register_init};
pub use level::{InitLevel, LevelRange};
pub use macros::init_hook;
pub use platform::BootPlatform;
pub use registry::Registry;
pub use sequencer::LevelSequencer;
pub use thread::{BootThreadDesc, ThreadApi, ThreadEntry};
