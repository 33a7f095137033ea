// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Link-time interfaces between the boot path and the rest of the kernel.
//!
//! Every trait here is declared with [`device_interface`] and implemented
//! exactly once per kernel image, usually by the platform crate, with
//! [`impl_dev_interface`]. The free functions generated next to each trait
//! dispatch to that implementation.
#![no_std]

extern crate alloc;

pub mod boot;
pub mod kernel;
pub mod sched;
pub mod sys;

pub use crate_interface::impl_interface as impl_dev_interface;
pub use kplat_macros::{device_interface, main};

#[doc(hidden)]
pub mod __priv {
    pub use crate_interface::{call_interface as dispatch, def_interface as interface_def};
}
