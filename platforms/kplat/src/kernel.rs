// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Kernel core, heap and application start-up hooks.

use kplat_macros::device_interface;

#[device_interface]
pub trait KernelHandler {
    /// Puts the boot path into a minimal thread context.
    fn init_early();

    /// Brings up the heap. Dynamic allocation is allowed once it returns.
    fn heap_init();

    /// Sets up the core kernel data structures.
    fn init();

    /// Starts every configured application.
    fn apps_init();
}
