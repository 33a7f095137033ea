// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Architecture, platform and target bring-up hooks.

use kplat_macros::device_interface;

#[device_interface]
pub trait BootHandler {
    /// Early architecture setup, before any driver or heap exists.
    fn arch_early_init();

    /// Early platform setup (console, interrupt controller discovery).
    fn platform_early_init();

    /// Early board setup.
    fn target_early_init();

    /// Late architecture setup, run in the bootstrap thread.
    fn arch_init();

    /// Late platform setup, run in the bootstrap thread.
    fn platform_init();

    /// Late board setup, run in the bootstrap thread.
    fn target_init();
}
