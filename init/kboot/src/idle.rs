// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use crate::thread::ThreadApi;

/// Turns the boot path into this CPU's idle loop.
///
/// Enabling interrupts here is what lets the scheduler start dispatching,
/// the bootstrap thread first among others. Nothing after this call runs on
/// the boot stack again.
pub fn enter_idle<S: ThreadApi>(sched: &S) -> ! {
    info!("boot stack becomes idle, enabling interrupts");
    sched.become_idle()
}
