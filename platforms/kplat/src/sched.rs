// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Thread and scheduler hooks used to leave the boot stack.

use alloc::boxed::Box;

use kplat_macros::device_interface;

/// Entry of a kernel thread. The return value is the thread's exit code.
pub type ThreadEntry = Box<dyn FnOnce() -> i32 + Send + 'static>;

/// Opaque handle of a thread owned by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawThread(pub usize);

#[device_interface]
pub trait SchedHandler {
    /// Creates a suspended thread. `None` if it cannot be allocated.
    fn create_thread(
        name: &'static str,
        entry: ThreadEntry,
        priority: i32,
        stack_size: usize,
    ) -> Option<RawThread>;

    /// Forbids the thread from running anywhere but `cpu`.
    fn set_pinned_cpu(thread: RawThread, cpu: usize);

    /// Nobody will join the thread; it is reaped on exit.
    fn detach(thread: RawThread);

    /// Makes the thread runnable.
    fn resume(thread: RawThread);

    /// Turns the caller into this CPU's idle thread and enables interrupts.
    fn become_idle() -> !;
}
