// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! The bootstrap thread coordinator.
//!
//! Levels from [`InitLevel::THREADING`](crate::InitLevel::THREADING) on may
//! block, sleep or be preempted, which the boot stack cannot do. The boot
//! path therefore hands the rest of initialization to a dedicated kernel
//! thread, `bootstrap2`, and never looks at it again.

use alloc::boxed::Box;

pub use kplat::sched::ThreadEntry;

use crate::{config::BootConfig, error::BootError};

/// Name of the thread that finishes boot.
pub const BOOT_THREAD_NAME: &str = "bootstrap2";

/// The thread interface of the scheduler.
pub trait ThreadApi {
    /// Handle of a thread that has not been handed to the scheduler yet.
    type Thread;

    /// Creates a suspended thread. `None` if it cannot be allocated.
    fn create_thread(
        &self,
        name: &'static str,
        entry: ThreadEntry,
        priority: i32,
        stack_size: usize,
    ) -> Option<Self::Thread>;

    /// Forbids the thread from migrating away from `cpu`.
    fn set_pinned_cpu(&self, thread: &mut Self::Thread, cpu: usize);

    /// Marks the thread as never joined.
    fn detach(&self, thread: &mut Self::Thread);

    /// Makes the thread runnable; the scheduler owns it from now on.
    fn resume(&self, thread: Self::Thread);

    /// Turns the caller into the idle thread and enables interrupts.
    fn become_idle(&self) -> !;
}

/// Everything needed to start the bootstrap thread.
pub struct BootThreadDesc {
    pub name: &'static str,
    pub entry: ThreadEntry,
    pub priority: i32,
    pub stack_size: usize,
    pub pinned_cpu: usize,
}

impl BootThreadDesc {
    /// A `bootstrap2` descriptor with the configured priority, stack size
    /// and boot CPU.
    pub fn new<F>(config: &BootConfig, entry: F) -> Self
    where
        F: FnOnce() -> i32 + Send + 'static,
    {
        Self {
            name: BOOT_THREAD_NAME,
            entry: Box::new(entry),
            priority: config.priority,
            stack_size: config.stack_size,
            pinned_cpu: config.boot_cpu,
        }
    }
}

/// Creates, pins, detaches and resumes the thread described by `desc`.
///
/// The handle is consumed by `resume`, so the caller keeps no way to wait
/// for the thread. Fails only if the scheduler cannot allocate it.
pub fn spawn_detached<S: ThreadApi>(sched: &S, desc: BootThreadDesc) -> Result<(), BootError> {
    let BootThreadDesc {
        name,
        entry,
        priority,
        stack_size,
        pinned_cpu,
    } = desc;

    debug!("creating thread `{name}` (priority {priority}, stack {stack_size:#x})");
    let mut thread = sched
        .create_thread(name, entry, priority, stack_size)
        .ok_or(BootError::ThreadCreate { name })?;
    sched.set_pinned_cpu(&mut thread, pinned_cpu);
    sched.detach(&mut thread);
    sched.resume(thread);
    Ok(())
}
