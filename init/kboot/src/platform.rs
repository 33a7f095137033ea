// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Collaborators called between level ranges.

/// The bring-up steps the boot path calls between level ranges.
///
/// Each method is called exactly once per boot, in declaration order. The
/// early ones run on the boot stack and must not block; from
/// [`arch_init`](Self::arch_init) on they run in the bootstrap thread.
/// A step that fails must halt the system itself.
///
/// The implementation is moved into the bootstrap thread halfway through,
/// hence `Send + 'static`.
pub trait BootPlatform: Send + 'static {
    /// Enter a minimal thread context on the boot stack.
    fn kernel_init_early(&mut self) {}
    fn arch_early_init(&mut self);
    fn platform_early_init(&mut self);
    fn target_early_init(&mut self);
    /// Dynamic allocation is safe once this returns.
    fn heap_init(&mut self);
    /// Core kernel data structures.
    fn kernel_init(&mut self);
    fn arch_init(&mut self);
    fn platform_init(&mut self);
    fn target_init(&mut self);
    /// Start every configured application.
    fn apps_init(&mut self);
}

#[cfg(target_os = "none")]
mod kplat_glue {
    use kplat::{
        boot, kernel,
        sched::{self, RawThread, ThreadEntry},
    };

    use super::BootPlatform;
    use crate::thread::ThreadApi;

    /// Bring-up steps implemented by the platform crate linked into the image.
    pub struct KplatPlatform;

    impl BootPlatform for KplatPlatform {
        fn kernel_init_early(&mut self) {
            kernel::init_early();
        }

        fn arch_early_init(&mut self) {
            boot::arch_early_init();
        }

        fn platform_early_init(&mut self) {
            boot::platform_early_init();
        }

        fn target_early_init(&mut self) {
            boot::target_early_init();
        }

        fn heap_init(&mut self) {
            kernel::heap_init();
        }

        fn kernel_init(&mut self) {
            kernel::init();
        }

        fn arch_init(&mut self) {
            boot::arch_init();
        }

        fn platform_init(&mut self) {
            boot::platform_init();
        }

        fn target_init(&mut self) {
            boot::target_init();
        }

        fn apps_init(&mut self) {
            kernel::apps_init();
        }
    }

    /// The scheduler linked into the image.
    pub struct KplatScheduler;

    impl ThreadApi for KplatScheduler {
        type Thread = RawThread;

        fn create_thread(
            &self,
            name: &'static str,
            entry: ThreadEntry,
            priority: i32,
            stack_size: usize,
        ) -> Option<RawThread> {
            sched::create_thread(name, entry, priority, stack_size)
        }

        fn set_pinned_cpu(&self, thread: &mut RawThread, cpu: usize) {
            sched::set_pinned_cpu(*thread, cpu);
        }

        fn detach(&self, thread: &mut RawThread) {
            sched::detach(*thread);
        }

        fn resume(&self, thread: RawThread) {
            sched::resume(thread);
        }

        fn become_idle(&self) -> ! {
            sched::become_idle()
        }
    }
}

#[cfg(target_os = "none")]
pub use kplat_glue::{KplatPlatform, KplatScheduler};
