// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Mocks shared by the boot integration tests.
//!
//! Every mock writes into a thread-local trace, so tests running in parallel
//! do not see each other's events. The mock scheduler runs resumed threads
//! on the calling thread when the boot path becomes idle, then unwinds with
//! [`IdleReached`] in place of the real idle loop.

#![allow(dead_code, unused_macros)]

use std::{
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe},
};

use kboot::{BootPlatform, BootSequence, ThreadApi, ThreadEntry};

thread_local! {
    static TRACE: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Appends an event to this thread's trace.
pub fn record(event: impl Into<String>) {
    TRACE.with(|t| t.borrow_mut().push(event.into()));
}

/// Takes and clears this thread's trace.
pub fn take_trace() -> Vec<String> {
    TRACE.with(|t| t.take())
}

/// Position of `event` in `trace`.
pub fn position(trace: &[String], event: &str) -> usize {
    trace
        .iter()
        .position(|e| e == event)
        .unwrap_or_else(|| panic!("`{event}` missing from trace {trace:?}"))
}

pub fn init_logger() {
    let _ = klogger::init_klogger(log::LevelFilter::Trace);
}

/// Declares `fn $name()` that records `hook:$name`.
macro_rules! recording_hook {
    ($($name:ident),+ $(,)?) => {
        $(
            fn $name() {
                $crate::common::record(concat!("hook:", stringify!($name)));
            }
        )+
    };
}

/// Declares `extern "C" fn $name()` that records `ctor:$name`.
macro_rules! recording_ctor {
    ($($name:ident),+ $(,)?) => {
        $(
            extern "C" fn $name() {
                $crate::common::record(concat!("ctor:", stringify!($name)));
            }
        )+
    };
}

/// A platform whose bring-up steps only record their own names.
#[derive(Default)]
pub struct MockPlatform;

impl BootPlatform for MockPlatform {
    fn kernel_init_early(&mut self) {
        record("kernel_init_early");
    }

    fn arch_early_init(&mut self) {
        record("arch_early_init");
    }

    fn platform_early_init(&mut self) {
        record("platform_early_init");
    }

    fn target_early_init(&mut self) {
        record("target_early_init");
    }

    fn heap_init(&mut self) {
        record("heap_init");
    }

    fn kernel_init(&mut self) {
        record("kernel_init");
    }

    fn arch_init(&mut self) {
        record("arch_init");
    }

    fn platform_init(&mut self) {
        record("platform_init");
    }

    fn target_init(&mut self) {
        record("target_init");
    }

    fn apps_init(&mut self) {
        record("apps_init");
    }
}

/// Scheduler calls seen by [`MockScheduler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    Create {
        id: usize,
        name: &'static str,
        priority: i32,
        stack_size: usize,
    },
    Pin {
        id: usize,
        cpu: usize,
    },
    Detach {
        id: usize,
    },
    /// Thread state at the moment it was handed over.
    Resume {
        id: usize,
        pinned: Option<usize>,
        detached: bool,
    },
    Idle,
    Exit {
        id: usize,
        code: i32,
    },
}

pub struct MockThread {
    id: usize,
    entry: ThreadEntry,
    pinned: Option<usize>,
    detached: bool,
}

/// Payload of the unwind that stands in for the idle loop.
#[derive(Debug)]
pub struct IdleReached;

#[derive(Default)]
pub struct MockScheduler {
    events: RefCell<Vec<SchedEvent>>,
    ready: RefCell<Vec<MockThread>>,
    next_id: Cell<usize>,
    out_of_memory: bool,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler that cannot allocate any thread.
    pub fn out_of_memory() -> Self {
        Self {
            out_of_memory: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<SchedEvent> {
        self.events.borrow().clone()
    }

    fn push(&self, event: SchedEvent) {
        record(format!("sched:{event:?}"));
        self.events.borrow_mut().push(event);
    }
}

impl ThreadApi for MockScheduler {
    type Thread = MockThread;

    fn create_thread(
        &self,
        name: &'static str,
        entry: ThreadEntry,
        priority: i32,
        stack_size: usize,
    ) -> Option<MockThread> {
        if self.out_of_memory {
            return None;
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.push(SchedEvent::Create {
            id,
            name,
            priority,
            stack_size,
        });
        Some(MockThread {
            id,
            entry,
            pinned: None,
            detached: false,
        })
    }

    fn set_pinned_cpu(&self, thread: &mut MockThread, cpu: usize) {
        thread.pinned = Some(cpu);
        self.push(SchedEvent::Pin { id: thread.id, cpu });
    }

    fn detach(&self, thread: &mut MockThread) {
        thread.detached = true;
        self.push(SchedEvent::Detach { id: thread.id });
    }

    fn resume(&self, thread: MockThread) {
        self.push(SchedEvent::Resume {
            id: thread.id,
            pinned: thread.pinned,
            detached: thread.detached,
        });
        self.ready.borrow_mut().push(thread);
    }

    fn become_idle(&self) -> ! {
        self.push(SchedEvent::Idle);
        let ready = self.ready.take();
        for thread in ready {
            let code = (thread.entry)();
            self.push(SchedEvent::Exit {
                id: thread.id,
                code,
            });
        }
        panic::panic_any(IdleReached)
    }
}

/// Boots `boot` on `sched` and checks that the boot path ended in the idle
/// transition.
pub fn boot_until_idle<P: BootPlatform>(boot: BootSequence<'_, P>, sched: &MockScheduler) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        boot.boot(sched);
    }));
    let payload = match result {
        Ok(()) => panic!("boot path returned"),
        Err(payload) => payload,
    };
    assert!(
        payload.downcast_ref::<IdleReached>().is_some(),
        "boot path unwound without reaching idle"
    );
}
