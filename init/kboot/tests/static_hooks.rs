// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use common::take_trace;
use kboot::{Ctor, CtorTable, InitLevel, LevelRange, LevelSequencer, Registry, init_hook};

#[init_hook(level = InitLevel::PLATFORM)]
fn probe_uart() {
    common::record("probe_uart");
}

#[init_hook(level = InitLevel::HEAP.offset(2), name = "slab caches")]
fn slab_init() {
    common::record("slab_init");
}

#[kboot::init_hook(level = InitLevel::EARLIEST)]
fn early_console() {
    common::record("early_console");
}

static CTOR_CALLS: AtomicUsize = AtomicUsize::new(0);

#[kboot::register_init]
fn kboot_static_hooks_ctor() {
    CTOR_CALLS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn linked_registry_collects_annotated_hooks() {
    let registry = Registry::linked();
    assert_eq!(registry.len(), 3);

    let ordered: Vec<_> = registry
        .hooks_in(LevelRange::FULL)
        .map(|h| (h.name(), h.level()))
        .collect();
    assert_eq!(
        ordered,
        [
            ("early_console", InitLevel::EARLIEST),
            ("slab caches", InitLevel::HEAP.offset(2)),
            ("probe_uart", InitLevel::PLATFORM),
        ]
    );
}

#[test]
fn annotated_hooks_run_through_the_sequencer() {
    take_trace();
    let mut seq = LevelSequencer::new(Registry::linked());
    assert_eq!(seq.advance_to(InitLevel::HEAP), 1);
    assert_eq!(take_trace(), ["early_console"]);

    assert_eq!(seq.advance_to(InitLevel::THREADING), 1);
    assert_eq!(seq.finish(), 1);
    assert_eq!(take_trace(), ["slab_init", "probe_uart"]);
}

#[cfg(target_os = "linux")]
#[test]
fn registered_constructor_runs_at_load() {
    assert!(CTOR_CALLS.load(Ordering::SeqCst) >= 1);
}

#[test]
fn registered_constructor_is_a_plain_ctor() {
    let before = CTOR_CALLS.load(Ordering::SeqCst);
    let ctors: [Ctor; 1] = [kboot_static_hooks_ctor];
    assert_eq!(CtorTable::new(&ctors).call_all(), 1);
    assert!(CTOR_CALLS.load(Ordering::SeqCst) > before);
}
