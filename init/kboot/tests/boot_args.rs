// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! The boot arguments live in a process-wide cell, so everything about them
//! is checked in one test.

use kboot::{BootArgs, BootError, args, boot_args};

#[test]
fn boot_args_are_captured_once() {
    assert_eq!(boot_args(), None);

    let captured = args::capture(0x8000_0000, 0x1, 0xdead_beef, usize::MAX).unwrap();
    let expected = BootArgs::new(0x8000_0000, 0x1, 0xdead_beef, usize::MAX);
    assert_eq!(*captured, expected);
    assert_eq!(captured.get(2), Some(0xdead_beef));
    assert_eq!(captured.get(4), None);
    assert_eq!(boot_args(), Some(&expected));

    assert_eq!(args::capture(0, 0, 0, 0), Err(BootError::ArgsAlreadyCaptured));
    assert_eq!(boot_args(), Some(&expected));
    assert_eq!(
        boot_args().map(BootArgs::as_array),
        Some(&[0x8000_0000, 0x1, 0xdead_beef, usize::MAX])
    );
}
