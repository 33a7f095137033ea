// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Panic handler for the boot image.
use core::panic::PanicInfo;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    klogger::kprintln!("{}", info);
    if let Some(args) = crate::args::boot_args() {
        klogger::kprintln!("boot args {}", args);
    }
    kplat::sys::halt()
}
