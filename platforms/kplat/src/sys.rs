// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

use kplat_macros::device_interface;

#[device_interface]
pub trait SysCtrl {
    /// Stops the machine after an unrecoverable boot failure.
    fn halt() -> !;
}
