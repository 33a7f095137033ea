// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! The boot path.
//!
//! On the boot stack:
//!
//! ```text
//! kernel_init_early
//! [EARLIEST, ARCH_EARLY)         arch_early_init
//! [ARCH_EARLY, PLATFORM_EARLY)   platform_early_init
//! [PLATFORM_EARLY, TARGET_EARLY) target_early_init
//! [TARGET_EARLY, HEAP)           heap_init, constructors
//! [HEAP, KERNEL)                 kernel_init
//! [KERNEL, THREADING)            spawn bootstrap2, become idle
//! ```
//!
//! In `bootstrap2`:
//!
//! ```text
//! [THREADING, ARCH)   arch_init
//! [ARCH, PLATFORM)    platform_init
//! [PLATFORM, TARGET)  target_init
//! [TARGET, APPS)      apps_init
//! [APPS, LAST]
//! ```

use kinit_setup::CtorTable;

use crate::{
    args::BootArgs,
    config::BootConfig,
    error::BootError,
    idle,
    level::InitLevel,
    platform::BootPlatform,
    registry::Registry,
    sequencer::LevelSequencer,
    thread::{self, BootThreadDesc, ThreadApi},
};

/// One boot of the kernel: its inputs and collaborators.
pub struct BootSequence<'c, P> {
    args: BootArgs,
    registry: Registry<'static>,
    ctors: CtorTable<'c>,
    platform: P,
    config: BootConfig,
}

impl<'c, P: BootPlatform> BootSequence<'c, P> {
    pub fn new(
        args: BootArgs,
        registry: Registry<'static>,
        ctors: CtorTable<'c>,
        platform: P,
    ) -> Self {
        Self {
            args,
            registry,
            ctors,
            platform,
            config: BootConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BootConfig) -> Self {
        self.config = config;
        self
    }

    pub fn args(&self) -> &BootArgs {
        &self.args
    }

    pub fn config(&self) -> &BootConfig {
        &self.config
    }

    /// Runs the boot-stack part of the sequence and starts `bootstrap2`.
    ///
    /// Returns once the bootstrap thread has been resumed; the caller is
    /// expected to become idle right away. See [`boot`](Self::boot).
    pub fn bring_up<S: ThreadApi>(self, sched: &S) -> Result<(), BootError> {
        let Self {
            args,
            registry,
            ctors,
            mut platform,
            config,
        } = self;

        platform.kernel_init_early();

        let mut seq = LevelSequencer::new(registry);
        seq.advance_to(InitLevel::ARCH_EARLY);
        platform.arch_early_init();

        seq.advance_to(InitLevel::PLATFORM_EARLY);
        platform.platform_early_init();

        seq.advance_to(InitLevel::TARGET_EARLY);
        platform.target_early_init();

        info!("welcome to x-kernel");
        info!("boot args {args}");

        seq.advance_to(InitLevel::HEAP);
        debug!("initializing heap");
        platform.heap_init();

        debug!("calling constructors");
        let called = ctors.call_all();
        debug!("{called} constructors done");

        seq.advance_to(InitLevel::KERNEL);
        platform.kernel_init();

        seq.advance_to(InitLevel::THREADING);

        debug!("creating bootstrap completion thread");
        let desc = BootThreadDesc::new(&config, move || stage_two(seq, platform));
        thread::spawn_detached(sched, desc)
    }

    /// Runs the whole boot sequence and turns the boot stack into the idle
    /// loop. Never returns; a boot-path failure is fatal.
    pub fn boot<S: ThreadApi>(self, sched: &S) -> ! {
        if let Err(err) = self.bring_up(sched) {
            fatal(err);
        }
        idle::enter_idle(sched)
    }
}

/// The body of `bootstrap2`: every level from `THREADING` to `LAST`.
fn stage_two<P: BootPlatform>(mut seq: LevelSequencer<'static>, mut platform: P) -> i32 {
    debug!("top of bootstrap2()");

    seq.advance_to(InitLevel::ARCH);
    platform.arch_init();

    debug!("initializing platform");
    seq.advance_to(InitLevel::PLATFORM);
    platform.platform_init();

    debug!("initializing target");
    seq.advance_to(InitLevel::TARGET);
    platform.target_init();

    debug!("initializing apps");
    seq.advance_to(InitLevel::APPS);
    platform.apps_init();

    seq.finish();
    info!(
        "init levels complete: {} hooks in {} ranges",
        seq.hooks_run(),
        seq.ranges_run()
    );
    0
}

/// Reports an unrecoverable boot failure and stops.
pub fn fatal(err: BootError) -> ! {
    error!("boot failed: {err}");
    panic!("boot failed: {err}")
}

/// Kernel entry on the boot CPU, jumped to by the architecture start-up code
/// with the loader's four argument words.
#[cfg(target_os = "none")]
#[kplat::main]
extern "C" fn kboot_main(arg0: usize, arg1: usize, arg2: usize, arg3: usize) -> ! {
    use crate::platform::{KplatPlatform, KplatScheduler};

    let args = match crate::args::capture(arg0, arg1, arg2, arg3) {
        Ok(args) => *args,
        Err(err) => fatal(err),
    };

    // Logger setup neither allocates nor touches the hardware beyond the
    // console adapter.
    let _ = klogger::init_klogger(log::LevelFilter::Warn);
    let config = BootConfig::from_env();
    if !klogger::set_log_level(config.log_level) {
        warn!("unknown log level `{}`", config.log_level);
    }

    BootSequence::new(args, Registry::linked(), kinit_setup::linked(), KplatPlatform)
        .with_config(config)
        .boot(&KplatScheduler)
}
