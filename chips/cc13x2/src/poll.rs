// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Bounded busy-waiting on hardware status bits.

use log::warn;

use crate::config::{Backoff, Config, PollBudget};
use crate::errorcode::{RfcError, WaitPoint};

/// Calls `ready` until it returns true or the budget of `config` is spent.
///
/// `ready` is always called at least once.
pub(crate) fn poll_until<F>(config: &Config, wait: WaitPoint, mut ready: F) -> Result<(), RfcError>
where
    F: FnMut() -> bool,
{
    let mut attempts: u32 = 0;
    let mut spins: u32 = 1;

    loop {
        if ready() {
            return Ok(());
        }

        attempts = attempts.saturating_add(1);
        if let PollBudget::Attempts(max) = config.poll_budget {
            if attempts >= max {
                warn!("rfc: timed out waiting on {:?} after {} polls", wait, attempts);
                return Err(RfcError::HardwareTimeout(wait));
            }
        }

        if let Backoff::Exponential { max_spins } = config.backoff {
            for _ in 0..spins {
                core::hint::spin_loop();
            }
            spins = spins.saturating_mul(2).min(max_spins.max(1));
        }
    }
}
