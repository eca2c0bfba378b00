// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! RF core drivers.

pub mod chain;
pub mod commands;
pub mod device;
pub mod doorbell;
pub mod executor;
pub mod frequency;
pub mod interrupts;
pub mod power;
pub mod tx_power;

#[cfg(test)]
pub(crate) mod sim;

pub use self::power::{CoreState, RadioState};
