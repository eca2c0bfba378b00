// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Peripheral drivers for the RF core of the CC13x2 family.
//!
//! The RF core is a separate Cortex-M0 running TI firmware. The main MCU
//! powers it up, hands it commands through the doorbell registers and
//! learns about completion through CMDSTA, the status word of each radio
//! operation, and the CPE interrupt lines.
//!
//! Every driver in [`radio`] is generic over the register traits in
//! [`hil`]. [`chip::Cc13x2RfPeripherals`] provides the memory-mapped
//! implementations for real hardware.

#![cfg_attr(not(test), no_std)]

pub mod chip;
pub mod config;
pub mod errorcode;
pub mod fcfg;
pub mod hil;
pub mod nvic;
pub mod osc;
pub mod prcm;
pub mod radio;
pub mod rfc;
pub mod static_ref;

mod poll;

pub use crate::errorcode::{RfcError, WaitPoint};
pub use crate::static_ref::StaticRef;
