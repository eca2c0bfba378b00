// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Network device view of the RF core.
//!
//! Exposes the IEEE 802.15.4 addresses of the chip and a small option
//! interface for the channel, the TX power and the power state. Sending
//! and receiving frames is left to a radio stack above this.

use core::cell::Cell;

use log::debug;

use crate::errorcode::RfcError;
use crate::hil::{AddressSource, DoorbellRegisters, HfClockControl, InterruptLine, RfcPowerControl};
use crate::radio::chain::CommandChain;
use crate::radio::commands::CmdFs;
use crate::radio::executor::CommandExecutor;
use crate::radio::frequency::{CHANNEL_MAX, CHANNEL_MIN};
use crate::radio::power::{PowerSequencer, RadioState};
use crate::radio::tx_power::{self, OUTPUT_POWER_UNKNOWN};

/// Value of an unprogrammed customer configuration word.
const UNPROGRAMMED: u32 = 0xFFFF_FFFF;

pub const DEFAULT_CHANNEL: u16 = CHANNEL_MIN;
pub const DEFAULT_TX_POWER_DBM: i16 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioOption {
    /// Short address, `u16`.
    Address,
    /// Extended address, `u64`.
    AddressLong,
    /// `u16`.
    Channel,
    /// `i16`, in dBm.
    TxPower,
    /// `u8`: 0 when idle, 1 when active.
    State,
}

/// MAC address words: the customer override when fully programmed,
/// otherwise the factory address.
pub fn mac_words<A: AddressSource>(source: &A) -> [u32; 2] {
    let secondary = source.secondary_mac();
    if secondary.contains(&UNPROGRAMMED) {
        source.primary_mac()
    } else {
        secondary
    }
}

/// Short address built from the first two bytes of the MAC address.
pub fn short_address<A: AddressSource>(source: &A) -> u16 {
    let [word0, _] = mac_words(source);
    let [b0, b1, _, _] = word0.to_le_bytes();
    u16::from_be_bytes([b0, b1])
}

pub fn long_address<A: AddressSource>(source: &A) -> u64 {
    let [word0, word1] = mac_words(source);
    (u64::from(word0) << 32) | u64::from(word1)
}

pub struct RfDevice<'a, D, P, H, L, A>
where
    D: DoorbellRegisters,
    P: RfcPowerControl,
    H: HfClockControl,
    L: InterruptLine,
    A: AddressSource,
{
    sequencer: &'a PowerSequencer<'a, D, P, H, L>,
    executor: &'a CommandExecutor<'a, D>,
    addresses: &'a A,
    /// Frequency synthesizer command reused for every retune.
    fs: Cell<Option<&'a mut CmdFs>>,
    channel: Cell<u16>,
    tx_power: Cell<i16>,
    pa_value: Cell<u16>,
}

impl<'a, D, P, H, L, A> RfDevice<'a, D, P, H, L, A>
where
    D: DoorbellRegisters,
    P: RfcPowerControl,
    H: HfClockControl,
    L: InterruptLine,
    A: AddressSource,
{
    pub fn new(
        sequencer: &'a PowerSequencer<'a, D, P, H, L>,
        executor: &'a CommandExecutor<'a, D>,
        addresses: &'a A,
        fs: &'a mut CmdFs,
    ) -> RfDevice<'a, D, P, H, L, A> {
        RfDevice {
            sequencer,
            executor,
            addresses,
            fs: Cell::new(Some(fs)),
            channel: Cell::new(DEFAULT_CHANNEL),
            tx_power: Cell::new(DEFAULT_TX_POWER_DBM),
            pa_value: Cell::new(OUTPUT_POWER_UNKNOWN),
        }
    }

    pub fn init(&self) {
        self.sequencer.init();
        debug!(
            "rfc: short address {:#06x}, long address {:#018x}",
            self.short_address(),
            self.long_address()
        );
    }

    pub fn short_address(&self) -> u16 {
        short_address(self.addresses)
    }

    pub fn long_address(&self) -> u64 {
        long_address(self.addresses)
    }

    pub fn channel(&self) -> u16 {
        self.channel.get()
    }

    /// PA setting in use, [`OUTPUT_POWER_UNKNOWN`] until a TX power is set.
    pub fn pa_value(&self) -> u16 {
        self.pa_value.get()
    }

    /// Writes the value of `option` into `buf` in native byte order and
    /// returns its length.
    pub fn get_option(&self, option: RadioOption, buf: &mut [u8]) -> Result<usize, RfcError> {
        match option {
            RadioOption::Address => put(buf, &self.short_address().to_ne_bytes()),
            RadioOption::AddressLong => put(buf, &self.long_address().to_ne_bytes()),
            RadioOption::Channel => put(buf, &self.channel.get().to_ne_bytes()),
            RadioOption::TxPower => put(buf, &self.tx_power.get().to_ne_bytes()),
            RadioOption::State => {
                let state = match self.sequencer.state() {
                    RadioState::Idle => 0u8,
                    RadioState::Active => 1,
                };
                put(buf, &[state])
            }
        }
    }

    /// Sets `option` from `value`, given in native byte order.
    ///
    /// Channel and TX power take effect at once when the radio is active,
    /// otherwise when it is next powered on.
    pub fn set_option(&self, option: RadioOption, value: &[u8]) -> Result<(), RfcError> {
        match option {
            RadioOption::Address | RadioOption::AddressLong => Err(RfcError::NoSupport),
            RadioOption::Channel => {
                let channel = u16::from_ne_bytes(take(value)?);
                if !(CHANNEL_MIN..=CHANNEL_MAX).contains(&channel) {
                    return Err(RfcError::Invalid);
                }
                if self.sequencer.state() == RadioState::Active {
                    self.retune(channel)?;
                }
                self.channel.set(channel);
                Ok(())
            }
            RadioOption::TxPower => {
                let row = tx_power::lookup(i16::from_ne_bytes(take(value)?))?;
                if self.sequencer.state() == RadioState::Active {
                    self.executor.set_tx_power(row.value)?;
                }
                self.tx_power.set(i16::from(row.dbm));
                self.pa_value.set(row.value);
                Ok(())
            }
            RadioOption::State => match take::<1>(value)? {
                [0] => self.sequencer.power_off(),
                [1] => {
                    self.sequencer.power_on()?;
                    self.apply_settings()
                }
                _ => Err(RfcError::Invalid),
            },
        }
    }

    fn apply_settings(&self) -> Result<(), RfcError> {
        if self.pa_value.get() != OUTPUT_POWER_UNKNOWN {
            self.executor.set_tx_power(self.pa_value.get())?;
        }
        self.retune(self.channel.get())
    }

    fn retune(&self, channel: u16) -> Result<(), RfcError> {
        let fs = self.fs.take().ok_or(RfcError::Busy)?;
        let result = self.run_fs(fs, channel);
        self.fs.set(Some(fs));
        result
    }

    fn run_fs(&self, fs: &mut CmdFs, channel: u16) -> Result<(), RfcError> {
        fs.tune(channel)?;
        let pending = self.executor.submit_chain(CommandChain::new(fs))?;
        pending.wait()?;
        debug!("rfc: tuned to channel {}", channel);
        Ok(())
    }
}

fn put(buf: &mut [u8], bytes: &[u8]) -> Result<usize, RfcError> {
    let dst = buf.get_mut(..bytes.len()).ok_or(RfcError::Size)?;
    dst.copy_from_slice(bytes);
    Ok(bytes.len())
}

fn take<const N: usize>(value: &[u8]) -> Result<[u8; N], RfcError> {
    value
        .get(..N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(RfcError::Size)
}
