// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Doorbell transport.
//!
//! One command is in flight at a time. A command is handed over as follows:
//!
//! 1. wait until CMDR reads zero, so the previous command has been taken,
//! 2. clear RFACKIFG, so a stale acknowledgement is not mistaken for ours,
//! 3. write CMDR,
//! 4. wait for RFACKIFG, which means the RF core has parsed the command,
//! 5. clear RFACKIFG again,
//! 6. read CMDSTA.
//!
//! Acknowledgement is not completion: a radio operation submitted by
//! pointer keeps running after step 6 and reports through its status word.

use log::{trace, warn};

use crate::config::Config;
use crate::errorcode::{RfcError, WaitPoint};
use crate::hil::DoorbellRegisters;
use crate::poll::poll_until;
use crate::radio::commands::{CommandStatus, CommandWord};
use crate::radio::power::CoreState;

pub struct DoorbellTransport<'a, D: DoorbellRegisters> {
    regs: &'a D,
    state: &'a CoreState,
    config: Config,
}

impl<'a, D: DoorbellRegisters> DoorbellTransport<'a, D> {
    pub fn new(regs: &'a D, state: &'a CoreState, config: Config) -> DoorbellTransport<'a, D> {
        DoorbellTransport {
            regs,
            state,
            config,
        }
    }

    /// Sends `word` to the RF core and returns the raw CMDSTA value.
    ///
    /// Fails with [`RfcError::NotReady`] without touching any register
    /// unless the RF core is active, and with [`RfcError::CommandRejected`]
    /// when CMDSTA reports anything other than `Done`.
    pub fn send(&self, word: CommandWord) -> Result<u32, RfcError> {
        if !self.state.is_active() {
            return Err(RfcError::NotReady);
        }
        self.send_unchecked(word)
    }

    /// [`send`](Self::send) without the state check, for the liveness
    /// ping issued while the RF core is still coming up.
    pub(super) fn send_unchecked(&self, word: CommandWord) -> Result<u32, RfcError> {
        let raw = word.encode();

        poll_until(&self.config, WaitPoint::CommandSlot, || {
            self.regs.command() == 0
        })?;
        self.regs.clear_acknowledge();
        trace!("rfc: CMDR <- {:#010x}", raw);
        self.regs.set_command(raw);

        poll_until(&self.config, WaitPoint::CommandAck, || {
            self.regs.is_acknowledged()
        })?;
        self.regs.clear_acknowledge();

        let status = self.regs.command_status();
        match CommandStatus::from_cmdsta(status) {
            Some(CommandStatus::Done) => Ok(status),
            result => {
                warn!(
                    "rfc: command {:#010x} rejected, CMDSTA {:#010x} ({:?})",
                    raw, status, result
                );
                Err(RfcError::CommandRejected(status))
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
