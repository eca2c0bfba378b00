// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Command executor.
//!
//! Immediate and direct commands complete while the doorbell handshake
//! runs, so their submission returns the final CMDSTA. Radio operations are
//! handed over as a [`CommandChain`] and keep running after the handshake;
//! [`CommandExecutor::submit_chain`] returns a [`PendingChain`] that holds
//! the chain until the RF core is seen to be done with it.

use log::{trace, warn};

use crate::errorcode::{RfcError, WaitPoint};
use crate::hil::DoorbellRegisters;
use crate::poll::poll_until;
use crate::radio::chain::{ChainProgress, CommandChain};
use crate::radio::commands::{
    CommandWord, DirectCommand, ImmediateCommand, OpResult, RadioOpStatus, SetTxPower, CMD_ABORT,
    CMD_PING, CMD_STOP,
};
use crate::radio::doorbell::DoorbellTransport;

pub struct CommandExecutor<'a, D: DoorbellRegisters> {
    doorbell: DoorbellTransport<'a, D>,
}

impl<'a, D: DoorbellRegisters> CommandExecutor<'a, D> {
    pub fn new(doorbell: DoorbellTransport<'a, D>) -> CommandExecutor<'a, D> {
        CommandExecutor { doorbell }
    }

    /// Submits an immediate command by pointer. Returns the raw CMDSTA.
    ///
    /// The RF core may write results back into `command`, hence the
    /// mutable borrow.
    pub fn submit_immediate<C: ImmediateCommand>(&self, command: &mut C) -> Result<u32, RfcError> {
        trace!("rfc: immediate command {:#06x}", command.command_no());
        let word = CommandWord::pointer(command)?;
        self.doorbell.send(word)
    }

    /// Submits a command encoded entirely in CMDR. Returns the raw CMDSTA.
    pub fn submit_direct(&self, command: DirectCommand) -> Result<u32, RfcError> {
        trace!("rfc: direct command {:#06x}", command.command_no);
        self.doorbell.send(CommandWord::Direct(command))
    }

    /// CMD_PING. Returns the CMDSTA result byte.
    pub fn execute_ping(&self) -> Result<u8, RfcError> {
        self.submit_direct(DirectCommand::new(CMD_PING))
            .map(result_byte)
    }

    /// CMD_ABORT: ends the running operation at once. Returns the CMDSTA
    /// result byte.
    pub fn execute_abort(&self) -> Result<u8, RfcError> {
        self.submit_direct(DirectCommand::new(CMD_ABORT))
            .map(result_byte)
    }

    /// CMD_STOP: lets the running operation finish what it is doing, then
    /// ends it. Returns the CMDSTA result byte.
    pub fn execute_stop(&self) -> Result<u8, RfcError> {
        self.submit_direct(DirectCommand::new(CMD_STOP))
            .map(result_byte)
    }

    /// Changes the PA setting used by the next transmission.
    ///
    /// `code` is a raw PA table entry, see [`crate::radio::tx_power`].
    pub fn set_tx_power(&self, code: u16) -> Result<u32, RfcError> {
        let mut command = SetTxPower::new(code);
        self.submit_immediate(&mut command)
    }

    /// Resets every status in `chain` to IDLE and hands its head to the RF
    /// core.
    ///
    /// If the RF core does not take the chain it is unlinked and dropped,
    /// which gives the operations back to the caller.
    pub fn submit_chain<'c>(
        &self,
        chain: CommandChain<'c>,
    ) -> Result<PendingChain<'_, 'c, D>, RfcError> {
        let word = CommandWord::pointer(chain.head())?;
        chain.reset_status();
        trace!(
            "rfc: chain of {} starting with {:#06x}",
            chain.len(),
            chain.head().command_no()
        );
        self.doorbell.send(word)?;
        Ok(PendingChain {
            executor: self,
            chain: Some(chain),
            released: ChainProgress::Running,
        })
    }

    pub(super) fn ping_unchecked(&self) -> Result<u8, RfcError> {
        self.doorbell
            .send_unchecked(CommandWord::Direct(DirectCommand::new(CMD_PING)))
            .map(result_byte)
    }
}

fn result_byte(cmdsta: u32) -> u8 {
    (cmdsta & 0xFF) as u8
}

/// A chain the RF core may still be reading.
///
/// The operations stay borrowed until the chain is released. Dropping an
/// unfinished guard aborts the chain and waits for the RF core to stop.
pub struct PendingChain<'e, 'c, D: DoorbellRegisters> {
    executor: &'e CommandExecutor<'e, D>,
    chain: Option<CommandChain<'c>>,
    // Progress at the time of release.
    released: ChainProgress,
}

impl<'e, 'c, D: DoorbellRegisters> PendingChain<'e, 'c, D> {
    /// Read-only view of the chain, for inspecting statuses.
    pub fn chain(&self) -> Option<&CommandChain<'c>> {
        self.chain.as_ref()
    }

    pub fn progress(&self) -> ChainProgress {
        self.chain
            .as_ref()
            .map_or(self.released, |chain| chain.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.progress() != ChainProgress::Running
    }

    /// Busy-waits until the chain is finished.
    ///
    /// Returns the status of the last operation the RF core ran, or
    /// [`RfcError::OperationFailed`] with that status if it was an abort or
    /// an error.
    pub fn wait(&self) -> Result<RadioOpStatus, RfcError> {
        let mut last = ChainProgress::Running;
        poll_until(self.executor.doorbell.config(), WaitPoint::OperationDone, || {
            last = self.progress();
            last != ChainProgress::Running
        })?;

        match last {
            ChainProgress::Finished(status) => match status.result() {
                Some(OpResult::True | OpResult::False) => Ok(status),
                _ => Err(RfcError::OperationFailed(status.raw())),
            },
            ChainProgress::Running => Err(RfcError::HardwareTimeout(WaitPoint::OperationDone)),
        }
    }

    /// Hands the chain back once the RF core is done with it.
    ///
    /// Fails with [`RfcError::Busy`] while the chain is running and with
    /// [`RfcError::Already`] if it was released before.
    pub fn release(&mut self) -> Result<CommandChain<'c>, RfcError> {
        let progress = self.progress();
        if progress == ChainProgress::Running {
            return Err(RfcError::Busy);
        }
        let chain = self.chain.take().ok_or(RfcError::Already)?;
        self.released = progress;
        Ok(chain)
    }
}

impl<D: DoorbellRegisters> Drop for PendingChain<'_, '_, D> {
    fn drop(&mut self) {
        let Some(chain) = self.chain.as_ref() else {
            return;
        };
        if chain.progress() != ChainProgress::Running {
            return;
        }

        warn!("rfc: aborting a chain that is still running");
        if let Err(e) = self.executor.execute_abort() {
            warn!("rfc: abort failed: {:?}", e);
        }
        let stopped = poll_until(self.executor.doorbell.config(), WaitPoint::OperationDone, || {
            chain.progress() != ChainProgress::Running
        });
        if stopped.is_err() {
            warn!("rfc: unlinking a chain the RF core may still read");
        }
    }
}
