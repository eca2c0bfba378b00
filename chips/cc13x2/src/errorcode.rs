// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Error type shared by the RF core drivers.

/// The busy-wait that expired when a [`RfcError::HardwareTimeout`] is
/// returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitPoint {
    /// CMDR did not drain before a new command could be written.
    CommandSlot,
    /// RFACKIFG was never raised after writing CMDR.
    CommandAck,
    /// PDSTAT0/PDSTAT1 did not report the RF domain on.
    PowerDomainOn,
    /// PDSTAT0/PDSTAT1 did not report the RF domain off.
    PowerDomainOff,
    /// CLKLOADCTL.LOAD_DONE was not observed.
    ClockLoad,
    /// The requested HF clock source never became ready.
    HfSourceReady,
    /// STAT0 never reported the HF source the switch was made to.
    HfSourceSwitch,
    /// The AUX semaphore guarding DDI and ROM oscillator access stayed taken.
    AuxSemaphore,
    /// A submitted command chain did not finish.
    OperationDone,
}

/// Errors returned by the RF core drivers.
///
/// Status values reported by the RF core are carried verbatim; their
/// meaning depends on the command that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RfcError {
    /// The RF core is not powered up and pinged.
    NotReady,
    /// A busy-wait on a hardware status bit ran out of budget.
    HardwareTimeout(WaitPoint),
    /// CMDSTA reported something other than `Done`. Raw register value.
    CommandRejected(u32),
    /// A radio operation finished with an abort or error status. Raw
    /// status value.
    OperationFailed(u16),
    /// Interrupts were armed while the RF power domain was not ready.
    NotPowered,
    /// A command structure is not 4-byte aligned.
    Misaligned,
    /// The state requested is already set.
    Already,
    /// A command chain is still owned by the RF core.
    Busy,
    /// The buffer passed is too small.
    Size,
    /// An invalid parameter was passed.
    Invalid,
    /// Operation or option is unsupported.
    NoSupport,
}
