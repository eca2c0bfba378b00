// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! RF core commands.
//!
//! The doorbell accepts three kinds of command:
//!
//! - direct commands, encoded entirely in the CMDR word;
//! - immediate commands, a small structure the RF core executes as soon as
//!   it reads it;
//! - radio operations, structures with a start trigger and a condition that
//!   can be linked into a chain the RF core runs on its own.
//!
//! Structures handed to the RF core by pointer are `#[repr(C)]` and aligned
//! to 4 bytes, since the two low bits of CMDR select the command kind.
//! Sub-byte fields are stored as raw bytes and go through explicit
//! encode/decode functions.

use core::fmt;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};

use bitfield::bitfield;
use vcell::VolatileCell;

use crate::errorcode::RfcError;

// Direct commands
pub const CMD_ABORT: u16 = 0x0401;
pub const CMD_STOP: u16 = 0x0402;
pub const CMD_PING: u16 = 0x0406;

// Immediate commands
pub const CMD_SET_TX_POWER: u16 = 0x0010;

// Radio operations
pub const CMD_NOP: u16 = 0x0801;
pub const CMD_FS: u16 = 0x0803;
pub const CMD_PROP_TX: u16 = 0x3801;

const CMDR_TYPE_MASK: u32 = 0b11;
const CMDR_TYPE_POINTER: u32 = 0b00;
const CMDR_TYPE_DIRECT: u32 = 0b01;

/// A command encoded entirely in CMDR.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectCommand {
    pub command_no: u16,
    // CMDR bits 15:0 without the type bits
    param: u16,
}

impl DirectCommand {
    pub const fn new(command_no: u16) -> DirectCommand {
        DirectCommand {
            command_no,
            param: 0,
        }
    }

    /// Direct command with a one byte parameter in CMDR bits 15:8.
    pub const fn with_byte(command_no: u16, param: u8) -> DirectCommand {
        DirectCommand {
            command_no,
            param: (param as u16) << 8,
        }
    }

    /// Direct command with a two byte parameter. Bits 1:0 of the parameter
    /// are lost to the command type.
    pub const fn with_word(command_no: u16, param: u16) -> DirectCommand {
        DirectCommand {
            command_no,
            param: param & 0xFFFC,
        }
    }

    pub const fn param(&self) -> u16 {
        self.param
    }
}

/// Value written to CMDR.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandWord {
    /// Address of an immediate command or a radio operation.
    Pointer(u32),
    Direct(DirectCommand),
}

impl CommandWord {
    /// Pointer to `command`, which must be 4-byte aligned.
    pub fn pointer<T>(command: &T) -> Result<CommandWord, RfcError> {
        let address = ptr::from_ref(command) as usize;
        if address & CMDR_TYPE_MASK as usize != 0 {
            return Err(RfcError::Misaligned);
        }
        // The RF core shares the 32-bit address space of the system CPU.
        Ok(CommandWord::Pointer(address as u32))
    }

    pub const fn encode(self) -> u32 {
        match self {
            CommandWord::Pointer(address) => address,
            CommandWord::Direct(cmd) => {
                ((cmd.command_no as u32) << 16) | (cmd.param as u32) | CMDR_TYPE_DIRECT
            }
        }
    }

    pub fn decode(word: u32) -> Result<CommandWord, RfcError> {
        match word & CMDR_TYPE_MASK {
            CMDR_TYPE_POINTER => Ok(CommandWord::Pointer(word)),
            CMDR_TYPE_DIRECT => Ok(CommandWord::Direct(DirectCommand {
                command_no: (word >> 16) as u16,
                param: (word as u16) & 0xFFFC,
            })),
            _ => Err(RfcError::Invalid),
        }
    }
}

/// CMDSTA result byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandStatus {
    Pending = 0x00,
    Done = 0x01,
    IllegalPointer = 0x81,
    UnknownCommand = 0x82,
    UnknownDirCommand = 0x83,
    ContextError = 0x85,
    SchedulingError = 0x86,
    ParError = 0x87,
    QueueError = 0x88,
    QueueBusy = 0x89,
}

impl CommandStatus {
    /// Decodes the result byte of a raw CMDSTA value.
    pub fn from_cmdsta(cmdsta: u32) -> Option<CommandStatus> {
        match cmdsta & 0xFF {
            0x00 => Some(CommandStatus::Pending),
            0x01 => Some(CommandStatus::Done),
            0x81 => Some(CommandStatus::IllegalPointer),
            0x82 => Some(CommandStatus::UnknownCommand),
            0x83 => Some(CommandStatus::UnknownDirCommand),
            0x85 => Some(CommandStatus::ContextError),
            0x86 => Some(CommandStatus::SchedulingError),
            0x87 => Some(CommandStatus::ParError),
            0x88 => Some(CommandStatus::QueueError),
            0x89 => Some(CommandStatus::QueueBusy),
            _ => None,
        }
    }
}

/// Status word of a radio operation, written by the RF core.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RadioOpStatus(pub u16);

impl RadioOpStatus {
    // Operation not finished
    pub const IDLE: RadioOpStatus = RadioOpStatus(0x0000);
    pub const PENDING: RadioOpStatus = RadioOpStatus(0x0001);
    pub const ACTIVE: RadioOpStatus = RadioOpStatus(0x0002);
    pub const SKIPPED: RadioOpStatus = RadioOpStatus(0x0003);
    // Operation finished normally
    pub const DONE_OK: RadioOpStatus = RadioOpStatus(0x0400);
    pub const DONE_COUNTDOWN: RadioOpStatus = RadioOpStatus(0x0401);
    pub const DONE_RXERR: RadioOpStatus = RadioOpStatus(0x0402);
    pub const DONE_TIMEOUT: RadioOpStatus = RadioOpStatus(0x0403);
    pub const DONE_STOPPED: RadioOpStatus = RadioOpStatus(0x0404);
    pub const DONE_ABORT: RadioOpStatus = RadioOpStatus(0x0405);
    // Operation finished with error
    pub const ERROR_PAST_START: RadioOpStatus = RadioOpStatus(0x0800);
    pub const ERROR_START_TRIG: RadioOpStatus = RadioOpStatus(0x0801);
    pub const ERROR_CONDITION: RadioOpStatus = RadioOpStatus(0x0802);
    pub const ERROR_PAR: RadioOpStatus = RadioOpStatus(0x0803);
    pub const ERROR_POINTER: RadioOpStatus = RadioOpStatus(0x0804);
    pub const ERROR_CMDID: RadioOpStatus = RadioOpStatus(0x0805);
    pub const ERROR_NO_SETUP: RadioOpStatus = RadioOpStatus(0x0807);
    pub const ERROR_NO_FS: RadioOpStatus = RadioOpStatus(0x0808);
    pub const ERROR_SYNTH_PROG: RadioOpStatus = RadioOpStatus(0x0809);
    pub const ERROR_TXUNF: RadioOpStatus = RadioOpStatus(0x080A);
    pub const ERROR_RXOVF: RadioOpStatus = RadioOpStatus(0x080B);
    pub const ERROR_NO_RX: RadioOpStatus = RadioOpStatus(0x080C);
    // Proprietary mode
    pub const PROP_DONE_OK: RadioOpStatus = RadioOpStatus(0x3400);
    pub const PROP_DONE_RXTIMEOUT: RadioOpStatus = RadioOpStatus(0x3401);
    pub const PROP_DONE_STOPPED: RadioOpStatus = RadioOpStatus(0x3404);
    pub const PROP_DONE_ABORT: RadioOpStatus = RadioOpStatus(0x3405);
    pub const PROP_ERROR_PAR: RadioOpStatus = RadioOpStatus(0x3800);
    pub const PROP_ERROR_NO_SETUP: RadioOpStatus = RadioOpStatus(0x3803);
    pub const PROP_ERROR_NO_FS: RadioOpStatus = RadioOpStatus(0x3804);
    pub const PROP_ERROR_TXUNF: RadioOpStatus = RadioOpStatus(0x3806);

    const CLASS_MASK: u16 = 0x0C00;
    const CLASS_DONE: u16 = 0x0400;
    const CODE_MASK: u16 = 0x03FF;

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn is_finished(self) -> bool {
        self.0 & Self::CLASS_MASK != 0
    }

    /// Result the RF core derives from this status when deciding how to
    /// continue a chain. `None` while the operation has not finished.
    pub fn result(self) -> Option<OpResult> {
        match self.0 & Self::CLASS_MASK {
            0 => None,
            Self::CLASS_DONE => Some(match self.0 & Self::CODE_MASK {
                0x000 => OpResult::True,
                0x004 | 0x005 => OpResult::Abort,
                _ => OpResult::False,
            }),
            _ => Some(OpResult::Error),
        }
    }
}

impl fmt::Debug for RadioOpStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RadioOpStatus({:#06x})", self.0)
    }
}

/// How a finished radio operation ended, as seen by its condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpResult {
    True,
    False,
    Abort,
    Error,
}

bitfield! {
    #[derive(Copy, Clone)]
    struct RfcTrigger(u8);
    impl Debug;
    trigger_type, set_trigger_type : 3, 0;
    alt_command, set_alt_command    : 4;
    trigger_no, set_trigger_no      : 6, 5;
    past_trigger, set_past_trigger  : 7;
}

bitfield! {
    #[derive(Copy, Clone)]
    struct RfcCondition(u8);
    impl Debug;
    rule, set_rule : 3, 0;
    skip, set_skip : 7, 4;
}

/// When a radio operation starts, relative to `start_time`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TriggerType {
    Now = 0,
    Never = 1,
    AbsTime = 2,
    RelSubmit = 3,
    RelStart = 4,
    RelPrevStart = 5,
    RelFirstStart = 6,
    RelPrevEnd = 7,
    RelEvt1 = 8,
    RelEvt2 = 9,
    External = 10,
}

impl TryFrom<u8> for TriggerType {
    type Error = RfcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TriggerType::Now),
            1 => Ok(TriggerType::Never),
            2 => Ok(TriggerType::AbsTime),
            3 => Ok(TriggerType::RelSubmit),
            4 => Ok(TriggerType::RelStart),
            5 => Ok(TriggerType::RelPrevStart),
            6 => Ok(TriggerType::RelFirstStart),
            7 => Ok(TriggerType::RelPrevEnd),
            8 => Ok(TriggerType::RelEvt1),
            9 => Ok(TriggerType::RelEvt2),
            10 => Ok(TriggerType::External),
            _ => Err(RfcError::Invalid),
        }
    }
}

/// `startTrigger` byte of a radio operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartTrigger {
    pub trigger_type: TriggerType,
    /// An alternative trigger command may start the operation.
    pub alt_command: bool,
    /// Trigger number of the alternative trigger command, 0 to 3.
    pub trigger_no: u8,
    /// Start immediately instead of failing with `ERROR_PAST_START` when
    /// the trigger time has already passed.
    pub past_trigger: bool,
}

impl StartTrigger {
    pub const NOW: StartTrigger = StartTrigger::new(TriggerType::Now);

    pub const fn new(trigger_type: TriggerType) -> StartTrigger {
        StartTrigger {
            trigger_type,
            alt_command: false,
            trigger_no: 0,
            past_trigger: false,
        }
    }

    pub fn encode(&self) -> u8 {
        let mut trigger = RfcTrigger(0);
        trigger.set_trigger_type(self.trigger_type as u8);
        trigger.set_alt_command(self.alt_command);
        trigger.set_trigger_no(self.trigger_no & 0b11);
        trigger.set_past_trigger(self.past_trigger);
        trigger.0
    }

    pub fn decode(raw: u8) -> Result<StartTrigger, RfcError> {
        let trigger = RfcTrigger(raw);
        Ok(StartTrigger {
            trigger_type: TriggerType::try_from(trigger.trigger_type())?,
            alt_command: trigger.alt_command(),
            trigger_no: trigger.trigger_no(),
            past_trigger: trigger.past_trigger(),
        })
    }
}

/// Rule deciding whether the RF core moves on to the next operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ConditionRule {
    Always = 0,
    Never = 1,
    StopOnFalse = 2,
    StopOnTrue = 3,
    SkipOnFalse = 4,
    SkipOnTrue = 5,
}

impl TryFrom<u8> for ConditionRule {
    type Error = RfcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ConditionRule::Always),
            1 => Ok(ConditionRule::Never),
            2 => Ok(ConditionRule::StopOnFalse),
            3 => Ok(ConditionRule::StopOnTrue),
            4 => Ok(ConditionRule::SkipOnFalse),
            5 => Ok(ConditionRule::SkipOnTrue),
            _ => Err(RfcError::Invalid),
        }
    }
}

/// What the RF core does after an operation finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// Run the operation at `next_op`.
    Next,
    /// Jump this many operations ahead in the chain. 0 runs the same
    /// operation again, 1 is the same as `Next`.
    Skip(u8),
    /// End the chain.
    Stop,
}

/// `condition` byte of a radio operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Condition {
    pub rule: ConditionRule,
    /// Jump distance of the skip rules, 0 to 15.
    pub skip: u8,
}

impl Condition {
    pub const ALWAYS: Condition = Condition {
        rule: ConditionRule::Always,
        skip: 0,
    };

    pub const NEVER: Condition = Condition {
        rule: ConditionRule::Never,
        skip: 0,
    };

    pub fn encode(&self) -> u8 {
        let mut cond = RfcCondition(0);
        cond.set_rule(self.rule as u8);
        cond.set_skip(self.skip & 0x0F);
        cond.0
    }

    pub fn decode(raw: u8) -> Result<Condition, RfcError> {
        let cond = RfcCondition(raw);
        Ok(Condition {
            rule: ConditionRule::try_from(cond.rule())?,
            skip: cond.skip(),
        })
    }

    /// What the RF core does once an operation with this condition ends
    /// with `result`. Aborts and errors end the chain whatever the rule.
    pub fn continuation(&self, result: OpResult) -> Continuation {
        match (result, self.rule) {
            (OpResult::Abort | OpResult::Error, _) => Continuation::Stop,
            (_, ConditionRule::Always) => Continuation::Next,
            (_, ConditionRule::Never) => Continuation::Stop,
            (OpResult::True, ConditionRule::StopOnFalse) => Continuation::Next,
            (OpResult::False, ConditionRule::StopOnFalse) => Continuation::Stop,
            (OpResult::True, ConditionRule::StopOnTrue) => Continuation::Stop,
            (OpResult::False, ConditionRule::StopOnTrue) => Continuation::Next,
            (OpResult::True, ConditionRule::SkipOnFalse) => Continuation::Next,
            (OpResult::False, ConditionRule::SkipOnFalse) => Continuation::Skip(self.skip),
            (OpResult::True, ConditionRule::SkipOnTrue) => Continuation::Skip(self.skip),
            (OpResult::False, ConditionRule::SkipOnTrue) => Continuation::Next,
        }
    }
}

/// Header shared by every radio operation.
///
/// Only ever used as a view into one of the command structures below.
#[repr(C, align(4))]
pub struct RadioOp {
    command_no: u16,
    status: VolatileCell<u16>,
    next_op: Option<NonNull<RadioOp>>,
    start_time: u32,
    start_trigger: u8,
    condition: u8,
}

impl RadioOp {
    pub fn command_no(&self) -> u16 {
        self.command_no
    }

    pub fn status(&self) -> RadioOpStatus {
        RadioOpStatus(self.status.get())
    }

    pub fn start_time(&self) -> u32 {
        self.start_time
    }

    pub fn start_trigger(&self) -> Result<StartTrigger, RfcError> {
        StartTrigger::decode(self.start_trigger)
    }

    pub fn condition(&self) -> Result<Condition, RfcError> {
        Condition::decode(self.condition)
    }

    /// Sets when the operation starts. `start_time` is in radio timer
    /// ticks and is read according to the trigger type.
    pub fn set_start(&mut self, start_time: u32, trigger: StartTrigger) {
        self.start_time = start_time;
        self.start_trigger = trigger.encode();
    }

    pub fn set_condition(&mut self, condition: Condition) {
        self.condition = condition.encode();
    }

    /// Link followed by the RF core. Only [`super::chain::CommandChain`]
    /// writes it, and it clears every link it made when dropped.
    pub(crate) fn next_op(&self) -> Option<NonNull<RadioOp>> {
        self.next_op
    }

    pub(crate) fn set_next_op(&mut self, next: Option<NonNull<RadioOp>>) {
        self.next_op = next;
    }

    /// The host only writes the status before handing the operation over.
    pub(crate) fn reset_status(&self) {
        self.status.set(RadioOpStatus::IDLE.0);
    }

    /// Stands in for the RF core writing the status word.
    #[cfg(test)]
    pub(crate) fn set_status(&self, status: RadioOpStatus) {
        self.status.set(status.0);
    }
}

impl fmt::Debug for RadioOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RadioOp")
            .field("command_no", &format_args!("{:#06x}", self.command_no))
            .field("status", &self.status())
            .field("start_time", &self.start_time)
            .field("start_trigger", &self.start_trigger())
            .field("condition", &self.condition())
            .finish()
    }
}

/// A radio operation that can be handed to the RF core by pointer.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]`, aligned to at least 4 bytes, no
/// smaller than [`RadioOp`], and start with the six fields of [`RadioOp`]
/// with the same types and in the same order.
pub unsafe trait RadioCommand: Sized {
    fn op(&self) -> &RadioOp {
        unsafe { &*ptr::from_ref(self).cast::<RadioOp>() }
    }

    fn op_mut(&mut self) -> &mut RadioOp {
        unsafe { &mut *ptr::from_mut(self).cast::<RadioOp>() }
    }
}

/// An immediate command, executed by the RF core while CMDR is processed.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]`, aligned to at least 4 bytes, and
/// start with the 16-bit command number.
pub unsafe trait ImmediateCommand: Sized {
    fn command_no(&self) -> u16;
}

/// CMD_NOP.
// Header fields are read by the RF core through the pointer.
#[allow(dead_code)]
#[repr(C, align(4))]
pub struct CmdNop {
    command_no: u16,
    status: VolatileCell<u16>,
    next_op: Option<NonNull<RadioOp>>,
    start_time: u32,
    start_trigger: u8,
    condition: u8,
}

impl CmdNop {
    pub fn new() -> CmdNop {
        CmdNop {
            command_no: CMD_NOP,
            status: VolatileCell::new(0),
            next_op: None,
            start_time: 0,
            start_trigger: StartTrigger::NOW.encode(),
            condition: Condition::ALWAYS.encode(),
        }
    }
}

unsafe impl RadioCommand for CmdNop {}

bitfield! {
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct SynthConf(u8);
    impl Debug;
    pub tx_mode, set_tx_mode   : 0;
    pub ref_freq, set_ref_freq : 6, 1;
}

/// CMD_FS: program the frequency synthesizer.
// Header fields are read by the RF core through the pointer.
#[allow(dead_code)]
#[repr(C, align(4))]
pub struct CmdFs {
    command_no: u16,
    status: VolatileCell<u16>,
    next_op: Option<NonNull<RadioOp>>,
    start_time: u32,
    start_trigger: u8,
    condition: u8,
    /// Integer part of the frequency, in MHz.
    pub frequency: u16,
    /// Fractional part of the frequency, in 1/65536 MHz.
    pub fract_freq: u16,
    synth_conf: u8,
    _dummy0: u8,
    _dummy1: u8,
    _dummy2: u8,
    _dummy3: u16,
}

impl CmdFs {
    pub fn new(frequency: u16, fract_freq: u16) -> CmdFs {
        CmdFs {
            command_no: CMD_FS,
            status: VolatileCell::new(0),
            next_op: None,
            start_time: 0,
            start_trigger: StartTrigger::NOW.encode(),
            condition: Condition::ALWAYS.encode(),
            frequency,
            fract_freq,
            synth_conf: 0,
            _dummy0: 0,
            _dummy1: 0,
            _dummy2: 0,
            _dummy3: 0,
        }
    }

    pub fn synth_conf(&self) -> SynthConf {
        SynthConf(self.synth_conf)
    }

    pub fn set_synth_conf(&mut self, conf: SynthConf) {
        self.synth_conf = conf.0;
    }
}

unsafe impl RadioCommand for CmdFs {}

bitfield! {
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct PacketConf(u8);
    impl Debug;
    pub fs_off, set_fs_off   : 0;
    pub use_crc, set_use_crc : 3;
    pub var_len, set_var_len : 4;
}

/// CMD_PROP_TX: send one packet in proprietary mode.
// Header fields are read by the RF core through the pointer.
#[allow(dead_code)]
#[repr(C, align(4))]
pub struct PropTx<'a> {
    command_no: u16,
    status: VolatileCell<u16>,
    next_op: Option<NonNull<RadioOp>>,
    start_time: u32,
    start_trigger: u8,
    condition: u8,
    packet_conf: u8,
    packet_len: u8,
    pub sync_word: u32,
    packet: *const u8,
    _packet: PhantomData<&'a [u8]>,
}

impl<'a> PropTx<'a> {
    pub fn new(packet_conf: PacketConf, sync_word: u32) -> PropTx<'a> {
        PropTx {
            command_no: CMD_PROP_TX,
            status: VolatileCell::new(0),
            next_op: None,
            start_time: 0,
            start_trigger: StartTrigger::NOW.encode(),
            condition: Condition::ALWAYS.encode(),
            packet_conf: packet_conf.0,
            packet_len: 0,
            sync_word,
            packet: ptr::null(),
            _packet: PhantomData,
        }
    }

    pub fn packet_conf(&self) -> PacketConf {
        PacketConf(self.packet_conf)
    }

    pub fn set_packet_conf(&mut self, conf: PacketConf) {
        self.packet_conf = conf.0;
    }

    pub fn packet_len(&self) -> u8 {
        self.packet_len
    }

    /// Points the command at the bytes to send. At most 255 bytes.
    pub fn set_packet(&mut self, packet: &'a [u8]) -> Result<(), RfcError> {
        let len = u8::try_from(packet.len()).map_err(|_| RfcError::Size)?;
        self.packet = packet.as_ptr();
        self.packet_len = len;
        Ok(())
    }
}

unsafe impl RadioCommand for PropTx<'_> {}

/// CMD_SET_TX_POWER.
#[repr(C, align(4))]
pub struct SetTxPower {
    command_no: u16,
    /// Raw PA setting, see [`super::tx_power`].
    pub tx_power: u16,
}

impl SetTxPower {
    pub const fn new(tx_power: u16) -> SetTxPower {
        SetTxPower {
            command_no: CMD_SET_TX_POWER,
            tx_power,
        }
    }
}

unsafe impl ImmediateCommand for SetTxPower {
    fn command_no(&self) -> u16 {
        self.command_no
    }
}

mod layout {
    use super::{CmdFs, CmdNop, PropTx, RadioOp, SetTxPower};
    use core::mem::{align_of, size_of};
    use static_assertions::const_assert;

    const_assert!(size_of::<CmdNop>() >= size_of::<RadioOp>());
    const_assert!(size_of::<CmdFs>() >= size_of::<RadioOp>());
    const_assert!(size_of::<PropTx<'static>>() >= size_of::<RadioOp>());
    const_assert!(align_of::<RadioOp>() % 4 == 0);
    const_assert!(align_of::<SetTxPower>() % 4 == 0);

    #[cfg(target_pointer_width = "32")]
    mod wire {
        use super::super::{CmdFs, PropTx, RadioOp, SetTxPower};
        use core::mem::{offset_of, size_of};
        use static_assertions::const_assert_eq;

        const_assert_eq!(offset_of!(RadioOp, next_op), 4);
        const_assert_eq!(offset_of!(RadioOp, start_time), 8);
        const_assert_eq!(offset_of!(RadioOp, start_trigger), 12);
        const_assert_eq!(offset_of!(RadioOp, condition), 13);
        const_assert_eq!(offset_of!(CmdFs, frequency), 14);
        const_assert_eq!(offset_of!(CmdFs, synth_conf), 18);
        const_assert_eq!(size_of::<CmdFs>(), 24);
        const_assert_eq!(offset_of!(PropTx<'static>, packet_conf), 14);
        const_assert_eq!(offset_of!(PropTx<'static>, sync_word), 16);
        const_assert_eq!(offset_of!(PropTx<'static>, packet), 20);
        const_assert_eq!(size_of::<PropTx<'static>>(), 24);
        const_assert_eq!(size_of::<SetTxPower>(), 4);
    }
}
