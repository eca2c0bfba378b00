// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Chains of radio operations.
//!
//! The RF core follows `next_op` from one operation to the next without any
//! help from the system CPU, deciding at each step from the condition of the
//! operation that just finished. A [`CommandChain`] owns the links: it holds
//! a mutable borrow of every operation it links and clears the links again
//! when dropped.

use core::marker::PhantomData;
use core::ptr::NonNull;

use super::commands::{Continuation, RadioCommand, RadioOp, RadioOpStatus};

/// Where the RF core is in a submitted chain, as far as the status words
/// tell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainProgress {
    Running,
    /// The RF core is done with the chain. Status of the last operation it
    /// ran.
    Finished(RadioOpStatus),
}

/// Radio operations linked in the order the RF core runs them.
pub struct CommandChain<'a> {
    head: NonNull<RadioOp>,
    tail: NonNull<RadioOp>,
    len: usize,
    _ops: PhantomData<&'a mut RadioOp>,
}

impl<'a> CommandChain<'a> {
    pub fn new<C: RadioCommand>(head: &'a mut C) -> CommandChain<'a> {
        let op = head.op_mut();
        op.set_next_op(None);
        let head = NonNull::from(op);
        CommandChain {
            head,
            tail: head,
            len: 1,
            _ops: PhantomData,
        }
    }

    /// Links `next` after the last operation of the chain.
    pub fn then<C: RadioCommand>(mut self, next: &'a mut C) -> CommandChain<'a> {
        let op = next.op_mut();
        op.set_next_op(None);
        let next = NonNull::from(op);
        // The chain holds the only borrow of the tail.
        unsafe { self.tail.as_mut() }.set_next_op(Some(next));
        self.tail = next;
        self.len += 1;
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn head(&self) -> &RadioOp {
        unsafe { self.head.as_ref() }
    }

    /// Visits the operations by following `next_op`, like the RF core.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            next: Some(self.head),
            _chain: PhantomData,
        }
    }

    pub(crate) fn reset_status(&self) {
        for op in self.iter() {
            op.reset_status();
        }
    }

    /// Replays the decisions of the RF core over the status words written
    /// so far.
    ///
    /// All statuses are reset to IDLE on submission, so an operation still
    /// IDLE has not been reached yet.
    pub fn progress(&self) -> ChainProgress {
        let mut op = self.head();
        loop {
            let status = op.status();
            let Some(result) = status.result() else {
                return ChainProgress::Running;
            };
            // An undecodable condition ends the chain with ERROR_CONDITION
            // on that same operation.
            let Ok(condition) = op.condition() else {
                return ChainProgress::Finished(status);
            };
            let hops = match condition.continuation(result) {
                Continuation::Stop => return ChainProgress::Finished(status),
                Continuation::Next => 1,
                // The RF core restarts the same operation.
                Continuation::Skip(0) => return ChainProgress::Running,
                Continuation::Skip(n) => n,
            };
            match advance(op, hops) {
                Some(next) => op = next,
                None => return ChainProgress::Finished(status),
            }
        }
    }
}

fn advance(op: &RadioOp, hops: u8) -> Option<&RadioOp> {
    let mut cursor = op;
    for _ in 0..hops {
        cursor = unsafe { cursor.next_op()?.as_ref() };
    }
    Some(cursor)
}

impl Drop for CommandChain<'_> {
    fn drop(&mut self) {
        let mut cursor = Some(self.head);
        while let Some(mut op) = cursor {
            let op = unsafe { op.as_mut() };
            cursor = op.next_op();
            op.set_next_op(None);
        }
    }
}

/// Iterator over the operations of a [`CommandChain`].
pub struct ChainIter<'c> {
    next: Option<NonNull<RadioOp>>,
    _chain: PhantomData<&'c RadioOp>,
}

impl<'c> Iterator for ChainIter<'c> {
    type Item = &'c RadioOp;

    fn next(&mut self) -> Option<&'c RadioOp> {
        let op: &'c RadioOp = unsafe { self.next?.as_ref() };
        self.next = op.next_op();
        Some(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::commands::{
        CmdFs, CmdNop, Condition, ConditionRule, StartTrigger, CMD_FS, CMD_NOP,
    };
    use crate::radio::sim;

    fn tagged(tag: u32) -> CmdNop {
        let mut nop = CmdNop::new();
        nop.op_mut().set_start(tag, StartTrigger::NOW);
        nop
    }

    #[test]
    fn links_follow_push_order() {
        let mut a = CmdNop::new();
        let mut b = CmdFs::new(902, 13107);
        let mut c = CmdNop::new();
        let chain = CommandChain::new(&mut a).then(&mut b).then(&mut c);

        assert_eq!(chain.len(), 3);
        let ids: Vec<u16> = chain.iter().map(|op| op.command_no()).collect();
        assert_eq!(ids, [CMD_NOP, CMD_FS, CMD_NOP]);
    }

    #[test]
    fn rf_core_visits_a_b_c_then_stops() {
        let mut a = tagged(1);
        let mut b = tagged(2);
        let mut c = tagged(3);
        let chain = CommandChain::new(&mut a).then(&mut b).then(&mut c);

        let visited = sim::run_chain(chain.head(), |_| RadioOpStatus::DONE_OK);
        assert_eq!(visited, [1, 2, 3]);
        assert_eq!(
            chain.progress(),
            ChainProgress::Finished(RadioOpStatus::DONE_OK)
        );
    }

    #[test]
    fn progress_waits_for_every_reached_operation() {
        let mut a = tagged(1);
        let mut b = tagged(2);
        let chain = CommandChain::new(&mut a).then(&mut b);
        chain.reset_status();
        assert_eq!(chain.progress(), ChainProgress::Running);

        chain.head().set_status(RadioOpStatus::DONE_OK);
        assert_eq!(chain.progress(), ChainProgress::Running);

        let second = chain.iter().nth(1).unwrap();
        second.set_status(RadioOpStatus::ACTIVE);
        assert_eq!(chain.progress(), ChainProgress::Running);

        second.set_status(RadioOpStatus::DONE_TIMEOUT);
        assert_eq!(
            chain.progress(),
            ChainProgress::Finished(RadioOpStatus::DONE_TIMEOUT)
        );
    }

    #[test]
    fn error_stops_the_chain_early() {
        let mut a = tagged(1);
        let mut b = tagged(2);
        let mut c = tagged(3);
        let chain = CommandChain::new(&mut a).then(&mut b).then(&mut c);

        let visited = sim::run_chain(chain.head(), |op| {
            if op.start_time() == 2 {
                RadioOpStatus::ERROR_NO_SETUP
            } else {
                RadioOpStatus::DONE_OK
            }
        });
        assert_eq!(visited, [1, 2]);
        assert_eq!(
            chain.progress(),
            ChainProgress::Finished(RadioOpStatus::ERROR_NO_SETUP)
        );
    }

    #[test]
    fn skip_on_false_jumps_ahead() {
        let mut a = tagged(1);
        a.op_mut().set_condition(Condition {
            rule: ConditionRule::SkipOnFalse,
            skip: 2,
        });
        let mut b = tagged(2);
        let mut c = tagged(3);
        let chain = CommandChain::new(&mut a).then(&mut b).then(&mut c);

        let visited = sim::run_chain(chain.head(), |op| {
            if op.start_time() == 1 {
                RadioOpStatus::DONE_TIMEOUT
            } else {
                RadioOpStatus::DONE_OK
            }
        });
        assert_eq!(visited, [1, 3]);
        assert_eq!(
            chain.progress(),
            ChainProgress::Finished(RadioOpStatus::DONE_OK)
        );
    }

    #[test]
    fn never_condition_ends_after_first() {
        let mut a = tagged(1);
        a.op_mut().set_condition(Condition::NEVER);
        let mut b = tagged(2);
        let chain = CommandChain::new(&mut a).then(&mut b);

        let visited = sim::run_chain(chain.head(), |_| RadioOpStatus::DONE_OK);
        assert_eq!(visited, [1]);
        assert_eq!(
            chain.progress(),
            ChainProgress::Finished(RadioOpStatus::DONE_OK)
        );
    }

    #[test]
    fn dropping_the_chain_unlinks() {
        let mut a = tagged(1);
        let mut b = tagged(2);
        {
            let chain = CommandChain::new(&mut a).then(&mut b);
            assert!(chain.head().next_op().is_some());
        }
        assert!(a.op().next_op().is_none());
        assert!(b.op().next_op().is_none());
    }
}
