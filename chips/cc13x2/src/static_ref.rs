// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Wrapper type for safe pointers to static memory.

use core::ops::Deref;
use core::ptr::NonNull;

/// A pointer to statically allocated mutable data such as memory mapped I/O
/// registers.
///
/// This is a simple wrapper around a raw pointer that encapsulates an unsafe
/// dereference in a safe manner. It serve the role of creating a `&'static T`
/// given a raw address and acts similarly to `extern` definitions, except
/// `StaticRef` is subject to module and crate boundaries, while `extern`
/// definitions can be imported anywhere.
#[derive(Debug)]
pub struct StaticRef<T> {
    ptr: NonNull<T>,
}

impl<T> StaticRef<T> {
    /// Create a new `StaticRef` from a raw pointer
    ///
    /// ## Safety
    ///
    /// Callers must pass in a reference to statically allocated memory which
    /// does not overlap with other values.
    pub const unsafe fn new(ptr: *const T) -> StaticRef<T> {
        StaticRef {
            ptr: NonNull::new_unchecked(ptr.cast_mut()),
        }
    }
}

impl<T> Clone for StaticRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StaticRef<T> {}

impl<T> Deref for StaticRef<T> {
    type Target = T;
    fn deref(&self) -> &T {
        unsafe { self.ptr.as_ref() }
    }
}

/// A zeroed register block on the heap, standing in for a peripheral.
///
/// Read-only registers can only be set through [`TestRegisters::poke`],
/// which writes through the raw allocation and never through a `&T`.
#[cfg(test)]
pub(crate) struct TestRegisters<T> {
    ptr: NonNull<T>,
}

#[cfg(test)]
impl<T> TestRegisters<T> {
    /// `T` must be a register block, for which all zeroes is a valid value.
    pub(crate) fn zeroed() -> TestRegisters<T> {
        let block: Box<T> = Box::new(unsafe { core::mem::zeroed() });
        TestRegisters {
            ptr: unsafe { NonNull::new_unchecked(Box::into_raw(block)) },
        }
    }

    pub(crate) fn base(&self) -> StaticRef<T> {
        unsafe { StaticRef::new(self.ptr.as_ptr()) }
    }

    /// Writes the word at the register picked by `field`, as the hardware
    /// would.
    pub(crate) fn poke<R>(&self, field: impl FnOnce(*mut T) -> *mut R, value: u32) {
        let word = field(self.ptr.as_ptr()).cast::<u32>();
        unsafe { core::ptr::write_volatile(word, value) }
    }
}

#[cfg(test)]
impl<T> Deref for TestRegisters<T> {
    type Target = T;
    fn deref(&self) -> &T {
        unsafe { self.ptr.as_ref() }
    }
}

#[cfg(test)]
impl<T> Drop for TestRegisters<T> {
    fn drop(&mut self) {
        drop(unsafe { Box::from_raw(self.ptr.as_ptr()) });
    }
}
