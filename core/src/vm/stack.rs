use alloc::collections::TryReserveError;
use core::fmt;

use crate::Vec;

/// A value stack preallocated to a fixed maximum size.
///
/// The compiler computes the exact depth a program needs, so the VM allocates
/// once and never grows. Bounds are only checked by `debug_assert!`; an
/// out-of-range access in release builds still panics on the slice index
/// rather than reading past the allocation.
pub struct Stack<T> {
    /// Fixed-length storage; only `items[..len]` is live.
    items: Vec<T>,
    len: usize,
}

impl<T: Copy + Default> Stack<T> {
    /// Creates a stack holding at most `max_size` values.
    ///
    /// Fails instead of aborting when the allocation cannot be made.
    pub fn try_new(max_size: usize) -> Result<Self, TryReserveError> {
        let mut items = Vec::new();
        items.try_reserve_exact(max_size)?;
        items.resize(max_size, T::default());
        Ok(Self { items, len: 0 })
    }

    /// Pushes a value onto the stack.
    ///
    /// # Panics
    ///
    /// Panics if the stack is already at maximum capacity.
    #[inline]
    pub fn push(&mut self, value: T) {
        debug_assert!(
            self.len < self.items.len(),
            "Stack overflow: attempted to push beyond maximum size of {}",
            self.items.len()
        );
        self.items[self.len] = value;
        self.len += 1;
    }

    /// Removes and returns the top value.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> T {
        debug_assert!(self.len > 0, "Stack underflow");
        self.len -= 1;
        self.items[self.len]
    }

    /// Returns a mutable reference to the top value without removing it.
    #[inline]
    pub fn peek_mut(&mut self) -> &mut T {
        debug_assert!(self.len > 0, "Stack underflow");
        &mut self.items[self.len - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the maximum number of values the stack can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("items", &&self.items[..self.len])
            .field("len", &self.len)
            .field("capacity", &self.items.len())
            .finish()
    }
}
