use crate::{
    constants::HEADER_POOL_CAPACITY,
    header::{RequestHeader, ResponseHeader},
};
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

/// Clears every field back to its zero value.
pub trait Reset {
    fn reset(&mut self);
}

/// Idle request headers shared across all codecs in the process.
pub static REQUEST_POOL: HeaderPool<RequestHeader> = HeaderPool::new(HEADER_POOL_CAPACITY);

/// Idle response headers shared across all codecs in the process.
pub static RESPONSE_POOL: HeaderPool<ResponseHeader> = HeaderPool::new(HEADER_POOL_CAPACITY);

/// A bounded free-list of reusable headers.
///
/// Reuse only saves the `String` allocation inside a header. Headers are
/// always reset before they re-enter the list, so a pooled header is
/// indistinguishable from `T::default()`.
pub struct HeaderPool<T> {
    free: Mutex<Vec<T>>,
    capacity: usize,
}

impl<T: Default + Reset> HeaderPool<T> {
    pub const fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Takes an idle header, or a fresh one when the list is empty.
    pub fn get(&self) -> T {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default()
    }

    /// Resets `header` and returns it to the list, dropping it when full.
    pub fn put(&self, mut header: T) {
        header.reset();

        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < self.capacity {
            free.push(header);
        }
    }

    /// Borrows a header that goes back to the pool when dropped.
    pub fn acquire(&self) -> PooledHeader<'_, T> {
        PooledHeader {
            pool: self,
            header: self.get(),
        }
    }

    /// Number of idle headers currently held.
    pub fn idle(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// A header on loan from a [`HeaderPool`].
pub struct PooledHeader<'a, T: Default + Reset> {
    pool: &'a HeaderPool<T>,
    header: T,
}

impl<T: Default + Reset> Deref for PooledHeader<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.header
    }
}

impl<T: Default + Reset> DerefMut for PooledHeader<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.header
    }
}

impl<T: Default + Reset> Drop for PooledHeader<'_, T> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.header));
    }
}
