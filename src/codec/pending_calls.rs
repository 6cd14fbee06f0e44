use crate::codec::CodecError;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outstanding calls keyed by sequence id.
///
/// This is the only state shared between request writers and the response
/// reader. The lock is held for the table operation alone, never across I/O.
#[derive(Debug, Default)]
pub struct PendingCalls {
    calls: Mutex<HashMap<u64, String>>,
}

impl PendingCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `method` under `sequence_id`.
    ///
    /// Fails with [`CodecError::SequenceInUse`] while an earlier call with
    /// the same id is still pending.
    pub fn register(&self, sequence_id: u64, method: &str) -> Result<(), CodecError> {
        match self.lock().entry(sequence_id) {
            Entry::Occupied(_) => Err(CodecError::SequenceInUse(sequence_id)),
            Entry::Vacant(slot) => {
                slot.insert(method.to_owned());
                Ok(())
            }
        }
    }

    /// Registers `method` like [`register`](Self::register), returning a
    /// guard that removes the entry again unless it is committed.
    ///
    /// Writers hold the guard across the send so that an error, or a
    /// dropped future, cannot leave an orphaned entry behind.
    pub fn reserve(&self, sequence_id: u64, method: &str) -> Result<Reservation<'_>, CodecError> {
        self.register(sequence_id, method)?;

        Ok(Reservation {
            pending: self,
            sequence_id,
            committed: false,
        })
    }

    /// Removes the entry for `sequence_id` and returns its method.
    pub fn resolve(&self, sequence_id: u64) -> Option<String> {
        self.lock().remove(&sequence_id)
    }

    /// Drops the entry of a call that never made it onto the wire.
    pub fn cancel(&self, sequence_id: u64) -> bool {
        self.lock().remove(&sequence_id).is_some()
    }

    pub fn contains(&self, sequence_id: u64) -> bool {
        self.lock().contains_key(&sequence_id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Every operation leaves the map consistent, so a poisoned lock is safe
    // to keep using.
    fn lock(&self) -> MutexGuard<'_, HashMap<u64, String>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A pending entry whose request has not been fully written yet.
#[derive(Debug)]
#[must_use = "dropping a reservation deregisters the call"]
pub struct Reservation<'a> {
    pending: &'a PendingCalls,
    sequence_id: u64,
    committed: bool,
}

impl Reservation<'_> {
    pub fn sequence_id(&self) -> u64 {
        self.sequence_id
    }

    /// Keeps the entry; the request is on the wire.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if !self.committed && self.pending.cancel(self.sequence_id) {
            tracing::debug!(sequence_id = self.sequence_id, "released pending call");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_removes_entry() {
        let pending = PendingCalls::new();
        pending.register(7, "Add").unwrap();

        assert_eq!(pending.resolve(7).as_deref(), Some("Add"));
        assert_eq!(pending.resolve(7), None);
        assert!(pending.is_empty());
    }

    #[test]
    fn live_sequence_id_cannot_be_reused() {
        let pending = PendingCalls::new();
        pending.register(1, "Add").unwrap();

        assert!(matches!(
            pending.register(1, "Mul"),
            Err(CodecError::SequenceInUse(1))
        ));
        assert_eq!(pending.resolve(1).as_deref(), Some("Add"));

        // Free again once resolved.
        pending.register(1, "Mul").unwrap();
        assert!(pending.contains(1));
    }

    #[test]
    fn cancel_reports_whether_entry_existed() {
        let pending = PendingCalls::new();
        pending.register(3, "Div").unwrap();

        assert!(pending.cancel(3));
        assert!(!pending.cancel(3));
        assert_eq!(pending.len(), 0);
    }

    #[test]
    fn dropped_reservation_releases_entry() {
        let pending = PendingCalls::new();

        {
            let reservation = pending.reserve(4, "Add").unwrap();
            assert_eq!(reservation.sequence_id(), 4);
            assert!(pending.contains(4));
        }

        assert!(!pending.contains(4));
    }

    #[test]
    fn committed_reservation_keeps_entry() {
        let pending = PendingCalls::new();

        pending.reserve(4, "Add").unwrap().commit();

        assert_eq!(pending.resolve(4).as_deref(), Some("Add"));
    }
}
