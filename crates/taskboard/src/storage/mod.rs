//! Indexed slot storage for entities.
//!
//! [`IndexedStore`] is a growable array of slots addressed by the numeric part
//! of an entity's identifier. Each slot holds zero or one record.
//!
//! # Growth
//!
//! When an operation addresses an index at or past the current length, the
//! backing array is reallocated by repeated doubling (starting from at least
//! one slot) until the index fits. Existing records keep their positions.
//!
//! # Deletion
//!
//! Removing a record vacates its slot; nothing is shifted. Every other
//! record stays at the index its identifier encodes.
//!
//! # Example
//!
//! ```
//! use taskboard::domain::{EntityId, Record};
//! use taskboard::storage::IndexedStore;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Note {
//!     id: EntityId,
//! }
//!
//! impl Record for Note {
//!     fn id(&self) -> &EntityId {
//!         &self.id
//!     }
//! }
//!
//! let mut store = IndexedStore::with_capacity(2);
//! store.add(Note { id: EntityId::new("N0005") }, 5).unwrap();
//!
//! assert_eq!(store.capacity(), 8);
//! assert_eq!(store.get(5).unwrap().id.as_str(), "N0005");
//! ```

pub mod queries;

use crate::domain::Record;
use thiserror::Error;
use tracing::{debug, trace};

pub use queries::{ProjectQueries, TaskQueries, UserQueries};

/// Low-level failures raised by [`IndexedStore`].
///
/// These are translated into [`crate::error::Error`] by the services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The record (or filter input) was empty or otherwise unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Index is outside the backing array
    #[error("Index {index} out of range (capacity {capacity})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current capacity
        capacity: usize,
    },

    /// The slot exists but holds no record
    #[error("Slot {0} is empty")]
    SlotEmpty(usize),

    /// The slot already holds a record
    #[error("Slot {0} is already occupied")]
    IndexOccupied(usize),

    /// No slot is occupied
    #[error("Store is empty")]
    EmptyStore,
}

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Growable array of entity slots keyed by index.
#[derive(Debug, Clone)]
pub struct IndexedStore<T> {
    slots: Vec<Option<T>>,
}

impl<T> IndexedStore<T> {
    /// Create a store with `capacity` empty slots
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    /// Current number of slots (occupied or not)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Whether `index` holds a record
    pub fn is_occupied(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// Get the record at `index`.
    ///
    /// # Errors
    ///
    /// - `StoreError::IndexOutOfRange` if `index >= capacity`
    /// - `StoreError::SlotEmpty` if the slot holds nothing
    pub fn get(&self, index: usize) -> StoreResult<&T> {
        match self.slots.get(index) {
            None => Err(StoreError::IndexOutOfRange {
                index,
                capacity: self.slots.len(),
            }),
            Some(None) => Err(StoreError::SlotEmpty(index)),
            Some(Some(item)) => Ok(item),
        }
    }

    /// Mutable access to the record at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_mut(&mut self, index: usize) -> StoreResult<&mut T> {
        let capacity = self.slots.len();
        match self.slots.get_mut(index) {
            None => Err(StoreError::IndexOutOfRange { index, capacity }),
            Some(None) => Err(StoreError::SlotEmpty(index)),
            Some(Some(item)) => Ok(item),
        }
    }

    /// All occupied records in ascending slot order.
    ///
    /// Returns an empty vector when nothing is stored; use
    /// [`require_all`](Self::require_all) where an empty store is an error.
    pub fn get_all(&self) -> Vec<&T> {
        self.slots.iter().flatten().collect()
    }

    /// Like [`get_all`](Self::get_all) but fails on an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyStore` if no slot is occupied.
    pub fn require_all(&self) -> StoreResult<Vec<&T>> {
        let all = self.get_all();
        if all.is_empty() {
            return Err(StoreError::EmptyStore);
        }
        Ok(all)
    }

    /// Iterate over `(index, record)` pairs of occupied slots
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (index, item)))
    }

    /// Occupied records matching `predicate`, in ascending slot order
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.slots
            .iter()
            .flatten()
            .filter(|item| predicate(*item))
            .collect()
    }

    /// Overwrite the slot at `index`, growing the array if needed.
    ///
    /// Unlike [`add`](Self::add) this does not check whether the slot is
    /// occupied. Returns the record previously stored there, if any.
    pub fn update(&mut self, index: usize, item: T) -> Option<T> {
        self.ensure_capacity(index);
        self.slots[index].replace(item)
    }

    /// Vacate the slot at `index` and return the record it held.
    ///
    /// # Errors
    ///
    /// - `StoreError::IndexOutOfRange` if `index >= capacity`
    /// - `StoreError::SlotEmpty` if the slot was already vacant
    pub fn remove(&mut self, index: usize) -> StoreResult<T> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, capacity })?;
        let item = slot.take().ok_or(StoreError::SlotEmpty(index))?;
        trace!(index, "Vacated slot");
        Ok(item)
    }

    /// Grow the backing array until `index` is addressable.
    ///
    /// Length doubles (from a base of at least one) until it exceeds `index`.
    fn ensure_capacity(&mut self, index: usize) {
        let old_len = self.slots.len();
        if index < old_len {
            return;
        }

        let mut new_len = old_len.max(1);
        while new_len <= index {
            new_len *= 2;
        }

        self.slots.resize_with(new_len, || None);
        debug!(index, old_len, new_len, "Grew slot array");
    }
}

impl<T: Record> IndexedStore<T> {
    /// Place `item` in the empty slot at `index`, growing the array if needed.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidArgument` if the record's identifier is blank
    /// - `StoreError::IndexOccupied` if the slot already holds a record
    pub fn add(&mut self, item: T, index: usize) -> StoreResult<()> {
        if item.id().is_blank() {
            return Err(StoreError::InvalidArgument(
                "record has no identifier".to_string(),
            ));
        }
        if self.is_occupied(index) {
            return Err(StoreError::IndexOccupied(index));
        }

        self.ensure_capacity(index);
        trace!(index, id = %item.id(), "Stored record");
        self.slots[index] = Some(item);
        Ok(())
    }
}

impl<T> Default for IndexedStore<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
