//! Entity services.
//!
//! Services own an [`IndexedStore`] and the [`IdGenerator`] for one entity
//! kind. They are the only layer that turns store-level failures into the
//! caller-facing vocabulary of [`Error`]:
//!
//! | store / parser failure            | surfaced as                   |
//! |-----------------------------------|-------------------------------|
//! | malformed identifier              | `Error::EntityNotFound`       |
//! | `IndexOutOfRange`, `SlotEmpty`    | `Error::EntityNotFound`       |
//! | `IndexOccupied`                   | `Error::DuplicateIdentifier`  |
//! | `EmptyStore`                      | `Error::EmptyStore`           |
//! | `InvalidArgument`                 | `Error::InvalidArgument`      |

pub mod project;
pub mod report;
pub mod session;
pub mod task;
pub mod user;

pub use project::ProjectService;
pub use report::{ProjectStatus, overall_completion, status_report};
pub use session::Session;
pub use task::TaskService;
pub use user::UserService;

use crate::domain::{EntityId, EntityKind, Record};
use crate::error::{Error, Result};
use crate::id_generation::IdGenerator;
use crate::storage::{IndexedStore, StoreError};
use tracing::debug;

/// Translate a store failure for `id` into the caller-facing error.
pub(crate) fn translate(kind: EntityKind, id: &str, err: StoreError) -> Error {
    debug!(kind = kind.name(), id, error = %err, "Translating store error");
    match err {
        StoreError::IndexOutOfRange { .. } | StoreError::SlotEmpty(_) => Error::EntityNotFound {
            kind: kind.name(),
            id: id.to_string(),
        },
        StoreError::IndexOccupied(_) => Error::DuplicateIdentifier {
            kind: kind.name(),
            id: EntityId::new(id),
        },
        StoreError::EmptyStore => Error::EmptyStore(kind.name()),
        StoreError::InvalidArgument(reason) => Error::InvalidArgument {
            field: "filter",
            reason,
        },
    }
}

/// Store plus identifier generator for one entity kind.
///
/// Holds the operations every service shares: issuing an identifier exactly
/// once at creation, resolving caller-supplied identifiers to slots, and
/// whole-record replacement.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    store: IndexedStore<T>,
    ids: IdGenerator,
}

impl<T: Record + Clone> Catalog<T> {
    /// Create a catalog for `kind` with `capacity` initial slots.
    ///
    /// A capacity of zero falls back to the kind's default.
    pub fn new(kind: EntityKind, capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            kind.default_capacity()
        } else {
            capacity
        };
        Self {
            store: IndexedStore::with_capacity(capacity),
            ids: IdGenerator::new(kind),
        }
    }

    /// The entity kind held here
    pub fn kind(&self) -> EntityKind {
        self.ids.kind()
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &IndexedStore<T> {
        &self.store
    }

    /// Generate an identifier, build the record with it and store it.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateIdentifier` if the derived slot is already
    /// taken (only possible when a caller seeded that slot by hand).
    pub fn insert_with<F>(&mut self, build: F) -> Result<T>
    where
        F: FnOnce(EntityId) -> T,
    {
        let id = self.ids.generate();
        let index = self.ids.parse_index(id.as_str())?;

        let record = build(id.clone());
        self.store
            .add(record.clone(), index)
            .map_err(|e| translate(self.kind(), id.as_str(), e))?;
        Ok(record)
    }

    /// Place a fully formed record at the slot its identifier encodes.
    ///
    /// This bypasses the generator; later generated identifiers that land on
    /// the same slot will fail with `DuplicateIdentifier`.
    ///
    /// # Errors
    ///
    /// - `Error::MalformedIdentifier` if the record's identifier does not parse
    /// - `Error::DuplicateIdentifier` if the slot is taken
    pub fn seed(&mut self, record: T) -> Result<()> {
        let id = record.id().clone();
        let index = self.ids.parse_index(id.as_str())?;
        self.store
            .add(record, index)
            .map_err(|e| translate(self.kind(), id.as_str(), e))
    }

    /// Resolve `id` to the slot index of an existing record.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the identifier is malformed or no
    /// record lives at its slot.
    pub fn index_of(&self, id: &str) -> Result<usize> {
        let index = self.ids.parse_index(id).map_err(|e| {
            debug!(kind = self.kind().name(), id, error = %e, "Rejected identifier");
            Error::EntityNotFound {
                kind: self.kind().name(),
                id: id.to_string(),
            }
        })?;
        self.store
            .get(index)
            .map_err(|e| translate(self.kind(), id, e))?;
        Ok(index)
    }

    /// Look up a record by identifier.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` as for [`index_of`](Self::index_of).
    pub fn get(&self, id: &str) -> Result<&T> {
        let index = self.index_of(id)?;
        self.store
            .get(index)
            .map_err(|e| translate(self.kind(), id, e))
    }

    /// All records, ascending by slot. Empty when nothing is stored.
    pub fn all(&self) -> Vec<&T> {
        self.store.get_all()
    }

    /// All records, failing when there is nothing to show.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyStore` if no record is stored.
    pub fn require_all(&self) -> Result<Vec<&T>> {
        self.store
            .require_all()
            .map_err(|e| translate(self.kind(), "", e))
    }

    /// Number of stored records
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Fetch a copy of the record, apply `mutate`, and write it back whole.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the record does not exist, or any
    /// error returned by `mutate` (in which case nothing is written).
    pub fn modify<F>(&mut self, id: &str, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let index = self.index_of(id)?;
        let mut updated = self.get(id)?.clone();
        mutate(&mut updated)?;
        self.store.update(index, updated.clone());
        Ok(updated)
    }

    /// Remove the record with identifier `id` and return it.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if it does not exist; nothing else in
    /// the store is touched.
    pub fn delete(&mut self, id: &str) -> Result<T> {
        let index = self.index_of(id)?;
        self.store
            .remove(index)
            .map_err(|e| translate(self.kind(), id, e))
    }
}
