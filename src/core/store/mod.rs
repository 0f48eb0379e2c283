mod department;
mod employee;
mod error;

use tracing::{debug, warn};
use uuid::Uuid;

pub use department::{DEPARTMENT_NAMES, Department, is_known_department_name};
pub use employee::Employee;
pub use error::Rejection;

/// Smallest id handed out by [`generate_unique_id`].
pub const MIN_GENERATED_ID: i64 = 1000;
/// Largest id handed out by [`generate_unique_id`].
pub const MAX_GENERATED_ID: i64 = 9999;

/// A value that can live in a [`Store`].
pub trait Record: Clone + std::fmt::Debug {
    /// Short label used in log events.
    const KIND: &'static str;

    fn id(&self) -> i64;
    fn is_valid(&self) -> bool;
}

/// Ordered in-memory collection of records with unique ids.
///
/// Insertion order is kept so the table view renders deterministically.
#[derive(Debug, Clone)]
pub struct Store<R: Record> {
    records: Vec<R>,
}

pub type DepartmentStore = Store<Department>;
pub type EmployeeStore = Store<Employee>;

impl<R: Record> Default for Store<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> Store<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, candidate: R) -> Result<(), Rejection> {
        if !candidate.is_valid() {
            warn!(kind = R::KIND, id = candidate.id(), "rejected invalid record");
            return Err(Rejection::InvalidFields);
        }
        if self.contains(candidate.id()) {
            warn!(kind = R::KIND, id = candidate.id(), "rejected duplicate id");
            return Err(Rejection::DuplicateId(candidate.id()));
        }
        debug!(kind = R::KIND, id = candidate.id(), "record added");
        self.records.push(candidate);
        Ok(())
    }

    /// Removes every record with `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: i64) {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        debug!(
            kind = R::KIND,
            id,
            removed = before - self.records.len(),
            "remove"
        );
    }

    /// Overwrites the record currently stored under `old_id` with
    /// `candidate`, keeping its position. Returns the id the record now has.
    pub fn update(&mut self, old_id: i64, candidate: R) -> Result<i64, Rejection> {
        if !candidate.is_valid() {
            warn!(kind = R::KIND, old_id, "rejected invalid update");
            return Err(Rejection::InvalidFields);
        }
        let new_id = candidate.id();
        if new_id != old_id && self.contains(new_id) {
            warn!(kind = R::KIND, old_id, new_id, "rejected update onto existing id");
            return Err(Rejection::DuplicateId(new_id));
        }
        let Some(existing) = self.records.iter_mut().find(|record| record.id() == old_id) else {
            warn!(kind = R::KIND, old_id, "update target missing");
            return Err(Rejection::NotFound(old_id));
        };
        *existing = candidate;
        debug!(kind = R::KIND, old_id, new_id, "record updated");
        Ok(new_id)
    }

    pub fn find_all(&self) -> &[R] {
        &self.records
    }

    pub fn find(&self, id: i64) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rolls [`generate_unique_id`] until it lands on an id this store does
    /// not hold yet, giving up after `max_attempts` collisions.
    pub fn generate_free_id(&self, max_attempts: usize) -> Option<i64> {
        (0..max_attempts)
            .map(|_| generate_unique_id())
            .find(|id| !self.contains(*id))
    }
}

/// Random four digit id. Collisions are possible; `add`/`update` decide.
pub fn generate_unique_id() -> i64 {
    let span = (MAX_GENERATED_ID - MIN_GENERATED_ID + 1) as u128;
    MIN_GENERATED_ID + (Uuid::new_v4().as_u128() % span) as i64
}
