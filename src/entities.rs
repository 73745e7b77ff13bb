//! Ordered lists of repeatable form rows (professionals, procedures).
//!
//! Rows are addressed by a UUID assigned when they are created, never by
//! position. A list always holds at least one row.

use tracing::debug;
use uuid::Uuid;

/// A repeatable form row.
pub trait Entity: Clone {
    /// Which field of the row an update targets.
    type Field: Copy + std::fmt::Debug;

    /// A blank row with the given id.
    fn with_id(id: Uuid) -> Self;

    fn id(&self) -> Uuid;

    /// Set one field from user input. Returns `false` if the input was
    /// rejected and the row left unchanged.
    fn set_field(&mut self, field: Self::Field, value: &str) -> bool;

    /// Drafts are rows the user has not filled in; they are never submitted.
    fn is_draft(&self) -> bool;
}

/// Ordered collection of rows with a one-row minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T: Entity> EntityList<T> {
    /// A list holding a single blank row.
    pub fn new() -> Self {
        Self {
            items: vec![T::with_id(Uuid::new_v4())],
        }
    }

    /// Append a blank row and return its id.
    pub fn add(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(T::with_id(id));
        id
    }

    /// Remove the row with `id`.
    ///
    /// Refuses to remove the last remaining row. Returns whether a row was
    /// removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        if self.items.len() <= 1 {
            debug!(%id, "Refusing to remove the last row");
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        before != self.items.len()
    }

    /// Update one field of the row with `id`. No-op if the id is unknown.
    pub fn update(&mut self, id: Uuid, field: T::Field, value: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => item.set_field(field, value),
            None => {
                debug!(%id, ?field, "Update for unknown row ignored");
                false
            }
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a row may be removed right now.
    pub fn can_remove(&self) -> bool {
        self.items.len() > 1
    }

    /// Rows that will be submitted, in order.
    pub fn submittable(&self) -> Vec<T> {
        self.items.iter().filter(|item| !item.is_draft()).cloned().collect()
    }
}

impl<T: Entity> Default for EntityList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a EntityList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
