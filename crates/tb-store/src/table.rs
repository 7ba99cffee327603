//! Ordered entity table

use tb_core::traits::{Entity, Id};

/// Rows of one entity type, kept in insertion order
#[derive(Debug, Clone)]
pub struct Table<T: Entity> {
    rows: Vec<T>,
}

impl<T: Entity> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Entity> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    /// Owned copy of every row
    pub fn all(&self) -> Vec<T> {
        self.rows.clone()
    }

    pub fn find(&self, id: Id) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: Id) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }

    /// Owned copies of the rows matching `predicate`
    pub fn filter<P>(&self, mut predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.rows.iter().filter(|row| predicate(row)).cloned().collect()
    }

    /// Append a row at the end
    pub fn insert(&mut self, row: T) {
        self.rows.push(row);
    }

    /// Replace the row with the same id in place. Returns false when absent.
    pub fn replace(&mut self, row: T) -> bool {
        match self.position(row.id()) {
            Some(index) => {
                self.rows[index] = row;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Id) -> Option<T> {
        self.position(id).map(|index| self.rows.remove(index))
    }

    /// Largest id in the table, if any
    pub fn max_id(&self) -> Option<Id> {
        self.rows.iter().map(|row| row.id()).max()
    }
}
