//! Backing store for records
//!
//! Exporting and importing never touch the store: load a record before exporting it, and save it
//! after importing into it.

use crate::{
	Error,
	Result,
	Storable,
};
use std::collections::BTreeMap;

/// Loads, saves and removes records of a single kind by id.
pub trait Store<R: Storable> {
	/// Load record with the given id
	fn load(&self, id: u64) -> Result<Option<R>>;

	/// Save a record; records without id get a new one assigned.
	///
	/// Returns the id of the record.
	fn save(&mut self, record: &mut R) -> Result<u64>;

	/// Remove a record from the store; returns whether it existed.
	///
	/// Unless `no_cleanup` is set the id of the instance is reset, so it doesn't count as stored
	/// anymore.
	fn remove(&mut self, record: &mut R, no_cleanup: bool) -> Result<bool>;
}

/// Store keeping records in memory
#[derive(Clone, Debug)]
pub struct MemoryStore<R> {
	records: BTreeMap<u64, R>,
	next_id: u64,
}

impl<R> Default for MemoryStore<R> {
	fn default() -> Self {
		Self {
			records: BTreeMap::new(),
			next_id: 1,
		}
	}
}

impl<R> MemoryStore<R> {
	/// Empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored records
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether the store is empty
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl<R: Storable + Clone> Store<R> for MemoryStore<R> {
	fn load(&self, id: u64) -> Result<Option<R>> {
		Ok(self.records.get(&id).cloned())
	}

	fn save(&mut self, record: &mut R) -> Result<u64> {
		if record.kind().is_empty() {
			return Err(Error::MissingKind);
		}
		let mut id = record.id();
		if id == 0 {
			id = self.next_id;
			record.set_id(id);
		}
		self.next_id = self.next_id.max(id.saturating_add(1));
		self.records.insert(id, record.clone());
		Ok(id)
	}

	fn remove(&mut self, record: &mut R, no_cleanup: bool) -> Result<bool> {
		let existed = self.records.remove(&record.id()).is_some();
		if !no_cleanup {
			record.set_id(0);
		}
		Ok(existed)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::test_struct::*;

	#[test]
	fn lifecycle() {
		let mut store = MemoryStore::new();
		let mut s = Snippet::stored(0);
		assert_eq!(store.save(&mut s).unwrap(), 1);
		assert!(s.is_persisted());
		let mut other = Snippet::stored(10);
		assert_eq!(store.save(&mut other).unwrap(), 10);
		let mut third = Snippet::stored(0);
		assert_eq!(store.save(&mut third).unwrap(), 11);

		assert_eq!(store.load(1).unwrap(), Some(s.clone()));
		assert!(store.remove(&mut s, false).unwrap());
		assert!(!s.is_persisted());
		assert_eq!(store.load(1).unwrap(), None);
		assert!(store.remove(&mut other, true).unwrap());
		assert_eq!(other.id, 10);
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn needs_kind() {
		let mut store = MemoryStore::new();
		let mut s = Snippet::stored(0);
		s.kind.clear();
		assert!(matches!(store.save(&mut s), Err(Error::MissingKind)));
		assert!(store.is_empty());
	}
}
