use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use common::utils::ids::parse_id;
use models::Record;
use once_cell::sync::OnceCell;
use tracing::{debug, error};

use crate::errors::StoreError;

/// Generic in-memory record store keyed by positive integer IDs.
///
/// IDs are strings at the API surface and `u64` keys inside. New records get
/// the smallest positive ID not in use, so gaps are filled before the range
/// is extended. Records are never removed; soft deletion flips `is_alive`
/// through a bulk update.
///
/// Every operation holds the lock for its whole duration, so two concurrent
/// `add` calls can never pick the same ID and readers never observe a bulk
/// update half applied.
pub struct EntityStore<R: Record> {
    inner: RwLock<BTreeMap<u64, R>>,
    seeded: OnceCell<()>,
}

impl<R: Record> Default for EntityStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> EntityStore<R> {
    pub fn new() -> Self {
        Self { inner: RwLock::new(BTreeMap::new()), seeded: OnceCell::new() }
    }

    /// Build a store holding `records` under their existing IDs.
    pub fn from_records<I>(records: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = R>,
    {
        let mut map = BTreeMap::new();
        for record in records {
            let key = parse_id(record.id())
                .ok_or_else(|| StoreError::InvalidId(record.id().to_string()))?;
            match map.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(_) => return Err(StoreError::DuplicateId(key.to_string())),
            }
        }
        Ok(Self { inner: RwLock::new(map), seeded: OnceCell::new() })
    }

    // Every mutation is a single insert or field write, so a panic elsewhere
    // cannot leave the map inconsistent and the poison flag is ignored.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<u64, R>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<u64, R>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every record, soft deleted ones included, keyed by ID.
    pub fn get_all(&self) -> HashMap<String, R> {
        let map = self.read();
        map.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    /// Records with `is_alive == true`, ascending by ID.
    pub fn get_all_alive(&self) -> Vec<R> {
        let map = self.read();
        map.values().filter(|r| r.is_alive()).cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<R> {
        let key = parse_id(id)?;
        let map = self.read();
        map.get(&key).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Store `record` under a freshly allocated ID and return the stored copy.
    ///
    /// Any ID carried by `record` is overwritten.
    pub fn add(&self, mut record: R) -> Result<R, StoreError> {
        let mut map = self.write();
        let key = next_free_id(&map);
        match map.entry(key) {
            Entry::Vacant(slot) => {
                record.assign_id(&key.to_string());
                debug!(id = key, "record added");
                Ok(slot.insert(record).clone())
            }
            Entry::Occupied(_) => {
                error!(id = key, "allocator returned an id already in use");
                Err(StoreError::DuplicateId(key.to_string()))
            }
        }
    }

    /// Replace the stored record with the same ID. Returns `false` and leaves
    /// the store untouched when no such record exists.
    pub fn update(&self, record: R) -> bool {
        let Some(key) = parse_id(record.id()) else {
            return false;
        };
        let mut map = self.write();
        match map.get_mut(&key) {
            Some(slot) => {
                *slot = record;
                debug!(id = key, "record replaced");
                true
            }
            None => false,
        }
    }

    /// Bulk partial update driven by field names, e.g. `["description", "state"]`.
    ///
    /// All names are resolved before the lock is taken; one unknown name
    /// fails the call and nothing is written.
    pub fn bulk_partial_update<I, N>(&self, ids: I, field_names: N, values: &R) -> Result<Vec<R>, StoreError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let mut fields: Vec<R::Field> = Vec::new();
        for name in field_names {
            let field = name.as_ref().trim().parse::<R::Field>()?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        Ok(self.bulk_update_fields(ids, &fields, values))
    }

    /// Copy `fields` from `values` onto every record named in `ids`.
    ///
    /// IDs are processed in the given order inside one critical section.
    /// Unknown IDs are skipped. A repeated ID is applied again and appears
    /// once per occurrence in the result.
    pub fn bulk_update_fields<I>(&self, ids: I, fields: &[R::Field], values: &R) -> Vec<R>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut map = self.write();
        let mut updated = Vec::new();
        for id in ids {
            let Some(key) = parse_id(id.as_ref()) else { continue };
            let Some(record) = map.get_mut(&key) else { continue };
            for field in fields {
                record.apply_field(*field, values);
            }
            updated.push(record.clone());
        }
        debug!(count = updated.len(), fields = ?fields, "bulk update applied");
        updated
    }

    /// Run `seed` the first time it is called on this store; later calls,
    /// from any thread, are no-ops. Returns whether this call ran it.
    pub fn seed_once<F>(&self, seed: F) -> bool
    where
        F: FnOnce(&Self),
    {
        let mut ran = false;
        self.seeded.get_or_init(|| {
            seed(self);
            ran = true;
        });
        ran
    }
}

/// Smallest positive integer absent from the key set.
fn next_free_id<R>(map: &BTreeMap<u64, R>) -> u64 {
    let mut candidate = 1;
    for &key in map.keys() {
        if key != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{ModelError, Venture, VentureField};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn venture(id: &str, text: &str) -> Venture {
        Venture { id: id.into(), description: text.into(), state: text.into(), is_alive: true, ..Venture::default() }
    }

    fn store_with(ids: &[&str]) -> EntityStore<Venture> {
        EntityStore::from_records(ids.iter().map(|id| venture(id, id))).unwrap()
    }

    #[test]
    fn get_all_includes_dead_records() {
        let mut dead = venture("2", "2");
        dead.is_alive = false;
        let store = EntityStore::from_records([venture("1", "1"), dead.clone()]).unwrap();

        let all = store.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all["1"], venture("1", "1"));
        assert_eq!(all["2"], dead);
    }

    #[test]
    fn get_all_on_empty_store_is_empty() {
        let store = EntityStore::<Venture>::new();
        assert!(store.get_all().is_empty());
        assert!(store.get_all_alive().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn get_all_alive_filters_and_sorts() {
        let mut dead = venture("2", "2");
        dead.is_alive = false;
        let store = EntityStore::from_records([venture("3", "3"), dead, venture("1", "1")]).unwrap();

        let alive = store.get_all_alive();
        let ids: Vec<_> = alive.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        for (_, record) in store.get_all() {
            assert_eq!(alive.contains(&record), record.is_alive);
        }
    }

    #[test]
    fn get_finds_existing_and_misses_absent() {
        let store = store_with(&["1", "2"]);
        assert_eq!(store.get("1"), Some(venture("1", "1")));
        assert_eq!(store.get("2"), Some(venture("2", "2")));
        assert_eq!(store.get("3"), None);
        assert_eq!(store.get("01"), None);
        assert_eq!(store.get("abc"), None);
    }

    #[test]
    fn add_assigns_ids_and_returns_stored_copy() {
        let store = EntityStore::new();
        let a = store.add(Venture::new("description", "state")).unwrap();
        let b = store.add(Venture::new("description", "state")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
        assert_eq!(a.description, "description");
        assert_eq!(store.get(&a.id), Some(a));
    }

    #[test]
    fn add_ignores_client_supplied_id() {
        let store = EntityStore::new();
        let mut input = Venture::new("d", "s");
        input.id = "99".into();
        assert_eq!(store.add(input).unwrap().id, "1");
        assert_eq!(store.get("99"), None);
    }

    #[test]
    fn allocation_on_empty_store_is_one() {
        let store = EntityStore::<Venture>::new();
        assert_eq!(store.add(Venture::new("d", "s")).unwrap().id, "1");
    }

    #[test]
    fn allocation_after_one_is_two() {
        let store = store_with(&["1"]);
        assert_eq!(store.add(Venture::new("d", "s")).unwrap().id, "2");
    }

    #[test]
    fn allocation_extends_contiguous_range() {
        let store = store_with(&["1", "2", "3"]);
        assert_eq!(store.add(Venture::new("d", "s")).unwrap().id, "4");
    }

    #[test]
    fn allocation_fills_lowest_gap_first() {
        let store = store_with(&["3"]);
        assert_eq!(store.add(Venture::new("d", "s")).unwrap().id, "1");
        assert_eq!(store.add(Venture::new("d", "s")).unwrap().id, "2");
        assert_eq!(store.add(Venture::new("d", "s")).unwrap().id, "4");

        let store = store_with(&["1", "2", "5"]);
        assert_eq!(store.add(Venture::new("d", "s")).unwrap().id, "3");
    }

    #[test]
    fn from_records_rejects_bad_and_duplicate_ids() {
        assert!(matches!(
            EntityStore::from_records([venture("0", "x")]),
            Err(StoreError::InvalidId(id)) if id == "0"
        ));
        assert!(matches!(
            EntityStore::from_records([venture("1", "a"), venture("1", "b")]),
            Err(StoreError::DuplicateId(id)) if id == "1"
        ));
    }

    #[test]
    fn update_replaces_whole_record() {
        let store = EntityStore::from_records([Venture {
            id: "1".into(),
            description: "original".into(),
            extra: "gone".into(),
            ..Venture::default()
        }])
        .unwrap();

        let replacement = Venture { id: "1".into(), description: "new".into(), ..Venture::default() };
        assert!(store.update(replacement.clone()));
        assert_eq!(store.get("1"), Some(replacement));
    }

    #[test]
    fn update_on_missing_id_is_a_no_op() {
        let store = store_with(&["1"]);
        let before = store.get_all();
        assert!(!store.update(venture("2", "new")));
        assert!(!store.update(venture("", "new")));
        assert_eq!(store.get_all(), before);
    }

    #[test]
    fn bulk_soft_delete_touches_only_targets() {
        let store = store_with(&["1", "2", "3", "4", "5"]);
        let before = store.get_all();

        let out = store
            .bulk_partial_update(["4", "5"], ["is_alive"], &Venture::alive_values(false))
            .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, "4");
        assert_eq!(out[1].id, "5");
        assert!(out.iter().all(|v| !v.is_alive));
        assert_eq!(out[0].description, "4");

        let after = store.get_all();
        for id in ["1", "2", "3"] {
            assert_eq!(after[id], before[id]);
        }
        assert_eq!(store.get_all_alive().len(), 3);
    }

    #[test]
    fn bulk_update_leaves_unnamed_fields_alone() {
        let store = store_with(&["1"]);
        let values = Venture::new("changed", "changed").with_extra("changed");

        let out = store.bulk_partial_update(["1"], ["description"], &values).unwrap();

        assert_eq!(out[0].description, "changed");
        assert_eq!(out[0].state, "1");
        assert_eq!(out[0].extra, "");
        assert_eq!(store.get("1"), Some(out[0].clone()));
    }

    #[test]
    fn bulk_update_skips_unknown_ids() {
        let store = store_with(&["1"]);
        let out = store
            .bulk_partial_update(["999999", "1", "x"], ["state"], &Venture::new("", "done"))
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].state, "done");
    }

    #[test]
    fn bulk_update_keeps_duplicate_targets() {
        let store = store_with(&["1", "2"]);
        let out = store.bulk_partial_update(["1", "2", "1"], ["state"], &Venture::new("", "done")).unwrap();
        let ids: Vec<_> = out.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "1"]);
        assert_eq!(out[0], out[2]);
    }

    #[test]
    fn bulk_update_with_unknown_field_mutates_nothing() {
        let store = store_with(&["1", "2"]);
        let before = store.get_all();

        let err = store
            .bulk_partial_update(["1", "2"], ["state", "colour"], &Venture::new("x", "x"))
            .unwrap_err();

        assert!(matches!(err, StoreError::Model(ModelError::UnknownField(ref f)) if f == "colour"));
        assert_eq!(store.get_all(), before);
    }

    #[test]
    fn typed_bulk_update_can_revive() {
        let mut dead = venture("1", "1");
        dead.is_alive = false;
        let store = EntityStore::from_records([dead]).unwrap();
        let out = store.bulk_update_fields(["1"], &[VentureField::IsAlive], &Venture::alive_values(true));
        assert!(out[0].is_alive);
        assert_eq!(store.get_all_alive().len(), 1);
    }

    #[test]
    fn concurrent_adds_get_distinct_dense_ids() {
        let store = Arc::new(EntityStore::<Venture>::new());
        let threads = 8;
        let per_thread = 50;

        let ids: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    let store = Arc::clone(&store);
                    s.spawn(move || {
                        (0..per_thread)
                            .map(|_| store.add(Venture::new("d", "s")).unwrap().id)
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });

        let unique: HashSet<_> = ids.iter().cloned().collect();
        assert_eq!(unique.len(), threads * per_thread);
        let expected: HashSet<_> = (1..=threads * per_thread).map(|n| n.to_string()).collect();
        assert_eq!(unique, expected);
    }

    #[test]
    fn seed_once_runs_a_single_time_across_threads() {
        let store = Arc::new(EntityStore::<Venture>::new());
        let runs: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = Arc::clone(&store);
                    s.spawn(move || {
                        store.seed_once(|st| {
                            st.add(Venture::new("seed", "seed")).unwrap();
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| usize::from(h.join().unwrap())).sum()
        });
        assert_eq!(runs, 1);
        assert_eq!(store.len(), 1);
    }
}
