use std::sync::Arc;

use models::{Record, Thing, ThingField};
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::EntityStore;

/// Thing operations: clean and validate input, then hit the store.
#[derive(Clone)]
pub struct ThingService {
    store: Arc<EntityStore<Thing>>,
}

impl ThingService {
    pub fn new(store: Arc<EntityStore<Thing>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<EntityStore<Thing>> {
        &self.store
    }

    /// Live things ordered by ID.
    pub fn list_alive(&self) -> Vec<Thing> {
        self.store.get_all_alive()
    }

    /// Every thing, soft deleted ones included, ordered by ID.
    pub fn list_all(&self) -> Vec<Thing> {
        sorted_by_id(self.store.get_all().into_values().collect())
    }

    pub fn get(&self, id: &str) -> Option<Thing> {
        self.store.get(id)
    }

    pub fn create(&self, mut input: Thing) -> Result<Thing, ServiceError> {
        input.clean();
        ServiceError::check(input.validate(true))?;
        let created = self.store.add(input)?;
        info!(id = %created.id, "thing created");
        Ok(created)
    }

    /// Replace the thing at `id` wholesale.
    ///
    /// A body without an ID takes the one from the path; a body naming a
    /// different ID is rejected.
    pub fn replace(&self, id: &str, mut input: Thing) -> Result<Thing, ServiceError> {
        if input.id.trim().is_empty() {
            input.id = id.to_string();
        }
        if input.self_link.trim().is_empty() {
            input.self_link = format!("/things/{id}");
        }
        input.clean();
        let mut violations = input.validate(false);
        if input.id != id {
            violations.push("The 'ID' must match the requested resource.".into());
        }
        ServiceError::check(violations)?;

        if !self.store.update(input.clone()) {
            return Err(ServiceError::not_found("thing", id));
        }
        info!(%id, "thing replaced");
        Ok(input)
    }

    /// Soft delete; the thing stays readable through [`Self::list_all`].
    pub fn soft_delete(&self, id: &str) -> Result<Thing, ServiceError> {
        let fields: [ThingField; 1] = [Thing::alive_field()];
        match self.store.bulk_update_fields([id], &fields, &Thing::alive_values(false)).pop() {
            Some(thing) => {
                info!(%id, "thing soft deleted");
                Ok(thing)
            }
            None => Err(ServiceError::not_found("thing", id)),
        }
    }
}

pub(crate) fn sorted_by_id<R: Record>(mut records: Vec<R>) -> Vec<R> {
    records.sort_by_key(|r| r.id().parse::<u64>().unwrap_or(u64::MAX));
    records
}
