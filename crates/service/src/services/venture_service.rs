use std::sync::Arc;

use common::utils::ids::{is_int, parse_id, split_csv};
use models::{parse_fields, Record, Venture, VentureField, VentureModification};
use tracing::info;

use crate::errors::ServiceError;
use crate::services::thing_service::sorted_by_id;
use crate::storage::EntityStore;

#[derive(Clone)]
pub struct VentureService {
    store: Arc<EntityStore<Venture>>,
}

impl VentureService {
    pub fn new(store: Arc<EntityStore<Venture>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<EntityStore<Venture>> {
        &self.store
    }

    pub fn list_alive(&self) -> Vec<Venture> {
        self.store.get_all_alive()
    }

    pub fn list_all(&self) -> Vec<Venture> {
        sorted_by_id(self.store.get_all().into_values().collect())
    }

    pub fn get(&self, id: &str) -> Option<Venture> {
        self.store.get(id)
    }

    pub fn create(&self, mut input: Venture) -> Result<Venture, ServiceError> {
        input.clean();
        ServiceError::check(input.validate(true))?;
        let created = self.store.add(input)?;
        info!(id = %created.id, "venture created");
        Ok(created)
    }

    /// Apply a bulk modification. Unknown target IDs are skipped, so the
    /// result may be shorter than the ID list (or empty).
    pub fn modify(&self, req: VentureModification) -> Result<Vec<Venture>, ServiceError> {
        let ids = parse_target_ids(&req.ids)?;
        let fields: Vec<VentureField> = parse_fields(&req.props)?;

        let mut values = req.values;
        values.clean();
        ServiceError::check(values.validate_fields(&fields))?;

        let updated = self.store.bulk_update_fields(&ids, &fields, &values);
        info!(requested = ids.len(), updated = updated.len(), "ventures modified");
        Ok(updated)
    }

    /// Soft delete every venture in the comma separated `ids` list.
    pub fn soft_delete(&self, ids: &str) -> Result<Vec<Venture>, ServiceError> {
        let ids = parse_target_ids(ids)?;
        let updated = self.store.bulk_update_fields(
            &ids,
            &[Venture::alive_field()],
            &Venture::alive_values(false),
        );
        info!(requested = ids.len(), deleted = updated.len(), "ventures soft deleted");
        Ok(updated)
    }
}

fn parse_target_ids(raw: &str) -> Result<Vec<String>, ServiceError> {
    let ids = split_csv(raw);
    if ids.is_empty() {
        return Err(ServiceError::Validation(vec!["'ids' must not be empty.".into()]));
    }
    // IDs are stored in canonical form, so `01` or `+1` would never match.
    let violations: Vec<String> = ids
        .iter()
        .filter_map(|id| match parse_id(id) {
            Some(_) => None,
            None if is_int(id) => Some(format!("'IDs:{id}' is not a valid ID.")),
            None => Some(format!("'IDs:{id}' is not an integer.")),
        })
        .collect();
    ServiceError::check(violations)?;
    Ok(ids)
}
