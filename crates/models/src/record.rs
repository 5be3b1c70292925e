use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use common::utils::ids::split_csv;

use crate::errors::ModelError;

/// Contract between a record kind and the generic in-memory store.
///
/// The store only needs to read and assign the ID, check liveness and copy
/// individual named fields from one value onto another. Everything else
/// about a record is opaque to it.
pub trait Record: Clone + Send + Sync + 'static {
    /// Closed set of fields a bulk update may overwrite.
    type Field: Copy + Eq + Hash + Debug + Display + FromStr<Err = ModelError> + Send + Sync;

    fn id(&self) -> &str;

    /// Called once by the store when the record is created.
    fn assign_id(&mut self, id: &str);

    fn is_alive(&self) -> bool;

    /// Overwrite `field` on `self` with the value held by `source`.
    fn apply_field(&mut self, field: Self::Field, source: &Self);

    /// Field that carries the soft delete flag.
    fn alive_field() -> Self::Field;

    /// A value that only carries `is_alive = alive`, used as bulk update source.
    fn alive_values(alive: bool) -> Self;
}

/// Parses a comma separated field list such as `"description, state"`.
///
/// Duplicate names collapse into one entry. An empty list is a validation
/// failure and any unknown name aborts the whole parse.
pub fn parse_fields<F>(raw: &str) -> Result<Vec<F>, ModelError>
where
    F: FromStr<Err = ModelError> + PartialEq,
{
    let names = split_csv(raw);
    if names.is_empty() {
        return Err(ModelError::Validation(vec!["'props' must not be empty.".into()]));
    }
    let mut fields = Vec::with_capacity(names.len());
    for name in names {
        let field = name.parse::<F>()?;
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    Ok(fields)
}

pub(crate) fn require_non_empty(value: &str, violations: &mut Vec<String>, message: &str) {
    if value.is_empty() {
        violations.push(message.to_string());
    }
}
