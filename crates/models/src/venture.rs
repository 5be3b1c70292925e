use std::fmt;
use std::str::FromStr;

use common::utils::ids::{is_int, split_csv};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{require_non_empty, Record};

/// A venture groups a set of orders under one description and state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venture {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state: String,
    /// Comma separated order IDs, e.g. `"1,2,3"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub order_ids: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub extra: String,
    #[serde(default = "default_alive")]
    pub is_alive: bool,
}

fn default_alive() -> bool { true }

impl Default for Venture {
    fn default() -> Self {
        Self {
            id: String::new(),
            description: String::new(),
            state: String::new(),
            order_ids: String::new(),
            extra: String::new(),
            is_alive: true,
        }
    }
}

impl Venture {
    pub fn new(description: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            state: state.into(),
            ..Self::default()
        }
    }

    pub fn with_orders(mut self, order_ids: impl Into<String>) -> Self {
        self.order_ids = order_ids.into();
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    /// Order IDs as a list.
    pub fn orders(&self) -> Vec<String> {
        split_csv(&self.order_ids)
    }

    /// Trims text fields and normalises the order list to `a,b,c`.
    pub fn clean(&mut self) {
        self.description = self.description.trim().to_string();
        self.state = self.state.trim().to_string();
        self.extra = self.extra.trim().to_string();
        self.order_ids = self.orders().join(",");
    }

    pub fn validate(&self, is_new: bool) -> Vec<String> {
        let mut r = Vec::new();
        require_non_empty(&self.description, &mut r, "'Description' must not be empty.");
        require_non_empty(&self.state, &mut r, "'State' must not be empty.");
        self.check_orders(&mut r);
        if !is_new {
            require_non_empty(&self.id, &mut r, "The 'ID' must be present.");
        }
        r
    }

    /// Validation restricted to the fields a bulk update will copy.
    pub fn validate_fields(&self, fields: &[VentureField]) -> Vec<String> {
        let mut r = Vec::new();
        for field in fields {
            match field {
                VentureField::Description => {
                    require_non_empty(&self.description, &mut r, "'Description' must not be empty.")
                }
                VentureField::State => require_non_empty(&self.state, &mut r, "'State' must not be empty."),
                VentureField::OrderIds => self.check_orders(&mut r),
                VentureField::Extra | VentureField::IsAlive => {}
            }
        }
        r
    }

    fn check_orders(&self, r: &mut Vec<String>) {
        for o in self.orders() {
            if !is_int(&o) {
                r.push(format!("'OrderIDs:{o}' is not an integer."));
            }
        }
    }
}

impl Record for Venture {
    type Field = VentureField;

    fn id(&self) -> &str { &self.id }

    fn assign_id(&mut self, id: &str) { self.id = id.to_string(); }

    fn is_alive(&self) -> bool { self.is_alive }

    fn apply_field(&mut self, field: VentureField, source: &Self) {
        match field {
            VentureField::Description => self.description = source.description.clone(),
            VentureField::State => self.state = source.state.clone(),
            VentureField::OrderIds => self.order_ids = source.order_ids.clone(),
            VentureField::Extra => self.extra = source.extra.clone(),
            VentureField::IsAlive => self.is_alive = source.is_alive,
        }
    }

    fn alive_field() -> VentureField { VentureField::IsAlive }

    fn alive_values(alive: bool) -> Self {
        Self { is_alive: alive, ..Self::default() }
    }
}

/// Bulk modification request: copy `props` from `values` onto every venture
/// listed in `ids`. Both lists are comma separated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VentureModification {
    #[serde(default)]
    pub ids: String,
    #[serde(default)]
    pub props: String,
    #[serde(default)]
    pub values: Venture,
}

/// Fields of a [`Venture`] that a bulk update may overwrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VentureField {
    Description,
    State,
    OrderIds,
    Extra,
    IsAlive,
}

impl VentureField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::State => "state",
            Self::OrderIds => "order_ids",
            Self::Extra => "extra",
            Self::IsAlive => "is_alive",
        }
    }
}

impl fmt::Display for VentureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VentureField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(Self::Description),
            "state" => Ok(Self::State),
            "order_ids" => Ok(Self::OrderIds),
            "extra" => Ok(Self::Extra),
            "is_alive" => Ok(Self::IsAlive),
            other => Err(ModelError::UnknownField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_fields;

    #[test]
    fn clean_normalises_order_list() {
        let mut v = Venture::new(" Black blizzard ", " started ").with_orders(" 1, 2 ,,3 ");
        v.clean();
        assert_eq!(v.description, "Black blizzard");
        assert_eq!(v.state, "started");
        assert_eq!(v.order_ids, "1,2,3");
    }

    #[test]
    fn validate_flags_non_integer_orders() {
        let v = Venture::new("", "").with_orders("invalid");
        assert_eq!(
            v.validate(true),
            vec![
                "'Description' must not be empty.",
                "'State' must not be empty.",
                "'OrderIDs:invalid' is not an integer.",
            ]
        );
    }

    #[test]
    fn validate_fields_only_checks_named_fields() {
        let v = Venture::default();
        assert!(v.validate_fields(&[VentureField::Extra, VentureField::IsAlive]).is_empty());
        assert_eq!(
            v.validate_fields(&[VentureField::State]),
            vec!["'State' must not be empty."]
        );
    }

    #[test]
    fn parse_fields_accepts_spaced_list_and_dedupes() {
        let fields: Vec<VentureField> = parse_fields("description, state, order_ids, extra, state").unwrap();
        assert_eq!(
            fields,
            vec![
                VentureField::Description,
                VentureField::State,
                VentureField::OrderIds,
                VentureField::Extra,
            ]
        );
    }

    #[test]
    fn parse_fields_rejects_unknown_and_empty() {
        let err = parse_fields::<VentureField>("state, is_dead").unwrap_err();
        assert_eq!(err, ModelError::UnknownField("is_dead".into()));
        assert!(matches!(parse_fields::<VentureField>(" , "), Err(ModelError::Validation(_))));
    }

    #[test]
    fn apply_field_copies_only_that_field() {
        let mut stored = Venture::new("old", "open").with_extra("keep");
        let values = Venture::new("new", "closed").with_extra("drop");
        stored.apply_field(VentureField::Description, &values);
        assert_eq!(stored.description, "new");
        assert_eq!(stored.state, "open");
        assert_eq!(stored.extra, "keep");
    }
}
