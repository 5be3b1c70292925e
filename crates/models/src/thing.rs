use std::fmt;
use std::str::FromStr;

use common::utils::ids::is_int;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{require_non_empty, Record};

/// A unit of work in the assembly line, optionally parent of other things.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thing {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "childrens_ids", default, skip_serializing_if = "Vec::is_empty")]
    pub children_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub additional: String,
    #[serde(default = "default_alive")]
    pub is_alive: bool,
    #[serde(rename = "self", default)]
    pub self_link: String,
}

fn default_alive() -> bool { true }

impl Default for Thing {
    fn default() -> Self {
        Self {
            id: String::new(),
            description: String::new(),
            state: String::new(),
            children_ids: Vec::new(),
            additional: String::new(),
            is_alive: true,
            self_link: String::new(),
        }
    }
}

impl Thing {
    pub fn new(description: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            state: state.into(),
            ..Self::default()
        }
    }

    /// Trims text fields and drops blank child IDs.
    pub fn clean(&mut self) {
        self.description = self.description.trim().to_string();
        self.state = self.state.trim().to_string();
        self.additional = self.additional.trim().to_string();
        self.children_ids = self
            .children_ids
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Full record validation. `is_new` skips the checks on server assigned
    /// fields.
    pub fn validate(&self, is_new: bool) -> Vec<String> {
        let mut r = Vec::new();
        require_non_empty(&self.description, &mut r, "'Description' must not be empty.");
        require_non_empty(&self.state, &mut r, "'State' must not be empty.");
        self.check_children(&mut r);
        if !is_new {
            require_non_empty(&self.id, &mut r, "The 'ID' must be present.");
            require_non_empty(&self.self_link, &mut r, "The 'Self' must be present.");
        }
        r
    }

    fn check_children(&self, r: &mut Vec<String>) {
        for c in &self.children_ids {
            if !is_int(c) {
                r.push(format!("'ChildrenIDs:{c}' is not an integer."));
            }
        }
    }
}

impl Record for Thing {
    type Field = ThingField;

    fn id(&self) -> &str { &self.id }

    fn assign_id(&mut self, id: &str) {
        self.id = id.to_string();
        self.self_link = format!("/things/{id}");
    }

    fn is_alive(&self) -> bool { self.is_alive }

    fn apply_field(&mut self, field: ThingField, source: &Self) {
        match field {
            ThingField::Description => self.description = source.description.clone(),
            ThingField::State => self.state = source.state.clone(),
            ThingField::ChildrenIds => self.children_ids = source.children_ids.clone(),
            ThingField::Additional => self.additional = source.additional.clone(),
            ThingField::IsAlive => self.is_alive = source.is_alive,
        }
    }

    fn alive_field() -> ThingField { ThingField::IsAlive }

    fn alive_values(alive: bool) -> Self {
        Self { is_alive: alive, ..Self::default() }
    }
}

/// Fields of a [`Thing`] that a bulk update may overwrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThingField {
    Description,
    State,
    ChildrenIds,
    Additional,
    IsAlive,
}

impl ThingField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::State => "state",
            Self::ChildrenIds => "children_ids",
            Self::Additional => "additional",
            Self::IsAlive => "is_alive",
        }
    }
}

impl fmt::Display for ThingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThingField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(Self::Description),
            "state" => Ok(Self::State),
            "children_ids" => Ok(Self::ChildrenIds),
            "additional" => Ok(Self::Additional),
            "is_alive" => Ok(Self::IsAlive),
            other => Err(ModelError::UnknownField(other.to_string())),
        }
    }
}
