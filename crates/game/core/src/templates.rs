//! Immutable registry of prototype actors and items.
//!
//! Content is loaded once into a [`TemplateRegistry`]. Spawning deep-clones a
//! template (body parts, stacks and inventory included) and hands ownership of
//! the copy to the caller; templates themselves never change.

use std::collections::BTreeMap;
use std::fmt;

use crate::body::{Part, PartKind};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Actor, Item};

/// Identifier of a template, e.g. `"orc"` or `"phantom_arm"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Conventional id of the spirit replacement for a part kind.
    pub fn phantom(kind: PartKind) -> Self {
        Self(format!("phantom_{kind}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A prototype entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Template {
    Actor(Box<Actor>),
    Item(Item),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown template `{0}`")]
    Unknown(TemplateId),

    #[error("template `{0}` is already registered")]
    Duplicate(TemplateId),

    #[error("template `{0}` is not an actor")]
    NotAnActor(TemplateId),

    #[error("template `{0}` is not an item")]
    NotAnItem(TemplateId),

    #[error("template `{0}` does not carry a body part")]
    NotAPart(TemplateId),
}

impl GameError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TemplateError::Duplicate(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TemplateError::Unknown(_) => "TEMPLATE_UNKNOWN",
            TemplateError::Duplicate(_) => "TEMPLATE_DUPLICATE",
            TemplateError::NotAnActor(_) => "TEMPLATE_NOT_ACTOR",
            TemplateError::NotAnItem(_) => "TEMPLATE_NOT_ITEM",
            TemplateError::NotAPart(_) => "TEMPLATE_NOT_PART",
        }
    }
}

/// Freshly spawned entity, owned by the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum Spawned {
    Actor(Box<Actor>),
    Item(Item),
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateRegistry {
    templates: BTreeMap<TemplateId, Template>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TemplateId, template: Template) -> Result<(), TemplateError> {
        if self.templates.contains_key(&id) {
            return Err(TemplateError::Duplicate(id));
        }
        self.templates.insert(id, template);
        Ok(())
    }

    pub fn insert_actor(&mut self, id: impl Into<String>, actor: Actor) -> Result<(), TemplateError> {
        self.insert(TemplateId::new(id), Template::Actor(Box::new(actor)))
    }

    pub fn insert_item(&mut self, id: impl Into<String>, item: Item) -> Result<(), TemplateError> {
        self.insert(TemplateId::new(id), Template::Item(item))
    }

    pub fn get(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.get(id)
    }

    pub fn contains(&self, id: &TemplateId) -> bool {
        self.templates.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &TemplateId> {
        self.templates.keys()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn lookup(&self, id: &TemplateId) -> Result<&Template, TemplateError> {
        self.templates
            .get(id)
            .ok_or_else(|| TemplateError::Unknown(id.clone()))
    }

    /// Deep copy of any template.
    pub fn spawn(&self, id: &TemplateId) -> Result<Spawned, TemplateError> {
        Ok(match self.lookup(id)? {
            Template::Actor(actor) => Spawned::Actor(actor.clone()),
            Template::Item(item) => Spawned::Item(item.clone()),
        })
    }

    pub fn spawn_actor(&self, id: &TemplateId) -> Result<Actor, TemplateError> {
        match self.lookup(id)? {
            Template::Actor(actor) => Ok(actor.as_ref().clone()),
            Template::Item(_) => Err(TemplateError::NotAnActor(id.clone())),
        }
    }

    pub fn spawn_item(&self, id: &TemplateId) -> Result<Item, TemplateError> {
        match self.lookup(id)? {
            Template::Item(item) => Ok(item.clone()),
            Template::Actor(_) => Err(TemplateError::NotAnItem(id.clone())),
        }
    }

    /// Part held by a part-carrying item template.
    pub fn spawn_part(&self, id: &TemplateId) -> Result<Part, TemplateError> {
        self.spawn_item(id)?
            .into_part()
            .ok_or_else(|| TemplateError::NotAPart(id.clone()))
    }

    /// Spirit-form replacement used by the sacrifice ritual.
    pub fn phantom_part(&self, kind: PartKind) -> Result<Part, TemplateError> {
        self.spawn_part(&TemplateId::phantom(kind))
    }
}
