//! Resource traits
//!
//! Every CRUD screen works on the same three pieces: an entity that lives
//! under a REST path, a draft that mirrors it in a form, and a search
//! predicate for the list above the form.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::types::EntityId;
use crate::validation::Violation;

/// Whether a form creates a new entity or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Client-side substring search over an entity's text fields
pub trait Searchable {
    /// Text fields the list search looks at
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match; a blank term matches everything
    fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// An entity exposed by the backend as a REST collection
pub trait Resource:
    Serialize + DeserializeOwned + Searchable + Clone + Send + Sync + 'static
{
    /// Collection path relative to the API prefix, e.g. `members`
    const PATH: &'static str;
    /// Human-readable singular name used in toasts and logs
    const NAME: &'static str;

    type Draft: Draft<Entity = Self>;

    fn id(&self) -> &EntityId;
}

/// Local, not-yet-submitted copy of an entity bound to form inputs
pub trait Draft: Serialize + Clone + Default + Send + Sync {
    type Entity;

    /// Pre-fill the form for editing
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Every field-level problem; empty means the draft may be submitted
    fn validate(&self, mode: FormMode) -> Vec<Violation>;
}
