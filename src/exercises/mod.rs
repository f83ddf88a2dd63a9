//! Exercise data: the catalog, its records, and the stretching rules.

mod catalog;
mod rules;
mod types;

pub use catalog::{CatalogState, ExerciseCatalog};
pub use rules::{Rule, RULES};
pub use types::{Exercise, Localized};
