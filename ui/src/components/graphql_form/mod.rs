//! GraphQL Mutation Forms
//!
//! Renders a resolved `FormElement` tree. Every renderer reports user input
//! as an `Edit` through its `on_edit` callback; containers wrap the edit
//! with their addressing (`Field`, `Row`) before passing it up, and the
//! generator folds it into the root model.

pub mod fields;
pub mod generator;
pub mod group_field;
pub mod list_field;

pub use generator::*;
