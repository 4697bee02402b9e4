//! # cylc-forms - GraphQL mutation forms for Cylc
//!
//! Builds input forms for Cylc workflow mutations from an introspected
//! GraphQL schema. Each argument type is resolved to a renderer (text,
//! number, switch, select, list or group) with presentation props and
//! validation rules, and edits flow back up into one JSON model that doubles
//! as the mutation's variables.
//!
//! ## Features
//!
//! - **Type registry**: built-in GraphQL and Cylc scalars plus configured extras
//! - **Resolution**: `NON_NULL`, `LIST`, `ENUM` and `INPUT_OBJECT` wrappers, depth bounded
//! - **Propagation**: explicit [`model::Edit`] messages and `on_input` listeners
//! - **Validation**: cycle points, task IDs, runtime configuration items and more
//! - **Task filtering**: name substring and state selection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cylc_forms::config::Settings;
//! use cylc_forms::model::Edit;
//! use cylc_forms::mutation::MutationForm;
//! use cylc_forms::registry::Registry;
//! use cylc_forms::resolver::Resolver;
//! use cylc_forms::schema::SchemaIndex;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let registry = Registry::from_settings(&settings)?;
//!     let schema = SchemaIndex::from_introspection(&std::fs::read_to_string("introspection.json")?)?;
//!     let resolver = Resolver::from_settings(&registry, &schema, &settings);
//!
//!     let mut form = MutationForm::new(&schema, &resolver, "hold")?;
//!     form.edit("workflows", Edit::AddRow)?;
//!     println!("{}", form.variables());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod mutation;
pub mod registry;
pub mod resolver;
pub mod rules;
pub mod schema;

pub use error::{FormError, Result};
pub use model::{Edit, Form, ValidationReport};
pub use mutation::MutationForm;
pub use registry::Registry;
pub use resolver::{FormElement, Resolver};
pub use schema::SchemaIndex;
