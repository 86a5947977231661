//! Result-assembly stage for find-with-associations queries.
//!
//! Given a [`TableCache`] of already-fetched rows and the ordered
//! [`JoinInstruction`]s that relate its tables, [`Integrator`] attaches every
//! association's child rows to the parent rows under the association's alias.
//! One instruction per alias is a one-to-many association; two instructions
//! chained through a junction table are a many-to-many association.
//!
//! Everything here is synchronous and works on in-memory data only.

pub mod association;
pub mod config;
mod integrator;
pub mod join;
pub mod populate;
mod result;
pub mod sanitize;
pub(crate) mod utils;
pub mod validate;

pub use association::Association;
pub use config::{IntegrateConfig, MissingTablePolicy, ParentColumnRule};
pub use integrator::{integrate, Integrator};
pub use join::{left_outer_join, JoinedRow};
pub use populate::populate;
pub use result::{rows_to_json, PopulatedRow};
pub use sanitize::LinkedRow;
pub use validate::IntegrateRequest;

pub use tether_core::{record, ColumnSet, JoinInstruction, Record, TableCache, Value};
pub use tether_error::{AssociationError, Error, InvalidInputError, Result};
