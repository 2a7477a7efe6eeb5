//! Entity to model mappers
//!
//! Conversions between the domain entity (account-core) and database rows.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `flag_to_db` / `flag_from_db`: SMALLINT encoding of boolean flags

mod user;

pub use user::{flag_from_db, flag_to_db};
