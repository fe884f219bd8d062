//! Closed domain enumerations
//!
//! Roles and table statuses are closed sets; every value stored in the
//! database or embedded in a token is one of these variants, serialized
//! in canonical uppercase form.

pub mod role;
pub mod table_status;

pub use role::Role;
pub use table_status::TableStatus;
