//! Mesa restaurant-management backend
//!
//! CRUD HTTP endpoints for accounts, employees, guests and dining tables,
//! with dual-identity JWT authentication: staff accounts and ephemeral
//! guests each carry their own login / refresh / logout flows backed by an
//! outstanding/blacklist token ledger. Guest login reserves a table as a
//! side effect, atomically.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod state;
pub mod util;

pub use config::Config;
pub use state::AppState;
