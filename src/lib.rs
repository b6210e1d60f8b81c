pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod schema;
pub mod state;
pub mod users;

pub use error::{RepoError, Result};
pub use users::{NewUser, UpdateOutcome, User, UserChanges, UserRepository};
