pub mod dto;
pub mod handlers;
pub mod model;
pub mod repo;

pub use model::{NewUser, UpdateOutcome, User, UserChanges};
pub use repo::UserRepository;
