//! Port contracts for user lookup.

pub mod repository;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};

#[cfg(test)]
pub use repository::MockUserRepository;
